//! Integration tests for the `log` backend of the internal logging macros

#![cfg(feature = "log")]

mod common;
use common::*;

use core::sync::atomic::{AtomicUsize, Ordering};
use gesture_button::{ButtonEngine, Millis, MotorAction, MotorController};
use log::{Level, LevelFilter, Log, Metadata, Record};

static TRACES: AtomicUsize = AtomicUsize::new(0);
static WARNINGS: AtomicUsize = AtomicUsize::new(0);

struct CountingLogger;

impl Log for CountingLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        match record.level() {
            Level::Trace => TRACES.fetch_add(1, Ordering::SeqCst),
            Level::Warn => WARNINGS.fetch_add(1, Ordering::SeqCst),
            _ => 0,
        };
    }

    fn flush(&self) {}
}

static LOGGER: CountingLogger = CountingLogger;

#[test]
fn transitions_and_failed_writes_reach_the_logger() {
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(LevelFilter::Trace);

    let mut engine: ButtonEngine<Millis> = ButtonEngine::default();
    engine.poll(true, Millis(0));
    assert!(TRACES.load(Ordering::SeqCst) >= 1);

    let mut store = MockStore::new();
    store.fail_writes = true;
    let mut motor: MotorController<Millis, MockPwm, MockStore> =
        MotorController::new(MockPwm::new(), store);
    motor.handle(MotorAction::Toggle, Millis(0));
    assert!(WARNINGS.load(Ordering::SeqCst) >= 1);
}
