//! Shared test infrastructure for gesture-button integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use core::cell::Cell;
use gesture_button::{ButtonEngine, ButtonState, Millis, PwmOutput, RawInput, SettingsStore, TimeSource};

// ============================================================================
// Mock Time Source
// ============================================================================

/// Mock time source with controllable time advancement
pub struct MockTimeSource {
    current_time: Cell<Millis>,
}

impl MockTimeSource {
    pub fn new() -> Self {
        Self::starting_at(0)
    }

    pub fn starting_at(millis: u32) -> Self {
        Self {
            current_time: Cell::new(Millis(millis)),
        }
    }

    /// Advance time by the given number of milliseconds, wrapping like a hardware counter
    pub fn advance(&self, millis: u32) {
        let current = self.current_time.get();
        self.current_time.set(current.wrapping_add(millis));
    }
}

impl TimeSource<Millis> for MockTimeSource {
    fn now(&self) -> Millis {
        self.current_time.get()
    }
}

// ============================================================================
// Mock Input
// ============================================================================

/// Raw input whose level the test sets directly
pub struct ScriptedInput<'a> {
    level: &'a Cell<bool>,
}

impl<'a> ScriptedInput<'a> {
    pub fn new(level: &'a Cell<bool>) -> Self {
        Self { level }
    }
}

impl RawInput for ScriptedInput<'_> {
    fn is_pressed(&mut self) -> bool {
        self.level.get()
    }
}

// ============================================================================
// Mock PWM
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PwmCall {
    Pulse(u32),
    Suspend,
    Resume,
}

/// Mock PWM that records every call for testing
pub struct MockPwm {
    pub pulse_ns: u32,
    pub active: bool,
    history: heapless::Vec<PwmCall, 64>,
}

impl MockPwm {
    pub fn new() -> Self {
        Self {
            pulse_ns: 0,
            active: false,
            history: heapless::Vec::new(),
        }
    }

    pub fn history(&self) -> &[PwmCall] {
        &self.history
    }

    /// Distinct non-repeating pulse widths, in order
    pub fn pulse_trace(&self) -> heapless::Vec<u32, 64> {
        let mut trace = heapless::Vec::new();
        for call in &self.history {
            if let PwmCall::Pulse(ns) = call {
                if trace.last() != Some(ns) {
                    let _ = trace.push(*ns);
                }
            }
        }
        trace
    }
}

impl PwmOutput for MockPwm {
    fn set_pulse(&mut self, _period_ns: u32, pulse_ns: u32) {
        self.pulse_ns = pulse_ns;
        let _ = self.history.push(PwmCall::Pulse(pulse_ns));
    }

    fn suspend(&mut self) {
        self.active = false;
        let _ = self.history.push(PwmCall::Suspend);
    }

    fn resume(&mut self) {
        self.active = true;
        let _ = self.history.push(PwmCall::Resume);
    }
}

// ============================================================================
// Mock Settings Store
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreFailure;

/// In-memory key-value store with failure injection
pub struct MockStore {
    records: heapless::Vec<(u16, u8), 8>,
    pub fail_reads: bool,
    pub fail_writes: bool,
    pub writes: usize,
}

impl MockStore {
    pub fn new() -> Self {
        Self {
            records: heapless::Vec::new(),
            fail_reads: false,
            fail_writes: false,
            writes: 0,
        }
    }

    pub fn with_record(mut self, id: u16, value: u8) -> Self {
        self.put(id, value);
        self
    }

    pub fn get(&self, id: u16) -> Option<u8> {
        self.records.iter().find(|(k, _)| *k == id).map(|&(_, v)| v)
    }

    fn put(&mut self, id: u16, value: u8) {
        if let Some(entry) = self.records.iter_mut().find(|(k, _)| *k == id) {
            entry.1 = value;
        } else {
            let _ = self.records.push((id, value));
        }
    }
}

impl SettingsStore for MockStore {
    type Error = StoreFailure;

    fn read(&mut self, id: u16, buf: &mut [u8]) -> Result<usize, Self::Error> {
        if self.fail_reads {
            return Err(StoreFailure);
        }
        match self.get(id) {
            Some(value) => {
                buf[0] = value;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    fn write(&mut self, id: u16, data: &[u8]) -> Result<(), Self::Error> {
        if self.fail_writes {
            return Err(StoreFailure);
        }
        self.writes += 1;
        self.put(id, data[0]);
        Ok(())
    }
}

// ============================================================================
// Test Helper Functions
// ============================================================================

/// Drives an engine with a fixed-period poll loop and records every state it passes through
pub struct Driver {
    pub engine: ButtonEngine<Millis>,
    pub now: u32,
    pub period: u32,
    pub trace: heapless::Vec<ButtonState, 256>,
}

impl Driver {
    pub fn new(engine: ButtonEngine<Millis>) -> Self {
        Self::with_period(engine, 10)
    }

    pub fn with_period(engine: ButtonEngine<Millis>, period: u32) -> Self {
        Self::starting_at(engine, period, 0)
    }

    pub fn starting_at(engine: ButtonEngine<Millis>, period: u32, now: u32) -> Self {
        let mut trace = heapless::Vec::new();
        let _ = trace.push(engine.state());
        Self {
            engine,
            now,
            period,
            trace,
        }
    }

    /// One poll at the current time, then the clock moves one period on
    pub fn poll(&mut self, pressed: bool) {
        if self.engine.poll(pressed, Millis(self.now)) {
            let _ = self.trace.push(self.engine.state());
        }
        self.now = self.now.wrapping_add(self.period);
    }

    /// Polls with a constant level for `millis`
    pub fn hold_level(&mut self, pressed: bool, millis: u32) {
        let polls = millis / self.period;
        for _ in 0..polls {
            self.poll(pressed);
        }
    }

    /// Polls with a constant level until the engine reaches `state`, at most `max_polls` times
    pub fn run_until(&mut self, pressed: bool, state: ButtonState, max_polls: usize) -> bool {
        for _ in 0..max_polls {
            if self.engine.state() == state {
                return true;
            }
            self.poll(pressed);
        }
        self.engine.state() == state
    }

    pub fn trace(&self) -> &[ButtonState] {
        &self.trace
    }
}
