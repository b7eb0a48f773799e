//! A complete button: raw input, debouncer, gesture engine and clock.

use crate::debounce::Debouncer;
use crate::engine::ButtonEngine;
use crate::input::{EdgeLatch, RawInput};
use crate::time::{TimeInstant, TimeSource};
use crate::types::ButtonConfig;

/// Drives a [`ButtonEngine`] from an injected raw input and time source.
///
/// Call [`tick`](Self::tick) from a periodic loop (every 10-20 ms works
/// well), then query the engine for events.
///
/// # Type Parameters
/// * `'t` - Lifetime of the time source reference
/// * `I` - Time instant type
/// * `P` - Raw input implementation
/// * `T` - Time source implementation
pub struct Button<'t, I: TimeInstant, P: RawInput, T: TimeSource<I>> {
    input: P,
    time_source: &'t T,
    debouncer: Debouncer<I>,
    engine: ButtonEngine<I>,
}

impl<'t, I: TimeInstant, P: RawInput, T: TimeSource<I>> Button<'t, I, P, T> {
    /// Creates a button with the default thresholds.
    pub fn new(input: P, time_source: &'t T) -> Self {
        Self::with_config(input, time_source, ButtonConfig::default())
    }

    /// Creates a button with custom thresholds.
    pub fn with_config(input: P, time_source: &'t T, config: ButtonConfig) -> Self {
        Self {
            input,
            time_source,
            debouncer: Debouncer::new(config.debounce_ms),
            engine: ButtonEngine::new(config),
        }
    }

    /// Samples the input, debounces it and polls the engine once.
    ///
    /// Returns true if the engine changed state.
    pub fn tick(&mut self) -> bool {
        let now = self.time_source.now();
        let raw = self.input.is_pressed();
        let level = self.debouncer.update(raw, now);
        self.engine.poll(level, now)
    }

    /// Discards the gesture in progress. See [`ButtonEngine::reset`].
    pub fn reset(&mut self) {
        self.engine.reset();
    }

    /// Returns the gesture engine for event queries.
    pub fn engine(&self) -> &ButtonEngine<I> {
        &self.engine
    }

    /// Returns the debounced level the engine last saw.
    pub fn is_pressed(&self) -> bool {
        self.debouncer.stable()
    }

    /// Ends a pending timeout early. See [`ButtonEngine::timeout_after`].
    pub fn timeout_after(&mut self, ms: u32) -> bool {
        let now = self.time_source.now();
        self.engine.timeout_after(ms, now)
    }

    /// [`ButtonEngine::press_for`] against the time source.
    pub fn press_for(&self, ms: u32) -> bool {
        self.engine.press_for(ms, self.time_source.now())
    }

    /// [`ButtonEngine::hold_for`] against the time source.
    pub fn hold_for(&self, ms: u32) -> bool {
        self.engine.hold_for(ms, self.time_source.now())
    }

    /// [`ButtonEngine::step_for`] against the time source.
    pub fn step_for(&self, ms: u32) -> bool {
        self.engine.step_for(ms, self.time_source.now())
    }

    /// Releases the raw input.
    pub fn into_input(self) -> P {
        self.input
    }
}

impl<'t, I: TimeInstant, T: TimeSource<I>> Button<'t, I, &'t EdgeLatch<I>, T> {
    /// Like [`tick`](Self::tick), but first consumes a pending latched edge so
    /// the settle window starts at the hardware edge.
    pub fn tick_latched(&mut self) -> bool {
        if let Some((level, at)) = self.input.take_edge() {
            self.debouncer.note_edge(level, at);
        }
        self.tick()
    }
}
