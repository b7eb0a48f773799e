//! Raw level sources.
//!
//! The engine is decoupled from how the line is sampled: anything that can
//! answer "is the button down right now" implements [`RawInput`]. Adapters
//! are provided for closures, `embedded-hal` input pins and the interrupt
//! [`EdgeLatch`].

use core::cell::Cell;

use critical_section::Mutex;
use embedded_hal::digital::InputPin;

use crate::time::TimeInstant;

/// Capability to read the current raw level of the button line.
pub trait RawInput {
    /// Returns true if the line currently reads as pressed.
    ///
    /// Must not block. Read failures are handled inside the implementation.
    fn is_pressed(&mut self) -> bool;
}

/// [`RawInput`] backed by a closure. Build with [`from_fn`].
#[derive(Debug, Clone, Copy)]
pub struct FnInput<F>(F);

/// Wraps a closure as a [`RawInput`].
pub fn from_fn<F: FnMut() -> bool>(f: F) -> FnInput<F> {
    FnInput(f)
}

impl<F: FnMut() -> bool> RawInput for FnInput<F> {
    fn is_pressed(&mut self) -> bool {
        (self.0)()
    }
}

/// Pin that reads high while pressed. A failed read counts as released.
#[derive(Debug)]
pub struct ActiveHigh<P>(pub P);

impl<P: InputPin> RawInput for ActiveHigh<P> {
    fn is_pressed(&mut self) -> bool {
        self.0.is_high().unwrap_or(false)
    }
}

/// Pin that reads low while pressed (pull-up wiring). A failed read counts
/// as released.
#[derive(Debug)]
pub struct ActiveLow<P>(pub P);

impl<P: InputPin> RawInput for ActiveLow<P> {
    fn is_pressed(&mut self) -> bool {
        self.0.is_low().unwrap_or(false)
    }
}

#[derive(Clone, Copy)]
struct Latched<I> {
    level: bool,
    edge_at: Option<I>,
}

/// Level + timestamp latch shared between an edge interrupt and the poller.
///
/// The interrupt handler calls [`record`](Self::record); the poller reads the
/// latest level and consumes the pending edge. Both sides go through a
/// critical section, so the pair is never observed torn. The latch holds
/// samples only; gesture state lives with the poller.
pub struct EdgeLatch<I> {
    inner: Mutex<Cell<Latched<I>>>,
}

impl<I: TimeInstant> EdgeLatch<I> {
    /// Creates a latch with the given initial level and no pending edge.
    pub const fn new(level: bool) -> Self {
        Self {
            inner: Mutex::new(Cell::new(Latched {
                level,
                edge_at: None,
            })),
        }
    }

    /// Records an edge. Called from the interrupt handler.
    pub fn record(&self, level: bool, at: I) {
        critical_section::with(|cs| {
            self.inner.borrow(cs).set(Latched {
                level,
                edge_at: Some(at),
            });
        });
    }

    /// Returns the most recently recorded level.
    pub fn level(&self) -> bool {
        critical_section::with(|cs| self.inner.borrow(cs).get().level)
    }

    /// Takes the pending edge, if any, as `(level, instant)`.
    pub fn take_edge(&self) -> Option<(bool, I)> {
        critical_section::with(|cs| {
            let cell = self.inner.borrow(cs);
            let mut latched = cell.get();
            let edge = latched.edge_at.take().map(|at| (latched.level, at));
            cell.set(latched);
            edge
        })
    }
}

impl<I: TimeInstant> RawInput for &EdgeLatch<I> {
    fn is_pressed(&mut self) -> bool {
        self.level()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::Millis;
    use core::convert::Infallible;
    use embedded_hal::digital::ErrorType;

    struct FixedPin(bool);

    impl ErrorType for FixedPin {
        type Error = Infallible;
    }

    impl InputPin for FixedPin {
        fn is_high(&mut self) -> Result<bool, Self::Error> {
            Ok(self.0)
        }

        fn is_low(&mut self) -> Result<bool, Self::Error> {
            Ok(!self.0)
        }
    }

    #[test]
    fn pin_polarity_adapters() {
        assert!(ActiveHigh(FixedPin(true)).is_pressed());
        assert!(!ActiveHigh(FixedPin(false)).is_pressed());
        assert!(ActiveLow(FixedPin(false)).is_pressed());
        assert!(!ActiveLow(FixedPin(true)).is_pressed());
    }

    #[test]
    fn closure_input() {
        let mut level = false;
        let mut input = from_fn(|| {
            level = !level;
            level
        });
        assert!(input.is_pressed());
        assert!(!input.is_pressed());
    }

    #[test]
    fn latch_edge_is_consumed_once() {
        let latch: EdgeLatch<Millis> = EdgeLatch::new(false);
        assert_eq!(latch.take_edge(), None);

        latch.record(true, Millis(10));
        latch.record(false, Millis(12));
        latch.record(true, Millis(15));

        assert!(latch.level());
        assert_eq!(latch.take_edge(), Some((true, Millis(15))));
        assert_eq!(latch.take_edge(), None);
        assert!(latch.level());
    }
}
