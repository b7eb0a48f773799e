//! Time abstraction traits for platform-agnostic timing.
//!
//! The engine only ever asks how many milliseconds passed between two
//! instants, so any monotonic clock works as long as `duration_since`
//! stays correct across counter wraparound. [`Millis`] is a ready-made
//! instant for the common case of a wrapping `u32` millisecond tick.

/// Trait for abstracting time sources.
pub trait TimeSource<I: TimeInstant> {
    /// Returns the current time instant.
    fn now(&self) -> I;
}

/// Trait abstraction for duration types.
pub trait TimeDuration: Copy + PartialEq {
    /// Zero duration constant.
    const ZERO: Self;

    /// Converts duration to milliseconds.
    fn as_millis(&self) -> u64;

    /// Creates duration from milliseconds.
    fn from_millis(millis: u64) -> Self;
}

/// Trait abstraction for instant types.
pub trait TimeInstant: Copy {
    /// Duration type for this instant.
    type Duration: TimeDuration;

    /// Calculates duration since an earlier instant.
    ///
    /// Must be wrap-safe: an instant taken after the underlying counter
    /// overflowed is still "later" than one taken before it.
    fn duration_since(&self, earlier: Self) -> Self::Duration;
}

/// Milliseconds elapsed from `earlier` to `now`, saturated to `u32`.
#[inline]
pub fn elapsed_ms<I: TimeInstant>(now: I, earlier: I) -> u32 {
    let millis = now.duration_since(earlier).as_millis();
    u32::try_from(millis).unwrap_or(u32::MAX)
}

/// Duration in whole milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MillisDuration(pub u32);

impl TimeDuration for MillisDuration {
    const ZERO: Self = MillisDuration(0);

    fn as_millis(&self) -> u64 {
        self.0 as u64
    }

    fn from_millis(millis: u64) -> Self {
        MillisDuration(u32::try_from(millis).unwrap_or(u32::MAX))
    }
}

/// Instant read from a wrapping `u32` millisecond counter.
///
/// Wraps after ~49.7 days. Intervals shorter than that are measured
/// correctly across the wrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Millis(pub u32);

impl Millis {
    /// Returns the raw counter value.
    pub fn as_millis(&self) -> u32 {
        self.0
    }

    /// Returns the instant `millis` later, wrapping like the counter does.
    pub fn wrapping_add(self, millis: u32) -> Self {
        Millis(self.0.wrapping_add(millis))
    }
}

impl TimeInstant for Millis {
    type Duration = MillisDuration;

    fn duration_since(&self, earlier: Self) -> Self::Duration {
        MillisDuration(self.0.wrapping_sub(earlier.0))
    }
}

/// A bounded wait expired before its condition became true.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimedOut {
    /// The timeout that elapsed, in milliseconds.
    pub timeout_ms: u32,
}

impl core::fmt::Display for TimedOut {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "condition not met within {} ms", self.timeout_ms)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for TimedOut {}

/// Polls `condition` until it returns `true` or `timeout_ms` passes.
///
/// Replacement for open-ended register spins such as waiting on a
/// peripheral's "done" flag. The condition is checked once more after the
/// deadline is seen, so a flag that sets right at the deadline still wins.
///
/// # Errors
/// Returns [`TimedOut`] if the condition never held within the timeout.
pub fn wait_until<I, T, F>(time_source: &T, timeout_ms: u32, mut condition: F) -> Result<(), TimedOut>
where
    I: TimeInstant,
    T: TimeSource<I>,
    F: FnMut() -> bool,
{
    let start = time_source.now();

    loop {
        if condition() {
            return Ok(());
        }

        if elapsed_ms(time_source.now(), start) >= timeout_ms {
            if condition() {
                return Ok(());
            }
            warn!("wait timed out after {} ms", timeout_ms);
            return Err(TimedOut { timeout_ms });
        }

        core::hint::spin_loop();
    }
}
