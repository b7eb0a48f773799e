//! Gesture-to-action bindings.

use heapless::Vec;

use crate::engine::ButtonEngine;
use crate::motor::MotorAction;
use crate::time::TimeInstant;

/// A gesture an application can bind an action to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Gesture {
    /// Button went down, with this many earlier clicks in the sequence.
    Press(u8),
    /// A click sequence of exactly this many clicks resolved.
    Clicks(u8),
    /// Held past the hold threshold, after this many clicks.
    Hold(u8),
    /// One stepping pulse.
    Step,
    /// Released after a hold or stepping.
    ReleaseHoldStep,
    /// Inactivity timeout after an interaction.
    Timeout,
}

impl Gesture {
    /// Returns true if the engine is reporting this gesture right now.
    pub fn is_active<I: TimeInstant>(self, engine: &ButtonEngine<I>) -> bool {
        match self {
            Gesture::Press(clicks) => engine.press_with(clicks),
            Gesture::Clicks(clicks) => engine.has_clicks_with(clicks),
            Gesture::Hold(clicks) => engine.hold_with(clicks),
            Gesture::Step => engine.step(),
            Gesture::ReleaseHoldStep => engine.release_hold_step(),
            Gesture::Timeout => engine.timeout(),
        }
    }
}

/// Binding table errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BindingError {
    /// Table capacity exceeded.
    CapacityExceeded,
}

impl core::fmt::Display for BindingError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BindingError::CapacityExceeded => write!(f, "binding table is full"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BindingError {}

/// Fixed-capacity table mapping gestures to motor actions.
///
/// # Type Parameters
/// * `N` - Maximum number of bindings
#[derive(Debug, Clone)]
pub struct GestureMap<const N: usize> {
    bindings: Vec<(Gesture, MotorAction), N>,
}

impl<const N: usize> GestureMap<N> {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self { bindings: Vec::new() }
    }

    /// Adds a binding. Earlier bindings win when several gestures match.
    ///
    /// # Errors
    /// Returns `CapacityExceeded` if the table is full.
    pub fn bind(&mut self, gesture: Gesture, action: MotorAction) -> Result<(), BindingError> {
        self.bindings
            .push((gesture, action))
            .map_err(|_| BindingError::CapacityExceeded)
    }

    /// Returns the action bound to the gesture the engine currently reports.
    pub fn resolve<I: TimeInstant>(&self, engine: &ButtonEngine<I>) -> Option<MotorAction> {
        self.bindings
            .iter()
            .find(|(gesture, _)| gesture.is_active(engine))
            .map(|&(_, action)| action)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl<const N: usize> Default for GestureMap<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl GestureMap<3> {
    /// Single click toggles the motor, double click resets duty, a long
    /// hold runs the sweep test.
    ///
    /// The sweep fires on the hold event, at the configured hold threshold.
    pub fn motor_defaults() -> Self {
        Self {
            bindings: Vec::from_array([
                (Gesture::Clicks(1), MotorAction::Toggle),
                (Gesture::Clicks(2), MotorAction::ResetDuty),
                (Gesture::Hold(0), MotorAction::SweepTest),
            ]),
        }
    }
}
