//! Core types: machine states, gesture events and timing configuration.

/// Settle time a new raw level must persist before it is trusted.
pub const DEBOUNCE_MS: u32 = 50;
/// Press duration after which a press becomes a hold.
pub const HOLD_MS: u32 = 1000;
/// Hold duration after which stepping starts.
pub const STEP_MS: u32 = 400;
/// Period between consecutive steps.
pub const STEP_PERIOD_MS: u32 = 1000;
/// How long to wait for the next click of a multi-click sequence.
pub const CLICK_WINDOW_MS: u32 = 500;
/// Inactivity after the last interaction before `Timeout` fires.
pub const TIMEOUT_MS: u32 = 1000;

/// The state of a button's gesture machine.
///
/// Event states last for exactly one poll; waiting states persist until
/// their input or time condition fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonState {
    /// Nothing happening.
    #[default]
    Idle,
    /// Button went down. Event.
    Press,
    /// Pressed, waiting to see if it becomes a hold.
    WaitHold,
    /// Held past the hold threshold. Event.
    Hold,
    /// Holding, waiting for stepping to start.
    WaitStep,
    /// One repeat pulse. Event.
    Step,
    /// Stepping, waiting for the next pulse.
    WaitNextStep,
    /// Released after a hold, before any step. Event.
    ReleaseHold,
    /// Released after stepping. Event.
    ReleaseStep,
    /// Released before the hold threshold. Event.
    Click,
    /// Released, whatever came before. Event.
    Release,
    /// Waiting for another click of a multi-click sequence.
    WaitClicks,
    /// Click sequence resolved. Event.
    Clicks,
    /// Waiting for post-interaction inactivity.
    WaitTimeout,
    /// Inactivity timeout after an interaction. Event.
    Timeout,
}

impl ButtonState {
    /// Returns the event this state represents, if it is an event state.
    pub fn event(self) -> Option<ButtonEvent> {
        match self {
            ButtonState::Press => Some(ButtonEvent::Press),
            ButtonState::Click => Some(ButtonEvent::Click),
            ButtonState::Hold => Some(ButtonEvent::Hold),
            ButtonState::ReleaseHold => Some(ButtonEvent::ReleaseHold),
            ButtonState::Step => Some(ButtonEvent::Step),
            ButtonState::ReleaseStep => Some(ButtonEvent::ReleaseStep),
            ButtonState::Release => Some(ButtonEvent::Release),
            ButtonState::Clicks => Some(ButtonEvent::Clicks),
            ButtonState::Timeout => Some(ButtonEvent::Timeout),
            ButtonState::Idle
            | ButtonState::WaitHold
            | ButtonState::WaitStep
            | ButtonState::WaitNextStep
            | ButtonState::WaitClicks
            | ButtonState::WaitTimeout => None,
        }
    }

    /// Returns true for the one-poll event states.
    pub fn is_event(self) -> bool {
        self.event().is_some()
    }

    /// Returns true while the button is physically held down.
    pub fn is_pressing(self) -> bool {
        matches!(
            self,
            ButtonState::Press
                | ButtonState::WaitHold
                | ButtonState::Hold
                | ButtonState::WaitStep
                | ButtonState::Step
                | ButtonState::WaitNextStep
        )
    }

    /// Returns true once a press has turned into a hold.
    pub fn is_holding(self) -> bool {
        matches!(
            self,
            ButtonState::Hold
                | ButtonState::WaitStep
                | ButtonState::Step
                | ButtonState::WaitNextStep
        )
    }

    /// Returns true once a hold has started stepping.
    pub fn is_stepping(self) -> bool {
        matches!(self, ButtonState::Step | ButtonState::WaitNextStep)
    }
}

/// A recognized gesture event, reported for the single poll it is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonEvent {
    Press,
    Click,
    Hold,
    ReleaseHold,
    Step,
    ReleaseStep,
    Release,
    /// Multi-click sequence resolved; see the engine's click count.
    Clicks,
    Timeout,
}

/// Timing thresholds for debouncing and gesture recognition, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonConfig {
    pub debounce_ms: u32,
    pub hold_ms: u32,
    pub step_ms: u32,
    pub step_period_ms: u32,
    pub click_window_ms: u32,
    pub timeout_ms: u32,
}

impl ButtonConfig {
    /// Creates a new configuration builder starting from the defaults.
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEBOUNCE_MS,
            hold_ms: HOLD_MS,
            step_ms: STEP_MS,
            step_period_ms: STEP_PERIOD_MS,
            click_window_ms: CLICK_WINDOW_MS,
            timeout_ms: TIMEOUT_MS,
        }
    }
}

/// Builder for validated [`ButtonConfig`]s.
#[derive(Debug, Clone, Copy)]
pub struct ConfigBuilder {
    config: ButtonConfig,
}

impl ConfigBuilder {
    /// Creates a builder holding the default thresholds.
    pub fn new() -> Self {
        Self {
            config: ButtonConfig::default(),
        }
    }

    /// Sets the debounce settle time. Zero disables filtering.
    pub fn debounce_ms(mut self, ms: u32) -> Self {
        self.config.debounce_ms = ms;
        self
    }

    pub fn hold_ms(mut self, ms: u32) -> Self {
        self.config.hold_ms = ms;
        self
    }

    pub fn step_ms(mut self, ms: u32) -> Self {
        self.config.step_ms = ms;
        self
    }

    pub fn step_period_ms(mut self, ms: u32) -> Self {
        self.config.step_period_ms = ms;
        self
    }

    pub fn click_window_ms(mut self, ms: u32) -> Self {
        self.config.click_window_ms = ms;
        self
    }

    pub fn timeout_ms(mut self, ms: u32) -> Self {
        self.config.timeout_ms = ms;
        self
    }

    /// Builds and validates the configuration.
    ///
    /// # Errors
    /// * `ZeroStepPeriod` - Stepping would fire on every poll
    /// * `ZeroThreshold` - A hold, click-window or timeout threshold is zero
    pub fn build(self) -> Result<ButtonConfig, ConfigError> {
        let config = self.config;

        if config.step_period_ms == 0 {
            return Err(ConfigError::ZeroStepPeriod);
        }
        if config.hold_ms == 0 {
            return Err(ConfigError::ZeroThreshold("hold_ms"));
        }
        if config.click_window_ms == 0 {
            return Err(ConfigError::ZeroThreshold("click_window_ms"));
        }
        if config.timeout_ms == 0 {
            return Err(ConfigError::ZeroThreshold("timeout_ms"));
        }

        Ok(config)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Step period of zero.
    ZeroStepPeriod,

    /// A threshold that must be positive is zero. Holds the field name.
    ZeroThreshold(&'static str),
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::ZeroStepPeriod => {
                write!(f, "step period must be non-zero")
            }
            ConfigError::ZeroThreshold(field) => {
                write!(f, "{} must be non-zero", field)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}
