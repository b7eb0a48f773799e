//! Motor control driven by button gestures.
//!
//! Defines the collaborator traits the application needs ([`PwmOutput`] for
//! duty-cycle actuation, [`SettingsStore`] for non-volatile records) and
//! [`MotorController`], which owns both and implements the actions bound to
//! gestures: toggle, reset duty, and a time-driven duty sweep test.

use crate::time::{TimeInstant, elapsed_ms};

/// PWM period, 50 Hz.
pub const PWM_PERIOD_NS: u32 = 20_000_000;
/// Time each duty level is held during a sweep.
pub const SWEEP_STEP_MS: u32 = 100;
/// Duty increment between sweep levels, in percent.
pub const SWEEP_STEP_PERCENT: u8 = 10;
/// Record id of the persisted duty cycle.
pub const DUTY_CYCLE_ID: u16 = 1;
/// Record id of the persisted on/off state.
pub const MOTOR_STATE_ID: u16 = 2;

/// Duty cycle in percent, always within `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DutyCycle(u8);

impl DutyCycle {
    pub const OFF: Self = DutyCycle(0);
    pub const HALF: Self = DutyCycle(50);
    pub const FULL: Self = DutyCycle(100);

    /// Creates a duty cycle, clamping anything above 100 %.
    pub const fn new(percent: u8) -> Self {
        if percent > 100 {
            DutyCycle(100)
        } else {
            DutyCycle(percent)
        }
    }

    /// Returns the duty in percent.
    pub fn percent(self) -> u8 {
        self.0
    }

    /// Pulse width for the given period.
    pub fn pulse_ns(self, period_ns: u32) -> u32 {
        (period_ns as u64 * self.0 as u64 / 100) as u32
    }
}

impl Default for DutyCycle {
    fn default() -> Self {
        DutyCycle::HALF
    }
}

/// Trait for abstracting the PWM channel driving the motor.
///
/// Implementations handle device errors internally; these calls cannot fail.
pub trait PwmOutput {
    /// Sets period and pulse width, both in nanoseconds.
    fn set_pulse(&mut self, period_ns: u32, pulse_ns: u32);

    /// Puts the PWM device into its low-power state.
    fn suspend(&mut self);

    /// Wakes the PWM device up.
    fn resume(&mut self);
}

/// Trait for abstracting a key-value non-volatile store.
pub trait SettingsStore {
    type Error;

    /// Reads record `id` into `buf`, returning the number of bytes read.
    fn read(&mut self, id: u16, buf: &mut [u8]) -> Result<usize, Self::Error>;

    /// Writes record `id`.
    fn write(&mut self, id: u16, data: &[u8]) -> Result<(), Self::Error>;
}

/// A record could not be written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettingsError<E> {
    /// Record that failed.
    pub id: u16,
    /// The store's own error.
    pub error: E,
}

impl<E: core::fmt::Debug> core::fmt::Display for SettingsError<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "failed to write settings record {}: {:?}", self.id, self.error)
    }
}

#[cfg(feature = "std")]
impl<E: core::fmt::Debug> std::error::Error for SettingsError<E> {}

/// Persisted motor settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Settings {
    pub duty_cycle: DutyCycle,
    pub motor_on: bool,
}

impl Settings {
    /// Loads settings, keeping the default for any record that is missing
    /// or unreadable.
    pub fn load<S: SettingsStore>(store: &mut S) -> Self {
        let mut settings = Settings::default();
        let mut buf = [0u8; 1];

        match store.read(DUTY_CYCLE_ID, &mut buf) {
            Ok(n) if n > 0 => {
                settings.duty_cycle = DutyCycle::new(buf[0]);
                info!("loaded duty cycle: {}%", buf[0]);
            }
            _ => info!("using default duty: {}%", settings.duty_cycle.percent()),
        }

        match store.read(MOTOR_STATE_ID, &mut buf) {
            Ok(n) if n > 0 => {
                settings.motor_on = buf[0] != 0;
                info!("loaded motor state: {}", settings.motor_on);
            }
            _ => settings.motor_on = false,
        }

        settings
    }

    /// Writes both records. The second is attempted even if the first fails.
    ///
    /// # Errors
    /// Returns the first failing record.
    pub fn save<S: SettingsStore>(&self, store: &mut S) -> Result<(), SettingsError<S::Error>> {
        let duty = store
            .write(DUTY_CYCLE_ID, &[self.duty_cycle.percent()])
            .map_err(|error| SettingsError { id: DUTY_CYCLE_ID, error });
        let state = store
            .write(MOTOR_STATE_ID, &[self.motor_on as u8])
            .map_err(|error| SettingsError { id: MOTOR_STATE_ID, error });

        duty.and(state)
    }
}

/// A duty sweep 0 → 100 → 0 % in fixed steps, evaluated against elapsed time.
///
/// Replaces a blocking sleep loop: the owner services it from its main loop
/// and the sweep reports which duty should be showing right now.
#[derive(Debug, Clone, Copy)]
pub struct DutySweep<I: TimeInstant> {
    started_at: I,
}

impl<I: TimeInstant> DutySweep<I> {
    /// Levels on the way up, including both ends.
    const LEVELS: u32 = 100 / SWEEP_STEP_PERCENT as u32 + 1;

    /// Starts a sweep at `now`.
    pub fn new(now: I) -> Self {
        Self { started_at: now }
    }

    /// Total length of the sweep.
    pub const fn total_ms() -> u32 {
        2 * Self::LEVELS * SWEEP_STEP_MS
    }

    /// Duty to show at `now`, or `None` once the sweep has finished.
    pub fn duty_at(&self, now: I) -> Option<DutyCycle> {
        let index = elapsed_ms(now, self.started_at) / SWEEP_STEP_MS;

        if index >= 2 * Self::LEVELS {
            return None;
        }

        let level = if index < Self::LEVELS {
            index
        } else {
            2 * Self::LEVELS - 1 - index
        };
        Some(DutyCycle::new((level * SWEEP_STEP_PERCENT as u32) as u8))
    }

    /// Milliseconds until the next level change.
    pub fn until_next_ms(&self, now: I) -> u32 {
        SWEEP_STEP_MS - elapsed_ms(now, self.started_at) % SWEEP_STEP_MS
    }
}

/// Actions the motor controller can perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotorAction {
    /// Turn the motor on or off at the current duty.
    Toggle,
    /// Reset duty to 50 % and persist.
    ResetDuty,
    /// Run the duty sweep test, then restore and persist.
    SweepTest,
    /// Set a new duty and persist.
    SetDuty(DutyCycle),
}

/// Timing information returned by [`MotorController::service`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ServiceTiming {
    /// A sweep is running. Service again after this many milliseconds.
    Delay(u32),
    /// Nothing time-driven in progress.
    Idle,
}

/// Owns the motor PWM and settings store, and executes [`MotorAction`]s.
///
/// Persistence failures are logged and otherwise ignored; the motor keeps
/// running on the in-memory settings.
pub struct MotorController<I: TimeInstant, P: PwmOutput, S: SettingsStore> {
    pwm: P,
    store: S,
    settings: Settings,
    pwm_active: bool,
    output: Option<DutyCycle>,
    sweep: Option<DutySweep<I>>,
}

impl<I: TimeInstant, P: PwmOutput, S: SettingsStore> MotorController<I, P, S> {
    /// Loads persisted settings and drives the output to match them.
    pub fn new(pwm: P, mut store: S) -> Self {
        let settings = Settings::load(&mut store);
        let mut controller = Self {
            pwm,
            store,
            settings,
            pwm_active: false,
            output: None,
            sweep: None,
        };
        controller.apply(settings.duty_cycle);
        controller
    }

    /// Dispatches an action.
    pub fn handle(&mut self, action: MotorAction, now: I) {
        info!("motor action: {:?}", action);
        match action {
            MotorAction::Toggle => self.toggle(),
            MotorAction::ResetDuty => self.reset_duty(),
            MotorAction::SweepTest => {
                self.start_sweep(now);
            }
            MotorAction::SetDuty(duty) => self.set_duty(duty),
        }
    }

    /// Drives the output to `duty`, or to zero while the motor is off.
    ///
    /// The PWM device is suspended whenever the output is zero and resumed
    /// before a non-zero pulse.
    pub fn apply(&mut self, duty: DutyCycle) {
        if duty == DutyCycle::OFF || !self.settings.motor_on {
            self.pwm.set_pulse(PWM_PERIOD_NS, 0);
            if self.pwm_active {
                self.pwm.suspend();
                self.pwm_active = false;
                debug!("pwm suspended");
            }
            self.output = Some(DutyCycle::OFF);
        } else {
            if !self.pwm_active {
                self.pwm.resume();
                self.pwm_active = true;
                debug!("pwm resumed");
            }
            self.pwm.set_pulse(PWM_PERIOD_NS, duty.pulse_ns(PWM_PERIOD_NS));
            self.output = Some(duty);
        }
    }

    /// Flips the motor on or off at the current duty and persists the state.
    ///
    /// Cancels a running sweep.
    pub fn toggle(&mut self) {
        self.sweep = None;
        self.settings.motor_on = !self.settings.motor_on;
        self.apply(self.settings.duty_cycle);
        self.persist();
    }

    /// Resets duty to 50 % and persists.
    pub fn reset_duty(&mut self) {
        self.set_duty(DutyCycle::HALF);
    }

    /// Sets duty and persists. Cancels a running sweep.
    pub fn set_duty(&mut self, duty: DutyCycle) {
        self.sweep = None;
        self.settings.duty_cycle = duty;
        if self.settings.motor_on {
            self.apply(duty);
        }
        self.persist();
    }

    /// Starts the sweep test. Only runs while the motor is on.
    ///
    /// Returns true if a sweep was started.
    pub fn start_sweep(&mut self, now: I) -> bool {
        if !self.settings.motor_on {
            info!("sweep skipped, motor off");
            return false;
        }

        let sweep = DutySweep::new(now);
        self.sweep = Some(sweep);
        if let Some(duty) = sweep.duty_at(now) {
            self.apply(duty);
        }
        true
    }

    /// Advances a running sweep.
    ///
    /// When the sweep ends the saved duty is restored and the settings are
    /// persisted.
    pub fn service(&mut self, now: I) -> ServiceTiming {
        let Some(sweep) = self.sweep else {
            return ServiceTiming::Idle;
        };

        match sweep.duty_at(now) {
            Some(duty) => {
                if self.output != Some(duty) {
                    self.apply(duty);
                }
                ServiceTiming::Delay(sweep.until_next_ms(now))
            }
            None => {
                self.sweep = None;
                self.apply(self.settings.duty_cycle);
                self.persist();
                info!("sweep done");
                ServiceTiming::Idle
            }
        }
    }

    fn persist(&mut self) {
        match self.settings.save(&mut self.store) {
            Ok(()) => info!(
                "settings saved: duty={}%, on={}",
                self.settings.duty_cycle.percent(),
                self.settings.motor_on
            ),
            Err(e) => warn!("settings record {} not saved", e.id),
        }
    }

    /// Returns the in-memory settings.
    pub fn settings(&self) -> Settings {
        self.settings
    }

    /// Returns true if the motor is switched on.
    pub fn is_on(&self) -> bool {
        self.settings.motor_on
    }

    /// Returns true while a sweep test is running.
    pub fn is_sweeping(&self) -> bool {
        self.sweep.is_some()
    }

    /// Returns the duty currently driven on the output.
    pub fn output(&self) -> DutyCycle {
        self.output.unwrap_or(DutyCycle::OFF)
    }

    /// Returns the PWM output.
    pub fn pwm(&self) -> &P {
        &self.pwm
    }

    /// Returns the settings store.
    pub fn store(&self) -> &S {
        &self.store
    }
}
