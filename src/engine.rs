//! Gesture recognition state machine.
//!
//! Provides [`ButtonEngine`], which turns a debounced level sampled over time
//! into press, click, multi-click, hold, stepped-hold and timeout events.
//! The engine never reads a clock or a pin itself: every poll is handed the
//! current level and instant, so it can be driven from a periodic loop, an
//! async task or a test alike.

use crate::time::{TimeInstant, elapsed_ms};
use crate::types::{ButtonConfig, ButtonEvent, ButtonState};

/// Gesture state machine for a single button.
///
/// Each call to [`poll`](Self::poll) applies at most one transition. Event
/// states therefore stay visible for exactly one poll: a poller that falls
/// behind still observes every event in order, just later. Timers restart
/// at the poll that performs the transition.
#[derive(Debug, Clone)]
pub struct ButtonEngine<I: TimeInstant> {
    config: ButtonConfig,
    state: ButtonState,
    clicks: u8,
    steps: u8,
    entered_at: Option<I>,
    // set by reset() while the button may still be down
    wait_release: bool,
}

impl<I: TimeInstant> ButtonEngine<I> {
    /// Creates an idle engine with the given thresholds.
    pub fn new(config: ButtonConfig) -> Self {
        Self {
            config,
            state: ButtonState::Idle,
            clicks: 0,
            steps: 0,
            entered_at: None,
            wait_release: false,
        }
    }

    /// Forces the engine back to `Idle` and clears both counters.
    ///
    /// No event is emitted for the discarded gesture. If the button is still
    /// down, the engine stays in `Idle` until it sees a released sample, so
    /// the same physical press is never reported again.
    pub fn reset(&mut self) {
        self.state = ButtonState::Idle;
        self.clicks = 0;
        self.steps = 0;
        self.entered_at = None;
        self.wait_release = true;
    }

    /// Advances the machine by one step. Returns true if the state changed.
    pub fn poll(&mut self, pressed: bool, now: I) -> bool {
        let previous = self.state;

        match self.state {
            ButtonState::Idle => {
                if !pressed {
                    self.wait_release = false;
                } else if !self.wait_release {
                    self.state = ButtonState::Press;
                }
            }

            ButtonState::Press => {
                self.state = ButtonState::WaitHold;
                self.restart_timer(now);
            }

            ButtonState::WaitHold => {
                if !pressed {
                    self.state = ButtonState::Click;
                    self.clicks = self.clicks.saturating_add(1);
                } else if self.elapsed(now) >= self.config.hold_ms {
                    self.state = ButtonState::Hold;
                    self.restart_timer(now);
                }
            }

            ButtonState::Hold => {
                self.state = ButtonState::WaitStep;
            }

            ButtonState::WaitStep => {
                if !pressed {
                    self.state = ButtonState::ReleaseHold;
                } else if self.elapsed(now) >= self.config.step_ms {
                    self.state = ButtonState::Step;
                    self.restart_timer(now);
                }
            }

            ButtonState::Step => {
                self.state = ButtonState::WaitNextStep;
            }

            ButtonState::WaitNextStep => {
                if !pressed {
                    self.state = ButtonState::ReleaseStep;
                } else if self.elapsed(now) >= self.config.step_period_ms {
                    self.state = ButtonState::Step;
                    self.steps = self.steps.saturating_add(1);
                    self.restart_timer(now);
                }
            }

            ButtonState::ReleaseHold | ButtonState::ReleaseStep => {
                self.clicks = 0;
                self.state = ButtonState::Release;
            }

            ButtonState::Click => {
                self.state = ButtonState::Release;
            }

            ButtonState::Release => {
                self.steps = 0;
                self.state = if self.clicks > 0 {
                    ButtonState::WaitClicks
                } else {
                    ButtonState::WaitTimeout
                };
                self.restart_timer(now);
            }

            ButtonState::WaitClicks => {
                if pressed {
                    self.state = ButtonState::Press;
                } else if self.elapsed(now) >= self.config.click_window_ms {
                    self.state = ButtonState::Clicks;
                    self.restart_timer(now);
                }
            }

            ButtonState::Clicks => {
                self.clicks = 0;
                self.state = ButtonState::WaitTimeout;
            }

            ButtonState::WaitTimeout => {
                if pressed {
                    self.state = ButtonState::Press;
                } else if self.elapsed(now) >= self.config.timeout_ms {
                    self.state = ButtonState::Timeout;
                }
            }

            ButtonState::Timeout => {
                self.state = ButtonState::Idle;
            }
        }

        if self.state != previous {
            trace!("button {:?} -> {:?}", previous, self.state);
            true
        } else {
            false
        }
    }

    /// Ends a pending timeout early.
    ///
    /// If the engine is waiting for the post-interaction timeout and at least
    /// `ms` have passed, it goes straight to `Idle` and this returns true. The
    /// regular `Timeout` event is not reported for that interaction.
    pub fn timeout_after(&mut self, ms: u32, now: I) -> bool {
        if self.state == ButtonState::WaitTimeout && self.elapsed(now) >= ms {
            self.state = ButtonState::Idle;
            true
        } else {
            false
        }
    }

    fn restart_timer(&mut self, now: I) {
        self.entered_at = Some(now);
    }

    fn elapsed(&self, now: I) -> u32 {
        self.entered_at.map_or(0, |since| elapsed_ms(now, since))
    }

    /// Returns the current state.
    pub fn state(&self) -> ButtonState {
        self.state
    }

    /// Returns the event active after the last poll, if any.
    pub fn event(&self) -> Option<ButtonEvent> {
        self.state.event()
    }

    /// Returns the number of clicks in the current sequence.
    pub fn clicks(&self) -> u8 {
        self.clicks
    }

    /// Returns the number of completed repeat periods in the current hold.
    pub fn steps(&self) -> u8 {
        self.steps
    }

    /// Returns the thresholds this engine runs with.
    pub fn config(&self) -> &ButtonConfig {
        &self.config
    }

    fn is(&self, state: ButtonState) -> bool {
        self.state == state
    }

    fn with_clicks(&self, active: bool, clicks: u8) -> bool {
        active && self.clicks == clicks
    }

    /// Button just went down.
    pub fn press(&self) -> bool {
        self.is(ButtonState::Press)
    }

    /// Press with exactly `clicks` earlier clicks in the sequence.
    pub fn press_with(&self, clicks: u8) -> bool {
        self.with_clicks(self.press(), clicks)
    }

    /// Released before the hold threshold.
    pub fn click(&self) -> bool {
        self.is(ButtonState::Click)
    }

    /// Click that brought the count to `clicks`.
    pub fn click_with(&self, clicks: u8) -> bool {
        self.with_clicks(self.click(), clicks)
    }

    /// Held past the hold threshold.
    pub fn hold(&self) -> bool {
        self.is(ButtonState::Hold)
    }

    /// Hold after exactly `clicks` clicks.
    pub fn hold_with(&self, clicks: u8) -> bool {
        self.with_clicks(self.hold(), clicks)
    }

    /// Released after a hold, before stepping began.
    pub fn release_hold(&self) -> bool {
        self.is(ButtonState::ReleaseHold)
    }

    /// Release after a hold, with `clicks` clicks before it.
    pub fn release_hold_with(&self, clicks: u8) -> bool {
        self.with_clicks(self.release_hold(), clicks)
    }

    /// One stepping pulse. See [`steps`](Self::steps) for the pulse number.
    pub fn step(&self) -> bool {
        self.is(ButtonState::Step)
    }

    /// Stepping pulse after exactly `clicks` clicks.
    pub fn step_with(&self, clicks: u8) -> bool {
        self.with_clicks(self.step(), clicks)
    }

    /// Released after stepping.
    pub fn release_step(&self) -> bool {
        self.is(ButtonState::ReleaseStep)
    }

    /// Release after stepping, with `clicks` clicks before it.
    pub fn release_step_with(&self, clicks: u8) -> bool {
        self.with_clicks(self.release_step(), clicks)
    }

    /// Released after either a hold or stepping.
    pub fn release_hold_step(&self) -> bool {
        self.release_hold() || self.release_step()
    }

    /// Release after a hold or stepping, with `clicks` clicks before it.
    pub fn release_hold_step_with(&self, clicks: u8) -> bool {
        self.with_clicks(self.release_hold_step(), clicks)
    }

    /// Released, however the press ended.
    pub fn release(&self) -> bool {
        self.is(ButtonState::Release)
    }

    /// Release with the click count at `clicks`.
    pub fn release_with(&self, clicks: u8) -> bool {
        self.with_clicks(self.release(), clicks)
    }

    /// A click sequence has resolved. Check [`clicks`](Self::clicks) for how many.
    pub fn has_clicks(&self) -> bool {
        self.is(ButtonState::Clicks)
    }

    /// A sequence of exactly `clicks` clicks has resolved.
    pub fn has_clicks_with(&self, clicks: u8) -> bool {
        self.with_clicks(self.has_clicks(), clicks)
    }

    /// Inactivity timeout after an interaction.
    pub fn timeout(&self) -> bool {
        self.is(ButtonState::Timeout)
    }

    /// Timeout with the click count at `clicks`.
    pub fn timeout_with(&self, clicks: u8) -> bool {
        self.with_clicks(self.timeout(), clicks)
    }

    /// Button is down, between `press` and `release`.
    pub fn pressing(&self) -> bool {
        self.state.is_pressing()
    }

    /// Pressing, with `clicks` clicks earlier in the sequence.
    pub fn pressing_with(&self, clicks: u8) -> bool {
        self.with_clicks(self.pressing(), clicks)
    }

    /// Button is down and past the hold threshold.
    pub fn holding(&self) -> bool {
        self.state.is_holding()
    }

    /// Holding, with `clicks` clicks earlier in the sequence.
    pub fn holding_with(&self, clicks: u8) -> bool {
        self.with_clicks(self.holding(), clicks)
    }

    /// Button is down and stepping.
    pub fn stepping(&self) -> bool {
        self.state.is_stepping()
    }

    /// Stepping, with `clicks` clicks earlier in the sequence.
    pub fn stepping_with(&self, clicks: u8) -> bool {
        self.with_clicks(self.stepping(), clicks)
    }

    /// Waiting for the next click of a multi-click sequence.
    pub fn waiting(&self) -> bool {
        self.is(ButtonState::WaitClicks)
    }

    /// Any interaction in progress, from the first press until back to `Idle`.
    pub fn busy(&self) -> bool {
        !self.is(ButtonState::Idle)
    }

    /// Milliseconds the button has been down, counted from the press.
    ///
    /// Reconstructed from the thresholds of the phases already passed plus the
    /// time spent in the current one. Zero when not pressing.
    pub fn press_duration(&self, now: I) -> u32 {
        match self.state {
            ButtonState::WaitHold => self.elapsed(now),
            ButtonState::Hold
            | ButtonState::WaitStep
            | ButtonState::Step
            | ButtonState::WaitNextStep => self.config.hold_ms.saturating_add(self.hold_duration(now)),
            _ => 0,
        }
    }

    /// Milliseconds the button has been held, counted from the hold event.
    pub fn hold_duration(&self, now: I) -> u32 {
        match self.state {
            ButtonState::WaitStep => self.elapsed(now),
            ButtonState::Step | ButtonState::WaitNextStep => {
                self.config.step_ms.saturating_add(self.step_duration(now))
            }
            _ => 0,
        }
    }

    /// Milliseconds since stepping began.
    pub fn step_duration(&self, now: I) -> u32 {
        match self.state {
            ButtonState::Step | ButtonState::WaitNextStep => (self.steps as u32)
                .saturating_mul(self.config.step_period_ms)
                .saturating_add(self.elapsed(now)),
            _ => 0,
        }
    }

    /// Returns true if the button has been down for at least `ms`.
    pub fn press_for(&self, ms: u32, now: I) -> bool {
        self.press_duration(now) >= ms
    }

    /// Returns true if the button has been held for at least `ms`.
    pub fn hold_for(&self, ms: u32, now: I) -> bool {
        self.hold_duration(now) >= ms
    }

    /// Returns true if stepping has run for at least `ms`.
    pub fn step_for(&self, ms: u32, now: I) -> bool {
        self.step_duration(now) >= ms
    }
}

impl<I: TimeInstant> Default for ButtonEngine<I> {
    fn default() -> Self {
        Self::new(ButtonConfig::default())
    }
}
