#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`Debouncer`**: Turns a bouncy raw level into a stable one using a settle time
//! - **`ButtonEngine`**: 15-state gesture machine fed one debounced level per poll
//! - **`ButtonState`** / **`ButtonEvent`**: Where the machine is, and which event that state reports
//! - **`ButtonConfig`**: The six timing thresholds, with a validating builder
//! - **`Button`**: Bundles a `RawInput`, a `TimeSource`, a debouncer and an engine behind `tick()`
//! - **`RawInput`**: Trait to implement for your input line (closures and `embedded-hal` pins supported)
//! - **`EdgeLatch`**: Interrupt-safe level + timestamp latch for edge-triggered sampling
//! - **`TimeSource`**: Trait to implement for your timing system
//! - **`MotorController`** / **`GestureMap`**: Application layer binding gestures to motor actions
//!
//! All timing is relative: the engine only measures elapsed milliseconds
//! between instants, so it keeps working across clock wraparound.

#[macro_use]
mod fmt;

pub mod time;
pub mod types;
pub mod debounce;
pub mod engine;
pub mod input;
pub mod button;
pub mod motor;
pub mod bindings;

pub use bindings::{BindingError, Gesture, GestureMap};
pub use button::Button;
pub use debounce::Debouncer;
pub use engine::ButtonEngine;
pub use input::{ActiveHigh, ActiveLow, EdgeLatch, FnInput, RawInput, from_fn};
pub use motor::{
    DutyCycle, DutySweep, MotorAction, MotorController, PwmOutput, ServiceTiming, Settings,
    SettingsError, SettingsStore,
};
pub use time::{Millis, MillisDuration, TimeDuration, TimeInstant, TimeSource, TimedOut, wait_until};
pub use types::{
    ButtonConfig, ButtonEvent, ButtonState, CLICK_WINDOW_MS, ConfigBuilder, ConfigError,
    DEBOUNCE_MS, HOLD_MS, STEP_MS, STEP_PERIOD_MS, TIMEOUT_MS,
};
