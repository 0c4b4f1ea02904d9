//! Platform-agnostic core logic for the LED clock
//!
//! This crate holds the clock's state machine, snapshot model, rendering and
//! time keeping. It has NO hardware dependencies; boards hand it an RTC and
//! an LED module through the `hal-abstractions` ports.

#![no_std]
#![deny(unsafe_code)]
#![deny(warnings)]

#[macro_use]
mod fmt;

pub mod calendar;
pub mod config;
pub mod controller;
pub mod datetime;
pub mod error;
pub mod mode;
pub mod presenter;
pub mod snapshot;
pub mod wallclock;
pub mod zone;

#[cfg(test)]
mod testing;

pub use config::ClockConfig;
pub use controller::{ButtonId, Controller};
pub use datetime::{LocalDateTime, Weekday, ZonedDateTime};
pub use error::ClockError;
pub use mode::{ClockMode, EditField, ModeTable, ViewMode};
pub use presenter::Presenter;
pub use snapshot::{ClockSnapshot, HourFormat};
pub use wallclock::WallClock;
pub use zone::{FixedOffsetCatalog, Zone, ZoneCatalog, DEFAULT_ZONES};
