//! Hardware abstraction traits for the LED clock firmware
//!
//! This crate defines the ports the clock core talks to (real-time clock,
//! LED module, buttons) plus the small drivers and rendering primitives
//! that sit directly on top of them. Boards implement or instantiate these.

#![no_std]
#![deny(unsafe_code)]
#![deny(warnings)]

pub mod display;
pub mod ds3231;
pub mod input;
pub mod rtc;
pub mod segment;

pub use display::LedModule;
pub use input::{Button, ButtonConfig, ButtonEvent};
pub use rtc::{RealTimeClock, RtcDateTime, Temperature};
