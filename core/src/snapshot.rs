//! Clock snapshot data model
//!
//! A snapshot is everything needed to render one display frame. It is a
//! plain `Copy` value; the controller keeps two (committed and scratch) and
//! hands copies to the presenter.

use crate::datetime::ZonedDateTime;
use crate::mode::ClockMode;

/// Number of brightness levels; brightness wraps modulo this
pub const BRIGHTNESS_LEVELS: u8 = 8;

/// Hour rendering preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HourFormat {
    /// 12:00 AM to 11:59 PM
    Twelve,
    /// 00:00 to 23:59
    #[default]
    TwentyFour,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockSnapshot {
    pub date_time: ZonedDateTime,
    /// Hundredths of a degree Celsius
    pub temperature_centi_c: i16,
    /// Hundredths of a degree Fahrenheit
    pub temperature_centi_f: i16,
    pub mode: ClockMode,
    pub hour_format: HourFormat,
    /// [0, 7]
    pub brightness: u8,
    /// Index into the zone catalog
    pub zone_index: u8,
    /// Toggled by the blink timer
    pub blink_show: bool,
    /// Set while the change button is held
    pub blink_suppressed: bool,
}

impl ClockSnapshot {
    pub fn new(mode: ClockMode, hour_format: HourFormat, brightness: u8, zone_index: u8) -> Self {
        Self {
            date_time: ZonedDateTime {
                zone: zone_index,
                ..ZonedDateTime::default()
            },
            temperature_centi_c: 0,
            temperature_centi_f: 0,
            mode,
            hour_format,
            brightness: brightness % BRIGHTNESS_LEVELS,
            zone_index,
            blink_show: false,
            blink_suppressed: false,
        }
    }

    /// Whether the field under edit should be lit this frame
    pub fn field_visible(&self) -> bool {
        self.blink_show || self.blink_suppressed
    }
}

impl Default for ClockSnapshot {
    fn default() -> Self {
        Self::new(ClockMode::default(), HourFormat::default(), 1, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode::ViewMode;

    #[test]
    fn test_defaults() {
        let s = ClockSnapshot::default();
        assert_eq!(s.mode, ClockMode::View(ViewMode::HourMinute));
        assert_eq!(s.hour_format, HourFormat::TwentyFour);
        assert_eq!(s.brightness, 1);
        assert_eq!(s.zone_index, 0);
    }

    #[test]
    fn test_field_visible() {
        let mut s = ClockSnapshot::default();
        assert!(!s.field_visible());
        s.blink_suppressed = true;
        assert!(s.field_visible());
        s.blink_suppressed = false;
        s.blink_show = true;
        assert!(s.field_visible());
    }
}
