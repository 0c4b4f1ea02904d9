//! Real-time clock port
//!
//! The clock core persists time only through this trait. The date-time record
//! mirrors the register layout of a battery-backed RTC chip: two-digit year
//! counted from 2000, 24-hour time and an explicit weekday.

/// Date-time in the RTC's native representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RtcDateTime {
    /// Years since 2000 (0-99)
    pub year: u8,
    /// Month (1-12)
    pub month: u8,
    /// Day of month (1-31)
    pub day: u8,
    /// Hour (0-23)
    pub hour: u8,
    /// Minute (0-59)
    pub minute: u8,
    /// Second (0-59)
    pub second: u8,
    /// ISO weekday (1 = Monday .. 7 = Sunday)
    pub weekday: u8,
    /// Century flag. Stored but not used: the chip ignores it for leap years.
    pub century: bool,
}

impl RtcDateTime {
    /// Full four-digit year
    pub fn full_year(&self) -> u16 {
        2000 + self.year as u16
    }
}

/// Temperature reading in hundredths of a degree Celsius
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Temperature {
    centi_c: i16,
}

impl Temperature {
    pub const fn from_centi_c(centi_c: i16) -> Self {
        Self { centi_c }
    }

    /// Build from the chip's 10-bit two's complement reading in 0.25 °C steps
    pub const fn from_quarter_degrees(quarters: i16) -> Self {
        Self {
            centi_c: quarters * 25,
        }
    }

    pub const fn centi_c(&self) -> i16 {
        self.centi_c
    }

    pub const fn centi_f(&self) -> i16 {
        (self.centi_c as i32 * 9 / 5 + 3200) as i16
    }
}

/// Battery-backed real-time clock
///
/// Implementations report bus failures through `Error`; callers treat every
/// failure as "skip this cycle" and never retry.
pub trait RealTimeClock {
    type Error: core::fmt::Debug;

    /// Read the current UTC date-time
    fn read_time(&mut self) -> Result<RtcDateTime, Self::Error>;

    /// Overwrite the current UTC date-time
    fn write_time(&mut self, datetime: &RtcDateTime) -> Result<(), Self::Error>;

    /// Read the on-chip temperature sensor
    fn read_temperature(&mut self) -> Result<Temperature, Self::Error>;
}
