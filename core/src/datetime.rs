//! Local and zoned date-time values
//!
//! Fields are plain integers with no calendar validation so the editor can
//! hold transient values such as 31 February. Conversion to an instant
//! normalizes them through [`crate::calendar`].

use core::fmt::Write;

use heapless::String;

use crate::calendar::{civil_from_days, days_from_civil, iso_weekday_from_days, SECONDS_PER_DAY};

/// Day of the week
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Weekday {
    Monday = 1,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// From ISO number (1 = Monday .. 7 = Sunday), wrapping anything else
    pub fn from_iso(n: u8) -> Self {
        match (n.wrapping_sub(1)) % 7 {
            0 => Weekday::Monday,
            1 => Weekday::Tuesday,
            2 => Weekday::Wednesday,
            3 => Weekday::Thursday,
            4 => Weekday::Friday,
            5 => Weekday::Saturday,
            _ => Weekday::Sunday,
        }
    }

    pub fn iso_number(self) -> u8 {
        self as u8
    }

    /// Three-letter display name
    pub fn short_name(self) -> &'static str {
        match self {
            Weekday::Monday => "Mon",
            Weekday::Tuesday => "Tue",
            Weekday::Wednesday => "Wed",
            Weekday::Thursday => "Thu",
            Weekday::Friday => "Fri",
            Weekday::Saturday => "Sat",
            Weekday::Sunday => "Sun",
        }
    }
}

/// Wall-clock date and time without a zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LocalDateTime {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl LocalDateTime {
    pub const fn new(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    /// Seconds since the Unix epoch, reading the fields as UTC
    pub fn to_epoch_seconds(&self) -> i64 {
        days_from_civil(self.year as i32, self.month, self.day) * SECONDS_PER_DAY
            + self.hour as i64 * 3600
            + self.minute as i64 * 60
            + self.second as i64
    }

    /// Fields of a Unix instant read as UTC
    pub fn from_epoch_seconds(epoch_seconds: i64) -> Self {
        let days = epoch_seconds.div_euclid(SECONDS_PER_DAY);
        let secs_today = epoch_seconds.rem_euclid(SECONDS_PER_DAY);
        let (year, month, day) = civil_from_days(days);

        Self {
            year: year.clamp(0, u16::MAX as i32) as u16,
            month,
            day,
            hour: (secs_today / 3600) as u8,
            minute: ((secs_today % 3600) / 60) as u8,
            second: (secs_today % 60) as u8,
        }
    }

    /// Weekday of the (normalized) calendar date
    pub fn weekday(&self) -> Weekday {
        let days = days_from_civil(self.year as i32, self.month, self.day);
        Weekday::from_iso(iso_weekday_from_days(days))
    }

    /// `YYYY-MM-DDTHH:MM:SS`
    pub fn iso8601(&self) -> String<19> {
        let mut s = String::new();
        // 19 characters always fit for years below 10000
        let _ = write!(
            s,
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
            self.year % 10_000,
            self.month,
            self.day,
            self.hour,
            self.minute,
            self.second
        );
        s
    }
}

/// Local date-time tagged with the index of the zone it is expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ZonedDateTime {
    pub local: LocalDateTime,
    /// Index into the zone catalog
    pub zone: u8,
}

impl ZonedDateTime {
    pub const fn new(local: LocalDateTime, zone: u8) -> Self {
        Self { local, zone }
    }
}
