//! Clock controller error types

/// Clock controller operation errors
///
/// None of these are fatal. The controller logs them and skips the cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockError {
    /// Reading the RTC date-time failed
    RtcRead,
    /// Writing the RTC date-time failed
    RtcWrite,
    /// Reading the RTC temperature sensor failed
    TemperatureRead,
    /// UTC year falls outside what the RTC can store (2000-2099)
    YearOutOfRange,
    /// Zone catalog is empty or has more zones than a `u8` index can reach
    InvalidZoneCatalog,
}

impl core::fmt::Display for ClockError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::RtcRead => write!(f, "RTC read failed"),
            Self::RtcWrite => write!(f, "RTC write failed"),
            Self::TemperatureRead => write!(f, "RTC temperature read failed"),
            Self::YearOutOfRange => write!(f, "Year outside RTC range"),
            Self::InvalidZoneCatalog => write!(f, "Zone catalog must hold 1 to 255 zones"),
        }
    }
}

impl core::error::Error for ClockError {}
