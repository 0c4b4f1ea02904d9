//! Clock configuration
//!
//! Cadences are in milliseconds and are consumed by whatever drives the
//! controller (RTIC tasks on the board, a loop on other hosts).

use crate::mode::{ModeTable, ViewMode, ALL_VIEWS};
use crate::snapshot::HourFormat;

#[derive(Debug, Clone, Copy)]
pub struct ClockConfig {
    /// Button sampling period
    pub input_poll_ms: u32,
    /// Presenter render period
    pub render_ms: u32,
    /// LED module flush period
    pub flush_ms: u32,
    /// Copy system time into the committed snapshot
    pub time_sync_ms: u32,
    /// RTC temperature read. The DS3231 converts every 64 s but the first
    /// read after power-up can fail, so poll more often.
    pub temperature_ms: u32,
    /// Blink toggle half-period
    pub blink_ms: u32,
    /// Resync system time from the RTC; `None` only resyncs at startup
    pub rtc_resync_ms: Option<u32>,
    /// Status line logging period
    pub status_ms: u32,
    pub hour_format: HourFormat,
    /// Initial brightness [0, 7]
    pub brightness: u8,
    /// Initial zone index
    pub zone_index: u8,
    /// View family order
    pub views: &'static [ViewMode],
}

impl ClockConfig {
    pub fn mode_table(&self) -> ModeTable {
        ModeTable::new(self.views)
    }
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            input_poll_ms: 5,
            render_ms: 100,
            flush_ms: 100,
            time_sync_ms: 100,
            temperature_ms: 10_000,
            blink_ms: 500,
            rtc_resync_ms: Some(60 * 60 * 1000),
            status_ms: 2_000,
            hour_format: HourFormat::TwentyFour,
            brightness: 1,
            zone_index: 0,
            views: &ALL_VIEWS,
        }
    }
}
