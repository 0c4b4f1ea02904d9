//! Wall-clock time derived from monotonic uptime
//!
//! CLOCK_REALTIME style: epoch time = uptime + offset. The RTC is read only
//! to correct the offset; every display tick reads this clock instead.

/// 2000-01-01T12:00:00Z, shown until the first successful RTC read. Noon
/// keeps the local date inside the RTC year range for every US zone.
pub const DEFAULT_EPOCH_SECONDS: i64 = 946_728_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WallClock {
    /// Epoch milliseconds at uptime zero
    offset_ms: i64,
}

impl WallClock {
    pub const fn new() -> Self {
        Self {
            offset_ms: DEFAULT_EPOCH_SECONDS * 1000,
        }
    }

    /// Current epoch time in milliseconds
    pub fn now_epoch_millis(&self, uptime_ms: u64) -> i64 {
        self.offset_ms + uptime_ms as i64
    }

    /// Current epoch time in whole seconds
    pub fn now_epoch_seconds(&self, uptime_ms: u64) -> i64 {
        self.now_epoch_millis(uptime_ms).div_euclid(1000)
    }

    /// Shift the clock by `delta_ms`
    pub fn adjust(&mut self, delta_ms: i64) {
        self.offset_ms += delta_ms;
    }

    /// Make `now` read `epoch_seconds` at `uptime_ms`
    pub fn calibrate(&mut self, epoch_seconds: i64, uptime_ms: u64) {
        let delta = epoch_seconds * 1000 - self.now_epoch_millis(uptime_ms);
        self.adjust(delta);
    }
}

impl Default for WallClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_default_epoch() {
        let clock = WallClock::new();
        assert_eq!(clock.now_epoch_seconds(0), DEFAULT_EPOCH_SECONDS);
        assert_eq!(clock.now_epoch_seconds(2_500), DEFAULT_EPOCH_SECONDS + 2);
    }

    #[test]
    fn test_calibrate() {
        let mut clock = WallClock::new();
        clock.calibrate(1_706_745_599, 10_000);
        assert_eq!(clock.now_epoch_seconds(10_000), 1_706_745_599);
        assert_eq!(clock.now_epoch_seconds(11_000), 1_706_745_600);
    }

    #[test]
    fn test_adjust() {
        let mut clock = WallClock::new();
        clock.adjust(-1_000);
        assert_eq!(clock.now_epoch_seconds(0), DEFAULT_EPOCH_SECONDS - 1);
    }
}
