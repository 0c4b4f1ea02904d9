//! In-memory fakes shared by the unit tests

use hal_abstractions::{LedModule, RealTimeClock, RtcDateTime, Temperature};
use heapless::Vec;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusFault;

/// RTC backed by a fixed record
pub struct FakeRtc {
    pub now: RtcDateTime,
    pub temperature: Temperature,
    pub fail_read: bool,
    pub fail_write: bool,
    pub fail_temperature: bool,
    pub written: Vec<RtcDateTime, 8>,
}

impl FakeRtc {
    pub fn new(now: RtcDateTime) -> Self {
        Self {
            now,
            temperature: Temperature::from_centi_c(2100),
            fail_read: false,
            fail_write: false,
            fail_temperature: false,
            written: Vec::new(),
        }
    }
}

impl RealTimeClock for FakeRtc {
    type Error = BusFault;

    fn read_time(&mut self) -> Result<RtcDateTime, Self::Error> {
        if self.fail_read {
            return Err(BusFault);
        }
        Ok(self.now)
    }

    fn write_time(&mut self, datetime: &RtcDateTime) -> Result<(), Self::Error> {
        if self.fail_write {
            return Err(BusFault);
        }
        self.now = *datetime;
        let _ = self.written.push(*datetime);
        Ok(())
    }

    fn read_temperature(&mut self) -> Result<Temperature, Self::Error> {
        if self.fail_temperature {
            return Err(BusFault);
        }
        Ok(self.temperature)
    }
}

/// Four-digit module that counts what was done to it
pub struct RecordingModule {
    pub patterns: [u8; 4],
    pub writes: u32,
    pub brightness: Option<u8>,
    pub brightness_sets: u32,
    pub flushes: u32,
}

impl RecordingModule {
    pub fn new() -> Self {
        Self {
            patterns: [0; 4],
            writes: 0,
            brightness: None,
            brightness_sets: 0,
            flushes: 0,
        }
    }
}

impl LedModule for RecordingModule {
    fn num_digits(&self) -> usize {
        self.patterns.len()
    }

    fn pattern_at(&self, pos: usize) -> u8 {
        self.patterns.get(pos).copied().unwrap_or(0)
    }

    fn set_pattern_at(&mut self, pos: usize, pattern: u8) {
        if let Some(slot) = self.patterns.get_mut(pos) {
            *slot = pattern;
            self.writes += 1;
        }
    }

    fn set_brightness(&mut self, brightness: u8) {
        self.brightness = Some(brightness);
        self.brightness_sets += 1;
    }

    fn flush(&mut self) {
        self.flushes += 1;
    }
}
