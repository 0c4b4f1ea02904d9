//! MAX7219 seven-segment module
//!
//! The chip runs in no-decode mode so every segment is driven directly from
//! the core's patterns. Digit 0 of the chip is the rightmost position.

use defmt::warn;
use embassy_stm32::gpio::Output;
use embassy_stm32::mode::Blocking;
use embassy_stm32::spi::Spi;
use hal_abstractions::LedModule;
use max7219::connectors::SpiConnectorSW;
use max7219::{DataError, DecodeMode, MAX7219};

/// Digits wired on the clock face
pub const CLOCK_DIGITS: usize = 4;

/// Digit registers per chip
const CHIP_DIGITS: usize = 8;

/// Single chip, no daisy chain
const CHIP: usize = 0;

type Connector = SpiConnectorSW<Spi<'static, Blocking>, Output<'static>>;

pub struct SegmentModule {
    driver: MAX7219<Connector>,
    buffer: [u8; CLOCK_DIGITS],
}

impl SegmentModule {
    pub fn new(spi: Spi<'static, Blocking>, cs: Output<'static>) -> Result<Self, DataError> {
        let mut driver = MAX7219::from_spi_cs(1, spi, cs)?;
        driver.power_on()?;
        driver.set_decode_mode(CHIP, DecodeMode::NoDecode)?;
        driver.clear_display(CHIP)?;

        Ok(Self {
            driver,
            buffer: [0; CLOCK_DIGITS],
        })
    }
}

/// `dp g f e d c b a` to the chip's `dp a b c d e f g`
fn to_register(pattern: u8) -> u8 {
    let mut out = pattern & 0x80;
    for bit in 0..7 {
        if pattern & (1 << bit) != 0 {
            out |= 1 << (6 - bit);
        }
    }
    out
}

impl LedModule for SegmentModule {
    fn num_digits(&self) -> usize {
        CLOCK_DIGITS
    }

    fn pattern_at(&self, pos: usize) -> u8 {
        self.buffer.get(pos).copied().unwrap_or(0)
    }

    fn set_pattern_at(&mut self, pos: usize, pattern: u8) {
        if let Some(slot) = self.buffer.get_mut(pos) {
            *slot = pattern;
        }
    }

    fn set_brightness(&mut self, brightness: u8) {
        // 8 clock levels over the chip's 16 duty steps
        let intensity = (brightness.min(7) << 1) | 1;
        if self.driver.set_intensity(CHIP, intensity).is_err() {
            warn!("MAX7219 intensity write failed");
        }
    }

    fn flush(&mut self) {
        let mut raw = [0u8; CHIP_DIGITS];
        for (pos, pattern) in self.buffer.iter().enumerate() {
            raw[CLOCK_DIGITS - 1 - pos] = to_register(*pattern);
        }
        if self.driver.write_raw(CHIP, &raw).is_err() {
            warn!("MAX7219 write failed");
        }
    }
}
