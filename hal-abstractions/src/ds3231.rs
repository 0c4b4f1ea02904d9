//! DS3231 real-time clock driver
//!
//! Register model:
//! - `0x00..=0x06`: seconds, minutes, hours, weekday, date, month/century, year (BCD)
//! - `0x11`: temperature integer part (two's complement)
//! - `0x12`: temperature fraction in bits 7:6 (0.25 °C steps)
//!
//! Writes always use 24-hour encoding. Reads accept both 12 and 24-hour
//! encodings since another host may have programmed the chip.

use embedded_hal::i2c::I2c;

use crate::rtc::{RealTimeClock, RtcDateTime, Temperature};

/// Fixed 7-bit bus address
pub const DS3231_ADDRESS: u8 = 0x68;

const REG_SECONDS: u8 = 0x00;
const REG_TEMPERATURE: u8 = 0x11;

const HOUR_12_MODE: u8 = 0b0100_0000;
const HOUR_PM: u8 = 0b0010_0000;
const MONTH_CENTURY: u8 = 0b1000_0000;

/// DS3231 operation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// I2C bus error
    Bus(E),
    /// Register held a value that is not valid BCD or is out of range
    InvalidRegister,
}

pub struct Ds3231<I2C> {
    i2c: I2C,
}

impl<I2C: I2c> Ds3231<I2C> {
    pub fn new(i2c: I2C) -> Self {
        Self { i2c }
    }

    /// Give the bus back
    pub fn release(self) -> I2C {
        self.i2c
    }

    fn read_registers(&mut self, start: u8, buf: &mut [u8]) -> Result<(), Error<I2C::Error>> {
        self.i2c
            .write_read(DS3231_ADDRESS, &[start], buf)
            .map_err(Error::Bus)
    }
}

fn bcd_to_bin(value: u8) -> Option<u8> {
    let (tens, ones) = (value >> 4, value & 0x0F);
    if tens > 9 || ones > 9 {
        return None;
    }
    Some(tens * 10 + ones)
}

fn bin_to_bcd(value: u8) -> u8 {
    ((value / 10) << 4) | (value % 10)
}

fn decode_hour(reg: u8) -> Option<u8> {
    if reg & HOUR_12_MODE == 0 {
        return bcd_to_bin(reg & 0x3F).filter(|h| *h < 24);
    }

    let pm = reg & HOUR_PM != 0;
    let hour = bcd_to_bin(reg & 0x1F).filter(|h| (1..=12).contains(h))?;
    Some(match (hour, pm) {
        (12, false) => 0,
        (12, true) => 12,
        (h, false) => h,
        (h, true) => h + 12,
    })
}

fn decode_datetime(regs: &[u8; 7]) -> Option<RtcDateTime> {
    let second = bcd_to_bin(regs[0] & 0x7F).filter(|s| *s < 60)?;
    let minute = bcd_to_bin(regs[1] & 0x7F).filter(|m| *m < 60)?;
    let hour = decode_hour(regs[2])?;
    let weekday = regs[3] & 0x07;
    let day = bcd_to_bin(regs[4] & 0x3F).filter(|d| (1..=31).contains(d))?;
    let month = bcd_to_bin(regs[5] & 0x1F).filter(|m| (1..=12).contains(m))?;
    let year = bcd_to_bin(regs[6])?;

    Some(RtcDateTime {
        year,
        month,
        day,
        hour,
        minute,
        second,
        weekday,
        century: regs[5] & MONTH_CENTURY != 0,
    })
}

impl<I2C: I2c> RealTimeClock for Ds3231<I2C> {
    type Error = Error<I2C::Error>;

    fn read_time(&mut self) -> Result<RtcDateTime, Self::Error> {
        let mut regs = [0u8; 7];
        self.read_registers(REG_SECONDS, &mut regs)?;
        decode_datetime(&regs).ok_or(Error::InvalidRegister)
    }

    fn write_time(&mut self, datetime: &RtcDateTime) -> Result<(), Self::Error> {
        let century = if datetime.century { MONTH_CENTURY } else { 0 };
        let frame = [
            REG_SECONDS,
            bin_to_bcd(datetime.second),
            bin_to_bcd(datetime.minute),
            bin_to_bcd(datetime.hour),
            datetime.weekday,
            bin_to_bcd(datetime.day),
            bin_to_bcd(datetime.month) | century,
            bin_to_bcd(datetime.year),
        ];
        self.i2c.write(DS3231_ADDRESS, &frame).map_err(Error::Bus)
    }

    fn read_temperature(&mut self) -> Result<Temperature, Self::Error> {
        let mut regs = [0u8; 2];
        self.read_registers(REG_TEMPERATURE, &mut regs)?;
        let quarters = ((regs[0] as i8 as i16) << 2) | (regs[1] >> 6) as i16;
        Ok(Temperature::from_quarter_degrees(quarters))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::i2c::{ErrorKind, ErrorType, Operation};

    /// In-memory register file answering on the DS3231 address
    struct RegisterBus {
        regs: [u8; 0x13],
        pointer: usize,
        fail: bool,
    }

    impl RegisterBus {
        fn new() -> Self {
            Self {
                regs: [0; 0x13],
                pointer: 0,
                fail: false,
            }
        }
    }

    impl ErrorType for RegisterBus {
        type Error = ErrorKind;
    }

    impl I2c for RegisterBus {
        fn transaction(
            &mut self,
            address: u8,
            operations: &mut [Operation<'_>],
        ) -> Result<(), Self::Error> {
            if self.fail || address != DS3231_ADDRESS {
                return Err(ErrorKind::Other);
            }
            for op in operations.iter_mut() {
                match op {
                    Operation::Write(bytes) => {
                        if let Some((first, rest)) = bytes.split_first() {
                            self.pointer = *first as usize;
                            for b in rest {
                                self.regs[self.pointer] = *b;
                                self.pointer += 1;
                            }
                        }
                    }
                    Operation::Read(buf) => {
                        for b in buf.iter_mut() {
                            *b = self.regs[self.pointer];
                            self.pointer += 1;
                        }
                    }
                }
            }
            Ok(())
        }
    }

    #[test]
    fn test_write_then_read_time() {
        let mut rtc = Ds3231::new(RegisterBus::new());
        let dt = RtcDateTime {
            year: 24,
            month: 1,
            day: 31,
            hour: 23,
            minute: 59,
            second: 58,
            weekday: 3,
            century: false,
        };
        rtc.write_time(&dt).unwrap();

        let bus = rtc.release();
        assert_eq!(&bus.regs[..7], &[0x58, 0x59, 0x23, 0x03, 0x31, 0x01, 0x24]);

        let mut rtc = Ds3231::new(bus);
        assert_eq!(rtc.read_time().unwrap(), dt);
    }

    #[test]
    fn test_read_twelve_hour_encoding() {
        let mut bus = RegisterBus::new();
        // 12:30:00 AM, then 11 PM
        bus.regs[..7].copy_from_slice(&[0x00, 0x30, HOUR_12_MODE | 0x12, 1, 0x01, 0x01, 0x00]);
        let mut rtc = Ds3231::new(bus);
        assert_eq!(rtc.read_time().unwrap().hour, 0);

        let mut bus = rtc.release();
        bus.regs[2] = HOUR_12_MODE | HOUR_PM | 0x11;
        let mut rtc = Ds3231::new(bus);
        assert_eq!(rtc.read_time().unwrap().hour, 23);
    }

    #[test]
    fn test_invalid_registers_rejected() {
        let mut bus = RegisterBus::new();
        // Month 0x13 is out of range
        bus.regs[..7].copy_from_slice(&[0x00, 0x00, 0x00, 1, 0x01, 0x13, 0x00]);
        let mut rtc = Ds3231::new(bus);
        assert_eq!(rtc.read_time(), Err(Error::InvalidRegister));
    }

    #[test]
    fn test_bus_error() {
        let mut bus = RegisterBus::new();
        bus.fail = true;
        let mut rtc = Ds3231::new(bus);
        assert_eq!(rtc.read_time(), Err(Error::Bus(ErrorKind::Other)));
        assert!(rtc.read_temperature().is_err());
    }

    #[test]
    fn test_temperature() {
        let mut bus = RegisterBus::new();
        // 25.25 °C
        bus.regs[0x11] = 25;
        bus.regs[0x12] = 0b0100_0000;
        let mut rtc = Ds3231::new(bus);
        assert_eq!(rtc.read_temperature().unwrap().centi_c(), 2525);

        let mut bus = rtc.release();
        // -0.75 °C: integer part -1, fraction +0.25
        bus.regs[0x11] = 0xFF;
        bus.regs[0x12] = 0b0100_0000;
        let mut rtc = Ds3231::new(bus);
        assert_eq!(rtc.read_temperature().unwrap().centi_c(), -75);
    }
}
