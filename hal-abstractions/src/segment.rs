//! Seven-segment number and character writing
//!
//! Turns numbers and short strings into segment patterns in an [`LedModule`]
//! buffer. Nothing here touches the hardware; call `flush` on the module.

use crate::display::{LedModule, SEGMENT_DP};

/// Hex digit patterns 0-F
const DIGIT_PATTERNS: [u8; 16] = [
    0b0011_1111, // 0
    0b0000_0110, // 1
    0b0101_1011, // 2
    0b0100_1111, // 3
    0b0110_0110, // 4
    0b0110_1101, // 5
    0b0111_1101, // 6
    0b0000_0111, // 7
    0b0111_1111, // 8
    0b0110_1111, // 9
    0b0111_0111, // A
    0b0111_1100, // b
    0b0011_1001, // C
    0b0101_1110, // d
    0b0111_1001, // E
    0b0111_0001, // F
];

/// Lowercase letter approximations a-z
const LETTER_PATTERNS: [u8; 26] = [
    0b0111_0111, // a (A)
    0b0111_1100, // b
    0b0101_1000, // c
    0b0101_1110, // d
    0b0111_1001, // e (E)
    0b0111_0001, // f (F)
    0b0011_1101, // g (G)
    0b0111_0100, // h
    0b0001_0000, // i
    0b0001_1110, // j
    0b0111_0101, // k
    0b0011_1000, // l (L)
    0b0011_0111, // m
    0b0101_0100, // n
    0b0101_1100, // o
    0b0111_0011, // p (P)
    0b0110_0111, // q
    0b0101_0000, // r
    0b0110_1101, // s (S)
    0b0111_1000, // t
    0b0001_1100, // u
    0b0011_1110, // v (U)
    0b0010_1010, // w
    0b0111_0110, // x (H)
    0b0110_1110, // y
    0b0101_1011, // z
];

pub const PATTERN_BLANK: u8 = 0;
pub const PATTERN_MINUS: u8 = 0b0100_0000;

/// Pattern for a hex digit (only the low nibble is used)
pub fn digit_pattern(digit: u8) -> u8 {
    DIGIT_PATTERNS[(digit & 0x0F) as usize]
}

/// Best-effort pattern for an ASCII character; unknown characters are blank
pub fn char_pattern(c: char) -> u8 {
    match c {
        '0'..='9' => digit_pattern(c as u8 - b'0'),
        'C' => DIGIT_PATTERNS[0xC],
        'I' => 0b0000_0110,
        'O' => DIGIT_PATTERNS[0],
        'U' => 0b0011_1110,
        'H' => 0b0111_0110,
        'a'..='z' => LETTER_PATTERNS[(c as u8 - b'a') as usize],
        'A'..='Z' => LETTER_PATTERNS[(c as u8 - b'A') as usize],
        '-' => PATTERN_MINUS,
        '_' => 0b0000_1000,
        _ => PATTERN_BLANK,
    }
}

/// Cursor-based writer over a module's pattern buffer
pub struct SegmentWriter<'a, M: LedModule + ?Sized> {
    module: &'a mut M,
    pos: usize,
}

impl<'a, M: LedModule + ?Sized> SegmentWriter<'a, M> {
    pub fn new(module: &'a mut M) -> Self {
        Self { module, pos: 0 }
    }

    /// Move the cursor back to the first digit
    pub fn home(&mut self) {
        self.pos = 0;
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    /// Write a raw pattern at the cursor and advance
    pub fn write_pattern(&mut self, pattern: u8) {
        if self.pos < self.module.num_digits() {
            self.module.set_pattern_at(self.pos, pattern);
            self.pos += 1;
        }
    }

    pub fn write_digit(&mut self, digit: u8) {
        self.write_pattern(digit_pattern(digit));
    }

    pub fn write_blank(&mut self) {
        self.write_pattern(PATTERN_BLANK);
    }

    /// Two digits, zero padded. Values above 99 keep their last two digits.
    pub fn write_dec2(&mut self, value: u8) {
        let value = value % 100;
        self.write_digit(value / 10);
        self.write_digit(value % 10);
    }

    /// Two digits with a blank instead of a leading zero
    pub fn write_dec2_blank_padded(&mut self, value: u8) {
        let value = value % 100;
        if value < 10 {
            self.write_blank();
        } else {
            self.write_digit(value / 10);
        }
        self.write_digit(value % 10);
    }

    /// Four digits, zero padded
    pub fn write_dec4(&mut self, value: u16) {
        let value = value % 10_000;
        self.write_dec2((value / 100) as u8);
        self.write_dec2((value % 100) as u8);
    }

    /// Three characters: sign (when negative) and up to three digits, blank padded.
    /// Clamped to [-99, 999].
    pub fn write_signed_dec3(&mut self, value: i16) {
        let value = value.clamp(-99, 999);
        if value < 0 {
            let magnitude = value.unsigned_abs() as u8;
            if magnitude < 10 {
                self.write_blank();
                self.write_pattern(PATTERN_MINUS);
                self.write_digit(magnitude);
            } else {
                self.write_pattern(PATTERN_MINUS);
                self.write_dec2(magnitude);
            }
            return;
        }

        let value = value as u16;
        if value >= 100 {
            self.write_digit((value / 100) as u8);
            self.write_dec2((value % 100) as u8);
        } else {
            self.write_blank();
            self.write_dec2_blank_padded(value as u8);
        }
    }

    /// `HH:MM` with the colon lit
    pub fn write_hour_minute(&mut self, hour: u8, minute: u8) {
        self.write_dec2(hour);
        self.write_dec2(minute);
        self.set_colon(true);
    }

    /// `H:MM` with a blank instead of the leading hour zero
    pub fn write_hour_minute_blank_padded(&mut self, hour: u8, minute: u8) {
        self.write_dec2_blank_padded(hour);
        self.write_dec2(minute);
        self.set_colon(true);
    }

    /// Write ASCII characters until the string or the module runs out
    pub fn write_str(&mut self, s: &str) {
        for c in s.chars() {
            if self.pos >= self.module.num_digits() {
                break;
            }
            self.write_pattern(char_pattern(c));
        }
    }

    /// The clock colon is the decimal point of the second digit
    pub fn set_colon(&mut self, on: bool) {
        self.set_decimal_point(1, on);
    }

    pub fn set_decimal_point(&mut self, pos: usize, on: bool) {
        if pos >= self.module.num_digits() {
            return;
        }
        let pattern = self.module.pattern_at(pos);
        let pattern = if on {
            pattern | SEGMENT_DP
        } else {
            pattern & !SEGMENT_DP
        };
        self.module.set_pattern_at(pos, pattern);
    }

    /// Blank from the cursor to the last digit
    pub fn clear_to_end(&mut self) {
        while self.pos < self.module.num_digits() {
            self.write_blank();
        }
    }

    /// Blank every digit and return home
    pub fn clear(&mut self) {
        self.home();
        self.clear_to_end();
        self.home();
    }
}
