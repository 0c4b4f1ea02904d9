//! LED module port
//!
//! A module is a row of seven-segment digits backed by a pattern buffer.
//! Writers update the buffer; `flush` pushes it to the hardware. Bus errors
//! stay inside the driver and are not reported to the caller.

/// Segment bit for the decimal point (or the colon on clock modules)
pub const SEGMENT_DP: u8 = 0b1000_0000;

/// Seven-segment LED module with a local pattern buffer
///
/// Pattern bits are `dp g f e d c b a` from MSB to LSB.
pub trait LedModule {
    /// Number of digit positions on the module
    fn num_digits(&self) -> usize;

    /// Current buffered pattern at `pos`
    fn pattern_at(&self, pos: usize) -> u8;

    /// Replace the buffered pattern at `pos`. Out of range positions are ignored.
    fn set_pattern_at(&mut self, pos: usize, pattern: u8);

    /// Set the brightness level (0-7)
    fn set_brightness(&mut self, brightness: u8);

    /// Send the buffer to the hardware
    fn flush(&mut self);
}
