//! Button event classification
//!
//! Turns periodically sampled button levels into press, release, long press
//! and auto-repeat events. Samples are expected to be already debounced
//! (or taken slowly enough that bounce does not matter).

/// Discrete button events delivered to the clock controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonEvent {
    /// Button went down
    Pressed,
    /// Button went up without a long press
    Released,
    /// Button held past the long press threshold
    LongPressed,
    /// Auto-repeat while held
    RepeatPressed,
    /// Button went up after a long press
    LongReleased,
}

/// Timing thresholds for event classification (milliseconds)
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonConfig {
    /// Hold time before `LongPressed`
    pub long_press_ms: u32,
    /// Hold time before the first `RepeatPressed`
    pub repeat_delay_ms: u32,
    /// Time between subsequent `RepeatPressed` events
    pub repeat_interval_ms: u32,
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self {
            long_press_ms: 1000,
            repeat_delay_ms: 1000,
            repeat_interval_ms: 200,
        }
    }
}

/// Event state tracker for a single button
#[derive(Debug, Clone, Copy)]
pub struct Button {
    config: ButtonConfig,
    /// Last sampled level (true = pressed)
    pressed: bool,
    /// Timestamp (ms) of the press edge
    pressed_at_ms: u32,
    /// Timestamp (ms) of the last repeat event
    last_repeat_ms: u32,
    long_pressed: bool,
    repeating: bool,
}

impl Button {
    pub fn new(config: ButtonConfig) -> Self {
        Self {
            config,
            pressed: false,
            pressed_at_ms: 0,
            last_repeat_ms: 0,
            long_pressed: false,
            repeating: false,
        }
    }

    /// Feed one sample. Returns at most one event per call.
    pub fn check(&mut self, is_pressed: bool, now_ms: u32) -> Option<ButtonEvent> {
        match (self.pressed, is_pressed) {
            (false, true) => {
                self.pressed = true;
                self.pressed_at_ms = now_ms;
                self.long_pressed = false;
                self.repeating = false;
                Some(ButtonEvent::Pressed)
            }
            (true, false) => {
                self.pressed = false;
                if self.long_pressed {
                    Some(ButtonEvent::LongReleased)
                } else {
                    Some(ButtonEvent::Released)
                }
            }
            (true, true) => self.check_held(now_ms),
            (false, false) => None,
        }
    }

    fn check_held(&mut self, now_ms: u32) -> Option<ButtonEvent> {
        let held = now_ms.wrapping_sub(self.pressed_at_ms);

        if !self.long_pressed && held >= self.config.long_press_ms {
            self.long_pressed = true;
            return Some(ButtonEvent::LongPressed);
        }

        if !self.repeating {
            if held >= self.config.repeat_delay_ms {
                self.repeating = true;
                self.last_repeat_ms = now_ms;
                return Some(ButtonEvent::RepeatPressed);
            }
        } else if now_ms.wrapping_sub(self.last_repeat_ms) >= self.config.repeat_interval_ms {
            self.last_repeat_ms = now_ms;
            return Some(ButtonEvent::RepeatPressed);
        }

        None
    }
}

impl Default for Button {
    fn default() -> Self {
        Self::new(ButtonConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_press() {
        let mut b = Button::default();
        assert_eq!(b.check(false, 0), None);
        assert_eq!(b.check(true, 5), Some(ButtonEvent::Pressed));
        assert_eq!(b.check(true, 100), None);
        assert_eq!(b.check(false, 200), Some(ButtonEvent::Released));
        assert_eq!(b.check(false, 205), None);
    }

    #[test]
    fn test_long_press_then_repeat() {
        let mut b = Button::default();
        assert_eq!(b.check(true, 0), Some(ButtonEvent::Pressed));
        assert_eq!(b.check(true, 999), None);
        assert_eq!(b.check(true, 1000), Some(ButtonEvent::LongPressed));
        // First repeat lands on the next sample when both thresholds coincide
        assert_eq!(b.check(true, 1005), Some(ButtonEvent::RepeatPressed));
        assert_eq!(b.check(true, 1100), None);
        assert_eq!(b.check(true, 1205), Some(ButtonEvent::RepeatPressed));
        assert_eq!(b.check(false, 1300), Some(ButtonEvent::LongReleased));
    }

    #[test]
    fn test_timestamp_wraparound() {
        let mut b = Button::default();
        let start = u32::MAX - 10;
        assert_eq!(b.check(true, start), Some(ButtonEvent::Pressed));
        assert_eq!(
            b.check(true, start.wrapping_add(1000)),
            Some(ButtonEvent::LongPressed)
        );
    }
}
