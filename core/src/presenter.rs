//! Snapshot to segment-pattern rendering
//!
//! The presenter holds the last snapshot it was given and the last one it
//! actually drew. `render` is a no-op when the two match, which keeps bus
//! traffic down when nothing changed between ticks.

use hal_abstractions::segment::SegmentWriter;
use hal_abstractions::LedModule;

use crate::mode::{ClockMode, EditField, ViewMode};
use crate::snapshot::{ClockSnapshot, HourFormat};
use crate::zone::ZoneCatalog;

/// Hex digit drawn after a temperature as its unit
const UNIT_CELSIUS: u8 = 0xC;
const UNIT_FAHRENHEIT: u8 = 0xF;

pub struct Presenter<D> {
    display: D,
    current: ClockSnapshot,
    previous: Option<ClockSnapshot>,
}

impl<D: LedModule> Presenter<D> {
    pub fn new(display: D) -> Self {
        Self {
            display,
            current: ClockSnapshot::default(),
            previous: None,
        }
    }

    /// Snapshot to draw on the next `render`
    pub fn set_snapshot(&mut self, snapshot: &ClockSnapshot) {
        self.current = *snapshot;
    }

    pub fn snapshot(&self) -> &ClockSnapshot {
        &self.current
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    /// Draw the current snapshot into the module buffer.
    ///
    /// Returns `false` without touching the module when the snapshot is the
    /// one drawn last time.
    pub fn render<Z: ZoneCatalog + ?Sized>(&mut self, zones: &Z) -> bool {
        let snapshot = self.current;
        if self.previous == Some(snapshot) {
            return false;
        }

        if self.previous.map(|p| p.brightness) != Some(snapshot.brightness) {
            self.display.set_brightness(snapshot.brightness);
        }
        self.previous = Some(snapshot);

        let mut writer = SegmentWriter::new(&mut self.display);
        writer.clear();
        draw(&mut writer, &snapshot, zones);
        true
    }

    /// Push the module buffer to the hardware
    pub fn flush(&mut self) {
        self.display.flush();
    }
}

fn draw<M, Z>(w: &mut SegmentWriter<'_, M>, s: &ClockSnapshot, zones: &Z)
where
    M: LedModule + ?Sized,
    Z: ZoneCatalog + ?Sized,
{
    let dt = &s.date_time.local;
    let show = s.field_visible();

    match s.mode {
        ClockMode::View(ViewMode::HourMinute) => {
            write_hour_minute(w, s.hour_format, dt.hour, dt.minute);
        }
        ClockMode::Edit(EditField::Hour) => {
            if show {
                write_hour_minute(w, s.hour_format, dt.hour, dt.minute);
            } else {
                w.write_blank();
                w.write_blank();
                w.write_dec2(dt.minute);
                w.set_colon(true);
                if s.hour_format == HourFormat::Twelve {
                    w.set_decimal_point(3, dt.hour >= 12);
                }
            }
        }
        ClockMode::Edit(EditField::Minute) => {
            if show {
                write_hour_minute(w, s.hour_format, dt.hour, dt.minute);
            } else {
                match s.hour_format {
                    HourFormat::TwentyFour => w.write_dec2(dt.hour),
                    HourFormat::Twelve => w.write_dec2_blank_padded(twelve_hour(dt.hour)),
                }
                w.set_colon(true);
            }
        }
        ClockMode::View(ViewMode::Second) => write_second(w, dt.second),
        ClockMode::Edit(EditField::Second) => {
            if show {
                write_second(w, dt.second);
            }
        }
        ClockMode::View(ViewMode::Year) => w.write_dec4(dt.year),
        ClockMode::Edit(EditField::Year) => {
            if show {
                w.write_dec4(dt.year);
            }
        }
        ClockMode::View(ViewMode::Month) => write_right_dec2(w, dt.month),
        ClockMode::Edit(EditField::Month) => {
            if show {
                write_right_dec2(w, dt.month);
            }
        }
        ClockMode::View(ViewMode::Day) => write_right_dec2(w, dt.day),
        ClockMode::Edit(EditField::Day) => {
            if show {
                write_right_dec2(w, dt.day);
            }
        }
        ClockMode::View(ViewMode::Weekday) => {
            w.write_str(dt.weekday().short_name());
        }
        ClockMode::View(ViewMode::TimeZone) => {
            w.write_str(zones.name(s.zone_index));
        }
        ClockMode::Edit(EditField::TimeZone) => {
            if show {
                w.write_str(zones.name(s.zone_index));
            }
        }
        ClockMode::View(ViewMode::Brightness) => {
            write_brightness_label(w);
            w.write_dec2_blank_padded(s.brightness);
        }
        ClockMode::Edit(EditField::Brightness) => {
            write_brightness_label(w);
            if show {
                w.write_dec2_blank_padded(s.brightness);
            }
        }
        ClockMode::View(ViewMode::TemperatureC) => {
            w.write_signed_dec3(s.temperature_centi_c / 100);
            w.write_digit(UNIT_CELSIUS);
        }
        ClockMode::View(ViewMode::TemperatureF) => {
            w.write_signed_dec3(s.temperature_centi_f / 100);
            w.write_digit(UNIT_FAHRENHEIT);
        }
    }
}

fn twelve_hour(hour: u8) -> u8 {
    match hour % 12 {
        0 => 12,
        h => h,
    }
}

fn write_hour_minute<M: LedModule + ?Sized>(
    w: &mut SegmentWriter<'_, M>,
    format: HourFormat,
    hour: u8,
    minute: u8,
) {
    match format {
        HourFormat::TwentyFour => w.write_hour_minute(hour, minute),
        HourFormat::Twelve => {
            w.write_hour_minute_blank_padded(twelve_hour(hour), minute);
            // PM dot on the last digit
            w.set_decimal_point(3, hour >= 12);
        }
    }
}

fn write_second<M: LedModule + ?Sized>(w: &mut SegmentWriter<'_, M>, second: u8) {
    w.write_blank();
    w.write_blank();
    w.write_dec2(second);
    w.set_colon(true);
}

fn write_right_dec2<M: LedModule + ?Sized>(w: &mut SegmentWriter<'_, M>, value: u8) {
    w.write_blank();
    w.write_blank();
    w.write_dec2(value);
}

fn write_brightness_label<M: LedModule + ?Sized>(w: &mut SegmentWriter<'_, M>) {
    w.write_str("br");
    w.set_decimal_point(1, true);
}
