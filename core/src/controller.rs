//! Clock controller
//!
//! Owns the committed and scratch snapshots and every state change applied
//! to them. View modes show `committed`, which ticks from the wall clock.
//! Edit modes show `scratch`, which is copied from `committed` when an edit
//! starts and copied back (then written to the RTC) when it commits.
//!
//! The controller never blocks and never retries. Callers drive it from
//! periodic tasks; a failed RTC operation is logged and skipped until the
//! next period.

use hal_abstractions::{ButtonEvent, LedModule, RealTimeClock, RtcDateTime};

use crate::config::ClockConfig;
use crate::datetime::LocalDateTime;
use crate::error::ClockError;
use crate::mode::{ClockMode, EditField, Effect, ModeEvent, ModeTable};
use crate::presenter::Presenter;
use crate::snapshot::{ClockSnapshot, BRIGHTNESS_LEVELS};
use crate::wallclock::WallClock;
use crate::zone::ZoneCatalog;

/// Years the RTC can hold
const RTC_FIRST_YEAR: u16 = 2000;
const RTC_LAST_YEAR: u16 = 2099;

/// Logical buttons on the clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonId {
    /// Cycles modes; long press enters or commits an edit
    Mode,
    /// Increments the field under edit
    Change,
}

pub struct Controller<R, Z, D> {
    rtc: R,
    zones: Z,
    presenter: Presenter<D>,
    wall: WallClock,
    table: ModeTable,
    committed: ClockSnapshot,
    scratch: ClockSnapshot,
}

impl<R, Z, D> Controller<R, Z, D>
where
    R: RealTimeClock,
    Z: ZoneCatalog,
    D: LedModule,
{
    /// Build a controller showing the default wall-clock time.
    ///
    /// A zone index outside the catalog falls back to the first zone.
    pub fn new(rtc: R, zones: Z, display: D, config: &ClockConfig) -> Self {
        let zone_index = if (config.zone_index as usize) < zones.len() {
            config.zone_index
        } else {
            0
        };
        let wall = WallClock::new();

        let mut committed = ClockSnapshot::new(
            ClockMode::default(),
            config.hour_format,
            config.brightness,
            zone_index,
        );
        committed.date_time = zones.to_local(wall.now_epoch_seconds(0), zone_index);

        let mut presenter = Presenter::new(display);
        presenter.set_snapshot(&committed);

        Self {
            rtc,
            zones,
            presenter,
            wall,
            table: config.mode_table(),
            committed,
            scratch: committed,
        }
    }

    /// Startup: take the time from the RTC, then show it
    pub fn setup(&mut self, uptime_ms: u64) {
        match self.resync_from_rtc(uptime_ms) {
            Ok(()) => info!("Wall clock set from RTC"),
            Err(e) => warn!("Starting without RTC time: {}", e),
        }
        if let Err(e) = self.read_temperature() {
            debug!("Initial temperature unavailable: {}", e);
        }
        self.sync_system_time(uptime_ms);
    }

    pub fn committed(&self) -> &ClockSnapshot {
        &self.committed
    }

    pub fn scratch(&self) -> &ClockSnapshot {
        &self.scratch
    }

    /// Snapshot the display should show
    pub fn shown(&self) -> &ClockSnapshot {
        if self.committed.mode.is_edit() {
            &self.scratch
        } else {
            &self.committed
        }
    }

    pub fn mode(&self) -> ClockMode {
        self.committed.mode
    }

    pub fn wall_clock(&self) -> &WallClock {
        &self.wall
    }

    pub fn zones(&self) -> &Z {
        &self.zones
    }

    pub fn rtc(&self) -> &R {
        &self.rtc
    }

    pub fn presenter(&self) -> &Presenter<D> {
        &self.presenter
    }

    /// Route a classified button event
    pub fn handle_button(&mut self, button: ButtonId, event: ButtonEvent, uptime_ms: u64) {
        match (button, event) {
            (ButtonId::Mode, ButtonEvent::Released) => self.handle_mode_press(),
            (ButtonId::Mode, ButtonEvent::LongPressed) => self.handle_mode_long_press(uptime_ms),
            (ButtonId::Change, ButtonEvent::Pressed | ButtonEvent::RepeatPressed) => {
                self.handle_change_press()
            }
            (ButtonId::Change, ButtonEvent::Released | ButtonEvent::LongReleased) => {
                self.handle_change_release()
            }
            _ => {}
        }
    }

    /// Short press of the mode button: next mode in the current family
    pub fn handle_mode_press(&mut self) {
        self.apply(ModeEvent::ShortPress, 0);
    }

    /// Long press of the mode button: enter an edit or commit it
    pub fn handle_mode_long_press(&mut self, uptime_ms: u64) {
        self.apply(ModeEvent::LongPress, uptime_ms);
    }

    fn apply(&mut self, event: ModeEvent, uptime_ms: u64) {
        let Some(transition) = self.committed.mode.transition(event, &self.table) else {
            trace!("{} ignored in {}", event, self.committed.mode);
            return;
        };

        match (transition.effect, self.committed.mode) {
            (Effect::BeginEdit, _) => self.scratch = self.committed,
            (Effect::Commit, ClockMode::Edit(field)) => self.commit(field, uptime_ms),
            _ => {}
        }

        self.committed.mode = transition.next;
        self.scratch.mode = transition.next;
        debug!("Mode {}", transition.next);
        self.update_presenter();
    }

    fn commit(&mut self, field: EditField, uptime_ms: u64) {
        // The ticking time, not the one frozen when the edit began
        let live = self.committed.date_time;
        self.committed = self.scratch;

        match field {
            // Same instant, new local rendering
            EditField::TimeZone => {
                self.committed.date_time = self.zones.convert(&live, self.scratch.zone_index);
            }
            EditField::Brightness => self.committed.date_time = live,
            _ => {
                let epoch = self.zones.to_epoch(&self.committed.date_time);
                self.wall.calibrate(epoch, uptime_ms);
            }
        }

        match self.persist() {
            Ok(()) => info!("Committed {}", field),
            Err(e) => warn!("Committed {} but not persisted: {}", field, e),
        }
    }

    /// Write the committed date-time to the RTC as UTC
    fn persist(&mut self) -> Result<(), ClockError> {
        let epoch = self.zones.to_epoch(&self.committed.date_time);
        let record = rtc_record(&LocalDateTime::from_epoch_seconds(epoch))?;
        self.rtc
            .write_time(&record)
            .map_err(|_| ClockError::RtcWrite)
    }

    /// Change button pressed or auto-repeated: bump the field under edit
    pub fn handle_change_press(&mut self) {
        let ClockMode::Edit(field) = self.scratch.mode else {
            return;
        };

        let s = &mut self.scratch;
        let dt = &mut s.date_time.local;
        match field {
            EditField::Hour => dt.hour = (dt.hour + 1) % 24,
            EditField::Minute => dt.minute = (dt.minute + 1) % 60,
            EditField::Second => dt.second = (dt.second + 1) % 60,
            EditField::Year => {
                dt.year = if (RTC_FIRST_YEAR..RTC_LAST_YEAR).contains(&dt.year) {
                    dt.year + 1
                } else {
                    RTC_FIRST_YEAR
                }
            }
            EditField::Month => dt.month = if dt.month >= 12 { 1 } else { dt.month + 1 },
            EditField::Day => dt.day = if dt.day >= 31 { 1 } else { dt.day + 1 },
            EditField::TimeZone => {
                let len = self.zones.len().max(1);
                s.zone_index = ((s.zone_index as usize + 1) % len) as u8;
            }
            EditField::Brightness => s.brightness = (s.brightness + 1) % BRIGHTNESS_LEVELS,
        }

        self.scratch.blink_suppressed = true;
        self.committed.blink_suppressed = true;
        self.update_presenter();

        // Feedback can't wait for the next flush period
        self.render();
        self.flush();
    }

    /// Change button released
    pub fn handle_change_release(&mut self) {
        self.scratch.blink_suppressed = false;
        self.committed.blink_suppressed = false;
        self.update_presenter();
    }

    /// Blink timer tick
    pub fn blink(&mut self) {
        let show = !self.committed.blink_show;
        self.committed.blink_show = show;
        self.scratch.blink_show = show;
        self.update_presenter();
    }

    /// Copy wall-clock "now" into the committed snapshot
    pub fn sync_system_time(&mut self, uptime_ms: u64) {
        let now = self.wall.now_epoch_seconds(uptime_ms);
        self.committed.date_time = self.zones.to_local(now, self.committed.zone_index);
        self.update_presenter();
    }

    /// Re-anchor the wall clock on the RTC.
    ///
    /// On failure the wall clock and both snapshots are left untouched.
    pub fn resync_from_rtc(&mut self, uptime_ms: u64) -> Result<(), ClockError> {
        let record = self.rtc.read_time().map_err(|_| {
            warn!("RTC read failed");
            ClockError::RtcRead
        })?;

        let rtc_time = LocalDateTime::new(
            record.full_year(),
            record.month,
            record.day,
            record.hour,
            record.minute,
            record.second,
        );
        let delta_ms = rtc_time.to_epoch_seconds() * 1000 - self.wall.now_epoch_millis(uptime_ms);
        self.wall.adjust(delta_ms);
        debug!("Wall clock adjusted by {=i64} ms", delta_ms);
        Ok(())
    }

    /// Read the RTC temperature sensor into both snapshots
    pub fn read_temperature(&mut self) -> Result<(), ClockError> {
        let temperature = self.rtc.read_temperature().map_err(|_| {
            warn!("RTC temperature read failed");
            ClockError::TemperatureRead
        })?;

        for s in [&mut self.committed, &mut self.scratch] {
            s.temperature_centi_c = temperature.centi_c();
            s.temperature_centi_f = temperature.centi_f();
        }
        self.update_presenter();
        Ok(())
    }

    /// Draw the shown snapshot if it changed. Returns whether anything was drawn.
    pub fn render(&mut self) -> bool {
        self.presenter.render(&self.zones)
    }

    pub fn flush(&mut self) {
        self.presenter.flush();
    }

    /// One status line with the committed time
    pub fn log_status(&self) {
        let dt = &self.committed.date_time;
        let stamp = dt.local.iso8601();
        info!(
            "{=str} {=str} mode={} brightness={=u8}",
            stamp.as_str(),
            self.zones.name(dt.zone),
            self.committed.mode,
            self.committed.brightness
        );
    }

    fn update_presenter(&mut self) {
        let shown = *self.shown();
        self.presenter.set_snapshot(&shown);
    }
}

/// RTC register record for a UTC date-time
fn rtc_record(utc: &LocalDateTime) -> Result<RtcDateTime, ClockError> {
    if !(RTC_FIRST_YEAR..=RTC_LAST_YEAR).contains(&utc.year) {
        return Err(ClockError::YearOutOfRange);
    }
    Ok(RtcDateTime {
        year: (utc.year - RTC_FIRST_YEAR) as u8,
        month: utc.month,
        day: utc.day,
        hour: utc.hour,
        minute: utc.minute,
        second: utc.second,
        weekday: utc.weekday().iso_number(),
        century: false,
    })
}
