//! Display/edit mode state machine
//!
//! Modes come in two families. View modes cycle on a short press of the
//! mode button in the configured order. Edit modes for the date-time fields
//! cycle among themselves; the zone and brightness editors form cycles of
//! one. A long press moves between a view mode and its editor.

/// Read-only display modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ViewMode {
    HourMinute,
    Second,
    Year,
    Month,
    Day,
    Weekday,
    TimeZone,
    Brightness,
    TemperatureC,
    TemperatureF,
}

/// Editable fields, one edit mode each
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EditField {
    Hour,
    Minute,
    Second,
    Year,
    Month,
    Day,
    TimeZone,
    Brightness,
}

/// Current state of the mode machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockMode {
    View(ViewMode),
    Edit(EditField),
}

/// Mode button gestures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ModeEvent {
    ShortPress,
    LongPress,
}

/// Side effect the controller performs alongside a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Effect {
    /// Mode change only
    None,
    /// Copy the committed snapshot into scratch
    BeginEdit,
    /// Copy scratch into committed and persist to the RTC
    Commit,
}

/// Result of applying a [`ModeEvent`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Transition {
    pub next: ClockMode,
    pub effect: Effect,
}

/// Every view mode in display order
pub const ALL_VIEWS: [ViewMode; 10] = [
    ViewMode::HourMinute,
    ViewMode::Second,
    ViewMode::Year,
    ViewMode::Month,
    ViewMode::Day,
    ViewMode::Weekday,
    ViewMode::TimeZone,
    ViewMode::Brightness,
    ViewMode::TemperatureC,
    ViewMode::TemperatureF,
];

/// Short-press cycle among the date-time editors
pub const DATE_TIME_EDITS: [EditField; 6] = [
    EditField::Hour,
    EditField::Minute,
    EditField::Second,
    EditField::Year,
    EditField::Month,
    EditField::Day,
];

impl ViewMode {
    /// Editor reached by a long press, if this view has one
    pub fn edit_counterpart(self) -> Option<EditField> {
        match self {
            ViewMode::HourMinute => Some(EditField::Hour),
            ViewMode::Second => Some(EditField::Second),
            ViewMode::Year => Some(EditField::Year),
            ViewMode::Month => Some(EditField::Month),
            ViewMode::Day => Some(EditField::Day),
            ViewMode::TimeZone => Some(EditField::TimeZone),
            ViewMode::Brightness => Some(EditField::Brightness),
            ViewMode::Weekday | ViewMode::TemperatureC | ViewMode::TemperatureF => None,
        }
    }
}

impl EditField {
    /// View returned to when the edit commits
    pub fn view_counterpart(self) -> ViewMode {
        match self {
            EditField::Hour | EditField::Minute => ViewMode::HourMinute,
            EditField::Second => ViewMode::Second,
            EditField::Year => ViewMode::Year,
            EditField::Month => ViewMode::Month,
            EditField::Day => ViewMode::Day,
            EditField::TimeZone => ViewMode::TimeZone,
            EditField::Brightness => ViewMode::Brightness,
        }
    }

    /// Next editor on a short press
    pub fn next(self) -> EditField {
        match DATE_TIME_EDITS.iter().position(|f| *f == self) {
            Some(i) => DATE_TIME_EDITS[(i + 1) % DATE_TIME_EDITS.len()],
            None => self,
        }
    }
}

impl ClockMode {
    pub fn is_edit(self) -> bool {
        matches!(self, ClockMode::Edit(_))
    }

    /// Apply a mode-button event. `None` means the event is ignored here.
    pub fn transition(self, event: ModeEvent, table: &ModeTable) -> Option<Transition> {
        match (self, event) {
            (ClockMode::View(view), ModeEvent::ShortPress) => Some(Transition {
                next: ClockMode::View(table.next_view(view)),
                effect: Effect::None,
            }),
            (ClockMode::Edit(field), ModeEvent::ShortPress) => Some(Transition {
                next: ClockMode::Edit(field.next()),
                effect: Effect::None,
            }),
            (ClockMode::View(view), ModeEvent::LongPress) => {
                view.edit_counterpart().map(|field| Transition {
                    next: ClockMode::Edit(field),
                    effect: Effect::BeginEdit,
                })
            }
            (ClockMode::Edit(field), ModeEvent::LongPress) => Some(Transition {
                next: ClockMode::View(field.view_counterpart()),
                effect: Effect::Commit,
            }),
        }
    }
}

impl Default for ClockMode {
    fn default() -> Self {
        ClockMode::View(ViewMode::HourMinute)
    }
}

/// View family order for this build
#[derive(Debug, Clone, Copy)]
pub struct ModeTable {
    views: &'static [ViewMode],
}

impl ModeTable {
    /// An empty slice falls back to [`ALL_VIEWS`]
    pub const fn new(views: &'static [ViewMode]) -> Self {
        if views.is_empty() {
            Self { views: &ALL_VIEWS }
        } else {
            Self { views }
        }
    }

    /// Next view in the cycle. Views missing from the table restart the cycle.
    pub fn next_view(&self, view: ViewMode) -> ViewMode {
        match self.views.iter().position(|v| *v == view) {
            Some(i) => self.views[(i + 1) % self.views.len()],
            None => self.views[0],
        }
    }
}

impl Default for ModeTable {
    fn default() -> Self {
        Self::new(&ALL_VIEWS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn short(mode: ClockMode, table: &ModeTable) -> ClockMode {
        mode.transition(ModeEvent::ShortPress, table).unwrap().next
    }

    #[test]
    fn test_view_cycle_order() {
        let table = ModeTable::default();
        let mut mode = ClockMode::default();
        let mut seen = [ClockMode::default(); 5];
        for slot in seen.iter_mut() {
            *slot = mode;
            mode = short(mode, &table);
        }
        assert_eq!(
            seen,
            [
                ClockMode::View(ViewMode::HourMinute),
                ClockMode::View(ViewMode::Second),
                ClockMode::View(ViewMode::Year),
                ClockMode::View(ViewMode::Month),
                ClockMode::View(ViewMode::Day),
            ]
        );
    }

    #[test]
    fn test_view_cycle_returns_to_start() {
        let table = ModeTable::default();
        for start in ALL_VIEWS {
            let mut mode = ClockMode::View(start);
            for _ in 0..ALL_VIEWS.len() {
                mode = short(mode, &table);
            }
            assert_eq!(mode, ClockMode::View(start));
        }
    }

    #[test]
    fn test_edit_cycle_returns_to_start() {
        let table = ModeTable::default();
        for start in DATE_TIME_EDITS {
            let mut mode = ClockMode::Edit(start);
            for _ in 0..DATE_TIME_EDITS.len() {
                mode = short(mode, &table);
            }
            assert_eq!(mode, ClockMode::Edit(start));
        }
        // Zone and brightness editors are single-element cycles
        let zone = ClockMode::Edit(EditField::TimeZone);
        assert_eq!(short(zone, &table), zone);
        let brightness = ClockMode::Edit(EditField::Brightness);
        assert_eq!(short(brightness, &table), brightness);
    }

    #[test]
    fn test_long_press_enters_edit() {
        let table = ModeTable::default();
        let t = ClockMode::View(ViewMode::Year)
            .transition(ModeEvent::LongPress, &table)
            .unwrap();
        assert_eq!(t.next, ClockMode::Edit(EditField::Year));
        assert_eq!(t.effect, Effect::BeginEdit);
    }

    #[test]
    fn test_long_press_commits() {
        let table = ModeTable::default();
        let t = ClockMode::Edit(EditField::Minute)
            .transition(ModeEvent::LongPress, &table)
            .unwrap();
        assert_eq!(t.next, ClockMode::View(ViewMode::HourMinute));
        assert_eq!(t.effect, Effect::Commit);
    }

    #[test]
    fn test_long_press_ignored_without_editor() {
        let table = ModeTable::default();
        for view in [ViewMode::Weekday, ViewMode::TemperatureC, ViewMode::TemperatureF] {
            assert_eq!(ClockMode::View(view).transition(ModeEvent::LongPress, &table), None);
        }
    }

    #[test]
    fn test_every_editor_round_trips_to_its_view() {
        for view in ALL_VIEWS {
            if let Some(field) = view.edit_counterpart() {
                assert_eq!(field.view_counterpart(), view);
            }
        }
    }

    #[test]
    fn test_subset_table() {
        static VIEWS: [ViewMode; 3] = [ViewMode::HourMinute, ViewMode::Year, ViewMode::TemperatureC];
        let table = ModeTable::new(&VIEWS);
        assert_eq!(table.next_view(ViewMode::HourMinute), ViewMode::Year);
        assert_eq!(table.next_view(ViewMode::TemperatureC), ViewMode::HourMinute);
        assert_eq!(table.next_view(ViewMode::Weekday), ViewMode::HourMinute);
    }
}
