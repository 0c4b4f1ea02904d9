//! Time zone catalog
//!
//! A small fixed, ordered list of selectable zones. The controller only
//! stores indices into it; zone rules live behind [`ZoneCatalog`].

use crate::datetime::{LocalDateTime, ZonedDateTime};
use crate::error::ClockError;

/// One selectable zone with a fixed UTC offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Zone {
    /// Short display abbreviation (fits a 4-digit module)
    pub name: &'static str,
    /// Offset from UTC in minutes, positive east
    pub utc_offset_minutes: i16,
}

/// US mainland zones in west-to-east order
pub const DEFAULT_ZONES: [Zone; 4] = [
    Zone { name: "PST", utc_offset_minutes: -8 * 60 },
    Zone { name: "MST", utc_offset_minutes: -7 * 60 },
    Zone { name: "CST", utc_offset_minutes: -6 * 60 },
    Zone { name: "EST", utc_offset_minutes: -5 * 60 },
];

/// Ordered list of zones and local/UTC conversion
///
/// Indices passed in are always `< len()`; implementations may treat
/// anything else as UTC.
pub trait ZoneCatalog {
    /// Number of zones. Never zero.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Display abbreviation of the zone at `index`
    fn name(&self, index: u8) -> &str;

    /// UTC offset in effect for `index` at the given instant
    fn utc_offset_seconds(&self, index: u8, epoch_seconds: i64) -> i32;

    /// Express an instant in the zone at `index`
    fn to_local(&self, epoch_seconds: i64, index: u8) -> ZonedDateTime {
        let offset = self.utc_offset_seconds(index, epoch_seconds) as i64;
        ZonedDateTime::new(LocalDateTime::from_epoch_seconds(epoch_seconds + offset), index)
    }

    /// Instant of a zoned date-time. Out-of-range fields are normalized.
    fn to_epoch(&self, zdt: &ZonedDateTime) -> i64 {
        let local = zdt.local.to_epoch_seconds();
        local - self.utc_offset_seconds(zdt.zone, local) as i64
    }

    /// Re-express the same instant in another zone
    fn convert(&self, zdt: &ZonedDateTime, to_zone: u8) -> ZonedDateTime {
        self.to_local(self.to_epoch(zdt), to_zone)
    }
}

/// Catalog over a static list of fixed-offset zones
#[derive(Debug, Clone, Copy)]
pub struct FixedOffsetCatalog<'a> {
    zones: &'a [Zone],
}

impl<'a> FixedOffsetCatalog<'a> {
    pub fn new(zones: &'a [Zone]) -> Result<Self, ClockError> {
        if zones.is_empty() || zones.len() > u8::MAX as usize {
            return Err(ClockError::InvalidZoneCatalog);
        }
        Ok(Self { zones })
    }

    pub fn zones(&self) -> &'a [Zone] {
        self.zones
    }
}

impl Default for FixedOffsetCatalog<'static> {
    fn default() -> Self {
        Self {
            zones: &DEFAULT_ZONES,
        }
    }
}

impl ZoneCatalog for FixedOffsetCatalog<'_> {
    fn len(&self) -> usize {
        self.zones.len()
    }

    fn name(&self, index: u8) -> &str {
        self.zones.get(index as usize).map_or("UTC", |z| z.name)
    }

    fn utc_offset_seconds(&self, index: u8, _epoch_seconds: i64) -> i32 {
        self.zones
            .get(index as usize)
            .map_or(0, |z| z.utc_offset_minutes as i32 * 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_catalog_rejected() {
        assert_eq!(
            FixedOffsetCatalog::new(&[]).err(),
            Some(ClockError::InvalidZoneCatalog)
        );
    }

    #[test]
    fn test_oversized_catalog_rejected() {
        let zones = [DEFAULT_ZONES[0]; 256];
        assert_eq!(
            FixedOffsetCatalog::new(&zones).err(),
            Some(ClockError::InvalidZoneCatalog)
        );
        assert!(FixedOffsetCatalog::new(&zones[..255]).is_ok());
    }

    #[test]
    fn test_to_local_and_back() {
        let catalog = FixedOffsetCatalog::default();
        // 2024-02-01T07:59:59Z
        let epoch = 1_706_774_399;
        let pst = catalog.to_local(epoch, 0);
        assert_eq!(pst.local, LocalDateTime::new(2024, 1, 31, 23, 59, 59));
        assert_eq!(pst.zone, 0);
        assert_eq!(catalog.to_epoch(&pst), epoch);
    }

    #[test]
    fn test_convert_keeps_instant() {
        let catalog = FixedOffsetCatalog::default();
        let pst = ZonedDateTime::new(LocalDateTime::new(2024, 1, 31, 23, 30, 0), 0);
        let est = catalog.convert(&pst, 3);
        assert_eq!(est.local, LocalDateTime::new(2024, 2, 1, 2, 30, 0));
        assert_eq!(est.zone, 3);
        assert_eq!(catalog.to_epoch(&est), catalog.to_epoch(&pst));
    }

    #[test]
    fn test_names() {
        let catalog = FixedOffsetCatalog::default();
        assert_eq!(catalog.len(), 4);
        assert_eq!(catalog.name(2), "CST");
        assert_eq!(catalog.name(9), "UTC");
    }
}
