//! Calendar date conversions using O(1) algorithms
//!
//! Howard Hinnant's civil_from_days and days_from_civil.
//! Reference: http://howardhinnant.github.io/date_algorithms.html
//!
//! `days_from_civil` does no validation: a day past the end of its month
//! carries into the next month (2024-02-31 lands on 2024-03-02).

/// Seconds in one civil day
pub const SECONDS_PER_DAY: i64 = 86_400;

/// Convert days since Unix epoch to civil date (year, month, day)
pub fn civil_from_days(days_since_epoch: i64) -> (i32, u8, u8) {
    // Shift epoch from 1970-01-01 to 0000-03-01 so the leap day ends the year
    let z = days_since_epoch + 719_468;
    let era = if z >= 0 { z } else { z - 146_096 } / 146_097;
    let doe = (z - era * 146_097) as u32; // [0, 146096]
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365; // [0, 399]
    let y = yoe as i64 + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100); // [0, 365]
    let mp = (5 * doy + 2) / 153; // [0, 11], 0 = March
    let d = (doy - (153 * mp + 2) / 5 + 1) as u8;
    let m = if mp < 10 { mp + 3 } else { mp - 9 } as u8;
    let year = if m <= 2 { y + 1 } else { y };

    (year as i32, m, d)
}

/// Convert civil date (year, month, day) to days since Unix epoch
pub fn days_from_civil(year: i32, month: u8, day: u8) -> i64 {
    let y = year as i64;
    let m = month as i64;
    let d = day as i64;

    // March = month 0, February = month 11
    let (y, m) = if m <= 2 { (y - 1, m + 9) } else { (y, m - 3) };

    let era = if y >= 0 { y } else { y - 399 } / 400;
    let yoe = y - era * 400; // [0, 399]
    let doy = (153 * m + 2) / 5 + d - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;

    era * 146_097 + doe - 719_468
}

/// ISO weekday number (1 = Monday .. 7 = Sunday) for days since epoch
pub fn iso_weekday_from_days(days_since_epoch: i64) -> u8 {
    // 1970-01-01 was a Thursday (4)
    ((days_since_epoch + 3).rem_euclid(7) + 1) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unix_epoch() {
        assert_eq!(civil_from_days(0), (1970, 1, 1));
        assert_eq!(days_from_civil(1970, 1, 1), 0);
    }

    #[test]
    fn test_known_dates() {
        assert_eq!(days_from_civil(2000, 1, 1), 10_957);
        assert_eq!(civil_from_days(19_723), (2024, 1, 1));
        assert_eq!(civil_from_days(-1), (1969, 12, 31));
    }

    #[test]
    fn test_day_overflow_carries() {
        let feb31 = days_from_civil(2024, 2, 31);
        assert_eq!(civil_from_days(feb31), (2024, 3, 2));

        let apr31 = days_from_civil(2023, 4, 31);
        assert_eq!(civil_from_days(apr31), (2023, 5, 1));
    }

    #[test]
    fn test_leap_day_2024() {
        let days = days_from_civil(2024, 2, 29);
        assert_eq!(civil_from_days(days), (2024, 2, 29));
    }

    #[test]
    fn test_weekday() {
        assert_eq!(iso_weekday_from_days(0), 4); // Thursday
        assert_eq!(iso_weekday_from_days(days_from_civil(2024, 1, 31)), 3); // Wednesday
        assert_eq!(iso_weekday_from_days(days_from_civil(2000, 1, 2)), 7); // Sunday
        assert_eq!(iso_weekday_from_days(-1), 3); // Wednesday
    }
}
