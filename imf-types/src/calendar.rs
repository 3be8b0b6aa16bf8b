//! Proleptic Gregorian calendar arithmetic.
//!
//! Days are counted relative to the Unix epoch (1970-01-01 is day `0`). All conversions work in
//! constant time, i.e., they never loop over years or days.

/// Number of days in a 400-year Gregorian cycle.
const DAYS_PER_400_YEARS: i64 = 146_097;

/// Days before the first day of each month in a common year.
const CUMULATIVE_DAYS: [u16; 12] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];

/// `(y % 4 == 0 && y % 100 != 0) || y % 400 == 0`
pub fn is_leap_year(year: i64) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `month` (`1..=12`) of `year`.
///
/// Returns `None` when `month` is out of range.
pub fn days_in_month(month: u8, year: i64) -> Option<u8> {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => Some(31),
        4 | 6 | 9 | 11 => Some(30),
        2 if is_leap_year(year) => Some(29),
        2 => Some(28),
        _ => None,
    }
}

/// Number of leap years in `1..=year` (extended to the proleptic calendar for `year <= 0`).
fn leap_years_through(year: i64) -> i64 {
    year.div_euclid(4) - year.div_euclid(100) + year.div_euclid(400)
}

/// Days in `year` before the first day of `month`.
fn days_before_month(year: i64, month: u8) -> i64 {
    let index = usize::from(month.clamp(1, 12) - 1);
    let leap_day = i64::from(month > 2 && is_leap_year(year));

    i64::from(CUMULATIVE_DAYS[index]) + leap_day
}

/// Days since 1970-01-01 for the given date.
///
/// The caller is responsible for passing a valid date. Dates before the epoch yield negative
/// values.
pub fn days_since_epoch(year: i64, month: u8, day: u8) -> i64 {
    let leap_years = leap_years_through(year - 1) - leap_years_through(1969);

    365 * (year - 1970) + leap_years + days_before_month(year, month) + (i64::from(day) - 1)
}

/// Day of week, `0` (Sunday) to `6` (Saturday), using Zeller's congruence.
pub fn weekday(year: i64, month: u8, day: u8) -> u8 {
    // January and February are counted as months 13 and 14 of the previous year.
    let (year, month) = if month < 3 {
        (year - 1, i64::from(month) + 12)
    } else {
        (year, i64::from(month))
    };

    let k = year.rem_euclid(100);
    let j = year.div_euclid(100);

    // Zeller's `h` is Saturday-based.
    let h = (i64::from(day) + (13 * (month + 1)) / 5 + k + k / 4 + j.div_euclid(4) + 5 * j)
        .rem_euclid(7);

    ((h + 6) % 7) as u8
}

/// Year and zero-based day within that year for a day count since the epoch.
pub fn year_and_day_of_year(days: i64) -> (i64, u16) {
    let (year, month, day) = date_from_days(days);

    let day_of_year = days_before_month(year, month) + i64::from(day) - 1;

    (year, day_of_year as u16)
}

/// Month (`1..=12`) and day of month for a zero-based day within `year`.
///
/// Returns `None` when `day_of_year` is beyond the end of the year.
pub fn month_and_day(year: i64, day_of_year: u16) -> Option<(u8, u8)> {
    let days_in_year = if is_leap_year(year) { 366 } else { 365 };

    if day_of_year >= days_in_year {
        return None;
    }

    let day_of_year = i64::from(day_of_year);
    let month = (1..=12u8)
        .rev()
        .find(|month| days_before_month(year, *month) <= day_of_year)?;

    let day = day_of_year - days_before_month(year, month) + 1;

    Some((month, day as u8))
}

/// Calendar date `(year, month, day)` for a day count since the epoch.
pub fn date_from_days(days: i64) -> (i64, u8, u8) {
    // Shift the origin to 0000-03-01 so that the leap day is the last day of a "year".
    let z = days + 719_468;
    let era = z.div_euclid(DAYS_PER_400_YEARS);
    let day_of_era = z.rem_euclid(DAYS_PER_400_YEARS);
    let year_of_era =
        (day_of_era - day_of_era / 1460 + day_of_era / 36_524 - day_of_era / 146_096) / 365;
    let day_of_march_year = day_of_era - (365 * year_of_era + year_of_era / 4 - year_of_era / 100);
    let march_month = (5 * day_of_march_year + 2) / 153;

    let day = day_of_march_year - (153 * march_month + 2) / 5 + 1;
    let month = if march_month < 10 {
        march_month + 3
    } else {
        march_month - 9
    };
    let year = year_of_era + era * 400 + i64::from(month <= 2);

    (year, month as u8, day as u8)
}
