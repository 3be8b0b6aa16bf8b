//! Date and time-related types.
//!
//! A [`DateTime`] is an instant (seconds since the Unix epoch) together with the offset used to
//! display it. Calendar fields are derived on demand as [`DateComponents`].
//!
//! ```abnf
//! date-time   = [ day-of-week "," ] date time [CFWS]
//! day-of-week = ([FWS] day-name)
//! date        = day month year
//! time        = time-of-day zone
//! time-of-day = hour ":" minute [ ":" second ]
//! zone        = (FWS ( "+" / "-" ) 4DIGIT)
//! ```

use std::{
    cmp::Ordering,
    fmt::{Display, Formatter},
    hash::{Hash, Hasher},
    str::from_utf8,
};

use chrono::{FixedOffset, TimeZone};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    calendar::{date_from_days, days_in_month, days_since_epoch, weekday},
    datetime::error::{ComponentsError, DateTimeError, FromChronoError, OffsetError},
    utils::indicators::{is_digit, is_wsp},
};

const SECONDS_PER_DAY: i64 = 86_400;

/// Keeps calendar arithmetic far away from `i64` overflow.
const MAX_YEAR: i64 = 999_999_999;

/// Largest offset expressible by the `zone` grammar, i.e., `+2359`.
const MAX_OFFSET: i32 = 23 * 3600 + 59 * 60;

/// Day names as mandated by RFC 5322, starting with Sunday.
pub const DAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Month names as mandated by RFC 5322, starting with January.
pub const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    const ALL: [Weekday; 7] = [
        Self::Sunday,
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
    ];

    /// `0` (Sunday) to `6` (Saturday).
    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(usize::from(index)).copied()
    }

    /// The three-letter `day-name`, e.g., `Mon`.
    pub fn name(self) -> &'static str {
        DAY_NAMES[usize::from(self.index())]
    }

    /// Look up a `day-name`. Matching is exact: RFC 5322 names are not case-folded here.
    pub fn from_name(name: &[u8]) -> Option<Self> {
        DAY_NAMES
            .iter()
            .position(|candidate| candidate.as_bytes() == name)
            .and_then(|index| Self::from_index(index as u8))
    }
}

impl Display for Weekday {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Month number (`1..=12`) of a three-letter `month` name.
pub fn month_from_name(name: &[u8]) -> Option<u8> {
    MONTH_NAMES
        .iter()
        .position(|candidate| candidate.as_bytes() == name)
        .map(|index| index as u8 + 1)
}

/// Validated calendar fields of a date-time as seen on a wall clock.
///
/// A value of this type is always a real calendar date, e.g., there is no February 30.
/// `second` may be `60` to represent a leap second.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "DateComponentsShadow"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateComponents {
    year: i64,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: u8,
    weekday: Weekday,
}

/// The weekday is derived from the date and thus not part of the shadow.
#[cfg(feature = "serde")]
#[derive(Deserialize, Debug)]
struct DateComponentsShadow {
    year: i64,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: u8,
}

#[cfg(feature = "serde")]
impl TryFrom<DateComponentsShadow> for DateComponents {
    type Error = ComponentsError;

    fn try_from(value: DateComponentsShadow) -> Result<Self, Self::Error> {
        Self::new(
            value.year,
            value.month,
            value.day,
            value.hour,
            value.minute,
            value.second,
        )
    }
}

impl DateComponents {
    pub fn new(
        year: i64,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
    ) -> Result<Self, ComponentsError> {
        if !(-MAX_YEAR..=MAX_YEAR).contains(&year) {
            return Err(ComponentsError::Year { got: year });
        }

        let max = days_in_month(month, year).ok_or(ComponentsError::Month { got: month })?;

        if !(1..=max).contains(&day) {
            return Err(ComponentsError::Day { got: day, max });
        }

        if hour > 23 {
            return Err(ComponentsError::Hour { got: hour });
        }

        if minute > 59 {
            return Err(ComponentsError::Minute { got: minute });
        }

        if second > 60 {
            return Err(ComponentsError::Second { got: second });
        }

        // Safety: `weekday` always returns a value in `0..=6`.
        let weekday = Weekday::from_index(weekday(year, month, day)).unwrap();

        Ok(Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
            weekday,
        })
    }

    pub fn year(&self) -> i64 {
        self.year
    }

    pub fn month(&self) -> u8 {
        self.month
    }

    pub fn day(&self) -> u8 {
        self.day
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    pub fn second(&self) -> u8 {
        self.second
    }

    pub fn weekday(&self) -> Weekday {
        self.weekday
    }

    /// Seconds since the epoch when these fields are read as UTC.
    fn local_seconds(&self) -> i64 {
        days_since_epoch(self.year, self.month, self.day) * SECONDS_PER_DAY
            + i64::from(self.hour) * 3600
            + i64::from(self.minute) * 60
            + i64::from(self.second)
    }
}

/// An instant plus the offset used to display it.
///
/// Two date-times are equal when they denote the same instant, regardless of their offsets,
/// i.e., `Fri, 01 Jan 2021 01:00:00 +0100` equals `Fri, 01 Jan 2021 00:00:00 +0000`.
///
/// Any year in `-999999999..=999999999` can be represented, but RFC 5322 only knows years from
/// 1900 onwards. Formatting a date-time whose local year is before 1900 yields a `date-time`
/// that parsing rejects.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "DateTimeShadow"))]
#[derive(Debug, Clone, Copy)]
pub struct DateTime {
    timestamp: i64,
    offset: i32,
}

#[cfg(feature = "serde")]
#[derive(Deserialize, Debug)]
struct DateTimeShadow {
    timestamp: i64,
    offset: i32,
}

#[cfg(feature = "serde")]
impl TryFrom<DateTimeShadow> for DateTime {
    type Error = OffsetError;

    fn try_from(value: DateTimeShadow) -> Result<Self, Self::Error> {
        Self::new(value.timestamp, value.offset)
    }
}

impl DateTime {
    pub fn validate_offset(offset: i32) -> Result<(), OffsetError> {
        if !(-MAX_OFFSET..=MAX_OFFSET).contains(&offset) {
            return Err(OffsetError::OutOfRange { got: offset });
        }

        if offset % 60 != 0 {
            return Err(OffsetError::Unaligned { got: offset % 60 });
        }

        Ok(())
    }

    /// Create a date-time from seconds since the epoch and an offset (in seconds east of UTC).
    pub fn new(timestamp: i64, offset: i32) -> Result<Self, OffsetError> {
        Self::validate_offset(offset)?;

        Ok(Self { timestamp, offset })
    }

    /// Create a UTC date-time from seconds since the epoch.
    pub fn from_timestamp(timestamp: i64) -> Self {
        Self {
            timestamp,
            offset: 0,
        }
    }

    /// Create a date-time from wall clock fields observed at `offset`.
    ///
    /// A leap second (`second == 60`) becomes the first second of the following minute.
    pub fn from_components(components: &DateComponents, offset: i32) -> Result<Self, OffsetError> {
        Self::new(components.local_seconds() - i64::from(offset), offset)
    }

    /// Constructs a date-time without validation.
    ///
    /// # Warning: IMF conformance
    ///
    /// The caller must ensure that `offset` is valid according to [`Self::validate_offset`].
    /// Failing to do so produces `Date:` fields that can't be parsed back.
    #[cfg(feature = "unvalidated")]
    #[cfg_attr(docsrs, doc(cfg(feature = "unvalidated")))]
    pub fn unvalidated(timestamp: i64, offset: i32) -> Self {
        #[cfg(debug_assertions)]
        Self::validate_offset(offset).unwrap();

        Self { timestamp, offset }
    }

    /// Seconds since 1970-01-01T00:00:00Z.
    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    /// Offset in seconds east of UTC.
    pub fn offset(&self) -> i32 {
        self.offset
    }

    /// Calendar fields as seen on a wall clock at [`Self::offset`].
    pub fn components(&self) -> DateComponents {
        let local = self.timestamp.saturating_add(i64::from(self.offset));
        let (year, month, day) = date_from_days(local.div_euclid(SECONDS_PER_DAY));
        let seconds = local.rem_euclid(SECONDS_PER_DAY);

        DateComponents {
            year,
            month,
            day,
            hour: (seconds / 3600) as u8,
            minute: (seconds % 3600 / 60) as u8,
            second: (seconds % 60) as u8,
            // Safety: `weekday` always returns a value in `0..=6`.
            weekday: Weekday::from_index(weekday(year, month, day)).unwrap(),
        }
    }

    pub fn weekday(&self) -> Weekday {
        self.components().weekday
    }

    #[must_use]
    pub fn adding_seconds(&self, seconds: i64) -> Self {
        Self {
            timestamp: self.timestamp.saturating_add(seconds),
            offset: self.offset,
        }
    }

    #[must_use]
    pub fn adding_days(&self, days: i64) -> Self {
        self.adding_seconds(days.saturating_mul(SECONDS_PER_DAY))
    }

    /// Same instant, displayed at another offset.
    pub fn with_timezone(&self, offset: i32) -> Result<Self, OffsetError> {
        Self::new(self.timestamp, offset)
    }

    /// Midnight of the local day.
    #[must_use]
    pub fn start_of_day(&self) -> Self {
        let local = self.timestamp.saturating_add(i64::from(self.offset));

        self.adding_seconds(-local.rem_euclid(SECONDS_PER_DAY))
    }

    /// Last second of the local day.
    #[must_use]
    pub fn end_of_day(&self) -> Self {
        self.start_of_day().adding_seconds(SECONDS_PER_DAY - 1)
    }

    /// Convert into a `chrono` date-time with the same offset.
    ///
    /// Returns `None` when the instant is outside of `chrono`'s supported range.
    pub fn to_chrono(&self) -> Option<chrono::DateTime<FixedOffset>> {
        let offset = FixedOffset::east_opt(self.offset)?;

        offset.timestamp_opt(self.timestamp, 0).single()
    }
}

impl PartialEq for DateTime {
    fn eq(&self, other: &Self) -> bool {
        self.timestamp == other.timestamp
    }
}

impl Eq for DateTime {}

impl Hash for DateTime {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.timestamp.hash(state);
    }
}

impl PartialOrd for DateTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DateTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.timestamp.cmp(&other.timestamp)
    }
}

impl TryFrom<chrono::DateTime<FixedOffset>> for DateTime {
    type Error = FromChronoError;

    fn try_from(value: chrono::DateTime<FixedOffset>) -> Result<Self, Self::Error> {
        if value.timestamp_subsec_nanos() != 0 {
            return Err(FromChronoError::UnalignedNanoSeconds {
                got: value.timestamp_subsec_nanos(),
            });
        }

        Ok(Self::new(
            value.timestamp(),
            value.offset().local_minus_utc(),
        )?)
    }
}

// ----- Parsing -----------------------------------------------------------------------------------

fn lossy(token: &[u8]) -> String {
    String::from_utf8_lossy(token).into_owned()
}

/// Parse `1*DIGIT` with a length in `min..=max`.
fn number(token: &[u8], min: usize, max: usize) -> Option<i64> {
    if !(min..=max).contains(&token.len()) || !token.iter().all(|b| is_digit(*b)) {
        return None;
    }

    // Safety: `unwrap` can't panic because all bytes are ASCII digits.
    from_utf8(token).unwrap().parse().ok()
}

fn parse_time(token: &[u8]) -> Result<(u8, u8, u8), DateTimeError> {
    let parts: Vec<u8> = token
        .split(|b| *b == b':')
        .map(|part| number(part, 2, 2).map(|n| n as u8))
        .collect::<Option<_>>()
        .ok_or_else(|| DateTimeError::Time(lossy(token)))?;

    let (hour, minute, second) = match parts[..] {
        [hour, minute] => (hour, minute, 0),
        [hour, minute, second] => (hour, minute, second),
        _ => return Err(DateTimeError::Time(lossy(token))),
    };

    if hour > 23 {
        return Err(DateTimeError::Hour(hour));
    }

    if minute > 59 {
        return Err(DateTimeError::Minute(minute));
    }

    if second > 60 {
        return Err(DateTimeError::Second(second));
    }

    Ok((hour, minute, second))
}

/// ```abnf
/// zone = ("+" / "-") 4DIGIT
/// ```
fn parse_zone(token: &[u8]) -> Result<i32, DateTimeError> {
    let error = || DateTimeError::Zone(lossy(token));

    let (sign, digits) = match token {
        [b'+', digits @ ..] if digits.len() == 4 => (1, digits),
        [b'-', digits @ ..] if digits.len() == 4 => (-1, digits),
        _ => return Err(error()),
    };

    let hh = number(&digits[..2], 2, 2).ok_or_else(error)?;
    let mm = number(&digits[2..], 2, 2).ok_or_else(error)?;

    if hh > 23 || mm > 59 {
        return Err(error());
    }

    Ok(sign * (hh as i32 * 3600 + mm as i32 * 60))
}

impl DateTime {
    fn parse(value: &[u8]) -> Result<Self, DateTimeError> {
        let mut tokens = value.split(|b| is_wsp(*b)).filter(|token| !token.is_empty());

        // `day-of-week ","` may be directly followed by the day, e.g., `Fri,01`.
        let first = tokens.next().ok_or(DateTimeError::Format)?;
        let (day_name, rest) = match first.iter().position(|b| *b == b',') {
            Some(index) => (&first[..index], &first[index + 1..]),
            None => return Err(DateTimeError::DayName(lossy(first))),
        };

        let expected =
            Weekday::from_name(day_name).ok_or_else(|| DateTimeError::DayName(lossy(day_name)))?;

        let day = match rest {
            [] => tokens.next().ok_or(DateTimeError::Format)?,
            rest => rest,
        };
        let month = tokens.next().ok_or(DateTimeError::Format)?;
        let year = tokens.next().ok_or(DateTimeError::Format)?;
        let time = tokens.next().ok_or(DateTimeError::Format)?;
        let zone = tokens.next().ok_or(DateTimeError::Format)?;

        let day = number(day, 1, 2)
            .filter(|day| (1..=31).contains(day))
            .ok_or_else(|| DateTimeError::Day(lossy(day)))? as u8;
        let month = month_from_name(month).ok_or_else(|| DateTimeError::Month(lossy(month)))?;
        let year = number(year, 4, 9)
            .filter(|year| *year >= 1900)
            .ok_or_else(|| DateTimeError::Year(lossy(year)))?;
        let (hour, minute, second) = parse_time(time)?;
        let offset = parse_zone(zone)?;

        // Only a trailing comment, e.g., `(UTC)`, may follow the zone.
        let trailer: Vec<&[u8]> = tokens.collect();
        if let (Some(first), Some(last)) = (trailer.first(), trailer.last()) {
            if !first.starts_with(b"(") || !last.ends_with(b")") {
                return Err(DateTimeError::Format);
            }
        }

        let components = DateComponents::new(year, month, day, hour, minute, second)?;

        if components.weekday != expected {
            return Err(DateTimeError::WeekdayMismatch {
                expected,
                got: components.weekday,
            });
        }

        // Safety: `parse_zone` only yields offsets accepted by `validate_offset`.
        Ok(Self::from_components(&components, offset).unwrap())
    }
}

impl TryFrom<&[u8]> for DateTime {
    type Error = DateTimeError;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl TryFrom<Vec<u8>> for DateTime {
    type Error = DateTimeError;

    fn try_from(value: Vec<u8>) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for DateTime {
    type Error = DateTimeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value.as_bytes())
    }
}

impl TryFrom<String> for DateTime {
    type Error = DateTimeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value.as_bytes())
    }
}

/// Error-related types.
pub mod error {
    use thiserror::Error;

    use super::Weekday;

    #[derive(Clone, Debug, Eq, Error, Hash, Ord, PartialEq, PartialOrd)]
    pub enum DateTimeError {
        #[error("expected `Dow, DD Mon YYYY HH:MM[:SS] (+|-)HHMM`")]
        Format,
        #[error("unknown day name {0:?}")]
        DayName(String),
        #[error("expected day `1 <= day <= 31`, got {0:?}")]
        Day(String),
        #[error("unknown month name {0:?}")]
        Month(String),
        #[error("expected year `>= 1900`, got {0:?}")]
        Year(String),
        #[error("expected `HH:MM[:SS]`, got {0:?}")]
        Time(String),
        #[error("expected `0 <= hour <= 23`, got {0}")]
        Hour(u8),
        #[error("expected `0 <= minute <= 59`, got {0}")]
        Minute(u8),
        #[error("expected `0 <= second <= 60`, got {0}")]
        Second(u8),
        #[error("expected zone `(+|-)HHMM`, got {0:?}")]
        Zone(String),
        #[error(transparent)]
        Components(#[from] ComponentsError),
        #[error("day name is {expected}, but the date is a {got}")]
        WeekdayMismatch { expected: Weekday, got: Weekday },
    }

    #[derive(Clone, Debug, Eq, Error, Hash, Ord, PartialEq, PartialOrd)]
    pub enum ComponentsError {
        #[error("expected `-999999999 <= year <= 999999999`, got {got}")]
        Year { got: i64 },
        #[error("expected `1 <= month <= 12`, got {got}")]
        Month { got: u8 },
        #[error("expected `1 <= day <= {max}`, got {got}")]
        Day { got: u8, max: u8 },
        #[error("expected `0 <= hour <= 23`, got {got}")]
        Hour { got: u8 },
        #[error("expected `0 <= minute <= 59`, got {got}")]
        Minute { got: u8 },
        #[error("expected `0 <= second <= 60`, got {got}")]
        Second { got: u8 },
    }

    #[derive(Clone, Debug, Eq, Error, Hash, Ord, PartialEq, PartialOrd)]
    pub enum OffsetError {
        #[error("expected `-86340 <= offset <= 86340`, got {got}")]
        OutOfRange { got: i32 },
        #[error("expected `offset % 60 == 0`, got {got}")]
        Unaligned { got: i32 },
    }

    #[derive(Clone, Debug, Eq, Error, Hash, Ord, PartialEq, PartialOrd)]
    pub enum FromChronoError {
        #[error("expected `nanos == 0`, got {got}")]
        UnalignedNanoSeconds { got: u32 },
        #[error(transparent)]
        Offset(#[from] OffsetError),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        let tests = [
            ("Fri, 01 Jan 2021 00:00:00 +0000", 1_609_459_200, 0),
            ("Fri, 1 Jan 2021 00:00:00 +0000", 1_609_459_200, 0),
            ("Fri,01 Jan 2021 00:00:00 +0000", 1_609_459_200, 0),
            ("Fri, 01 Jan 2021 01:00:00 +0100", 1_609_459_200, 3600),
            ("Thu, 31 Dec 2020 19:00 -0500", 1_609_459_200, -18_000),
            ("Thu, 01 Jan 1970 00:00:00 +0000", 0, 0),
            ("Fri, 01 Jan 2021 00:00:00 +0000 (UTC)", 1_609_459_200, 0),
            ("Fri,  01\tJan 2021  00:00:00   +0000", 1_609_459_200, 0),
            ("Mon, 01 Jan 1900 00:00:00 +0000", -2_208_988_800, 0),
        ];

        for (test, timestamp, offset) in tests {
            let got = DateTime::try_from(test).unwrap();
            assert_eq!(got.timestamp(), timestamp, "{test}");
            assert_eq!(got.offset(), offset, "{test}");
        }
    }

    #[test]
    fn test_parse_leap_second() {
        // The leap second collapses into the first second of the next day.
        let got = DateTime::try_from("Sat, 31 Dec 2016 23:59:60 +0000").unwrap();
        assert_eq!(got.timestamp(), 1_483_228_800);
    }

    #[test]
    fn test_parse_failing() {
        let tests = [
            ("", DateTimeError::Format),
            ("Fri, 01 Jan 2021", DateTimeError::Format),
            (
                "Mon, 01 Jan 2021 12:00:00 +0000",
                DateTimeError::WeekdayMismatch {
                    expected: Weekday::Monday,
                    got: Weekday::Friday,
                },
            ),
            (
                "Fri 01 Jan 2021 00:00:00 +0000",
                DateTimeError::DayName("Fri".into()),
            ),
            (
                "fri, 01 Jan 2021 00:00:00 +0000",
                DateTimeError::DayName("fri".into()),
            ),
            (
                "Fri, 32 Jan 2021 00:00:00 +0000",
                DateTimeError::Day("32".into()),
            ),
            (
                "Fri, 001 Jan 2021 00:00:00 +0000",
                DateTimeError::Day("001".into()),
            ),
            (
                "Fri, 01 January 2021 00:00:00 +0000",
                DateTimeError::Month("January".into()),
            ),
            (
                "Fri, 01 Jan 1899 00:00:00 +0000",
                DateTimeError::Year("1899".into()),
            ),
            (
                "Fri, 01 Jan 21 00:00:00 +0000",
                DateTimeError::Year("21".into()),
            ),
            (
                "Fri, 01 Jan 2021 0:00:00 +0000",
                DateTimeError::Time("0:00:00".into()),
            ),
            (
                "Fri, 01 Jan 2021 00 +0000",
                DateTimeError::Time("00".into()),
            ),
            (
                "Fri, 01 Jan 2021 00:00:00:00 +0000",
                DateTimeError::Time("00:00:00:00".into()),
            ),
            ("Fri, 01 Jan 2021 24:00:00 +0000", DateTimeError::Hour(24)),
            ("Fri, 01 Jan 2021 00:60:00 +0000", DateTimeError::Minute(60)),
            ("Fri, 01 Jan 2021 00:00:61 +0000", DateTimeError::Second(61)),
            (
                "Fri, 01 Jan 2021 00:00:00 0000",
                DateTimeError::Zone("0000".into()),
            ),
            (
                "Fri, 01 Jan 2021 00:00:00 +2400",
                DateTimeError::Zone("+2400".into()),
            ),
            (
                "Fri, 01 Jan 2021 00:00:00 +0060",
                DateTimeError::Zone("+0060".into()),
            ),
            (
                "Fri, 01 Jan 2021 00:00:00 UTC",
                DateTimeError::Zone("UTC".into()),
            ),
            ("Fri, 01 Jan 2021 00:00:00 +0000 x", DateTimeError::Format),
            (
                "Sat, 29 Feb 2021 00:00:00 +0000",
                DateTimeError::Components(ComponentsError::Day { got: 29, max: 28 }),
            ),
        ];

        for (test, expected) in tests {
            assert_eq!(DateTime::try_from(test), Err(expected), "{test}");
        }
    }

    #[test]
    fn test_equality_ignores_offset() {
        let utc = DateTime::try_from("Fri, 01 Jan 2021 00:00:00 +0000").unwrap();
        let cet = DateTime::try_from("Fri, 01 Jan 2021 01:00:00 +0100").unwrap();

        assert_eq!(utc, cet);
        assert_ne!(utc.offset(), cet.offset());

        let mut set = std::collections::HashSet::new();
        set.insert(utc);
        assert!(set.contains(&cet));
    }

    #[test]
    fn test_components() {
        let dt = DateTime::new(1_609_459_200, -3600).unwrap();
        let c = dt.components();

        assert_eq!(
            (c.year(), c.month(), c.day(), c.hour(), c.minute(), c.second()),
            (2020, 12, 31, 23, 0, 0)
        );
        assert_eq!(c.weekday(), Weekday::Thursday);
    }

    #[test]
    fn test_components_failing() {
        let tests = [
            ((2021, 0, 1, 0, 0, 0), ComponentsError::Month { got: 0 }),
            ((2021, 13, 1, 0, 0, 0), ComponentsError::Month { got: 13 }),
            ((2021, 4, 31, 0, 0, 0), ComponentsError::Day { got: 31, max: 30 }),
            ((2021, 4, 0, 0, 0, 0), ComponentsError::Day { got: 0, max: 30 }),
            ((2021, 4, 1, 24, 0, 0), ComponentsError::Hour { got: 24 }),
            ((2021, 4, 1, 0, 60, 0), ComponentsError::Minute { got: 60 }),
            ((2021, 4, 1, 0, 0, 61), ComponentsError::Second { got: 61 }),
        ];

        for ((y, m, d, hh, mm, ss), expected) in tests {
            assert_eq!(DateComponents::new(y, m, d, hh, mm, ss), Err(expected));
        }

        assert!(DateComponents::new(2024, 2, 29, 23, 59, 60).is_ok());
    }

    #[test]
    fn test_offset_validation() {
        assert!(DateTime::new(0, 86_340).is_ok());
        assert!(DateTime::new(0, -86_340).is_ok());
        assert_eq!(
            DateTime::new(0, 86_400),
            Err(OffsetError::OutOfRange { got: 86_400 })
        );
        assert_eq!(DateTime::new(0, 90), Err(OffsetError::Unaligned { got: 30 }));
    }

    #[test]
    fn test_mutators() {
        let dt = DateTime::new(1_609_459_200 + 3 * 3600 + 5, 3600).unwrap();

        assert_eq!(dt.adding_seconds(10).timestamp(), dt.timestamp() + 10);
        assert_eq!(dt.adding_days(-1).timestamp(), dt.timestamp() - 86_400);
        assert_eq!(dt.adding_seconds(10).offset(), 3600);

        // Local midnight at +0100 is 23:00 UTC of the previous day.
        let start = dt.start_of_day();
        assert_eq!(start.timestamp(), 1_609_459_200 - 3600);
        assert_eq!(start.components().hour(), 0);

        let end = dt.end_of_day();
        assert_eq!(end.timestamp(), 1_609_459_200 - 3600 + 86_399);
        assert_eq!(
            (end.components().hour(), end.components().minute()),
            (23, 59)
        );

        let moved = dt.with_timezone(-18_000).unwrap();
        assert_eq!(moved, dt);
        assert_eq!(moved.components().hour(), 22);
        assert!(dt.with_timezone(1).is_err());
    }

    #[test]
    fn test_chrono_interop() {
        let dt = DateTime::new(1_609_459_200, 7200).unwrap();
        let chrono = dt.to_chrono().unwrap();

        assert_eq!(chrono.timestamp(), 1_609_459_200);
        assert_eq!(chrono.offset().local_minus_utc(), 7200);
        assert_eq!(DateTime::try_from(chrono).unwrap(), dt);
    }

    #[test]
    fn test_weekday_names() {
        for (index, name) in DAY_NAMES.iter().enumerate() {
            let weekday = Weekday::from_name(name.as_bytes()).unwrap();
            assert_eq!(weekday.index() as usize, index);
            assert_eq!(weekday.to_string(), *name);
        }

        assert_eq!(month_from_name(b"Jan"), Some(1));
        assert_eq!(month_from_name(b"Dec"), Some(12));
        assert_eq!(month_from_name(b"dec"), None);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialization_date_time() {
        let dt = serde_json::from_str::<DateTime>(r#"{ "timestamp": 1609459200, "offset": 3600 }"#)
            .expect("valid input should deserialize successfully");
        assert_eq!((dt.timestamp(), dt.offset()), (1_609_459_200, 3600));

        let err = serde_json::from_str::<DateTime>(r#"{ "timestamp": 0, "offset": 90000 }"#)
            .expect_err("invalid input should not deserialize successfully");
        assert!(err.to_string().starts_with("expected `-86340 <= offset <= 86340`"));

        let components = serde_json::from_str::<DateComponents>(
            r#"{ "year": 2021, "month": 1, "day": 1, "hour": 0, "minute": 0, "second": 0, "weekday": "Monday" }"#,
        )
        .expect("valid input should deserialize successfully");
        assert_eq!(components.weekday(), Weekday::Friday);

        let err = serde_json::from_str::<DateComponents>(
            r#"{ "year": 2021, "month": 2, "day": 30, "hour": 0, "minute": 0, "second": 0 }"#,
        )
        .expect_err("invalid input should not deserialize successfully");
        assert!(err.to_string().starts_with("expected `1 <= day <= 28`, got 30"));
    }
}
