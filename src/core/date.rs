use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::{AnalysisError, AnalysisResult};

const CANONICAL_FORMAT: &str = "%Y-%m-%d";
const MAX_CANONICAL_YEAR: i32 = 9999;
const DISPLAY_FORMAT: &str = "%d/%m/%Y";

const ISO_DATE_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const GENERIC_DATE_FORMATS: [&str; 6] = [
    "%Y.%m.%d",
    "%d.%m.%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
    "%d %b %Y",
];

/// Calendar date without a time component.
///
/// Ordering follows the calendar, which is the same order as the canonical
/// `YYYY-MM-DD` key sorted as a string. Years are limited to `0..=9999` so
/// the key always has a four-digit year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NormalizedDate(NaiveDate);

impl NormalizedDate {
    #[must_use]
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).and_then(Self::from_naive)
    }

    /// Returns `None` for years outside `0..=9999`.
    #[must_use]
    pub fn from_naive(date: NaiveDate) -> Option<Self> {
        (0..=MAX_CANONICAL_YEAR)
            .contains(&date.year())
            .then_some(Self(date))
    }

    #[must_use]
    pub fn naive(self) -> NaiveDate {
        self.0
    }

    /// Sortable `YYYY-MM-DD` key.
    #[must_use]
    pub fn canonical_key(self) -> String {
        self.0.format(CANONICAL_FORMAT).to_string()
    }

    /// Chart label form: `DD/MM/YYYY`.
    #[must_use]
    pub fn display_label(self) -> String {
        self.0.format(DISPLAY_FORMAT).to_string()
    }
}

impl fmt::Display for NormalizedDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(CANONICAL_FORMAT))
    }
}

impl FromStr for NormalizedDate {
    type Err = AnalysisError;

    /// Parses the canonical `YYYY-MM-DD` key only.
    fn from_str(input: &str) -> AnalysisResult<Self> {
        let date = NaiveDate::parse_from_str(input.trim(), CANONICAL_FORMAT).map_err(|e| {
            AnalysisError::InvalidData(format!("invalid canonical date `{input}`: {e}"))
        })?;
        Self::from_naive(date).ok_or_else(|| {
            AnalysisError::InvalidData(format!("canonical date `{input}` is out of range"))
        })
    }
}

impl TryFrom<String> for NormalizedDate {
    type Error = AnalysisError;

    fn try_from(value: String) -> AnalysisResult<Self> {
        value.parse()
    }
}

impl From<NormalizedDate> for String {
    fn from(value: NormalizedDate) -> Self {
        value.canonical_key()
    }
}

/// Resolves a result date written in one of the formats the results feed uses.
///
/// - `a/b/c` is always day/month/year.
/// - `a-b-c` is ISO when `a` has four characters, day-month-year otherwise.
/// - anything else goes through a small list of generic formats.
///
/// Returns `None` for empty input, anything that is not a real calendar date,
/// and years outside `0..=9999`.
#[must_use]
pub fn normalize_result_date(raw: &str) -> Option<NormalizedDate> {
    let input = raw.trim();
    if input.is_empty() {
        return None;
    }

    let date = if input.contains('/') {
        parse_day_first(input, '/')
    } else if input.contains('-') {
        let first_len = input.split('-').next().map_or(0, |part| part.chars().count());
        if first_len == 4 {
            parse_iso(input)
        } else {
            // RFC 2822 offsets such as `-0500` also land here.
            parse_day_first(input, '-').or_else(|| parse_generic(input))
        }
    } else {
        parse_generic(input)
    };

    date.and_then(NormalizedDate::from_naive)
}

/// Optional-input variant used for records whose date field may be null.
#[must_use]
pub fn normalize_optional_date(raw: Option<&str>) -> Option<NormalizedDate> {
    raw.and_then(normalize_result_date)
}

fn parse_day_first(input: &str, separator: char) -> Option<NaiveDate> {
    let parts: SmallVec<[&str; 3]> = input.split(separator).collect();
    if parts.len() != 3 {
        return None;
    }
    let day = parse_component::<u32>(parts[0])?;
    let month = parse_component::<u32>(parts[1])?;
    let year = parse_component::<i32>(parts[2])?;
    NaiveDate::from_ymd_opt(year, month, day)
}

fn parse_iso(input: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(input, CANONICAL_FORMAT) {
        return Some(date);
    }
    if let Ok(date_time) = DateTime::parse_from_rfc3339(input) {
        return Some(date_time.naive_local().date());
    }
    ISO_DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
        .map(|date_time| date_time.date())
}

fn parse_generic(input: &str) -> Option<NaiveDate> {
    if let Ok(date_time) = DateTime::parse_from_rfc2822(input) {
        return Some(date_time.naive_local().date());
    }
    GENERIC_DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(input, format).ok())
}

fn parse_component<T: FromStr>(part: &str) -> Option<T> {
    let part = part.trim();
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::{NormalizedDate, normalize_result_date};

    fn ymd(year: i32, month: u32, day: u32) -> NormalizedDate {
        NormalizedDate::from_ymd(year, month, day).expect("valid date")
    }

    #[test]
    fn slash_dates_are_day_first() {
        assert_eq!(normalize_result_date("10/05/2024"), Some(ymd(2024, 5, 10)));
        assert_eq!(normalize_result_date("1/2/2024"), Some(ymd(2024, 2, 1)));
    }

    #[test]
    fn dash_dates_switch_on_first_component_width() {
        assert_eq!(normalize_result_date("2024-05-09"), Some(ymd(2024, 5, 9)));
        assert_eq!(normalize_result_date("11-05-2024"), Some(ymd(2024, 5, 11)));
    }

    #[test]
    fn iso_date_times_keep_written_calendar_date() {
        assert_eq!(
            normalize_result_date("2024-05-09T23:30:00+02:00"),
            Some(ymd(2024, 5, 9))
        );
        assert_eq!(
            normalize_result_date("2024-05-09T08:15:00"),
            Some(ymd(2024, 5, 9))
        );
    }

    #[test]
    fn generic_formats_are_recognized() {
        assert_eq!(normalize_result_date("2024.05.10"), Some(ymd(2024, 5, 10)));
        assert_eq!(normalize_result_date("May 10, 2024"), Some(ymd(2024, 5, 10)));
        assert_eq!(normalize_result_date("10 May 2024"), Some(ymd(2024, 5, 10)));
        assert_eq!(normalize_result_date("10.05.2024"), Some(ymd(2024, 5, 10)));
        assert_eq!(normalize_result_date("Sep 3, 2024"), Some(ymd(2024, 9, 3)));
        assert_eq!(normalize_result_date("3 Sep 2024"), Some(ymd(2024, 9, 3)));
        assert_eq!(normalize_result_date("September 3, 2024"), Some(ymd(2024, 9, 3)));
        assert_eq!(normalize_result_date("3 September 2024"), Some(ymd(2024, 9, 3)));
        assert_eq!(
            normalize_result_date("Mon, 13 May 2024 10:00:00 -0500"),
            Some(ymd(2024, 5, 13))
        );
    }

    #[test]
    fn years_beyond_four_digits_are_rejected() {
        assert_eq!(normalize_result_date("01/01/12345"), None);
        assert_eq!(normalize_result_date("01-01-12345"), None);
        assert_eq!(normalize_result_date("31/12/9999"), Some(ymd(9999, 12, 31)));
        assert_eq!(NormalizedDate::from_ymd(10_000, 1, 1), None);
        assert!("+12345-01-01".parse::<NormalizedDate>().is_err());
    }

    #[test]
    fn two_digit_years_are_taken_literally() {
        let date = normalize_result_date("1/1/24").expect("literal year");
        assert_eq!(date, ymd(24, 1, 1));
        assert_eq!(date.canonical_key(), "0024-01-01");
    }

    #[test]
    fn invalid_inputs_are_rejected() {
        for input in ["", "   ", "not-a-date", "31/02/2024", "10/05", "aa/bb/cccc", "+1/05/2024"] {
            assert_eq!(normalize_result_date(input), None, "input `{input}`");
        }
    }

    #[test]
    fn canonical_and_display_forms_are_zero_padded() {
        let date = ymd(2024, 1, 5);
        assert_eq!(date.canonical_key(), "2024-01-05");
        assert_eq!(date.display_label(), "05/01/2024");
        assert_eq!(date.to_string(), "2024-01-05");
        assert_eq!("2024-01-05".parse::<NormalizedDate>().expect("canonical"), date);
    }
}
