use chrono::{NaiveDate, NaiveDateTime, TimeDelta, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const CANONICAL_FORMAT: &str = "%Y-%m-%d %H.%M.%S";

const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CaptureMoment(NaiveDateTime);

impl CaptureMoment {
    pub fn new(value: NaiveDateTime) -> Self {
        Self(value.with_nanosecond(0).unwrap_or(value))
    }

    pub fn as_naive(&self) -> NaiveDateTime {
        self.0
    }

    pub fn canonical_stem(&self) -> String {
        self.0.format(CANONICAL_FORMAT).to_string()
    }

    pub fn next_second(&self) -> Option<Self> {
        self.0.checked_add_signed(TimeDelta::seconds(1)).map(Self)
    }

    pub fn parse(input: &str) -> Option<Self> {
        let normalized = input.trim();

        for fmt in [CANONICAL_FORMAT, DISPLAY_FORMAT, "%Y-%m-%dT%H:%M:%S"] {
            if let Ok(naive) = NaiveDateTime::parse_from_str(normalized, fmt) {
                return Some(Self::new(naive));
            }
        }

        NaiveDate::parse_from_str(normalized, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(Self::new)
    }
}

impl From<NaiveDateTime> for CaptureMoment {
    fn from(value: NaiveDateTime) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for CaptureMoment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DISPLAY_FORMAT))
    }
}

#[cfg(test)]
pub(crate) fn moment(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> CaptureMoment {
    let naive = NaiveDate::from_ymd_opt(y, mo, d)
        .and_then(|date| date.and_hms_opt(h, mi, s))
        .expect("valid test moment");
    CaptureMoment::new(naive)
}

#[cfg(test)]
mod tests {
    use super::{moment, CaptureMoment};
    use chrono::NaiveDate;

    #[test]
    fn canonical_stem_uses_dotted_clock() {
        let m = moment(2021, 5, 1, 10, 0, 0);
        assert_eq!(m.canonical_stem(), "2021-05-01 10.00.00");
        assert_eq!(m.to_string(), "2021-05-01 10:00:00");
    }

    #[test]
    fn next_second_rolls_over_day_boundary() {
        let m = moment(2021, 12, 31, 23, 59, 59);
        assert_eq!(
            m.next_second().map(|v| v.canonical_stem()),
            Some("2022-01-01 00.00.00".to_string())
        );
    }

    #[test]
    fn new_truncates_subseconds() {
        let naive = NaiveDate::from_ymd_opt(2021, 5, 1)
            .and_then(|d| d.and_hms_milli_opt(10, 0, 0, 750))
            .expect("valid");
        assert_eq!(CaptureMoment::new(naive), moment(2021, 5, 1, 10, 0, 0));
    }

    #[test]
    fn parse_accepts_canonical_and_fallback_formats() {
        assert_eq!(
            CaptureMoment::parse("2015-01-02 03.04.05"),
            Some(moment(2015, 1, 2, 3, 4, 5))
        );
        assert_eq!(
            CaptureMoment::parse(" 2015-01-02 03:04:05 "),
            Some(moment(2015, 1, 2, 3, 4, 5))
        );
        assert_eq!(
            CaptureMoment::parse("2015-01-02"),
            Some(moment(2015, 1, 2, 0, 0, 0))
        );
    }

    #[test]
    fn parse_rejects_garbage() {
        assert_eq!(CaptureMoment::parse("yesterday"), None);
        assert_eq!(CaptureMoment::parse("2015-13-01 00.00.00"), None);
        assert_eq!(CaptureMoment::parse(""), None);
    }
}
