use chrono::{Datelike, NaiveDate};
use gdp_utils::dates::{first_month_of_quarter, parse_any_date, quarter_of_month};
use serde::{Deserialize, Serialize};
use std::{fmt, mem::replace, str::FromStr};

use crate::error::SeriesError;

/// A calendar quarter. Ordered by year, then quarter. The quarter number is
/// always within 1..=4, including values built by deserialization.
#[derive(Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Copy, Clone, Serialize, Deserialize)]
#[serde(try_from = "QuarterFields")]
pub struct Quarter {
    year: i32,
    quarter: u8,
}

#[derive(Deserialize)]
struct QuarterFields {
    year: i32,
    quarter: u8,
}

impl TryFrom<QuarterFields> for Quarter {
    type Error = SeriesError;

    fn try_from(fields: QuarterFields) -> Result<Self, Self::Error> {
        Quarter::new(fields.year, fields.quarter)
    }
}

impl Quarter {
    pub fn new(year: i32, quarter: u8) -> Result<Quarter, SeriesError> {
        if (1..=4).contains(&quarter) {
            Ok(Quarter { year, quarter })
        } else {
            Err(SeriesError::InvalidQuarter(quarter))
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Quarter number, 1 through 4.
    pub fn quarter(&self) -> u8 {
        self.quarter
    }

    /// The quarter containing `date`. Any day of the quarter maps to the same value,
    /// so stamps on the first day of the quarter and on the first day of its last
    /// month are interchangeable.
    pub fn from_date(date: NaiveDate) -> Quarter {
        Quarter {
            year: date.year(),
            quarter: quarter_of_month(date.month()),
        }
    }

    pub fn first_of_year(year: i32) -> Quarter {
        Quarter { year, quarter: 1 }
    }

    pub fn last_of_year(year: i32) -> Quarter {
        Quarter { year, quarter: 4 }
    }

    /// Canonical timestamp: the first day of the quarter.
    pub fn start_date(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, first_month_of_quarter(self.quarter), 1)
            .unwrap_or(NaiveDate::MIN)
    }

    pub fn is_last_of_year(&self) -> bool {
        self.quarter == 4
    }

    pub fn succ(&self) -> Quarter {
        self.add_quarters(1)
    }

    pub fn pred(&self) -> Quarter {
        self.add_quarters(-1)
    }

    /// Shift by `n` quarters (negative moves backwards).
    pub fn add_quarters(&self, n: i64) -> Quarter {
        let ordinal = self.ordinal() + n;
        Quarter {
            year: ordinal.div_euclid(4) as i32,
            quarter: (ordinal.rem_euclid(4) + 1) as u8,
        }
    }

    /// Number of quarters from `self` to `other` (negative if `other` is earlier).
    pub fn quarters_until(&self, other: &Quarter) -> i64 {
        other.ordinal() - self.ordinal()
    }

    fn ordinal(&self) -> i64 {
        self.year as i64 * 4 + (self.quarter as i64 - 1)
    }
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}Q{}", self.year, self.quarter)
    }
}

impl From<NaiveDate> for Quarter {
    fn from(date: NaiveDate) -> Self {
        Quarter::from_date(date)
    }
}

impl FromStr for Quarter {
    type Err = SeriesError;

    /// Accepts `2019Q1`, `2019-Q1` (case-insensitive) or a date inside the quarter.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let upper = trimmed.to_ascii_uppercase();
        if let Some((year, quarter)) = upper.split_once('Q') {
            let year = year.trim_end_matches('-');
            return match (year.parse::<i32>(), quarter.parse::<u8>()) {
                (Ok(year), Ok(quarter)) => Quarter::new(year, quarter),
                _ => Err(SeriesError::InvalidDate(trimmed.to_string())),
            };
        }
        parse_any_date(trimmed)
            .map(Quarter::from_date)
            .map_err(|_| SeriesError::InvalidDate(trimmed.to_string()))
    }
}

/// A quarter range iterator that yields each quarter from the start quarter
/// through the end quarter (inclusive).
#[derive(Clone, Eq, PartialEq, Copy, Debug)]
pub struct QuarterRange(pub Quarter, pub Quarter);

impl Iterator for QuarterRange {
    type Item = Quarter;
    fn next(&mut self) -> Option<Self::Item> {
        if self.0 <= self.1 {
            let next = self.0.succ();
            Some(replace(&mut self.0, next))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Quarter, QuarterRange};
    use chrono::NaiveDate;

    #[test]
    fn test_from_date_normalizes_within_quarter() {
        let first_day = NaiveDate::from_ymd_opt(2019, 10, 1).unwrap();
        let last_month = NaiveDate::from_ymd_opt(2019, 12, 1).unwrap();
        assert_eq!(Quarter::from_date(first_day), Quarter::from_date(last_month));
        assert_eq!(Quarter::from_date(last_month), Quarter::last_of_year(2019));
        assert_eq!(Quarter::last_of_year(2019).start_date(), first_day);
    }

    #[test]
    fn test_succ_and_pred_cross_years() {
        let q4 = Quarter::last_of_year(2018);
        assert_eq!(q4.succ(), Quarter::first_of_year(2019));
        assert_eq!(Quarter::first_of_year(2019).pred(), q4);
        assert_eq!(q4.add_quarters(6), Quarter::new(2020, 2).unwrap());
        assert_eq!(q4.add_quarters(-4), Quarter::last_of_year(2017));
        assert_eq!(q4.quarters_until(&Quarter::new(2020, 2).unwrap()), 6);
    }

    #[test]
    fn test_parse_labels() {
        let expected = Quarter::new(2019, 2).unwrap();
        assert_eq!("2019Q2".parse::<Quarter>().unwrap(), expected);
        assert_eq!("2019-q2".parse::<Quarter>().unwrap(), expected);
        assert_eq!("2019-06-01".parse::<Quarter>().unwrap(), expected);
        assert_eq!("20190401".parse::<Quarter>().unwrap(), expected);
        assert!("2019Q5".parse::<Quarter>().is_err());
        assert!("mid 2019".parse::<Quarter>().is_err());
        assert_eq!(expected.to_string(), "2019Q2");
    }

    #[test]
    fn test_quarter_range_iteration() {
        let start = Quarter::new(2018, 3).unwrap();
        let end = Quarter::new(2019, 2).unwrap();
        let quarters: Vec<Quarter> = QuarterRange(start, end).collect();
        assert_eq!(quarters.len(), 4);
        assert_eq!(quarters[0], start);
        assert_eq!(quarters[2], Quarter::first_of_year(2019));
        assert_eq!(quarters[3], end);
    }

    #[test]
    fn test_deserialize_validates_quarter_number() {
        let quarter: Quarter = serde_json::from_str(r#"{"year":2019,"quarter":3}"#).unwrap();
        assert_eq!(quarter, Quarter::new(2019, 3).unwrap());
        assert_eq!(quarter.year(), 2019);
        assert_eq!(quarter.quarter(), 3);
        assert_eq!(
            serde_json::to_string(&quarter).unwrap(),
            r#"{"year":2019,"quarter":3}"#
        );
        assert!(serde_json::from_str::<Quarter>(r#"{"year":2019,"quarter":0}"#).is_err());
        assert!(serde_json::from_str::<Quarter>(r#"{"year":2019,"quarter":5}"#).is_err());
    }

    #[test]
    fn test_quarter_range_empty() {
        let start = Quarter::new(2019, 2).unwrap();
        let range = QuarterRange(start, start.pred());
        assert_eq!(range.count(), 0);
    }
}
