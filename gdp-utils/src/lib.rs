//! Shared utility functions for the GDP imputation crates.

/// Date utility functions
pub mod dates {
    use chrono::NaiveDate;

    /// Format a NaiveDate as "YYYY-MM-DD"
    pub fn format_date(date: &NaiveDate) -> String {
        date.format("%Y-%m-%d").to_string()
    }

    /// Parse a date string in "YYYY-MM-DD" format
    pub fn parse_date(s: &str) -> anyhow::Result<NaiveDate> {
        Ok(NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")?)
    }

    /// Parse a date string in "YYYYMMDD" format (compact format)
    pub fn parse_date_compact(s: &str) -> anyhow::Result<NaiveDate> {
        Ok(NaiveDate::parse_from_str(s.trim(), "%Y%m%d")?)
    }

    /// Parse either of the supported date layouts.
    pub fn parse_any_date(s: &str) -> anyhow::Result<NaiveDate> {
        parse_date(s).or_else(|_| parse_date_compact(s))
    }

    /// Calendar quarter (1-4) of a date.
    pub fn quarter_of_month(month: u32) -> u8 {
        ((month - 1) / 3 + 1) as u8
    }

    /// First month (1, 4, 7 or 10) of a calendar quarter.
    pub fn first_month_of_quarter(quarter: u8) -> u32 {
        (quarter as u32 - 1) * 3 + 1
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use chrono::NaiveDate;

        #[test]
        fn test_quarter_of_month() {
            assert_eq!(quarter_of_month(1), 1);
            assert_eq!(quarter_of_month(3), 1);
            assert_eq!(quarter_of_month(4), 2);
            assert_eq!(quarter_of_month(9), 3);
            assert_eq!(quarter_of_month(12), 4);
        }

        #[test]
        fn test_first_month_of_quarter() {
            assert_eq!(first_month_of_quarter(1), 1);
            assert_eq!(first_month_of_quarter(2), 4);
            assert_eq!(first_month_of_quarter(3), 7);
            assert_eq!(first_month_of_quarter(4), 10);
        }

        #[test]
        fn test_format_and_parse() {
            let date = NaiveDate::from_ymd_opt(2019, 6, 1).unwrap();
            let formatted = format_date(&date);
            assert_eq!(formatted, "2019-06-01");
            let parsed = parse_date(&formatted).unwrap();
            assert_eq!(parsed, date);
            assert_eq!(parse_any_date("20190601").unwrap(), date);
            assert!(parse_any_date("June 2019").is_err());
        }
    }
}

/// Floating point helpers
pub mod numeric {
    /// Arithmetic mean, `None` for an empty input.
    pub fn mean<I>(values: I) -> Option<f64>
    where
        I: IntoIterator<Item = f64>,
    {
        let (sum, count) = values
            .into_iter()
            .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
        if count == 0 {
            None
        } else {
            Some(sum / count as f64)
        }
    }

    /// Compare two floats with a tolerance relative to their magnitude.
    pub fn relative_eq(a: f64, b: f64, tolerance: f64) -> bool {
        if a == b {
            return true;
        }
        let scale = a.abs().max(b.abs()).max(1.0);
        (a - b).abs() <= tolerance * scale
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_mean() {
            assert_eq!(mean(vec![96.0, 97.0, 99.0, 100.0]), Some(98.0));
            assert_eq!(mean(Vec::<f64>::new()), None);
        }

        #[test]
        fn test_relative_eq() {
            assert!(relative_eq(102.9, 102.9 + 1e-12, 1e-9));
            assert!(!relative_eq(102.9, 103.0, 1e-9));
            assert!(relative_eq(0.0, 1e-12, 1e-9));
        }
    }
}
