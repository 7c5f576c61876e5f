use gdp_utils::numeric::mean;
use serde::{Deserialize, Serialize};

use crate::{
    error::{Result, SeriesError},
    quarter::Quarter,
};

/// One quarter of a series; `None` marks an unobserved value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuarterPoint {
    pub quarter: Quarter,
    pub value: Option<f64>,
}

impl QuarterPoint {
    pub fn known(quarter: Quarter, value: f64) -> QuarterPoint {
        QuarterPoint {
            quarter,
            value: Some(value),
        }
    }

    pub fn missing(quarter: Quarter) -> QuarterPoint {
        QuarterPoint {
            quarter,
            value: None,
        }
    }

    pub fn is_known(&self) -> bool {
        self.value.is_some()
    }
}

/// The most recent observed value of a series and where it sits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LastKnown {
    pub position: usize,
    pub quarter: Quarter,
    pub value: f64,
}

/// An ordered quarterly series for one country, strictly increasing by quarter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuarterlySeries {
    name: String,
    points: Vec<QuarterPoint>,
}

impl QuarterlySeries {
    /// Build a series, sorting by quarter. Duplicate quarters and non-finite
    /// values are rejected.
    pub fn new(name: impl Into<String>, mut points: Vec<QuarterPoint>) -> Result<QuarterlySeries> {
        let name = name.into();
        points.sort_by_key(|p| p.quarter);
        if let Some(window) = points.windows(2).find(|w| w[0].quarter == w[1].quarter) {
            return Err(SeriesError::DuplicateQuarter {
                series: name,
                quarter: window[0].quarter,
            });
        }
        if points
            .iter()
            .any(|p| p.value.is_some_and(|v| !v.is_finite()))
        {
            return Err(SeriesError::NonFiniteValue { series: name });
        }
        Ok(QuarterlySeries { name, points })
    }

    /// Convenience constructor for consecutive quarters starting at `start`.
    pub fn from_values(
        name: impl Into<String>,
        start: Quarter,
        values: &[Option<f64>],
    ) -> Result<QuarterlySeries> {
        let points = values
            .iter()
            .enumerate()
            .map(|(i, value)| QuarterPoint {
                quarter: start.add_quarters(i as i64),
                value: *value,
            })
            .collect();
        QuarterlySeries::new(name, points)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn points(&self) -> &[QuarterPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first_quarter(&self) -> Option<Quarter> {
        self.points.first().map(|p| p.quarter)
    }

    pub fn last_quarter(&self) -> Option<Quarter> {
        self.points.last().map(|p| p.quarter)
    }

    pub fn value_at(&self, quarter: Quarter) -> Option<f64> {
        self.position_of(quarter)
            .and_then(|position| self.points[position].value)
    }

    pub fn position_of(&self, quarter: Quarter) -> Option<usize> {
        self.points.binary_search_by_key(&quarter, |p| p.quarter).ok()
    }

    /// The last non-null value anywhere in the series.
    pub fn last_known(&self) -> Option<LastKnown> {
        self.points
            .iter()
            .enumerate()
            .rev()
            .find_map(|(position, p)| {
                p.value.map(|value| LastKnown {
                    position,
                    quarter: p.quarter,
                    value,
                })
            })
    }

    /// True when the final position holds a known value.
    pub fn is_complete(&self) -> bool {
        self.points.last().is_some_and(QuarterPoint::is_known)
    }

    /// First unobserved quarter strictly before `position`.
    pub fn first_gap_before(&self, position: usize) -> Option<Quarter> {
        self.points[..position.min(self.points.len())]
            .iter()
            .find(|p| !p.is_known())
            .map(|p| p.quarter)
    }

    /// True when consecutive entries are exactly one quarter apart.
    pub fn is_contiguous(&self) -> bool {
        self.points
            .windows(2)
            .all(|w| w[0].quarter.succ() == w[1].quarter)
    }

    /// All entries falling in calendar `year`.
    pub fn year_window(&self, year: i32) -> YearWindow<'_> {
        let start = self.points.partition_point(|p| p.quarter.year() < year);
        let end = self.points.partition_point(|p| p.quarter.year() <= year);
        YearWindow {
            year,
            start,
            points: &self.points[start..end],
        }
    }

    /// Fill an unobserved position. Known values are never overwritten; returns
    /// whether the value was written.
    pub fn fill(&mut self, position: usize, value: f64) -> bool {
        match self.points.get_mut(position) {
            Some(point) if point.value.is_none() => {
                point.value = Some(value);
                true
            }
            _ => false,
        }
    }

    /// Re-map onto `index` (sorted, unique); quarters absent from the series become null.
    pub fn reindex(&self, index: &[Quarter]) -> QuarterlySeries {
        let points = index
            .iter()
            .map(|&quarter| QuarterPoint {
                quarter,
                value: self.value_at(quarter),
            })
            .collect();
        QuarterlySeries {
            name: self.name.clone(),
            points,
        }
    }

    pub fn values(&self) -> Vec<Option<f64>> {
        self.points.iter().map(|p| p.value).collect()
    }
}

/// A borrowed view of the quarters of one calendar year.
#[derive(Debug, Clone, Copy)]
pub struct YearWindow<'a> {
    pub year: i32,
    start: usize,
    points: &'a [QuarterPoint],
}

impl<'a> YearWindow<'a> {
    pub fn points(&self) -> &'a [QuarterPoint] {
        self.points
    }

    /// Position of the first entry of the window within the parent series.
    pub fn start_position(&self) -> usize {
        self.start
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Holds exactly Q1 through Q4.
    pub fn is_full_year(&self) -> bool {
        self.points.len() == 4
            && self
                .points
                .iter()
                .zip(1u8..=4)
                .all(|(p, q)| p.quarter.quarter() == q)
    }

    /// Sum of known values; nulls count as zero.
    pub fn known_sum(&self) -> f64 {
        self.points.iter().filter_map(|p| p.value).sum()
    }

    /// Mean of known values, `None` when nothing in the year is known.
    pub fn known_mean(&self) -> Option<f64> {
        mean(self.points.iter().filter_map(|p| p.value))
    }

    pub fn missing_count(&self) -> usize {
        self.points.iter().filter(|p| !p.is_known()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(year: i32, quarter: u8) -> Quarter {
        Quarter::new(year, quarter).unwrap()
    }

    fn sample() -> QuarterlySeries {
        QuarterlySeries::from_values(
            "USD",
            q(2018, 1),
            &[
                Some(96.0),
                Some(97.0),
                Some(99.0),
                Some(100.0),
                Some(101.0),
                None,
                None,
                None,
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_new_sorts_and_rejects_duplicates() {
        let points = vec![
            QuarterPoint::known(q(2019, 2), 2.0),
            QuarterPoint::known(q(2019, 1), 1.0),
        ];
        let series = QuarterlySeries::new("FRF", points).unwrap();
        assert_eq!(series.first_quarter(), Some(q(2019, 1)));

        let duplicated = vec![
            QuarterPoint::known(q(2019, 1), 1.0),
            QuarterPoint::missing(q(2019, 1)),
        ];
        assert!(matches!(
            QuarterlySeries::new("FRF", duplicated),
            Err(SeriesError::DuplicateQuarter { .. })
        ));
    }

    #[test]
    fn test_new_rejects_nan() {
        let points = vec![QuarterPoint::known(q(2019, 1), f64::NAN)];
        assert!(matches!(
            QuarterlySeries::new("JPY", points),
            Err(SeriesError::NonFiniteValue { .. })
        ));
    }

    #[test]
    fn test_last_known_and_completeness() {
        let series = sample();
        let last = series.last_known().unwrap();
        assert_eq!(last.position, 4);
        assert_eq!(last.quarter, q(2019, 1));
        assert_eq!(last.value, 101.0);
        assert!(!series.is_complete());
        assert_eq!(series.first_gap_before(last.position), None);
        assert!(series.is_contiguous());
    }

    #[test]
    fn test_year_window() {
        let series = sample();
        let prior = series.year_window(2018);
        assert!(prior.is_full_year());
        assert_eq!(prior.known_mean(), Some(98.0));
        assert_eq!(prior.start_position(), 0);

        let current = series.year_window(2019);
        assert_eq!(current.start_position(), 4);
        assert_eq!(current.known_sum(), 101.0);
        assert_eq!(current.missing_count(), 3);

        let absent = series.year_window(2025);
        assert!(absent.is_empty());
        assert_eq!(absent.known_mean(), None);
    }

    #[test]
    fn test_fill_leaves_known_values() {
        let mut series = sample();
        assert!(!series.fill(4, 0.0));
        assert!(series.fill(5, 102.0));
        assert_eq!(series.value_at(q(2019, 2)), Some(102.0));
        assert_eq!(series.value_at(q(2019, 1)), Some(101.0));
    }

    #[test]
    fn test_reindex_inserts_nulls() {
        let series = QuarterlySeries::new(
            "GBP",
            vec![
                QuarterPoint::known(q(2019, 1), 1.0),
                QuarterPoint::known(q(2019, 3), 3.0),
            ],
        )
        .unwrap();
        assert!(!series.is_contiguous());
        let index: Vec<Quarter> = (1..=4).map(|n| q(2019, n)).collect();
        let reindexed = series.reindex(&index);
        assert_eq!(reindexed.values(), vec![Some(1.0), None, Some(3.0), None]);
        assert!(reindexed.is_contiguous());
    }
}
