use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{Result, SeriesError};

/// A forecast of annual average year-over-year growth, e.g. 0.02 for +2%.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnnualRate {
    pub year: i32,
    pub rate: f64,
}

/// Ordered annual growth forecasts for one country. Read-only once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnualSeries {
    name: String,
    points: Vec<AnnualRate>,
}

impl AnnualSeries {
    /// Build a forecast series ordered by year. The sort is stable, so when a
    /// year is listed twice the first entry keeps precedence.
    pub fn new(name: impl Into<String>, mut points: Vec<AnnualRate>) -> Result<AnnualSeries> {
        let name = name.into();
        if points.iter().any(|p| !p.rate.is_finite()) {
            return Err(SeriesError::NonFiniteValue { series: name });
        }
        points.sort_by_key(|p| p.year);
        Ok(AnnualSeries { name, points })
    }

    pub fn from_pairs(name: impl Into<String>, pairs: &[(i32, f64)]) -> Result<AnnualSeries> {
        let points = pairs
            .iter()
            .map(|&(year, rate)| AnnualRate { year, rate })
            .collect();
        AnnualSeries::new(name, points)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn points(&self) -> &[AnnualRate] {
        &self.points
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Growth rate of the first entry dated in `year`.
    pub fn rate_for(&self, year: i32) -> Option<f64> {
        self.points.iter().find(|p| p.year == year).map(|p| p.rate)
    }

    pub fn last_year(&self) -> Option<i32> {
        self.points.last().map(|p| p.year)
    }
}

/// Annual forecasts for several countries, keyed by column code.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnnualPanel {
    columns: BTreeMap<String, AnnualSeries>,
}

impl AnnualPanel {
    pub fn new() -> AnnualPanel {
        AnnualPanel::default()
    }

    pub fn from_series(series: Vec<AnnualSeries>) -> AnnualPanel {
        let mut panel = AnnualPanel::new();
        for s in series {
            panel.insert(s);
        }
        panel
    }

    pub fn insert(&mut self, series: AnnualSeries) {
        self.columns.insert(series.name().to_string(), series);
    }

    pub fn get(&self, name: &str) -> Option<&AnnualSeries> {
        self.columns.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &AnnualSeries> {
        self.columns.values()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Latest forecast year across all columns.
    pub fn last_year(&self) -> Option<i32> {
        self.columns.values().filter_map(AnnualSeries::last_year).max()
    }
}
