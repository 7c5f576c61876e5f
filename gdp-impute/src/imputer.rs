//! Filling an extended quarterly series one calendar year at a time.
//!
//! For the year being filled, the forecast growth applied to the previous
//! year's average gives a target average level. The missing quarters are
//! assumed to compound from the most recent observation `x0` by a common
//! multiplier `y`, so with `n` quarters missing
//!
//! ```text
//! x0 * (y + y^2 + ... + y^n) = 4 * target level - sum of the known quarters
//! ```
//!
//! The polynomial has up to `n` roots; the one inside the plausibility band is
//! used. Years are filled in order until the last quarter of the series is known.

use gdp_series::{AnnualSeries, QuarterlySeries};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    diagnostics::{AmbiguousRoot, DiagnosticsSink, LogSink},
    error::{ArithmeticError, ImputeError, InputError, Result},
    polynomial::{Polynomial, REAL_ROOT_TOLERANCE},
    selection::{select_root, PlausibilityBand},
};

/// Numeric settings for the growth equation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImputeSettings {
    pub band: PlausibilityBand,
    /// Relative bound on the imaginary part of a root accepted as real.
    pub real_root_tolerance: f64,
}

impl Default for ImputeSettings {
    fn default() -> Self {
        ImputeSettings {
            band: PlausibilityBand::default(),
            real_root_tolerance: REAL_ROOT_TOLERANCE,
        }
    }
}

/// What one pass of the imputer did.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearFill {
    pub year: i32,
    /// Previous year's average times one plus the forecast growth.
    pub target_level: f64,
    pub rhs: f64,
    /// Quarter-on-quarter multiplier applied to the missing quarters.
    pub growth: f64,
    pub filled: usize,
    pub ambiguous: bool,
}

/// A completed series and the per-year record of how it was filled.
#[derive(Debug, Clone, PartialEq)]
pub struct Imputed {
    pub series: QuarterlySeries,
    pub fills: Vec<YearFill>,
}

/// Fills one country's series from its annual growth forecasts.
#[derive(Debug, Clone, Copy)]
pub struct Imputer<'a> {
    forecasts: &'a AnnualSeries,
    settings: ImputeSettings,
}

impl<'a> Imputer<'a> {
    pub fn new(forecasts: &'a AnnualSeries) -> Imputer<'a> {
        Imputer::with_settings(forecasts, ImputeSettings::default())
    }

    pub fn with_settings(forecasts: &'a AnnualSeries, settings: ImputeSettings) -> Imputer<'a> {
        Imputer {
            forecasts,
            settings,
        }
    }

    /// Fill years in order until the last position of `series` is known.
    /// A series that is already complete is returned unchanged.
    pub fn impute(
        &self,
        series: QuarterlySeries,
        sink: &mut dyn DiagnosticsSink,
    ) -> Result<QuarterlySeries> {
        self.run(series, sink).map(|imputed| imputed.series)
    }

    /// Like [`Imputer::impute`], also returning the record of each filled year.
    pub fn run(
        &self,
        mut series: QuarterlySeries,
        sink: &mut dyn DiagnosticsSink,
    ) -> Result<Imputed> {
        let mut fills = Vec::new();
        while !series.is_complete() {
            let fill = self.impute_one_year(&mut series, sink)?;
            fills.push(fill);
        }
        Ok(Imputed { series, fills })
    }

    /// Fill the missing quarters of the earliest incomplete year in place.
    pub fn impute_one_year(
        &self,
        series: &mut QuarterlySeries,
        sink: &mut dyn DiagnosticsSink,
    ) -> Result<YearFill> {
        let name = series.name().to_string();
        let anchor = series
            .last_known()
            .ok_or_else(|| InputError::EmptySeries {
                series: name.clone(),
            })?;
        if let Some(quarter) = series.first_gap_before(anchor.position) {
            return Err(InputError::InteriorGap {
                series: name,
                quarter,
            }
            .into());
        }

        // A last observation in Q4 closes its year; otherwise that year is still open.
        let year = if anchor.quarter.is_last_of_year() {
            anchor.quarter.year() + 1
        } else {
            anchor.quarter.year()
        };

        let prior_average = series
            .year_window(year - 1)
            .known_mean()
            .ok_or_else(|| InputError::MissingPriorYear {
                series: name.clone(),
                year: year - 1,
            })?;
        let growth_forecast =
            self.forecasts
                .rate_for(year)
                .ok_or_else(|| InputError::MissingForecast {
                    series: name.clone(),
                    year,
                })?;
        let target_level = prior_average * (1.0 + growth_forecast);

        let window = series.year_window(year);
        if !window.is_full_year() {
            return Err(InputError::IncompleteYear {
                series: name,
                year,
                quarters: window.len(),
            }
            .into());
        }
        let n_missing = window.missing_count();
        if n_missing == 0 {
            return Err(ImputeError::Invariant {
                series: name,
                message: format!("{year} has nothing to fill but the series is incomplete"),
            });
        }
        if anchor.value == 0.0 {
            return Err(ArithmeticError::ZeroAnchor {
                series: name,
                quarter: anchor.quarter,
            }
            .into());
        }
        let rhs = (4.0 * target_level - window.known_sum()) / anchor.value;
        if !rhs.is_finite() {
            return Err(ArithmeticError::NonFinite { series: name, year }.into());
        }

        let real_roots = Polynomial::geometric_power_sum(n_missing, rhs)
            .real_roots(self.settings.real_root_tolerance)
            .map_err(ArithmeticError::from)?;
        let choice = select_root(&real_roots, self.settings.band).ok_or_else(|| {
            ArithmeticError::NoRealRoot {
                series: name.clone(),
                year,
                rhs,
            }
        })?;
        if choice.ambiguous {
            sink.ambiguous_root(AmbiguousRoot {
                series: name.clone(),
                year,
                real_roots: real_roots.clone(),
                candidates: choice.candidates.clone(),
                chosen: choice.growth,
            });
        }

        let mut filled = 0;
        for step in 1..=n_missing {
            let value = anchor.value * choice.growth.powi(step as i32);
            if series.fill(anchor.position + step, value) {
                filled += 1;
            }
        }
        if filled != n_missing {
            return Err(ImputeError::Invariant {
                series: name,
                message: format!("filled {filled} of {n_missing} missing quarters in {year}"),
            });
        }

        debug!(
            "Filled {} quarters of {} in {}: target level {:.4}, rhs {:.6}, growth {:.6}",
            filled, name, year, target_level, rhs, choice.growth
        );
        Ok(YearFill {
            year,
            target_level,
            rhs,
            growth: choice.growth,
            filled,
            ambiguous: choice.ambiguous,
        })
    }
}

/// Impute one country's extended series, reporting ambiguous roots through `log`.
pub fn impute(series: QuarterlySeries, forecasts: &AnnualSeries) -> Result<QuarterlySeries> {
    Imputer::new(forecasts).impute(series, &mut LogSink)
}
