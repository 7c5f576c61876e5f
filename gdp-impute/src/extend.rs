//! Padding published series with unobserved quarters through the forecast horizon.

use gdp_series::{AnnualPanel, AnnualSeries, Panel, Quarter, QuarterRange, QuarterlySeries};
use log::debug;

use crate::error::{InputError, Result};

/// Extend `published` with null quarters from just after its last known value
/// through Q4 of the last forecast year. The result has a contiguous index.
pub fn extend(published: &QuarterlySeries, forecasts: &AnnualSeries) -> Result<QuarterlySeries> {
    let name = published.name();
    let empty = || InputError::EmptySeries {
        series: name.to_string(),
    };
    let last_known = published.last_known().ok_or_else(empty)?;
    let first = published.first_quarter().ok_or_else(empty)?;
    let last = published.last_quarter().ok_or_else(empty)?;
    let end_year = forecasts
        .last_year()
        .ok_or_else(|| InputError::NoForecasts {
            series: name.to_string(),
        })?;
    let start = last_known.quarter.succ();
    let end = Quarter::last_of_year(end_year);
    if end < start {
        return Err(InputError::HorizonBeforeStart {
            series: name.to_string(),
            start,
            end,
        }
        .into());
    }
    let index = extended_index(first, last, end);
    debug!(
        "Extended {} from {} to {} ({} quarters)",
        name,
        last_known.quarter,
        index.last().copied().unwrap_or(last),
        index.len()
    );
    Ok(published.reindex(&index))
}

/// Extend every column of a panel onto one shared index running through Q4 of
/// the latest year any forecast column covers, or through the last published
/// row if that is later. A column already observed past the horizon is left
/// as is; columns whose forecasts stop short fail later, one by one, when the
/// imputer asks for a missing year.
pub fn extend_panel(published: &Panel, forecasts: &AnnualPanel) -> Result<Panel> {
    let empty = || InputError::EmptySeries {
        series: "panel".to_string(),
    };
    published.last_known_quarter().ok_or_else(empty)?;
    let first = *published.index().first().ok_or_else(empty)?;
    let last = *published.index().last().ok_or_else(empty)?;
    let end_year = forecasts
        .last_year()
        .ok_or_else(|| InputError::NoForecasts {
            series: "panel".to_string(),
        })?;
    let index = extended_index(first, last, Quarter::last_of_year(end_year));
    debug!(
        "Extended panel of {} series to {} quarters",
        published.len(),
        index.len()
    );
    Ok(published.reindex(index))
}

fn extended_index(first: Quarter, last: Quarter, end: Quarter) -> Vec<Quarter> {
    QuarterRange(first, end.max(last)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(year: i32, quarter: u8) -> Quarter {
        Quarter::new(year, quarter).unwrap()
    }

    #[test]
    fn test_extend_appends_nulls_through_last_forecast_year() {
        let published = QuarterlySeries::from_values(
            "USD",
            q(2018, 1),
            &[Some(1.0), Some(2.0), Some(3.0), Some(4.0), Some(5.0), Some(6.0)],
        )
        .unwrap();
        let forecasts = AnnualSeries::from_pairs("USD", &[(2019, 0.02), (2020, 0.015)]).unwrap();
        let extended = extend(&published, &forecasts).unwrap();
        assert_eq!(extended.len(), 12);
        assert_eq!(extended.last_quarter(), Some(q(2020, 4)));
        assert!(extended.is_contiguous());
        assert!(extended.points()[6..].iter().all(|p| p.value.is_none()));
        assert_eq!(extended.value_at(q(2019, 2)), Some(6.0));
    }

    #[test]
    fn test_extend_keeps_trailing_nulls_and_fills_index_gaps() {
        let published = QuarterlySeries::new(
            "GBP",
            vec![
                gdp_series::QuarterPoint::known(q(2018, 4), 1.0),
                gdp_series::QuarterPoint::known(q(2019, 2), 2.0),
                gdp_series::QuarterPoint::missing(q(2019, 3)),
            ],
        )
        .unwrap();
        let forecasts = AnnualSeries::from_pairs("GBP", &[(2019, 0.01)]).unwrap();
        let extended = extend(&published, &forecasts).unwrap();
        assert_eq!(
            extended.values(),
            vec![Some(1.0), None, Some(2.0), None, None]
        );
    }

    #[test]
    fn test_extend_rejects_empty_inputs() {
        let empty = QuarterlySeries::from_values("JPY", q(2019, 1), &[None, None]).unwrap();
        let forecasts = AnnualSeries::from_pairs("JPY", &[(2019, 0.01)]).unwrap();
        assert!(matches!(
            extend(&empty, &forecasts),
            Err(crate::ImputeError::Input(InputError::EmptySeries { .. }))
        ));

        let published = QuarterlySeries::from_values("JPY", q(2019, 1), &[Some(1.0)]).unwrap();
        let no_forecasts = AnnualSeries::from_pairs("JPY", &[]).unwrap();
        assert!(matches!(
            extend(&published, &no_forecasts),
            Err(crate::ImputeError::Input(InputError::NoForecasts { .. }))
        ));
    }

    #[test]
    fn test_extend_rejects_horizon_before_start() {
        let published =
            QuarterlySeries::from_values("DEM", q(2019, 4), &[Some(1.0)]).unwrap();
        let forecasts = AnnualSeries::from_pairs("DEM", &[(2019, 0.01)]).unwrap();
        assert!(matches!(
            extend(&published, &forecasts),
            Err(crate::ImputeError::Input(InputError::HorizonBeforeStart { .. }))
        ));
    }

    #[test]
    fn test_extend_panel_uses_latest_observation_across_columns() {
        let frf =
            QuarterlySeries::from_values("FRF", q(2018, 3), &[Some(1.0), Some(1.0), Some(1.0)])
                .unwrap();
        let itl = QuarterlySeries::from_values("ITL", q(2018, 3), &[Some(2.0), Some(2.0)]).unwrap();
        let panel = Panel::from_series(vec![frf, itl]);
        let forecasts = AnnualPanel::from_series(vec![
            AnnualSeries::from_pairs("FRF", &[(2019, 0.01)]).unwrap(),
            AnnualSeries::from_pairs("ITL", &[(2019, 0.01), (2020, 0.01)]).unwrap(),
        ]);
        let extended = extend_panel(&panel, &forecasts).unwrap();
        assert_eq!(extended.index().first(), Some(&q(2018, 3)));
        assert_eq!(extended.index().last(), Some(&q(2020, 4)));
        assert_eq!(extended.index().len(), 10);
        let itl = extended.series("ITL").unwrap();
        assert_eq!(itl.value_at(q(2019, 1)), None);
        assert_eq!(itl.len(), 10);
    }

    #[test]
    fn test_extend_panel_keeps_columns_observed_past_the_horizon() {
        let frf = QuarterlySeries::from_values("FRF", q(2018, 1), &[Some(1.0); 8]).unwrap();
        let itl = QuarterlySeries::from_values("ITL", q(2018, 1), &[Some(2.0); 6]).unwrap();
        let panel = Panel::from_series(vec![frf, itl]);
        let forecasts = AnnualPanel::from_series(vec![
            AnnualSeries::from_pairs("FRF", &[(2019, 0.01)]).unwrap(),
            AnnualSeries::from_pairs("ITL", &[(2019, 0.01)]).unwrap(),
        ]);
        let extended = extend_panel(&panel, &forecasts).unwrap();
        assert_eq!(extended.index().len(), 8);
        assert_eq!(extended.index().last(), Some(&q(2019, 4)));
        assert!(extended.series("FRF").unwrap().is_complete());
        assert_eq!(extended.series("ITL").unwrap().value_at(q(2019, 3)), None);
    }
}
