//! Running the imputer over every country of a panel.

use gdp_series::{AnnualPanel, Panel};
use log::{error, info, warn};
use std::collections::BTreeMap;

use crate::{
    diagnostics::AmbiguousRoot,
    error::{ImputeError, InputError, Result},
    extend::extend_panel,
    imputer::{ImputeSettings, Imputer, YearFill},
};

/// Outcome of imputing a whole panel. Countries fail independently.
#[derive(Debug, Default)]
pub struct PanelImputation {
    /// Completed series for every country that succeeded, on the shared index.
    pub panel: Panel,
    pub fills: BTreeMap<String, Vec<YearFill>>,
    pub failures: BTreeMap<String, ImputeError>,
    pub warnings: Vec<AmbiguousRoot>,
}

impl PanelImputation {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty() && self.warnings.is_empty()
    }
}

/// Extend `published` onto a shared horizon and impute each country from its
/// forecast column. Only a failure to build the shared index fails the call.
pub fn impute_panel(
    published: &Panel,
    forecasts: &AnnualPanel,
    settings: &ImputeSettings,
) -> Result<PanelImputation> {
    let extended = extend_panel(published, forecasts)?;
    info!(
        "Imputing {} series over {} quarters",
        extended.len(),
        extended.index().len()
    );

    let mut completed = Vec::new();
    let mut outcome = PanelImputation::default();
    for series in extended.iter_series() {
        let name = series.name().to_string();
        let mut warnings: Vec<AmbiguousRoot> = Vec::new();
        let result = match forecasts.get(&name) {
            Some(country_forecasts) => Imputer::with_settings(country_forecasts, *settings)
                .run(series.clone(), &mut warnings),
            None => Err(InputError::MissingForecastSeries {
                series: name.clone(),
            }
            .into()),
        };
        for warning in &warnings {
            warn!("{}", warning);
        }
        outcome.warnings.extend(warnings);
        match result {
            Ok(imputed) => {
                info!("Imputed {} years for {}", imputed.fills.len(), name);
                completed.push(imputed.series);
                outcome.fills.insert(name, imputed.fills);
            }
            Err(err) => {
                error!("Imputation failed for {}: {}", name, err);
                outcome.failures.insert(name, err);
            }
        }
    }

    outcome.panel = Panel::from_series(completed).reindex(extended.index().to_vec());
    Ok(outcome)
}
