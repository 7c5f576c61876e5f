//! Full imputation: read the published and forecast panels, extend, impute,
//! and write the completed panel.

use anyhow::Context;
use gdp_impute::{
    impute_panel, AmbiguousRoot, ImputeSettings, PanelImputation, PlausibilityBand, YearFill,
};
use gdp_series::{AnnualPanel, Panel};
use log::{error, info};
use serde::Serialize;
use std::{collections::BTreeMap, fs::File};

use crate::countries::load_countries;

/// Options for the `impute` subcommand.
#[derive(Debug, Clone)]
pub struct ImputeOptions {
    pub published: String,
    pub forecasts: String,
    pub output: String,
    pub countries: Option<String>,
    pub only: Vec<String>,
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub report: Option<String>,
    pub strict: bool,
}

/// JSON summary written by `--report`.
#[derive(Debug, Serialize)]
struct Report<'a> {
    fills: &'a BTreeMap<String, Vec<YearFill>>,
    warnings: &'a [AmbiguousRoot],
    failures: BTreeMap<&'a str, String>,
}

impl<'a> From<&'a PanelImputation> for Report<'a> {
    fn from(outcome: &'a PanelImputation) -> Self {
        Report {
            fills: &outcome.fills,
            warnings: &outcome.warnings,
            failures: outcome
                .failures
                .iter()
                .map(|(name, err)| (name.as_str(), err.to_string()))
                .collect(),
        }
    }
}

/// Run the imputation end to end.
pub fn run_impute(options: &ImputeOptions) -> anyhow::Result<()> {
    if options.lower_bound.is_nan()
        || options.upper_bound.is_nan()
        || options.lower_bound >= options.upper_bound
    {
        anyhow::bail!(
            "Lower bound {} must be below upper bound {}",
            options.lower_bound,
            options.upper_bound
        );
    }
    let settings = ImputeSettings {
        band: PlausibilityBand {
            lower: options.lower_bound,
            upper: options.upper_bound,
        },
        ..ImputeSettings::default()
    };

    let (published, forecasts) = read_inputs(
        &options.published,
        &options.forecasts,
        options.countries.as_deref(),
        &options.only,
    )?;
    let outcome = impute_panel(&published, &forecasts, &settings)?;
    write_panel(&outcome.panel, &options.output)?;

    if let Some(report_path) = &options.report {
        let file = File::create(report_path)
            .with_context(|| format!("Failed to create report {report_path}"))?;
        serde_json::to_writer_pretty(file, &Report::from(&outcome))?;
        info!("Report written to {}", report_path);
    }

    info!(
        "Imputation complete: {} series, {} warnings, {} failures. Output: {}",
        outcome.panel.len(),
        outcome.warnings.len(),
        outcome.failures.len(),
        options.output
    );
    if !outcome.failures.is_empty() {
        for (name, err) in &outcome.failures {
            error!("{}: {}", name, err);
        }
        if options.strict {
            anyhow::bail!("{} countries could not be imputed", outcome.failures.len());
        }
    }
    Ok(())
}

/// Read both input panels and keep the configured countries.
pub(crate) fn read_inputs(
    published_csv: &str,
    forecasts_csv: &str,
    countries_csv: Option<&str>,
    only: &[String],
) -> anyhow::Result<(Panel, AnnualPanel)> {
    let mut config = load_countries(countries_csv)?;
    if !only.is_empty() {
        config = config.only(only);
    }

    let published = File::open(published_csv)
        .with_context(|| format!("Failed to open published data {published_csv}"))?;
    let published = Panel::read_csv(published)
        .with_context(|| format!("Failed to parse published data {published_csv}"))?;
    let forecasts = File::open(forecasts_csv)
        .with_context(|| format!("Failed to open forecasts {forecasts_csv}"))?;
    let forecasts = AnnualPanel::read_csv(forecasts)
        .with_context(|| format!("Failed to parse forecasts {forecasts_csv}"))?;

    let published = config.select(&published);
    let forecasts = config.select_annual(&forecasts);
    if published.is_empty() {
        anyhow::bail!("None of the configured countries appear in {published_csv}");
    }
    info!(
        "Loaded {} published series and {} forecast series",
        published.len(),
        forecasts.len()
    );
    Ok((published, forecasts))
}

pub(crate) fn write_panel(panel: &Panel, output_csv: &str) -> anyhow::Result<()> {
    let file =
        File::create(output_csv).with_context(|| format!("Failed to create {output_csv}"))?;
    panel
        .write_csv(file)
        .with_context(|| format!("Failed to write {output_csv}"))?;
    Ok(())
}
