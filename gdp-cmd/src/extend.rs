//! Extend-only command: writes the null-padded panel without imputing.

use gdp_impute::extend_panel;
use log::info;

use crate::impute::{read_inputs, write_panel};

pub fn run_extend(
    published_csv: &str,
    forecasts_csv: &str,
    output_csv: &str,
    countries_csv: Option<&str>,
) -> anyhow::Result<()> {
    let (published, forecasts) = read_inputs(published_csv, forecasts_csv, countries_csv, &[])?;
    let extended = extend_panel(&published, &forecasts)?;
    write_panel(&extended, output_csv)?;
    info!(
        "Extended {} series to {} quarters. Output: {}",
        extended.len(),
        extended.index().len(),
        output_csv
    );
    Ok(())
}
