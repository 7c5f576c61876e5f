//! Country table loading and listing.

use anyhow::Context;
use gdp_series::CountryConfig;
use log::info;

/// Load the country table from `path`, or the built-in list when `None`.
pub fn load_countries(path: Option<&str>) -> anyhow::Result<CountryConfig> {
    match path {
        Some(path) => {
            let csv_object = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read country table {path}"))?;
            let config = CountryConfig::from_csv_str(&csv_object)
                .with_context(|| format!("Failed to parse country table {path}"))?;
            info!("Loaded {} countries from {}", config.countries.len(), path);
            Ok(config)
        }
        None => Ok(CountryConfig::default()),
    }
}

/// Print the configured countries as `code  name` lines.
pub fn run_countries(path: Option<&str>) -> anyhow::Result<()> {
    let config = load_countries(path)?;
    for country in &config.countries {
        println!("{:<6}{}", country.code, country.name);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_default_countries() {
        let config = load_countries(None).unwrap();
        assert_eq!(config.code_for("France"), Some("FRF"));
    }

    #[test]
    fn test_load_missing_file_is_an_error() {
        assert!(load_countries(Some("/nonexistent/countries.csv")).is_err());
    }
}
