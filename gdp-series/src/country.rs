use csv::ReaderBuilder;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::{error::Result, forecast::AnnualPanel, panel::Panel};

/// Embedded CSV data for the default country list and its column codes.
pub static CSV_OBJECT: &str = include_str!("../../fixtures/countries.csv");

/// A country and the code its data columns are labelled with (the national
/// currency code, e.g. "JPY" for Japan).
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct Country {
    pub name: String,
    pub code: String,
}

/// The set of countries to process, in output order.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct CountryConfig {
    pub countries: Vec<Country>,
}

impl Default for CountryConfig {
    fn default() -> Self {
        CountryConfig::from_csv_str(CSV_OBJECT).unwrap_or(CountryConfig {
            countries: Vec::new(),
        })
    }
}

impl CountryConfig {
    /// Parse a `name,code` CSV with headers.
    pub fn from_csv_str(csv_object: &str) -> Result<CountryConfig> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(csv_object.as_bytes());
        let countries = rdr
            .deserialize::<Country>()
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(CountryConfig { countries })
    }

    pub fn code_for(&self, name: &str) -> Option<&str> {
        self.countries
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
            .map(|c| c.code.as_str())
    }

    pub fn name_for(&self, code: &str) -> Option<&str> {
        self.countries
            .iter()
            .find(|c| c.code == code)
            .map(|c| c.name.as_str())
    }

    /// Restrict to the named countries (matched by name or code). Unknown
    /// entries are logged and ignored.
    pub fn only<S: AsRef<str>>(&self, wanted: &[S]) -> CountryConfig {
        let countries = wanted
            .iter()
            .filter_map(|w| {
                let w = w.as_ref();
                let found = self
                    .countries
                    .iter()
                    .find(|c| c.name.eq_ignore_ascii_case(w) || c.code == w)
                    .cloned();
                if found.is_none() {
                    warn!("Country {} is not configured, skipping", w);
                }
                found
            })
            .collect();
        CountryConfig { countries }
    }

    pub fn codes(&self) -> Vec<&str> {
        self.countries.iter().map(|c| c.code.as_str()).collect()
    }

    /// Keep the configured columns of a quarterly panel, in configuration order.
    pub fn select(&self, panel: &Panel) -> Panel {
        for code in self.codes() {
            if panel.series(code).is_none() {
                warn!("No published data for {}, skipping", code);
            }
        }
        panel.select(&self.codes())
    }

    /// Keep the configured columns of an annual forecast panel.
    pub fn select_annual(&self, panel: &AnnualPanel) -> AnnualPanel {
        let series = self
            .codes()
            .into_iter()
            .filter_map(|code| {
                let found = panel.get(code).cloned();
                if found.is_none() {
                    warn!("No forecasts for {}, skipping", code);
                }
                found
            })
            .collect();
        AnnualPanel::from_series(series)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{forecast::AnnualSeries, quarter::Quarter, series::QuarterlySeries};

    #[test]
    fn test_default_countries() {
        let config = CountryConfig::default();
        assert_eq!(config.countries.len(), 6);
        assert_eq!(config.code_for("Japan"), Some("JPY"));
        assert_eq!(config.code_for("united kingdom"), Some("GBP"));
        assert_eq!(config.name_for("DEM"), Some("Germany"));
        assert_eq!(config.code_for("Spain"), None);
    }

    #[test]
    fn test_only_keeps_requested_order() {
        let config = CountryConfig::default().only(&["USD", "France", "Atlantis"]);
        assert_eq!(config.codes(), vec!["USD", "FRF"]);
    }

    #[test]
    fn test_select_panels() {
        let config = CountryConfig::from_csv_str("name,code\nJapan,JPY\nFrance,FRF\n").unwrap();
        let start = Quarter::new(2019, 1).unwrap();
        let panel = Panel::from_series(vec![
            QuarterlySeries::from_values("FRF", start, &[Some(1.0)]).unwrap(),
            QuarterlySeries::from_values("USD", start, &[Some(2.0)]).unwrap(),
            QuarterlySeries::from_values("JPY", start, &[Some(3.0)]).unwrap(),
        ]);
        let selected = config.select(&panel);
        assert_eq!(selected.names().collect::<Vec<_>>(), vec!["JPY", "FRF"]);

        let forecasts = AnnualPanel::from_series(vec![
            AnnualSeries::from_pairs("FRF", &[(2019, 0.01)]).unwrap(),
            AnnualSeries::from_pairs("DEM", &[(2019, 0.01)]).unwrap(),
        ]);
        let selected = config.select_annual(&forecasts);
        assert_eq!(selected.names().collect::<Vec<_>>(), vec!["FRF"]);
    }
}
