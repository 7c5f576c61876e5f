//! Core series types for quarterly GDP imputation.
//!
//! Quarterly levels, annual growth forecasts, multi-country panels and the
//! wide CSV layout they are exchanged in.

pub mod country;
pub mod error;
pub mod forecast;
pub mod panel;
pub mod quarter;
pub mod series;

pub use country::{Country, CountryConfig};
pub use error::{Result, SeriesError};
pub use forecast::{AnnualPanel, AnnualRate, AnnualSeries};
pub use panel::Panel;
pub use quarter::{Quarter, QuarterRange};
pub use series::{LastKnown, QuarterPoint, QuarterlySeries, YearWindow};
