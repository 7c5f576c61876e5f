/// Error types for extension and imputation
use gdp_series::Quarter;
use thiserror::Error;

/// Failures of the polynomial root finder.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolveError {
    /// A constant polynomial has no roots to find
    #[error("Polynomial has degree zero")]
    Constant,

    /// NaN or infinite coefficient
    #[error("Polynomial has a non-finite coefficient")]
    NonFiniteCoefficient,

    /// Simultaneous iteration did not settle
    #[error("Root finder did not converge after {0} iterations")]
    NoConvergence(usize),
}

/// Problems with the supplied series. Fatal for the affected country only.
#[derive(Error, Debug)]
pub enum InputError {
    /// No known value anywhere in the series
    #[error("Series {series} has no known values")]
    EmptySeries { series: String },

    /// The forecast series has no entries
    #[error("No forecasts supplied for {series}")]
    NoForecasts { series: String },

    /// No forecast column at all for a published series
    #[error("No forecast series for {series}")]
    MissingForecastSeries { series: String },

    /// The forecast series lacks the year being filled
    #[error("No growth forecast for {series} in {year}")]
    MissingForecast { series: String, year: i32 },

    /// The forecast horizon ends before the first quarter that needs filling
    #[error("Forecast horizon for {series} ends at {end}, before {start}")]
    HorizonBeforeStart {
        series: String,
        start: Quarter,
        end: Quarter,
    },

    /// Nothing is known in the year preceding the year being filled
    #[error("Series {series} has no known values in {year} to average")]
    MissingPriorYear { series: String, year: i32 },

    /// An unobserved quarter sits before the most recent observation
    #[error("Series {series} has an unobserved quarter {quarter} before its last known value")]
    InteriorGap { series: String, quarter: Quarter },

    /// The year being filled does not hold exactly Q1 through Q4
    #[error("Series {series} holds {quarters} quarters for {year}, expected Q1 through Q4")]
    IncompleteYear {
        series: String,
        year: i32,
        quarters: usize,
    },
}

/// Numeric failures. Never surfaced as NaN or infinity in the output.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ArithmeticError {
    /// The most recent observation is zero, so the growth equation cannot be scaled by it
    #[error("Last known value of {series} at {quarter} is zero")]
    ZeroAnchor { series: String, quarter: Quarter },

    /// The right-hand side of the growth equation is NaN or infinite
    #[error("Growth equation for {series} in {year} has a non-finite right-hand side")]
    NonFinite { series: String, year: i32 },

    /// Every root of the growth equation is complex
    #[error("Growth equation for {series} in {year} has no real root (rhs = {rhs})")]
    NoRealRoot { series: String, year: i32, rhs: f64 },

    /// Root finder failure
    #[error(transparent)]
    Solve(#[from] SolveError),
}

/// Main error type for imputation
#[derive(Error, Debug)]
pub enum ImputeError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Arithmetic(#[from] ArithmeticError),

    /// Internal consistency check failed
    #[error("Invariant violated for {series}: {message}")]
    Invariant { series: String, message: String },
}

/// Type alias for Results using ImputeError
pub type Result<T> = std::result::Result<T, ImputeError>;
