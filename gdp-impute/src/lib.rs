//! Quarterly GDP imputation from annual average growth forecasts.
//!
//! A published quarterly series is first extended with unobserved quarters
//! through the last forecast year ([`extend`]), then filled one calendar year
//! at a time ([`imputer`]): each year's missing quarters compound from the most
//! recent observation by a single growth multiplier, chosen so that the year's
//! average reproduces the forecast growth over the previous year's average.

pub mod diagnostics;
pub mod driver;
pub mod error;
pub mod extend;
pub mod imputer;
pub mod polynomial;
pub mod selection;

pub use diagnostics::{AmbiguousRoot, DiagnosticsSink, LogSink};
pub use driver::{impute_panel, PanelImputation};
pub use error::{ArithmeticError, ImputeError, InputError, Result, SolveError};
pub use extend::{extend, extend_panel};
pub use imputer::{impute, ImputeSettings, Imputed, Imputer, YearFill};
pub use polynomial::Polynomial;
pub use selection::{select_root, PlausibilityBand, RootChoice};
