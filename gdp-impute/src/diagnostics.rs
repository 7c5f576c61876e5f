use log::warn;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Raised when the growth equation for a year does not have exactly one
/// root inside the plausibility band. Imputation continues with `chosen`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmbiguousRoot {
    pub series: String,
    pub year: i32,
    pub real_roots: Vec<f64>,
    pub candidates: Vec<f64>,
    pub chosen: f64,
}

impl fmt::Display for AmbiguousRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Check the solutions of the growth equation for {} in {}: {} of real roots {:?} in the plausible range, using {}",
            self.series,
            self.year,
            self.candidates.len(),
            self.real_roots,
            self.chosen
        )
    }
}

/// Receives non-fatal warnings raised during imputation.
pub trait DiagnosticsSink {
    fn ambiguous_root(&mut self, warning: AmbiguousRoot);
}

/// Forwards warnings to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DiagnosticsSink for LogSink {
    fn ambiguous_root(&mut self, warning: AmbiguousRoot) {
        warn!("{}", warning);
    }
}

/// Collects warnings for the caller to inspect.
impl DiagnosticsSink for Vec<AmbiguousRoot> {
    fn ambiguous_root(&mut self, warning: AmbiguousRoot) {
        self.push(warning);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec_sink_collects() {
        let mut sink: Vec<AmbiguousRoot> = Vec::new();
        sink.ambiguous_root(AmbiguousRoot {
            series: "ITL".to_string(),
            year: 2020,
            real_roots: vec![3.0],
            candidates: vec![],
            chosen: 3.0,
        });
        assert_eq!(sink.len(), 1);
        let message = sink[0].to_string();
        assert!(message.contains("ITL"));
        assert!(message.contains("2020"));
    }
}
