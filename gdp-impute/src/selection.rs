//! Choosing the economically plausible root of the growth equation.

use serde::{Deserialize, Serialize};

/// Lower bound for `1 + quarterly growth`.
pub const PLAUSIBLE_GROWTH_LOWER: f64 = 0.5;

/// Upper bound for `1 + quarterly growth`.
pub const PLAUSIBLE_GROWTH_UPPER: f64 = 1.5;

/// Open interval of admissible quarterly growth multipliers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlausibilityBand {
    pub lower: f64,
    pub upper: f64,
}

impl Default for PlausibilityBand {
    fn default() -> Self {
        PlausibilityBand {
            lower: PLAUSIBLE_GROWTH_LOWER,
            upper: PLAUSIBLE_GROWTH_UPPER,
        }
    }
}

impl PlausibilityBand {
    pub fn contains(&self, multiplier: f64) -> bool {
        self.lower < multiplier && multiplier < self.upper
    }
}

/// The multiplier used to fill a year, and what it was chosen from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RootChoice {
    pub growth: f64,
    /// Real roots inside the band.
    pub candidates: Vec<f64>,
    /// True unless exactly one real root lies inside the band.
    pub ambiguous: bool,
}

/// Pick a growth multiplier from ascending real roots.
///
/// A single root inside the band is taken as is. Otherwise the choice falls
/// back to the first in-band root, or the first real root when none is in
/// band, and is flagged ambiguous. `None` when there are no real roots.
pub fn select_root(real_roots: &[f64], band: PlausibilityBand) -> Option<RootChoice> {
    let candidates: Vec<f64> = real_roots
        .iter()
        .copied()
        .filter(|&r| band.contains(r))
        .collect();
    let growth = candidates.first().or_else(|| real_roots.first()).copied()?;
    Some(RootChoice {
        growth,
        ambiguous: candidates.len() != 1,
        candidates,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_candidate() {
        let choice = select_root(&[-2.1, 1.01], PlausibilityBand::default()).unwrap();
        assert_eq!(choice.growth, 1.01);
        assert_eq!(choice.candidates, vec![1.01]);
        assert!(!choice.ambiguous);
    }

    #[test]
    fn test_no_candidate_falls_back_to_first_real_root() {
        let choice = select_root(&[-3.0, 3.0], PlausibilityBand::default()).unwrap();
        assert_eq!(choice.growth, -3.0);
        assert!(choice.candidates.is_empty());
        assert!(choice.ambiguous);
    }

    #[test]
    fn test_several_candidates_take_the_first() {
        let choice = select_root(&[0.7, 0.9, 1.2], PlausibilityBand::default()).unwrap();
        assert_eq!(choice.growth, 0.7);
        assert_eq!(choice.candidates.len(), 3);
        assert!(choice.ambiguous);
    }

    #[test]
    fn test_band_is_open() {
        let band = PlausibilityBand::default();
        assert!(!band.contains(0.5));
        assert!(!band.contains(1.5));
        assert!(band.contains(1.0));
        assert!(select_root(&[], band).is_none());
    }
}
