//! Real-coefficient polynomials and their complex roots.

use num_complex::Complex64;
use std::f64::consts::TAU;

use crate::error::SolveError;

/// Iteration cap for the simultaneous root iteration.
pub const MAX_ITERATIONS: usize = 1000;

/// Relative step size below which the iteration has settled.
pub const CONVERGENCE: f64 = 1e-14;

/// Default relative bound on the imaginary part of a root accepted as real.
pub const REAL_ROOT_TOLERANCE: f64 = 1e-7;

const NEWTON_STEPS: usize = 8;

/// A polynomial with real coefficients, lowest power first.
#[derive(Debug, Clone, PartialEq)]
pub struct Polynomial {
    coefficients: Vec<f64>,
}

impl Polynomial {
    /// Build from coefficients in ascending powers; trailing zeros are dropped.
    pub fn new(mut coefficients: Vec<f64>) -> Polynomial {
        while coefficients.last() == Some(&0.0) {
            coefficients.pop();
        }
        Polynomial { coefficients }
    }

    /// `y + y^2 + ... + y^n - rhs`: the total of `n` quarters compounding by
    /// `y` from a base of one, set against `rhs`.
    pub fn geometric_power_sum(n: usize, rhs: f64) -> Polynomial {
        let mut coefficients = vec![1.0; n + 1];
        coefficients[0] = -rhs;
        Polynomial::new(coefficients)
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    pub fn degree(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }

    pub fn evaluate(&self, x: f64) -> f64 {
        self.coefficients
            .iter()
            .rev()
            .fold(0.0, |acc, &c| acc * x + c)
    }

    pub fn evaluate_complex(&self, z: Complex64) -> Complex64 {
        self.coefficients
            .iter()
            .rev()
            .fold(Complex64::new(0.0, 0.0), |acc, &c| acc * z + c)
    }

    pub fn derivative(&self) -> Polynomial {
        let coefficients = self
            .coefficients
            .iter()
            .enumerate()
            .skip(1)
            .map(|(power, &c)| power as f64 * c)
            .collect();
        Polynomial::new(coefficients)
    }

    /// All complex roots, with multiplicity.
    ///
    /// Degree one is solved directly; higher degrees use Durand-Kerner
    /// simultaneous iteration started on a circle of the Cauchy bound radius.
    pub fn roots(&self) -> Result<Vec<Complex64>, SolveError> {
        if self.coefficients.iter().any(|c| !c.is_finite()) {
            return Err(SolveError::NonFiniteCoefficient);
        }
        let n = self.degree();
        if n == 0 {
            return Err(SolveError::Constant);
        }
        let lead = self.coefficients[n];
        let monic = Polynomial {
            coefficients: self.coefficients.iter().map(|c| c / lead).collect(),
        };
        if n == 1 {
            return Ok(vec![Complex64::new(-monic.coefficients[0], 0.0)]);
        }

        let radius = 1.0
            + monic.coefficients[..n]
                .iter()
                .fold(0.0_f64, |acc, c| acc.max(c.abs()));
        let mut z: Vec<Complex64> = (0..n)
            .map(|k| Complex64::from_polar(radius, TAU * k as f64 / n as f64 + 0.4))
            .collect();

        for _ in 0..MAX_ITERATIONS {
            let mut largest_step = 0.0_f64;
            for k in 0..n {
                let zk = z[k];
                let denominator = z
                    .iter()
                    .enumerate()
                    .filter(|&(j, _)| j != k)
                    .fold(Complex64::new(1.0, 0.0), |acc, (_, &zj)| acc * (zk - zj));
                if denominator.norm() == 0.0 {
                    // coincident estimates; nudge apart and keep iterating
                    z[k] = zk + Complex64::new(CONVERGENCE, CONVERGENCE) * (1.0 + zk.norm());
                    largest_step = f64::INFINITY;
                    continue;
                }
                let step = monic.evaluate_complex(zk) / denominator;
                z[k] = zk - step;
                largest_step = largest_step.max(step.norm() / (1.0 + zk.norm()));
            }
            if largest_step < CONVERGENCE {
                return Ok(z);
            }
        }

        // Repeated roots converge only linearly; accept estimates that already
        // satisfy the polynomial to working precision.
        let scale = monic.coefficients.iter().map(|c| c.abs()).sum::<f64>();
        if z
            .iter()
            .all(|&zk| monic.evaluate_complex(zk).norm() <= 1e-9 * scale)
        {
            Ok(z)
        } else {
            Err(SolveError::NoConvergence(MAX_ITERATIONS))
        }
    }

    /// Real roots, sorted ascending with near-duplicates merged.
    ///
    /// A root counts as real when its imaginary part is within `tolerance`
    /// relative to its magnitude; accepted roots are polished with Newton steps.
    pub fn real_roots(&self, tolerance: f64) -> Result<Vec<f64>, SolveError> {
        let derivative = self.derivative();
        let mut real: Vec<f64> = self
            .roots()?
            .into_iter()
            .filter(|z| z.im.abs() <= tolerance * (1.0 + z.re.abs()))
            .map(|z| self.polish(&derivative, z.re))
            .collect();
        real.sort_by(|a, b| a.total_cmp(b));
        real.dedup_by(|a, b| (*a - *b).abs() <= tolerance * (1.0 + b.abs()));
        Ok(real)
    }

    fn polish(&self, derivative: &Polynomial, mut x: f64) -> f64 {
        for _ in 0..NEWTON_STEPS {
            let value = self.evaluate(x);
            let slope = derivative.evaluate(x);
            if value == 0.0 || slope == 0.0 {
                break;
            }
            let next = x - value / slope;
            if !next.is_finite() || self.evaluate(next).abs() > value.abs() {
                break;
            }
            x = next;
        }
        x
    }
}
