//! Fisher–Snedecor F distribution.
//!
//! Thin wrapper over [`statrs::distribution::FisherSnedecor`] that turns its
//! panicking edges (NaN arguments, `d1 * x` overflowing, probabilities
//! outside `[0, 1]`) into explicit results.

use statrs::distribution::{ContinuousCDF, FisherSnedecor};

/// Error type for distribution construction and evaluation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DistributionError {
    /// Degrees of freedom must be finite and strictly positive.
    #[error("invalid degrees of freedom: ({0}, {1})")]
    InvalidDegreesOfFreedom(f64, f64),

    /// Probability outside the open interval (0, 1).
    #[error("probability out of range: {0}")]
    ProbabilityOutOfRange(f64),
}

/// F distribution with `d1` numerator and `d2` denominator degrees of freedom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FDistribution {
    inner: FisherSnedecor,
    d1: f64,
    d2: f64,
}

impl FDistribution {
    /// Create a new F distribution.
    pub fn new(d1: f64, d2: f64) -> Result<Self, DistributionError> {
        let inner = FisherSnedecor::new(d1, d2)
            .map_err(|_| DistributionError::InvalidDegreesOfFreedom(d1, d2))?;
        Ok(Self { inner, d1, d2 })
    }

    /// Numerator degrees of freedom.
    #[must_use]
    pub fn d1(&self) -> f64 {
        self.d1
    }

    /// Denominator degrees of freedom.
    #[must_use]
    pub fn d2(&self) -> f64 {
        self.d2
    }

    /// `P(X <= x)`.
    #[must_use]
    pub fn cdf(&self, x: f64) -> f64 {
        if x.is_nan() {
            return f64::NAN;
        }
        if x <= 0.0 {
            return 0.0;
        }
        if !(self.d1 * x).is_finite() {
            return 1.0;
        }
        self.inner.cdf(x)
    }

    /// `P(X > x)`, used for p-values.
    #[must_use]
    pub fn sf(&self, x: f64) -> f64 {
        if x.is_nan() {
            return f64::NAN;
        }
        if x <= 0.0 {
            return 1.0;
        }
        if !(self.d1 * x).is_finite() {
            return 0.0;
        }
        self.inner.sf(x)
    }

    /// Quantile at `p`, for `p` in (0, 1).
    pub fn inverse_cdf(&self, p: f64) -> Result<f64, DistributionError> {
        if !(p > 0.0 && p < 1.0) {
            return Err(DistributionError::ProbabilityOutOfRange(p));
        }
        Ok(self.inner.inverse_cdf(p))
    }
}
