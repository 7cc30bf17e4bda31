use crate::prelude::{DashboardError, DashboardResult};
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Single source of randomness for the dashboard.
///
/// Everything the synthesizer draws goes through this trait so tests can swap
/// in a seeded or scripted source.
pub trait RandomSampler {
    /// Uniform integer in `[0, bound)`.
    fn uniform_int(&mut self, bound: u32) -> DashboardResult<u32>;

    /// Uniform real in `[lo, hi)`.
    fn uniform_real(&mut self, lo: f64, hi: f64) -> DashboardResult<f64>;
}

pub(crate) fn check_int_bound(bound: u32) -> DashboardResult<()> {
    if bound == 0 {
        return Err(DashboardError::InvalidArgument(
            "integer bound must be positive".into(),
        ));
    }
    Ok(())
}

pub(crate) fn check_real_range(lo: f64, hi: f64) -> DashboardResult<()> {
    if !lo.is_finite() || !hi.is_finite() || lo >= hi || !(hi - lo).is_finite() {
        return Err(DashboardError::InvalidArgument(format!(
            "invalid real range [{}, {})",
            lo, hi
        )));
    }
    Ok(())
}

/// Sampler used by the binaries.
pub type DefaultSampler = RngSampler<StdRng>;

/// [`RandomSampler`] backed by any `rand` generator.
#[derive(Debug, Clone)]
pub struct RngSampler<R> {
    rng: R,
}

impl<R: Rng> RngSampler<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngSampler<StdRng> {
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Seeded when a seed is given, entropy-backed otherwise.
    pub fn from_seed_option(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }
}

impl<R: Rng> RandomSampler for RngSampler<R> {
    fn uniform_int(&mut self, bound: u32) -> DashboardResult<u32> {
        check_int_bound(bound)?;
        Ok(self.rng.gen_range(0..bound))
    }

    fn uniform_real(&mut self, lo: f64, hi: f64) -> DashboardResult<f64> {
        check_real_range(lo, hi)?;
        Ok(self.rng.gen_range(lo..hi))
    }
}
