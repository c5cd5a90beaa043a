//! Common types and traits for device models.

use rand::{Rng, rngs::StdRng};

use crate::sim::types::SimConfig;

/// A source that produces a power series over the whole simulation horizon.
///
/// Profiles are computed once per run, before the first step, and are
/// read-only afterwards. Any randomness comes from the generator passed in,
/// so a run seeded once is reproducible.
pub trait ProfileSource {
    /// Returns one power value (kW) per simulation step.
    ///
    /// # Arguments
    ///
    /// * `config` - Simulation timing (resolution and horizon)
    /// * `rng` - Run-scoped random generator
    fn profile_kw(&self, config: &SimConfig, rng: &mut StdRng) -> Vec<f64>;

    /// Returns a human-readable type name for the source.
    fn device_type(&self) -> &'static str;
}

/// Utility function to generate Gaussian noise using Box-Muller transform.
///
/// # Arguments
///
/// * `rng` - Random number generator
/// * `std_dev` - Standard deviation of the noise
///
/// # Returns
///
/// Random value from a Gaussian distribution with mean 0 and specified standard deviation
pub fn gaussian_noise(rng: &mut StdRng, std_dev: f64) -> f64 {
    if std_dev <= 0.0 {
        return 0.0;
    }

    let u1: f64 = rng.random::<f64>().clamp(1e-12, 1.0);
    let u2: f64 = rng.random::<f64>();
    let z0 = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
    z0 * std_dev
}
