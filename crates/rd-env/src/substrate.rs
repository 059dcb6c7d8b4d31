//! Substrate (diffusing species) definitions.

use serde::Deserialize;

/// One diffusing, decaying species.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Substrate {
    pub name: String,

    /// Display units for densities, e.g. `"mmHg"`.
    #[serde(default = "default_units")]
    pub units: String,

    /// Diffusion coefficient `D` (length² / time).
    pub diffusion_coefficient: f64,

    /// First-order decay rate `λ` (1 / time).
    #[serde(default)]
    pub decay_rate: f64,

    /// Uniform density every voxel starts with.
    #[serde(default)]
    pub initial_condition: f64,
}

fn default_units() -> String {
    "dimensionless".to_owned()
}

impl Substrate {
    /// Check that coefficients are finite and non-negative.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("substrate name must not be empty".to_owned());
        }
        if !(self.diffusion_coefficient.is_finite() && self.diffusion_coefficient >= 0.0) {
            return Err(format!(
                "substrate {:?}: diffusion_coefficient must be non-negative, got {}",
                self.name, self.diffusion_coefficient
            ));
        }
        if !(self.decay_rate.is_finite() && self.decay_rate >= 0.0) {
            return Err(format!(
                "substrate {:?}: decay_rate must be non-negative, got {}",
                self.name, self.decay_rate
            ));
        }
        if !self.initial_condition.is_finite() {
            return Err(format!(
                "substrate {:?}: initial_condition must be finite",
                self.name
            ));
        }
        Ok(())
    }
}
