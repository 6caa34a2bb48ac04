//! Numerical and physical parameters for the simulation
//!
//! `Parameters` is the immutable constants snapshot handed to the engine:
//! - gravitational constant `G` and fixed step `h0`,
//! - absorption coefficient and the mass thresholds that classify contacts,
//! - restitution mass ratio for the velocity exchange,
//! - trail cap and the length scale applied to trail points

use crate::error::{SimError, SimResult};

#[allow(non_snake_case)]
#[derive(Debug, Clone)]
pub struct Parameters {
    pub G: f64, // gravitational constant
    pub h0: f64, // fixed step size
    pub t_end: f64, // time end
    pub absorption_coeff: f64, // share of the consumed mass kept by the consumer
    pub mass_ratio_threshold: f64, // dominance ratio for absorption
    pub black_hole_mass: f64, // merge-on-contact threshold
    pub collision_mass_threshold: f64, // below this a consumed body leaves no debris
    pub restitution_mass_ratio: f64, // at or above this mass ratio contacts are inelastic
    pub trail_len: usize, // orbit trail cap
    pub length_scale: f64, // sim length -> trail units
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            G: 1.0,
            h0: 0.01,
            t_end: 10.0,
            absorption_coeff: 0.5,
            mass_ratio_threshold: 100.0,
            black_hole_mass: 1.0e6,
            collision_mass_threshold: 10.0,
            restitution_mass_ratio: 10.0,
            trail_len: 500,
            length_scale: 1.0,
        }
    }
}

fn require_positive(field: &'static str, value: f64) -> SimResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SimError::Configuration {
            field,
            value,
            reason: "must be positive and finite",
        })
    }
}

impl Parameters {
    /// Reject constants the kernel cannot run with
    pub fn validate(&self) -> SimResult<()> {
        require_positive("G", self.G)?;
        require_positive("time_step", self.h0)?;
        require_positive("mass_ratio_threshold", self.mass_ratio_threshold)?;
        require_positive("black_hole_mass", self.black_hole_mass)?;
        require_positive("collision_mass_threshold", self.collision_mass_threshold)?;
        require_positive("restitution_mass_ratio", self.restitution_mass_ratio)?;
        require_positive("length_scale", self.length_scale)?;

        if !(self.t_end.is_finite() && self.t_end >= 0.0) {
            return Err(SimError::Configuration {
                field: "t_end",
                value: self.t_end,
                reason: "must be non-negative and finite",
            });
        }
        if !(self.absorption_coeff > 0.0 && self.absorption_coeff <= 1.0) {
            return Err(SimError::Configuration {
                field: "absorption_coefficient",
                value: self.absorption_coeff,
                reason: "must lie in (0, 1]",
            });
        }
        Ok(())
    }

    /// Number of whole fixed steps needed to reach `t_end`
    pub fn steps_for(&self, t_end: f64) -> u64 {
        if t_end <= 0.0 {
            return 0;
        }
        // Tolerate rounding in t_end / h0 so 0.1 / 0.01 stays 10 steps
        (t_end / self.h0 - 1.0e-9).ceil().max(0.0) as u64
    }
}
