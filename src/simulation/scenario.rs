//! Build fully-initialized simulation scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces the runtime bundle:
//! - validated numerical and physical parameters (`Parameters`)
//! - seed bodies with unit multipliers applied (`Body`)
//!
//! The bundle is then turned into an [`Engine`] that owns the bodies.

use log::info;

use crate::configuration::config::{BodyConfig, ScenarioConfig};
use crate::error::SimResult;
use crate::simulation::engine::Engine;
use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, NVec2};

#[derive(Debug, Clone)]
pub struct Scenario {
    pub parameters: Parameters,
    pub bodies: Vec<Body>,
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> SimResult<Self> {
        let c = cfg.constants;
        let s = cfg.simulation;
        let parameters = Parameters {
            G: c.G,
            h0: s.time_step,
            t_end: s.t_end,
            absorption_coeff: c.absorption_coefficient,
            mass_ratio_threshold: c.mass_ratio_threshold,
            black_hole_mass: c.black_hole_mass,
            collision_mass_threshold: c.collision_mass_threshold,
            restitution_mass_ratio: c.restitution_mass_ratio,
            trail_len: s.trail_length,
            length_scale: s.length_scale,
        };
        parameters.validate()?;

        // Bodies: map `BodyConfig` -> runtime `Body` in sim units
        let units = cfg.units;
        let bodies: Vec<Body> = cfg
            .bodies
            .iter()
            .map(|bc: &BodyConfig| {
                Body::new(
                    NVec2::new(bc.x[0], bc.x[1]) * units.length,
                    NVec2::new(bc.v[0], bc.v[1]),
                    bc.m * units.mass,
                    bc.radius,
                    bc.color,
                )
            })
            .collect();

        Ok(Self { parameters, bodies })
    }

    pub fn total_mass(&self) -> f64 {
        self.bodies.iter().map(|b| b.m).sum()
    }

    pub fn into_engine(self) -> SimResult<Engine> {
        info!(
            "scenario with {} bodies, total mass {:e}",
            self.bodies.len(),
            self.total_mass()
        );
        Engine::new(self.parameters, self.bodies)
    }
}
