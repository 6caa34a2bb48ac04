//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! simulation scenario. A scenario consists of:
//!
//! - [`ConstantsConfig`]  – physical constants and contact thresholds
//! - [`SimulationConfig`] – time step, end time and trail settings
//! - [`UnitsConfig`]      – optional multipliers for body lengths and masses
//! - [`BodyConfig`]       – initial state for each body
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//! A small scenario matching these types:
//!
//! ```yaml
//! constants:
//!   G: 1.0
//!   absorption_coefficient: 0.5
//!   mass_ratio_threshold: 100.0
//!   black_hole_mass: 1.0e6
//!   collision_mass_threshold: 10.0
//!   restitution_mass_ratio: 10.0   # optional, defaults to 10
//!
//! simulation:
//!   time_step: 0.01
//!   t_end: 10.0
//!   trail_length: 500              # optional, defaults to 500
//!   length_scale: 1.0              # optional, defaults to 1
//!
//! units:                           # optional
//!   length: 1.0
//!   mass: 1.0
//!
//! bodies:
//!   - x: [ -5.0, 0.0 ]
//!     v: [  0.0, 0.5 ]
//!     m: 10.0
//!     radius: 1.0
//!     color: [ 255, 255, 0 ]       # optional
//! ```
//!
//! Missing required fields are rejected by `serde_yaml`; range checks on the
//! values happen when the scenario is built.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::Deserialize;

use crate::error::SimResult;
use crate::simulation::states::Color;

fn default_restitution_ratio() -> f64 {
    10.0
}

fn default_trail_length() -> usize {
    500
}

fn one() -> f64 {
    1.0
}

/// Physical constants and contact classification thresholds
#[allow(non_snake_case)]
#[derive(Deserialize, Debug, Clone)]
pub struct ConstantsConfig {
    pub G: f64, // gravitational constant
    pub absorption_coefficient: f64, // share of consumed mass kept by the consumer
    pub mass_ratio_threshold: f64, // dominance ratio needed to absorb
    pub black_hole_mass: f64, // both bodies at or above this merge on contact
    pub collision_mass_threshold: f64, // consumed bodies at or above this leave debris
    #[serde(default = "default_restitution_ratio")]
    pub restitution_mass_ratio: f64, // mass ratio at which contacts turn inelastic
}

/// Runtime settings of the step driver
#[derive(Deserialize, Debug, Clone)]
pub struct SimulationConfig {
    pub time_step: f64, // fixed step size
    pub t_end: f64, // time end
    #[serde(default = "default_trail_length")]
    pub trail_length: usize, // orbit trail cap per body
    #[serde(default = "one")]
    pub length_scale: f64, // factor applied to trail points
}

/// Multipliers applied to every body's position and mass
#[derive(Deserialize, Debug, Clone)]
pub struct UnitsConfig {
    #[serde(default = "one")]
    pub length: f64,
    #[serde(default = "one")]
    pub mass: f64,
}

impl Default for UnitsConfig {
    fn default() -> Self {
        Self { length: 1.0, mass: 1.0 }
    }
}

/// Configuration for a single body's initial state
#[derive(Deserialize, Debug, Clone)]
pub struct BodyConfig {
    pub x: [f64; 2], // initial position, in `units.length`
    pub v: [f64; 2], // initial velocity, sim units per time unit
    pub m: f64, // mass, in `units.mass`
    pub radius: f64, // physical radius in sim units
    #[serde(default)]
    pub color: Color,
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    pub constants: ConstantsConfig,
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub units: UnitsConfig,
    pub bodies: Vec<BodyConfig>,
}

impl ScenarioConfig {
    pub fn from_reader<R: Read>(reader: R) -> SimResult<Self> {
        Ok(serde_yaml::from_reader(reader)?)
    }

    pub fn from_yaml_str(text: &str) -> SimResult<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn load(path: &Path) -> SimResult<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }
}
