pub mod simulation;
pub mod configuration;
pub mod error;

pub use simulation::states::{Body, BodyId, Color, NVec2, MASS_EPSILON};
pub use simulation::params::Parameters;
pub use simulation::registry::BodyRegistry;
pub use simulation::forces::{NewtonianGravity, ContactTally, accumulate_force, accumulate_forces};
pub use simulation::collisions::{Contact, Side, classify, resolve_contact, exchange_velocities};
pub use simulation::integrator::{euler_step, integrate_all};
pub use simulation::engine::{Engine, TickReport, RunSummary, format_duration};
pub use simulation::scenario::Scenario;

pub use configuration::config::{ConstantsConfig, SimulationConfig, UnitsConfig, BodyConfig, ScenarioConfig};

pub use error::{SimError, SimResult};
