//! Tick driver for the simulation
//!
//! One call to [`Engine::advance`] runs the four phases in strict order:
//! 1. flush bodies queued by the previous tick into the registry,
//! 2. accumulate forces on every live body (contacts may change masses and
//!    queue new bodies), then integrate every live body,
//! 3. run the velocity exchange over every live ordered pair,
//! 4. prune bodies flagged dead.

use log::{info, warn};

use crate::error::{SimError, SimResult};
use crate::simulation::collisions::exchange_velocities;
use crate::simulation::forces::{accumulate_forces, ContactTally};
use crate::simulation::integrator::integrate_all;
use crate::simulation::params::Parameters;
use crate::simulation::registry::{pair_mut, BodyRegistry};
use crate::simulation::states::{Body, BodyId};

const SECONDS_PER_HOUR: f64 = 3600.0;
const SECONDS_PER_DAY: f64 = 86_400.0;
const DAYS_PER_YEAR: f64 = 365.25;

/// What happened during one tick
#[derive(Debug, Default)]
pub struct TickReport {
    pub collisions: usize, // velocity exchanges resolved
    pub contacts: ContactTally, // mass-branch outcomes
    pub spawned: usize, // bodies flushed into the registry this tick
    pub removed: Vec<BodyId>, // bodies pruned this tick
    pub errors: Vec<SimError>, // degenerate bodies found this tick
}

/// Totals over a multi-tick run
#[derive(Debug, Default, Clone, Copy)]
pub struct RunSummary {
    pub ticks: u64,
    pub collisions: usize,
    pub spawned: usize,
    pub removed: usize,
    pub errors: usize,
}

#[derive(Debug, Clone)]
pub struct Engine {
    parameters: Parameters,
    registry: BodyRegistry,
    t: f64, // simulated time
    last_dt: f64, // step taken by the latest tick
    ticks: u64,
    collisions: usize, // cumulative velocity exchanges
}

impl Engine {
    /// Validate the constants and seed bodies and build the engine
    pub fn new(parameters: Parameters, bodies: Vec<Body>) -> SimResult<Self> {
        parameters.validate()?;

        let mut registry = BodyRegistry::new();
        for body in bodies {
            registry.try_add(body)?;
        }

        Ok(Self {
            parameters,
            registry,
            t: 0.0,
            last_dt: 0.0,
            ticks: 0,
            collisions: 0,
        })
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    pub fn registry(&self) -> &BodyRegistry {
        &self.registry
    }

    /// Read-only bodies for presentation
    pub fn bodies(&self) -> &[Body] {
        self.registry.bodies()
    }

    /// Add a body between ticks, rejecting one the physics cannot use
    pub fn add_body(&mut self, body: Body) -> SimResult<BodyId> {
        self.registry.try_add(body)
    }

    /// Flag a body for removal at the end of the next tick
    pub fn remove_body(&mut self, id: BodyId) -> bool {
        match self.registry.bodies_mut().iter_mut().find(|b| b.id == id) {
            Some(b) => {
                b.alive = false;
                true
            }
            None => false,
        }
    }

    pub fn time(&self) -> f64 {
        self.t
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn collisions(&self) -> usize {
        self.collisions
    }

    /// Run one tick with the configured step, or `dt_override` if given
    pub fn advance(&mut self, dt_override: Option<f64>) -> SimResult<TickReport> {
        let dt = match dt_override {
            Some(dt) if !(dt.is_finite() && dt > 0.0) => {
                return Err(SimError::Configuration {
                    field: "dt_override",
                    value: dt,
                    reason: "must be positive and finite",
                });
            }
            Some(dt) => dt,
            None => self.parameters.h0,
        };

        let mut report = TickReport {
            spawned: self.registry.flush_pending(),
            ..Default::default()
        };

        let mut spawned = Vec::new();
        let bodies = self.registry.bodies_mut();
        let forces = accumulate_forces(bodies, &self.parameters, &mut spawned, &mut report.contacts);
        integrate_all(bodies, &forces, dt, &self.parameters);

        report.collisions = exchange_all(bodies, &self.parameters);
        report.errors = flag_degenerate(bodies);

        for body in spawned {
            self.registry.spawn(body);
        }
        report.removed = self.registry.prune();

        self.t += dt;
        self.last_dt = dt;
        self.ticks += 1;
        self.collisions += report.collisions;
        Ok(report)
    }

    /// Run `steps` ticks with the configured step
    pub fn run(&mut self, steps: u64) -> RunSummary {
        let mut summary = RunSummary::default();
        for _ in 0..steps {
            // The configured step was validated in `new`
            let Ok(report) = self.advance(None) else { break };
            summary.ticks += 1;
            summary.collisions += report.collisions;
            summary.spawned += report.spawned;
            summary.removed += report.removed.len();
            summary.errors += report.errors.len();
        }
        summary
    }

    /// Run until simulated time reaches `t_end`
    pub fn run_until(&mut self, t_end: f64) -> RunSummary {
        let remaining = t_end - self.t;
        let steps = self.parameters.steps_for(remaining);
        info!("running {steps} ticks to reach t = {t_end:e}");
        self.run(steps)
    }

    /// Step the clock back by the latest tick's step; body state is left
    /// untouched. Repeated rewinds reuse that same step.
    pub fn rewind_clock(&mut self) {
        if self.ticks == 0 {
            return;
        }
        self.t = (self.t - self.last_dt).max(0.0);
        self.ticks -= 1;
    }

    /// Elapsed simulated time, taking the clock as seconds
    pub fn formatted_time(&self) -> String {
        format_duration(self.t)
    }
}

/// Hours under a day, days under a year, years beyond
pub fn format_duration(seconds: f64) -> String {
    let days = seconds / SECONDS_PER_DAY;
    if days < 1.0 {
        format!("{:.1} hours", seconds / SECONDS_PER_HOUR)
    } else if days < 365.0 {
        format!("{days:.1} days")
    } else {
        format!("{:.2} years", days / DAYS_PER_YEAR)
    }
}

/// Velocity exchange over every live ordered pair; returns the number resolved
fn exchange_all(bodies: &mut [Body], params: &Parameters) -> usize {
    let n = bodies.len();
    let mut resolved = 0;
    for i in 0..n {
        for j in 0..n {
            if i == j || !bodies[i].alive || !bodies[j].alive {
                continue;
            }
            let (body, other) = pair_mut(bodies, i, j);
            if exchange_velocities(body, other, params) {
                resolved += 1;
            }
        }
    }
    resolved
}

/// Flag every live body the physics can no longer use and report it
fn flag_degenerate(bodies: &mut [Body]) -> Vec<SimError> {
    bodies
        .iter_mut()
        .filter(|b| b.alive && !b.is_well_formed())
        .map(|b| {
            warn!("body {:?} degenerate (mass {}, radius {}), removing", b.id, b.m, b.radius);
            b.alive = false;
            SimError::DegenerateState { id: b.id, mass: b.m, radius: b.radius }
        })
        .collect()
}
