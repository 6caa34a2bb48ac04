//! Fixed-step time integration
//!
//! Semi-implicit Euler: the velocity is kicked by the acceleration of the
//! current tick, then the position drifts with the new velocity. Each
//! step also records the (scaled) position on the body's orbit trail.

use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, NVec2};

/// Advance one body by `dt` under `force`
/// - `a = F / m` is stored on the body for presentation
/// - `v += a dt`, then `x += v dt`
pub fn euler_step(body: &mut Body, force: NVec2, dt: f64, params: &Parameters) {
    body.a = force / body.m;
    body.v += body.a * dt;
    body.x += body.v * dt;
    body.record_trail(body.x * params.length_scale, params.trail_len);
}

/// Step every live body that received a force this tick
pub fn integrate_all(bodies: &mut [Body], forces: &[Option<NVec2>], dt: f64, params: &Parameters) {
    for (b, f) in bodies.iter_mut().zip(forces.iter()) {
        if !b.alive {
            continue;
        }
        if let Some(f) = f {
            euler_step(b, *f, dt, params);
        }
    }
}
