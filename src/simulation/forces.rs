//! Pairwise Newtonian gravity and per-body force accumulation
//!
//! Gravity is strictly inverse-square with no softening. Pairs whose
//! centers are within the sum of radii contribute no force; the overlap is
//! handed to the contact resolver instead, which is what keeps the
//! division away from zero separation.

use log::warn;

use crate::simulation::collisions::{resolve_contact, Contact};
use crate::simulation::params::Parameters;
use crate::simulation::registry::pair_mut;
use crate::simulation::states::{Body, NVec2};

/// 2D Newtonian gravity
#[allow(non_snake_case)]
#[derive(Debug, Clone, Copy)]
pub struct NewtonianGravity {
    pub G: f64, // gravitational constant
}

impl NewtonianGravity {
    /// Force on `a` due to `b`, or `None` when the pair overlaps
    pub fn pair_force(&self, a: &Body, b: &Body) -> Option<NVec2> {
        let dx = (a.x.x - b.x.x).abs();
        let dy = (a.x.y - b.x.y).abs();
        let distance = (dx * dx + dy * dy).sqrt();

        if distance <= a.contact_distance(b) {
            return None;
        }

        let f = self.G * a.m * b.m / (distance * distance);
        let theta = dy.atan2(dx);

        // Pull toward the other body on each axis
        let fx = if a.x.x < b.x.x { theta.cos() * f } else { -theta.cos() * f };
        let fy = if a.x.y < b.x.y { theta.sin() * f } else { -theta.sin() * f };
        Some(NVec2::new(fx, fy))
    }
}

/// Tally of what the mass branch did during a force pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContactTally {
    pub absorbed: usize,
    pub fragmented: usize,
    pub merged: usize,
}

impl ContactTally {
    fn record(&mut self, contact: Contact) {
        match contact {
            Contact::PassThrough => {}
            Contact::Absorb { .. } => self.absorbed += 1,
            Contact::Fragment { .. } => self.fragmented += 1,
            Contact::BlackHoleMerge => self.merged += 1,
        }
    }
}

/// Total force on body `i` from every other live body.
///
/// Overlapping pairs run the contact resolver, which may change masses,
/// flag bodies dead and push new bodies onto `spawned`. Returns `None`
/// when body `i` is dead, possibly because a contact met during this scan
/// killed it, or when its own state is malformed.
pub fn accumulate_force(
    i: usize,
    bodies: &mut [Body],
    params: &Parameters,
    spawned: &mut Vec<Body>,
    tally: &mut ContactTally,
) -> Option<NVec2> {
    if !bodies[i].alive {
        return None;
    }
    if !bodies[i].is_well_formed() {
        warn!("skipping malformed body {:?}", bodies[i].id);
        return None;
    }

    let gravity = NewtonianGravity { G: params.G };
    let mut total = NVec2::zeros();

    for j in 0..bodies.len() {
        if j == i || !bodies[j].alive {
            continue;
        }
        if !bodies[i].alive {
            return None;
        }

        let (body, other) = pair_mut(bodies, i, j);
        if !other.is_well_formed() {
            warn!("skipping malformed pair {:?} / {:?}", body.id, other.id);
            continue;
        }

        match gravity.pair_force(body, other) {
            Some(f) => total += f,
            None => {
                let (contact, spawn) = resolve_contact(body, other, params);
                tally.record(contact);
                spawned.extend(spawn);
            }
        }
    }

    bodies[i].alive.then_some(total)
}

/// Forces on every body, in registry order; dead bodies get `None`
pub fn accumulate_forces(
    bodies: &mut [Body],
    params: &Parameters,
    spawned: &mut Vec<Body>,
    tally: &mut ContactTally,
) -> Vec<Option<NVec2>> {
    (0..bodies.len())
        .map(|i| {
            if bodies[i].alive {
                accumulate_force(i, bodies, params, spawned, tally)
            } else {
                None
            }
        })
        .collect()
}
