//! Contact classification and resolution
//!
//! Two separate effects fire when bodies overlap:
//! - the mass branch (`resolve_contact`), run from inside the force pass,
//!   decides between pass-through, absorption (with or without debris) and
//!   black-hole merge, and only ever flags bodies, changes mass and hands
//!   back a body to spawn;
//! - the velocity branch (`exchange_velocities`), run after integration,
//!   swaps momentum between touching bodies with a restitution of 0 or 1.

use log::debug;

use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, Color, NVec2, MASS_EPSILON};

/// Which side of a pair ends up consuming the other
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    First,
    Second,
}

/// Outcome of the mass branch for an overlapping pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// Comparable masses, left to the velocity exchange
    PassThrough,
    /// Consumer takes the whole mass, no debris
    Absorb { consumer: Side },
    /// Consumer takes `absorption_coeff` of the mass, the rest flies off
    Fragment { consumer: Side },
    /// Both bodies are black-hole class and fuse at their midpoint
    BlackHoleMerge,
}

/// Decide what an overlap between `a` and `b` does to their masses
pub fn classify(a: &Body, b: &Body, p: &Parameters) -> Contact {
    if a.m >= p.black_hole_mass && b.m >= p.black_hole_mass {
        return Contact::BlackHoleMerge;
    }

    let dominant = if a.m > p.mass_ratio_threshold * b.m {
        Some((Side::First, b.m))
    } else if b.m > p.mass_ratio_threshold * a.m {
        Some((Side::Second, a.m))
    } else {
        None
    };

    match dominant {
        Some((consumer, consumed_mass)) if consumed_mass >= p.collision_mass_threshold => {
            Contact::Fragment { consumer }
        }
        Some((consumer, _)) => Contact::Absorb { consumer },
        None => Contact::PassThrough,
    }
}

/// Apply the mass branch to an overlapping pair.
///
/// Returns the classification together with the body to enqueue, if any.
/// At most one body is produced per pair, and only the liveness flags,
/// masses and the returned spawn are touched.
pub fn resolve_contact(a: &mut Body, b: &mut Body, p: &Parameters) -> (Contact, Option<Body>) {
    let contact = classify(a, b, p);
    let spawn = match contact {
        Contact::PassThrough => None,
        Contact::BlackHoleMerge => Some(merge_black_holes(a, b)),
        Contact::Absorb { consumer: Side::First } => {
            absorb(a, b, p, false);
            None
        }
        Contact::Absorb { consumer: Side::Second } => {
            absorb(b, a, p, false);
            None
        }
        Contact::Fragment { consumer: Side::First } => absorb(a, b, p, true),
        Contact::Fragment { consumer: Side::Second } => absorb(b, a, p, true),
    };
    (contact, spawn)
}

/// Fuse two black-hole class bodies; both die and the product is returned
pub fn merge_black_holes(a: &mut Body, b: &mut Body) -> Body {
    a.alive = false;
    b.alive = false;

    let x = (a.x + b.x) / 2.0;
    let m = a.m + b.m;
    let radius = (a.radius + b.radius) / 2.0;
    debug!("black hole merge {:?} + {:?} -> mass {m:e}", a.id, b.id);

    Body::new(x, NVec2::zeros(), m, radius, Color::MERGE)
}

/// Transfer mass from `consumed` into `consumer` and flag `consumed` dead.
///
/// With `debris` set, the consumer gains `absorption_coeff` of the mass and
/// the remainder is returned as a fragment at the consumed body's position.
/// Without it the whole mass is taken.
pub fn absorb(consumer: &mut Body, consumed: &mut Body, p: &Parameters, debris: bool) -> Option<Body> {
    consumed.alive = false;

    if !debris {
        consumer.m += consumed.m;
        debug!("{:?} absorbed {:?} whole (mass {:e})", consumer.id, consumed.id, consumed.m);
        return None;
    }

    consumer.m += p.absorption_coeff * consumed.m;

    let fragment_mass = consumed.m * (1.0 - p.absorption_coeff);
    if fragment_mass < MASS_EPSILON {
        debug!("{:?} absorbed {:?}, nothing left for debris", consumer.id, consumed.id);
        return None;
    }

    // Same scalar on both axes, scaled escape speed from the consumer
    let reach = consumer.radius + consumed.radius;
    let speed = 1.2 * (p.G * consumer.m / reach).sqrt();
    let fragment_radius = consumed.radius / (1.0 + p.absorption_coeff);
    debug!(
        "{:?} absorbed {:?}, debris mass {fragment_mass:e} at speed {speed:e}",
        consumer.id, consumed.id
    );

    Some(Body::new(
        consumed.x,
        NVec2::new(speed, speed),
        fragment_mass,
        fragment_radius,
        consumed.color,
    ))
}

/// Per-axis relative speed: sum when both components share a sign,
/// difference otherwise
pub fn relative_speed(v1: f64, v2: f64) -> f64 {
    if (v1 < 0.0 && v2 < 0.0) || (v1 > 0.0 && v2 > 0.0) {
        v1 + v2
    } else {
        v1 - v2
    }
}

/// 0 when either mass is at least `ratio` times the other, else 1
pub fn restitution(m1: f64, m2: f64, ratio: f64) -> f64 {
    if m1 >= ratio * m2 || m2 >= ratio * m1 {
        0.0
    } else {
        1.0
    }
}

/// Velocity branch for an ordered pair; returns true when a contact was resolved
pub fn exchange_velocities(body: &mut Body, other: &mut Body, p: &Parameters) -> bool {
    if !body.alive || !other.alive || !body.overlaps(other) {
        return false;
    }

    let (m1, m2) = (body.m, other.m);
    let e = restitution(m1, m2, p.restitution_mass_ratio);
    let (v1, v2) = (body.v, other.v);

    for axis in 0..2 {
        let vrel = relative_speed(v1[axis], v2[axis]);
        let new_v1 = (m1 * v1[axis] + m2 * v2[axis] - m2 * vrel * e) / (m1 + m2);
        body.v[axis] = new_v1;
        other.v[axis] = vrel * e - new_v1.abs();
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn params() -> Parameters {
        Parameters {
            G: 1.0,
            absorption_coeff: 0.5,
            mass_ratio_threshold: 100.0,
            black_hole_mass: 1.0e8,
            collision_mass_threshold: 10.0,
            ..Default::default()
        }
    }

    #[test]
    fn comparable_masses_pass_through() {
        let a = Body::at_rest([0.0, 0.0], 5.0, 1.0);
        let b = Body::at_rest([1.0, 0.0], 7.0, 1.0);
        assert_eq!(classify(&a, &b, &params()), Contact::PassThrough);
    }

    #[test]
    fn small_consumed_mass_is_absorbed_whole() {
        let a = Body::at_rest([0.0, 0.0], 1.0e6, 5.0);
        let b = Body::at_rest([3.0, 0.0], 1.0, 1.0);
        assert_eq!(classify(&a, &b, &params()), Contact::Absorb { consumer: Side::First });
        assert_eq!(classify(&b, &a, &params()), Contact::Absorb { consumer: Side::Second });
    }

    #[test]
    fn fragment_splits_mass_by_coefficient() {
        let p = params();
        let mut a = Body::at_rest([0.0, 0.0], 1.0e6, 5.0);
        let mut b = Body::at_rest([3.0, 0.0], 100.0, 2.0);

        let (contact, spawn) = resolve_contact(&mut a, &mut b, &p);
        assert_eq!(contact, Contact::Fragment { consumer: Side::First });
        assert!(!b.alive);
        assert_relative_eq!(a.m, 1.0e6 + 50.0);

        let frag = spawn.expect("fragment expected");
        assert_relative_eq!(frag.m, 50.0);
        assert_relative_eq!(frag.radius, 2.0 / 1.5);
        assert_eq!(frag.x, b.x);
        let speed = 1.2 * (p.G * a.m / 7.0).sqrt();
        assert_relative_eq!(frag.v.x, speed);
        assert_relative_eq!(frag.v.y, speed);
    }

    #[test]
    fn full_absorption_leaves_no_fragment() {
        let p = Parameters { absorption_coeff: 1.0, ..params() };
        let mut a = Body::at_rest([0.0, 0.0], 1.0e6, 5.0);
        let mut b = Body::at_rest([3.0, 0.0], 100.0, 2.0);
        let (_, spawn) = resolve_contact(&mut a, &mut b, &p);
        assert!(spawn.is_none());
        assert_relative_eq!(a.m, 1.0e6 + 100.0);
    }

    #[test]
    fn black_holes_merge_at_midpoint() {
        let p = params();
        let mut a = Body::at_rest([0.0, 0.0], 2.0e8, 4.0);
        let mut b = Body::at_rest([2.0, 2.0], 3.0e8, 2.0);
        let (contact, spawn) = resolve_contact(&mut a, &mut b, &p);

        assert_eq!(contact, Contact::BlackHoleMerge);
        assert!(!a.alive && !b.alive);
        let merged = spawn.expect("merge product expected");
        assert_relative_eq!(merged.m, 5.0e8);
        assert_relative_eq!(merged.radius, 3.0);
        assert_eq!(merged.x, NVec2::new(1.0, 1.0));
        assert_eq!(merged.v, NVec2::zeros());
        assert_eq!(merged.color, Color::MERGE);
    }

    #[test]
    fn relative_speed_sign_rule() {
        assert_eq!(relative_speed(2.0, 3.0), 5.0);
        assert_eq!(relative_speed(-2.0, -3.0), -5.0);
        assert_eq!(relative_speed(2.0, -3.0), 5.0);
        assert_eq!(relative_speed(0.0, 3.0), -3.0);
    }

    #[test]
    fn restitution_switches_on_ratio() {
        assert_eq!(restitution(10.0, 1.0, 10.0), 0.0);
        assert_eq!(restitution(1.0, 10.0, 10.0), 0.0);
        assert_eq!(restitution(9.0, 1.0, 10.0), 1.0);
    }

    #[test]
    fn elastic_exchange_follows_formula() {
        let p = params();
        let mut a = Body::at_rest([0.0, 0.0], 2.0, 1.0).with_velocity([1.0, 0.0]);
        let mut b = Body::at_rest([1.5, 0.0], 1.0, 1.0).with_velocity([-1.0, 0.0]);

        assert!(exchange_velocities(&mut a, &mut b, &p));
        // vrel = 1 - (-1) = 2, e = 1
        let v1 = (2.0 * 1.0 + 1.0 * -1.0 - 1.0 * 2.0) / 3.0;
        assert_relative_eq!(a.v.x, v1);
        assert_relative_eq!(b.v.x, 2.0 - v1.abs());
        // y: both zero -> vrel 0, stays 0
        assert_relative_eq!(a.v.y, 0.0);
        assert_relative_eq!(b.v.y, 0.0);
    }

    #[test]
    fn inelastic_exchange_follows_formula() {
        let p = params();
        let mut a = Body::at_rest([0.0, 0.0], 100.0, 1.0).with_velocity([1.0, 1.0]);
        let mut b = Body::at_rest([1.5, 0.0], 1.0, 1.0).with_velocity([-1.0, -1.0]);

        assert!(exchange_velocities(&mut a, &mut b, &p));
        // e = 0: v1' = (100 - 1) / 101, v2' = -|v1'|
        assert_relative_eq!(a.v.x, 99.0 / 101.0);
        assert_relative_eq!(b.v.x, -99.0 / 101.0);
        assert_relative_eq!(a.v.y, 99.0 / 101.0);
        assert_relative_eq!(b.v.y, -99.0 / 101.0);
    }

    #[test]
    fn no_exchange_without_contact() {
        let p = params();
        let mut a = Body::at_rest([0.0, 0.0], 2.0, 1.0).with_velocity([1.0, 0.0]);
        let mut b = Body::at_rest([5.0, 0.0], 1.0, 1.0);
        assert!(!exchange_velocities(&mut a, &mut b, &p));
        assert_relative_eq!(a.v.x, 1.0);
    }
}
