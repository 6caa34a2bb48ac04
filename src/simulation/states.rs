//! Core state types for the N-body simulation.
//!
//! Defines the 2D `Body` with its liveness flag and bounded orbit trail,
//! the `BodyId` handle used for identity checks, and the display `Color`
//! passed through untouched by the physics.

use std::collections::VecDeque;

use nalgebra::Vector2;
use serde::Deserialize;

pub type NVec2 = Vector2<f64>;

/// Smallest mass/radius a live body may carry
pub const MASS_EPSILON: f64 = 1.0e-12;

/// Stable handle for a body, allocated by the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub u32);

/// Opaque RGB display color
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color(pub [u8; 3]);

impl Color {
    /// Color given to the product of a black-hole merge
    pub const MERGE: Color = Color([0, 0, 0]);
    pub const WHITE: Color = Color([255, 255, 255]);
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

#[derive(Debug, Clone)]
pub struct Body {
    pub id: BodyId, // assigned on registration
    pub x: NVec2, // position
    pub v: NVec2, // velocity
    pub a: NVec2, // acceleration of the current tick
    pub m: f64, // mass
    pub radius: f64, // physical radius (collision test)
    pub color: Color,
    pub alive: bool,
    pub trail: VecDeque<NVec2>, // past positions, oldest first
}

impl Body {
    pub fn new(x: NVec2, v: NVec2, m: f64, radius: f64, color: Color) -> Self {
        Self {
            id: BodyId(0),
            x,
            v,
            a: NVec2::zeros(),
            m,
            radius,
            color,
            alive: true,
            trail: VecDeque::new(),
        }
    }

    /// Body at rest, handy for seeding scenarios and tests
    pub fn at_rest(x: [f64; 2], m: f64, radius: f64) -> Self {
        Self::new(NVec2::new(x[0], x[1]), NVec2::zeros(), m, radius, Color::default())
    }

    pub fn with_velocity(mut self, v: [f64; 2]) -> Self {
        self.v = NVec2::new(v[0], v[1]);
        self
    }

    pub fn momentum(&self) -> NVec2 {
        self.v * self.m
    }

    pub fn distance_to(&self, other: &Body) -> f64 {
        (self.x - other.x).norm()
    }

    /// Center distance at or below which the pair is in contact
    pub fn contact_distance(&self, other: &Body) -> f64 {
        (self.radius + other.radius).abs()
    }

    pub fn overlaps(&self, other: &Body) -> bool {
        self.distance_to(other) <= self.contact_distance(other)
    }

    /// Append to the orbit trail, dropping the oldest points past `cap`
    pub fn record_trail(&mut self, point: NVec2, cap: usize) {
        if cap == 0 {
            self.trail.clear();
            return;
        }
        while self.trail.len() >= cap {
            self.trail.pop_front();
        }
        self.trail.push_back(point);
    }

    /// True when mass, radius and position are all usable by the physics
    pub fn is_well_formed(&self) -> bool {
        self.m.is_finite()
            && self.radius.is_finite()
            && self.m >= MASS_EPSILON
            && self.radius >= MASS_EPSILON
            && self.x.iter().all(|c| c.is_finite())
            && self.v.iter().all(|c| c.is_finite())
    }
}
