//! Owner of every live body plus the queue of bodies born mid-tick
//!
//! Structural changes only happen at phase boundaries: `flush_pending`
//! moves queued spawns in, `prune` drops bodies flagged dead. Inside a
//! force or collision pass bodies are only flagged, never removed.

use crate::error::{SimError, SimResult};
use crate::simulation::states::{Body, BodyId, NVec2};

#[derive(Debug, Clone, Default)]
pub struct BodyRegistry {
    bodies: Vec<Body>,
    pending: Vec<Body>, // spawned this tick, owned here until the next flush
    next_id: u32,
}

impl BodyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate_id(&mut self) -> BodyId {
        let id = BodyId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Register a body immediately and return its id
    pub fn add(&mut self, mut body: Body) -> BodyId {
        let id = self.allocate_id();
        body.id = id;
        self.bodies.push(body);
        id
    }

    /// Register a body only if the physics can use it; a rejected body
    /// consumes no id
    pub fn try_add(&mut self, body: Body) -> SimResult<BodyId> {
        if !body.is_well_formed() {
            return Err(SimError::DegenerateState {
                id: BodyId(self.next_id),
                mass: body.m,
                radius: body.radius,
            });
        }
        Ok(self.add(body))
    }

    /// Queue a body for the next flush; the id is reserved now
    pub fn spawn(&mut self, mut body: Body) -> BodyId {
        let id = self.allocate_id();
        body.id = id;
        self.pending.push(body);
        id
    }

    /// Move every queued body into the live set, returning how many moved
    pub fn flush_pending(&mut self) -> usize {
        let n = self.pending.len();
        self.bodies.append(&mut self.pending);
        n
    }

    /// Drop every body flagged dead and return their ids
    pub fn prune(&mut self) -> Vec<BodyId> {
        let removed: Vec<BodyId> = self
            .bodies
            .iter()
            .filter(|b| !b.alive)
            .map(|b| b.id)
            .collect();
        self.bodies.retain(|b| b.alive);
        removed
    }

    pub fn get(&self, id: BodyId) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id == id)
    }

    /// Read-only view for presentation
    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub(crate) fn bodies_mut(&mut self) -> &mut [Body] {
        &mut self.bodies
    }

    pub fn pending(&self) -> &[Body] {
        &self.pending
    }

    pub fn alive(&self) -> impl Iterator<Item = &Body> {
        self.bodies.iter().filter(|b| b.alive)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Mass of live bodies plus anything waiting in the queue
    pub fn total_mass(&self) -> f64 {
        self.alive().chain(self.pending.iter()).map(|b| b.m).sum()
    }

    pub fn total_momentum(&self) -> NVec2 {
        self.alive()
            .chain(self.pending.iter())
            .map(|b| b.momentum())
            .fold(NVec2::zeros(), |acc, p| acc + p)
    }
}

/// Two distinct mutable bodies out of one slice
pub(crate) fn pair_mut(bodies: &mut [Body], i: usize, j: usize) -> (&mut Body, &mut Body) {
    assert_ne!(i, j, "pair_mut needs two distinct indices");
    if i < j {
        let (lo, hi) = bodies.split_at_mut(j);
        (&mut lo[i], &mut hi[0])
    } else {
        let (lo, hi) = bodies.split_at_mut(i);
        (&mut hi[0], &mut lo[j])
    }
}
