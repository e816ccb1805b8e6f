//! Goal spawning and edge-triggered collection
//!
//! Exactly one goal is active while a run is in progress: the instant one is
//! collected, its replacement spawns within the same update call, so there is
//! never a frame without a goal.

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::proximity::is_within;
use crate::consts::*;

/// Spawn position used when the retry budget runs out
const SAFE_SPAWN: Vec3 = Vec3::ZERO;

/// A collectible trigger zone
#[derive(Debug, Clone)]
pub struct Goal {
    pub id: u32,
    pub position: Vec3,
    /// Nominal radius; the trigger distance is `radius × COLLECTION_THRESHOLD`
    pub radius: f32,
    /// Independent animation phase so concurrent goals pulse out of sync.
    /// Presentation-only, irrelevant to collection.
    pub phase_seed: f32,
    /// Containment from the previous update step, for rising-edge detection
    was_inside: bool,
}

impl Goal {
    /// Hero must be inside this distance to collect
    pub fn trigger_distance(&self) -> f32 {
        self.radius * COLLECTION_THRESHOLD
    }
}

/// Owns the set of active goals and their spawn/respawn policy.
pub struct GoalLifecycle {
    goals: Vec<Goal>,
    rng: Pcg32,
    next_id: u32,
    /// Shared animation clock; goals add their phase seed to decorrelate
    clock: f32,
}

impl GoalLifecycle {
    pub fn new(seed: u64) -> Self {
        Self {
            goals: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
            clock: 0.0,
        }
    }

    /// Spawn the first goal of a run. Call once after reset.
    pub fn spawn_initial(&mut self) {
        if self.goals.is_empty() {
            self.spawn(Some(HERO_START));
        }
    }

    /// Run one collection step against the hero position. Returns the id of
    /// the collected goal, if any; the replacement goal already exists by the
    /// time this returns.
    pub fn update(&mut self, dt: f32, hero_position: Vec3) -> Option<u32> {
        self.clock += dt;

        let mut collected = None;
        for goal in &mut self.goals {
            let inside = is_within(hero_position, goal.position, goal.trigger_distance());
            // Rising edge only: lingering inside the zone fires nothing
            if inside && !goal.was_inside && collected.is_none() {
                collected = Some(goal.id);
            }
            goal.was_inside = inside;
        }

        if let Some(id) = collected {
            self.goals.retain(|g| g.id != id);
            self.spawn(Some(hero_position));
        }
        collected
    }

    /// Destroy every goal and spawn a fresh one (game reset). The fresh goal
    /// avoids the hero start position so a run never opens with a free collect.
    pub fn reset_all(&mut self) {
        self.goals.clear();
        self.spawn(Some(HERO_START));
    }

    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    /// Pulse/rotation clock for the external renderer; a goal's animation
    /// phase is `clock() + goal.phase_seed`
    pub fn clock(&self) -> f32 {
        self.clock
    }

    /// Pick a spawn point inside the arena inset from the walls. Bounded
    /// retries reject points too close to `avoid` (the hero, so a fresh goal
    /// cannot land already inside the trigger zone); on exhaustion falls back
    /// to a fixed safe position rather than failing.
    fn spawn(&mut self, avoid: Option<Vec3>) {
        let position = self
            .try_spawn_position(avoid)
            .unwrap_or_else(|| {
                log::warn!("goal spawn retries exhausted, using fallback position");
                SAFE_SPAWN
            });

        let goal = Goal {
            id: self.next_id,
            position,
            radius: GOAL_RADIUS,
            phase_seed: self.rng.random_range(0.0..std::f32::consts::TAU),
            was_inside: false,
        };
        self.next_id += 1;
        self.goals.push(goal);
    }

    fn try_spawn_position(&mut self, avoid: Option<Vec3>) -> Option<Vec3> {
        let bound = ARENA_HALF_EXTENT - GOAL_EDGE_INSET;
        for _ in 0..MAX_SPAWN_ATTEMPTS {
            let candidate = Vec3::new(
                self.rng.random_range(-bound..=bound),
                0.0,
                self.rng.random_range(-bound..=bound),
            );
            let clear = avoid
                .map(|p| !is_within(candidate, p, MIN_SPAWN_CLEARANCE))
                .unwrap_or(true);
            if clear {
                return Some(candidate);
            }
        }
        None
    }
}
