//! Fixed-timestep rigid-body simulation
//!
//! Drives rapier2d directly (no ECS): one dynamic ball for the hero plus four
//! static boundary walls. The arena floor is the world XZ plane; rapier's 2D
//! Y axis carries world Z.
//!
//! Rapier's solver is tuned for unit-scale bodies, so everything is scaled by
//! `PHYSICS_SCALE` on the way in and divided back out on the way out. The
//! scale never leaks through the public contract: callers always supply and
//! receive un-scaled world units.

use glam::Vec3;
use rapier2d::prelude::*;

use crate::consts::{ARENA_HALF_EXTENT, WALL_THICKNESS};

/// Internal coordinate scale (world units → physics units)
const PHYSICS_SCALE: f32 = 10.0;
/// Post-step speed cap in scaled units/sec, anti-tunneling safeguard
const MAX_BODY_SPEED: f32 = 15.0;

/// Hero collision material: controllable roll, not pure Newtonian motion
const HERO_RESTITUTION: f32 = 0.3;
const HERO_FRICTION: f32 = 0.4;
const HERO_LINEAR_DAMPING: f32 = 0.3;
const HERO_ANGULAR_DAMPING: f32 = 0.2;
const WALL_FRICTION: f32 = 0.4;

/// Owns the physics world and the hero body's position/velocity.
///
/// All hero operations before `add_hero_body` are benign no-ops.
pub struct RigidBodySimulator {
    pipeline: PhysicsPipeline,
    params: IntegrationParameters,
    islands: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    hero: Option<Hero>,
    walls_added: bool,
}

struct Hero {
    handle: RigidBodyHandle,
    radius: f32,
}

impl Default for RigidBodySimulator {
    fn default() -> Self {
        Self::new()
    }
}

impl RigidBodySimulator {
    pub fn new() -> Self {
        Self {
            pipeline: PhysicsPipeline::new(),
            params: IntegrationParameters::default(),
            islands: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            hero: None,
            walls_added: false,
        }
    }

    /// Build the four static arena walls. Inner faces sit exactly at
    /// ±ARENA_HALF_EXTENT regardless of thickness. Idempotent.
    pub fn add_boundaries(&mut self) {
        if self.walls_added {
            return;
        }
        self.walls_added = true;

        let half = ARENA_HALF_EXTENT * PHYSICS_SCALE;
        let half_thick = WALL_THICKNESS / 2.0 * PHYSICS_SCALE;
        // Long enough to overlap at the corners
        let half_len = half + half_thick * 2.0;
        let center = half + half_thick;

        // (position, half-extents): two walls per axis
        let walls = [
            (vector![0.0, -center], (half_len, half_thick)),
            (vector![0.0, center], (half_len, half_thick)),
            (vector![-center, 0.0], (half_thick, half_len)),
            (vector![center, 0.0], (half_thick, half_len)),
        ];

        for (pos, (hx, hy)) in walls {
            let body = RigidBodyBuilder::fixed().translation(pos).build();
            let collider = ColliderBuilder::cuboid(hx, hy)
                .friction(WALL_FRICTION)
                .build();
            let handle = self.bodies.insert(body);
            self.colliders
                .insert_with_parent(collider, handle, &mut self.bodies);
        }
    }

    /// Create the hero sphere. Position and radius are un-scaled world units.
    pub fn add_hero_body(&mut self, position: Vec3, radius: f32) {
        if self.hero.is_some() {
            log::warn!("hero body already exists, ignoring add_hero_body");
            return;
        }

        let body = RigidBodyBuilder::dynamic()
            .translation(vector![
                position.x * PHYSICS_SCALE,
                position.z * PHYSICS_SCALE
            ])
            .linear_damping(HERO_LINEAR_DAMPING)
            .angular_damping(HERO_ANGULAR_DAMPING)
            .ccd_enabled(true)
            .build();
        let collider = ColliderBuilder::ball(radius * PHYSICS_SCALE)
            .restitution(HERO_RESTITUTION)
            .friction(HERO_FRICTION)
            .build();

        let handle = self.bodies.insert(body);
        self.colliders
            .insert_with_parent(collider, handle, &mut self.bodies);
        self.hero = Some(Hero { handle, radius });
    }

    /// Advance the simulation by exactly one fixed slice under `gravity`
    /// (world units, XZ plane). The already-bounded vector is authoritative;
    /// no re-normalization happens here.
    pub fn update(&mut self, dt_secs: f32, gravity: Vec3) {
        self.params.dt = dt_secs;
        let g = vector![gravity.x, gravity.z] * PHYSICS_SCALE;

        self.pipeline.step(
            &g,
            &self.params,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            None,
            &(),
            &(),
        );

        self.clamp_hero_speed();
    }

    /// Rescale hero velocity down to the cap, preserving direction
    fn clamp_hero_speed(&mut self) {
        let Some(hero) = &self.hero else { return };
        let Some(body) = self.bodies.get_mut(hero.handle) else {
            return;
        };
        let vel = *body.linvel();
        let speed = vel.norm();
        if speed > MAX_BODY_SPEED {
            body.set_linvel(vel * (MAX_BODY_SPEED / speed), true);
        }
    }

    /// Hero position in un-scaled world units, Y resting on the floor plane
    pub fn hero_position(&self) -> Option<Vec3> {
        let hero = self.hero.as_ref()?;
        let body = self.bodies.get(hero.handle)?;
        let t = body.translation();
        Some(Vec3::new(
            t.x / PHYSICS_SCALE,
            hero.radius,
            t.y / PHYSICS_SCALE,
        ))
    }

    /// Hero velocity in un-scaled world units/sec
    pub fn hero_velocity(&self) -> Option<Vec3> {
        let hero = self.hero.as_ref()?;
        let body = self.bodies.get(hero.handle)?;
        let v = body.linvel();
        Some(Vec3::new(v.x / PHYSICS_SCALE, 0.0, v.y / PHYSICS_SCALE))
    }

    /// Hero roll angle in radians (for the external renderer)
    pub fn hero_rotation(&self) -> Option<f32> {
        let hero = self.hero.as_ref()?;
        let body = self.bodies.get(hero.handle)?;
        Some(body.rotation().angle())
    }

    /// Teleport the hero and zero its motion (game reset). No-op without a
    /// hero body.
    pub fn warp_hero(&mut self, position: Vec3) {
        let Some(hero) = &self.hero else { return };
        let Some(body) = self.bodies.get_mut(hero.handle) else {
            return;
        };
        body.set_translation(
            vector![position.x * PHYSICS_SCALE, position.z * PHYSICS_SCALE],
            true,
        );
        body.set_linvel(vector![0.0, 0.0], true);
        body.set_angvel(0.0, true);
    }

    /// Maximum hero speed after clamping, in world units/sec
    pub fn max_hero_speed() -> f32 {
        MAX_BODY_SPEED / PHYSICS_SCALE
    }
}
