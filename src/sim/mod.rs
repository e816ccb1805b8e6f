//! Deterministic gameplay core
//!
//! All gameplay logic lives here. This module must stay pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering or platform dependencies
//!
//! Per-frame order is fixed: physics slices are fully drained before goal
//! collection or the session timer observe the resulting hero position.

pub mod goals;
pub mod gravity;
pub mod physics;
pub mod proximity;
pub mod session;
pub mod world;

pub use goals::{Goal, GoalLifecycle};
pub use gravity::GravityMapper;
pub use physics::RigidBodySimulator;
pub use proximity::is_within;
pub use session::{GameEvent, GamePhase, Session};
pub use world::GameWorld;
