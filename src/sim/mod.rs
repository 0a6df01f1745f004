//! Simulation module
//!
//! All gameplay logic lives here:
//! - Entities and their per-frame update/render contract
//! - Procedural spawning from a seeded RNG
//! - Collision resolution and camera scrolling
//! - The per-frame tick and session lifecycle
//!
//! Time and randomness are always injected; nothing here reads the wall clock.

pub mod autopilot;
pub mod collision;
pub mod entity;
pub mod spawner;
pub mod state;
pub mod tick;

pub use autopilot::Autopilot;
pub use collision::{Resolution, resolve};
pub use entity::{
    Body, Enemy, EnemyKind, Entity, FadeStage, Platform, Player, PlayerPose, Projectile,
    UpdateEnv,
};
pub use spawner::{backfill_platforms, spawn_enemy, spawn_platform};
pub use state::{GameOverCause, GamePhase, GameState};
pub use tick::{TickOutcome, apply_input, fire, tick};
