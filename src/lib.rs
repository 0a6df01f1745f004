//! Sky Hopper - an endless jumper
//!
//! Core modules:
//! - `sim`: Simulation (entities, spawning, collisions, scrolling, game loop)
//! - `renderer`: Renderer seam, sprite cache, HUD drawing
//! - `platform`: Input events and time sources
//! - `settings`: Game configuration

pub mod game;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use game::Game;
pub use settings::{ConfigError, GameConfig};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    use std::time::Duration;

    /// Default window dimensions
    pub const SCREEN_WIDTH: u32 = 600;
    pub const SCREEN_HEIGHT: u32 = 800;

    /// Largest simulation step allowed for a single frame (seconds)
    pub const MAX_FRAME_DT: f32 = 0.016;

    /// Player physics (pixels, pixels/s, pixels/s²)
    pub const GRAVITY: f32 = 600.0;
    pub const JUMP_FORCE: f32 = -500.0;
    pub const BASE_PLAYER_SPEED: f32 = 100.0;
    pub const MAX_FALL_SPEED: f32 = 400.0;
    /// Vertical velocity the player spawns with
    pub const PLAYER_START_VY: f32 = 50.0;
    /// Above this vertical velocity the "falling" sprites are shown
    pub const POSE_FALLING_THRESHOLD: f32 = 50.0;

    /// Player hitbox; the full width includes the nose decoration
    pub const PLAYER_WIDTH: f32 = 74.0;
    pub const PLAYER_FULL_WIDTH: f32 = 124.0;
    pub const PLAYER_HEIGHT: f32 = 120.0;

    /// Platforms
    pub const PLATFORM_WIDTH: f32 = 114.0;
    pub const PLATFORM_HEIGHT: f32 = 30.0;
    pub const MIN_PLATFORM_INTERVAL: f32 = 120.0;
    pub const MAX_PLATFORM_INTERVAL: f32 = 210.0;
    /// Opacity lost per second once a platform starts disappearing
    pub const PLATFORM_FADE_SPEED: f32 = 0.06;
    /// Platform pool size, also the grace period before enemies spawn
    pub const INITIAL_PLATFORM_COUNT: usize = 10;
    /// Percent
    pub const PLATFORM_DISAPPEARING_CHANCE: u32 = 15;
    /// Platforms above this y (off the top) are not rolled for disappearing yet
    pub const DISAPPEAR_CHECK_MARGIN: f32 = 10.0;
    /// Start platform sits this far above the bottom edge
    pub const START_PLATFORM_OFFSET: f32 = 65.0;
    /// Player spawns this far above standing height on the start platform
    pub const PLAYER_DROP_HEIGHT: f32 = 150.0;
    /// Landing band around a platform top
    pub const LANDING_TOLERANCE: f32 = 10.0;

    /// Enemy hitbox used against the player (sprite sizes are per kind)
    pub const ENEMY_WIDTH: f32 = 50.0;
    pub const ENEMY_HEIGHT: f32 = 50.0;
    /// Percent
    pub const ENEMY_SPAWN_CHANCE: u32 = 10;
    /// Points per enemy shot down
    pub const KILL_SCORE: u64 = 100;

    /// Projectiles
    pub const PROJECTILE_SPEED: f32 = 1000.0;
    pub const PROJECTILE_WIDTH: f32 = 28.0;
    pub const PROJECTILE_HEIGHT: f32 = 28.0;
    pub const PROJECTILE_COOLDOWN: Duration = Duration::from_millis(300);

    /// Jetpack (data only, nothing grants one yet)
    pub const JETPACK_DURATION: Duration = Duration::from_millis(4000);
    pub const JETPACK_SPEED: f32 = 400.0;

    /// Time the game-over screen stays up before a new session starts
    pub const GAME_OVER_DELAY: Duration = Duration::from_secs(2);
}

/// Axis-aligned overlap test between two boxes anchored at their top-left corner
#[inline]
pub fn aabb_overlap(a_pos: Vec2, a_size: Vec2, b_pos: Vec2, b_size: Vec2) -> bool {
    a_pos.x < b_pos.x + b_size.x
        && a_pos.x + a_size.x > b_pos.x
        && a_pos.y < b_pos.y + b_size.y
        && a_pos.y + a_size.y > b_pos.y
}
