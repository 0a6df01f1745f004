//! Game state and session lifecycle
//!
//! Everything a session owns lives here and is reset in one step when a new
//! session begins.

use std::time::Duration;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::{Enemy, Platform, Player, Projectile};
use super::spawner;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Session ended, showing the final score until the restart delay passes
    GameOver,
}

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverCause {
    EnemyContact,
    Fell,
}

/// Complete session state
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    #[serde(skip)]
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub game_over_cause: Option<GameOverCause>,
    pub game_over_at: Option<Duration>,
    pub score: u64,
    /// Camera shift applied on the most recent scrolling tick
    pub shift: f32,
    /// Y of the most recently spawned platform; the next one goes above it
    pub highest_platform_y: f32,
    /// Visible area in pixels
    pub screen: Vec2,
    /// Last known pointer position, the aim target for shots
    pub aim: Vec2,
    /// Config multiplier for horizontal speed, kept for respawning the player
    pub player_speed: f32,
    /// Simulated ticks this session
    pub time_ticks: u64,
    pub player: Player,
    pub platforms: Vec<Platform>,
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    /// Last platform id handed out
    platform_id_counter: u32,
}

impl GameState {
    /// Create a state with a fresh session already set up
    pub fn new(screen: Vec2, player_speed: f32, seed: u64) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Playing,
            game_over_cause: None,
            game_over_at: None,
            score: 0,
            shift: 0.0,
            highest_platform_y: 0.0,
            screen,
            aim: Vec2::ZERO,
            player_speed,
            time_ticks: 0,
            player: Player::new(Vec2::ZERO, player_speed),
            platforms: Vec::with_capacity(INITIAL_PLATFORM_COUNT),
            enemies: Vec::with_capacity(INITIAL_PLATFORM_COUNT / 2),
            projectiles: Vec::with_capacity(10),
            platform_id_counter: 0,
        };
        state.reset();
        state
    }

    /// Allocate the next platform id
    pub fn next_platform_id(&mut self) -> u32 {
        self.platform_id_counter += 1;
        self.platform_id_counter
    }

    /// Number of platform ids handed out this session
    pub fn platforms_created(&self) -> u32 {
        self.platform_id_counter
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// End the session; later calls keep the first cause and timestamp
    pub fn end_session(&mut self, cause: GameOverCause, now: Duration) {
        if self.phase == GamePhase::GameOver {
            return;
        }
        self.phase = GamePhase::GameOver;
        self.game_over_cause = Some(cause);
        self.game_over_at = Some(now);
        log::info!(
            "Game over ({:?}): score {}, platforms jumped {}",
            cause,
            self.score,
            self.player.platforms_jumped
        );
    }

    /// Whether the game-over screen has been up long enough to restart
    pub fn restart_due(&self, now: Duration) -> bool {
        self.game_over_at
            .is_some_and(|at| now.saturating_sub(at) >= GAME_OVER_DELAY)
    }

    /// Start a new session: starting platform, player above it, full platform pool
    pub fn reset(&mut self) {
        self.platforms.clear();
        self.enemies.clear();
        self.projectiles.clear();

        self.phase = GamePhase::Playing;
        self.game_over_cause = None;
        self.game_over_at = None;
        self.score = 0;
        self.shift = 0.0;
        self.time_ticks = 0;
        self.platform_id_counter = 0;

        let start = Vec2::new(
            self.screen.x / 2.0 - PLATFORM_WIDTH / 2.0,
            self.screen.y - START_PLATFORM_OFFSET,
        );
        self.highest_platform_y = start.y;
        let id = self.next_platform_id();
        self.platforms.push(Platform::new(id, start));

        let player_pos = Vec2::new(
            start.x + (PLATFORM_WIDTH - PLAYER_WIDTH) / 2.0,
            start.y - PLAYER_HEIGHT - PLAYER_DROP_HEIGHT,
        );
        self.player = Player::new(player_pos, self.player_speed);

        spawner::backfill_platforms(self);
        self.enemies.clear();

        log::info!(
            "New session: {} platforms, screen {}x{}",
            self.platforms.len(),
            self.screen.x,
            self.screen.y
        );
    }
}
