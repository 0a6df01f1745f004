//! Frame driver
//!
//! Owns the session state together with the collaborators a frontend hands
//! in: the configuration, the loaded sprite sheet and a clock. A frontend
//! calls [`Game::frame`] once per display frame and forwards its input
//! events through [`Game::handle_input`].

use std::time::Duration;

use crate::platform::{Clock, InputEvent};
use crate::renderer::{Renderer, SpriteSheet};
use crate::settings::GameConfig;
use crate::sim::{GameState, TickOutcome, apply_input, tick};

pub struct Game {
    state: GameState,
    config: GameConfig,
    sprites: SpriteSheet,
    clock: Box<dyn Clock>,
    last_frame: Duration,
}

impl Game {
    pub fn new(config: GameConfig, sprites: SpriteSheet, clock: Box<dyn Clock>) -> Self {
        let seed = config.seed.unwrap_or_else(rand::random);
        log::info!("Starting with seed {seed}");

        let state = GameState::new(config.screen_size(), config.player_speed, seed);
        let last_frame = clock.now();
        Self {
            state,
            config,
            sprites,
            clock,
            last_frame,
        }
    }

    /// Run one frame against `renderer`
    pub fn frame(&mut self, renderer: &mut dyn Renderer) -> TickOutcome {
        // Follow window resizes
        let screen = renderer.screen_size();
        if screen.x > 0.0 && screen.y > 0.0 {
            self.state.screen = screen;
        }

        let now = self.clock.now();
        let dt = now.saturating_sub(self.last_frame).as_secs_f32();
        self.last_frame = now;

        let was_over = self.state.is_game_over();
        let outcome = tick(&mut self.state, dt, now, renderer, &self.sprites);

        if self.config.debug && !was_over && self.state.is_game_over() {
            match self.snapshot_json() {
                Ok(json) => log::debug!("Final state: {json}"),
                Err(err) => log::warn!("Could not snapshot state: {err}"),
            }
        }
        outcome
    }

    pub fn handle_input(&mut self, event: InputEvent) {
        let now = self.clock.now();
        apply_input(&mut self.state, event, now);
    }

    /// Current time on the game's clock
    pub fn now(&self) -> Duration {
        self.clock.now()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn sprites(&self) -> &SpriteSheet {
        &self.sprites
    }

    /// Serialized session state, for debugging
    pub fn snapshot_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.state)
    }
}
