//! Sky Hopper entry point
//!
//! Runs the game headless: a fixed-step clock, a recording renderer and the
//! autopilot standing in for a player. Useful for soak runs and for checking
//! an asset directory.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;
    use std::rc::Rc;
    use std::time::Duration;

    use anyhow::{Context, Result, bail};
    use clap::Parser;

    use sky_hopper::platform::ManualClock;
    use sky_hopper::renderer::{HeadlessLoader, HeadlessRenderer, SpriteSheet};
    use sky_hopper::sim::{Autopilot, TickOutcome};
    use sky_hopper::{Game, GameConfig};

    /// Fixed frame step of the headless clock
    const FRAME_STEP: Duration = Duration::from_millis(16);

    #[derive(Parser, Debug)]
    #[command(name = "sky-hopper")]
    #[command(about = "Run the endless jumper headless with the autopilot playing")]
    struct Args {
        /// JSON config file; flags below override its values
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long)]
        width: Option<u32>,
        #[arg(long)]
        height: Option<u32>,
        #[arg(long)]
        fullscreen: bool,
        /// Difficulty multiplier
        #[arg(long)]
        difficulty: Option<f32>,
        /// Player speed multiplier
        #[arg(long)]
        speed: Option<f32>,
        #[arg(long)]
        debug: bool,
        #[arg(long)]
        seed: Option<u64>,
        /// Sprite directory
        #[arg(long)]
        assets: Option<PathBuf>,
        /// Frames to simulate
        #[arg(long, default_value_t = 3600)]
        frames: u32,
        /// Fail when a sprite file is missing from the asset directory
        #[arg(long)]
        strict_assets: bool,
        /// Do not send any input
        #[arg(long)]
        no_autopilot: bool,
    }

    impl Args {
        fn into_config(self) -> Result<(GameConfig, RunOptions)> {
            let mut config = match &self.config {
                Some(path) => GameConfig::load(path)?,
                None => GameConfig::default(),
            };

            if let Some(width) = self.width {
                config.width = width;
            }
            if let Some(height) = self.height {
                config.height = height;
            }
            if let Some(difficulty) = self.difficulty {
                config.difficulty = difficulty;
            }
            if let Some(speed) = self.speed {
                config.player_speed = speed;
            }
            if let Some(seed) = self.seed {
                config.seed = Some(seed);
            }
            if let Some(assets) = self.assets {
                config.asset_root = assets;
            }
            config.fullscreen |= self.fullscreen;
            config.debug |= self.debug;
            config.validate().context("invalid command-line overrides")?;

            let options = RunOptions {
                frames: self.frames,
                strict_assets: self.strict_assets,
                autopilot: !self.no_autopilot,
            };
            Ok((config, options))
        }
    }

    struct RunOptions {
        frames: u32,
        strict_assets: bool,
        autopilot: bool,
    }

    pub fn run() -> Result<()> {
        let args = Args::parse();
        let debug = args.debug;

        let level = if debug { "debug" } else { "info" };
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
        log::info!("Sky Hopper (headless) starting...");

        let (config, options) = args.into_config()?;

        let mut loader = if options.strict_assets {
            HeadlessLoader::new().checking_files()
        } else {
            HeadlessLoader::new()
        };
        let sprites = SpriteSheet::load(&mut loader, &config.asset_root);
        let missing = sprites.missing().count();
        if options.strict_assets && missing > 0 {
            bail!(
                "{missing} sprite(s) missing from {}",
                config.asset_root.display()
            );
        }

        let clock = Rc::new(ManualClock::new());
        let mut renderer = HeadlessRenderer::new(config.width as f32, config.height as f32);
        let mut game = Game::new(config, sprites, Box::new(Rc::clone(&clock)));
        log::debug!("Config: {:?}", game.config());
        let mut pilot = Autopilot::new();

        let mut sessions = 0u32;
        let mut best_score = 0u64;
        let mut best_jumps = 0u32;
        for _ in 0..options.frames {
            clock.advance(FRAME_STEP);

            if options.autopilot {
                for event in pilot.plan(game.state(), game.now()) {
                    game.handle_input(event);
                }
            }

            let was_over = game.state().is_game_over();
            let outcome = game.frame(&mut renderer);
            renderer.take_draws();

            if !was_over && game.state().is_game_over() {
                sessions += 1;
                best_score = best_score.max(game.state().score);
                best_jumps = best_jumps.max(game.state().player.platforms_jumped);
            }
            if outcome == TickOutcome::Restarted {
                log::debug!("Session restarted");
            }
        }

        let state = game.state();
        log::info!(
            "Ran {} frames: {} finished session(s), best score {}, best jumps {}, current score {}",
            options.frames,
            sessions,
            best_score.max(state.score),
            best_jumps.max(state.player.platforms_jumped),
            state.score
        );
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Frontends embed the library directly on this target
}
