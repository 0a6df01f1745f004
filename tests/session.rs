//! End-to-end runs of `Game` on a manual clock and the headless renderer

use std::path::Path;
use std::rc::Rc;
use std::time::Duration;

use sky_hopper::consts::*;
use sky_hopper::platform::ManualClock;
use sky_hopper::renderer::{HeadlessLoader, HeadlessRenderer, SpriteId, SpriteSheet};
use sky_hopper::sim::{Autopilot, GameOverCause, TickOutcome};
use sky_hopper::{Game, GameConfig};

const STEP: Duration = Duration::from_millis(16);

fn new_game(seed: u64) -> (Game, Rc<ManualClock>) {
    let clock = Rc::new(ManualClock::new());
    let config = GameConfig {
        seed: Some(seed),
        ..Default::default()
    };
    let sprites = SpriteSheet::load(&mut HeadlessLoader::new(), Path::new("material"));
    let game = Game::new(config, sprites, Box::new(Rc::clone(&clock)));
    (game, clock)
}

fn run(game: &mut Game, clock: &ManualClock, pilot: &mut Autopilot, frames: u32) {
    let mut renderer = HeadlessRenderer::new(600.0, 800.0);
    for _ in 0..frames {
        clock.advance(STEP);
        for event in pilot.plan(game.state(), game.now()) {
            game.handle_input(event);
        }
        game.frame(&mut renderer);
        renderer.take_draws();
    }
}

#[test]
fn autopilot_session_keeps_invariants() {
    let (mut game, clock) = new_game(2024);
    let mut pilot = Autopilot::new();
    let mut renderer = HeadlessRenderer::new(600.0, 800.0);
    let mut last_score = 0;

    for _ in 0..1200 {
        clock.advance(STEP);
        for event in pilot.plan(game.state(), game.now()) {
            game.handle_input(event);
        }
        let outcome = game.frame(&mut renderer);
        renderer.take_draws();

        let state = game.state();
        if outcome == TickOutcome::Restarted {
            assert_eq!(state.score, 0);
            last_score = 0;
            continue;
        }
        assert!(state.score >= last_score, "score went down");
        last_score = state.score;

        if !state.is_game_over() {
            assert!(state.platforms.len() >= INITIAL_PLATFORM_COUNT);
            for platform in &state.platforms {
                assert!((0.0..=1.0).contains(&platform.opacity));
            }
        }
    }
}

#[test]
fn falling_off_screen_ends_and_restarts_session() {
    let (mut game, clock) = new_game(7);
    let mut renderer = HeadlessRenderer::new(600.0, 800.0);
    {
        let player = &mut game.state_mut().player;
        player.body.pos.y = 799.0;
        player.body.vel.y = MAX_FALL_SPEED;
    }

    clock.advance(STEP);
    let outcome = game.frame(&mut renderer);
    assert!(matches!(outcome, TickOutcome::Played(ref r) if r.game_over == Some(GameOverCause::Fell)));
    assert!(game.state().is_game_over());

    // The game-over screen clears and shows both counters
    renderer.take_draws();
    clock.advance(STEP);
    assert_eq!(game.frame(&mut renderer), TickOutcome::GameOverScreen);
    assert_eq!(renderer.clears(), 1);
    let score_bar = game.sprites().get(SpriteId::ScoreBar).unwrap();
    assert_eq!(renderer.draws_of(score_bar).count(), 2);

    clock.advance(GAME_OVER_DELAY);
    assert_eq!(game.frame(&mut renderer), TickOutcome::Restarted);
    let state = game.state();
    assert!(!state.is_game_over());
    assert_eq!(state.score, 0);
    assert_eq!(state.platforms.len(), INITIAL_PLATFORM_COUNT);
    assert!(state.enemies.is_empty());
    assert!(state.projectiles.is_empty());
}

#[test]
fn same_seed_same_run() {
    let (mut a, clock_a) = new_game(31337);
    let (mut b, clock_b) = new_game(31337);
    run(&mut a, &clock_a, &mut Autopilot::new(), 500);
    run(&mut b, &clock_b, &mut Autopilot::new(), 500);
    assert_eq!(a.snapshot_json().unwrap(), b.snapshot_json().unwrap());
}

#[test]
fn missing_sprites_draw_nothing() {
    let clock = Rc::new(ManualClock::new());
    let config = GameConfig {
        seed: Some(1),
        ..Default::default()
    };
    let mut game = Game::new(config, SpriteSheet::empty(), Box::new(Rc::clone(&clock)));
    let mut renderer = HeadlessRenderer::new(600.0, 800.0);

    clock.advance(STEP);
    assert!(matches!(game.frame(&mut renderer), TickOutcome::Played(_)));
    assert!(renderer.draws().is_empty());
}
