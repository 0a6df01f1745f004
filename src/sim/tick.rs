//! Per-frame simulation tick
//!
//! Drives one frame of the game: updates and draws entities, resolves
//! collisions, prunes dead entities, refills the platform pool and handles
//! the game-over/restart cycle.

use std::time::Duration;

use glam::Vec2;

use super::collision::{self, Resolution};
use super::entity::{Entity, Projectile, UpdateEnv};
use super::spawner;
use super::state::{GamePhase, GameState};
use crate::consts::*;
use crate::platform::{InputEvent, Key, MouseButton};
use crate::renderer::{Renderer, SpriteSheet, hud};

/// What a single tick did
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// A gameplay frame ran
    Played(Resolution),
    /// The game-over screen was shown
    GameOverScreen,
    /// The restart delay elapsed and a new session began
    Restarted,
}

/// Advance the game by one frame of `dt` seconds at time `now`
pub fn tick(
    state: &mut GameState,
    dt: f32,
    now: Duration,
    renderer: &mut dyn Renderer,
    sprites: &SpriteSheet,
) -> TickOutcome {
    if state.phase == GamePhase::GameOver {
        hud::draw_game_over(
            renderer,
            sprites,
            state.screen,
            state.score,
            state.player.platforms_jumped,
        );
        if state.restart_due(now) {
            state.reset();
            return TickOutcome::Restarted;
        }
        return TickOutcome::GameOverScreen;
    }

    // Large steps after a hitch would tunnel through platforms
    let dt = dt.clamp(0.0, MAX_FRAME_DT);
    state.time_ticks += 1;

    hud::draw_background(renderer, sprites);

    {
        let mut env = UpdateEnv {
            screen: state.screen,
            rng: &mut state.rng,
        };
        for platform in &mut state.platforms {
            platform.update(dt, &mut env);
            platform.render(renderer, sprites);
        }
        for projectile in &state.projectiles {
            projectile.render(renderer, sprites);
        }
        for enemy in &state.enemies {
            enemy.render(renderer, sprites);
        }
        state.player.update(dt, &mut env);
        state.player.render(renderer, sprites);
    }

    hud::draw_overlay(
        renderer,
        sprites,
        state.screen,
        state.score,
        state.player.platforms_jumped,
    );

    update_entities(state, dt, now);
    let resolution = collision::resolve(state, now);
    prune(state);
    spawner::backfill_platforms(state);

    log::trace!(
        "tick {}: score {}, platforms {}, enemies {}, projectiles {}",
        state.time_ticks,
        state.score,
        state.platforms.len(),
        state.enemies.len(),
        state.projectiles.len()
    );

    TickOutcome::Played(resolution)
}

/// Entity update pass: player, platforms, projectiles, enemies
pub fn update_entities(state: &mut GameState, dt: f32, now: Duration) {
    let mut env = UpdateEnv {
        screen: state.screen,
        rng: &mut state.rng,
    };

    state.player.update(dt, &mut env);
    state.player.looking_up = state.player.in_cooldown(now);

    for platform in &mut state.platforms {
        platform.update(dt, &mut env);
    }
    for projectile in &mut state.projectiles {
        projectile.update(dt, &mut env);
    }
    for enemy in &mut state.enemies {
        enemy.update(dt, &mut env);
    }
}

/// Drop inactive entities and platforms that scrolled below the screen
pub fn prune(state: &mut GameState) {
    let bottom = state.screen.y;
    state
        .platforms
        .retain(|p| p.body.active && p.top() <= bottom);
    state.projectiles.retain(|p| p.body.active);
    state.enemies.retain(|e| e.body.active);
}

/// Apply one input event. Ignored while the game-over screen is up.
pub fn apply_input(state: &mut GameState, event: InputEvent, now: Duration) {
    if state.phase == GamePhase::GameOver {
        return;
    }

    let moving = state.player.body.vel.x;
    match event {
        InputEvent::KeyDown(Key::Left) => state.player.move_left(),
        InputEvent::KeyDown(Key::Right) => state.player.move_right(),
        InputEvent::KeyUp(Key::Left) if moving < 0.0 => state.player.stop(),
        InputEvent::KeyUp(Key::Right) if moving > 0.0 => state.player.stop(),
        InputEvent::MouseMove { x, y } => state.aim = Vec2::new(x, y),
        InputEvent::MouseDown(MouseButton::Left) => {
            fire(state, now);
        }
        _ => {}
    }
}

/// Shoot from the player's center toward the aim point.
///
/// Returns false while the weapon is cooling down or when the aim point is
/// exactly on the player's center.
pub fn fire(state: &mut GameState, now: Duration) -> bool {
    let player = &mut state.player;
    if player.in_cooldown(now) {
        return false;
    }

    let origin = player.center();
    let delta = state.aim - origin;
    let Some(direction) = delta.try_normalize() else {
        return false;
    };

    player.looking_up = false;
    player.nose_angle = delta.x.atan2(-delta.y).to_degrees().clamp(-90.0, 90.0);
    player.last_shot_at = Some(now);
    state.projectiles.push(Projectile::new(origin, direction));

    log::debug!(
        "Shot fired toward ({:.0}, {:.0}), nose at {:.1}°",
        state.aim.x,
        state.aim.y,
        player.nose_angle
    );
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{HeadlessLoader, HeadlessRenderer, SpriteId};
    use crate::sim::entity::{Enemy, EnemyKind};
    use crate::sim::state::GameOverCause;
    use proptest::prelude::*;
    use std::path::Path;

    const DT: f32 = 1.0 / 60.0;

    fn state() -> GameState {
        GameState::new(Vec2::new(600.0, 800.0), 5.0, 12345)
    }

    fn sprites() -> SpriteSheet {
        SpriteSheet::load(&mut HeadlessLoader::new(), Path::new("material"))
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_tick_keeps_platform_pool_full() {
        let mut state = state();
        let sprites = sprites();
        let mut renderer = HeadlessRenderer::new(600.0, 800.0);

        for frame in 0..600 {
            if state.is_game_over() {
                break;
            }
            tick(&mut state, DT, ms(frame * 16), &mut renderer, &sprites);
            if !state.is_game_over() {
                assert_eq!(state.platforms.len(), INITIAL_PLATFORM_COUNT);
            }
        }
    }

    #[test]
    fn test_first_bounce_on_start_platform() {
        let mut state = state();
        let sprites = sprites();
        let mut renderer = HeadlessRenderer::new(600.0, 800.0);
        // Clear the fall path so the start platform is the first one reached
        for platform in state.platforms.iter_mut().skip(1) {
            platform.body.pos.x = 0.0;
        }

        let mut landed = None;
        for frame in 0..200 {
            let outcome = tick(&mut state, DT, ms(frame * 16), &mut renderer, &sprites);
            if let TickOutcome::Played(Resolution {
                landed_on: Some(id),
                ..
            }) = outcome
            {
                landed = Some(id);
                break;
            }
        }
        assert_eq!(landed, Some(1));
        assert_eq!(state.player.platforms_jumped, 1);
        assert_eq!(state.player.body.vel.y, JUMP_FORCE);
    }

    #[test]
    fn test_tick_draws_frame() {
        let mut state = state();
        let sprites = sprites();
        let mut renderer = HeadlessRenderer::new(600.0, 800.0);
        tick(&mut state, DT, ms(16), &mut renderer, &sprites);

        let backdrop = sprites.get(SpriteId::Backdrop).unwrap();
        assert_eq!(renderer.draws()[0].sprite, backdrop);
        let player_draws = renderer
            .draws()
            .iter()
            .filter(|d| {
                sprites
                    .get(SpriteId::Player(state.player.pose))
                    .is_some_and(|h| h == d.sprite)
            })
            .count();
        assert_eq!(player_draws, 1);
    }

    #[test]
    fn test_large_dt_is_clamped() {
        let mut a = state();
        let mut b = state();
        let sprites = sprites();
        let mut renderer = HeadlessRenderer::new(600.0, 800.0);

        tick(&mut a, 5.0, ms(5000), &mut renderer, &sprites);
        tick(&mut b, MAX_FRAME_DT, ms(16), &mut renderer, &sprites);
        assert_eq!(a.player.body.pos, b.player.body.pos);
        assert_eq!(a.player.body.vel, b.player.body.vel);
    }

    #[test]
    fn test_game_over_then_restart_after_delay() {
        let mut state = state();
        let sprites = sprites();
        let mut renderer = HeadlessRenderer::new(600.0, 800.0);
        state.score = 450;
        state.player.body.pos.y = 900.0;
        state.player.body.vel.y = 400.0;

        let outcome = tick(&mut state, DT, ms(1000), &mut renderer, &sprites);
        assert!(matches!(
            outcome,
            TickOutcome::Played(Resolution {
                game_over: Some(GameOverCause::Fell),
                ..
            })
        ));

        renderer.take_draws();
        let outcome = tick(&mut state, DT, ms(2999), &mut renderer, &sprites);
        assert_eq!(outcome, TickOutcome::GameOverScreen);
        assert_eq!(renderer.clears(), 1);
        assert_eq!(state.score, 450);

        let outcome = tick(&mut state, DT, ms(3000), &mut renderer, &sprites);
        assert_eq!(outcome, TickOutcome::Restarted);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.platforms.len(), INITIAL_PLATFORM_COUNT);
        assert!(state.enemies.is_empty());
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_prune_removes_dead_and_offscreen() {
        let mut state = state();
        state.platforms[3].body.active = false;
        state.platforms[0].body.pos.y = 801.0;
        state
            .projectiles
            .push(Projectile::new(Vec2::new(10.0, 10.0), Vec2::X));
        state.projectiles[0].body.active = false;
        let mut enemy = Enemy::new(EnemyKind::Slim, Vec2::new(0.0, 1000.0));
        state.enemies.push(enemy.clone());
        enemy.body.active = false;
        state.enemies.push(enemy);

        prune(&mut state);
        assert_eq!(state.platforms.len(), INITIAL_PLATFORM_COUNT - 2);
        assert!(state.projectiles.is_empty());
        // Enemies are only pruned by liveness, not by position
        assert_eq!(state.enemies.len(), 1);
    }

    #[test]
    fn test_keys_move_and_stop() {
        let mut state = state();
        apply_input(&mut state, InputEvent::KeyDown(Key::Left), ms(0));
        assert_eq!(state.player.body.vel.x, -500.0);
        assert!(!state.player.looking_right);

        // Releasing the other direction does not stop the player
        apply_input(&mut state, InputEvent::KeyUp(Key::Right), ms(0));
        assert_eq!(state.player.body.vel.x, -500.0);

        apply_input(&mut state, InputEvent::KeyUp(Key::Left), ms(0));
        assert_eq!(state.player.body.vel.x, 0.0);

        apply_input(&mut state, InputEvent::KeyDown(Key::Up), ms(0));
        assert_eq!(state.player.body.vel.x, 0.0);
    }

    #[test]
    fn test_fire_respects_cooldown() {
        let mut state = state();
        let center = state.player.center();
        apply_input(
            &mut state,
            InputEvent::MouseMove {
                x: center.x,
                y: center.y - 100.0,
            },
            ms(0),
        );

        apply_input(&mut state, InputEvent::MouseDown(MouseButton::Left), ms(1000));
        assert_eq!(state.projectiles.len(), 1);
        let shot = &state.projectiles[0];
        assert_eq!(shot.body.pos, center);
        assert_eq!(shot.body.vel, Vec2::new(0.0, -PROJECTILE_SPEED));
        assert_eq!(state.player.nose_angle, 0.0);

        apply_input(&mut state, InputEvent::MouseDown(MouseButton::Left), ms(1299));
        apply_input(&mut state, InputEvent::MouseDown(MouseButton::Right), ms(1400));
        assert_eq!(state.projectiles.len(), 1);

        apply_input(&mut state, InputEvent::MouseDown(MouseButton::Left), ms(1300));
        assert_eq!(state.projectiles.len(), 2);
    }

    #[test]
    fn test_fire_at_own_center_does_nothing() {
        let mut state = state();
        state.aim = state.player.center();
        assert!(!fire(&mut state, ms(0)));
        assert!(state.projectiles.is_empty());
        assert_eq!(state.player.last_shot_at, None);
    }

    #[test]
    fn test_nose_angle_clamped() {
        let mut state = state();
        let center = state.player.center();
        // Straight down and to the right: 135° before clamping
        state.aim = center + Vec2::new(100.0, 100.0);
        assert!(fire(&mut state, ms(0)));
        assert_eq!(state.player.nose_angle, 90.0);
    }

    #[test]
    fn test_player_looks_up_during_cooldown() {
        let mut state = state();
        state.aim = Vec2::new(300.0, 0.0);
        assert!(fire(&mut state, ms(0)));

        update_entities(&mut state, DT, ms(100));
        assert!(state.player.looking_up);
        update_entities(&mut state, DT, ms(400));
        assert!(!state.player.looking_up);
    }

    #[test]
    fn test_input_ignored_during_game_over() {
        let mut state = state();
        state.aim = Vec2::new(300.0, 0.0);
        state.end_session(GameOverCause::EnemyContact, ms(0));

        apply_input(&mut state, InputEvent::KeyDown(Key::Right), ms(10));
        apply_input(&mut state, InputEvent::MouseDown(MouseButton::Left), ms(10));
        assert_eq!(state.player.body.vel.x, 0.0);
        assert!(state.projectiles.is_empty());
    }

    proptest! {
        #[test]
        fn prop_score_never_decreases(seed in any::<u64>(), moves in prop::collection::vec(0u8..4, 1..300)) {
            let mut state = GameState::new(Vec2::new(600.0, 800.0), 5.0, seed);
            let sprites = SpriteSheet::empty();
            let mut renderer = HeadlessRenderer::new(600.0, 800.0);

            let mut previous = state.score;
            for (frame, m) in moves.into_iter().enumerate() {
                let now = ms(frame as u64 * 16);
                let event = match m {
                    0 => InputEvent::KeyDown(Key::Left),
                    1 => InputEvent::KeyDown(Key::Right),
                    2 => InputEvent::MouseDown(MouseButton::Left),
                    _ => InputEvent::KeyUp(Key::Left),
                };
                apply_input(&mut state, event, now);
                if tick(&mut state, DT, now, &mut renderer, &sprites) == TickOutcome::Restarted {
                    previous = 0;
                }
                prop_assert!(state.score >= previous);
                previous = state.score;
                for platform in &state.platforms {
                    prop_assert!((0.0..=1.0).contains(&platform.opacity));
                }
            }
        }
    }
}
