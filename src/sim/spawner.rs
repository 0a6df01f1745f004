//! Procedural platform and enemy placement

use glam::Vec2;
use rand::Rng;

use super::entity::{Enemy, EnemyKind, Platform};
use super::state::GameState;
use crate::consts::*;

/// Vertical slack for matching an existing enemy to a platform
const ENEMY_OVERLAP_TOLERANCE_Y: f32 = 5.0;

/// Spawn one platform above the current highest one.
///
/// Platforms are stacked `MIN_PLATFORM_INTERVAL` apart; once the initial
/// pool has been created each new platform may carry an enemy.
/// Returns the new platform's id.
pub fn spawn_platform(state: &mut GameState) -> u32 {
    let span = (state.screen.x - PLATFORM_WIDTH).max(1.0) as u32;
    let x = state.rng.random_range(0..span) as f32;
    let y = state.highest_platform_y - MIN_PLATFORM_INTERVAL;

    let id = state.next_platform_id();
    let mut platform = Platform::new(id, Vec2::new(x, y));

    if id as usize > INITIAL_PLATFORM_COUNT
        && state.rng.random_range(0..100) < ENEMY_SPAWN_CHANCE
    {
        let kind = EnemyKind::random(&mut state.rng);
        let enemy = Enemy::standing_on(kind, platform.body.pos);
        log::debug!(
            "Enemy {:?} spawned on platform {} at ({:.0}, {:.0})",
            kind,
            id,
            enemy.body.pos.x,
            enemy.body.pos.y
        );
        platform.has_enemy = true;
        state.enemies.push(enemy);
    }

    state.platforms.push(platform);
    state.highest_platform_y = y;
    id
}

/// Top the platform pool back up to `INITIAL_PLATFORM_COUNT`.
/// Returns how many platforms were spawned.
pub fn backfill_platforms(state: &mut GameState) -> usize {
    let mut spawned = 0;
    while state.platforms.len() < INITIAL_PLATFORM_COUNT {
        spawn_platform(state);
        spawned += 1;
    }
    spawned
}

/// Try to place an enemy on a random existing platform (never the first).
///
/// Rolls the enemy spawn chance and refuses to stack two enemies on the same
/// platform. The platform keeps its disappearing roll. Returns true if an
/// enemy was placed.
pub fn spawn_enemy(state: &mut GameState) -> bool {
    if state.platforms.len() < 2 {
        return false;
    }
    if state.rng.random_range(0..100) >= ENEMY_SPAWN_CHANCE {
        return false;
    }

    let index = state.rng.random_range(1..state.platforms.len());
    let platform_pos = state.platforms[index].body.pos;

    let occupied = state.enemies.iter().any(|enemy| {
        (enemy.bottom() - platform_pos.y).abs() < ENEMY_OVERLAP_TOLERANCE_Y
            && (enemy.body.pos.x - platform_pos.x).abs() < PLATFORM_WIDTH
    });
    if occupied {
        return false;
    }

    let kind = EnemyKind::random(&mut state.rng);
    state.enemies.push(Enemy::standing_on(kind, platform_pos));
    log::debug!("Enemy {:?} placed on platform {}", kind, state.platforms[index].id);
    true
}
