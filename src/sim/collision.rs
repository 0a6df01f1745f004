//! Collision resolution and camera scrolling
//!
//! Runs once per tick after every entity has been updated. All boxes are
//! axis-aligned and anchored at the top-left corner.

use std::time::Duration;

use glam::Vec2;

use super::entity::{Enemy, Entity, Platform, Player, Projectile};
use super::state::{GameOverCause, GameState};
use crate::consts::*;

/// What happened during one resolution pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resolution {
    /// Platform bounced on this tick
    pub landed_on: Option<u32>,
    /// Camera shift applied this tick (0 when not scrolling)
    pub shift: f32,
    /// Enemies destroyed by projectiles
    pub kills: u32,
    pub game_over: Option<GameOverCause>,
}

/// Resolve landings, deaths, scrolling and projectile hits, in that order.
/// Stops as soon as the session ends.
pub fn resolve(state: &mut GameState, now: Duration) -> Resolution {
    let mut result = Resolution {
        landed_on: resolve_landing(&mut state.player, &state.platforms),
        ..Default::default()
    };

    if touches_enemy(&state.player, &state.enemies) {
        state.end_session(GameOverCause::EnemyContact, now);
        result.game_over = Some(GameOverCause::EnemyContact);
        return result;
    }

    result.shift = apply_scroll(state);

    if state.player.body.pos.y > state.screen.y {
        state.end_session(GameOverCause::Fell, now);
        result.game_over = Some(GameOverCause::Fell);
        return result;
    }

    result.kills = resolve_projectile_hits(&mut state.enemies, &mut state.projectiles);
    state.score += result.kills as u64 * KILL_SCORE;

    result
}

/// Bounce the player off the first platform it is falling onto.
///
/// The player's feet must be within `LANDING_TOLERANCE` of the platform top
/// while moving down. Returns the platform's id.
pub fn resolve_landing(player: &mut Player, platforms: &[Platform]) -> Option<u32> {
    if player.body.vel.y <= 0.0 {
        return None;
    }

    let left = player.body.pos.x;
    let right = left + PLAYER_WIDTH;
    let bottom = player.bottom();

    let platform = platforms.iter().find(|p| {
        p.body.active
            && right >= p.left()
            && left <= p.right()
            && (bottom - p.top()).abs() <= LANDING_TOLERANCE
    })?;

    player.body.pos.y = platform.top() - PLAYER_HEIGHT;
    player.body.vel.y = 0.0;
    player.jump();
    if player.register_landing(platform.id) {
        log::trace!("Landed on platform {}", platform.id);
    }
    Some(platform.id)
}

/// Any active enemy overlapping the player (enemies use a fixed hitbox here)
pub fn touches_enemy(player: &Player, enemies: &[Enemy]) -> bool {
    let hitbox = Vec2::new(ENEMY_WIDTH, ENEMY_HEIGHT);
    enemies
        .iter()
        .any(|enemy| enemy.is_active() && player.collides_with(enemy, player.size(), hitbox))
}

/// Keep the player at or below mid-screen by moving the world down instead.
///
/// Returns the applied shift (0 when the player is already low enough).
pub fn apply_scroll(state: &mut GameState) -> f32 {
    let mid = state.screen.y / 2.0;
    let y = state.player.body.pos.y;
    if y >= mid {
        return 0.0;
    }

    let shift = mid - y;
    state.player.body.pos.y = mid;
    for platform in &mut state.platforms {
        platform.body.pos.y += shift;
    }
    for enemy in &mut state.enemies {
        enemy.body.pos.y += shift;
    }
    state.highest_platform_y += shift;
    state.score += (shift * 0.5).floor() as u64;
    state.shift = shift;
    shift
}

/// Destroy every overlapping enemy/projectile pair. Returns the kill count.
pub fn resolve_projectile_hits(enemies: &mut [Enemy], projectiles: &mut [Projectile]) -> u32 {
    let mut kills = 0;
    for enemy in enemies.iter_mut() {
        for projectile in projectiles.iter_mut() {
            if enemy.body.active
                && projectile.body.active
                && enemy.collides_with(&*projectile, enemy.size(), projectile.size())
            {
                enemy.body.active = false;
                projectile.body.active = false;
                kills += 1;
                log::debug!("Enemy {:?} shot down", enemy.kind);
            }
        }
    }
    kills
}
