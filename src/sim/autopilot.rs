//! Idle/demo mode - plays the game by emitting the same input events a
//! person would.
//!
//! Steers toward the platform the player is about to land on (or the next
//! one up while rising) and shoots the nearest enemy on screen.

use std::time::Duration;

use glam::Vec2;

use super::entity::Entity;
use super::state::GameState;
use crate::consts::*;
use crate::platform::{InputEvent, Key, MouseButton};

/// How close (horizontally) the player's center must be to the target's
const STEER_DEADZONE: f32 = 12.0;

#[derive(Debug, Default)]
pub struct Autopilot {
    /// Direction key currently held down
    held: Option<Key>,
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Input events for this frame
    pub fn plan(&mut self, state: &GameState, now: Duration) -> Vec<InputEvent> {
        let mut events = Vec::new();

        if state.is_game_over() {
            self.hold(None, &mut events);
            return events;
        }

        let want = target_x(state).and_then(|x| {
            let offset = x - state.player.center().x;
            if offset > STEER_DEADZONE {
                Some(Key::Right)
            } else if offset < -STEER_DEADZONE {
                Some(Key::Left)
            } else {
                None
            }
        });
        self.hold(want, &mut events);

        if !state.player.in_cooldown(now)
            && let Some(aim) = nearest_enemy(state)
        {
            events.push(InputEvent::MouseMove { x: aim.x, y: aim.y });
            events.push(InputEvent::MouseDown(MouseButton::Left));
            events.push(InputEvent::MouseUp(MouseButton::Left));
        }

        events
    }

    fn hold(&mut self, key: Option<Key>, events: &mut Vec<InputEvent>) {
        if self.held == key {
            return;
        }
        if let Some(old) = self.held.take() {
            events.push(InputEvent::KeyUp(old));
        }
        if let Some(new) = key {
            events.push(InputEvent::KeyDown(new));
        }
        self.held = key;
    }
}

/// Center x of the platform worth heading for
fn target_x(state: &GameState) -> Option<f32> {
    let player = &state.player;
    let bottom = player.bottom();
    let falling = player.body.vel.y > 0.0;

    state
        .platforms
        .iter()
        .filter(|p| p.is_active() && p.fade_stage().is_some())
        .filter(|p| {
            if falling {
                p.top() >= bottom - LANDING_TOLERANCE
            } else {
                p.top() < bottom
            }
        })
        // Closest vertically in the direction of travel
        .min_by(|a, b| {
            let da = (a.top() - bottom).abs();
            let db = (b.top() - bottom).abs();
            da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|p| p.left() + PLATFORM_WIDTH / 2.0)
}

/// Center of the closest visible enemy
fn nearest_enemy(state: &GameState) -> Option<Vec2> {
    let origin = state.player.center();
    state
        .enemies
        .iter()
        .filter(|e| e.is_active())
        .map(|e| e.body.pos + e.kind.size() / 2.0)
        .filter(|c| c.y > 0.0 && c.y < state.screen.y)
        .min_by(|a, b| {
            a.distance_squared(origin)
                .partial_cmp(&b.distance_squared(origin))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
}
