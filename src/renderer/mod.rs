//! Rendering seam
//!
//! The simulation draws through the [`Renderer`] trait and never touches
//! pixels itself. Sprites are opaque handles handed out by a
//! [`SpriteLoader`] and cached in a [`SpriteSheet`].

pub mod headless;
pub mod hud;
pub mod sprites;

pub use headless::{DrawCall, HeadlessLoader, HeadlessRenderer};
pub use sprites::{SpriteError, SpriteId, SpriteLoader, SpriteSheet};

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Opaque handle to a sprite owned by the rendering backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpriteHandle(pub u32);

/// Drawing surface provided by the host
pub trait Renderer {
    /// Blit a sprite with its top-left corner at (x, y)
    fn draw_sprite(&mut self, sprite: SpriteHandle, x: i32, y: i32);

    /// Blit a sprite rotated about its center
    fn draw_sprite_rotated(&mut self, sprite: SpriteHandle, x: i32, y: i32, angle_degrees: f32);

    /// Current drawable size in pixels
    fn screen_size(&self) -> Vec2;

    /// Blank the whole surface
    fn clear(&mut self) {}
}
