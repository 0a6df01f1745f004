//! Headless backend
//!
//! Records draw calls instead of rasterizing them. Used by the command-line
//! runner and by tests that assert on what a frame drew.

use std::path::{Path, PathBuf};

use glam::Vec2;

use super::{Renderer, SpriteError, SpriteHandle, SpriteLoader};

/// One recorded blit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCall {
    pub sprite: SpriteHandle,
    pub x: i32,
    pub y: i32,
    /// Present for rotated draws
    pub angle: Option<f32>,
}

#[derive(Debug, Clone)]
pub struct HeadlessRenderer {
    size: Vec2,
    draws: Vec<DrawCall>,
    clears: usize,
}

impl HeadlessRenderer {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
            draws: Vec::new(),
            clears: 0,
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.size = Vec2::new(width, height);
    }

    pub fn draws(&self) -> &[DrawCall] {
        &self.draws
    }

    /// Draw calls that used `sprite`
    pub fn draws_of(&self, sprite: SpriteHandle) -> impl Iterator<Item = &DrawCall> {
        self.draws.iter().filter(move |d| d.sprite == sprite)
    }

    pub fn clears(&self) -> usize {
        self.clears
    }

    /// Drain recorded calls (call between frames)
    pub fn take_draws(&mut self) -> Vec<DrawCall> {
        self.clears = 0;
        std::mem::take(&mut self.draws)
    }
}

impl Renderer for HeadlessRenderer {
    fn draw_sprite(&mut self, sprite: SpriteHandle, x: i32, y: i32) {
        self.draws.push(DrawCall {
            sprite,
            x,
            y,
            angle: None,
        });
    }

    fn draw_sprite_rotated(&mut self, sprite: SpriteHandle, x: i32, y: i32, angle_degrees: f32) {
        self.draws.push(DrawCall {
            sprite,
            x,
            y,
            angle: Some(angle_degrees),
        });
    }

    fn screen_size(&self) -> Vec2 {
        self.size
    }

    fn clear(&mut self) {
        self.clears += 1;
    }
}

/// Hands out sequential handles without decoding anything
#[derive(Debug, Default)]
pub struct HeadlessLoader {
    next: u32,
    loaded: Vec<PathBuf>,
    /// Only accept paths that exist on disk
    check_files: bool,
    /// File names that always fail
    failing: Vec<String>,
}

impl HeadlessLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject paths that do not exist on disk
    pub fn checking_files(mut self) -> Self {
        self.check_files = true;
        self
    }

    /// Make loads of `file_name` fail as if the file were corrupt
    pub fn failing_on(mut self, file_name: &str) -> Self {
        self.failing.push(file_name.to_string());
        self
    }

    /// Paths loaded so far, in order
    pub fn loaded(&self) -> &[PathBuf] {
        &self.loaded
    }
}

impl SpriteLoader for HeadlessLoader {
    fn load(&mut self, path: &Path) -> Result<SpriteHandle, SpriteError> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        if self.failing.contains(&name) {
            return Err(SpriteError::Decode {
                path: path.to_path_buf(),
                reason: "rejected by loader".to_string(),
            });
        }
        if self.check_files && !path.is_file() {
            return Err(SpriteError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let handle = SpriteHandle(self.next);
        self.next += 1;
        self.loaded.push(path.to_path_buf());
        Ok(handle)
    }
}
