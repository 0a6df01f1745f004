//! Sprite cache
//!
//! Every sprite the game uses is named by a [`SpriteId`]. The sheet maps ids
//! to handles through a fixed-size table, loaded once at startup. A sprite
//! that failed to load stays `None` and drawing it does nothing.

use std::fmt;
use std::path::{Path, PathBuf};

use glam::Vec2;

use super::{Renderer, SpriteHandle};
use crate::sim::{EnemyKind, FadeStage, PlayerPose};

/// Why a sprite could not be loaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpriteError {
    NotFound { path: PathBuf },
    Decode { path: PathBuf, reason: String },
}

impl fmt::Display for SpriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { path } => write!(f, "sprite not found: {}", path.display()),
            Self::Decode { path, reason } => {
                write!(f, "failed to decode sprite {}: {reason}", path.display())
            }
        }
    }
}

impl std::error::Error for SpriteError {}

/// Backend hook that turns an image path into a handle
pub trait SpriteLoader {
    fn load(&mut self, path: &Path) -> Result<SpriteHandle, SpriteError>;
}

/// Every sprite the game draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteId {
    Backdrop,
    ScoreBar,
    Platform(FadeStage),
    Enemy(EnemyKind),
    Player(PlayerPose),
    Nose,
    Projectile,
    /// 0-9
    Digit(u8),
}

/// Number of table slots
pub const SPRITE_COUNT: usize = 2 + 3 + 3 + 6 + 2 + 10;

impl SpriteId {
    /// Table slot
    pub fn index(self) -> usize {
        match self {
            SpriteId::Backdrop => 0,
            SpriteId::ScoreBar => 1,
            SpriteId::Platform(stage) => 2 + stage as usize,
            SpriteId::Enemy(kind) => 5 + kind.index(),
            SpriteId::Player(pose) => 8 + pose.index(),
            SpriteId::Nose => 14,
            SpriteId::Projectile => 15,
            SpriteId::Digit(d) => 16 + d.min(9) as usize,
        }
    }

    /// All ids, in table order
    pub fn all() -> impl Iterator<Item = SpriteId> {
        [SpriteId::Backdrop, SpriteId::ScoreBar]
            .into_iter()
            .chain(FadeStage::ALL.into_iter().map(SpriteId::Platform))
            .chain(EnemyKind::ALL.into_iter().map(SpriteId::Enemy))
            .chain(PlayerPose::ALL.into_iter().map(SpriteId::Player))
            .chain([SpriteId::Nose, SpriteId::Projectile])
            .chain((0..10).map(SpriteId::Digit))
    }

    /// Image file, relative to the asset root
    pub fn file_name(self) -> String {
        match self {
            SpriteId::Backdrop => "backdrop.jpg".to_string(),
            SpriteId::ScoreBar => "score.png".to_string(),
            SpriteId::Platform(FadeStage::Full) => "100.png".to_string(),
            SpriteId::Platform(FadeStage::ThreeQuarter) => "75.png".to_string(),
            SpriteId::Platform(FadeStage::Quarter) => "25.png".to_string(),
            SpriteId::Enemy(kind) => format!("monst{}.png", kind.index() + 1),
            SpriteId::Player(pose) => match pose {
                PlayerPose::LeftUp => "leftup.png",
                PlayerPose::LeftDown => "leftdown.png",
                PlayerPose::RightUp => "rightup.png",
                PlayerPose::RightDown => "rightdown.png",
                PlayerPose::UpUp => "upup.png",
                PlayerPose::UpDown => "updown.png",
            }
            .to_string(),
            SpriteId::Nose => "nose.png".to_string(),
            SpriteId::Projectile => "projectile.png".to_string(),
            SpriteId::Digit(d) => format!("{}.png", d.min(9)),
        }
    }
}

/// Loaded sprite handles, indexed by [`SpriteId`]
#[derive(Debug, Clone)]
pub struct SpriteSheet {
    table: [Option<SpriteHandle>; SPRITE_COUNT],
}

impl Default for SpriteSheet {
    fn default() -> Self {
        Self::empty()
    }
}

impl SpriteSheet {
    /// A sheet with nothing loaded; every draw is a no-op
    pub fn empty() -> Self {
        Self {
            table: [None; SPRITE_COUNT],
        }
    }

    /// Load every sprite from `asset_root`, logging (not failing on) misses
    pub fn load(loader: &mut dyn SpriteLoader, asset_root: &Path) -> Self {
        let mut sheet = Self::empty();
        for id in SpriteId::all() {
            let path = asset_root.join(id.file_name());
            match loader.load(&path) {
                Ok(handle) => sheet.insert(id, handle),
                Err(e) => log::warn!("{e}; {id:?} will not be drawn"),
            }
        }
        log::info!(
            "Loaded {}/{} sprites from {}",
            SPRITE_COUNT - sheet.missing().count(),
            SPRITE_COUNT,
            asset_root.display()
        );
        sheet
    }

    pub fn insert(&mut self, id: SpriteId, handle: SpriteHandle) {
        self.table[id.index()] = Some(handle);
    }

    pub fn get(&self, id: SpriteId) -> Option<SpriteHandle> {
        self.table[id.index()]
    }

    /// Ids with no loaded handle
    pub fn missing(&self) -> impl Iterator<Item = SpriteId> + '_ {
        SpriteId::all().filter(|id| self.get(*id).is_none())
    }

    pub fn draw(&self, renderer: &mut dyn Renderer, id: SpriteId, pos: Vec2) {
        if let Some(handle) = self.get(id) {
            renderer.draw_sprite(handle, pos.x as i32, pos.y as i32);
        }
    }

    pub fn draw_rotated(&self, renderer: &mut dyn Renderer, id: SpriteId, pos: Vec2, angle: f32) {
        if let Some(handle) = self.get(id) {
            renderer.draw_sprite_rotated(handle, pos.x as i32, pos.y as i32, angle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{HeadlessLoader, HeadlessRenderer};
    use std::collections::HashSet;

    #[test]
    fn test_indices_cover_table_exactly() {
        let indices: HashSet<usize> = SpriteId::all().map(SpriteId::index).collect();
        assert_eq!(indices.len(), SPRITE_COUNT);
        assert!(indices.iter().all(|&i| i < SPRITE_COUNT));
        assert_eq!(SpriteId::all().count(), SPRITE_COUNT);
    }

    #[test]
    fn test_ids_usable_as_set_keys() {
        let ids: HashSet<SpriteId> = SpriteId::all().collect();
        assert_eq!(ids.len(), SPRITE_COUNT);
        assert!(ids.contains(&SpriteId::Platform(FadeStage::Quarter)));
        assert!(ids.contains(&SpriteId::Enemy(EnemyKind::Tall)));
        assert!(ids.contains(&SpriteId::Player(PlayerPose::ALL[0])));
        assert!(!ids.contains(&SpriteId::Digit(10)));
    }

    #[test]
    fn test_file_names() {
        assert_eq!(SpriteId::Enemy(EnemyKind::Tall).file_name(), "monst3.png");
        assert_eq!(SpriteId::Digit(7).file_name(), "7.png");
        assert_eq!(SpriteId::Player(PlayerPose::UpDown).file_name(), "updown.png");
        assert_eq!(SpriteId::Platform(FadeStage::ThreeQuarter).file_name(), "75.png");
    }

    #[test]
    fn test_load_all() {
        let mut loader = HeadlessLoader::new();
        let sheet = SpriteSheet::load(&mut loader, Path::new("material"));
        assert_eq!(sheet.missing().count(), 0);
        assert_eq!(loader.loaded().len(), SPRITE_COUNT);
        assert!(loader.loaded().contains(&PathBuf::from("material/nose.png")));
    }

    #[test]
    fn test_missing_sprite_draws_nothing() {
        let mut loader = HeadlessLoader::new().failing_on("nose.png");
        let sheet = SpriteSheet::load(&mut loader, Path::new("material"));
        assert_eq!(sheet.missing().collect::<Vec<_>>(), vec![SpriteId::Nose]);

        let mut renderer = HeadlessRenderer::new(600.0, 800.0);
        sheet.draw_rotated(&mut renderer, SpriteId::Nose, Vec2::new(10.0, 10.0), 45.0);
        assert!(renderer.draws().is_empty());

        sheet.draw(&mut renderer, SpriteId::Projectile, Vec2::new(10.7, 20.2));
        assert_eq!(renderer.draws().len(), 1);
        assert_eq!((renderer.draws()[0].x, renderer.draws()[0].y), (10, 20));
    }
}
