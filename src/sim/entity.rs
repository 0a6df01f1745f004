//! Entity model: the movable body shared by every world object and the four
//! concrete variants (platforms, enemies, projectiles, the player).
//!
//! Positions are screen pixels with y growing downward; every bounding box is
//! anchored at its entity's top-left corner.

use std::time::Duration;

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::aabb_overlap;
use crate::consts::*;
use crate::renderer::{Renderer, SpriteId, SpriteSheet};

/// Position, velocity and liveness shared by all entities
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Inactive bodies are skipped by rendering and pruned on the next cleanup
    pub active: bool,
}

impl Body {
    pub fn at(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            active: true,
        }
    }

    /// Straight-line motion
    #[inline]
    pub fn integrate(&mut self, dt: f32) {
        self.pos += self.vel * dt;
    }
}

/// Per-update context: the visible area and the session's random source
pub struct UpdateEnv<'a> {
    pub screen: Vec2,
    pub rng: &'a mut Pcg32,
}

/// Shared update/render contract
pub trait Entity {
    fn body(&self) -> &Body;
    fn body_mut(&mut self) -> &mut Body;

    /// Collision box size
    fn size(&self) -> Vec2;

    /// Advance physics/state by `dt` seconds
    fn update(&mut self, dt: f32, env: &mut UpdateEnv<'_>);

    /// Draw at the current position (no-op when inactive)
    fn render(&self, renderer: &mut dyn Renderer, sprites: &SpriteSheet);

    fn is_active(&self) -> bool {
        self.body().active
    }

    fn pos(&self) -> Vec2 {
        self.body().pos
    }

    /// AABB overlap using explicit box sizes for both sides
    fn collides_with(&self, other: &dyn Entity, size: Vec2, other_size: Vec2) -> bool {
        aabb_overlap(self.pos(), size, other.pos(), other_size)
    }
}

// ============================================================================
// Platform
// ============================================================================

/// Discrete sprite band for a fading platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FadeStage {
    Full,
    ThreeQuarter,
    Quarter,
}

impl FadeStage {
    pub const ALL: [FadeStage; 3] = [FadeStage::Full, FadeStage::ThreeQuarter, FadeStage::Quarter];

    /// `None` once the platform is fully transparent
    pub fn from_opacity(opacity: f32) -> Option<Self> {
        if opacity > 0.75 {
            Some(FadeStage::Full)
        } else if opacity > 0.25 {
            Some(FadeStage::ThreeQuarter)
        } else if opacity > 0.0 {
            Some(FadeStage::Quarter)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    pub body: Body,
    /// Monotonic per session, never reused
    pub id: u32,
    /// 1.0 (solid) down to 0.0
    pub opacity: f32,
    pub disappearing: bool,
    /// The disappearing roll happens at most once
    pub checked_for_disappearing: bool,
    pub has_enemy: bool,
}

impl Platform {
    pub fn new(id: u32, pos: Vec2) -> Self {
        Self {
            body: Body::at(pos),
            id,
            opacity: 1.0,
            disappearing: false,
            checked_for_disappearing: false,
            has_enemy: false,
        }
    }

    pub fn top(&self) -> f32 {
        self.body.pos.y
    }

    pub fn left(&self) -> f32 {
        self.body.pos.x
    }

    pub fn right(&self) -> f32 {
        self.body.pos.x + PLATFORM_WIDTH
    }

    pub fn fade_stage(&self) -> Option<FadeStage> {
        FadeStage::from_opacity(self.opacity)
    }

    fn in_visible_band(&self, screen_height: f32) -> bool {
        let y = self.body.pos.y;
        y <= screen_height && y >= -DISAPPEAR_CHECK_MARGIN
    }
}

impl Entity for Platform {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn size(&self) -> Vec2 {
        Vec2::new(PLATFORM_WIDTH, PLATFORM_HEIGHT)
    }

    fn update(&mut self, dt: f32, env: &mut UpdateEnv<'_>) {
        if !self.body.active {
            return;
        }

        // Platforms carrying an enemy never vanish from under it
        if !self.checked_for_disappearing && !self.has_enemy && self.in_visible_band(env.screen.y)
        {
            self.checked_for_disappearing = true;
            self.disappearing = env.rng.random_range(0..100) < PLATFORM_DISAPPEARING_CHANCE;
        }

        if self.disappearing {
            self.opacity = (self.opacity - PLATFORM_FADE_SPEED * dt).max(0.0);
            if self.opacity <= 0.0 {
                self.body.active = false;
            }
        }
    }

    fn render(&self, renderer: &mut dyn Renderer, sprites: &SpriteSheet) {
        if !self.body.active {
            return;
        }
        if let Some(stage) = self.fade_stage() {
            sprites.draw(renderer, SpriteId::Platform(stage), self.body.pos);
        }
    }
}

// ============================================================================
// Enemy
// ============================================================================

/// Enemy archetypes, each with a fixed sprite size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    Squat,
    Slim,
    Tall,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 3] = [EnemyKind::Squat, EnemyKind::Slim, EnemyKind::Tall];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    /// Sprite (and projectile hitbox) size
    pub fn size(self) -> Vec2 {
        match self {
            EnemyKind::Squat => Vec2::new(152.0, 111.0),
            EnemyKind::Slim => Vec2::new(71.0, 94.0),
            EnemyKind::Tall => Vec2::new(129.0, 172.0),
        }
    }
}

/// Static obstacle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub body: Body,
    pub kind: EnemyKind,
}

impl Enemy {
    pub fn new(kind: EnemyKind, pos: Vec2) -> Self {
        Self {
            body: Body::at(pos),
            kind,
        }
    }

    /// Standing on a platform whose top-left corner is `platform_pos`,
    /// horizontally centered on it
    pub fn standing_on(kind: EnemyKind, platform_pos: Vec2) -> Self {
        let size = kind.size();
        let pos = Vec2::new(
            platform_pos.x + (PLATFORM_WIDTH - size.x) / 2.0,
            platform_pos.y - size.y,
        );
        Self::new(kind, pos)
    }

    pub fn bottom(&self) -> f32 {
        self.body.pos.y + self.kind.size().y
    }
}

impl Entity for Enemy {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn size(&self) -> Vec2 {
        self.kind.size()
    }

    fn update(&mut self, _dt: f32, _env: &mut UpdateEnv<'_>) {
        if !self.body.active {
            return;
        }
        // Enemies never move once placed
    }

    fn render(&self, renderer: &mut dyn Renderer, sprites: &SpriteSheet) {
        if self.body.active {
            sprites.draw(renderer, SpriteId::Enemy(self.kind), self.body.pos);
        }
    }
}

// ============================================================================
// Projectile
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub body: Body,
    /// Flight direction in radians (rendering only)
    pub angle: f32,
}

impl Projectile {
    /// Fire from `pos` along the unit vector `direction`
    pub fn new(pos: Vec2, direction: Vec2) -> Self {
        let mut body = Body::at(pos);
        body.vel = direction * PROJECTILE_SPEED;
        Self {
            body,
            angle: direction.y.atan2(direction.x),
        }
    }
}

impl Entity for Projectile {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn size(&self) -> Vec2 {
        Vec2::new(PROJECTILE_WIDTH, PROJECTILE_HEIGHT)
    }

    fn update(&mut self, dt: f32, env: &mut UpdateEnv<'_>) {
        self.body.integrate(dt);

        let Vec2 { x, y } = self.body.pos;
        if x < 0.0 || x > env.screen.x || y < 0.0 || y > env.screen.y {
            self.body.active = false;
        }
    }

    fn render(&self, renderer: &mut dyn Renderer, sprites: &SpriteSheet) {
        if self.body.active {
            sprites.draw(renderer, SpriteId::Projectile, self.body.pos);
        }
    }
}

// ============================================================================
// Player
// ============================================================================

/// The six player sprites: facing (left, right, up) x (rising, falling)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerPose {
    LeftUp,
    LeftDown,
    RightUp,
    RightDown,
    UpUp,
    UpDown,
}

impl PlayerPose {
    pub const ALL: [PlayerPose; 6] = [
        PlayerPose::LeftUp,
        PlayerPose::LeftDown,
        PlayerPose::RightUp,
        PlayerPose::RightDown,
        PlayerPose::UpUp,
        PlayerPose::UpDown,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn select(looking_right: bool, looking_up: bool, vel_y: f32) -> Self {
        let falling = vel_y > POSE_FALLING_THRESHOLD;
        match (looking_up, looking_right, falling) {
            (true, _, false) => PlayerPose::UpUp,
            (true, _, true) => PlayerPose::UpDown,
            (false, true, false) => PlayerPose::RightUp,
            (false, true, true) => PlayerPose::RightDown,
            (false, false, false) => PlayerPose::LeftUp,
            (false, false, true) => PlayerPose::LeftDown,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    pub gravity: f32,
    pub looking_right: bool,
    /// Set while the weapon cools down; shows the aiming nose
    pub looking_up: bool,
    /// Nose rotation in degrees, clamped to [-90, 90]
    pub nose_angle: f32,
    pub has_jetpack: bool,
    pub jetpack_remaining: Duration,
    /// Last platform landed on, so repeated bounces on it count once
    pub last_jumped_platform: Option<u32>,
    pub platforms_jumped: u32,
    pub last_shot_at: Option<Duration>,
    pub pose: PlayerPose,
    /// Horizontal speed while a direction key is held
    move_speed: f32,
}

impl Player {
    pub fn new(pos: Vec2, speed_multiplier: f32) -> Self {
        let mut body = Body::at(pos);
        body.vel.y = PLAYER_START_VY;
        Self {
            body,
            gravity: GRAVITY,
            looking_right: true,
            looking_up: false,
            nose_angle: 0.0,
            has_jetpack: false,
            jetpack_remaining: Duration::ZERO,
            last_jumped_platform: None,
            platforms_jumped: 0,
            last_shot_at: None,
            pose: PlayerPose::RightUp,
            move_speed: speed_multiplier * BASE_PLAYER_SPEED,
        }
    }

    pub fn move_speed(&self) -> f32 {
        self.move_speed
    }

    pub fn move_left(&mut self) {
        self.body.vel.x = -self.move_speed;
        self.looking_right = false;
    }

    pub fn move_right(&mut self) {
        self.body.vel.x = self.move_speed;
        self.looking_right = true;
    }

    pub fn stop(&mut self) {
        self.body.vel.x = 0.0;
    }

    pub fn jump(&mut self) {
        self.body.vel.y = JUMP_FORCE;
    }

    pub fn bottom(&self) -> f32 {
        self.body.pos.y + PLAYER_HEIGHT
    }

    pub fn center(&self) -> Vec2 {
        self.body.pos + Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT) / 2.0
    }

    /// Record a bounce on `platform_id`; returns true when it is a new platform
    pub fn register_landing(&mut self, platform_id: u32) -> bool {
        if self.last_jumped_platform == Some(platform_id) {
            return false;
        }
        self.last_jumped_platform = Some(platform_id);
        self.platforms_jumped += 1;
        true
    }

    /// Whether the weapon is still cooling down at `now`
    pub fn in_cooldown(&self, now: Duration) -> bool {
        self.last_shot_at
            .is_some_and(|shot| now.saturating_sub(shot) < PROJECTILE_COOLDOWN)
    }

    fn nose_position(&self) -> Vec2 {
        let mut nose = Vec2::new(
            self.body.pos.x + (PLAYER_FULL_WIDTH - PROJECTILE_WIDTH) / 2.0 - 3.0,
            self.body.pos.y + 3.0,
        );
        if self.pose == PlayerPose::UpDown {
            nose.y += 6.0;
        }
        nose
    }
}

impl Entity for Player {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn size(&self) -> Vec2 {
        Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT)
    }

    fn update(&mut self, dt: f32, env: &mut UpdateEnv<'_>) {
        if !self.has_jetpack {
            self.body.vel.y = (self.body.vel.y + self.gravity * dt).min(MAX_FALL_SPEED);
        }

        self.body.integrate(dt);
        self.body.pos.x = self.body.pos.x.min(env.screen.x - PLAYER_WIDTH).max(0.0);

        self.pose = PlayerPose::select(self.looking_right, self.looking_up, self.body.vel.y);
    }

    fn render(&self, renderer: &mut dyn Renderer, sprites: &SpriteSheet) {
        if !self.body.active {
            return;
        }
        sprites.draw(renderer, SpriteId::Player(self.pose), self.body.pos);
        if self.looking_up {
            sprites.draw_rotated(renderer, SpriteId::Nose, self.nose_position(), self.nose_angle);
        }
    }
}
