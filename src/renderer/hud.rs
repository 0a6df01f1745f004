//! Backdrop, score overlay and the game-over screen, drawn with digit sprites

use glam::Vec2;

use super::{Renderer, SpriteId, SpriteSheet};

/// Horizontal advance per digit
pub const DIGIT_ADVANCE: f32 = 20.0;

/// Draw `number` left to right starting at `pos`
pub fn draw_number(renderer: &mut dyn Renderer, sprites: &SpriteSheet, number: u64, pos: Vec2) {
    let mut x = pos.x;
    for digit in number.to_string().bytes().map(|b| b - b'0') {
        sprites.draw(renderer, SpriteId::Digit(digit), Vec2::new(x, pos.y));
        x += DIGIT_ADVANCE;
    }
}

/// Full-screen backdrop and score strip, drawn first every frame
pub fn draw_background(renderer: &mut dyn Renderer, sprites: &SpriteSheet) {
    sprites.draw(renderer, SpriteId::Backdrop, Vec2::ZERO);
    sprites.draw(renderer, SpriteId::ScoreBar, Vec2::ZERO);
}

/// Jump count top-left, score top-right
pub fn draw_overlay(
    renderer: &mut dyn Renderer,
    sprites: &SpriteSheet,
    screen: Vec2,
    score: u64,
    platforms_jumped: u32,
) {
    draw_number(renderer, sprites, platforms_jumped as u64, Vec2::new(20.0, 20.0));
    draw_number(renderer, sprites, score, Vec2::new(screen.x - 100.0, 20.0));
}

/// Blank screen with the final score above the jump count
pub fn draw_game_over(
    renderer: &mut dyn Renderer,
    sprites: &SpriteSheet,
    screen: Vec2,
    score: u64,
    platforms_jumped: u32,
) {
    renderer.clear();

    let mid = screen.y / 2.0;
    sprites.draw(renderer, SpriteId::ScoreBar, Vec2::new(0.0, mid - 10.0));
    sprites.draw(renderer, SpriteId::ScoreBar, Vec2::new(0.0, mid - 77.0));

    let x = (screen.x - 100.0) / 2.0;
    draw_number(renderer, sprites, score, Vec2::new(x, mid - 50.0));
    draw_number(renderer, sprites, platforms_jumped as u64, Vec2::new(x, mid));
}
