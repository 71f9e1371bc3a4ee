/// Presentation layer. Turns a `GameState` into drawing calls.
///
/// Every function receives a `Renderer` and an immutable view of the game
/// state. No game logic is performed here and nothing flows back into the
/// simulation.

use std::io;

use crossterm::style::Color;
use glam::Vec2;

use crate::assets::{Assets, Sprite};
use crate::compute::{countdown_remaining, elapsed_ms};
use crate::constants::{GUN_OFFSET, PROJECTILE_RADIUS};
use crate::entities::{Entity, GameState, GameStatus, Player};
use crate::geometry::Rect;
use crate::maps::MapId;

/// Drawing surface the presentation layer targets. Coordinates are world
/// units; implementations map them onto whatever device they drive.
pub trait Renderer {
    fn clear(&mut self, color: Color);
    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn stroke_rect(&mut self, rect: Rect, color: Color, width: i32);
    fn line(&mut self, from: Vec2, to: Vec2, color: Color);
    fn circle(&mut self, center: Vec2, radius: f32, color: Color);
    fn blit(&mut self, sprite: &Sprite, top_left: Vec2);
    /// Draw `sprite` rotated counter-clockwise by `degrees`, centred on `center`.
    fn blit_rotated(&mut self, sprite: &Sprite, center: Vec2, degrees: f32);
    fn text(&mut self, text: &str, at: Vec2, color: Color);
    /// Push the finished frame to the device.
    fn present(&mut self) -> io::Result<()>;
}

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BACKGROUND: Color = Color::Black;
const C_BORDER: Color = Color::White;
const C_WALL: Color = Color::White;
const C_AIM: Color = Color::Red;
const C_PROJECTILE: Color = Color::White;
const C_HUD: Color = Color::White;
const C_WIN: Color = Color::Green;
const C_LOSS: Color = Color::Red;
const C_COUNTDOWN: Color = Color::Red;
const C_MENU: Color = Color::White;

const BORDER_WIDTH: i32 = 2;
const HUD_POS: Vec2 = Vec2::new(20.0, 20.0);
const BANNER_POS: Vec2 = Vec2::new(300.0, 350.0);
const COUNTDOWN_POS: Vec2 = Vec2::new(500.0, 300.0);

// ── Text ─────────────────────────────────────────────────────────────────────

fn seconds(ms: u64) -> f64 {
    ms as f64 / 1000.0
}

pub fn hud_text(state: &GameState, now: u64) -> String {
    format!(
        "Ammo: {}  Time: {:.2}s",
        state.player.ammo,
        seconds(elapsed_ms(state, now))
    )
}

pub fn win_text(time_ms: u64) -> String {
    format!(
        "You win! Time: {:.2}s - Press R to restart",
        seconds(time_ms)
    )
}

pub const LOSS_TEXT: &str = "Game over - Press R to restart";

/// Whole seconds left on the countdown, rounded up; `None` once it is over.
pub fn countdown_digit(state: &GameState, now: u64) -> Option<u64> {
    let remain = countdown_remaining(state, now);
    (remain > 0).then(|| remain.div_ceil(1000))
}

// ── Public entry points ───────────────────────────────────────────────────────

/// Render one complete frame.
pub fn draw_frame<R: Renderer>(
    r: &mut R,
    state: &GameState,
    assets: &Assets,
    now: u64,
) -> io::Result<()> {
    r.clear(C_BACKGROUND);
    r.stroke_rect(Rect::play_area(), C_BORDER, BORDER_WIDTH);

    for wall in state.walls() {
        r.fill_rect(*wall, C_WALL);
    }
    for entity in state.entities() {
        draw_entity(r, entity, state, assets);
    }

    r.text(&hud_text(state, now), HUD_POS, C_HUD);

    match (state.status(), state.win_time) {
        (GameStatus::Won, Some(time)) => r.text(&win_text(time), BANNER_POS, C_WIN),
        (GameStatus::Lost, _) => r.text(LOSS_TEXT, BANNER_POS, C_LOSS),
        _ => {}
    }
    if let Some(digit) = countdown_digit(state, now) {
        r.text(&digit.to_string(), COUNTDOWN_POS, C_COUNTDOWN);
    }

    r.present()
}

/// The map selection screen.
pub fn draw_map_menu<R: Renderer>(r: &mut R) -> io::Result<()> {
    r.clear(C_BACKGROUND);
    for (i, map) in MapId::ALL.iter().enumerate() {
        let line = format!("{}: {}", map.key(), map.label());
        r.text(&line, Vec2::new(50.0, 100.0 + i as f32 * 50.0), C_MENU);
    }
    r.present()
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_entity<R: Renderer>(r: &mut R, entity: Entity<'_>, state: &GameState, assets: &Assets) {
    match entity {
        Entity::Player(player) => draw_player(r, player, state, assets),
        Entity::Enemy(enemy) => {
            let sprite = if enemy.hit {
                &assets.target_hit
            } else {
                &assets.target
            };
            r.blit(sprite, top_left(&enemy.rect));
        }
        Entity::Projectile(projectile) => {
            let center = projectile.pos.trunc();
            r.circle(center, PROJECTILE_RADIUS, C_PROJECTILE);
        }
    }
}

fn draw_player<R: Renderer>(r: &mut R, player: &Player, state: &GameState, assets: &Assets) {
    let start = player.rect.center_vec();
    let end = player.aim_point(state.pointer, state.walls());
    r.line(start, end, C_AIM);
    r.blit(&assets.player, top_left(&player.rect));

    let degrees = player.gun_angle_degrees(state.pointer);
    // Screen y points down, so a counter-clockwise angle flips the y offset.
    let offset = Vec2::from_angle(-degrees.to_radians()).rotate(Vec2::new(GUN_OFFSET, 0.0));
    r.blit_rotated(&assets.gun, start + offset, degrees);
}

fn top_left(rect: &Rect) -> Vec2 {
    Vec2::new(rect.x as f32, rect.y as f32)
}
