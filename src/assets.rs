//! Sprites and sound.
//!
//! Assets are loaded once at startup through an [`AssetLoader`] and handed to
//! the session and presentation layer; nothing here is global. A failed load
//! is fatal.

use std::fmt;
use std::io::{stdout, IsTerminal, Write};

use crossterm::style::Color;

use crate::constants::{ENEMY_SIZE, GUN_SIZE, PLAYER_SIZE};

/// A drawable image. `glyphs` holds one frame per rotation step, evenly
/// spaced counter-clockwise from 0° (pointing right); a single glyph means
/// the sprite looks the same at every angle.
#[derive(Clone, Debug, PartialEq)]
pub struct Sprite {
    pub name: &'static str,
    pub glyphs: Vec<char>,
    pub color: Color,
    /// Size in world units.
    pub width: i32,
    pub height: i32,
}

impl Sprite {
    pub fn glyph(&self) -> char {
        self.glyphs[0]
    }

    /// Frame closest to `degrees`.
    pub fn glyph_at(&self, degrees: f32) -> char {
        let steps = self.glyphs.len();
        let step = 360.0 / steps as f32;
        let index = (degrees.rem_euclid(360.0) / step).round() as usize % steps;
        self.glyphs[index]
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Assets {
    pub player: Sprite,
    pub target: Sprite,
    pub target_hit: Sprite,
    pub gun: Sprite,
}

/// Fire-and-forget sound effect.
pub trait SoundEffect {
    fn play(&mut self);
}

pub trait AssetLoader {
    type Sound: SoundEffect;

    fn load_sprites(&self) -> Result<Assets, AssetError>;
    fn load_shot_sound(&self) -> Result<Self::Sound, AssetError>;
}

#[derive(Debug)]
pub enum AssetError {
    EmptySprite(&'static str),
    BadSize {
        name: &'static str,
        width: i32,
        height: i32,
    },
    NoAudioDevice,
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetError::EmptySprite(name) => write!(f, "sprite '{}' has no glyphs", name),
            AssetError::BadSize {
                name,
                width,
                height,
            } => write!(f, "sprite '{}' has invalid size {}x{}", name, width, height),
            AssetError::NoAudioDevice => write!(f, "stdout is not a terminal, cannot ring bell"),
        }
    }
}

impl std::error::Error for AssetError {}

// ── Terminal assets ──────────────────────────────────────────────────────────

/// Built-in glyph sprites and the terminal bell.
#[derive(Debug, Default)]
pub struct GlyphAssets;

fn sprite(
    name: &'static str,
    glyphs: &str,
    color: Color,
    (width, height): (i32, i32),
) -> Result<Sprite, AssetError> {
    let glyphs: Vec<char> = glyphs.chars().collect();
    if glyphs.is_empty() {
        return Err(AssetError::EmptySprite(name));
    }
    if width <= 0 || height <= 0 {
        return Err(AssetError::BadSize {
            name,
            width,
            height,
        });
    }
    Ok(Sprite {
        name,
        glyphs,
        color,
        width,
        height,
    })
}

impl AssetLoader for GlyphAssets {
    type Sound = Bell;

    fn load_sprites(&self) -> Result<Assets, AssetError> {
        let assets = Assets {
            player: sprite("player", "@", Color::Cyan, (PLAYER_SIZE, PLAYER_SIZE))?,
            target: sprite("red_target", "◎", Color::Red, (ENEMY_SIZE, ENEMY_SIZE))?,
            target_hit: sprite("green_target", "✓", Color::Green, (ENEMY_SIZE, ENEMY_SIZE))?,
            gun: sprite("gun", "─╱│╲─╱│╲", Color::Grey, GUN_SIZE)?,
        };
        log::debug!("Loaded sprites: {:?}", assets);
        Ok(assets)
    }

    fn load_shot_sound(&self) -> Result<Bell, AssetError> {
        if !stdout().is_terminal() {
            return Err(AssetError::NoAudioDevice);
        }
        Ok(Bell)
    }
}

/// Rings the terminal bell.
#[derive(Debug)]
pub struct Bell;

impl SoundEffect for Bell {
    fn play(&mut self) {
        let mut out = stdout();
        // A missed bell is not worth interrupting play for.
        let _ = out.write_all(b"\x07").and_then(|_| out.flush());
    }
}
