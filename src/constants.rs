/// Tuning constants shared by the simulation and the presentation layer.
///
/// All distances are world units (the 1080×720 play surface), all times are
/// milliseconds unless the name says otherwise.

// ── Surface & timing ─────────────────────────────────────────────────────────

pub const WINDOW_WIDTH: i32 = 1080;
pub const WINDOW_HEIGHT: i32 = 720;
pub const WINDOW_TITLE: &str = "Vitaprimo";

pub const FRAME_RATE: u64 = 60;
pub const COUNTDOWN_MS: u64 = 3000;

// ── Player ───────────────────────────────────────────────────────────────────

pub const PLAYER_SPAWN: (i32, i32) = (100, 300);
pub const PLAYER_SIZE: i32 = 15;
/// Units per second along each pressed axis.
pub const PLAYER_SPEED: f32 = 200.0;
pub const PLAYER_AMMO: u32 = 100;
pub const FIRE_COOLDOWN_MS: u64 = 100;

/// Gun sprite is drawn this far from the player centre, along the aim.
pub const GUN_OFFSET: f32 = 10.0;
pub const GUN_SIZE: (i32, i32) = (20, 8);

// ── Targets ──────────────────────────────────────────────────────────────────

pub const ENEMY_SIZE: i32 = 20;
pub const ENEMY_COUNT: usize = 5;

// ── Projectiles ──────────────────────────────────────────────────────────────

pub const PROJECTILE_SPEED: f32 = 700.0;
/// Side of the square used for projectile hit tests.
pub const PROJECTILE_BOX: i32 = 3;
pub const PROJECTILE_RADIUS: f32 = 3.0;
