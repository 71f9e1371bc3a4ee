/// Game entities: plain data plus the small per-entity rules that only
/// touch the entity itself (movement, firing, ballistics, hit tests).

use glam::Vec2;

use crate::constants::{
    ENEMY_SIZE, FIRE_COOLDOWN_MS, PLAYER_AMMO, PLAYER_SIZE, PLAYER_SPAWN, PLAYER_SPEED,
    PROJECTILE_BOX, PROJECTILE_SPEED,
};
use crate::geometry::{collides, Rect};
use crate::input::FrameInput;
use crate::maps::MapId;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    CountingDown,
    Playing,
    Won,
    Lost,
}

impl GameStatus {
    pub fn is_ended(self) -> bool {
        matches!(self, GameStatus::Won | GameStatus::Lost)
    }
}

// ── Player ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Player {
    pub rect: Rect,
    pub speed: f32,
    pub ammo: u32,
    /// Timestamp of the last shot; `None` until the first one.
    pub last_shot: Option<u64>,
    pub cooldown: u64,
}

impl Default for Player {
    fn default() -> Self {
        Player {
            rect: Rect::new(PLAYER_SPAWN.0, PLAYER_SPAWN.1, PLAYER_SIZE, PLAYER_SIZE),
            speed: PLAYER_SPEED,
            ammo: PLAYER_AMMO,
            last_shot: None,
            cooldown: FIRE_COOLDOWN_MS,
        }
    }
}

impl Player {
    /// Apply one frame of WASD movement. Each axis is resolved on its own so
    /// the player slides along a wall instead of sticking to it. Diagonals
    /// are not normalised.
    pub fn move_by(&mut self, input: &FrameInput, walls: &[Rect], dt: f32) {
        let step = self.speed * dt;
        let mut dx = 0.0;
        let mut dy = 0.0;
        if input.left {
            dx -= step;
        }
        if input.right {
            dx += step;
        }
        if input.up {
            dy -= step;
        }
        if input.down {
            dy += step;
        }

        let x = self.rect.x;
        self.rect.x += dx as i32;
        if collides(&self.rect, walls) {
            self.rect.x = x;
        }

        let y = self.rect.y;
        self.rect.y += dy as i32;
        if collides(&self.rect, walls) {
            self.rect.y = y;
        }

        self.rect = self.rect.clamped_within(&Rect::play_area());
    }

    pub fn can_shoot(&self, now: u64) -> bool {
        let cooled = match self.last_shot {
            Some(last) => now.saturating_sub(last) >= self.cooldown,
            None => true,
        };
        cooled && self.ammo > 0
    }

    /// Fire towards `pointer`. Nothing changes if `can_shoot` is false.
    pub fn shoot(&mut self, now: u64, pointer: Vec2) -> Option<Projectile> {
        if !self.can_shoot(now) {
            return None;
        }
        self.last_shot = Some(now);
        self.ammo -= 1;
        let origin = self.rect.center_vec();
        let aim = pointer - origin;
        Some(Projectile::new(origin, aim.y.atan2(aim.x)))
    }

    /// End point of the aim line: the pointer, or the first point on the
    /// way there that lies inside a wall.
    pub fn aim_point(&self, pointer: Vec2, walls: &[Rect]) -> Vec2 {
        let start = self.rect.center_vec();
        let delta = pointer - start;
        let dist = delta.length();
        if dist == 0.0 {
            return pointer;
        }
        for i in 0..dist as i32 {
            let p = start + delta * (i as f32 / dist);
            if collides(&Rect::at_point(p, 1, 1), walls) {
                return p;
            }
        }
        pointer
    }

    /// Gun orientation in degrees, counter-clockwise with screen y pointing
    /// down. Uses the untruncated direction to the pointer.
    pub fn gun_angle_degrees(&self, pointer: Vec2) -> f32 {
        let delta = pointer - self.rect.center_vec();
        (-delta.y).atan2(delta.x).to_degrees()
    }
}

// ── Targets ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub rect: Rect,
    /// One-way: once set, nothing clears it until the next session.
    pub hit: bool,
}

impl Enemy {
    pub fn new(x: i32, y: i32) -> Self {
        Enemy {
            rect: Rect::new(x, y, ENEMY_SIZE, ENEMY_SIZE),
            hit: false,
        }
    }
}

// ── Projectiles ──────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
}

impl Projectile {
    /// `angle` is in radians, screen y pointing down.
    pub fn new(pos: Vec2, angle: f32) -> Self {
        Projectile {
            pos,
            vel: Vec2::new(angle.cos(), angle.sin()) * PROJECTILE_SPEED,
        }
    }

    /// Explicit Euler step. No sub-stepping: a fast shot can skip a thin wall.
    pub fn update(&mut self, dt: f32) {
        self.pos += self.vel * dt;
    }

    pub fn hitbox(&self) -> Rect {
        Rect::at_point(self.pos, PROJECTILE_BOX, PROJECTILE_BOX)
    }

    pub fn hits(&self, rect: &Rect) -> bool {
        self.hitbox().intersects(rect)
    }

    /// Still inside the play surface and not buried in a wall.
    pub fn survives(&self, walls: &[Rect]) -> bool {
        Rect::play_area().contains_point(self.pos) && !collides(&self.hitbox(), walls)
    }
}

// ── Drawable entity kinds ────────────────────────────────────────────────────

/// The closed set of things the presentation layer draws per entity.
#[derive(Clone, Copy, Debug)]
pub enum Entity<'a> {
    Player(&'a Player),
    Enemy(&'a Enemy),
    Projectile(&'a Projectile),
}

// ── Master game state ────────────────────────────────────────────────────────

/// One session's worth of simulation state. Cloneable so `compute::tick`
/// can return a fresh copy without touching the original.
#[derive(Clone, Debug)]
pub struct GameState {
    pub map: MapId,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    /// Last sampled pointer position, in world units.
    pub pointer: Vec2,
    pub countdown_start: u64,
    /// Set on the first update after the countdown elapses.
    pub play_start: Option<u64>,
    /// Milliseconds from `play_start` to the last target going down.
    pub win_time: Option<u64>,
    pub game_over: bool,
}

impl GameState {
    pub fn walls(&self) -> &'static [Rect] {
        self.map.walls()
    }

    pub fn status(&self) -> GameStatus {
        if self.win_time.is_some() {
            GameStatus::Won
        } else if self.game_over {
            GameStatus::Lost
        } else if self.play_start.is_some() {
            GameStatus::Playing
        } else {
            GameStatus::CountingDown
        }
    }

    pub fn all_hit(&self) -> bool {
        self.enemies.iter().all(|e| e.hit)
    }

    /// Draw order: player, then targets, then shots.
    pub fn entities(&self) -> impl Iterator<Item = Entity<'_>> {
        std::iter::once(Entity::Player(&self.player))
            .chain(self.enemies.iter().map(Entity::Enemy))
            .chain(self.projectiles.iter().map(Entity::Projectile))
    }
}
