/// Pure game-logic functions.
///
/// Every public function takes an immutable reference to the current
/// `GameState` (plus the frame's input and clock, or an RNG handle) and
/// returns a brand-new `GameState`. Side effects the frame asks for, such
/// as the firing sound, are reported as `FrameEvent`s for the caller.

use rand::Rng;

use crate::constants::{COUNTDOWN_MS, ENEMY_COUNT, ENEMY_SIZE, WINDOW_HEIGHT, WINDOW_WIDTH};
use crate::entities::{Enemy, GameState, Player};
use crate::geometry::{collides, Rect};
use crate::input::FrameInput;
use crate::maps::MapId;

/// Things that happened during one `tick`.
#[derive(Clone, Debug, PartialEq)]
pub enum FrameEvent {
    ShotFired,
    EnemyHit { index: usize },
    Won { time_ms: u64 },
    Lost,
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build a fresh session on `map`, with the countdown starting at `now`.
pub fn init_state(map: MapId, now: u64, rng: &mut impl Rng) -> GameState {
    let enemies = (0..ENEMY_COUNT)
        .map(|_| spawn_enemy(map.walls(), rng))
        .collect();
    GameState {
        map,
        player: Player::default(),
        enemies,
        projectiles: Vec::new(),
        pointer: Default::default(),
        countdown_start: now,
        play_start: None,
        win_time: None,
        game_over: false,
    }
}

/// Place a target uniformly at random, retrying until it is clear of every
/// wall.
pub fn spawn_enemy(walls: &[Rect], rng: &mut impl Rng) -> Enemy {
    loop {
        let x = rng.gen_range(0..=WINDOW_WIDTH - ENEMY_SIZE);
        let y = rng.gen_range(0..=WINDOW_HEIGHT - ENEMY_SIZE);
        let enemy = Enemy::new(x, y);
        if !collides(&enemy.rect, walls) {
            return enemy;
        }
    }
}

// ── Clock queries ────────────────────────────────────────────────────────────

/// Milliseconds of countdown still to run; 0 once it has elapsed.
pub fn countdown_remaining(state: &GameState, now: u64) -> u64 {
    COUNTDOWN_MS.saturating_sub(now.saturating_sub(state.countdown_start))
}

/// Run time shown on the HUD: 0 before play, frozen once won.
pub fn elapsed_ms(state: &GameState, now: u64) -> u64 {
    match (state.play_start, state.win_time) {
        (_, Some(win)) => win,
        (Some(start), None) => now.saturating_sub(start),
        (None, None) => 0,
    }
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance the simulation by one frame of `dt` seconds at time `now` (ms).
///
/// Nothing but the pointer changes while the countdown runs. Once the game
/// has ended, shots already in flight keep flying but nothing else moves
/// and the outcome is fixed.
pub fn tick(
    state: &GameState,
    input: &FrameInput,
    now: u64,
    dt: f32,
) -> (GameState, Vec<FrameEvent>) {
    let mut next = state.clone();
    let mut events = Vec::new();
    next.pointer = input.pointer;

    if countdown_remaining(state, now) > 0 {
        return (next, events);
    }
    let walls = next.walls();
    if state.status().is_ended() {
        fly_projectiles(&mut next, walls, dt);
        return (next, events);
    }
    let play_start = *next.play_start.get_or_insert(now);

    // ── 1. Movement ──────────────────────────────────────────────────────────
    next.player.move_by(input, walls, dt);

    // ── 2. Firing ────────────────────────────────────────────────────────────
    if input.fire {
        if let Some(projectile) = next.player.shoot(now, next.pointer) {
            next.projectiles.push(projectile);
            events.push(FrameEvent::ShotFired);
        }
    }

    // ── 3. Hits: projectiles ↔ standing targets ──────────────────────────────
    // Shots are not consumed by a hit and carry on to the next target.
    for projectile in &next.projectiles {
        for (index, enemy) in next.enemies.iter_mut().enumerate() {
            if !enemy.hit && projectile.hits(&enemy.rect) {
                enemy.hit = true;
                events.push(FrameEvent::EnemyHit { index });
            }
        }
    }

    // ── 4. Cull, then integrate the survivors ────────────────────────────────
    fly_projectiles(&mut next, walls, dt);

    // ── 5. Outcome ───────────────────────────────────────────────────────────
    if next.all_hit() && next.win_time.is_none() {
        let time_ms = now.saturating_sub(play_start);
        next.win_time = Some(time_ms);
        events.push(FrameEvent::Won { time_ms });
    }

    let player = next.player.rect;
    if next
        .enemies
        .iter()
        .any(|e| !e.hit && player.intersects(&e.rect))
    {
        next.game_over = true;
        events.push(FrameEvent::Lost);
    }

    (next, events)
}

/// Drop shots that left the field or sit in a wall, then advance the rest.
fn fly_projectiles(state: &mut GameState, walls: &[Rect], dt: f32) {
    state.projectiles.retain(|p| p.survives(walls));
    for projectile in &mut state.projectiles {
        projectile.update(dt);
    }
}
