use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

use shooting_range::compute::*;
use shooting_range::entities::*;
use shooting_range::geometry::{collides, Rect};
use shooting_range::input::FrameInput;
use shooting_range::maps::MapId;

const DT: f32 = 1.0 / 60.0;
const FRAME_MS: u64 = 16;
/// First instant at which the countdown has fully elapsed.
const PLAY: u64 = 3000;

/// Map 3 with five targets placed on clear lines of fire from the spawn
/// point (player centre is (107, 307)).
fn make_state() -> GameState {
    GameState {
        map: MapId::Three,
        player: Player::default(),
        enemies: vec![
            Enemy::new(200, 297), // right
            Enemy::new(97, 100),  // up
            Enemy::new(97, 600),  // down
            Enemy::new(20, 297),  // left
            Enemy::new(240, 390), // down-right
        ],
        projectiles: Vec::new(),
        pointer: Vec2::ZERO,
        countdown_start: 0,
        play_start: None,
        win_time: None,
        game_over: false,
    }
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn idle() -> FrameInput {
    FrameInput::default()
}

fn fire_at(x: f32, y: f32) -> FrameInput {
    FrameInput {
        fire: true,
        pointer: Vec2::new(x, y),
        ..FrameInput::default()
    }
}

/// Run `frames` ticks with the same input, advancing the clock.
fn run(state: GameState, input: &FrameInput, now: &mut u64, frames: usize) -> (GameState, Vec<FrameEvent>) {
    let mut state = state;
    let mut all = Vec::new();
    for _ in 0..frames {
        let (next, events) = tick(&state, input, *now, DT);
        state = next;
        all.extend(events);
        *now += FRAME_MS;
    }
    (state, all)
}

// ── init_state ────────────────────────────────────────────────────────────────

#[test]
fn init_state_fresh_session() {
    let s = init_state(MapId::One, 1234, &mut seeded_rng());
    assert_eq!(s.map, MapId::One);
    assert_eq!(s.player.ammo, 100);
    assert_eq!(s.enemies.len(), 5);
    assert!(s.enemies.iter().all(|e| !e.hit));
    assert!(s.projectiles.is_empty());
    assert_eq!(s.countdown_start, 1234);
    assert_eq!(s.play_start, None);
    assert_eq!(s.win_time, None);
    assert!(!s.game_over);
    assert_eq!(s.status(), GameStatus::CountingDown);
}

#[test]
fn init_state_targets_clear_of_walls_and_on_screen() {
    for map in MapId::ALL {
        for seed in 0..20 {
            let s = init_state(map, 0, &mut StdRng::seed_from_u64(seed));
            for e in &s.enemies {
                assert!(!collides(&e.rect, map.walls()));
                assert_eq!(e.rect.clamped_within(&Rect::play_area()), e.rect);
                assert_eq!((e.rect.w, e.rect.h), (20, 20));
            }
        }
    }
}

#[test]
fn init_state_is_deterministic_for_a_seed() {
    let a = init_state(MapId::Two, 0, &mut seeded_rng());
    let b = init_state(MapId::Two, 0, &mut seeded_rng());
    assert_eq!(a.enemies, b.enemies);
}

// ── Countdown ─────────────────────────────────────────────────────────────────

#[test]
fn countdown_suppresses_gameplay() {
    let s = make_state();
    let input = FrameInput {
        right: true,
        fire: true,
        pointer: Vec2::new(500.0, 500.0),
        ..FrameInput::default()
    };
    let (s2, events) = tick(&s, &input, 1000, DT);
    assert!(events.is_empty());
    assert_eq!(s2.player.rect, s.player.rect);
    assert_eq!(s2.player.ammo, 100);
    assert!(s2.projectiles.is_empty());
    assert_eq!(s2.play_start, None);
    // The pointer is still tracked for the aim line.
    assert_eq!(s2.pointer, Vec2::new(500.0, 500.0));
}

#[test]
fn play_starts_when_countdown_elapses() {
    let s = make_state();
    let (s2, _) = tick(&s, &idle(), PLAY - 1, DT);
    assert_eq!(s2.status(), GameStatus::CountingDown);
    let (s3, _) = tick(&s2, &idle(), PLAY, DT);
    assert_eq!(s3.status(), GameStatus::Playing);
    assert_eq!(s3.play_start, Some(PLAY));
    let (s4, _) = tick(&s3, &idle(), PLAY + 500, DT);
    assert_eq!(s4.play_start, Some(PLAY));
}

#[test]
fn countdown_remaining_and_elapsed() {
    let mut s = make_state();
    assert_eq!(countdown_remaining(&s, 0), 3000);
    assert_eq!(countdown_remaining(&s, 2500), 500);
    assert_eq!(countdown_remaining(&s, 9000), 0);
    assert_eq!(elapsed_ms(&s, 9000), 0);
    s.play_start = Some(3000);
    assert_eq!(elapsed_ms(&s, 4250), 1250);
    s.win_time = Some(700);
    assert_eq!(elapsed_ms(&s, 99_000), 700);
}

// ── Movement & firing in play ─────────────────────────────────────────────────

#[test]
fn movement_applies_after_countdown() {
    let input = FrameInput {
        down: true,
        ..FrameInput::default()
    };
    let (s, _) = tick(&make_state(), &input, PLAY, DT);
    assert_eq!(s.player.rect.y, 303);
}

#[test]
fn firing_spawns_projectile_and_reports_shot() {
    let (s, events) = tick(&make_state(), &fire_at(107.0, 0.0), PLAY, DT);
    assert_eq!(s.player.ammo, 99);
    assert_eq!(s.projectiles.len(), 1);
    assert_eq!(events, vec![FrameEvent::ShotFired]);
}

#[test]
fn holding_fire_respects_cooldown() {
    let mut now = PLAY;
    // 10 frames * 16 ms = 160 ms → shots at 0 ms and 112 ms (first frame ≥ 100).
    let (s, events) = run(make_state(), &fire_at(107.0, 0.0), &mut now, 10);
    let shots = events.iter().filter(|e| **e == FrameEvent::ShotFired).count();
    assert_eq!(shots, 2);
    assert_eq!(s.player.ammo, 98);
}

#[test]
fn firing_with_no_ammo_does_nothing() {
    let mut s = make_state();
    s.player.ammo = 0;
    let (s2, events) = tick(&s, &fire_at(500.0, 500.0), PLAY, DT);
    assert!(s2.projectiles.is_empty());
    assert_eq!(s2.player.ammo, 0);
    assert!(!events.contains(&FrameEvent::ShotFired));
}

// ── Projectile lifecycle ──────────────────────────────────────────────────────

#[test]
fn projectile_outside_bounds_is_culled_before_integration() {
    let mut s = make_state();
    s.projectiles.push(Projectile::new(Vec2::new(1085.0, 10.0), 0.0));
    s.projectiles.push(Projectile::new(Vec2::new(10.0, 10.0), 0.0));
    let (s2, _) = tick(&s, &idle(), PLAY, DT);
    assert_eq!(s2.projectiles.len(), 1);
    assert!(s2.projectiles[0].pos.x > 10.0);
}

#[test]
fn projectile_inside_wall_is_culled() {
    let mut s = make_state();
    // Map 3 wall at (300, 300, 500, 30)
    s.projectiles.push(Projectile::new(Vec2::new(400.0, 310.0), 0.0));
    let (s2, _) = tick(&s, &idle(), PLAY, DT);
    assert!(s2.projectiles.is_empty());
}

#[test]
fn projectile_leaving_bounds_is_removed_next_update() {
    let mut s = make_state();
    s.projectiles.push(Projectile::new(Vec2::new(1075.0, 10.0), 0.0));
    let (s2, _) = tick(&s, &idle(), PLAY, DT);
    assert_eq!(s2.projectiles.len(), 1);
    assert!(s2.projectiles[0].pos.x >= 1080.0);
    let (s3, _) = tick(&s2, &idle(), PLAY + FRAME_MS, DT);
    assert!(s3.projectiles.is_empty());
}

// ── Hits ──────────────────────────────────────────────────────────────────────

#[test]
fn projectile_marks_enemy_hit_once() {
    let mut s = make_state();
    s.projectiles.push(Projectile::new(Vec2::new(205.0, 300.0), 0.0));
    let (s2, events) = tick(&s, &idle(), PLAY, DT);
    assert!(s2.enemies[0].hit);
    assert_eq!(events, vec![FrameEvent::EnemyHit { index: 0 }]);

    // Nothing un-hits a target, and it is never reported twice.
    let mut now = PLAY + FRAME_MS;
    let (s3, events) = run(s2, &idle(), &mut now, 30);
    assert!(s3.enemies[0].hit);
    assert!(!events.contains(&FrameEvent::EnemyHit { index: 0 }));
}

#[test]
fn projectile_passes_through_to_next_target() {
    let mut s = make_state();
    s.enemies = vec![
        Enemy::new(150, 600),
        Enemy::new(200, 600),
        Enemy::new(600, 100),
    ];
    s.projectiles.push(Projectile::new(Vec2::new(120.0, 605.0), 0.0));
    let mut now = PLAY;
    let (s2, _) = run(s, &idle(), &mut now, 10);
    assert!(s2.enemies[0].hit);
    assert!(s2.enemies[1].hit);
    assert!(!s2.enemies[2].hit);
    assert_eq!(s2.status(), GameStatus::Playing);
}

// ── Outcomes ──────────────────────────────────────────────────────────────────

#[test]
fn five_shots_five_targets_wins() {
    let targets = [
        (210.0, 307.0),
        (107.0, 110.0),
        (107.0, 610.0),
        (30.0, 307.0),
        (250.0, 400.0),
    ];
    let mut state = make_state();
    let mut now = PLAY;
    let mut events = Vec::new();
    for (x, y) in targets {
        let (s, ev) = run(state, &fire_at(x, y), &mut now, 1);
        events.extend(ev);
        // Let the shot fly until it leaves the field or hits a wall.
        let (s, ev) = run(s, &FrameInput { pointer: Vec2::new(x, y), ..idle() }, &mut now, 120);
        events.extend(ev);
        assert!(s.projectiles.is_empty());
        state = s;
    }

    assert!(state.enemies.iter().all(|e| e.hit));
    assert_eq!(state.player.ammo, 95);
    assert!(!state.game_over);
    assert_eq!(state.status(), GameStatus::Won);
    let win = state.win_time.expect("win time recorded");
    assert!(win > 0 && win < now - PLAY);
    assert_eq!(
        events.iter().filter(|e| matches!(e, FrameEvent::Won { .. })).count(),
        1
    );
}

#[test]
fn win_time_is_frozen() {
    let mut s = make_state();
    for e in &mut s.enemies {
        e.hit = true;
    }
    let (s2, events) = tick(&s, &idle(), PLAY + 1000, DT);
    assert_eq!(s2.win_time, Some(0));
    assert_eq!(events, vec![FrameEvent::Won { time_ms: 0 }]);

    let (s3, events) = tick(&s2, &fire_at(500.0, 500.0), PLAY + 5000, DT);
    let (s4, _) = tick(&s3, &idle(), PLAY + 9000, DT);
    assert!(events.is_empty());
    assert_eq!(s4.win_time, Some(0));
    assert_eq!(s4.player.ammo, 100);
}

#[test]
fn walking_into_standing_target_loses() {
    let mut s = make_state();
    s.player.rect = Rect::new(200, 297, 15, 15);
    let (s2, events) = tick(&s, &idle(), PLAY, DT);
    assert!(s2.game_over);
    assert_eq!(s2.status(), GameStatus::Lost);
    assert!(events.contains(&FrameEvent::Lost));

    let mut now = PLAY + FRAME_MS;
    let moving = FrameInput {
        left: true,
        ..idle()
    };
    let (s3, events) = run(s2, &moving, &mut now, 30);
    assert!(s3.game_over);
    assert!(events.is_empty());
    assert_eq!(s3.player.rect, Rect::new(200, 297, 15, 15));
}

#[test]
fn touching_a_hit_target_is_harmless() {
    let mut s = make_state();
    s.enemies[0].hit = true;
    s.player.rect = Rect::new(200, 297, 15, 15);
    let (s2, _) = tick(&s, &idle(), PLAY, DT);
    assert!(!s2.game_over);
}

#[test]
fn tick_does_not_mutate_original() {
    let s = make_state();
    let _ = tick(&s, &fire_at(500.0, 500.0), PLAY, DT);
    assert_eq!(s.player.ammo, 100);
    assert!(s.projectiles.is_empty());
    assert_eq!(s.play_start, None);
}
