use space_raid::boss::*;
use space_raid::config::GameConfig;
use space_raid::entities::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

const WIDTH: f32 = 40.0;
const HEIGHT: f32 = 20.0;
const SHOT: Size = Size { w: 1.0, h: 1.0 };

fn dims() -> EntityDims {
    EntityDims {
        player: Size { w: 3.0, h: 2.0 },
        grunt: Size { w: 3.0, h: 2.0 },
        boss: Size { w: 7.0, h: 3.0 },
        laser: Size { w: 1.0, h: 1.0 },
        enemy_laser: SHOT,
    }
}

/// Boss at (x, y) with a fixed velocity that will not be redrawn or fire soon.
fn cruising(x: f32, y: f32, vx: f32, vy: f32) -> Boss {
    let mut b = spawn_boss(&GameConfig::default(), &dims(), WIDTH);
    b.rect.x = x;
    b.rect.y = y;
    b.vx = vx;
    b.vy = vy;
    b.move_countdown = 30;
    b.fire_countdown = 30;
    b
}

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

// ── spawn ─────────────────────────────────────────────────────────────────────

#[test]
fn boss_spawns_top_centre_at_full_health() {
    let config = GameConfig::default();
    let b = spawn_boss(&config, &dims(), WIDTH);
    assert!(approx(b.rect.x, 16.5));
    assert!(approx(b.rect.y, 0.0));
    assert!(approx(b.rect.w, 7.0));
    assert!(approx(b.rect.h, 3.0));
    assert_eq!(b.hp, 20);
    assert_eq!(b.max_hp, 20);
    assert_eq!(b.vx, 0.0);
    assert_eq!(b.vy, 0.0);
    assert_eq!(b.fire_countdown, config.boss_fire_interval);
}

#[test]
fn boss_floor_keeps_bottom_in_upper_half() {
    let b = spawn_boss(&GameConfig::default(), &dims(), WIDTH);
    assert!(approx(boss_floor(&b, HEIGHT), 7.0));
    // A play area too short for the boss pins it to the top
    assert!(approx(boss_floor(&b, 4.0), 0.0));
}

// ── movement ──────────────────────────────────────────────────────────────────

#[test]
fn first_update_draws_velocity_within_range() {
    let config = GameConfig::default();
    let b = spawn_boss(&config, &dims(), WIDTH);
    let mut rng = StdRng::seed_from_u64(42);
    let (next, _) = update_boss(&b, WIDTH, HEIGHT, &config, SHOT, &mut rng);
    assert!(next.vx.abs() <= config.boss_speed_x);
    assert!(next.vy.abs() <= config.boss_speed_y);
    assert_eq!(next.move_countdown, config.boss_move_interval);
}

#[test]
fn velocity_is_kept_until_countdown_expires() {
    let config = GameConfig::default();
    let b = cruising(10.0, 2.0, 0.5, 0.1);
    let mut rng = StdRng::seed_from_u64(42);
    let (next, _) = update_boss(&b, WIDTH, HEIGHT, &config, SHOT, &mut rng);
    assert!(approx(next.vx, 0.5));
    assert!(approx(next.vy, 0.1));
    assert!(approx(next.rect.x, 10.5));
    assert!(approx(next.rect.y, 2.1));
    assert_eq!(next.move_countdown, 29);
}

#[test]
fn bounces_off_left_wall() {
    let config = GameConfig::default();
    let b = cruising(0.2, 2.0, -0.5, 0.0);
    let (next, _) = update_boss(&b, WIDTH, HEIGHT, &config, SHOT, &mut StdRng::seed_from_u64(1));
    assert!(approx(next.rect.x, 0.0));
    assert!(approx(next.vx, 0.5));
}

#[test]
fn bounces_off_right_wall() {
    let config = GameConfig::default();
    let b = cruising(32.8, 2.0, 0.5, 0.0);
    let (next, _) = update_boss(&b, WIDTH, HEIGHT, &config, SHOT, &mut StdRng::seed_from_u64(1));
    assert!(approx(next.rect.x, 33.0));
    assert!(approx(next.vx, -0.5));
}

#[test]
fn bounces_off_top() {
    let config = GameConfig::default();
    let b = cruising(10.0, 0.1, 0.0, -0.3);
    let (next, _) = update_boss(&b, WIDTH, HEIGHT, &config, SHOT, &mut StdRng::seed_from_u64(1));
    assert!(approx(next.rect.y, 0.0));
    assert!(approx(next.vy, 0.3));
}

#[test]
fn bounces_off_half_height_floor() {
    let config = GameConfig::default();
    let b = cruising(10.0, 6.9, 0.0, 0.3);
    let (next, _) = update_boss(&b, WIDTH, HEIGHT, &config, SHOT, &mut StdRng::seed_from_u64(1));
    assert!(approx(next.rect.y, 7.0));
    assert!(approx(next.vy, -0.3));
}

#[test]
fn boss_stays_in_bounds_over_many_frames() {
    let config = GameConfig::default();
    let mut boss = spawn_boss(&config, &dims(), WIDTH);
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..1000 {
        let (next, _) = update_boss(&boss, WIDTH, HEIGHT, &config, SHOT, &mut rng);
        boss = next;
        assert!(boss.rect.x >= 0.0 && boss.rect.x + boss.rect.w <= WIDTH);
        assert!(boss.rect.y >= 0.0 && boss.rect.y + boss.rect.h <= HEIGHT / 2.0);
    }
}

// ── firing ────────────────────────────────────────────────────────────────────

#[test]
fn fires_from_bottom_centre_when_timer_expires() {
    let config = GameConfig::default();
    let mut b = cruising(10.0, 2.0, 0.0, 0.0);
    b.fire_countdown = 1;
    let (next, shot) = update_boss(&b, WIDTH, HEIGHT, &config, SHOT, &mut StdRng::seed_from_u64(1));
    let shot = shot.expect("boss fires when its timer runs out");
    assert!(approx(shot.rect.x, 13.0));
    assert!(approx(shot.rect.y, 5.0));
    assert!(approx(shot.vy, config.enemy_laser_speed));
    assert_eq!(next.fire_countdown, config.boss_fire_interval);
}

#[test]
fn holds_fire_while_timer_runs() {
    let config = GameConfig::default();
    let mut b = cruising(10.0, 2.0, 0.0, 0.0);
    b.fire_countdown = 5;
    let (next, shot) = update_boss(&b, WIDTH, HEIGHT, &config, SHOT, &mut StdRng::seed_from_u64(1));
    assert!(shot.is_none());
    assert_eq!(next.fire_countdown, 4);
}

#[test]
fn fires_once_per_interval() {
    let config = GameConfig::default();
    let mut boss = spawn_boss(&config, &dims(), WIDTH);
    let mut rng = StdRng::seed_from_u64(9);
    let mut shots = 0;
    for _ in 0..(config.boss_fire_interval * 3) {
        let (next, shot) = update_boss(&boss, WIDTH, HEIGHT, &config, SHOT, &mut rng);
        boss = next;
        shots += usize::from(shot.is_some());
    }
    assert_eq!(shots, 3);
}
