/// Boss spawn and per-frame behaviour.
///
/// Movement and firing run on two independent countdowns; the only state
/// they share is the boss itself.

use rand::Rng;

use crate::config::GameConfig;
use crate::entities::{Boss, EntityDims, Laser, Rect, Size};

/// A fresh boss at the top centre of the play area, standing still.
pub fn spawn_boss(config: &GameConfig, dims: &EntityDims, width: f32) -> Boss {
    Boss {
        rect: Rect {
            x: (width - dims.boss.w) / 2.0,
            y: 0.0,
            w: dims.boss.w,
            h: dims.boss.h,
        },
        hp: config.boss_max_hp,
        max_hp: config.boss_max_hp,
        vx: 0.0,
        vy: 0.0,
        // Expires on the first active frame so the boss starts moving at once.
        move_countdown: 1,
        fire_countdown: config.boss_fire_interval,
    }
}

/// Lowest row the boss's top edge may reach: its bottom edge stays in the
/// upper half of the play area.
pub fn boss_floor(boss: &Boss, height: f32) -> f32 {
    (height / 2.0 - boss.rect.h).max(0.0)
}

/// Advance the boss one frame.  Returns the moved boss and the laser it
/// fired this frame, if any.
pub fn update_boss(
    boss: &Boss,
    width: f32,
    height: f32,
    config: &GameConfig,
    laser: Size,
    rng: &mut impl Rng,
) -> (Boss, Option<Laser>) {
    let mut next = boss.clone();

    // ── Direction change ─────────────────────────────────────────────────────
    next.move_countdown = next.move_countdown.saturating_sub(1);
    if next.move_countdown == 0 {
        next.vx = rng.gen_range(-config.boss_speed_x..=config.boss_speed_x);
        next.vy = rng.gen_range(-config.boss_speed_y..=config.boss_speed_y);
        next.move_countdown = config.boss_move_interval;
    }

    // ── Move with elastic bounce ─────────────────────────────────────────────
    next.rect.x += next.vx;
    next.rect.y += next.vy;

    let max_x = (width - next.rect.w).max(0.0);
    if next.rect.x < 0.0 {
        next.rect.x = 0.0;
        next.vx = -next.vx;
    } else if next.rect.x > max_x {
        next.rect.x = max_x;
        next.vx = -next.vx;
    }

    let floor = boss_floor(&next, height);
    if next.rect.y < 0.0 {
        next.rect.y = 0.0;
        next.vy = -next.vy;
    } else if next.rect.y > floor {
        next.rect.y = floor;
        next.vy = -next.vy;
    }

    // ── Fire ─────────────────────────────────────────────────────────────────
    next.fire_countdown = next.fire_countdown.saturating_sub(1);
    let shot = if next.fire_countdown == 0 {
        next.fire_countdown = config.boss_fire_interval;
        Some(Laser {
            rect: Rect {
                x: next.rect.x + (next.rect.w - laser.w) / 2.0,
                y: next.rect.y + next.rect.h,
                w: laser.w,
                h: laser.h,
            },
            vy: config.enemy_laser_speed,
        })
    } else {
        None
    };

    (next, shot)
}
