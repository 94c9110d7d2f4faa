/// Collision detection and resolution.
///
/// Every pair is tested against the state as it was when the pass began.
/// Hits are first recorded in per-collection marks and the marked entities
/// are dropped in one compaction at the end, so nothing is removed while
/// its collection is being walked.

use crate::compute::player_start;
use crate::entities::{Explosion, GameState, GameStatus, Rect};

/// Strict AABB overlap.  Rectangles that only share an edge do not collide.
pub fn intersects(a: &Rect, b: &Rect) -> bool {
    a.x < b.x + b.w && a.x + a.w > b.x && a.y < b.y + b.h && a.y + a.h > b.y
}

pub fn center(r: &Rect) -> (f32, f32) {
    (r.x + r.w / 2.0, r.y + r.h / 2.0)
}

fn explosion_at(x: f32, y: f32) -> Explosion {
    Explosion {
        x,
        y,
        radius: 1.0,
        opacity: 1.0,
    }
}

/// Resolve all hits for one step.
///
/// Order: laser × grunt, laser × boss, grunt × player, boss laser × player,
/// boss × player.  Killing the boss sets `Victory` here; running out of lives
/// is only turned into `Defeat` by the caller once this pass is done, so a
/// boss kill in the same step always wins.
pub fn resolve_collisions(state: &GameState) -> GameState {
    let config = &state.config;
    let player_rect = state.player.rect;
    let (px, py) = center(&player_rect);

    let mut used_lasers = vec![false; state.lasers.len()];
    let mut killed_grunts = vec![false; state.grunts.len()];
    let mut used_enemy_lasers = vec![false; state.enemy_lasers.len()];
    let mut explosions = state.explosions.clone();
    let mut score = state.score;
    let mut lives = state.player.lives;
    let mut status = state.status;

    // ── 1. Player lasers ↔ grunts ────────────────────────────────────────────
    for (li, laser) in state.lasers.iter().enumerate() {
        let hit = state
            .grunts
            .iter()
            .enumerate()
            .find(|(gi, g)| !killed_grunts[*gi] && intersects(&laser.rect, &g.rect))
            .map(|(gi, _)| gi);
        if let Some(gi) = hit {
            killed_grunts[gi] = true;
            used_lasers[li] = true;
            score = score.saturating_add(config.grunt_points);
            let (cx, cy) = center(&state.grunts[gi].rect);
            explosions.push(explosion_at(cx, cy));
        }
    }

    // ── 2. Player lasers ↔ boss ──────────────────────────────────────────────
    let mut boss = state.boss.clone();
    for (li, laser) in state.lasers.iter().enumerate() {
        if used_lasers[li] {
            continue;
        }
        let Some(b) = boss.as_mut() else { break };
        if !intersects(&laser.rect, &b.rect) {
            continue;
        }
        used_lasers[li] = true;
        b.hp = b.hp.saturating_sub(1);
        explosions.push(explosion_at(b.rect.x + b.rect.w / 2.0, b.rect.y + b.rect.h * 0.75));
        log::debug!("Boss hit, {}/{} hp left", b.hp, b.max_hp);
        if b.hp == 0 {
            score = score.saturating_add(config.boss_bonus);
            status = GameStatus::Victory;
            boss = None;
            log::info!("Boss destroyed on frame {}", state.frame);
        }
    }

    // ── 3. Grunts ↔ player ───────────────────────────────────────────────────
    for (gi, grunt) in state.grunts.iter().enumerate() {
        if !killed_grunts[gi] && intersects(&grunt.rect, &player_rect) {
            killed_grunts[gi] = true;
            explosions.push(explosion_at(px, py));
            lives = lives.saturating_sub(1);
        }
    }

    // ── 4. Boss lasers ↔ player ──────────────────────────────────────────────
    for (li, laser) in state.enemy_lasers.iter().enumerate() {
        if intersects(&laser.rect, &player_rect) {
            used_enemy_lasers[li] = true;
            explosions.push(explosion_at(px, py));
            lives = lives.saturating_sub(1);
        }
    }

    // ── 5. Boss body ↔ player ────────────────────────────────────────────────
    let mut player = state.player.clone();
    if let Some(b) = &state.boss {
        if intersects(&b.rect, &player_rect) {
            explosions.push(explosion_at(px, py));
            lives = lives.saturating_sub(1);
            player.rect = player_start(&state.dims, state.width, state.height);
        }
    }
    player.lives = lives;

    // ── Compact ──────────────────────────────────────────────────────────────
    let grunts = state
        .grunts
        .iter()
        .enumerate()
        .filter(|(i, _)| !killed_grunts[*i])
        .map(|(_, g)| g.clone())
        .collect();
    let lasers = state
        .lasers
        .iter()
        .enumerate()
        .filter(|(i, _)| !used_lasers[*i])
        .map(|(_, l)| l.clone())
        .collect();
    let enemy_lasers = state
        .enemy_lasers
        .iter()
        .enumerate()
        .filter(|(i, _)| !used_enemy_lasers[*i])
        .map(|(_, l)| l.clone())
        .collect();

    GameState {
        player,
        grunts,
        boss,
        lasers,
        enemy_lasers,
        explosions,
        score,
        status,
        ..state.clone()
    }
}
