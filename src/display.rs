/// Rendering layer. All terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// game state.  No game logic is performed; this module only translates
/// state into terminal commands.
///
/// Screen layout:
///   row 0          HUD
///   row 1          top border
///   rows 2..h-3    play area (one cell per play-area unit)
///   row h-2        bottom border
///   row h-1        controls hint

use std::io::Write;

use unicode_width::UnicodeWidthStr;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};

use crate::assets::{Assets, Sprite};
use crate::entities::{Explosion, Facing, GameState, GameStatus, Laser, Level, Rect};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_BACKGROUND: Color = Color::DarkGrey;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_LIVES: Color = Color::Red;
const C_BOSS_BANNER: Color = Color::Magenta;
const C_PLAYER: Color = Color::White;
const C_GRUNT: Color = Color::Green;
const C_BOSS: Color = Color::Magenta;
const C_HEALTH_FULL: Color = Color::Green;
const C_HEALTH_LOW: Color = Color::Red;
const C_LASER_PLAYER: Color = Color::Red;
const C_LASER_ENEMY: Color = Color::Green;
const C_HINT: Color = Color::DarkGrey;

/// Screen column of play-area column 0.
const PLAY_LEFT: u16 = 1;
/// Screen row of play-area row 0.
const PLAY_TOP: u16 = 2;

/// Terminal size needed to show a play area of the given size.
pub fn screen_size_for(play_width: f32, play_height: f32) -> (u16, u16) {
    (
        play_width.ceil() as u16 + 2 * PLAY_LEFT,
        play_height.ceil() as u16 + PLAY_TOP + 2,
    )
}

/// Play-area size available in a terminal of `cols` × `rows`.
pub fn play_area_for(cols: u16, rows: u16) -> (f32, f32) {
    (
        cols.saturating_sub(2 * PLAY_LEFT) as f32,
        rows.saturating_sub(PLAY_TOP + 2) as f32,
    )
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame, back to front.
pub fn render<W: Write>(out: &mut W, state: &GameState, assets: &Assets) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, state)?;
    draw_background(out, state, &assets.background)?;

    for grunt in &state.grunts {
        draw_sprite(out, state, &assets.grunt, &grunt.rect, C_GRUNT)?;
    }
    if let Some(boss) = &state.boss {
        draw_sprite(out, state, &assets.boss, &boss.rect, C_BOSS)?;
        draw_health_bar(out, state, &boss.rect, boss.hp, boss.max_hp)?;
    }

    draw_player(out, state, assets)?;

    for laser in &state.lasers {
        draw_laser(out, state, &assets.laser_red, laser, C_LASER_PLAYER)?;
    }
    for laser in &state.enemy_lasers {
        draw_laser(out, state, &assets.laser_green, laser, C_LASER_ENEMY)?;
    }
    for explosion in &state.explosions {
        draw_explosion(out, state, explosion)?;
    }

    draw_hud(out, state, &assets.life)?;
    draw_controls_hint(out, state)?;

    match state.status {
        GameStatus::Victory => draw_final_message(out, state, "     VICTORY!     ", Color::Yellow)?,
        GameStatus::Defeat => draw_final_message(out, state, "    GAME  OVER    ", Color::Red)?,
        GameStatus::Idle | GameStatus::Running => {}
    }

    // Park cursor in a harmless spot and flush
    let (_, screen_h) = screen_size_for(state.width, state.height);
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, screen_h.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

/// Screen cell for a play-area position, or `None` if it falls outside.
fn to_cell(state: &GameState, x: f32, y: f32) -> Option<(u16, u16)> {
    let cx = x.round();
    let cy = y.round();
    if cx < 0.0 || cy < 0.0 || cx >= state.width || cy >= state.height {
        return None;
    }
    Some((PLAY_LEFT + cx as u16, PLAY_TOP + cy as u16))
}

// ── Border & background ───────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    let (screen_w, screen_h) = screen_size_for(state.width, state.height);
    let w = screen_w as usize;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    // Row 1: top bar
    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    // Row h-2: bottom bar
    out.queue(cursor::MoveTo(0, screen_h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    // Side walls
    for row in PLAY_TOP..screen_h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(screen_w.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

/// Tile the background sprite across the play area.
fn draw_background<W: Write>(
    out: &mut W,
    state: &GameState,
    background: &Sprite,
) -> std::io::Result<()> {
    let tile_w = background.width().max(1);
    let cols = state.width as usize;

    out.queue(style::SetForegroundColor(C_BACKGROUND))?;
    for row in 0..state.height as u16 {
        let pattern = &background.rows[row as usize % background.height()];
        let tile: Vec<char> = pattern
            .chars()
            .chain(std::iter::repeat(' '))
            .take(tile_w)
            .collect();
        let line: String = tile.iter().cycle().take(cols).collect();
        out.queue(cursor::MoveTo(PLAY_LEFT, PLAY_TOP + row))?;
        out.queue(Print(line))?;
    }
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_sprite<W: Write>(
    out: &mut W,
    state: &GameState,
    sprite: &Sprite,
    rect: &Rect,
    color: Color,
) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(color))?;
    for (i, line) in sprite.rows.iter().enumerate() {
        if let Some((col, row)) = to_cell(state, rect.x, rect.y + i as f32) {
            out.queue(cursor::MoveTo(col, row))?;
            out.queue(Print(line))?;
        }
    }
    Ok(())
}

fn draw_player<W: Write>(out: &mut W, state: &GameState, assets: &Assets) -> std::io::Result<()> {
    let sprite = match state.player.facing {
        Facing::Left => &assets.player_left,
        Facing::Right => &assets.player_right,
        Facing::Forward => &assets.player,
    };
    draw_sprite(out, state, sprite, &state.player.rect, C_PLAYER)
}

/// One row under the boss, `█` for remaining hit points and `░` for lost ones.
fn draw_health_bar<W: Write>(
    out: &mut W,
    state: &GameState,
    boss: &Rect,
    hp: u32,
    max_hp: u32,
) -> std::io::Result<()> {
    let Some((col, row)) = to_cell(state, boss.x, boss.y + boss.h) else {
        return Ok(());
    };
    let width = boss.w.round().max(1.0) as usize;
    let filled = if max_hp == 0 {
        0
    } else {
        ((width as f64 * f64::from(hp) / f64::from(max_hp)).ceil() as usize).min(width)
    };
    let color = if u64::from(hp) * 3 <= u64::from(max_hp) {
        C_HEALTH_LOW
    } else {
        C_HEALTH_FULL
    };
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))))?;
    Ok(())
}

fn draw_laser<W: Write>(
    out: &mut W,
    state: &GameState,
    sprite: &Sprite,
    laser: &Laser,
    color: Color,
) -> std::io::Result<()> {
    draw_sprite(out, state, sprite, &laser.rect, color)
}

/// A ring of cells at the explosion's radius, dimming as it fades.
fn draw_explosion<W: Write>(
    out: &mut W,
    state: &GameState,
    explosion: &Explosion,
) -> std::io::Result<()> {
    let (glyph, color) = if explosion.opacity > 0.66 {
        ("*", Color::White)
    } else if explosion.opacity > 0.33 {
        ("+", Color::Yellow)
    } else {
        ("·", Color::DarkRed)
    };
    out.queue(style::SetForegroundColor(color))?;

    let r = explosion.radius.ceil() as i32;
    for dy in -r..=r {
        for dx in -r..=r {
            let dist = ((dx * dx + dy * dy) as f32).sqrt();
            if (dist - explosion.radius).abs() >= 0.5 {
                continue;
            }
            if let Some((col, row)) =
                to_cell(state, explosion.x + dx as f32, explosion.y + dy as f32)
            {
                out.queue(cursor::MoveTo(col, row))?;
                out.queue(Print(glyph))?;
            }
        }
    }
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &GameState, life: &Sprite) -> std::io::Result<()> {
    let (screen_w, _) = screen_size_for(state.width, state.height);

    // Score and high score, left
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    if state.high_score > 0 {
        out.queue(Print(format!(
            "Score:{:>6}  Hi:{:>6}",
            state.score, state.high_score
        )))?;
    } else {
        out.queue(Print(format!("Score:{:>6}", state.score)))?;
    }

    // Boss banner or level, centre
    let (centre, centre_color) = if state.boss.is_some() {
        ("!! BOSS BATTLE !!", C_BOSS_BANNER)
    } else {
        match state.level {
            Level::Easy => ("[ EASY ]", Color::Green),
            Level::Medium => ("[ MEDIUM ]", Color::Yellow),
            Level::Hard => ("[ HARD ]", Color::Red),
        }
    };
    let cx = (screen_w / 2).saturating_sub(centre.width() as u16 / 2);
    out.queue(cursor::MoveTo(cx, 0))?;
    out.queue(style::SetForegroundColor(centre_color))?;
    out.queue(Print(centre))?;

    // Lives, right
    let icon = life.rows.first().map(String::as_str).unwrap_or("♥");
    let lives_str = format!("Lives:{}", icon.repeat(state.player.lives as usize));
    let rx = screen_w.saturating_sub(lives_str.width() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
    out.queue(Print(&lives_str))?;

    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    let (_, screen_h) = screen_size_for(state.width, state.height);
    let hint = if state.boss.is_some() {
        "← → ↑ ↓ / WASD : Move   SPACE : Shoot   Q : Quit"
    } else {
        "← → / A D : Move   SPACE : Shoot   Q : Quit"
    };
    out.queue(cursor::MoveTo(1, screen_h.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(hint))?;
    Ok(())
}

// ── Victory / game-over overlay ───────────────────────────────────────────────

fn draw_final_message<W: Write>(
    out: &mut W,
    state: &GameState,
    title: &str,
    color: Color,
) -> std::io::Result<()> {
    let (screen_w, screen_h) = screen_size_for(state.width, state.height);
    let bar = "═".repeat(title.width());
    let top = format!("╔{bar}╗");
    let middle = format!("║{title}║");
    let bottom = format!("╚{bar}╝");

    let score_line = format!("Final Score: {:>6}", state.score);
    let new_best = state.score >= state.high_score && state.score > 0;
    let best_line = if new_best {
        format!("★ NEW BEST: {:>6} ★", state.score)
    } else {
        format!("Best Score:  {:>6}", state.high_score)
    };
    let best_color = if new_best { Color::Yellow } else { Color::DarkGrey };

    let lines: [(&str, Color); 6] = [
        (top.as_str(), color),
        (middle.as_str(), color),
        (bottom.as_str(), color),
        (score_line.as_str(), Color::Yellow),
        (best_line.as_str(), best_color),
        ("R - Play Again  Q - Quit", Color::White),
    ];

    let cx = screen_w / 2;
    let start_row = (screen_h / 2).saturating_sub(lines.len() as u16 / 2);

    for (i, (msg, line_color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.width() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*line_color))?;
        out.queue(Print(*msg))?;
    }

    Ok(())
}
