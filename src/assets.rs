/// Text sprites loaded once before the first session.
///
/// Each sprite lives in `<dir>/<name>.txt`.  Its width is the display width
/// of its widest line and its height is the number of lines, so entity sizes
/// follow whatever art is on disk.

use std::path::Path;

use unicode_width::UnicodeWidthStr;

use crate::entities::{EntityDims, Size};
use crate::error::GameError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AssetKind {
    Player,
    PlayerLeft,
    PlayerRight,
    Grunt,
    Boss,
    /// Player laser.
    LaserRed,
    /// Boss laser.
    LaserGreen,
    Life,
    Background,
}

impl AssetKind {
    pub const ALL: [AssetKind; 9] = [
        AssetKind::Player,
        AssetKind::PlayerLeft,
        AssetKind::PlayerRight,
        AssetKind::Grunt,
        AssetKind::Boss,
        AssetKind::LaserRed,
        AssetKind::LaserGreen,
        AssetKind::Life,
        AssetKind::Background,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            AssetKind::Player => "player",
            AssetKind::PlayerLeft => "player_left",
            AssetKind::PlayerRight => "player_right",
            AssetKind::Grunt => "grunt",
            AssetKind::Boss => "boss",
            AssetKind::LaserRed => "laser_red",
            AssetKind::LaserGreen => "laser_green",
            AssetKind::Life => "life",
            AssetKind::Background => "background",
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.txt", self.name())
    }
}

/// A block of text art.
#[derive(Clone, Debug, PartialEq)]
pub struct Sprite {
    pub rows: Vec<String>,
}

impl Sprite {
    /// Returns `None` when the text has no visible characters.
    pub fn parse(text: &str) -> Option<Sprite> {
        let mut rows: Vec<String> = text
            .lines()
            .map(|line| line.trim_end_matches('\r').to_string())
            .collect();
        while rows.last().is_some_and(|r| r.trim().is_empty()) {
            rows.pop();
        }
        while rows.first().is_some_and(|r| r.trim().is_empty()) {
            rows.remove(0);
        }
        if rows.is_empty() {
            None
        } else {
            Some(Sprite { rows })
        }
    }

    pub fn width(&self) -> usize {
        self.rows.iter().map(|r| r.width()).max().unwrap_or(0)
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn size(&self) -> Size {
        Size {
            w: self.width() as f32,
            h: self.height() as f32,
        }
    }
}

/// Every sprite the game draws.
#[derive(Clone, Debug)]
pub struct Assets {
    pub player: Sprite,
    pub player_left: Sprite,
    pub player_right: Sprite,
    pub grunt: Sprite,
    pub boss: Sprite,
    pub laser_red: Sprite,
    pub laser_green: Sprite,
    pub life: Sprite,
    pub background: Sprite,
}

fn load_sprite(dir: &Path, kind: AssetKind) -> Result<Sprite, GameError> {
    let path = dir.join(kind.file_name());
    let text = std::fs::read_to_string(&path).map_err(|source| GameError::AssetLoad {
        name: kind.name(),
        path: path.clone(),
        source,
    })?;
    Sprite::parse(&text).ok_or(GameError::EmptyAsset {
        name: kind.name(),
        path,
    })
}

impl Assets {
    /// Load all sprites from `dir`.  The first missing or blank file aborts
    /// the load; there is no partial fallback.
    pub fn load(dir: &Path) -> Result<Assets, GameError> {
        let assets = Assets {
            player: load_sprite(dir, AssetKind::Player)?,
            player_left: load_sprite(dir, AssetKind::PlayerLeft)?,
            player_right: load_sprite(dir, AssetKind::PlayerRight)?,
            grunt: load_sprite(dir, AssetKind::Grunt)?,
            boss: load_sprite(dir, AssetKind::Boss)?,
            laser_red: load_sprite(dir, AssetKind::LaserRed)?,
            laser_green: load_sprite(dir, AssetKind::LaserGreen)?,
            life: load_sprite(dir, AssetKind::Life)?,
            background: load_sprite(dir, AssetKind::Background)?,
        };
        log::info!(
            "Loaded {} sprites from {}",
            AssetKind::ALL.len(),
            dir.display()
        );
        Ok(assets)
    }

    pub fn get(&self, kind: AssetKind) -> &Sprite {
        match kind {
            AssetKind::Player => &self.player,
            AssetKind::PlayerLeft => &self.player_left,
            AssetKind::PlayerRight => &self.player_right,
            AssetKind::Grunt => &self.grunt,
            AssetKind::Boss => &self.boss,
            AssetKind::LaserRed => &self.laser_red,
            AssetKind::LaserGreen => &self.laser_green,
            AssetKind::Life => &self.life,
            AssetKind::Background => &self.background,
        }
    }

    /// Entity sizes as drawn.  The player hitbox uses the forward-facing sprite.
    pub fn dims(&self) -> EntityDims {
        EntityDims {
            player: self.player.size(),
            grunt: self.grunt.size(),
            boss: self.boss.size(),
            laser: self.laser_red.size(),
            enemy_laser: self.laser_green.size(),
        }
    }
}
