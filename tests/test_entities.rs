use space_raid::config::GameConfig;
use space_raid::entities::*;

fn dims() -> EntityDims {
    EntityDims {
        player: Size { w: 3.0, h: 2.0 },
        grunt: Size { w: 3.0, h: 2.0 },
        boss: Size { w: 7.0, h: 3.0 },
        laser: Size { w: 1.0, h: 1.0 },
        enemy_laser: Size { w: 1.0, h: 1.0 },
    }
}

#[test]
fn enums_compare_by_variant() {
    assert_eq!(Level::Easy, Level::Easy);
    assert_ne!(Level::Easy, Level::Hard);
    assert_eq!(GameStatus::Running, GameStatus::Running);
    assert_ne!(GameStatus::Victory, GameStatus::Defeat);
    assert_ne!(Facing::Left, Facing::Right);
}

#[test]
fn player_faces_forward_by_default() {
    assert_eq!(Facing::default(), Facing::Forward);
}

#[test]
fn rect_default_is_empty_at_origin() {
    let r = Rect::default();
    assert_eq!(r, Rect { x: 0.0, y: 0.0, w: 0.0, h: 0.0 });
}

#[test]
fn game_state_clone_is_independent() {
    let original = GameState {
        player: Player {
            rect: Rect { x: 18.5, y: 17.0, w: 3.0, h: 2.0 },
            lives: 3,
            facing: Facing::Forward,
        },
        grunts: Vec::new(),
        boss: None,
        boss_spawned: false,
        lasers: Vec::new(),
        enemy_lasers: Vec::new(),
        explosions: Vec::new(),
        score: 0,
        high_score: 0,
        level: Level::Easy,
        status: GameStatus::Running,
        frame: 0,
        fire_cooldown: 0,
        width: 40.0,
        height: 20.0,
        dims: dims(),
        config: GameConfig::default(),
    };
    let mut cloned = original.clone();

    // Mutating the clone must not affect the original
    cloned.player.rect.x = 99.0;
    cloned.score = 999;
    cloned.grunts.push(Grunt { rect: Rect { x: 5.0, y: 5.0, w: 3.0, h: 2.0 } });
    cloned.config.boss_max_hp = 1;

    assert_eq!(original.player.rect.x, 18.5);
    assert_eq!(original.score, 0);
    assert!(original.grunts.is_empty());
    assert_eq!(original.config.boss_max_hp, 20);
}
