use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use space_raid::compute::*;
use space_raid::config::{GameConfig, MAX_LIVES};
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

fn started(config: &GameConfig, level: Level) -> GameState {
    start_session(&init_state(level, 40.0, 20.0, dims(), config, 0))
}

fn to_input((left, right, up, down, fire): (bool, bool, bool, bool, bool)) -> TickInput {
    TickInput { left, right, up, down, fire }
}

fn inputs() -> impl Strategy<Value = Vec<(bool, bool, bool, bool, bool)>> {
    prop::collection::vec(any::<(bool, bool, bool, bool, bool)>(), 1..400)
}

fn level() -> impl Strategy<Value = Level> {
    prop_oneof![Just(Level::Easy), Just(Level::Medium), Just(Level::Hard)]
}

proptest! {
    #[test]
    fn session_invariants_hold(seed in any::<u64>(), level in level(), keys in inputs()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut state = started(&GameConfig::default(), level);

        for k in keys {
            let next = step(&state, &to_input(k), &mut rng);

            prop_assert!(next.player.lives <= MAX_LIVES);
            prop_assert!(next.player.lives <= state.player.lives);
            prop_assert!(next.score >= state.score);
            prop_assert!(next.high_score >= next.score);

            let p = &next.player.rect;
            prop_assert!(p.x >= 0.0 && p.x + p.w <= next.width);
            prop_assert!(p.y >= 0.0 && p.y + p.h <= next.height);

            // The boss appears at most once and only loses health
            prop_assert!(!(state.boss_spawned && !next.boss_spawned));
            if state.boss.is_none() && next.boss.is_some() {
                prop_assert!(!state.boss_spawned);
            }
            if let (Some(before), Some(after)) = (&state.boss, &next.boss) {
                prop_assert!(after.hp <= before.hp);
            }
            if let Some(b) = &next.boss {
                prop_assert!(b.hp > 0);
                prop_assert!(next.grunts.is_empty());
            }

            match state.status {
                GameStatus::Running => {
                    prop_assert_eq!(next.frame, state.frame + 1);
                }
                _ => {
                    prop_assert_eq!(next.frame, state.frame);
                }
            }
            if next.status == GameStatus::Defeat {
                prop_assert_eq!(next.player.lives, 0);
            }

            state = next;
        }
    }

    #[test]
    fn boss_only_leaves_in_victory(seed in any::<u64>(), keys in inputs()) {
        let config = GameConfig { boss_max_hp: 3, ..GameConfig::default() };
        let mut state = started(&config, Level::Medium);
        state.grunts.clear();
        let mut rng = StdRng::seed_from_u64(seed);

        // First step summons the boss
        state = step(&state, &TickInput::default(), &mut rng);
        prop_assert!(state.boss.is_some());

        for k in keys {
            let next = step(&state, &to_input(k), &mut rng);
            if state.boss.is_some() && next.boss.is_none() {
                prop_assert_eq!(next.status, GameStatus::Victory);
                prop_assert_eq!(next.score, state.score + config.boss_bonus);
            }
            prop_assert!(!(next.boss.is_none() && next.status == GameStatus::Running));
            state = next;
        }
    }
}
