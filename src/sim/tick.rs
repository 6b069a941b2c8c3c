//! Fixed-step time integration
//!
//! A tick of arbitrary length is cut into substeps no longer than
//! `Tuning::max_step`, so collision checks only ever see small motions.

use super::level::Level;

/// Input state for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
}

impl Level {
    /// Advance the level by `elapsed` seconds under `input`
    ///
    /// `elapsed` is not clamped: the work done grows with
    /// `elapsed / max_step`. Frame loops should cap it first, as
    /// `GameSession::frame` does with `MAX_FRAME_STEP`.
    pub fn animate(&mut self, elapsed: f64, input: &TickInput) {
        if !elapsed.is_finite() || elapsed < 0.0 {
            log::warn!("Ignoring invalid tick length {}", elapsed);
            return;
        }

        // The countdown runs once per tick, not per substep
        if let Some(delay) = self.finish_delay.as_mut() {
            *delay -= elapsed;
        }

        let max_step = self.tuning.max_step;
        let mut remaining = elapsed;
        while remaining > 0.0 {
            let step = remaining.min(max_step);
            self.substep(step, input);
            remaining -= step;
        }
    }

    /// Run every actor once, in list order
    fn substep(&mut self, dt: f64, input: &TickInput) {
        self.stepping = true;
        for i in 0..self.actors.len() {
            let mut actor = self.actors[i];
            actor.act(dt, self, input);
            self.actors[i] = actor;
        }
        self.stepping = false;
        self.remove_collected();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Vector;
    use crate::sim::actor::{ActorBody, ActorKind};
    use crate::sim::level::{Contact, Obstacle, Status};
    use crate::sim::plan::SIMPLE_LEVEL_PLAN;
    use proptest::prelude::*;

    const RIGHT: TickInput = TickInput {
        left: false,
        right: true,
        up: false,
    };

    fn lava_speeds(level: &Level) -> Vec<Vector> {
        level
            .actors()
            .iter()
            .filter(|a| a.kind() == ActorKind::Lava)
            .filter_map(|a| a.speed())
            .collect()
    }

    #[test]
    fn test_fall_into_lava_cells() {
        let mut level = Level::new(&["     ", "  @  ", "     ", "     ", "!!!!!"]).unwrap();
        let input = TickInput::default();

        for _ in 0..40 {
            level.animate(0.05, &input);
            if level.status() == Status::Lost {
                break;
            }
        }
        assert_eq!(level.status(), Status::Lost);
        assert_eq!(level.finish_delay(), Some(1.0));

        for _ in 0..4 {
            level.animate(0.25, &input);
            assert!(!level.is_finished());
        }
        assert_eq!(level.finish_delay(), Some(0.0));

        level.animate(0.01, &input);
        assert!(level.is_finished());
        assert_eq!(level.status(), Status::Lost);
    }

    #[test]
    fn test_fall_onto_lava_actor() {
        let mut level = Level::new(&["x x", "x@x", "x x", "x=x", "xxx"]).unwrap();
        let input = TickInput::default();

        for _ in 0..20 {
            level.animate(0.05, &input);
        }
        assert_eq!(level.status(), Status::Lost);

        // Boxed in by walls, the horizontal lava only flips direction
        let lava = level.actors().iter().find(|a| a.kind() == ActorKind::Lava).unwrap();
        assert_eq!(lava.pos, Vector::new(1.0, 3.0));
    }

    #[test]
    fn test_lost_player_sinks() {
        let mut level = Level::new(&["  @  ", "     "]).unwrap();
        level.player_touched(Contact::Lava);
        let before = *level.player();

        level.animate(0.05, &TickInput::default());
        let after = level.player();
        assert!((after.size.y - (before.size.y - 0.05)).abs() < 1e-12);
    }

    #[test]
    fn test_collect_last_coin_wins() {
        let mut level = Level::new(&["     ", " @o  ", "xxxxx"]).unwrap();
        level.animate(0.1, &RIGHT);

        assert_eq!(level.coins_left(), 0);
        assert_eq!(level.actors().len(), 1);
        assert_eq!(level.status(), Status::Won);
        assert_eq!(level.finish_delay(), Some(1.0));
    }

    #[test]
    fn test_collect_coins_one_by_one() {
        let mut level = Level::new(&["       ", " @o  o ", "xxxxxxx"]).unwrap();

        level.animate(0.1, &RIGHT);
        assert_eq!(level.coins_left(), 1);
        assert_eq!(level.actors().len(), 2);
        assert_eq!(level.status(), Status::Playing);

        level.animate(1.0, &RIGHT);
        assert_eq!(level.coins_left(), 0);
        assert_eq!(level.status(), Status::Won);
    }

    #[test]
    fn test_coin_wobbles_in_place() {
        let mut level = Level::new(&["@ o"]).unwrap();
        let ActorBody::Coin { base_pos, .. } = level.actors()[1].body else {
            panic!("expected a coin");
        };

        for _ in 0..10 {
            level.animate(0.033, &TickInput::default());
            let coin = level.actors()[1];
            assert_eq!(coin.pos.x, base_pos.x);
            assert!((coin.pos.y - base_pos.y).abs() <= 0.07 + 1e-12);
        }
    }

    #[test]
    fn test_drip_teleports_and_sweep_bounces() {
        let mut level = Level::new(&["    ", "@ v|", "    ", "xxxx"]).unwrap();
        let input = TickInput::default();
        let drip = |level: &Level| *level.actors().iter().find(|a| a.id == 1).unwrap();

        for _ in 0..6 {
            level.animate(0.05, &input);
        }
        assert!(drip(&level).pos.y > 1.8);

        // Next step would enter the wall row: restart at the spawn point
        level.animate(0.05, &input);
        assert_eq!(drip(&level).pos, Vector::new(2.0, 1.0));
        assert_eq!(drip(&level).speed(), Some(Vector::new(0.0, 3.0)));

        for _ in 0..5 {
            level.animate(0.05, &input);
        }
        assert_eq!(
            lava_speeds(&level),
            vec![Vector::new(0.0, 3.0), Vector::new(0.0, -2.0)]
        );
        let sweep = level.actors().iter().find(|a| a.id == 2).unwrap();
        assert!(sweep.pos.y <= 2.0 + 1e-9);
    }

    #[test]
    fn test_walls_block_walking() {
        let mut level = Level::new(&["x   ", "x@  ", "xxxx"]).unwrap();
        let left = TickInput {
            left: true,
            ..Default::default()
        };
        level.animate(0.05, &left);
        assert_eq!(level.player().pos.x, 1.0);
        assert_eq!(level.status(), Status::Playing);

        // Left and right together cancel out
        let both = TickInput {
            left: true,
            right: true,
            up: false,
        };
        level.animate(0.05, &both);
        assert_eq!(level.player().pos.x, 1.0);
    }

    #[test]
    fn test_jump_from_ground() {
        let mut level = Level::new(&["     ", "     ", "     ", "  @  ", "xxxxx"]).unwrap();
        let start = level.player().pos;
        let up = TickInput {
            up: true,
            ..Default::default()
        };

        level.animate(0.05, &up);
        assert_eq!(level.player().pos, start);
        assert_eq!(level.player().speed(), Some(Vector::new(0.0, -17.0)));

        level.animate(0.05, &TickInput::default());
        assert!(level.player().pos.y < start.y);
    }

    #[test]
    fn test_long_tick_does_not_tunnel() {
        let mut level = Level::new(&[
            "     ", "  @  ", "     ", "     ", "     ", "     ", "xxxxx", "     ",
        ])
        .unwrap();

        // One call, twenty substeps: the player lands instead of skipping the floor
        level.animate(1.0, &TickInput::default());
        let player = level.player();
        assert_eq!(level.status(), Status::Playing);
        assert!(player.pos.y + player.size.y <= 6.0);
        assert!(player.pos.y + player.size.y > 5.0);
    }

    #[test]
    fn test_invalid_elapsed_is_ignored() {
        let mut level = Level::new(&["  @  ", "     "]).unwrap();
        level.player_touched(Contact::Lava);
        let before = level.player().pos;

        level.animate(-1.0, &TickInput::default());
        level.animate(f64::NAN, &TickInput::default());
        level.animate(f64::INFINITY, &TickInput::default());
        assert_eq!(level.finish_delay(), Some(1.0));
        assert_eq!(level.player().pos, before);

        level.animate(0.0, &TickInput::default());
        assert_eq!(level.finish_delay(), Some(1.0));
    }

    #[test]
    fn test_determinism() {
        // Two levels with same seed and inputs produce identical actors
        let mut level1 = Level::new(&SIMPLE_LEVEL_PLAN).unwrap();
        let mut level2 = Level::new(&SIMPLE_LEVEL_PLAN).unwrap();

        let inputs = [
            RIGHT,
            TickInput {
                right: true,
                up: true,
                left: false,
            },
            TickInput::default(),
            TickInput {
                left: true,
                ..Default::default()
            },
        ];

        for (i, input) in inputs.iter().cycle().take(120).enumerate() {
            let elapsed = 0.016 + (i % 3) as f64 * 0.01;
            level1.animate(elapsed, input);
            level2.animate(elapsed, input);
        }

        assert_eq!(level1.actors(), level2.actors());
        assert_eq!(level1.status(), level2.status());
        assert_eq!(level1.finish_delay(), level2.finish_delay());
    }

    fn input_strategy() -> impl Strategy<Value = TickInput> {
        (any::<bool>(), any::<bool>(), any::<bool>()).prop_map(|(left, right, up)| TickInput {
            left,
            right,
            up,
        })
    }

    proptest! {
        #[test]
        fn prop_level_invariants(
            ticks in prop::collection::vec((0.0f64..0.3, input_strategy()), 1..80)
        ) {
            let mut level = Level::new(&SIMPLE_LEVEL_PLAN).unwrap();
            let grid = level.grid.clone();
            let mut actor_count = level.actors().len();
            let mut terminal = None;
            let mut delay = level.finish_delay();

            for (elapsed, input) in &ticks {
                level.animate(*elapsed, input);

                prop_assert_eq!(&level.grid, &grid);
                prop_assert!(level.actors().len() <= actor_count);
                actor_count = level.actors().len();
                let players = level.actors().iter().filter(|a| a.kind() == ActorKind::Player).count();
                prop_assert_eq!(players, 1);
                prop_assert_eq!(level.player().kind(), ActorKind::Player);

                match terminal {
                    Some(status) => {
                        prop_assert_eq!(level.status(), status);
                    }
                    None if level.status().is_terminal() => terminal = Some(level.status()),
                    None => {
                        prop_assert_eq!(level.finish_delay(), None);
                    }
                }
                if let (Some(before), Some(after)) = (delay, level.finish_delay()) {
                    prop_assert!(after <= before);
                }
                delay = level.finish_delay();
            }
        }

        #[test]
        fn prop_left_of_grid_is_wall(x in -20.0f64..-0.001, y in 0.0f64..4.0, w in 0.1f64..3.0, h in 0.1f64..1.5) {
            let level = open_level();
            prop_assert_eq!(level.obstacle_at(Vector::new(x, y), Vector::new(w, h)), Some(Obstacle::Wall));
        }

        #[test]
        fn prop_right_of_grid_is_wall(x in 8.0f64..20.0, y in 0.0f64..4.0, w in 2.01f64..4.0, h in 0.1f64..1.5) {
            let level = open_level();
            prop_assert_eq!(level.obstacle_at(Vector::new(x, y), Vector::new(w, h)), Some(Obstacle::Wall));
        }

        #[test]
        fn prop_above_grid_is_wall(x in -5.0f64..15.0, y in -20.0f64..-0.001, w in 0.1f64..3.0, h in 0.1f64..30.0) {
            let level = open_level();
            prop_assert_eq!(level.obstacle_at(Vector::new(x, y), Vector::new(w, h)), Some(Obstacle::Wall));
        }

        #[test]
        fn prop_below_grid_is_lava(x in 0.0f64..8.0, y in 0.0f64..20.0, w in 0.1f64..2.0, h in 6.01f64..8.0) {
            let level = open_level();
            prop_assert_eq!(level.obstacle_at(Vector::new(x, y), Vector::new(w, h)), Some(Obstacle::Lava));
        }

        #[test]
        fn prop_queries_are_pure(x in 0.0f64..9.0, y in 0.0f64..5.0) {
            let level = Level::new(&SIMPLE_LEVEL_PLAN).unwrap();
            let size = Vector::new(0.8, 1.5);
            let first = level.obstacle_at(Vector::new(x, y), size);
            prop_assert_eq!(level.obstacle_at(Vector::new(x, y), size), first);

            let mut probe = *level.player();
            probe.pos = Vector::new(x, y);
            let hit = level.actor_at(&probe).map(|a| a.id);
            prop_assert_eq!(level.actor_at(&probe).map(|a| a.id), hit);
        }
    }

    /// 10x6 level with nothing but the player
    fn open_level() -> Level {
        let mut plan = vec!["          "; 6];
        plan[0] = "@         ";
        Level::new(&plan).unwrap()
    }
}
