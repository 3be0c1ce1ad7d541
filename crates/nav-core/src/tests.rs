//! Unit tests for nav-core primitives.

#[cfg(test)]
mod ids {
    use crate::EntityId;

    #[test]
    fn ordering() {
        assert!(EntityId(0) < EntityId(1));
        assert!(EntityId(100) > EntityId(99));
    }

    #[test]
    fn invalid_sentinel_is_max() {
        assert_eq!(EntityId::INVALID.0, u32::MAX);
        assert!(!EntityId::INVALID.is_valid());
        assert!(EntityId(3).is_valid());
        assert_eq!(EntityId::default(), EntityId::INVALID);
    }

    #[test]
    fn display() {
        assert_eq!(EntityId(7).to_string(), "EntityId(7)");
    }
}

#[cfg(test)]
mod pos {
    use crate::GridPos;

    #[test]
    fn distances() {
        let a = GridPos::new(1, 1);
        let b = GridPos::new(4, 3);
        assert_eq!(a.manhattan(b), 5);
        assert_eq!(a.chebyshev(b), 3);
        assert_eq!(b.chebyshev(a), 3);
    }

    #[test]
    fn adjacency_excludes_self() {
        let p = GridPos::new(0, 0);
        assert!(!p.is_adjacent(p));
        assert!(p.is_adjacent(GridPos::new(1, 1)));
        assert!(p.is_adjacent(GridPos::new(-1, 0)));
        assert!(!p.is_adjacent(GridPos::new(2, 0)));
    }

    #[test]
    fn key_is_unique_and_invertible() {
        let samples = [
            GridPos::new(0, 0),
            GridPos::new(-1, 0),
            GridPos::new(0, -1),
            GridPos::new(i32::MAX, i32::MIN),
            GridPos::new(12, -7),
        ];
        for p in samples {
            assert_eq!(GridPos::from_key(p.key()), p);
        }
        assert_ne!(GridPos::new(1, 0).key(), GridPos::new(0, 1).key());
    }

    #[test]
    fn string_key() {
        assert_eq!(GridPos::new(3, -2).to_string(), "3,-2");
    }

    #[test]
    fn neighbor_sets() {
        let p = GridPos::new(5, 5);
        assert_eq!(p.neighbors4().count(), 4);
        let all: Vec<_> = p.neighbors8().collect();
        assert_eq!(all.len(), 8);
        assert!(all.iter().all(|n| p.is_adjacent(*n)));
        assert!(all[..4].iter().all(|n| !p.is_diagonal_step(*n)));
        assert!(all[4..].iter().all(|n| p.is_diagonal_step(*n)));
    }
}

#[cfg(test)]
mod time {
    use std::time::Duration;

    use crate::{Frame, SimClock, SimConfig};

    #[test]
    fn frame_arithmetic() {
        assert_eq!(Frame(10) + 5, Frame(15));
        assert_eq!(Frame(10).offset(3), Frame(13));
    }

    #[test]
    fn clock_advances_frame_and_elapsed() {
        let mut clock = SimClock::new();
        clock.advance(Duration::from_millis(16));
        clock.advance(Duration::from_millis(20));
        assert_eq!(clock.frame, Frame(2));
        assert_eq!(clock.timestamp_ms(), 36);
    }

    #[test]
    fn sim_config_end_frame() {
        let cfg = SimConfig {
            frame_duration: Duration::from_millis(10),
            total_frames:   120,
            seed:           42,
        };
        assert_eq!(cfg.end_frame(), Frame(120));
        assert_eq!(cfg.run_duration(), Duration::from_millis(1_200));
    }
}

#[cfg(test)]
mod rng {
    use crate::{ActorRng, EntityId};

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = ActorRng::new(12345, EntityId(0));
        let mut r2 = ActorRng::new(12345, EntityId(0));
        for _ in 0..100 {
            let a: u32 = r1.random();
            let b: u32 = r2.random();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn different_actors_differ() {
        let mut r0 = ActorRng::new(1, EntityId(0));
        let mut r1 = ActorRng::new(1, EntityId(1));
        let a: u64 = r0.random();
        let b: u64 = r1.random();
        assert_ne!(a, b, "seeds for adjacent actors should diverge");
    }

    #[test]
    fn gen_range_in_bounds() {
        let mut rng = ActorRng::new(0, EntityId(0));
        for _ in 0..1000 {
            let v = rng.gen_range(-3i32..=3);
            assert!((-3..=3).contains(&v));
        }
    }
}
