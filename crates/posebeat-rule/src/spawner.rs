use posebeat_config::{GameConfig, SpawnConfig, TargetConfig};
use posebeat_model::GestureLabel;
use rand::Rng;

use crate::{Target, TargetId};

/// Periodically creates targets at the right screen edge.
pub struct TargetSpawner<R: Rng> {
    rng: R,
    spawn: SpawnConfig,
    target: TargetConfig,
    screen_width: f32,
    screen_height: f32,
    timer: u32,
    next_id: u64,
}

impl<R: Rng> TargetSpawner<R> {
    pub fn new(config: &GameConfig, rng: R) -> Self {
        Self {
            rng,
            spawn: config.spawn,
            target: config.target,
            screen_width: config.window.width as f32,
            screen_height: config.window.height as f32,
            timer: 0,
            next_id: 0,
        }
    }

    /// Advance the spawn timer by one tick, spawning once it exceeds the interval.
    pub fn tick(&mut self) -> Option<Target> {
        self.timer += 1;
        if self.timer > self.spawn.interval_ticks {
            self.timer = 0;
            Some(self.spawn())
        } else {
            None
        }
    }

    /// Create a target with a random gesture and height inside the safe band.
    pub fn spawn(&mut self) -> Target {
        let gesture = GestureLabel::ALL[self.rng.gen_range(0..GestureLabel::ALL.len())];
        let top = self.spawn.margin_top;
        let bottom = self.screen_height - self.spawn.margin_bottom;
        let y = if top < bottom {
            self.rng.gen_range(top..=bottom)
        } else {
            (top + bottom) / 2.0
        };

        let id = TargetId(self.next_id);
        self.next_id += 1;
        Target::new(id, gesture, self.screen_width, y, &self.target)
    }

    pub fn timer(&self) -> u32 {
        self.timer
    }

    pub fn spawned(&self) -> u64 {
        self.next_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn spawner(seed: u64) -> TargetSpawner<StdRng> {
        TargetSpawner::new(&GameConfig::default(), StdRng::seed_from_u64(seed))
    }

    #[test]
    fn test_spawns_after_interval() {
        let mut s = spawner(1);
        for _ in 0..45 {
            assert!(s.tick().is_none());
        }
        let target = s.tick().expect("spawn on tick 46");
        assert_eq!(target.id, TargetId(0));
        assert_eq!(s.timer(), 0);
        assert!(s.tick().is_none());
    }

    #[test]
    fn test_target_geometry() {
        let mut s = spawner(7);
        for _ in 0..200 {
            let t = s.spawn();
            assert_eq!(t.x, 1280.0);
            assert!((150.0..=570.0).contains(&t.y), "y = {}", t.y);
            assert_eq!(t.width, 120.0);
            assert_eq!(t.speed, 3.0);
            assert!(!t.is_evaluated());
        }
    }

    #[test]
    fn test_ids_increase() {
        let mut s = spawner(3);
        let ids: Vec<_> = (0..5).map(|_| s.spawn().id).collect();
        assert_eq!(ids, (0..5).map(TargetId).collect::<Vec<_>>());
        assert_eq!(s.spawned(), 5);
    }

    #[test]
    fn test_all_gestures_appear() {
        let mut s = spawner(11);
        let mut seen = [false; 5];
        for _ in 0..500 {
            seen[s.spawn().gesture.index()] = true;
        }
        assert!(seen.iter().all(|&x| x));
    }

    #[test]
    fn test_same_seed_same_targets() {
        let mut a = spawner(42);
        let mut b = spawner(42);
        for _ in 0..20 {
            assert_eq!(a.spawn(), b.spawn());
        }
    }

    #[test]
    fn test_collapsed_band_uses_midpoint() {
        let mut config = GameConfig::default();
        config.spawn.margin_top = 500.0;
        config.spawn.margin_bottom = 500.0;
        let mut s = TargetSpawner::new(&config, StdRng::seed_from_u64(0));
        assert_eq!(s.spawn().y, (500.0 + 220.0) / 2.0);
    }
}
