// scheduler.rs - Per-generation choice of transition policy

use rand::Rng;

/// Flags applied to every cell for one generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Policy {
    pub regenerate: bool,                             // Dead -> Healthy
    pub delay: bool,                                  // Infected -> Spoiled instead of Dead
}

impl Policy {
    /// Longer infectious period: dead cells regrow, infected cells spoil first.
    pub const LONG: Policy = Policy { regenerate: true, delay: true };
    /// Dead cells stay dead, infected cells die at once.
    pub const FATAL: Policy = Policy { regenerate: false, delay: false };
    pub const DEFAULT: Policy = Policy { regenerate: true, delay: false };
}

/// Picks one [`Policy`] per generation from a single roll in `[0, 100)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scheduler {
    long_prob: f64,
    dead_prob: f64,
}

impl Scheduler {
    pub fn new(long_prob: f64, dead_prob: f64) -> Self {
        Self { long_prob, dead_prob }
    }

    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Policy {
        self.select(rng.gen_range(0..100))
    }

    /// Maps a roll to its cumulative-probability bucket: long, then fatal, then default.
    pub fn select(&self, roll: u32) -> Policy {
        let roll = f64::from(roll);
        if roll < self.long_prob * 100.0 {
            Policy::LONG
        } else if roll < (self.long_prob + self.dead_prob) * 100.0 {
            Policy::FATAL
        } else {
            Policy::DEFAULT
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn buckets_follow_cumulative_thresholds() {
        let scheduler = Scheduler::new(0.05, 0.35);
        assert_eq!(scheduler.select(0), Policy::LONG);
        assert_eq!(scheduler.select(4), Policy::LONG);
        assert_eq!(scheduler.select(5), Policy::FATAL);
        assert_eq!(scheduler.select(39), Policy::FATAL);
        assert_eq!(scheduler.select(40), Policy::DEFAULT);
        assert_eq!(scheduler.select(99), Policy::DEFAULT);
    }

    #[test]
    fn certain_policies_never_vary() {
        let mut rng = StdRng::seed_from_u64(7);
        let fatal = Scheduler::new(0.0, 1.0);
        let long = Scheduler::new(1.0, 0.0);
        let default = Scheduler::new(0.0, 0.0);
        for _ in 0..500 {
            assert_eq!(fatal.choose(&mut rng), Policy::FATAL);
            assert_eq!(long.choose(&mut rng), Policy::LONG);
            assert_eq!(default.choose(&mut rng), Policy::DEFAULT);
        }
    }

    #[test]
    fn mixed_probabilities_hit_every_bucket() {
        let mut rng = StdRng::seed_from_u64(11);
        let scheduler = Scheduler::new(0.3, 0.3);
        let picks: Vec<Policy> = (0..1000).map(|_| scheduler.choose(&mut rng)).collect();
        for policy in [Policy::LONG, Policy::FATAL, Policy::DEFAULT] {
            assert!(picks.contains(&policy), "{policy:?} never chosen");
        }
    }
}
