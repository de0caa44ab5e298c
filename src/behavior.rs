// Copyright (c) 2025 Kevin Thomas
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

//! Idle-movement policy while the robot is `Moving` with no hazard in sight.
//!
//! The behavior mode never changes how hazards are handled; it only decides
//! what the motors do on a quiet cycle.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::direction::Direction;

/// Idle-movement policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BehaviorMode {
    /// Cruise, with a short random excursion every few seconds
    RandomWalk,
    /// Hold the last direction
    Guard,
    /// Hold the last direction; interaction triggers are expected
    Interactive,
}

/// Decides when and where a random-walk excursion goes.
pub struct Wanderer {
    period_ticks: u32,
    rng: SmallRng,
}

impl Wanderer {
    /// `period_ticks == 0` disables excursions.
    pub fn new(period_ticks: u32, seed: u64) -> Self {
        Self {
            period_ticks,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Whether `tick` is an excursion tick under `mode`.
    pub fn is_due(&self, mode: BehaviorMode, tick: u32) -> bool {
        mode == BehaviorMode::RandomWalk && self.period_ticks != 0 && tick % self.period_ticks == 0
    }

    /// Picks a pseudo-random direction from [`Direction::WANDER`].
    pub fn pick(&mut self) -> Direction {
        Direction::WANDER[self.rng.gen_range(0..Direction::WANDER.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_random_walk_wanders() {
        let wanderer = Wanderer::new(50, 1);
        assert!(wanderer.is_due(BehaviorMode::RandomWalk, 50));
        assert!(wanderer.is_due(BehaviorMode::RandomWalk, 100));
        assert!(!wanderer.is_due(BehaviorMode::RandomWalk, 49));
        assert!(!wanderer.is_due(BehaviorMode::Guard, 50));
        assert!(!wanderer.is_due(BehaviorMode::Interactive, 50));
    }

    #[test]
    fn zero_period_never_wanders() {
        let wanderer = Wanderer::new(0, 1);
        for tick in 0..200 {
            assert!(!wanderer.is_due(BehaviorMode::RandomWalk, tick));
        }
    }

    #[test]
    fn picks_are_seeded_and_never_stop() {
        let mut a = Wanderer::new(50, 99);
        let mut b = Wanderer::new(50, 99);
        for _ in 0..64 {
            let picked = a.pick();
            assert_eq!(picked, b.pick());
            assert_ne!(picked, Direction::Stop);
        }
    }
}
