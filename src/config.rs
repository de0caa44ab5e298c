// Copyright (c) 2025 Kevin Thomas
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

//! Navigation tuning constants and the immutable controller configuration.
//!
//! Every threshold and duration the controller uses is a named constant here
//! and is copied into a [`NavConfig`] value at construction.
//!
//! # Sensing
//!
//! - **Obstacle threshold**: 20 cm, strict (`distance < 20`)
//! - **Edge threshold**: raw reflectance below 500 means no surface
//! - **Ranging calibration**: 58 µs of echo per cm (round trip at 343 m/s)
//!
//! # Avoidance durations
//!
//! The backup and turn times were tuned on the chassis. Edge recovery backs up
//! further than obstacle recovery.
//!
//! | maneuver | backup | turn |
//! |---|---|---|
//! | obstacle | 250 ms | 300 ms |
//! | edge | 400 ms | 400 ms |

use crate::behavior::BehaviorMode;
use crate::maneuver::TurnPolicy;

/// Forward obstacle distance below which an obstacle is declared (cm)
pub const OBSTACLE_DISTANCE_THRESHOLD_CM: u32 = 20;

/// Raw edge sensor value below which the channel reports a drop-off
pub const EDGE_DETECTION_THRESHOLD: u16 = 500;

/// Echo microseconds per centimetre of distance
pub const MICROSECONDS_PER_CM: u32 = 58;

/// Ultrasonic trigger pulse width (µs)
pub const TRIGGER_PULSE_US: u32 = 10;

/// Deadline for a full echo measurement, measured from the trigger (µs)
pub const ECHO_TIMEOUT_US: u64 = 100_000;

/// Maximum pin polls for each echo edge
pub const ECHO_MAX_POLLS: u32 = 50_000;

/// Backward drive time when recovering from an obstacle
pub const OBSTACLE_BACKUP_MS: u32 = 250;

/// Turn time when recovering from an obstacle
pub const OBSTACLE_TURN_MS: u32 = 300;

/// Backward drive time when recovering from an edge
pub const EDGE_BACKUP_MS: u32 = 400;

/// Turn time when recovering from an edge
pub const EDGE_TURN_MS: u32 = 400;

/// Control loop period
pub const TICK_PERIOD_MS: u32 = 100;

/// Ticks between random-walk excursions
pub const RANDOM_WALK_PERIOD_TICKS: u32 = 50;

/// Length of one random-walk excursion
pub const RANDOM_MOVE_MS: u32 = 500;

/// Default seed for the wander and turn-side generators
pub const DEFAULT_RNG_SEED: u64 = 0x5EED_DE5C_B07;

/// Ultrasonic acquisition bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EchoConfig {
    /// Trigger pulse width (µs)
    pub trigger_pulse_us: u32,
    /// Deadline from trigger to echo fall (µs)
    pub timeout_us: u64,
    /// Poll budget for each echo edge
    pub max_polls: u32,
}

impl Default for EchoConfig {
    fn default() -> Self {
        Self {
            trigger_pulse_us: TRIGGER_PULSE_US,
            timeout_us: ECHO_TIMEOUT_US,
            max_polls: ECHO_MAX_POLLS,
        }
    }
}

/// Complete controller configuration.
///
/// # Examples
///
/// ```
/// use deskbot_nav::{NavConfig, TurnPolicy};
///
/// let config = NavConfig {
///     turn_policy: TurnPolicy::Random,
///     rng_seed: 7,
///     ..NavConfig::default()
/// };
/// assert_eq!(config.obstacle_threshold_cm, 20);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NavConfig {
    /// Obstacle threshold (cm, strict)
    pub obstacle_threshold_cm: u32,
    /// Edge threshold (raw units, strict)
    pub edge_threshold: u16,
    /// Ranging calibration (echo µs per cm)
    pub us_per_cm: u32,
    pub obstacle_backup_ms: u32,
    pub obstacle_turn_ms: u32,
    pub edge_backup_ms: u32,
    pub edge_turn_ms: u32,
    /// Control loop period
    pub tick_period_ms: u32,
    /// Ticks between random-walk excursions (0 disables them)
    pub random_walk_period_ticks: u32,
    pub random_move_ms: u32,
    /// How the avoidance turn side is chosen
    pub turn_policy: TurnPolicy,
    /// Idle-movement policy at start-up
    pub behavior_mode: BehaviorMode,
    /// Seed for the pseudo-random generators
    pub rng_seed: u64,
    pub echo: EchoConfig,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            obstacle_threshold_cm: OBSTACLE_DISTANCE_THRESHOLD_CM,
            edge_threshold: EDGE_DETECTION_THRESHOLD,
            us_per_cm: MICROSECONDS_PER_CM,
            obstacle_backup_ms: OBSTACLE_BACKUP_MS,
            obstacle_turn_ms: OBSTACLE_TURN_MS,
            edge_backup_ms: EDGE_BACKUP_MS,
            edge_turn_ms: EDGE_TURN_MS,
            tick_period_ms: TICK_PERIOD_MS,
            random_walk_period_ticks: RANDOM_WALK_PERIOD_TICKS,
            random_move_ms: RANDOM_MOVE_MS,
            turn_policy: TurnPolicy::Alternate,
            behavior_mode: BehaviorMode::RandomWalk,
            rng_seed: DEFAULT_RNG_SEED,
            echo: EchoConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_recovery_backs_up_further_than_obstacle_recovery() {
        let config = NavConfig::default();
        assert!(config.edge_backup_ms > config.obstacle_backup_ms);
        assert!(config.edge_turn_ms >= config.obstacle_turn_ms);
    }

    #[test]
    fn echo_deadline_covers_the_longest_sensor_pulse() {
        // HC-SR04 holds echo high for about 38 ms when nothing is in range.
        assert!(EchoConfig::default().timeout_us > 38_000);
    }
}
