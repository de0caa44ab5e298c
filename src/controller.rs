// Copyright (c) 2025 Kevin Thomas
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

//! Fixed-period navigation control loop.
//!
//! One [`NavController::tick`] runs a full sense → decide → act cycle:
//!
//! 1. Sample the ranger and the edge sensors
//! 2. Derive the obstacle and edge flags
//! 3. Advance the state machine; on entering an avoidance state run the
//!    maneuver to completion and come back to `Moving`
//! 4. On a quiet `Moving` cycle, cruise according to the behavior mode
//!
//! The caller sleeps for [`NavConfig::tick_period_ms`] between ticks and polls
//! [`NavController::current_state`] for display and feedback.
//!
//! # Degradation
//!
//! A sensor that fails or times out is read as "no hazard" for that cycle and
//! sampled again on the next one. It is never read as "hazard everywhere",
//! which would pin the robot in place.

use embedded_hal_async::delay::DelayNs;

use crate::behavior::{BehaviorMode, Wanderer};
use crate::config::NavConfig;
use crate::direction::Direction;
use crate::distance::{DistanceSample, DistanceUnit};
use crate::drive::{Drive, MotorDriver};
use crate::edge::{EdgeDetector, EdgeReading};
use crate::maneuver::{AvoidanceKind, ManeuverSequencer};
use crate::sensor::{EdgeSensors, RangeSensor};
use crate::state::{NavState, next_state};

/// Mixed into the configured seed for the wander generator.
const WANDER_SEED_SALT: u64 = 0x7761_6e64;

/// What one control cycle saw and did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickOutcome {
    /// State at the start of the cycle
    pub previous: NavState,
    /// State at the end of the cycle
    pub state: NavState,
    /// Maneuver run during the cycle, if any
    pub maneuver: Option<AvoidanceKind>,
    pub distance: DistanceSample,
    pub obstacle: bool,
    pub edge: bool,
}

impl TickOutcome {
    /// `true` when the state moved or a maneuver ran.
    pub fn changed(&self) -> bool {
        self.previous != self.state || self.maneuver.is_some()
    }
}

/// Reactive navigation controller.
///
/// Owns every collaborator and the only mutable navigation state: the current
/// [`NavState`] and the direction to resume after a maneuver.
pub struct NavController<R, E, M, D, const N: usize> {
    config: NavConfig,
    ranger: R,
    edges: E,
    drive: Drive<M, D>,
    distance: DistanceUnit,
    detector: EdgeDetector,
    sequencer: ManeuverSequencer,
    wanderer: Wanderer,
    state: NavState,
    behavior: BehaviorMode,
    last_direction: Direction,
    tick_count: u32,
}

impl<R, E, M, D, const N: usize> NavController<R, E, M, D, N>
where
    R: RangeSensor,
    E: EdgeSensors<N>,
    M: MotorDriver,
    D: DelayNs,
{
    /// Creates a controller in `Idle` with the motors stopped.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let mut nav = NavController::new(NavConfig::default(), ranger, edges, motors, Delay);
    /// loop {
    ///     let outcome = nav.tick().await;
    ///     Timer::after_millis(100).await;
    /// }
    /// ```
    pub fn new(config: NavConfig, ranger: R, edges: E, motors: M, delay: D) -> Self {
        Self {
            ranger,
            edges,
            drive: Drive::new(motors, delay),
            distance: DistanceUnit::new(config.us_per_cm),
            detector: EdgeDetector::new(config.edge_threshold),
            sequencer: ManeuverSequencer::new(&config),
            wanderer: Wanderer::new(
                config.random_walk_period_ticks,
                config.rng_seed ^ WANDER_SEED_SALT,
            ),
            state: NavState::Idle,
            behavior: config.behavior_mode,
            last_direction: Direction::Forward,
            tick_count: 0,
            config,
        }
    }

    /// Runs one sense → decide → act cycle.
    ///
    /// Blocks for the full maneuver when an avoidance state is entered, and
    /// for one excursion on a random-walk tick.
    pub async fn tick(&mut self) -> TickOutcome {
        self.tick_count = self.tick_count.wrapping_add(1);

        let distance = self.sample_distance();
        let reading = self.sample_edges();
        let obstacle = distance.is_within(self.config.obstacle_threshold_cm);
        let edge = reading.any();
        trace!(
            "tick {}: {:?} {:?}",
            self.tick_count,
            distance,
            reading
        );

        let previous = self.state;
        let mut maneuver = None;

        if self.state == NavState::Interacting {
            // One-shot: the trigger is acknowledged for exactly one cycle.
            self.state = NavState::Moving;
        } else {
            let next = next_state(self.state, obstacle, edge);
            match next.avoidance_kind() {
                Some(kind) => {
                    info!("{} -> {}", self.state.name(), next.name());
                    for index in reading.triggered() {
                        debug!("edge on channel {}", index);
                    }
                    self.state = next;
                    self.last_direction = self.sequencer.execute(kind, &mut self.drive).await;
                    self.state = NavState::Moving;
                    maneuver = Some(kind);
                }
                None => self.state = next,
            }
        }

        if self.state == NavState::Moving && maneuver.is_none() {
            self.cruise().await;
        }

        if maneuver.is_some() {
            info!("maneuver done, resuming {:?}", self.last_direction);
        } else if self.state != previous {
            info!("{} -> {}", previous.name(), self.state.name());
        }

        TickOutcome {
            previous,
            state: self.state,
            maneuver,
            distance,
            obstacle,
            edge,
        }
    }

    /// Current state, for display and feedback consumers.
    pub fn current_state(&self) -> NavState {
        self.state
    }

    /// Direction a quiet `Moving` cycle resumes in.
    pub fn last_direction(&self) -> Direction {
        self.last_direction
    }

    /// Direction the motors are currently set to.
    pub fn drive_direction(&self) -> Direction {
        self.drive.current_direction()
    }

    pub fn behavior_mode(&self) -> BehaviorMode {
        self.behavior
    }

    /// Switches the idle-movement policy. Hazard handling is unaffected.
    pub fn set_behavior_mode(&mut self, mode: BehaviorMode) {
        if mode != self.behavior {
            info!("behavior {:?} -> {:?}", self.behavior, mode);
        }
        self.behavior = mode;
    }

    /// Enters `Interacting` from an external touch or proximity input.
    ///
    /// Returns `false` and does nothing unless the controller is `Idle` or
    /// `Moving`. The state decays back to `Moving` on the next tick.
    pub fn trigger_interaction(&mut self) -> bool {
        match self.state {
            NavState::Idle | NavState::Moving => {
                info!("{} -> {}", self.state.name(), NavState::Interacting.name());
                self.state = NavState::Interacting;
                true
            }
            _ => false,
        }
    }

    /// Stops the motors and drops back to `Idle`.
    pub fn emergency_stop(&mut self) {
        warn!("emergency stop in {}", self.state.name());
        self.drive.stop();
        self.state = NavState::Idle;
    }

    /// Number of ticks run so far (wrapping).
    pub fn tick_count(&self) -> u32 {
        self.tick_count
    }

    pub fn config(&self) -> &NavConfig {
        &self.config
    }

    /// Hands back the ranger, edge sensors, motors and delay.
    pub fn release(self) -> (R, E, M, D) {
        let (motors, delay) = self.drive.into_parts();
        (self.ranger, self.edges, motors, delay)
    }

    fn sample_distance(&mut self) -> DistanceSample {
        match self.ranger.acquire_range_timing() {
            Ok(us) => self.distance.measure(i32::try_from(us).unwrap_or(i32::MAX)),
            Err(err) => {
                warn!("ranging degraded: {:?}", err);
                DistanceSample::Timeout
            }
        }
    }

    fn sample_edges(&mut self) -> EdgeReading<N> {
        match self.edges.acquire_edge_channels() {
            Ok(raw) => self.detector.detect(&raw),
            Err(err) => {
                warn!("edge sensing degraded: {:?}", err);
                EdgeReading::clear()
            }
        }
    }

    async fn cruise(&mut self) {
        if self.wanderer.is_due(self.behavior, self.tick_count) {
            let direction = self.wanderer.pick();
            debug!(
                "random walk {:?} for {} ms",
                direction,
                self.config.random_move_ms
            );
            self.drive
                .move_for(direction, self.config.random_move_ms)
                .await;
        } else {
            self.drive.set_direction(self.last_direction);
        }
    }
}
