// Copyright (c) 2025 Kevin Thomas
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

//! Timed stop / reverse / turn recovery maneuvers.
//!
//! Entering an avoidance state runs one fixed sequence:
//!
//! ```text
//! Stop ─► Backward (backup_ms) ─► Stop ─► TurnLeft|TurnRight (turn_ms) ─► Stop
//! ```
//!
//! The whole sequence is awaited inside a single control-loop cycle, and no
//! sensor is read while it runs.
//!
//! # Turn side
//!
//! [`TurnPolicy::Alternate`] swings Left, Right, Left, ...;
//! [`TurnPolicy::Random`] draws each side from a seeded [`SmallRng`].

use embedded_hal_async::delay::DelayNs;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::config::NavConfig;
use crate::direction::{Direction, TurnSide};
use crate::drive::{Drive, MotorDriver};
use crate::state::NavState;

/// Mixed into the configured seed so turn sides and wander directions differ.
const TURN_SEED_SALT: u64 = 0x7475_726e;

/// Which hazard a maneuver recovers from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AvoidanceKind {
    /// Forward obstacle within range
    Obstacle,
    /// Drop-off under an edge sensor
    Edge,
}

impl AvoidanceKind {
    /// Navigation state that runs this maneuver.
    pub fn state(self) -> NavState {
        match self {
            AvoidanceKind::Obstacle => NavState::ObstacleAvoidance,
            AvoidanceKind::Edge => NavState::EdgeAvoidance,
        }
    }
}

/// How successive maneuvers pick their turn side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TurnPolicy {
    /// Left first, then strictly alternating
    Alternate,
    /// Seeded pseudo-random side per maneuver
    Random,
}

/// One timed step of a maneuver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ManeuverStep {
    pub direction: Direction,
    pub duration_ms: u32,
}

/// Steps for a single avoidance, built on entry and dropped after execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ManeuverPlan {
    kind: AvoidanceKind,
    turn_side: TurnSide,
    steps: [ManeuverStep; 3],
}

impl ManeuverPlan {
    /// Builds the stop / backup / turn plan.
    pub fn new(kind: AvoidanceKind, turn_side: TurnSide, backup_ms: u32, turn_ms: u32) -> Self {
        Self {
            kind,
            turn_side,
            steps: [
                ManeuverStep {
                    direction: Direction::Stop,
                    duration_ms: 0,
                },
                ManeuverStep {
                    direction: Direction::Backward,
                    duration_ms: backup_ms,
                },
                ManeuverStep {
                    direction: turn_side.direction(),
                    duration_ms: turn_ms,
                },
            ],
        }
    }

    /// Builds the plan for `kind` with the durations from `config`.
    pub fn for_kind(kind: AvoidanceKind, turn_side: TurnSide, config: &NavConfig) -> Self {
        match kind {
            AvoidanceKind::Obstacle => Self::new(
                kind,
                turn_side,
                config.obstacle_backup_ms,
                config.obstacle_turn_ms,
            ),
            AvoidanceKind::Edge => {
                Self::new(kind, turn_side, config.edge_backup_ms, config.edge_turn_ms)
            }
        }
    }

    pub fn kind(&self) -> AvoidanceKind {
        self.kind
    }

    pub fn turn_side(&self) -> TurnSide {
        self.turn_side
    }

    pub fn steps(&self) -> &[ManeuverStep] {
        &self.steps
    }

    /// Time the loop is blocked while the plan runs.
    pub fn total_ms(&self) -> u32 {
        self.steps.iter().map(|step| step.duration_ms).sum()
    }
}

/// Runs avoidance maneuvers and tracks the turn side between them.
pub struct ManeuverSequencer {
    config: NavConfig,
    policy: TurnPolicy,
    next_side: TurnSide,
    rng: SmallRng,
}

impl ManeuverSequencer {
    pub fn new(config: &NavConfig) -> Self {
        let mut rng = SmallRng::seed_from_u64(config.rng_seed ^ TURN_SEED_SALT);
        let next_side = match config.turn_policy {
            TurnPolicy::Alternate => TurnSide::Left,
            TurnPolicy::Random => random_side(&mut rng),
        };
        Self {
            config: *config,
            policy: config.turn_policy,
            next_side,
            rng,
        }
    }

    /// Side the next maneuver will turn towards.
    pub fn next_side(&self) -> TurnSide {
        self.next_side
    }

    /// Plan the next maneuver of `kind` would run, without consuming the turn side.
    pub fn plan(&self, kind: AvoidanceKind) -> ManeuverPlan {
        ManeuverPlan::for_kind(kind, self.next_side, &self.config)
    }

    /// Runs the full maneuver for `kind`, blocking until the motors are stopped.
    ///
    /// Returns the direction travel should resume in, which is always
    /// [`Direction::Forward`].
    pub async fn execute<M: MotorDriver, D: DelayNs>(
        &mut self,
        kind: AvoidanceKind,
        drive: &mut Drive<M, D>,
    ) -> Direction {
        let plan = self.plan(kind);
        self.advance();

        info!(
            "{:?} avoidance: turning {:?}, {} ms",
            kind,
            plan.turn_side(),
            plan.total_ms()
        );

        for step in plan.steps() {
            if step.direction.is_turn() {
                if let Err(err) = drive.turn_for(step.direction, step.duration_ms).await {
                    warn!("maneuver step skipped: {:?}", err);
                }
            } else {
                drive.move_for(step.direction, step.duration_ms).await;
            }
        }

        Direction::Forward
    }

    fn advance(&mut self) {
        self.next_side = match self.policy {
            TurnPolicy::Alternate => self.next_side.opposite(),
            TurnPolicy::Random => random_side(&mut self.rng),
        };
    }
}

fn random_side(rng: &mut SmallRng) -> TurnSide {
    if rng.gen_bool(0.5) {
        TurnSide::Left
    } else {
        TurnSide::Right
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::direction::WheelAction;
    use core::cell::RefCell;
    use embassy_futures::block_on;

    struct Motors<'a>(&'a RefCell<Vec<(WheelAction, WheelAction)>>, Option<WheelAction>);

    impl MotorDriver for Motors<'_> {
        fn set_left(&mut self, action: WheelAction) {
            self.1 = Some(action);
        }

        fn set_right(&mut self, action: WheelAction) {
            if let Some(left) = self.1.take() {
                self.0.borrow_mut().push((left, action));
            }
        }
    }

    struct Waits<'a>(&'a RefCell<Vec<u32>>);

    impl DelayNs for Waits<'_> {
        async fn delay_ns(&mut self, _ns: u32) {}

        async fn delay_ms(&mut self, ms: u32) {
            self.0.borrow_mut().push(ms);
        }
    }

    fn turn_of(plan: &ManeuverPlan) -> Direction {
        plan.steps()[2].direction
    }

    #[test]
    fn plan_is_stop_backup_turn() {
        let config = NavConfig::default();
        let plan = ManeuverPlan::for_kind(AvoidanceKind::Edge, TurnSide::Right, &config);
        assert_eq!(
            plan.steps(),
            &[
                ManeuverStep {
                    direction: Direction::Stop,
                    duration_ms: 0
                },
                ManeuverStep {
                    direction: Direction::Backward,
                    duration_ms: config.edge_backup_ms
                },
                ManeuverStep {
                    direction: Direction::TurnRight,
                    duration_ms: config.edge_turn_ms
                },
            ]
        );
        assert_eq!(plan.total_ms(), config.edge_backup_ms + config.edge_turn_ms);
    }

    #[test]
    fn edge_plan_backs_up_further_than_obstacle_plan() {
        let config = NavConfig::default();
        let edge = ManeuverPlan::for_kind(AvoidanceKind::Edge, TurnSide::Left, &config);
        let obstacle = ManeuverPlan::for_kind(AvoidanceKind::Obstacle, TurnSide::Left, &config);
        assert!(edge.steps()[1].duration_ms > obstacle.steps()[1].duration_ms);
    }

    #[test]
    fn plan_does_not_consume_the_turn_side() {
        let sequencer = ManeuverSequencer::new(&NavConfig::default());
        let first = sequencer.plan(AvoidanceKind::Obstacle);
        let second = sequencer.plan(AvoidanceKind::Obstacle);
        assert_eq!(first, second);
        assert_eq!(first.turn_side(), TurnSide::Left);
    }

    #[test]
    fn alternate_policy_swings_left_right_left() {
        let moves = RefCell::new(Vec::new());
        let waits = RefCell::new(Vec::new());
        let mut drive = Drive::new(Motors(&moves, None), Waits(&waits));
        let mut sequencer = ManeuverSequencer::new(&NavConfig::default());

        let mut turns = Vec::new();
        for _ in 0..3 {
            turns.push(turn_of(&sequencer.plan(AvoidanceKind::Obstacle)));
            let resume = block_on(sequencer.execute(AvoidanceKind::Obstacle, &mut drive));
            assert_eq!(resume, Direction::Forward);
        }

        assert_eq!(
            turns,
            vec![Direction::TurnLeft, Direction::TurnRight, Direction::TurnLeft]
        );
    }

    #[test]
    fn execute_drives_the_plan_and_ends_stopped() {
        let config = NavConfig::default();
        let moves = RefCell::new(Vec::new());
        let waits = RefCell::new(Vec::new());
        let mut drive = Drive::new(Motors(&moves, None), Waits(&waits));
        moves.borrow_mut().clear();

        let mut sequencer = ManeuverSequencer::new(&config);
        block_on(sequencer.execute(AvoidanceKind::Obstacle, &mut drive));

        use WheelAction::*;
        assert_eq!(
            *moves.borrow(),
            vec![
                (Stop, Stop),
                (Stop, Stop),
                (Backward, Backward),
                (Stop, Stop),
                (Backward, Forward),
                (Stop, Stop),
            ]
        );
        assert_eq!(
            *waits.borrow(),
            vec![config.obstacle_backup_ms, config.obstacle_turn_ms]
        );
        assert_eq!(drive.current_direction(), Direction::Stop);
    }

    #[test]
    fn random_policy_is_reproducible_for_a_seed() {
        let config = NavConfig {
            turn_policy: TurnPolicy::Random,
            rng_seed: 1234,
            ..NavConfig::default()
        };
        let sides = |config: &NavConfig| {
            let mut sequencer = ManeuverSequencer::new(config);
            (0..32)
                .map(|_| {
                    let side = sequencer.next_side();
                    sequencer.advance();
                    side
                })
                .collect::<Vec<_>>()
        };

        let first = sides(&config);
        assert_eq!(first, sides(&config));
        assert!(first.contains(&TurnSide::Left));
        assert!(first.contains(&TurnSide::Right));
    }

    #[test]
    fn kinds_map_to_their_states() {
        assert_eq!(AvoidanceKind::Obstacle.state(), NavState::ObstacleAvoidance);
        assert_eq!(AvoidanceKind::Edge.state(), NavState::EdgeAvoidance);
    }
}
