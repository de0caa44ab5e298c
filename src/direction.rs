// Copyright (c) 2025 Kevin Thomas
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

//! Chassis motion directions and their per-wheel composition.
//!
//! The chassis is a differential drive: every [`Direction`] is a pair of
//! [`WheelAction`]s, one for each motor side.
//!
//! ```text
//!              left       right
//!   Forward    Forward    Forward
//!   Backward   Backward   Backward
//!   TurnLeft   Backward   Forward     (counter-clockwise, in place)
//!   TurnRight  Forward    Backward    (clockwise, in place)
//!   Stop       Stop       Stop
//! ```
//!
//! There are no speed levels; a wheel is either driven or stopped.

/// Whole-chassis motion command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Both wheels forward
    Forward,
    /// Both wheels backward
    Backward,
    /// Rotate counter-clockwise in place
    TurnLeft,
    /// Rotate clockwise in place
    TurnRight,
    /// Both wheels stopped
    Stop,
}

/// Single motor side command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WheelAction {
    /// Drive the wheel forward
    Forward,
    /// Drive the wheel backward
    Backward,
    /// Coast the wheel
    Stop,
}

/// Side an avoidance turn swings towards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TurnSide {
    /// Counter-clockwise
    Left,
    /// Clockwise
    Right,
}

impl Direction {
    /// Directions a random-walk excursion may pick from.
    pub const WANDER: [Direction; 4] = [
        Direction::Forward,
        Direction::Backward,
        Direction::TurnLeft,
        Direction::TurnRight,
    ];

    /// Splits this direction into `(left, right)` wheel actions.
    ///
    /// # Examples
    ///
    /// ```
    /// use deskbot_nav::{Direction, WheelAction};
    ///
    /// assert_eq!(
    ///     Direction::TurnLeft.wheel_actions(),
    ///     (WheelAction::Backward, WheelAction::Forward)
    /// );
    /// ```
    pub fn wheel_actions(self) -> (WheelAction, WheelAction) {
        match self {
            Direction::Forward => (WheelAction::Forward, WheelAction::Forward),
            Direction::Backward => (WheelAction::Backward, WheelAction::Backward),
            Direction::TurnLeft => (WheelAction::Backward, WheelAction::Forward),
            Direction::TurnRight => (WheelAction::Forward, WheelAction::Backward),
            Direction::Stop => (WheelAction::Stop, WheelAction::Stop),
        }
    }

    /// Returns `true` for `TurnLeft` and `TurnRight`.
    pub fn is_turn(self) -> bool {
        matches!(self, Direction::TurnLeft | Direction::TurnRight)
    }
}

impl TurnSide {
    /// The other side.
    pub fn opposite(self) -> Self {
        match self {
            TurnSide::Left => TurnSide::Right,
            TurnSide::Right => TurnSide::Left,
        }
    }

    /// In-place turn towards this side.
    pub fn direction(self) -> Direction {
        match self {
            TurnSide::Left => Direction::TurnLeft,
            TurnSide::Right => Direction::TurnRight,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turns_drive_wheels_in_opposition() {
        assert_eq!(
            Direction::TurnLeft.wheel_actions(),
            (WheelAction::Backward, WheelAction::Forward)
        );
        assert_eq!(
            Direction::TurnRight.wheel_actions(),
            (WheelAction::Forward, WheelAction::Backward)
        );
    }

    #[test]
    fn straight_and_stop_drive_both_wheels_alike() {
        for direction in [Direction::Forward, Direction::Backward, Direction::Stop] {
            let (left, right) = direction.wheel_actions();
            assert_eq!(left, right, "{direction:?}");
        }
    }

    #[test]
    fn only_turns_are_turns() {
        assert!(Direction::TurnLeft.is_turn());
        assert!(Direction::TurnRight.is_turn());
        assert!(!Direction::Forward.is_turn());
        assert!(!Direction::Backward.is_turn());
        assert!(!Direction::Stop.is_turn());
    }

    #[test]
    fn turn_side_flips_and_maps_to_turns() {
        assert_eq!(TurnSide::Left.opposite(), TurnSide::Right);
        assert_eq!(TurnSide::Right.opposite(), TurnSide::Left);
        assert_eq!(TurnSide::Left.direction(), Direction::TurnLeft);
        assert_eq!(TurnSide::Right.direction(), Direction::TurnRight);
    }
}
