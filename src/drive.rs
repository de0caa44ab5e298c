// Copyright (c) 2025 Kevin Thomas
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

//! Differential drive primitives on top of a two-sided motor driver.
//!
//! [`MotorDriver`] is the only way the navigation core touches the motors.
//! [`Drive`] composes [`Direction`]s into left/right commands and runs
//! timed moves by awaiting an [`embedded_hal_async`] delay.
//!
//! # Examples
//!
//! ```ignore
//! let mut drive = Drive::new(motors, embassy_time::Delay);
//!
//! // Back up for 400 ms, then stop
//! drive.move_for(Direction::Backward, 400).await;
//!
//! // Swing left for 300 ms, then stop
//! drive.turn_for(Direction::TurnLeft, 300).await?;
//! ```

use embedded_hal_async::delay::DelayNs;

use crate::direction::{Direction, WheelAction};
use crate::error::{Error, Result};

/// Per-side motor primitive interface.
///
/// Implementations must never drive both directions of one H-bridge side at
/// the same time.
pub trait MotorDriver {
    /// Sets the left motor.
    fn set_left(&mut self, action: WheelAction);

    /// Sets the right motor.
    fn set_right(&mut self, action: WheelAction);
}

impl<T: MotorDriver + ?Sized> MotorDriver for &mut T {
    fn set_left(&mut self, action: WheelAction) {
        T::set_left(self, action)
    }

    fn set_right(&mut self, action: WheelAction) {
        T::set_right(self, action)
    }
}

/// Motor driver plus delay source.
pub struct Drive<M, D> {
    motors: M,
    delay: D,
    direction: Direction,
}

impl<M: MotorDriver, D: DelayNs> Drive<M, D> {
    /// Takes ownership of the motors and stops them.
    pub fn new(motors: M, delay: D) -> Self {
        let mut drive = Self {
            motors,
            delay,
            direction: Direction::Stop,
        };
        drive.set_direction(Direction::Stop);
        drive
    }

    /// Applies a direction to both motor sides immediately.
    pub fn set_direction(&mut self, direction: Direction) {
        let (left, right) = direction.wheel_actions();
        self.motors.set_left(left);
        self.motors.set_right(right);
        if direction != self.direction {
            trace!("drive {:?} -> {:?}", self.direction, direction);
        }
        self.direction = direction;
    }

    /// Direction the motors were last set to.
    pub fn current_direction(&self) -> Direction {
        self.direction
    }

    pub fn stop(&mut self) {
        self.set_direction(Direction::Stop);
    }

    /// Drives `direction` for `duration_ms`, then stops.
    pub async fn move_for(&mut self, direction: Direction, duration_ms: u32) {
        self.set_direction(direction);
        if duration_ms > 0 {
            self.delay.delay_ms(duration_ms).await;
        }
        self.stop();
    }

    /// Turns in place for `duration_ms`, then stops.
    ///
    /// Anything other than `TurnLeft`/`TurnRight` is rejected with
    /// [`Error::NotATurn`] and the motors are left as they were.
    pub async fn turn_for(&mut self, direction: Direction, duration_ms: u32) -> Result<()> {
        if !direction.is_turn() {
            return Err(Error::NotATurn(direction));
        }
        self.move_for(direction, duration_ms).await;
        Ok(())
    }

    /// Returns the motor driver and delay.
    pub fn into_parts(self) -> (M, D) {
        (self.motors, self.delay)
    }
}
