// Copyright (c) 2025 Kevin Thomas
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

//! H-bridge motor driver for the Pico2Go chassis.
//!
//! # Motor Pin Configuration
//!
//! ## Left Motor
//! - Enable: PWMA (GPIO 16)
//! - Forward: AIN1 (GPIO 18)
//! - Backward: AIN2 (GPIO 17)
//!
//! ## Right Motor
//! - Enable: PWMB (GPIO 21)
//! - Forward: BIN1 (GPIO 19)
//! - Backward: BIN2 (GPIO 20)
//!
//! The enable channels are held fully on; each wheel is driven or coasting,
//! with no speed levels in between.

use deskbot_nav::{MotorDriver, WheelAction};
use embassy_rp::gpio::Output;
use embassy_rp::pwm::{Config as PwmConfig, Pwm, SetDutyCycle};

/// PWM top value for 16-bit resolution
pub const PWM_TOP: u16 = 65535;

/// PWM configuration for both enable channels, starting at zero duty.
pub fn pwm_config() -> PwmConfig {
    let mut config = PwmConfig::default();
    config.top = PWM_TOP;
    config.compare_a = 0;
    config.compare_b = 0;
    config
}

/// One side of the H-bridge.
struct Side {
    /// Owned so the channel stays configured
    _enable: Pwm<'static>,
    fwd: Output<'static>,
    back: Output<'static>,
}

impl Side {
    fn new(mut enable: Pwm<'static>, fwd: Output<'static>, back: Output<'static>) -> Self {
        enable.set_duty_cycle_fully_on().ok();
        let mut side = Self {
            _enable: enable,
            fwd,
            back,
        };
        side.apply(WheelAction::Stop);
        side
    }

    /// Always drops the opposing pin before raising the requested one.
    fn apply(&mut self, action: WheelAction) {
        match action {
            WheelAction::Forward => {
                self.back.set_low();
                self.fwd.set_high();
            }
            WheelAction::Backward => {
                self.fwd.set_low();
                self.back.set_high();
            }
            WheelAction::Stop => {
                self.fwd.set_low();
                self.back.set_low();
            }
        }
    }
}

/// Dual DC motor H-bridge driver.
///
/// Never enables the forward and backward pins of one side together.
pub struct HBridgeMotors {
    left: Side,
    right: Side,
}

impl HBridgeMotors {
    /// Creates the driver with both sides enabled and coasting.
    ///
    /// # Arguments
    ///
    /// * `pwm_left` - Enable channel for the left motor (PWMA)
    /// * `pwm_right` - Enable channel for the right motor (PWMB)
    /// * `left_fwd` - Left motor forward (AIN1)
    /// * `left_back` - Left motor backward (AIN2)
    /// * `right_fwd` - Right motor forward (BIN1)
    /// * `right_back` - Right motor backward (BIN2)
    pub fn new(
        pwm_left: Pwm<'static>,
        pwm_right: Pwm<'static>,
        left_fwd: Output<'static>,
        left_back: Output<'static>,
        right_fwd: Output<'static>,
        right_back: Output<'static>,
    ) -> Self {
        Self {
            left: Side::new(pwm_left, left_fwd, left_back),
            right: Side::new(pwm_right, right_fwd, right_back),
        }
    }
}

impl MotorDriver for HBridgeMotors {
    fn set_left(&mut self, action: WheelAction) {
        self.left.apply(action);
    }

    fn set_right(&mut self, action: WheelAction) {
        self.right.apply(action);
    }
}
