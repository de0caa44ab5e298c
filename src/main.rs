// Copyright (c) 2025 Kevin Thomas
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

//! RP2350A Desk Robot Firmware
//!
//! Reactive wandering for a Waveshare Pico2Go (RP2350-Plus): drive forward,
//! back away and turn when something is close ahead, and never roll off the
//! edge of the desk.
//!
//! # Hardware Configuration
//! - **Microcontroller**: RP2350A (ARM Cortex-M33)
//! - **Motors**: Dual DC motors with H-bridge driver
//!   - Left motor: enable on GPIO 16 (PWMA), direction on GPIO 17 (AIN2) & GPIO 18 (AIN1)
//!   - Right motor: enable on GPIO 21 (PWMB), direction on GPIO 19 (BIN1) & GPIO 20 (BIN2)
//! - **Ultrasonic ranger**: trigger on GPIO 14, echo on GPIO 15
//! - **Edge sensors**: IR reflectance on GPIO 26..29 (ADC0..ADC3)
//! - **Touch input**: GPIO 2 (active low, pull-up)
//! - **Status LED**: GPIO 25, toggled on every state change
//!
//! # Build
//! ```bash
//! cargo build --release --features rp2350 --target thumbv8m.main-none-eabihf
//! ```

#![no_std]
#![no_main]

mod motor;
mod sensors;

use defmt::*;
use deskbot_nav::{EchoRanger, NavConfig, NavController};
use embassy_executor::Spawner;
use embassy_rp::adc::{Adc, Channel, Config as AdcConfig};
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::pwm::Pwm;
use embassy_time::{Delay, Timer};
use {defmt_rtt as _, panic_probe as _};

use crate::motor::{HBridgeMotors, pwm_config};
use crate::sensors::{AdcEdgeSensors, UptimeClock};

/// Program metadata for picotool info command
#[unsafe(link_section = ".bi_entries")]
#[used]
pub static PICOTOOL_ENTRIES: [embassy_rp::binary_info::EntryAddr; 4] = [
    embassy_rp::binary_info::rp_program_name!(c"Deskbot"),
    embassy_rp::binary_info::rp_program_description!(c"RP2350A desk robot with edge and obstacle avoidance"),
    embassy_rp::binary_info::rp_cargo_version!(),
    embassy_rp::binary_info::rp_program_build_attribute!(),
];

/// Main navigation task
///
/// # Initialization Sequence
/// 1. Configure the H-bridge and hold both enable channels on
/// 2. Configure the ultrasonic ranger and the edge sensor ADC channels
/// 3. Enter the fixed-period control loop
///
/// Never returns.
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("RP2350A Deskbot Starting!");
    let p = embassy_rp::init(Default::default());
    let config = NavConfig::default();

    let mut led = Output::new(p.PIN_25, Level::Low);

    let motors = HBridgeMotors::new(
        Pwm::new_output_a(p.PWM_SLICE0, p.PIN_16, pwm_config()),
        Pwm::new_output_b(p.PWM_SLICE2, p.PIN_21, pwm_config()),
        Output::new(p.PIN_18, Level::Low), // AIN1
        Output::new(p.PIN_17, Level::Low), // AIN2
        Output::new(p.PIN_19, Level::Low), // BIN1
        Output::new(p.PIN_20, Level::Low), // BIN2
    );

    let ranger = EchoRanger::new(
        Output::new(p.PIN_14, Level::Low),
        Input::new(p.PIN_15, Pull::Down),
        UptimeClock,
        Delay,
        config.echo,
    );

    let edges = AdcEdgeSensors::new(
        Adc::new_blocking(p.ADC, AdcConfig::default()),
        [
            Channel::new_pin(p.PIN_26, Pull::None),
            Channel::new_pin(p.PIN_27, Pull::None),
            Channel::new_pin(p.PIN_28, Pull::None),
            Channel::new_pin(p.PIN_29, Pull::None),
        ],
    );

    let touch = Input::new(p.PIN_2, Pull::Up);

    let mut nav = NavController::new(config, ranger, edges, motors, Delay);

    info!(
        "Deskbot ready: {:?}, {:?} turns, tick {} ms",
        config.behavior_mode, config.turn_policy, config.tick_period_ms
    );
    led.set_high();

    loop {
        if touch.is_low() {
            nav.trigger_interaction();
        }

        let outcome = nav.tick().await;
        if outcome.changed() {
            led.toggle();
            debug!("{:?}", outcome);
        }

        Timer::after_millis(u64::from(config.tick_period_ms)).await;
    }
}
