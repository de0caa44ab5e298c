// Copyright (c) 2025 Kevin Thomas
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

//! Reactive navigation core for a small desk robot.
//!
//! Fuses a forward ultrasonic ranger and downward IR edge sensors into a small
//! set of behavioral states, and drives a differential two-motor chassis
//! through timed avoidance maneuvers.
//!
//! # Architecture
//!
//! ```text
//!   NavController::tick ──► RangeSensor ──► DistanceUnit ──► obstacle ─┐
//!                       └─► EdgeSensors ──► EdgeDetector ──► edge ─────┤
//!                                                                      ▼
//!                              ManeuverSequencer ◄── avoidance ◄── next_state
//!                                      │
//!                                      ▼
//!                             Drive ──► MotorDriver (left / right)
//! ```
//!
//! Hardware sits behind small traits ([`RangeSensor`], [`EdgeSensors`],
//! [`MotorDriver`], [`MicrosClock`], `embedded-hal` pins and delays), so the
//! whole core runs on the host under `cargo test`.
//!
//! # Features
//!
//! - `defmt`: log through `defmt` and derive `defmt::Format` on public types
//! - `log`: log through the `log` facade
//! - `rp2350`: build the `deskbot` firmware binary

#![cfg_attr(not(test), no_std)]

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

pub mod behavior;
pub mod config;
pub mod controller;
pub mod direction;
pub mod distance;
pub mod drive;
pub mod echo;
pub mod edge;
pub mod error;
pub mod maneuver;
pub mod sensor;
pub mod state;

pub use behavior::BehaviorMode;
pub use config::{EchoConfig, NavConfig};
pub use controller::{NavController, TickOutcome};
pub use direction::{Direction, TurnSide, WheelAction};
pub use distance::{DistanceSample, DistanceUnit};
pub use drive::{Drive, MotorDriver};
pub use echo::{EchoRanger, MicrosClock};
pub use edge::{EdgeDetector, EdgeReading};
pub use error::{Error, Result};
pub use maneuver::{AvoidanceKind, ManeuverPlan, ManeuverSequencer, ManeuverStep, TurnPolicy};
pub use sensor::{EdgeSensors, RangeSensor};
pub use state::{NavState, next_state};
