// Copyright (c) 2025 Kevin Thomas
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

//! Error types for the navigation core.
//!
//! None of these are fatal. Sensing failures degrade to "no hazard" for the
//! current cycle and the sensors are sampled again on the next one; a bad
//! turn request leaves the motors untouched.

use crate::direction::Direction;

/// Result type alias
pub type Result<T> = core::result::Result<T, Error>;

/// Navigation error types
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Acquisition ran past its deadline or poll budget
    #[error("sensing timeout")]
    SensingTimeout,

    /// A GPIO or ADC read failed
    #[error("pin read failed")]
    Pin,

    /// A non-turn direction was passed to a turn-only primitive
    #[error("{0:?} is not a turn")]
    NotATurn(Direction),
}
