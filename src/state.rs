// Copyright (c) 2025 Kevin Thomas
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

//! Navigation states and the sensor-driven transition function.
//!
//! ```text
//!   Idle / Moving ── edge ─────────────► EdgeAvoidance ─────┐
//!   Idle / Moving ── obstacle, no edge ► ObstacleAvoidance ─┤ maneuver
//!   Idle / Moving ── clear ────────────► Moving             ▼
//!                                                         Moving
//!   Interacting ──── next tick ────────► Moving
//! ```
//!
//! `Interacting` is only entered through an external trigger.
//!
//! Edge detection pre-empts obstacle detection: driving off the desk is worse
//! than bumping into something, and only one hazard is acted on per cycle.
//! The avoidance states are left by the control loop after the maneuver runs,
//! never by [`next_state`].

use crate::maneuver::AvoidanceKind;

/// Behavioral state of the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NavState {
    /// Powered up, not yet driving
    Idle,
    /// Normal travel
    Moving,
    /// Backing away from a forward obstacle
    ObstacleAvoidance,
    /// Backing away from a drop-off
    EdgeAvoidance,
    /// One-shot reaction to an external touch or proximity trigger
    Interacting,
}

impl NavState {
    /// Label shown by display and feedback consumers.
    pub fn name(self) -> &'static str {
        match self {
            NavState::Idle => "IDLE",
            NavState::Moving => "MOVING",
            NavState::ObstacleAvoidance => "AVOIDING OBSTACLE",
            NavState::EdgeAvoidance => "AVOIDING EDGE",
            NavState::Interacting => "INTERACTING",
        }
    }

    /// The maneuver this state runs, if it is an avoidance state.
    pub fn avoidance_kind(self) -> Option<AvoidanceKind> {
        match self {
            NavState::ObstacleAvoidance => Some(AvoidanceKind::Obstacle),
            NavState::EdgeAvoidance => Some(AvoidanceKind::Edge),
            _ => None,
        }
    }
}

/// Advances the state machine from one cycle's hazard flags.
///
/// `Idle` and `Moving` react to the sensors; every other state is returned
/// unchanged.
///
/// # Examples
///
/// ```
/// use deskbot_nav::{next_state, NavState};
///
/// assert_eq!(next_state(NavState::Moving, true, true), NavState::EdgeAvoidance);
/// assert_eq!(next_state(NavState::Idle, false, false), NavState::Moving);
/// ```
pub fn next_state(current: NavState, obstacle: bool, edge: bool) -> NavState {
    match current {
        NavState::Idle | NavState::Moving => {
            if edge {
                NavState::EdgeAvoidance
            } else if obstacle {
                NavState::ObstacleAvoidance
            } else {
                NavState::Moving
            }
        }
        other => other,
    }
}
