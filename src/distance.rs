// Copyright (c) 2025 Kevin Thomas
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

//! Echo timing to distance conversion.
//!
//! An HC-SR04 holds its echo line high for the sound's round trip. At
//! 343 m/s that is `2 / 34_300 s` per centimetre, about 58 µs/cm, so
//! `distance_cm = echo_us / 58`.

/// One forward ranging result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DistanceSample {
    /// Measured distance in whole centimetres
    Cm(u32),
    /// No valid echo was timed
    Timeout,
}

impl DistanceSample {
    /// Strict threshold test. A timeout is never within range.
    ///
    /// # Examples
    ///
    /// ```
    /// use deskbot_nav::DistanceSample;
    ///
    /// assert!(DistanceSample::Cm(19).is_within(20));
    /// assert!(!DistanceSample::Cm(20).is_within(20));
    /// assert!(!DistanceSample::Timeout.is_within(20));
    /// ```
    pub fn is_within(self, threshold_cm: u32) -> bool {
        match self {
            DistanceSample::Cm(cm) => cm < threshold_cm,
            DistanceSample::Timeout => false,
        }
    }

    /// Distance in centimetres, or `None` on timeout.
    pub fn cm(self) -> Option<u32> {
        match self {
            DistanceSample::Cm(cm) => Some(cm),
            DistanceSample::Timeout => None,
        }
    }
}

/// Converts raw echo timings with a fixed calibration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DistanceUnit {
    us_per_cm: u32,
}

impl DistanceUnit {
    /// Creates a converter for `us_per_cm` timing units per centimetre.
    pub fn new(us_per_cm: u32) -> Self {
        Self { us_per_cm }
    }

    /// Converts a raw echo timing to a distance.
    ///
    /// Non-positive timings mean the echo was never asserted and map to
    /// [`DistanceSample::Timeout`]. A zero calibration also yields `Timeout`.
    pub fn measure(&self, raw_timing: i32) -> DistanceSample {
        if raw_timing <= 0 {
            return DistanceSample::Timeout;
        }
        match raw_timing.unsigned_abs().checked_div(self.us_per_cm) {
            Some(cm) => DistanceSample::Cm(cm),
            None => DistanceSample::Timeout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{MICROSECONDS_PER_CM, OBSTACLE_DISTANCE_THRESHOLD_CM};

    fn unit() -> DistanceUnit {
        DistanceUnit::new(MICROSECONDS_PER_CM)
    }

    #[test]
    fn non_positive_timing_is_timeout() {
        for raw in [0, -1, -58, i32::MIN] {
            assert_eq!(unit().measure(raw), DistanceSample::Timeout, "raw {raw}");
        }
    }

    #[test]
    fn converts_with_floor_division() {
        let cases = [
            (1, 0),
            (29, 0),
            (57, 0),
            (58, 1),
            (59, 1),
            (116, 2),
            (580, 10),
            (1160, 20),
            (5800, 100),
        ];
        for (raw, cm) in cases {
            assert_eq!(unit().measure(raw), DistanceSample::Cm(cm), "raw {raw}");
        }
    }

    #[test]
    fn no_upper_clamp() {
        assert_eq!(
            unit().measure(i32::MAX),
            DistanceSample::Cm(i32::MAX as u32 / 58)
        );
    }

    #[test]
    fn conversion_is_monotonic() {
        let unit = unit();
        let mut last = 0;
        for raw in (1..20_000).step_by(7) {
            let cm = unit.measure(raw).cm().unwrap();
            assert!(cm >= last);
            last = cm;
        }
    }

    #[test]
    fn zero_calibration_degrades_to_timeout() {
        assert_eq!(DistanceUnit::new(0).measure(1160), DistanceSample::Timeout);
    }

    #[test]
    fn threshold_is_strict() {
        let threshold = OBSTACLE_DISTANCE_THRESHOLD_CM;
        assert!(DistanceSample::Cm(0).is_within(threshold));
        assert!(DistanceSample::Cm(5).is_within(threshold));
        assert!(DistanceSample::Cm(19).is_within(threshold));
        assert!(!DistanceSample::Cm(20).is_within(threshold));
        assert!(!DistanceSample::Cm(21).is_within(threshold));
        assert!(!DistanceSample::Cm(100).is_within(threshold));
        assert!(!DistanceSample::Cm(0).is_within(0));
        assert!(!DistanceSample::Timeout.is_within(threshold));
    }

    #[test]
    fn twenty_centimetres_is_not_an_obstacle() {
        let sample = unit().measure(1160);
        assert_eq!(sample, DistanceSample::Cm(20));
        assert!(!sample.is_within(OBSTACLE_DISTANCE_THRESHOLD_CM));
    }
}
