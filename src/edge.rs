// Copyright (c) 2025 Kevin Thomas
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

//! Downward IR edge detection.
//!
//! Each channel faces the desk. A low reading means nothing reflected the IR
//! back, so the sensor is hanging over a drop-off.

/// Front-left sensor index
pub const FRONT_LEFT: usize = 0;
/// Front-right sensor index
pub const FRONT_RIGHT: usize = 1;
/// Rear-left sensor index (four-sensor chassis)
pub const REAR_LEFT: usize = 2;
/// Rear-right sensor index (four-sensor chassis)
pub const REAR_RIGHT: usize = 3;

/// Per-channel edge flags, index-stable across calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeReading<const N: usize> {
    channels: [bool; N],
}

impl<const N: usize> EdgeReading<N> {
    /// Wraps per-channel flags.
    pub fn new(channels: [bool; N]) -> Self {
        Self { channels }
    }

    /// A reading with no edge on any channel.
    pub fn clear() -> Self {
        Self {
            channels: [false; N],
        }
    }

    /// `true` if any single channel sees an edge.
    pub fn any(&self) -> bool {
        self.channels.iter().any(|&edge| edge)
    }

    /// Flag for one channel; out-of-range indices read as no edge.
    pub fn channel(&self, index: usize) -> bool {
        self.channels.get(index).copied().unwrap_or(false)
    }

    /// Indices of the channels that see an edge.
    pub fn triggered(&self) -> impl Iterator<Item = usize> + '_ {
        self.channels
            .iter()
            .enumerate()
            .filter(|(_, edge)| **edge)
            .map(|(index, _)| index)
    }

    pub fn as_array(&self) -> &[bool; N] {
        &self.channels
    }
}

#[cfg(feature = "defmt")]
impl<const N: usize> defmt::Format for EdgeReading<N> {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "EdgeReading({=[?]})", &self.channels[..])
    }
}

/// Thresholds raw channel values into an [`EdgeReading`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeDetector {
    threshold: u16,
}

impl EdgeDetector {
    pub fn new(threshold: u16) -> Self {
        Self { threshold }
    }

    /// Flags every channel strictly below the threshold.
    ///
    /// # Examples
    ///
    /// ```
    /// use deskbot_nav::EdgeDetector;
    ///
    /// let reading = EdgeDetector::new(500).detect(&[499, 500, 900, 12]);
    /// assert_eq!(reading.as_array(), &[true, false, false, true]);
    /// assert!(reading.any());
    /// ```
    pub fn detect<const N: usize>(&self, raw: &[u16; N]) -> EdgeReading<N> {
        EdgeReading::new(raw.map(|value| value < self.threshold))
    }
}
