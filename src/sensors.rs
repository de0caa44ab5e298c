// Copyright (c) 2025 Kevin Thomas
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

//! RP2350 bindings for the navigation sensor traits.
//!
//! - Ultrasonic echo timing runs on the embassy uptime clock
//! - Edge sensors are four IR reflectance channels on ADC0..ADC3
//!   (GPIO 26..29), read back-to-back in blocking mode

use deskbot_nav::{EdgeSensors, Error, MicrosClock, Result};
use embassy_rp::adc::{Adc, Blocking, Channel};
use embassy_time::Instant;

/// Microseconds since boot from the embassy time driver.
pub struct UptimeClock;

impl MicrosClock for UptimeClock {
    fn now_micros(&mut self) -> u64 {
        Instant::now().as_micros()
    }
}

/// Four-channel IR reflectance array.
///
/// Channel order is front-left, front-right, rear-left, rear-right.
pub struct AdcEdgeSensors<'d> {
    adc: Adc<'d, Blocking>,
    channels: [Channel<'d>; 4],
}

impl<'d> AdcEdgeSensors<'d> {
    pub fn new(adc: Adc<'d, Blocking>, channels: [Channel<'d>; 4]) -> Self {
        Self { adc, channels }
    }
}

impl EdgeSensors<4> for AdcEdgeSensors<'_> {
    fn acquire_edge_channels(&mut self) -> Result<[u16; 4]> {
        let mut raw = [0u16; 4];
        for (value, channel) in raw.iter_mut().zip(self.channels.iter_mut()) {
            *value = self.adc.blocking_read(channel).map_err(|_| Error::Pin)?;
        }
        Ok(raw)
    }
}
