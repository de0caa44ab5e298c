// Copyright (c) 2025 Kevin Thomas
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

//! Sensor acquisition interfaces consumed by the control loop.
//!
//! Both calls block, and implementations must bound how long. A failed or
//! timed-out acquisition returns an [`Error`](crate::Error), which the
//! controller treats as "no hazard" for that cycle.

use crate::error::Result;

/// Forward ranging collaborator.
pub trait RangeSensor {
    /// Triggers one measurement and returns the echo high time in µs.
    fn acquire_range_timing(&mut self) -> Result<u32>;
}

/// Downward edge sensor collaborator with `N` channels.
pub trait EdgeSensors<const N: usize> {
    /// Reads every channel once, in index order.
    fn acquire_edge_channels(&mut self) -> Result<[u16; N]>;
}

impl<T: RangeSensor + ?Sized> RangeSensor for &mut T {
    fn acquire_range_timing(&mut self) -> Result<u32> {
        T::acquire_range_timing(self)
    }
}

impl<T: EdgeSensors<N> + ?Sized, const N: usize> EdgeSensors<N> for &mut T {
    fn acquire_edge_channels(&mut self) -> Result<[u16; N]> {
        T::acquire_edge_channels(self)
    }
}
