// Copyright (c) 2025 Kevin Thomas
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

//! HC-SR04 style ultrasonic echo timing.
//!
//! # Timing
//!
//! ```text
//! TRIG  ─┐10µs┌──────────────────────────────────────
//!        └────┘
//! ECHO  ───────────────┌──────── t ────────┐─────────
//!                      └ rise              └ fall
//! ```
//!
//! The echo stays high for the round trip time `t` (about 58 µs per cm).
//! With nothing in range the module holds echo high for roughly 38 ms.
//!
//! # Bounds
//!
//! Waiting for either echo edge is limited twice over:
//! - a deadline [`EchoConfig::timeout_us`] after the trigger, shared by both edges
//! - a poll budget [`EchoConfig::max_polls`] per edge, so a clock that stops
//!   advancing still cannot hang the loop
//!
//! Running out of either reports [`Error::SensingTimeout`].

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use crate::config::EchoConfig;
use crate::error::{Error, Result};
use crate::sensor::RangeSensor;

/// Free-running microsecond clock.
pub trait MicrosClock {
    fn now_micros(&mut self) -> u64;
}

/// Ultrasonic ranger driving a trigger pin and timing the echo pin.
pub struct EchoRanger<T, E, C, D> {
    trigger: T,
    echo: E,
    clock: C,
    delay: D,
    config: EchoConfig,
}

impl<T, E, C, D> EchoRanger<T, E, C, D>
where
    T: OutputPin,
    E: InputPin,
    C: MicrosClock,
    D: DelayNs,
{
    /// Creates a ranger. The trigger pin should already be low.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let trigger = Output::new(p.PIN_14, Level::Low);
    /// let echo = Input::new(p.PIN_15, Pull::Down);
    /// let ranger = EchoRanger::new(trigger, echo, UptimeClock, Delay, EchoConfig::default());
    /// ```
    pub fn new(trigger: T, echo: E, clock: C, delay: D, config: EchoConfig) -> Self {
        Self {
            trigger,
            echo,
            clock,
            delay,
            config,
        }
    }

    /// Fires one trigger pulse and times the echo.
    ///
    /// # Returns
    ///
    /// * `Ok(us)` - Echo high time in microseconds
    /// * `Err(Error::SensingTimeout)` - Echo never rose or never fell in time
    /// * `Err(Error::Pin)` - A pin could not be driven or read
    pub fn measure_echo_us(&mut self) -> Result<u32> {
        self.trigger.set_high().map_err(|_| Error::Pin)?;
        self.delay.delay_us(self.config.trigger_pulse_us);
        self.trigger.set_low().map_err(|_| Error::Pin)?;

        let deadline = self.clock.now_micros().saturating_add(self.config.timeout_us);
        let rise = self.wait_for_level(true, deadline)?;
        let fall = self.wait_for_level(false, deadline)?;

        Ok(u32::try_from(fall.saturating_sub(rise)).unwrap_or(u32::MAX))
    }

    /// Returns the pins, clock and delay.
    pub fn release(self) -> (T, E, C, D) {
        (self.trigger, self.echo, self.clock, self.delay)
    }

    /// Polls the echo pin until it reads `high`, returning the time it did.
    fn wait_for_level(&mut self, high: bool, deadline: u64) -> Result<u64> {
        for _ in 0..self.config.max_polls {
            let level = self.echo.is_high().map_err(|_| Error::Pin)?;
            let now = self.clock.now_micros();
            if level == high {
                return Ok(now);
            }
            if now > deadline {
                return Err(Error::SensingTimeout);
            }
        }
        Err(Error::SensingTimeout)
    }
}

impl<T, E, C, D> RangeSensor for EchoRanger<T, E, C, D>
where
    T: OutputPin,
    E: InputPin,
    C: MicrosClock,
    D: DelayNs,
{
    fn acquire_range_timing(&mut self) -> Result<u32> {
        self.measure_echo_us()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;
    use core::convert::Infallible;
    use embedded_hal::digital::ErrorType;

    /// Clock that moves forward `step` µs every time it is read.
    struct SteppingClock<'a> {
        now: &'a Cell<u64>,
        step: u64,
    }

    impl MicrosClock for SteppingClock<'_> {
        fn now_micros(&mut self) -> u64 {
            let now = self.now.get() + self.step;
            self.now.set(now);
            now
        }
    }

    /// Echo line that is high over `[from, until)` on the shared clock.
    struct ScriptedEcho<'a> {
        now: &'a Cell<u64>,
        high: Option<(u64, u64)>,
    }

    impl ErrorType for ScriptedEcho<'_> {
        type Error = Infallible;
    }

    impl InputPin for ScriptedEcho<'_> {
        fn is_high(&mut self) -> core::result::Result<bool, Infallible> {
            let now = self.now.get();
            Ok(matches!(self.high, Some((from, until)) if now >= from && now < until))
        }

        fn is_low(&mut self) -> core::result::Result<bool, Infallible> {
            self.is_high().map(|high| !high)
        }
    }

    #[derive(Default)]
    struct Trigger {
        high: bool,
        pulses: u32,
    }

    impl ErrorType for Trigger {
        type Error = Infallible;
    }

    impl OutputPin for Trigger {
        fn set_high(&mut self) -> core::result::Result<(), Infallible> {
            self.high = true;
            Ok(())
        }

        fn set_low(&mut self) -> core::result::Result<(), Infallible> {
            if self.high {
                self.pulses += 1;
            }
            self.high = false;
            Ok(())
        }
    }

    struct NoDelay;

    impl DelayNs for NoDelay {
        fn delay_ns(&mut self, _ns: u32) {}
    }

    fn ranger<'a>(
        now: &'a Cell<u64>,
        step: u64,
        high: Option<(u64, u64)>,
    ) -> EchoRanger<Trigger, ScriptedEcho<'a>, SteppingClock<'a>, NoDelay> {
        EchoRanger::new(
            Trigger::default(),
            ScriptedEcho { now, high },
            SteppingClock { now, step },
            NoDelay,
            EchoConfig::default(),
        )
    }

    #[test]
    fn times_the_echo_pulse() {
        let now = Cell::new(0);
        let mut ranger = ranger(&now, 1, Some((100, 1260)));

        assert_eq!(ranger.measure_echo_us(), Ok(1160));

        let (trigger, ..) = ranger.release();
        assert_eq!(trigger.pulses, 1);
        assert!(!trigger.high);
    }

    #[test]
    fn echo_that_never_rises_times_out() {
        let now = Cell::new(0);
        let mut ranger = ranger(&now, 10, None);

        assert_eq!(ranger.acquire_range_timing(), Err(Error::SensingTimeout));
        assert!(now.get() <= EchoConfig::default().timeout_us + 100);
    }

    #[test]
    fn echo_stuck_high_times_out() {
        let now = Cell::new(0);
        let mut ranger = ranger(&now, 10, Some((50, u64::MAX)));

        assert_eq!(ranger.measure_echo_us(), Err(Error::SensingTimeout));
    }

    #[test]
    fn stalled_clock_is_bounded_by_the_poll_budget() {
        let now = Cell::new(0);
        let mut ranger = ranger(&now, 0, None);

        assert_eq!(ranger.measure_echo_us(), Err(Error::SensingTimeout));
    }

    #[test]
    fn short_deadline_cuts_off_a_long_echo() {
        let now = Cell::new(0);
        let mut ranger = EchoRanger::new(
            Trigger::default(),
            ScriptedEcho {
                now: &now,
                high: Some((10, 40_000)),
            },
            SteppingClock { now: &now, step: 1 },
            NoDelay,
            EchoConfig {
                timeout_us: 30_000,
                ..EchoConfig::default()
            },
        );

        assert_eq!(ranger.measure_echo_us(), Err(Error::SensingTimeout));
    }
}
