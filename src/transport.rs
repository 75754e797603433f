use std::{
    thread,
    time::{Duration, Instant},
};

use crate::{error::RobotError, model::PinId};

/// Byte-oriented register transport to the PWM controller chip.
///
/// Writes are blocking and fire-and-forget: a failed transaction surfaces as
/// [`RobotError::Bus`] and is never retried.
pub trait PwmBus {
    fn write_register(&mut self, register: u8, value: u8) -> Result<(), RobotError>;

    /// I2C general call (address 0) carrying one byte; used for the chip's
    /// software reset.
    fn general_call(&mut self, byte: u8) -> Result<(), RobotError>;
}

/// A digital output line.
pub trait DigitalOutput {
    fn set(&mut self, high: bool) -> Result<(), RobotError>;
}

/// A digital input line.
pub trait DigitalInput {
    fn is_high(&mut self) -> Result<bool, RobotError>;
}

/// Factory handing out claimed GPIO lines for validated pin ids.
pub trait Gpio {
    type Output: DigitalOutput;
    type Input: DigitalInput;

    fn output(&mut self, pin: PinId) -> Result<Self::Output, RobotError>;
    fn input(&mut self, pin: PinId) -> Result<Self::Input, RobotError>;
}

/// Monotonic microsecond clock plus blocking sleep.
pub trait Clock {
    fn now_micros(&mut self) -> u64;

    fn sleep_micros(&mut self, micros: u64);

    fn sleep(&mut self, duration: Duration) {
        self.sleep_micros(u64::try_from(duration.as_micros()).unwrap_or(u64::MAX));
    }
}

/// [`Clock`] backed by `std::time`.
#[derive(Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_micros(&mut self) -> u64 {
        u64::try_from(self.origin.elapsed().as_micros()).unwrap_or(u64::MAX)
    }

    fn sleep_micros(&mut self, micros: u64) {
        thread::sleep(Duration::from_micros(micros));
    }
}
