use std::time::Duration;

use crate::{
    error::RobotError,
    transport::{Clock, DigitalInput, DigitalOutput},
};

/// Default echo wait; roughly 8.5 m of round trip at the speed of sound.
pub const DEFAULT_ECHO_TIMEOUT: Duration = Duration::from_millis(100);

/// Centimetres of one-way distance per microsecond of echo pulse width.
const CM_PER_US: f64 = 0.0343 / 2.0;

/// HC-SR04-style ultrasound ranger on a trigger/echo pin pair.
pub struct Sonar<T, E> {
    trigger: T,
    echo: E,
}

impl<T: DigitalOutput, E: DigitalInput> Sonar<T, E> {
    pub fn new(trigger: T, echo: E) -> Self {
        Self { trigger, echo }
    }

    /// Fires a trigger pulse and measures the echo pulse width, in
    /// centimetres to the nearest obstacle.
    ///
    /// Each edge wait is bounded by `timeout`; a sensor that never answers
    /// yields [`RobotError::SensorTimeout`] instead of hanging.
    pub fn measure_cm<C: Clock>(
        &mut self,
        clock: &mut C,
        timeout: Duration,
    ) -> Result<f64, RobotError> {
        self.trigger.set(false)?;
        clock.sleep_micros(2);
        self.trigger.set(true)?;
        clock.sleep_micros(5);
        self.trigger.set(false)?;

        let rise = self.wait_for_level(clock, true, timeout)?;
        let fall = self.wait_for_level(clock, false, timeout)?;
        Ok(fall.saturating_sub(rise) as f64 * CM_PER_US)
    }

    /// Polls the echo line until it reads `level`, returning the timestamp of
    /// the first matching read.
    fn wait_for_level<C: Clock>(
        &mut self,
        clock: &mut C,
        level: bool,
        timeout: Duration,
    ) -> Result<u64, RobotError> {
        let timeout_us = u64::try_from(timeout.as_micros()).unwrap_or(u64::MAX);
        let deadline = clock.now_micros().saturating_add(timeout_us);
        loop {
            let now = clock.now_micros();
            if self.echo.is_high()? == level {
                return Ok(now);
            }
            if now >= deadline {
                return Err(RobotError::SensorTimeout(timeout));
            }
        }
    }
}
