//! End-user chassis surfaces: the GPIO two-motor [`WheelBot`] and the
//! PWM-board [`PwmChassis`].
//!
//! Both share one deliberate contract carried over from the reference
//! design: `left` and `right` sleep for the requested delay and then return
//! **with the motors still running**. Callers must invoke `stop` themselves.

use std::time::Duration;

use tracing::debug;

use crate::{
    controller::PwmController,
    error::RobotError,
    model::{Direction, MotorChannel, PinId, ServoChannel},
    sonar::{Sonar, DEFAULT_ECHO_TIMEOUT},
    transport::{Clock, DigitalOutput, Gpio, PwmBus},
};

/// Pin assignment for [`WheelBot`]. Defaults match the reference wiring:
/// ultrasound trigger on 26, echo on 22, motor driver inputs on 18-21.
#[derive(Debug, Clone)]
pub struct WheelBotConfig {
    pub trigger_pins: Vec<u8>,
    pub echo_pins: Vec<u8>,
    pub in1: u8,
    pub in2: u8,
    pub in3: u8,
    pub in4: u8,
}

impl Default for WheelBotConfig {
    fn default() -> Self {
        Self {
            trigger_pins: vec![26],
            echo_pins: vec![22],
            in1: 18,
            in2: 19,
            in3: 20,
            in4: 21,
        }
    }
}

struct ValidatedPins {
    trigger: Vec<PinId>,
    echo: Vec<PinId>,
    in1: PinId,
    in2: PinId,
    in3: PinId,
    in4: PinId,
}

impl WheelBotConfig {
    /// Range-checks every pin, rejects duplicates, and requires the trigger
    /// and echo lists to pair up one to one.
    fn validate(&self) -> Result<ValidatedPins, RobotError> {
        if self.trigger_pins.len() != self.echo_pins.len() {
            return Err(RobotError::MismatchedSensorPins {
                trigger: self.trigger_pins.len(),
                echo: self.echo_pins.len(),
            });
        }

        let mut seen = Vec::new();
        let mut claim = |pin: u8| -> Result<PinId, RobotError> {
            let id = PinId::new(pin)?;
            if seen.contains(&pin) {
                return Err(RobotError::DuplicatePin(pin));
            }
            seen.push(pin);
            Ok(id)
        };

        let trigger = self
            .trigger_pins
            .iter()
            .map(|&pin| claim(pin))
            .collect::<Result<Vec<_>, _>>()?;
        let echo = self
            .echo_pins
            .iter()
            .map(|&pin| claim(pin))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ValidatedPins {
            trigger,
            echo,
            in1: claim(self.in1)?,
            in2: claim(self.in2)?,
            in3: claim(self.in3)?,
            in4: claim(self.in4)?,
        })
    }
}

/// Two-DC-motor chassis on a plain motor driver (digital direction inputs,
/// no speed control) with optional ultrasound rangers.
pub struct WheelBot<G: Gpio, C> {
    in1: G::Output,
    in2: G::Output,
    in3: G::Output,
    in4: G::Output,
    sonars: Vec<Sonar<G::Output, G::Input>>,
    clock: C,
    echo_timeout: Duration,
}

impl<G: Gpio, C> std::fmt::Debug for WheelBot<G, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WheelBot")
            .field("sonars", &self.sonars.len())
            .field("echo_timeout", &self.echo_timeout)
            .finish_non_exhaustive()
    }
}

impl<G: Gpio, C: Clock> WheelBot<G, C> {
    /// Validates the pin assignment and claims every line. Configuration
    /// problems fail here, never during a drive command.
    pub fn new(config: &WheelBotConfig, gpio: &mut G, clock: C) -> Result<Self, RobotError> {
        let pins = config.validate()?;

        let mut sonars = Vec::with_capacity(pins.trigger.len());
        for (trig, echo) in pins.trigger.into_iter().zip(pins.echo) {
            sonars.push(Sonar::new(gpio.output(trig)?, gpio.input(echo)?));
        }

        Ok(Self {
            in1: gpio.output(pins.in1)?,
            in2: gpio.output(pins.in2)?,
            in3: gpio.output(pins.in3)?,
            in4: gpio.output(pins.in4)?,
            sonars,
            clock,
            echo_timeout: DEFAULT_ECHO_TIMEOUT,
        })
    }

    /// Bounds each echo edge wait; see [`Sonar::measure_cm`].
    pub fn set_echo_timeout(&mut self, timeout: Duration) {
        self.echo_timeout = timeout;
    }

    /// Spins both motors forward. Relies on both motors being wired the
    /// same way round.
    pub fn forward(&mut self) -> Result<(), RobotError> {
        debug!("wheelbot forward");
        self.motor1(Direction::Forward)?;
        self.motor2(Direction::Forward)
    }

    pub fn backward(&mut self) -> Result<(), RobotError> {
        debug!("wheelbot backward");
        self.motor1(Direction::Reverse)?;
        self.motor2(Direction::Reverse)
    }

    /// Turns left for `delay`, then returns with the motors still running;
    /// follow with [`stop`](Self::stop).
    pub fn left(&mut self, delay: Duration) -> Result<(), RobotError> {
        debug!(?delay, "wheelbot left");
        self.stop()?;
        self.motor1(Direction::Reverse)?;
        self.motor2(Direction::Forward)?;
        self.clock.sleep(delay);
        Ok(())
    }

    /// Turns right for `delay`, then returns with the motors still running;
    /// follow with [`stop`](Self::stop).
    pub fn right(&mut self, delay: Duration) -> Result<(), RobotError> {
        debug!(?delay, "wheelbot right");
        self.stop()?;
        self.motor1(Direction::Forward)?;
        self.motor2(Direction::Reverse)?;
        self.clock.sleep(delay);
        Ok(())
    }

    /// Drops every motor driver input low.
    pub fn stop(&mut self) -> Result<(), RobotError> {
        self.in1.set(false)?;
        self.in2.set(false)?;
        self.in3.set(false)?;
        self.in4.set(false)
    }

    /// One distance reading per configured sensor, in centimetres.
    pub fn distances(&mut self) -> Result<Vec<f64>, RobotError> {
        let mut readings = Vec::with_capacity(self.sonars.len());
        for sonar in &mut self.sonars {
            readings.push(sonar.measure_cm(&mut self.clock, self.echo_timeout)?);
        }
        Ok(readings)
    }

    /// Reading from the first configured sensor, for single-sensor builds.
    pub fn distance(&mut self) -> Result<f64, RobotError> {
        let sonar = self.sonars.first_mut().ok_or(RobotError::NoSensor)?;
        sonar.measure_cm(&mut self.clock, self.echo_timeout)
    }

    fn motor1(&mut self, direction: Direction) -> Result<(), RobotError> {
        let forward = direction == Direction::Forward;
        self.in1.set(forward)?;
        self.in2.set(!forward)
    }

    fn motor2(&mut self, direction: Direction) -> Result<(), RobotError> {
        let forward = direction == Direction::Forward;
        self.in3.set(forward)?;
        self.in4.set(!forward)
    }
}

/// Two-motor chassis driven through the I2C PWM controller board, with
/// proportional speed and servo outputs.
pub struct PwmChassis<B, C> {
    controller: PwmController<B>,
    clock: C,
    left_motor: MotorChannel,
    right_motor: MotorChannel,
}

impl<B: PwmBus, C: Clock> PwmChassis<B, C> {
    /// Board defaults: left motor on channel 3, right motor on channel 4.
    pub fn new(bus: B, clock: C) -> Result<Self, RobotError> {
        Self::with_motors(bus, clock, MotorChannel::new(3)?, MotorChannel::new(4)?)
    }

    pub fn with_motors(
        bus: B,
        clock: C,
        left_motor: MotorChannel,
        right_motor: MotorChannel,
    ) -> Result<Self, RobotError> {
        Ok(Self {
            controller: PwmController::new(bus)?,
            clock,
            left_motor,
            right_motor,
        })
    }

    /// Drives both motors forward at `speed_percent` (clamped to 0-100).
    pub fn forward(&mut self, speed_percent: f64) -> Result<(), RobotError> {
        self.controller
            .motor_on(self.right_motor, Direction::Forward, speed_percent)?;
        self.controller
            .motor_on(self.left_motor, Direction::Forward, speed_percent)
    }

    pub fn backward(&mut self, speed_percent: f64) -> Result<(), RobotError> {
        self.controller
            .motor_on(self.right_motor, Direction::Reverse, speed_percent)?;
        self.controller
            .motor_on(self.left_motor, Direction::Reverse, speed_percent)
    }

    /// Pivots left for `delay`, then returns with the motors still running;
    /// follow with [`stop`](Self::stop).
    pub fn left(&mut self, speed_percent: f64, delay: Duration) -> Result<(), RobotError> {
        self.controller.motor_off(self.right_motor)?;
        self.controller.motor_off(self.left_motor)?;
        self.controller
            .motor_on(self.right_motor, Direction::Forward, speed_percent)?;
        self.controller
            .motor_on(self.left_motor, Direction::Reverse, speed_percent)?;
        self.clock.sleep(delay);
        Ok(())
    }

    /// Pivots right for `delay`, then returns with the motors still running;
    /// follow with [`stop`](Self::stop).
    pub fn right(&mut self, speed_percent: f64, delay: Duration) -> Result<(), RobotError> {
        self.controller.motor_off(self.right_motor)?;
        self.controller.motor_off(self.left_motor)?;
        self.controller
            .motor_on(self.right_motor, Direction::Reverse, speed_percent)?;
        self.controller
            .motor_on(self.left_motor, Direction::Forward, speed_percent)?;
        self.clock.sleep(delay);
        Ok(())
    }

    /// Zeroes both motors.
    pub fn stop(&mut self) -> Result<(), RobotError> {
        self.controller.motor_off(self.right_motor)?;
        self.controller.motor_off(self.left_motor)
    }

    /// Positions a servo on the board's servo header.
    pub fn servo_write(&mut self, servo: ServoChannel, degrees: f64) -> Result<(), RobotError> {
        self.controller.servo_write(servo, degrees)
    }

    pub fn controller(&self) -> &PwmController<B> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut PwmController<B> {
        &mut self.controller
    }
}
