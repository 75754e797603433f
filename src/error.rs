use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum RobotError {
    #[error("invalid direction token {0:?} (expected \"f\" or \"r\")")]
    InvalidDirection(String),
    #[error("invalid channel: {0}")]
    InvalidChannel(u8),
    #[error("invalid GPIO pin: {0} (valid pins are 0-27)")]
    InvalidPin(u8),
    #[error("GPIO pin {0} assigned more than once")]
    DuplicatePin(u8),
    #[error("trigger/echo pin lists differ in length ({trigger} vs {echo})")]
    MismatchedSensorPins { trigger: usize, echo: usize },
    #[error("no ultrasound sensor configured")]
    NoSensor,
    #[error("no echo within {0:?}")]
    SensorTimeout(Duration),
    #[error("hardware transport error")]
    Bus,
}
