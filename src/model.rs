use std::str::FromStr;

use crate::error::RobotError;

/// Motor rotation direction. "Off" is not a direction; use
/// [`PwmController::motor_off`](crate::PwmController::motor_off).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Reverse,
}

impl FromStr for Direction {
    type Err = RobotError;

    /// Parses the single-letter tokens used by the classroom API.
    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token {
            "f" | "forward" => Ok(Self::Forward),
            "r" | "reverse" => Ok(Self::Reverse),
            other => Err(RobotError::InvalidDirection(other.to_string())),
        }
    }
}

/// Motor output on the PWM controller board, channels 1-4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MotorChannel(u8);

impl MotorChannel {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 4;

    pub fn new(channel: u8) -> Result<Self, RobotError> {
        if (Self::MIN..=Self::MAX).contains(&channel) {
            Ok(Self(channel))
        } else {
            Err(RobotError::InvalidChannel(channel))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

/// Servo output on the PWM controller board, channels 1-8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ServoChannel(u8);

impl ServoChannel {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 8;

    pub fn new(channel: u8) -> Result<Self, RobotError> {
        if (Self::MIN..=Self::MAX).contains(&channel) {
            Ok(Self(channel))
        } else {
            Err(RobotError::InvalidChannel(channel))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

/// GPIO pin number, restricted to the board's 0-27 range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PinId(u8);

impl PinId {
    pub const MAX: u8 = 27;

    pub fn new(pin: u8) -> Result<Self, RobotError> {
        if pin <= Self::MAX {
            Ok(Self(pin))
        } else {
            Err(RobotError::InvalidPin(pin))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_tokens_parse() {
        assert_eq!("f".parse::<Direction>().unwrap(), Direction::Forward);
        assert_eq!("r".parse::<Direction>().unwrap(), Direction::Reverse);
        assert_eq!("forward".parse::<Direction>().unwrap(), Direction::Forward);
    }

    #[test]
    fn unknown_direction_token_is_an_error() {
        let err = "sideways".parse::<Direction>().unwrap_err();
        match err {
            RobotError::InvalidDirection(token) => assert_eq!(token, "sideways"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn channel_bounds() {
        assert!(MotorChannel::new(1).is_ok());
        assert!(MotorChannel::new(4).is_ok());
        assert!(MotorChannel::new(0).is_err());
        assert!(MotorChannel::new(5).is_err());

        assert!(ServoChannel::new(8).is_ok());
        assert!(ServoChannel::new(9).is_err());
    }

    #[test]
    fn pin_bounds() {
        assert!(PinId::new(0).is_ok());
        assert!(PinId::new(27).is_ok());
        match PinId::new(28).unwrap_err() {
            RobotError::InvalidPin(pin) => assert_eq!(pin, 28),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
