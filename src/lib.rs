//! Educational chassis control: motion primitives over GPIO and an I2C
//! PCA-style PWM controller board, with hardware-free transports for tests.

pub mod chassis;
pub mod controller;
pub mod conversion;
pub mod error;
pub mod model;
pub mod sonar;
pub mod transport;
pub mod transport_hal;

pub use chassis::{PwmChassis, WheelBot, WheelBotConfig};
pub use controller::PwmController;
pub use conversion::{BusOp, RegisterWrite};
pub use error::RobotError;
pub use model::{Direction, MotorChannel, PinId, ServoChannel};
pub use sonar::{Sonar, DEFAULT_ECHO_TIMEOUT};
pub use transport::{Clock, DigitalInput, DigitalOutput, Gpio, PwmBus, SystemClock};
pub use transport_hal::{HalBus, HalInput, HalOutput};
