//! Concrete transports over `embedded-hal` 1.0 traits, for boards whose HAL
//! exposes I2C buses and GPIO pins through those interfaces.

use embedded_hal::{
    digital::{InputPin, OutputPin},
    i2c::I2c,
};

use crate::{
    conversion::CHIP_ADDRESS,
    error::RobotError,
    transport::{DigitalInput, DigitalOutput, PwmBus},
};

/// [`PwmBus`] over any `embedded-hal` I2C bus. A register write is a two-byte
/// transaction (register, value) at the chip's 7-bit address.
pub struct HalBus<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C: I2c> HalBus<I2C> {
    /// Bus at the reference chip address (108).
    pub fn new(i2c: I2C) -> Self {
        Self::with_address(i2c, CHIP_ADDRESS)
    }

    pub fn with_address(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C: I2c> PwmBus for HalBus<I2C> {
    fn write_register(&mut self, register: u8, value: u8) -> Result<(), RobotError> {
        self.i2c
            .write(self.address, &[register, value])
            .map_err(|_| RobotError::Bus)
    }

    fn general_call(&mut self, byte: u8) -> Result<(), RobotError> {
        self.i2c.write(0x00, &[byte]).map_err(|_| RobotError::Bus)
    }
}

/// [`DigitalOutput`] wrapper around an `embedded-hal` output pin.
pub struct HalOutput<P>(pub P);

impl<P: OutputPin> DigitalOutput for HalOutput<P> {
    fn set(&mut self, high: bool) -> Result<(), RobotError> {
        let res = if high {
            self.0.set_high()
        } else {
            self.0.set_low()
        };
        res.map_err(|_| RobotError::Bus)
    }
}

/// [`DigitalInput`] wrapper around an `embedded-hal` input pin.
pub struct HalInput<P>(pub P);

impl<P: InputPin> DigitalInput for HalInput<P> {
    fn is_high(&mut self) -> Result<bool, RobotError> {
        self.0.is_high().map_err(|_| RobotError::Bus)
    }
}
