use tracing::debug;

use crate::{
    conversion::{self, BusOp, RegisterWrite},
    error::RobotError,
    model::{Direction, MotorChannel, ServoChannel},
    transport::PwmBus,
};

/// Driver for the PCA-style PWM controller chip.
///
/// Keeps an optimistic local mirror of the chip's registers: every successful
/// write is recorded, so tests can assert on intended chip state without
/// hardware. There are no read-backs; the mirror tracks what was sent, not
/// what the chip holds.
pub struct PwmController<B> {
    bus: B,
    mirror: [u8; 256],
}

impl<B> std::fmt::Debug for PwmController<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PwmController")
            .field("mirror", &self.mirror)
            .finish_non_exhaustive()
    }
}

impl<B: PwmBus> PwmController<B> {
    /// Brings the chip up and returns the controller. See [`Self::init`].
    pub fn new(bus: B) -> Result<Self, RobotError> {
        let mut controller = Self {
            bus,
            mirror: [0; 256],
        };
        controller.init()?;
        Ok(controller)
    }

    /// Runs the chip bring-up sequence: software reset, 50 Hz prescale, all
    /// channels off, oscillator on. Safe to call again to re-reset the chip.
    pub fn init(&mut self) -> Result<(), RobotError> {
        for op in conversion::init_sequence() {
            match op {
                BusOp::GeneralCall(byte) => self.bus.general_call(byte)?,
                BusOp::Register(write) => self.apply(&[write])?,
            }
        }
        debug!("PWM controller initialised at 50 Hz");
        Ok(())
    }

    /// Drives `motor` in `direction` at `speed_percent`, clamped to 0-100.
    ///
    /// Issues four sequential register writes, active pair before the
    /// opposite pair's clear. Not atomic: a bus failure mid-sequence can
    /// leave the opposite pair uncleared.
    pub fn motor_on(
        &mut self,
        motor: MotorChannel,
        direction: Direction,
        speed_percent: f64,
    ) -> Result<(), RobotError> {
        debug!(motor = motor.get(), ?direction, speed_percent, "motor on");
        self.apply(&conversion::encode_motor(motor, direction, speed_percent))
    }

    /// Zeroes both register pairs of `motor`, regardless of prior state.
    pub fn motor_off(&mut self, motor: MotorChannel) -> Result<(), RobotError> {
        debug!(motor = motor.get(), "motor off");
        self.apply(&conversion::encode_motor_off(motor))
    }

    /// Positions `servo` at `degrees`, clamped to 0-180.
    pub fn servo_write(&mut self, servo: ServoChannel, degrees: f64) -> Result<(), RobotError> {
        debug!(servo = servo.get(), degrees, "servo write");
        self.apply(&conversion::encode_servo(servo, degrees))
    }

    /// Last value sent to `register`, per the local mirror.
    pub fn register(&self, register: u8) -> u8 {
        self.mirror[register as usize]
    }

    pub fn release(self) -> B {
        self.bus
    }

    fn apply(&mut self, writes: &[RegisterWrite]) -> Result<(), RobotError> {
        for write in writes {
            self.bus.write_register(write.register, write.value)?;
            self.mirror[write.register as usize] = write.value;
        }
        Ok(())
    }
}
