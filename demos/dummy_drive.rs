//! Drives the PWM chassis against a printing bus, no hardware required.

use std::time::Duration;

use edubot_chassis_controller::{
    PwmBus, PwmChassis, RobotError, ServoChannel, SystemClock,
};

/// Prints every register write instead of talking to a chip.
struct PrintingBus;

impl PwmBus for PrintingBus {
    fn write_register(&mut self, register: u8, value: u8) -> Result<(), RobotError> {
        println!("reg 0x{register:02X} <- 0x{value:02X}");
        Ok(())
    }

    fn general_call(&mut self, byte: u8) -> Result<(), RobotError> {
        println!("general call 0x{byte:02X}");
        Ok(())
    }
}

fn main() -> anyhow::Result<()> {
    let mut chassis = PwmChassis::new(PrintingBus, SystemClock::new())?;

    println!("-- forward at 50% --");
    chassis.forward(50.0)?;

    println!("-- pivot left for 250 ms --");
    chassis.left(30.0, Duration::from_millis(250))?;
    chassis.stop()?;

    println!("-- sweep a servo --");
    let servo = ServoChannel::new(1)?;
    for degrees in [0.0, 90.0, 180.0] {
        chassis.servo_write(servo, degrees)?;
    }

    Ok(())
}
