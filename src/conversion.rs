//! Register-level encoding for the PCA-style PWM controller chip.
//!
//! Pure, stateless: every function maps a logical actuator command to the
//! ordered single-byte register writes that realise it. Applying the writes
//! to a bus is [`PwmController`](crate::PwmController)'s job.

use crate::model::{Direction, MotorChannel, ServoChannel};

/// Fixed 7-bit I2C address of the PWM controller chip.
pub const CHIP_ADDRESS: u8 = 108;

/// First servo register block; servo channel `c` starts at `0x08 + (c-1)*4`.
pub const SRV_REG_BASE: u8 = 0x08;
/// First motor register block; motor `m` starts at `0x28 + 2*(m-1)*4`.
/// Each motor spans two blocks: a forward PWM pair and a reverse PWM pair.
pub const MOT_REG_BASE: u8 = 0x28;
/// Register stride of one PWM channel block.
pub const REG_OFFSET: u8 = 4;

const MODE1: u8 = 0x00;
const ALL_CHANNELS_BASE: u8 = 0xFA;
const PRESCALE: u8 = 0xFE;
/// Prescale byte for a 20 ms pulse period (50 Hz), derived from the chip's
/// internal oscillator. Servos dictate the 50 Hz refresh.
const PRESCALE_50HZ: u8 = 0x78;
/// General-call byte performing a software reset.
const SWRST: u8 = 0x06;
/// MODE1 value clearing the sleep bit, starting the oscillator.
const OSC_ON: u8 = 0x01;

/// A single-byte write at the chip address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterWrite {
    pub register: u8,
    pub value: u8,
}

/// One step of the chip bring-up sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusOp {
    /// I2C general call (address 0) carrying a single byte.
    GeneralCall(u8),
    Register(RegisterWrite),
}

const fn w(register: u8, value: u8) -> RegisterWrite {
    RegisterWrite { register, value }
}

/// Chip bring-up: software reset, 50 Hz prescale, all channels off, then the
/// sleep-bit clear that starts the oscillator. The order is a hardware
/// contract; waking the oscillator before the prescale and the channel
/// clears leaves the output timing undefined.
pub fn init_sequence() -> [BusOp; 7] {
    [
        BusOp::GeneralCall(SWRST),
        BusOp::Register(w(PRESCALE, PRESCALE_50HZ)),
        BusOp::Register(w(ALL_CHANNELS_BASE, 0)),
        BusOp::Register(w(ALL_CHANNELS_BASE + 1, 0)),
        BusOp::Register(w(ALL_CHANNELS_BASE + 2, 0)),
        BusOp::Register(w(ALL_CHANNELS_BASE + 3, 0)),
        BusOp::Register(w(MODE1, OSC_ON)),
    ]
}

/// Base register of a servo channel's block.
pub fn servo_base(servo: ServoChannel) -> u8 {
    SRV_REG_BASE + (servo.get() - 1) * REG_OFFSET
}

/// Base register of a motor's forward pair; the reverse pair sits one block
/// higher, at `motor_base(m) + 4`.
pub fn motor_base(motor: MotorChannel) -> u8 {
    MOT_REG_BASE + 2 * (motor.get() - 1) * REG_OFFSET
}

/// Scales a speed percentage to the chip's 12-bit duty range. Out-of-range
/// speeds clamp silently to [0, 100]; 100 % maps to 4095.
pub fn motor_pwm(speed_percent: f64) -> u16 {
    (speed_percent.clamp(0.0, 100.0) * 40.95).round() as u16
}

/// Maps an angle to duty counts: 0 degrees is a 0.5 ms pulse (102 counts),
/// 180 degrees is 2.5 ms (511 counts). Out-of-range angles clamp silently to
/// [0, 180]. Truncation keeps the result within 9 bits, so the high byte is
/// never more than 1.
pub fn servo_pwm(degrees: f64) -> u16 {
    (degrees.clamp(0.0, 180.0) * 2.2755 + 102.0) as u16
}

/// The four writes driving `motor` in `direction` at `speed_percent`.
///
/// The active pair is written before the opposite pair's clear, so the two
/// pairs are never both nonzero after any prefix of the sequence.
pub fn encode_motor(
    motor: MotorChannel,
    direction: Direction,
    speed_percent: f64,
) -> [RegisterWrite; 4] {
    let base = motor_base(motor);
    let pwm = motor_pwm(speed_percent);
    let low = (pwm & 0xFF) as u8;
    let high = ((pwm >> 8) & 0xFF) as u8;
    match direction {
        Direction::Forward => [
            w(base, low),
            w(base + 1, high),
            w(base + 4, 0),
            w(base + 5, 0),
        ],
        Direction::Reverse => [
            w(base + 4, low),
            w(base + 5, high),
            w(base, 0),
            w(base + 1, 0),
        ],
    }
}

/// The four writes zeroing both of `motor`'s register pairs.
pub fn encode_motor_off(motor: MotorChannel) -> [RegisterWrite; 4] {
    let base = motor_base(motor);
    [
        w(base, 0),
        w(base + 1, 0),
        w(base + 4, 0),
        w(base + 5, 0),
    ]
}

/// The two writes positioning `servo` at `degrees`.
pub fn encode_servo(servo: ServoChannel, degrees: f64) -> [RegisterWrite; 2] {
    let base = servo_base(servo);
    let pwm = servo_pwm(degrees);
    debug_assert!(pwm <= 511, "servo pwm {pwm} needs more than 9 bits");
    [
        w(base, (pwm & 0xFF) as u8),
        w(base + 1, ((pwm >> 8) & 0x01) as u8),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn motor(n: u8) -> MotorChannel {
        MotorChannel::new(n).unwrap()
    }

    fn servo(n: u8) -> ServoChannel {
        ServoChannel::new(n).unwrap()
    }

    #[test]
    fn motor_pwm_clamps_then_scales() {
        for speed in -50..=150 {
            let speed = f64::from(speed);
            let expected = (speed.clamp(0.0, 100.0) * 40.95).round() as u16;
            assert_eq!(motor_pwm(speed), expected);
        }
        assert_eq!(motor_pwm(0.0), 0);
        assert_eq!(motor_pwm(100.0), 4095);
        assert_eq!(motor_pwm(-1.0), 0);
        assert_eq!(motor_pwm(101.0), 4095);
    }

    #[test]
    fn servo_pwm_clamps_and_stays_within_nine_bits() {
        for degrees in -30..=210 {
            let pwm = servo_pwm(f64::from(degrees));
            assert!((102..=511).contains(&pwm), "pwm {pwm} for {degrees} degrees");
            assert!((pwm >> 8) <= 1);
        }
        assert_eq!(servo_pwm(0.0), 102);
        assert_eq!(servo_pwm(180.0), 511);
    }

    #[test]
    fn register_base_formulas() {
        for c in 1..=8 {
            assert_eq!(servo_base(servo(c)), 0x08 + (c - 1) * 4);
        }
        for m in 1..=2 {
            assert_eq!(motor_base(motor(m)), 0x28 + 2 * (m - 1) * 4);
        }
    }

    #[test]
    fn servo_channel_blocks_do_not_overlap() {
        let first = servo_base(servo(1));
        let last = servo_base(servo(8));
        assert_ne!(first, last);
        assert!(last - first >= 7 * REG_OFFSET);
    }

    #[test]
    fn servo_endpoints_byte_for_byte() {
        assert_eq!(
            encode_servo(servo(1), 0.0),
            [w(0x08, 0x66), w(0x09, 0x00)]
        );
        assert_eq!(
            encode_servo(servo(1), 180.0),
            [w(0x08, 0xFF), w(0x09, 0x01)]
        );
    }

    #[test]
    fn motor_full_speed_forward_byte_for_byte() {
        assert_eq!(
            encode_motor(motor(1), Direction::Forward, 100.0),
            [w(0x28, 0xFF), w(0x29, 0x0F), w(0x2C, 0x00), w(0x2D, 0x00)]
        );
    }

    #[test]
    fn reverse_swaps_the_pairs() {
        assert_eq!(
            encode_motor(motor(1), Direction::Reverse, 100.0),
            [w(0x2C, 0xFF), w(0x2D, 0x0F), w(0x28, 0x00), w(0x29, 0x00)]
        );
    }

    #[test]
    fn motor_off_is_four_zero_writes() {
        assert_eq!(
            encode_motor_off(motor(2)),
            [w(0x30, 0), w(0x31, 0), w(0x34, 0), w(0x35, 0)]
        );
    }

    #[test]
    fn active_pair_precedes_opposite_clear() {
        for direction in [Direction::Forward, Direction::Reverse] {
            let writes = encode_motor(motor(1), direction, 50.0);
            assert!(writes[0].value != 0 || writes[1].value != 0);
            assert_eq!(writes[2].value, 0);
            assert_eq!(writes[3].value, 0);
        }
    }

    #[test]
    fn init_sequence_order_is_fixed() {
        let ops = init_sequence();
        assert_eq!(ops[0], BusOp::GeneralCall(0x06));
        assert_eq!(ops[1], BusOp::Register(w(0xFE, 0x78)));
        for (i, op) in ops[2..6].iter().enumerate() {
            assert_eq!(*op, BusOp::Register(w(0xFA + i as u8, 0)));
        }
        assert_eq!(ops[6], BusOp::Register(w(0x00, 0x01)));
    }
}
