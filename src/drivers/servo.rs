//! Feeder servo driver (standard 50 Hz hobby servo).
//!
//! Angle maps linearly onto pulse width: 0° → 500 µs, 180° → 2500 µs,
//! inside a 20 ms frame.  Any PWM channel implementing
//! [`SetDutyCycle`] can drive it; on ESP-IDF that is an LEDC channel
//! configured at [`SERVO_PWM_FREQ_HZ`](crate::pins::SERVO_PWM_FREQ_HZ).

use embedded_hal::pwm::SetDutyCycle;

use crate::error::ActuatorError;

const FRAME_US: u16 = 20_000;
const MIN_PULSE_US: u16 = 500;
const MAX_PULSE_US: u16 = 2_500;
pub const MAX_ANGLE_DEG: u8 = 180;

/// Pulse width for `degrees`, clamped to the servo's travel.
pub fn pulse_width_us(degrees: u8) -> u16 {
    let deg = u32::from(degrees.min(MAX_ANGLE_DEG));
    let span = u32::from(MAX_PULSE_US - MIN_PULSE_US);
    MIN_PULSE_US + (span * deg / u32::from(MAX_ANGLE_DEG)) as u16
}

pub struct FeedServo<P> {
    pwm: P,
    angle: Option<u8>,
}

impl<P: SetDutyCycle> FeedServo<P> {
    pub fn new(pwm: P) -> Self {
        Self { pwm, angle: None }
    }

    pub fn set_angle(&mut self, degrees: u8) -> Result<(), ActuatorError> {
        let pulse = pulse_width_us(degrees);
        self.pwm
            .set_duty_cycle_fraction(pulse, FRAME_US)
            .map_err(|_| ActuatorError::PwmWriteFailed)?;
        self.angle = Some(degrees.min(MAX_ANGLE_DEG));
        Ok(())
    }

    /// Last angle successfully commanded; `None` before the first move.
    pub fn angle(&self) -> Option<u8> {
        self.angle
    }
}
