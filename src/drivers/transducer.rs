//! Ultrasonic algae-control transducer.
//!
//! The transducer board has its own oscillator; the firmware only drives
//! its enable line.  A dumb on/off actuator: run time is decided by the
//! sequencer.

use embedded_hal::digital::OutputPin;

use crate::error::ActuatorError;

pub struct AlgaeTransducer<O> {
    enable: O,
    on: bool,
}

impl<O: OutputPin> AlgaeTransducer<O> {
    pub fn new(enable: O) -> Self {
        Self { enable, on: false }
    }

    pub fn set(&mut self, on: bool) -> Result<(), ActuatorError> {
        let res = if on {
            self.enable.set_high()
        } else {
            self.enable.set_low()
        };
        res.map_err(|_| ActuatorError::GpioWriteFailed)?;
        self.on = on;
        Ok(())
    }

    pub fn is_on(&self) -> bool {
        self.on
    }
}
