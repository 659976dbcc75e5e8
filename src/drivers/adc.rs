//! Analog probe channel on ADC1.
//!
//! Rescales the native 12-bit sample to the 10-bit scale the probe
//! formulas are written against.

use crate::drivers::hw_init;
use crate::sensors::AnalogChannel;
use crate::sensors::analog::RAW_MAX;

const SHIFT: u32 = hw_init::ADC_NATIVE_BITS - 10;

pub struct AdcChannel {
    channel: u32,
}

impl AdcChannel {
    pub fn new(channel: u32) -> Self {
        Self { channel }
    }
}

impl AnalogChannel for AdcChannel {
    fn read_raw(&mut self) -> Option<u16> {
        let native = hw_init::adc1_read(self.channel)?;
        Some((native >> SHIFT).min(RAW_MAX))
    }
}
