//! HX711 24-bit load-cell amplifier (bit-banged).
//!
//! DOUT goes LOW when a conversion is ready.  The value is clocked out
//! MSB-first on 24 PD_SCK pulses; one extra pulse selects channel A at
//! gain 128 for the next conversion.  Readings are averaged and scaled:
//! `units = (mean(raw) - offset) / scale`.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use log::debug;

use crate::sensors::LoadCell;

/// Poll interval and attempts while waiting for DOUT to go low.
/// At 10 SPS a conversion takes 100 ms; allow twice that.
const READY_POLL_MS: u32 = 1;
const READY_POLL_ATTEMPTS: u32 = 200;

/// PD_SCK high/low time (datasheet: 0.2–50 µs).
const SCK_HALF_PERIOD_US: u32 = 1;

/// Channel A, gain 128.
const GAIN_PULSES: u8 = 1;

pub struct Hx711<DOUT, SCK, D> {
    dout: DOUT,
    sck: SCK,
    delay: D,
    offset: i32,
    scale: f32,
}

impl<DOUT, SCK, D> Hx711<DOUT, SCK, D>
where
    DOUT: InputPin,
    SCK: OutputPin,
    D: DelayNs,
{
    pub fn new(dout: DOUT, sck: SCK, delay: D, offset: i32, scale: f32) -> Self {
        Self {
            dout,
            sck,
            delay,
            offset,
            scale,
        }
    }

    /// One raw signed 24-bit conversion.  `None` if the chip never
    /// signals ready or a pin access fails.
    pub fn read_raw(&mut self) -> Option<i32> {
        self.wait_ready()?;

        let mut value: u32 = 0;
        for _ in 0..24 {
            self.sck.set_high().ok()?;
            self.delay.delay_us(SCK_HALF_PERIOD_US);
            let bit = self.dout.is_high().ok()?;
            self.sck.set_low().ok()?;
            self.delay.delay_us(SCK_HALF_PERIOD_US);
            value = (value << 1) | u32::from(bit);
        }
        for _ in 0..GAIN_PULSES {
            self.sck.set_high().ok()?;
            self.delay.delay_us(SCK_HALF_PERIOD_US);
            self.sck.set_low().ok()?;
            self.delay.delay_us(SCK_HALF_PERIOD_US);
        }

        // Sign-extend from 24 bits.
        Some(((value << 8) as i32) >> 8)
    }

    /// Mean of `samples` raw conversions.
    pub fn read_average(&mut self, samples: u8) -> Option<f32> {
        if samples == 0 {
            return None;
        }
        let mut sum: i64 = 0;
        for _ in 0..samples {
            sum += i64::from(self.read_raw()?);
        }
        Some(sum as f32 / f32::from(samples))
    }

    fn wait_ready(&mut self) -> Option<()> {
        for _ in 0..READY_POLL_ATTEMPTS {
            if self.dout.is_low().ok()? {
                return Some(());
            }
            self.delay.delay_ms(READY_POLL_MS);
        }
        debug!("HX711: conversion not ready after {} ms", READY_POLL_ATTEMPTS * READY_POLL_MS);
        None
    }
}

impl<DOUT, SCK, D> LoadCell for Hx711<DOUT, SCK, D>
where
    DOUT: InputPin,
    SCK: OutputPin,
    D: DelayNs,
{
    fn average_units(&mut self, samples: u8) -> Option<f32> {
        let mean = self.read_average(samples)?;
        Some((mean - self.offset as f32) / self.scale)
    }
}
