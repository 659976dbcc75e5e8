//! TCS34725 RGBC colour sensor (I2C, fixed address 0x29).
//!
//! Register access uses the COMMAND bit (0x80) with auto-increment so the
//! four 16-bit channel counts (C, R, G, B) come back in one 8-byte burst.
//! Data registers read as zero until the first integration completes, so
//! reads are gated on STATUS.AVALID.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use log::{debug, info};

use crate::sensors::ColorSensor;
use crate::sensors::color::RawColor;

pub const ADDRESS: u8 = 0x29;

const COMMAND_BIT: u8 = 0x80;
const AUTO_INCREMENT: u8 = 0x20;

const REG_ENABLE: u8 = 0x00;
const REG_ATIME: u8 = 0x01;
const REG_CONTROL: u8 = 0x0F;
const REG_ID: u8 = 0x12;
const REG_STATUS: u8 = 0x13;
const REG_CDATAL: u8 = 0x14;

const ENABLE_PON: u8 = 0x01;
const ENABLE_AEN: u8 = 0x02;

/// RGBC channels hold a completed integration.
const STATUS_AVALID: u8 = 0x01;

/// TCS34721/TCS34725 and TCS34723/TCS34727 ID values.
const KNOWN_IDS: [u8; 2] = [0x44, 0x4D];

/// Oscillator warm-up after PON (datasheet: 2.4 ms).
const POWER_ON_DELAY_MS: u32 = 3;

/// One integration period for `atime`: 2.4 ms per cycle, plus 1 ms slack.
pub fn integration_ms(atime: u8) -> u32 {
    (256 - u32::from(atime)) * 12 / 5 + 1
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tcs34725Error {
    Bus,
    UnknownId(u8),
    /// No integration has completed yet.
    NotReady,
}

impl core::fmt::Display for Tcs34725Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Bus => write!(f, "I2C transfer failed"),
            Self::UnknownId(id) => write!(f, "unexpected ID 0x{:02X}", id),
            Self::NotReady => write!(f, "no completed integration"),
        }
    }
}

pub struct Tcs34725<I2C> {
    i2c: I2C,
    initialised: bool,
}

impl<I2C: I2c> Tcs34725<I2C> {
    pub fn new(i2c: I2C) -> Self {
        Self {
            i2c,
            initialised: false,
        }
    }

    /// Probe the ID, power up, start RGBC integration, and wait out the
    /// first integration period.
    pub fn init(&mut self, delay: &mut impl DelayNs, atime: u8, gain: u8) -> Result<(), Tcs34725Error> {
        let id = self.read_reg(REG_ID)?;
        if !KNOWN_IDS.contains(&id) {
            return Err(Tcs34725Error::UnknownId(id));
        }
        self.write_reg(REG_ATIME, atime)?;
        self.write_reg(REG_CONTROL, gain & 0x03)?;
        self.write_reg(REG_ENABLE, ENABLE_PON)?;
        delay.delay_ms(POWER_ON_DELAY_MS);
        self.write_reg(REG_ENABLE, ENABLE_PON | ENABLE_AEN)?;
        delay.delay_ms(integration_ms(atime));
        self.initialised = true;
        info!("TCS34725: id=0x{:02X} atime=0x{:02X} gain={}", id, atime, gain);
        Ok(())
    }

    pub fn read_raw(&mut self) -> Result<RawColor, Tcs34725Error> {
        if self.read_reg(REG_STATUS)? & STATUS_AVALID == 0 {
            return Err(Tcs34725Error::NotReady);
        }
        let mut buf = [0u8; 8];
        self.i2c
            .write_read(ADDRESS, &[COMMAND_BIT | AUTO_INCREMENT | REG_CDATAL], &mut buf)
            .map_err(|_| Tcs34725Error::Bus)?;
        let word = |i: usize| u16::from_le_bytes([buf[i], buf[i + 1]]);
        Ok(RawColor {
            clear: word(0),
            red: word(2),
            green: word(4),
            blue: word(6),
        })
    }

    fn read_reg(&mut self, reg: u8) -> Result<u8, Tcs34725Error> {
        let mut buf = [0u8; 1];
        self.i2c
            .write_read(ADDRESS, &[COMMAND_BIT | reg], &mut buf)
            .map_err(|_| Tcs34725Error::Bus)?;
        Ok(buf[0])
    }

    fn write_reg(&mut self, reg: u8, value: u8) -> Result<(), Tcs34725Error> {
        self.i2c
            .write(ADDRESS, &[COMMAND_BIT | reg, value])
            .map_err(|_| Tcs34725Error::Bus)
    }
}

impl<I2C: I2c> ColorSensor for Tcs34725<I2C> {
    fn read_rgbc(&mut self) -> Option<RawColor> {
        if !self.initialised {
            return None;
        }
        match self.read_raw() {
            Ok(raw) => Some(raw),
            Err(e) => {
                debug!("TCS34725: {}", e);
                None
            }
        }
    }
}
