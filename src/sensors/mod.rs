//! Sensor subsystem — conversion formulas and the aggregating [`SensorHub`].
//!
//! The hub owns one handle per physical input and exposes one read
//! operation per sensor type.  Each read takes exactly one raw sample and
//! converts it; nothing is buffered or smoothed across cycles.
//!
//! Handles are described by the small capability traits below so the hub
//! works the same over the ESP-IDF ADC, an I2C colour sensor behind a mux,
//! or a test double.

pub mod analog;
pub mod color;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use color::RawColor;

/// Logical identity of every sensor the node reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SensorId {
    Temperature,
    Ph,
    Tds,
    Weight,
    Color1,
    Color2,
    Color3,
}

impl SensorId {
    pub const COUNT: usize = 7;

    /// Publish order.
    pub const ALL: [SensorId; Self::COUNT] = [
        Self::Temperature,
        Self::Ph,
        Self::Tds,
        Self::Weight,
        Self::Color1,
        Self::Color2,
        Self::Color3,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Temperature => "temperature",
            Self::Ph => "ph",
            Self::Tds => "tds",
            Self::Weight => "weight",
            Self::Color1 => "color1",
            Self::Color2 => "color2",
            Self::Color3 => "color3",
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }
}

// ───────────────────────────────────────────────────────────────
// Hardware capabilities
// ───────────────────────────────────────────────────────────────

/// A single analog input sampled on the 10-bit (0..=1023) scale.
pub trait AnalogChannel {
    fn read_raw(&mut self) -> Option<u16>;
}

/// A load-cell amplifier that reports calibrated units averaged over
/// `samples` conversions.
pub trait LoadCell {
    fn average_units(&mut self, samples: u8) -> Option<f32>;
}

/// An RGBC colour sensor.
pub trait ColorSensor {
    fn read_rgbc(&mut self) -> Option<RawColor>;
}

// ───────────────────────────────────────────────────────────────
// SensorHub
// ───────────────────────────────────────────────────────────────

/// Owns every sensor handle for the lifetime of the process.
pub struct SensorHub<A, L, C> {
    temperature: A,
    ph: A,
    tds: A,
    load_cell: L,
    colors: [C; 3],
    load_cell_samples: u8,
}

impl<A, L, C> SensorHub<A, L, C>
where
    A: AnalogChannel,
    L: LoadCell,
    C: ColorSensor,
{
    /// Construct a new hub from pre-built handles (built in main where
    /// peripheral ownership is established).
    pub fn new(temperature: A, ph: A, tds: A, load_cell: L, colors: [C; 3], load_cell_samples: u8) -> Self {
        Self {
            temperature,
            ph,
            tds,
            load_cell,
            colors,
            load_cell_samples,
        }
    }

    pub fn read_temperature(&mut self) -> Result<i32> {
        let raw = self.temperature.read_raw().ok_or(Error::SensorUnavailable(SensorId::Temperature))?;
        Ok(analog::temperature_c(raw))
    }

    pub fn read_ph(&mut self) -> Result<i32> {
        let raw = self.ph.read_raw().ok_or(Error::SensorUnavailable(SensorId::Ph))?;
        Ok(analog::ph(raw))
    }

    pub fn read_tds(&mut self) -> Result<i32> {
        let raw = self.tds.read_raw().ok_or(Error::SensorUnavailable(SensorId::Tds))?;
        Ok(analog::tds_ppm(raw))
    }

    /// Averaged load-cell units, truncated toward zero.
    pub fn read_weight(&mut self) -> Result<i32> {
        let units = self
            .load_cell
            .average_units(self.load_cell_samples)
            .filter(|u| u.is_finite())
            .ok_or(Error::SensorUnavailable(SensorId::Weight))?;
        Ok(units as i32)
    }

    /// Colour temperature (K) from colour sensor `slot` (0..3).
    pub fn read_color(&mut self, slot: usize) -> Result<i32> {
        let id = match slot {
            0 => SensorId::Color1,
            1 => SensorId::Color2,
            _ => SensorId::Color3,
        };
        let sensor = self.colors.get_mut(slot).ok_or(Error::SensorUnavailable(id))?;
        let raw = sensor.read_rgbc().ok_or(Error::SensorUnavailable(id))?;
        Ok(color::color_temperature_k(raw) as i32)
    }

    /// Dispatch a read by logical identity.
    pub fn read(&mut self, id: SensorId) -> Result<i32> {
        match id {
            SensorId::Temperature => self.read_temperature(),
            SensorId::Ph => self.read_ph(),
            SensorId::Tds => self.read_tds(),
            SensorId::Weight => self.read_weight(),
            SensorId::Color1 => self.read_color(0),
            SensorId::Color2 => self.read_color(1),
            SensorId::Color3 => self.read_color(2),
        }
    }
}
