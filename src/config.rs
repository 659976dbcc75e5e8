//! Node configuration parameters
//!
//! All tunable parameters for the PondNode.  Pin assignments live in
//! `pins.rs`; everything here is runtime data that can be supplied as JSON.

use heapless::String;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Error, Result};
use crate::sensors::SensorId;

/// Longest channel name the register maps can key on.
pub const CHANNEL_NAME_MAX: usize = 8;

const CHANNEL_TOO_LONG: &str = "channel name exceeds 8 bytes";

/// Channel names on the telemetry/command service.  Each name is at most
/// [`CHANNEL_NAME_MAX`] bytes; longer names are rejected when loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelMap {
    /// Publish channels in [`SensorId::ALL`] order.
    #[serde(deserialize_with = "channel_names")]
    pub telemetry: [String<CHANNEL_NAME_MAX>; SensorId::COUNT],
    /// Feed flag (1 = start, 0 = stop).
    #[serde(deserialize_with = "channel_name")]
    pub feed_flag: String<CHANNEL_NAME_MAX>,
    /// Algae-control interval in minutes.
    #[serde(deserialize_with = "channel_name")]
    pub algae_interval: String<CHANNEL_NAME_MAX>,
}

fn bounded<E: serde::de::Error>(name: &str) -> core::result::Result<String<CHANNEL_NAME_MAX>, E> {
    String::try_from(name).map_err(|()| E::custom(CHANNEL_TOO_LONG))
}

fn channel_name<'de, D: Deserializer<'de>>(d: D) -> core::result::Result<String<CHANNEL_NAME_MAX>, D::Error> {
    bounded(&std::string::String::deserialize(d)?)
}

fn channel_names<'de, D: Deserializer<'de>>(
    d: D,
) -> core::result::Result<[String<CHANNEL_NAME_MAX>; SensorId::COUNT], D::Error> {
    let names = <[std::string::String; SensorId::COUNT]>::deserialize(d)?;
    let mut out: [String<CHANNEL_NAME_MAX>; SensorId::COUNT] = Default::default();
    for (slot, name) in out.iter_mut().zip(&names) {
        *slot = bounded(name)?;
    }
    Ok(out)
}

impl ChannelMap {
    pub fn telemetry_name(&self, id: SensorId) -> &str {
        &self.telemetry[id.index()]
    }
}

impl Default for ChannelMap {
    fn default() -> Self {
        // Infallible: every literal is shorter than the capacity.
        let name = |s: &str| String::try_from(s).unwrap_or_default();
        Self {
            telemetry: [
                name("A0"),
                name("A1"),
                name("A2"),
                name("A3"),
                name("A4"),
                name("A5"),
                name("A6"),
            ],
            feed_flag: name("V7"),
            algae_interval: name("V8"),
        }
    }
}

/// Core node configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    // --- Timing ---
    /// Delay between the end of one cycle and the start of the next (ms)
    pub cycle_interval_ms: u32,

    // --- Load cell (HX711) ---
    /// Raw conversions averaged per weight reading
    pub load_cell_samples: u8,
    /// Raw count at zero load (tare)
    pub load_cell_offset: i32,
    /// Raw counts per reported unit
    pub load_cell_scale: f32,

    // --- Colour sensors (TCS34725) ---
    /// ATIME register value; integration = (256 - atime) × 2.4 ms
    pub color_atime: u8,
    /// CONTROL register gain code (0 = 1x, 1 = 4x, 2 = 16x, 3 = 60x)
    pub color_gain: u8,

    // --- Algae control ---
    /// Intervals longer than this are logged as a blocking risk (never capped)
    pub algae_warn_minutes: u32,

    // --- Channels ---
    pub channels: ChannelMap,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            // Timing
            cycle_interval_ms: 60_000, // 1/min

            // Load cell
            load_cell_samples: 10,
            load_cell_offset: 0,
            load_cell_scale: 1.0,

            // Colour sensors
            color_atime: 0xEB, // 50 ms
            color_gain: 1,     // 4x

            // Algae control
            algae_warn_minutes: 60,

            channels: ChannelMap::default(),
        }
    }
}

impl NodeConfig {
    /// Reject values the firmware cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.cycle_interval_ms == 0 {
            return Err(Error::Config("cycle_interval_ms must be > 0"));
        }
        if self.load_cell_samples == 0 {
            return Err(Error::Config("load_cell_samples must be > 0"));
        }
        if self.load_cell_scale == 0.0 || !self.load_cell_scale.is_finite() {
            return Err(Error::Config("load_cell_scale must be finite and non-zero"));
        }
        if self.color_gain > 3 {
            return Err(Error::Config("color_gain must be 0..=3"));
        }
        Ok(())
    }

    /// Parse a JSON document; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).map_err(|e| {
            if e.to_string().starts_with(CHANNEL_TOO_LONG) {
                Error::Config(CHANNEL_TOO_LONG)
            } else {
                Error::Config("malformed JSON")
            }
        })?;
        config.validate()?;
        Ok(config)
    }
}
