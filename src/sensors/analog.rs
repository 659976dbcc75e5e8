//! Analog probe conversions: LM35-style temperature, pH, and TDS.
//!
//! Each probe is a voltage-output transducer sampled on a 10-bit scale
//! referenced to 5 V.  The conversions are fixed linear transforms with no
//! calibration state, truncated toward zero to an integer reading.

/// Full-scale raw value of the 10-bit sample scale.
pub const RAW_MAX: u16 = 1023;

const V_REF: f32 = 5.0;

/// Temperature probe: 10 mV/°C with a 500 mV offset at 0 °C.
const TEMP_OFFSET_V: f32 = 0.5;
const TEMP_C_PER_V: f32 = 100.0;

/// pH probe: 2.5 V at neutral, -180 mV per pH unit.
const PH_NEUTRAL: f32 = 7.0;
const PH_NEUTRAL_V: f32 = 2.5;
const PH_V_PER_UNIT: f32 = 0.18;

/// TDS probe: 100 ppm per volt.
const TDS_PPM_PER_V: f32 = 100.0;

/// Convert a raw sample to volts.  Samples above [`RAW_MAX`] are taken
/// at face value; the ADC adapter never produces them.
pub fn raw_to_voltage(raw: u16) -> f32 {
    raw as f32 * V_REF / RAW_MAX as f32
}

/// Water temperature in whole °C.  raw 0 → -50, raw 1023 → 450.
pub fn temperature_c(raw: u16) -> i32 {
    let celsius = (raw_to_voltage(raw) - TEMP_OFFSET_V) * TEMP_C_PER_V;
    celsius as i32
}

/// pH in whole units.  Decreases as the probe voltage rises.
pub fn ph(raw: u16) -> i32 {
    let ph = PH_NEUTRAL - (raw_to_voltage(raw) - PH_NEUTRAL_V) / PH_V_PER_UNIT;
    ph as i32
}

/// Total dissolved solids in whole ppm.
pub fn tds_ppm(raw: u16) -> i32 {
    let tds = raw_to_voltage(raw) * TDS_PPM_PER_V;
    tds as i32
}
