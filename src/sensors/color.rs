//! Correlated colour temperature (CCT) estimation from raw RGB counts.
//!
//! Maps the sensor's R/G/B channel counts onto CIE XYZ tristimulus values,
//! derives chromaticity (x, y), and applies McCamy's cubic approximation.
//! The clear channel is read alongside R/G/B but does not enter the
//! estimate.  Water colour drift (algae bloom, turbidity) shows up as a
//! shift in the estimated temperature.

/// One raw conversion from an RGBC colour sensor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RawColor {
    pub red: u16,
    pub green: u16,
    pub blue: u16,
    pub clear: u16,
}

/// Estimate colour temperature in kelvin.
///
/// Returns 0 when the estimate is undefined (all channels dark, or the
/// chromaticity lands on the McCamy pole) or negative.  Results saturate at
/// `u16::MAX`, the width the sensor vendor library reports in.
pub fn color_temperature_k(raw: RawColor) -> u16 {
    let r = raw.red as f32;
    let g = raw.green as f32;
    let b = raw.blue as f32;

    let x = (-0.142_82 * r) + (1.549_24 * g) + (-0.956_41 * b);
    let y = (-0.324_66 * r) + (1.578_37 * g) + (-0.731_91 * b);
    let z = (-0.682_02 * r) + (0.770_73 * g) + (0.563_32 * b);

    let sum = x + y + z;
    if sum == 0.0 {
        return 0;
    }
    let xc = x / sum;
    let yc = y / sum;

    let n = (xc - 0.3320) / (0.1858 - yc);
    let cct = (449.0 * n.powi(3)) + (3525.0 * n.powi(2)) + (6823.3 * n) + 5520.33;

    if !cct.is_finite() || cct <= 0.0 {
        return 0;
    }
    cct.min(u16::MAX as f32) as u16
}
