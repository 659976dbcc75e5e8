//! One-shot ADC initialisation and raw channel reads.
//!
//! Configures the ADC1 oneshot unit and the three probe channels using raw
//! ESP-IDF sys calls.  Called once from `main()` before the cycle loop
//! starts.  GPIO, LEDC and I2C are owned through `esp-idf-hal` drivers in
//! `main()` instead.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads ADC1 via the oneshot API.
//! On host/test: reads from a static table of atomics for injection.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicU16, Ordering};

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    AdcInitFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::AdcInitFailed(rc) => write!(f, "ADC1 init failed (rc={})", rc),
        }
    }
}

impl core::error::Error for HwInitError {}

/// Native ADC resolution.  The ESP32-S3 oneshot driver is 12-bit.
pub const ADC_NATIVE_BITS: u32 = 12;

#[cfg(target_os = "espidf")]
use log::info;

#[cfg(target_os = "espidf")]
use crate::pins;

// ── ADC (oneshot) ─────────────────────────────────────────────

#[cfg(target_os = "espidf")]
static mut ADC1_HANDLE: adc_oneshot_unit_handle_t = core::ptr::null_mut();

/// SAFETY: Must be called only from the single-threaded init path or the
/// main-loop ADC read path.  No concurrent access is possible because
/// `init_adc()` completes before the cycle loop starts.
#[cfg(target_os = "espidf")]
unsafe fn adc1_handle() -> adc_oneshot_unit_handle_t {
    unsafe { ADC1_HANDLE }
}

#[cfg(target_os = "espidf")]
pub fn init_adc() -> Result<(), HwInitError> {
    let init_cfg = adc_oneshot_unit_init_cfg_t {
        unit_id: adc_unit_t_ADC_UNIT_1,
        ulp_mode: adc_ulp_mode_t_ADC_ULP_MODE_DISABLE,
        ..Default::default()
    };
    // SAFETY: ADC1_HANDLE is only written here, once at boot.
    let ret = unsafe { adc_oneshot_new_unit(&init_cfg, &raw mut ADC1_HANDLE) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::AdcInitFailed(ret));
    }

    // 12 dB attenuation: ~0–3.1 V input range.  The probes' 5 V outputs
    // are divided down on the board.
    let chan_cfg = adc_oneshot_chan_cfg_t {
        atten: adc_atten_t_ADC_ATTEN_DB_12,
        bitwidth: adc_bitwidth_t_ADC_BITWIDTH_12,
    };

    for channel in [pins::TEMP_ADC_CHANNEL, pins::PH_ADC_CHANNEL, pins::TDS_ADC_CHANNEL] {
        // SAFETY: handle initialised above; single-threaded init path.
        let ret = unsafe { adc_oneshot_config_channel(adc1_handle(), channel, &chan_cfg) };
        if ret != ESP_OK as i32 {
            return Err(HwInitError::AdcInitFailed(ret));
        }
    }

    info!(
        "hw_init: ADC1 configured (CH{}=temp, CH{}=pH, CH{}=TDS)",
        pins::TEMP_ADC_CHANNEL,
        pins::PH_ADC_CHANNEL,
        pins::TDS_ADC_CHANNEL
    );
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_adc() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): ADC init skipped");
    Ok(())
}

/// One native-resolution sample, or `None` if the driver reports an error.
#[cfg(target_os = "espidf")]
pub fn adc1_read(channel: u32) -> Option<u16> {
    let mut raw: i32 = 0;
    // SAFETY: adc1_handle() contract, single-threaded main-loop access only.
    let ret = unsafe { adc_oneshot_read(adc1_handle(), channel, &mut raw) };
    if ret != ESP_OK as i32 {
        return None;
    }
    Some(raw.max(0) as u16)
}

// ── Host simulation ───────────────────────────────────────────

#[cfg(not(target_os = "espidf"))]
const SIM_CHANNELS: usize = 10;

/// Sentinel for a disconnected simulated channel.
#[cfg(not(target_os = "espidf"))]
const SIM_DISCONNECTED: u16 = u16::MAX;

#[cfg(not(target_os = "espidf"))]
static SIM_ADC: [AtomicU16; SIM_CHANNELS] = [const { AtomicU16::new(SIM_DISCONNECTED) }; SIM_CHANNELS];

/// Inject a native-resolution sample (`None` = disconnected).
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_adc(channel: u32, raw: Option<u16>) {
    if let Some(slot) = SIM_ADC.get(channel as usize) {
        slot.store(raw.unwrap_or(SIM_DISCONNECTED), Ordering::Relaxed);
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn adc1_read(channel: u32) -> Option<u16> {
    let raw = SIM_ADC.get(channel as usize)?.load(Ordering::Relaxed);
    (raw != SIM_DISCONNECTED).then_some(raw)
}
