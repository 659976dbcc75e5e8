//! GPIO / peripheral pin assignments for the PondNode board (ESP32-S3).
//!
//! Single source of truth for the board wiring.  `main` takes concrete
//! `esp-idf-hal` pin singletons (`gpio.gpio7`, ...), so it pins each one
//! to the constant here with a compile-time assertion: changing a number
//! here without changing the wiring in `main` fails the build.

// ---------------------------------------------------------------------------
// Analog probes (ADC1, oneshot)
// ---------------------------------------------------------------------------

/// Temperature probe, ADC1 channel 3.  On the S3, ADC1 channel n is GPIO n+1.
pub const TEMP_ADC_GPIO: i32 = 4;
pub const TEMP_ADC_CHANNEL: u32 = 3;

/// pH probe, ADC1 channel 4.
pub const PH_ADC_GPIO: i32 = 5;
pub const PH_ADC_CHANNEL: u32 = 4;

/// TDS probe, ADC1 channel 5.
pub const TDS_ADC_GPIO: i32 = 6;
pub const TDS_ADC_CHANNEL: u32 = 5;

// ---------------------------------------------------------------------------
// Load cell amplifier (HX711, bit-banged)
// ---------------------------------------------------------------------------

/// HX711 DOUT, LOW when a conversion is ready.
pub const HX711_DOUT_GPIO: i32 = 7;
/// HX711 PD_SCK.
pub const HX711_SCK_GPIO: i32 = 15;

// ---------------------------------------------------------------------------
// Colour sensors (3× TCS34725 behind a TCA9548A mux on I2C0)
// ---------------------------------------------------------------------------

pub const I2C_SDA_GPIO: i32 = 8;
pub const I2C_SCL_GPIO: i32 = 9;
pub const I2C_FREQ_HZ: u32 = 100_000;

/// TCA9548A address with A0–A2 tied low.
pub const I2C_MUX_ADDR: u8 = 0x70;
/// Mux downstream ports for colour sensors 1–3.
pub const COLOR_MUX_PORTS: [u8; 3] = [0, 1, 2];

// ---------------------------------------------------------------------------
// Actuators
// ---------------------------------------------------------------------------

/// Feeder servo signal (LEDC).
pub const SERVO_PWM_GPIO: i32 = 16;
/// Hobby servo frame rate.
pub const SERVO_PWM_FREQ_HZ: u32 = 50;
/// LEDC timer resolution for the servo (14-bit → ~1.2 µs steps at 50 Hz).
pub const SERVO_PWM_RESOLUTION_BITS: u32 = 14;

/// Algae-control ultrasonic transducer driver enable (active HIGH).
pub const TRANSDUCER_GPIO: i32 = 17;

/// ESP32-S3 ADC1 channel `n` is hard-wired to GPIO `n + 1`.
pub const fn adc1_gpio(channel: u32) -> i32 {
    channel as i32 + 1
}

const _: () = assert!(TEMP_ADC_GPIO == adc1_gpio(TEMP_ADC_CHANNEL));
const _: () = assert!(PH_ADC_GPIO == adc1_gpio(PH_ADC_CHANNEL));
const _: () = assert!(TDS_ADC_GPIO == adc1_gpio(TDS_ADC_CHANNEL));

/// Every GPIO claimed by the board, for overlap checks.
pub const ASSIGNED_GPIOS: [i32; 9] = [
    TEMP_ADC_GPIO,
    PH_ADC_GPIO,
    TDS_ADC_GPIO,
    HX711_DOUT_GPIO,
    HX711_SCK_GPIO,
    I2C_SDA_GPIO,
    I2C_SCL_GPIO,
    SERVO_PWM_GPIO,
    TRANSDUCER_GPIO,
];
