//! PondNode Firmware — Main Entry Point
//!
//! Wires ESP-IDF peripherals into the hexagonal core and runs the cycle
//! loop forever.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter          LogChannel            LogEventSink   │
//! │  (Sensor+Actuator)        (Telemetry+Command)   (EventSink)    │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              CycleDriver (pure logic)                  │    │
//! │  │  CommandGate · ActuatorSequencer                       │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```

use core::cell::RefCell;

use anyhow::{Context, Result, bail};
use embedded_hal_bus::i2c::RefCellDevice;
use esp_idf_hal::delay::{Ets, FreeRtos};
use esp_idf_hal::gpio::PinDriver;
use esp_idf_hal::i2c::{I2cConfig, I2cDriver};
use esp_idf_hal::ledc::config::TimerConfig;
use esp_idf_hal::ledc::{LedcDriver, LedcTimerDriver, Resolution};
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_hal::units::Hertz;
use log::{info, warn};

use pondnode::adapters::hardware::HardwareAdapter;
use pondnode::adapters::log_sink::LogEventSink;
use pondnode::adapters::telemetry::LogChannel;
use pondnode::app::service::CycleDriver;
use pondnode::config::NodeConfig;
use pondnode::drivers::adc::AdcChannel;
use pondnode::drivers::hw_init;
use pondnode::drivers::hx711::Hx711;
use pondnode::drivers::i2c_mux::MuxPort;
use pondnode::drivers::servo::FeedServo;
use pondnode::drivers::tcs34725::Tcs34725;
use pondnode::drivers::transducer::AlgaeTransducer;
use pondnode::pins;
use pondnode::sensors::SensorHub;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("PondNode v{}", env!("CARGO_PKG_VERSION"));

    let config = NodeConfig::default();
    config.validate().context("node config")?;

    let peripherals = Peripherals::take()?;
    let gpio = peripherals.pins;

    // ── 2. Analog probes ──────────────────────────────────────
    hw_init::init_adc().context("ADC1 init")?;
    let temperature = AdcChannel::new(pins::TEMP_ADC_CHANNEL);
    let ph = AdcChannel::new(pins::PH_ADC_CHANNEL);
    let tds = AdcChannel::new(pins::TDS_ADC_CHANNEL);

    // ── 3. Load cell ──────────────────────────────────────────
    const _: () = assert!(pins::HX711_DOUT_GPIO == 7);
    const _: () = assert!(pins::HX711_SCK_GPIO == 15);
    let dout = PinDriver::input(gpio.gpio7).context("PinDriver::input(HX711 DOUT)")?;
    let sck = PinDriver::output(gpio.gpio15).context("PinDriver::output(HX711 SCK)")?;
    let load_cell = Hx711::new(
        dout,
        sck,
        Ets,
        config.load_cell_offset,
        config.load_cell_scale,
    );
    info!(
        "HX711 on DOUT=GPIO{} SCK=GPIO{}",
        pins::HX711_DOUT_GPIO,
        pins::HX711_SCK_GPIO
    );

    // ── 4. Colour sensors behind the I2C mux ──────────────────
    const _: () = assert!(pins::I2C_SDA_GPIO == 8);
    const _: () = assert!(pins::I2C_SCL_GPIO == 9);
    let i2c_cfg = I2cConfig::new().baudrate(Hertz(pins::I2C_FREQ_HZ));
    let i2c = I2cDriver::new(peripherals.i2c0, gpio.gpio8, gpio.gpio9, &i2c_cfg)
        .context("I2cDriver::new")?;
    let bus = RefCell::new(i2c);

    let ports = pins::COLOR_MUX_PORTS
        .map(|port| MuxPort::new(RefCellDevice::new(&bus), pins::I2C_MUX_ADDR, port));
    let [Some(p1), Some(p2), Some(p3)] = ports else {
        bail!("colour mux ports {:?} out of range", pins::COLOR_MUX_PORTS);
    };
    let colors = [p1, p2, p3].map(|mux| {
        let port = mux.port();
        let mut sensor = Tcs34725::new(mux);
        // A missing sensor only costs its channel; the cycle reports it
        // unavailable every time.
        if let Err(e) = sensor.init(&mut FreeRtos, config.color_atime, config.color_gain) {
            warn!("TCS34725 on mux port {} not ready: {}", port, e);
        }
        sensor
    });

    let hub = SensorHub::new(
        temperature,
        ph,
        tds,
        load_cell,
        colors,
        config.load_cell_samples,
    );

    // ── 5. Actuators ──────────────────────────────────────────
    const _: () = assert!(pins::SERVO_PWM_GPIO == 16);
    const _: () = assert!(pins::SERVO_PWM_RESOLUTION_BITS == 14);
    const _: () = assert!(pins::TRANSDUCER_GPIO == 17);
    let ledc = peripherals.ledc;
    let servo_timer = LedcTimerDriver::new(
        ledc.timer0,
        &TimerConfig {
            frequency: Hertz(pins::SERVO_PWM_FREQ_HZ),
            resolution: Resolution::Bits14,
            ..Default::default()
        },
    )
    .context("LedcTimerDriver::new")?;
    let servo_channel = LedcDriver::new(ledc.channel0, &servo_timer, gpio.gpio16)
        .context("LedcDriver::new(servo)")?;
    let feeder = FeedServo::new(servo_channel);

    let mut enable = PinDriver::output(gpio.gpio17).context("PinDriver::output(transducer)")?;
    enable.set_low()?;
    let transducer = AlgaeTransducer::new(enable);
    info!(
        "Actuators: servo GPIO{} @ {} Hz, transducer GPIO{}",
        pins::SERVO_PWM_GPIO,
        pins::SERVO_PWM_FREQ_HZ,
        pins::TRANSDUCER_GPIO
    );

    // ── 6. Run ────────────────────────────────────────────────
    let mut hw = HardwareAdapter::new(hub, feeder, transducer);
    let mut channel = LogChannel::new();
    let mut sink = LogEventSink::new();
    let mut driver = CycleDriver::new(config);

    driver.start(&mut sink);
    driver.run_forever(&mut hw, &mut channel, &mut FreeRtos, &mut sink)
}
