//! HardwareAdapter wired with the real drivers over fake peripherals.
//!
//! Checks the conversion path from raw samples to published values and
//! the servo/transducer outputs seen at the pin level.

use std::cell::Cell;
use std::rc::Rc;

use embedded_hal::digital::{self, OutputPin};
use embedded_hal::pwm::{self, SetDutyCycle};

use crate::mock_hw::{RecordingSink, SimClock};

use pondnode::adapters::hardware::HardwareAdapter;
use pondnode::adapters::telemetry::LogChannel;
use pondnode::app::ports::{ActuatorPort, SensorPort};
use pondnode::app::service::CycleDriver;
use pondnode::config::NodeConfig;
use pondnode::drivers::servo::FeedServo;
use pondnode::drivers::transducer::AlgaeTransducer;
use pondnode::error::{ActuatorError, Error};
use pondnode::sensors::color::RawColor;
use pondnode::sensors::{AnalogChannel, ColorSensor, LoadCell, SensorHub, SensorId};

// ── Fake peripherals ─────────────────────────────────────────

struct FixedAdc(Option<u16>);

impl AnalogChannel for FixedAdc {
    fn read_raw(&mut self) -> Option<u16> {
        self.0
    }
}

struct FixedScale(Option<f32>);

impl LoadCell for FixedScale {
    fn average_units(&mut self, _samples: u8) -> Option<f32> {
        self.0
    }
}

struct FixedColor(Option<RawColor>);

impl ColorSensor for FixedColor {
    fn read_rgbc(&mut self) -> Option<RawColor> {
        self.0
    }
}

/// 14-bit PWM whose last duty is observable after it moves into the adapter.
struct SharedPwm {
    duty: Rc<Cell<u16>>,
    broken: bool,
}

impl pwm::ErrorType for SharedPwm {
    type Error = pwm::ErrorKind;
}

impl SetDutyCycle for SharedPwm {
    fn max_duty_cycle(&self) -> u16 {
        16_383
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        if self.broken {
            return Err(pwm::ErrorKind::Other);
        }
        self.duty.set(duty);
        Ok(())
    }
}

struct SharedPin(Rc<Cell<bool>>);

impl digital::ErrorType for SharedPin {
    type Error = core::convert::Infallible;
}

impl OutputPin for SharedPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.0.set(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.0.set(true);
        Ok(())
    }
}

const WARM_WHITE: RawColor = RawColor {
    red: 600,
    green: 600,
    blue: 500,
    clear: 1700,
};

type Adapter = HardwareAdapter<FixedAdc, FixedScale, FixedColor, SharedPwm, SharedPin>;

fn make_adapter(broken_pwm: bool) -> (Adapter, Rc<Cell<u16>>, Rc<Cell<bool>>) {
    let duty = Rc::new(Cell::new(0));
    let enable = Rc::new(Cell::new(false));
    let hub = SensorHub::new(
        FixedAdc(Some(512)),
        FixedAdc(Some(512)),
        FixedAdc(None),
        FixedScale(Some(1234.7)),
        [
            FixedColor(Some(WARM_WHITE)),
            FixedColor(None),
            FixedColor(Some(WARM_WHITE)),
        ],
        10,
    );
    let adapter = HardwareAdapter::new(
        hub,
        FeedServo::new(SharedPwm {
            duty: Rc::clone(&duty),
            broken: broken_pwm,
        }),
        AlgaeTransducer::new(SharedPin(Rc::clone(&enable))),
    );
    (adapter, duty, enable)
}

// ── Sensor path ──────────────────────────────────────────────

#[test]
fn raw_samples_become_engineering_units() {
    let (mut hw, _, _) = make_adapter(false);

    assert_eq!(hw.read(SensorId::Temperature), Ok(200));
    assert_eq!(hw.read(SensorId::Ph), Ok(6));
    assert_eq!(hw.read(SensorId::Weight), Ok(1234), "weight truncates");

    let cct = hw.read(SensorId::Color1).unwrap();
    assert!((4500..=6500).contains(&cct), "warm white gave {cct} K");
}

#[test]
fn missing_samples_report_their_sensor() {
    let (mut hw, _, _) = make_adapter(false);
    assert_eq!(hw.read(SensorId::Tds), Err(Error::SensorUnavailable(SensorId::Tds)));
    assert_eq!(
        hw.read(SensorId::Color2),
        Err(Error::SensorUnavailable(SensorId::Color2))
    );
}

// ── Actuator path ────────────────────────────────────────────

#[test]
fn servo_angles_reach_the_pwm_channel() {
    let (mut hw, duty, _) = make_adapter(false);

    hw.set_feeder_angle(90).unwrap();
    assert_eq!(duty.get(), 1228, "1.5 ms of a 20 ms frame");

    hw.set_feeder_angle(0).unwrap();
    assert_eq!(duty.get(), 409, "0.5 ms of a 20 ms frame");
}

#[test]
fn pwm_failure_surfaces_as_actuator_error() {
    let (mut hw, _, _) = make_adapter(true);
    assert_eq!(
        hw.set_feeder_angle(120),
        Err(Error::Actuator(ActuatorError::PwmWriteFailed))
    );
}

#[test]
fn transducer_follows_the_enable_line() {
    let (mut hw, _, enable) = make_adapter(false);
    hw.set_transducer(true).unwrap();
    assert!(enable.get());
    hw.set_transducer(false).unwrap();
    assert!(!enable.get());
}

// ── Whole cycle ──────────────────────────────────────────────

#[test]
fn full_cycle_over_real_drivers() {
    let (mut hw, duty, enable) = make_adapter(false);
    let mut channel = LogChannel::new();
    let mut clock = SimClock::new();
    let mut sink = RecordingSink::new();
    let mut driver = CycleDriver::new(NodeConfig::default());

    channel.set_command("V7", 1).unwrap();
    channel.set_command("V8", 1).unwrap();
    let report = driver.tick(&mut hw, &mut channel, &mut clock, &mut sink);

    assert_eq!(channel.last_published("A0"), Some(200));
    assert_eq!(channel.last_published("A2"), None, "TDS probe absent");
    assert_eq!(channel.last_published("A3"), Some(1234));
    assert_eq!(channel.last_published("A5"), None, "colour sensor 2 absent");
    assert_eq!(report.telemetry.available(), 5);
    assert_eq!(report.faults, 2);

    assert_eq!(duty.get(), 409, "feeder ends at rest");
    assert!(!enable.get(), "transducer off after its interval");
    assert_eq!(clock.elapsed_ms(), 3000 + 60_000 + 60_000);
}
