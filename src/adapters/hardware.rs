//! Hardware adapter — bridges real peripherals to domain port traits.
//!
//! Owns the [`SensorHub`] and both actuator drivers, exposing them through
//! [`SensorPort`] and [`ActuatorPort`].  Generic over the concrete handle
//! types, so main wires ESP-IDF drivers in and tests wire doubles in.

use embedded_hal::digital::OutputPin;
use embedded_hal::pwm::SetDutyCycle;

use crate::app::ports::{ActuatorPort, SensorPort};
use crate::drivers::servo::FeedServo;
use crate::drivers::transducer::AlgaeTransducer;
use crate::error::Result;
use crate::sensors::{AnalogChannel, ColorSensor, LoadCell, SensorHub, SensorId};

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter<A, L, C, P, O> {
    sensor_hub: SensorHub<A, L, C>,
    feeder: FeedServo<P>,
    transducer: AlgaeTransducer<O>,
}

impl<A, L, C, P, O> HardwareAdapter<A, L, C, P, O> {
    pub fn new(sensor_hub: SensorHub<A, L, C>, feeder: FeedServo<P>, transducer: AlgaeTransducer<O>) -> Self {
        Self {
            sensor_hub,
            feeder,
            transducer,
        }
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl<A, L, C, P, O> SensorPort for HardwareAdapter<A, L, C, P, O>
where
    A: AnalogChannel,
    L: LoadCell,
    C: ColorSensor,
{
    fn read(&mut self, id: SensorId) -> Result<i32> {
        self.sensor_hub.read(id)
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl<A, L, C, P, O> ActuatorPort for HardwareAdapter<A, L, C, P, O>
where
    P: SetDutyCycle,
    O: OutputPin,
{
    fn set_feeder_angle(&mut self, degrees: u8) -> Result<()> {
        Ok(self.feeder.set_angle(degrees)?)
    }

    fn set_transducer(&mut self, on: bool) -> Result<()> {
        Ok(self.transducer.set(on)?)
    }
}
