//! Outbound application events.
//!
//! The [`CycleDriver`](super::service::CycleDriver) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other side
//! decide what to do with them.

use crate::error::Error;
use crate::sensors::SensorId;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The cycle driver has started.
    Started,

    /// Readings taken this cycle.
    Telemetry(TelemetryData),

    /// A feed-start sequence ran to completion.
    FeedDispensed { pulses: u8, blocked_ms: u64 },

    /// A feed-stop sequence ran to completion.
    FeedStopped { blocked_ms: u64 },

    /// The algae transducer was driven for `minutes`.
    AlgaeTreated { minutes: u32, blocked_ms: u64 },

    /// A non-fatal failure; the cycle carried on.
    Fault(Error),

    /// A cycle finished (before the inter-cycle delay).
    CycleCompleted { cycle: u64 },
}

/// One cycle's readings in publish order.  `None` marks a sensor that
/// could not be read; it is not published that cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TelemetryData {
    pub cycle: u64,
    pub values: [Option<i32>; SensorId::COUNT],
}

impl TelemetryData {
    pub fn get(&self, id: SensorId) -> Option<i32> {
        self.values[id.index()]
    }

    pub fn set(&mut self, id: SensorId, value: Option<i32>) {
        self.values[id.index()] = value;
    }

    /// Number of sensors that produced a reading.
    pub fn available(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }
}
