//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ CycleDriver (domain)
//! ```
//!
//! Driven adapters (sensors, actuators, telemetry channel, event sinks)
//! implement these traits.  The [`CycleDriver`](super::service::CycleDriver)
//! consumes them via generics, so the domain core never touches hardware or
//! the cloud SDK directly.

use crate::error::Result;
use crate::sensors::SensorId;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: one engineering-unit reading per call.
pub trait SensorPort {
    /// Take one raw sample from `id` and convert it.
    fn read(&mut self, id: SensorId) -> Result<i32>;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the sequencer calls this to move actuators.
pub trait ActuatorPort {
    /// Command the feeder servo to an absolute angle (0–180°).
    fn set_feeder_angle(&mut self, degrees: u8) -> Result<()>;

    /// Switch the algae-control transducer on or off.
    fn set_transducer(&mut self, on: bool) -> Result<()>;
}

// ───────────────────────────────────────────────────────────────
// Telemetry / command channel (driven adapter: domain ↔ cloud)
// ───────────────────────────────────────────────────────────────

/// Publish side of the cloud dashboard channel.
pub trait TelemetryPort {
    /// Service the channel's internal bookkeeping.  Called once per cycle
    /// before any reads or publishes.
    fn service(&mut self);

    /// Publish one numeric value on a named channel.
    fn publish(&mut self, channel: &str, value: i32) -> Result<()>;
}

/// Read side of the cloud dashboard channel: "read named external value".
pub trait CommandPort {
    fn read_value(&mut self, channel: &str) -> Result<i64>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
