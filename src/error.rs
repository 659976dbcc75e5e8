//! Unified error types for the PondNode firmware.
//!
//! A single `Error` enum that every subsystem converts into, keeping the
//! cycle driver's error handling uniform.  All variants are `Copy` so they
//! can travel through events and reports without allocation.
//!
//! No variant is fatal: the cycle driver logs the error, emits a fault
//! event, and carries on with the next step of the cycle.

use core::fmt;

use crate::sensors::SensorId;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A sensor could not be read (disconnected, bus failure, never ready).
    SensorUnavailable(SensorId),
    /// The telemetry/command channel rejected a publish or a read.
    /// Carries the channel name involved.
    ChannelUnavailable(&'static str),
    /// A remote command carried a value outside its accepted range.
    CommandOutOfRange { command: &'static str, value: i64 },
    /// An actuator command failed.
    Actuator(ActuatorError),
    /// Configuration is invalid or could not be parsed.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SensorUnavailable(id) => write!(f, "sensor unavailable: {}", id.name()),
            Self::ChannelUnavailable(ch) => write!(f, "channel unavailable: {ch}"),
            Self::CommandOutOfRange { command, value } => {
                write!(f, "command out of range: {command}={value}")
            }
            Self::Actuator(e) => write!(f, "actuator: {e}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Actuator errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorError {
    /// PWM duty-cycle write to the feed servo failed.
    PwmWriteFailed,
    /// GPIO write to the algae transducer failed.
    GpioWriteFailed,
}

impl fmt::Display for ActuatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PwmWriteFailed => write!(f, "PWM write failed"),
            Self::GpioWriteFailed => write!(f, "GPIO write failed"),
        }
    }
}

impl From<ActuatorError> for Error {
    fn from(e: ActuatorError) -> Self {
        Self::Actuator(e)
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
