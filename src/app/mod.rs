//! Application core — pure domain logic, zero I/O.
//!
//! This module contains the business rules for the PondNode: the per-cycle
//! read → publish → command → actuate sequence.  All interaction with
//! hardware and the cloud channel happens through **port traits** defined
//! in [`ports`], keeping this layer fully testable without real peripherals.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
