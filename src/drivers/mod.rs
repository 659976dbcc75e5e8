//! Actuator and sensor drivers, hardware initialisation, and bus helpers.
//!
//! Everything except `hw_init` is generic over `embedded-hal` traits and
//! runs unchanged on the host against test doubles.

pub mod adc;
pub mod hw_init;
pub mod hx711;
pub mod i2c_mux;
pub mod servo;
pub mod tcs34725;
pub mod transducer;
