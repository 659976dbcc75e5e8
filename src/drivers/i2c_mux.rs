//! TCA9548A I2C multiplexer.
//!
//! The three colour sensors share one fixed address, so each sits on its
//! own downstream port.  A [`MuxPort`] wraps a shared-bus device handle
//! and writes the port-select byte before every transaction; drivers use
//! it exactly like a bus.
//!
//! On target the handle is an `embedded_hal_bus::i2c::RefCellDevice` over
//! the one I2C driver (single-threaded firmware).

use embedded_hal::i2c::{ErrorType, I2c, Operation};

/// Downstream ports on a TCA9548A.
pub const PORTS: u8 = 8;

pub struct MuxPort<D> {
    device: D,
    mux_addr: u8,
    port: u8,
}

impl<D: I2c> MuxPort<D> {
    /// `None` when `port` does not exist on the mux.
    pub fn new(device: D, mux_addr: u8, port: u8) -> Option<Self> {
        (port < PORTS).then_some(Self {
            device,
            mux_addr,
            port,
        })
    }

    pub fn port(&self) -> u8 {
        self.port
    }
}

impl<D: I2c> ErrorType for MuxPort<D> {
    type Error = D::Error;
}

impl<D: I2c> I2c for MuxPort<D> {
    fn transaction(&mut self, address: u8, operations: &mut [Operation<'_>]) -> Result<(), Self::Error> {
        self.device.write(self.mux_addr, &[1 << self.port])?;
        self.device.transaction(address, operations)
    }
}
