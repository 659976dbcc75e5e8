//! In-memory telemetry/command channel.
//!
//! Implements [`TelemetryPort`] and [`CommandPort`] with fixed-capacity
//! register maps: publishes are logged and kept as the latest value per
//! channel, command values are whatever was last written with
//! [`set_command`](LogChannel::set_command).  It stands in for the cloud
//! dashboard SDK, which mirrors virtual-pin values the same way.

use heapless::{FnvIndexMap, String};
use log::debug;

use crate::app::ports::{CommandPort, TelemetryPort};
use crate::error::{Error, Result};

const PUBLISH_SLOTS: usize = 8;
const COMMAND_SLOTS: usize = 4;

/// Overwrite in place when the key exists; a full map refuses new keys
/// even when the key is already present.
fn upsert<V, const N: usize>(map: &mut FnvIndexMap<String<8>, V, N>, key: String<8>, value: V) -> core::result::Result<(), ()> {
    if let Some(slot) = map.get_mut(&key) {
        *slot = value;
        return Ok(());
    }
    map.insert(key, value).map(|_| ()).map_err(|_| ())
}

#[derive(Default)]
pub struct LogChannel {
    published: FnvIndexMap<String<8>, i32, PUBLISH_SLOTS>,
    commands: FnvIndexMap<String<8>, i64, COMMAND_SLOTS>,
    services: u64,
}

impl LogChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write a command register (what the dashboard would push down).
    pub fn set_command(&mut self, channel: &str, value: i64) -> Result<()> {
        let key = String::try_from(channel).map_err(|_| Error::ChannelUnavailable("command"))?;
        upsert(&mut self.commands, key, value).map_err(|()| Error::ChannelUnavailable("command"))
    }

    /// Last value published on `channel`.
    pub fn last_published(&self, channel: &str) -> Option<i32> {
        let key = String::<8>::try_from(channel).ok()?;
        self.published.get(&key).copied()
    }

    /// Times [`TelemetryPort::service`] has run.
    pub fn services(&self) -> u64 {
        self.services
    }
}

impl TelemetryPort for LogChannel {
    fn service(&mut self) {
        self.services += 1;
    }

    fn publish(&mut self, channel: &str, value: i32) -> Result<()> {
        debug!("PUB   | {}={}", channel, value);
        let key = String::try_from(channel).map_err(|_| Error::ChannelUnavailable("telemetry"))?;
        upsert(&mut self.published, key, value).map_err(|()| Error::ChannelUnavailable("telemetry"))
    }
}

impl CommandPort for LogChannel {
    /// Unset registers read as 0, like a fresh dashboard pin.
    fn read_value(&mut self, channel: &str) -> Result<i64> {
        let key = String::<8>::try_from(channel).map_err(|_| Error::ChannelUnavailable("command"))?;
        Ok(self.commands.get(&key).copied().unwrap_or(0))
    }
}
