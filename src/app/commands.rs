//! Remote command gate.
//!
//! Two values are polled from the command channel every cycle and turned
//! into actuator requests:
//!
//! | Command          | Value      | Action                         |
//! |------------------|------------|--------------------------------|
//! | feed flag        | 1          | feed-start sequence            |
//! |                  | 0          | feed-stop sequence             |
//! |                  | other      | nothing (reported out of range)|
//! | algae interval   | N > 0      | transducer on for N minutes    |
//! |                  | 0          | nothing                        |
//! |                  | N < 0      | nothing (reported out of range)|
//!
//! Both checks are independent; when both fire, feeding runs first.
//! Nothing is cached between cycles.

use crate::error::{Error, Result};

use super::ports::CommandPort;

/// Logical names used in fault reports.
pub const FEED_FLAG: &str = "feed_flag";
pub const ALGAE_INTERVAL: &str = "algae_interval";

/// Feeder request decoded from the feed flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedCommand {
    Start,
    Stop,
}

/// Decode a raw feed flag.
pub fn decode_feed_flag(value: i64) -> Result<FeedCommand> {
    match value {
        1 => Ok(FeedCommand::Start),
        0 => Ok(FeedCommand::Stop),
        other => Err(Error::CommandOutOfRange {
            command: FEED_FLAG,
            value: other,
        }),
    }
}

/// Decode a raw algae interval (minutes).  `Ok(None)` means no action.
pub fn decode_algae_interval(value: i64) -> Result<Option<u32>> {
    match value {
        0 => Ok(None),
        v if v > 0 => u32::try_from(v).map(Some).map_err(|_| Error::CommandOutOfRange {
            command: ALGAE_INTERVAL,
            value: v,
        }),
        v => Err(Error::CommandOutOfRange {
            command: ALGAE_INTERVAL,
            value: v,
        }),
    }
}

/// What the gate decided this cycle.  An `Err` is a no-op for that
/// actuator plus a fault to report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateDecision {
    pub feed: Result<FeedCommand>,
    pub algae_minutes: Result<Option<u32>>,
}

/// Polls the two command channels by their configured names.
pub struct CommandGate {
    feed_channel: heapless::String<8>,
    algae_channel: heapless::String<8>,
}

impl CommandGate {
    pub fn new(feed_channel: heapless::String<8>, algae_channel: heapless::String<8>) -> Self {
        Self {
            feed_channel,
            algae_channel,
        }
    }

    /// Read the feed flag, then the algae interval, once each.  Both are
    /// sampled up front, before any sequence runs: an algae interval that
    /// changes during a feed is picked up on the next cycle.
    pub fn poll(&self, port: &mut impl CommandPort) -> GateDecision {
        let feed = port
            .read_value(&self.feed_channel)
            .map_err(|_| Error::ChannelUnavailable(FEED_FLAG))
            .and_then(decode_feed_flag);
        let algae_minutes = port
            .read_value(&self.algae_channel)
            .map_err(|_| Error::ChannelUnavailable(ALGAE_INTERVAL))
            .and_then(decode_algae_interval);
        GateDecision { feed, algae_minutes }
    }
}
