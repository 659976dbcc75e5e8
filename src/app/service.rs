//! Cycle driver — the hexagonal core.
//!
//! [`CycleDriver`] owns the command gate and the actuator sequencer and
//! runs the node's fixed cadence.  All I/O flows through port traits
//! injected at call sites, making the whole cycle testable with mock
//! adapters and a simulated clock.
//!
//! ```text
//!   SensorPort ──▶ ┌──────────────────────────┐ ──▶ TelemetryPort
//!                  │       CycleDriver        │
//!  CommandPort ──▶ │  Gate · Sequencer        │ ──▶ EventSink
//!                  └──────────────────────────┘
//!                               │
//!                               ▼
//!                         ActuatorPort
//! ```
//!
//! One cycle: service channel → read 7 sensors → publish → poll commands →
//! actuate (blocking) → sleep `cycle_interval_ms`.  The period therefore
//! stretches by however long actuation took.

use embedded_hal::delay::DelayNs;
use log::{debug, info, warn};

use crate::config::NodeConfig;
use crate::error::Error;
use crate::sensors::SensorId;
use crate::sequencer::{ActuatorSequencer, FEED_PULSES, SequenceReport};

use super::commands::{CommandGate, FeedCommand};
use super::events::{AppEvent, TelemetryData};
use super::ports::{ActuatorPort, CommandPort, EventSink, SensorPort, TelemetryPort};

/// What one cycle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CycleReport {
    pub telemetry: TelemetryData,
    /// Feed sequence that ran, if any.
    pub feed: Option<FeedCommand>,
    /// Algae interval that ran, if any.
    pub algae_minutes: Option<u32>,
    /// Time spent blocked in actuator sequences.
    pub actuation_ms: u64,
    /// Non-fatal faults raised during the cycle.
    pub faults: u32,
}

/// Runs the node's read → publish → actuate loop.
pub struct CycleDriver {
    config: NodeConfig,
    gate: CommandGate,
    sequencer: ActuatorSequencer,
    cycle_count: u64,
}

impl CycleDriver {
    pub fn new(config: NodeConfig) -> Self {
        let gate = CommandGate::new(
            config.channels.feed_flag.clone(),
            config.channels.algae_interval.clone(),
        );
        let sequencer = ActuatorSequencer::new(config.algae_warn_minutes);
        Self {
            config,
            gate,
            sequencer,
            cycle_count: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    pub fn start(&mut self, sink: &mut impl EventSink) {
        sink.emit(&AppEvent::Started);
        info!(
            "CycleDriver started (interval {} ms)",
            self.config.cycle_interval_ms
        );
    }

    /// Loop forever.  Nothing in a cycle is fatal.
    pub fn run_forever(
        &mut self,
        hw: &mut (impl SensorPort + ActuatorPort),
        channel: &mut (impl TelemetryPort + CommandPort),
        delay: &mut impl DelayNs,
        sink: &mut impl EventSink,
    ) -> ! {
        loop {
            self.tick(hw, channel, delay, sink);
        }
    }

    // ── Per-cycle orchestration ───────────────────────────────

    /// One full cycle including the inter-cycle delay.
    pub fn tick(
        &mut self,
        hw: &mut (impl SensorPort + ActuatorPort),
        channel: &mut (impl TelemetryPort + CommandPort),
        delay: &mut impl DelayNs,
        sink: &mut impl EventSink,
    ) -> CycleReport {
        let report = self.run_cycle(hw, channel, delay, sink);
        delay.delay_ms(self.config.cycle_interval_ms);
        report
    }

    /// One cycle without the trailing delay.
    ///
    /// `hw` is both the [`SensorPort`] and the [`ActuatorPort`]: the same
    /// peripherals are read and then driven within the cycle.
    pub fn run_cycle(
        &mut self,
        hw: &mut (impl SensorPort + ActuatorPort),
        channel: &mut (impl TelemetryPort + CommandPort),
        delay: &mut impl DelayNs,
        sink: &mut impl EventSink,
    ) -> CycleReport {
        self.cycle_count += 1;
        let mut report = CycleReport::default();

        // 1. Channel bookkeeping
        channel.service();

        // 2. Read every sensor once
        let mut telemetry = TelemetryData {
            cycle: self.cycle_count,
            ..TelemetryData::default()
        };
        for id in SensorId::ALL {
            match hw.read(id) {
                Ok(value) => telemetry.set(id, Some(value)),
                Err(e) => Self::fault(e, &mut report, sink),
            }
        }

        // 3. Publish what was read
        for id in SensorId::ALL {
            let Some(value) = telemetry.get(id) else {
                continue;
            };
            let name = self.config.channels.telemetry_name(id);
            if channel.publish(name, value).is_err() {
                Self::fault(Error::ChannelUnavailable(id.name()), &mut report, sink);
            }
        }
        report.telemetry = telemetry;
        sink.emit(&AppEvent::Telemetry(telemetry));

        // 4. Remote commands (feed first, then algae)
        let decision = self.gate.poll(channel);

        match decision.feed {
            Ok(FeedCommand::Start) => {
                let seq = self.sequencer.start_feeding(hw, delay);
                Self::absorb(&seq, &mut report, sink);
                sink.emit(&AppEvent::FeedDispensed {
                    pulses: FEED_PULSES,
                    blocked_ms: seq.blocked_ms,
                });
                report.feed = Some(FeedCommand::Start);
            }
            Ok(FeedCommand::Stop) => {
                let seq = self.sequencer.stop_feeding(hw, delay);
                Self::absorb(&seq, &mut report, sink);
                sink.emit(&AppEvent::FeedStopped {
                    blocked_ms: seq.blocked_ms,
                });
                report.feed = Some(FeedCommand::Stop);
            }
            Err(e) => Self::fault(e, &mut report, sink),
        }

        match decision.algae_minutes {
            Ok(Some(minutes)) => {
                let seq = self.sequencer.control_algae(minutes, hw, delay);
                Self::absorb(&seq, &mut report, sink);
                sink.emit(&AppEvent::AlgaeTreated {
                    minutes,
                    blocked_ms: seq.blocked_ms,
                });
                report.algae_minutes = Some(minutes);
            }
            Ok(None) => {}
            Err(e) => Self::fault(e, &mut report, sink),
        }

        debug!(
            "Cycle {}: {}/{} readings, {} ms actuation, {} faults",
            self.cycle_count,
            telemetry.available(),
            SensorId::COUNT,
            report.actuation_ms,
            report.faults
        );
        sink.emit(&AppEvent::CycleCompleted {
            cycle: self.cycle_count,
        });
        report
    }

    // ── Queries ───────────────────────────────────────────────

    /// Cycles started since boot.
    pub fn cycle_count(&self) -> u64 {
        self.cycle_count
    }

    pub fn sequencer(&self) -> &ActuatorSequencer {
        &self.sequencer
    }

    pub fn config(&self) -> &NodeConfig {
        &self.config
    }

    // ── Internal ──────────────────────────────────────────────

    fn absorb(seq: &SequenceReport, report: &mut CycleReport, sink: &mut impl EventSink) {
        report.actuation_ms += seq.blocked_ms;
        if let Some(e) = seq.fault {
            Self::fault(e, report, sink);
        }
    }

    fn fault(e: Error, report: &mut CycleReport, sink: &mut impl EventSink) {
        warn!("Cycle fault: {}", e);
        report.faults += 1;
        sink.emit(&AppEvent::Fault(e));
    }
}
