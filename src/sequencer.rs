//! Actuator sequencer — timed motion scripts for the feeder and the algae
//! transducer.
//!
//! Each sequence is a fixed list of `(position, hold)` steps executed
//! against an [`ActuatorPort`] and a [`DelayNs`].  Both block the caller
//! for their whole duration and cannot be interrupted once started; a stop
//! command arriving mid-sequence is only seen on the next cycle.
//!
//! ```text
//!  REST ──[start]──▶ NEUTRAL ──▶ DISPENSING ⇄ RETRACTED (×5) ──▶ REST
//!  any  ──[stop]───▶ REST
//! ```
//!
//! Expressing the sequences as data keeps the timing observable: tests run
//! them against a simulated clock and check every step and hold.

use embedded_hal::delay::DelayNs;
use log::{info, warn};

use crate::app::ports::ActuatorPort;
use crate::error::Error;

/// Feeder servo positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedPosition {
    /// Closed, initial and terminal.
    Rest,
    /// Half-open entry position before pulsing.
    Neutral,
    /// Pushes feed out of the hopper.
    Dispensing,
    /// Pulls back to let the next portion drop.
    Retracted,
}

impl FeedPosition {
    pub const fn angle_deg(self) -> u8 {
        match self {
            Self::Rest => 0,
            Self::Neutral => 90,
            Self::Dispensing => 120,
            Self::Retracted => 60,
        }
    }
}

/// One timed step: move, then hold for `hold_ms`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub position: FeedPosition,
    pub hold_ms: u32,
}

const fn step(position: FeedPosition, hold_ms: u32) -> Step {
    Step { position, hold_ms }
}

/// Dispense/retract pulse pairs per feeding.
pub const FEED_PULSES: u8 = 5;

const PULSE_HOLD_MS: u32 = 200;
const SETTLE_HOLD_MS: u32 = 500;

/// Neutral, five dispense/retract pulses, then rest.
pub const FEED_START: [Step; 12] = [
    step(FeedPosition::Neutral, SETTLE_HOLD_MS),
    step(FeedPosition::Dispensing, PULSE_HOLD_MS),
    step(FeedPosition::Retracted, PULSE_HOLD_MS),
    step(FeedPosition::Dispensing, PULSE_HOLD_MS),
    step(FeedPosition::Retracted, PULSE_HOLD_MS),
    step(FeedPosition::Dispensing, PULSE_HOLD_MS),
    step(FeedPosition::Retracted, PULSE_HOLD_MS),
    step(FeedPosition::Dispensing, PULSE_HOLD_MS),
    step(FeedPosition::Retracted, PULSE_HOLD_MS),
    step(FeedPosition::Dispensing, PULSE_HOLD_MS),
    step(FeedPosition::Retracted, PULSE_HOLD_MS),
    step(FeedPosition::Rest, SETTLE_HOLD_MS),
];

pub const FEED_STOP: [Step; 1] = [step(FeedPosition::Rest, SETTLE_HOLD_MS)];

/// Algae control blocks in one-minute slices.
pub const MINUTE_MS: u32 = 60_000;

/// Total hold time of a script.
pub fn script_duration_ms(script: &[Step]) -> u64 {
    script.iter().map(|s| u64::from(s.hold_ms)).sum()
}

/// What a finished sequence did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SequenceReport {
    /// Steps (feeder) or minute slices (algae) executed.
    pub steps: u32,
    /// Time spent blocked in delays.
    pub blocked_ms: u64,
    /// First actuator failure seen; the sequence still ran to the end.
    pub fault: Option<Error>,
}

impl SequenceReport {
    fn note(&mut self, e: Error) {
        if self.fault.is_none() {
            self.fault = Some(e);
        }
    }
}

/// Drives the feeder and transducer.  Owns the feeder's commanded position.
pub struct ActuatorSequencer {
    feeder: FeedPosition,
    algae_warn_minutes: u32,
}

impl ActuatorSequencer {
    pub fn new(algae_warn_minutes: u32) -> Self {
        Self {
            feeder: FeedPosition::Rest,
            algae_warn_minutes,
        }
    }

    /// Last commanded feeder position.
    pub fn feeder_position(&self) -> FeedPosition {
        self.feeder
    }

    pub fn start_feeding(&mut self, hw: &mut impl ActuatorPort, delay: &mut impl DelayNs) -> SequenceReport {
        info!("Feeding: start ({} pulses)", FEED_PULSES);
        self.run_script(&FEED_START, hw, delay)
    }

    pub fn stop_feeding(&mut self, hw: &mut impl ActuatorPort, delay: &mut impl DelayNs) -> SequenceReport {
        info!("Feeding: stop");
        self.run_script(&FEED_STOP, hw, delay)
    }

    /// Energise the algae transducer for `minutes`, then switch it off.
    ///
    /// No upper bound is applied: the whole control loop is blocked for the
    /// full interval.  Long intervals are logged, not shortened.
    pub fn control_algae(
        &mut self,
        minutes: u32,
        hw: &mut impl ActuatorPort,
        delay: &mut impl DelayNs,
    ) -> SequenceReport {
        if minutes > self.algae_warn_minutes {
            warn!(
                "Algae control: {} min requested, loop blocked until it completes",
                minutes
            );
        }
        info!("Algae control: transducer on for {} min", minutes);

        let mut report = SequenceReport::default();
        if let Err(e) = hw.set_transducer(true) {
            warn!("Algae control: transducer on failed: {}", e);
            report.note(e);
        }
        for _ in 0..minutes {
            delay.delay_ms(MINUTE_MS);
            report.steps += 1;
            report.blocked_ms += u64::from(MINUTE_MS);
        }
        if let Err(e) = hw.set_transducer(false) {
            warn!("Algae control: transducer off failed: {}", e);
            report.note(e);
        }
        info!("Algae control: transducer off");
        report
    }

    fn run_script(
        &mut self,
        script: &[Step],
        hw: &mut impl ActuatorPort,
        delay: &mut impl DelayNs,
    ) -> SequenceReport {
        let mut report = SequenceReport::default();
        for s in script {
            if let Err(e) = hw.set_feeder_angle(s.position.angle_deg()) {
                warn!("Feeder: move to {:?} failed: {}", s.position, e);
                report.note(e);
            }
            self.feeder = s.position;
            delay.delay_ms(s.hold_ms);
            report.steps += 1;
            report.blocked_ms += u64::from(s.hold_ms);
        }
        report
    }
}
