//! Integration tests for the CycleDriver → gate → sequencer pipeline.
//!
//! A whole cycle runs against mock hardware, the in-memory channel and a
//! simulated clock, so timing is asserted exactly.

use crate::mock_hw::{ActuatorCall, DeadChannel, MockHardware, RecordingSink, SimClock};

use pondnode::adapters::telemetry::LogChannel;
use pondnode::app::commands::FeedCommand;
use pondnode::app::events::AppEvent;
use pondnode::app::service::CycleDriver;
use pondnode::config::NodeConfig;
use pondnode::error::{ActuatorError, Error};
use pondnode::sensors::SensorId;
use pondnode::sequencer::FeedPosition;

const INTERVAL_MS: u64 = 60_000;
const FEED_START_ANGLES: [u8; 12] = [90, 120, 60, 120, 60, 120, 60, 120, 60, 120, 60, 0];

struct Rig {
    driver: CycleDriver,
    hw: MockHardware,
    channel: LogChannel,
    clock: SimClock,
    sink: RecordingSink,
}

impl Rig {
    fn new() -> Self {
        Self::with_config(NodeConfig::default())
    }

    fn with_config(config: NodeConfig) -> Self {
        let mut rig = Self {
            driver: CycleDriver::new(config),
            hw: MockHardware::new(),
            channel: LogChannel::new(),
            clock: SimClock::new(),
            sink: RecordingSink::new(),
        };
        rig.driver.start(&mut rig.sink);
        rig
    }

    fn commands(&mut self, feed: i64, algae: i64) {
        self.channel.set_command("V7", feed).unwrap();
        self.channel.set_command("V8", algae).unwrap();
    }

    fn tick(&mut self) -> pondnode::app::service::CycleReport {
        self.driver
            .tick(&mut self.hw, &mut self.channel, &mut self.clock, &mut self.sink)
    }
}

// ── Telemetry ────────────────────────────────────────────────

#[test]
fn every_reading_is_published_on_its_channel() {
    let mut rig = Rig::new();
    rig.commands(2, 0);
    let report = rig.tick();

    let expected = [21, 7, 250, 1500, 5200, 5300, 5400];
    for (name, value) in ["A0", "A1", "A2", "A3", "A4", "A5", "A6"].iter().zip(expected) {
        assert_eq!(rig.channel.last_published(name), Some(value), "channel {name}");
    }
    assert_eq!(report.telemetry.available(), SensorId::COUNT);
    assert_eq!(rig.channel.services(), 1, "channel serviced once per cycle");
    assert!(matches!(rig.sink.events[0], AppEvent::Started));
    assert!(rig.sink.events.iter().any(|e| matches!(e, AppEvent::Telemetry(t) if t.cycle == 1)));
}

#[test]
fn failed_sensor_is_skipped_and_reported() {
    let mut rig = Rig::new();
    rig.hw.disconnect(SensorId::Ph);
    rig.commands(2, 0);
    let report = rig.tick();

    assert_eq!(rig.channel.last_published("A1"), None, "no value published for pH");
    assert_eq!(rig.channel.last_published("A0"), Some(21));
    assert_eq!(rig.channel.last_published("A6"), Some(5400));
    assert_eq!(report.telemetry.get(SensorId::Ph), None);

    let faults = rig.sink.faults();
    assert!(faults.contains(&Error::SensorUnavailable(SensorId::Ph)));
}

#[test]
fn dead_channel_costs_nothing_but_faults() {
    let mut driver = CycleDriver::new(NodeConfig::default());
    let mut hw = MockHardware::new();
    let mut channel = DeadChannel::default();
    let mut clock = SimClock::new();
    let mut sink = RecordingSink::new();

    let report = driver.tick(&mut hw, &mut channel, &mut clock, &mut sink);

    assert!(hw.calls.is_empty(), "no actuation without commands");
    assert_eq!(channel.services, 1);
    assert_eq!(clock.elapsed_ms(), INTERVAL_MS);
    // Seven failed publishes plus both command channels.
    assert_eq!(report.faults, 9);
    assert!(sink.faults().contains(&Error::ChannelUnavailable("feed_flag")));
    assert!(sink.faults().contains(&Error::ChannelUnavailable("algae_interval")));
}

// ── Feeding ──────────────────────────────────────────────────

#[test]
fn feed_flag_one_runs_the_full_pulse_sequence() {
    let mut rig = Rig::new();
    rig.commands(1, 0);
    let report = rig.tick();

    assert_eq!(rig.hw.feeder_angles(), FEED_START_ANGLES);
    assert_eq!(report.feed, Some(FeedCommand::Start));
    assert_eq!(report.actuation_ms, 3000);
    assert_eq!(rig.clock.elapsed_ms(), INTERVAL_MS + 3000, "actuation stretches the cycle");
    assert_eq!(rig.driver.sequencer().feeder_position(), FeedPosition::Rest);
    assert!(rig.sink.events.contains(&AppEvent::FeedDispensed {
        pulses: 5,
        blocked_ms: 3000
    }));
}

#[test]
fn feed_then_stop_across_two_cycles() {
    let mut rig = Rig::new();
    rig.commands(1, 0);
    rig.tick();
    rig.commands(0, 0);
    let second = rig.tick();

    let mut expected = FEED_START_ANGLES.to_vec();
    expected.push(0);
    assert_eq!(rig.hw.feeder_angles(), expected);
    assert_eq!(second.feed, Some(FeedCommand::Stop));
    assert_eq!(second.actuation_ms, 500);
    assert_eq!(rig.clock.elapsed_ms(), 2 * INTERVAL_MS + 3000 + 500);
}

#[test]
fn held_feed_flag_feeds_every_cycle() {
    let mut rig = Rig::new();
    rig.commands(1, 0);
    rig.tick();
    rig.tick();
    assert_eq!(rig.hw.feeder_angles().len(), 2 * FEED_START_ANGLES.len());
}

#[test]
fn unset_feed_flag_reads_as_stop() {
    let mut rig = Rig::new();
    let report = rig.tick();
    assert_eq!(report.feed, Some(FeedCommand::Stop));
    assert_eq!(rig.hw.feeder_angles(), [0]);
}

#[test]
fn out_of_range_feed_flag_does_nothing() {
    for value in [2, -1, 255] {
        let mut rig = Rig::new();
        rig.commands(value, 0);
        let report = rig.tick();

        assert!(rig.hw.calls.is_empty(), "flag {value} must not move the feeder");
        assert_eq!(report.feed, None);
        assert_eq!(rig.clock.elapsed_ms(), INTERVAL_MS);
        assert_eq!(
            rig.sink.faults(),
            vec![Error::CommandOutOfRange {
                command: "feed_flag",
                value
            }]
        );
    }
}

#[test]
fn feeder_failure_does_not_abort_the_sequence() {
    let mut rig = Rig::new();
    rig.hw.fail_feeder = true;
    rig.commands(1, 0);
    let report = rig.tick();

    assert_eq!(rig.hw.feeder_angles().len(), FEED_START_ANGLES.len());
    assert_eq!(report.actuation_ms, 3000);
    assert_eq!(rig.sink.faults(), vec![Error::Actuator(ActuatorError::PwmWriteFailed)]);
}

// ── Algae control ────────────────────────────────────────────

#[test]
fn algae_interval_blocks_for_whole_minutes() {
    let mut rig = Rig::new();
    rig.commands(2, 3);
    let report = rig.tick();

    assert_eq!(rig.hw.transducer_calls(), [true, false]);
    assert_eq!(report.algae_minutes, Some(3));
    assert_eq!(report.actuation_ms, 180_000);
    assert_eq!(rig.clock.elapsed_ms(), 180_000 + INTERVAL_MS);
    assert!(rig.sink.events.contains(&AppEvent::AlgaeTreated {
        minutes: 3,
        blocked_ms: 180_000
    }));
}

#[test]
fn long_algae_interval_is_not_shortened() {
    let mut rig = Rig::new();
    rig.commands(2, 90);
    let report = rig.tick();
    assert_eq!(report.actuation_ms, 90 * 60_000);
}

#[test]
fn negative_algae_interval_is_ignored() {
    let mut rig = Rig::new();
    rig.commands(2, -5);
    let report = rig.tick();

    assert!(rig.hw.transducer_calls().is_empty());
    assert_eq!(report.algae_minutes, None);
    assert!(rig.sink.faults().contains(&Error::CommandOutOfRange {
        command: "algae_interval",
        value: -5
    }));
}

#[test]
fn feeding_runs_before_algae_control() {
    let mut rig = Rig::new();
    rig.commands(1, 1);
    let report = rig.tick();

    let first_transducer = rig
        .hw
        .calls
        .iter()
        .position(|c| matches!(c, ActuatorCall::Transducer(_)))
        .unwrap();
    assert_eq!(first_transducer, FEED_START_ANGLES.len());
    assert_eq!(rig.hw.calls.last(), Some(&ActuatorCall::Transducer(false)));
    assert_eq!(report.actuation_ms, 3000 + 60_000);
    assert_eq!(rig.clock.elapsed_ms(), 3000 + 60_000 + INTERVAL_MS);
}

// ── Cadence ──────────────────────────────────────────────────

#[test]
fn cycles_are_numbered_and_completed() {
    let mut rig = Rig::new();
    rig.commands(2, 0);
    for _ in 0..3 {
        rig.tick();
    }
    assert_eq!(rig.driver.cycle_count(), 3);

    let completed: Vec<u64> = rig
        .sink
        .events
        .iter()
        .filter_map(|e| match e {
            AppEvent::CycleCompleted { cycle } => Some(*cycle),
            _ => None,
        })
        .collect();
    assert_eq!(completed, [1, 2, 3]);
    assert_eq!(rig.clock.elapsed_ms(), 3 * INTERVAL_MS);
}

#[test]
fn configured_interval_and_channels_are_used() {
    let config = NodeConfig::from_json(
        r#"{"cycle_interval_ms":1000,
            "channels":{"telemetry":["t","ph","tds","w","c1","c2","c3"],
                        "feed_flag":"feed","algae_interval":"algae"}}"#,
    )
    .unwrap();
    let mut rig = Rig::with_config(config);
    rig.channel.set_command("feed", 1).unwrap();
    rig.tick();

    assert_eq!(rig.channel.last_published("t"), Some(21));
    assert_eq!(rig.channel.last_published("A0"), None);
    assert_eq!(rig.hw.feeder_angles(), FEED_START_ANGLES);
    assert_eq!(rig.clock.elapsed_ms(), 1000 + 3000);
}
