//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the logger (UART / USB-CDC in production).

use log::{info, warn};

use crate::app::events::{AppEvent, TelemetryData};
use crate::app::ports::EventSink;
use crate::sensors::SensorId;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

/// `-` for a sensor that could not be read.
fn field(t: &TelemetryData, id: SensorId) -> heapless::String<12> {
    let mut s = heapless::String::new();
    match t.get(id) {
        Some(v) => {
            // An i32 is at most 11 characters.
            let _ = core::fmt::Write::write_fmt(&mut s, format_args!("{v}"));
        }
        None => {
            let _ = s.push('-');
        }
    }
    s
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Telemetry(t) => {
                info!(
                    "TELEM | cycle={} | T={}\u{00b0}C | pH={} | TDS={}ppm | W={} | \
                     CCT={}/{}/{}K",
                    t.cycle,
                    field(t, SensorId::Temperature),
                    field(t, SensorId::Ph),
                    field(t, SensorId::Tds),
                    field(t, SensorId::Weight),
                    field(t, SensorId::Color1),
                    field(t, SensorId::Color2),
                    field(t, SensorId::Color3),
                );
            }
            AppEvent::FeedDispensed { pulses, blocked_ms } => {
                info!("FEED  | dispensed {} pulses in {} ms", pulses, blocked_ms);
            }
            AppEvent::FeedStopped { blocked_ms } => {
                info!("FEED  | stopped ({} ms)", blocked_ms);
            }
            AppEvent::AlgaeTreated {
                minutes,
                blocked_ms,
            } => {
                info!("ALGAE | transducer ran {} min ({} ms)", minutes, blocked_ms);
            }
            AppEvent::Fault(e) => {
                warn!("FAULT | {}", e);
            }
            AppEvent::CycleCompleted { cycle } => {
                info!("CYCLE | {} done", cycle);
            }
            AppEvent::Started => {
                info!("START | cycle driver running");
            }
        }
    }
}
