//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter     | Implements         | Connects to                     |
//! |-------------|--------------------|---------------------------------|
//! | `hardware`  | SensorPort         | ADC1, HX711, TCS34725 ×3        |
//! |             | ActuatorPort       | LEDC servo PWM, transducer GPIO |
//! | `log_sink`  | EventSink          | Serial log output               |
//! | `telemetry` | TelemetryPort      | In-memory channel registers     |
//! |             | CommandPort        |                                 |

pub mod hardware;
pub mod log_sink;
pub mod telemetry;
