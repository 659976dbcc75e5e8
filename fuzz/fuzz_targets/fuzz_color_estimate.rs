//! Fuzz target: `color_temperature_k`
//!
//! Any RGBC frame off the bus, including saturated and all-dark ones, must
//! yield a kelvin value without panicking, and the clear channel must not
//! change it.
//!
//! cargo fuzz run fuzz_color_estimate

#![no_main]

use libfuzzer_sys::fuzz_target;
use pondnode::sensors::color::{RawColor, color_temperature_k};

fuzz_target!(|data: [u8; 8]| {
    let word = |i: usize| u16::from_le_bytes([data[i], data[i + 1]]);
    let raw = RawColor {
        clear: word(0),
        red: word(2),
        green: word(4),
        blue: word(6),
    };

    let kelvin = color_temperature_k(raw);
    let other_clear = color_temperature_k(RawColor {
        clear: !raw.clear,
        ..raw
    });
    assert_eq!(kelvin, other_clear, "clear channel leaked into the estimate");

    if raw.red == 0 && raw.green == 0 && raw.blue == 0 {
        assert_eq!(kelvin, 0, "dark frame has no colour temperature");
    }
});
