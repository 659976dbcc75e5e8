//! Fuzz target: `NodeConfig::from_json`
//!
//! Arbitrary bytes must either parse into a configuration that passes
//! validation or be rejected with a config error.  Never a panic.
//!
//! cargo fuzz run fuzz_config_json

#![no_main]

use libfuzzer_sys::fuzz_target;
use pondnode::config::NodeConfig;
use pondnode::error::Error;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = core::str::from_utf8(data) else {
        return;
    };
    match NodeConfig::from_json(text) {
        Ok(config) => {
            assert!(config.validate().is_ok(), "accepted config must validate");
            assert!(config.cycle_interval_ms > 0);
        }
        Err(e) => assert!(matches!(e, Error::Config(_)), "unexpected error {e}"),
    }
});
