//! Fuzz target: `codec::parse_int` / `codec::parse_enable`
//!
//! Feeds arbitrary attribute contents to the parsers and checks that a
//! parsed integer re-encodes to the digits it was read from.
//!
//! cargo fuzz run fuzz_value_parser

#![no_main]

use libfuzzer_sys::fuzz_target;
use sysfs_pwm::codec::{encode_int, parse_enable, parse_int};

fuzz_target!(|data: &[u8]| {
    if let Some(value) = parse_int(data) {
        let encoded = encode_int(value);
        assert_eq!(parse_int(&encoded), Some(value));
    }

    if let Some(enabled) = parse_enable(data) {
        assert_eq!(data[0], if enabled { b'1' } else { b'0' });
    }
});
