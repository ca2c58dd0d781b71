//! Blocking delay adapter.
//!
//! Provides [`DelayNs`] on a hosted target by parking the calling thread.
//! The export poll in [`PwmChannel::open`](crate::PwmChannel::open) is the
//! only caller in this crate.

use std::time::Duration;

use embedded_hal::delay::DelayNs;

/// Thread-sleep delay for Linux hosts.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdDelay;

impl StdDelay {
    pub fn new() -> Self {
        Self
    }
}

impl DelayNs for StdDelay {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(Duration::from_nanos(u64::from(ns)));
    }

    fn delay_us(&mut self, us: u32) {
        std::thread::sleep(Duration::from_micros(u64::from(us)));
    }

    fn delay_ms(&mut self, ms: u32) {
        std::thread::sleep(Duration::from_millis(u64::from(ms)));
    }
}
