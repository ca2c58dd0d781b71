//! Linux sysfs PWM channel control.
//!
//! Opens `pwmchipC/pwmN` under `/sys/class/pwm`, exporting it when needed,
//! and reads or writes its period, duty cycle and enable state.  All
//! filesystem access goes through the [`ports::ControlSurface`] trait so the
//! channel logic can be exercised without real hardware.
//!
//! ```no_run
//! use sysfs_pwm::PwmChannel;
//!
//! let mut pwm = PwmChannel::open(0, 0)?;
//! pwm.configure(20_000_000, 1_500_000, true)?;
//! println!("{}", pwm.describe());
//! # Ok::<(), sysfs_pwm::Error>(())
//! ```

#![deny(unused_must_use)]

pub mod adapters;
pub mod channel;
pub mod codec;
pub mod config;
pub mod hal;
pub mod paths;
pub mod ports;

mod error;

pub use channel::{ChannelState, PwmChannel};
pub use config::PwmConfig;
pub use error::{Error, ErrorKind, Result};
