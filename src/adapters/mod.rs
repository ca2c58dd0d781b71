//! Adapters: concrete implementations of the port traits.
//!
//! | Adapter  | Implements                     | Connects to              |
//! |----------|--------------------------------|--------------------------|
//! | `sysfs`  | ControlSurface                 | `/sys/class/pwm` via std |
//! | `delay`  | embedded_hal::delay::DelayNs   | `std::thread::sleep`     |

pub mod delay;
pub mod sysfs;
