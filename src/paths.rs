//! sysfs path layout for one PWM channel.
//!
//! ```text
//! <root>/                         PWM class (support check)
//! <root>/pwmchip<C>/              chip
//! <root>/pwmchip<C>/export        export request node
//! <root>/pwmchip<C>/pwm<N>/       channel
//! <root>/pwmchip<C>/pwm<N>/{enable,duty_cycle,period}
//! ```

use std::path::{Path, PathBuf};

/// A per-channel parameter node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Param {
    Enable,
    DutyCycle,
    Period,
}

impl Param {
    /// File name of the node under the channel directory.
    pub const fn node_name(self) -> &'static str {
        match self {
            Self::Enable => "enable",
            Self::DutyCycle => "duty_cycle",
            Self::Period => "period",
        }
    }
}

/// Resolved paths for one `(chip, channel)` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelPaths {
    root: PathBuf,
    chip: PathBuf,
    channel: PathBuf,
}

impl ChannelPaths {
    pub fn new(root: &Path, chip_id: u32, channel_id: u32) -> Self {
        let chip = root.join(format!("pwmchip{chip_id}"));
        let channel = chip.join(format!("pwm{channel_id}"));
        Self {
            root: root.to_path_buf(),
            chip,
            channel,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn chip(&self) -> &Path {
        &self.chip
    }

    pub fn channel(&self) -> &Path {
        &self.channel
    }

    pub fn export(&self) -> PathBuf {
        self.chip.join("export")
    }

    pub fn param(&self, param: Param) -> PathBuf {
        self.channel.join(param.node_name())
    }
}
