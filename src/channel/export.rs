//! Export state machine.
//!
//! ```text
//!   stat root ──✗──▶ Unsupported
//!       │
//!   stat chip ──✗──▶ InvalidChip
//!       │
//!   stat channel ──✓──▶ done
//!       │ ✗
//!   write "<N>\0" to export ──✗──▶ ExportFailed
//!       │
//!   poll stat channel (retries × interval) ──▶ done | ExportFailed | ExportTimeout
//! ```
//!
//! Writing `export` returns before the kernel has created `pwmN/`, so the
//! channel directory is polled with a fixed interval.

use std::io;

use embedded_hal::delay::DelayNs;
use log::{debug, info, warn};

use super::node::{self, Stage};
use crate::codec;
use crate::config::PwmConfig;
use crate::error::{Error, ErrorKind, Result};
use crate::paths::ChannelPaths;
use crate::ports::ControlSurface;

/// Make sure the channel directory exists, exporting it if needed.
pub(crate) fn ensure_exported<S, D>(
    surface: &mut S,
    delay: &mut D,
    config: &PwmConfig,
    paths: &ChannelPaths,
    chip_id: u32,
    channel_id: u32,
) -> Result<()>
where
    S: ControlSurface,
    D: DelayNs,
{
    surface.stat(paths.root()).map_err(|e| {
        Error::io(ErrorKind::Unsupported, "PWM sysfs not enabled in kernel", e)
    })?;

    surface
        .stat(paths.chip())
        .map_err(|e| Error::io(ErrorKind::InvalidChip, "PWM chip id is invalid", e))?;

    if surface.stat(paths.channel()).is_ok() {
        debug!("pwmchip{chip_id}/pwm{channel_id} already exported");
        return Ok(());
    }

    debug!("pwmchip{chip_id}/pwm{channel_id} not exported, exporting");
    request_export(surface, paths, channel_id)?;
    wait_for_channel(surface, delay, config, paths, chip_id, channel_id)
}

fn request_export<S: ControlSurface>(
    surface: &mut S,
    paths: &ChannelPaths,
    channel_id: u32,
) -> Result<()> {
    let request = codec::encode_u32(channel_id);
    node::write_node(surface, &paths.export(), &request).map_err(|f| {
        let context = match f.stage {
            Stage::Open => "Exporting PWM: opening 'export'",
            Stage::Transfer => "Exporting PWM: writing 'export'",
            Stage::Close => "Exporting PWM: closing 'export'",
        };
        Error::io(ErrorKind::ExportFailed, context, f.source)
    })
}

fn wait_for_channel<S, D>(
    surface: &mut S,
    delay: &mut D,
    config: &PwmConfig,
    paths: &ChannelPaths,
    chip_id: u32,
    channel_id: u32,
) -> Result<()>
where
    S: ControlSurface,
    D: DelayNs,
{
    let attempts = config.export_retries.max(1);

    for attempt in 1..=attempts {
        match surface.stat(paths.channel()) {
            Ok(()) => {
                info!("exported pwmchip{chip_id}/pwm{channel_id} after {attempt} check(s)");
                return Ok(());
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => {
                return Err(Error::io(
                    ErrorKind::ExportFailed,
                    format!("Exporting PWM: stat 'pwm{channel_id}/'"),
                    e,
                ));
            }
        }

        if attempt < attempts {
            delay.delay_ms(config.export_poll_interval_ms);
        }
    }

    warn!(
        "pwmchip{chip_id}/pwm{channel_id} did not appear after {attempts} checks ({} ms)",
        config.export_budget_ms()
    );
    Err(Error::new(
        ErrorKind::ExportTimeout,
        format!("Exporting PWM: waiting for 'pwmchip{chip_id}/pwm{channel_id}' timed out"),
    ))
}
