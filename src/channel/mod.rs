//! PWM channel handle.
//!
//! A [`PwmChannel`] is bound to one `pwmchipC/pwmN` pair.  It is created by
//! [`PwmChannel::open`], which exports the channel if needed, and from then
//! on reads and writes `enable`, `duty_cycle` and `period` one node access
//! at a time: open, transfer, close.
//!
//! ## Ordering
//!
//! [`configure`](PwmChannel::configure) disables a running channel before
//! touching period and duty, since many PWM drivers reject or mangle
//! changes while enabled.  Period is written before duty.  Nothing is rolled
//! back when a step fails.
//!
//! ## Errors
//!
//! Every failure is returned and also recorded on the handle, where
//! [`last_error_code`](PwmChannel::last_error_code) and
//! [`last_error_message`](PwmChannel::last_error_message) expose it.  A
//! successful call leaves the previous record in place.

mod export;
mod node;

use embedded_hal::delay::DelayNs;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::adapters::delay::StdDelay;
use crate::adapters::sysfs::SysfsSurface;
use crate::codec;
use crate::config::PwmConfig;
use crate::error::{Error, ErrorKind, Result};
use crate::paths::{ChannelPaths, Param};
use crate::ports::ControlSurface;
use node::{NodeFailure, Stage};

/// Snapshot of a channel's parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelState {
    pub chip_id: u32,
    pub channel_id: u32,
    pub enabled: bool,
    pub duty_ns: i64,
    pub period_ns: i64,
}

/// An exported PWM channel.
///
/// Not internally synchronised: every operation takes `&mut self`.
#[derive(Debug)]
pub struct PwmChannel<S: ControlSurface = SysfsSurface> {
    chip_id: u32,
    channel_id: u32,
    paths: ChannelPaths,
    surface: S,
    last_error: Option<Error>,
}

impl PwmChannel<SysfsSurface> {
    /// Open `pwmchip<chip_id>/pwm<channel_id>` under `/sys/class/pwm`,
    /// exporting it if needed.  May block for up to ~1 s while waiting for
    /// the export.
    pub fn open(chip_id: u32, channel_id: u32) -> Result<Self> {
        Self::open_with(
            SysfsSurface::new(),
            &PwmConfig::default(),
            &mut StdDelay::new(),
            chip_id,
            channel_id,
        )
    }
}

impl<S: ControlSurface> PwmChannel<S> {
    /// Open a channel through an arbitrary control surface.
    ///
    /// `delay` paces the export poll; it is not used when the channel is
    /// already exported.
    pub fn open_with<D: DelayNs>(
        mut surface: S,
        config: &PwmConfig,
        delay: &mut D,
        chip_id: u32,
        channel_id: u32,
    ) -> Result<Self> {
        let paths = ChannelPaths::new(&config.sysfs_root, chip_id, channel_id);
        export::ensure_exported(&mut surface, delay, config, &paths, chip_id, channel_id)?;

        Ok(Self {
            chip_id,
            channel_id,
            paths,
            surface,
            last_error: None,
        })
    }

    pub fn chip_id(&self) -> u32 {
        self.chip_id
    }

    pub fn channel_id(&self) -> u32 {
        self.channel_id
    }

    pub fn paths(&self) -> &ChannelPaths {
        &self.paths
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Release the handle, keeping the surface.  The channel stays exported.
    pub fn into_surface(self) -> S {
        self.surface
    }

    // ── Composite ──────────────────────────────────────────────

    /// Apply period, duty and enable in a driver-safe order.
    ///
    /// The first failing step's error is returned as-is; earlier steps are
    /// not undone.
    pub fn configure(&mut self, period_ns: i64, duty_ns: i64, enable: bool) -> Result<()> {
        if self.get_enable()? {
            self.set_enable(false)?;
        }
        self.set_period(period_ns)?;
        self.set_duty(duty_ns)?;
        if enable {
            self.set_enable(true)?;
        }
        Ok(())
    }

    // ── Setters ────────────────────────────────────────────────

    pub fn set_enable(&mut self, enable: bool) -> Result<()> {
        let result = self.write_param(Param::Enable, &codec::encode_enable(enable));
        self.track(result)
    }

    pub fn set_duty(&mut self, duty_ns: i64) -> Result<()> {
        let result = self.write_param(Param::DutyCycle, &codec::encode_int(duty_ns));
        self.track(result)
    }

    pub fn set_period(&mut self, period_ns: i64) -> Result<()> {
        let result = self.write_param(Param::Period, &codec::encode_int(period_ns));
        self.track(result)
    }

    // ── Getters ────────────────────────────────────────────────

    pub fn get_enable(&mut self) -> Result<bool> {
        let result = self
            .read_param::<{ codec::ENABLE_READ_LEN }>(Param::Enable)
            .and_then(|raw| {
                codec::parse_enable(&raw).ok_or_else(|| {
                    Error::new(ErrorKind::GetEnableFailed, "Unknown PWM 'enable' value")
                })
            });
        self.track(result)
    }

    pub fn get_duty(&mut self) -> Result<i64> {
        let result = self.read_int(Param::DutyCycle);
        self.track(result)
    }

    pub fn get_period(&mut self) -> Result<i64> {
        let result = self.read_int(Param::Period);
        self.track(result)
    }

    /// Read all three parameters.  Enable, duty and period are read in that
    /// order; the first failure is returned.
    pub fn state(&mut self) -> Result<ChannelState> {
        Ok(ChannelState {
            chip_id: self.chip_id,
            channel_id: self.channel_id,
            enabled: self.get_enable()?,
            duty_ns: self.get_duty()?,
            period_ns: self.get_period()?,
        })
    }

    /// Human-readable summary for diagnostics.  Never fails: values that
    /// cannot be read are shown as `-1` (duty, period) or `0` (enable).
    pub fn describe(&mut self) -> String {
        let enable = self.get_enable().unwrap_or(false);
        let duty_ns = self.get_duty().unwrap_or(-1);
        let period_ns = self.get_period().unwrap_or(-1);

        format!(
            "PWM pwmchip{}/pwm{} (duty_ns={}, period_ns={}, enable={})",
            self.chip_id,
            self.channel_id,
            duty_ns,
            period_ns,
            u8::from(enable),
        )
    }

    // ── Error accessors ────────────────────────────────────────

    pub fn last_error(&self) -> Option<&Error> {
        self.last_error.as_ref()
    }

    /// OS error code of the last failure; `0` if none or if the failure had
    /// no OS cause.
    pub fn last_error_code(&self) -> i32 {
        self.last_error
            .as_ref()
            .and_then(Error::os_code)
            .unwrap_or(0)
    }

    /// Message of the last failure; empty if nothing has failed yet.
    pub fn last_error_message(&self) -> String {
        self.last_error
            .as_ref()
            .map(Error::message)
            .unwrap_or_default()
    }

    // ── Internals ──────────────────────────────────────────────

    fn track<T>(&mut self, result: Result<T>) -> Result<T> {
        if let Err(e) = &result {
            debug!("pwmchip{}/pwm{}: {}", self.chip_id, self.channel_id, e);
            self.last_error = Some(e.clone());
        }
        result
    }

    fn write_param(&mut self, param: Param, bytes: &[u8]) -> Result<()> {
        debug!(
            "pwmchip{}/pwm{}: {} <- {}",
            self.chip_id,
            self.channel_id,
            param.node_name(),
            String::from_utf8_lossy(bytes.strip_suffix(b"\0").unwrap_or(bytes)),
        );
        let path = self.paths.param(param);
        node::write_node(&mut self.surface, &path, bytes)
            .map_err(|f| node_error(set_kind(param), param, f))
    }

    fn read_param<const N: usize>(&mut self, param: Param) -> Result<heapless::Vec<u8, N>> {
        let path = self.paths.param(param);
        node::read_node::<S, N>(&mut self.surface, &path)
            .map_err(|f| node_error(get_kind(param), param, f))
    }

    fn read_int(&mut self, param: Param) -> Result<i64> {
        let raw = self.read_param::<{ codec::NUMERIC_READ_LEN }>(param)?;
        codec::parse_int(&raw).ok_or_else(|| {
            Error::new(
                get_kind(param),
                format!("Getting PWM '{}' invalid", param.node_name()),
            )
        })
    }
}

const fn set_kind(param: Param) -> ErrorKind {
    match param {
        Param::Enable => ErrorKind::SetEnableFailed,
        Param::DutyCycle => ErrorKind::SetDutyFailed,
        Param::Period => ErrorKind::SetPeriodFailed,
    }
}

const fn get_kind(param: Param) -> ErrorKind {
    match param {
        Param::Enable => ErrorKind::GetEnableFailed,
        Param::DutyCycle => ErrorKind::GetDutyFailed,
        Param::Period => ErrorKind::GetPeriodFailed,
    }
}

fn node_error(kind: ErrorKind, param: Param, failure: NodeFailure) -> Error {
    let verb = match (failure.stage, kind) {
        (Stage::Open, _) => "Opening",
        (Stage::Close, _) => "Closing",
        (
            Stage::Transfer,
            ErrorKind::SetEnableFailed | ErrorKind::SetDutyFailed | ErrorKind::SetPeriodFailed,
        ) => "Writing",
        (Stage::Transfer, _) => "Reading",
    };
    Error::io(
        kind,
        format!("{} PWM '{}'", verb, param.node_name()),
        failure.source,
    )
}
