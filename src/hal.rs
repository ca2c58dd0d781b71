//! `embedded-hal` bridge.
//!
//! Lets a sysfs channel drive code written against
//! [`embedded_hal::pwm::SetDutyCycle`], e.g. motor or LED drivers that only
//! know about a 16-bit duty range.  The period is read once and cached; the
//! 16-bit duty is scaled to nanoseconds of that period.

use embedded_hal::pwm::{ErrorType, SetDutyCycle};

use crate::channel::PwmChannel;
use crate::error::{Error, Result};
use crate::ports::ControlSurface;

/// A [`PwmChannel`] exposed as an `embedded-hal` PWM output.
#[derive(Debug)]
pub struct DutyCycleOutput<S: ControlSurface> {
    channel: PwmChannel<S>,
    period_ns: i64,
}

impl<S: ControlSurface> DutyCycleOutput<S> {
    /// Wrap an open channel.  Fails if the period cannot be read.
    pub fn new(mut channel: PwmChannel<S>) -> Result<Self> {
        let period_ns = channel.get_period()?;
        Ok(Self { channel, period_ns })
    }

    /// Cached period used for scaling.
    pub fn period_ns(&self) -> i64 {
        self.period_ns
    }

    /// Re-read the period after it was changed behind our back.
    pub fn refresh_period(&mut self) -> Result<i64> {
        self.period_ns = self.channel.get_period()?;
        Ok(self.period_ns)
    }

    pub fn channel(&mut self) -> &mut PwmChannel<S> {
        &mut self.channel
    }

    pub fn into_inner(self) -> PwmChannel<S> {
        self.channel
    }

    fn scale(&self, duty: u16) -> i64 {
        // never larger than the period, so the narrowing is lossless
        (i128::from(self.period_ns) * i128::from(duty) / i128::from(u16::MAX)) as i64
    }
}

impl<S: ControlSurface> ErrorType for DutyCycleOutput<S> {
    type Error = Error;
}

impl<S: ControlSurface> SetDutyCycle for DutyCycleOutput<S> {
    fn max_duty_cycle(&self) -> u16 {
        u16::MAX
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<()> {
        let duty_ns = self.scale(duty);
        self.channel.set_duty(duty_ns)
    }
}
