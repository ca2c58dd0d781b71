//! `DutyCycleOutput`: a sysfs channel behind `embedded_hal::pwm::SetDutyCycle`.

use embedded_hal::pwm::SetDutyCycle;

use crate::mock_surface::{FakeSurface, RecordingDelay, node};

use sysfs_pwm::hal::DutyCycleOutput;
use sysfs_pwm::{ErrorKind, PwmChannel, PwmConfig};

fn output(fs: &mut FakeSurface) -> DutyCycleOutput<&mut FakeSurface> {
    let mut delay = RecordingDelay::new();
    let pwm = PwmChannel::open_with(fs, &PwmConfig::default(), &mut delay, 0, 0).expect("open");
    DutyCycleOutput::new(pwm).expect("period readable")
}

#[test]
fn full_and_zero_duty_map_to_period_bounds() {
    let mut fs = FakeSurface::with_channel(0, 0);
    fs.set_node(node(0, 0, "period"), b"20000000\n");
    let mut out = output(&mut fs);

    assert_eq!(out.max_duty_cycle(), u16::MAX);
    assert_eq!(out.period_ns(), 20_000_000);

    out.set_duty_cycle_fully_on().unwrap();
    assert_eq!(out.channel().get_duty().unwrap(), 20_000_000);

    out.set_duty_cycle_fully_off().unwrap();
    assert_eq!(out.channel().get_duty().unwrap(), 0);
}

#[test]
fn percent_is_scaled_to_nanoseconds() {
    let mut fs = FakeSurface::with_channel(0, 0);
    fs.set_node(node(0, 0, "period"), b"1000000\n");
    let mut out = output(&mut fs);

    out.set_duty_cycle_percent(50).unwrap();
    let duty = out.channel().get_duty().unwrap();
    assert!((499_990..=500_010).contains(&duty), "duty={duty}");
}

#[test]
fn refresh_picks_up_a_new_period() {
    let mut fs = FakeSurface::with_channel(0, 0);
    fs.set_node(node(0, 0, "period"), b"1000\n");
    let mut out = output(&mut fs);

    out.channel().set_period(4000).unwrap();
    assert_eq!(out.period_ns(), 1000);
    assert_eq!(out.refresh_period().unwrap(), 4000);

    out.set_duty_cycle_fully_on().unwrap();
    assert_eq!(out.into_inner().get_duty().unwrap(), 4000);
}

#[test]
fn unreadable_period_fails_construction() {
    let mut fs = FakeSurface::with_channel(0, 0);
    fs.fail_open(node(0, 0, "period"), 13);
    let mut delay = RecordingDelay::new();
    let pwm =
        PwmChannel::open_with(&mut fs, &PwmConfig::default(), &mut delay, 0, 0).expect("open");

    let err = DutyCycleOutput::new(pwm).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::GetPeriodFailed);
}

#[test]
fn write_errors_surface_through_the_trait() {
    let mut fs = FakeSurface::with_channel(0, 0);
    fs.set_node(node(0, 0, "period"), b"1000\n");
    fs.fail_write(node(0, 0, "duty_cycle"), 22);
    let mut out = output(&mut fs);

    let err = out.set_duty_cycle(100).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SetDutyFailed);
    assert_eq!(
        embedded_hal::pwm::Error::kind(&err),
        embedded_hal::pwm::ErrorKind::Other
    );
}
