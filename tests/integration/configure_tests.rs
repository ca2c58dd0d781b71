//! `configure`: step order, short-circuiting, no rollback.

use crate::mock_surface::{Call, FakeSurface, RecordingDelay, node};

use sysfs_pwm::{ErrorKind, PwmChannel, PwmConfig};

fn open(fs: &mut FakeSurface) -> PwmChannel<&mut FakeSurface> {
    let mut delay = RecordingDelay::new();
    PwmChannel::open_with(fs, &PwmConfig::default(), &mut delay, 0, 0).expect("open")
}

fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
    items
        .iter()
        .map(|(n, v)| (n.to_string(), v.to_string()))
        .collect()
}

#[test]
fn enabled_channel_is_disabled_first_then_period_duty_enable() {
    let mut fs = FakeSurface::with_channel(0, 0);
    fs.set_node(node(0, 0, "enable"), b"1\n");
    let mut pwm = open(&mut fs);

    pwm.configure(20_000_000, 1_500_000, true).expect("configure");
    drop(pwm);

    assert_eq!(
        fs.write_log(),
        pairs(&[
            ("enable", "0"),
            ("period", "20000000"),
            ("duty_cycle", "1500000"),
            ("enable", "1"),
        ])
    );
}

#[test]
fn enable_is_read_before_anything_is_written() {
    let mut fs = FakeSurface::with_channel(0, 0);
    fs.set_node(node(0, 0, "enable"), b"1\n");
    let mut pwm = open(&mut fs);
    pwm.configure(1000, 500, false).expect("configure");
    drop(pwm);

    let first_read = fs
        .calls
        .iter()
        .position(|c| matches!(c, Call::Read(_)))
        .expect("a read");
    let first_write = fs
        .calls
        .iter()
        .position(|c| matches!(c, Call::Write(..)))
        .expect("a write");
    assert!(first_read < first_write);
    assert_eq!(fs.calls[first_read], Call::Read(node(0, 0, "enable")));
}

#[test]
fn disabled_channel_skips_disable() {
    let mut fs = FakeSurface::with_channel(0, 0);
    let mut pwm = open(&mut fs);

    pwm.configure(1000, 250, true).expect("configure");
    drop(pwm);

    assert_eq!(
        fs.write_log(),
        pairs(&[("period", "1000"), ("duty_cycle", "250"), ("enable", "1")])
    );
}

#[test]
fn enable_false_leaves_channel_off() {
    let mut fs = FakeSurface::with_channel(0, 0);
    fs.set_node(node(0, 0, "enable"), b"1\n");
    let mut pwm = open(&mut fs);

    pwm.configure(1000, 250, false).expect("configure");
    assert!(!pwm.get_enable().unwrap());
    drop(pwm);

    assert_eq!(
        fs.write_log(),
        pairs(&[("enable", "0"), ("period", "1000"), ("duty_cycle", "250")])
    );
}

#[test]
fn duty_larger_than_period_is_passed_through() {
    let mut fs = FakeSurface::with_channel(0, 0);
    let mut pwm = open(&mut fs);

    pwm.configure(100, 200, false).expect("no range check in the core");
    assert_eq!(pwm.get_duty().unwrap(), 200);
}

#[test]
fn unreadable_enable_aborts_before_any_write() {
    let mut fs = FakeSurface::with_channel(0, 0);
    fs.set_node(node(0, 0, "enable"), b"?");
    let mut pwm = open(&mut fs);

    let err = pwm.configure(1000, 500, true).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::GetEnableFailed);
    drop(pwm);

    assert!(fs.write_log().is_empty());
}

#[test]
fn period_failure_stops_and_keeps_its_kind() {
    let mut fs = FakeSurface::with_channel(0, 0);
    fs.set_node(node(0, 0, "enable"), b"1\n");
    fs.fail_write(node(0, 0, "period"), 22);
    let mut pwm = open(&mut fs);

    let err = pwm.configure(1000, 500, true).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SetPeriodFailed);
    assert_eq!(pwm.last_error_code(), 22);
    drop(pwm);

    // disable went through and stays in effect
    assert_eq!(
        fs.write_log(),
        pairs(&[("enable", "0"), ("period", "1000")])
    );
    assert_eq!(fs.node_contents(&node(0, 0, "enable")), Some(&b"0\0"[..]));
}

#[test]
fn duty_failure_leaves_new_period_in_place() {
    let mut fs = FakeSurface::with_channel(0, 0);
    fs.fail_open(node(0, 0, "duty_cycle"), 13);
    let mut pwm = open(&mut fs);

    let err = pwm.configure(4000, 1000, true).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SetDutyFailed);
    assert_eq!(pwm.get_period().unwrap(), 4000);
    assert!(!pwm.get_enable().unwrap());
}

#[test]
fn final_enable_failure_has_enable_kind() {
    let mut fs = FakeSurface::with_channel(0, 0);
    fs.fail_write(node(0, 0, "enable"), 16);
    let mut pwm = open(&mut fs);

    let err = pwm.configure(4000, 1000, true).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SetEnableFailed);
    assert_eq!(err.context(), "Writing PWM 'enable'");
    assert_eq!(pwm.get_duty().unwrap(), 1000);
}
