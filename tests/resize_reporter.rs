//! 호스트 높이 통지 동작 테스트.
use std::io::{self, Write};

use rent_guarantee_calculator::resize::{
    FrameHeightMessage, JsonLineNotifier, ResizeError, ResizeReporter, SizeNotifier,
    TARGET_ORIGIN,
};

#[derive(Default)]
struct Recorder {
    sent: Vec<u32>,
}

impl SizeNotifier for Recorder {
    fn report_size(&mut self, height: u32) -> Result<(), ResizeError> {
        self.sent.push(height);
        Ok(())
    }
}

struct BrokenPipe;

impl Write for BrokenPipe {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "host gone"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn message_body_uses_frame_height_key() {
    let json = serde_json::to_string(&FrameHeightMessage { frame_height: 523 }).expect("json");
    assert_eq!(json, r#"{"frameHeight":523}"#);
}

#[test]
fn json_line_notifier_addresses_fixed_origin() {
    let mut notifier = JsonLineNotifier::new(Vec::new());
    assert_eq!(notifier.target_origin(), "https://mialquilergarantias.com.ar");
    notifier.report_size(640).expect("report");
    notifier.report_size(700).expect("report");

    let out = String::from_utf8(notifier.into_inner()).expect("utf8");
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 2);
    let first: serde_json::Value = serde_json::from_str(lines[0]).expect("line json");
    assert_eq!(first["targetOrigin"], TARGET_ORIGIN);
    assert_eq!(first["message"]["frameHeight"], 640);
}

#[test]
fn mount_sends_immediately_and_observe_skips_unchanged() {
    let mut reporter = ResizeReporter::new(Recorder::default());
    reporter.observe(300.0);
    assert!(reporter.notifier().sent.is_empty(), "nothing before mount");

    reporter.mount(480.0);
    reporter.observe(480.0);
    reporter.observe(479.5);
    reporter.observe(520.0);
    assert_eq!(reporter.notifier().sent, vec![480, 520]);
    assert_eq!(reporter.last_sent(), Some(520));
}

#[test]
fn result_change_forces_a_report() {
    let mut reporter = ResizeReporter::new(Recorder::default());
    reporter.mount(480.0);
    reporter.result_changed(480.0);
    assert_eq!(reporter.notifier().sent, vec![480, 480]);
}

#[test]
fn teardown_stops_observing() {
    let mut reporter = ResizeReporter::new(Recorder::default());
    reporter.mount(480.0);
    reporter.teardown();
    assert!(!reporter.is_observing());
    reporter.observe(900.0);
    reporter.result_changed(900.0);
    assert_eq!(reporter.into_notifier().sent, vec![480]);
}

#[test]
fn invalid_heights_are_ignored() {
    let mut reporter = ResizeReporter::new(Recorder::default());
    reporter.mount(f32::NAN);
    reporter.observe(-4.0);
    assert!(reporter.is_observing());
    assert!(reporter.notifier().sent.is_empty());
    reporter.observe(10.0);
    assert_eq!(reporter.notifier().sent, vec![10]);
}

#[test]
fn notifier_failure_is_swallowed() {
    let mut reporter = ResizeReporter::new(JsonLineNotifier::new(BrokenPipe));
    reporter.mount(480.0);
    assert_eq!(reporter.last_sent(), None);
    assert!(reporter.is_observing());
}
