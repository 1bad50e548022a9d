use super::*;

#[test]
fn timing_value_accepts_numbers_and_unit_strings() {
    assert_eq!(resolve_timing_value(&Scalar::Number(250.0)), 250.0);
    assert_eq!(resolve_timing_value(&Scalar::from("250ms")), 250.0);
    assert_eq!(resolve_timing_value(&Scalar::from("1.5s")), 1500.0);
    assert_eq!(resolve_timing_value(&Scalar::from("2S")), 2000.0);
    assert_eq!(resolve_timing_value(&Scalar::from("{{ d }}ms")), 0.0);
    assert_eq!(resolve_timing_value(&Scalar::from("fast")), 0.0);
}

#[test]
fn full_expression_parses_duration_delay_and_easing() {
    let mut errors = Vec::new();
    let t = resolve_timing("1s 200ms ease-out", &mut errors, false);
    assert!(errors.is_empty());
    assert_eq!(t.duration, 1000.0);
    assert_eq!(t.delay, 200.0);
    assert_eq!(t.easing.as_deref(), Some("ease-out"));
}

#[test]
fn easing_may_carry_arguments_with_spaces() {
    let mut errors = Vec::new();
    let t = resolve_timing("300ms cubic-bezier(0.1, 0.7, 1.0, 0.1)", &mut errors, false);
    assert!(errors.is_empty());
    assert_eq!(t.duration, 300.0);
    assert_eq!(t.delay, 0.0);
    assert_eq!(t.easing.as_deref(), Some("cubic-bezier(0.1, 0.7, 1.0, 0.1)"));
}

#[test]
fn malformed_expression_reports_and_zeroes() {
    let mut errors = Vec::new();
    let t = resolve_timing("soon", &mut errors, false);
    assert_eq!(t, AnimateTimings::default());
    assert_eq!(
        errors,
        vec![AnimationError::InvalidTiming {
            value: "soon".to_string()
        }]
    );
}

#[test]
fn negative_values_are_reported_unless_allowed() {
    let mut errors = Vec::new();
    let t = resolve_timing("-100ms", &mut errors, false);
    assert_eq!(t.duration, -100.0);
    assert_eq!(
        errors,
        vec![
            AnimationError::InvalidTiming {
                value: "-100ms".to_string()
            },
            AnimationError::NegativeStepValue,
        ]
    );

    let mut errors = Vec::new();
    let t = resolve_timing("-100ms", &mut errors, true);
    assert_eq!(t.duration, -100.0);
    assert!(errors.is_empty());
}

#[derive(Clone, Default)]
struct Captured(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

impl std::io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[test]
fn timing_diagnostics_are_logged_as_warnings() {
    let captured = Captured::default();
    let writer = captured.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .finish();

    let mut errors = Vec::new();
    tracing::subscriber::with_default(subscriber, || {
        resolve_timing("soon", &mut errors, false);
        resolve_timing("-5ms", &mut errors, false);
    });

    assert_eq!(errors.len(), 3);
    let log = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
    assert!(log.contains("WARN"));
    assert!(log.contains("unparsable timing expression"));
    assert!(log.contains("negative timing value"));
}
