use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        KeyframerError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        KeyframerError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
    assert!(
        KeyframerError::Compile(vec![AnimationError::NegativeDelayValue])
            .to_string()
            .contains("compile error:")
    );
}

#[test]
fn compile_error_lists_every_diagnostic() {
    let err = KeyframerError::Compile(vec![
        AnimationError::UnresolvableSelector {
            selector: ".item".to_string(),
        },
        AnimationError::ParamInterpolation {
            name: "dur".to_string(),
        },
    ]);
    let msg = err.to_string();
    assert!(msg.contains("query(\".item\")"));
    assert!(msg.contains("param dur"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = KeyframerError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn diagnostics_serialize_with_kind_tag() {
    let json = serde_json::to_value(AnimationError::structural("bad")).unwrap();
    assert_eq!(json["kind"], "structural_node");
    assert_eq!(json["message"], "bad");
}
