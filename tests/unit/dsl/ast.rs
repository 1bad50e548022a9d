use super::*;
use crate::dsl::build::{animate, keyframes, query, sequence, style, style_at};

#[test]
fn nodes_deserialize_from_tagged_json() {
    let json = r#"{
        "type": "sequence",
        "steps": [
            {"type": "style", "styles": [{"opacity": 0}]},
            {"type": "animate", "timings": {"duration": 1000}, "style": {"type": "style", "styles": [{"opacity": 1}]}},
            {"type": "animate", "timings": "{{ d }}ms ease-in"},
            {"type": "style", "styles": ["*"]}
        ]
    }"#;
    let node: AnimationNode = serde_json::from_str(json).unwrap();
    let AnimationNode::Sequence(seq) = node else {
        panic!("expected sequence");
    };
    assert_eq!(seq.steps.len(), 4);
    assert_eq!(seq.steps[1].kind(), NodeKind::Animate);
    let AnimationNode::Animate(dynamic) = &seq.steps[2] else {
        panic!("expected animate");
    };
    assert_eq!(dynamic.timings, Timing::Dynamic("{{ d }}ms ease-in".to_string()));
    assert_eq!(dynamic.style, AnimateStyle::Style(StyleNode::default()));
    let AnimationNode::Style(wild) = &seq.steps[3] else {
        panic!("expected style");
    };
    assert_eq!(wild.styles, vec![StyleToken::Wildcard(Wildcard)]);
}

#[test]
fn keyframe_offsets_spread_evenly_when_omitted() {
    let k = KeyframesNode {
        steps: vec![StyleNode::default(), StyleNode::default(), StyleNode::default()],
    };
    assert_eq!(k.resolved_offsets(), vec![0.0, 0.5, 1.0]);

    let single = KeyframesNode {
        steps: vec![StyleNode::default()],
    };
    assert_eq!(single.resolved_offsets(), vec![0.0]);
}

#[test]
fn validate_rejects_descending_keyframes() {
    let node = animate(
        1000.0,
        keyframes([
            style_at(0.6, [("opacity", 0.0)]),
            style_at(0.2, [("opacity", 1.0)]),
        ]),
    );
    let err = node.validate().unwrap_err();
    assert!(err.to_string().contains("ascending"));
}

#[test]
fn validate_rejects_partial_offsets() {
    let mut k = KeyframesNode {
        steps: vec![StyleNode::default(), StyleNode::default()],
    };
    k.steps[0].offset = Some(0.0);
    assert!(k.validate().is_err());
}

#[test]
fn validate_rejects_empty_selector_without_self() {
    let mut q = query(".x", animate(10.0, style([("opacity", 1.0)])));
    q.selector.clear();
    assert!(AnimationNode::Query(q.clone()).validate().is_err());
    q.include_self = true;
    assert!(AnimationNode::Query(q).validate().is_ok());
}

#[test]
fn validate_accepts_well_formed_tree() {
    let tree = sequence([
        style([("opacity", 0.0)]).into(),
        animate(500.0, style([("opacity", 1.0)])),
    ]);
    tree.validate().unwrap();
}
