use super::*;

#[test]
fn self_token_is_stripped_from_selector() {
    let q = query(":self, .item", animate_empty(100.0));
    assert!(q.include_self);
    assert_eq!(q.selector, ".item");
    assert_eq!(q.display_selector(), ":self, .item");

    let only_self = query(":self", animate_empty(100.0));
    assert!(only_self.include_self);
    assert!(only_self.selector.is_empty());
}

#[test]
fn query_builder_sets_limit_and_optional() {
    let q = query(".a", animate_empty(1.0)).limit(-2).optional();
    assert_eq!(q.limit, -2);
    assert!(q.optional);
}

#[test]
fn animate_wraps_keyframes_payload() {
    let node = animate(
        300.0,
        keyframes([style([("left", 0.0)]), style([("left", 10.0)])]),
    );
    let AnimationNode::Animate(a) = node else {
        panic!("expected animate");
    };
    assert!(matches!(a.style, AnimateStyle::Keyframes(ref k) if k.steps.len() == 2));
}
