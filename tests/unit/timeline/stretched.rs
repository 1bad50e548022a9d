use super::*;
use crate::foundation::core::style_map;

fn kf(offset: f64, opacity: f64) -> Keyframe {
    Keyframe {
        offset,
        easing: None,
        styles: style_map([("opacity", opacity)]),
    }
}

fn source(keyframes: Vec<Keyframe>, duration: f64) -> TimelineInstruction {
    let mut i = TimelineInstruction::empty(ElementId(4), 0.0);
    i.keyframes = keyframes;
    i.duration = duration;
    i.easing = Some("ease-out".to_string());
    i
}

fn offsets(i: &TimelineInstruction) -> Vec<f64> {
    i.keyframes.iter().map(|k| k.offset).collect()
}

#[test]
fn unstretched_keeps_keyframes_and_timings() {
    let src = source(vec![kf(0.0, 0.0), kf(1.0, 1.0)], 100.0);
    let out = StretchedTimeline::new(&src, 100.0, 250.0, false).build_keyframes();

    assert_eq!(offsets(&out), vec![0.0, 1.0]);
    assert_eq!(out.delay, 250.0);
    assert_eq!(out.duration, 100.0);
    assert_eq!(out.easing.as_deref(), Some("ease-out"));
    assert!(out.sub_timeline);
    assert!(!out.stretched);
}

#[test]
fn zero_delay_is_never_stretched() {
    let src = source(vec![kf(0.0, 0.0), kf(1.0, 1.0)], 100.0);
    let out = StretchedTimeline::new(&src, 100.0, 0.0, true).build_keyframes();
    assert_eq!(offsets(&out), vec![0.0, 1.0]);
    assert!(!out.stretched);
}

#[test]
fn delay_is_folded_into_the_keyframes() {
    let src = source(vec![kf(0.0, 0.0), kf(1.0, 1.0)], 100.0);
    let out = StretchedTimeline::new(&src, 100.0, 100.0, true).build_keyframes();

    assert_eq!(offsets(&out), vec![0.0, 0.5, 1.0]);
    assert_eq!(out.keyframes[0].styles, out.keyframes[1].styles);
    assert_eq!(out.duration, 200.0);
    assert_eq!(out.delay, 0.0);
    assert_eq!(out.easing, None);
    assert!(out.stretched);
    assert!(out.sub_timeline);
    assert!(!out.stretch_starting_keyframe);
}

#[test]
fn stretched_offsets_are_rounded() {
    let src = source(vec![kf(0.0, 0.0), kf(0.5, 0.5), kf(1.0, 1.0)], 200.0);
    let out = StretchedTimeline::new(&src, 200.0, 100.0, true).build_keyframes();
    assert_eq!(offsets(&out), vec![0.0, 0.333, 0.667, 1.0]);
}

#[test]
fn a_single_keyframe_is_not_an_animation() {
    let src = source(vec![kf(0.0, 0.0)], 100.0);
    assert!(!StretchedTimeline::new(&src, 100.0, 0.0, false).contains_animation());

    let src = source(vec![kf(0.0, 0.0), kf(1.0, 1.0)], 100.0);
    assert!(StretchedTimeline::new(&src, 100.0, 0.0, false).contains_animation());
}

#[test]
fn one_third_gap_keeps_three_digits() {
    let src = source(vec![kf(0.0, 0.0), kf(1.0, 1.0)], 200.0);
    let out = StretchedTimeline::new(&src, 200.0, 100.0, true).build_keyframes();
    assert_eq!(offsets(&out), vec![0.0, 0.333, 1.0]);
}
