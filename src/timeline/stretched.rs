use crate::{
    foundation::core::ElementId,
    timeline::instruction::{Keyframe, TimelineInstruction},
    timeline::KeyframeSource,
};

/// An already compiled instruction re-placed on a parent timeline by `animate_child()`.
///
/// Its keyframes are final. When `stretch_starting_keyframe` is set and the new delay is
/// positive, the delay is folded into the keyframes so the first frame is held from time 0.
#[derive(Clone, Debug)]
pub struct StretchedTimeline {
    element: ElementId,
    keyframes: Vec<Keyframe>,
    pre_style_props: indexmap::IndexSet<String>,
    post_style_props: indexmap::IndexSet<String>,
    duration: f64,
    delay: f64,
    easing: Option<String>,
    stretch_starting_keyframe: bool,
}

impl StretchedTimeline {
    pub fn new(
        source: &TimelineInstruction,
        duration: f64,
        delay: f64,
        stretch_starting_keyframe: bool,
    ) -> Self {
        Self {
            element: source.element,
            keyframes: source.keyframes.clone(),
            pre_style_props: source.pre_style_props.clone(),
            post_style_props: source.post_style_props.clone(),
            duration,
            delay,
            easing: source.easing.clone(),
            stretch_starting_keyframe,
        }
    }

    pub fn element(&self) -> ElementId {
        self.element
    }

    pub fn contains_animation(&self) -> bool {
        self.keyframes.len() > 1
    }

    pub fn build_keyframes(self) -> TimelineInstruction {
        let Self {
            element,
            mut keyframes,
            pre_style_props,
            post_style_props,
            mut duration,
            mut delay,
            mut easing,
            stretch_starting_keyframe,
        } = self;

        let stretched = stretch_starting_keyframe && delay > 0.0 && !keyframes.is_empty();
        if stretched {
            let total = duration + delay;
            let mut out = Vec::with_capacity(keyframes.len() + 1);

            let mut held = keyframes[0].clone();
            held.offset = 0.0;
            out.push(held);

            let mut start = keyframes[0].clone();
            start.offset = round_offset(delay / total);
            out.push(start);

            for kf in keyframes.iter().skip(1) {
                let mut kf = kf.clone();
                kf.offset = round_offset((delay + kf.offset * duration) / total);
                out.push(kf);
            }

            keyframes = out;
            duration = total;
            delay = 0.0;
            easing = None;
        }

        TimelineInstruction {
            element,
            keyframes,
            pre_style_props,
            post_style_props,
            duration,
            delay,
            easing,
            sub_timeline: true,
            stretched,
            stretch_starting_keyframe: false,
        }
    }
}

impl KeyframeSource for StretchedTimeline {
    fn element(&self) -> ElementId {
        self.element
    }

    fn contains_animation(&self) -> bool {
        StretchedTimeline::contains_animation(self)
    }

    fn build_keyframes(self) -> TimelineInstruction {
        StretchedTimeline::build_keyframes(self)
    }
}

/// Three significant digits; offsets live in `[0, 1]`.
fn round_offset(offset: f64) -> f64 {
    (offset * 1000.0).round() / 1000.0
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/stretched.rs"]
mod tests;
