use std::{cell::RefCell, collections::HashMap, rc::Rc};

use indexmap::{IndexMap, IndexSet};

use crate::{
    dsl::ast::StyleToken,
    dsl::params::interpolate_style_value,
    foundation::core::{ElementId, Params, StyleMap, StyleValue},
    foundation::error::AnimationError,
    timeline::instruction::{Keyframe, TimelineInstruction},
    timeline::KeyframeSource,
};

/// Step taken by a bare `style()` that follows a keyframe already holding styles.
pub(crate) const ONE_FRAME_MS: f64 = 1.0;

/// Style map shared by every timeline that touches the same element.
pub(crate) type SharedStyles = Rc<RefCell<StyleMap>>;

/// Element → shared style cell, shared by a timeline and all of its forks.
pub(crate) type ElementStyleLookup = Rc<RefCell<HashMap<ElementId, SharedStyles>>>;

#[derive(Clone, Debug, PartialEq)]
/// Last write of a property: when (absolute time) and what.
pub struct StyleAtTime {
    pub time: f64,
    pub value: StyleValue,
}

#[derive(Clone, Debug)]
struct TimedKeyframe {
    time: f64,
    easing: Option<String>,
    styles: StyleMap,
}

/// Accumulates the styles of one element along one execution branch.
///
/// Keyframes are keyed by local time (`duration` at the moment they were loaded) and kept in
/// insertion order. The first timeline created for an element uses the element's shared style
/// cell as its local map; later forks get a private local map and only share the global cell.
#[derive(Debug)]
pub struct Timeline {
    element: ElementId,
    start_time: f64,
    duration: f64,
    easing: Option<String>,
    keyframes: Vec<TimedKeyframe>,
    current: usize,
    previous: Option<usize>,
    local: SharedStyles,
    global: SharedStyles,
    pending: StyleMap,
    back_fill: StyleMap,
    style_summary: IndexMap<String, StyleAtTime>,
    empty_step_keyframe: Option<usize>,
    lookup: ElementStyleLookup,
}

impl Timeline {
    pub fn new(element: ElementId, start_time: f64) -> Self {
        Self::with_lookup(element, start_time, ElementStyleLookup::default())
    }

    fn with_lookup(element: ElementId, start_time: f64, lookup: ElementStyleLookup) -> Self {
        let local = SharedStyles::default();
        let global = lookup
            .borrow_mut()
            .entry(element)
            .or_insert_with(|| Rc::clone(&local))
            .clone();

        let mut timeline = Self {
            element,
            start_time,
            duration: 0.0,
            easing: None,
            keyframes: Vec::new(),
            current: 0,
            previous: None,
            local,
            global,
            pending: StyleMap::new(),
            back_fill: StyleMap::new(),
            style_summary: IndexMap::new(),
            empty_step_keyframe: None,
            lookup,
        };
        timeline.load_keyframe();
        timeline
    }

    pub fn element(&self) -> ElementId {
        self.element
    }

    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    /// Local elapsed time since `start_time`.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn current_time(&self) -> f64 {
        self.start_time + self.duration
    }

    pub fn set_easing(&mut self, easing: Option<String>) {
        self.easing = easing;
    }

    pub fn style_summary(&self) -> &IndexMap<String, StyleAtTime> {
        &self.style_summary
    }

    pub fn has_current_style_properties(&self) -> bool {
        !self.keyframes[self.current].styles.is_empty()
    }

    pub fn contains_animation(&self) -> bool {
        match self.keyframes.len() {
            0 => false,
            1 => self.has_current_style_properties(),
            _ => true,
        }
    }

    /// Delays the next step by `delay` ms.
    ///
    /// Before anything happened on this timeline the start time is shifted instead, so no empty
    /// keyframe is created. A lone pending `style()` step is snapshotted after the delay so it
    /// survives as its own keyframe.
    pub fn delay_next_step(&mut self, delay: f64) {
        let has_pre_style_step = self.keyframes.len() == 1 && !self.pending.is_empty();

        if self.duration != 0.0 || has_pre_style_step {
            self.forward_time(self.duration + delay);
            if has_pre_style_step {
                self.snapshot_current_styles();
            }
        } else {
            self.start_time += delay;
        }
    }

    /// Flushes pending writes and starts a new timeline for `element` sharing the style lookup.
    ///
    /// `at_time` of `None` (or `0`) starts at this timeline's current time.
    pub fn fork(&mut self, element: ElementId, at_time: Option<f64>) -> Timeline {
        self.apply_styles_to_keyframe();
        let start = at_time
            .filter(|t| *t != 0.0)
            .unwrap_or_else(|| self.current_time());
        Timeline::with_lookup(element, start, Rc::clone(&self.lookup))
    }

    pub fn forward_frame(&mut self) {
        self.duration += ONE_FRAME_MS;
        self.load_keyframe();
    }

    /// Moves the local clock to `time` (relative to `start_time`).
    pub fn forward_time(&mut self, time: f64) {
        self.apply_styles_to_keyframe();
        self.duration = time;
        self.load_keyframe();
    }

    fn load_keyframe(&mut self) {
        if !self.keyframes.is_empty() {
            self.previous = Some(self.current);
        }
        let duration = self.duration;
        self.current = match self.keyframes.iter().position(|k| k.time == duration) {
            Some(idx) => idx,
            None => {
                self.keyframes.push(TimedKeyframe {
                    time: duration,
                    easing: None,
                    styles: StyleMap::new(),
                });
                self.keyframes.len() - 1
            }
        };
    }

    fn update_style(&mut self, prop: String, value: StyleValue) {
        self.local.borrow_mut().insert(prop.clone(), value.clone());
        self.global.borrow_mut().insert(prop.clone(), value.clone());
        let time = self.current_time();
        self.style_summary.insert(prop, StyleAtTime { time, value });
    }

    fn set_previous_easing(&mut self, easing: &str) {
        if let Some(idx) = self.previous {
            self.keyframes[idx].easing = Some(easing.to_string());
        }
    }

    /// False when the current keyframe was produced by a bare `animate(duration)` step.
    pub fn allow_only_timeline_styles(&self) -> bool {
        self.empty_step_keyframe != Some(self.current)
    }

    /// `animate(duration)` without styles: every property known for the element animates to
    /// whatever is on screen at playback time.
    pub fn apply_empty_step(&mut self, easing: Option<&str>) {
        if let Some(easing) = easing {
            self.set_previous_easing(easing);
        }

        let known: Vec<(String, StyleValue)> = self
            .global
            .borrow()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        for (prop, value) in known {
            self.back_fill.insert(prop.clone(), value);
            self.keyframes[self.current]
                .styles
                .insert(prop, StyleValue::Auto);
        }
        self.empty_step_keyframe = Some(self.current);
    }

    /// Queues `tokens` for the current keyframe.
    ///
    /// A property seen for the first time on this branch is backfilled with the element's last
    /// known value (or `Auto`) so that earlier keyframes can carry it too.
    pub fn set_styles(
        &mut self,
        tokens: &[StyleToken],
        easing: Option<&str>,
        params: &Params,
        errors: &mut Vec<AnimationError>,
    ) {
        if let Some(easing) = easing {
            self.set_previous_easing(easing);
        }

        let styles = flatten_styles(tokens, &self.global.borrow());
        for (prop, value) in styles {
            let value = interpolate_style_value(&value, params, errors);
            self.pending.insert(prop.clone(), value.clone());
            if !self.local.borrow().contains_key(&prop) {
                let fill = self
                    .global
                    .borrow()
                    .get(&prop)
                    .cloned()
                    .unwrap_or(StyleValue::Auto);
                self.back_fill.insert(prop.clone(), fill);
            }
            self.update_style(prop, value);
        }
    }

    /// Flushes pending writes into the current keyframe and fills it with the branch's
    /// remaining local values.
    pub fn apply_styles_to_keyframe(&mut self) {
        if self.pending.is_empty() {
            return;
        }

        let pending = std::mem::take(&mut self.pending);
        let keyframe = &mut self.keyframes[self.current].styles;
        keyframe.extend(pending);

        for (prop, value) in self.local.borrow().iter() {
            if !keyframe.contains_key(prop) {
                keyframe.insert(prop.clone(), value.clone());
            }
        }
    }

    /// Re-queues every local value so a following delay or fork cannot drop it.
    pub fn snapshot_current_styles(&mut self) {
        let local: Vec<(String, StyleValue)> = self
            .local
            .borrow()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        for (prop, value) in local {
            self.pending.insert(prop.clone(), value.clone());
            self.update_style(prop, value);
        }
    }

    /// Takes over every property `other` wrote strictly later than this timeline did.
    ///
    /// Equal timestamps keep the existing value.
    pub fn merge_timeline_collected_styles(&mut self, other: &Timeline) {
        for (prop, theirs) in &other.style_summary {
            let newer = self
                .style_summary
                .get(prop)
                .is_none_or(|ours| theirs.time > ours.time);
            if newer {
                self.update_style(prop.clone(), theirs.value.clone());
            }
        }
    }

    /// Materializes the timeline. This is the timeline's terminal operation.
    pub fn build_keyframes(mut self) -> TimelineInstruction {
        self.apply_styles_to_keyframe();

        let mut pre_style_props = IndexSet::new();
        let mut post_style_props = IndexSet::new();
        let is_empty = self.keyframes.len() == 1 && self.duration == 0.0;

        let mut keyframes = Vec::with_capacity(self.keyframes.len() + 1);
        for kf in &self.keyframes {
            let mut styles = self.back_fill.clone();
            for (prop, value) in &kf.styles {
                styles.insert(prop.clone(), value.clone());
            }
            for (prop, value) in &styles {
                match value {
                    StyleValue::PreSnapshot => {
                        pre_style_props.insert(prop.clone());
                    }
                    StyleValue::Auto => {
                        post_style_props.insert(prop.clone());
                    }
                    StyleValue::Literal(_) => {}
                }
            }
            let offset = if is_empty || self.duration == 0.0 {
                0.0
            } else {
                kf.time / self.duration
            };
            keyframes.push(Keyframe {
                offset,
                easing: kf.easing.clone(),
                styles,
            });
        }
        keyframes.sort_by(|a, b| a.offset.total_cmp(&b.offset));

        // A zero-duration animation only places styles on screen, but players need two ends.
        if is_empty {
            if let Some(first) = keyframes.first().cloned() {
                keyframes.push(Keyframe {
                    offset: 1.0,
                    ..first
                });
            }
        }

        tracing::trace!(
            element = %self.element,
            keyframes = keyframes.len(),
            duration = self.duration,
            delay = self.start_time,
            "built timeline keyframes"
        );

        TimelineInstruction {
            element: self.element,
            keyframes,
            pre_style_props,
            post_style_props,
            duration: self.duration,
            delay: self.start_time,
            easing: self.easing,
            sub_timeline: false,
            stretched: false,
            stretch_starting_keyframe: false,
        }
    }
}

impl KeyframeSource for Timeline {
    fn element(&self) -> ElementId {
        self.element
    }

    fn contains_animation(&self) -> bool {
        Timeline::contains_animation(self)
    }

    fn build_keyframes(self) -> TimelineInstruction {
        Timeline::build_keyframes(self)
    }
}

fn flatten_styles(tokens: &[StyleToken], known: &StyleMap) -> StyleMap {
    let mut styles = StyleMap::new();
    for token in tokens {
        match token {
            StyleToken::Wildcard(_) => {
                for prop in known.keys() {
                    styles.insert(prop.clone(), StyleValue::Auto);
                }
            }
            StyleToken::Map(map) => {
                for (prop, value) in map {
                    styles.insert(prop.clone(), value.clone());
                }
            }
        }
    }
    styles
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/builder.rs"]
mod tests;
