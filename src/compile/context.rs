use std::{cell::Cell, rc::Rc};

use crate::{
    compile::driver::Driver,
    dsl::ast::{AnimateTimings, AnimationOptions, NodeKind},
    dsl::params::interpolate_params,
    dsl::timing::resolve_timing_value,
    foundation::core::{ElementId, Params},
    foundation::error::AnimationError,
    timeline::builder::Timeline,
    timeline::instruction::{ElementInstructionMap, TimelineInstruction},
    timeline::registry::{TimelineId, TimelineRegistry},
    timeline::stretched::StretchedTimeline,
};

/// State shared by every context of one compile run.
pub(crate) struct Collector<'a> {
    pub driver: &'a dyn Driver,
    pub sub_instructions: &'a ElementInstructionMap,
    pub enter_class_name: &'a str,
    pub leave_class_name: &'a str,
    pub errors: &'a mut Vec<AnimationError>,
    pub timelines: TimelineRegistry,
}

impl Collector<'_> {
    pub fn report(&mut self, error: AnimationError) {
        tracing::warn!(%error, "animation diagnostic");
        self.errors.push(error);
    }

    pub fn timeline(&self, id: TimelineId) -> &Timeline {
        self.timelines.get(id)
    }

    pub fn timeline_mut(&mut self, id: TimelineId) -> &mut Timeline {
        self.timelines.get_mut(id)
    }
}

/// Options in effect for a subtree, with timings already resolved to milliseconds.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct ContextOptions {
    pub duration: Option<f64>,
    pub delay: Option<f64>,
    pub params: Params,
}

/// What a sub-context needs from the context that created it.
#[derive(Clone, Debug)]
pub(crate) struct ParentLink {
    pub stagger_time: Rc<Cell<f64>>,
    pub start_time: f64,
}

/// Per-subtree compilation state.
#[derive(Debug)]
pub(crate) struct Context {
    pub element: ElementId,
    pub timeline: TimelineId,
    pub parent: Option<ParentLink>,
    pub previous_node: Option<NodeKind>,
    pub current_animate_timings: Option<AnimateTimings>,
    pub options: ContextOptions,
    pub sub_context_count: usize,
    pub current_query_index: usize,
    pub current_query_total: usize,
    pub current_stagger_time: Rc<Cell<f64>>,
}

impl Context {
    /// Registers a fresh timeline for `element` starting at 0.
    pub fn root(element: ElementId, c: &mut Collector<'_>) -> Self {
        let timeline = c.timelines.register(Timeline::new(element, 0.0));
        Self::on_timeline(element, timeline)
    }

    fn on_timeline(element: ElementId, timeline: TimelineId) -> Self {
        Self {
            element,
            timeline,
            parent: None,
            previous_node: None,
            current_animate_timings: None,
            options: ContextOptions::default(),
            sub_context_count: 0,
            current_query_index: 0,
            current_query_total: 0,
            current_stagger_time: Rc::new(Cell::new(0.0)),
        }
    }

    /// Starts a new stagger chain for the children created from here on.
    ///
    /// Contexts already forked keep the chain they were created with.
    pub fn restart_stagger_chain(&mut self) {
        self.current_stagger_time = Rc::new(Cell::new(0.0));
    }

    pub fn params(&self) -> &Params {
        &self.options.params
    }

    /// Forks a context for a nested subtree.
    ///
    /// The child inherits the previous node, animate timings, query bookkeeping and a copy of the
    /// params; `duration`/`delay` are not inherited.
    pub fn create_sub_context(
        &mut self,
        c: &mut Collector<'_>,
        options: Option<&AnimationOptions>,
        element: Option<ElementId>,
        at_time: Option<f64>,
    ) -> Context {
        let target = element.unwrap_or(self.element);
        let timeline = c.timelines.fork(self.timeline, target, at_time);

        let mut child = Context::on_timeline(target, timeline);
        child.previous_node = self.previous_node;
        child.current_animate_timings = self.current_animate_timings.clone();
        child.options.params = self.options.params.clone();
        child.update_options(options, false, c.errors);
        child.current_query_index = self.current_query_index;
        child.current_query_total = self.current_query_total;
        child.parent = Some(ParentLink {
            stagger_time: Rc::clone(&self.current_stagger_time),
            start_time: c.timeline(self.timeline).start_time(),
        });

        self.sub_context_count += 1;
        child
    }

    /// Merges `options` into this context.
    ///
    /// New params are interpolated against the params already in scope. With `skip_if_exists`,
    /// names already in scope keep their value.
    pub fn update_options(
        &mut self,
        options: Option<&AnimationOptions>,
        skip_if_exists: bool,
        errors: &mut Vec<AnimationError>,
    ) {
        let Some(options) = options else {
            return;
        };

        if let Some(duration) = &options.duration {
            self.options.duration = Some(resolve_timing_value(duration));
        }
        if let Some(delay) = &options.delay {
            self.options.delay = Some(resolve_timing_value(delay));
        }
        if let Some(params) = &options.params {
            for (name, value) in params {
                if skip_if_exists && self.options.params.contains_key(name) {
                    continue;
                }
                let value = interpolate_params(value, &self.options.params, errors);
                self.options.params.insert(name.clone(), value);
            }
        }
    }

    /// Continues this context on a fresh timeline so later steps cannot overlap earlier ones.
    pub fn transform_into_new_timeline(
        &mut self,
        c: &mut Collector<'_>,
        at_time: Option<f64>,
    ) -> TimelineId {
        self.previous_node = None;
        self.timeline = c.timelines.fork(self.timeline, self.element, at_time);
        self.timeline
    }

    /// Places an already compiled instruction at this context's current time.
    pub fn append_instruction_to_timeline(
        &self,
        c: &mut Collector<'_>,
        instruction: &TimelineInstruction,
        duration: Option<f64>,
        delay: Option<f64>,
    ) -> AnimateTimings {
        let timings = AnimateTimings {
            duration: duration.unwrap_or(instruction.duration),
            delay: c.timeline(self.timeline).current_time()
                + delay.unwrap_or(0.0)
                + instruction.delay,
            easing: None,
        };
        c.timelines.register_stretched(StretchedTimeline::new(
            instruction,
            timings.duration,
            timings.delay,
            instruction.stretch_starting_keyframe,
        ));
        timings
    }

    pub fn increment_time(&self, c: &mut Collector<'_>, time: f64) {
        let timeline = c.timeline_mut(self.timeline);
        let target = timeline.duration() + time;
        timeline.forward_time(target);
    }

    pub fn delay_next_step(&self, c: &mut Collector<'_>, delay: f64) {
        if delay > 0.0 {
            c.timeline_mut(self.timeline).delay_next_step(delay);
        }
    }

    /// Resolves a query to elements, in driver order.
    ///
    /// `limit > 0` keeps the first `limit` matches, `limit < 0` the last `|limit|`. Zero
    /// results on a non-optional query are reported.
    pub fn invoke_query(
        &self,
        c: &mut Collector<'_>,
        selector: &str,
        display_selector: &str,
        limit: i32,
        include_self: bool,
        optional: bool,
    ) -> Vec<ElementId> {
        let mut results = Vec::new();
        if include_self {
            results.push(self.element);
        }

        if !selector.is_empty() {
            let selector = selector
                .replace(":enter", &format!(".{}", c.enter_class_name))
                .replace(":leave", &format!(".{}", c.leave_class_name));
            let multi = limit != 1;
            let mut elements = c.driver.query(self.element, &selector, multi);

            let keep = limit.unsigned_abs() as usize;
            if limit > 0 {
                elements.truncate(keep);
            } else if limit < 0 && elements.len() > keep {
                elements = elements.split_off(elements.len() - keep);
            }
            tracing::debug!(
                element = %self.element,
                %selector,
                matched = elements.len(),
                "query resolved"
            );
            results.extend(elements);
        }

        if !optional && results.is_empty() {
            c.report(AnimationError::UnresolvableSelector {
                selector: display_selector.to_string(),
            });
        }
        results
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compile/context.rs"]
mod tests;
