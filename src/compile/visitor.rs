use crate::{
    compile::context::{Collector, Context},
    dsl::ast::{
        AnimateChildNode, AnimateNode, AnimateRefNode, AnimateStyle, AnimateTimings, AnimationNode,
        GroupNode, KeyframesNode, NodeKind, QueryNode, ReferenceNode, SequenceNode, StaggerNode,
        StyleNode, Timing,
    },
    dsl::params::interpolate_params,
    dsl::timing::{resolve_timing, resolve_timing_value},
    foundation::core::{Params, Scalar},
    foundation::error::AnimationError,
    timeline::instruction::TimelineInstruction,
};

/// Easing keyword that makes a stagger chain on the previous sibling's real span.
const FULL_STAGGER: &str = "full";

pub(crate) fn visit(node: &AnimationNode, ctx: &mut Context, c: &mut Collector<'_>) {
    match node {
        // Declarative metadata only.
        AnimationNode::Trigger(_) | AnimationNode::State(_) | AnimationNode::Transition(_) => {}
        AnimationNode::Sequence(n) => visit_sequence(n, ctx, c),
        AnimationNode::Group(n) => visit_group(n, ctx, c),
        AnimationNode::Animate(n) => visit_animate(n, ctx, c),
        AnimationNode::Keyframes(n) => visit_keyframes(n, ctx, c),
        AnimationNode::Style(n) => visit_style(n, ctx, c),
        AnimationNode::Reference(n) => visit_reference(n, ctx, c),
        AnimationNode::AnimateChild(n) => visit_animate_child(n, ctx, c),
        AnimationNode::AnimateRef(n) => visit_animate_ref(n, ctx, c),
        AnimationNode::Query(n) => visit_query(n, ctx, c),
        AnimationNode::Stagger(n) => visit_stagger(n, ctx, c),
    }
}

fn visit_sequence(node: &SequenceNode, ctx: &mut Context, c: &mut Collector<'_>) {
    let sub_context_count = ctx.sub_context_count;
    let options = node
        .options
        .as_ref()
        .filter(|o| o.params.is_some() || o.delay.is_some());

    match options {
        Some(options) => {
            let mut inner = ctx.create_sub_context(c, Some(options), None, None);
            // The fresh timeline backfills from the element's shared styles, so a preceding
            // `style()` is held through the delay without a snapshot.
            inner.transform_into_new_timeline(c, None);
            if let Some(delay) = &options.delay {
                inner.delay_next_step(c, resolve_timing_value(delay));
            }
            visit_steps(&node.steps, sub_context_count, &mut inner, c);
        }
        None => visit_steps(&node.steps, sub_context_count, ctx, c),
    }

    ctx.previous_node = Some(NodeKind::Sequence);
}

fn visit_steps(
    steps: &[AnimationNode],
    sub_context_count: usize,
    ctx: &mut Context,
    c: &mut Collector<'_>,
) {
    if steps.is_empty() {
        return;
    }
    for step in steps {
        visit(step, ctx, c);
    }
    // A trailing bare style() still needs a keyframe.
    c.timeline_mut(ctx.timeline).apply_styles_to_keyframe();

    // Some step forked: the rest of this branch must not overlap it.
    if ctx.sub_context_count > sub_context_count {
        ctx.transform_into_new_timeline(c, None);
    }
}

fn visit_group(node: &GroupNode, ctx: &mut Context, c: &mut Collector<'_>) {
    let delay = node
        .options
        .as_ref()
        .and_then(|o| o.delay.as_ref())
        .map(resolve_timing_value)
        .unwrap_or(0.0);

    let mut furthest = c.timeline(ctx.timeline).current_time();
    let mut branches = Vec::with_capacity(node.steps.len());
    for step in &node.steps {
        let mut inner = ctx.create_sub_context(c, node.options.as_ref(), None, None);
        inner.delay_next_step(c, delay);
        visit(step, &mut inner, c);
        furthest = furthest.max(c.timeline(inner.timeline).current_time());
        branches.push(inner.timeline);
    }

    // Merge only once every branch has forked off the untouched parent.
    for branch in branches {
        c.timelines.merge_collected_styles(ctx.timeline, branch);
    }
    tracing::trace!(element = %ctx.element, furthest, "group merged");

    ctx.transform_into_new_timeline(c, Some(furthest));
    ctx.previous_node = Some(NodeKind::Group);
}

fn resolve_step_timing(
    timing: &Timing,
    params: &Params,
    errors: &mut Vec<AnimationError>,
    allow_negative: bool,
) -> AnimateTimings {
    match timing {
        Timing::Static(t) => t.clone(),
        Timing::Dynamic(raw) => {
            let value = interpolate_params(&Scalar::from(raw.as_str()), params, errors);
            resolve_timing(&value.to_string(), errors, allow_negative)
        }
    }
}

fn visit_animate(node: &AnimateNode, ctx: &mut Context, c: &mut Collector<'_>) {
    let timings = resolve_step_timing(&node.timings, ctx.params(), c.errors, false);
    ctx.current_animate_timings = Some(timings.clone());

    if timings.delay > 0.0 {
        ctx.increment_time(c, timings.delay);
        c.timeline_mut(ctx.timeline).snapshot_current_styles();
    }

    match &node.style {
        AnimateStyle::Keyframes(keyframes) => visit_keyframes(keyframes, ctx, c),
        AnimateStyle::Style(style) => {
            ctx.increment_time(c, timings.duration);
            visit_style(style, ctx, c);
            c.timeline_mut(ctx.timeline).apply_styles_to_keyframe();
        }
    }

    ctx.current_animate_timings = None;
    ctx.previous_node = Some(NodeKind::Animate);
}

fn visit_style(node: &StyleNode, ctx: &mut Context, c: &mut Collector<'_>) {
    let timings = ctx.current_animate_timings.as_ref();
    let timeline = c.timelines.get_mut(ctx.timeline);

    // A bare style() never overwrites a keyframe that already holds styles.
    if timings.is_none() && timeline.has_current_style_properties() {
        timeline.forward_frame();
    }

    let easing = timings
        .and_then(|t| t.easing.as_deref())
        .or(node.easing.as_deref());
    if node.is_empty_step() {
        timeline.apply_empty_step(easing);
    } else {
        timeline.set_styles(&node.styles, easing, ctx.params(), c.errors);
    }

    ctx.previous_node = Some(NodeKind::Style);
}

fn visit_keyframes(node: &KeyframesNode, ctx: &mut Context, c: &mut Collector<'_>) {
    let Some(timings) = ctx.current_animate_timings.clone() else {
        c.report(AnimationError::structural(
            "keyframes() must be used inside animate()",
        ));
        return;
    };

    let start = c.timeline(ctx.timeline).current_time();
    let duration = timings.duration;
    let inner = ctx.create_sub_context(c, None, None, None).timeline;
    c.timeline_mut(inner).set_easing(timings.easing);

    for (step, offset) in node.steps.iter().zip(node.resolved_offsets()) {
        let timeline = c.timelines.get_mut(inner);
        timeline.forward_time(offset * duration);
        timeline.set_styles(
            &step.styles,
            step.easing.as_deref(),
            ctx.params(),
            c.errors,
        );
        timeline.apply_styles_to_keyframe();
    }

    // The parent sees the keyframes' styles even if it never reuses this timeline.
    c.timelines.merge_collected_styles(ctx.timeline, inner);
    ctx.transform_into_new_timeline(c, Some(start + duration));
    ctx.previous_node = Some(NodeKind::Keyframes);
}

fn visit_reference(node: &ReferenceNode, ctx: &mut Context, c: &mut Collector<'_>) {
    ctx.update_options(node.options.as_ref(), true, c.errors);
    visit(&node.animation, ctx, c);
    ctx.previous_node = Some(NodeKind::Reference);
}

fn visit_animate_child(node: &AnimateChildNode, ctx: &mut Context, c: &mut Collector<'_>) {
    let sub_instructions = c.sub_instructions;
    if sub_instructions.has(ctx.element) {
        let inner = ctx.create_sub_context(c, node.options.as_ref(), None, None);
        let start = c.timeline(ctx.timeline).current_time();
        let end = visit_sub_instructions(sub_instructions.get(ctx.element), &inner, c);
        if start != end {
            ctx.transform_into_new_timeline(c, Some(end));
        }
    }
    ctx.previous_node = Some(NodeKind::AnimateChild);
}

/// Appends delegated instructions and returns the furthest end time.
fn visit_sub_instructions(
    instructions: &[TimelineInstruction],
    ctx: &Context,
    c: &mut Collector<'_>,
) -> f64 {
    let start = c.timeline(ctx.timeline).current_time();
    let duration = ctx.options.duration;
    let delay = ctx.options.delay;

    // An explicit zero duration skips the child animations entirely.
    if duration == Some(0.0) {
        tracing::debug!(element = %ctx.element, "child animations skipped");
        return start;
    }

    instructions.iter().fold(start, |furthest, instruction| {
        let timings = ctx.append_instruction_to_timeline(c, instruction, duration, delay);
        furthest.max(timings.duration + timings.delay)
    })
}

fn visit_animate_ref(node: &AnimateRefNode, ctx: &mut Context, c: &mut Collector<'_>) {
    let mut inner = ctx.create_sub_context(c, node.options.as_ref(), None, None);
    inner.transform_into_new_timeline(c, None);

    let no_params = Params::new();
    for options in [node.options.as_ref(), node.animation.options.as_ref()]
        .into_iter()
        .flatten()
    {
        let Some(delay) = &options.delay else {
            continue;
        };
        let delay = match delay {
            Scalar::Number(ms) => *ms,
            text => {
                let params = options.params.as_ref().unwrap_or(&no_params);
                resolve_timing_value(&interpolate_params(text, params, c.errors))
            }
        };
        inner.delay_next_step(c, delay);
    }

    visit_reference(&node.animation, &mut inner, c);
    let end = c.timeline(inner.timeline).current_time();
    ctx.transform_into_new_timeline(c, Some(end));
    ctx.previous_node = Some(NodeKind::AnimateRef);
}

fn visit_query(node: &QueryNode, ctx: &mut Context, c: &mut Collector<'_>) {
    let start = c.timeline(ctx.timeline).current_time();
    let options = node.options.as_ref();
    let delay = options
        .and_then(|o| o.delay.as_ref())
        .map(resolve_timing_value)
        .unwrap_or(0.0);

    if delay != 0.0
        && (ctx.previous_node == Some(NodeKind::Style)
            || (start == 0.0 && c.timeline(ctx.timeline).has_current_style_properties()))
    {
        c.timeline_mut(ctx.timeline).snapshot_current_styles();
        ctx.previous_node = None;
    }

    let elements = ctx.invoke_query(
        c,
        &node.selector,
        node.display_selector(),
        node.limit,
        node.include_self,
        node.optional,
    );
    ctx.current_query_total = elements.len();
    ctx.restart_stagger_chain();

    let mut furthest = start;
    let mut same_element = None;
    for (index, element) in elements.into_iter().enumerate() {
        ctx.current_query_index = index;
        let mut inner = ctx.create_sub_context(c, options, Some(element), None);
        inner.delay_next_step(c, delay);
        if element == ctx.element {
            same_element = Some(inner.timeline);
        }

        visit(&node.animation, &mut inner, c);

        let timeline = c.timeline_mut(inner.timeline);
        timeline.apply_styles_to_keyframe();
        furthest = furthest.max(timeline.current_time());
    }

    ctx.current_query_index = 0;
    ctx.current_query_total = 0;
    ctx.transform_into_new_timeline(c, Some(furthest));

    if let Some(own) = same_element {
        c.timelines.merge_collected_styles(ctx.timeline, own);
        c.timeline_mut(ctx.timeline).snapshot_current_styles();
    }

    ctx.previous_node = Some(NodeKind::Query);
}

fn visit_stagger(node: &StaggerNode, ctx: &mut Context, c: &mut Collector<'_>) {
    let Some(parent) = ctx.parent.clone() else {
        c.report(AnimationError::structural(
            "stagger() must be used inside query()",
        ));
        visit(&node.animation, ctx, c);
        ctx.previous_node = Some(NodeKind::Stagger);
        return;
    };

    let timings = resolve_step_timing(&node.timings, ctx.params(), c.errors, true);
    let timeline = ctx.timeline;

    let step = timings.duration.abs();
    let max_time = step * (ctx.current_query_total as f64 - 1.0);
    let mut delay = step * ctx.current_query_index as f64;
    if timings.duration < 0.0 {
        delay = max_time - delay;
    } else if timings.easing.as_deref() == Some(FULL_STAGGER) {
        delay = parent.stagger_time.get();
    }

    ctx.delay_next_step(c, delay);
    let starting_time = c.timeline(timeline).current_time();

    visit(&node.animation, ctx, c);
    ctx.previous_node = Some(NodeKind::Stagger);

    // Span consumed by this sibling, measured from the parent's start.
    let t = c.timeline(timeline);
    parent
        .stagger_time
        .set(t.current_time() - starting_time + (t.start_time() - parent.start_time));
}
