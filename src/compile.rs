//! The timeline compiler: animation tree in, per-element keyframe instructions out.

pub(crate) mod context;
pub(crate) mod driver;
pub(crate) mod opts;
pub(crate) mod visitor;

use crate::{
    compile::context::{Collector, Context, ContextOptions},
    compile::driver::Driver,
    compile::opts::CompileOpts,
    dsl::ast::{AnimationNode, StyleToken},
    dsl::timing::resolve_timing_value,
    foundation::core::ElementId,
    foundation::error::{AnimationError, KeyframerError, KeyframerResult},
    timeline::KeyframeSource,
    timeline::instruction::{ElementInstructionMap, TimelineInstruction},
    timeline::registry::{TimelineKind, TimelineRegistry},
};

/// Compiles `ast` for `root`, appending non-fatal diagnostics to `errors`.
///
/// Always returns at least one instruction: when nothing animates, a single empty instruction
/// for `root` carrying the root delay.
#[tracing::instrument(skip_all, fields(root = %root))]
pub fn compile_timelines(
    driver: &dyn Driver,
    root: ElementId,
    ast: &AnimationNode,
    opts: &CompileOpts,
    sub_instructions: Option<&ElementInstructionMap>,
    errors: &mut Vec<AnimationError>,
) -> Vec<TimelineInstruction> {
    let no_sub_instructions = ElementInstructionMap::new();
    let mut c = Collector {
        driver,
        sub_instructions: sub_instructions.unwrap_or(&no_sub_instructions),
        enter_class_name: &opts.enter_class_name,
        leave_class_name: &opts.leave_class_name,
        errors,
        timelines: TimelineRegistry::new(),
    };

    let mut ctx = Context::root(root, &mut c);
    let delay = opts
        .options
        .delay
        .as_ref()
        .map(resolve_timing_value)
        .unwrap_or(0.0);
    ctx.options = ContextOptions {
        duration: opts.options.duration.as_ref().map(resolve_timing_value),
        delay: Some(delay),
        params: opts.options.params.clone().unwrap_or_default(),
    };

    ctx.delay_next_step(&mut c, delay);
    c.timelines.get_mut(ctx.timeline).set_styles(
        &[StyleToken::Map(opts.starting_styles.clone())],
        None,
        &ctx.options.params,
        c.errors,
    );

    visitor::visit(ast, &mut ctx, &mut c);

    let Collector {
        timelines, errors, ..
    } = c;
    let registered = timelines.len();
    let mut timelines: Vec<TimelineKind> = timelines
        .into_timelines()
        .into_iter()
        .filter(KeyframeSource::contains_animation)
        .collect();
    tracing::debug!(
        registered,
        animated = timelines.len(),
        diagnostics = errors.len(),
        "timelines collected"
    );

    // Final styles only replace the `*` left by a trailing `animate(duration)` on the root.
    if !opts.final_styles.is_empty() {
        let last_root = timelines.iter_mut().rev().find(|t| t.element() == root);
        if let Some(TimelineKind::Simple(last)) = last_root {
            if !last.allow_only_timeline_styles() {
                last.set_styles(
                    &[StyleToken::Map(opts.final_styles.clone())],
                    None,
                    &ctx.options.params,
                    errors,
                );
            }
        }
    }

    if timelines.is_empty() {
        return vec![TimelineInstruction::empty(root, delay)];
    }
    timelines
        .into_iter()
        .map(KeyframeSource::build_keyframes)
        .collect()
}

/// Result of [`compile()`]: the instructions plus every diagnostic recorded on the way.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct CompileOutput {
    pub instructions: Vec<TimelineInstruction>,
    pub errors: Vec<AnimationError>,
}

impl CompileOutput {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// Treats any diagnostic as fatal.
    pub fn into_result(self) -> KeyframerResult<Vec<TimelineInstruction>> {
        if self.errors.is_empty() {
            Ok(self.instructions)
        } else {
            Err(KeyframerError::Compile(self.errors))
        }
    }
}

/// Convenience wrapper around [`compile_timelines`] that owns the error sink.
pub fn compile(
    driver: &dyn Driver,
    root: ElementId,
    ast: &AnimationNode,
    opts: &CompileOpts,
    sub_instructions: Option<&ElementInstructionMap>,
) -> CompileOutput {
    let mut errors = Vec::new();
    let instructions = compile_timelines(driver, root, ast, opts, sub_instructions, &mut errors);
    CompileOutput {
        instructions,
        errors,
    }
}
