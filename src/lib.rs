//! keyframer compiles declarative, hierarchical animation trees into flat keyframe instructions.
//!
//! An animation is described as a tree of [`AnimationNode`]s: sequences, parallel groups, styles,
//! timed `animate()` steps, explicit keyframe lists, element queries, staggers, and delegation to
//! animations compiled elsewhere. [`compile()`] walks that tree once and produces one
//! [`TimelineInstruction`] per element and branch: keyframes normalized to offsets in `[0, 1]`,
//! with a duration and a start delay, ready for a playback engine.
//!
//! # Pipeline overview
//!
//! 1. **Describe**: build an [`AnimationNode`] with the builders (`sequence`, `group`, `animate`,
//!    `query`, ...) or load it from JSON with serde
//! 2. **Compile**: `AnimationNode + root ElementId + CompileOpts -> CompileOutput`
//! 3. **Play** (outside this crate): interpolate the keyframes; [`SpecialCasedStyles`] helps with
//!    properties that cannot be interpolated
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Never aborts**: problems found while compiling are collected as [`AnimationError`]s; a
//!   best-effort instruction set is always produced.
//! - **Deterministic**: every map is insertion-ordered, so the same input yields the same output.
//! - **No element tree**: selectors are resolved by a [`Driver`] supplied by the caller.
//!
//! # Getting started
//!
//! See [`crate::guide`] for a walkthrough of the model and the compiler's rules.
#![forbid(unsafe_code)]

mod compile;
mod dsl;
mod foundation;
mod playback;
mod timeline;

/// High-level, standalone documentation for keyframer's concepts and compile rules.
pub mod guide;

pub use compile::driver::{Driver, QueryEntry, StaticDriver};
pub use compile::opts::{CompileOpts, DEFAULT_ENTER_CLASS, DEFAULT_LEAVE_CLASS};
pub use compile::{CompileOutput, compile, compile_timelines};
pub use dsl::ast::{
    AnimateChildNode, AnimateNode, AnimateRefNode, AnimateStyle, AnimateTimings, AnimationNode,
    AnimationOptions, GroupNode, KeyframesNode, NodeKind, QueryNode, ReferenceNode, SequenceNode,
    StaggerNode, StateNode, StyleNode, StyleToken, Timing, TransitionNode, TriggerNode, Wildcard,
};
pub use dsl::build::{
    animate, animate_child, animate_child_with, animate_empty, animation, auto_style, group,
    group_with, keyframes, query, sequence, sequence_with, stagger, style, style_at,
    use_animation,
};
pub use dsl::params::{interpolate_params, interpolate_style_value};
pub use dsl::timing::{resolve_timing, resolve_timing_value};
pub use foundation::core::{
    AUTO_STYLE, ElementId, PRE_STYLE, Params, Scalar, StyleMap, StyleValue, style_map,
};
pub use foundation::error::{AnimationError, KeyframerError, KeyframerResult};
pub use playback::special_styles::{
    InitialStyleTable, NON_ANIMATABLE_PROPS, PlaybackState, SpecialCasedStyles, StyleHost,
    is_non_animatable,
};
pub use timeline::builder::{StyleAtTime, Timeline};
pub use timeline::instruction::{ElementInstructionMap, Keyframe, TimelineInstruction};
pub use timeline::stretched::StretchedTimeline;
