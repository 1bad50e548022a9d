//! # keyframer guide
//!
//! This module is a standalone walkthrough of keyframer's model and of the rules the compiler
//! follows. Read it before changing anything under `compile` or `timeline`: most of the behavior
//! below is observable in the output and downstream players depend on it.
//!
//! ---
//!
//! ## Core concepts
//!
//! - [`AnimationNode`](crate::AnimationNode): one node of the animation tree
//! - [`ElementId`](crate::ElementId): an opaque handle to an element of the host's tree
//! - [`Driver`](crate::Driver): resolves query selectors to elements (the only view of the tree)
//! - [`Timeline`](crate::Timeline): the keyframes of one element along one branch of the tree
//! - [`TimelineInstruction`](crate::TimelineInstruction): the compiled output for one timeline
//! - [`AnimationError`](crate::AnimationError): a non-fatal diagnostic recorded while compiling
//!
//! Compilation is explicitly staged:
//!
//! 1. Describe the animation with the builders or load it from JSON
//! 2. Compile it for a root element: [`compile`](crate::compile())
//! 3. Hand the instructions to a player
//!
//! ---
//!
//! ## Style values
//!
//! A [`StyleValue`](crate::StyleValue) is either a literal (number or string) or one of two
//! placeholders resolved by the player from the live element:
//!
//! - `Auto` (`"*"` on the wire): whatever the element computes *after* the animation
//! - `PreSnapshot` (`"!"` on the wire): whatever the element shows *before* the animation
//!
//! Every property that holds a placeholder in some keyframe is listed in the instruction's
//! `post_style_props` or `pre_style_props`, so a player knows what to sample.
//!
//! ---
//!
//! ## Building an animation (Rust DSL)
//!
//! ```rust
//! use keyframer::{
//!     CompileOpts, ElementId, StaticDriver, StyleValue, animate, compile, sequence, style,
//! };
//!
//! let ast = sequence([
//!     style([("opacity", 0.0)]).into(),
//!     animate(1000.0, style([("opacity", 1.0)])),
//! ]);
//!
//! let out = compile(&StaticDriver::new(), ElementId(1), &ast, &CompileOpts::default(), None);
//! assert!(out.is_clean());
//!
//! let inst = &out.instructions[0];
//! assert_eq!(inst.duration, 1000.0);
//! assert_eq!(inst.keyframes[0].styles["opacity"], StyleValue::number(0.0));
//! assert_eq!(inst.keyframes[1].styles["opacity"], StyleValue::number(1.0));
//! ```
//!
//! The same tree can be written as JSON; every node carries a `"type"` tag
//! (`"sequence"`, `"animate"`, `"style"`, ...). The CLI (`keyframer compile --in doc.json`) reads
//! that form.
//!
//! ---
//!
//! ## Time
//!
//! Every timeline has a `start_time` (absolute, ms) and a `duration` (local elapsed time). Steps
//! move the local clock forward:
//!
//! - `animate(d, ...)` moves it by `d` (plus the step's own delay, if any)
//! - a bare `style()` that follows a keyframe already holding styles lands one millisecond later
//! - a delay before anything happened on a timeline shifts its `start_time` instead
//!
//! When a timeline is built, keyframe times are divided by `duration` to get offsets. A timeline
//! with a single keyframe and no duration is emitted as two identical keyframes at `0` and `1`.
//!
//! ---
//!
//! ## Branches and merging
//!
//! `group()`, `query()`, `keyframes()`, `stagger()` and delegated animations fork new timelines.
//! All timelines of one element share that element's last known styles, which is how a property
//! written in one branch is backfilled in another.
//!
//! After a group, each branch's writes are merged into the parent: a branch wins a property only
//! if it wrote it strictly later than the parent did. On equal timestamps the parent keeps its
//! value.
//!
//! ---
//!
//! ## Queries and staggers
//!
//! A query runs its child animation once per matched element, in driver order. `:enter` and
//! `:leave` are rewritten to the classes configured in [`CompileOpts`](crate::CompileOpts);
//! `limit` keeps the first (`> 0`) or last (`< 0`) matches.
//!
//! Inside a query, `stagger(step, ...)` delays the n-th element by `n * step`. A negative step
//! reverses the order. The easing `"full"` instead delays each element by the span the previous
//! one actually took.
//!
//! ---
//!
//! ## Delegated animations
//!
//! `animate_child()` places instructions compiled for the current element elsewhere (see
//! [`ElementInstructionMap`](crate::ElementInstructionMap)) at the current time. A `duration` of
//! `0` in its options skips them. An instruction flagged `stretch_starting_keyframe` gets its
//! delay folded into its keyframes: the first keyframe is held from `0` until the animation
//! really starts.
//!
//! ---
//!
//! ## Errors
//!
//! The compiler never aborts. Unmatched queries, unknown params and malformed timings are recorded
//! as [`AnimationError`](crate::AnimationError)s while the rest of the tree still compiles. Use
//! [`CompileOutput::into_result`](crate::CompileOutput::into_result) to treat any diagnostic as
//! fatal, and [`AnimationNode::validate`](crate::AnimationNode::validate) to reject malformed
//! trees up front.
