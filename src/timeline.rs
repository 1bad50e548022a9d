//! Per-element keyframe accumulation and the compiled instruction model.

pub(crate) mod builder;
pub(crate) mod instruction;
pub(crate) mod registry;
pub(crate) mod stretched;

use crate::foundation::core::ElementId;
use crate::timeline::instruction::TimelineInstruction;

/// Anything the compiler can turn into a [`TimelineInstruction`] at the end of a run.
pub(crate) trait KeyframeSource {
    fn element(&self) -> ElementId;

    fn contains_animation(&self) -> bool;

    fn build_keyframes(self) -> TimelineInstruction;
}
