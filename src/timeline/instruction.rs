use indexmap::{IndexMap, IndexSet};

use crate::foundation::core::{ElementId, StyleMap};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// One compiled keyframe.
pub struct Keyframe {
    /// Position in `[0, 1]` of the instruction's total duration.
    pub offset: f64,
    /// Easing applied from this keyframe towards the next one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub easing: Option<String>,
    pub styles: StyleMap,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Compiled, time-normalized keyframes for one element and one branch.
///
/// `pre_style_props` / `post_style_props` name the properties the player must sample from the
/// live render state before / after playback (they carry placeholder values in `keyframes`).
pub struct TimelineInstruction {
    pub element: ElementId,
    pub keyframes: Vec<Keyframe>,
    #[serde(default)]
    pub pre_style_props: IndexSet<String>,
    #[serde(default)]
    pub post_style_props: IndexSet<String>,
    pub duration: f64,
    pub delay: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub easing: Option<String>,
    /// Produced from a delegated (already compiled) instruction.
    #[serde(default)]
    pub sub_timeline: bool,
    /// The leading delay was folded into the keyframes.
    #[serde(default)]
    pub stretched: bool,
    /// Request flag: when this instruction is appended to another timeline, fold its delay into
    /// its keyframes.
    #[serde(default)]
    pub stretch_starting_keyframe: bool,
}

impl TimelineInstruction {
    pub(crate) fn empty(element: ElementId, delay: f64) -> Self {
        Self {
            element,
            keyframes: Vec::new(),
            pre_style_props: IndexSet::new(),
            post_style_props: IndexSet::new(),
            duration: 0.0,
            delay,
            easing: None,
            sub_timeline: false,
            stretched: false,
            stretch_starting_keyframe: false,
        }
    }

    pub fn total_time(&self) -> f64 {
        self.duration + self.delay
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
/// Already compiled instructions per element, consumed by `animate_child()`.
pub struct ElementInstructionMap {
    map: IndexMap<ElementId, Vec<TimelineInstruction>>,
}

impl ElementInstructionMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, element: ElementId) -> &[TimelineInstruction] {
        self.map.get(&element).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn append(
        &mut self,
        element: ElementId,
        instructions: impl IntoIterator<Item = TimelineInstruction>,
    ) {
        self.map.entry(element).or_default().extend(instructions);
    }

    pub fn has(&self, element: ElementId) -> bool {
        self.map.contains_key(&element)
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/instruction.rs"]
mod tests;
