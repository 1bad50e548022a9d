use crate::{
    foundation::core::{Params, Scalar, StyleMap},
    foundation::error::{KeyframerError, KeyframerResult},
};

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// Per-node overrides: timing values and named params.
///
/// `delay`/`duration` may be numbers (milliseconds) or timing strings such as `"250ms"`.
pub struct AnimationOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay: Option<Scalar>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<Scalar>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Params>,
}

impl AnimationOptions {
    pub fn with_delay(mut self, delay: impl Into<Scalar>) -> Self {
        self.delay = Some(delay.into());
        self
    }

    pub fn with_duration(mut self, duration: impl Into<Scalar>) -> Self {
        self.duration = Some(duration.into());
        self
    }

    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<Scalar>) -> Self {
        self.params
            .get_or_insert_with(Params::new)
            .insert(name.into(), value.into());
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// Already-parsed timing of an `animate()` or `stagger()` step, in milliseconds.
pub struct AnimateTimings {
    pub duration: f64,
    #[serde(default)]
    pub delay: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub easing: Option<String>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
/// Timing of a step: static, or a string resolved against params at compile time.
pub enum Timing {
    Static(AnimateTimings),
    Dynamic(String),
}

impl From<f64> for Timing {
    fn from(duration: f64) -> Self {
        Self::Static(AnimateTimings {
            duration,
            ..AnimateTimings::default()
        })
    }
}

impl From<&str> for Timing {
    fn from(s: &str) -> Self {
        Self::Dynamic(s.to_string())
    }
}

impl From<AnimateTimings> for Timing {
    fn from(t: AnimateTimings) -> Self {
        Self::Static(t)
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
/// One entry of a `style()` call: a property map, or `"*"` for every known property.
pub enum StyleToken {
    Map(StyleMap),
    Wildcard(Wildcard),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// The `"*"` token.
pub struct Wildcard;

impl serde::Serialize for Wildcard {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(crate::foundation::core::AUTO_STYLE)
    }
}

impl<'de> serde::Deserialize<'de> for Wildcard {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        if s == crate::foundation::core::AUTO_STYLE {
            Ok(Wildcard)
        } else {
            Err(serde::de::Error::custom(format!(
                "expected \"*\" or a style map, got \"{s}\""
            )))
        }
    }
}

/// Closed set of node kinds, used to remember the previously visited node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Trigger,
    State,
    Transition,
    Sequence,
    Group,
    Animate,
    Keyframes,
    Style,
    Reference,
    AnimateChild,
    AnimateRef,
    Query,
    Stagger,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
/// A node of the declarative animation tree.
pub enum AnimationNode {
    Trigger(TriggerNode),
    State(StateNode),
    Transition(TransitionNode),
    Sequence(SequenceNode),
    Group(GroupNode),
    Animate(AnimateNode),
    Keyframes(KeyframesNode),
    Style(StyleNode),
    Reference(ReferenceNode),
    AnimateChild(AnimateChildNode),
    AnimateRef(AnimateRefNode),
    Query(QueryNode),
    Stagger(StaggerNode),
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TriggerNode {
    pub name: String,
    #[serde(default)]
    pub states: Vec<StateNode>,
    #[serde(default)]
    pub transitions: Vec<TransitionNode>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StateNode {
    pub name: String,
    pub style: StyleNode,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TransitionNode {
    /// State-change expression such as `"void => *"`.
    pub expr: String,
    pub animation: Box<AnimationNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<AnimationOptions>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SequenceNode {
    pub steps: Vec<AnimationNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<AnimationOptions>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GroupNode {
    pub steps: Vec<AnimationNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<AnimationOptions>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AnimateNode {
    pub timings: Timing,
    #[serde(default)]
    pub style: AnimateStyle,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
/// Payload of an `animate()` step.
pub enum AnimateStyle {
    Style(StyleNode),
    Keyframes(KeyframesNode),
}

impl Default for AnimateStyle {
    fn default() -> Self {
        Self::Style(StyleNode::default())
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StyleNode {
    #[serde(default)]
    pub styles: Vec<StyleToken>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub easing: Option<String>,
    /// Only meaningful inside a `keyframes()` list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<f64>,
}

impl StyleNode {
    /// A bare `animate(duration)` with no target styles.
    pub fn is_empty_step(&self) -> bool {
        self.styles.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct KeyframesNode {
    pub steps: Vec<StyleNode>,
}

impl KeyframesNode {
    /// Offsets of every step in `[0, 1]`.
    ///
    /// When no step declares an offset they are spread evenly; otherwise a missing offset is 0.
    pub fn resolved_offsets(&self) -> Vec<f64> {
        let n = self.steps.len();
        if self.steps.iter().all(|s| s.offset.is_none()) {
            if n <= 1 {
                return vec![0.0; n];
            }
            let gap = 1.0 / (n - 1) as f64;
            return (0..n)
                .map(|i| if i + 1 == n { 1.0 } else { i as f64 * gap })
                .collect();
        }
        self.steps.iter().map(|s| s.offset.unwrap_or(0.0)).collect()
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ReferenceNode {
    pub animation: Box<AnimationNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<AnimationOptions>,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AnimateChildNode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<AnimationOptions>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AnimateRefNode {
    pub animation: ReferenceNode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<AnimationOptions>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct QueryNode {
    /// Selector handed to the driver, with `:self` already stripped.
    pub selector: String,
    /// Selector as written by the author, used in diagnostics.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_selector: Option<String>,
    /// `0` = no limit, `n > 0` = first n, `n < 0` = last |n|.
    #[serde(default)]
    pub limit: i32,
    #[serde(default)]
    pub optional: bool,
    #[serde(default)]
    pub include_self: bool,
    pub animation: Box<AnimationNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<AnimationOptions>,
}

impl QueryNode {
    pub fn display_selector(&self) -> &str {
        self.original_selector.as_deref().unwrap_or(&self.selector)
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StaggerNode {
    /// Negative durations reverse the distribution; easing `"full"` chains real elapsed time.
    pub timings: Timing,
    pub animation: Box<AnimationNode>,
}

impl AnimationNode {
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Trigger(_) => NodeKind::Trigger,
            Self::State(_) => NodeKind::State,
            Self::Transition(_) => NodeKind::Transition,
            Self::Sequence(_) => NodeKind::Sequence,
            Self::Group(_) => NodeKind::Group,
            Self::Animate(_) => NodeKind::Animate,
            Self::Keyframes(_) => NodeKind::Keyframes,
            Self::Style(_) => NodeKind::Style,
            Self::Reference(_) => NodeKind::Reference,
            Self::AnimateChild(_) => NodeKind::AnimateChild,
            Self::AnimateRef(_) => NodeKind::AnimateRef,
            Self::Query(_) => NodeKind::Query,
            Self::Stagger(_) => NodeKind::Stagger,
        }
    }

    /// Checks structural rules the compiler relies on but does not enforce.
    pub fn validate(&self) -> KeyframerResult<()> {
        match self {
            Self::Trigger(t) => {
                if t.name.trim().is_empty() {
                    return Err(KeyframerError::validation("trigger name must be non-empty"));
                }
                for tr in &t.transitions {
                    tr.animation.validate()?;
                }
                Ok(())
            }
            Self::State(_) => Ok(()),
            Self::Transition(t) => t.animation.validate(),
            Self::Sequence(SequenceNode { steps, .. }) | Self::Group(GroupNode { steps, .. }) => {
                steps.iter().try_for_each(AnimationNode::validate)
            }
            Self::Animate(a) => {
                if let Timing::Static(t) = &a.timings {
                    validate_static_timings(t)?;
                }
                match &a.style {
                    AnimateStyle::Style(_) => Ok(()),
                    AnimateStyle::Keyframes(k) => k.validate(),
                }
            }
            Self::Keyframes(_) => Err(KeyframerError::validation(
                "keyframes() must be used inside animate()",
            )),
            Self::Style(_) | Self::AnimateChild(_) => Ok(()),
            Self::Reference(r) => r.animation.validate(),
            Self::AnimateRef(r) => r.animation.animation.validate(),
            Self::Query(q) => {
                if q.selector.trim().is_empty() && !q.include_self {
                    return Err(KeyframerError::validation(
                        "query selector must be non-empty unless it targets :self",
                    ));
                }
                q.animation.validate()
            }
            Self::Stagger(s) => s.animation.validate(),
        }
    }
}

impl KeyframesNode {
    pub fn validate(&self) -> KeyframerResult<()> {
        let declared = self.steps.iter().filter(|s| s.offset.is_some()).count();
        if declared != 0 && declared != self.steps.len() {
            return Err(KeyframerError::validation(
                "either all keyframe steps declare an offset or none do",
            ));
        }
        let offsets = self.resolved_offsets();
        if offsets.iter().any(|o| !(0.0..=1.0).contains(o)) {
            return Err(KeyframerError::validation(
                "keyframe offsets must be within [0, 1]",
            ));
        }
        if !offsets.windows(2).all(|w| w[0] <= w[1]) {
            return Err(KeyframerError::validation(
                "keyframe offsets must be in ascending order",
            ));
        }
        Ok(())
    }
}

fn validate_static_timings(t: &AnimateTimings) -> KeyframerResult<()> {
    if !t.duration.is_finite() || t.duration < 0.0 {
        return Err(KeyframerError::validation(
            "animate() duration must be finite and >= 0",
        ));
    }
    if !t.delay.is_finite() || t.delay < 0.0 {
        return Err(KeyframerError::validation(
            "animate() delay must be finite and >= 0",
        ));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/dsl/ast.rs"]
mod tests;
