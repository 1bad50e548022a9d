use crate::{
    dsl::ast::{
        AnimateChildNode, AnimateNode, AnimateRefNode, AnimateStyle, AnimationNode,
        AnimationOptions, GroupNode, KeyframesNode, QueryNode, ReferenceNode, SequenceNode,
        StaggerNode, StyleNode, StyleToken, Timing, Wildcard,
    },
    foundation::core::{StyleValue, style_map},
};

const SELF_TOKEN: &str = ":self";

pub fn style<K, V, I>(entries: I) -> StyleNode
where
    K: Into<String>,
    V: Into<StyleValue>,
    I: IntoIterator<Item = (K, V)>,
{
    StyleNode {
        styles: vec![StyleToken::Map(style_map(entries))],
        easing: None,
        offset: None,
    }
}

/// A keyframe step pinned at `offset` (fraction of the enclosing `animate()` duration).
pub fn style_at<K, V, I>(offset: f64, entries: I) -> StyleNode
where
    K: Into<String>,
    V: Into<StyleValue>,
    I: IntoIterator<Item = (K, V)>,
{
    StyleNode {
        offset: Some(offset),
        ..style(entries)
    }
}

/// `style("*")`: every property known for the element, resolved at playback time.
pub fn auto_style() -> StyleNode {
    StyleNode {
        styles: vec![StyleToken::Wildcard(Wildcard)],
        easing: None,
        offset: None,
    }
}

pub fn keyframes(steps: impl IntoIterator<Item = StyleNode>) -> KeyframesNode {
    KeyframesNode {
        steps: steps.into_iter().collect(),
    }
}

pub fn animate(timings: impl Into<Timing>, style: impl Into<AnimateStyle>) -> AnimationNode {
    AnimationNode::Animate(AnimateNode {
        timings: timings.into(),
        style: style.into(),
    })
}

/// `animate(duration)` with no target styles.
pub fn animate_empty(timings: impl Into<Timing>) -> AnimationNode {
    AnimationNode::Animate(AnimateNode {
        timings: timings.into(),
        style: AnimateStyle::default(),
    })
}

pub fn sequence(steps: impl IntoIterator<Item = AnimationNode>) -> AnimationNode {
    AnimationNode::Sequence(SequenceNode {
        steps: steps.into_iter().collect(),
        options: None,
    })
}

pub fn sequence_with(
    steps: impl IntoIterator<Item = AnimationNode>,
    options: AnimationOptions,
) -> AnimationNode {
    AnimationNode::Sequence(SequenceNode {
        steps: steps.into_iter().collect(),
        options: Some(options),
    })
}

pub fn group(steps: impl IntoIterator<Item = AnimationNode>) -> AnimationNode {
    AnimationNode::Group(GroupNode {
        steps: steps.into_iter().collect(),
        options: None,
    })
}

pub fn group_with(
    steps: impl IntoIterator<Item = AnimationNode>,
    options: AnimationOptions,
) -> AnimationNode {
    AnimationNode::Group(GroupNode {
        steps: steps.into_iter().collect(),
        options: Some(options),
    })
}

/// Builds a query; a `:self` entry in the selector list targets the context element itself.
pub fn query(selector: &str, animation: AnimationNode) -> QueryNode {
    let (normalized, include_self) = normalize_selector(selector);
    QueryNode {
        selector: normalized,
        original_selector: Some(selector.to_string()),
        limit: 0,
        optional: false,
        include_self,
        animation: Box::new(animation),
        options: None,
    }
}

impl QueryNode {
    pub fn limit(mut self, limit: i32) -> Self {
        self.limit = limit;
        self
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn options(mut self, options: AnimationOptions) -> Self {
        self.options = Some(options);
        self
    }
}

pub fn stagger(timings: impl Into<Timing>, animation: AnimationNode) -> AnimationNode {
    AnimationNode::Stagger(StaggerNode {
        timings: timings.into(),
        animation: Box::new(animation),
    })
}

pub fn animate_child() -> AnimationNode {
    AnimationNode::AnimateChild(AnimateChildNode::default())
}

pub fn animate_child_with(options: AnimationOptions) -> AnimationNode {
    AnimationNode::AnimateChild(AnimateChildNode {
        options: Some(options),
    })
}

/// A reusable animation with default params.
pub fn animation(body: AnimationNode, options: Option<AnimationOptions>) -> ReferenceNode {
    ReferenceNode {
        animation: Box::new(body),
        options,
    }
}

pub fn use_animation(reference: ReferenceNode, options: Option<AnimationOptions>) -> AnimationNode {
    AnimationNode::AnimateRef(AnimateRefNode {
        animation: reference,
        options,
    })
}

impl From<StyleNode> for AnimationNode {
    fn from(node: StyleNode) -> Self {
        Self::Style(node)
    }
}

impl From<QueryNode> for AnimationNode {
    fn from(node: QueryNode) -> Self {
        Self::Query(node)
    }
}

impl From<ReferenceNode> for AnimationNode {
    fn from(node: ReferenceNode) -> Self {
        Self::Reference(node)
    }
}

impl From<StyleNode> for AnimateStyle {
    fn from(node: StyleNode) -> Self {
        Self::Style(node)
    }
}

impl From<KeyframesNode> for AnimateStyle {
    fn from(node: KeyframesNode) -> Self {
        Self::Keyframes(node)
    }
}

fn normalize_selector(selector: &str) -> (String, bool) {
    let mut include_self = false;
    let mut parts = Vec::new();
    for token in selector.split(',').map(str::trim) {
        if token == SELF_TOKEN {
            include_self = true;
        } else if !token.is_empty() {
            parts.push(token);
        }
    }
    (parts.join(", "), include_self)
}

#[cfg(test)]
#[path = "../../tests/unit/dsl/build.rs"]
mod tests;
