use std::fmt;

use indexmap::IndexMap;

/// Opaque handle to an element in the host's element tree.
///
/// The compiler never inspects elements; it only compares handles and passes them to the
/// [`crate::Driver`].
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct ElementId(pub u32);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A plain style or param value: a number or a string.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Number(f64),
    Text(String),
}

impl Scalar {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Number(_) => None,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for Scalar {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

/// Wire token for [`StyleValue::Auto`].
pub const AUTO_STYLE: &str = "*";
/// Wire token for [`StyleValue::PreSnapshot`].
pub const PRE_STYLE: &str = "!";

/// A style property value as seen by the timeline compiler.
///
/// `Auto` and `PreSnapshot` are placeholders: the playback consumer resolves them from the live
/// render state (after and before the animation respectively). They are never real values.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(from = "Scalar", into = "Scalar")]
pub enum StyleValue {
    Literal(Scalar),
    Auto,
    PreSnapshot,
}

impl StyleValue {
    pub fn number(n: f64) -> Self {
        Self::Literal(Scalar::Number(n))
    }

    pub fn text(s: impl Into<String>) -> Self {
        Self::Literal(Scalar::Text(s.into()))
    }

    pub fn is_placeholder(&self) -> bool {
        !matches!(self, Self::Literal(_))
    }
}

impl From<Scalar> for StyleValue {
    fn from(raw: Scalar) -> Self {
        match raw {
            Scalar::Text(s) if s == AUTO_STYLE => Self::Auto,
            Scalar::Text(s) if s == PRE_STYLE => Self::PreSnapshot,
            other => Self::Literal(other),
        }
    }
}

impl From<StyleValue> for Scalar {
    fn from(value: StyleValue) -> Self {
        match value {
            StyleValue::Literal(s) => s,
            StyleValue::Auto => Scalar::Text(AUTO_STYLE.to_string()),
            StyleValue::PreSnapshot => Scalar::Text(PRE_STYLE.to_string()),
        }
    }
}

impl From<f64> for StyleValue {
    fn from(n: f64) -> Self {
        Self::number(n)
    }
}

impl From<&str> for StyleValue {
    fn from(s: &str) -> Self {
        Scalar::from(s).into()
    }
}

/// Insertion-ordered property → value map.
pub type StyleMap = IndexMap<String, StyleValue>;

/// Insertion-ordered param name → value map.
pub type Params = IndexMap<String, Scalar>;

/// Builds a [`StyleMap`] from `(property, value)` pairs, keeping their order.
pub fn style_map<K, V, I>(entries: I) -> StyleMap
where
    K: Into<String>,
    V: Into<StyleValue>,
    I: IntoIterator<Item = (K, V)>,
{
    entries
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
