pub type KeyframerResult<T> = Result<T, KeyframerError>;

/// Fatal errors surfaced to callers of the public API.
///
/// The timeline compiler itself never returns these: it records [`AnimationError`] diagnostics
/// and keeps going. `KeyframerError` is what a caller gets when it asks for a strict result
/// (see [`crate::CompileOutput::into_result`]) or when validating/loading input.
#[derive(thiserror::Error, Debug)]
pub enum KeyframerError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("compile error: {}", join_diagnostics(.0))]
    Compile(Vec<AnimationError>),

    #[error("serialization error: {0}")]
    Serde(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl KeyframerError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for KeyframerError {
    fn from(err: serde_json::Error) -> Self {
        Self::serde(err.to_string())
    }
}

/// Non-fatal diagnostics collected while compiling a timeline.
///
/// Every variant is appended to the shared error sink; traversal continues and a best-effort
/// instruction set is still produced.
#[derive(thiserror::Error, Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnimationError {
    #[error("`query(\"{selector}\")` returned zero elements")]
    UnresolvableSelector { selector: String },

    #[error("please provide a value for the animation param {name}")]
    ParamInterpolation { name: String },

    #[error("malformed animation node: {message}")]
    StructuralNode { message: String },

    #[error("the provided timing value \"{value}\" is invalid")]
    InvalidTiming { value: String },

    #[error("duration values below 0 are not allowed for this animation step")]
    NegativeStepValue,

    #[error("delay values below 0 are not allowed for this animation step")]
    NegativeDelayValue,
}

impl AnimationError {
    pub fn structural(message: impl Into<String>) -> Self {
        Self::StructuralNode {
            message: message.into(),
        }
    }
}

fn join_diagnostics(errors: &[AnimationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
