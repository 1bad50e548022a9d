use crate::{
    foundation::core::{Params, Scalar, StyleValue},
    foundation::error::AnimationError,
};

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// Substitutes `{{ name }}` placeholders in text values.
///
/// Unknown names are reported to `errors` and replaced by an empty string. Values without
/// placeholders (including every number) come back unchanged.
pub fn interpolate_params(
    value: &Scalar,
    params: &Params,
    errors: &mut Vec<AnimationError>,
) -> Scalar {
    let Scalar::Text(original) = value else {
        return value.clone();
    };

    let mut out = String::with_capacity(original.len());
    let mut rest = original.as_str();
    while let Some(start) = rest.find(OPEN) {
        let after_open = &rest[start + OPEN.len()..];
        let Some(end) = after_open.find(CLOSE) else {
            break;
        };
        let name = after_open[..end].trim();
        if name.is_empty() {
            out.push_str(&rest[..start + OPEN.len() + end + CLOSE.len()]);
            rest = &after_open[end + CLOSE.len()..];
            continue;
        }
        out.push_str(&rest[..start]);
        match params.get(name) {
            Some(v) => out.push_str(&v.to_string()),
            None => {
                tracing::warn!(param = name, "missing animation param");
                errors.push(AnimationError::ParamInterpolation {
                    name: name.to_string(),
                });
            }
        }
        rest = &after_open[end + CLOSE.len()..];
    }
    out.push_str(rest);

    if out == *original {
        value.clone()
    } else {
        Scalar::Text(out)
    }
}

/// Interpolates literal text values; placeholders pass through.
pub fn interpolate_style_value(
    value: &StyleValue,
    params: &Params,
    errors: &mut Vec<AnimationError>,
) -> StyleValue {
    match value {
        StyleValue::Literal(raw) => StyleValue::Literal(interpolate_params(raw, params, errors)),
        other => other.clone(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/dsl/params.rs"]
mod tests;
