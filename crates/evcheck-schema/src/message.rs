//! # Violation Messages
//!
//! Builds the human-readable text of a violation from the validator's
//! error kind and the offending value. Values are quoted the way the
//! log format expects: strings in single quotes, `True`/`False`/`None`
//! for literals, `[a, b]` and `{'k': v}` for containers.
//!
//! Keywords without a dedicated phrasing fall back to the validator's own
//! `Display`.

use jsonschema::error::{TypeKind, ValidationErrorKind};
use jsonschema::ValidationError;
use serde_json::Value;

/// Quote a JSON value for a violation message.
pub(crate) fn quote(value: &Value) -> String {
    match value {
        Value::Null => "None".to_string(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => quote_str(s),
        Value::Array(items) => {
            let inner: Vec<String> = items.iter().map(quote).collect();
            format!("[{}]", inner.join(", "))
        }
        Value::Object(map) => {
            let inner: Vec<String> = map
                .iter()
                .map(|(k, v)| format!("{}: {}", quote_str(k), quote(v)))
                .collect();
            format!("{{{}}}", inner.join(", "))
        }
    }
}

/// Single quotes unless the text contains `'` and no `"`.
fn quote_str(s: &str) -> String {
    let delim = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };
    let mut out = String::with_capacity(s.len() + 2);
    out.push(delim);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == delim => {
                out.push('\\');
                out.push(c);
            }
            c if (c as u32) < 0x20 || c == '\u{7f}' => {
                out.push_str(&format!("\\x{:02x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push(delim);
    out
}

fn unexpected(names: &[String]) -> String {
    let quoted: Vec<String> = names.iter().map(|n| quote_str(n)).collect();
    let verb = if names.len() == 1 { "was" } else { "were" };
    format!("{} {verb} unexpected", quoted.join(", "))
}

/// The message for one validation error.
pub(crate) fn describe(err: &ValidationError<'_>) -> String {
    let instance = quote(&err.instance);
    match &err.kind {
        ValidationErrorKind::Type { kind } => {
            let expected = match kind {
                TypeKind::Single(ty) => format!("'{ty}'"),
                TypeKind::Multiple(types) => types
                    .into_iter()
                    .map(|ty| format!("'{ty}'"))
                    .collect::<Vec<_>>()
                    .join(", "),
            };
            format!("{instance} is not of type {expected}")
        }
        ValidationErrorKind::Required { property } => {
            format!("{} is a required property", quote(property))
        }
        ValidationErrorKind::Enum { options } => {
            format!("{instance} is not one of {}", quote(options))
        }
        ValidationErrorKind::Constant { expected_value } => {
            format!("{} was expected", quote(expected_value))
        }
        ValidationErrorKind::Minimum { limit } => {
            format!("{instance} is less than the minimum of {limit}")
        }
        ValidationErrorKind::Maximum { limit } => {
            format!("{instance} is greater than the maximum of {limit}")
        }
        ValidationErrorKind::ExclusiveMinimum { limit } => {
            format!("{instance} is less than or equal to the minimum of {limit}")
        }
        ValidationErrorKind::ExclusiveMaximum { limit } => {
            format!("{instance} is greater than or equal to the maximum of {limit}")
        }
        ValidationErrorKind::MultipleOf { multiple_of } => {
            format!("{instance} is not a multiple of {multiple_of}")
        }
        ValidationErrorKind::MinLength { .. } | ValidationErrorKind::MinItems { .. } => {
            format!("{instance} is too short")
        }
        ValidationErrorKind::MaxLength { .. } | ValidationErrorKind::MaxItems { .. } => {
            format!("{instance} is too long")
        }
        ValidationErrorKind::MinProperties { .. } => {
            format!("{instance} does not have enough properties")
        }
        ValidationErrorKind::MaxProperties { .. } => {
            format!("{instance} has too many properties")
        }
        ValidationErrorKind::UniqueItems => format!("{instance} has non-unique elements"),
        ValidationErrorKind::Pattern { pattern } => {
            format!("{instance} does not match {}", quote_str(pattern))
        }
        ValidationErrorKind::Format { format } => {
            format!("{instance} is not a {}", quote_str(format))
        }
        ValidationErrorKind::AdditionalProperties { unexpected: names } => {
            format!("Additional properties are not allowed ({})", unexpected(names))
        }
        ValidationErrorKind::AdditionalItems { limit } => {
            let extra: Vec<String> = match &*err.instance {
                Value::Array(items) => items.iter().skip(*limit).map(quote).collect(),
                _ => Vec::new(),
            };
            let verb = if extra.len() == 1 { "was" } else { "were" };
            format!(
                "Additional items are not allowed ({} {verb} unexpected)",
                extra.join(", ")
            )
        }
        ValidationErrorKind::AnyOf | ValidationErrorKind::OneOfNotValid => {
            format!("{instance} is not valid under any of the given schemas")
        }
        ValidationErrorKind::Not { schema } => {
            format!("{instance} should not be valid under {}", quote(schema))
        }
        ValidationErrorKind::Contains => {
            format!("{instance} does not contain items matching the given schema")
        }
        ValidationErrorKind::FalseSchema => format!("False schema does not allow {instance}"),
        _ => err.to_string(),
    }
}
