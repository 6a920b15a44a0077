//! Accept/reject decisions for a single parameter value.

use std::borrow::Cow;
use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::validation::rules::{compile_full_match, ValidatorMap};

/// Whether a rule was actually applied to an accepted value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationStatus {
    Performed,
    Skipped,
}

impl ValidationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationStatus::Performed => "performed",
            ValidationStatus::Skipped => "skipped",
        }
    }
}

impl fmt::Display for ValidationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RejectReason {
    /// The value's text did not match the whole pattern.
    Mismatch { value: String },
    /// The stored pattern does not compile.
    InvalidPattern { error: String },
}

/// Why a value was refused. Carries enough context for a client message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rejection {
    pub parameter: String,
    pub pattern: String,
    pub reason: RejectReason,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Accept(ValidationStatus),
    Reject(Rejection),
}

impl Verdict {
    pub fn is_accept(&self) -> bool {
        matches!(self, Verdict::Accept(_))
    }
}

/// Text a value is matched against: raw contents for strings, compact JSON otherwise.
///
/// Booleans and null read as `true`, `false` and `null`. The Python service
/// this replaces matched `True`, `False` and `None`, so patterns written for
/// those spellings need updating.
pub fn match_text(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s),
        other => Cow::Owned(other.to_string()),
    }
}

/// Check `value` against the rule for `parameter`, if one is configured.
pub fn validate(parameter: &str, value: &Value, validators: Option<&ValidatorMap>) -> Verdict {
    let Some(validators) = validators else {
        tracing::warn!(parameter, "No validator loaded, validation skipped");
        return Verdict::Accept(ValidationStatus::Skipped);
    };

    let Some(pattern) = validators.pattern(parameter) else {
        tracing::warn!(parameter, "No pattern for parameter, validation skipped");
        return Verdict::Accept(ValidationStatus::Skipped);
    };

    let reject = |reason| {
        Verdict::Reject(Rejection {
            parameter: parameter.to_string(),
            pattern: pattern.to_string(),
            reason,
        })
    };

    let regex = match compile_full_match(pattern) {
        Ok(regex) => regex,
        Err(e) => {
            tracing::error!(parameter, pattern, error = %e, "Invalid pattern in validator");
            return reject(RejectReason::InvalidPattern {
                error: e.to_string(),
            });
        }
    };

    let text = match_text(value);
    if regex.is_match(&*text) {
        Verdict::Accept(ValidationStatus::Performed)
    } else {
        tracing::error!(parameter, pattern, value = %text, "Value does not match pattern");
        reject(RejectReason::Mismatch {
            value: text.into_owned(),
        })
    }
}
