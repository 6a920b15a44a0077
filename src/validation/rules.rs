//! Validator documents: parameter name → regex pattern.

use indexmap::IndexMap;
use regex_automata::meta::{self, Regex};
use regex_syntax::hir::{Hir, Look};
use serde::{Deserialize, Serialize};

/// Flat mapping of parameter name to regex pattern, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidatorMap(IndexMap<String, String>);

impl ValidatorMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, parameter: impl Into<String>, pattern: impl Into<String>) {
        self.0.insert(parameter.into(), pattern.into());
    }

    /// Pattern configured for `parameter`, if any.
    pub fn pattern(&self, parameter: &str) -> Option<&str> {
        self.0.get(parameter).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ValidatorMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// A pattern that failed to parse or build.
#[derive(Debug, thiserror::Error)]
pub enum PatternError {
    #[error(transparent)]
    Syntax(#[from] Box<regex_syntax::Error>),

    #[error(transparent)]
    Build(#[from] Box<meta::BuildError>),
}

/// Compile `pattern` so that it only matches an entire candidate string.
///
/// The pattern is parsed on its own and the anchors are attached to the
/// parsed expression, so nothing in the pattern text can reach outside them.
pub fn compile_full_match(pattern: &str) -> Result<Regex, PatternError> {
    let hir = regex_syntax::Parser::new().parse(pattern).map_err(Box::new)?;
    let anchored = Hir::concat(vec![Hir::look(Look::Start), hir, Hir::look(Look::End)]);
    let regex = meta::Builder::new().build_from_hir(&anchored).map_err(Box::new)?;
    Ok(regex)
}
