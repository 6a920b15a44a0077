//! Document and validator stores.
//!
//! # Data Flow
//! ```text
//! ConfigStore:    DocumentId ⇄ serde_json::Value ⇄ bytes ⇄ Storage
//! ValidatorStore: DocumentId ⇄ ValidatorMap      ⇄ bytes ⇄ Storage
//! ```
//!
//! # Design Decisions
//! - Stateless per call: every operation loads fresh from storage
//! - A broken config document fails the request (MalformedDocument)
//! - A broken or unreadable validator document only skips validation
//! - Create and save share semantics: unconditional overwrite

pub mod config_store;
pub mod validator_store;

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

pub use config_store::ConfigStore;
pub use validator_store::ValidatorStore;

/// Layout of persisted JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Four-space indentation.
    #[default]
    Pretty,
    Compact,
}

impl JsonFormat {
    pub fn encode<T: Serialize + ?Sized>(self, value: &T) -> serde_json::Result<Vec<u8>> {
        match self {
            JsonFormat::Compact => serde_json::to_vec(value),
            JsonFormat::Pretty => {
                let mut out = Vec::new();
                let mut ser = Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(b"    "));
                value.serialize(&mut ser)?;
                Ok(out)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_pretty_uses_four_space_indent() {
        let bytes = JsonFormat::Pretty.encode(&json!({"a": 1})).unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), "{\n    \"a\": 1\n}");
    }

    #[test]
    fn test_compact_has_no_whitespace() {
        let bytes = JsonFormat::Compact.encode(&json!({"a": [1, 2]})).unwrap();
        assert_eq!(bytes, br#"{"a":[1,2]}"#);
    }
}
