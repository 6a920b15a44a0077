//! The four operations exposed to clients.

use std::path::PathBuf;
use std::sync::Arc;

use serde_json::Value;

use crate::config::{StorageBackend, StorageConfig};
use crate::document::{self, Address, DocumentId};
use crate::error::{Result, StoreError};
use crate::observability::metrics;
use crate::service::types::{ReadOutcome, UpdateOutcome, UpdateRequest};
use crate::storage::{FsStorage, MemoryStorage, Storage};
use crate::store::{ConfigStore, JsonFormat, ValidatorStore};
use crate::validation::{self, ValidatorMap, Verdict};

/// Document and validator stores wired together.
#[derive(Debug, Clone)]
pub struct ConfigService {
    configs: ConfigStore,
    validators: ValidatorStore,
}

impl ConfigService {
    pub fn new(configs: ConfigStore, validators: ValidatorStore) -> Self {
        Self {
            configs,
            validators,
        }
    }

    /// Build stores for the configured backend.
    pub fn from_config(config: &StorageConfig) -> Self {
        let configs = storage_for(config.backend, config.configs_path());
        let validators = storage_for(config.backend, config.validators_path());
        let format = if config.pretty {
            JsonFormat::Pretty
        } else {
            JsonFormat::Compact
        };

        Self::new(
            ConfigStore::new(configs).with_format(format),
            ValidatorStore::new(validators).with_format(format),
        )
    }

    /// Service backed by fresh in-memory storage.
    pub fn in_memory() -> Self {
        Self::new(
            ConfigStore::new(Arc::new(MemoryStorage::new())),
            ValidatorStore::new(Arc::new(MemoryStorage::new())),
        )
    }

    pub fn configs(&self) -> &ConfigStore {
        &self.configs
    }

    pub fn validators(&self) -> &ValidatorStore {
        &self.validators
    }

    /// Create or replace document `name` with `body`.
    pub fn create_config(&self, name: &str, body: &Value) -> Result<DocumentId> {
        require_payload(body)?;
        let id = DocumentId::parse(name)?;

        self.configs.create(&id, body)?;
        tracing::info!(document = %id, "Config document created");
        Ok(id)
    }

    /// Read the value at `document/seg1/.../segN`.
    pub fn read(&self, raw_path: &str) -> Result<ReadOutcome> {
        let address = Address::parse(raw_path)?;
        let doc = self.configs.load(address.document())?;

        let value = document::get(&doc, address.field_path())
            .map_err(|source| StoreError::FieldNotFound {
                document: address.document().clone(),
                source,
            })?
            .clone();

        tracing::debug!(
            document = %address.document(),
            parameter = %address.field_path(),
            "Parameter read"
        );
        Ok(ReadOutcome {
            document: address.document().clone(),
            parameter: address.field_path().clone(),
            value,
        })
    }

    /// Validate and write a single parameter.
    pub fn update(&self, request: UpdateRequest) -> Result<UpdateOutcome> {
        let raw_path = request
            .path
            .filter(|p| !p.is_empty())
            .ok_or(StoreError::MissingInput("both 'path' and 'value' are required"))?;
        let value = request
            .value
            .filter(|v| !v.is_null())
            .ok_or(StoreError::MissingInput("both 'path' and 'value' are required"))?;

        let address = Address::parse(&raw_path)?;
        let validators = self.validators.load(address.document());

        let validation = match validation::validate(address.parameter(), &value, validators.as_ref()) {
            Verdict::Accept(status) => {
                metrics::record_validation(status.as_str());
                status
            }
            Verdict::Reject(rejection) => {
                metrics::record_validation("rejected");
                return Err(StoreError::ValidationRejected(rejection));
            }
        };

        let mut doc = self.configs.load(address.document())?;
        let previous = document::set_in_place(&mut doc, address.field_path(), value.clone())
            .map_err(|source| StoreError::FieldNotFound {
                document: address.document().clone(),
                source,
            })?;
        self.configs.save(address.document(), &doc)?;

        tracing::info!(
            document = %address.document(),
            parameter = %address.field_path(),
            created = previous.is_none(),
            validation = %validation,
            "Parameter updated"
        );
        Ok(UpdateOutcome {
            document: address.document().clone(),
            parameter: address.field_path().clone(),
            value,
            validation,
        })
    }

    /// Create or replace validator `name`; every pattern must compile.
    pub fn create_validator(&self, name: &str, body: &Value) -> Result<ValidatorMap> {
        require_payload(body)?;
        let id = DocumentId::parse(name)?;

        let map = self.validators.create(&id, body)?;
        tracing::info!(validator = %id, rules = map.len(), "Validator created");
        Ok(map)
    }
}

fn storage_for(backend: StorageBackend, dir: PathBuf) -> Arc<dyn Storage> {
    match backend {
        StorageBackend::Filesystem => Arc::new(FsStorage::new(dir)),
        StorageBackend::Memory => Arc::new(MemoryStorage::new()),
    }
}

/// Empty payloads (`null`, `{}`, `[]`, `""`, `false`, `0`) carry no data.
fn require_payload(body: &Value) -> Result<()> {
    let empty = match body {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    };
    if empty {
        Err(StoreError::MissingInput("no JSON data provided"))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{RejectReason, ValidationStatus};
    use serde_json::json;

    fn seeded() -> ConfigService {
        let service = ConfigService::in_memory();
        service
            .create_config("db", &json!({"conn": {"host": "localhost", "port": "5432"}}))
            .unwrap();
        service
            .create_validator("db", &json!({"port": "^[0-9]+$"}))
            .unwrap();
        service
    }

    #[test]
    fn test_rejected_update_leaves_document_unchanged() {
        let service = seeded();
        let before = service.configs().load(&DocumentId::parse("db").unwrap()).unwrap();

        let err = service
            .update(UpdateRequest::new("db/conn/port", json!("notanumber")))
            .unwrap_err();

        match err {
            StoreError::ValidationRejected(rejection) => {
                assert_eq!(rejection.parameter, "port");
                assert_eq!(rejection.pattern, "^[0-9]+$");
                assert!(matches!(rejection.reason, RejectReason::Mismatch { .. }));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        let after = service.configs().load(&DocumentId::parse("db").unwrap()).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn test_accepted_update_changes_only_target() {
        let service = seeded();

        let outcome = service
            .update(UpdateRequest::new("db/conn/port", json!("5433")))
            .unwrap();
        assert_eq!(outcome.validation, ValidationStatus::Performed);
        assert_eq!(outcome.parameter.to_string(), "conn/port");

        let doc = service.configs().load(&DocumentId::parse("db").unwrap()).unwrap();
        assert_eq!(doc, json!({"conn": {"host": "localhost", "port": "5433"}}));
    }

    #[test]
    fn test_update_without_rule_skips_validation() {
        let service = seeded();
        let outcome = service
            .update(UpdateRequest::new("db/conn/host", json!("db.internal")))
            .unwrap();
        assert_eq!(outcome.validation, ValidationStatus::Skipped);
    }

    #[test]
    fn test_read_existing_and_missing_fields() {
        let service = seeded();

        let outcome = service.read("db/conn/host").unwrap();
        assert_eq!(outcome.value, json!("localhost"));

        assert!(matches!(
            service.read("db/conn/missing"),
            Err(StoreError::FieldNotFound { .. })
        ));
        assert!(matches!(service.read("db"), Err(StoreError::MalformedAddress(_))));
        assert!(matches!(
            service.read("other/conn"),
            Err(StoreError::DocumentNotFound(_))
        ));
    }

    #[test]
    fn test_update_requires_path_and_value() {
        let service = seeded();
        let missing_value = UpdateRequest {
            path: Some("db/conn/port".into()),
            value: None,
        };
        let null_value = UpdateRequest::new("db/conn/port", json!(null));
        let empty_path = UpdateRequest {
            path: Some(String::new()),
            value: Some(json!("1")),
        };

        assert!(matches!(service.update(missing_value), Err(StoreError::MissingInput(_))));
        assert!(matches!(service.update(null_value), Err(StoreError::MissingInput(_))));
        assert!(matches!(service.update(empty_path), Err(StoreError::MissingInput(_))));
    }

    #[test]
    fn test_update_through_missing_parent_fails() {
        let service = seeded();
        assert!(matches!(
            service.update(UpdateRequest::new("db/pool/size", json!(4))),
            Err(StoreError::FieldNotFound { .. })
        ));
    }

    #[test]
    fn test_update_of_missing_document_fails_after_validation() {
        let service = seeded();
        assert!(matches!(
            service.update(UpdateRequest::new("cache/ttl", json!(30))),
            Err(StoreError::DocumentNotFound(_))
        ));
    }

    #[test]
    fn test_empty_payloads_are_missing_input() {
        let service = ConfigService::in_memory();
        for body in [json!(null), json!({}), json!([]), json!("")] {
            assert!(matches!(
                service.create_config("db", &body),
                Err(StoreError::MissingInput(_))
            ));
            assert!(matches!(
                service.create_validator("db", &body),
                Err(StoreError::MissingInput(_))
            ));
        }
    }

    #[test]
    fn test_broken_validator_document_skips_validation() {
        let storage = MemoryStorage::new();
        let service = ConfigService::new(
            ConfigStore::new(Arc::new(MemoryStorage::new())),
            ValidatorStore::new(Arc::new(storage.clone())),
        );
        service.create_config("db", &json!({"port": "1"})).unwrap();
        storage
            .save(&DocumentId::parse("db").unwrap(), b"not json")
            .unwrap();

        let outcome = service
            .update(UpdateRequest::new("db/port", json!("anything")))
            .unwrap();
        assert_eq!(outcome.validation, ValidationStatus::Skipped);
    }

    #[test]
    fn test_filesystem_backend_uses_separate_namespaces() {
        let dir = tempfile::tempdir().unwrap();
        let config = StorageConfig {
            data_dir: dir.path().to_path_buf(),
            ..StorageConfig::default()
        };
        let service = ConfigService::from_config(&config);

        service.create_config("db", &json!({"a": 1})).unwrap();
        service.create_validator("db", &json!({"a": "[0-9]"})).unwrap();

        assert!(dir.path().join("configures").join("db.json").exists());
        assert!(dir.path().join("validators").join("db.json").exists());
    }
}
