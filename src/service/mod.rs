//! Request orchestration over the stores.
//!
//! # Data Flow (update)
//! ```text
//! {path, value}
//!     → Address::parse → (DocumentId, FieldPath)
//!     → ValidatorStore::load(document)
//!     → validation::validate(parameter, value, validators)
//!     → ConfigStore::load(document)
//!     → set_in_place(doc, field_path, value)
//!     → ConfigStore::save(document, doc)
//! ```
//!
//! # Design Decisions
//! - Synchronous and blocking; callers on an async runtime use `spawn_blocking`
//! - Validation runs before the document is loaded, so a rejected value
//!   never touches storage
//! - Load-modify-save is not transactional; concurrent writers to the same
//!   document can lose updates

pub mod config_service;
pub mod types;

pub use config_service::ConfigService;
pub use types::{ReadOutcome, UpdateOutcome, UpdateRequest};
