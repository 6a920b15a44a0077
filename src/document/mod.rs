//! Document addressing.
//!
//! # Data Flow
//! ```text
//! "db/conn/port"
//!     → address.rs (split into DocumentId + FieldPath)
//!     → id.rs (reject traversal / hidden names)
//!     → path.rs (walk the JSON tree: get or set_in_place)
//! ```
//!
//! # Design Decisions
//! - Segments are opaque object keys; array indices are never resolved
//! - Only the final segment is ever created; missing parents are an error
//! - Documents are `serde_json::Value` with insertion order preserved

pub mod address;
pub mod id;
pub mod path;

pub use address::Address;
pub use id::DocumentId;
pub use path::{get, set_in_place, FieldNotFound, FieldPath};
