//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → limits.rs (reject oversized bodies with 413)
//!     → handlers (document ids sanitized by `DocumentId::parse`)
//! Outgoing response:
//!     → headers.rs (security response headers)
//! ```

pub mod headers;
pub mod limits;
