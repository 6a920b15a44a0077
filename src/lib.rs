//! Config Store Library
//!
//! Named JSON configuration documents, addressed field-by-field through
//! slash-delimited paths, with optional per-document regex validators gating
//! every write.

pub mod config;
pub mod document;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod security;
pub mod service;
pub mod storage;
pub mod store;
pub mod validation;

pub use config::schema::ServiceConfig;
pub use error::StoreError;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use service::ConfigService;
