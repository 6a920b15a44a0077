//! Client for the config store HTTP API.

pub mod client;

pub use client::{ApiResponse, ConfigStoreClient};
