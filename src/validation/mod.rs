//! Parameter validation against regex rules.
//!
//! # Decision Table
//! ```text
//! validators  rule for param  pattern compiles  full match  → verdict
//! absent      -               -                 -           → Accept(Skipped)
//! present     absent          -                 -           → Accept(Skipped)
//! present     present         no                -           → Reject
//! present     present         yes               no          → Reject
//! present     present         yes               yes         → Accept(Performed)
//! ```
//!
//! # Design Decisions
//! - Matching is anchored at both ends; a substring match is not enough
//! - Non-string values are matched against their compact JSON text
//! - Rejection is an ordinary outcome, never a panic or I/O error

pub mod parameter;
pub mod rules;

pub use parameter::{match_text, validate, RejectReason, Rejection, ValidationStatus, Verdict};
pub use rules::{compile_full_match, PatternError, ValidatorMap};
