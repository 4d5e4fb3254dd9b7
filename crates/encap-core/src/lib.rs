//! Core infrastructure for encap.
//!
//! This crate holds the pieces shared by the rewrite engine and the CLI:
//! the unified error type with its exit-code mapping, text position
//! utilities, file I/O with atomic replacement, and the JSON output schema.

pub mod error;
pub mod files;
pub mod output;
pub mod text;

pub use error::{EncapError, OutputErrorCode};
pub use output::{ErrorOutput, Location, RewriteCounts, RunOutput, Warning, SCHEMA_VERSION};
