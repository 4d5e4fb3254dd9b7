//! Error types and error code constants for encap.
//!
//! This module provides a unified error type (`EncapError`) that bridges
//! errors from the parser, the rewrite engine, and the file layer into a
//! common format suitable for JSON output and process exit codes.
//!
//! ## Error Code Mapping
//!
//! - `2`: Invalid arguments (bad identifiers, malformed request)
//! - `3`: Parse errors (unreadable or unparseable input)
//! - `4`: Apply errors (failed to write changes)
//! - `5`: Verification failed (comment loss, unparseable output)
//! - `10`: Internal errors (bugs, unexpected state)
//!
//! ## Design
//!
//! - **Unified type**: `EncapError` is the single error type for CLI output
//! - **Bridging**: `impl From<X> for EncapError` bridges domain errors
//! - **Code mapping**: `OutputErrorCode` provides stable integer codes for JSON

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

// ============================================================================
// Output Error Codes
// ============================================================================

/// Error codes for JSON output and process exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum OutputErrorCode {
    /// Invalid arguments from caller (bad identifiers, malformed request).
    InvalidArguments = 2,
    /// Parse errors (unreadable file, source outside the grammar).
    ParseError = 3,
    /// Apply errors (failed to write the rewritten file).
    ApplyError = 4,
    /// Verification failed (comment loss, output the parser rejects).
    VerificationFailed = 5,
    /// Internal errors (bugs, unexpected state).
    InternalError = 10,
}

impl OutputErrorCode {
    /// Get the numeric code value.
    pub fn code(&self) -> u8 {
        *self as u8
    }

    /// Get the stable string name used in JSON error output.
    pub fn name(&self) -> &'static str {
        match self {
            OutputErrorCode::InvalidArguments => "InvalidArguments",
            OutputErrorCode::ParseError => "ParseError",
            OutputErrorCode::ApplyError => "ApplyError",
            OutputErrorCode::VerificationFailed => "VerificationFailed",
            OutputErrorCode::InternalError => "InternalError",
        }
    }
}

impl fmt::Display for OutputErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

// ============================================================================
// Unified Error Type
// ============================================================================

/// Unified error type for CLI output.
///
/// All subsystem errors are converted to this type before being rendered as
/// JSON output or a human-readable message. Each variant carries enough
/// context for a useful message on its own.
#[derive(Debug, Error)]
pub enum EncapError {
    /// Invalid arguments from caller.
    #[error("invalid arguments: {message}")]
    InvalidArguments { message: String },

    /// The input file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    ReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The input source could not be parsed.
    ///
    /// `message` is the rendered parse error including the source snippet.
    #[error("parse error in {path}:\n{message}")]
    ParseFailed { path: String, message: String },

    /// The rewritten file could not be written.
    #[error("failed to write {}: {source}", path.display())]
    WriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A rewrite would have dropped a comment.
    #[error("comment would be dropped by the rewrite: {text}")]
    CommentLoss { text: String },

    /// The rewritten output failed post-rewrite verification.
    #[error("verification failed: {message}")]
    VerificationFailed { message: String },

    /// Internal error (bug or unexpected state).
    #[error("internal error: {message}")]
    InternalError { message: String },
}

// ============================================================================
// Error Code Mapping
// ============================================================================

impl From<&EncapError> for OutputErrorCode {
    fn from(err: &EncapError) -> Self {
        match err {
            EncapError::InvalidArguments { .. } => OutputErrorCode::InvalidArguments,
            EncapError::ReadFailed { .. } => OutputErrorCode::ParseError,
            EncapError::ParseFailed { .. } => OutputErrorCode::ParseError,
            EncapError::WriteFailed { .. } => OutputErrorCode::ApplyError,
            EncapError::CommentLoss { .. } => OutputErrorCode::VerificationFailed,
            EncapError::VerificationFailed { .. } => OutputErrorCode::VerificationFailed,
            EncapError::InternalError { .. } => OutputErrorCode::InternalError,
        }
    }
}

impl From<EncapError> for OutputErrorCode {
    fn from(err: EncapError) -> Self {
        OutputErrorCode::from(&err)
    }
}

// ============================================================================
// Convenience Constructors
// ============================================================================

impl EncapError {
    /// Create an invalid arguments error.
    pub fn invalid_args(message: impl Into<String>) -> Self {
        EncapError::InvalidArguments {
            message: message.into(),
        }
    }

    /// Create a verification failure.
    pub fn verification(message: impl Into<String>) -> Self {
        EncapError::VerificationFailed {
            message: message.into(),
        }
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        EncapError::InternalError {
            message: message.into(),
        }
    }

    /// Get the error code for this error.
    pub fn error_code(&self) -> OutputErrorCode {
        OutputErrorCode::from(self)
    }
}

// ============================================================================
// Tests
// ============================================================================
