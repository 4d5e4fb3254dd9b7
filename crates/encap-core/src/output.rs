//! JSON output types and serialization for CLI responses.
//!
//! These types define the machine-readable contract of the `encap` binary.
//!
//! ## Design Principles
//!
//! 1. **Status first:** Every response has `status` as first field
//! 2. **Deterministic:** Same input -> same output (field order, array ordering)
//! 3. **Absent over null:** Optional fields are omitted, not `null`
//! 4. **Versioned:** Schema version in response enables forward compatibility

use std::io::{self, Write};

use serde::{Deserialize, Serialize, Serializer};

use crate::error::{EncapError, OutputErrorCode};

/// Current schema version for all responses.
pub const SCHEMA_VERSION: &str = "1";

// ============================================================================
// Locations and Warnings
// ============================================================================

/// A position in a source file, 1-indexed.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Location {
    /// Source file path as given on the command line.
    pub file: String,
    /// 1-indexed line number.
    pub line: u32,
    /// 1-indexed column number (counting chars).
    pub col: u32,
}

impl Location {
    /// Create a new location.
    pub fn new(file: impl Into<String>, line: u32, col: u32) -> Self {
        Location {
            file: file.into(),
            line,
            col,
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.col)
    }
}

/// Warning information for JSON output.
///
/// - `code`: Stable warning code (required)
/// - `message`: Human-readable message (required)
/// - `location`: Where the warning applies (optional)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Warning {
    /// Stable warning code.
    pub code: String,
    /// Human-readable message.
    pub message: String,
    /// Where the warning applies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

impl Warning {
    /// Create a simple warning without location.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Warning {
            code: code.into(),
            message: message.into(),
            location: None,
        }
    }

    /// Create a warning with location.
    pub fn with_location(
        code: impl Into<String>,
        message: impl Into<String>,
        location: Location,
    ) -> Self {
        Warning {
            code: code.into(),
            message: message.into(),
            location: Some(location),
        }
    }
}

// ============================================================================
// Run Response
// ============================================================================

/// Rewrite statistics for the run response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewriteCounts {
    /// Number of field reads replaced with getter calls.
    pub getters: u32,
    /// Number of field writes replaced with setter calls.
    pub setters: u32,
}

impl RewriteCounts {
    /// Create a new counts record.
    pub fn new(getters: u32, setters: u32) -> Self {
        RewriteCounts { getters, setters }
    }

    /// Total number of rewrites performed.
    pub fn total(&self) -> u32 {
        self.getters + self.setters
    }
}

/// Successful run response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunOutput {
    /// Status: "ok".
    pub status: String,
    /// Schema version for compatibility.
    pub schema_version: String,
    /// The rewritten file.
    pub file: String,
    /// The field whose accesses were encapsulated.
    pub field: String,
    /// Rewrite statistics.
    pub counts: RewriteCounts,
    /// Warnings (omitted when empty).
    #[serde(
        serialize_with = "serialize_sorted_warnings",
        skip_serializing_if = "Vec::is_empty",
        default
    )]
    pub warnings: Vec<Warning>,
}

impl RunOutput {
    /// Create a new run response.
    pub fn new(
        file: impl Into<String>,
        field: impl Into<String>,
        counts: RewriteCounts,
        warnings: Vec<Warning>,
    ) -> Self {
        RunOutput {
            status: "ok".to_string(),
            schema_version: SCHEMA_VERSION.to_string(),
            file: file.into(),
            field: field.into(),
            counts,
            warnings,
        }
    }
}

// ============================================================================
// Error Response
// ============================================================================

/// Error information for error responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Numeric error code (matches the process exit code).
    pub code: u8,
    /// Stable error name.
    pub name: String,
    /// Human-readable message.
    pub message: String,
}

/// Error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorOutput {
    /// Status: "error".
    pub status: String,
    /// Schema version for compatibility.
    pub schema_version: String,
    /// Error information.
    pub error: ErrorInfo,
}

impl ErrorOutput {
    /// Create an error response from an `EncapError`.
    pub fn from_error(err: &EncapError) -> Self {
        let code = OutputErrorCode::from(err);
        ErrorOutput {
            status: "error".to_string(),
            schema_version: SCHEMA_VERSION.to_string(),
            error: ErrorInfo {
                code: code.code(),
                name: code.name().to_string(),
                message: err.to_string(),
            },
        }
    }

    /// Create an error response with just code and message.
    pub fn new(code: OutputErrorCode, message: impl Into<String>) -> Self {
        ErrorOutput {
            status: "error".to_string(),
            schema_version: SCHEMA_VERSION.to_string(),
            error: ErrorInfo {
                code: code.code(),
                name: code.name().to_string(),
                message: message.into(),
            },
        }
    }
}

// ============================================================================
// Deterministic Sorting
// ============================================================================

/// Serialize warnings sorted by location (if present).
fn serialize_sorted_warnings<S>(warnings: &[Warning], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut sorted: Vec<_> = warnings.iter().collect();
    sorted.sort_by(|a, b| match (&a.location, &b.location) {
        (Some(loc_a), Some(loc_b)) => loc_a.cmp(loc_b),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => a.code.cmp(&b.code),
    });
    sorted.serialize(serializer)
}

// ============================================================================
// Response Emission
// ============================================================================

/// Emit a response as pretty-printed JSON to a writer.
///
/// This is the single output path for the CLI, ensuring consistency.
pub fn emit_response<T: Serialize>(response: &T, writer: &mut impl Write) -> io::Result<()> {
    let json = serde_json::to_string_pretty(response)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    writeln!(writer, "{}", json)
}

/// Emit a response as compact JSON (single line) to a writer.
pub fn emit_response_compact<T: Serialize>(
    response: &T,
    writer: &mut impl Write,
) -> io::Result<()> {
    let json = serde_json::to_string(response)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    writeln!(writer, "{}", json)
}

// ============================================================================
// Tests
// ============================================================================
