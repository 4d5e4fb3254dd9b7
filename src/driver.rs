//! The end-to-end run pipeline: read, parse, rewrite, verify, write.
//!
//! [`run`] is the single entry point behind the CLI. It validates the
//! accessor names, parses the file, rewrites it, and then re-parses its own
//! output before anything touches the disk: a rewrite that produced invalid
//! Go must never land in the file. Verification also scans the rewritten
//! tree for writes the rewrite could not claim (compound assignments,
//! multi-target forms) and reports each as a warning with its position.

use std::path::PathBuf;

use encap_core::files::{atomic_write, read_source};
use encap_core::text::byte_offset_to_position;
use encap_core::{EncapError, Location, RunOutput, Warning};
use encap_go_cst::{
    parse_module, plain_error, Codegen, CodegenState, FieldAccessCollector, FieldAccessKind,
};

use crate::comments::CommentPolicy;
use crate::registry::AccessorRegistry;
use crate::rewrite::rewrite_module;

// ============================================================================
// Request and Outcome
// ============================================================================

/// Where the rewritten source goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Sink {
    /// Atomically replace the input file.
    #[default]
    InPlace,
    /// Leave the file alone; the caller prints [`RunOutcome::source`].
    Stdout,
}

/// One encapsulation run over one file.
#[derive(Debug, Clone)]
pub struct RunRequest {
    pub file: PathBuf,
    pub field: String,
    pub getter: String,
    pub setter: String,
    pub policy: CommentPolicy,
    pub sink: Sink,
}

impl RunRequest {
    /// A request with the default policy (fail on comment loss) writing the
    /// file in place.
    pub fn new(
        file: impl Into<PathBuf>,
        field: impl Into<String>,
        getter: impl Into<String>,
        setter: impl Into<String>,
    ) -> Self {
        RunRequest {
            file: file.into(),
            field: field.into(),
            getter: getter.into(),
            setter: setter.into(),
            policy: CommentPolicy::default(),
            sink: Sink::default(),
        }
    }

    pub fn with_policy(mut self, policy: CommentPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_sink(mut self, sink: Sink) -> Self {
        self.sink = sink;
        self
    }
}

/// The result of a successful run.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// The machine-readable run report.
    pub output: RunOutput,
    /// The rewritten source text.
    pub source: String,
}

// ============================================================================
// Pipeline
// ============================================================================

/// Runs one encapsulation pass.
///
/// # Errors
///
/// - [`EncapError::InvalidArguments`] for bad accessor names
/// - [`EncapError::ReadFailed`] / [`EncapError::ParseFailed`] for input
///   problems
/// - [`EncapError::CommentLoss`] when a comment would be dropped under the
///   default policy
/// - [`EncapError::VerificationFailed`] when the rewritten source does not
///   parse
/// - [`EncapError::WriteFailed`] when the in-place write fails
pub fn run(request: &RunRequest) -> Result<RunOutcome, EncapError> {
    let mut registry = AccessorRegistry::new();
    registry.insert(&request.field, &request.getter, &request.setter)?;

    let file_label = request.file.display().to_string();
    let source = read_source(&request.file)?;
    tracing::debug!(file = %file_label, bytes = source.len(), "parsing source");

    let module = parse_module(&source).map_err(|err| EncapError::ParseFailed {
        path: file_label.clone(),
        message: plain_error(err, &file_label),
    })?;

    let (module, summary) = rewrite_module(module, &registry, request.policy)?;

    let mut state = CodegenState::default();
    module.codegen(&mut state);
    let rewritten = state.to_string();

    let mut warnings = summary.warnings;
    warnings.extend(verify(&rewritten, &registry, &file_label)?);

    match request.sink {
        Sink::InPlace => atomic_write(&request.file, &rewritten)?,
        Sink::Stdout => {}
    }

    tracing::info!(
        file = %file_label,
        getters = summary.counts.getters,
        setters = summary.counts.setters,
        warnings = warnings.len(),
        "rewrite complete"
    );

    let output = RunOutput::new(file_label, request.field.clone(), summary.counts, warnings);
    Ok(RunOutcome { output, source: rewritten })
}

/// Re-parses the rewritten source and scans it for leftover direct writes.
fn verify(
    rewritten: &str,
    registry: &AccessorRegistry,
    file_label: &str,
) -> Result<Vec<Warning>, EncapError> {
    let module = parse_module(rewritten).map_err(|err| EncapError::VerificationFailed {
        message: format!(
            "rewritten source does not parse:\n{}",
            plain_error(err, file_label)
        ),
    })?;

    let mut state = CodegenState::default();
    module.codegen(&mut state);
    if state.to_string() != rewritten {
        return Err(EncapError::internal(
            "regenerated source differs from the rewritten output",
        ));
    }

    let mut warnings = Vec::new();
    for field in registry.fields() {
        for access in FieldAccessCollector::collect(&module, field) {
            if access.kind != FieldAccessKind::Write {
                continue;
            }
            let message = format!("field {field} is still written directly; no setter was applied");
            let warning = match access.offset {
                Some(offset) => {
                    let (line, col) = byte_offset_to_position(rewritten, offset);
                    Warning::with_location(
                        "LeftoverWrite",
                        message,
                        Location::new(file_label, line, col),
                    )
                }
                None => Warning::new("LeftoverWrite", message),
            };
            warnings.push(warning);
        }
    }
    Ok(warnings)
}

// ============================================================================
// Tests
// ============================================================================
