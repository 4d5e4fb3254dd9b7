//! Binary entry point for the encap CLI.
//!
//! ## Usage
//!
//! ```bash
//! # Encapsulate a field, replacing the file in place
//! encap src.go Field GetField SetField
//!
//! # Preview the rewritten source on stdout
//! encap src.go Field GetField SetField --stdout
//!
//! # Machine-readable result
//! encap src.go Field GetField SetField --json
//!
//! # Keep comments that would otherwise abort the run
//! encap src.go Field GetField SetField --comment-policy reanchor
//! ```

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};

use encap::{run, CommentPolicy, RunOutcome, RunRequest, Sink};
use encap_core::output::{emit_response, ErrorOutput};
use encap_core::{EncapError, Warning};

// ============================================================================
// CLI Structure
// ============================================================================

/// Encapsulate a Go struct field behind accessor methods.
///
/// Rewrites every read of the field into a getter call and every plain
/// assignment to it into a setter call, leaving all other bytes of the file
/// untouched. The rewritten source is re-parsed before the file is replaced.
#[derive(Parser, Debug)]
#[command(name = "encap", version, about = "Encapsulate a Go struct field behind accessors")]
struct Cli {
    /// Go source file to rewrite.
    file: PathBuf,

    /// Name of the field to encapsulate.
    field: String,

    /// Getter method name (for example GetField).
    getter: String,

    /// Setter method name (for example SetField).
    setter: String,

    /// Print the rewritten source to stdout instead of replacing the file.
    #[arg(long)]
    stdout: bool,

    /// Emit the result as JSON on stdout.
    #[arg(long)]
    json: bool,

    /// What to do when a rewrite would drop a comment.
    #[arg(long, value_enum, default_value = "fail")]
    comment_policy: PolicyArg,

    /// Log level for tracing output.
    #[arg(long, value_enum, default_value = "warn")]
    log_level: LogLevel,
}

/// Comment handling policy.
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
enum PolicyArg {
    /// Abort without touching the file when a comment would be dropped.
    #[default]
    Fail,
    /// Keep the comment next to the rewritten expression and warn.
    Reanchor,
}

impl From<PolicyArg> for CommentPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Fail => CommentPolicy::Fail,
            PolicyArg::Reanchor => CommentPolicy::Reanchor,
        }
    }
}

/// Log level for tracing output.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    fn to_tracing_level(self) -> tracing::Level {
        match self {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

// ============================================================================
// Entry Point
// ============================================================================

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_tracing(cli.log_level);

    let json = cli.json;
    match execute(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let code = err.error_code().code();
            if json {
                let response = ErrorOutput::from_error(&err);
                let _ = emit_response(&response, &mut io::stdout());
                let _ = io::stdout().flush();
            } else {
                eprintln!("error: {err}");
            }
            ExitCode::from(code)
        }
    }
}

/// Initialize tracing subscriber.
fn init_tracing(level: LogLevel) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_tracing_level().to_string()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// Run the rewrite and print its result.
fn execute(cli: Cli) -> Result<(), EncapError> {
    let sink = if cli.stdout { Sink::Stdout } else { Sink::InPlace };
    let request = RunRequest::new(cli.file, cli.field, cli.getter, cli.setter)
        .with_policy(cli.comment_policy.into())
        .with_sink(sink);

    let outcome = run(&request)?;

    if cli.json {
        emit_response(&outcome.output, &mut io::stdout())
            .map_err(|e| EncapError::internal(e.to_string()))?;
        let _ = io::stdout().flush();
    } else if cli.stdout {
        print!("{}", outcome.source);
        print_warnings(&outcome.output.warnings);
    } else {
        print_summary(&outcome);
        print_warnings(&outcome.output.warnings);
    }
    Ok(())
}

/// Print the human-readable run summary to stdout.
fn print_summary(outcome: &RunOutcome) {
    let counts = outcome.output.counts;
    println!(
        "{}: rewrote {} read(s) and {} write(s) of {}",
        outcome.output.file, counts.getters, counts.setters, outcome.output.field
    );
}

/// Print warnings to stderr so stdout stays pipeable.
fn print_warnings(warnings: &[Warning]) {
    for warning in warnings {
        match &warning.location {
            Some(location) => {
                eprintln!("warning[{}] {}: {}", warning.code, location, warning.message)
            }
            None => eprintln!("warning[{}]: {}", warning.code, warning.message),
        }
    }
}
