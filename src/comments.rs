//! Comment carrier policy.
//!
//! Rewrites occasionally discard whitespace runs, and in this tree a
//! whitespace run can carry comments (an assignment's `=` may have a block
//! comment on either side). Every slice the rewriter is about to discard
//! passes through a [`CommentAudit`] first, which decides between failing
//! the run and keeping the slice anchored beside the rewritten expression.

use encap_core::Warning;
use thiserror::Error;

/// What to do when a rewrite would discard a comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommentPolicy {
    /// Abort the run without touching the file.
    #[default]
    Fail,
    /// Keep the comment beside the rewritten expression and record a
    /// warning.
    Reanchor,
}

/// A rewrite step would have dropped `text`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("comment would be dropped by the rewrite: {text}")]
pub struct CommentLoss {
    pub text: String,
}

/// Verdict for a whitespace slice the rewrite wants to discard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition<'a> {
    /// No comment present; the slice can go.
    Drop,
    /// The slice carries a comment and must stay in the output.
    Keep(&'a str),
}

/// Screens discarded whitespace for comments and accumulates the warnings
/// that reanchoring produces.
#[derive(Debug, Default)]
pub struct CommentAudit {
    policy: CommentPolicy,
    warnings: Vec<Warning>,
}

impl CommentAudit {
    pub fn new(policy: CommentPolicy) -> Self {
        CommentAudit { policy, warnings: Vec::new() }
    }

    /// Screens a whitespace slice before the rewrite discards it.
    ///
    /// # Errors
    ///
    /// Returns [`CommentLoss`] when the slice carries a comment and the
    /// policy is [`CommentPolicy::Fail`].
    pub fn screen<'a>(&mut self, ws: &'a str) -> Result<Disposition<'a>, CommentLoss> {
        if !contains_comment(ws) {
            return Ok(Disposition::Drop);
        }
        match self.policy {
            CommentPolicy::Fail => Err(CommentLoss { text: ws.trim().to_owned() }),
            CommentPolicy::Reanchor => {
                self.warnings.push(Warning::new(
                    "ReanchoredComment",
                    format!("comment {:?} kept beside the rewritten expression", ws.trim()),
                ));
                Ok(Disposition::Keep(ws))
            }
        }
    }

    /// Drains the warnings recorded so far.
    pub fn take_warnings(&mut self) -> Vec<Warning> {
        std::mem::take(&mut self.warnings)
    }
}

/// Whether a whitespace run carries a line or block comment.
fn contains_comment(ws: &str) -> bool {
    ws.contains("//") || ws.contains("/*")
}
