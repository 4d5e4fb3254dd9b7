//! Encap: field encapsulation for Go source files.
//!
//! Rewrites direct accesses to a struct field into accessor calls while
//! keeping every other byte of the file intact. Reads become getter calls
//! (`x.Field` to `x.GetField()`) and plain assignments become setter calls
//! (`x.Field = v` to `x.SetField(v)`). The rewrite runs on a lossless
//! syntax tree, so formatting and comments survive, and the result is
//! re-parsed before it is written back.

pub mod comments;
pub mod driver;
pub mod registry;
pub mod rewrite;

pub use comments::{CommentLoss, CommentPolicy};
pub use driver::{run, RunOutcome, RunRequest, Sink};
pub use registry::{AccessorPair, AccessorRegistry};
pub use rewrite::{rewrite_module, RewriteError, RewriteSummary};
