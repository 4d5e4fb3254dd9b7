//! Trivia nodes: whitespace, comments, newlines.
//!
//! Go attaches no meaning to horizontal whitespace, but a lossless tree has
//! to keep every byte of it. Trivia comes in two shapes here:
//!
//! - **Raw** ([`Whitespace`]): the unstructured gap before a token inside an
//!   expression or declaration header. It may contain spaces, tabs, newlines
//!   and comments, and is emitted verbatim.
//! - **Structured** ([`EmptyLine`], [`TrailingWhitespace`]): the line-shaped
//!   trivia around statements, split into indentation, an optional comment,
//!   and the line terminator. Rewrites that move statements re-anchor these
//!   pieces individually.
//!
//! A rewrite that discards a node must account for any comment buried in its
//! raw trivia; the audit for that lives in the rewrite engine, not here.

use crate::nodes::traits::{Codegen, CodegenState};

/// Unstructured trivia preceding a token.
///
/// May span lines and contain `//` or `/* */` comments. Always emitted
/// exactly as it appeared in the source.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Whitespace<'a>(pub &'a str);

impl<'a> Codegen<'a> for Whitespace<'a> {
    fn codegen(&self, state: &mut CodegenState<'a>) {
        state.add_token(self.0);
    }
}

/// Horizontal whitespace on a single line: spaces and tabs only.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SimpleWhitespace<'a>(pub &'a str);

impl<'a> Codegen<'a> for SimpleWhitespace<'a> {
    fn codegen(&self, state: &mut CodegenState<'a>) {
        state.add_token(self.0);
    }
}

/// A comment, including its delimiters.
///
/// Line comments keep their `//` prefix and stop before the newline. Block
/// comments keep `/*` and `*/` and may contain newlines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment<'a>(pub &'a str);

impl<'a> Codegen<'a> for Comment<'a> {
    fn codegen(&self, state: &mut CodegenState<'a>) {
        state.add_token(self.0);
    }
}

/// A line terminator: `"\n"`, `"\r\n"`, or `""` for a line cut short by
/// end of file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Newline<'a>(pub &'a str);

impl<'a> Codegen<'a> for Newline<'a> {
    fn codegen(&self, state: &mut CodegenState<'a>) {
        state.add_token(self.0);
    }
}

/// A line that precedes a statement without belonging to one: blank, or
/// holding only a comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyLine<'a> {
    /// Indentation at the start of the line.
    pub whitespace: SimpleWhitespace<'a>,
    /// The comment occupying the line, if any.
    pub comment: Option<Comment<'a>>,
    /// The line terminator.
    pub newline: Newline<'a>,
}

impl<'a> Codegen<'a> for EmptyLine<'a> {
    fn codegen(&self, state: &mut CodegenState<'a>) {
        self.whitespace.codegen(state);
        self.comment.codegen(state);
        self.newline.codegen(state);
    }
}

/// The tail of a statement line: whitespace, an optional end-of-line
/// comment, and the terminator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrailingWhitespace<'a> {
    /// Whitespace between the statement and its comment or newline.
    pub whitespace: SimpleWhitespace<'a>,
    /// End-of-line comment, if any.
    pub comment: Option<Comment<'a>>,
    /// The line terminator.
    pub newline: Newline<'a>,
}

impl<'a> Codegen<'a> for TrailingWhitespace<'a> {
    fn codegen(&self, state: &mut CodegenState<'a>) {
        self.whitespace.codegen(state);
        self.comment.codegen(state);
        self.newline.codegen(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gen<'a>(node: &impl Codegen<'a>) -> String {
        let mut state = CodegenState::new();
        node.codegen(&mut state);
        state.to_string()
    }

    #[test]
    fn empty_line_with_comment() {
        let line = EmptyLine {
            whitespace: SimpleWhitespace("\t"),
            comment: Some(Comment("// cached size")),
            newline: Newline("\n"),
        };
        assert_eq!(gen(&line), "\t// cached size\n");
    }

    #[test]
    fn blank_empty_line() {
        let line = EmptyLine {
            whitespace: SimpleWhitespace(""),
            comment: None,
            newline: Newline("\n"),
        };
        assert_eq!(gen(&line), "\n");
    }

    #[test]
    fn trailing_with_crlf() {
        let trailing = TrailingWhitespace {
            whitespace: SimpleWhitespace("  "),
            comment: Some(Comment("// eol")),
            newline: Newline("\r\n"),
        };
        assert_eq!(gen(&trailing), "  // eol\r\n");
    }

    #[test]
    fn newline_may_be_empty_at_eof() {
        let trailing = TrailingWhitespace {
            whitespace: SimpleWhitespace(""),
            comment: None,
            newline: Newline(""),
        };
        assert_eq!(gen(&trailing), "");
    }
}
