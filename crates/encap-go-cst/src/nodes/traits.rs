//! Core traits for CST nodes.
//!
//! Every node knows how to regenerate its own source text through [`Codegen`].
//! Generating a whole module is a pre-order walk that appends string slices to
//! a [`CodegenState`]; because every byte of the input lives in exactly one
//! node field, regenerating an unmodified tree reproduces the input exactly.

use std::fmt;
use std::ops::Deref;

// ============================================================================
// Code Generation
// ============================================================================

/// Accumulates the output tokens produced by [`Codegen`].
///
/// All slices borrow from the original source (or from names synthesized by a
/// rewrite), so generation never copies the program text until the final
/// `to_string`.
#[derive(Debug, Default)]
pub struct CodegenState<'a> {
    tokens: Vec<&'a str>,
}

impl<'a> CodegenState<'a> {
    /// Create an empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one output token.
    pub fn add_token(&mut self, token: &'a str) {
        self.tokens.push(token);
    }

    /// Total generated length in bytes.
    pub fn len(&self) -> usize {
        self.tokens.iter().map(|t| t.len()).sum()
    }

    /// Whether anything has been generated yet.
    pub fn is_empty(&self) -> bool {
        self.tokens.iter().all(|t| t.is_empty())
    }
}

impl fmt::Display for CodegenState<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in &self.tokens {
            f.write_str(token)?;
        }
        Ok(())
    }
}

/// Regenerate source text for a node.
pub trait Codegen<'a> {
    fn codegen(&self, state: &mut CodegenState<'a>);
}

impl<'a, T: Codegen<'a>> Codegen<'a> for Box<T> {
    fn codegen(&self, state: &mut CodegenState<'a>) {
        self.deref().codegen(state)
    }
}

impl<'a, T: Codegen<'a>> Codegen<'a> for Option<T> {
    fn codegen(&self, state: &mut CodegenState<'a>) {
        if let Some(inner) = self {
            inner.codegen(state)
        }
    }
}

impl<'a, T: Codegen<'a>> Codegen<'a> for Vec<T> {
    fn codegen(&self, state: &mut CodegenState<'a>) {
        for item in self {
            item.codegen(state)
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    struct Lit(&'static str);

    impl<'a> Codegen<'a> for Lit {
        fn codegen(&self, state: &mut CodegenState<'a>) {
            state.add_token(self.0);
        }
    }

    #[test]
    fn state_concatenates_in_order() {
        let mut state = CodegenState::new();
        Lit("a").codegen(&mut state);
        Lit(".").codegen(&mut state);
        Lit("b").codegen(&mut state);
        assert_eq!(state.to_string(), "a.b");
        assert_eq!(state.len(), 3);
    }

    #[test]
    fn empty_tokens_do_not_count() {
        let mut state = CodegenState::new();
        Lit("").codegen(&mut state);
        assert!(state.is_empty());
        assert_eq!(state.to_string(), "");
    }

    #[test]
    fn option_and_vec_delegate() {
        let mut state = CodegenState::new();
        Some(Lit("x")).codegen(&mut state);
        None::<Lit>.codegen(&mut state);
        vec![Lit("y"), Lit("z")].codegen(&mut state);
        assert_eq!(state.to_string(), "xyz");
    }
}
