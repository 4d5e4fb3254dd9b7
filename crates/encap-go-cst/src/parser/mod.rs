//! Recursive descent parser for the supported Go subset.
//!
//! The parser owns two jobs beyond grammar recognition. First, every byte of
//! trivia a token carries must land in exactly one tree field, so the tree
//! regenerates the source verbatim. Second, line-shaped constructs
//! (statements, struct fields, grouped specs) get their trivia reshaped from
//! the raw token form into `leading_lines` / `indent` / `trailing`, which is
//! what lets rewrites move whole lines around without touching their
//! comments.
//!
//! The trivia reshaping works on the token stream's `whitespace_before`
//! slices. [`Parser::take_leading`] consumes the trivia in front of the next
//! token and splits it into full lines plus the final partial line;
//! [`Parser::finish_line`] consumes a statement terminator and carves the
//! end-of-line comment and newline out of the surrounding trivia. Both leave
//! an override slice behind so the next token does not see the consumed
//! bytes again.

mod errors;

pub use errors::{ParserError, Result};

use crate::nodes::{
    Arg, ArrayType, Assign, AssignOp, BasicLit, Binary, BinaryOp, Block, Break, Call, Comma,
    Comment, CompositeLit, Continue, Decl, Defer, Element, Else, ElseBody, EmptyLine, Expression,
    FieldLine, FieldName, For, ForClause, FuncDecl, Go, If, ImportBody, ImportDecl, ImportLine,
    ImportSpec, IncDec, IncDecOp, Index, KeyedElement, LitKind, MapType, Module, Name, NamedType,
    Newline, PackageClause, Paren, ParamList, Param, PointerType, RangeAssign, Results, Return,
    Selector, Semicolon, SimpleStmt, SimpleWhitespace, SliceType, Statement, StatementKind,
    StructType, TopLevel, TrailingWhitespace, TypeDecl, TypeExpr, Unary, UnaryOp, VarBody,
    VarDecl, VarInit, VarKeyword, VarSpec, VarSpecLine, VariadicType, Whitespace,
};
use crate::tokenizer::{tokenize, TokKind, Token};
use memchr::{memchr, memmem};

/// Parse a whole source file.
pub(crate) fn parse(source: &str) -> Result<'_, Module<'_>> {
    let tokens = tokenize(source).map_err(|err| ParserError::TokenizerError(err, source))?;
    let parser = Parser {
        source,
        tokens,
        pos: 0,
        ws_override: None,
        no_composite_lit: false,
    };
    parser.module()
}

// ============================================================================
// Trivia Splitting
// ============================================================================

/// Length of a newline at the start of `text`, if there is one.
fn newline_len(text: &str) -> Option<usize> {
    if text.starts_with("\r\n") {
        Some(2)
    } else if text.starts_with('\n') {
        Some(1)
    } else {
        None
    }
}

/// Scan a comment run starting at the beginning of `text`: one or more
/// comments separated by same-line whitespace. Returns the end of the run
/// and the length of the newline that terminated it (0 at end of input).
/// Newlines inside block comments do not terminate the run.
fn scan_comment_run(text: &str) -> (usize, usize) {
    let bytes = text.as_bytes();
    let mut pos = 0;
    loop {
        let rest = &text[pos..];
        if rest.is_empty() {
            return (pos, 0);
        }
        if rest.starts_with("//") {
            return match memchr(b'\n', &bytes[pos..]) {
                Some(i) => {
                    let mut end = pos + i;
                    let nl_len = if end > pos && bytes[end - 1] == b'\r' {
                        end -= 1;
                        2
                    } else {
                        1
                    };
                    (end, nl_len)
                }
                None => (text.len(), 0),
            };
        }
        if rest.starts_with("/*") {
            match memmem::find(&bytes[pos + 2..], b"*/") {
                Some(i) => pos += 2 + i + 2,
                None => return (text.len(), 0),
            }
            continue;
        }
        match bytes[pos] {
            b' ' | b'\t' => pos += 1,
            b'\r' if bytes.get(pos + 1) == Some(&b'\n') => return (pos, 2),
            b'\r' => pos += 1,
            b'\n' => return (pos, 1),
            _ => return (pos, 0),
        }
    }
}

/// Split leading trivia into completed lines and the final partial line.
/// The partial line is the indentation of whatever token follows.
fn split_leading(ws: &str) -> (Vec<EmptyLine<'_>>, &str) {
    let bytes = ws.as_bytes();
    let mut lines = Vec::new();
    let mut pos = 0;
    loop {
        let line_start = pos;
        let mut ws_end = pos;
        while ws_end < ws.len() {
            match bytes[ws_end] {
                b' ' | b'\t' => ws_end += 1,
                b'\r' if bytes.get(ws_end + 1) != Some(&b'\n') => ws_end += 1,
                _ => break,
            }
        }
        let rest = &ws[ws_end..];
        if rest.is_empty() {
            return (lines, &ws[line_start..]);
        }
        if let Some(nl_len) = newline_len(rest) {
            lines.push(EmptyLine {
                whitespace: SimpleWhitespace(&ws[line_start..ws_end]),
                comment: None,
                newline: Newline(&ws[ws_end..ws_end + nl_len]),
            });
            pos = ws_end + nl_len;
            continue;
        }
        if rest.starts_with("//") || rest.starts_with("/*") {
            let (run_len, nl_len) = scan_comment_run(rest);
            let comment_end = ws_end + run_len;
            if nl_len == 0 {
                // The trivia ends mid-line, so the comment sits on the same
                // line as the following token. Trailing spaces go back to
                // the partial line to keep the comment text clean.
                let text = &ws[ws_end..comment_end];
                let trimmed = text.trim_end_matches(|c| c == ' ' || c == '\t');
                let partial_start = ws_end + trimmed.len();
                lines.push(EmptyLine {
                    whitespace: SimpleWhitespace(&ws[line_start..ws_end]),
                    comment: Some(Comment(trimmed)),
                    newline: Newline(""),
                });
                return (lines, &ws[partial_start..]);
            }
            lines.push(EmptyLine {
                whitespace: SimpleWhitespace(&ws[line_start..ws_end]),
                comment: Some(Comment(&ws[ws_end..comment_end])),
                newline: Newline(&ws[comment_end..comment_end + nl_len]),
            });
            pos = comment_end + nl_len;
            continue;
        }
        // Trivia holds only whitespace and comments; nothing else reaches
        // this point.
        return (lines, &ws[line_start..]);
    }
}

/// Split same-line end-of-statement trivia into whitespace and an optional
/// comment. The input never contains a top-level newline.
fn split_trailing_content(same_line: &str) -> (SimpleWhitespace<'_>, Option<Comment<'_>>) {
    let bytes = same_line.as_bytes();
    let mut i = 0;
    while i + 1 < bytes.len() {
        if bytes[i] == b'/' && (bytes[i + 1] == b'/' || bytes[i + 1] == b'*') {
            return (
                SimpleWhitespace(&same_line[..i]),
                Some(Comment(&same_line[i..])),
            );
        }
        i += 1;
    }
    (SimpleWhitespace(same_line), None)
}

/// Find the first top-level newline in `ws` and split around it. Newlines
/// inside block comments do not count. Returns the same-line part, the
/// newline text, and the remainder.
fn split_first_line(ws: &str) -> Option<(&str, &str, &str)> {
    let bytes = ws.as_bytes();
    let mut pos = 0;
    while pos < ws.len() {
        let rest = &ws[pos..];
        if rest.starts_with("/*") {
            match memmem::find(&bytes[pos + 2..], b"*/") {
                Some(i) => pos += 2 + i + 2,
                None => return None,
            }
            continue;
        }
        if rest.starts_with("//") {
            match memchr(b'\n', &bytes[pos..]) {
                Some(i) => pos += i,
                None => return None,
            }
            continue;
        }
        if bytes[pos] == b'\n' {
            let line_end = if pos > 0 && bytes[pos - 1] == b'\r' {
                pos - 1
            } else {
                pos
            };
            return Some((&ws[..line_end], &ws[line_end..pos + 1], &ws[pos + 1..]));
        }
        pos += 1;
    }
    None
}

// ============================================================================
// Token Classification
// ============================================================================

fn starts_type(kind: TokKind) -> bool {
    matches!(
        kind,
        TokKind::Ident | TokKind::Star | TokKind::LBracket | TokKind::KwMap | TokKind::KwStruct
    )
}

fn binary_op_of(kind: TokKind) -> Option<BinaryOp> {
    let op = match kind {
        TokKind::LogOr => BinaryOp::LogOr,
        TokKind::LogAnd => BinaryOp::LogAnd,
        TokKind::Eq => BinaryOp::Eq,
        TokKind::Ne => BinaryOp::Ne,
        TokKind::Lt => BinaryOp::Lt,
        TokKind::Le => BinaryOp::Le,
        TokKind::Gt => BinaryOp::Gt,
        TokKind::Ge => BinaryOp::Ge,
        TokKind::Add => BinaryOp::Add,
        TokKind::Sub => BinaryOp::Sub,
        TokKind::Pipe => BinaryOp::Or,
        TokKind::Caret => BinaryOp::Xor,
        TokKind::Star => BinaryOp::Mul,
        TokKind::Slash => BinaryOp::Quo,
        TokKind::Percent => BinaryOp::Rem,
        TokKind::Shl => BinaryOp::Shl,
        TokKind::Shr => BinaryOp::Shr,
        TokKind::Amp => BinaryOp::And,
        TokKind::AndNot => BinaryOp::AndNot,
        _ => return None,
    };
    Some(op)
}

fn unary_op_of(kind: TokKind) -> Option<UnaryOp> {
    let op = match kind {
        TokKind::Add => UnaryOp::Pos,
        TokKind::Sub => UnaryOp::Neg,
        TokKind::Not => UnaryOp::Not,
        TokKind::Caret => UnaryOp::Xor,
        TokKind::Star => UnaryOp::Deref,
        TokKind::Amp => UnaryOp::Ref,
        _ => return None,
    };
    Some(op)
}

fn assign_op_of(kind: TokKind) -> Option<AssignOp> {
    let op = match kind {
        TokKind::Assign => AssignOp::Assign,
        TokKind::Define => AssignOp::Define,
        TokKind::AddAssign => AssignOp::AddAssign,
        TokKind::SubAssign => AssignOp::SubAssign,
        TokKind::MulAssign => AssignOp::MulAssign,
        TokKind::QuoAssign => AssignOp::QuoAssign,
        TokKind::RemAssign => AssignOp::RemAssign,
        TokKind::AndAssign => AssignOp::AndAssign,
        TokKind::OrAssign => AssignOp::OrAssign,
        TokKind::XorAssign => AssignOp::XorAssign,
        TokKind::ShlAssign => AssignOp::ShlAssign,
        TokKind::ShrAssign => AssignOp::ShrAssign,
        TokKind::AndNotAssign => AssignOp::AndNotAssign,
        _ => return None,
    };
    Some(op)
}

fn incdec_op_of(kind: TokKind) -> Option<IncDecOp> {
    match kind {
        TokKind::Inc => Some(IncDecOp::Inc),
        TokKind::Dec => Some(IncDecOp::Dec),
        _ => None,
    }
}

/// A parsed "type" in parameter position that can serve as a parameter name.
fn param_name(ty: TypeExpr<'_>) -> Option<Name<'_>> {
    match ty {
        TypeExpr::Named(NamedType {
            package: None,
            name,
        }) => Some(name),
        _ => None,
    }
}

/// Convert an expression usable as a composite literal type, or give the
/// expression back.
fn to_literal_type(expr: Expression<'_>) -> std::result::Result<TypeExpr<'_>, Expression<'_>> {
    match expr {
        Expression::Name(name) => Ok(TypeExpr::Named(NamedType {
            package: None,
            name,
        })),
        Expression::Selector(sel) => match *sel.value {
            Expression::Name(package) => Ok(TypeExpr::Named(NamedType {
                package: Some((package, sel.ws_dot)),
                name: sel.field,
            })),
            value => Err(Expression::Selector(Selector {
                value: Box::new(value),
                ws_dot: sel.ws_dot,
                field: sel.field,
            })),
        },
        other => Err(other),
    }
}

/// An expression list that is a single expression without a comma.
fn single_expression(mut elements: Vec<Element<'_>>) -> Option<Expression<'_>> {
    if elements.len() == 1 && elements[0].comma.is_none() {
        elements.pop().map(|e| e.value)
    } else {
        None
    }
}

// ============================================================================
// Parser
// ============================================================================

struct Parser<'a> {
    source: &'a str,
    tokens: Vec<Token<'a>>,
    pos: usize,
    /// Replacement trivia for the next token, set when a trivia helper has
    /// already consumed part of what the token carries.
    ws_override: Option<&'a str>,
    /// Composite literals in the `T{...}` form are not allowed at the top
    /// level of `if` and `for` headers; the opening brace belongs to the
    /// block there.
    no_composite_lit: bool,
}

impl<'a> Parser<'a> {
    // ------------------------------------------------------------------
    // Token access
    // ------------------------------------------------------------------

    fn peek(&self) -> &Token<'a> {
        &self.tokens[self.pos]
    }

    fn peek_kind(&self) -> TokKind {
        self.peek().kind
    }

    fn peek2_kind(&self) -> TokKind {
        self.tokens
            .get(self.pos + 1)
            .map_or(TokKind::EndMarker, |t| t.kind)
    }

    /// The next token's leading trivia, with any pending override applied.
    fn current_ws(&self) -> &'a str {
        self.ws_override.unwrap_or(self.peek().whitespace_before)
    }

    fn advance(&mut self) -> Token<'a> {
        let mut tok = self.tokens[self.pos];
        if let Some(ws) = self.ws_override.take() {
            tok.whitespace_before = ws;
        }
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        tok
    }

    fn is_virtual_semi(&self) -> bool {
        let tok = self.peek();
        tok.kind == TokKind::Semi && tok.text.is_empty()
    }

    fn token_desc(&self) -> String {
        let tok = self.peek();
        match tok.kind {
            TokKind::EndMarker => "end of file".to_string(),
            TokKind::Semi if tok.text.is_empty() => "newline".to_string(),
            _ => format!("'{}'", tok.text),
        }
    }

    fn syntax(&self, message: impl Into<String>) -> ParserError<'a> {
        ParserError::SyntaxError {
            message: message.into(),
            offset: self.peek().start,
            source_text: self.source,
        }
    }

    fn unsupported(&self, construct: &str) -> ParserError<'a> {
        ParserError::UnsupportedConstruct {
            construct: construct.to_string(),
            offset: self.peek().start,
            source_text: self.source,
        }
    }

    fn unsupported_token(&self) -> ParserError<'a> {
        let tok = self.peek();
        ParserError::UnsupportedConstruct {
            construct: format!("'{}'", tok.text),
            offset: tok.start,
            source_text: self.source,
        }
    }

    fn expect(&mut self, kind: TokKind, what: &str) -> Result<'a, Token<'a>> {
        if self.peek_kind() == kind {
            Ok(self.advance())
        } else {
            Err(self.syntax(format!("expected {}, found {}", what, self.token_desc())))
        }
    }

    fn name(&mut self) -> Name<'a> {
        let tok = self.advance();
        Name {
            ws: Whitespace(tok.whitespace_before),
            value: tok.text,
            offset: Some(tok.start),
        }
    }

    fn expect_name(&mut self, what: &str) -> Result<'a, Name<'a>> {
        if self.peek_kind() == TokKind::Ident {
            Ok(self.name())
        } else {
            Err(self.syntax(format!("expected {}, found {}", what, self.token_desc())))
        }
    }

    fn comma(&mut self) -> Comma<'a> {
        let tok = self.advance();
        Comma {
            ws: Whitespace(tok.whitespace_before),
        }
    }

    // ------------------------------------------------------------------
    // Trivia handling
    // ------------------------------------------------------------------

    /// Consume the next token's leading trivia and reshape it into completed
    /// lines plus the indentation of the token itself.
    fn take_leading(&mut self) -> (Vec<EmptyLine<'a>>, SimpleWhitespace<'a>) {
        let ws = self.current_ws();
        self.ws_override = Some("");
        let (lines, partial) = split_leading(ws);
        (lines, SimpleWhitespace(partial))
    }

    /// Consume a statement terminator and the end-of-line trivia after it.
    ///
    /// Before `}` or end of input the terminator may be absent. For a
    /// virtual semicolon the end-of-line comment lives in the semicolon's
    /// own trivia and the newline at the start of the next token's trivia;
    /// for an explicit one everything lives in the next token's trivia.
    fn finish_line(
        &mut self,
    ) -> Result<'a, (Semicolon<'a>, Option<TrailingWhitespace<'a>>)> {
        match self.peek_kind() {
            TokKind::Semi => {}
            TokKind::RBrace | TokKind::EndMarker => return Ok((Semicolon::None, None)),
            _ => {
                return Err(self.syntax(format!(
                    "expected ';' or newline, found {}",
                    self.token_desc()
                )))
            }
        }
        let semi = self.advance();
        if semi.text.is_empty() {
            let next_ws = self.current_ws();
            let (same_line, newline) = if let Some(rest) = next_ws.strip_prefix('\n') {
                self.ws_override = Some(rest);
                match semi.whitespace_before.strip_suffix('\r') {
                    Some(sl) => (sl, Newline("\r\n")),
                    None => (semi.whitespace_before, Newline("\n")),
                }
            } else {
                // Inserted at end of input or before a multi-line block
                // comment; there is no newline to own.
                (semi.whitespace_before, Newline(""))
            };
            let (whitespace, comment) = split_trailing_content(same_line);
            Ok((
                Semicolon::Virtual,
                Some(TrailingWhitespace {
                    whitespace,
                    comment,
                    newline,
                }),
            ))
        } else {
            let sem = Semicolon::Explicit {
                ws: Whitespace(semi.whitespace_before),
            };
            match split_first_line(self.current_ws()) {
                Some((same_line, newline, rest)) => {
                    self.ws_override = Some(rest);
                    let (whitespace, comment) = split_trailing_content(same_line);
                    Ok((
                        sem,
                        Some(TrailingWhitespace {
                            whitespace,
                            comment,
                            newline: Newline(newline),
                        }),
                    ))
                }
                // Something else follows on the same line.
                None => Ok((sem, None)),
            }
        }
    }

    /// Consume a `;` inside an `if` or `for` header. A virtual semicolon
    /// regenerates to nothing, so its trivia is pushed onto the next token.
    fn header_semicolon(&mut self) -> Semicolon<'a> {
        let tok = self.advance();
        if tok.text.is_empty() {
            let end = self.peek().start;
            self.ws_override = Some(&self.source[tok.ws_start()..end]);
            Semicolon::Virtual
        } else {
            Semicolon::Explicit {
                ws: Whitespace(tok.whitespace_before),
            }
        }
    }

    // ------------------------------------------------------------------
    // Module structure
    // ------------------------------------------------------------------

    fn module(mut self) -> Result<'a, Module<'a>> {
        let package = self.package_clause()?;
        let mut decls = Vec::new();
        while self.peek_kind() != TokKind::EndMarker {
            decls.push(self.top_level()?);
        }
        let (footer, eof_ws) = self.take_leading();
        Ok(Module {
            package,
            decls,
            footer,
            eof_ws,
        })
    }

    fn package_clause(&mut self) -> Result<'a, PackageClause<'a>> {
        let (leading_lines, indent) = self.take_leading();
        if self.peek_kind() != TokKind::KwPackage {
            return Err(self.syntax(format!(
                "expected 'package' clause, found {}",
                self.token_desc()
            )));
        }
        self.advance();
        let name = self.expect_name("package name")?;
        let (semicolon, trailing) = self.finish_line()?;
        Ok(PackageClause {
            leading_lines,
            indent,
            name,
            semicolon,
            trailing,
        })
    }

    fn top_level(&mut self) -> Result<'a, TopLevel<'a>> {
        let (leading_lines, indent) = self.take_leading();
        let decl = match self.peek_kind() {
            TokKind::KwImport => Decl::Import(self.import_decl()?),
            TokKind::KwFunc => Decl::Func(self.func_decl()?),
            TokKind::KwType => Decl::Type(self.type_decl()?),
            TokKind::KwVar | TokKind::KwConst => Decl::Var(self.var_decl()?),
            TokKind::Unsupported => return Err(self.unsupported_token()),
            _ => {
                return Err(self.syntax(format!(
                    "expected declaration, found {}",
                    self.token_desc()
                )))
            }
        };
        let (semicolon, trailing) = self.finish_line()?;
        Ok(TopLevel {
            leading_lines,
            indent,
            decl,
            semicolon,
            trailing,
        })
    }

    fn import_decl(&mut self) -> Result<'a, ImportDecl<'a>> {
        let kw = self.advance();
        let kw_ws = Whitespace(kw.whitespace_before);
        let body = if self.peek_kind() == TokKind::LParen {
            let lparen = self.advance();
            let ws_lparen = Whitespace(lparen.whitespace_before);
            let mut specs = Vec::new();
            loop {
                if self.peek_kind() == TokKind::RParen {
                    let (footer, ws_rparen) = self.take_leading();
                    self.advance();
                    break ImportBody::Group {
                        ws_lparen,
                        specs,
                        footer,
                        ws_rparen,
                    };
                }
                if self.peek_kind() == TokKind::EndMarker {
                    return Err(self.syntax("expected ')' to close import group"));
                }
                let (leading_lines, indent) = self.take_leading();
                let spec = self.import_spec()?;
                let (semicolon, trailing) = self.finish_line()?;
                specs.push(ImportLine {
                    leading_lines,
                    indent,
                    spec,
                    semicolon,
                    trailing,
                });
            }
        } else {
            ImportBody::Single(self.import_spec()?)
        };
        Ok(ImportDecl { kw_ws, body })
    }

    fn import_spec(&mut self) -> Result<'a, ImportSpec<'a>> {
        let alias = match self.peek_kind() {
            TokKind::Ident => Some(self.name()),
            TokKind::Dot => {
                let dot = self.advance();
                Some(Name {
                    ws: Whitespace(dot.whitespace_before),
                    value: dot.text,
                    offset: Some(dot.start),
                })
            }
            _ => None,
        };
        if self.peek_kind() != TokKind::Str {
            return Err(self.syntax(format!(
                "expected import path string, found {}",
                self.token_desc()
            )));
        }
        let tok = self.advance();
        let path = BasicLit {
            ws: Whitespace(tok.whitespace_before),
            kind: LitKind::String,
            value: tok.text,
        };
        Ok(ImportSpec { alias, path })
    }

    fn func_decl(&mut self) -> Result<'a, FuncDecl<'a>> {
        let kw = self.advance();
        let kw_ws = Whitespace(kw.whitespace_before);
        let receiver = if self.peek_kind() == TokKind::LParen {
            Some(self.param_list()?)
        } else {
            None
        };
        let name = self.expect_name("function name")?;
        if self.peek_kind() == TokKind::LBracket {
            return Err(self.unsupported("type parameter list"));
        }
        if self.peek_kind() != TokKind::LParen {
            return Err(self.syntax(format!(
                "expected '(' after function name, found {}",
                self.token_desc()
            )));
        }
        let params = self.param_list()?;
        let results = match self.peek_kind() {
            TokKind::LBrace => None,
            TokKind::LParen => Some(Results::Tuple(self.param_list()?)),
            TokKind::Semi | TokKind::EndMarker => {
                return Err(self.syntax("expected function body"))
            }
            _ => Some(Results::Single(self.type_expr()?)),
        };
        let body = self.block()?;
        Ok(FuncDecl {
            kw_ws,
            receiver,
            name,
            params,
            results,
            body,
        })
    }

    fn type_decl(&mut self) -> Result<'a, TypeDecl<'a>> {
        let kw = self.advance();
        let kw_ws = Whitespace(kw.whitespace_before);
        if self.peek_kind() == TokKind::LParen {
            return Err(self.unsupported("type declaration group"));
        }
        let name = self.expect_name("type name")?;
        if self.peek_kind() == TokKind::LBracket {
            return Err(self.unsupported("type parameter list"));
        }
        if self.peek_kind() == TokKind::Assign {
            return Err(self.unsupported("type alias"));
        }
        let ty = self.type_expr()?;
        Ok(TypeDecl { kw_ws, name, ty })
    }

    fn var_decl(&mut self) -> Result<'a, VarDecl<'a>> {
        let kw = self.advance();
        let keyword = if kw.kind == TokKind::KwVar {
            VarKeyword::Var
        } else {
            VarKeyword::Const
        };
        let kw_ws = Whitespace(kw.whitespace_before);
        let body = if self.peek_kind() == TokKind::LParen {
            let lparen = self.advance();
            let ws_lparen = Whitespace(lparen.whitespace_before);
            let mut specs = Vec::new();
            loop {
                if self.peek_kind() == TokKind::RParen {
                    let (footer, ws_rparen) = self.take_leading();
                    self.advance();
                    break VarBody::Group {
                        ws_lparen,
                        specs,
                        footer,
                        ws_rparen,
                    };
                }
                if self.peek_kind() == TokKind::EndMarker {
                    return Err(self.syntax("expected ')' to close declaration group"));
                }
                let (leading_lines, indent) = self.take_leading();
                let spec = self.var_spec()?;
                let (semicolon, trailing) = self.finish_line()?;
                specs.push(VarSpecLine {
                    leading_lines,
                    indent,
                    spec,
                    semicolon,
                    trailing,
                });
            }
        } else {
            VarBody::Single(self.var_spec()?)
        };
        Ok(VarDecl {
            kw_ws,
            keyword,
            body,
        })
    }

    fn var_spec(&mut self) -> Result<'a, VarSpec<'a>> {
        let mut names = Vec::new();
        loop {
            let name = self.expect_name("variable name")?;
            if self.peek_kind() == TokKind::Comma {
                names.push(FieldName {
                    name,
                    comma: Some(self.comma()),
                });
            } else {
                names.push(FieldName { name, comma: None });
                break;
            }
        }
        let ty = if starts_type(self.peek_kind()) {
            Some(self.type_expr()?)
        } else {
            None
        };
        let init = if self.peek_kind() == TokKind::Assign {
            let eq = self.advance();
            Some(VarInit {
                ws_eq: Whitespace(eq.whitespace_before),
                values: self.expression_list()?,
            })
        } else {
            None
        };
        Ok(VarSpec { names, ty, init })
    }

    // ------------------------------------------------------------------
    // Types
    // ------------------------------------------------------------------

    fn type_expr(&mut self) -> Result<'a, TypeExpr<'a>> {
        match self.peek_kind() {
            TokKind::Ident => {
                let name = self.name();
                if self.peek_kind() == TokKind::Dot {
                    let dot = self.advance();
                    let field = self.expect_name("type name after '.'")?;
                    Ok(TypeExpr::Named(NamedType {
                        package: Some((name, Whitespace(dot.whitespace_before))),
                        name: field,
                    }))
                } else {
                    Ok(TypeExpr::Named(NamedType {
                        package: None,
                        name,
                    }))
                }
            }
            TokKind::Star => {
                let star = self.advance();
                Ok(TypeExpr::Pointer(PointerType {
                    ws: Whitespace(star.whitespace_before),
                    elem: Box::new(self.type_expr()?),
                }))
            }
            TokKind::LBracket => {
                let lbracket = self.advance();
                let ws = Whitespace(lbracket.whitespace_before);
                if self.peek_kind() == TokKind::RBracket {
                    let rbracket = self.advance();
                    Ok(TypeExpr::Slice(SliceType {
                        ws,
                        ws_rbracket: Whitespace(rbracket.whitespace_before),
                        elem: Box::new(self.type_expr()?),
                    }))
                } else {
                    let saved = std::mem::replace(&mut self.no_composite_lit, false);
                    let len = self.expression()?;
                    self.no_composite_lit = saved;
                    let rbracket = self.expect(TokKind::RBracket, "']' after array length")?;
                    Ok(TypeExpr::Array(ArrayType {
                        ws,
                        len: Box::new(len),
                        ws_rbracket: Whitespace(rbracket.whitespace_before),
                        elem: Box::new(self.type_expr()?),
                    }))
                }
            }
            TokKind::KwMap => {
                let kw = self.advance();
                let ws = Whitespace(kw.whitespace_before);
                let lbracket = self.expect(TokKind::LBracket, "'[' after 'map'")?;
                let key = self.type_expr()?;
                let rbracket = self.expect(TokKind::RBracket, "']' after map key type")?;
                let value = self.type_expr()?;
                Ok(TypeExpr::Map(MapType {
                    ws,
                    ws_lbracket: Whitespace(lbracket.whitespace_before),
                    key: Box::new(key),
                    ws_rbracket: Whitespace(rbracket.whitespace_before),
                    value: Box::new(value),
                }))
            }
            TokKind::KwStruct => Ok(TypeExpr::Struct(self.struct_type()?)),
            TokKind::Ellipsis => {
                let tok = self.advance();
                Ok(TypeExpr::Variadic(VariadicType {
                    ws: Whitespace(tok.whitespace_before),
                    elem: Box::new(self.type_expr()?),
                }))
            }
            TokKind::KwFunc => Err(self.unsupported("function type")),
            TokKind::Arrow => Err(self.unsupported("channel type")),
            TokKind::Unsupported => Err(self.unsupported_token()),
            _ => Err(self.syntax(format!("expected type, found {}", self.token_desc()))),
        }
    }

    fn struct_type(&mut self) -> Result<'a, StructType<'a>> {
        let kw = self.advance();
        let ws = Whitespace(kw.whitespace_before);
        let lbrace = self.expect(TokKind::LBrace, "'{' after 'struct'")?;
        let ws_lbrace = Whitespace(lbrace.whitespace_before);
        let mut fields = Vec::new();
        loop {
            if self.peek_kind() == TokKind::RBrace {
                let (footer, ws_rbrace) = self.take_leading();
                self.advance();
                return Ok(StructType {
                    ws,
                    ws_lbrace,
                    fields,
                    footer,
                    ws_rbrace,
                });
            }
            if self.peek_kind() == TokKind::EndMarker {
                return Err(self.syntax("expected '}' to close struct type"));
            }
            let (leading_lines, indent) = self.take_leading();
            let (names, ty) = self.field_decl()?;
            let tag = if self.peek_kind() == TokKind::Str {
                let tok = self.advance();
                Some(BasicLit {
                    ws: Whitespace(tok.whitespace_before),
                    kind: LitKind::String,
                    value: tok.text,
                })
            } else {
                None
            };
            let (semicolon, trailing) = self.finish_line()?;
            fields.push(FieldLine {
                leading_lines,
                indent,
                names,
                ty,
                tag,
                semicolon,
                trailing,
            });
        }
    }

    /// One struct field line: named fields or an embedded type.
    fn field_decl(&mut self) -> Result<'a, (Vec<FieldName<'a>>, TypeExpr<'a>)> {
        if self.peek_kind() == TokKind::Star {
            // Embedded pointer type.
            return Ok((Vec::new(), self.type_expr()?));
        }
        if self.peek_kind() != TokKind::Ident {
            return Err(self.syntax(format!(
                "expected field declaration, found {}",
                self.token_desc()
            )));
        }
        match self.peek2_kind() {
            // Embedded qualified type, or embedded type alone on its line.
            TokKind::Dot | TokKind::Semi | TokKind::RBrace | TokKind::Str => {
                Ok((Vec::new(), self.type_expr()?))
            }
            TokKind::Comma => {
                let mut names = Vec::new();
                loop {
                    let name = self.expect_name("field name")?;
                    if self.peek_kind() == TokKind::Comma {
                        names.push(FieldName {
                            name,
                            comma: Some(self.comma()),
                        });
                    } else {
                        names.push(FieldName { name, comma: None });
                        break;
                    }
                }
                Ok((names, self.type_expr()?))
            }
            _ => {
                let name = self.name();
                Ok((vec![FieldName { name, comma: None }], self.type_expr()?))
            }
        }
    }

    fn param_list(&mut self) -> Result<'a, ParamList<'a>> {
        let lparen = self.advance();
        let ws_lparen = Whitespace(lparen.whitespace_before);
        let mut params = Vec::new();
        while self.peek_kind() != TokKind::RParen {
            if self.peek_kind() == TokKind::EndMarker {
                return Err(self.syntax("expected ')' to close parameter list"));
            }
            let first = self.type_expr()?;
            let (name, ty) =
                if starts_type(self.peek_kind()) || self.peek_kind() == TokKind::Ellipsis {
                    match param_name(first) {
                        Some(name) => (Some(name), self.type_expr()?),
                        None => return Err(self.syntax("expected parameter name")),
                    }
                } else {
                    (None, first)
                };
            let comma = match self.peek_kind() {
                TokKind::Comma => Some(self.comma()),
                TokKind::RParen => None,
                _ => {
                    return Err(self.syntax(format!(
                        "expected ',' or ')' in parameter list, found {}",
                        self.token_desc()
                    )))
                }
            };
            params.push(Param { name, ty, comma });
        }
        let rparen = self.advance();
        Ok(ParamList {
            ws_lparen,
            params,
            ws_rparen: Whitespace(rparen.whitespace_before),
        })
    }

    // ------------------------------------------------------------------
    // Statements
    // ------------------------------------------------------------------

    fn block(&mut self) -> Result<'a, Block<'a>> {
        let lbrace = self.expect(TokKind::LBrace, "'{'")?;
        let ws_lbrace = Whitespace(lbrace.whitespace_before);
        let saved = std::mem::replace(&mut self.no_composite_lit, false);
        let mut body = Vec::new();
        loop {
            if self.peek_kind() == TokKind::RBrace {
                let (footer, ws_rbrace) = self.take_leading();
                self.advance();
                self.no_composite_lit = saved;
                return Ok(Block {
                    ws_lbrace,
                    body,
                    footer,
                    ws_rbrace,
                });
            }
            if self.peek_kind() == TokKind::EndMarker {
                return Err(self.syntax("expected '}' to close block"));
            }
            body.push(self.statement()?);
        }
    }

    fn statement(&mut self) -> Result<'a, Statement<'a>> {
        let (leading_lines, indent) = self.take_leading();
        let kind = match self.peek_kind() {
            TokKind::KwReturn => StatementKind::Return(self.return_stmt()?),
            TokKind::KwIf => StatementKind::If(self.if_stmt()?),
            TokKind::KwFor => StatementKind::For(self.for_stmt()?),
            TokKind::KwDefer => {
                let kw = self.advance();
                let call = self.expression()?;
                if !matches!(call, Expression::Call(_)) {
                    return Err(self.syntax("expression in defer must be function call"));
                }
                StatementKind::Defer(Defer {
                    kw_ws: Whitespace(kw.whitespace_before),
                    call,
                })
            }
            TokKind::KwGo => {
                let kw = self.advance();
                let call = self.expression()?;
                if !matches!(call, Expression::Call(_)) {
                    return Err(self.syntax("expression in go must be function call"));
                }
                StatementKind::Go(Go {
                    kw_ws: Whitespace(kw.whitespace_before),
                    call,
                })
            }
            TokKind::KwBreak => {
                let kw = self.advance();
                StatementKind::Break(Break {
                    kw_ws: Whitespace(kw.whitespace_before),
                })
            }
            TokKind::KwContinue => {
                let kw = self.advance();
                StatementKind::Continue(Continue {
                    kw_ws: Whitespace(kw.whitespace_before),
                })
            }
            TokKind::KwVar | TokKind::KwConst => StatementKind::Var(self.var_decl()?),
            TokKind::LBrace => StatementKind::Block(self.block()?),
            TokKind::KwElse => return Err(self.syntax("unexpected 'else'")),
            TokKind::Unsupported => return Err(self.unsupported_token()),
            TokKind::Ident if self.peek2_kind() == TokKind::Colon => {
                return Err(self.unsupported("labeled statement"));
            }
            TokKind::Semi => {
                return Err(self.syntax(format!(
                    "expected statement, found {}",
                    self.token_desc()
                )))
            }
            _ => StatementKind::Simple(self.simple_stmt()?),
        };
        let (semicolon, trailing) = self.finish_line()?;
        Ok(Statement {
            leading_lines,
            indent,
            kind,
            semicolon,
            trailing,
        })
    }

    fn simple_stmt(&mut self) -> Result<'a, SimpleStmt<'a>> {
        let targets = self.expression_list()?;
        if let Some(op) = assign_op_of(self.peek_kind()) {
            let tok = self.advance();
            let values = self.expression_list()?;
            return Ok(SimpleStmt::Assign(Assign {
                targets,
                ws_op: Whitespace(tok.whitespace_before),
                op,
                values,
            }));
        }
        if let Some(op) = incdec_op_of(self.peek_kind()) {
            let tok = self.advance();
            match single_expression(targets) {
                Some(target) => {
                    return Ok(SimpleStmt::IncDec(IncDec {
                        target,
                        ws_op: Whitespace(tok.whitespace_before),
                        op,
                    }))
                }
                None => return Err(self.syntax("cannot increment more than one operand")),
            }
        }
        match single_expression(targets) {
            Some(value) => Ok(SimpleStmt::Expr(value)),
            None => Err(self.syntax(format!(
                "expected assignment after expression list, found {}",
                self.token_desc()
            ))),
        }
    }

    fn return_stmt(&mut self) -> Result<'a, Return<'a>> {
        let kw = self.advance();
        let kw_ws = Whitespace(kw.whitespace_before);
        let values = match self.peek_kind() {
            TokKind::Semi | TokKind::RBrace | TokKind::EndMarker => Vec::new(),
            _ => self.expression_list()?,
        };
        Ok(Return { kw_ws, values })
    }

    fn if_stmt(&mut self) -> Result<'a, If<'a>> {
        let kw = self.advance();
        let kw_ws = Whitespace(kw.whitespace_before);
        let saved = std::mem::replace(&mut self.no_composite_lit, true);
        let first = self.simple_stmt()?;
        let (init, cond) = if self.peek_kind() == TokKind::Semi {
            let semi = self.header_semicolon();
            let cond = self.expression()?;
            (Some((first, semi)), cond)
        } else {
            match first {
                SimpleStmt::Expr(cond) => (None, cond),
                _ => return Err(self.syntax("expected ';' after init statement in if")),
            }
        };
        self.no_composite_lit = saved;
        let block = self.block()?;
        let else_ = if self.peek_kind() == TokKind::KwElse {
            let tok = self.advance();
            let ws = Whitespace(tok.whitespace_before);
            let body = match self.peek_kind() {
                TokKind::KwIf => ElseBody::If(Box::new(self.if_stmt()?)),
                TokKind::LBrace => ElseBody::Block(self.block()?),
                _ => {
                    return Err(self.syntax(format!(
                        "expected 'if' or '{{' after 'else', found {}",
                        self.token_desc()
                    )))
                }
            };
            Some(Else { ws, body })
        } else {
            None
        };
        Ok(If {
            kw_ws,
            init,
            cond,
            block,
            else_,
        })
    }

    fn for_stmt(&mut self) -> Result<'a, For<'a>> {
        let kw = self.advance();
        let kw_ws = Whitespace(kw.whitespace_before);
        let saved = std::mem::replace(&mut self.no_composite_lit, true);
        let clause = self.for_clause()?;
        self.no_composite_lit = saved;
        let block = self.block()?;
        Ok(For {
            kw_ws,
            clause,
            block,
        })
    }

    fn for_clause(&mut self) -> Result<'a, ForClause<'a>> {
        match self.peek_kind() {
            TokKind::LBrace => return Ok(ForClause::Infinite),
            TokKind::KwRange => {
                let range = self.advance();
                let value = self.expression()?;
                return Ok(ForClause::Range {
                    assign: None,
                    ws_range: Whitespace(range.whitespace_before),
                    value,
                });
            }
            TokKind::Semi => return self.three_clause(None),
            _ => {}
        }
        let targets = self.expression_list()?;
        if matches!(self.peek_kind(), TokKind::Assign | TokKind::Define) {
            let tok = self.advance();
            let op = if tok.kind == TokKind::Define {
                AssignOp::Define
            } else {
                AssignOp::Assign
            };
            let ws_op = Whitespace(tok.whitespace_before);
            if self.peek_kind() == TokKind::KwRange {
                let range = self.advance();
                let value = self.expression()?;
                return Ok(ForClause::Range {
                    assign: Some(RangeAssign { targets, ws_op, op }),
                    ws_range: Whitespace(range.whitespace_before),
                    value,
                });
            }
            let values = self.expression_list()?;
            return self.three_clause(Some(SimpleStmt::Assign(Assign {
                targets,
                ws_op,
                op,
                values,
            })));
        }
        if let Some(op) = assign_op_of(self.peek_kind()) {
            let tok = self.advance();
            let values = self.expression_list()?;
            return self.three_clause(Some(SimpleStmt::Assign(Assign {
                targets,
                ws_op: Whitespace(tok.whitespace_before),
                op,
                values,
            })));
        }
        if let Some(op) = incdec_op_of(self.peek_kind()) {
            let tok = self.advance();
            return match single_expression(targets) {
                Some(target) => self.three_clause(Some(SimpleStmt::IncDec(IncDec {
                    target,
                    ws_op: Whitespace(tok.whitespace_before),
                    op,
                }))),
                None => Err(self.syntax("cannot increment more than one operand")),
            };
        }
        match self.peek_kind() {
            TokKind::LBrace => match single_expression(targets) {
                Some(cond) => Ok(ForClause::Cond(cond)),
                None => Err(self.syntax("expected single condition expression in for")),
            },
            TokKind::Semi => match single_expression(targets) {
                Some(init) => self.three_clause(Some(SimpleStmt::Expr(init))),
                None => Err(self.syntax("expected single init expression in for")),
            },
            _ => Err(self.syntax(format!(
                "expected for clause, found {}",
                self.token_desc()
            ))),
        }
    }

    fn three_clause(&mut self, init: Option<SimpleStmt<'a>>) -> Result<'a, ForClause<'a>> {
        if self.peek_kind() != TokKind::Semi {
            return Err(self.syntax(format!(
                "expected ';' in for clause, found {}",
                self.token_desc()
            )));
        }
        let semi1 = self.header_semicolon();
        let cond = if self.peek_kind() == TokKind::Semi {
            None
        } else {
            Some(self.expression()?)
        };
        if self.peek_kind() != TokKind::Semi {
            return Err(self.syntax(format!(
                "expected ';' in for clause, found {}",
                self.token_desc()
            )));
        }
        let semi2 = self.header_semicolon();
        let post = if self.peek_kind() == TokKind::LBrace {
            None
        } else {
            Some(self.simple_stmt()?)
        };
        Ok(ForClause::ThreeClause {
            init,
            semi1,
            cond,
            semi2,
            post,
        })
    }

    // ------------------------------------------------------------------
    // Expressions
    // ------------------------------------------------------------------

    fn expression_list(&mut self) -> Result<'a, Vec<Element<'a>>> {
        let mut elements = Vec::new();
        loop {
            let value = self.expression()?;
            if self.peek_kind() == TokKind::Comma {
                elements.push(Element {
                    value,
                    comma: Some(self.comma()),
                });
            } else {
                elements.push(Element { value, comma: None });
                return Ok(elements);
            }
        }
    }

    fn expression(&mut self) -> Result<'a, Expression<'a>> {
        self.binary_expr(0)
    }

    fn binary_expr(&mut self, min_prec: u8) -> Result<'a, Expression<'a>> {
        let mut left = self.unary_expr()?;
        while let Some(op) = binary_op_of(self.peek_kind()) {
            let prec = op.precedence();
            if prec <= min_prec {
                break;
            }
            let tok = self.advance();
            let right = self.binary_expr(prec)?;
            left = Expression::Binary(Binary {
                left: Box::new(left),
                ws_op: Whitespace(tok.whitespace_before),
                op,
                right: Box::new(right),
            });
        }
        Ok(left)
    }

    fn unary_expr(&mut self) -> Result<'a, Expression<'a>> {
        if let Some(op) = unary_op_of(self.peek_kind()) {
            let tok = self.advance();
            let operand = self.unary_expr()?;
            return Ok(Expression::Unary(Unary {
                ws: Whitespace(tok.whitespace_before),
                op,
                operand: Box::new(operand),
            }));
        }
        if self.peek_kind() == TokKind::Arrow {
            return Err(self.unsupported("channel operation"));
        }
        self.primary_expr()
    }

    fn primary_expr(&mut self) -> Result<'a, Expression<'a>> {
        let mut expr = self.operand()?;
        loop {
            match self.peek_kind() {
                TokKind::Dot => {
                    let dot = self.advance();
                    let field = self.expect_name("field or method name after '.'")?;
                    expr = Expression::Selector(Selector {
                        value: Box::new(expr),
                        ws_dot: Whitespace(dot.whitespace_before),
                        field,
                    });
                }
                TokKind::LParen => expr = self.call_expr(expr)?,
                TokKind::LBracket => expr = self.index_expr(expr)?,
                TokKind::LBrace if !self.no_composite_lit => match to_literal_type(expr) {
                    Ok(ty) => expr = self.composite_lit(Some(Box::new(ty)))?,
                    Err(original) => return Ok(original),
                },
                _ => return Ok(expr),
            }
        }
    }

    fn operand(&mut self) -> Result<'a, Expression<'a>> {
        match self.peek_kind() {
            TokKind::Ident => Ok(Expression::Name(self.name())),
            TokKind::Int => self.basic_lit(LitKind::Int),
            TokKind::Float => self.basic_lit(LitKind::Float),
            TokKind::Str => self.basic_lit(LitKind::String),
            TokKind::Rune => self.basic_lit(LitKind::Rune),
            TokKind::LParen => {
                let lparen = self.advance();
                let ws = Whitespace(lparen.whitespace_before);
                let saved = std::mem::replace(&mut self.no_composite_lit, false);
                let value = self.expression()?;
                self.no_composite_lit = saved;
                let rparen =
                    self.expect(TokKind::RParen, "')' to close parenthesized expression")?;
                Ok(Expression::Paren(Paren {
                    ws,
                    value: Box::new(value),
                    ws_rparen: Whitespace(rparen.whitespace_before),
                }))
            }
            TokKind::LBracket | TokKind::KwMap | TokKind::KwStruct => {
                let ty = self.type_expr()?;
                if self.peek_kind() != TokKind::LBrace {
                    return Err(self.syntax(format!(
                        "expected '{{' after literal type, found {}",
                        self.token_desc()
                    )));
                }
                self.composite_lit(Some(Box::new(ty)))
            }
            TokKind::KwFunc => Err(self.unsupported("function literal")),
            TokKind::Arrow => Err(self.unsupported("channel operation")),
            TokKind::Unsupported => Err(self.unsupported_token()),
            _ => Err(self.syntax(format!(
                "expected expression, found {}",
                self.token_desc()
            ))),
        }
    }

    fn basic_lit(&mut self, kind: LitKind) -> Result<'a, Expression<'a>> {
        let tok = self.advance();
        Ok(Expression::BasicLit(BasicLit {
            ws: Whitespace(tok.whitespace_before),
            kind,
            value: tok.text,
        }))
    }

    fn call_expr(&mut self, func: Expression<'a>) -> Result<'a, Expression<'a>> {
        let lparen = self.advance();
        let ws_lparen = Whitespace(lparen.whitespace_before);
        let saved = std::mem::replace(&mut self.no_composite_lit, false);
        let mut args = Vec::new();
        loop {
            if self.peek_kind() == TokKind::RParen {
                break;
            }
            let value = self.expression()?;
            let ellipsis = if self.peek_kind() == TokKind::Ellipsis {
                let tok = self.advance();
                Some(Whitespace(tok.whitespace_before))
            } else {
                None
            };
            match self.peek_kind() {
                TokKind::Comma => args.push(Arg {
                    value,
                    ellipsis,
                    comma: Some(self.comma()),
                }),
                TokKind::RParen => {
                    args.push(Arg {
                        value,
                        ellipsis,
                        comma: None,
                    });
                    break;
                }
                _ => {
                    return Err(self.syntax(format!(
                        "expected ',' or ')' in argument list, found {}",
                        self.token_desc()
                    )))
                }
            }
        }
        self.no_composite_lit = saved;
        let rparen = self.advance();
        Ok(Expression::Call(Call {
            func: Box::new(func),
            ws_lparen,
            args,
            ws_rparen: Whitespace(rparen.whitespace_before),
        }))
    }

    fn index_expr(&mut self, value: Expression<'a>) -> Result<'a, Expression<'a>> {
        let lbracket = self.advance();
        let ws_lbracket = Whitespace(lbracket.whitespace_before);
        if self.peek_kind() == TokKind::Colon {
            return Err(self.unsupported("slice expression"));
        }
        let saved = std::mem::replace(&mut self.no_composite_lit, false);
        let index = self.expression()?;
        self.no_composite_lit = saved;
        if self.peek_kind() == TokKind::Colon {
            return Err(self.unsupported("slice expression"));
        }
        let rbracket = self.expect(TokKind::RBracket, "']' after index")?;
        Ok(Expression::Index(Index {
            value: Box::new(value),
            ws_lbracket,
            index: Box::new(index),
            ws_rbracket: Whitespace(rbracket.whitespace_before),
        }))
    }

    fn composite_lit(&mut self, ty: Option<Box<TypeExpr<'a>>>) -> Result<'a, Expression<'a>> {
        let lbrace = self.advance();
        let ws_lbrace = Whitespace(lbrace.whitespace_before);
        let saved = std::mem::replace(&mut self.no_composite_lit, false);
        let mut elements = Vec::new();
        loop {
            if self.peek_kind() == TokKind::RBrace {
                break;
            }
            if self.is_virtual_semi() {
                return Err(self.syntax("missing ',' before newline in composite literal"));
            }
            let element = self.keyed_element()?;
            let done = element.comma.is_none();
            elements.push(element);
            if done {
                break;
            }
        }
        self.no_composite_lit = saved;
        if self.peek_kind() != TokKind::RBrace {
            if self.is_virtual_semi() {
                return Err(self.syntax("missing ',' before newline in composite literal"));
            }
            return Err(self.syntax(format!(
                "expected ',' or '}}' in composite literal, found {}",
                self.token_desc()
            )));
        }
        let rbrace = self.advance();
        Ok(Expression::CompositeLit(CompositeLit {
            ty,
            ws_lbrace,
            elements,
            ws_rbrace: Whitespace(rbrace.whitespace_before),
        }))
    }

    fn keyed_element(&mut self) -> Result<'a, KeyedElement<'a>> {
        let first = self.element_value()?;
        let (key, value) = if self.peek_kind() == TokKind::Colon {
            let colon = self.advance();
            let value = self.element_value()?;
            (Some((first, Whitespace(colon.whitespace_before))), value)
        } else {
            (None, first)
        };
        let comma = if self.peek_kind() == TokKind::Comma {
            Some(self.comma())
        } else {
            None
        };
        Ok(KeyedElement { key, value, comma })
    }

    /// A composite literal element value, which may be an elided nested
    /// literal: `{1, 2}` inside `[][]int{...}`.
    fn element_value(&mut self) -> Result<'a, Expression<'a>> {
        if self.peek_kind() == TokKind::LBrace {
            self.composite_lit(None)
        } else {
            self.expression()
        }
    }
}
