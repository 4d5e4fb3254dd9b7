//! Tokenizer for the supported Go subset.
//!
//! Two properties matter more than speed here:
//!
//! 1. **Losslessness.** Every byte of the input lands in exactly one token:
//!    either in its `text` or in its `whitespace_before`. Comments are never
//!    tokens; they ride along in the trivia.
//! 2. **Automatic semicolon insertion.** Go's scanner inserts a semicolon
//!    when a newline follows certain tokens. We emit those as `Semi` tokens
//!    with empty text so the parser sees the same statement boundaries the
//!    Go compiler would, and the generator can reproduce the source without
//!    them.
//!
//! The ASI rule is purely lexical: it fires regardless of bracket nesting,
//! which is exactly why `f(a\n, b)` is a syntax error in Go and stays one
//! here.
//!
//! Out-of-subset keywords (`switch`, `chan`, ...) and the channel arrow
//! `<-` tokenize as [`TokKind::Unsupported`] and [`TokKind::Arrow`]; the
//! parser turns them into errors with a better message than the tokenizer
//! could give.

use memchr::{memchr, memmem};
use thiserror::Error;


// ============================================================================
// Token Types
// ============================================================================

/// Token kinds. `Semi` covers both explicit `;` (text `";"`) and virtual
/// semicolons inserted by ASI (text `""`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokKind {
    // Identifiers and literals
    Ident,
    Int,
    Float,
    Str,
    Rune,

    // Keywords in the subset
    KwPackage,
    KwImport,
    KwFunc,
    KwType,
    KwStruct,
    KwMap,
    KwVar,
    KwConst,
    KwReturn,
    KwIf,
    KwElse,
    KwFor,
    KwRange,
    KwDefer,
    KwGo,
    KwBreak,
    KwContinue,

    // Punctuation
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Comma,
    Semi,
    Colon,
    Dot,
    Ellipsis,

    // Operators
    Assign,
    Define,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    Not,
    Add,
    Sub,
    Star,
    Slash,
    Percent,
    Amp,
    Pipe,
    Caret,
    Shl,
    Shr,
    AndNot,
    LogAnd,
    LogOr,
    Inc,
    Dec,

    // Compound assignment
    AddAssign,
    SubAssign,
    MulAssign,
    QuoAssign,
    RemAssign,
    AndAssign,
    OrAssign,
    XorAssign,
    ShlAssign,
    ShrAssign,
    AndNotAssign,

    // Recognized but rejected by the parser
    Arrow,
    Unsupported,

    // End of input
    EndMarker,
}

/// One token with the trivia that precedes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokKind,
    /// The token text; empty for virtual semicolons and the end marker.
    pub text: &'a str,
    /// Whitespace and comments between the previous token and this one.
    pub whitespace_before: &'a str,
    /// Byte offset of `text` in the source.
    pub start: usize,
}

impl<'a> Token<'a> {
    /// Byte offset where this token's leading trivia begins.
    pub fn ws_start(&self) -> usize {
        self.start - self.whitespace_before.len()
    }
}

/// Tokenizer errors. These are byte-level problems; everything
/// grammar-shaped is the parser's job.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokError {
    #[error("string literal not terminated")]
    UnterminatedString { offset: usize },
    #[error("rune literal not terminated")]
    UnterminatedRune { offset: usize },
    #[error("comment not terminated")]
    UnterminatedComment { offset: usize },
    #[error("invalid character {ch:?}")]
    UnexpectedChar { ch: char, offset: usize },
}

impl TokError {
    /// Byte offset the error points at.
    pub fn offset(&self) -> usize {
        match self {
            TokError::UnterminatedString { offset }
            | TokError::UnterminatedRune { offset }
            | TokError::UnterminatedComment { offset }
            | TokError::UnexpectedChar { offset, .. } => *offset,
        }
    }
}

// ============================================================================
// Lexer
// ============================================================================

/// Tokens that allow a following newline to become a semicolon.
fn is_asi_kind(kind: TokKind) -> bool {
    matches!(
        kind,
        TokKind::Ident
            | TokKind::Int
            | TokKind::Float
            | TokKind::Str
            | TokKind::Rune
            | TokKind::KwReturn
            | TokKind::KwBreak
            | TokKind::KwContinue
            | TokKind::RParen
            | TokKind::RBracket
            | TokKind::RBrace
            | TokKind::Inc
            | TokKind::Dec
    )
}

fn is_ident_start(ch: char) -> bool {
    ch == '_' || ch.is_alphabetic()
}

fn is_ident_continue(ch: char) -> bool {
    ch == '_' || ch.is_alphanumeric()
}

fn keyword_kind(text: &str) -> Option<TokKind> {
    let kind = match text {
        "package" => TokKind::KwPackage,
        "import" => TokKind::KwImport,
        "func" => TokKind::KwFunc,
        "type" => TokKind::KwType,
        "struct" => TokKind::KwStruct,
        "map" => TokKind::KwMap,
        "var" => TokKind::KwVar,
        "const" => TokKind::KwConst,
        "return" => TokKind::KwReturn,
        "if" => TokKind::KwIf,
        "else" => TokKind::KwElse,
        "for" => TokKind::KwFor,
        "range" => TokKind::KwRange,
        "defer" => TokKind::KwDefer,
        "go" => TokKind::KwGo,
        "break" => TokKind::KwBreak,
        "continue" => TokKind::KwContinue,
        "switch" | "case" | "default" | "select" | "chan" | "interface" | "goto"
        | "fallthrough" => TokKind::Unsupported,
        _ => return None,
    };
    Some(kind)
}

/// Tokenize a whole source file.
///
/// The returned stream always ends with an `EndMarker`, whose
/// `whitespace_before` holds the source's trailing trivia.
pub fn tokenize(source: &str) -> Result<Vec<Token<'_>>, TokError> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token()?;
        let done = token.kind == TokKind::EndMarker;
        tokens.push(token);
        if done {
            return Ok(tokens);
        }
    }
}

struct Lexer<'a> {
    source: &'a str,
    pos: usize,
    /// Kind of the last emitted token, for the ASI check.
    last: Option<TokKind>,
}

impl<'a> Lexer<'a> {
    fn new(source: &'a str) -> Self {
        Lexer {
            source,
            pos: 0,
            last: None,
        }
    }

    fn rest(&self) -> &'a str {
        &self.source[self.pos..]
    }

    fn peek_char(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn asi_pending(&self) -> bool {
        self.last.map(is_asi_kind).unwrap_or(false)
    }

    fn emit(&mut self, kind: TokKind, text_start: usize, ws_start: usize) -> Token<'a> {
        let token = Token {
            kind,
            text: &self.source[text_start..self.pos],
            whitespace_before: &self.source[ws_start..text_start],
            start: text_start,
        };
        self.last = Some(kind);
        token
    }

    /// Emit a virtual semicolon at `at`, consuming the trivia before it.
    fn emit_virtual_semi(&mut self, ws_start: usize, at: usize) -> Token<'a> {
        self.last = Some(TokKind::Semi);
        Token {
            kind: TokKind::Semi,
            text: "",
            whitespace_before: &self.source[ws_start..at],
            start: at,
        }
    }

    fn next_token(&mut self) -> Result<Token<'a>, TokError> {
        let ws_start = self.pos;

        // Scan trivia. A newline (or a block comment containing one, or end
        // of input) triggers ASI when the last token allows it; the virtual
        // semicolon takes the trivia scanned so far and the rest becomes the
        // next token's trivia.
        loop {
            let rest = self.rest();
            let Some(ch) = rest.chars().next() else {
                // End of input.
                if self.asi_pending() {
                    return Ok(self.emit_virtual_semi(ws_start, self.pos));
                }
                return Ok(self.emit(TokKind::EndMarker, self.pos, ws_start));
            };
            match ch {
                ' ' | '\t' | '\r' => {
                    self.pos += 1;
                }
                '\n' => {
                    if self.asi_pending() {
                        return Ok(self.emit_virtual_semi(ws_start, self.pos));
                    }
                    self.pos += 1;
                }
                '/' if rest.starts_with("//") => {
                    // Line comment: runs to the newline, which is handled on
                    // the next loop iteration.
                    match memchr(b'\n', rest.as_bytes()) {
                        Some(i) => self.pos += i,
                        None => self.pos = self.source.len(),
                    }
                }
                '/' if rest.starts_with("/*") => {
                    let comment_start = self.pos;
                    let Some(i) = memmem::find(rest[2..].as_bytes(), b"*/") else {
                        return Err(TokError::UnterminatedComment {
                            offset: comment_start,
                        });
                    };
                    let comment_len = 2 + i + 2;
                    // A block comment containing a newline acts as one.
                    if self.asi_pending() && rest[..comment_len].contains('\n') {
                        return Ok(self.emit_virtual_semi(ws_start, comment_start));
                    }
                    self.pos += comment_len;
                }
                _ => break,
            }
        }

        let start = self.pos;
        let ch = match self.peek_char() {
            Some(ch) => ch,
            None => return Ok(self.emit(TokKind::EndMarker, start, ws_start)),
        };

        if is_ident_start(ch) {
            self.scan_while(is_ident_continue);
            let text = &self.source[start..self.pos];
            let kind = keyword_kind(text).unwrap_or(TokKind::Ident);
            return Ok(self.emit(kind, start, ws_start));
        }

        if ch.is_ascii_digit() {
            let kind = self.scan_number();
            return Ok(self.emit(kind, start, ws_start));
        }

        let kind = match ch {
            '"' => self.scan_interpreted_string(start)?,
            '`' => self.scan_raw_string(start)?,
            '\'' => self.scan_rune(start)?,
            '.' => {
                if self.rest()[1..].chars().next().is_some_and(|c| c.is_ascii_digit()) {
                    self.scan_number()
                } else if self.rest().starts_with("...") {
                    self.pos += 3;
                    TokKind::Ellipsis
                } else {
                    self.pos += 1;
                    TokKind::Dot
                }
            }
            _ => self.scan_operator(ch)?,
        };
        Ok(self.emit(kind, start, ws_start))
    }

    fn scan_while(&mut self, pred: impl Fn(char) -> bool) {
        for ch in self.rest().chars() {
            if !pred(ch) {
                break;
            }
            self.pos += ch.len_utf8();
        }
    }

    /// Numeric literal. `self.pos` sits on a digit, or on a dot with a
    /// digit after it.
    fn scan_number(&mut self) -> TokKind {
        let rest = self.rest();
        if rest.starts_with("0x") || rest.starts_with("0X") {
            self.pos += 2;
            self.scan_while(|c| c.is_ascii_hexdigit() || c == '_');
            return TokKind::Int;
        }
        if rest.starts_with("0b") || rest.starts_with("0B") || rest.starts_with("0o")
            || rest.starts_with("0O")
        {
            self.pos += 2;
            self.scan_while(|c| c.is_ascii_digit() || c == '_');
            return TokKind::Int;
        }

        let mut is_float = false;
        self.scan_while(|c| c.is_ascii_digit() || c == '_');
        if self.peek_char() == Some('.') {
            is_float = true;
            self.pos += 1;
            self.scan_while(|c| c.is_ascii_digit() || c == '_');
        }
        if matches!(self.peek_char(), Some('e') | Some('E')) {
            let mark = self.pos;
            self.pos += 1;
            if matches!(self.peek_char(), Some('+') | Some('-')) {
                self.pos += 1;
            }
            if self.peek_char().is_some_and(|c| c.is_ascii_digit()) {
                is_float = true;
                self.scan_while(|c| c.is_ascii_digit() || c == '_');
            } else {
                // Not an exponent after all ("1e" then something else).
                self.pos = mark;
            }
        }
        if is_float {
            TokKind::Float
        } else {
            TokKind::Int
        }
    }

    fn scan_interpreted_string(&mut self, start: usize) -> Result<TokKind, TokError> {
        self.pos += 1;
        let mut escaped = false;
        for ch in self.rest().chars() {
            match ch {
                '\n' => break,
                _ if escaped => {
                    escaped = false;
                    self.pos += ch.len_utf8();
                }
                '\\' => {
                    escaped = true;
                    self.pos += 1;
                }
                '"' => {
                    self.pos += 1;
                    return Ok(TokKind::Str);
                }
                _ => self.pos += ch.len_utf8(),
            }
        }
        Err(TokError::UnterminatedString { offset: start })
    }

    fn scan_raw_string(&mut self, start: usize) -> Result<TokKind, TokError> {
        self.pos += 1;
        match memchr(b'`', self.rest().as_bytes()) {
            Some(i) => {
                self.pos += i + 1;
                Ok(TokKind::Str)
            }
            None => Err(TokError::UnterminatedString { offset: start }),
        }
    }

    fn scan_rune(&mut self, start: usize) -> Result<TokKind, TokError> {
        self.pos += 1;
        let mut escaped = false;
        for ch in self.rest().chars() {
            match ch {
                '\n' => break,
                _ if escaped => {
                    escaped = false;
                    self.pos += ch.len_utf8();
                }
                '\\' => {
                    escaped = true;
                    self.pos += 1;
                }
                '\'' => {
                    self.pos += 1;
                    return Ok(TokKind::Rune);
                }
                _ => self.pos += ch.len_utf8(),
            }
        }
        Err(TokError::UnterminatedRune { offset: start })
    }

    /// Operators and punctuation, longest match first.
    fn scan_operator(&mut self, ch: char) -> Result<TokKind, TokError> {
        let rest = self.rest();
        let table: &[(&str, TokKind)] = &[
            ("&^=", TokKind::AndNotAssign),
            ("<<=", TokKind::ShlAssign),
            (">>=", TokKind::ShrAssign),
            ("&&", TokKind::LogAnd),
            ("||", TokKind::LogOr),
            ("==", TokKind::Eq),
            ("!=", TokKind::Ne),
            ("<=", TokKind::Le),
            (">=", TokKind::Ge),
            ("<<", TokKind::Shl),
            (">>", TokKind::Shr),
            ("&^", TokKind::AndNot),
            ("<-", TokKind::Arrow),
            (":=", TokKind::Define),
            ("++", TokKind::Inc),
            ("--", TokKind::Dec),
            ("+=", TokKind::AddAssign),
            ("-=", TokKind::SubAssign),
            ("*=", TokKind::MulAssign),
            ("/=", TokKind::QuoAssign),
            ("%=", TokKind::RemAssign),
            ("&=", TokKind::AndAssign),
            ("|=", TokKind::OrAssign),
            ("^=", TokKind::XorAssign),
            ("(", TokKind::LParen),
            (")", TokKind::RParen),
            ("[", TokKind::LBracket),
            ("]", TokKind::RBracket),
            ("{", TokKind::LBrace),
            ("}", TokKind::RBrace),
            (",", TokKind::Comma),
            (";", TokKind::Semi),
            (":", TokKind::Colon),
            ("=", TokKind::Assign),
            ("!", TokKind::Not),
            ("+", TokKind::Add),
            ("-", TokKind::Sub),
            ("*", TokKind::Star),
            ("/", TokKind::Slash),
            ("%", TokKind::Percent),
            ("&", TokKind::Amp),
            ("|", TokKind::Pipe),
            ("^", TokKind::Caret),
            ("<", TokKind::Lt),
            (">", TokKind::Gt),
        ];
        for (text, kind) in table {
            if rest.starts_with(text) {
                self.pos += text.len();
                return Ok(*kind);
            }
        }
        Err(TokError::UnexpectedChar {
            ch,
            offset: self.pos,
        })
    }
}
