//!
//! # Liberty Reading Module
//!
//! Facilities for reading Liberty-format content from file or string,
//! into [LibGroup] trees. Includes the core Lexer and Parser classes.
//!
//! The parser is purely syntactic: it recognizes the three statement forms
//!
//! * `name : value ;` (simple attributes)
//! * `name ( values ) ;` (complex attributes, and `define`s)
//! * `name ( args ) { statements }` (groups)
//!
//! and performs no checks of which statements are legal in which groups.
//!

// Standard Lib Imports
use std::io::Read;
use std::path::Path;
use std::str::Chars;

// Crates.io Imports
use log::debug;
use serde::{Deserialize, Serialize};

// Local imports
use crate::data::*;
use crate::{LibertyError, LibertyResult, ProjectOptions};

/// Parse Liberty content from file `fname`
pub fn parse_file(fname: impl AsRef<Path>) -> LibertyResult<Vec<LibGroup>> {
    parse_file_with(fname, &ProjectOptions::default())
}
/// Parse Liberty content from file `fname`, with nesting limited per `opts`
pub fn parse_file_with(
    fname: impl AsRef<Path>,
    opts: &ProjectOptions,
) -> LibertyResult<Vec<LibGroup>> {
    let mut file = std::fs::File::open(fname)?;
    let mut src = String::new();
    file.read_to_string(&mut src)?;
    parse_str_with(&src, opts)
}
/// Parse Liberty content `src` from string
pub fn parse_str(src: &str) -> LibertyResult<Vec<LibGroup>> {
    parse_str_with(src, &ProjectOptions::default())
}
/// Parse Liberty content `src` from string, with nesting limited per `opts`
pub fn parse_str_with(src: &str, opts: &ProjectOptions) -> LibertyResult<Vec<LibGroup>> {
    let mut parser = LibertyParser::new(src)?;
    parser.max_depth = opts.max_depth;
    let libs = parser.parse_libs()?;
    debug!("Parsed {} top-level group(s)", libs.len());
    Ok(libs)
}

/// # Liberty Lexer / Tokenizer
///
/// Breaks input string `self.src` into an iteration of [Token]s,
/// consisting of source-locations and type-annotations.
///
/// Operates in an iterator-style mode, producing a [Token] with
/// each call to `next_token`. Positions are byte-offsets into `src`.
///
pub struct LibertyLexer<'src> {
    /// Source string
    src: &'src str,
    /// Source-string character iterator
    chars: Chars<'src>,
    /// Peekable next character
    next_char: Option<char>,
    /// Peekable next Token
    next_tok: Option<Token>,
    /// Start position of the active token
    start: usize,
    /// Active position
    pos: usize,
    /// Active line number
    line: usize,
    /// Position at the beginning of the current line
    linestart: usize,
    /// Boolean indication of beginning-of-line,
    /// i.e. whether any semantic content has been encountered on the current (logical) line.
    /// Backslash-continued lines do not reset it.
    at_bol: bool,
}
impl<'src> LibertyLexer<'src> {
    pub(crate) fn new(src: &'src str) -> LibertyResult<Self> {
        // Create our character-iterator
        let mut chars = src.chars();
        // Read the first character into our `next` field
        let next_char = chars.next();
        // Create the Lexer
        let mut lex = Self {
            src,
            chars,
            next_char,
            next_tok: None,
            start: 0,
            pos: 0,
            line: 1,
            linestart: 0,
            at_bol: true,
        };
        // Read the first token into our `next_tok` field
        lex.next_tok = lex._next_token()?;
        Ok(lex)
    }
    /// Get and return our next character, updating our position along the way
    fn next_char(&mut self) -> Option<char> {
        let c = self.next_char?;
        self.pos += c.len_utf8();
        self.next_char = self.chars.next();
        Some(c)
    }
    /// Peek at our next character, without advancing.
    /// Returns `None` if no characters remain.
    fn peek_char(&self) -> &Option<char> {
        &self.next_char
    }
    /// The remaining source, starting at our peeked character
    fn rest(&self) -> &'src str {
        &self.src[self.pos..]
    }
    /// Get an immutable reference to our next [Token], without advancing
    #[inline(always)]
    fn peek_token(&self) -> &Option<Token> {
        &self.next_tok
    }
    /// Get and return our next token, updating internal state along the way
    fn next_token(&mut self) -> LibertyResult<Option<Token>> {
        if self.next_tok.is_none() {
            return Ok(None);
        }
        let mut tok = self._next_token()?;
        std::mem::swap(&mut tok, &mut self.next_tok);
        Ok(tok)
    }
    /// Internal implementation of `next_token`.
    /// Pull our next [Token], removing ignored items such as commentary and whitespace.
    ///
    /// While the primary API method is `next_token`, this underscore-version
    /// is also called during startup to evade its usual end-of-stream check.
    fn _next_token(&mut self) -> LibertyResult<Option<Token>> {
        use TokenType::{Comment, Continuation, NewLine, WhiteSpace};
        loop {
            match self.lex_one()? {
                None => return Ok(None),
                Some(t) => match t.ttype {
                    WhiteSpace | Comment | NewLine | Continuation => continue,
                    _ => {
                        // Content. Mark whether it starts its line.
                        let tok = Token {
                            bol: self.at_bol,
                            ..t
                        };
                        self.at_bol = false;
                        return Ok(Some(tok));
                    }
                },
            }
        }
    }
    /// Emit a [Token] of [TokenType] `ttype`
    /// Uses the current Lexer location as its span, and updates the Lexer start-position upon creation.
    fn emit(&mut self, ttype: TokenType) -> Token {
        let loc = SourceLocation {
            start: self.start,
            stop: self.pos,
            line: self.line,
        };
        let tok = Token {
            loc,
            ttype,
            bol: false,
        };
        self.start = self.pos;
        tok
    }
    /// Accept a character if it meets predicate-function `f`
    fn accept(&mut self, f: impl Fn(char) -> bool) -> bool {
        match self.peek_char() {
            Some(ref ch) if f(*ch) => {
                self.next_char();
                true
            }
            _ => false,
        }
    }
    /// Accept a single-character match
    fn accept_char(&mut self, c: char) -> bool {
        self.accept(|a| a == c)
    }
    /// Note a newline has been consumed
    fn newline(&mut self) {
        self.line += 1;
        self.linestart = self.pos;
    }
    /// Lex the next [Token]
    fn lex_one(&mut self) -> LibertyResult<Option<Token>> {
        if self.peek_char().is_none() {
            return Ok(None); // All done! End of input. Return `None`.
        }
        if self.accept_char('\n') {
            return self.lex_newline();
        }
        if self.accept(char::is_whitespace) {
            return self.lex_whitespace();
        }
        if self.rest().starts_with("/*") {
            return self.lex_block_comment();
        }
        if self.rest().starts_with("//") {
            return self.lex_line_comment();
        }
        if self.accept_char('\\') {
            if self.at_continuation() {
                return self.lex_continuation();
            }
            return self.lex_word();
        }
        if self.accept_char('"') {
            return self.lex_string_literal();
        }
        for (c, ttype) in PUNCTUATION {
            if self.accept_char(c) {
                return Ok(Some(self.emit(ttype)));
            }
        }
        if self.accept(is_word_char) {
            return self.lex_word();
        }
        self.fail() // Some other, invalid character. Fail.
    }
    /// Lex newlines, incrementing our line-number
    fn lex_newline(&mut self) -> LibertyResult<Option<Token>> {
        let tok = self.emit(TokenType::NewLine);
        self.newline();
        self.at_bol = true;
        Ok(Some(tok))
    }
    /// Lex whitespace
    fn lex_whitespace(&mut self) -> LibertyResult<Option<Token>> {
        while self.accept(|c| c.is_whitespace() && c != '\n') {
            continue;
        }
        Ok(Some(self.emit(TokenType::WhiteSpace)))
    }
    /// Boolean indication of whether the remainder of the line is blank,
    /// i.e. whether a just-accepted backslash continues the line.
    fn at_continuation(&self) -> bool {
        self.rest()
            .trim_start_matches(|c| c == ' ' || c == '\t' || c == '\r')
            .starts_with('\n')
    }
    /// Lex a backslash-newline line continuation.
    /// Continues the logical line, and hence does not set `at_bol`.
    fn lex_continuation(&mut self) -> LibertyResult<Option<Token>> {
        while self.accept(|c| c != '\n') {
            continue;
        }
        self.next_char(); // The newline
        self.newline();
        Ok(Some(self.emit(TokenType::Continuation)))
    }
    /// Lex a `/* block comment */`, which may span lines
    fn lex_block_comment(&mut self) -> LibertyResult<Option<Token>> {
        // Bump over the opening `/*`
        self.next_char();
        self.next_char();
        loop {
            match self.next_char() {
                None => return self.fail(), // Unterminated
                Some('*') if self.accept_char('/') => break,
                Some('\n') => {
                    self.newline();
                    self.at_bol = true;
                }
                Some(_) => continue,
            }
        }
        Ok(Some(self.emit(TokenType::Comment)))
    }
    /// Lex a `// line comment`, up to (but excluding) the newline
    fn lex_line_comment(&mut self) -> LibertyResult<Option<Token>> {
        while self.accept(|c| c != '\n') {
            continue;
        }
        Ok(Some(self.emit(TokenType::Comment)))
    }
    /// Lex a string literal.
    /// Backslash-escaped characters, including newlines, are included verbatim.
    fn lex_string_literal(&mut self) -> LibertyResult<Option<Token>> {
        // First double-quote has been read.
        loop {
            match self.next_char() {
                None => return self.fail(), // Unterminated
                Some('"') => break,
                Some('\\') => {
                    if let Some('\n') = self.next_char() {
                        self.newline();
                    }
                }
                Some('\n') => self.newline(),
                Some(_) => continue,
            }
        }
        Ok(Some(self.emit(TokenType::StringLiteral)))
    }
    /// Lex a bare word: a name, number, or expression-fragment.
    /// Colons are accepted inside square brackets, as in bus-ranges like `A[0:3]`.
    fn lex_word(&mut self) -> LibertyResult<Option<Token>> {
        let mut brackets = 0usize;
        loop {
            match *self.peek_char() {
                Some('[') => brackets += 1,
                Some(']') => brackets = brackets.saturating_sub(1),
                Some(':') if brackets > 0 => (),
                Some(c) if is_word_char(c) => (),
                _ => break,
            }
            self.next_char();
        }
        Ok(Some(self.emit(TokenType::Word)))
    }
    /// Error-Generation Helper
    /// Collect our current position and content into a [LibertyError::Lex]
    fn fail<T>(&self) -> LibertyResult<T> {
        Err(LibertyError::Lex {
            next_char: *self.peek_char(),
            line: self.line,
            pos: self.pos,
        })
    }
}
/// Iterator protocol for [LibertyLexer]
/// Not used during parsing, but often handy for testing.
/// Ends at the first lexer error.
impl<'s> Iterator for LibertyLexer<'s> {
    type Item = Token;
    fn next(&mut self) -> Option<Self::Item> {
        self.next_token().ok().flatten()
    }
}
/// Single-character punctuation tokens
const PUNCTUATION: [(char, TokenType); 7] = [
    ('(', TokenType::LParen),
    (')', TokenType::RParen),
    ('{', TokenType::LBrace),
    ('}', TokenType::RBrace),
    (':', TokenType::Colon),
    (';', TokenType::SemiColon),
    (',', TokenType::Comma),
];
/// Boolean indication of whether `c` can continue a bare word
fn is_word_char(c: char) -> bool {
    !c.is_whitespace() && !c.is_control() && !"(){}:;,\"".contains(c)
}

/// Location of a [Token] in the source string
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    /// Start byte index (inclusive)
    start: usize,
    /// End byte index (exclusive)
    stop: usize,
    /// Line number
    line: usize,
}
/// Lexer Token
/// Provides indices into the source-string for the start and end of the source text,
/// as well as the line number and type-tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Source Location
    loc: SourceLocation,
    /// Token Type
    ttype: TokenType,
    /// Whether this is the first content token on its logical line
    bol: bool,
}
impl Token {
    /// Return a sub-string of input-string `src` over our locations
    pub(crate) fn substr<'src>(&self, src: &'src str) -> &'src str {
        &src[self.loc.start..self.loc.stop]
    }
}
/// Token Types Enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenType {
    Word,
    StringLiteral,
    LParen,
    RParen,
    LBrace,
    RBrace,
    Colon,
    SemiColon,
    Comma,
    NewLine,
    WhiteSpace,
    Comment,
    Continuation,
}
/// Enumerated parsing contexts, largely for capturing errors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LibertyParseContext {
    /// Group, by type-name
    Group(String),
    /// Simple attribute, by name
    Attr(String),
    /// Parenthesized argument-list of a group or complex attribute, by name
    Args(String),
}
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LibertyParseErrorType {
    /// Invalid Token
    InvalidToken { expected: TokenType },
    /// Input ended inside a group or argument-list
    UnexpectedEof,
    /// Syntactically valid, but not allowed here. E.g. a top-level attribute.
    InvalidStatement,
    /// Groups nested deeper than the configured limit
    TooDeep { max_depth: usize },
}

/// Liberty Parser
/// Transforms input string of lifetime 'src into a set of [LibGroup]s
pub struct LibertyParser<'src> {
    /// Source string
    src: &'src str,
    /// Lexer
    lex: LibertyLexer<'src>,
    /// Context Stack
    ctx: Vec<LibertyParseContext>,
    /// Current group-nesting depth
    depth: usize,
    /// Maximum group-nesting depth
    max_depth: usize,
}
impl<'src> LibertyParser<'src> {
    /// Construct a [LibertyParser] of input-text `src`
    pub(crate) fn new(src: &'src str) -> LibertyResult<Self> {
        let lex = LibertyLexer::new(src)?;
        Ok(Self {
            src,
            lex,
            ctx: Vec::new(),
            depth: 0,
            max_depth: ProjectOptions::default().max_depth,
        })
    }
    /// Advance by a [Token] without returning it.
    /// Usually called after matching on "peeked" results.
    #[inline(always)]
    fn advance(&mut self) -> LibertyResult<()> {
        let _ = self.lex.next_token()?;
        Ok(())
    }
    #[inline(always)]
    fn peek_token(&self) -> &Option<Token> {
        self.lex.peek_token()
    }
    /// Get the [TokenType] of our next token, if there is one
    #[inline(always)]
    fn peek_type(&self) -> Option<TokenType> {
        self.peek_token().map(|t| t.ttype)
    }
    /// Boolean indication of whether our next Token is of [TokenType] `ttype`.
    fn matches(&self, ttype: TokenType) -> bool {
        self.peek_type() == Some(ttype)
    }
    /// Advance past the next token if it is of [TokenType] `ttype`.
    /// Returns whether it was.
    fn eat(&mut self, ttype: TokenType) -> LibertyResult<bool> {
        if self.matches(ttype) {
            self.advance()?;
            return Ok(true);
        }
        Ok(false)
    }
    /// Assert the next [Token] is of [TokenType] `ttype`, and return its string value.
    fn expect_and_get_str(&mut self, ttype: TokenType) -> LibertyResult<&'src str> {
        match self.lex.next_token()? {
            Some(t) if t.ttype == ttype => Ok(self.txt(&t)),
            Some(_) | None => self.fail(LibertyParseErrorType::InvalidToken { expected: ttype }),
        }
    }
    /// Retrieve the text-content of lexer [Token] `tok`
    #[inline(always)]
    fn txt(&self, tok: &Token) -> &'src str {
        tok.substr(self.src)
    }
    /// Parse all top-level groups, generally `library`s
    fn parse_libs(&mut self) -> LibertyResult<Vec<LibGroup>> {
        let mut libs = Vec::new();
        loop {
            match self.peek_type() {
                None => break,
                Some(TokenType::SemiColon) => self.advance()?,
                Some(TokenType::Word) => match self.parse_statement()? {
                    LibStatement::Group(g) => libs.push(g),
                    other => {
                        let msg = format!("Top-level {} `{}` is not a group", other.kind(), other.name());
                        return self.fail_msg(LibertyParseErrorType::InvalidStatement, msg);
                    }
                },
                Some(_) => {
                    return self.fail(LibertyParseErrorType::InvalidToken {
                        expected: TokenType::Word,
                    })
                }
            }
        }
        Ok(libs)
    }
    /// Parse a statement: a group, simple or complex attribute, or define
    fn parse_statement(&mut self) -> LibertyResult<LibStatement> {
        let name = self.expect_and_get_str(TokenType::Word)?.to_string();
        match self.peek_type() {
            Some(TokenType::Colon) => {
                self.ctx.push(LibertyParseContext::Attr(name.clone()));
                self.advance()?; // Eat the colon
                let value = self.parse_simple_value()?;
                self.eat(TokenType::SemiColon)?;
                self.ctx.pop();
                Ok(LibAttr { name, value }.into())
            }
            Some(TokenType::LParen) => {
                self.ctx.push(LibertyParseContext::Args(name.clone()));
                self.advance()?; // Eat the open-paren
                let args = self.parse_args()?;
                self.ctx.pop();
                if self.eat(TokenType::LBrace)? {
                    return Ok(self.parse_group(name, args)?.into());
                }
                self.eat(TokenType::SemiColon)?;
                if name == "define" {
                    return Ok(LibDefine { name, values: args }.into());
                }
                Ok(LibComplexAttr { name, values: args }.into())
            }
            _ => {
                let msg = format!("Expected `:` or `(` after `{}`", name);
                self.fail_msg(
                    LibertyParseErrorType::InvalidToken {
                        expected: TokenType::Colon,
                    },
                    msg,
                )
            }
        }
    }
    /// Parse a group body, through its closing brace.
    /// The group's name, arguments, and opening brace have been consumed.
    fn parse_group(&mut self, kind: String, args: Vec<LibExpr>) -> LibertyResult<LibGroup> {
        self.ctx.push(LibertyParseContext::Group(kind.clone()));
        self.depth += 1;
        if self.depth > self.max_depth {
            let max_depth = self.max_depth;
            return self.fail(LibertyParseErrorType::TooDeep { max_depth });
        }
        let mut statements = Vec::new();
        loop {
            match self.peek_type() {
                Some(TokenType::RBrace) => {
                    self.advance()?;
                    break;
                }
                Some(TokenType::SemiColon) => self.advance()?, // Stray semicolons, e.g. after closing braces
                Some(TokenType::Word) => statements.push(self.parse_statement()?),
                Some(_) => {
                    return self.fail(LibertyParseErrorType::InvalidToken {
                        expected: TokenType::RBrace,
                    })
                }
                None => return self.fail(LibertyParseErrorType::UnexpectedEof),
            }
        }
        self.depth -= 1;
        self.ctx.pop();
        LibGroupBuilder::default()
            .kind(kind)
            .args(args)
            .statements(statements)
            .finish()
    }
    /// Parse the value of a simple attribute.
    /// Runs through the end of its logical line, a semicolon, or a closing brace.
    /// Returns `None` if no value is present.
    fn parse_simple_value(&mut self) -> LibertyResult<Option<LibExpr>> {
        let mut toks = Vec::new();
        while let Some(tok) = *self.peek_token() {
            match tok.ttype {
                TokenType::SemiColon | TokenType::RBrace => break,
                _ if tok.bol => break, // Next statement, sans semicolon
                TokenType::LBrace => {
                    return self.fail(LibertyParseErrorType::InvalidToken {
                        expected: TokenType::SemiColon,
                    })
                }
                _ => {
                    toks.push(tok);
                    self.advance()?;
                }
            }
        }
        Ok(self.expr(&toks))
    }
    /// Parse a comma-separated argument list, through its closing paren.
    /// The opening paren has been consumed. Empty arguments are skipped.
    fn parse_args(&mut self) -> LibertyResult<Vec<LibExpr>> {
        let mut args = Vec::new();
        let mut toks = Vec::new();
        let mut parens = 0usize;
        loop {
            let tok = match *self.peek_token() {
                Some(t) => t,
                None => return self.fail(LibertyParseErrorType::UnexpectedEof),
            };
            match tok.ttype {
                TokenType::LBrace | TokenType::RBrace | TokenType::SemiColon => {
                    return self.fail(LibertyParseErrorType::InvalidToken {
                        expected: TokenType::RParen,
                    })
                }
                TokenType::Comma if parens == 0 => {
                    args.extend(self.expr(&toks));
                    toks.clear();
                }
                TokenType::RParen if parens == 0 => {
                    args.extend(self.expr(&toks));
                    self.advance()?;
                    break;
                }
                TokenType::LParen => {
                    parens += 1;
                    toks.push(tok);
                }
                TokenType::RParen => {
                    parens -= 1;
                    toks.push(tok);
                }
                _ => toks.push(tok),
            }
            self.advance()?;
        }
        Ok(args)
    }
    /// Create a [LibExpr] from the token-sequence `toks`.
    /// Single tokens are typed; multi-token expressions are generic, imaged by their source-span.
    fn expr(&self, toks: &[Token]) -> Option<LibExpr> {
        let (first, last) = (toks.first()?, toks.last()?);
        if toks.len() > 1 {
            let image = &self.src[first.loc.start..last.loc.stop];
            return Some(LibExpr::generic(image));
        }
        let txt = self.txt(first);
        let expr = match first.ttype {
            TokenType::StringLiteral => LibExpr {
                image: Some(txt.to_string()),
                value: LibExprValue::Str(unquote(txt)),
            },
            _ => word_expr(txt),
        };
        Some(expr)
    }
    /// Error-Generation Helper
    fn fail<T>(&self, tp: LibertyParseErrorType) -> LibertyResult<T> {
        Err(LibertyError::Parse {
            tp,
            msg: None,
            state: self.state(),
        })
    }
    /// Error-Generation Helper, with message
    fn fail_msg<T>(&self, tp: LibertyParseErrorType, msg: impl Into<String>) -> LibertyResult<T> {
        Err(LibertyError::Parse {
            tp,
            msg: Some(msg.into()),
            state: self.state(),
        })
    }
    /// Extract the state of the parser. Generally for error reporting.
    fn state(&self) -> ParserState {
        // Create a string repr of the current token
        let token = match self.lex.next_tok {
            Some(t) => self.txt(&t),
            None => "EOF",
        }
        .to_string();
        // Sort out the content on our current line
        const MAX_CHARS_IN_LINE: usize = 200;
        let line_content = self.src[self.lex.linestart..]
            .lines()
            .next()
            .unwrap_or_default()
            .chars()
            .take(MAX_CHARS_IN_LINE)
            .collect();
        ParserState {
            ctx: self.ctx.clone(),
            line_content,
            line_num: self.lex.line,
            token,
            pos: self.lex.pos,
        }
    }
}
/// State of the parser, generally exposed when providing error info.
#[allow(dead_code)]
#[derive(Debug)]
pub struct ParserState {
    ctx: Vec<LibertyParseContext>,
    token: String,
    line_content: String,
    line_num: usize,
    pos: usize,
}

/// Create a [LibExpr] from bare word `txt`.
/// Integers and reals are typed; all else is generic.
fn word_expr(txt: &str) -> LibExpr {
    let value = match txt.parse::<i64>() {
        Ok(i) => LibExprValue::Int(i),
        Err(_) => match txt.parse::<f64>() {
            Ok(f) if looks_numeric(txt) => LibExprValue::Real(f),
            _ => LibExprValue::Generic,
        },
    };
    LibExpr {
        image: Some(txt.to_string()),
        value,
    }
}
/// Boolean indication of whether `txt` reads as a number, rather than e.g. `inf` or `NaN`
fn looks_numeric(txt: &str) -> bool {
    txt.starts_with(|c: char| c.is_ascii_digit() || c == '-' || c == '+' || c == '.')
        && txt.chars().any(|c| c.is_ascii_digit())
}
/// Strip the surrounding quotes from string-literal `txt`, and resolve its escapes.
/// Backslash-newline continuations are removed; `\"` and `\\` produce their second character.
/// Other escapes are retained as-is.
fn unquote(txt: &str) -> String {
    let inner = txt
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(txt);
    let mut rv = String::with_capacity(inner.len());
    let mut chars = inner.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            rv.push(c);
            continue;
        }
        match chars.peek() {
            Some('"') | Some('\\') => rv.extend(chars.next()),
            Some('\r') | Some('\n') => {
                chars.next_if_eq(&'\r');
                chars.next_if_eq(&'\n');
            }
            _ => rv.push(c),
        }
    }
    rv
}
