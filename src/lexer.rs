//! Context-sensitive tokenizer
//!
//! One token of source is turned into a [`Token`] per call to
//! [`Lexer::next_token`]. The lexer keeps a stack of [`TokContext`]
//! values and an `expr_allowed` flag so that `/` can be classified as
//! division or the start of a regular expression, and `` ` ``/`}` as
//! template delimiters, without any feedback from the parser.
//!
//! The lexer can be checkpointed and rewound; the parser uses this to
//! probe ambiguous prefixes such as `async (` before committing to an
//! interpretation.

use unicode_xid::UnicodeXID;

use crate::context::TokContext;
use crate::error::SyntaxError;
use crate::options::EcmaVersion;
use crate::position::{LineMap, Position, SourceLocation};
use crate::token::{keyword_token, Comment, Token, TokenType, TokenValue};

pub fn is_id_start(c: char) -> bool {
    c == '$' || c == '_' || UnicodeXID::is_xid_start(c)
}

pub fn is_id_continue(c: char) -> bool {
    c == '$' || c == '\u{200C}' || c == '\u{200D}' || UnicodeXID::is_xid_continue(c)
}

fn is_newline(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

/// Rewind point capturing everything `next_token` mutates.
#[derive(Debug, Clone)]
pub struct LexerCheckpoint {
    pos: usize,
    tok_start: usize,
    expr_allowed: bool,
    newline_before: bool,
    last_type: TokenType,
    context: Vec<TokContext>,
    comments_len: usize,
}

pub struct Lexer<'a> {
    source: &'a str,
    pos: usize,
    ecma: EcmaVersion,
    module: bool,
    strict: bool,
    /// Never empty; index 0 is the top-level statement context.
    context: Vec<TokContext>,
    expr_allowed: bool,
    newline_before: bool,
    tok_start: usize,
    last_type: TokenType,
    line_map: LineMap,
    locations: bool,
    source_file: Option<String>,
    collect_comments: bool,
    comments: Vec<Comment>,
}

impl<'a> Lexer<'a> {
    pub fn new(
        source: &'a str,
        ecma: EcmaVersion,
        module: bool,
        locations: bool,
        source_file: Option<String>,
    ) -> Self {
        Lexer {
            source,
            pos: 0,
            ecma,
            module,
            strict: module,
            context: vec![TokContext::BStat],
            expr_allowed: true,
            newline_before: false,
            tok_start: 0,
            last_type: TokenType::Eof,
            line_map: LineMap::new(),
            locations,
            source_file,
            collect_comments: false,
            comments: Vec::new(),
        }
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    pub fn slice(&self, start: usize, end: usize) -> &'a str {
        self.source.get(start..end).unwrap_or_default()
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Whether a line terminator was seen before the last token.
    pub fn newline_before(&self) -> bool {
        self.newline_before
    }

    pub fn ecma_version(&self) -> EcmaVersion {
        self.ecma
    }

    pub fn strict(&self) -> bool {
        self.strict
    }

    pub fn set_strict(&mut self, strict: bool) {
        self.strict = strict;
    }

    pub fn set_collect_comments(&mut self, on: bool) {
        self.collect_comments = on;
    }

    pub fn take_comments(&mut self) -> Vec<Comment> {
        std::mem::take(&mut self.comments)
    }

    /// Start lexing at an arbitrary offset (`parse_expression_at`).
    pub(crate) fn seek(&mut self, offset: usize) {
        self.pos = offset;
        self.tok_start = offset;
    }

    /// Skip a `#!` line at the very start of the input.
    pub fn skip_hash_bang(&mut self) {
        if self.pos == 0 && self.source.starts_with("#!") {
            while let Some(c) = self.peek_char() {
                if is_newline(c) {
                    break;
                }
                self.pos += c.len_utf8();
            }
        }
    }

    pub fn position_at(&mut self, offset: usize) -> Position {
        self.line_map.position_at(self.source, offset)
    }

    pub fn checkpoint(&self) -> LexerCheckpoint {
        LexerCheckpoint {
            pos: self.pos,
            tok_start: self.tok_start,
            expr_allowed: self.expr_allowed,
            newline_before: self.newline_before,
            last_type: self.last_type,
            context: self.context.clone(),
            comments_len: self.comments.len(),
        }
    }

    pub fn restore(&mut self, cp: LexerCheckpoint) {
        self.pos = cp.pos;
        self.tok_start = cp.tok_start;
        self.expr_allowed = cp.expr_allowed;
        self.newline_before = cp.newline_before;
        self.last_type = cp.last_type;
        self.context = cp.context;
        self.comments.truncate(cp.comments_len);
    }

    // ============ CHARACTER ACCESS ============

    fn peek_char(&self) -> Option<char> {
        self.char_at(self.pos)
    }

    fn char_at(&self, pos: usize) -> Option<char> {
        self.source.get(pos..)?.chars().next()
    }

    fn starts_with_at(&self, pos: usize, pat: &str) -> bool {
        self.source
            .get(pos..)
            .is_some_and(|rest| rest.starts_with(pat))
    }

    fn raise<T>(&mut self, pos: usize, message: impl Into<String>) -> Result<T, SyntaxError> {
        let loc = self.line_map.position_at(self.source, pos);
        Err(SyntaxError::with_loc(message, pos, loc))
    }

    // ============ TOKEN LOOP ============

    pub fn next_token(&mut self) -> Result<Token, SyntaxError> {
        if self
            .context
            .last()
            .copied()
            .unwrap_or(TokContext::BStat)
            .preserve_space()
        {
            // Inside a template literal whitespace belongs to the quasi.
            self.newline_before = false;
            self.tok_start = self.pos;
            return self.read_template_token();
        }
        self.skip_space()?;
        self.tok_start = self.pos;
        let Some(c) = self.peek_char() else {
            return Ok(self.finish(TokenType::Eof, TokenValue::None));
        };
        self.read_token(c)
    }

    fn read_token(&mut self, c: char) -> Result<Token, SyntaxError> {
        match c {
            '0'..='9' => self.read_number(false),
            '"' | '\'' => self.read_string(c),
            '`' => {
                if self.ecma < EcmaVersion::Es2015 {
                    return self.raise(self.pos, "Unexpected character '`'");
                }
                self.pos += 1;
                Ok(self.finish(TokenType::BackQuote, TokenValue::None))
            }
            '#' => self.read_private_name(),
            c if c == '\\' || is_id_start(c) => self.read_word(),
            _ => self.read_punct(c),
        }
    }

    /// Builds the token, records its position, and applies the context
    /// transition keyed on the new and previous token types.
    fn finish(&mut self, token_type: TokenType, value: TokenValue) -> Token {
        let prev = self.last_type;
        self.last_type = token_type;
        self.update_context(token_type, prev, &value);
        let loc = if self.locations {
            let start = self.line_map.position_at(self.source, self.tok_start);
            let end = self.line_map.position_at(self.source, self.pos);
            Some(SourceLocation {
                source: self.source_file.clone(),
                start,
                end,
            })
        } else {
            None
        };
        Token {
            token_type,
            value,
            start: self.tok_start,
            end: self.pos,
            loc,
        }
    }

    // ============ CONTEXT TRANSITIONS ============

    fn cur_context(&self) -> TokContext {
        self.context.last().copied().unwrap_or(TokContext::BStat)
    }

    fn in_generator_context(&self) -> bool {
        for ctx in self.context.iter().skip(1).rev() {
            if ctx.is_function() {
                return ctx.is_generator();
            }
        }
        false
    }

    /// Whether a `{` after `prev` opens a block rather than an object
    /// literal.
    fn brace_is_block(&self, prev: TokenType) -> bool {
        use TokenType::*;
        let parent = self.cur_context();
        if matches!(parent, TokContext::FExpr | TokContext::FStat) {
            return true;
        }
        if prev == Colon && matches!(parent, TokContext::BStat | TokContext::BExpr) {
            return parent == TokContext::BStat;
        }
        if prev == Return || (prev == Name && self.expr_allowed) {
            return self.newline_before;
        }
        if matches!(prev, Else | Semi | Eof | ParenR | Arrow) {
            return true;
        }
        if prev == BraceL {
            return parent == TokContext::BStat;
        }
        if matches!(prev, Var | Const | Name) {
            return false;
        }
        !self.expr_allowed
    }

    fn update_context(&mut self, token_type: TokenType, prev: TokenType, value: &TokenValue) {
        use TokenType::*;
        match token_type {
            ParenR | BraceR => {
                if self.context.len() == 1 {
                    self.expr_allowed = true;
                    return;
                }
                let mut out = self.context.pop().unwrap_or(TokContext::BStat);
                if out == TokContext::BStat && self.cur_context().is_function() {
                    out = self.context.pop().unwrap_or(TokContext::BStat);
                }
                self.expr_allowed = !out.is_expr();
            }
            BraceL => {
                self.context.push(if self.brace_is_block(prev) {
                    TokContext::BStat
                } else {
                    TokContext::BExpr
                });
                self.expr_allowed = true;
            }
            DollarBraceL => {
                self.context.push(TokContext::BTmpl);
                self.expr_allowed = true;
            }
            ParenL => {
                let statement_head = matches!(prev, If | For | With | While);
                self.context.push(if statement_head {
                    TokContext::PStat
                } else {
                    TokContext::PExpr
                });
                self.expr_allowed = true;
            }
            IncDec => {} // tokenizer state unchanged
            Function | Class => {
                let expr_position = prev.before_expr()
                    && !matches!(prev, Semi | Else)
                    && !(prev == Return && self.newline_before)
                    && !(matches!(prev, Colon | BraceL) && self.cur_context() == TokContext::BStat);
                self.context.push(if expr_position {
                    TokContext::FExpr
                } else {
                    TokContext::FStat
                });
                self.expr_allowed = false;
            }
            BackQuote => {
                if self.cur_context() == TokContext::QTmpl {
                    self.context.pop();
                } else {
                    self.context.push(TokContext::QTmpl);
                }
                self.expr_allowed = false;
            }
            Star if prev == Function => {
                let top = self.context.len().saturating_sub(1);
                if let Some(ctx) = self.context.get_mut(top) {
                    *ctx = if *ctx == TokContext::FExpr {
                        TokContext::FExprGen
                    } else {
                        TokContext::FGen
                    };
                }
                self.expr_allowed = true;
            }
            Name => {
                let mut allowed = false;
                if self.ecma >= EcmaVersion::Es2015 && prev != Dot {
                    if let TokenValue::Name(word) = value {
                        if (word == "of" && !self.expr_allowed)
                            || (word == "yield" && self.in_generator_context())
                        {
                            allowed = true;
                        }
                    }
                }
                self.expr_allowed = allowed;
            }
            _ => self.expr_allowed = token_type.before_expr(),
        }
    }

    // ============ WHITESPACE & COMMENTS ============

    fn skip_space(&mut self) -> Result<(), SyntaxError> {
        let prev_end = self.pos;
        self.newline_before = false;
        loop {
            match self.peek_char() {
                Some(' ' | '\t' | '\u{000B}' | '\u{000C}' | '\u{00A0}' | '\u{FEFF}') => {
                    self.pos += 1;
                }
                Some('\r') => {
                    self.pos += 1;
                    if self.peek_char() == Some('\n') {
                        self.pos += 1;
                    }
                    self.newline_before = true;
                }
                Some('\n' | '\u{2028}' | '\u{2029}') => {
                    self.pos += 1;
                    self.newline_before = true;
                }
                Some('/') => match self.char_at(self.pos + 1) {
                    Some('/') => self.skip_line_comment(2),
                    Some('*') => self.skip_block_comment()?,
                    _ => break,
                },
                // HTML-style comments, scripts only.
                Some('<') if !self.module && self.starts_with_at(self.pos, "<!--") => {
                    self.skip_line_comment(4);
                }
                Some('-')
                    if !self.module
                        && (self.newline_before || prev_end == 0)
                        && self.starts_with_at(self.pos, "-->") =>
                {
                    self.skip_line_comment(3);
                }
                Some(c) if c.is_whitespace() && !is_newline(c) => {
                    self.pos += c.len_utf8();
                }
                _ => break,
            }
        }
        Ok(())
    }

    fn skip_line_comment(&mut self, offset: usize) {
        let start = self.pos;
        self.pos += offset;
        while let Some(c) = self.peek_char() {
            if is_newline(c) {
                break;
            }
            self.pos += c.len_utf8();
        }
        if self.collect_comments {
            self.record_comment(false, start, start + offset, self.pos);
        }
    }

    fn skip_block_comment(&mut self) -> Result<(), SyntaxError> {
        let start = self.pos;
        self.pos += 2;
        let Some(rel) = self.source.get(self.pos..).and_then(|s| s.find("*/")) else {
            return self.raise(start, "Unterminated comment");
        };
        let text_end = self.pos + rel;
        if self.slice(self.pos, text_end).chars().any(is_newline) {
            self.newline_before = true;
        }
        self.pos = text_end + 2;
        if self.collect_comments {
            self.record_comment(true, start, start + 2, text_end);
        }
        Ok(())
    }

    fn record_comment(&mut self, block: bool, start: usize, text_start: usize, text_end: usize) {
        let end = self.pos;
        let loc = if self.locations {
            let s = self.line_map.position_at(self.source, start);
            let e = self.line_map.position_at(self.source, end);
            Some(SourceLocation {
                source: self.source_file.clone(),
                start: s,
                end: e,
            })
        } else {
            None
        };
        self.comments.push(Comment {
            block,
            text: self.slice(text_start, text_end).to_string(),
            start,
            end,
            loc,
        });
    }

    // ============ PUNCTUATION ============

    fn punct(&mut self, len: usize, token_type: TokenType, op: &'static str) -> Token {
        self.pos += len;
        self.finish(token_type, TokenValue::Punct(op))
    }

    fn read_punct(&mut self, c: char) -> Result<Token, SyntaxError> {
        use TokenType::*;
        let next = self.char_at(self.pos + 1);
        let next2 = self.char_at(self.pos + 2);
        let tok = match c {
            '(' => self.punct(1, ParenL, "("),
            ')' => self.punct(1, ParenR, ")"),
            '[' => self.punct(1, BracketL, "["),
            ']' => self.punct(1, BracketR, "]"),
            '{' => self.punct(1, BraceL, "{"),
            '}' => self.punct(1, BraceR, "}"),
            ';' => self.punct(1, Semi, ";"),
            ',' => self.punct(1, Comma, ","),
            ':' => self.punct(1, Colon, ":"),
            '~' => self.punct(1, Prefix, "~"),
            '.' => {
                if matches!(next, Some('0'..='9')) {
                    return self.read_number(true);
                }
                if next == Some('.') && next2 == Some('.') && self.ecma >= EcmaVersion::Es2015 {
                    self.punct(3, Ellipsis, "...")
                } else {
                    self.punct(1, Dot, ".")
                }
            }
            '?' => {
                if next == Some('?') {
                    if next2 == Some('=') && self.ecma >= EcmaVersion::Es2021 {
                        self.punct(3, Assign, "??=")
                    } else if self.ecma >= EcmaVersion::Es2020 {
                        self.punct(2, Coalesce, "??")
                    } else {
                        self.punct(1, Question, "?")
                    }
                } else if next == Some('.')
                    && !matches!(next2, Some('0'..='9'))
                    && self.ecma >= EcmaVersion::Es2020
                {
                    self.punct(2, QuestionDot, "?.")
                } else {
                    self.punct(1, Question, "?")
                }
            }
            '=' => {
                if next == Some('=') {
                    if next2 == Some('=') {
                        self.punct(3, Equality, "===")
                    } else {
                        self.punct(2, Equality, "==")
                    }
                } else if next == Some('>') && self.ecma >= EcmaVersion::Es2015 {
                    self.punct(2, Arrow, "=>")
                } else {
                    self.punct(1, Eq, "=")
                }
            }
            '!' => {
                if next == Some('=') {
                    if next2 == Some('=') {
                        self.punct(3, Equality, "!==")
                    } else {
                        self.punct(2, Equality, "!=")
                    }
                } else {
                    self.punct(1, Prefix, "!")
                }
            }
            '<' => {
                if next == Some('<') {
                    if next2 == Some('=') {
                        self.punct(3, Assign, "<<=")
                    } else {
                        self.punct(2, BitShift, "<<")
                    }
                } else if next == Some('=') {
                    self.punct(2, Relational, "<=")
                } else {
                    self.punct(1, Relational, "<")
                }
            }
            '>' => {
                if next == Some('>') {
                    if next2 == Some('>') {
                        if self.char_at(self.pos + 3) == Some('=') {
                            self.punct(4, Assign, ">>>=")
                        } else {
                            self.punct(3, BitShift, ">>>")
                        }
                    } else if next2 == Some('=') {
                        self.punct(3, Assign, ">>=")
                    } else {
                        self.punct(2, BitShift, ">>")
                    }
                } else if next == Some('=') {
                    self.punct(2, Relational, ">=")
                } else {
                    self.punct(1, Relational, ">")
                }
            }
            '|' => {
                if next == Some('|') {
                    if next2 == Some('=') && self.ecma >= EcmaVersion::Es2021 {
                        self.punct(3, Assign, "||=")
                    } else {
                        self.punct(2, LogicalOr, "||")
                    }
                } else if next == Some('=') {
                    self.punct(2, Assign, "|=")
                } else {
                    self.punct(1, BitwiseOr, "|")
                }
            }
            '&' => {
                if next == Some('&') {
                    if next2 == Some('=') && self.ecma >= EcmaVersion::Es2021 {
                        self.punct(3, Assign, "&&=")
                    } else {
                        self.punct(2, LogicalAnd, "&&")
                    }
                } else if next == Some('=') {
                    self.punct(2, Assign, "&=")
                } else {
                    self.punct(1, BitwiseAnd, "&")
                }
            }
            '^' => {
                if next == Some('=') {
                    self.punct(2, Assign, "^=")
                } else {
                    self.punct(1, BitwiseXor, "^")
                }
            }
            '+' => {
                if next == Some('+') {
                    self.punct(2, IncDec, "++")
                } else if next == Some('=') {
                    self.punct(2, Assign, "+=")
                } else {
                    self.punct(1, PlusMin, "+")
                }
            }
            '-' => {
                if next == Some('-') {
                    self.punct(2, IncDec, "--")
                } else if next == Some('=') {
                    self.punct(2, Assign, "-=")
                } else {
                    self.punct(1, PlusMin, "-")
                }
            }
            '*' => {
                if next == Some('*') && self.ecma >= EcmaVersion::Es2016 {
                    if next2 == Some('=') {
                        self.punct(3, Assign, "**=")
                    } else {
                        self.punct(2, StarStar, "**")
                    }
                } else if next == Some('=') {
                    self.punct(2, Assign, "*=")
                } else {
                    self.punct(1, Star, "*")
                }
            }
            '%' => {
                if next == Some('=') {
                    self.punct(2, Assign, "%=")
                } else {
                    self.punct(1, Modulo, "%")
                }
            }
            '/' => {
                if self.expr_allowed {
                    return self.read_regexp();
                }
                if next == Some('=') {
                    self.punct(2, Assign, "/=")
                } else {
                    self.punct(1, Slash, "/")
                }
            }
            _ => return self.raise(self.pos, format!("Unexpected character '{c}'")),
        };
        Ok(tok)
    }

    // ============ WORDS & KEYWORDS ============

    fn read_word(&mut self) -> Result<Token, SyntaxError> {
        let start = self.pos;
        let mut word = String::new();
        let mut contains_esc = false;
        let mut first = true;
        loop {
            let Some(c) = self.peek_char() else { break };
            let valid = if first {
                is_id_start(c)
            } else {
                is_id_continue(c)
            };
            if valid {
                word.push(c);
                self.pos += c.len_utf8();
            } else if c == '\\' {
                contains_esc = true;
                let esc_start = self.pos;
                self.pos += 1;
                if self.peek_char() != Some('u') {
                    return self.raise(self.pos, "Expecting Unicode escape sequence \\uXXXX");
                }
                self.pos += 1;
                let Some(code) = self.try_read_unicode_escape() else {
                    return self.raise(esc_start, "Bad character escape sequence");
                };
                let Some(ch) = char::from_u32(code) else {
                    return self.raise(esc_start, "Invalid Unicode escape");
                };
                let ok = if first {
                    is_id_start(ch)
                } else {
                    is_id_continue(ch)
                };
                if !ok {
                    return self.raise(esc_start, "Invalid Unicode escape");
                }
                word.push(ch);
            } else {
                break;
            }
            first = false;
        }
        if let Some(token_type) = keyword_token(&word, self.ecma) {
            if contains_esc {
                return self.raise(start, format!("Escape sequence in keyword {word}"));
            }
            return Ok(self.finish(token_type, TokenValue::Name(word)));
        }
        Ok(self.finish(TokenType::Name, TokenValue::Name(word)))
    }

    fn read_private_name(&mut self) -> Result<Token, SyntaxError> {
        if self.ecma < EcmaVersion::Es2022 {
            return self.raise(self.pos, "Unexpected character '#'");
        }
        self.pos += 1;
        let Some(c) = self.peek_char() else {
            return self.raise(self.pos, "Unexpected character '#'");
        };
        if !is_id_start(c) {
            return self.raise(self.pos, "Unexpected character '#'");
        }
        let word_start = self.pos;
        while let Some(c) = self.peek_char() {
            if !is_id_continue(c) {
                break;
            }
            self.pos += c.len_utf8();
        }
        let name = self.slice(word_start, self.pos).to_string();
        Ok(self.finish(TokenType::PrivateId, TokenValue::Name(name)))
    }

    // ============ NUMBERS ============

    /// Reads digits in `radix`, folding into an f64, honoring numeric
    /// separators when the version allows them. Returns `None` when no
    /// digit was consumed.
    fn read_int(&mut self, radix: u32) -> Result<Option<f64>, SyntaxError> {
        let allow_sep = self.ecma >= EcmaVersion::Es2021;
        let mut total = 0f64;
        let mut any = false;
        let mut last: Option<char> = None;
        while let Some(c) = self.peek_char() {
            if c == '_' && allow_sep {
                match last {
                    None => {
                        return self
                            .raise(self.pos, "Numeric separator is not allowed at the first of digits")
                    }
                    Some('_') => {
                        return self
                            .raise(self.pos, "Numeric separator must be exactly one underscore")
                    }
                    _ => {}
                }
                last = Some('_');
                self.pos += 1;
                continue;
            }
            let Some(d) = c.to_digit(radix) else { break };
            total = total * f64::from(radix) + f64::from(d);
            any = true;
            last = Some(c);
            self.pos += 1;
        }
        if last == Some('_') {
            return self.raise(
                self.pos - 1,
                "Numeric separator is not allowed at the last of digits",
            );
        }
        Ok(if any { Some(total) } else { None })
    }

    fn read_radix_number(&mut self, radix: u32) -> Result<Token, SyntaxError> {
        let start = self.tok_start;
        self.pos += 2;
        let Some(value) = self.read_int(radix)? else {
            return self.raise(start, format!("Expected number in radix {radix}"));
        };
        if self.peek_char() == Some('n') {
            return self.finish_bigint(start);
        }
        if self.peek_char().is_some_and(is_id_start) {
            return self.raise(self.pos, "Identifier directly after number");
        }
        Ok(self.finish(TokenType::Num, TokenValue::Num(value)))
    }

    fn finish_bigint(&mut self, start: usize) -> Result<Token, SyntaxError> {
        if self.ecma < EcmaVersion::Es2020 {
            return self.raise(self.pos, "Identifier directly after number");
        }
        let digits = self.slice(start, self.pos).replace('_', "");
        self.pos += 1; // 'n'
        if self.peek_char().is_some_and(is_id_start) {
            return self.raise(self.pos, "Identifier directly after number");
        }
        Ok(self.finish(TokenType::Num, TokenValue::BigInt(digits)))
    }

    fn read_number(&mut self, starts_with_dot: bool) -> Result<Token, SyntaxError> {
        let start = self.tok_start;
        let mut is_legacy_octal = false;
        if !starts_with_dot && self.peek_char() == Some('0') {
            match self.char_at(self.pos + 1) {
                Some('x' | 'X') => return self.read_radix_number(16),
                Some('o' | 'O') if self.ecma >= EcmaVersion::Es2015 => {
                    return self.read_radix_number(8)
                }
                Some('b' | 'B') if self.ecma >= EcmaVersion::Es2015 => {
                    return self.read_radix_number(2)
                }
                Some('0'..='9') => {
                    // Legacy octal, or a decimal with a leading zero if
                    // an 8 or 9 appears.
                    let mut probe = self.pos + 1;
                    is_legacy_octal = true;
                    while let Some(c) = self.char_at(probe) {
                        match c {
                            '0'..='7' => probe += 1,
                            '8' | '9' => {
                                is_legacy_octal = false;
                                probe += 1;
                            }
                            _ => break,
                        }
                    }
                    if self.strict {
                        return self.raise(start, "Invalid number");
                    }
                    if is_legacy_octal && !matches!(self.char_at(probe), Some('.' | 'e' | 'E' | 'n'))
                    {
                        self.pos = probe;
                        let digits = self.slice(start, self.pos);
                        let value = digits
                            .chars()
                            .filter_map(|c| c.to_digit(8))
                            .fold(0f64, |acc, d| acc * 8.0 + f64::from(d));
                        if self.peek_char().is_some_and(is_id_start) {
                            return self.raise(self.pos, "Identifier directly after number");
                        }
                        return Ok(self.finish(TokenType::Num, TokenValue::Num(value)));
                    }
                    is_legacy_octal = false;
                }
                _ => {}
            }
        }
        let mut has_dot = starts_with_dot;
        let mut has_exp = false;
        if !starts_with_dot {
            self.read_int(10)?;
        } else {
            self.pos += 1; // leading '.'
            self.read_int(10)?;
        }
        if !starts_with_dot && self.peek_char() == Some('.') {
            has_dot = true;
            self.pos += 1;
            self.read_int(10)?;
        }
        if matches!(self.peek_char(), Some('e' | 'E')) {
            has_exp = true;
            self.pos += 1;
            if matches!(self.peek_char(), Some('+' | '-')) {
                self.pos += 1;
            }
            if self.read_int(10)?.is_none() {
                return self.raise(start, "Invalid number");
            }
        }
        if self.peek_char() == Some('n') && !has_dot && !has_exp && !is_legacy_octal {
            return self.finish_bigint(start);
        }
        if self.peek_char().is_some_and(is_id_start) {
            return self.raise(self.pos, "Identifier directly after number");
        }
        let raw = self.slice(start, self.pos).replace('_', "");
        let value = raw.parse::<f64>().unwrap_or(f64::NAN);
        Ok(self.finish(TokenType::Num, TokenValue::Num(value)))
    }

    // ============ STRINGS & ESCAPES ============

    fn read_string(&mut self, quote: char) -> Result<Token, SyntaxError> {
        self.pos += 1;
        let mut out = String::new();
        loop {
            let Some(c) = self.peek_char() else {
                return self.raise(self.tok_start, "Unterminated string constant");
            };
            if c == quote {
                self.pos += 1;
                break;
            }
            match c {
                '\\' => {
                    if !self.read_escaped_char(&mut out, false)? {
                        return self.raise(self.pos, "Bad character escape sequence");
                    }
                }
                '\n' | '\r' => {
                    return self.raise(self.tok_start, "Unterminated string constant")
                }
                '\u{2028}' | '\u{2029}' if self.ecma < EcmaVersion::Es2019 => {
                    return self.raise(self.tok_start, "Unterminated string constant")
                }
                _ => {
                    out.push(c);
                    self.pos += c.len_utf8();
                }
            }
        }
        Ok(self.finish(TokenType::String, TokenValue::Str(out)))
    }

    /// Consumes one `\`-escape, appending the cooked result to `out`.
    /// Returns `Ok(false)` for escapes that are invalid but tolerated
    /// inside templates; outside template mode the caller raises.
    fn read_escaped_char(&mut self, out: &mut String, in_template: bool) -> Result<bool, SyntaxError> {
        let esc_start = self.pos;
        self.pos += 1;
        let Some(c) = self.peek_char() else {
            return self.raise(esc_start, "Bad character escape sequence");
        };
        self.pos += c.len_utf8();
        match c {
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'b' => out.push('\u{0008}'),
            'v' => out.push('\u{000B}'),
            'f' => out.push('\u{000C}'),
            'x' => {
                let Some(code) = self.read_hex(2) else {
                    if in_template {
                        return Ok(false);
                    }
                    return self.raise(esc_start, "Bad character escape sequence");
                };
                out.push(char::from_u32(code).unwrap_or('\u{FFFD}'));
            }
            'u' => {
                let Some(code) = self.try_read_unicode_escape() else {
                    if in_template {
                        return Ok(false);
                    }
                    return self.raise(esc_start, "Bad character escape sequence");
                };
                // Lone surrogates cannot be carried in a Rust string.
                out.push(char::from_u32(code).unwrap_or('\u{FFFD}'));
            }
            '\r' => {
                if self.peek_char() == Some('\n') {
                    self.pos += 1;
                }
            }
            '\n' | '\u{2028}' | '\u{2029}' => {}
            '0'..='7' => {
                if c == '0' && !matches!(self.peek_char(), Some('0'..='9')) {
                    out.push('\0');
                } else {
                    if in_template {
                        return Ok(false);
                    }
                    if self.strict {
                        return self.raise(esc_start, "Octal literal in strict mode");
                    }
                    let mut value = c.to_digit(8).unwrap_or(0);
                    for _ in 0..2 {
                        let Some(d) = self.peek_char().and_then(|c| c.to_digit(8)) else {
                            break;
                        };
                        let next = value * 8 + d;
                        if next > 255 {
                            break;
                        }
                        value = next;
                        self.pos += 1;
                    }
                    out.push(char::from_u32(value).unwrap_or('\u{FFFD}'));
                }
            }
            '8' | '9' => {
                if in_template {
                    return Ok(false);
                }
                if self.strict {
                    return self.raise(esc_start, "Invalid escape sequence");
                }
                out.push(c);
            }
            _ => out.push(c),
        }
        Ok(true)
    }

    fn read_hex(&mut self, len: usize) -> Option<u32> {
        let mut value = 0u32;
        for _ in 0..len {
            let d = self.peek_char()?.to_digit(16)?;
            value = value * 16 + d;
            self.pos += 1;
        }
        Some(value)
    }

    /// `pos` sits just past the `u`. Handles both `\uXXXX` and the
    /// ES2015 `\u{...}` form. Returns `None` without raising so that
    /// template reading can tolerate the failure.
    fn try_read_unicode_escape(&mut self) -> Option<u32> {
        if self.peek_char() == Some('{') {
            if self.ecma < EcmaVersion::Es2015 {
                return None;
            }
            self.pos += 1;
            let mut value = 0u32;
            let mut any = false;
            while let Some(d) = self.peek_char().and_then(|c| c.to_digit(16)) {
                value = value.saturating_mul(16).saturating_add(d);
                any = true;
                self.pos += 1;
            }
            if !any || value > 0x0010_FFFF || self.peek_char() != Some('}') {
                return None;
            }
            self.pos += 1;
            Some(value)
        } else {
            self.read_hex(4)
        }
    }

    // ============ TEMPLATES ============

    fn read_template_token(&mut self) -> Result<Token, SyntaxError> {
        let mut out = String::new();
        let mut invalid = false;
        loop {
            let Some(c) = self.peek_char() else {
                return self.raise(self.tok_start, "Unterminated template");
            };
            if c == '`' || (c == '$' && self.char_at(self.pos + 1) == Some('{')) {
                if self.pos == self.tok_start && self.last_type == TokenType::Template {
                    return if c == '$' {
                        self.pos += 2;
                        Ok(self.finish(TokenType::DollarBraceL, TokenValue::None))
                    } else {
                        self.pos += 1;
                        Ok(self.finish(TokenType::BackQuote, TokenValue::None))
                    };
                }
                let raw = self.slice(self.tok_start, self.pos).to_string();
                let cooked = if invalid { None } else { Some(out) };
                return Ok(self.finish(TokenType::Template, TokenValue::Template { cooked, raw }));
            }
            match c {
                '\\' => {
                    if invalid {
                        self.pos += 1;
                        if let Some(next) = self.peek_char() {
                            self.pos += next.len_utf8();
                        }
                    } else if !self.read_escaped_char(&mut out, true)? {
                        if self.ecma < EcmaVersion::Es2018 {
                            return self.raise(self.tok_start, "Bad character escape sequence");
                        }
                        invalid = true;
                    }
                }
                '\r' => {
                    // Raw keeps the terminator; cooked normalizes it.
                    out.push('\n');
                    self.pos += 1;
                    if self.peek_char() == Some('\n') {
                        self.pos += 1;
                    }
                }
                _ => {
                    out.push(c);
                    self.pos += c.len_utf8();
                }
            }
        }
    }

    // ============ REGULAR EXPRESSIONS ============

    fn read_regexp(&mut self) -> Result<Token, SyntaxError> {
        let start = self.pos;
        self.pos += 1;
        let mut escaped = false;
        let mut in_class = false;
        loop {
            let Some(c) = self.peek_char() else {
                return self.raise(start, "Unterminated regular expression");
            };
            if is_newline(c) {
                return self.raise(start, "Unterminated regular expression");
            }
            if escaped {
                escaped = false;
            } else {
                match c {
                    '[' => in_class = true,
                    ']' if in_class => in_class = false,
                    '/' if !in_class => break,
                    '\\' => escaped = true,
                    _ => {}
                }
            }
            self.pos += c.len_utf8();
        }
        let pattern = self.slice(start + 1, self.pos).to_string();
        self.pos += 1;
        let flags_start = self.pos;
        while let Some(c) = self.peek_char() {
            if !is_id_continue(c) {
                break;
            }
            self.pos += c.len_utf8();
        }
        let flags = self.slice(flags_start, self.pos).to_string();
        self.validate_regexp_flags(&flags, flags_start)?;
        Ok(self.finish(TokenType::Regexp, TokenValue::Regex { pattern, flags }))
    }

    fn validate_regexp_flags(&mut self, flags: &str, pos: usize) -> Result<(), SyntaxError> {
        let mut allowed = String::from("gim");
        if self.ecma >= EcmaVersion::Es2015 {
            allowed.push_str("uy");
        }
        if self.ecma >= EcmaVersion::Es2018 {
            allowed.push('s');
        }
        if self.ecma >= EcmaVersion::Es2022 {
            allowed.push('d');
        }
        if self.ecma >= EcmaVersion::Es2024 {
            allowed.push('v');
        }
        let mut seen = String::new();
        for c in flags.chars() {
            if !allowed.contains(c) {
                return self.raise(pos, "Invalid regular expression flag");
            }
            if seen.contains(c) {
                return self.raise(pos, "Duplicate regular expression flag");
            }
            seen.push(c);
        }
        if seen.contains('u') && seen.contains('v') {
            return self.raise(pos, "Invalid regular expression flag");
        }
        Ok(())
    }
}

/// Scans a directive prologue starting at `start` for a `"use strict"`
/// member, without tokenizing. Used to decide strictness before the
/// body is lexed, so octal literals and the like are rejected even
/// when they appear before the prologue has been parsed.
pub(crate) fn strict_directive(source: &str, mut start: usize, ecma: EcmaVersion) -> bool {
    if ecma < EcmaVersion::Es5 {
        return false;
    }
    loop {
        start = skip_ws_and_comments(source, start).0;
        let Some((inner, after)) = scan_string_literal(source, start) else {
            return false;
        };
        if inner == "use strict" {
            let (end, saw_newline) = skip_ws_and_comments(source, after);
            let next = source.get(end..).and_then(|s| s.chars().next());
            return match next {
                None | Some(';' | '}') => true,
                Some(c) if saw_newline => {
                    // A line break terminates the directive unless the
                    // next token would extend the expression.
                    !matches!(
                        c,
                        '(' | '`' | '.' | '[' | '+' | '-' | '/' | '*' | '%' | '<' | '>' | '='
                            | ',' | '?' | '^' | '&'
                    ) && !(c == '!' && source.get(end + 1..).is_some_and(|s| s.starts_with('=')))
                }
                _ => false,
            };
        }
        start = skip_ws_and_comments(source, after).0;
        if source.get(start..).is_some_and(|s| s.starts_with(';')) {
            start += 1;
        }
    }
}

pub(crate) fn skip_ws_and_comments(source: &str, mut pos: usize) -> (usize, bool) {
    let mut saw_newline = false;
    loop {
        let Some(rest) = source.get(pos..) else {
            return (source.len(), saw_newline);
        };
        let Some(c) = rest.chars().next() else {
            return (pos, saw_newline);
        };
        if is_newline(c) {
            saw_newline = true;
            pos += c.len_utf8();
        } else if c.is_whitespace() || c == '\u{FEFF}' {
            pos += c.len_utf8();
        } else if rest.starts_with("//") {
            let line_len = rest.chars().take_while(|c| !is_newline(*c)).map(char::len_utf8);
            pos += line_len.sum::<usize>();
        } else if rest.starts_with("/*") {
            let Some(close) = rest.find("*/") else {
                return (source.len(), saw_newline);
            };
            if rest.get(..close).is_some_and(|s| s.chars().any(is_newline)) {
                saw_newline = true;
            }
            pos += close + 2;
        } else {
            return (pos, saw_newline);
        }
    }
}

/// Matches a string literal at `pos`, returning its raw inner text
/// (escapes left as-is) and the offset past the closing quote.
fn scan_string_literal(source: &str, pos: usize) -> Option<(&str, usize)> {
    let rest = source.get(pos..)?;
    let quote = rest.chars().next()?;
    if quote != '"' && quote != '\'' {
        return None;
    }
    let mut offset = quote.len_utf8();
    let mut escaped = false;
    for c in rest.get(offset..)?.chars() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == quote {
            let inner = rest.get(1..offset)?;
            return Some((inner, pos + offset + 1));
        } else if is_newline(c) {
            return None;
        }
        offset += c.len_utf8();
    }
    None
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::indexing_slicing)]

    use super::*;

    fn lex(source: &str) -> Vec<Token> {
        lex_with(source, EcmaVersion::Latest)
    }

    fn lex_with(source: &str, ecma: EcmaVersion) -> Vec<Token> {
        let mut lexer = Lexer::new(source, ecma, false, false, None);
        let mut tokens = Vec::new();
        loop {
            let token = lexer.next_token().unwrap();
            let done = token.token_type == TokenType::Eof;
            tokens.push(token);
            if done {
                break;
            }
        }
        tokens
    }

    fn kinds(source: &str) -> Vec<TokenType> {
        lex(source).into_iter().map(|t| t.token_type).collect()
    }

    #[test]
    fn punctuation() {
        use TokenType::*;
        assert_eq!(
            kinds("a ??= b ?. c ** d"),
            vec![Name, Assign, Name, QuestionDot, Name, StarStar, Name, Eof]
        );
    }

    #[test]
    fn regex_after_operator_division_after_value() {
        use TokenType::*;
        assert_eq!(kinds("a / b"), vec![Name, Slash, Name, Eof]);
        assert_eq!(kinds("a = /b/g"), vec![Name, Eq, Regexp, Eof]);
        let tokens = lex("x = /ab[/]c/i");
        assert_eq!(
            tokens[2].value,
            TokenValue::Regex {
                pattern: "ab[/]c".to_string(),
                flags: "i".to_string()
            }
        );
    }

    #[test]
    fn regex_after_keyword_and_paren() {
        use TokenType::*;
        assert_eq!(
            kinds("typeof /x/"),
            vec![TypeOf, Regexp, Eof]
        );
        // After `)` of an `if` head a regex may start a statement.
        assert_eq!(
            kinds("if (a) /b/.test(a)"),
            vec![If, ParenL, Name, ParenR, Regexp, Dot, Name, ParenL, Name, ParenR, Eof]
        );
    }

    #[test]
    fn braces_block_vs_object() {
        use TokenType::*;
        // `{` at statement start is a block, so `/` after `}` starts a regex.
        assert_eq!(kinds("{} /a/"), vec![BraceL, BraceR, Regexp, Eof]);
        // `{` after `=` is an object literal, so `/` after `}` divides.
        assert_eq!(
            kinds("x = {} / a"),
            vec![Name, Eq, BraceL, BraceR, Slash, Name, Eof]
        );
    }

    #[test]
    fn template_tokens() {
        use TokenType::*;
        assert_eq!(
            kinds("`a${b}c`"),
            vec![BackQuote, Template, DollarBraceL, Name, BraceR, Template, BackQuote, Eof]
        );
        let tokens = lex("`x\\ny`");
        assert_eq!(
            tokens[1].value,
            TokenValue::Template {
                cooked: Some("x\ny".to_string()),
                raw: "x\\ny".to_string()
            }
        );
    }

    #[test]
    fn division_inside_template_substitution() {
        use TokenType::*;
        assert_eq!(
            kinds("`${a / b}`"),
            vec![BackQuote, Template, DollarBraceL, Name, Slash, Name, BraceR, Template, BackQuote, Eof]
        );
    }

    #[test]
    fn numbers() {
        let tokens = lex("0x1f 0b101 0o17 1_000 1.5e3 42n");
        let values: Vec<_> = tokens
            .iter()
            .take(6)
            .map(|t| t.value.clone())
            .collect();
        assert_eq!(
            values,
            vec![
                TokenValue::Num(31.0),
                TokenValue::Num(5.0),
                TokenValue::Num(15.0),
                TokenValue::Num(1000.0),
                TokenValue::Num(1500.0),
                TokenValue::BigInt("42".to_string()),
            ]
        );
    }

    #[test]
    fn number_gates() {
        let mut lexer = Lexer::new("1_000", EcmaVersion::Es2020, false, false, None);
        // Before ES2021 the underscore ends the number and then fails
        // the identifier-after-number check.
        assert!(lexer.next_token().is_err());
        let mut lexer = Lexer::new("42n", EcmaVersion::Es2019, false, false, None);
        assert!(lexer.next_token().is_err());
    }

    #[test]
    fn strings_and_escapes() {
        let tokens = lex(r#"'a\n\x41B\u{43}'"#);
        assert_eq!(tokens[0].value, TokenValue::Str("a\nABC".to_string()));
        let mut lexer = Lexer::new("'abc", EcmaVersion::Latest, false, false, None);
        let err = lexer.next_token().unwrap_err();
        assert!(err.message.contains("Unterminated string"));
    }

    #[test]
    fn octal_escape_strict() {
        let mut lexer = Lexer::new(r"'\07'", EcmaVersion::Latest, false, false, None);
        lexer.set_strict(true);
        assert!(lexer.next_token().is_err());
        let mut lexer = Lexer::new("010", EcmaVersion::Latest, false, false, None);
        assert_eq!(lexer.next_token().unwrap().value, TokenValue::Num(8.0));
        lexer = Lexer::new("010", EcmaVersion::Latest, false, false, None);
        lexer.set_strict(true);
        assert!(lexer.next_token().is_err());
    }

    #[test]
    fn keywords_and_contextual_names() {
        use TokenType::*;
        assert_eq!(
            kinds("var let async await yield of"),
            vec![Var, Name, Name, Name, Name, Name, Eof]
        );
        assert_eq!(kinds("new.target"), vec![New, Dot, Name, Eof]);
    }

    #[test]
    fn escape_in_keyword_rejected() {
        let mut lexer = Lexer::new(r"v\u0061r x", EcmaVersion::Latest, false, false, None);
        let err = lexer.next_token().unwrap_err();
        assert!(err.message.contains("Escape sequence in keyword"));
    }

    #[test]
    fn comments_and_newline_tracking() {
        let mut lexer = Lexer::new("a // one\nb /* two */ c", EcmaVersion::Latest, false, false, None);
        lexer.set_collect_comments(true);
        let mut kinds = Vec::new();
        loop {
            let t = lexer.next_token().unwrap();
            if t.token_type == TokenType::Eof {
                break;
            }
            kinds.push(t.token_type);
        }
        assert_eq!(kinds, vec![TokenType::Name, TokenType::Name, TokenType::Name]);
        let comments = lexer.take_comments();
        assert_eq!(comments.len(), 2);
        assert!(!comments[0].block);
        assert_eq!(comments[0].text, " one");
        assert!(comments[1].block);
        assert_eq!(comments[1].text, " two ");
    }

    #[test]
    fn unterminated_block_comment() {
        let mut lexer = Lexer::new("/* no end", EcmaVersion::Latest, false, false, None);
        let err = lexer.next_token().unwrap_err();
        assert!(err.message.contains("Unterminated comment"));
    }

    #[test]
    fn checkpoint_rewind_relexes_consistently() {
        let mut lexer = Lexer::new("a = /b/g", EcmaVersion::Latest, false, false, None);
        lexer.next_token().unwrap();
        let cp = lexer.checkpoint();
        lexer.next_token().unwrap();
        let regex = lexer.next_token().unwrap();
        assert_eq!(regex.token_type, TokenType::Regexp);
        lexer.restore(cp);
        lexer.next_token().unwrap();
        let again = lexer.next_token().unwrap();
        assert_eq!(again.token_type, TokenType::Regexp);
    }

    #[test]
    fn hash_bang() {
        let mut lexer = Lexer::new("#!/usr/bin/env node\n1", EcmaVersion::Latest, false, false, None);
        lexer.skip_hash_bang();
        let token = lexer.next_token().unwrap();
        assert_eq!(token.value, TokenValue::Num(1.0));
    }

    #[test]
    fn strict_directive_prescan() {
        assert!(strict_directive("'use strict'; x", 0, EcmaVersion::Latest));
        assert!(strict_directive("\"a\"; 'use strict'\nx", 0, EcmaVersion::Latest));
        assert!(!strict_directive("'use strict' + 1", 0, EcmaVersion::Latest));
        assert!(!strict_directive("x = 1", 0, EcmaVersion::Latest));
        assert!(!strict_directive("'use strict'", 0, EcmaVersion::Es3));
    }

    #[test]
    fn token_locations() {
        let mut lexer = Lexer::new("a\n  b", EcmaVersion::Latest, false, true, None);
        lexer.next_token().unwrap();
        let b = lexer.next_token().unwrap();
        let loc = b.loc.unwrap();
        assert_eq!((loc.start.line, loc.start.column), (2, 2));
    }
}
