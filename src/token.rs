//! Token model
//!
//! `TokenType` is the static registry of lexical categories: one
//! variant per distinct category, compared by identity (enum equality),
//! never by label string. The per-type descriptors that drive parsing
//! decisions (whether a type can start an expression, whether it
//! precedes an expression, binary precedence, prefix/postfix flags) are
//! `const fn` lookups on the variant. Operator families that share a
//! precedence level share one type and carry the concrete operator text
//! in the token value.

use std::sync::OnceLock;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::options::{EcmaVersion, SourceType};
use crate::position::SourceLocation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenType {
    // Literals and atoms
    Num,
    Regexp,
    String,
    Template,
    Name,
    PrivateId,
    Eof,

    // Punctuation
    BracketL,
    BracketR,
    BraceL,
    BraceR,
    ParenL,
    ParenR,
    Comma,
    Semi,
    Colon,
    Dot,
    Question,
    QuestionDot,
    Arrow,
    Ellipsis,
    BackQuote,
    DollarBraceL,

    // Operators. `Assign` covers all compound assignments; the binary
    // families are grouped by precedence with the operator text carried
    // in the token value.
    Eq,
    Assign,
    IncDec,
    Prefix,
    Coalesce,
    LogicalOr,
    LogicalAnd,
    BitwiseOr,
    BitwiseXor,
    BitwiseAnd,
    Equality,
    Relational,
    BitShift,
    PlusMin,
    Modulo,
    Star,
    Slash,
    StarStar,

    // Keywords
    Break,
    Case,
    Catch,
    Continue,
    Debugger,
    Default,
    Do,
    Else,
    Finally,
    For,
    Function,
    If,
    Return,
    Switch,
    Throw,
    Try,
    Var,
    Const,
    While,
    With,
    New,
    This,
    Super,
    Class,
    Extends,
    Export,
    Import,
    Null,
    True,
    False,
    In,
    InstanceOf,
    TypeOf,
    Void,
    Delete,
}

impl TokenType {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Num => "num",
            Self::Regexp => "regexp",
            Self::String => "string",
            Self::Template => "template",
            Self::Name => "name",
            Self::PrivateId => "privateId",
            Self::Eof => "eof",
            Self::BracketL => "[",
            Self::BracketR => "]",
            Self::BraceL => "{",
            Self::BraceR => "}",
            Self::ParenL => "(",
            Self::ParenR => ")",
            Self::Comma => ",",
            Self::Semi => ";",
            Self::Colon => ":",
            Self::Dot => ".",
            Self::Question => "?",
            Self::QuestionDot => "?.",
            Self::Arrow => "=>",
            Self::Ellipsis => "...",
            Self::BackQuote => "`",
            Self::DollarBraceL => "${",
            Self::Eq => "=",
            Self::Assign => "_=",
            Self::IncDec => "++/--",
            Self::Prefix => "!/~",
            Self::Coalesce => "??",
            Self::LogicalOr => "||",
            Self::LogicalAnd => "&&",
            Self::BitwiseOr => "|",
            Self::BitwiseXor => "^",
            Self::BitwiseAnd => "&",
            Self::Equality => "==/!=/===/!==",
            Self::Relational => "</>/<=/>=",
            Self::BitShift => "<</>>/>>>",
            Self::PlusMin => "+/-",
            Self::Modulo => "%",
            Self::Star => "*",
            Self::Slash => "/",
            Self::StarStar => "**",
            Self::Break => "break",
            Self::Case => "case",
            Self::Catch => "catch",
            Self::Continue => "continue",
            Self::Debugger => "debugger",
            Self::Default => "default",
            Self::Do => "do",
            Self::Else => "else",
            Self::Finally => "finally",
            Self::For => "for",
            Self::Function => "function",
            Self::If => "if",
            Self::Return => "return",
            Self::Switch => "switch",
            Self::Throw => "throw",
            Self::Try => "try",
            Self::Var => "var",
            Self::Const => "const",
            Self::While => "while",
            Self::With => "with",
            Self::New => "new",
            Self::This => "this",
            Self::Super => "super",
            Self::Class => "class",
            Self::Extends => "extends",
            Self::Export => "export",
            Self::Import => "import",
            Self::Null => "null",
            Self::True => "true",
            Self::False => "false",
            Self::In => "in",
            Self::InstanceOf => "instanceof",
            Self::TypeOf => "typeof",
            Self::Void => "void",
            Self::Delete => "delete",
        }
    }

    /// The keyword spelling, for keyword token types only.
    pub const fn keyword(self) -> Option<&'static str> {
        match self {
            Self::Break
            | Self::Case
            | Self::Catch
            | Self::Continue
            | Self::Debugger
            | Self::Default
            | Self::Do
            | Self::Else
            | Self::Finally
            | Self::For
            | Self::Function
            | Self::If
            | Self::Return
            | Self::Switch
            | Self::Throw
            | Self::Try
            | Self::Var
            | Self::Const
            | Self::While
            | Self::With
            | Self::New
            | Self::This
            | Self::Super
            | Self::Class
            | Self::Extends
            | Self::Export
            | Self::Import
            | Self::Null
            | Self::True
            | Self::False
            | Self::In
            | Self::InstanceOf
            | Self::TypeOf
            | Self::Void
            | Self::Delete => Some(self.label()),
            _ => None,
        }
    }

    /// Whether a token of this type means the next `/` starts a regex
    /// and the next `{` opens an expression-position brace.
    pub const fn before_expr(self) -> bool {
        matches!(
            self,
            Self::BracketL
                | Self::BraceL
                | Self::ParenL
                | Self::Comma
                | Self::Semi
                | Self::Colon
                | Self::Question
                | Self::Arrow
                | Self::Ellipsis
                | Self::DollarBraceL
                | Self::Eq
                | Self::Assign
                | Self::Prefix
                | Self::Coalesce
                | Self::LogicalOr
                | Self::LogicalAnd
                | Self::BitwiseOr
                | Self::BitwiseXor
                | Self::BitwiseAnd
                | Self::Equality
                | Self::Relational
                | Self::BitShift
                | Self::PlusMin
                | Self::Modulo
                | Self::Star
                | Self::Slash
                | Self::StarStar
                | Self::Case
                | Self::Do
                | Self::Else
                | Self::Return
                | Self::Throw
                | Self::New
                | Self::Extends
                | Self::Default
                | Self::In
                | Self::InstanceOf
                | Self::TypeOf
                | Self::Void
                | Self::Delete
        )
    }

    /// Whether a token of this type can begin an expression.
    pub const fn starts_expr(self) -> bool {
        matches!(
            self,
            Self::Num
                | Self::Regexp
                | Self::String
                | Self::Template
                | Self::Name
                | Self::PrivateId
                | Self::BracketL
                | Self::BraceL
                | Self::ParenL
                | Self::BackQuote
                | Self::DollarBraceL
                | Self::IncDec
                | Self::Prefix
                | Self::PlusMin
                | Self::Function
                | Self::Class
                | Self::New
                | Self::This
                | Self::Super
                | Self::Import
                | Self::Null
                | Self::True
                | Self::False
                | Self::TypeOf
                | Self::Void
                | Self::Delete
        )
    }

    pub const fn is_loop(self) -> bool {
        matches!(self, Self::Do | Self::For | Self::While)
    }

    pub const fn is_assign(self) -> bool {
        matches!(self, Self::Eq | Self::Assign)
    }

    pub const fn prefix(self) -> bool {
        matches!(
            self,
            Self::IncDec | Self::Prefix | Self::PlusMin | Self::TypeOf | Self::Void | Self::Delete
        )
    }

    pub const fn postfix(self) -> bool {
        matches!(self, Self::IncDec)
    }

    /// Binary-operator precedence, or None for non-binary types.
    /// `in` only counts when the parser currently permits it.
    pub const fn binop(self) -> Option<u8> {
        match self {
            Self::Coalesce => Some(1),
            Self::LogicalOr => Some(2),
            Self::LogicalAnd => Some(3),
            Self::BitwiseOr => Some(4),
            Self::BitwiseXor => Some(5),
            Self::BitwiseAnd => Some(6),
            Self::Equality => Some(7),
            Self::Relational | Self::In | Self::InstanceOf => Some(8),
            Self::BitShift => Some(9),
            Self::PlusMin => Some(10),
            Self::Modulo | Self::Star | Self::Slash => Some(11),
            Self::StarStar => Some(12),
            _ => None,
        }
    }
}

/// Keyword recognition gated by language version: `const`, `class`,
/// `extends`, `export`, `import` and `super` only become keywords at
/// ES2015 (below that they are future reserved words, rejected by the
/// reserved-word check instead).
pub fn keyword_token(word: &str, ecma: EcmaVersion) -> Option<TokenType> {
    static BASE: OnceLock<FxHashMap<&'static str, TokenType>> = OnceLock::new();
    let map = BASE.get_or_init(|| {
        let mut m = FxHashMap::default();
        for t in [
            TokenType::Break,
            TokenType::Case,
            TokenType::Catch,
            TokenType::Continue,
            TokenType::Debugger,
            TokenType::Default,
            TokenType::Do,
            TokenType::Else,
            TokenType::Finally,
            TokenType::For,
            TokenType::Function,
            TokenType::If,
            TokenType::Return,
            TokenType::Switch,
            TokenType::Throw,
            TokenType::Try,
            TokenType::Var,
            TokenType::Const,
            TokenType::While,
            TokenType::With,
            TokenType::New,
            TokenType::This,
            TokenType::Super,
            TokenType::Class,
            TokenType::Extends,
            TokenType::Export,
            TokenType::Import,
            TokenType::Null,
            TokenType::True,
            TokenType::False,
            TokenType::In,
            TokenType::InstanceOf,
            TokenType::TypeOf,
            TokenType::Void,
            TokenType::Delete,
        ] {
            if let Some(kw) = t.keyword() {
                m.insert(kw, t);
            }
        }
        m
    });
    let t = *map.get(word)?;
    let es2015_only = matches!(
        t,
        TokenType::Const
            | TokenType::Class
            | TokenType::Extends
            | TokenType::Export
            | TokenType::Import
            | TokenType::Super
    );
    if es2015_only && ecma < EcmaVersion::Es2015 {
        return None;
    }
    Some(t)
}

fn word_set(words: &'static str) -> FxHashSet<&'static str> {
    words.split(' ').collect()
}

/// Is `word` a reserved word (beyond the keywords) for this
/// version/mode combination? Pure function of its inputs.
pub fn is_reserved_word(
    word: &str,
    ecma: EcmaVersion,
    strict: bool,
    source_type: SourceType,
) -> bool {
    static ES3: OnceLock<FxHashSet<&'static str>> = OnceLock::new();
    static ES5: OnceLock<FxHashSet<&'static str>> = OnceLock::new();
    static STRICT: OnceLock<FxHashSet<&'static str>> = OnceLock::new();

    let base = if ecma >= EcmaVersion::Es2015 {
        word == "enum"
    } else if ecma >= EcmaVersion::Es5 {
        ES5.get_or_init(|| word_set("class enum extends super const export import"))
            .contains(word)
    } else {
        ES3.get_or_init(|| {
            word_set(
                "abstract boolean byte char class double enum export extends final float goto \
                 implements import int interface long native package private protected public \
                 short static super synchronized throws transient volatile",
            )
        })
        .contains(word)
    };
    if base {
        return true;
    }
    if strict
        && STRICT
            .get_or_init(|| {
                word_set("implements interface let package private protected public static yield")
            })
            .contains(word)
    {
        return true;
    }
    source_type == SourceType::Module && word == "await"
}

/// In strict mode `eval` and `arguments` cannot be bound or assigned.
pub fn is_strict_bind_reserved(word: &str) -> bool {
    word == "eval" || word == "arguments"
}

/// Decoded semantic value of a token.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenValue {
    None,
    Num(f64),
    BigInt(String),
    Str(String),
    Name(String),
    Punct(&'static str),
    Template { cooked: Option<String>, raw: String },
    Regex { pattern: String, flags: String },
}

impl TokenValue {
    pub fn punct(&self) -> Option<&'static str> {
        match self {
            TokenValue::Punct(p) => Some(p),
            _ => None,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            TokenValue::Name(n) => Some(n),
            _ => None,
        }
    }
}

/// A concrete token: kind + decoded value + span. Immutable once
/// produced by the tokenizer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub token_type: TokenType,
    pub value: TokenValue,
    pub start: usize,
    pub end: usize,
    pub loc: Option<SourceLocation>,
}

impl Token {
    pub fn eof(pos: usize) -> Self {
        Token {
            token_type: TokenType::Eof,
            value: TokenValue::None,
            start: pos,
            end: pos,
            loc: None,
        }
    }

    /// True when the token is the contextual word `name`.
    pub fn is_contextual(&self, name: &str) -> bool {
        self.token_type == TokenType::Name && self.value.name() == Some(name)
    }
}

/// A skipped comment, reported to the `on_comment` hook.
#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    /// `/* ... */` when true, `// ...` when false.
    pub block: bool,
    /// Text between the delimiters.
    pub text: String,
    pub start: usize,
    pub end: usize,
    pub loc: Option<SourceLocation>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_gating() {
        assert_eq!(keyword_token("if", EcmaVersion::Es3), Some(TokenType::If));
        assert_eq!(keyword_token("class", EcmaVersion::Es5), None);
        assert_eq!(
            keyword_token("class", EcmaVersion::Es2015),
            Some(TokenType::Class)
        );
        assert_eq!(keyword_token("let", EcmaVersion::Latest), None);
    }

    #[test]
    fn reserved_words() {
        assert!(is_reserved_word(
            "class",
            EcmaVersion::Es5,
            false,
            SourceType::Script
        ));
        assert!(!is_reserved_word(
            "class",
            EcmaVersion::Es2015,
            false,
            SourceType::Script
        ));
        assert!(is_reserved_word(
            "let",
            EcmaVersion::Es2015,
            true,
            SourceType::Script
        ));
        assert!(!is_reserved_word(
            "let",
            EcmaVersion::Es2015,
            false,
            SourceType::Script
        ));
        assert!(is_reserved_word(
            "await",
            EcmaVersion::Es2020,
            false,
            SourceType::Module
        ));
    }

    #[test]
    fn binop_precedence_ordering() {
        let coalesce = TokenType::Coalesce.binop();
        let or = TokenType::LogicalOr.binop();
        let plus = TokenType::PlusMin.binop();
        let star = TokenType::Star.binop();
        let pow = TokenType::StarStar.binop();
        assert!(coalesce < or);
        assert!(plus < star);
        assert!(star < pow);
    }
}
