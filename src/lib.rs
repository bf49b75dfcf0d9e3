//! An ECMAScript parser producing ESTree-shaped syntax trees.
//!
//! Source text goes in, a [`Program`] comes out; the tree serializes
//! to ESTree-compatible JSON via serde. The tokenizer and parser
//! support every standard from ES3 through ES2025, selected with
//! [`EcmaVersion`], and the grammar can be extended with plugins (see
//! [`grammar`]).
//!
//! ```
//! use esparse::{parse, EcmaVersion, Options};
//!
//! let program = parse("let answer = 6 * 7;", Options::new(EcmaVersion::Es2020))?;
//! assert_eq!(program.body.len(), 1);
//! # Ok::<(), esparse::SyntaxError>(())
//! ```
//!
//! Tokens alone are available without building a tree:
//!
//! ```
//! use esparse::{tokenize, EcmaVersion, Options};
//!
//! let kinds: Vec<_> = tokenize("a + b", Options::new(EcmaVersion::Es2020))?
//!     .collect::<Result<Vec<_>, _>>()?
//!     .into_iter()
//!     .map(|t| t.token_type)
//!     .collect();
//! assert_eq!(kinds.len(), 4); // a, +, b, eof
//! # Ok::<(), esparse::SyntaxError>(())
//! ```

pub mod ast;
pub mod context;
pub mod error;
pub mod grammar;
pub mod lexer;
pub mod options;
pub mod parser;
pub mod position;
pub mod token;

use std::rc::Rc;

pub use crate::ast::{Expression, Program};
pub use crate::error::SyntaxError;
pub use crate::grammar::Grammar;
pub use crate::options::{AllowReserved, EcmaVersion, Options, SourceType};
pub use crate::parser::Parser;
pub use crate::position::{LineMap, Position, SourceLocation};
pub use crate::token::{Comment, Token, TokenType, TokenValue};

use crate::lexer::Lexer;

/// Parses a complete program.
pub fn parse(source: &str, options: Options) -> Result<Program, SyntaxError> {
    Parser::new(source, options)?.parse()
}

/// Parses a program against an extended grammar.
pub fn parse_with_grammar(
    source: &str,
    options: Options,
    grammar: Rc<Grammar>,
) -> Result<Program, SyntaxError> {
    Parser::with_grammar(source, options, grammar)?.parse()
}

/// Parses a single expression starting at `offset` into `source`,
/// ignoring whatever follows it. Useful for evaluating fragments
/// embedded in a larger document.
pub fn parse_expression_at(
    source: &str,
    offset: usize,
    options: Options,
) -> Result<Expression, SyntaxError> {
    Parser::expression_at(source, options, offset, Rc::new(Grammar::base()))
}

/// Returns an iterator over the tokens of `source`, ending with a
/// final end-of-file token. Lexical errors surface as `Err` items,
/// after which the iterator is exhausted.
pub fn tokenize(source: &str, options: Options) -> Result<Tokenizer<'_>, SyntaxError> {
    let Some(ecma) = options.ecma_version else {
        return Err(SyntaxError::new("ecmaVersion must be specified", 0));
    };
    let module = options.source_type == SourceType::Module;
    let mut lexer = Lexer::new(
        source,
        ecma,
        module,
        options.locations,
        options.source_file.clone(),
    );
    if options.hash_bang_allowed() {
        lexer.skip_hash_bang();
    }
    Ok(Tokenizer { lexer, done: false })
}

/// Token iterator returned by [`tokenize`].
pub struct Tokenizer<'a> {
    lexer: Lexer<'a>,
    done: bool,
}

impl Iterator for Tokenizer<'_> {
    type Item = Result<Token, SyntaxError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.lexer.next_token() {
            Ok(token) => {
                if token.token_type == TokenType::Eof {
                    self.done = true;
                }
                Some(Ok(token))
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

impl std::iter::FusedIterator for Tokenizer<'_> {}
