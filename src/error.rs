//! Error types for the parser

use crate::position::Position;
use thiserror::Error;

/// The single error kind the parser produces.
///
/// Carries the triggering absolute byte offset and, when locations are
/// enabled, the derived line/column. Sub-kinds (unterminated literal,
/// unexpected token, reserved word misuse, version-gated feature, ...)
/// are distinguished only by message text.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("SyntaxError: {message}{}", format_loc(.loc, *.pos))]
pub struct SyntaxError {
    pub message: String,
    pub pos: usize,
    pub loc: Option<Position>,
}

fn format_loc(loc: &Option<Position>, pos: usize) -> String {
    match loc {
        Some(loc) => format!(" ({loc})"),
        None => format!(" at offset {pos}"),
    }
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, pos: usize) -> Self {
        SyntaxError {
            message: message.into(),
            pos,
            loc: None,
        }
    }

    pub fn with_loc(message: impl Into<String>, pos: usize, loc: Position) -> Self {
        SyntaxError {
            message: message.into(),
            pos,
            loc: Some(loc),
        }
    }
}
