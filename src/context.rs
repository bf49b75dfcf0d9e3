//! Lexical contexts
//!
//! The tokenizer keeps a stack of these to disambiguate what `{`, `(`,
//! `/` and backticks mean at the current point: a brace can open a
//! statement block or an object literal, a slash can be division or the
//! start of a regex, and inside a template the tokenizer must capture
//! raw chunks verbatim. The stack is never empty; a sentinel
//! statement-block context is always at the bottom.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokContext {
    /// `{` opening a statement block.
    BStat,
    /// `{` opening an object literal or other expression-position brace.
    BExpr,
    /// `${` opening a template substitution.
    BTmpl,
    /// `(` in statement head position (`if (...)`, `for (...)`, ...).
    PStat,
    /// `(` in expression position.
    PExpr,
    /// Inside a template literal, between backticks.
    QTmpl,
    /// `function` in statement position.
    FStat,
    /// `function` in expression position.
    FExpr,
    /// Generator function in expression position.
    FExprGen,
    /// Generator function in statement position.
    FGen,
}

impl TokContext {
    /// Contexts whose closing token leaves the tokenizer in a position
    /// where an expression just ended.
    pub const fn is_expr(self) -> bool {
        matches!(
            self,
            Self::BExpr | Self::PExpr | Self::QTmpl | Self::FExpr | Self::FExprGen
        )
    }

    /// Template contexts disable whitespace/comment skipping so raw
    /// chunks are captured verbatim.
    pub const fn preserve_space(self) -> bool {
        matches!(self, Self::QTmpl)
    }

    pub const fn is_generator(self) -> bool {
        matches!(self, Self::FExprGen | Self::FGen)
    }

    pub const fn is_function(self) -> bool {
        matches!(self, Self::FStat | Self::FExpr | Self::FExprGen | Self::FGen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags() {
        assert!(TokContext::BExpr.is_expr());
        assert!(!TokContext::BStat.is_expr());
        assert!(TokContext::QTmpl.preserve_space());
        assert!(TokContext::FGen.is_generator());
        assert!(TokContext::FGen.is_function());
        assert!(!TokContext::FExpr.is_generator());
    }
}
