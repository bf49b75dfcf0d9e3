//! Pluggable grammar rules.
//!
//! Every syntactic decision a plugin may want to change goes through a
//! rule slot on [`Grammar`]. A plugin is a function from a grammar to a
//! grammar; it clones the rule it wants to wrap, stores a replacement
//! that captures the clone, and calls through it for the base
//! behavior. Chained plugins compose the same way method overrides
//! with `super` calls do.
//!
//! ```
//! use std::rc::Rc;
//! use esparse::grammar::Grammar;
//!
//! let grammar = Grammar::base().extend(|mut g| {
//!     let inherited = Rc::clone(&g.expr_atom);
//!     g.expr_atom = Rc::new(move |g, p| {
//!         // ...handle a new atom form, or defer:
//!         inherited(g, p)
//!     });
//!     g
//! });
//! # let _ = grammar;
//! ```

use std::rc::Rc;

use crate::ast::{ClassElement, Expression, Pattern, Statement};
use crate::error::SyntaxError;
use crate::parser::Parser;
use crate::token::Token;

pub type TokenRule =
    Rc<dyn for<'s> Fn(&Grammar, &mut Parser<'s>) -> Result<Token, SyntaxError>>;
pub type StatementRule =
    Rc<dyn for<'s> Fn(&Grammar, &mut Parser<'s>) -> Result<Statement, SyntaxError>>;
pub type ExprAtomRule =
    Rc<dyn for<'s> Fn(&Grammar, &mut Parser<'s>) -> Result<Expression, SyntaxError>>;
pub type SubscriptsRule = Rc<
    dyn for<'s> Fn(
        &Grammar,
        &mut Parser<'s>,
        Expression,
        usize,
        bool,
    ) -> Result<Expression, SyntaxError>,
>;
pub type PropertyKeyRule =
    Rc<dyn for<'s> Fn(&Grammar, &mut Parser<'s>) -> Result<(Expression, bool), SyntaxError>>;
pub type BindingAtomRule =
    Rc<dyn for<'s> Fn(&Grammar, &mut Parser<'s>) -> Result<Pattern, SyntaxError>>;
pub type ClassElementRule =
    Rc<dyn for<'s> Fn(&Grammar, &mut Parser<'s>) -> Result<Option<ClassElement>, SyntaxError>>;

/// The rule table the parser dispatches through.
pub struct Grammar {
    /// Produces the next token. Wrapping this observes or rewrites the
    /// raw token stream before the parser sees it.
    pub read_token: TokenRule,
    /// Parses one statement or declaration.
    pub statement: StatementRule,
    /// Parses a primary expression.
    pub expr_atom: ExprAtomRule,
    /// Applies member accesses, calls, and template tags to a base
    /// expression. Arguments: base, start offset, `no_calls` (inside a
    /// `new` callee).
    pub subscripts: SubscriptsRule,
    /// Parses a property name; returns the key and whether it was
    /// computed.
    pub property_key: PropertyKeyRule,
    /// Parses a binding pattern in declaration position.
    pub binding_atom: BindingAtomRule,
    /// Parses one class body element. `None` means a stray `;`.
    pub class_element: ClassElementRule,
}

impl Grammar {
    /// The unextended ECMAScript grammar.
    pub fn base() -> Self {
        Grammar {
            read_token: Rc::new(|_, p| p.read_token_default()),
            statement: Rc::new(|_, p| p.parse_statement_default()),
            expr_atom: Rc::new(|_, p| p.parse_expr_atom_default()),
            subscripts: Rc::new(|_, p, base, start, no_calls| {
                p.parse_subscripts_default(base, start, no_calls)
            }),
            property_key: Rc::new(|_, p| p.parse_property_key_default()),
            binding_atom: Rc::new(|_, p| p.parse_binding_atom_default()),
            class_element: Rc::new(|_, p| p.parse_class_element_default()),
        }
    }

    /// Applies a plugin, yielding the extended grammar.
    pub fn extend(self, plugin: impl FnOnce(Grammar) -> Grammar) -> Grammar {
        plugin(self)
    }
}

impl Default for Grammar {
    fn default() -> Self {
        Grammar::base()
    }
}
