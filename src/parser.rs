//! Recursive-descent parser
//!
//! Statements are parsed by dispatch on the current token type;
//! expressions by precedence climbing over the operator table in
//! [`crate::token`]. Ambiguous prefixes (`async (`, class element
//! modifiers) are resolved by checkpointing the lexer, probing one
//! interpretation, and rewinding when it does not pan out.
//!
//! All dispatch points that plugins may override go through the
//! [`Grammar`] rule table; the `*_default` methods are the built-in
//! ECMAScript rules.

use std::rc::Rc;

use bitflags::bitflags;

use crate::ast::*;
use crate::error::SyntaxError;
use crate::grammar::Grammar;
use crate::lexer::{is_id_start, skip_ws_and_comments, strict_directive, Lexer, LexerCheckpoint};
use crate::options::{AllowReserved, EcmaVersion, Options, SourceType};
use crate::position::SourceLocation;
use crate::token::{
    is_reserved_word, is_strict_bind_reserved, keyword_token, Token, TokenType, TokenValue,
};

const SHORTHAND_ASSIGN_MSG: &str =
    "Shorthand property assignments are valid only in destructuring patterns";

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct Flags: u8 {
        const IN_FUNCTION = 1 << 0;
        const IN_GENERATOR = 1 << 1;
        const IN_ASYNC = 1 << 2;
        /// Class field initializer or static block.
        const IN_CLASS_FIELD = 1 << 3;
        const SUPER_ALLOWED = 1 << 4;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LabelKind {
    Loop,
    Switch,
}

/// Entries with `name: None` are anonymous loop/switch markers used to
/// validate plain `break`/`continue`.
#[derive(Debug, Clone)]
struct Label {
    name: Option<String>,
    kind: Option<LabelKind>,
}

struct Checkpoint {
    lexer: LexerCheckpoint,
    current: Token,
    prev_end: usize,
    newline_before: bool,
    flags: Flags,
    in_allowed: bool,
    shorthand_assign_pos: Option<usize>,
    labels_len: usize,
    pending_tokens_len: usize,
}

pub struct Parser<'a> {
    lexer: Lexer<'a>,
    options: Options,
    grammar: Rc<Grammar>,
    ecma: EcmaVersion,
    current: Token,
    /// End offset of the previously consumed token.
    prev_end: usize,
    /// Whether a line terminator precedes the current token.
    newline_before: bool,
    flags: Flags,
    labels: Vec<Label>,
    /// `in` is an operator here; cleared while parsing `for` heads.
    in_allowed: bool,
    /// First `{x = 1}` shorthand position not yet legitimized by
    /// conversion to a destructuring pattern.
    shorthand_assign_pos: Option<usize>,
    /// Depth of checkpoint probes; observation hooks are held back
    /// while non-zero.
    speculating: u32,
    pending_tokens: Vec<Token>,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str, options: Options) -> Result<Self, SyntaxError> {
        Self::with_grammar(source, options, Rc::new(Grammar::base()))
    }

    pub fn with_grammar(
        source: &'a str,
        options: Options,
        grammar: Rc<Grammar>,
    ) -> Result<Self, SyntaxError> {
        let mut parser = Self::build(source, options, grammar)?;
        parser.next()?;
        Ok(parser)
    }

    fn build(
        source: &'a str,
        options: Options,
        grammar: Rc<Grammar>,
    ) -> Result<Self, SyntaxError> {
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
        lexer.set_collect_comments(options.on_comment.is_some());
        let strict = module || strict_directive(source, lexer.pos(), ecma);
        lexer.set_strict(strict);
        Ok(Parser {
            lexer,
            options,
            grammar,
            ecma,
            current: Token::eof(0),
            prev_end: 0,
            newline_before: false,
            flags: Flags::empty(),
            labels: Vec::new(),
            in_allowed: true,
            shorthand_assign_pos: None,
            speculating: 0,
            pending_tokens: Vec::new(),
        })
    }

    pub fn parse(mut self) -> Result<Program, SyntaxError> {
        let mut body = Vec::new();
        while !self.check(TokenType::Eof) {
            let stmt = self.statement()?;
            body.push(stmt);
        }
        self.adapt_directive_prologue(&mut body);
        let end = self.lexer.source().len();
        let span = self.span_at(0, end);
        self.flush_observations();
        Ok(Program {
            node_type: tag::Program,
            span,
            body,
            source_type: self.options.source_type,
        })
    }

    /// Parses a single expression starting at `offset`, leaving
    /// whatever follows it alone.
    pub(crate) fn expression_at(
        source: &'a str,
        options: Options,
        offset: usize,
        grammar: Rc<Grammar>,
    ) -> Result<Expression, SyntaxError> {
        let mut parser = Self::build(source, options, grammar)?;
        parser.lexer.seek(offset);
        parser.next()?;
        let expr = parser.parse_expression(false)?;
        parser.flush_observations();
        Ok(expr)
    }

    // ============ TOKEN PLUMBING ============

    fn next(&mut self) -> Result<(), SyntaxError> {
        self.prev_end = self.current.end;
        let g = Rc::clone(&self.grammar);
        let token = (g.read_token)(&g, self)?;
        self.newline_before = self.lexer.newline_before();
        self.current = token;
        if self.options.on_token.is_some() {
            self.pending_tokens.push(self.current.clone());
        }
        if self.speculating == 0 {
            self.flush_observations();
        }
        Ok(())
    }

    pub fn read_token_default(&mut self) -> Result<Token, SyntaxError> {
        self.lexer.next_token()
    }

    fn flush_observations(&mut self) {
        if self.options.on_comment.is_some() {
            let comments = self.lexer.take_comments();
            if let Some(hook) = self.options.on_comment.as_mut() {
                for comment in &comments {
                    hook(comment);
                }
            }
        }
        if self.options.on_token.is_some() {
            let tokens = std::mem::take(&mut self.pending_tokens);
            if let Some(hook) = self.options.on_token.as_mut() {
                for token in &tokens {
                    hook(token);
                }
            }
        }
    }

    fn check(&self, token_type: TokenType) -> bool {
        self.current.token_type == token_type
    }

    fn eat(&mut self, token_type: TokenType) -> Result<bool, SyntaxError> {
        if self.check(token_type) {
            self.next()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn expect(&mut self, token_type: TokenType) -> Result<(), SyntaxError> {
        if !self.eat(token_type)? {
            return self.unexpected();
        }
        Ok(())
    }

    fn eat_contextual(&mut self, name: &str) -> Result<bool, SyntaxError> {
        if self.current.is_contextual(name) {
            self.next()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn expect_contextual(&mut self, name: &str) -> Result<(), SyntaxError> {
        if !self.eat_contextual(name)? {
            return self.unexpected();
        }
        Ok(())
    }

    fn raise<T>(&mut self, pos: usize, message: impl Into<String>) -> Result<T, SyntaxError> {
        let loc = self.lexer.position_at(pos);
        Err(SyntaxError::with_loc(message, pos, loc))
    }

    fn unexpected<T>(&mut self) -> Result<T, SyntaxError> {
        let pos = self.current.start;
        let what = match self.current.token_type {
            TokenType::Eof => "Unexpected end of input".to_string(),
            _ => "Unexpected token".to_string(),
        };
        self.raise(pos, what)
    }

    fn can_insert_semicolon(&self) -> bool {
        matches!(self.current.token_type, TokenType::Eof | TokenType::BraceR)
            || self.newline_before
    }

    fn insert_semicolon(&mut self) -> bool {
        if !self.can_insert_semicolon() {
            return false;
        }
        if self.speculating == 0 {
            let pos = self.prev_end;
            let loc = if self.options.locations {
                Some(self.lexer.position_at(pos))
            } else {
                None
            };
            if let Some(hook) = self.options.on_inserted_semicolon.as_mut() {
                hook(pos, loc);
            }
        }
        true
    }

    fn semicolon(&mut self) -> Result<(), SyntaxError> {
        if self.eat(TokenType::Semi)? {
            return Ok(());
        }
        if self.insert_semicolon() {
            return Ok(());
        }
        self.unexpected()
    }

    fn note_trailing_comma(&mut self, comma_pos: usize) {
        if self.speculating > 0 {
            return;
        }
        let loc = if self.options.locations {
            Some(self.lexer.position_at(comma_pos))
        } else {
            None
        };
        if let Some(hook) = self.options.on_trailing_comma.as_mut() {
            hook(comma_pos, loc);
        }
    }

    fn span_at(&mut self, start: usize, end: usize) -> Span {
        let loc = if self.options.locations {
            Some(SourceLocation {
                source: self.options.source_file.clone(),
                start: self.lexer.position_at(start),
                end: self.lexer.position_at(end),
            })
        } else {
            None
        };
        Span {
            start,
            end,
            loc,
            range: self.options.ranges.then_some([start, end]),
            source_file: self.options.direct_source_file.clone(),
        }
    }

    fn span_from(&mut self, start: usize) -> Span {
        let end = self.prev_end;
        self.span_at(start, end)
    }

    // ============ CHECKPOINTS ============

    fn save_checkpoint(&self) -> Checkpoint {
        Checkpoint {
            lexer: self.lexer.checkpoint(),
            current: self.current.clone(),
            prev_end: self.prev_end,
            newline_before: self.newline_before,
            flags: self.flags,
            in_allowed: self.in_allowed,
            shorthand_assign_pos: self.shorthand_assign_pos,
            labels_len: self.labels.len(),
            pending_tokens_len: self.pending_tokens.len(),
        }
    }

    fn restore_checkpoint(&mut self, cp: Checkpoint) {
        self.lexer.restore(cp.lexer);
        self.current = cp.current;
        self.prev_end = cp.prev_end;
        self.newline_before = cp.newline_before;
        self.flags = cp.flags;
        self.in_allowed = cp.in_allowed;
        self.shorthand_assign_pos = cp.shorthand_assign_pos;
        self.labels.truncate(cp.labels_len);
        self.pending_tokens.truncate(cp.pending_tokens_len);
    }

    /// Runs `f` against a checkpoint. `Ok(None)` rewinds every effect;
    /// `Ok(Some)` commits; errors propagate without rewinding.
    fn speculate<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<Option<T>, SyntaxError>,
    ) -> Result<Option<T>, SyntaxError> {
        let cp = self.save_checkpoint();
        self.speculating += 1;
        let result = f(self);
        self.speculating -= 1;
        match result {
            Ok(Some(value)) => {
                if self.speculating == 0 {
                    self.flush_observations();
                }
                Ok(Some(value))
            }
            Ok(None) => {
                self.restore_checkpoint(cp);
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    /// Consumes a contextual modifier (`static`, `async`, `get`, ...)
    /// only when what follows shows it really is a modifier and not an
    /// element of that name.
    fn try_eat_modifier(
        &mut self,
        name: &str,
        no_newline_after: bool,
        extra_stop: &[TokenType],
    ) -> Result<bool, SyntaxError> {
        if !self.current.is_contextual(name) {
            return Ok(false);
        }
        let committed = self.speculate(|p| {
            p.next()?;
            let stop = matches!(
                p.current.token_type,
                TokenType::ParenL | TokenType::Eq | TokenType::Semi | TokenType::BraceR
            ) || extra_stop.contains(&p.current.token_type)
                || (no_newline_after && p.newline_before);
            Ok(if stop { None } else { Some(()) })
        })?;
        Ok(committed.is_some())
    }

    // ============ SCOPE FLAGS ============

    fn enter_function(
        &mut self,
        generator: bool,
        is_async: bool,
        method: bool,
        arrow: bool,
    ) -> (Flags, Vec<Label>) {
        let saved = (self.flags, std::mem::take(&mut self.labels));
        let mut flags = Flags::IN_FUNCTION;
        flags.set(Flags::IN_GENERATOR, generator);
        flags.set(Flags::IN_ASYNC, is_async);
        flags.set(Flags::SUPER_ALLOWED, method);
        if arrow {
            // Arrows inherit `this`-adjacent facilities.
            flags |= saved.0 & (Flags::SUPER_ALLOWED | Flags::IN_CLASS_FIELD);
            self.labels = saved.1.clone();
        }
        self.flags = flags;
        saved
    }

    fn exit_function(&mut self, saved: (Flags, Vec<Label>)) {
        self.flags = saved.0;
        self.labels = saved.1;
    }

    fn await_allowed(&self) -> bool {
        if self.ecma < EcmaVersion::Es2017 {
            return false;
        }
        if self.flags.contains(Flags::IN_ASYNC) {
            return true;
        }
        if self
            .flags
            .intersects(Flags::IN_FUNCTION | Flags::IN_CLASS_FIELD)
        {
            return false;
        }
        self.options.allow_await_outside_function
            || (self.options.source_type == SourceType::Module && self.ecma >= EcmaVersion::Es2022)
    }

    fn reserved_ok(&self) -> bool {
        match self.options.allow_reserved {
            AllowReserved::Yes => true,
            AllowReserved::Never => false,
            AllowReserved::Auto => self.ecma < EcmaVersion::Es5,
        }
    }

    // ============ DISPATCH ============

    fn statement(&mut self) -> Result<Statement, SyntaxError> {
        let g = Rc::clone(&self.grammar);
        (g.statement)(&g, self)
    }

    fn expr_atom(&mut self) -> Result<Expression, SyntaxError> {
        let g = Rc::clone(&self.grammar);
        (g.expr_atom)(&g, self)
    }

    fn subscripts(
        &mut self,
        base: Expression,
        start: usize,
        no_calls: bool,
    ) -> Result<Expression, SyntaxError> {
        let g = Rc::clone(&self.grammar);
        (g.subscripts)(&g, self, base, start, no_calls)
    }

    fn property_key(&mut self) -> Result<(Expression, bool), SyntaxError> {
        let g = Rc::clone(&self.grammar);
        (g.property_key)(&g, self)
    }

    fn binding_atom(&mut self) -> Result<Pattern, SyntaxError> {
        let g = Rc::clone(&self.grammar);
        (g.binding_atom)(&g, self)
    }

    fn class_element(&mut self) -> Result<Option<ClassElement>, SyntaxError> {
        let g = Rc::clone(&self.grammar);
        (g.class_element)(&g, self)
    }

    // ============ STATEMENTS ============

    pub fn parse_statement_default(&mut self) -> Result<Statement, SyntaxError> {
        use TokenType::*;
        match self.current.token_type {
            Break | Continue => self.parse_break_continue(),
            Debugger => self.parse_debugger(),
            Do => self.parse_do_while(),
            For => self.parse_for(),
            Function => {
                let start = self.current.start;
                let f = self.parse_function(start, true, false, false)?;
                Ok(Statement::FunctionDeclaration(f))
            }
            Class => Ok(Statement::ClassDeclaration(self.parse_class_node(true, false)?)),
            If => self.parse_if(),
            Return => self.parse_return(),
            Switch => self.parse_switch(),
            Throw => self.parse_throw(),
            Try => self.parse_try(),
            Var => self.parse_var_statement(VarKind::Var),
            Const => self.parse_var_statement(VarKind::Const),
            While => self.parse_while(),
            With => self.parse_with(),
            BraceL => Ok(Statement::BlockStatement(self.parse_block()?)),
            Semi => {
                let start = self.current.start;
                self.next()?;
                Ok(Statement::EmptyStatement(EmptyStatement {
                    node_type: tag::EmptyStatement,
                    span: self.span_from(start),
                }))
            }
            Import => {
                let (after, _) = skip_ws_and_comments(self.lexer.source(), self.current.end);
                let next_ch = self.lexer.source().get(after..).and_then(|s| s.chars().next());
                if matches!(next_ch, Some('(' | '.')) {
                    self.parse_expression_statement()
                } else {
                    self.parse_import_declaration()
                }
            }
            Export => self.parse_export_declaration(),
            Eof => self.unexpected(),
            _ => {
                if self.is_let_declaration() {
                    return self.parse_var_statement(VarKind::Let);
                }
                if self.is_async_function_statement() {
                    let start = self.current.start;
                    self.next()?;
                    let f = self.parse_function(start, true, true, false)?;
                    return Ok(Statement::FunctionDeclaration(f));
                }
                self.parse_expression_statement()
            }
        }
    }

    /// Body of `if`/`else`/loops/`with`/labels; declarations are not
    /// statements there. Annex B admits a plain function declaration
    /// after `if`/`else` and labels in sloppy mode.
    fn parse_single_statement(&mut self, sloppy_function_ok: bool) -> Result<Statement, SyntaxError> {
        let start = self.current.start;
        let stmt = self.statement()?;
        let bad = match &stmt {
            Statement::ClassDeclaration(_)
            | Statement::ImportDeclaration(_)
            | Statement::ExportNamedDeclaration(_)
            | Statement::ExportDefaultDeclaration(_)
            | Statement::ExportAllDeclaration(_) => true,
            Statement::VariableDeclaration(d) => d.kind != VarKind::Var,
            Statement::FunctionDeclaration(f) => {
                self.lexer.strict() || f.generator || f.is_async || !sloppy_function_ok
            }
            _ => false,
        };
        if bad {
            return self.raise(start, "Unexpected declaration in single-statement context");
        }
        Ok(stmt)
    }

    fn is_let_declaration(&self) -> bool {
        if self.ecma < EcmaVersion::Es2015 || !self.current.is_contextual("let") {
            return false;
        }
        let source = self.lexer.source();
        let (after, _) = skip_ws_and_comments(source, self.current.end);
        match source.get(after..).and_then(|s| s.chars().next()) {
            Some('[' | '{' | '\\') => true,
            Some(c) if is_id_start(c) => {
                let word = ident_at(source, after).unwrap_or_default();
                word != "in" && word != "instanceof"
            }
            _ => false,
        }
    }

    fn is_async_function_statement(&self) -> bool {
        if self.ecma < EcmaVersion::Es2017 || !self.current.is_contextual("async") {
            return false;
        }
        let source = self.lexer.source();
        let (after, saw_newline) = skip_ws_and_comments(source, self.current.end);
        !saw_newline && ident_at(source, after) == Some("function")
    }

    fn parse_expression_statement(&mut self) -> Result<Statement, SyntaxError> {
        let start = self.current.start;
        let expr = self.parse_expression(false)?;
        if let Expression::Identifier(id) = &expr {
            if self.check(TokenType::Colon) && id.span.start == start {
                let name = id.name.clone();
                return self.parse_labeled_statement(start, name);
            }
        }
        self.semicolon()?;
        Ok(Statement::ExpressionStatement(ExpressionStatement {
            node_type: tag::ExpressionStatement,
            span: self.span_from(start),
            expression: Box::new(expr),
            directive: None,
        }))
    }

    fn parse_labeled_statement(&mut self, start: usize, name: String) -> Result<Statement, SyntaxError> {
        let label_span = self.span_at(start, self.prev_end);
        self.next()?; // `:`
        if self.labels.iter().any(|l| l.name.as_deref() == Some(&name)) {
            return self.raise(start, format!("Label '{name}' is already declared"));
        }
        let kind = if self.current.token_type.is_loop() {
            Some(LabelKind::Loop)
        } else if self.check(TokenType::Switch) {
            Some(LabelKind::Switch)
        } else {
            None
        };
        self.labels.push(Label {
            name: Some(name.clone()),
            kind,
        });
        let body = self.parse_single_statement(true)?;
        self.labels.pop();
        Ok(Statement::LabeledStatement(LabeledStatement {
            node_type: tag::LabeledStatement,
            span: self.span_from(start),
            label: Identifier {
                node_type: tag::Identifier,
                span: label_span,
                name,
            },
            body: Box::new(body),
        }))
    }

    fn parse_break_continue(&mut self) -> Result<Statement, SyntaxError> {
        let start = self.current.start;
        let is_break = self.check(TokenType::Break);
        self.next()?;
        let label = if self.check(TokenType::Name) && !self.can_insert_semicolon() {
            Some(self.parse_ident()?)
        } else {
            None
        };
        self.semicolon()?;
        let valid = match &label {
            Some(id) => self
                .labels
                .iter()
                .rev()
                .find(|l| l.name.as_deref() == Some(id.name.as_str()))
                .is_some_and(|l| is_break || l.kind == Some(LabelKind::Loop)),
            None => self.labels.iter().any(|l| match l.kind {
                Some(LabelKind::Loop) => true,
                Some(LabelKind::Switch) => is_break,
                None => false,
            }),
        };
        if !valid {
            let what = if is_break { "break" } else { "continue" };
            return self.raise(start, format!("Unsyntactic {what}"));
        }
        let span = self.span_from(start);
        Ok(if is_break {
            Statement::BreakStatement(BreakStatement {
                node_type: tag::BreakStatement,
                span,
                label,
            })
        } else {
            Statement::ContinueStatement(ContinueStatement {
                node_type: tag::ContinueStatement,
                span,
                label,
            })
        })
    }

    fn parse_debugger(&mut self) -> Result<Statement, SyntaxError> {
        let start = self.current.start;
        self.next()?;
        self.semicolon()?;
        Ok(Statement::DebuggerStatement(DebuggerStatement {
            node_type: tag::DebuggerStatement,
            span: self.span_from(start),
        }))
    }

    fn parse_paren_expression(&mut self) -> Result<Expression, SyntaxError> {
        self.expect(TokenType::ParenL)?;
        let expr = self.parse_expression(false)?;
        self.expect(TokenType::ParenR)?;
        Ok(expr)
    }

    fn parse_if(&mut self) -> Result<Statement, SyntaxError> {
        let start = self.current.start;
        self.next()?;
        let test = self.parse_paren_expression()?;
        let consequent = self.parse_single_statement(true)?;
        let alternate = if self.eat(TokenType::Else)? {
            Some(Box::new(self.parse_single_statement(true)?))
        } else {
            None
        };
        Ok(Statement::IfStatement(IfStatement {
            node_type: tag::IfStatement,
            span: self.span_from(start),
            test: Box::new(test),
            consequent: Box::new(consequent),
            alternate,
        }))
    }

    fn parse_return(&mut self) -> Result<Statement, SyntaxError> {
        let start = self.current.start;
        if !self.flags.contains(Flags::IN_FUNCTION)
            && !self.options.allow_return_outside_function
        {
            return self.raise(start, "'return' outside of function");
        }
        self.next()?;
        let argument = if self.eat(TokenType::Semi)? {
            None
        } else if self.insert_semicolon() {
            None
        } else {
            let arg = self.parse_expression(false)?;
            self.semicolon()?;
            Some(Box::new(arg))
        };
        Ok(Statement::ReturnStatement(ReturnStatement {
            node_type: tag::ReturnStatement,
            span: self.span_from(start),
            argument,
        }))
    }

    fn parse_switch(&mut self) -> Result<Statement, SyntaxError> {
        let start = self.current.start;
        self.next()?;
        let discriminant = self.parse_paren_expression()?;
        self.expect(TokenType::BraceL)?;
        self.labels.push(Label {
            name: None,
            kind: Some(LabelKind::Switch),
        });
        let mut cases = Vec::new();
        let mut saw_default = false;
        while !self.check(TokenType::BraceR) {
            if self.check(TokenType::Eof) {
                return self.unexpected();
            }
            let case_start = self.current.start;
            let test = if self.eat(TokenType::Case)? {
                Some(Box::new(self.parse_expression(false)?))
            } else {
                let default_start = self.current.start;
                self.expect(TokenType::Default)?;
                if saw_default {
                    return self.raise(default_start, "Multiple default clauses");
                }
                saw_default = true;
                None
            };
            self.expect(TokenType::Colon)?;
            let mut consequent = Vec::new();
            while !matches!(
                self.current.token_type,
                TokenType::Case | TokenType::Default | TokenType::BraceR | TokenType::Eof
            ) {
                consequent.push(self.statement()?);
            }
            cases.push(SwitchCase {
                node_type: tag::SwitchCase,
                span: self.span_from(case_start),
                test,
                consequent,
            });
        }
        self.labels.pop();
        self.next()?; // `}`
        Ok(Statement::SwitchStatement(SwitchStatement {
            node_type: tag::SwitchStatement,
            span: self.span_from(start),
            discriminant: Box::new(discriminant),
            cases,
        }))
    }

    fn parse_throw(&mut self) -> Result<Statement, SyntaxError> {
        let start = self.current.start;
        self.next()?;
        if self.newline_before {
            return self.raise(start, "Illegal newline after throw");
        }
        let argument = self.parse_expression(false)?;
        self.semicolon()?;
        Ok(Statement::ThrowStatement(ThrowStatement {
            node_type: tag::ThrowStatement,
            span: self.span_from(start),
            argument: Box::new(argument),
        }))
    }

    fn parse_try(&mut self) -> Result<Statement, SyntaxError> {
        let start = self.current.start;
        self.next()?;
        let block = self.parse_block()?;
        let handler = if self.check(TokenType::Catch) {
            let catch_start = self.current.start;
            self.next()?;
            let param = if self.eat(TokenType::ParenL)? {
                let pat = self.binding_atom()?;
                self.expect(TokenType::ParenR)?;
                Some(pat)
            } else {
                if self.ecma < EcmaVersion::Es2019 {
                    return self.unexpected();
                }
                None
            };
            let body = self.parse_block()?;
            Some(CatchClause {
                node_type: tag::CatchClause,
                span: self.span_from(catch_start),
                param,
                body,
            })
        } else {
            None
        };
        let finalizer = if self.eat(TokenType::Finally)? {
            Some(self.parse_block()?)
        } else {
            None
        };
        if handler.is_none() && finalizer.is_none() {
            return self.raise(start, "Missing catch or finally clause");
        }
        Ok(Statement::TryStatement(TryStatement {
            node_type: tag::TryStatement,
            span: self.span_from(start),
            block,
            handler,
            finalizer,
        }))
    }

    fn parse_while(&mut self) -> Result<Statement, SyntaxError> {
        let start = self.current.start;
        self.next()?;
        let test = self.parse_paren_expression()?;
        self.labels.push(Label {
            name: None,
            kind: Some(LabelKind::Loop),
        });
        let body = self.parse_single_statement(false)?;
        self.labels.pop();
        Ok(Statement::WhileStatement(WhileStatement {
            node_type: tag::WhileStatement,
            span: self.span_from(start),
            test: Box::new(test),
            body: Box::new(body),
        }))
    }

    fn parse_do_while(&mut self) -> Result<Statement, SyntaxError> {
        let start = self.current.start;
        self.next()?;
        self.labels.push(Label {
            name: None,
            kind: Some(LabelKind::Loop),
        });
        let body = self.parse_single_statement(false)?;
        self.labels.pop();
        self.expect(TokenType::While)?;
        let test = self.parse_paren_expression()?;
        if self.ecma >= EcmaVersion::Es2015 {
            self.eat(TokenType::Semi)?;
        } else {
            self.semicolon()?;
        }
        Ok(Statement::DoWhileStatement(DoWhileStatement {
            node_type: tag::DoWhileStatement,
            span: self.span_from(start),
            body: Box::new(body),
            test: Box::new(test),
        }))
    }

    fn parse_with(&mut self) -> Result<Statement, SyntaxError> {
        let start = self.current.start;
        if self.lexer.strict() {
            return self.raise(start, "'with' in strict mode");
        }
        self.next()?;
        let object = self.parse_paren_expression()?;
        let body = self.parse_single_statement(false)?;
        Ok(Statement::WithStatement(WithStatement {
            node_type: tag::WithStatement,
            span: self.span_from(start),
            object: Box::new(object),
            body: Box::new(body),
        }))
    }

    fn parse_block(&mut self) -> Result<BlockStatement, SyntaxError> {
        let start = self.current.start;
        self.expect(TokenType::BraceL)?;
        let mut body = Vec::new();
        while !self.check(TokenType::BraceR) {
            if self.check(TokenType::Eof) {
                return self.unexpected();
            }
            body.push(self.statement()?);
        }
        self.next()?; // `}`
        Ok(BlockStatement {
            node_type: tag::BlockStatement,
            span: self.span_from(start),
            body,
        })
    }

    fn adapt_directive_prologue(&self, body: &mut [Statement]) {
        for stmt in body.iter_mut() {
            let Statement::ExpressionStatement(es) = stmt else { break };
            let lead = self.lexer.slice(es.span.start, es.span.start + 1);
            if lead != "\"" && lead != "'" {
                break;
            }
            let Expression::Literal(lit) = es.expression.as_ref() else { break };
            if !matches!(lit.value, LiteralValue::Str(_)) {
                break;
            }
            let inner = lit
                .raw
                .get(1..lit.raw.len().saturating_sub(1))
                .unwrap_or_default()
                .to_string();
            es.directive = Some(inner);
        }
    }

    // ============ VARIABLE DECLARATIONS ============

    fn parse_var_statement(&mut self, kind: VarKind) -> Result<Statement, SyntaxError> {
        let start = self.current.start;
        self.next()?;
        let mut decl = self.parse_var_declarations(start, kind, false)?;
        self.semicolon()?;
        // Include the terminator the declarator list stopped short of.
        decl.span = self.span_from(start);
        Ok(Statement::VariableDeclaration(decl))
    }

    fn parse_var_declarations(
        &mut self,
        start: usize,
        kind: VarKind,
        for_head: bool,
    ) -> Result<VariableDeclaration, SyntaxError> {
        let mut declarations = Vec::new();
        loop {
            let d_start = self.current.start;
            let id = self.binding_atom()?;
            let init = if self.eat(TokenType::Eq)? {
                Some(Box::new(self.parse_maybe_assign(false)?))
            } else {
                let at_of_in = for_head
                    && (self.check(TokenType::In)
                        || (self.ecma >= EcmaVersion::Es2015 && self.current.is_contextual("of")));
                if kind == VarKind::Const && !at_of_in {
                    return self.unexpected();
                }
                if !matches!(id, Pattern::Identifier(_)) && !at_of_in {
                    return self.raise(
                        self.prev_end,
                        "Complex binding patterns require an initialization value",
                    );
                }
                None
            };
            declarations.push(VariableDeclarator {
                node_type: tag::VariableDeclarator,
                span: self.span_from(d_start),
                id,
                init,
            });
            if !self.eat(TokenType::Comma)? {
                break;
            }
        }
        Ok(VariableDeclaration {
            node_type: tag::VariableDeclaration,
            span: self.span_from(start),
            declarations,
            kind,
        })
    }

    // ============ FOR LOOPS ============

    fn parse_for(&mut self) -> Result<Statement, SyntaxError> {
        let start = self.current.start;
        self.next()?;
        self.labels.push(Label {
            name: None,
            kind: Some(LabelKind::Loop),
        });
        let is_await =
            self.ecma >= EcmaVersion::Es2018 && self.await_allowed() && self.eat_contextual("await")?;
        self.expect(TokenType::ParenL)?;
        if self.check(TokenType::Semi) {
            if is_await {
                return self.unexpected();
            }
            return self.parse_for_rest(start, None);
        }
        let is_let = self.is_let_declaration();
        if self.check(TokenType::Var) || self.check(TokenType::Const) || is_let {
            let kind = if self.check(TokenType::Var) {
                VarKind::Var
            } else if self.check(TokenType::Const) {
                VarKind::Const
            } else {
                VarKind::Let
            };
            let d_start = self.current.start;
            self.next()?;
            let saved_in = std::mem::replace(&mut self.in_allowed, false);
            let decl = self.parse_var_declarations(d_start, kind, true)?;
            self.in_allowed = saved_in;
            let at_of = self.ecma >= EcmaVersion::Es2015 && self.current.is_contextual("of");
            if (self.check(TokenType::In) || at_of) && decl.declarations.len() == 1 {
                if is_await && !at_of {
                    return self.unexpected();
                }
                if let Some(d) = decl.declarations.first() {
                    if d.init.is_some() {
                        let grandfathered = !at_of
                            && kind == VarKind::Var
                            && !self.lexer.strict()
                            && self.ecma < EcmaVersion::Es2018
                            && matches!(d.id, Pattern::Identifier(_));
                        if !grandfathered {
                            let what = if at_of { "for-of" } else { "for-in" };
                            return self.raise(
                                d.span.start,
                                format!("{what} loop variable declaration may not have an initializer"),
                            );
                        }
                    }
                }
                return self.parse_for_in_of(start, ForTarget::Declaration(decl), at_of, is_await);
            }
            if is_await {
                return self.unexpected();
            }
            return self.parse_for_rest(start, Some(ForInit::Declaration(decl)));
        }
        let saved_in = std::mem::replace(&mut self.in_allowed, false);
        let saved_sh = self.shorthand_assign_pos.take();
        let expr = self.parse_expression(true)?;
        self.in_allowed = saved_in;
        let at_of = self.ecma >= EcmaVersion::Es2015 && self.current.is_contextual("of");
        if self.check(TokenType::In) || at_of {
            if is_await && !at_of {
                return self.unexpected();
            }
            let pat = self.to_assignable(expr, false)?;
            self.shorthand_assign_pos = saved_sh;
            return self.parse_for_in_of(start, ForTarget::Pattern(pat), at_of, is_await);
        }
        if let Some(pos) = self.shorthand_assign_pos {
            return self.raise(pos, SHORTHAND_ASSIGN_MSG);
        }
        self.shorthand_assign_pos = saved_sh;
        if is_await {
            return self.unexpected();
        }
        self.parse_for_rest(start, Some(ForInit::Expression(Box::new(expr))))
    }

    fn parse_for_rest(
        &mut self,
        start: usize,
        init: Option<ForInit>,
    ) -> Result<Statement, SyntaxError> {
        self.expect(TokenType::Semi)?;
        let test = if self.check(TokenType::Semi) {
            None
        } else {
            Some(Box::new(self.parse_expression(false)?))
        };
        self.expect(TokenType::Semi)?;
        let update = if self.check(TokenType::ParenR) {
            None
        } else {
            Some(Box::new(self.parse_expression(false)?))
        };
        self.expect(TokenType::ParenR)?;
        let body = self.parse_single_statement(false)?;
        self.labels.pop();
        Ok(Statement::ForStatement(ForStatement {
            node_type: tag::ForStatement,
            span: self.span_from(start),
            init,
            test,
            update,
            body: Box::new(body),
        }))
    }

    fn parse_for_in_of(
        &mut self,
        start: usize,
        left: ForTarget,
        is_of: bool,
        is_await: bool,
    ) -> Result<Statement, SyntaxError> {
        self.next()?; // `in` / `of`
        let right = if is_of {
            self.parse_maybe_assign(false)?
        } else {
            self.parse_expression(false)?
        };
        self.expect(TokenType::ParenR)?;
        let body = self.parse_single_statement(false)?;
        self.labels.pop();
        let span = self.span_from(start);
        Ok(if is_of {
            Statement::ForOfStatement(ForOfStatement {
                node_type: tag::ForOfStatement,
                span,
                is_await,
                left,
                right: Box::new(right),
                body: Box::new(body),
            })
        } else {
            Statement::ForInStatement(ForInStatement {
                node_type: tag::ForInStatement,
                span,
                left,
                right: Box::new(right),
                body: Box::new(body),
            })
        })
    }

    // ============ FUNCTIONS ============

    fn parse_function(
        &mut self,
        start: usize,
        is_statement: bool,
        is_async: bool,
        id_optional: bool,
    ) -> Result<Function, SyntaxError> {
        self.expect(TokenType::Function)?;
        let star_ok = self.ecma >= EcmaVersion::Es2015
            && (!is_async || self.ecma >= EcmaVersion::Es2018);
        let generator = star_ok && self.eat(TokenType::Star)?;
        let id = if self.check(TokenType::Name) {
            Some(self.parse_binding_ident()?)
        } else if is_statement && !id_optional {
            return self.unexpected();
        } else {
            None
        };
        let saved = self.enter_function(generator, is_async, false, false);
        let params = self.parse_function_params()?;
        let body = self.parse_function_body_block(&params)?;
        self.exit_function(saved);
        Ok(Function {
            node_type: if is_statement {
                FunctionTag::FunctionDeclaration
            } else {
                FunctionTag::FunctionExpression
            },
            span: self.span_from(start),
            id,
            expression: false,
            generator,
            is_async,
            params,
            body: FunctionBody::Block(body),
        })
    }

    fn parse_function_params(&mut self) -> Result<Vec<Pattern>, SyntaxError> {
        self.expect(TokenType::ParenL)?;
        let mut params = Vec::new();
        let mut first = true;
        while !self.check(TokenType::ParenR) {
            if first {
                first = false;
            } else {
                let comma_pos = self.current.start;
                self.expect(TokenType::Comma)?;
                if self.check(TokenType::ParenR) {
                    if self.ecma < EcmaVersion::Es2017 {
                        return self.unexpected();
                    }
                    self.note_trailing_comma(comma_pos);
                    break;
                }
            }
            if self.check(TokenType::Ellipsis) {
                params.push(self.parse_rest_binding()?);
                if self.check(TokenType::Comma) {
                    return self.raise(
                        self.current.start,
                        "Comma is not permitted after the rest element",
                    );
                }
            } else {
                params.push(self.parse_maybe_default()?);
            }
        }
        self.expect(TokenType::ParenR)?;
        self.check_param_clashes(&params)?;
        Ok(params)
    }

    fn parse_rest_binding(&mut self) -> Result<Pattern, SyntaxError> {
        let start = self.current.start;
        self.next()?; // `...`
        let argument = self.binding_atom()?;
        if self.check(TokenType::Eq) {
            return self.raise(
                self.current.start,
                "Rest parameter may not have a default initializer",
            );
        }
        Ok(Pattern::RestElement(RestElement {
            node_type: tag::RestElement,
            span: self.span_from(start),
            argument: Box::new(argument),
        }))
    }

    fn check_param_clashes(&mut self, params: &[Pattern]) -> Result<(), SyntaxError> {
        let simple = params.iter().all(|p| matches!(p, Pattern::Identifier(_)));
        if !self.lexer.strict() && simple {
            // Sloppy simple parameter lists may repeat names.
            return Ok(());
        }
        let mut names = Vec::new();
        for p in params {
            collect_bound_names(p, &mut names);
        }
        for (i, name) in names.iter().enumerate() {
            if names.get(..i).is_some_and(|prior| prior.contains(name)) {
                let pos = self.prev_end;
                return self.raise(pos, "Argument name clash");
            }
        }
        Ok(())
    }

    fn parse_function_body_block(
        &mut self,
        params: &[Pattern],
    ) -> Result<BlockStatement, SyntaxError> {
        let outer_strict = self.lexer.strict();
        let body_strict = outer_strict
            || strict_directive(self.lexer.source(), self.current.end, self.ecma);
        if body_strict && !outer_strict {
            let simple = params.iter().all(|p| matches!(p, Pattern::Identifier(_)));
            if !simple {
                return self.raise(
                    self.current.start,
                    "Illegal 'use strict' directive in function with non-simple parameter list",
                );
            }
            for p in params {
                if let Pattern::Identifier(id) = p {
                    if is_strict_bind_reserved(&id.name)
                        || is_reserved_word(&id.name, self.ecma, true, self.options.source_type)
                    {
                        return self
                            .raise(id.span.start, format!("Binding {} in strict mode", id.name));
                    }
                }
            }
        }
        self.lexer.set_strict(body_strict);
        let mut block = self.parse_block()?;
        self.adapt_directive_prologue(&mut block.body);
        self.lexer.set_strict(outer_strict);
        Ok(block)
    }

    fn parse_arrow(
        &mut self,
        start: usize,
        params: Vec<Pattern>,
        is_async: bool,
    ) -> Result<Expression, SyntaxError> {
        self.expect(TokenType::Arrow)?;
        self.check_param_clashes(&params)?;
        let saved = self.enter_function(false, is_async, false, true);
        let saved_in = std::mem::replace(&mut self.in_allowed, true);
        let (body, expression) = if self.check(TokenType::BraceL) {
            (
                FunctionBody::Block(self.parse_function_body_block(&params)?),
                false,
            )
        } else {
            (
                FunctionBody::Expression(Box::new(self.parse_maybe_assign(false)?)),
                true,
            )
        };
        self.in_allowed = saved_in;
        self.exit_function(saved);
        Ok(Expression::ArrowFunctionExpression(Function {
            node_type: FunctionTag::ArrowFunctionExpression,
            span: self.span_from(start),
            id: None,
            expression,
            generator: false,
            is_async,
            params,
            body,
        }))
    }

    fn parse_method(&mut self, generator: bool, is_async: bool) -> Result<Function, SyntaxError> {
        let start = self.current.start;
        let saved = self.enter_function(generator, is_async, true, false);
        let params = self.parse_function_params()?;
        let body = self.parse_function_body_block(&params)?;
        self.exit_function(saved);
        Ok(Function {
            node_type: FunctionTag::FunctionExpression,
            span: self.span_from(start),
            id: None,
            expression: false,
            generator,
            is_async,
            params,
            body: FunctionBody::Block(body),
        })
    }

    // ============ CLASSES ============

    fn parse_class_node(
        &mut self,
        is_statement: bool,
        id_optional: bool,
    ) -> Result<Class, SyntaxError> {
        let start = self.current.start;
        self.next()?; // `class`
        let outer_strict = self.lexer.strict();
        self.lexer.set_strict(true);
        let id = if self.check(TokenType::Name) {
            Some(self.parse_binding_ident()?)
        } else if is_statement && !id_optional {
            return self.unexpected();
        } else {
            None
        };
        let super_class = if self.eat(TokenType::Extends)? {
            let s_start = self.current.start;
            let atom = self.expr_atom()?;
            Some(Box::new(self.subscripts(atom, s_start, false)?))
        } else {
            None
        };
        let body_start = self.current.start;
        self.expect(TokenType::BraceL)?;
        let mut elements = Vec::new();
        let mut ctor_seen = false;
        while !self.check(TokenType::BraceR) {
            if self.check(TokenType::Eof) {
                return self.unexpected();
            }
            if let Some(element) = self.class_element()? {
                if let ClassElement::Method(m) = &element {
                    if m.kind == MethodKind::Constructor {
                        if ctor_seen {
                            return self
                                .raise(m.span.start, "Duplicate constructor in the same class");
                        }
                        ctor_seen = true;
                    }
                }
                elements.push(element);
            }
        }
        self.next()?; // `}`
        let body_end = self.prev_end;
        let body = ClassBody {
            node_type: tag::ClassBody,
            span: self.span_at(body_start, body_end),
            body: elements,
        };
        self.lexer.set_strict(outer_strict);
        Ok(Class {
            node_type: if is_statement {
                ClassTag::ClassDeclaration
            } else {
                ClassTag::ClassExpression
            },
            span: self.span_from(start),
            id,
            super_class,
            body,
        })
    }

    pub fn parse_class_element_default(&mut self) -> Result<Option<ClassElement>, SyntaxError> {
        if self.eat(TokenType::Semi)? {
            return Ok(None);
        }
        let start = self.current.start;
        let is_static = self.try_eat_modifier("static", false, &[])?;
        if is_static && self.ecma >= EcmaVersion::Es2022 && self.check(TokenType::BraceL) {
            return Ok(Some(ClassElement::StaticBlock(
                self.parse_static_block(start)?,
            )));
        }
        let is_async = self.ecma >= EcmaVersion::Es2017
            && self.try_eat_modifier("async", true, &[])?;
        let star_ok = self.ecma >= EcmaVersion::Es2015
            && (!is_async || self.ecma >= EcmaVersion::Es2018);
        let generator = star_ok && self.eat(TokenType::Star)?;
        let mut kind = MethodKind::Method;
        if !is_async && !generator {
            if self.try_eat_modifier("get", false, &[])? {
                kind = MethodKind::Get;
            } else if self.try_eat_modifier("set", false, &[])? {
                kind = MethodKind::Set;
            }
        }
        let key_start = self.current.start;
        let (key, computed) = self.property_key()?;
        if self.check(TokenType::ParenL) {
            let is_ctor = !is_static && !computed && key_is_name(&key, "constructor");
            if is_ctor {
                if kind != MethodKind::Method {
                    return self.raise(key_start, "Constructor can't have get/set modifier");
                }
                if generator {
                    return self.raise(key_start, "Constructor can't be a generator");
                }
                if is_async {
                    return self.raise(key_start, "Constructor can't be an async method");
                }
                kind = MethodKind::Constructor;
            }
            if let Expression::PrivateIdentifier(p) = &key {
                if p.name == "constructor" {
                    return self.raise(key_start, "Classes can't have an element named '#constructor'");
                }
            }
            let value = self.parse_method(generator, is_async)?;
            self.check_accessor_params(kind, &value, key_start)?;
            return Ok(Some(ClassElement::Method(MethodDefinition {
                node_type: tag::MethodDefinition,
                span: self.span_from(start),
                is_static,
                computed,
                key: Box::new(key),
                kind,
                value: Box::new(Expression::FunctionExpression(value)),
            })));
        }
        if self.ecma < EcmaVersion::Es2022
            || is_async
            || generator
            || kind != MethodKind::Method
        {
            return self.unexpected();
        }
        // Field definition.
        if !computed && key_is_name(&key, "constructor") {
            return self.raise(key_start, "Classes can't have a field named 'constructor'");
        }
        if is_static && !computed && key_is_name(&key, "prototype") {
            return self.raise(key_start, "Classes can't have a static field named 'prototype'");
        }
        let value = if self.eat(TokenType::Eq)? {
            let saved_flags = self.flags;
            self.flags = Flags::IN_CLASS_FIELD | Flags::SUPER_ALLOWED;
            let v = self.parse_maybe_assign(false)?;
            self.flags = saved_flags;
            Some(Box::new(v))
        } else {
            None
        };
        self.semicolon()?;
        Ok(Some(ClassElement::Property(PropertyDefinition {
            node_type: tag::PropertyDefinition,
            span: self.span_from(start),
            is_static,
            computed,
            key: Box::new(key),
            value,
        })))
    }

    fn parse_static_block(&mut self, start: usize) -> Result<StaticBlock, SyntaxError> {
        let saved = (self.flags, std::mem::take(&mut self.labels));
        self.flags = Flags::IN_CLASS_FIELD | Flags::SUPER_ALLOWED;
        self.expect(TokenType::BraceL)?;
        let mut body = Vec::new();
        while !self.check(TokenType::BraceR) {
            if self.check(TokenType::Eof) {
                return self.unexpected();
            }
            body.push(self.statement()?);
        }
        self.next()?; // `}`
        self.flags = saved.0;
        self.labels = saved.1;
        Ok(StaticBlock {
            node_type: tag::StaticBlock,
            span: self.span_from(start),
            body,
        })
    }

    fn check_accessor_params(
        &mut self,
        kind: MethodKind,
        value: &Function,
        key_start: usize,
    ) -> Result<(), SyntaxError> {
        match kind {
            MethodKind::Get if !value.params.is_empty() => {
                self.raise(key_start, "getter should have no params")
            }
            MethodKind::Set if value.params.len() != 1 => {
                self.raise(key_start, "setter should have exactly one param")
            }
            MethodKind::Set
                if matches!(value.params.first(), Some(Pattern::RestElement(_))) =>
            {
                self.raise(key_start, "Setter cannot use rest params")
            }
            _ => Ok(()),
        }
    }

    // ============ MODULES ============

    fn check_module_position(&mut self, start: usize) -> Result<(), SyntaxError> {
        if self.options.allow_import_export_everywhere {
            return Ok(());
        }
        if self.options.source_type != SourceType::Module {
            return self.raise(
                start,
                "'import' and 'export' may appear only with 'sourceType: module'",
            );
        }
        if self.flags.contains(Flags::IN_FUNCTION) {
            return self.raise(start, "'import' and 'export' may only appear at the top level");
        }
        Ok(())
    }

    fn parse_import_declaration(&mut self) -> Result<Statement, SyntaxError> {
        let start = self.current.start;
        self.check_module_position(start)?;
        self.next()?;
        let mut specifiers = Vec::new();
        if !self.check(TokenType::String) {
            if self.check(TokenType::Name) {
                let s_start = self.current.start;
                let local = self.parse_binding_ident()?;
                specifiers.push(ImportSpecifierItem::Default(ImportDefaultSpecifier {
                    node_type: tag::ImportDefaultSpecifier,
                    span: self.span_from(s_start),
                    local,
                }));
                if self.eat(TokenType::Comma)? && !self.check(TokenType::Star)
                    && !self.check(TokenType::BraceL)
                {
                    return self.unexpected();
                }
            }
            if self.check(TokenType::Star) {
                let s_start = self.current.start;
                self.next()?;
                self.expect_contextual("as")?;
                let local = self.parse_binding_ident()?;
                specifiers.push(ImportSpecifierItem::Namespace(ImportNamespaceSpecifier {
                    node_type: tag::ImportNamespaceSpecifier,
                    span: self.span_from(s_start),
                    local,
                }));
            } else if self.check(TokenType::BraceL) {
                self.parse_named_import_specifiers(&mut specifiers)?;
            } else if specifiers.is_empty() {
                return self.unexpected();
            }
            self.expect_contextual("from")?;
        }
        let source = self.parse_string_literal()?;
        self.semicolon()?;
        Ok(Statement::ImportDeclaration(ImportDeclaration {
            node_type: tag::ImportDeclaration,
            span: self.span_from(start),
            specifiers,
            source,
        }))
    }

    fn parse_named_import_specifiers(
        &mut self,
        specifiers: &mut Vec<ImportSpecifierItem>,
    ) -> Result<(), SyntaxError> {
        self.next()?; // `{`
        let mut first = true;
        while !self.check(TokenType::BraceR) {
            if first {
                first = false;
            } else {
                let comma_pos = self.current.start;
                self.expect(TokenType::Comma)?;
                if self.check(TokenType::BraceR) {
                    self.note_trailing_comma(comma_pos);
                    break;
                }
            }
            let s_start = self.current.start;
            let imported = self.parse_module_export_name()?;
            let local = if self.eat_contextual("as")? {
                self.parse_binding_ident()?
            } else {
                match &imported {
                    ModuleExportName::Identifier(id) => {
                        let name = id.name.clone();
                        if keyword_token(&name, self.ecma).is_some()
                            || is_reserved_word(
                                &name,
                                self.ecma,
                                self.lexer.strict(),
                                self.options.source_type,
                            )
                        {
                            return self.raise(
                                id.span.start,
                                format!("The keyword '{name}' is reserved"),
                            );
                        }
                        id.clone()
                    }
                    ModuleExportName::Literal(lit) => {
                        return self.raise(
                            lit.span.start,
                            "String import names must have an 'as' alias",
                        );
                    }
                }
            };
            specifiers.push(ImportSpecifierItem::Named(ImportSpecifier {
                node_type: tag::ImportSpecifier,
                span: self.span_from(s_start),
                imported,
                local,
            }));
        }
        self.next()?; // `}`
        Ok(())
    }

    fn parse_export_declaration(&mut self) -> Result<Statement, SyntaxError> {
        let start = self.current.start;
        self.check_module_position(start)?;
        self.next()?;
        if self.eat(TokenType::Star)? {
            let exported = if self.ecma >= EcmaVersion::Es2020 && self.eat_contextual("as")? {
                Some(self.parse_module_export_name()?)
            } else {
                None
            };
            self.expect_contextual("from")?;
            let source = self.parse_string_literal()?;
            self.semicolon()?;
            return Ok(Statement::ExportAllDeclaration(ExportAllDeclaration {
                node_type: tag::ExportAllDeclaration,
                span: self.span_from(start),
                exported,
                source,
            }));
        }
        if self.eat(TokenType::Default)? {
            let declaration = if self.check(TokenType::Function) {
                let f_start = self.current.start;
                ExportDefaultKind::Function(self.parse_function(f_start, true, false, true)?)
            } else if self.is_async_function_statement() {
                let f_start = self.current.start;
                self.next()?;
                ExportDefaultKind::Function(self.parse_function(f_start, true, true, true)?)
            } else if self.check(TokenType::Class) {
                ExportDefaultKind::Class(self.parse_class_node(true, true)?)
            } else {
                let expr = self.parse_maybe_assign(false)?;
                self.semicolon()?;
                ExportDefaultKind::Expression(Box::new(expr))
            };
            return Ok(Statement::ExportDefaultDeclaration(ExportDefaultDeclaration {
                node_type: tag::ExportDefaultDeclaration,
                span: self.span_from(start),
                declaration,
            }));
        }
        let declares = matches!(
            self.current.token_type,
            TokenType::Var | TokenType::Const | TokenType::Function | TokenType::Class
        ) || self.is_let_declaration()
            || self.is_async_function_statement();
        if declares {
            let declaration = Some(Box::new(self.statement()?));
            return Ok(Statement::ExportNamedDeclaration(ExportNamedDeclaration {
                node_type: tag::ExportNamedDeclaration,
                span: self.span_from(start),
                declaration,
                specifiers: Vec::new(),
                source: None,
            }));
        }
        self.expect(TokenType::BraceL)?;
        let mut specifiers = Vec::new();
        let mut string_local: Option<usize> = None;
        let mut first = true;
        while !self.check(TokenType::BraceR) {
            if first {
                first = false;
            } else {
                let comma_pos = self.current.start;
                self.expect(TokenType::Comma)?;
                if self.check(TokenType::BraceR) {
                    self.note_trailing_comma(comma_pos);
                    break;
                }
            }
            let s_start = self.current.start;
            let local = self.parse_module_export_name()?;
            if let ModuleExportName::Literal(lit) = &local {
                string_local.get_or_insert(lit.span.start);
            }
            let exported = if self.eat_contextual("as")? {
                self.parse_module_export_name()?
            } else {
                local.clone()
            };
            specifiers.push(ExportSpecifier {
                node_type: tag::ExportSpecifier,
                span: self.span_from(s_start),
                local,
                exported,
            });
        }
        self.next()?; // `}`
        let source = if self.eat_contextual("from")? {
            Some(self.parse_string_literal()?)
        } else {
            if let Some(pos) = string_local {
                return self.raise(
                    pos,
                    "A string literal cannot be used as an exported binding without from",
                );
            }
            None
        };
        self.semicolon()?;
        Ok(Statement::ExportNamedDeclaration(ExportNamedDeclaration {
            node_type: tag::ExportNamedDeclaration,
            span: self.span_from(start),
            declaration: None,
            specifiers,
            source,
        }))
    }

    fn parse_module_export_name(&mut self) -> Result<ModuleExportName, SyntaxError> {
        if self.check(TokenType::String) {
            if self.ecma < EcmaVersion::Es2022 {
                return self.unexpected();
            }
            return Ok(ModuleExportName::Literal(self.parse_string_literal()?));
        }
        Ok(ModuleExportName::Identifier(self.parse_ident_name()?))
    }

    fn parse_string_literal(&mut self) -> Result<Literal, SyntaxError> {
        if !self.check(TokenType::String) {
            return self.unexpected();
        }
        let start = self.current.start;
        let value = match &self.current.value {
            TokenValue::Str(s) => s.clone(),
            _ => String::new(),
        };
        let raw = self.lexer.slice(start, self.current.end).to_string();
        self.next()?;
        Ok(Literal {
            node_type: tag::Literal,
            span: self.span_from(start),
            value: LiteralValue::Str(value),
            raw,
            regex: None,
            bigint: None,
        })
    }

    // ============ EXPRESSIONS ============

    pub(crate) fn parse_expression(&mut self, defer: bool) -> Result<Expression, SyntaxError> {
        let start = self.current.start;
        let first = self.parse_maybe_assign(defer)?;
        if !self.check(TokenType::Comma) {
            return Ok(first);
        }
        let mut expressions = vec![first];
        while self.eat(TokenType::Comma)? {
            expressions.push(self.parse_maybe_assign(defer)?);
        }
        Ok(Expression::SequenceExpression(SequenceExpression {
            node_type: tag::SequenceExpression,
            span: self.span_from(start),
            expressions,
        }))
    }

    fn parse_maybe_assign(&mut self, defer: bool) -> Result<Expression, SyntaxError> {
        if self.flags.contains(Flags::IN_GENERATOR) && self.current.is_contextual("yield") {
            return self.parse_yield();
        }
        let saved = if defer {
            None
        } else {
            Some(self.shorthand_assign_pos.take())
        };
        let start = self.current.start;
        let left = self.parse_maybe_conditional(defer)?;
        let result = if self.current.token_type.is_assign() {
            let op = self.current.value.punct().unwrap_or("=");
            let plain = self.check(TokenType::Eq);
            let left_pat = if plain {
                self.to_assignable(left, false)?
            } else {
                // Compound assignment demands a simple target.
                match left {
                    Expression::Identifier(id) => {
                        if self.lexer.strict() && is_strict_bind_reserved(&id.name) {
                            return self.raise(
                                id.span.start,
                                format!("Assigning to {} in strict mode", id.name),
                            );
                        }
                        Pattern::Identifier(id)
                    }
                    Expression::MemberExpression(m) => Pattern::Member(m),
                    other => {
                        let pos = other.span().start;
                        return self.raise(pos, "Assigning to rvalue");
                    }
                }
            };
            self.next()?;
            let right = self.parse_maybe_assign(false)?;
            Expression::AssignmentExpression(AssignmentExpression {
                node_type: tag::AssignmentExpression,
                span: self.span_from(start),
                operator: op,
                left: Box::new(left_pat),
                right: Box::new(right),
            })
        } else {
            left
        };
        if let Some(outer) = saved {
            if let Some(pos) = self.shorthand_assign_pos {
                return self.raise(pos, SHORTHAND_ASSIGN_MSG);
            }
            self.shorthand_assign_pos = outer;
        }
        Ok(result)
    }

    fn parse_maybe_conditional(&mut self, defer: bool) -> Result<Expression, SyntaxError> {
        let start = self.current.start;
        let expr = self.parse_expr_ops(defer)?;
        if !self.eat(TokenType::Question)? {
            return Ok(expr);
        }
        let saved_in = std::mem::replace(&mut self.in_allowed, true);
        let consequent = self.parse_maybe_assign(false)?;
        self.in_allowed = saved_in;
        self.expect(TokenType::Colon)?;
        let alternate = self.parse_maybe_assign(false)?;
        Ok(Expression::ConditionalExpression(ConditionalExpression {
            node_type: tag::ConditionalExpression,
            span: self.span_from(start),
            test: Box::new(expr),
            consequent: Box::new(consequent),
            alternate: Box::new(alternate),
        }))
    }

    fn parse_expr_ops(&mut self, defer: bool) -> Result<Expression, SyntaxError> {
        let start = self.current.start;
        let left = self.parse_maybe_unary(defer)?;
        self.parse_binary_rhs(left, start, 0)
    }

    fn parse_binary_rhs(
        &mut self,
        mut left: Expression,
        start: usize,
        min_prec: u8,
    ) -> Result<Expression, SyntaxError> {
        loop {
            let tt = self.current.token_type;
            let Some(prec) = tt.binop() else { break };
            if prec <= min_prec {
                break;
            }
            if tt == TokenType::In && !self.in_allowed {
                break;
            }
            let coalesce = tt == TokenType::Coalesce;
            let logical = coalesce
                || matches!(tt, TokenType::LogicalOr | TokenType::LogicalAnd);
            let operator = self.current.value.punct().unwrap_or(tt.label());
            self.next()?;
            let right_start = self.current.start;
            let right_min = if tt == TokenType::StarStar {
                prec - 1 // right-associative
            } else if coalesce {
                // Keep `||`/`&&` out of a `??` operand so the mixing
                // check below sees them.
                TokenType::LogicalAnd.binop().unwrap_or(prec)
            } else {
                prec
            };
            let unary = self.parse_maybe_unary(false)?;
            let right = self.parse_binary_rhs(unary, right_start, right_min)?;
            let span = self.span_from(start);
            left = if logical {
                Expression::LogicalExpression(LogicalExpression {
                    node_type: tag::LogicalExpression,
                    span,
                    left: Box::new(left),
                    operator,
                    right: Box::new(right),
                })
            } else {
                Expression::BinaryExpression(BinaryExpression {
                    node_type: tag::BinaryExpression,
                    span,
                    left: Box::new(left),
                    operator,
                    right: Box::new(right),
                })
            };
            let next = self.current.token_type;
            let mixed = (coalesce
                && matches!(next, TokenType::LogicalOr | TokenType::LogicalAnd))
                || (!coalesce && logical && next == TokenType::Coalesce);
            if mixed {
                return self.raise(
                    self.current.start,
                    "Logical expressions and coalesce expressions cannot be mixed. Wrap either by parentheses",
                );
            }
        }
        Ok(left)
    }

    fn parse_maybe_unary(&mut self, defer: bool) -> Result<Expression, SyntaxError> {
        if self.current.is_contextual("await") && self.await_allowed() {
            return self.parse_await();
        }
        let start = self.current.start;
        let tt = self.current.token_type;
        if tt.prefix() {
            let update = tt == TokenType::IncDec;
            let operator = self.current.value.punct().unwrap_or(tt.label());
            self.next()?;
            let argument = self.parse_maybe_unary(false)?;
            let span = self.span_from(start);
            if update {
                self.check_update_target(&argument)?;
                return Ok(Expression::UpdateExpression(UpdateExpression {
                    node_type: tag::UpdateExpression,
                    span,
                    operator,
                    prefix: true,
                    argument: Box::new(argument),
                }));
            }
            if operator == "delete" {
                if self.lexer.strict() && matches!(argument, Expression::Identifier(_)) {
                    return self.raise(start, "Deleting local variable in strict mode");
                }
                if let Expression::MemberExpression(m) = &argument {
                    if matches!(m.property.as_ref(), Expression::PrivateIdentifier(_)) {
                        return self.raise(start, "Private fields can not be deleted");
                    }
                }
            }
            let node = Expression::UnaryExpression(UnaryExpression {
                node_type: tag::UnaryExpression,
                span,
                operator,
                prefix: true,
                argument: Box::new(argument),
            });
            if self.check(TokenType::StarStar) {
                return self.raise(
                    start,
                    "Unary operator used immediately before exponentiation expression. Parenthesis must be used to disambiguate operator precedence",
                );
            }
            return Ok(node);
        }
        let mut expr = self.parse_expr_subscripts(defer)?;
        while self.check(TokenType::IncDec) && !self.can_insert_semicolon() {
            self.check_update_target(&expr)?;
            let operator = self.current.value.punct().unwrap_or("++");
            self.next()?;
            expr = Expression::UpdateExpression(UpdateExpression {
                node_type: tag::UpdateExpression,
                span: self.span_from(start),
                operator,
                prefix: false,
                argument: Box::new(expr),
            });
        }
        Ok(expr)
    }

    fn check_update_target(&mut self, target: &Expression) -> Result<(), SyntaxError> {
        match target {
            Expression::Identifier(id) => {
                if self.lexer.strict() && is_strict_bind_reserved(&id.name) {
                    return self.raise(
                        id.span.start,
                        format!("Assigning to {} in strict mode", id.name),
                    );
                }
                Ok(())
            }
            Expression::MemberExpression(_) => Ok(()),
            other => {
                let pos = other.span().start;
                self.raise(pos, "Assigning to rvalue")
            }
        }
    }

    fn parse_await(&mut self) -> Result<Expression, SyntaxError> {
        let start = self.current.start;
        self.next()?;
        let argument = self.parse_maybe_unary(false)?;
        Ok(Expression::AwaitExpression(AwaitExpression {
            node_type: tag::AwaitExpression,
            span: self.span_from(start),
            argument: Box::new(argument),
        }))
    }

    fn parse_yield(&mut self) -> Result<Expression, SyntaxError> {
        let start = self.current.start;
        self.next()?;
        let delegate = self.eat(TokenType::Star)?;
        let tt = self.current.token_type;
        let argument = if !delegate && (self.can_insert_semicolon() || !tt.starts_expr()) {
            None
        } else {
            Some(Box::new(self.parse_maybe_assign(false)?))
        };
        Ok(Expression::YieldExpression(YieldExpression {
            node_type: tag::YieldExpression,
            span: self.span_from(start),
            delegate,
            argument,
        }))
    }

    fn parse_expr_subscripts(&mut self, _defer: bool) -> Result<Expression, SyntaxError> {
        let start = self.current.start;
        let atom = self.expr_atom()?;
        self.subscripts(atom, start, false)
    }

    pub fn parse_subscripts_default(
        &mut self,
        mut base: Expression,
        start: usize,
        no_calls: bool,
    ) -> Result<Expression, SyntaxError> {
        if matches!(base, Expression::ArrowFunctionExpression(_)) {
            return Ok(base);
        }
        let mut optional_chained = false;
        loop {
            let optional = self.ecma >= EcmaVersion::Es2020 && self.check(TokenType::QuestionDot);
            if optional {
                if no_calls {
                    return self.raise(
                        self.current.start,
                        "Optional chaining cannot appear in the callee of new expressions",
                    );
                }
                self.next()?;
                optional_chained = true;
            }
            if optional && self.check(TokenType::ParenL) {
                let arguments = self.parse_call_args()?;
                base = Expression::CallExpression(CallExpression {
                    node_type: tag::CallExpression,
                    span: self.span_from(start),
                    callee: Box::new(base),
                    arguments,
                    optional: true,
                });
            } else if self.eat(TokenType::BracketL)? {
                let saved_in = std::mem::replace(&mut self.in_allowed, true);
                let property = self.parse_expression(false)?;
                self.in_allowed = saved_in;
                self.expect(TokenType::BracketR)?;
                base = Expression::MemberExpression(MemberExpression {
                    node_type: tag::MemberExpression,
                    span: self.span_from(start),
                    object: Box::new(base),
                    property: Box::new(property),
                    computed: true,
                    optional,
                });
            } else if optional || self.eat(TokenType::Dot)? {
                let property = self.parse_member_property()?;
                base = Expression::MemberExpression(MemberExpression {
                    node_type: tag::MemberExpression,
                    span: self.span_from(start),
                    object: Box::new(base),
                    property: Box::new(property),
                    computed: false,
                    optional,
                });
            } else if !no_calls && self.check(TokenType::ParenL) {
                let arguments = self.parse_call_args()?;
                base = Expression::CallExpression(CallExpression {
                    node_type: tag::CallExpression,
                    span: self.span_from(start),
                    callee: Box::new(base),
                    arguments,
                    optional: false,
                });
            } else if self.check(TokenType::BackQuote) {
                if optional_chained {
                    return self.raise(
                        self.current.start,
                        "Optional chaining cannot appear in the tag of tagged template expressions",
                    );
                }
                let quasi = self.parse_template(true)?;
                base = Expression::TaggedTemplateExpression(TaggedTemplateExpression {
                    node_type: tag::TaggedTemplateExpression,
                    span: self.span_from(start),
                    tag: Box::new(base),
                    quasi,
                });
            } else {
                break;
            }
        }
        if optional_chained {
            let span = base.span().clone();
            base = Expression::ChainExpression(ChainExpression {
                node_type: tag::ChainExpression,
                span,
                expression: Box::new(base),
            });
        }
        Ok(base)
    }

    fn parse_member_property(&mut self) -> Result<Expression, SyntaxError> {
        if self.check(TokenType::PrivateId) {
            return self.parse_private_ident().map(Expression::PrivateIdentifier);
        }
        Ok(Expression::Identifier(self.parse_ident_name()?))
    }

    fn parse_call_args(&mut self) -> Result<Vec<Expression>, SyntaxError> {
        self.next()?; // `(`
        let saved_in = std::mem::replace(&mut self.in_allowed, true);
        let mut args = Vec::new();
        let mut first = true;
        while !self.check(TokenType::ParenR) {
            if first {
                first = false;
            } else {
                let comma_pos = self.current.start;
                self.expect(TokenType::Comma)?;
                if self.check(TokenType::ParenR) {
                    if self.ecma < EcmaVersion::Es2017 {
                        return self.unexpected();
                    }
                    self.note_trailing_comma(comma_pos);
                    break;
                }
            }
            if self.check(TokenType::Ellipsis) {
                args.push(self.parse_spread()?);
            } else {
                args.push(self.parse_maybe_assign(true)?);
            }
        }
        self.expect(TokenType::ParenR)?;
        self.in_allowed = saved_in;
        Ok(args)
    }

    fn parse_spread(&mut self) -> Result<Expression, SyntaxError> {
        let start = self.current.start;
        self.next()?; // `...`
        let argument = self.parse_maybe_assign(true)?;
        Ok(Expression::SpreadElement(SpreadElement {
            node_type: tag::SpreadElement,
            span: self.span_from(start),
            argument: Box::new(argument),
        }))
    }

    // ============ ATOMS ============

    pub fn parse_expr_atom_default(&mut self) -> Result<Expression, SyntaxError> {
        use TokenType::*;
        match self.current.token_type {
            This => {
                let start = self.current.start;
                self.next()?;
                Ok(Expression::ThisExpression(ThisExpression {
                    node_type: tag::ThisExpression,
                    span: self.span_from(start),
                }))
            }
            Super => self.parse_super(),
            Name => self.parse_name_atom(),
            Num | String => self.parse_value_literal(),
            Regexp => self.parse_regexp_literal(),
            Null | True | False => self.parse_keyword_literal(),
            ParenL => self.parse_paren_default(),
            BracketL => self.parse_array_literal(),
            BraceL => self.parse_object_literal(),
            Function => {
                let start = self.current.start;
                Ok(Expression::FunctionExpression(
                    self.parse_function(start, false, false, false)?,
                ))
            }
            Class => Ok(Expression::ClassExpression(
                self.parse_class_node(false, false)?,
            )),
            New => self.parse_new(),
            BackQuote => Ok(Expression::TemplateLiteral(self.parse_template(false)?)),
            Import => self.parse_import_expression(),
            PrivateId => {
                if self.ecma < EcmaVersion::Es2022 {
                    return self.unexpected();
                }
                let id = self.parse_private_ident()?;
                if !self.check(TokenType::In) {
                    return self.unexpected();
                }
                Ok(Expression::PrivateIdentifier(id))
            }
            _ => self.unexpected(),
        }
    }

    fn parse_super(&mut self) -> Result<Expression, SyntaxError> {
        let start = self.current.start;
        if !self.flags.contains(Flags::SUPER_ALLOWED)
            && !self.options.allow_super_outside_method
        {
            return self.raise(start, "'super' keyword outside a method");
        }
        self.next()?;
        if !matches!(
            self.current.token_type,
            TokenType::Dot | TokenType::BracketL | TokenType::ParenL
        ) {
            return self.unexpected();
        }
        Ok(Expression::Super(Super {
            node_type: tag::Super,
            span: self.span_from(start),
        }))
    }

    fn parse_name_atom(&mut self) -> Result<Expression, SyntaxError> {
        let start = self.current.start;
        let name = self.current.value.name().unwrap_or_default().to_string();
        if name == "async" && self.ecma >= EcmaVersion::Es2017 {
            let source = self.lexer.source();
            let (after, saw_newline) = skip_ws_and_comments(source, self.current.end);
            if !saw_newline {
                if ident_at(source, after) == Some("function") {
                    self.next()?; // `async`
                    return Ok(Expression::FunctionExpression(
                        self.parse_function(start, false, true, false)?,
                    ));
                }
                let next_ch = source.get(after..).and_then(|s| s.chars().next());
                if next_ch == Some('(') {
                    if let Some(arrow) =
                        self.speculate(|p| p.try_async_arrow_paren(start))?
                    {
                        return Ok(arrow);
                    }
                } else if next_ch.is_some_and(is_id_start) {
                    if let Some(arrow) = self.speculate(|p| p.try_async_arrow_ident(start))? {
                        return Ok(arrow);
                    }
                }
            }
        }
        let id = self.parse_ident()?;
        if self.ecma >= EcmaVersion::Es2015
            && self.check(TokenType::Arrow)
            && !self.newline_before
        {
            return self.parse_arrow(start, vec![Pattern::Identifier(id)], false);
        }
        Ok(Expression::Identifier(id))
    }

    fn try_async_arrow_paren(&mut self, start: usize) -> Result<Option<Expression>, SyntaxError> {
        self.next()?; // `async`
        if !self.check(TokenType::ParenL) || self.newline_before {
            return Ok(None);
        }
        let list = match self.parse_paren_items() {
            Ok(list) => list,
            Err(_) => return Ok(None),
        };
        if !self.check(TokenType::Arrow) || self.newline_before {
            return Ok(None);
        }
        let mut params = Vec::with_capacity(list.items.len());
        for item in list.items {
            params.push(self.to_assignable(item, true)?);
        }
        Ok(Some(self.parse_arrow(start, params, true)?))
    }

    fn try_async_arrow_ident(&mut self, start: usize) -> Result<Option<Expression>, SyntaxError> {
        self.next()?; // `async`
        if !self.check(TokenType::Name) || self.newline_before {
            return Ok(None);
        }
        let param = match self.parse_binding_ident() {
            Ok(id) => id,
            Err(_) => return Ok(None),
        };
        if !self.check(TokenType::Arrow) || self.newline_before {
            return Ok(None);
        }
        Ok(Some(self.parse_arrow(
            start,
            vec![Pattern::Identifier(param)],
            true,
        )?))
    }

    fn parse_value_literal(&mut self) -> Result<Expression, SyntaxError> {
        let start = self.current.start;
        let raw = self.lexer.slice(start, self.current.end).to_string();
        let (value, bigint) = match &self.current.value {
            TokenValue::Num(n) => (LiteralValue::Num(*n), None),
            TokenValue::BigInt(digits) => (LiteralValue::Null, Some(digits.clone())),
            TokenValue::Str(s) => (LiteralValue::Str(s.clone()), None),
            _ => return self.unexpected(),
        };
        self.next()?;
        Ok(Expression::Literal(Literal {
            node_type: tag::Literal,
            span: self.span_from(start),
            value,
            raw,
            regex: None,
            bigint,
        }))
    }

    fn parse_regexp_literal(&mut self) -> Result<Expression, SyntaxError> {
        let start = self.current.start;
        let raw = self.lexer.slice(start, self.current.end).to_string();
        let (pattern, flags) = match &self.current.value {
            TokenValue::Regex { pattern, flags } => (pattern.clone(), flags.clone()),
            _ => return self.unexpected(),
        };
        self.next()?;
        Ok(Expression::Literal(Literal {
            node_type: tag::Literal,
            span: self.span_from(start),
            value: LiteralValue::Null,
            raw,
            regex: Some(RegexInfo { pattern, flags }),
            bigint: None,
        }))
    }

    fn parse_keyword_literal(&mut self) -> Result<Expression, SyntaxError> {
        let start = self.current.start;
        let raw = self.lexer.slice(start, self.current.end).to_string();
        let value = match self.current.token_type {
            TokenType::Null => LiteralValue::Null,
            TokenType::True => LiteralValue::Bool(true),
            _ => LiteralValue::Bool(false),
        };
        self.next()?;
        Ok(Expression::Literal(Literal {
            node_type: tag::Literal,
            span: self.span_from(start),
            value,
            raw,
            regex: None,
            bigint: None,
        }))
    }

    // ============ PARENTHESES & ARROWS ============

    fn parse_paren_items(&mut self) -> Result<ParenList, SyntaxError> {
        self.next()?; // `(`
        let saved_in = std::mem::replace(&mut self.in_allowed, true);
        let mut list = ParenList {
            items: Vec::new(),
            trailing_comma: None,
            spread_pos: None,
        };
        let mut first = true;
        while !self.check(TokenType::ParenR) {
            if first {
                first = false;
            } else {
                let comma_pos = self.current.start;
                self.expect(TokenType::Comma)?;
                if self.check(TokenType::ParenR) {
                    list.trailing_comma = Some(comma_pos);
                    break;
                }
            }
            if self.check(TokenType::Ellipsis) {
                list.spread_pos.get_or_insert(self.current.start);
                list.items.push(self.parse_spread()?);
            } else {
                list.items.push(self.parse_maybe_assign(true)?);
            }
        }
        self.expect(TokenType::ParenR)?;
        self.in_allowed = saved_in;
        Ok(list)
    }

    fn parse_paren_default(&mut self) -> Result<Expression, SyntaxError> {
        let start = self.current.start;
        let saved_sh = self.shorthand_assign_pos.take();
        let list = self.parse_paren_items()?;
        if self.ecma >= EcmaVersion::Es2015 && self.check(TokenType::Arrow) && !self.newline_before
        {
            let mut params = Vec::with_capacity(list.items.len());
            for item in list.items {
                params.push(self.to_assignable(item, true)?);
            }
            self.shorthand_assign_pos = saved_sh;
            return self.parse_arrow(start, params, false);
        }
        if let Some(pos) = self.shorthand_assign_pos {
            return self.raise(pos, SHORTHAND_ASSIGN_MSG);
        }
        self.shorthand_assign_pos = saved_sh;
        if let Some(pos) = list.spread_pos {
            return self.raise(pos, "Unexpected token");
        }
        if let Some(pos) = list.trailing_comma {
            return self.raise(pos, "Unexpected token");
        }
        let mut items = list.items;
        let expr = match items.len() {
            0 => return self.raise(start, "Unexpected token"),
            1 => items.swap_remove(0),
            _ => {
                let first_start = items.first().map(|e| e.span().start).unwrap_or(start);
                let last_end = items.last().map(|e| e.span().end).unwrap_or(start);
                Expression::SequenceExpression(SequenceExpression {
                    node_type: tag::SequenceExpression,
                    span: self.span_at(first_start, last_end),
                    expressions: items,
                })
            }
        };
        if self.options.preserve_parens {
            let span = self.span_from(start);
            return Ok(Expression::ParenthesizedExpression(ParenthesizedExpression {
                node_type: tag::ParenthesizedExpression,
                span,
                expression: Box::new(expr),
            }));
        }
        Ok(expr)
    }

    // ============ ARRAYS & OBJECTS ============

    fn parse_array_literal(&mut self) -> Result<Expression, SyntaxError> {
        let start = self.current.start;
        self.next()?; // `[`
        let mut elements = Vec::new();
        let mut first = true;
        while !self.check(TokenType::BracketR) {
            if first {
                first = false;
            } else {
                let comma_pos = self.current.start;
                self.expect(TokenType::Comma)?;
                if self.check(TokenType::BracketR) {
                    self.note_trailing_comma(comma_pos);
                    break;
                }
            }
            if self.check(TokenType::Comma) {
                elements.push(None); // elision
            } else if self.check(TokenType::Ellipsis) {
                if self.ecma < EcmaVersion::Es2015 {
                    return self.unexpected();
                }
                elements.push(Some(self.parse_spread()?));
            } else {
                elements.push(Some(self.parse_maybe_assign(true)?));
            }
        }
        self.next()?; // `]`
        Ok(Expression::ArrayExpression(ArrayExpression {
            node_type: tag::ArrayExpression,
            span: self.span_from(start),
            elements,
        }))
    }

    fn parse_object_literal(&mut self) -> Result<Expression, SyntaxError> {
        let start = self.current.start;
        self.next()?; // `{`
        let mut properties = Vec::new();
        let mut proto_seen = false;
        let mut first = true;
        while !self.check(TokenType::BraceR) {
            if first {
                first = false;
            } else {
                let comma_pos = self.current.start;
                self.expect(TokenType::Comma)?;
                if self.check(TokenType::BraceR) {
                    self.note_trailing_comma(comma_pos);
                    break;
                }
            }
            if self.check(TokenType::Ellipsis) {
                if self.ecma < EcmaVersion::Es2018 {
                    return self.unexpected();
                }
                let s_start = self.current.start;
                self.next()?;
                let argument = self.parse_maybe_assign(true)?;
                properties.push(ObjectMember::Spread(SpreadElement {
                    node_type: tag::SpreadElement,
                    span: self.span_from(s_start),
                    argument: Box::new(argument),
                }));
                continue;
            }
            let property = self.parse_property()?;
            if !property.computed
                && property.kind == PropertyKind::Init
                && !property.method
                && !property.shorthand
                && key_is_name(&property.key, "__proto__")
            {
                if proto_seen {
                    return self.raise(property.span.start, "Redefinition of __proto__ property");
                }
                proto_seen = true;
            }
            properties.push(ObjectMember::Property(property));
        }
        self.next()?; // `}`
        Ok(Expression::ObjectExpression(ObjectExpression {
            node_type: tag::ObjectExpression,
            span: self.span_from(start),
            properties,
        }))
    }

    fn parse_property(&mut self) -> Result<Property, SyntaxError> {
        let start = self.current.start;
        let is_async = self.ecma >= EcmaVersion::Es2017
            && self.try_eat_modifier("async", true, &[TokenType::Colon, TokenType::Comma])?;
        let star_ok = self.ecma >= EcmaVersion::Es2015
            && (!is_async || self.ecma >= EcmaVersion::Es2018);
        let generator = star_ok && self.eat(TokenType::Star)?;
        let mut kind = PropertyKind::Init;
        if !is_async && !generator && self.ecma >= EcmaVersion::Es5 {
            if self.try_eat_modifier("get", false, &[TokenType::Colon, TokenType::Comma])? {
                kind = PropertyKind::Get;
            } else if self.try_eat_modifier("set", false, &[TokenType::Colon, TokenType::Comma])? {
                kind = PropertyKind::Set;
            }
        }
        let key_start = self.current.start;
        let (key, computed) = self.property_key()?;
        if matches!(key, Expression::PrivateIdentifier(_)) {
            return self.raise(key_start, "Unexpected token");
        }
        if self.check(TokenType::ParenL) {
            if (generator || is_async) && self.ecma < EcmaVersion::Es2015 {
                return self.unexpected();
            }
            if kind == PropertyKind::Init && self.ecma < EcmaVersion::Es2015 {
                return self.unexpected();
            }
            let value = self.parse_method(generator, is_async)?;
            match kind {
                PropertyKind::Get if !value.params.is_empty() => {
                    return self.raise(key_start, "getter should have no params");
                }
                PropertyKind::Set if value.params.len() != 1 => {
                    return self.raise(key_start, "setter should have exactly one param");
                }
                _ => {}
            }
            return Ok(Property {
                node_type: tag::Property,
                span: self.span_from(start),
                method: kind == PropertyKind::Init,
                shorthand: false,
                computed,
                key: Box::new(key),
                value: PropertyValue::Expression(Box::new(Expression::FunctionExpression(value))),
                kind,
            });
        }
        if kind != PropertyKind::Init {
            return self.unexpected();
        }
        if is_async || generator {
            return self.unexpected();
        }
        if self.eat(TokenType::Colon)? {
            let value = self.parse_maybe_assign(true)?;
            return Ok(Property {
                node_type: tag::Property,
                span: self.span_from(start),
                method: false,
                shorthand: false,
                computed,
                key: Box::new(key),
                value: PropertyValue::Expression(Box::new(value)),
                kind: PropertyKind::Init,
            });
        }
        // Shorthand.
        let Expression::Identifier(id) = key else {
            return self.unexpected();
        };
        if computed || self.ecma < EcmaVersion::Es2015 {
            return self.unexpected();
        }
        self.check_shorthand_name(&id)?;
        let value = if self.check(TokenType::Eq) {
            // Only valid if the whole object turns into a pattern.
            self.shorthand_assign_pos.get_or_insert(self.current.start);
            self.next()?;
            let right = self.parse_maybe_assign(false)?;
            PropertyValue::Pattern(Box::new(Pattern::AssignmentPattern(AssignmentPattern {
                node_type: tag::AssignmentPattern,
                span: self.span_at(id.span.start, self.prev_end),
                left: Box::new(Pattern::Identifier(id.clone())),
                right: Box::new(right),
            })))
        } else {
            PropertyValue::Expression(Box::new(Expression::Identifier(id.clone())))
        };
        Ok(Property {
            node_type: tag::Property,
            span: self.span_from(start),
            method: false,
            shorthand: true,
            computed: false,
            key: Box::new(Expression::Identifier(id)),
            value,
            kind: PropertyKind::Init,
        })
    }

    fn check_shorthand_name(&mut self, id: &Identifier) -> Result<(), SyntaxError> {
        if self.flags.contains(Flags::IN_GENERATOR) && id.name == "yield" {
            return self.raise(
                id.span.start,
                "Cannot use 'yield' as identifier inside a generator",
            );
        }
        if self.flags.contains(Flags::IN_ASYNC) && id.name == "await" {
            return self.raise(
                id.span.start,
                "Cannot use 'await' as identifier inside an async function",
            );
        }
        if is_reserved_word(&id.name, self.ecma, self.lexer.strict(), self.options.source_type)
            && !self.reserved_ok()
        {
            return self.raise(id.span.start, format!("The keyword '{}' is reserved", id.name));
        }
        Ok(())
    }

    pub fn parse_property_key_default(&mut self) -> Result<(Expression, bool), SyntaxError> {
        if self.ecma >= EcmaVersion::Es2015 && self.eat(TokenType::BracketL)? {
            let key = self.parse_maybe_assign(false)?;
            self.expect(TokenType::BracketR)?;
            return Ok((key, true));
        }
        match self.current.token_type {
            TokenType::Num | TokenType::String => Ok((self.parse_value_literal()?, false)),
            TokenType::PrivateId => {
                if self.ecma < EcmaVersion::Es2022 {
                    return self.unexpected();
                }
                Ok((
                    Expression::PrivateIdentifier(self.parse_private_ident()?),
                    false,
                ))
            }
            _ => Ok((Expression::Identifier(self.parse_ident_name()?), false)),
        }
    }

    // ============ NEW, TEMPLATES, IMPORT() ============

    fn parse_new(&mut self) -> Result<Expression, SyntaxError> {
        let start = self.current.start;
        self.next()?; // `new`
        if self.ecma >= EcmaVersion::Es2015 && self.eat(TokenType::Dot)? {
            let meta = self.synthetic_ident("new", start, start + 3);
            let property = self.parse_ident_name()?;
            if property.name != "target" {
                return self.raise(
                    property.span.start,
                    "The only valid meta property for new is 'new.target'",
                );
            }
            if !self
                .flags
                .intersects(Flags::IN_FUNCTION | Flags::IN_CLASS_FIELD)
            {
                return self.raise(
                    start,
                    "'new.target' can only be used in functions and class static block",
                );
            }
            return Ok(Expression::MetaProperty(MetaProperty {
                node_type: tag::MetaProperty,
                span: self.span_from(start),
                meta,
                property,
            }));
        }
        let callee_start = self.current.start;
        let atom = self.expr_atom()?;
        let callee = self.subscripts(atom, callee_start, true)?;
        if matches!(callee, Expression::ImportExpression(_)) {
            return self.raise(callee_start, "Cannot use new with import()");
        }
        let arguments = if self.check(TokenType::ParenL) {
            self.parse_call_args()?
        } else {
            Vec::new()
        };
        Ok(Expression::NewExpression(NewExpression {
            node_type: tag::NewExpression,
            span: self.span_from(start),
            callee: Box::new(callee),
            arguments,
        }))
    }

    fn parse_template(&mut self, tagged: bool) -> Result<TemplateLiteral, SyntaxError> {
        let start = self.current.start;
        self.next()?; // opening backquote
        let mut quasis = Vec::new();
        let mut expressions = Vec::new();
        loop {
            if !self.check(TokenType::Template) {
                return self.unexpected();
            }
            let (cooked, raw) = match &self.current.value {
                TokenValue::Template { cooked, raw } => (cooked.clone(), raw.clone()),
                _ => return self.unexpected(),
            };
            if cooked.is_none() && !tagged {
                return self.raise(
                    self.current.start,
                    "Bad escape sequence in untagged template literal",
                );
            }
            let el_start = self.current.start;
            let el_end = self.current.end;
            self.next()?; // now `${` or closing backquote
            let tail = self.check(TokenType::BackQuote);
            quasis.push(TemplateElement {
                node_type: tag::TemplateElement,
                span: self.span_at(el_start, el_end),
                value: TemplateElementValue { raw, cooked },
                tail,
            });
            if tail {
                self.next()?; // closing backquote
                break;
            }
            self.expect(TokenType::DollarBraceL)?;
            let saved_in = std::mem::replace(&mut self.in_allowed, true);
            expressions.push(self.parse_expression(false)?);
            self.in_allowed = saved_in;
            if !self.check(TokenType::BraceR) {
                return self.unexpected();
            }
            self.next()?; // `}`, relexed as the next quasi
        }
        Ok(TemplateLiteral {
            node_type: tag::TemplateLiteral,
            span: self.span_from(start),
            expressions,
            quasis,
        })
    }

    fn parse_import_expression(&mut self) -> Result<Expression, SyntaxError> {
        let start = self.current.start;
        self.next()?; // `import`
        if self.eat(TokenType::Dot)? {
            if self.ecma < EcmaVersion::Es2020 {
                return self.unexpected();
            }
            let meta = self.synthetic_ident("import", start, start + 6);
            let property = self.parse_ident_name()?;
            if property.name != "meta" {
                return self.raise(
                    property.span.start,
                    "The only valid meta property for import is 'import.meta'",
                );
            }
            if self.options.source_type != SourceType::Module
                && !self.options.allow_import_export_everywhere
            {
                return self.raise(start, "Cannot use 'import.meta' outside a module");
            }
            return Ok(Expression::MetaProperty(MetaProperty {
                node_type: tag::MetaProperty,
                span: self.span_from(start),
                meta,
                property,
            }));
        }
        if self.ecma < EcmaVersion::Es2020 || !self.check(TokenType::ParenL) {
            return self.unexpected();
        }
        self.next()?; // `(`
        let source = self.parse_maybe_assign(false)?;
        if self.check(TokenType::Comma) {
            return self.raise(self.current.start, "Trailing comma is not allowed in import()");
        }
        self.expect(TokenType::ParenR)?;
        Ok(Expression::ImportExpression(ImportExpression {
            node_type: tag::ImportExpression,
            span: self.span_from(start),
            source: Box::new(source),
        }))
    }

    // ============ PATTERNS ============

    pub fn parse_binding_atom_default(&mut self) -> Result<Pattern, SyntaxError> {
        if self.ecma >= EcmaVersion::Es2015 {
            match self.current.token_type {
                TokenType::BracketL => return self.parse_array_pattern(),
                TokenType::BraceL => return self.parse_object_pattern(),
                _ => {}
            }
        }
        Ok(Pattern::Identifier(self.parse_binding_ident()?))
    }

    fn parse_array_pattern(&mut self) -> Result<Pattern, SyntaxError> {
        let start = self.current.start;
        self.next()?; // `[`
        let mut elements = Vec::new();
        let mut first = true;
        while !self.check(TokenType::BracketR) {
            if first {
                first = false;
            } else {
                self.expect(TokenType::Comma)?;
                if self.check(TokenType::BracketR) {
                    break;
                }
            }
            if self.check(TokenType::Comma) {
                elements.push(None);
            } else if self.check(TokenType::Ellipsis) {
                elements.push(Some(self.parse_rest_binding()?));
                if self.check(TokenType::Comma) {
                    return self.raise(
                        self.current.start,
                        "Comma is not permitted after the rest element",
                    );
                }
            } else {
                elements.push(Some(self.parse_maybe_default()?));
            }
        }
        self.next()?; // `]`
        Ok(Pattern::ArrayPattern(ArrayPattern {
            node_type: tag::ArrayPattern,
            span: self.span_from(start),
            elements,
        }))
    }

    fn parse_object_pattern(&mut self) -> Result<Pattern, SyntaxError> {
        let start = self.current.start;
        self.next()?; // `{`
        let mut properties = Vec::new();
        let mut first = true;
        while !self.check(TokenType::BraceR) {
            if first {
                first = false;
            } else {
                self.expect(TokenType::Comma)?;
                if self.check(TokenType::BraceR) {
                    break;
                }
            }
            if self.check(TokenType::Ellipsis) {
                if self.ecma < EcmaVersion::Es2018 {
                    return self.unexpected();
                }
                let r_start = self.current.start;
                self.next()?;
                let argument = Pattern::Identifier(self.parse_binding_ident()?);
                properties.push(ObjectPatternProperty::Rest(RestElement {
                    node_type: tag::RestElement,
                    span: self.span_from(r_start),
                    argument: Box::new(argument),
                }));
                if self.check(TokenType::Comma) {
                    return self.raise(
                        self.current.start,
                        "Comma is not permitted after the rest element",
                    );
                }
                continue;
            }
            let p_start = self.current.start;
            let (key, computed) = self.property_key()?;
            let (value, shorthand) = if computed || self.check(TokenType::Colon) {
                self.expect(TokenType::Colon)?;
                (self.parse_maybe_default()?, false)
            } else {
                let Expression::Identifier(id) = &key else {
                    return self.unexpected();
                };
                self.check_shorthand_name(id)?;
                if self.lexer.strict() && is_strict_bind_reserved(&id.name) {
                    return self
                        .raise(id.span.start, format!("Binding {} in strict mode", id.name));
                }
                let base = Pattern::Identifier(id.clone());
                let value = if self.eat(TokenType::Eq)? {
                    let right = self.parse_maybe_assign(false)?;
                    Pattern::AssignmentPattern(AssignmentPattern {
                        node_type: tag::AssignmentPattern,
                        span: self.span_at(id.span.start, self.prev_end),
                        left: Box::new(base),
                        right: Box::new(right),
                    })
                } else {
                    base
                };
                (value, true)
            };
            properties.push(ObjectPatternProperty::Property(Property {
                node_type: tag::Property,
                span: self.span_from(p_start),
                method: false,
                shorthand,
                computed,
                key: Box::new(key),
                value: PropertyValue::Pattern(Box::new(value)),
                kind: PropertyKind::Init,
            }));
        }
        self.next()?; // `}`
        Ok(Pattern::ObjectPattern(ObjectPattern {
            node_type: tag::ObjectPattern,
            span: self.span_from(start),
            properties,
        }))
    }

    fn parse_maybe_default(&mut self) -> Result<Pattern, SyntaxError> {
        let start = self.current.start;
        let pattern = self.binding_atom()?;
        if self.ecma < EcmaVersion::Es2015 || !self.eat(TokenType::Eq)? {
            return Ok(pattern);
        }
        let right = self.parse_maybe_assign(false)?;
        Ok(Pattern::AssignmentPattern(AssignmentPattern {
            node_type: tag::AssignmentPattern,
            span: self.span_from(start),
            left: Box::new(pattern),
            right: Box::new(right),
        }))
    }

    /// Reinterprets an already-parsed expression as an assignment (or,
    /// with `binding`, a binding) target.
    fn to_assignable(&mut self, expr: Expression, binding: bool) -> Result<Pattern, SyntaxError> {
        self.shorthand_assign_pos = None;
        match expr {
            Expression::Identifier(id) => {
                if self.lexer.strict() && is_strict_bind_reserved(&id.name) {
                    let what = if binding { "Binding" } else { "Assigning to" };
                    return self.raise(id.span.start, format!("{what} {} in strict mode", id.name));
                }
                Ok(Pattern::Identifier(id))
            }
            Expression::MemberExpression(m) => {
                if binding {
                    return self.raise(m.span.start, "Binding member expression");
                }
                Ok(Pattern::Member(m))
            }
            Expression::ObjectExpression(obj) => {
                let count = obj.properties.len();
                let mut properties = Vec::with_capacity(count);
                for (i, member) in obj.properties.into_iter().enumerate() {
                    match member {
                        ObjectMember::Property(p) => {
                            properties.push(ObjectPatternProperty::Property(
                                self.property_to_assignable(p, binding)?,
                            ));
                        }
                        ObjectMember::Spread(s) => {
                            if i + 1 != count {
                                return self.raise(
                                    s.span.start,
                                    "Comma is not permitted after the rest element",
                                );
                            }
                            let argument = self.to_assignable(*s.argument, binding)?;
                            properties.push(ObjectPatternProperty::Rest(RestElement {
                                node_type: tag::RestElement,
                                span: s.span,
                                argument: Box::new(argument),
                            }));
                        }
                    }
                }
                Ok(Pattern::ObjectPattern(ObjectPattern {
                    node_type: tag::ObjectPattern,
                    span: obj.span,
                    properties,
                }))
            }
            Expression::ArrayExpression(arr) => {
                let count = arr.elements.len();
                let mut elements = Vec::with_capacity(count);
                for (i, element) in arr.elements.into_iter().enumerate() {
                    match element {
                        None => elements.push(None),
                        Some(Expression::SpreadElement(s)) => {
                            if i + 1 != count {
                                return self.raise(
                                    s.span.start,
                                    "Comma is not permitted after the rest element",
                                );
                            }
                            let argument = self.to_assignable(*s.argument, binding)?;
                            elements.push(Some(Pattern::RestElement(RestElement {
                                node_type: tag::RestElement,
                                span: s.span,
                                argument: Box::new(argument),
                            })));
                        }
                        Some(e) => elements.push(Some(self.to_assignable(e, binding)?)),
                    }
                }
                Ok(Pattern::ArrayPattern(ArrayPattern {
                    node_type: tag::ArrayPattern,
                    span: arr.span,
                    elements,
                }))
            }
            Expression::AssignmentExpression(a) => {
                if a.operator != "=" {
                    return self.raise(a.span.start, "Assigning to rvalue");
                }
                Ok(Pattern::AssignmentPattern(AssignmentPattern {
                    node_type: tag::AssignmentPattern,
                    span: a.span,
                    left: a.left,
                    right: a.right,
                }))
            }
            Expression::SpreadElement(s) => {
                let argument = self.to_assignable(*s.argument, binding)?;
                Ok(Pattern::RestElement(RestElement {
                    node_type: tag::RestElement,
                    span: s.span,
                    argument: Box::new(argument),
                }))
            }
            Expression::ParenthesizedExpression(p) => self.to_assignable(*p.expression, binding),
            other => {
                let pos = other.span().start;
                self.raise(pos, "Assigning to rvalue")
            }
        }
    }

    fn property_to_assignable(
        &mut self,
        property: Property,
        binding: bool,
    ) -> Result<Property, SyntaxError> {
        let Property {
            node_type,
            span,
            method,
            shorthand,
            computed,
            key,
            value,
            kind,
        } = property;
        if kind != PropertyKind::Init || method {
            return self.raise(span.start, "Object pattern can't contain getter or setter");
        }
        let value = match value {
            PropertyValue::Expression(e) => {
                PropertyValue::Pattern(Box::new(self.to_assignable(*e, binding)?))
            }
            already @ PropertyValue::Pattern(_) => already,
        };
        Ok(Property {
            node_type,
            span,
            method,
            shorthand,
            computed,
            key,
            value,
            kind,
        })
    }

    // ============ IDENTIFIERS ============

    fn parse_ident(&mut self) -> Result<Identifier, SyntaxError> {
        if !self.check(TokenType::Name) {
            return self.unexpected();
        }
        let start = self.current.start;
        let name = self.current.value.name().unwrap_or_default().to_string();
        self.next()?;
        if self.flags.contains(Flags::IN_GENERATOR) && name == "yield" {
            return self.raise(start, "Cannot use 'yield' as identifier inside a generator");
        }
        if self.flags.contains(Flags::IN_ASYNC) && name == "await" {
            return self.raise(start, "Cannot use 'await' as identifier inside an async function");
        }
        let strict = self.lexer.strict();
        let base_reserved = is_reserved_word(&name, self.ecma, false, self.options.source_type);
        let strict_reserved =
            strict && is_reserved_word(&name, self.ecma, true, self.options.source_type);
        if (base_reserved && !self.reserved_ok()) || strict_reserved {
            return self.raise(start, format!("The keyword '{name}' is reserved"));
        }
        Ok(Identifier {
            node_type: tag::Identifier,
            span: self.span_from(start),
            name,
        })
    }

    fn parse_binding_ident(&mut self) -> Result<Identifier, SyntaxError> {
        let id = self.parse_ident()?;
        if self.lexer.strict() && is_strict_bind_reserved(&id.name) {
            return self.raise(id.span.start, format!("Binding {} in strict mode", id.name));
        }
        Ok(id)
    }

    /// Property-name position: keywords are ordinary names here.
    fn parse_ident_name(&mut self) -> Result<Identifier, SyntaxError> {
        let start = self.current.start;
        let name = match self.current.token_type {
            TokenType::Name => self.current.value.name().unwrap_or_default().to_string(),
            t if t.keyword().is_some() => t.keyword().unwrap_or_default().to_string(),
            _ => return self.unexpected(),
        };
        self.next()?;
        Ok(Identifier {
            node_type: tag::Identifier,
            span: self.span_from(start),
            name,
        })
    }

    fn parse_private_ident(&mut self) -> Result<PrivateIdentifier, SyntaxError> {
        if !self.check(TokenType::PrivateId) {
            return self.unexpected();
        }
        let start = self.current.start;
        let name = self.current.value.name().unwrap_or_default().to_string();
        self.next()?;
        Ok(PrivateIdentifier {
            node_type: tag::PrivateIdentifier,
            span: self.span_from(start),
            name,
        })
    }

    fn synthetic_ident(&mut self, name: &str, start: usize, end: usize) -> Identifier {
        Identifier {
            node_type: tag::Identifier,
            span: self.span_at(start, end),
            name: name.to_string(),
        }
    }
}

struct ParenList {
    items: Vec<Expression>,
    trailing_comma: Option<usize>,
    spread_pos: Option<usize>,
}

fn key_is_name(key: &Expression, name: &str) -> bool {
    match key {
        Expression::Identifier(id) => id.name == name,
        Expression::Literal(lit) => matches!(&lit.value, LiteralValue::Str(s) if s == name),
        _ => false,
    }
}

fn ident_at(source: &str, pos: usize) -> Option<&str> {
    let rest = source.get(pos..)?;
    let first = rest.chars().next()?;
    if !is_id_start(first) {
        return None;
    }
    let len = rest
        .chars()
        .take_while(|c| crate::lexer::is_id_continue(*c))
        .map(char::len_utf8)
        .sum();
    rest.get(..len)
}

fn collect_bound_names(pattern: &Pattern, out: &mut Vec<String>) {
    match pattern {
        Pattern::Identifier(id) => out.push(id.name.clone()),
        Pattern::ObjectPattern(obj) => {
            for p in &obj.properties {
                match p {
                    ObjectPatternProperty::Property(prop) => {
                        if let PropertyValue::Pattern(inner) = &prop.value {
                            collect_bound_names(inner, out);
                        }
                    }
                    ObjectPatternProperty::Rest(rest) => collect_bound_names(&rest.argument, out),
                }
            }
        }
        Pattern::ArrayPattern(arr) => {
            for element in arr.elements.iter().flatten() {
                collect_bound_names(element, out);
            }
        }
        Pattern::RestElement(rest) => collect_bound_names(&rest.argument, out),
        Pattern::AssignmentPattern(a) => collect_bound_names(&a.left, out),
        Pattern::Member(_) => {}
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::panic)]

    use super::*;
    use crate::options::Options;

    fn parse(source: &str) -> Program {
        Parser::new(source, Options::new(EcmaVersion::Latest))
            .unwrap()
            .parse()
            .unwrap()
    }

    fn parse_err(source: &str) -> SyntaxError {
        Parser::new(source, Options::new(EcmaVersion::Latest))
            .unwrap()
            .parse()
            .unwrap_err()
    }

    #[test]
    fn statement_spans() {
        let program = parse("let x = 1;\nlet y = 2;");
        assert_eq!(program.body.len(), 2);
        assert_eq!(program.body[0].span().start, 0);
        assert_eq!(program.body[0].span().end, 10);
        assert_eq!(program.body[1].span().start, 11);
    }

    #[test]
    fn operator_precedence() {
        let program = parse("a + b * c ** d ** e");
        let Statement::ExpressionStatement(es) = &program.body[0] else {
            panic!("expected expression statement");
        };
        let Expression::BinaryExpression(add) = es.expression.as_ref() else {
            panic!("expected binary expression");
        };
        assert_eq!(add.operator, "+");
        let Expression::BinaryExpression(mul) = add.right.as_ref() else {
            panic!("expected * on the right");
        };
        assert_eq!(mul.operator, "*");
        // `**` nests to the right.
        let Expression::BinaryExpression(pow) = mul.right.as_ref() else {
            panic!("expected ** under *");
        };
        assert_eq!(pow.operator, "**");
        assert!(matches!(pow.right.as_ref(), Expression::BinaryExpression(inner) if inner.operator == "**"));
    }

    #[test]
    fn unsyntactic_break() {
        let err = parse_err("break");
        assert!(err.message.contains("Unsyntactic break"));
    }

    #[test]
    fn strict_mode_octal_via_directive() {
        let err = parse_err("'use strict'; var x = 010;");
        assert!(err.message.contains("Invalid number"));
    }

    #[test]
    fn arrow_vs_call_ambiguity() {
        let program = parse("async (a, b) => a; async(1, 2);");
        assert!(matches!(
            &program.body[0],
            Statement::ExpressionStatement(es)
                if matches!(es.expression.as_ref(), Expression::ArrowFunctionExpression(f) if f.is_async)
        ));
        assert!(matches!(
            &program.body[1],
            Statement::ExpressionStatement(es)
                if matches!(es.expression.as_ref(), Expression::CallExpression(_))
        ));
    }

    #[test]
    fn shorthand_assign_only_in_patterns() {
        assert!(parse_err("({x = 1})").message.contains("destructuring"));
        let program = parse("({x = 1} = y)");
        assert!(matches!(
            &program.body[0],
            Statement::ExpressionStatement(es)
                if matches!(es.expression.as_ref(), Expression::AssignmentExpression(_))
        ));
    }

    #[test]
    fn labels_validated() {
        parse("outer: while (a) { continue outer; }");
        let err = parse_err("x: y: 1; continue x;");
        assert!(err.message.contains("Unsyntactic continue"));
        let err = parse_err("x: x: 1;");
        assert!(err.message.contains("already declared"));
        // Sibling labels may reuse a name once the first is closed.
        parse("x: 1; x: 2;");
    }
}
