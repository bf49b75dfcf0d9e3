//! AST node types
//!
//! The node shapes here are an external contract: the `type` tags and
//! field names must match the ESTree schema exactly, which is what the
//! serde derives encode (`serde_json::to_value` on any node produces
//! the standard JSON shape). Each node category is a closed enum; each
//! node owns its children exclusively via `Box`.

use serde::Serialize;

use crate::options::SourceType;
use crate::position::SourceLocation;

/// Position annotation shared by every node: `[start, end)` byte
/// offsets, plus optional line/column locations, optional `range`
/// pairs, and the optional verbatim `sourceFile` attachment.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loc: Option<SourceLocation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<[usize; 2]>,
    #[serde(rename = "sourceFile", skip_serializing_if = "Option::is_none")]
    pub source_file: Option<String>,
}

/// Zero-sized markers that serialize as the ESTree `type` tag.
macro_rules! node_tags {
    ($($name:ident),+ $(,)?) => {
        $(
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
            pub struct $name;
            impl serde::Serialize for $name {
                fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
                    s.serialize_str(stringify!($name))
                }
            }
        )+
    };
}

pub mod tag {
    node_tags! {
        Program, Identifier, PrivateIdentifier, Literal,
        ExpressionStatement, BlockStatement, EmptyStatement, DebuggerStatement,
        WithStatement, ReturnStatement, LabeledStatement, BreakStatement,
        ContinueStatement, IfStatement, SwitchStatement, SwitchCase,
        ThrowStatement, TryStatement, CatchClause, WhileStatement,
        DoWhileStatement, ForStatement, ForInStatement, ForOfStatement,
        VariableDeclaration, VariableDeclarator,
        ThisExpression, ArrayExpression, ObjectExpression, Property,
        TemplateLiteral, TemplateElement, TaggedTemplateExpression,
        MemberExpression, Super, MetaProperty, NewExpression, CallExpression,
        UpdateExpression, AwaitExpression, UnaryExpression, BinaryExpression,
        LogicalExpression, ConditionalExpression, YieldExpression,
        AssignmentExpression, SequenceExpression, SpreadElement,
        ChainExpression, ImportExpression, ParenthesizedExpression,
        ObjectPattern, ArrayPattern, RestElement, AssignmentPattern,
        ClassBody, MethodDefinition, PropertyDefinition, StaticBlock,
        ImportDeclaration, ImportSpecifier, ImportDefaultSpecifier,
        ImportNamespaceSpecifier, ExportNamedDeclaration, ExportSpecifier,
        ExportDefaultDeclaration, ExportAllDeclaration,
    }
}

/// `type` tag for the shared function node, which serializes as one of
/// three ESTree node types depending on how it was parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionTag {
    FunctionDeclaration,
    FunctionExpression,
    ArrowFunctionExpression,
}

impl Serialize for FunctionTag {
    fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(match self {
            Self::FunctionDeclaration => "FunctionDeclaration",
            Self::FunctionExpression => "FunctionExpression",
            Self::ArrowFunctionExpression => "ArrowFunctionExpression",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassTag {
    ClassDeclaration,
    ClassExpression,
}

impl Serialize for ClassTag {
    fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(match self {
            Self::ClassDeclaration => "ClassDeclaration",
            Self::ClassExpression => "ClassExpression",
        })
    }
}

// ============ TOP LEVEL ============

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Program {
    #[serde(rename = "type")]
    pub node_type: tag::Program,
    #[serde(flatten)]
    pub span: Span,
    pub body: Vec<Statement>,
    #[serde(rename = "sourceType")]
    pub source_type: SourceType,
}

// ============ STATEMENTS ============

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Statement {
    ExpressionStatement(ExpressionStatement),
    BlockStatement(BlockStatement),
    EmptyStatement(EmptyStatement),
    DebuggerStatement(DebuggerStatement),
    WithStatement(WithStatement),
    ReturnStatement(ReturnStatement),
    LabeledStatement(LabeledStatement),
    BreakStatement(BreakStatement),
    ContinueStatement(ContinueStatement),
    IfStatement(IfStatement),
    SwitchStatement(SwitchStatement),
    ThrowStatement(ThrowStatement),
    TryStatement(TryStatement),
    WhileStatement(WhileStatement),
    DoWhileStatement(DoWhileStatement),
    ForStatement(ForStatement),
    ForInStatement(ForInStatement),
    ForOfStatement(ForOfStatement),
    FunctionDeclaration(Function),
    VariableDeclaration(VariableDeclaration),
    ClassDeclaration(Class),
    ImportDeclaration(ImportDeclaration),
    ExportNamedDeclaration(ExportNamedDeclaration),
    ExportDefaultDeclaration(ExportDefaultDeclaration),
    ExportAllDeclaration(ExportAllDeclaration),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpressionStatement {
    #[serde(rename = "type")]
    pub node_type: tag::ExpressionStatement,
    #[serde(flatten)]
    pub span: Span,
    pub expression: Box<Expression>,
    /// Present for directive prologue members (e.g. `"use strict"`),
    /// holding the raw string without quotes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directive: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockStatement {
    #[serde(rename = "type")]
    pub node_type: tag::BlockStatement,
    #[serde(flatten)]
    pub span: Span,
    pub body: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmptyStatement {
    #[serde(rename = "type")]
    pub node_type: tag::EmptyStatement,
    #[serde(flatten)]
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DebuggerStatement {
    #[serde(rename = "type")]
    pub node_type: tag::DebuggerStatement,
    #[serde(flatten)]
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WithStatement {
    #[serde(rename = "type")]
    pub node_type: tag::WithStatement,
    #[serde(flatten)]
    pub span: Span,
    pub object: Box<Expression>,
    pub body: Box<Statement>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReturnStatement {
    #[serde(rename = "type")]
    pub node_type: tag::ReturnStatement,
    #[serde(flatten)]
    pub span: Span,
    pub argument: Option<Box<Expression>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabeledStatement {
    #[serde(rename = "type")]
    pub node_type: tag::LabeledStatement,
    #[serde(flatten)]
    pub span: Span,
    pub label: Identifier,
    pub body: Box<Statement>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakStatement {
    #[serde(rename = "type")]
    pub node_type: tag::BreakStatement,
    #[serde(flatten)]
    pub span: Span,
    pub label: Option<Identifier>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContinueStatement {
    #[serde(rename = "type")]
    pub node_type: tag::ContinueStatement,
    #[serde(flatten)]
    pub span: Span,
    pub label: Option<Identifier>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IfStatement {
    #[serde(rename = "type")]
    pub node_type: tag::IfStatement,
    #[serde(flatten)]
    pub span: Span,
    pub test: Box<Expression>,
    pub consequent: Box<Statement>,
    pub alternate: Option<Box<Statement>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SwitchStatement {
    #[serde(rename = "type")]
    pub node_type: tag::SwitchStatement,
    #[serde(flatten)]
    pub span: Span,
    pub discriminant: Box<Expression>,
    pub cases: Vec<SwitchCase>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SwitchCase {
    #[serde(rename = "type")]
    pub node_type: tag::SwitchCase,
    #[serde(flatten)]
    pub span: Span,
    pub test: Option<Box<Expression>>,
    pub consequent: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThrowStatement {
    #[serde(rename = "type")]
    pub node_type: tag::ThrowStatement,
    #[serde(flatten)]
    pub span: Span,
    pub argument: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TryStatement {
    #[serde(rename = "type")]
    pub node_type: tag::TryStatement,
    #[serde(flatten)]
    pub span: Span,
    pub block: BlockStatement,
    pub handler: Option<CatchClause>,
    pub finalizer: Option<BlockStatement>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatchClause {
    #[serde(rename = "type")]
    pub node_type: tag::CatchClause,
    #[serde(flatten)]
    pub span: Span,
    pub param: Option<Pattern>,
    pub body: BlockStatement,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WhileStatement {
    #[serde(rename = "type")]
    pub node_type: tag::WhileStatement,
    #[serde(flatten)]
    pub span: Span,
    pub test: Box<Expression>,
    pub body: Box<Statement>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DoWhileStatement {
    #[serde(rename = "type")]
    pub node_type: tag::DoWhileStatement,
    #[serde(flatten)]
    pub span: Span,
    pub body: Box<Statement>,
    pub test: Box<Expression>,
}

/// `for (;;)` initializer: a declaration or an expression.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ForInit {
    Declaration(VariableDeclaration),
    Expression(Box<Expression>),
}

/// Left side of `for-in`/`for-of`: a declaration or a pattern.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ForTarget {
    Declaration(VariableDeclaration),
    Pattern(Pattern),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForStatement {
    #[serde(rename = "type")]
    pub node_type: tag::ForStatement,
    #[serde(flatten)]
    pub span: Span,
    pub init: Option<ForInit>,
    pub test: Option<Box<Expression>>,
    pub update: Option<Box<Expression>>,
    pub body: Box<Statement>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForInStatement {
    #[serde(rename = "type")]
    pub node_type: tag::ForInStatement,
    #[serde(flatten)]
    pub span: Span,
    pub left: ForTarget,
    pub right: Box<Expression>,
    pub body: Box<Statement>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForOfStatement {
    #[serde(rename = "type")]
    pub node_type: tag::ForOfStatement,
    #[serde(flatten)]
    pub span: Span,
    #[serde(rename = "await")]
    pub is_await: bool,
    pub left: ForTarget,
    pub right: Box<Expression>,
    pub body: Box<Statement>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VarKind {
    Var,
    Let,
    Const,
}

impl VarKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Var => "var",
            Self::Let => "let",
            Self::Const => "const",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariableDeclaration {
    #[serde(rename = "type")]
    pub node_type: tag::VariableDeclaration,
    #[serde(flatten)]
    pub span: Span,
    pub declarations: Vec<VariableDeclarator>,
    pub kind: VarKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariableDeclarator {
    #[serde(rename = "type")]
    pub node_type: tag::VariableDeclarator,
    #[serde(flatten)]
    pub span: Span,
    pub id: Pattern,
    pub init: Option<Box<Expression>>,
}

// ============ EXPRESSIONS ============

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Expression {
    Identifier(Identifier),
    PrivateIdentifier(PrivateIdentifier),
    Literal(Literal),
    ThisExpression(ThisExpression),
    Super(Super),
    ArrayExpression(ArrayExpression),
    ObjectExpression(ObjectExpression),
    FunctionExpression(Function),
    ArrowFunctionExpression(Function),
    ClassExpression(Class),
    TemplateLiteral(TemplateLiteral),
    TaggedTemplateExpression(TaggedTemplateExpression),
    MemberExpression(MemberExpression),
    MetaProperty(MetaProperty),
    NewExpression(NewExpression),
    CallExpression(CallExpression),
    UpdateExpression(UpdateExpression),
    AwaitExpression(AwaitExpression),
    UnaryExpression(UnaryExpression),
    BinaryExpression(BinaryExpression),
    LogicalExpression(LogicalExpression),
    ConditionalExpression(ConditionalExpression),
    YieldExpression(YieldExpression),
    AssignmentExpression(AssignmentExpression),
    SequenceExpression(SequenceExpression),
    SpreadElement(SpreadElement),
    ChainExpression(ChainExpression),
    ImportExpression(ImportExpression),
    ParenthesizedExpression(ParenthesizedExpression),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Identifier {
    #[serde(rename = "type")]
    pub node_type: tag::Identifier,
    #[serde(flatten)]
    pub span: Span,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrivateIdentifier {
    #[serde(rename = "type")]
    pub node_type: tag::PrivateIdentifier,
    #[serde(flatten)]
    pub span: Span,
    pub name: String,
}

/// Literal `value` as it appears in the ESTree JSON. Regex and BigInt
/// literals serialize `value` as null; their decoded content lives in
/// the `regex`/`bigint` fields of the literal node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LiteralValue {
    Null,
    Bool(bool),
    Num(f64),
    Str(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegexInfo {
    pub pattern: String,
    pub flags: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Literal {
    #[serde(rename = "type")]
    pub node_type: tag::Literal,
    #[serde(flatten)]
    pub span: Span,
    pub value: LiteralValue,
    pub raw: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regex: Option<RegexInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bigint: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThisExpression {
    #[serde(rename = "type")]
    pub node_type: tag::ThisExpression,
    #[serde(flatten)]
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Super {
    #[serde(rename = "type")]
    pub node_type: tag::Super,
    #[serde(flatten)]
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArrayExpression {
    #[serde(rename = "type")]
    pub node_type: tag::ArrayExpression,
    #[serde(flatten)]
    pub span: Span,
    /// `None` entries are elisions (holes).
    pub elements: Vec<Option<Expression>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ObjectMember {
    Property(Property),
    Spread(SpreadElement),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectExpression {
    #[serde(rename = "type")]
    pub node_type: tag::ObjectExpression,
    #[serde(flatten)]
    pub span: Span,
    pub properties: Vec<ObjectMember>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyKind {
    Init,
    Get,
    Set,
}

/// Property value: an expression in object literals, a pattern once
/// the surrounding object has been converted to a destructuring target.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Expression(Box<Expression>),
    Pattern(Box<Pattern>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Property {
    #[serde(rename = "type")]
    pub node_type: tag::Property,
    #[serde(flatten)]
    pub span: Span,
    pub method: bool,
    pub shorthand: bool,
    pub computed: bool,
    pub key: Box<Expression>,
    pub value: PropertyValue,
    pub kind: PropertyKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateElementValue {
    pub raw: String,
    /// `None` when the raw text contains an invalid escape inside a
    /// tagged template (allowed since ES2018).
    pub cooked: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateElement {
    #[serde(rename = "type")]
    pub node_type: tag::TemplateElement,
    #[serde(flatten)]
    pub span: Span,
    pub value: TemplateElementValue,
    pub tail: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateLiteral {
    #[serde(rename = "type")]
    pub node_type: tag::TemplateLiteral,
    #[serde(flatten)]
    pub span: Span,
    pub expressions: Vec<Expression>,
    pub quasis: Vec<TemplateElement>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaggedTemplateExpression {
    #[serde(rename = "type")]
    pub node_type: tag::TaggedTemplateExpression,
    #[serde(flatten)]
    pub span: Span,
    pub tag: Box<Expression>,
    pub quasi: TemplateLiteral,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberExpression {
    #[serde(rename = "type")]
    pub node_type: tag::MemberExpression,
    #[serde(flatten)]
    pub span: Span,
    pub object: Box<Expression>,
    pub property: Box<Expression>,
    pub computed: bool,
    pub optional: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetaProperty {
    #[serde(rename = "type")]
    pub node_type: tag::MetaProperty,
    #[serde(flatten)]
    pub span: Span,
    pub meta: Identifier,
    pub property: Identifier,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewExpression {
    #[serde(rename = "type")]
    pub node_type: tag::NewExpression,
    #[serde(flatten)]
    pub span: Span,
    pub callee: Box<Expression>,
    pub arguments: Vec<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallExpression {
    #[serde(rename = "type")]
    pub node_type: tag::CallExpression,
    #[serde(flatten)]
    pub span: Span,
    pub callee: Box<Expression>,
    pub arguments: Vec<Expression>,
    pub optional: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateExpression {
    #[serde(rename = "type")]
    pub node_type: tag::UpdateExpression,
    #[serde(flatten)]
    pub span: Span,
    pub operator: &'static str,
    pub prefix: bool,
    pub argument: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AwaitExpression {
    #[serde(rename = "type")]
    pub node_type: tag::AwaitExpression,
    #[serde(flatten)]
    pub span: Span,
    pub argument: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnaryExpression {
    #[serde(rename = "type")]
    pub node_type: tag::UnaryExpression,
    #[serde(flatten)]
    pub span: Span,
    pub operator: &'static str,
    pub prefix: bool,
    pub argument: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BinaryExpression {
    #[serde(rename = "type")]
    pub node_type: tag::BinaryExpression,
    #[serde(flatten)]
    pub span: Span,
    pub left: Box<Expression>,
    pub operator: &'static str,
    pub right: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogicalExpression {
    #[serde(rename = "type")]
    pub node_type: tag::LogicalExpression,
    #[serde(flatten)]
    pub span: Span,
    pub left: Box<Expression>,
    pub operator: &'static str,
    pub right: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConditionalExpression {
    #[serde(rename = "type")]
    pub node_type: tag::ConditionalExpression,
    #[serde(flatten)]
    pub span: Span,
    pub test: Box<Expression>,
    pub consequent: Box<Expression>,
    pub alternate: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YieldExpression {
    #[serde(rename = "type")]
    pub node_type: tag::YieldExpression,
    #[serde(flatten)]
    pub span: Span,
    pub delegate: bool,
    pub argument: Option<Box<Expression>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssignmentExpression {
    #[serde(rename = "type")]
    pub node_type: tag::AssignmentExpression,
    #[serde(flatten)]
    pub span: Span,
    pub operator: &'static str,
    pub left: Box<Pattern>,
    pub right: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SequenceExpression {
    #[serde(rename = "type")]
    pub node_type: tag::SequenceExpression,
    #[serde(flatten)]
    pub span: Span,
    pub expressions: Vec<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpreadElement {
    #[serde(rename = "type")]
    pub node_type: tag::SpreadElement,
    #[serde(flatten)]
    pub span: Span,
    pub argument: Box<Expression>,
}

/// Wraps the outermost member/call chain containing `?.`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChainExpression {
    #[serde(rename = "type")]
    pub node_type: tag::ChainExpression,
    #[serde(flatten)]
    pub span: Span,
    pub expression: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportExpression {
    #[serde(rename = "type")]
    pub node_type: tag::ImportExpression,
    #[serde(flatten)]
    pub span: Span,
    pub source: Box<Expression>,
}

/// Only produced under the `preserve_parens` option.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParenthesizedExpression {
    #[serde(rename = "type")]
    pub node_type: tag::ParenthesizedExpression,
    #[serde(flatten)]
    pub span: Span,
    pub expression: Box<Expression>,
}

// ============ FUNCTIONS & CLASSES ============

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FunctionBody {
    Block(BlockStatement),
    /// Arrow-function concise body.
    Expression(Box<Expression>),
}

/// Shared by function declarations, function expressions and arrows;
/// the `node_type` tag records which one it is.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Function {
    #[serde(rename = "type")]
    pub node_type: FunctionTag,
    #[serde(flatten)]
    pub span: Span,
    pub id: Option<Identifier>,
    pub expression: bool,
    pub generator: bool,
    #[serde(rename = "async")]
    pub is_async: bool,
    pub params: Vec<Pattern>,
    pub body: FunctionBody,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Class {
    #[serde(rename = "type")]
    pub node_type: ClassTag,
    #[serde(flatten)]
    pub span: Span,
    pub id: Option<Identifier>,
    #[serde(rename = "superClass")]
    pub super_class: Option<Box<Expression>>,
    pub body: ClassBody,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ClassElement {
    Method(MethodDefinition),
    Property(PropertyDefinition),
    StaticBlock(StaticBlock),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassBody {
    #[serde(rename = "type")]
    pub node_type: tag::ClassBody,
    #[serde(flatten)]
    pub span: Span,
    pub body: Vec<ClassElement>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MethodKind {
    Constructor,
    Method,
    Get,
    Set,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodDefinition {
    #[serde(rename = "type")]
    pub node_type: tag::MethodDefinition,
    #[serde(flatten)]
    pub span: Span,
    #[serde(rename = "static")]
    pub is_static: bool,
    pub computed: bool,
    pub key: Box<Expression>,
    pub kind: MethodKind,
    pub value: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyDefinition {
    #[serde(rename = "type")]
    pub node_type: tag::PropertyDefinition,
    #[serde(flatten)]
    pub span: Span,
    #[serde(rename = "static")]
    pub is_static: bool,
    pub computed: bool,
    pub key: Box<Expression>,
    pub value: Option<Box<Expression>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StaticBlock {
    #[serde(rename = "type")]
    pub node_type: tag::StaticBlock,
    #[serde(flatten)]
    pub span: Span,
    pub body: Vec<Statement>,
}

// ============ PATTERNS ============

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Pattern {
    Identifier(Identifier),
    ObjectPattern(ObjectPattern),
    ArrayPattern(ArrayPattern),
    RestElement(RestElement),
    AssignmentPattern(AssignmentPattern),
    /// Member expressions are valid assignment targets.
    Member(MemberExpression),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ObjectPatternProperty {
    Property(Property),
    Rest(RestElement),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectPattern {
    #[serde(rename = "type")]
    pub node_type: tag::ObjectPattern,
    #[serde(flatten)]
    pub span: Span,
    pub properties: Vec<ObjectPatternProperty>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArrayPattern {
    #[serde(rename = "type")]
    pub node_type: tag::ArrayPattern,
    #[serde(flatten)]
    pub span: Span,
    pub elements: Vec<Option<Pattern>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RestElement {
    #[serde(rename = "type")]
    pub node_type: tag::RestElement,
    #[serde(flatten)]
    pub span: Span,
    pub argument: Box<Pattern>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssignmentPattern {
    #[serde(rename = "type")]
    pub node_type: tag::AssignmentPattern,
    #[serde(flatten)]
    pub span: Span,
    pub left: Box<Pattern>,
    pub right: Box<Expression>,
}

// ============ MODULES ============

/// Import/export names can be identifiers or (since ES2022) string
/// literals.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ModuleExportName {
    Identifier(Identifier),
    Literal(Literal),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ImportSpecifierItem {
    Named(ImportSpecifier),
    Default(ImportDefaultSpecifier),
    Namespace(ImportNamespaceSpecifier),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportSpecifier {
    #[serde(rename = "type")]
    pub node_type: tag::ImportSpecifier,
    #[serde(flatten)]
    pub span: Span,
    pub imported: ModuleExportName,
    pub local: Identifier,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportDefaultSpecifier {
    #[serde(rename = "type")]
    pub node_type: tag::ImportDefaultSpecifier,
    #[serde(flatten)]
    pub span: Span,
    pub local: Identifier,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportNamespaceSpecifier {
    #[serde(rename = "type")]
    pub node_type: tag::ImportNamespaceSpecifier,
    #[serde(flatten)]
    pub span: Span,
    pub local: Identifier,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportDeclaration {
    #[serde(rename = "type")]
    pub node_type: tag::ImportDeclaration,
    #[serde(flatten)]
    pub span: Span,
    pub specifiers: Vec<ImportSpecifierItem>,
    pub source: Literal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportSpecifier {
    #[serde(rename = "type")]
    pub node_type: tag::ExportSpecifier,
    #[serde(flatten)]
    pub span: Span,
    pub local: ModuleExportName,
    pub exported: ModuleExportName,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportNamedDeclaration {
    #[serde(rename = "type")]
    pub node_type: tag::ExportNamedDeclaration,
    #[serde(flatten)]
    pub span: Span,
    pub declaration: Option<Box<Statement>>,
    pub specifiers: Vec<ExportSpecifier>,
    pub source: Option<Literal>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ExportDefaultKind {
    Function(Function),
    Class(Class),
    Expression(Box<Expression>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportDefaultDeclaration {
    #[serde(rename = "type")]
    pub node_type: tag::ExportDefaultDeclaration,
    #[serde(flatten)]
    pub span: Span,
    pub declaration: ExportDefaultKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportAllDeclaration {
    #[serde(rename = "type")]
    pub node_type: tag::ExportAllDeclaration,
    #[serde(flatten)]
    pub span: Span,
    pub exported: Option<ModuleExportName>,
    pub source: Literal,
}

// ============ SPAN ACCESS ============

macro_rules! spanned_enum {
    ($name:ident { $($variant:ident),+ $(,)? }) => {
        impl $name {
            pub fn span(&self) -> &Span {
                match self {
                    $(Self::$variant(n) => &n.span,)+
                }
            }

            pub fn span_mut(&mut self) -> &mut Span {
                match self {
                    $(Self::$variant(n) => &mut n.span,)+
                }
            }
        }
    };
}

spanned_enum!(Expression {
    Identifier,
    PrivateIdentifier,
    Literal,
    ThisExpression,
    Super,
    ArrayExpression,
    ObjectExpression,
    FunctionExpression,
    ArrowFunctionExpression,
    ClassExpression,
    TemplateLiteral,
    TaggedTemplateExpression,
    MemberExpression,
    MetaProperty,
    NewExpression,
    CallExpression,
    UpdateExpression,
    AwaitExpression,
    UnaryExpression,
    BinaryExpression,
    LogicalExpression,
    ConditionalExpression,
    YieldExpression,
    AssignmentExpression,
    SequenceExpression,
    SpreadElement,
    ChainExpression,
    ImportExpression,
    ParenthesizedExpression,
});

spanned_enum!(Statement {
    ExpressionStatement,
    BlockStatement,
    EmptyStatement,
    DebuggerStatement,
    WithStatement,
    ReturnStatement,
    LabeledStatement,
    BreakStatement,
    ContinueStatement,
    IfStatement,
    SwitchStatement,
    ThrowStatement,
    TryStatement,
    WhileStatement,
    DoWhileStatement,
    ForStatement,
    ForInStatement,
    ForOfStatement,
    FunctionDeclaration,
    VariableDeclaration,
    ClassDeclaration,
    ImportDeclaration,
    ExportNamedDeclaration,
    ExportDefaultDeclaration,
    ExportAllDeclaration,
});

spanned_enum!(Pattern {
    Identifier,
    ObjectPattern,
    ArrayPattern,
    RestElement,
    AssignmentPattern,
    Member,
});
