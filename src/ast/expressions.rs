use crate::{lexer::tokens::Token, Span};

use super::{
    statements::Stmt,
    types::{Param, Type},
};

/// The closed set of expression kinds.
///
/// `Binary` and `Unary` carry their operator token verbatim rather than a
/// normalised opcode so the generator can round-trip the exact spelling.
/// `::` path chains are `Binary` nodes over identifiers. A handful of
/// variants — `CallStruct`, `Lambda`, `TypeCast`, `Switch`, `Macro` — are
/// never built by the parser; they belong to the shared data model and are
/// produced by downstream passes (the transformer desugars `Match` into
/// `Switch` and struct-literal calls into `CallStruct`).
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Boolean(BooleanExpr),
    Number(NumberExpr),
    String(StringExpr),
    Call(CallExpr),
    CallStruct(CallStructExpr),
    Object(ObjectExpr),
    GetField(GetFieldExpr),
    GetIndex(GetIndexExpr),
    Lambda(LambdaExpr),
    Unary(UnaryExpr),
    Binary(BinaryExpr),
    TypeCast(TypeCastExpr),
    Group(GroupExpr),
    Match(MatchExpr),
    Switch(SwitchExpr),
    Ident(IdentExpr),
    Block(BlockExpr),
    If(IfExpr),
    Macro(MacroExpr),
}

impl Expr {
    pub fn span(&self) -> &Span {
        match self {
            Expr::Boolean(e) => &e.span,
            Expr::Number(e) => &e.span,
            Expr::String(e) => &e.span,
            Expr::Call(e) => &e.span,
            Expr::CallStruct(e) => &e.span,
            Expr::Object(e) => &e.span,
            Expr::GetField(e) => &e.span,
            Expr::GetIndex(e) => &e.span,
            Expr::Lambda(e) => &e.span,
            Expr::Unary(e) => &e.span,
            Expr::Binary(e) => &e.span,
            Expr::TypeCast(e) => &e.span,
            Expr::Group(e) => &e.span,
            Expr::Match(e) => &e.span,
            Expr::Switch(e) => &e.span,
            Expr::Ident(e) => &e.span,
            Expr::Block(e) => &e.span,
            Expr::If(e) => &e.span,
            Expr::Macro(e) => &e.span,
        }
    }

    /// Whether this expression shape is legal on the left of an assignment
    /// operator.
    pub fn is_assignable(&self) -> bool {
        matches!(
            self,
            Expr::Ident(_) | Expr::GetField(_) | Expr::GetIndex(_)
        )
    }
}

/// Boolean literal: `true` or `false`.
#[derive(Debug, Clone, PartialEq)]
pub struct BooleanExpr {
    pub value: bool,
    pub span: Span,
}

/// Numeric literal.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberExpr {
    pub value: f64,
    pub span: Span,
}

/// String literal, escape sequences already decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct StringExpr {
    pub value: String,
    pub span: Span,
}

/// Function call: `func(arg1, arg2)`. The callee is any postfix-chain
/// expression, so `a.b(1)(2)` nests two calls.
#[derive(Debug, Clone, PartialEq)]
pub struct CallExpr {
    pub func: Box<Expr>,
    pub args: Vec<Expr>,
    pub span: Span,
}

/// Struct-literal call, produced by the transformer when a `Call` of a
/// known struct name carries a single object-literal argument.
#[derive(Debug, Clone, PartialEq)]
pub struct CallStructExpr {
    pub name: Token,
    pub fields: Vec<(Token, Expr)>,
    pub span: Span,
}

/// Object literal: `{ x: 1, y: 2 }`. Disambiguated from a block by a
/// speculative parse (see the expression ladder).
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectExpr {
    pub properties: Vec<(Token, Expr)>,
    pub span: Span,
}

/// Field access: `expr.field`.
#[derive(Debug, Clone, PartialEq)]
pub struct GetFieldExpr {
    pub expr: Box<Expr>,
    pub field: Token,
    pub span: Span,
}

/// Index access: `expr[index]`.
#[derive(Debug, Clone, PartialEq)]
pub struct GetIndexExpr {
    pub expr: Box<Expr>,
    pub index: Box<Expr>,
    pub span: Span,
}

/// Anonymous function. Not yet producible from surface syntax; part of the
/// shared data model for downstream passes.
#[derive(Debug, Clone, PartialEq)]
pub struct LambdaExpr {
    pub params: Vec<Param>,
    pub return_type: Option<Type>,
    pub block: BlockExpr,
    pub span: Span,
}

/// Prefix operation: `!expr` or `-expr`.
#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpr {
    pub operator: Token,
    pub expr: Box<Expr>,
    pub span: Span,
}

/// Binary operation, including `::` path chains and `..`/`..=` ranges.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub left: Box<Expr>,
    pub operator: Token,
    pub right: Box<Expr>,
    pub span: Span,
}

/// `expr as Type`. The surface syntax is reserved but the cast level of the
/// expression ladder is currently a pass-through.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeCastExpr {
    pub expr: Box<Expr>,
    pub ty: Type,
    pub span: Span,
}

/// Parenthesised expression. Kept as a node so the generator can
/// round-trip the grouping.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupExpr {
    pub expr: Box<Expr>,
    pub span: Span,
}

/// One `pattern => body` arm of a match expression. The pattern is an
/// arbitrary expression; first structurally-equal arm wins downstream.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchArm {
    pub expr: Expr,
    pub body: Expr,
    pub span: Span,
}

/// Match expression: `switch subject { pattern => body, ... }`.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchExpr {
    pub expr: Box<Expr>,
    pub arms: Vec<MatchArm>,
    pub span: Span,
}

/// One arm of a desugared match: the body has become a statement.
#[derive(Debug, Clone, PartialEq)]
pub struct SwitchArm {
    pub expr: Expr,
    pub body: Box<Stmt>,
    pub span: Span,
}

/// Desugared match expression, produced by the transformer.
#[derive(Debug, Clone, PartialEq)]
pub struct SwitchExpr {
    pub expr: Box<Expr>,
    pub arms: Vec<SwitchArm>,
    pub span: Span,
}

/// A name reference, carrying the identifier token.
#[derive(Debug, Clone, PartialEq)]
pub struct IdentExpr {
    pub ident: Token,
    pub span: Span,
}

/// Brace-delimited statement sequence. Reused wherever a body can appear:
/// function bodies, loop bodies, if/else arms, and bare block expressions.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockExpr {
    pub stmts: Vec<Stmt>,
    pub span: Span,
}

/// `if cond { } else ...`; the else branch is either a nested `If` or a
/// `Block` expression.
#[derive(Debug, Clone, PartialEq)]
pub struct IfExpr {
    pub condition: Box<Expr>,
    pub then_block: BlockExpr,
    pub else_branch: Option<Box<Expr>>,
    pub span: Span,
}

/// Macro invocation placeholder for a future `name!(expr)` form.
#[derive(Debug, Clone, PartialEq)]
pub struct MacroExpr {
    pub name: Token,
    pub expr: Box<Expr>,
    pub span: Span,
}
