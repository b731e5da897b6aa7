use crate::{lexer::tokens::Token, Span};

use super::{
    expressions::{BlockExpr, Expr},
    types::{FunctionType, Type},
};

/// The closed set of statement kinds. Every variant carries a span that
/// fully contains the spans of its children.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Break(BreakStmt),
    Continue(ContinueStmt),
    Expr(ExprStmt),
    Return(ReturnStmt),
    While(WhileStmt),
    For(ForStmt),
    Let(LetStmt),
    Const(ConstStmt),
    Fn(FnStmt),
    Enum(EnumStmt),
    Struct(StructStmt),
    Impl(ImplStmt),
    Trait(TraitStmt),
    Assign(AssignStmt),
}

impl Stmt {
    pub fn span(&self) -> &Span {
        match self {
            Stmt::Break(s) => &s.span,
            Stmt::Continue(s) => &s.span,
            Stmt::Expr(s) => &s.span,
            Stmt::Return(s) => &s.span,
            Stmt::While(s) => &s.span,
            Stmt::For(s) => &s.span,
            Stmt::Let(s) => &s.span,
            Stmt::Const(s) => &s.span,
            Stmt::Fn(s) => &s.span,
            Stmt::Enum(s) => &s.span,
            Stmt::Struct(s) => &s.span,
            Stmt::Impl(s) => &s.span,
            Stmt::Trait(s) => &s.span,
            Stmt::Assign(s) => &s.span,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BreakStmt {
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContinueStmt {
    pub span: Span,
}

/// An expression in statement position.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprStmt {
    pub expr: Expr,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStmt {
    pub expr: Option<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStmt {
    pub condition: Expr,
    pub block: BlockExpr,
    pub span: Span,
}

/// `for name in iter { ... }`.
#[derive(Debug, Clone, PartialEq)]
pub struct ForStmt {
    pub name: Token,
    pub iter: Expr,
    pub block: BlockExpr,
    pub span: Span,
}

/// `let mut? name: type? = init;`. The type annotation is surface-level
/// only; a missing one is left for the checker to infer.
#[derive(Debug, Clone, PartialEq)]
pub struct LetStmt {
    pub name: Token,
    pub ty: Option<Type>,
    pub init: Expr,
    pub mutable: bool,
    pub span: Span,
}

/// `const name: type? = init;`. Initialisers are restricted to scalar
/// expressions.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstStmt {
    pub name: Token,
    pub ty: Option<Type>,
    pub init: Expr,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FnStmt {
    pub ty: FunctionType,
    pub block: BlockExpr,
    pub span: Span,
}

/// One enum variant: a name plus zero or more payload type annotations.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumVariant {
    pub name: Token,
    pub types: Vec<Type>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumStmt {
    pub name: Token,
    pub variants: Vec<EnumVariant>,
    pub span: Span,
}

/// One struct field: `name: type`.
#[derive(Debug, Clone, PartialEq)]
pub struct StructField {
    pub name: Token,
    pub ty: Type,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StructStmt {
    pub name: Token,
    pub fields: Vec<StructField>,
    pub span: Span,
}

/// `impl Name (for Trait)? { fn ... }`.
#[derive(Debug, Clone, PartialEq)]
pub struct ImplStmt {
    pub impl_name: Token,
    pub for_name: Option<Token>,
    pub methods: Vec<FnStmt>,
    pub span: Span,
}

/// One trait method: a signature with an optional default body.
#[derive(Debug, Clone, PartialEq)]
pub struct TraitMethod {
    pub ty: FunctionType,
    pub block: Option<BlockExpr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TraitStmt {
    pub name: Token,
    pub methods: Vec<TraitMethod>,
    pub span: Span,
}

/// `target op value;` where the target is restricted to an identifier,
/// field access or index access, and `op` is `=` or a compound assignment.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignStmt {
    pub expr: Expr,
    pub operator: Token,
    pub value: Expr,
    pub span: Span,
}
