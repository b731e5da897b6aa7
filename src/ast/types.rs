use crate::{lexer::tokens::Token, Span};

/// A surface-level type annotation. These are syntactic placeholders
/// carried through to the checker, not resolved types: the parser only
/// records what was written. The `num`, `str` and `bool` spellings map to
/// their dedicated tags; `Any` comes from the keyword; everything else is
/// an identifier to be resolved later. `Object` is never produced by the
/// parser and exists for the transformer's struct-literal inlining.
#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    Boolean { value: String },
    String { value: String },
    Number { value: String },
    Object { value: String },
    Array { element: Box<Type> },
    Ident { value: String },
    Any { value: String },
}

/// A single function parameter: `mut? name: type`.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: Token,
    pub ty: Type,
    pub mutable: bool,
}

/// A function signature: name, parameter list and optional return type.
/// Shared by `fn` declarations, `impl` methods and `trait` methods.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionType {
    pub name: Token,
    pub params: Vec<Param>,
    pub return_type: Option<Type>,
    pub span: Span,
}
