use super::statements::Stmt;

/// The root of a parsed program: an ordered sequence of top-level
/// statements. The tree is single-owner — every node exclusively owns its
/// children — and is immutable once the parser returns it. Downstream
/// passes (checker, transformer, generator) build new trees rather than
/// mutating this one, and must tolerate best-effort partial trees when the
/// accompanying diagnostics list is non-empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Ast {
    pub stmts: Vec<Stmt>,
}

impl Ast {
    pub fn new(stmts: Vec<Stmt>) -> Self {
        Ast { stmts }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Stmt> {
        self.stmts.iter()
    }
}
