/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: The tree root handed to downstream passes
/// - expressions: Definitions for various expression kinds
/// - statements: Definitions for various statement kinds
/// - types: Surface-level type annotations
pub mod ast;
pub mod expressions;
pub mod statements;
pub mod types;
