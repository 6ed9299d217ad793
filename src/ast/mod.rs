/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: Program root, identifiers and declarations
/// - expressions: Expression nodes and operators
/// - statements: Statement nodes, blocks and switch arms
/// - types: Type annotations
/// - printer: Indented debug dump
/// - unparse: Canonical source output
pub mod ast;
pub mod expressions;
pub mod printer;
pub mod statements;
pub mod types;
pub mod unparse;

#[cfg(test)]
mod tests;
