//! Generates the AST node types and visitor scaffolding for the Lox
//! interpreter from compact one-line node specifications.

pub mod emit;
pub mod error;
pub mod grammar;
pub mod naming;
pub mod spec;

pub use emit::{Backend, Freshness, Options, Target, check, define_ast, emit_grammar, generate};
pub use error::{Error, Result};
pub use spec::{FieldSpec, GrammarSpec, TypeSpec};
