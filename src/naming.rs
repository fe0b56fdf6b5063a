//! Identifier normalization shared by the backends.
//!
//! Field names in the grammar tables are written in lowerCamelCase
//! (or plain lowercase). Every backend derives its identifiers from
//! them through the functions here, so a given name always maps to the
//! same spelling wherever it appears in one output file.

use heck::{AsLowerCamelCase, AsSnakeCase, AsUpperCamelCase};

/// `left` -> `Left`, `thenBranch` -> `ThenBranch`
pub fn pascal(name: &str) -> String {
    AsUpperCamelCase(name).to_string()
}

/// `Expr` -> `expr`
pub fn camel(name: &str) -> String {
    AsLowerCamelCase(name).to_string()
}

/// `thenBranch` -> `then_branch`
pub fn snake(name: &str) -> String {
    AsSnakeCase(name).to_string()
}

/// `Visit` + class name + base name, e.g. `VisitBinaryExpr`.
pub fn visit_method(class_name: &str, base_name: &str) -> String {
    format!("Visit{class_name}{base_name}")
}
