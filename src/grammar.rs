//! The node tables the interpreter is built from.
//!
//! Bump [`GRAMMAR_VERSION`] whenever an entry is added, removed or changed.

use crate::error::Result;
use crate::spec::GrammarSpec;

pub const GRAMMAR_VERSION: u32 = 1;

pub const EXPR: (&str, &[&str]) = (
    "Expr",
    &[
        "Binary   : Expr left, Token op, Expr right",
        "Grouping : Expr expression",
        "Literal  : Object value",
        "Unary    : Token op, Expr right",
        "Variable : Token name",
    ],
);

// `Expression` holds `expr` rather than `expression`: C# members may not
// share their enclosing type's name.
pub const STMT: (&str, &[&str]) = (
    "Stmt",
    &[
        "Expression : Expr expr",
        "Print      : Expr expression",
        "Var        : Token name, Expr initializer",
    ],
);

/// Parses both tables, expressions first.
pub fn canonical() -> Result<Vec<GrammarSpec<'static>>> {
    [EXPR, STMT]
        .into_iter()
        .map(|(base_name, lines)| GrammarSpec::parse(base_name, lines))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_tables_parse() {
        let grammars = canonical().unwrap();
        let bases: Vec<_> = grammars.iter().map(|g| g.base_name).collect();
        assert_eq!(bases, ["Expr", "Stmt"]);
        assert_eq!(grammars[0].types.len(), EXPR.1.len());
        assert_eq!(grammars[1].types.len(), STMT.1.len());
    }
}
