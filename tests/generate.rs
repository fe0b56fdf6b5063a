use std::fs::{read_dir, read_to_string, write};
use std::path::{Path, PathBuf};

use astgen::{Error, Freshness, GrammarSpec, Options, Target, check, generate, grammar};

fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("astgen-{}-{name}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<_> = read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().into_string().unwrap())
        .collect();
    names.sort();
    names
}

#[test]
fn writes_one_file_per_grammar() {
    let dir = temp_dir("one-file-per-grammar");
    let grammars = grammar::canonical().unwrap();

    let paths = generate(&dir, &grammars, &Options::default()).unwrap();
    assert_eq!(paths, [dir.join("Expr.cs"), dir.join("Stmt.cs")]);
    assert_eq!(file_names(&dir), ["Expr.cs", "Stmt.cs"]);

    for (grammar, (_, table)) in grammars.iter().zip([grammar::EXPR, grammar::STMT]) {
        let contents = read_to_string(dir.join(format!("{}.cs", grammar.base_name))).unwrap();
        let methods = contents
            .lines()
            .filter(|line| line.trim_start().starts_with("T Visit"))
            .count();
        assert_eq!(methods, table.len());
        let classes = contents
            .lines()
            .filter(|line| line.starts_with("public class "))
            .count();
        assert_eq!(classes, table.len());
    }
}

#[test]
fn binary_expression() {
    let dir = temp_dir("binary-expression");
    let grammars = grammar::canonical().unwrap();
    generate(&dir, &grammars, &Options::default()).unwrap();

    let expr = read_to_string(dir.join("Expr.cs")).unwrap();
    assert!(expr.contains("public class Binary : Expr\n"));
    assert!(expr.contains(
        "    public Expr Left;\n    public Token Op;\n    public Expr Right;\n"
    ));
    assert!(expr.contains("    public Binary(Expr left, Token op, Expr right)\n"));
    assert!(expr.contains("        Left = left;\n        Op = op;\n        Right = right;\n"));
    assert!(expr.contains("return visitor.VisitBinaryExpr(this);"));
}

#[test]
fn var_statement() {
    let dir = temp_dir("var-statement");
    let grammars = grammar::canonical().unwrap();
    generate(&dir, &grammars, &Options::default()).unwrap();

    let stmt = read_to_string(dir.join("Stmt.cs")).unwrap();
    assert!(stmt.contains("public class Var : Stmt\n"));
    assert!(stmt.contains("    public Token Name;\n    public Expr Initializer;\n"));
    assert!(stmt.contains("T VisitVarStmt(Var stmt);"));
    assert!(stmt.contains("return visitor.VisitVarStmt(this);"));
}

#[test]
fn output_is_idempotent() {
    let dir = temp_dir("idempotent");
    let grammars = grammar::canonical().unwrap();

    for target in [Target::CSharp, Target::Rust] {
        let options = Options {
            target,
            namespace: None,
        };
        let first: Vec<_> = generate(&dir, &grammars, &options)
            .unwrap()
            .iter()
            .map(|path| std::fs::read(path).unwrap())
            .collect();
        let second: Vec<_> = generate(&dir, &grammars, &options)
            .unwrap()
            .iter()
            .map(|path| std::fs::read(path).unwrap())
            .collect();
        assert_eq!(first, second);
    }

    assert_eq!(file_names(&dir), ["Expr.cs", "Expr.rs", "Stmt.cs", "Stmt.rs"]);
}

#[test]
fn overwrites_existing_files() {
    let dir = temp_dir("overwrite");
    write(dir.join("Expr.cs"), "stale").unwrap();

    let grammars = grammar::canonical().unwrap();
    generate(&dir, &grammars, &Options::default()).unwrap();

    let expr = read_to_string(dir.join("Expr.cs")).unwrap();
    assert!(expr.starts_with("// <auto-generated>"));
}

#[test]
fn rust_target_and_namespace() {
    let dir = temp_dir("rust-target");
    let grammars = grammar::canonical().unwrap();
    let options = Options {
        target: Target::Rust,
        namespace: Some("crate::syntax".into()),
    };
    generate(&dir, &grammars, &options).unwrap();

    assert_eq!(file_names(&dir), ["Expr.rs", "Stmt.rs"]);
    let expr = read_to_string(dir.join("Expr.rs")).unwrap();
    assert!(expr.contains("use crate::syntax::*;"));
    assert!(expr.contains("    fn visit_binary_expr(&mut self, expr: &Binary) -> R;"));
    assert!(expr.contains("    pub left: Box<Expr>,"));
}

#[test]
fn missing_directory_is_an_io_error() {
    let dir = temp_dir("missing-directory").join("does-not-exist");
    let grammars = grammar::canonical().unwrap();

    let err = generate(&dir, &grammars, &Options::default()).unwrap_err();
    let Error::Io { path, .. } = err else {
        panic!("expected i/o error");
    };
    assert_eq!(path, dir.join("Expr.cs"));
    assert!(!dir.exists());
}

#[test]
fn invalid_grammar_writes_nothing() {
    let dir = temp_dir("invalid-grammar");
    let grammars = [
        GrammarSpec::parse("Expr", &["Literal : Object value"]).unwrap(),
        GrammarSpec::parse("Stmt", &["Return : Token keyword, Expr value, Token return"])
            .unwrap(),
    ];

    let err = generate(&dir, &grammars, &Options::default()).unwrap_err();
    assert!(matches!(err, Error::Spec { .. }), "{err:?}");
    assert!(file_names(&dir).is_empty());
}

#[test]
fn check_reports_freshness() {
    let dir = temp_dir("check");
    let grammars = grammar::canonical().unwrap();
    let options = Options::default();

    let freshness = |dir: &Path| -> Vec<Freshness> {
        check(dir, &grammars, &options)
            .unwrap()
            .into_iter()
            .map(|(_, freshness)| freshness)
            .collect()
    };

    assert_eq!(freshness(&dir), [Freshness::Missing, Freshness::Missing]);

    generate(&dir, &grammars, &options).unwrap();
    assert_eq!(freshness(&dir), [Freshness::Fresh, Freshness::Fresh]);

    write(dir.join("Stmt.cs"), "// edited by hand\n").unwrap();
    assert_eq!(freshness(&dir), [Freshness::Fresh, Freshness::Stale]);
}
