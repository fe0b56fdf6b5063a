use std::path::PathBuf;

use astgen::{Freshness, Options, Target, grammar};

macro_rules! bail {
    ($($tt:tt)*) => {
        eprintln!($($tt)*);
        ::std::process::exit(1);
    };
}

fn main() {
    let args: Args = argh::from_env();

    let options = Options {
        target: args.target.unwrap_or_default(),
        namespace: args.namespace,
    };
    let grammars = match grammar::canonical() {
        Ok(grammars) => grammars,
        Err(err) => {
            bail!("{err}");
        }
    };

    if args.check {
        check(&args.output_dir, &grammars, &options);
    } else {
        generate(&args.output_dir, &grammars, &options);
    }
}

#[derive(argh::FromArgs)]
/// Generate AST node types and visitors for the `Expr` and `Stmt` grammars.
struct Args {
    /// output language: `csharp` (default) or `rust`
    #[argh(option, short = 't')]
    target: Option<Target>,

    /// namespace (C#) or module path to import (Rust) in generated files
    #[argh(option, short = 'n')]
    namespace: Option<String>,

    /// compare existing files against freshly generated output instead of writing
    #[argh(switch)]
    check: bool,

    /// directory to write `Expr` and `Stmt` files into
    #[argh(positional)]
    output_dir: PathBuf,
}

fn generate(dir: &std::path::Path, grammars: &[astgen::GrammarSpec<'_>], options: &Options) {
    match astgen::generate(dir, grammars, options) {
        Ok(paths) => {
            for path in paths {
                eprintln!("wrote {}", path.display());
            }
        }
        Err(err) => {
            bail!("{err}");
        }
    }
}

fn check(dir: &std::path::Path, grammars: &[astgen::GrammarSpec<'_>], options: &Options) {
    let report = match astgen::check(dir, grammars, options) {
        Ok(report) => report,
        Err(err) => {
            bail!("{err}");
        }
    };

    let mut outdated = false;
    for (path, freshness) in report {
        match freshness {
            Freshness::Fresh => {}
            Freshness::Stale => {
                eprintln!("stale: {}", path.display());
                outdated = true;
            }
            Freshness::Missing => {
                eprintln!("missing: {}", path.display());
                outdated = true;
            }
        }
    }

    if outdated {
        bail!("generated files are out of date, re-run without `--check`");
    }
}
