//! CLI argument parsing via `clap`.

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "vmreflect",
    version,
    about = "Resolve view-model types across TypeScript modules",
    long_about = "vmreflect — parse a TypeScript source tree and answer which class or interface a type name refers to, following imports, re-exports, directory indexes and path aliases.\n\nConfiguration precedence: CLI > vmreflect.toml > defaults.",
    after_help = "Examples:\n  vmreflect modules\n  vmreflect resolve Base --module src/foo.ts\n  vmreflect members Foo --module src/foo\n  vmreflect query Foo value.base --module src/foo.ts --output json",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Args, Debug, Clone, Default)]
/// Options shared by every command that loads sources.
pub struct CommonArgs {
    #[arg(long, help = "Repository root (default: current dir)")]
    pub repo_root: Option<String>,
    #[arg(long = "source", help = "Source glob, repeatable (default: src/**/*.ts)")]
    pub sources: Vec<String>,
    #[arg(long = "typings", help = "Ambient typings glob, repeatable")]
    pub typings: Vec<String>,
    #[arg(long, help = "Output mode: human|json (default: human)")]
    pub output: Option<String>,
    #[arg(long, short, action = clap::ArgAction::SetTrue, help = "Log ingestion and resolution steps to stderr")]
    pub verbose: bool,
}

#[derive(Subcommand)]
/// Supported subcommands.
pub enum Commands {
    /// Show version
    #[command(about = "Show version", long_about = "Print the current vmreflect version.")]
    Version,
    /// List registered modules
    #[command(
        about = "List registered modules",
        long_about = "Load sources and typings and print every registered module key in registration order.",
        after_help = "Examples:\n  vmreflect modules --source 'app/**/*.ts' --typings 'typings/*.d.ts'"
    )]
    Modules {
        #[command(flatten)]
        common: CommonArgs,
    },
    /// Resolve a type name from a module
    #[command(
        about = "Resolve a type name",
        long_about = "Find the class or interface TYPE refers to from MODULE: local declarations first, then imports (with path mappings), then re-exports of the imported module.",
        after_help = "Examples:\n  vmreflect resolve Base --module src/foo.ts\n  vmreflect resolve 'Base<T>' --module src/foo"
    )]
    Resolve {
        #[arg(help = "Type name as written in the module")]
        type_name: String,
        #[arg(long, help = "Module to resolve from (file path or module path)")]
        module: String,
        #[command(flatten)]
        common: CommonArgs,
    },
    /// List members including inherited ones
    #[command(
        about = "List members including inherited ones",
        long_about = "Resolve TYPE from MODULE and print its members followed by members of its base types."
    )]
    Members {
        #[arg(help = "Type name as written in the module")]
        type_name: String,
        #[arg(long, help = "Module to resolve from (file path or module path)")]
        module: String,
        #[command(flatten)]
        common: CommonArgs,
    },
    /// Follow a dotted binding path
    #[command(
        about = "Follow a binding path",
        long_about = "Resolve TYPE from MODULE, then follow PATH (e.g. value.base) member by member and print the type name at its end. Exits 1 when the path cannot be resolved.",
        after_help = "Examples:\n  vmreflect query Foo value.base --module src/foo.ts"
    )]
    Query {
        #[arg(help = "Type name the path starts from")]
        type_name: String,
        #[arg(help = "Dotted member path")]
        path: String,
        #[arg(long, help = "Module to resolve from (file path or module path)")]
        module: String,
        #[command(flatten)]
        common: CommonArgs,
    },
}
