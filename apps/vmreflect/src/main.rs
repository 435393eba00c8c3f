//! vmreflect CLI binary entry point.
//! Loads sources per the effective config and prints resolution results.

use clap::Parser;
use tracing_subscriber::EnvFilter;
use vmreflect::alias::PathMappings;
use vmreflect::cli::{Cli, Commands, CommonArgs};
use vmreflect::load::{self, LoadSummary};
use vmreflect::models::{self, DeclarationReport, QueryReport};
use vmreflect::reflection::Reflection;
use vmreflect::{config, output, utils, Error};

/// Install the stderr subscriber. `VMREFLECT_LOG` takes `RUST_LOG` syntax;
/// `--verbose` forces `debug`.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        match std::env::var("VMREFLECT_LOG") {
            Ok(val) => EnvFilter::builder().parse_lossy(val),
            Err(_) => EnvFilter::new("warn"),
        }
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn fail(message: impl std::fmt::Display, code: i32) -> ! {
    eprintln!("{} {}", utils::error_prefix(), message);
    std::process::exit(code);
}

/// Everything a query command needs after loading.
struct Session {
    eff: config::Effective,
    reflection: Reflection,
    summary: LoadSummary,
    errors: Vec<Error>,
}

/// Resolve config, compile mappings and load sources. Config problems exit
/// with code 2.
fn open(common: &CommonArgs) -> Session {
    init_tracing(common.verbose);
    let eff = config::resolve_effective(
        common.repo_root.as_deref(),
        &common.sources,
        &common.typings,
        common.output.as_deref(),
    )
    .unwrap_or_else(|e| fail(e, 2));
    // Friendly note if no config was found
    if !eff.config_found && eff.output != "json" {
        eprintln!(
            "{} {}",
            utils::note_prefix(),
            "No vmreflect.toml found; using defaults."
        );
    }
    let mappings = PathMappings::from_config(&eff.paths).unwrap_or_else(|e| fail(e, 2));
    let (reflection, summary, errors) =
        load::load(&eff.repo_root, &eff.sources, &eff.typings, mappings)
            .unwrap_or_else(|e| fail(e, 2));
    if summary.files == 0 && eff.output != "json" {
        eprintln!(
            "{} {}",
            utils::info_prefix(),
            format!("No files matched [{}]", eff.sources.join(", "))
        );
    }
    output::print_load_errors(&errors, &eff.output);
    Session {
        eff,
        reflection,
        summary,
        errors,
    }
}

/// Emit the empty declaration document (json) and exit 1.
fn missing(session: &Session, message: String) -> ! {
    let doc = output::compose_declaration_json(None, &session.errors);
    output::print_missing(&doc, &session.eff.output);
    fail(message, 1)
}

fn unregistered(key: &str) -> String {
    format!("module '{}' is not registered", key)
}

fn not_found(session: &Session, type_name: &str, module: &str) -> ! {
    missing(
        session,
        format!("'{}' does not resolve from module '{}'", type_name, module),
    )
}

fn main() {
    let cli = Cli::parse();
    match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Modules { common } => {
            let s = open(&common);
            let entries = models::module_entries(s.reflection.registry());
            output::print_modules(&entries, &s.summary, &s.eff.output, &s.errors);
        }
        Commands::Resolve {
            type_name,
            module,
            common,
        } => {
            let s = open(&common);
            let key = load::module_arg(&s.eff.repo_root, &module);
            let resolver = s.reflection.resolver();
            let Some(unit) = s.reflection.registry().lookup(&key) else {
                missing(&s, unregistered(&key));
            };
            let Some(found) = resolver.resolve(unit, &type_name, true) else {
                not_found(&s, &type_name, &key);
            };
            let report = DeclarationReport::own(found);
            output::print_declaration(&report, &s.eff.output, &s.errors);
        }
        Commands::Members {
            type_name,
            module,
            common,
        } => {
            let s = open(&common);
            let key = load::module_arg(&s.eff.repo_root, &module);
            let resolver = s.reflection.resolver();
            let Some(unit) = s.reflection.registry().lookup(&key) else {
                missing(&s, unregistered(&key));
            };
            let Some(found) = resolver.resolve(unit, &type_name, true) else {
                not_found(&s, &type_name, &key);
            };
            let members = resolver.members(found);
            let report = DeclarationReport::inherited(found, &members);
            output::print_declaration(&report, &s.eff.output, &s.errors);
        }
        Commands::Query {
            type_name,
            path,
            module,
            common,
        } => {
            let s = open(&common);
            let key = load::module_arg(&s.eff.repo_root, &module);
            let resolver = s.reflection.resolver();
            let Some(unit) = s.reflection.registry().lookup(&key) else {
                let report = QueryReport {
                    type_name,
                    path,
                    module: key.clone(),
                    result: None,
                };
                let doc = output::compose_query_json(&report, &s.errors);
                output::print_missing(&doc, &s.eff.output);
                fail(unregistered(&key), 1);
            };
            let result = resolver.resolve_path(unit, &type_name, &path);
            let report = QueryReport {
                type_name,
                path,
                module: key,
                result: result.map(str::to_string),
            };
            output::print_query(&report, &s.eff.output, &s.errors);
            if report.result.is_none() {
                std::process::exit(1);
            }
        }
    }
}
