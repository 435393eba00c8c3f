//! vmreflect core library.
//!
//! Resolves TypeScript type names to their class or interface declarations
//! across modules, so template lint rules can ask what shape a bound
//! view-model property has without a full type checker.
//!
//! High-level modules:
//! - `syntax`: Tolerant declaration-level TypeScript lexer and parser.
//! - `registry`: Parsed modules keyed by normalized module path.
//! - `alias`: Ordered regex rewrites for import specifiers.
//! - `resolve`: Declaration lookup through imports and re-exports, member and
//!   binding-path queries.
//! - `types`: Member types and the type names they resolve to.
//! - `reflection`: A session owning the registry and mappings.
//! - `load`: Glob discovery and parallel ingestion.
//! - `config`: Discovery and effective configuration resolution.
//! - `cli`: CLI argument parsing (binary uses this).
//! - `models`: Report structs for printers.
//! - `output`: Human/JSON printers.
//! - `utils`: Supporting helpers.
//!
//! ```
//! use vmreflect::reflection::Reflection;
//!
//! let mut reflection = Reflection::new();
//! reflection.add_source("./foo.ts", "import {Base} from './submodule';\nclass Value extends Base {}");
//! reflection.add_source("./submodule/index.ts", "export class Base { base: string; }");
//!
//! let resolver = reflection.resolver();
//! let found = resolver.resolve_in("foo", "Base").unwrap();
//! assert_eq!(found.module.key(), "submodule/index");
//! assert_eq!(resolver.resolve_path(found.module, "Base", "base"), Some("string"));
//! ```
pub mod alias;
pub mod cli;
pub mod config;
pub mod error;
pub mod load;
pub mod models;
pub mod output;
pub mod reflection;
pub mod registry;
pub mod resolve;
pub mod syntax;
pub mod types;
pub mod utils;

pub use error::{Error, Result};
