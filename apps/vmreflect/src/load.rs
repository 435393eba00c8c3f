//! Bulk ingestion from the filesystem.
//!
//! Files matched by the source and typings globs are read and parsed in
//! parallel, then registered one by one in discovery order. Unreadable files
//! are collected and loading continues.

use crate::alias::PathMappings;
use crate::error::{Error, Result};
use crate::reflection::Reflection;
use crate::registry::{module_path, normalize, SourceUnit};
use glob::glob;
use indexmap::IndexSet;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const SOURCE_EXTENSIONS: &[&str] = &["ts", "tsx", "mts", "cts", "js", "jsx", "mjs", "cjs"];

/// Counts reported after loading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub files: usize,
    pub modules: usize,
    pub ambient: usize,
}

/// Build a session from `sources` and `typings` globs relative to `root`.
///
/// Invalid glob patterns fail the whole load; per-file read errors are
/// returned alongside the session.
pub fn load(
    root: &Path,
    sources: &[String],
    typings: &[String],
    mappings: PathMappings,
) -> Result<(Reflection, LoadSummary, Vec<Error>)> {
    let mut errors = Vec::new();
    let source_files = expand(root, sources, &mut errors)?;
    let typing_files = expand(root, typings, &mut errors)?;

    let parsed: Vec<Result<SourceUnit>> = source_files
        .par_iter()
        .map(|path| {
            let text = read(path)?;
            Ok(SourceUnit::parse(module_key(root, path), &text))
        })
        .collect();
    let typing_texts: Vec<Result<String>> = typing_files.par_iter().map(|p| read(p)).collect();

    let mut reflection = Reflection::with_mappings(mappings);
    let mut summary = LoadSummary {
        files: source_files.len() + typing_files.len(),
        ..LoadSummary::default()
    };
    for unit in parsed {
        match unit {
            Ok(unit) => {
                if reflection.insert(unit) {
                    summary.modules += 1;
                }
            }
            Err(e) => {
                warn!("{}", e);
                errors.push(e);
            }
        }
    }
    for text in typing_texts {
        match text {
            Ok(text) => summary.ambient += reflection.add_typings(&text),
            Err(e) => {
                warn!("{}", e);
                errors.push(e);
            }
        }
    }
    debug!(
        files = summary.files,
        modules = summary.modules,
        ambient = summary.ambient,
        "loaded"
    );
    Ok((reflection, summary, errors))
}

/// Files matched by `patterns` under `root`, sorted within each pattern and
/// de-duplicated across patterns.
fn expand(root: &Path, patterns: &[String], errors: &mut Vec<Error>) -> Result<Vec<PathBuf>> {
    let mut files: IndexSet<PathBuf> = IndexSet::new();
    for pat in patterns {
        let abs_glob = root.join(pat);
        let pattern = abs_glob.to_string_lossy().to_string();
        let entries = glob(&pattern).map_err(|source| Error::Glob {
            pattern: pat.clone(),
            source,
        })?;
        let mut matched = Vec::new();
        for entry in entries {
            match entry {
                Ok(p) if p.is_file() => matched.push(p),
                Ok(_) => {}
                Err(e) => errors.push(Error::Read {
                    path: e.path().to_path_buf(),
                    source: e.into_error(),
                }),
            }
        }
        matched.sort();
        files.extend(matched);
    }
    Ok(files.into_iter().collect())
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Registry key for a file under `root`: repo-relative, extension stripped.
pub fn module_key(root: &Path, file: &Path) -> String {
    let rel = pathdiff::diff_paths(file, root).unwrap_or_else(|| file.to_path_buf());
    module_path(&rel.to_string_lossy())
}

/// Registry key for a module given on the command line, either as a file
/// path (`src/foo.ts`, possibly absolute) or as a module path (`src/foo`).
pub fn module_arg(root: &Path, arg: &str) -> String {
    let path = Path::new(arg);
    let rel = if path.is_absolute() {
        pathdiff::diff_paths(path, root).unwrap_or_else(|| path.to_path_buf())
    } else {
        path.to_path_buf()
    };
    let rel = rel.to_string_lossy();
    let has_source_ext = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| SOURCE_EXTENSIONS.contains(&e));
    if has_source_ext {
        module_path(&rel)
    } else {
        normalize(&rel)
    }
}
