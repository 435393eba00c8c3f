//! Configuration discovery and effective settings resolution.
//!
//! vmreflect reads `vmreflect.toml|yaml|yml` from the repository root (or
//! closest ancestor) and merges it with CLI flags to produce an `Effective`
//! config.
//! Defaults:
//! - `sources`: `["src/**/*.ts"]`
//! - `typings`: none
//! - `output`: `human`
//! - `paths`: none
//!
//! Overrides precedence: CLI > config file > defaults.

use crate::alias::PathMappingCfg;
use crate::error::{Error, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Component, Path, PathBuf};

pub const CONFIG_FILES: [&str; 3] = ["vmreflect.toml", "vmreflect.yaml", "vmreflect.yml"];

pub const DEFAULT_SOURCES: &str = "src/**/*.ts";

#[derive(Debug, Default, Deserialize, Clone)]
/// Root configuration loaded from `vmreflect.toml|yaml`.
pub struct VmReflectConfig {
    pub sources: Option<Vec<String>>,
    pub typings: Option<Vec<String>>,
    pub output: Option<String>,
    /// Ordered `[[paths]]` rewrites for import specifiers.
    #[serde(default)]
    pub paths: Vec<PathMappingCfg>,
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by commands after applying precedence.
pub struct Effective {
    pub repo_root: PathBuf,
    pub sources: Vec<String>,
    pub typings: Vec<String>,
    pub output: String,
    pub paths: Vec<PathMappingCfg>,
    /// A config file was found and loaded.
    pub config_found: bool,
}

/// Walk upward from `start` to detect the repository root.
///
/// Stops when a `vmreflect.toml|yaml|yml` or a `.git` directory is found.
pub fn detect_repo_root(start: &Path) -> PathBuf {
    let mut cur = start;
    loop {
        if CONFIG_FILES.iter().any(|f| cur.join(f).exists()) || cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start.to_path_buf(),
        }
    }
}

/// `cwd.join(root)` with `.` and `..` folded lexically.
fn absolute_start(cwd: &Path, root: &str) -> PathBuf {
    let mut out = PathBuf::new();
    for component in cwd.join(root).components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}

/// Load `VmReflectConfig` from `vmreflect.toml` or `vmreflect.yaml|yml` if
/// present. A file that exists but cannot be read or parsed is an error.
pub fn load_config(root: &Path) -> Result<Option<VmReflectConfig>> {
    let toml_path = root.join(CONFIG_FILES[0]);
    if toml_path.exists() {
        let s = read(&toml_path)?;
        let cfg = toml::from_str(&s).map_err(|e| Error::Config {
            path: toml_path.clone(),
            message: e.to_string(),
        })?;
        return Ok(Some(cfg));
    }
    for yml in &CONFIG_FILES[1..] {
        let p = root.join(yml);
        if p.exists() {
            let s = read(&p)?;
            let cfg = serde_yaml::from_str(&s).map_err(|e| Error::Config {
                path: p.clone(),
                message: e.to_string(),
            })?;
            return Ok(Some(cfg));
        }
    }
    Ok(None)
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Resolve `Effective` by merging CLI flags, discovered config, and defaults.
///
/// Empty `cli_sources`/`cli_typings` mean "not given on the command line".
pub fn resolve_effective(
    cli_repo_root: Option<&str>,
    cli_sources: &[String],
    cli_typings: &[String],
    cli_output: Option<&str>,
) -> Result<Effective> {
    let cwd = std::env::current_dir().map_err(|source| Error::Read {
        path: PathBuf::from("."),
        source,
    })?;
    resolve_effective_in(&cwd, cli_repo_root, cli_sources, cli_typings, cli_output)
}

/// Same as [`resolve_effective`] with a relative (or missing) `--repo-root`
/// taken against `cwd`.
pub fn resolve_effective_in(
    cwd: &Path,
    cli_repo_root: Option<&str>,
    cli_sources: &[String],
    cli_typings: &[String],
    cli_output: Option<&str>,
) -> Result<Effective> {
    // Discovery needs an absolute start; `Path::new(".")` has no parent to walk.
    let start = absolute_start(cwd, cli_repo_root.unwrap_or("."));
    let repo_root = detect_repo_root(&start);
    let loaded = load_config(&repo_root)?;
    let config_found = loaded.is_some();
    let cfg = loaded.unwrap_or_default();

    let sources = if cli_sources.is_empty() {
        cfg.sources
            .unwrap_or_else(|| vec![DEFAULT_SOURCES.to_string()])
    } else {
        cli_sources.to_vec()
    };
    let typings = if cli_typings.is_empty() {
        cfg.typings.unwrap_or_default()
    } else {
        cli_typings.to_vec()
    };

    let output = cli_output
        .map(|s| s.to_string())
        .or(cfg.output)
        .unwrap_or_else(|| "human".to_string());
    if output != "human" && output != "json" {
        return Err(Error::Output(output));
    }

    Ok(Effective {
        repo_root,
        sources,
        typings,
        output,
        paths: cfg.paths,
        config_found,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_detect_and_load_toml() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let mut f = fs::File::create(root.join("vmreflect.toml")).unwrap();
        writeln!(
            f,
            "{}",
            r#"
sources = ["app/**/*.ts"]
typings = ["typings/**/*.d.ts"]
output = "json"

[[paths]]
pattern = "^@base/(.*)"
replacement = "app/$1"

[[paths]]
pattern = "^~/"
replacement = "app/"
    "#
        )
        .unwrap();

        // Resolve using explicit repo_root to avoid global CWD races
        let eff = resolve_effective(root.to_str(), &[], &[], None).unwrap();
        assert!(eff.config_found);
        assert_eq!(eff.sources, vec!["app/**/*.ts"]);
        assert_eq!(eff.typings, vec!["typings/**/*.d.ts"]);
        assert_eq!(eff.output, "json");
        assert_eq!(eff.paths.len(), 2);
        assert_eq!(eff.paths[0].replacement, "app/$1");
    }

    #[test]
    fn test_load_yaml_and_defaults() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(
            root.join("vmreflect.yaml"),
            "paths:\n  - pattern: \"^@/\"\n    replacement: \"src/\"\n",
        )
        .unwrap();

        let eff = resolve_effective(root.to_str(), &[], &[], None).unwrap();
        assert_eq!(eff.sources, vec![DEFAULT_SOURCES]);
        assert!(eff.typings.is_empty());
        assert_eq!(eff.output, "human");
        assert_eq!(eff.paths[0].pattern, "^@/");
    }

    #[test]
    fn test_cli_takes_precedence() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(
            root.join("vmreflect.toml"),
            "sources = [\"a/**/*.ts\"]\noutput = \"json\"\n",
        )
        .unwrap();

        let eff = resolve_effective(
            root.to_str(),
            &["b/**/*.ts".to_string()],
            &["t/*.d.ts".to_string()],
            Some("human"),
        )
        .unwrap();
        assert_eq!(eff.sources, vec!["b/**/*.ts"]);
        assert_eq!(eff.typings, vec!["t/*.d.ts"]);
        assert_eq!(eff.output, "human");
    }

    #[test]
    fn test_discovery_walks_up_to_config() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("vmreflect.toml"), "").unwrap();
        let nested = root.join("src/views");
        fs::create_dir_all(&nested).unwrap();

        let eff = resolve_effective(nested.to_str(), &[], &[], None).unwrap();
        assert_eq!(eff.repo_root, root);
        assert!(eff.config_found);
    }

    #[test]
    fn test_default_root_walks_up_from_working_dir() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("vmreflect.toml"), "sources = [\"app/**/*.ts\"]\n").unwrap();
        let views = root.join("app/views");
        fs::create_dir_all(&views).unwrap();

        let eff = resolve_effective_in(&views, None, &[], &[], None).unwrap();
        assert_eq!(eff.repo_root, root);
        assert!(eff.config_found);
        assert_eq!(eff.sources, vec!["app/**/*.ts"]);

        let eff = resolve_effective_in(&views, Some(".."), &[], &[], None).unwrap();
        assert_eq!(eff.repo_root, root);
    }

    #[test]
    fn test_invalid_config_and_output_are_errors() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("vmreflect.toml"), "sources = 3").unwrap();
        let err = resolve_effective(root.to_str(), &[], &[], None).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));

        fs::write(root.join("vmreflect.toml"), "").unwrap();
        let err = resolve_effective(root.to_str(), &[], &[], Some("xml")).unwrap_err();
        assert!(matches!(err, Error::Output(ref o) if o == "xml"));
    }
}
