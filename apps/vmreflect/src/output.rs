//! Output rendering for module listings, declarations and binding queries.
//!
//! Supports `human` (default) and `json` outputs. Every JSON document carries
//! an `errors` array with the load problems that did not stop the command.

use crate::error::Error;
use crate::load::LoadSummary;
use crate::models::{DeclarationReport, MemberReport, ModuleEntry, QueryReport};
use owo_colors::OwoColorize;
use serde_json::json;
use serde_json::Value as JsonVal;

fn use_colors(output: &str) -> bool {
    output != "json" && crate::utils::colors_enabled()
}

fn emit_json(value: &JsonVal) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("{} {}", crate::utils::error_prefix(), e),
    }
}

/// Print non-fatal load errors as warnings (human mode only).
pub fn print_load_errors(errors: &[Error], output: &str) {
    if output == "json" {
        return;
    }
    for e in errors {
        eprintln!("{} {}", crate::utils::warn_prefix(), e);
    }
}

/// Print registered modules.
pub fn print_modules(entries: &[ModuleEntry], summary: &LoadSummary, output: &str, errors: &[Error]) {
    match output {
        "json" => emit_json(&compose_modules_json(entries, summary, errors)),
        _ => {
            let color = use_colors(output);
            for m in entries {
                let key = if color {
                    m.key.clone().bold().to_string()
                } else {
                    m.key.clone()
                };
                println!("{} ({}, {} declarations)", key, m.kind, m.declarations);
            }
            let line = format!(
                "— Summary — files={} modules={} ambient={}",
                summary.files, summary.modules, summary.ambient
            );
            if color {
                println!("{}", line.bold());
            } else {
                println!("{}", line);
            }
        }
    }
}

/// Print a resolved declaration with its members.
pub fn print_declaration(report: &DeclarationReport, output: &str, errors: &[Error]) {
    match output {
        "json" => emit_json(&compose_declaration_json(Some(report), errors)),
        _ => {
            let color = use_colors(output);
            let head = format!("{} {}", report.kind, report.name);
            let loc = format!(
                "{}:{}:{}",
                report.location.module, report.location.line, report.location.column
            );
            if color {
                println!("{} {} {}", head.bold(), "at".bright_black(), loc.cyan());
            } else {
                println!("{} at {}", head, loc);
            }
            if !report.bases.is_empty() {
                println!("  extends {}", report.bases.join(", "));
            }
            for m in &report.members {
                println!("  {}", member_line(m, color));
            }
        }
    }
}

fn member_line(m: &MemberReport, color: bool) -> String {
    let mut name = m.name.clone().unwrap_or_else(|| "<unnamed>".to_string());
    if m.optional {
        name.push('?');
    }
    let ty = match (&m.type_name, m.array) {
        (Some(t), true) => format!("{}[]", t),
        (Some(t), false) => t.clone(),
        (None, _) => "?".to_string(),
    };
    let kind = if m.is_static {
        format!("static {}", m.kind)
    } else {
        m.kind.to_string()
    };
    let origin = m
        .inherited_from
        .as_ref()
        .map(|o| format!(" (from {})", o))
        .unwrap_or_default();
    if color {
        format!(
            "{} {}: {}{}",
            kind.bright_black(),
            name.bold(),
            ty.green(),
            origin.bright_black()
        )
    } else {
        format!("{} {}: {}{}", kind, name, ty, origin)
    }
}

/// Print the type name at the end of a binding path.
pub fn print_query(report: &QueryReport, output: &str, errors: &[Error]) {
    match output {
        "json" => emit_json(&compose_query_json(report, errors)),
        _ => match &report.result {
            Some(t) => println!("{}", t),
            None => {
                let msg = format!(
                    "{}.{} does not resolve to a known type (from {})",
                    report.type_name, report.path, report.module
                );
                if use_colors(output) {
                    println!("{}", msg.yellow());
                } else {
                    println!("{}", msg);
                }
            }
        },
    }
}

/// Print the JSON document of a command that found nothing. Human mode
/// prints nothing here; the caller reports on stderr.
pub fn print_missing(doc: &JsonVal, output: &str) {
    if output == "json" {
        emit_json(doc);
    }
}

fn error_strings(errors: &[Error]) -> Vec<String> {
    errors.iter().map(|e| e.to_string()).collect()
}

/// Compose modules JSON object (pure) for testing/snapshot purposes.
pub fn compose_modules_json(entries: &[ModuleEntry], summary: &LoadSummary, errors: &[Error]) -> JsonVal {
    json!({
        "modules": entries,
        "summary": {
            "files": summary.files,
            "modules": summary.modules,
            "ambient": summary.ambient,
        },
        "errors": error_strings(errors),
    })
}

/// Compose declaration JSON object (pure); `null` when not found.
pub fn compose_declaration_json(report: Option<&DeclarationReport>, errors: &[Error]) -> JsonVal {
    json!({
        "declaration": report,
        "errors": error_strings(errors),
    })
}

/// Compose query JSON object (pure).
pub fn compose_query_json(report: &QueryReport, errors: &[Error]) -> JsonVal {
    json!({
        "query": report,
        "errors": error_strings(errors),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Location;
    use std::path::PathBuf;

    fn report() -> DeclarationReport {
        DeclarationReport {
            name: "Value".into(),
            kind: "class",
            location: Location {
                module: "src/foo".into(),
                line: 3,
                column: 5,
            },
            bases: vec!["Base<T>".into()],
            members: vec![
                MemberReport {
                    name: Some("items".into()),
                    kind: "property",
                    type_name: Some("Item".into()),
                    array: true,
                    optional: false,
                    is_static: false,
                    inherited_from: None,
                },
                MemberReport {
                    name: Some("base".into()),
                    kind: "property",
                    type_name: Some("string".into()),
                    array: false,
                    optional: true,
                    is_static: false,
                    inherited_from: Some("Base".into()),
                },
            ],
        }
    }

    #[test]
    fn test_compose_declaration_json_shape() {
        let out = compose_declaration_json(Some(&report()), &[]);
        let decl = &out["declaration"];
        assert_eq!(decl["kind"], "class");
        assert_eq!(decl["location"]["module"], "src/foo");
        assert_eq!(decl["bases"][0], "Base<T>");
        assert_eq!(decl["members"][0]["type"], "Item");
        assert_eq!(decl["members"][0]["array"], true);
        assert!(decl["members"][0].get("inheritedFrom").is_none());
        assert_eq!(decl["members"][1]["inheritedFrom"], "Base");
        assert_eq!(out["errors"].as_array().unwrap().len(), 0);

        let missing = compose_declaration_json(None, &[]);
        assert!(missing["declaration"].is_null());
    }

    #[test]
    fn test_compose_modules_json_with_errors() {
        let entries = vec![ModuleEntry {
            key: "src/foo".into(),
            kind: "source",
            declarations: 2,
        }];
        let summary = LoadSummary {
            files: 2,
            modules: 1,
            ambient: 0,
        };
        let errors = vec![Error::Read {
            path: PathBuf::from("src/broken.ts"),
            source: std::io::Error::new(std::io::ErrorKind::InvalidData, "bad utf-8"),
        }];
        let out = compose_modules_json(&entries, &summary, &errors);
        assert_eq!(out["modules"][0]["key"], "src/foo");
        assert_eq!(out["summary"]["files"], 2);
        assert!(out["errors"][0]
            .as_str()
            .unwrap()
            .contains("src/broken.ts"));
    }

    #[test]
    fn test_compose_query_json() {
        let q = QueryReport {
            type_name: "Foo".into(),
            path: "value.base".into(),
            module: "src/foo".into(),
            result: Some("string".into()),
        };
        let out = compose_query_json(&q, &[]);
        assert_eq!(out["query"]["type"], "Foo");
        assert_eq!(out["query"]["result"], "string");
    }

    #[test]
    fn test_unresolved_query_json_keeps_errors() {
        let q = QueryReport {
            type_name: "Foo".into(),
            path: "value".into(),
            module: "src/missing".into(),
            result: None,
        };
        let errors = vec![Error::Read {
            path: PathBuf::from("src/broken.ts"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        }];
        let out = compose_query_json(&q, &errors);
        assert!(out["query"]["result"].is_null());
        assert_eq!(out["query"]["module"], "src/missing");
        assert_eq!(out["errors"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_member_line_without_colors() {
        let r = report();
        assert_eq!(member_line(&r.members[0], false), "property items: Item[]");
        assert_eq!(
            member_line(&r.members[1], false),
            "property base?: string (from Base)"
        );
    }
}
