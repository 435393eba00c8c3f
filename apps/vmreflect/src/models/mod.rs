//! Report models shared by the CLI printers.

use crate::registry::{ModuleUnit, Registry};
use crate::resolve::{FoundMember, Resolved};
use crate::syntax::{Member, Statement};
use crate::types;
use serde::Serialize;

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
/// A registered module key.
pub struct ModuleEntry {
    pub key: String,
    pub kind: &'static str,
    /// Classes and interfaces declared directly in the unit.
    pub declarations: usize,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub module: String,
    pub line: u32,
    pub column: u32,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
/// A member with its resolvable type name.
pub struct MemberReport {
    pub name: Option<String>,
    pub kind: &'static str,
    #[serde(rename = "type")]
    pub type_name: Option<String>,
    pub array: bool,
    pub optional: bool,
    #[serde(rename = "static")]
    pub is_static: bool,
    /// Declaration the member comes from, when inherited.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inherited_from: Option<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
/// A resolved class or interface.
pub struct DeclarationReport {
    pub name: String,
    pub kind: &'static str,
    pub location: Location,
    pub bases: Vec<String>,
    pub members: Vec<MemberReport>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
/// Result of following a dotted binding path.
pub struct QueryReport {
    #[serde(rename = "type")]
    pub type_name: String,
    pub path: String,
    pub module: String,
    pub result: Option<String>,
}

pub fn module_entries(registry: &Registry) -> Vec<ModuleEntry> {
    registry
        .units()
        .map(|unit| ModuleEntry {
            key: unit.key().to_string(),
            kind: unit.kind(),
            declarations: match unit {
                ModuleUnit::Source(s) => s
                    .statements
                    .iter()
                    .filter_map(Statement::as_declaration)
                    .count(),
                ModuleUnit::Ambient(n) => match &n.body {
                    crate::syntax::NamespaceBody::Block(statements) => statements
                        .iter()
                        .filter_map(Statement::as_declaration)
                        .count(),
                    _ => 0,
                },
            },
        })
        .collect()
}

fn member_report(member: &Member, inherited_from: Option<String>) -> MemberReport {
    let ty = types::member_type(member);
    MemberReport {
        name: member.name.clone(),
        kind: member.kind.as_str(),
        type_name: ty.and_then(types::type_name).map(str::to_string),
        array: ty.is_some_and(types::is_array),
        optional: member.optional,
        is_static: member.is_static,
        inherited_from,
    }
}

impl DeclarationReport {
    /// Report of `resolved` with its own members.
    pub fn own(resolved: Resolved<'_>) -> Self {
        let members = resolved
            .declaration
            .members()
            .iter()
            .map(|m| member_report(m, None))
            .collect();
        Self::with_members(resolved, members)
    }

    /// Report of `resolved` with the given member list, which may include
    /// members found on its bases.
    pub fn inherited(resolved: Resolved<'_>, found: &[FoundMember<'_>]) -> Self {
        let members = found
            .iter()
            .map(|f| {
                let from = if std::ptr::eq(f.owner.declaration, resolved.declaration) {
                    None
                } else {
                    f.owner.declaration.name().map(str::to_string)
                };
                member_report(f.member, from)
            })
            .collect();
        Self::with_members(resolved, members)
    }

    fn with_members(resolved: Resolved<'_>, members: Vec<MemberReport>) -> Self {
        let decl = resolved.declaration;
        let span = decl.span();
        Self {
            name: decl.name().unwrap_or_default().to_string(),
            kind: decl.kind(),
            location: Location {
                module: resolved.module.key().to_string(),
                line: span.line,
                column: span.column,
            },
            bases: decl.bases().iter().map(|h| h.text.clone()).collect(),
            members,
        }
    }
}
