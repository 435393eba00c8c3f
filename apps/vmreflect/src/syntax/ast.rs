//! Declaration-level syntax tree.
//!
//! The tree keeps exactly what symbol resolution needs: imports, exports,
//! classes, interfaces and namespaces, plus the members and declared types of
//! classes and interfaces. Any other statement is kept as an opaque
//! [`Statement::Other`] so statement order still mirrors the source.

use serde::Serialize;

/// Byte range plus the 1-based line/column of its first character.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: u32,
    pub column: u32,
}

impl Span {
    pub fn new(start: usize, end: usize, line: u32, column: u32) -> Self {
        Self {
            start,
            end,
            line,
            column,
        }
    }

    /// Span from the start of `self` to the end of `other`.
    pub fn to(self, other: Span) -> Span {
        Span {
            end: other.end.max(self.start),
            ..self
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Declaration(Declaration),
    Import(ImportDecl),
    Export(ExportDecl),
    Namespace(NamespaceDecl),
    Other(Span),
}

impl Statement {
    pub fn span(&self) -> Span {
        match self {
            Statement::Declaration(d) => d.span(),
            Statement::Import(i) => i.span,
            Statement::Export(e) => e.span,
            Statement::Namespace(n) => n.span,
            Statement::Other(span) => *span,
        }
    }

    pub fn as_declaration(&self) -> Option<&Declaration> {
        match self {
            Statement::Declaration(d) => Some(d),
            _ => None,
        }
    }
}

/// Modifiers that can precede a declaration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub exported: bool,
    pub is_default: bool,
    pub ambient: bool,
    pub is_abstract: bool,
}

/// A named class or interface.
#[derive(Debug, Clone, PartialEq)]
pub enum Declaration {
    Class(ClassDecl),
    Interface(InterfaceDecl),
}

impl Declaration {
    pub fn name(&self) -> Option<&str> {
        match self {
            Declaration::Class(c) => c.name.as_deref(),
            Declaration::Interface(i) => Some(&i.name),
        }
    }

    pub fn members(&self) -> &[Member] {
        match self {
            Declaration::Class(c) => &c.members,
            Declaration::Interface(i) => &i.members,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Declaration::Class(c) => c.span,
            Declaration::Interface(i) => i.span,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Declaration::Class(_) => "class",
            Declaration::Interface(_) => "interface",
        }
    }

    /// Base types in lookup order: a class's `extends`, an interface's
    /// `extends` list. `implements` clauses contribute no members.
    pub fn bases(&self) -> Vec<&Heritage> {
        match self {
            Declaration::Class(c) => c.extends.iter().collect(),
            Declaration::Interface(i) => i.extends.iter().collect(),
        }
    }

    pub fn member(&self, name: &str) -> Option<&Member> {
        self.members()
            .iter()
            .find(|m| m.name.as_deref() == Some(name))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassDecl {
    pub name: Option<String>,
    pub type_params: Vec<String>,
    pub extends: Option<Heritage>,
    pub implements: Vec<Heritage>,
    pub members: Vec<Member>,
    pub modifiers: Modifiers,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InterfaceDecl {
    pub name: String,
    pub type_params: Vec<String>,
    pub extends: Vec<Heritage>,
    pub members: Vec<Member>,
    pub modifiers: Modifiers,
    pub span: Span,
}

/// One entry of an `extends`/`implements` clause.
#[derive(Debug, Clone, PartialEq)]
pub struct Heritage {
    /// Source text, type arguments included (`Base<T>`).
    pub text: String,
    pub ty: TypeNode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MemberKind {
    Property,
    Method,
    GetAccessor,
    SetAccessor,
    Constructor,
    IndexSignature,
    StaticBlock,
    PropertySignature,
    MethodSignature,
    CallSignature,
    ConstructSignature,
}

impl MemberKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MemberKind::Property => "property",
            MemberKind::Method => "method",
            MemberKind::GetAccessor => "get",
            MemberKind::SetAccessor => "set",
            MemberKind::Constructor => "constructor",
            MemberKind::IndexSignature => "index",
            MemberKind::StaticBlock => "static-block",
            MemberKind::PropertySignature => "property-signature",
            MemberKind::MethodSignature => "method-signature",
            MemberKind::CallSignature => "call-signature",
            MemberKind::ConstructSignature => "construct-signature",
        }
    }
}

/// A class element or interface type element.
#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    pub kind: MemberKind,
    /// `None` for computed names, signatures and static blocks.
    pub name: Option<String>,
    pub ty: Option<TypeNode>,
    pub is_static: bool,
    pub optional: bool,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    String,
    Number,
    Boolean,
    Any,
    Unknown,
    Void,
    Never,
    Object,
    Undefined,
    Null,
    Symbol,
    BigInt,
    This,
}

impl Keyword {
    pub fn from_word(word: &str) -> Option<Self> {
        Some(match word {
            "string" => Keyword::String,
            "number" => Keyword::Number,
            "boolean" => Keyword::Boolean,
            "any" => Keyword::Any,
            "unknown" => Keyword::Unknown,
            "void" => Keyword::Void,
            "never" => Keyword::Never,
            "object" => Keyword::Object,
            "undefined" => Keyword::Undefined,
            "null" => Keyword::Null,
            "symbol" => Keyword::Symbol,
            "bigint" => Keyword::BigInt,
            "this" => Keyword::This,
            _ => return None,
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::String => "string",
            Keyword::Number => "number",
            Keyword::Boolean => "boolean",
            Keyword::Any => "any",
            Keyword::Unknown => "unknown",
            Keyword::Void => "void",
            Keyword::Never => "never",
            Keyword::Object => "object",
            Keyword::Undefined => "undefined",
            Keyword::Null => "null",
            Keyword::Symbol => "symbol",
            Keyword::BigInt => "bigint",
            Keyword::This => "this",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypeNode {
    Keyword(Keyword),
    /// `Foo`, `ns.Foo`, `Map<K, V>`.
    Reference {
        name: String,
        args: Vec<TypeNode>,
    },
    /// `T[]`.
    Array(Box<TypeNode>),
    Tuple(Vec<TypeNode>),
    Union(Vec<TypeNode>),
    Intersection(Vec<TypeNode>),
    /// String, number, boolean or template literal type, as written.
    Literal(String),
    /// Function or constructor type.
    Function,
    TypeLiteral(Vec<Member>),
    Parenthesized(Box<TypeNode>),
    /// `typeof x`.
    Query(String),
    /// Conditional, mapped, indexed access, predicates, import types ...
    Other,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImportDecl {
    pub specifier: String,
    /// `None` for side-effect imports (`import "x"`).
    pub clause: Option<ImportClause>,
    pub type_only: bool,
    pub span: Span,
}

impl ImportDecl {
    /// Elements of a `{ ... }` binding list; empty for every other form.
    pub fn named_elements(&self) -> &[ImportSpecifier] {
        match self.clause.as_ref().and_then(|c| c.bindings.as_ref()) {
            Some(NamedBindings::Named(elements)) => elements,
            _ => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImportClause {
    pub default: Option<String>,
    pub bindings: Option<NamedBindings>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NamedBindings {
    /// `* as ns`
    Namespace(String),
    /// `{ a, b as c }`
    Named(Vec<ImportSpecifier>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImportSpecifier {
    /// Local binding name.
    pub name: String,
    /// Imported name when aliased (`a` in `a as b`).
    pub property_name: Option<String>,
    pub type_only: bool,
}

impl ImportSpecifier {
    /// The name the target module exports.
    pub fn imported_name(&self) -> &str {
        self.property_name.as_deref().unwrap_or(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportDecl {
    /// `None` for `export * from "x"`.
    pub clause: Option<ExportClause>,
    pub specifier: Option<String>,
    pub type_only: bool,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExportClause {
    /// `* as ns`
    Namespace(String),
    /// `{ a, b as c }`
    Named(Vec<ExportSpecifier>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportSpecifier {
    /// Exported name.
    pub name: String,
    /// Local (or re-exported) name when aliased (`a` in `a as b`).
    pub property_name: Option<String>,
    pub type_only: bool,
}

impl ExportSpecifier {
    pub fn local_name(&self) -> &str {
        self.property_name.as_deref().unwrap_or(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NamespaceDecl {
    /// Identifier or module name with its quotes removed.
    pub name: String,
    pub body: NamespaceBody,
    pub modifiers: Modifiers,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NamespaceBody {
    Block(Vec<Statement>),
    /// `namespace A.B { }` is `A` with a nested `B`.
    Nested(Box<NamespaceDecl>),
    /// `declare module "x";`
    Absent,
}

impl NamespaceDecl {
    /// Class or interface declared directly in the block body.
    pub fn declaration(&self, name: &str) -> Option<&Declaration> {
        match &self.body {
            NamespaceBody::Block(statements) => statements
                .iter()
                .filter_map(Statement::as_declaration)
                .find(|d| d.name() == Some(name)),
            NamespaceBody::Nested(_) | NamespaceBody::Absent => None,
        }
    }
}
