//! Recursive-descent parser for TypeScript declarations.
//!
//! The parser never fails. Statements it does not model are skipped
//! structurally (balanced brackets, `;`, and line-break heuristics standing in
//! for automatic semicolon insertion) and recorded as `Statement::Other`.

use super::ast::*;
use super::lexer::{tokenize, Lexeme, Token};

/// Words that may start a statement we want to stop skipping at.
const STATEMENT_STARTS: &[&str] = &[
    "import",
    "export",
    "class",
    "interface",
    "declare",
    "namespace",
    "module",
    "abstract",
    "function",
    "const",
    "let",
    "var",
    "type",
    "enum",
];

/// Parse a module's top-level statements.
pub fn parse_module(source: &str) -> Vec<Statement> {
    Parser::new(source).parse_statements(false)
}

pub(super) struct Parser<'a> {
    source: &'a str,
    tokens: Vec<Lexeme>,
    pos: usize,
}

impl<'a> Parser<'a> {
    pub(super) fn new(source: &'a str) -> Self {
        Self {
            source,
            tokens: tokenize(source),
            pos: 0,
        }
    }

    // ------------------------------------------------------------------
    // Token access
    // ------------------------------------------------------------------

    pub(super) fn peek(&self) -> &Token {
        self.peek_at(0)
    }

    pub(super) fn peek_at(&self, n: usize) -> &Token {
        let idx = (self.pos + n).min(self.tokens.len() - 1);
        &self.tokens[idx].token
    }

    pub(super) fn at(&self, token: &Token) -> bool {
        self.peek() == token
    }

    pub(super) fn at_eof(&self) -> bool {
        self.at(&Token::Eof)
    }

    pub(super) fn current_span(&self) -> Span {
        self.tokens[self.pos].span
    }

    pub(super) fn newline_before(&self) -> bool {
        self.tokens[self.pos].newline_before
    }

    fn newline_before_at(&self, n: usize) -> bool {
        let idx = (self.pos + n).min(self.tokens.len() - 1);
        self.tokens[idx].newline_before
    }

    pub(super) fn prev_token(&self) -> Option<&Token> {
        self.pos.checked_sub(1).map(|i| &self.tokens[i].token)
    }

    /// Span from `start` to the end of the last consumed token.
    pub(super) fn span_from(&self, start: Span) -> Span {
        match self.pos.checked_sub(1) {
            Some(i) => start.to(self.tokens[i].span),
            None => start,
        }
    }

    pub(super) fn text(&self, start: usize, end: usize) -> &'a str {
        self.source.get(start..end).unwrap_or("")
    }

    pub(super) fn bump(&mut self) {
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
    }

    pub(super) fn eat(&mut self, token: &Token) -> bool {
        if self.at(token) {
            self.bump();
            true
        } else {
            false
        }
    }

    pub(super) fn is_word(&self, word: &str) -> bool {
        self.is_word_at(0, word)
    }

    pub(super) fn is_word_at(&self, n: usize, word: &str) -> bool {
        matches!(self.peek_at(n), Token::Ident(w) if w == word)
    }

    pub(super) fn is_ident_at(&self, n: usize) -> bool {
        matches!(self.peek_at(n), Token::Ident(_))
    }

    pub(super) fn eat_word(&mut self, word: &str) -> bool {
        if self.is_word(word) {
            self.bump();
            true
        } else {
            false
        }
    }

    pub(super) fn take_ident(&mut self) -> Option<String> {
        match self.peek() {
            Token::Ident(w) => {
                let w = w.clone();
                self.bump();
                Some(w)
            }
            _ => None,
        }
    }

    /// Identifier or string literal, as used in import/export lists.
    fn take_name(&mut self) -> Option<String> {
        match self.peek() {
            Token::Ident(w) | Token::Str(w) => {
                let w = w.clone();
                self.bump();
                Some(w)
            }
            _ => None,
        }
    }

    /// Skip a bracketed region starting at an opener, through its closer.
    /// All three bracket kinds share one depth counter.
    pub(super) fn skip_balanced(&mut self) {
        let mut depth = 0usize;
        loop {
            match self.peek() {
                Token::LBrace | Token::LParen | Token::LBracket => depth += 1,
                Token::RBrace | Token::RParen | Token::RBracket => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        self.bump();
                        return;
                    }
                }
                Token::Eof => return,
                _ => {}
            }
            self.bump();
            if depth == 0 {
                return;
            }
        }
    }

    /// Skip `<...>` starting at `<`.
    pub(super) fn skip_angle(&mut self) {
        let mut depth = 0usize;
        loop {
            match self.peek() {
                Token::Lt => depth += 1,
                Token::Gt => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        self.bump();
                        return;
                    }
                }
                Token::LBrace | Token::LParen | Token::LBracket => {
                    self.skip_balanced();
                    continue;
                }
                Token::Eof | Token::Semicolon | Token::RBrace => return,
                _ => {}
            }
            self.bump();
        }
    }

    /// Index of the token closing the bracket at `self.pos + offset`.
    pub(super) fn matching_close(&self, offset: usize) -> Option<usize> {
        let mut depth = 0usize;
        let mut i = self.pos + offset;
        while i < self.tokens.len() {
            match self.tokens[i].token {
                Token::LBrace | Token::LParen | Token::LBracket => depth += 1,
                Token::RBrace | Token::RParen | Token::RBracket => {
                    depth = depth.checked_sub(1)?;
                    if depth == 0 {
                        return Some(i - self.pos);
                    }
                }
                Token::Eof => return None,
                _ => {}
            }
            i += 1;
        }
        None
    }

    pub(super) fn skip_decorators(&mut self) {
        while self.eat(&Token::At) {
            self.take_ident();
            while self.at(&Token::Dot) && self.is_ident_at(1) {
                self.bump();
                self.bump();
            }
            if self.at(&Token::LParen) {
                self.skip_balanced();
            }
        }
    }

    fn ends_expression(token: Option<&Token>) -> bool {
        matches!(
            token,
            Some(
                Token::Ident(_)
                    | Token::PrivateName(_)
                    | Token::Str(_)
                    | Token::Number
                    | Token::Template
                    | Token::RParen
                    | Token::RBracket
                    | Token::RBrace
            )
        )
    }

    /// A line break separates a finished expression from a new statement.
    fn at_statement_boundary(&self) -> bool {
        if !self.newline_before() || !Self::ends_expression(self.prev_token()) {
            return false;
        }
        match self.peek() {
            Token::At => true,
            Token::Ident(w) => STATEMENT_STARTS.contains(&w.as_str()),
            _ => false,
        }
    }

    /// Line-break rule for skipped initializers inside class bodies.
    pub(super) fn at_member_boundary(&self) -> bool {
        self.newline_before()
            && Self::ends_expression(self.prev_token())
            && matches!(
                self.peek(),
                Token::Ident(_) | Token::PrivateName(_) | Token::Str(_) | Token::At
            )
    }

    pub(super) fn skip_statement(&mut self, start: Span) -> Statement {
        let mut first = true;
        loop {
            if !first && self.at_statement_boundary() {
                break;
            }
            first = false;
            match self.peek() {
                Token::Eof | Token::RBrace => break,
                Token::Semicolon => {
                    self.bump();
                    break;
                }
                Token::LBrace | Token::LParen | Token::LBracket => self.skip_balanced(),
                _ => self.bump(),
            }
        }
        Statement::Other(self.span_from(start))
    }

    // ------------------------------------------------------------------
    // Statements
    // ------------------------------------------------------------------

    pub(super) fn parse_statements(&mut self, in_block: bool) -> Vec<Statement> {
        let mut statements = Vec::new();
        loop {
            match self.peek() {
                Token::Eof => break,
                Token::RBrace if in_block => break,
                Token::Semicolon => {
                    self.bump();
                    continue;
                }
                _ => {}
            }
            let before = self.pos;
            let start = self.current_span();
            let statement = if self.at(&Token::RBrace) {
                self.bump();
                Statement::Other(start)
            } else {
                self.parse_statement()
            };
            if self.pos == before {
                self.bump();
            }
            statements.push(statement);
        }
        statements
    }

    fn parse_statement(&mut self) -> Statement {
        let start = self.current_span();
        self.skip_decorators();
        if self.is_word("import") {
            return self.parse_import(start);
        }
        if self.is_word("export") {
            return self.parse_export(start);
        }
        match self.parse_declaration(Modifiers::default(), start) {
            Some(statement) => statement,
            None => self.skip_statement(start),
        }
    }

    /// Class, interface or namespace, after any `export`/`default` prefix.
    /// Returns `None` when the upcoming tokens are some other statement.
    fn parse_declaration(&mut self, mut modifiers: Modifiers, start: Span) -> Option<Statement> {
        loop {
            if self.at(&Token::At) {
                self.skip_decorators();
            } else if self.is_word("declare")
                && self.is_ident_at(1)
                && !self.newline_before_at(1)
            {
                self.bump();
                modifiers.ambient = true;
            } else if self.is_word("abstract") && self.is_word_at(1, "class") {
                self.bump();
                modifiers.is_abstract = true;
            } else {
                break;
            }
        }

        if self.is_word("class") {
            let class = self.parse_class(modifiers, start);
            return Some(Statement::Declaration(Declaration::Class(class)));
        }
        if self.is_word("interface") && self.is_ident_at(1) {
            let interface = self.parse_interface(modifiers, start);
            return Some(Statement::Declaration(Declaration::Interface(interface)));
        }
        let names_namespace = matches!(self.peek_at(1), Token::Ident(_) | Token::Str(_))
            && !self.newline_before_at(1);
        if (self.is_word("namespace") || self.is_word("module")) && names_namespace {
            self.bump();
            let name = self.take_name().unwrap_or_default();
            return Some(Statement::Namespace(self.namespace_rest(name, modifiers, start)));
        }
        if self.is_word("global") && modifiers.ambient && self.peek_at(1) == &Token::LBrace {
            self.bump();
            return Some(Statement::Namespace(self.namespace_rest(
                "global".to_string(),
                modifiers,
                start,
            )));
        }
        None
    }

    fn namespace_rest(&mut self, name: String, modifiers: Modifiers, start: Span) -> NamespaceDecl {
        let body = if self.eat(&Token::Dot) {
            let inner_start = self.current_span();
            let inner_name = self.take_ident().unwrap_or_default();
            let inner = self.namespace_rest(inner_name, modifiers, inner_start);
            NamespaceBody::Nested(Box::new(inner))
        } else if self.eat(&Token::LBrace) {
            let statements = self.parse_statements(true);
            self.eat(&Token::RBrace);
            NamespaceBody::Block(statements)
        } else {
            self.eat(&Token::Semicolon);
            NamespaceBody::Absent
        };
        NamespaceDecl {
            name,
            body,
            modifiers,
            span: self.span_from(start),
        }
    }

    fn parse_class(&mut self, modifiers: Modifiers, start: Span) -> ClassDecl {
        self.bump(); // class
        let name = if self.is_ident_at(0) && !self.is_word("extends") && !self.is_word("implements")
        {
            self.take_ident()
        } else {
            None
        };
        let type_params = if self.at(&Token::Lt) {
            self.parse_type_params()
        } else {
            Vec::new()
        };

        let mut extends = None;
        let mut implements = Vec::new();
        loop {
            if self.eat_word("extends") {
                extends = Some(self.parse_heritage());
            } else if self.eat_word("implements") {
                loop {
                    implements.push(self.parse_heritage());
                    if !self.eat(&Token::Comma) {
                        break;
                    }
                }
            } else {
                break;
            }
        }

        let members = if self.at(&Token::LBrace) {
            self.parse_class_members()
        } else {
            Vec::new()
        };

        ClassDecl {
            name,
            type_params,
            extends,
            implements,
            members,
            modifiers,
            span: self.span_from(start),
        }
    }

    fn parse_interface(&mut self, modifiers: Modifiers, start: Span) -> InterfaceDecl {
        self.bump(); // interface
        let name = self.take_ident().unwrap_or_default();
        let type_params = if self.at(&Token::Lt) {
            self.parse_type_params()
        } else {
            Vec::new()
        };
        let mut extends = Vec::new();
        if self.eat_word("extends") {
            loop {
                extends.push(self.parse_heritage());
                if !self.eat(&Token::Comma) {
                    break;
                }
            }
        }
        let members = if self.at(&Token::LBrace) {
            self.parse_type_members()
        } else {
            Vec::new()
        };
        InterfaceDecl {
            name,
            type_params,
            extends,
            members,
            modifiers,
            span: self.span_from(start),
        }
    }

    /// `Base`, `ns.Base<T>`, or a call such as `Mixin(Base)`.
    fn parse_heritage(&mut self) -> Heritage {
        let start = self.current_span().start;
        let mut ty = self.parse_type_reference();
        if self.at(&Token::LParen) {
            self.skip_balanced();
            ty = TypeNode::Other;
            if self.at(&Token::Lt) {
                self.skip_angle();
            }
        }
        let end = self
            .pos
            .checked_sub(1)
            .map_or(start, |i| self.tokens[i].span.end)
            .max(start);
        Heritage {
            text: self.text(start, end).to_string(),
            ty,
        }
    }

    /// Names declared in `<T extends X = Y, U>`.
    fn parse_type_params(&mut self) -> Vec<String> {
        self.bump(); // <
        let mut names = Vec::new();
        let mut expect_name = true;
        loop {
            match self.peek() {
                Token::Gt => {
                    self.bump();
                    break;
                }
                Token::Eof | Token::Semicolon => break,
                Token::Lt => {
                    self.skip_angle();
                    expect_name = false;
                }
                Token::LBrace | Token::LParen | Token::LBracket => {
                    self.skip_balanced();
                    expect_name = false;
                }
                Token::Comma => {
                    self.bump();
                    expect_name = true;
                }
                Token::Ident(w) if expect_name => {
                    let is_modifier = matches!(w.as_str(), "in" | "out" | "const")
                        && self.is_ident_at(1);
                    if !is_modifier {
                        names.push(w.clone());
                        expect_name = false;
                    }
                    self.bump();
                }
                _ => {
                    self.bump();
                    expect_name = false;
                }
            }
        }
        names
    }

    // ------------------------------------------------------------------
    // Imports and exports
    // ------------------------------------------------------------------

    fn parse_import(&mut self, start: Span) -> Statement {
        if matches!(self.peek_at(1), Token::LParen | Token::Dot) {
            return self.skip_statement(start);
        }
        self.bump(); // import

        let type_only = self.is_word("type")
            && (matches!(self.peek_at(1), Token::LBrace | Token::Star)
                || (self.is_ident_at(1)
                    && (matches!(self.peek_at(2), Token::Comma | Token::Eq)
                        || self.is_word_at(2, "from"))));
        if type_only {
            self.bump();
        }

        if let Token::Str(specifier) = self.peek() {
            let specifier = specifier.clone();
            self.bump();
            self.skip_import_attributes();
            self.eat(&Token::Semicolon);
            return Statement::Import(ImportDecl {
                specifier,
                clause: None,
                type_only,
                span: self.span_from(start),
            });
        }

        let mut clause = ImportClause {
            default: None,
            bindings: None,
        };
        if self.is_ident_at(0) && !(self.is_word("from") && matches!(self.peek_at(1), Token::Str(_)))
        {
            clause.default = self.take_ident();
            if self.at(&Token::Eq) {
                // import x = require("y") / import x = A.B
                return self.skip_statement(start);
            }
            self.eat(&Token::Comma);
        }
        if self.eat(&Token::Star) {
            self.eat_word("as");
            if let Some(ns) = self.take_ident() {
                clause.bindings = Some(NamedBindings::Namespace(ns));
            }
        } else if self.at(&Token::LBrace) {
            clause.bindings = Some(NamedBindings::Named(self.parse_import_specifiers()));
        }

        if !self.eat_word("from") {
            return self.skip_statement(start);
        }
        let specifier = match self.peek() {
            Token::Str(s) => s.clone(),
            _ => return self.skip_statement(start),
        };
        self.bump();
        self.skip_import_attributes();
        self.eat(&Token::Semicolon);
        Statement::Import(ImportDecl {
            specifier,
            clause: Some(clause),
            type_only,
            span: self.span_from(start),
        })
    }

    fn parse_import_specifiers(&mut self) -> Vec<ImportSpecifier> {
        self.bump(); // {
        let mut elements = Vec::new();
        loop {
            match self.peek() {
                Token::RBrace => {
                    self.bump();
                    break;
                }
                Token::Eof => break,
                Token::Comma => {
                    self.bump();
                    continue;
                }
                Token::Ident(_) | Token::Str(_) => {}
                _ => {
                    self.bump();
                    continue;
                }
            }
            let type_only = self.is_word("type")
                && matches!(self.peek_at(1), Token::Ident(_) | Token::Str(_))
                && !self.is_word_at(1, "as");
            if type_only {
                self.bump();
            }
            let Some(imported) = self.take_name() else {
                continue;
            };
            let element = if self.eat_word("as") {
                let local = self.take_ident().unwrap_or_else(|| imported.clone());
                ImportSpecifier {
                    name: local,
                    property_name: Some(imported),
                    type_only,
                }
            } else {
                ImportSpecifier {
                    name: imported,
                    property_name: None,
                    type_only,
                }
            };
            elements.push(element);
        }
        elements
    }

    fn skip_import_attributes(&mut self) {
        if (self.is_word("assert") || self.is_word("with"))
            && !self.newline_before()
            && self.peek_at(1) == &Token::LBrace
        {
            self.bump();
            self.skip_balanced();
        }
    }

    fn parse_export(&mut self, start: Span) -> Statement {
        self.bump(); // export
        if self.at(&Token::Eq)
            || self.is_word("import")
            || (self.is_word("as") && self.is_word_at(1, "namespace"))
        {
            return self.skip_statement(start);
        }

        if self.eat_word("default") {
            let modifiers = Modifiers {
                exported: true,
                is_default: true,
                ..Modifiers::default()
            };
            return match self.parse_declaration(modifiers, start) {
                Some(statement) => statement,
                None => self.skip_statement(start),
            };
        }

        let type_only =
            self.is_word("type") && matches!(self.peek_at(1), Token::LBrace | Token::Star);
        if type_only {
            self.bump();
        }

        let clause = if self.eat(&Token::Star) {
            if self.eat_word("as") {
                Some(ExportClause::Namespace(self.take_name().unwrap_or_default()))
            } else {
                None
            }
        } else if self.at(&Token::LBrace) {
            Some(ExportClause::Named(self.parse_export_specifiers()))
        } else {
            let modifiers = Modifiers {
                exported: true,
                ..Modifiers::default()
            };
            return match self.parse_declaration(modifiers, start) {
                Some(statement) => statement,
                None => self.skip_statement(start),
            };
        };

        let specifier = if self.eat_word("from") {
            match self.peek() {
                Token::Str(s) => {
                    let s = s.clone();
                    self.bump();
                    Some(s)
                }
                _ => None,
            }
        } else {
            None
        };
        self.skip_import_attributes();
        self.eat(&Token::Semicolon);
        Statement::Export(ExportDecl {
            clause,
            specifier,
            type_only,
            span: self.span_from(start),
        })
    }

    fn parse_export_specifiers(&mut self) -> Vec<ExportSpecifier> {
        self.bump(); // {
        let mut elements = Vec::new();
        loop {
            match self.peek() {
                Token::RBrace => {
                    self.bump();
                    break;
                }
                Token::Eof => break,
                Token::Comma => {
                    self.bump();
                    continue;
                }
                Token::Ident(_) | Token::Str(_) => {}
                _ => {
                    self.bump();
                    continue;
                }
            }
            let type_only = self.is_word("type")
                && matches!(self.peek_at(1), Token::Ident(_) | Token::Str(_))
                && !self.is_word_at(1, "as");
            if type_only {
                self.bump();
            }
            let Some(local) = self.take_name() else {
                continue;
            };
            let element = if self.eat_word("as") {
                let exported = self.take_name().unwrap_or_else(|| local.clone());
                ExportSpecifier {
                    name: exported,
                    property_name: Some(local),
                    type_only,
                }
            } else {
                ExportSpecifier {
                    name: local,
                    property_name: None,
                    type_only,
                }
            };
            elements.push(element);
        }
        elements
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn only<T>(items: Vec<T>) -> T {
        assert_eq!(items.len(), 1);
        items.into_iter().next().unwrap()
    }

    fn import(src: &str) -> ImportDecl {
        match only(parse_module(src)) {
            Statement::Import(i) => i,
            other => panic!("expected import, got {:?}", other),
        }
    }

    fn export(src: &str) -> ExportDecl {
        match only(parse_module(src)) {
            Statement::Export(e) => e,
            other => panic!("expected export, got {:?}", other),
        }
    }

    #[test]
    fn test_import_forms() {
        let named = import(r#"import {Base, Other as Alias} from "./base";"#);
        assert_eq!(named.specifier, "./base");
        let names: Vec<_> = named.named_elements().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Base", "Alias"]);
        assert_eq!(named.named_elements()[1].imported_name(), "Other");

        let side_effect = import(r#"import "reflect-metadata""#);
        assert!(side_effect.clause.is_none());
        assert!(side_effect.named_elements().is_empty());

        let default = import(r#"import Foo from "./foo""#);
        assert_eq!(default.clause.as_ref().unwrap().default.as_deref(), Some("Foo"));
        assert!(default.named_elements().is_empty());

        let ns = import(r#"import * as path from "path";"#);
        assert_eq!(
            ns.clause.unwrap().bindings,
            Some(NamedBindings::Namespace("path".into()))
        );

        let both = import(r#"import React, {Component} from 'react'"#);
        assert_eq!(both.clause.as_ref().unwrap().default.as_deref(), Some("React"));
        assert_eq!(both.named_elements()[0].name, "Component");

        let type_only = import(r#"import type {Shape} from "./shape";"#);
        assert!(type_only.type_only);
        assert_eq!(type_only.named_elements()[0].name, "Shape");
    }

    #[test]
    fn test_import_expressions_and_require_are_other() {
        let stmts = parse_module(
            "import fs = require(\"fs\");\nconst m = import(\"./m\");\nimport.meta.url;",
        );
        assert_eq!(stmts.len(), 3);
        assert!(stmts.iter().all(|s| matches!(s, Statement::Other(_))));
    }

    #[test]
    fn test_export_forms() {
        let star = export(r#"export * from "./submodule";"#);
        assert!(star.clause.is_none());
        assert_eq!(star.specifier.as_deref(), Some("./submodule"));

        let star_ns = export(r#"export * as sub from "./submodule""#);
        assert_eq!(star_ns.clause, Some(ExportClause::Namespace("sub".into())));

        let named = export(r#"export {A, B as C} from "./ab";"#);
        match named.clause {
            Some(ExportClause::Named(elements)) => {
                assert_eq!(elements[0].name, "A");
                assert_eq!(elements[1].name, "C");
                assert_eq!(elements[1].local_name(), "B");
            }
            other => panic!("unexpected clause {:?}", other),
        }

        let local = export("export {Base};");
        assert!(local.specifier.is_none());
    }

    #[test]
    fn test_exported_declarations() {
        let stmts = parse_module(
            r#"
            export class Base { base: string; }
            export default class Main {}
            export abstract class Shape {}
            export interface Props { value: number }
            export declare class Ambient {}
            export const x = 1;
            export default foo;
            "#,
        );
        let names: Vec<_> = stmts
            .iter()
            .filter_map(Statement::as_declaration)
            .map(|d| d.name().unwrap_or("").to_string())
            .collect();
        assert_eq!(names, vec!["Base", "Main", "Shape", "Props", "Ambient"]);
        assert_eq!(stmts.len(), 7);
        match &stmts[1] {
            Statement::Declaration(Declaration::Class(c)) => assert!(c.modifiers.is_default),
            other => panic!("unexpected {:?}", other),
        }
        match &stmts[2] {
            Statement::Declaration(Declaration::Class(c)) => assert!(c.modifiers.is_abstract),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_class_heritage_keeps_type_arguments_in_text() {
        let stmts = parse_module("class Value<T> extends Base<T> implements A, B.C {}");
        match &stmts[0] {
            Statement::Declaration(Declaration::Class(c)) => {
                assert_eq!(c.name.as_deref(), Some("Value"));
                assert_eq!(c.type_params, vec!["T"]);
                let ext = c.extends.as_ref().unwrap();
                assert_eq!(ext.text, "Base<T>");
                assert!(matches!(&ext.ty, TypeNode::Reference { name, args } if name == "Base" && args.len() == 1));
                let implements: Vec<_> = c.implements.iter().map(|h| h.text.as_str()).collect();
                assert_eq!(implements, vec!["A", "B.C"]);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_interface_extends_list() {
        let stmts = parse_module("interface Props extends Base, Other<string> { a: string }");
        match &stmts[0] {
            Statement::Declaration(Declaration::Interface(i)) => {
                assert_eq!(i.name, "Props");
                let bases: Vec<_> = i.extends.iter().map(|h| h.text.as_str()).collect();
                assert_eq!(bases, vec!["Base", "Other<string>"]);
                assert_eq!(i.members.len(), 1);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_namespaces_and_ambient_modules() {
        let stmts = parse_module(
            r#"
            declare module "aurelia-framework" {
                export class Aurelia {}
                export interface Config { debug: boolean }
            }
            declare module 'shorthand';
            declare namespace A.B { class Inner {} }
            declare global { interface Window { app: string } }
            namespace Plain { export class P {} }
            "#,
        );
        let namespaces: Vec<&NamespaceDecl> = stmts
            .iter()
            .filter_map(|s| match s {
                Statement::Namespace(n) => Some(n),
                _ => None,
            })
            .collect();
        let names: Vec<_> = namespaces.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["aurelia-framework", "shorthand", "A", "global", "Plain"]);
        assert!(namespaces[0].declaration("Aurelia").is_some());
        assert!(namespaces[0].declaration("Config").is_some());
        assert!(namespaces[1].body == NamespaceBody::Absent);
        assert!(matches!(namespaces[2].body, NamespaceBody::Nested(_)));
        assert!(namespaces[2].declaration("Inner").is_none());
        assert!(namespaces[4].declaration("P").is_some());
    }

    #[test]
    fn test_skips_unmodelled_statements_without_losing_declarations() {
        let stmts = parse_module(
            r#"
            "use strict";
            const handlers = { click() { return 1 } }
            function helper(a: string): number { if (a) { return 1 } return 2 }
            enum Color { Red, Green }
            type Alias = { x: string }
            let re = a < b
            class After { value: string }
            "#,
        );
        let decl = stmts.iter().filter_map(Statement::as_declaration).next().unwrap();
        assert_eq!(decl.name(), Some("After"));
        assert_eq!(decl.members().len(), 1);
        assert_eq!(stmts.len(), 7);
    }

    #[test]
    fn test_decorated_class() {
        let stmts = parse_module(
            "@customElement('my-el')\n@inject(Foo, Bar)\nexport class MyEl { @bindable value: string; }",
        );
        let decl = stmts.iter().filter_map(Statement::as_declaration).next().unwrap();
        assert_eq!(decl.name(), Some("MyEl"));
        assert_eq!(decl.member("value").unwrap().kind, MemberKind::Property);
    }

    #[test]
    fn test_statement_spans_cover_the_source() {
        let src = "export class Base {\n  base: string;\n}";
        let stmts = parse_module(src);
        let span = stmts[0].span();
        assert_eq!(span.start, 0);
        assert_eq!(span.end, src.len());
        assert_eq!(span.line, 1);
    }
}
