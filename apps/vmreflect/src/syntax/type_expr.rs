//! Type annotations.
//!
//! Forms the interpreter cares about (keywords, references, arrays) are
//! modelled precisely. Everything else is consumed and reported as
//! `TypeNode::Other` or a coarse variant.

use super::ast::*;
use super::lexer::Token;
use super::parser::Parser;

impl<'a> Parser<'a> {
    pub(super) fn parse_type(&mut self) -> TypeNode {
        let ty = self.parse_union();
        if self.is_word("extends") && !self.newline_before() {
            // Conditional type: `A extends B ? C : D`.
            self.bump();
            self.parse_union();
            if self.eat(&Token::Question) {
                self.parse_type();
                if self.eat(&Token::Colon) {
                    self.parse_type();
                }
            }
            return TypeNode::Other;
        }
        ty
    }

    /// Return type position, which also admits type predicates.
    pub(super) fn parse_return_type(&mut self) -> TypeNode {
        if self.is_word("asserts") && self.is_ident_at(1) && !self.is_word_at(1, "is") {
            self.bump();
            self.bump();
            if self.eat_word("is") {
                self.parse_type();
            }
            return TypeNode::Other;
        }
        if self.is_ident_at(0) && self.is_word_at(1, "is") {
            self.bump();
            self.bump();
            self.parse_type();
            return TypeNode::Other;
        }
        self.parse_type()
    }

    fn parse_union(&mut self) -> TypeNode {
        self.eat(&Token::Pipe);
        let first = self.parse_intersection();
        if !self.at(&Token::Pipe) {
            return first;
        }
        let mut types = vec![first];
        while self.eat(&Token::Pipe) {
            types.push(self.parse_intersection());
        }
        TypeNode::Union(types)
    }

    fn parse_intersection(&mut self) -> TypeNode {
        self.eat(&Token::Amp);
        let first = self.parse_postfix();
        if !self.at(&Token::Amp) {
            return first;
        }
        let mut types = vec![first];
        while self.eat(&Token::Amp) {
            types.push(self.parse_postfix());
        }
        TypeNode::Intersection(types)
    }

    fn parse_postfix(&mut self) -> TypeNode {
        let mut ty = self.parse_primary();
        while self.at(&Token::LBracket) && !self.newline_before() {
            if self.peek_at(1) == &Token::RBracket {
                self.bump();
                self.bump();
                ty = TypeNode::Array(Box::new(ty));
            } else {
                // Indexed access `T[K]`.
                self.skip_balanced();
                ty = TypeNode::Other;
            }
        }
        ty
    }

    fn parse_primary(&mut self) -> TypeNode {
        match self.peek().clone() {
            Token::LParen => {
                if self.is_function_type_start() {
                    self.parse_function_type()
                } else {
                    self.bump();
                    let inner = self.parse_type();
                    self.eat(&Token::RParen);
                    TypeNode::Parenthesized(Box::new(inner))
                }
            }
            Token::Lt => self.parse_function_type(),
            Token::LBrace => {
                if self.at_mapped_type() {
                    self.skip_balanced();
                    TypeNode::Other
                } else {
                    TypeNode::TypeLiteral(self.parse_type_members())
                }
            }
            Token::LBracket => self.parse_tuple(),
            Token::Str(s) => {
                self.bump();
                TypeNode::Literal(s)
            }
            Token::Template | Token::Number => {
                let span = self.current_span();
                self.bump();
                TypeNode::Literal(self.text(span.start, span.end).to_string())
            }
            Token::Punct if self.peek_at(1) == &Token::Number => {
                let span = self.current_span();
                self.bump();
                self.bump();
                let end = self.span_from(span).end;
                TypeNode::Literal(self.text(span.start, end).to_string())
            }
            Token::Ident(word) => self.parse_word_type(&word),
            _ => TypeNode::Other,
        }
    }

    fn parse_word_type(&mut self, word: &str) -> TypeNode {
        match word {
            "typeof" => {
                self.bump();
                if self.is_word("import") {
                    self.bump();
                    if self.at(&Token::LParen) {
                        self.skip_balanced();
                    }
                    self.skip_qualified_tail();
                    return TypeNode::Other;
                }
                let name = self.parse_dotted_name();
                if self.at(&Token::Lt) && !self.newline_before() {
                    self.parse_type_args();
                }
                TypeNode::Query(name)
            }
            "keyof" | "unique" => {
                self.bump();
                self.parse_postfix();
                TypeNode::Other
            }
            "readonly" => {
                self.bump();
                self.parse_postfix()
            }
            "infer" => {
                self.bump();
                self.take_ident();
                TypeNode::Other
            }
            "new" => {
                self.bump();
                self.parse_function_type()
            }
            "abstract" if self.is_word_at(1, "new") => {
                self.bump();
                self.bump();
                self.parse_function_type()
            }
            "import" if self.peek_at(1) == &Token::LParen => {
                self.bump();
                self.skip_balanced();
                self.skip_qualified_tail();
                TypeNode::Other
            }
            "true" | "false" => {
                self.bump();
                TypeNode::Literal(word.to_string())
            }
            _ => match Keyword::from_word(word) {
                Some(keyword) if self.peek_at(1) != &Token::Dot => {
                    self.bump();
                    TypeNode::Keyword(keyword)
                }
                _ => self.parse_type_reference(),
            },
        }
    }

    /// `.Foo.Bar<T>` after an import type.
    fn skip_qualified_tail(&mut self) {
        while self.at(&Token::Dot) && self.is_ident_at(1) {
            self.bump();
            self.bump();
        }
        if self.at(&Token::Lt) && !self.newline_before() {
            self.skip_angle();
        }
    }

    fn parse_dotted_name(&mut self) -> String {
        let mut name = self.take_ident().unwrap_or_default();
        while self.at(&Token::Dot) && self.is_ident_at(1) {
            self.bump();
            if let Some(part) = self.take_ident() {
                name.push('.');
                name.push_str(&part);
            }
        }
        name
    }

    /// `Name`, `ns.Name`, `Name<A, B>`.
    pub(super) fn parse_type_reference(&mut self) -> TypeNode {
        if !self.is_ident_at(0) {
            return TypeNode::Other;
        }
        let name = self.parse_dotted_name();
        let args = if self.at(&Token::Lt) && !self.newline_before() {
            self.parse_type_args()
        } else {
            Vec::new()
        };
        TypeNode::Reference { name, args }
    }

    fn parse_type_args(&mut self) -> Vec<TypeNode> {
        self.bump(); // <
        let mut args = Vec::new();
        loop {
            if self.eat(&Token::Gt) || self.at_eof() {
                break;
            }
            let before = self.current_span().start;
            args.push(self.parse_type());
            if self.eat(&Token::Comma) {
                continue;
            }
            if !self.eat(&Token::Gt) && self.current_span().start == before {
                // Unparseable argument: drop the rest of the list.
                self.skip_angle_tail();
            }
            break;
        }
        args
    }

    /// Skip to the `>` closing an already opened argument list.
    fn skip_angle_tail(&mut self) {
        let mut depth = 1usize;
        loop {
            match self.peek() {
                Token::Lt => depth += 1,
                Token::Gt => {
                    depth -= 1;
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

    fn is_function_type_start(&self) -> bool {
        match self.matching_close(0) {
            Some(close) => self.peek_at(close + 1) == &Token::Arrow,
            None => false,
        }
    }

    /// `<T>(a: A) => R`, also after `new`.
    fn parse_function_type(&mut self) -> TypeNode {
        if self.at(&Token::Lt) {
            self.skip_angle();
        }
        if self.at(&Token::LParen) {
            self.skip_balanced();
        }
        if self.eat(&Token::Arrow) {
            self.parse_return_type();
        }
        TypeNode::Function
    }

    fn at_mapped_type(&self) -> bool {
        let offset = if self.is_word_at(1, "readonly") {
            2
        } else if self.peek_at(1) == &Token::Punct && self.is_word_at(2, "readonly") {
            3
        } else {
            1
        };
        self.peek_at(offset) == &Token::LBracket && self.is_word_at(offset + 2, "in")
    }

    fn parse_tuple(&mut self) -> TypeNode {
        self.bump(); // [
        let mut elements = Vec::new();
        loop {
            match self.peek() {
                Token::RBracket => {
                    self.bump();
                    break;
                }
                Token::Eof | Token::RBrace | Token::Semicolon => break,
                Token::Comma | Token::Ellipsis => {
                    self.bump();
                    continue;
                }
                _ => {}
            }
            let labelled = self.is_ident_at(0)
                && (self.peek_at(1) == &Token::Colon
                    || (self.peek_at(1) == &Token::Question && self.peek_at(2) == &Token::Colon));
            if labelled {
                self.bump();
                self.eat(&Token::Question);
                self.eat(&Token::Colon);
            }
            let before = self.current_span().start;
            elements.push(self.parse_type());
            self.eat(&Token::Question);
            if self.current_span().start == before {
                self.bump();
            }
        }
        TypeNode::Tuple(elements)
    }
}

#[cfg(test)]
mod tests {
    use crate::syntax::ast::*;
    use crate::syntax::parse_module;

    fn prop_type(ty: &str) -> TypeNode {
        let src = format!("class A {{ p: {};\n q: string; }}", ty);
        let stmts = parse_module(&src);
        let decl = stmts[0].as_declaration().expect("class");
        assert_eq!(decl.members().len(), 2, "members of `{}`", ty);
        decl.members()[0].ty.clone().expect("type")
    }

    fn reference(name: &str, args: Vec<TypeNode>) -> TypeNode {
        TypeNode::Reference {
            name: name.into(),
            args,
        }
    }

    #[test]
    fn test_keywords_references_and_arrays() {
        assert_eq!(prop_type("string"), TypeNode::Keyword(Keyword::String));
        assert_eq!(prop_type("boolean"), TypeNode::Keyword(Keyword::Boolean));
        assert_eq!(prop_type("Foo"), reference("Foo", vec![]));
        assert_eq!(prop_type("ns.Foo"), reference("ns.Foo", vec![]));
        assert_eq!(
            prop_type("Foo[][]"),
            TypeNode::Array(Box::new(TypeNode::Array(Box::new(reference("Foo", vec![])))))
        );
        assert_eq!(
            prop_type("Array<Map<string, Foo[]>>"),
            reference(
                "Array",
                vec![reference(
                    "Map",
                    vec![
                        TypeNode::Keyword(Keyword::String),
                        TypeNode::Array(Box::new(reference("Foo", vec![])))
                    ]
                )]
            )
        );
    }

    #[test]
    fn test_composite_types() {
        assert_eq!(
            prop_type("string | null"),
            TypeNode::Union(vec![
                TypeNode::Keyword(Keyword::String),
                TypeNode::Keyword(Keyword::Null)
            ])
        );
        assert!(matches!(prop_type("A & B"), TypeNode::Intersection(v) if v.len() == 2));
        assert_eq!(prop_type("(a: string) => void"), TypeNode::Function);
        assert_eq!(prop_type("new () => Foo"), TypeNode::Function);
        assert!(matches!(prop_type("(A | B)[]"), TypeNode::Array(_)));
        assert!(matches!(prop_type("{ a: string; b?: number }"), TypeNode::TypeLiteral(m) if m.len() == 2));
        assert!(matches!(prop_type("[string, count: number]"), TypeNode::Tuple(v) if v.len() == 2));
        assert_eq!(prop_type("'on' | 'off'"), TypeNode::Union(vec![
            TypeNode::Literal("on".into()),
            TypeNode::Literal("off".into())
        ]));
        assert_eq!(prop_type("typeof window"), TypeNode::Query("window".into()));
    }

    #[test]
    fn test_unmodelled_types_are_other() {
        assert_eq!(prop_type("keyof Foo"), TypeNode::Other);
        assert_eq!(prop_type("Foo['bar']"), TypeNode::Other);
        assert_eq!(prop_type("{ [K in keyof T]: T[K] }"), TypeNode::Other);
        assert_eq!(prop_type("T extends string ? A : B"), TypeNode::Other);
        assert_eq!(prop_type("import('./x').Foo"), TypeNode::Other);
    }

    #[test]
    fn test_readonly_array_is_array() {
        assert!(matches!(prop_type("readonly string[]"), TypeNode::Array(_)));
    }

    #[test]
    fn test_method_return_type_predicates() {
        let stmts = parse_module(
            "class A { isFoo(x: any): x is Foo { return true } check(): asserts this { } name(): string { return '' } }",
        );
        let decl = stmts[0].as_declaration().unwrap();
        let types: Vec<_> = decl.members().iter().map(|m| m.ty.clone()).collect();
        assert_eq!(
            types,
            vec![
                Some(TypeNode::Other),
                Some(TypeNode::Other),
                Some(TypeNode::Keyword(Keyword::String))
            ]
        );
    }
}
