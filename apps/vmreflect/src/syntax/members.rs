//! Class bodies and interface / type-literal bodies.

use super::ast::*;
use super::lexer::Token;
use super::parser::Parser;

const CLASS_MODIFIERS: &[&str] = &[
    "public",
    "private",
    "protected",
    "static",
    "readonly",
    "abstract",
    "declare",
    "override",
    "accessor",
    "async",
];

impl<'a> Parser<'a> {
    /// Whether the token at `n` can begin a member name.
    fn starts_member_name_at(&self, n: usize) -> bool {
        matches!(
            self.peek_at(n),
            Token::Ident(_)
                | Token::Str(_)
                | Token::Number
                | Token::PrivateName(_)
                | Token::LBracket
                | Token::Star
        )
    }

    /// `[key: string]: T`
    fn at_index_signature(&self) -> bool {
        self.at(&Token::LBracket) && self.is_ident_at(1) && self.peek_at(2) == &Token::Colon
    }

    /// Member name; `None` for computed names, which are skipped.
    fn parse_property_name(&mut self) -> Option<String> {
        let name = match self.peek() {
            Token::Ident(w) | Token::Str(w) | Token::PrivateName(w) => Some(w.clone()),
            Token::Number => {
                let span = self.current_span();
                Some(self.text(span.start, span.end).to_string())
            }
            Token::LBracket => {
                self.skip_balanced();
                return None;
            }
            _ => return None,
        };
        self.bump();
        name
    }

    fn parse_index_signature(&mut self, start: Span, is_static: bool) -> Member {
        self.skip_balanced();
        let optional = self.eat(&Token::Question);
        let ty = if self.eat(&Token::Colon) {
            Some(self.parse_type())
        } else {
            None
        };
        Member {
            kind: MemberKind::IndexSignature,
            name: None,
            ty,
            is_static,
            optional,
            span: self.span_from(start),
        }
    }

    /// Skip a property initializer up to (not including) its terminator.
    fn skip_initializer(&mut self) {
        loop {
            match self.peek() {
                Token::Semicolon | Token::RBrace | Token::Eof => return,
                Token::LBrace | Token::LParen | Token::LBracket => self.skip_balanced(),
                _ => {
                    if self.at_member_boundary() {
                        return;
                    }
                    self.bump();
                }
            }
        }
    }

    pub(super) fn parse_class_members(&mut self) -> Vec<Member> {
        self.bump(); // {
        let mut members = Vec::new();
        loop {
            match self.peek() {
                Token::RBrace => {
                    self.bump();
                    break;
                }
                Token::Eof => break,
                Token::Semicolon => {
                    self.bump();
                    continue;
                }
                _ => {}
            }
            let before = self.current_span().start;
            if let Some(member) = self.parse_class_member() {
                members.push(member);
            }
            if self.current_span().start == before && !self.at_eof() {
                self.bump();
            }
        }
        members
    }

    fn parse_class_member(&mut self) -> Option<Member> {
        let start = self.current_span();
        self.skip_decorators();

        let mut is_static = false;
        while let Token::Ident(word) = self.peek() {
            if !CLASS_MODIFIERS.contains(&word.as_str()) || !self.starts_member_name_at(1) {
                break;
            }
            if word == "static" {
                is_static = true;
            }
            self.bump();
        }

        if self.is_word("static") && self.peek_at(1) == &Token::LBrace {
            self.bump();
            self.skip_balanced();
            return Some(Member {
                kind: MemberKind::StaticBlock,
                name: None,
                ty: None,
                is_static: true,
                optional: false,
                span: self.span_from(start),
            });
        }

        if self.at_index_signature() {
            return Some(self.parse_index_signature(start, is_static));
        }

        self.eat(&Token::Star);
        let mut accessor = None;
        if (self.is_word("get") || self.is_word("set")) && self.starts_member_name_at(1) {
            accessor = Some(if self.is_word("get") {
                MemberKind::GetAccessor
            } else {
                MemberKind::SetAccessor
            });
            self.bump();
        }

        let name = self.parse_property_name();
        let optional = self.eat(&Token::Question);
        self.eat(&Token::Bang);
        if self.at(&Token::Lt) {
            self.skip_angle();
        }

        if self.at(&Token::LParen) {
            self.skip_balanced();
            let ty = if self.eat(&Token::Colon) {
                Some(self.parse_return_type())
            } else {
                None
            };
            if self.at(&Token::LBrace) {
                self.skip_balanced();
            } else {
                self.eat(&Token::Semicolon);
            }
            let kind = match accessor {
                Some(kind) => kind,
                None if name.as_deref() == Some("constructor") => MemberKind::Constructor,
                None => MemberKind::Method,
            };
            return Some(Member {
                kind,
                name,
                ty,
                is_static,
                optional,
                span: self.span_from(start),
            });
        }

        let ty = if self.eat(&Token::Colon) {
            Some(self.parse_type())
        } else {
            None
        };
        if self.eat(&Token::Eq) {
            self.skip_initializer();
        }
        self.eat(&Token::Semicolon);
        Some(Member {
            kind: MemberKind::Property,
            name,
            ty,
            is_static,
            optional,
            span: self.span_from(start),
        })
    }

    /// `{ ... }` of an interface or type literal.
    pub(super) fn parse_type_members(&mut self) -> Vec<Member> {
        self.bump(); // {
        let mut members = Vec::new();
        loop {
            match self.peek() {
                Token::RBrace => {
                    self.bump();
                    break;
                }
                Token::Eof => break,
                Token::Semicolon | Token::Comma => {
                    self.bump();
                    continue;
                }
                _ => {}
            }
            let before = self.current_span().start;
            if let Some(member) = self.parse_type_member() {
                members.push(member);
            }
            if self.current_span().start == before && !self.at_eof() {
                self.bump();
            }
        }
        members
    }

    fn parse_type_member(&mut self) -> Option<Member> {
        let start = self.current_span();

        let signature = if self.at(&Token::LParen) || self.at(&Token::Lt) {
            Some(MemberKind::CallSignature)
        } else if self.is_word("new") && matches!(self.peek_at(1), Token::LParen | Token::Lt) {
            self.bump();
            Some(MemberKind::ConstructSignature)
        } else {
            None
        };
        if let Some(kind) = signature {
            if self.at(&Token::Lt) {
                self.skip_angle();
            }
            if self.at(&Token::LParen) {
                self.skip_balanced();
            }
            let ty = if self.eat(&Token::Colon) {
                Some(self.parse_return_type())
            } else {
                None
            };
            return Some(Member {
                kind,
                name: None,
                ty,
                is_static: false,
                optional: false,
                span: self.span_from(start),
            });
        }

        if self.is_word("readonly") && self.starts_member_name_at(1) {
            self.bump();
        }
        if self.at(&Token::LBracket) && !self.at_index_signature() {
            // Computed key or a mapped-type style `[K in T]`.
            return Some(self.parse_index_signature(start, false));
        }
        if self.at_index_signature() {
            return Some(self.parse_index_signature(start, false));
        }

        let mut accessor = None;
        if (self.is_word("get") || self.is_word("set")) && self.starts_member_name_at(1) {
            accessor = Some(if self.is_word("get") {
                MemberKind::GetAccessor
            } else {
                MemberKind::SetAccessor
            });
            self.bump();
        }

        let name = self.parse_property_name()?;
        let optional = self.eat(&Token::Question);
        if self.at(&Token::Lt) {
            self.skip_angle();
        }
        let (kind, ty) = if self.at(&Token::LParen) {
            self.skip_balanced();
            let ty = if self.eat(&Token::Colon) {
                Some(self.parse_return_type())
            } else {
                None
            };
            (accessor.unwrap_or(MemberKind::MethodSignature), ty)
        } else {
            let ty = if self.eat(&Token::Colon) {
                Some(self.parse_type())
            } else {
                None
            };
            (MemberKind::PropertySignature, ty)
        };
        Some(Member {
            kind,
            name: Some(name),
            ty,
            is_static: false,
            optional,
            span: self.span_from(start),
        })
    }
}
