//! Token stream for TypeScript sources, built on `logos`.
//!
//! Only the shapes the declaration parser cares about get their own token:
//! words (keywords are contextual and matched by text), strings, brackets and
//! a handful of punctuators. Everything else collapses into `Punct`, and
//! characters the lexer cannot classify become `Unknown` instead of failing.

use super::ast::Span;
use logos::Logos;

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n\f\u{FEFF}\u{A0}]+")]
enum RawToken {
    #[regex(r"//[^\n]*", logos::skip)]
    LineComment,

    #[token("/*", block_comment)]
    BlockComment,

    #[regex(r"#![^\n]*", logos::skip)]
    Shebang,

    #[regex(r"[A-Za-z_$][A-Za-z0-9_$]*")]
    Ident,

    #[regex(r"#[A-Za-z_$][A-Za-z0-9_$]*")]
    PrivateName,

    #[regex(r#""([^"\\\n]|\\(.|\n))*""#)]
    #[regex(r"'([^'\\\n]|\\(.|\n))*'")]
    Str,

    #[token("`", template)]
    Template,

    #[regex(r"[0-9][0-9A-Za-z_]*(\.[0-9A-Za-z_]*)?")]
    #[regex(r"\.[0-9][0-9A-Za-z_]*")]
    Number,

    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
    #[token(":")]
    Colon,
    #[token(".")]
    Dot,
    #[token("...")]
    Ellipsis,
    #[token("?")]
    Question,
    #[token("=")]
    Eq,
    #[token("=>")]
    Arrow,
    #[token("*")]
    Star,
    #[token("&")]
    Amp,
    #[token("|")]
    Pipe,
    #[token("!")]
    Bang,
    #[token("@")]
    At,
    #[regex(r"[-+/%^~]")]
    Punct,
}

fn block_comment(lex: &mut logos::Lexer<RawToken>) -> logos::Skip {
    let remainder = lex.remainder();
    match remainder.find("*/") {
        Some(end) => lex.bump(end + 2),
        None => lex.bump(remainder.len()),
    }
    logos::Skip
}

fn template(lex: &mut logos::Lexer<RawToken>) -> bool {
    let remainder = lex.remainder();
    let len = template_len(remainder.as_bytes()).unwrap_or(remainder.len());
    lex.bump(len);
    true
}

/// Length of a template literal body including its closing backtick, with
/// `${ ... }` substitutions (and templates nested inside them) skipped.
fn template_len(bytes: &[u8]) -> Option<usize> {
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'`' => return Some(i + 1),
            b'$' if bytes.get(i + 1) == Some(&b'{') => {
                i += 2;
                let mut depth = 1usize;
                while i < bytes.len() && depth > 0 {
                    match bytes[i] {
                        b'{' => depth += 1,
                        b'}' => depth -= 1,
                        b'`' => {
                            i += 1 + template_len(&bytes[i + 1..])?;
                            continue;
                        }
                        quote @ (b'"' | b'\'') => {
                            i += 1;
                            while i < bytes.len() && bytes[i] != quote {
                                if bytes[i] == b'\\' {
                                    i += 1;
                                }
                                i += 1;
                            }
                        }
                        _ => {}
                    }
                    i += 1;
                }
            }
            _ => i += 1,
        }
    }
    None
}

/// A token as seen by the parser.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Ident(String),
    PrivateName(String),
    /// String literal with quotes removed and escapes decoded.
    Str(String),
    Template,
    Number,
    LBrace,
    RBrace,
    LParen,
    RParen,
    LBracket,
    RBracket,
    Lt,
    Gt,
    Comma,
    Semicolon,
    Colon,
    Dot,
    Ellipsis,
    Question,
    Eq,
    Arrow,
    Star,
    Amp,
    Pipe,
    Bang,
    At,
    Punct,
    Unknown,
    Eof,
}

/// A token together with its location.
#[derive(Debug, Clone, PartialEq)]
pub struct Lexeme {
    pub token: Token,
    pub span: Span,
    /// A line terminator (possibly inside a comment) precedes this token.
    pub newline_before: bool,
}

/// Tokenize `source`. Always succeeds and always ends with `Token::Eof`.
pub fn tokenize(source: &str) -> Vec<Lexeme> {
    let mut lexer = RawToken::lexer(source);
    let mut out = Vec::new();
    let mut line = 1u32;
    let mut column = 1u32;
    let mut last_end = 0usize;

    while let Some(result) = lexer.next() {
        let range = lexer.span();
        let gap = &source[last_end..range.start];
        advance(&mut line, &mut column, gap);
        let span = Span::new(range.start, range.end, line, column);
        let token = match result {
            Ok(raw) => convert(raw, lexer.slice()),
            Err(()) => Token::Unknown,
        };
        out.push(Lexeme {
            token,
            span,
            newline_before: gap.contains('\n'),
        });
        advance(&mut line, &mut column, &source[range.start..range.end]);
        last_end = range.end;
    }

    let gap = &source[last_end..];
    advance(&mut line, &mut column, gap);
    out.push(Lexeme {
        token: Token::Eof,
        span: Span::new(source.len(), source.len(), line, column),
        newline_before: true,
    });
    out
}

fn advance(line: &mut u32, column: &mut u32, text: &str) {
    for c in text.chars() {
        if c == '\n' {
            *line += 1;
            *column = 1;
        } else {
            *column += 1;
        }
    }
}

fn convert(raw: RawToken, slice: &str) -> Token {
    match raw {
        RawToken::Ident => Token::Ident(slice.to_string()),
        RawToken::PrivateName => Token::PrivateName(slice.to_string()),
        RawToken::Str => Token::Str(unescape(&slice[1..slice.len() - 1])),
        RawToken::Template => Token::Template,
        RawToken::Number => Token::Number,
        RawToken::LBrace => Token::LBrace,
        RawToken::RBrace => Token::RBrace,
        RawToken::LParen => Token::LParen,
        RawToken::RParen => Token::RParen,
        RawToken::LBracket => Token::LBracket,
        RawToken::RBracket => Token::RBracket,
        RawToken::Lt => Token::Lt,
        RawToken::Gt => Token::Gt,
        RawToken::Comma => Token::Comma,
        RawToken::Semicolon => Token::Semicolon,
        RawToken::Colon => Token::Colon,
        RawToken::Dot => Token::Dot,
        RawToken::Ellipsis => Token::Ellipsis,
        RawToken::Question => Token::Question,
        RawToken::Eq => Token::Eq,
        RawToken::Arrow => Token::Arrow,
        RawToken::Star => Token::Star,
        RawToken::Amp => Token::Amp,
        RawToken::Pipe => Token::Pipe,
        RawToken::Bang => Token::Bang,
        RawToken::At => Token::At,
        RawToken::Punct => Token::Punct,
        RawToken::LineComment | RawToken::BlockComment | RawToken::Shebang => {
            unreachable!("comments are skipped by the lexer")
        }
    }
}

fn unescape(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => result.push('\n'),
            Some('r') => result.push('\r'),
            Some('t') => result.push('\t'),
            Some('0') => result.push('\0'),
            Some('\n') => {}
            Some(other) => result.push(other),
            None => break,
        }
    }
    result
}
