//! Tokenizer for the permissive JSON grammar (JSON5 numbers, single quotes,
//! bare identifiers, `//` comments). Whitespace is dropped; every other byte
//! of the input ends up inside exactly one token.

use super::syntax::Span;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TokenKind {
    LeftBrace,
    RightBrace,
    LeftBracket,
    RightBracket,
    LeftParen,
    RightParen,
    Colon,
    Comma,
    String,
    UnterminatedString,
    Number,
    True,
    False,
    Null,
    New,
    Identifier,
    LineComment,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

pub(crate) fn tokenize(source: &str) -> Vec<Token> {
    let mut lexer = Lexer { source, pos: 0 };
    let mut tokens = Vec::new();
    while let Some(token) = lexer.next_token() {
        tokens.push(token);
    }
    tokens
}

struct Lexer<'a> {
    source: &'a str,
    pos: usize,
}

impl Lexer<'_> {
    fn peek(&self) -> Option<char> {
        self.source[self.pos..].chars().next()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.source[self.pos..].chars().nth(offset)
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    fn eat_while(&mut self, predicate: impl Fn(char) -> bool) -> usize {
        let start = self.pos;
        while self.peek().is_some_and(&predicate) {
            self.bump();
        }
        self.pos - start
    }

    fn next_token(&mut self) -> Option<Token> {
        self.eat_while(char::is_whitespace);
        let start = self.pos;
        let ch = self.peek()?;
        let kind = match ch {
            '{' | '}' | '[' | ']' | '(' | ')' | ':' | ',' => {
                self.bump();
                match ch {
                    '{' => TokenKind::LeftBrace,
                    '}' => TokenKind::RightBrace,
                    '[' => TokenKind::LeftBracket,
                    ']' => TokenKind::RightBracket,
                    '(' => TokenKind::LeftParen,
                    ')' => TokenKind::RightParen,
                    ':' => TokenKind::Colon,
                    _ => TokenKind::Comma,
                }
            }
            '"' | '\'' => self.string(ch),
            '/' if self.peek_at(1) == Some('/') => {
                self.eat_while(|c| c != '\n' && c != '\r');
                TokenKind::LineComment
            }
            '+' | '-' | '.' | '0'..='9' => self.number(),
            c if is_identifier_start(c) => self.word(),
            _ => {
                self.bump();
                TokenKind::Unknown
            }
        };
        Some(Token {
            kind,
            span: Span::new(start, self.pos),
        })
    }

    fn string(&mut self, quote: char) -> TokenKind {
        self.bump();
        while let Some(ch) = self.bump() {
            match ch {
                '\\' => {
                    self.bump();
                }
                c if c == quote => return TokenKind::String,
                _ => {}
            }
        }
        TokenKind::UnterminatedString
    }

    fn number(&mut self) -> TokenKind {
        let start = self.pos;
        if matches!(self.peek(), Some('+' | '-')) {
            self.bump();
        }
        if self.source[self.pos..].starts_with("Infinity") {
            self.pos += "Infinity".len();
            return TokenKind::Number;
        }
        let hex_prefix = self.peek() == Some('0') && matches!(self.peek_at(1), Some('x' | 'X'));
        if hex_prefix && self.peek_at(2).is_some_and(|c| c.is_ascii_hexdigit()) {
            self.pos += 2;
            self.eat_while(|c| c.is_ascii_hexdigit());
            return TokenKind::Number;
        }
        let mut digits = self.eat_while(|c| c.is_ascii_digit());
        if self.peek() == Some('.') {
            self.bump();
            digits += self.eat_while(|c| c.is_ascii_digit());
        }
        if digits == 0 {
            // A lone sign or dot.
            self.pos = start;
            self.bump();
            return TokenKind::Unknown;
        }
        if matches!(self.peek(), Some('e' | 'E')) {
            let checkpoint = self.pos;
            self.bump();
            if matches!(self.peek(), Some('+' | '-')) {
                self.bump();
            }
            if self.eat_while(|c| c.is_ascii_digit()) == 0 {
                self.pos = checkpoint;
            }
        }
        TokenKind::Number
    }

    fn word(&mut self) -> TokenKind {
        let start = self.pos;
        self.eat_while(is_identifier_part);
        match &self.source[start..self.pos] {
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            "null" => TokenKind::Null,
            "new" => TokenKind::New,
            _ => TokenKind::Identifier,
        }
    }
}

fn is_identifier_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_' || ch == '$'
}

fn is_identifier_part(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_' || ch == '$' || ch == '.'
}
