use std::str::Chars;

use peekmore::{PeekMore, PeekMoreIterator};

use crate::error::ScanError;
use crate::literal::Literal;
use crate::token::{Token, Type};

/// Converts source text into a flat token stream, accumulating lexical
/// errors along the way instead of stopping at the first one (spec.md §7).
pub struct Scanner<'a> {
    source: PeekMoreIterator<Chars<'a>>,
    tokens: Vec<Token>,
    pub errors: Vec<ScanError>,
    line: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Scanner<'a> {
        Scanner {
            source: source.chars().peekmore(),
            tokens: Vec::new(),
            errors: Vec::new(),
            line: 1,
        }
    }

    pub fn scan_tokens(&mut self) -> Vec<Token> {
        while !self.is_at_end() {
            self.scan_token();
        }

        self.tokens.push(Token::new(Type::EOF, String::new(), None, self.line));

        std::mem::take(&mut self.tokens)
    }

    fn advance(&mut self) -> char {
        self.source.next().expect("advance called past end of source")
    }

    fn peek(&mut self) -> Option<char> {
        self.source.peek().copied()
    }

    fn peek_next(&mut self) -> Option<char> {
        self.source.peek_next().copied()
    }

    fn match_next(&mut self, expected: char) -> bool {
        self.peek_next() == Some(expected)
    }

    fn is_at_end(&mut self) -> bool {
        self.peek().is_none()
    }

    fn add_token(&mut self, r#type: Type, lexeme: String, literal: Option<Literal>) {
        self.tokens.push(Token::new(r#type, lexeme, literal, self.line));
    }

    fn single(&mut self, r#type: Type) {
        let c = self.advance();
        self.add_token(r#type, c.to_string(), None);
    }

    fn double(&mut self, r#type: Type) {
        let first = self.advance();
        let second = self.advance();
        self.add_token(r#type, format!("{first}{second}"), None);
    }

    /// Handles a string literal. Strings may span multiple lines; the line
    /// counter advances inside the string (spec.md §4.1).
    fn string(&mut self) {
        let start_line = self.line;
        self.advance(); // opening quote

        let mut value = String::new();
        loop {
            match self.peek() {
                Some('"') => break,
                Some(c) => {
                    if c == '\n' {
                        self.line += 1;
                    }
                    value.push(self.advance());
                },
                None => {
                    self.errors.push(ScanError {
                        line: start_line,
                        message: "Expected string closing quote \" but found none".to_string(),
                    });
                    return;
                },
            }
        }

        self.advance(); // closing quote
        self.add_token(Type::String, value.clone(), Some(Literal::String(value)));
    }

    /// Handles a number literal. A trailing `.` not followed by a digit is
    /// left unconsumed so the scanner re-emits it as a separate `dot` token
    /// on the next call (spec.md §4.1).
    fn number(&mut self) {
        let mut value = String::new();

        while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            value.push(self.advance());
        }

        if self.peek() == Some('.') && matches!(self.peek_next(), Some(c) if c.is_ascii_digit()) {
            value.push(self.advance()); // the dot
            while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                value.push(self.advance());
            }
        }

        let number: f64 = value.parse().expect("scanned digits to form a valid number");
        self.add_token(Type::Number, value, Some(Literal::Number(number)));
    }

    fn identifier(&mut self) {
        let mut value = String::new();

        while matches!(self.peek(), Some(c) if c.is_alphanumeric() || c == '_') {
            value.push(self.advance());
        }

        let r#type = match value.as_str() {
            "and" => Type::And,
            "class" => Type::Class,
            "else" => Type::Else,
            "false" => Type::False,
            "for" => Type::For,
            "fun" => Type::Fun,
            "if" => Type::If,
            "nil" => Type::Nil,
            "or" => Type::Or,
            "print" => Type::Print,
            "return" => Type::Return,
            "super" => Type::Super,
            "this" => Type::This,
            "true" => Type::True,
            "var" => Type::Var,
            "while" => Type::While,
            _ => Type::Identifier,
        };

        self.add_token(r#type, value, None);
    }

    fn scan_token(&mut self) {
        let c = self.peek().expect("scan_token called at end of source");

        match c {
            '(' => self.single(Type::LeftParen),
            ')' => self.single(Type::RightParen),
            '{' => self.single(Type::LeftBrace),
            '}' => self.single(Type::RightBrace),
            ',' => self.single(Type::Comma),
            '.' => self.single(Type::Dot),
            '-' => self.single(Type::Minus),
            '+' => self.single(Type::Plus),
            ';' => self.single(Type::Semicolon),
            '*' => self.single(Type::Star),

            '!' => if self.match_next('=') { self.double(Type::BangEqual) } else { self.single(Type::Bang) },
            '=' => if self.match_next('=') { self.double(Type::EqualEqual) } else { self.single(Type::Equal) },
            '<' => if self.match_next('=') { self.double(Type::LessEqual) } else { self.single(Type::Less) },
            '>' => if self.match_next('=') { self.double(Type::GreaterEqual) } else { self.single(Type::Greater) },

            '/' => {
                if self.match_next('/') {
                    while !matches!(self.peek(), Some('\n') | None) {
                        self.advance();
                    }
                } else {
                    self.single(Type::Slash);
                }
            },

            ' ' | '\r' | '\t' => { self.advance(); },

            '\n' => {
                self.advance();
                self.line += 1;
            },

            '"' => self.string(),

            c if c.is_ascii_digit() => self.number(),
            c if c.is_alphabetic() || c == '_' => self.identifier(),

            _ => {
                self.advance();
                self.errors.push(ScanError {
                    line: self.line,
                    message: format!("Unexpected character \"{c}\""),
                });
            },
        }
    }
}
