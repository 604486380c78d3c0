// src/cast/relaxed.rs

//! Lenient JSON-like parser for user-typed arrays and hashes.
//!
//! Accepts strict JSON plus the shorthands people type into a form field:
//!
//! - unquoted keys: `{ some: 1, hash: 2 }`
//! - symbol keys with rockets: `{ :a => 1 }`, and `"a" => 1`
//! - single-quoted strings: `['a', 'b']`
//! - symbols as values: `[:low, :high]` (become strings)
//! - `nil` for `null`
//! - trailing commas: `[1, 2,]`
//!
//! Anything else (bare words, unbalanced brackets, trailing garbage) is an
//! error.

use serde_json::{Map, Number, Value};
use thiserror::Error;

/// Nesting limit; deeper input is rejected instead of recursing further.
const MAX_DEPTH: usize = 128;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message} at offset {offset}")]
pub struct RelaxedError {
    pub offset: usize,
    pub message: String,
}

/// Parse a complete document. Surrounding whitespace is allowed.
pub fn parse(input: &str) -> Result<Value, RelaxedError> {
    let mut parser = Parser {
        chars: input.char_indices().collect(),
        pos: 0,
        len: input.len(),
    };
    let value = parser.value(0)?;
    parser.skip_ws();
    if let Some(c) = parser.peek() {
        return Err(parser.error(format!("unexpected trailing {c:?}")));
    }
    Ok(value)
}

struct Parser {
    chars: Vec<(usize, char)>,
    pos: usize,
    len: usize,
}

impl Parser {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).map(|&(_, c)| c)
    }

    fn peek_at(&self, ahead: usize) -> Option<char> {
        self.chars.get(self.pos + ahead).map(|&(_, c)| c)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    fn offset(&self) -> usize {
        self.chars.get(self.pos).map_or(self.len, |&(i, _)| i)
    }

    fn error(&self, message: impl Into<String>) -> RelaxedError {
        RelaxedError {
            offset: self.offset(),
            message: message.into(),
        }
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    fn expect(&mut self, want: char) -> Result<(), RelaxedError> {
        match self.peek() {
            Some(c) if c == want => {
                self.pos += 1;
                Ok(())
            }
            Some(c) => Err(self.error(format!("expected {want:?}, found {c:?}"))),
            None => Err(self.error(format!("expected {want:?}, found end of input"))),
        }
    }

    fn value(&mut self, depth: usize) -> Result<Value, RelaxedError> {
        if depth > MAX_DEPTH {
            return Err(self.error("nesting too deep"));
        }
        self.skip_ws();
        match self.peek() {
            Some('{') => self.object(depth),
            Some('[') => self.array(depth),
            Some('"') => self.double_quoted().map(Value::String),
            Some('\'') => self.single_quoted().map(Value::String),
            Some(':') if self.peek_at(1).is_some_and(is_ident_start) => {
                self.pos += 1;
                Ok(Value::String(self.ident()))
            }
            Some(c) if c == '-' || c == '+' || c.is_ascii_digit() => self.number(),
            Some(c) if is_ident_start(c) => {
                let word = self.ident();
                match word.as_str() {
                    "true" => Ok(Value::Bool(true)),
                    "false" => Ok(Value::Bool(false)),
                    "null" | "nil" => Ok(Value::Null),
                    _ => Err(self.error(format!("bare word {word:?} is not a value"))),
                }
            }
            Some(c) => Err(self.error(format!("unexpected {c:?}"))),
            None => Err(self.error("unexpected end of input")),
        }
    }

    fn array(&mut self, depth: usize) -> Result<Value, RelaxedError> {
        self.expect('[')?;
        let mut items = Vec::new();
        loop {
            self.skip_ws();
            if self.peek() == Some(']') {
                self.pos += 1;
                return Ok(Value::Array(items));
            }
            items.push(self.value(depth + 1)?);
            self.skip_ws();
            match self.bump() {
                Some(',') => continue,
                Some(']') => return Ok(Value::Array(items)),
                Some(c) => {
                    self.pos -= 1;
                    return Err(self.error(format!("expected ',' or ']', found {c:?}")));
                }
                None => return Err(self.error("unterminated array")),
            }
        }
    }

    fn object(&mut self, depth: usize) -> Result<Value, RelaxedError> {
        self.expect('{')?;
        let mut map = Map::new();
        loop {
            self.skip_ws();
            if self.peek() == Some('}') {
                self.pos += 1;
                return Ok(Value::Object(map));
            }
            let key = self.key()?;
            self.separator()?;
            let value = self.value(depth + 1)?;
            map.insert(key, value);
            self.skip_ws();
            match self.bump() {
                Some(',') => continue,
                Some('}') => return Ok(Value::Object(map)),
                Some(c) => {
                    self.pos -= 1;
                    return Err(self.error(format!("expected ',' or '}}', found {c:?}")));
                }
                None => return Err(self.error("unterminated hash")),
            }
        }
    }

    fn key(&mut self) -> Result<String, RelaxedError> {
        match self.peek() {
            Some('"') => self.double_quoted(),
            Some('\'') => self.single_quoted(),
            Some(':') if self.peek_at(1).is_some_and(is_ident_start) => {
                self.pos += 1;
                Ok(self.ident())
            }
            Some(c) if is_ident_start(c) || c.is_ascii_digit() => Ok(self.ident()),
            Some(c) => Err(self.error(format!("unexpected {c:?} where a key was expected"))),
            None => Err(self.error("unterminated hash")),
        }
    }

    /// `:` or `=>` between a key and its value.
    fn separator(&mut self) -> Result<(), RelaxedError> {
        self.skip_ws();
        match (self.peek(), self.peek_at(1)) {
            (Some(':'), _) => {
                self.pos += 1;
                Ok(())
            }
            (Some('='), Some('>')) => {
                self.pos += 2;
                Ok(())
            }
            _ => Err(self.error("expected ':' or '=>' after key")),
        }
    }

    fn ident(&mut self) -> String {
        let mut out = String::new();
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' {
                out.push(c);
                self.pos += 1;
            } else {
                break;
            }
        }
        // Ruby-style predicate and bang names.
        if let Some(c @ ('?' | '!')) = self.peek() {
            out.push(c);
            self.pos += 1;
        }
        out
    }

    fn number(&mut self) -> Result<Value, RelaxedError> {
        let start = self.pos;
        let mut text = String::new();
        if let Some(sign @ ('-' | '+')) = self.peek() {
            if sign == '-' {
                text.push(sign);
            }
            self.pos += 1;
        }
        let digits = self.digits(&mut text);
        if digits == 0 {
            self.pos = start;
            return Err(self.error("expected digits"));
        }
        let mut is_float = false;
        if self.peek() == Some('.') && self.peek_at(1).is_some_and(|c| c.is_ascii_digit()) {
            is_float = true;
            text.push('.');
            self.pos += 1;
            self.digits(&mut text);
        }
        if let Some(e @ ('e' | 'E')) = self.peek() {
            is_float = true;
            text.push(e);
            self.pos += 1;
            if let Some(sign @ ('-' | '+')) = self.peek() {
                text.push(sign);
                self.pos += 1;
            }
            if self.digits(&mut text) == 0 {
                return Err(self.error("expected exponent digits"));
            }
        }

        if !is_float {
            if let Ok(n) = text.parse::<i64>() {
                return Ok(Value::from(n));
            }
        }
        text.parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .ok_or_else(|| self.error(format!("number {text} out of range")))
    }

    fn digits(&mut self, out: &mut String) -> usize {
        let mut count = 0;
        while let Some(c) = self.peek().filter(char::is_ascii_digit) {
            out.push(c);
            self.pos += 1;
            count += 1;
        }
        count
    }

    fn double_quoted(&mut self) -> Result<String, RelaxedError> {
        self.expect('"')?;
        let mut out = String::new();
        loop {
            match self.bump() {
                Some('"') => return Ok(out),
                Some('\\') => match self.bump() {
                    Some('"') => out.push('"'),
                    Some('\\') => out.push('\\'),
                    Some('/') => out.push('/'),
                    Some('b') => out.push('\u{8}'),
                    Some('f') => out.push('\u{c}'),
                    Some('n') => out.push('\n'),
                    Some('r') => out.push('\r'),
                    Some('t') => out.push('\t'),
                    Some('u') => out.push(self.unicode_escape()?),
                    Some(c) => return Err(self.error(format!("invalid escape '\\{c}'"))),
                    None => return Err(self.error("unterminated string")),
                },
                Some(c) => out.push(c),
                None => return Err(self.error("unterminated string")),
            }
        }
    }

    fn single_quoted(&mut self) -> Result<String, RelaxedError> {
        self.expect('\'')?;
        let mut out = String::new();
        loop {
            match self.bump() {
                Some('\'') => return Ok(out),
                Some('\\') => match self.peek() {
                    Some(c @ ('\'' | '\\')) => {
                        out.push(c);
                        self.pos += 1;
                    }
                    _ => out.push('\\'),
                },
                Some(c) => out.push(c),
                None => return Err(self.error("unterminated string")),
            }
        }
    }

    fn unicode_escape(&mut self) -> Result<char, RelaxedError> {
        let mut code = 0u32;
        for _ in 0..4 {
            let digit = self
                .bump()
                .and_then(|c| c.to_digit(16))
                .ok_or_else(|| self.error("invalid \\u escape"))?;
            code = code * 16 + digit;
        }
        char::from_u32(code).ok_or_else(|| self.error("invalid \\u code point"))
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}
