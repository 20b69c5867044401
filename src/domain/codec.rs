//! Value codec: stored option text to [`Value`] and back.
//!
//! Decoding never fails on bad syntax; text that does not parse as a
//! structured literal, or parses to a plain literal, becomes
//! [`Value::Scalar`] holding the text verbatim. The only failure is
//! resource exhaustion (nesting or size beyond fixed limits), which the
//! caller must treat as fatal.

use indexmap::IndexMap;

use super::value::{Literal, Value};
use crate::error::{Error, Result};

/// Deepest bracket nesting accepted before decoding is abandoned.
pub const MAX_NESTING: usize = 200;

/// Largest stored text accepted for structured decoding.
pub const MAX_INPUT_BYTES: usize = 16 * 1024 * 1024;

/// Why a literal failed to parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseFailure {
    /// Ordinary syntax error; the caller keeps the text as a scalar.
    Syntax(String),
    /// Input too deep or too large to process.
    Exhausted(String),
}

/// Decode stored text into a typed value.
pub fn decode(text: &str) -> Result<Value> {
    match parse_literal(text) {
        Ok(literal) => Ok(classify(literal, text)),
        Err(ParseFailure::Syntax(_)) => Ok(Value::Scalar(text.to_string())),
        Err(ParseFailure::Exhausted(reason)) => Err(Error::ResourceExhausted { reason }),
    }
}

/// Encode a value to its canonical stored text.
#[must_use]
pub fn encode(value: &Value) -> String {
    match value {
        Value::Scalar(text) => text.clone(),
        Value::Tuple(items) => Literal::Tuple(items.clone()).to_string(),
        Value::Dictionary(map) => Literal::Dict(
            map.iter()
                .map(|(key, value)| (Literal::Str(key.clone()), value.clone()))
                .collect(),
        )
        .to_string(),
        Value::TupleList(entries) => Literal::from_tuple_list(entries).to_string(),
    }
}

fn classify(literal: Literal, text: &str) -> Value {
    match literal {
        Literal::Tuple(items) => Value::Tuple(items),
        Literal::Dict(pairs) => {
            let mut map = IndexMap::with_capacity(pairs.len());
            for (key, value) in pairs {
                match key {
                    Literal::Str(key) => {
                        map.insert(key, value);
                    }
                    _ => return Value::Scalar(text.to_string()),
                }
            }
            Value::Dictionary(map)
        }
        list @ Literal::List(_) => match list.as_tuple_list() {
            Some(entries) => Value::TupleList(entries),
            None => Value::Scalar(text.to_string()),
        },
        _ => Value::Scalar(text.to_string()),
    }
}

/// Parse one complete structured literal.
pub fn parse_literal(text: &str) -> std::result::Result<Literal, ParseFailure> {
    if text.len() > MAX_INPUT_BYTES {
        return Err(ParseFailure::Exhausted(format!(
            "{} bytes exceeds the {MAX_INPUT_BYTES} byte limit",
            text.len()
        )));
    }

    let mut parser = Parser {
        chars: text.chars().collect(),
        pos: 0,
        depth: 0,
    };
    parser.skip_whitespace();
    let literal = parser.literal()?;
    parser.skip_whitespace();
    if parser.pos < parser.chars.len() {
        return Err(parser.syntax("unexpected trailing input"));
    }
    Ok(literal)
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn syntax(&self, message: &str) -> ParseFailure {
        ParseFailure::Syntax(format!("{message} at position {}", self.pos))
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += 1;
        Some(ch)
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.pos += 1;
        }
    }

    fn enter(&mut self) -> std::result::Result<(), ParseFailure> {
        self.depth += 1;
        if self.depth > MAX_NESTING {
            return Err(ParseFailure::Exhausted(format!(
                "nesting deeper than {MAX_NESTING} levels"
            )));
        }
        Ok(())
    }

    fn literal(&mut self) -> std::result::Result<Literal, ParseFailure> {
        match self.peek() {
            Some('\'' | '"') => self.string(),
            Some('r' | 'R') if matches!(self.chars.get(self.pos + 1), Some('\'' | '"')) => {
                self.pos += 1;
                self.raw_string()
            }
            Some('(') => self.tuple(),
            Some('[') => self.list(),
            Some('{') => self.dict(),
            Some(c) if c.is_ascii_digit() || c == '-' || c == '+' || c == '.' => self.number(),
            Some(c) if c.is_alphabetic() || c == '_' => self.name(),
            Some(_) => Err(self.syntax("unexpected character")),
            None => Err(self.syntax("unexpected end of input")),
        }
    }

    fn name(&mut self) -> std::result::Result<Literal, ParseFailure> {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_alphanumeric() || c == '_') {
            self.pos += 1;
        }
        let name: String = self.chars[start..self.pos].iter().collect();
        match name.as_str() {
            "True" => Ok(Literal::Bool(true)),
            "False" => Ok(Literal::Bool(false)),
            "None" => Ok(Literal::None),
            _ => Err(self.syntax("unknown name")),
        }
    }

    fn number(&mut self) -> std::result::Result<Literal, ParseFailure> {
        let start = self.pos;
        if matches!(self.peek(), Some('-' | '+')) {
            self.pos += 1;
            self.skip_whitespace();
        }
        let mut digits = 0;
        let mut seen_dot = false;
        let mut seen_exponent = false;
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() || c == '_' {
                digits += usize::from(c != '_');
            } else if c == '.' && !seen_dot && !seen_exponent {
                seen_dot = true;
            } else if matches!(c, 'e' | 'E') && digits > 0 && !seen_exponent {
                seen_exponent = true;
                if matches!(self.chars.get(self.pos + 1), Some('-' | '+')) {
                    self.pos += 1;
                }
            } else {
                break;
            }
            self.pos += 1;
        }
        if digits == 0 {
            return Err(self.syntax("malformed number"));
        }
        let token: String = self.chars[start..self.pos].iter().collect();
        Ok(Literal::Number(token))
    }

    fn string(&mut self) -> std::result::Result<Literal, ParseFailure> {
        let delimiter = self.bump().ok_or_else(|| self.syntax("expected quote"))?;
        let mut text = String::new();
        loop {
            match self.bump() {
                None | Some('\n') => return Err(self.syntax("unterminated string")),
                Some(c) if c == delimiter => break,
                Some('\\') => self.escape(&mut text)?,
                Some(c) => text.push(c),
            }
        }
        Ok(Literal::Str(text))
    }

    fn raw_string(&mut self) -> std::result::Result<Literal, ParseFailure> {
        let delimiter = self.bump().ok_or_else(|| self.syntax("expected quote"))?;
        let mut text = String::new();
        loop {
            match self.bump() {
                None | Some('\n') => return Err(self.syntax("unterminated string")),
                Some(c) if c == delimiter => break,
                Some('\\') => {
                    text.push('\\');
                    if let Some(next) = self.bump() {
                        text.push(next);
                    }
                }
                Some(c) => text.push(c),
            }
        }
        Ok(Literal::Str(text))
    }

    fn escape(&mut self, text: &mut String) -> std::result::Result<(), ParseFailure> {
        match self.bump() {
            Some('\\') => text.push('\\'),
            Some('\'') => text.push('\''),
            Some('"') => text.push('"'),
            Some('n') => text.push('\n'),
            Some('r') => text.push('\r'),
            Some('t') => text.push('\t'),
            Some('0') => text.push('\0'),
            Some('\n') => {}
            Some('x') => text.push(self.hex_char(2)?),
            Some('u') => text.push(self.hex_char(4)?),
            Some('U') => text.push(self.hex_char(8)?),
            // Unknown escapes keep the backslash.
            Some(other) => {
                text.push('\\');
                text.push(other);
            }
            None => return Err(self.syntax("unterminated escape")),
        }
        Ok(())
    }

    fn hex_char(&mut self, width: usize) -> std::result::Result<char, ParseFailure> {
        let end = self.pos + width;
        if end > self.chars.len() {
            return Err(self.syntax("truncated escape"));
        }
        let digits: String = self.chars[self.pos..end].iter().collect();
        self.pos = end;
        u32::from_str_radix(&digits, 16)
            .ok()
            .and_then(char::from_u32)
            .ok_or_else(|| self.syntax("invalid escape"))
    }

    /// Comma-separated items up to `close`; returns items and whether a
    /// trailing comma was present.
    fn items(&mut self, close: char) -> std::result::Result<(Vec<Literal>, bool), ParseFailure> {
        self.enter()?;
        let mut items = Vec::new();
        let mut trailing_comma = false;
        loop {
            self.skip_whitespace();
            if self.peek() == Some(close) {
                self.pos += 1;
                break;
            }
            items.push(self.literal()?);
            self.skip_whitespace();
            match self.bump() {
                Some(',') => trailing_comma = true,
                Some(c) if c == close => {
                    trailing_comma = false;
                    break;
                }
                _ => return Err(self.syntax("expected ',' or closing bracket")),
            }
        }
        self.depth -= 1;
        Ok((items, trailing_comma))
    }

    fn tuple(&mut self) -> std::result::Result<Literal, ParseFailure> {
        self.pos += 1;
        let (mut items, trailing_comma) = self.items(')')?;
        // `(x)` is a parenthesised value, not a tuple.
        if items.len() == 1 && !trailing_comma {
            return Ok(items.remove(0));
        }
        Ok(Literal::Tuple(items))
    }

    fn list(&mut self) -> std::result::Result<Literal, ParseFailure> {
        self.pos += 1;
        let (items, _) = self.items(']')?;
        Ok(Literal::List(items))
    }

    fn dict(&mut self) -> std::result::Result<Literal, ParseFailure> {
        self.pos += 1;
        self.enter()?;
        let mut pairs = Vec::new();
        loop {
            self.skip_whitespace();
            if self.peek() == Some('}') {
                self.pos += 1;
                break;
            }
            let key = self.literal()?;
            if matches!(key, Literal::List(_) | Literal::Dict(_)) {
                return Err(self.syntax("unhashable key"));
            }
            self.skip_whitespace();
            if self.bump() != Some(':') {
                return Err(self.syntax("expected ':'"));
            }
            self.skip_whitespace();
            let value = self.literal()?;
            pairs.push((key, value));
            self.skip_whitespace();
            match self.bump() {
                Some(',') => {}
                Some('}') => break,
                _ => return Err(self.syntax("expected ',' or '}'")),
            }
        }
        self.depth -= 1;
        Ok(Literal::Dict(pairs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(text: &str) -> Literal {
        Literal::from(text)
    }

    #[test]
    fn decodes_tuple_list_action_script() {
        let text = "[('get', 'https://example.com'), ('sleep', '0.8'), ('refresh',)]";
        let value = decode(text).unwrap();
        assert_eq!(
            value,
            Value::TupleList(vec![
                vec![s("get"), s("https://example.com")],
                vec![s("sleep"), s("0.8")],
                vec![s("refresh")],
            ])
        );
        assert_eq!(encode(&value), text);
    }

    #[test]
    fn decodes_nested_control_flow_entries() {
        let text = "[('exist', '//a', [('click', '//a'), ('sleep', '0.8')]), ('refresh',)]";
        let value = decode(text).unwrap();
        let Value::TupleList(entries) = &value else {
            panic!("expected tuple list, got {value:?}");
        };
        assert_eq!(entries.len(), 2);
        assert_eq!(
            entries[0][2].as_tuple_list(),
            Some(vec![vec![s("click"), s("//a")], vec![s("sleep"), s("0.8")]])
        );
        assert_eq!(encode(&value), text);
    }

    #[test]
    fn decodes_dictionary_in_order() {
        let value = decode("{'b': '1', 'a': None}").unwrap();
        let Value::Dictionary(map) = &value else {
            panic!("expected dictionary, got {value:?}");
        };
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(map["a"], Literal::None);
        assert_eq!(encode(&value), "{'b': '1', 'a': None}");
    }

    #[test]
    fn plain_literals_and_garbage_stay_scalar() {
        for text in ["4", "True", "'quoted'", "hello world", "", "(unclosed", "['a', None]"] {
            assert_eq!(decode(text).unwrap(), Value::Scalar(text.to_string()), "{text}");
        }
    }

    #[test]
    fn parenthesised_value_is_not_a_tuple() {
        assert_eq!(decode("('a')").unwrap(), Value::Scalar("('a')".into()));
        assert_eq!(decode("('a',)").unwrap(), Value::Tuple(vec![s("a")]));
        assert_eq!(decode("()").unwrap(), Value::Tuple(vec![]));
    }

    #[test]
    fn dictionary_with_non_string_key_is_scalar() {
        assert_eq!(decode("{1: 'a'}").unwrap(), Value::Scalar("{1: 'a'}".into()));
    }

    #[test]
    fn escapes_round_trip() {
        let value = decode(r#"('it\'s', "say \"hi\"", 'a\\b', '\x41あ')"#).unwrap();
        assert_eq!(
            value,
            Value::Tuple(vec![s("it's"), s("say \"hi\""), s("a\\b"), s("Aあ")])
        );
        let encoded = encode(&value);
        assert_eq!(decode(&encoded).unwrap(), value);
    }

    #[test]
    fn raw_strings_keep_backslashes() {
        assert_eq!(
            decode(r"(r'^(\d{4})$',)").unwrap(),
            Value::Tuple(vec![s(r"^(\d{4})$")])
        );
    }

    #[test]
    fn numbers_keep_their_token() {
        assert_eq!(
            decode("(1, -2.5, 1e3)").unwrap(),
            Value::Tuple(vec![
                Literal::Number("1".into()),
                Literal::Number("-2.5".into()),
                Literal::Number("1e3".into()),
            ])
        );
    }

    #[test]
    fn excessive_nesting_is_fatal() {
        let text = format!("{}{}", "[".repeat(MAX_NESTING + 1), "]".repeat(MAX_NESTING + 1));
        match decode(&text) {
            Err(Error::ResourceExhausted { .. }) => {}
            other => panic!("expected resource exhaustion, got {other:?}"),
        }
    }

    #[test]
    fn nesting_within_limit_is_accepted() {
        let text = format!("{}{}", "[".repeat(10), "]".repeat(10));
        assert!(decode(&text).is_ok());
    }
}
