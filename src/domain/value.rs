//! Typed option values.
//!
//! An option's stored text decodes into a [`Value`]. Structured values hold
//! [`Literal`] elements, the node type of the structured-literal syntax the
//! document uses (`('a', 'b')`, `{'k': 'v'}`, `[('get', 'url')]`).

use std::fmt;

use indexmap::IndexMap;

/// Sentinel text meaning "no value" in optional fields.
pub const UNSET: &str = "None";

/// One node of the structured-literal syntax.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Str(String),
    /// Numeric token kept as written so it re-encodes unchanged.
    Number(String),
    Bool(bool),
    None,
    Tuple(Vec<Literal>),
    List(Vec<Literal>),
    Dict(Vec<(Literal, Literal)>),
}

impl Literal {
    /// Text shown to the user: strings bare, everything else encoded.
    #[must_use]
    pub fn to_text(&self) -> String {
        match self {
            Self::Str(text) => text.clone(),
            other => other.to_string(),
        }
    }

    /// Elements of a list whose every element is a tuple.
    #[must_use]
    pub fn as_tuple_list(&self) -> Option<Vec<Vec<Literal>>> {
        match self {
            Self::List(items) => items
                .iter()
                .map(|item| match item {
                    Self::Tuple(fields) => Some(fields.clone()),
                    _ => None,
                })
                .collect(),
            _ => None,
        }
    }

    /// Build a list-of-tuples literal.
    #[must_use]
    pub fn from_tuple_list(entries: &[Vec<Literal>]) -> Self {
        Self::List(entries.iter().cloned().map(Self::Tuple).collect())
    }
}

impl From<&str> for Literal {
    fn from(text: &str) -> Self {
        Self::Str(text.to_string())
    }
}

impl From<String> for Literal {
    fn from(text: String) -> Self {
        Self::Str(text)
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(text) => f.write_str(&quote(text)),
            Self::Number(token) => f.write_str(token),
            Self::Bool(true) => f.write_str("True"),
            Self::Bool(false) => f.write_str("False"),
            Self::None => f.write_str(UNSET),
            Self::Tuple(items) => {
                f.write_str("(")?;
                write_items(f, items)?;
                if items.len() == 1 {
                    f.write_str(",")?;
                }
                f.write_str(")")
            }
            Self::List(items) => {
                f.write_str("[")?;
                write_items(f, items)?;
                f.write_str("]")
            }
            Self::Dict(pairs) => {
                f.write_str("{")?;
                for (index, (key, value)) in pairs.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                f.write_str("}")
            }
        }
    }
}

fn write_items(f: &mut fmt::Formatter<'_>, items: &[Literal]) -> fmt::Result {
    for (index, item) in items.iter().enumerate() {
        if index > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

/// Quote a string the way the structured-literal syntax writes it.
///
/// Single quotes are preferred; double quotes are used when the text holds
/// a single quote and no double quote.
#[must_use]
pub fn quote(text: &str) -> String {
    let delimiter = if text.contains('\'') && !text.contains('"') {
        '"'
    } else {
        '\''
    };

    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push(delimiter);
    for ch in text.chars() {
        match ch {
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            c if c == delimiter => {
                quoted.push('\\');
                quoted.push(c);
            }
            c if c.is_control() => {
                let code = u32::from(c);
                if code < 0x100 {
                    quoted.push_str(&format!("\\x{code:02x}"));
                } else {
                    quoted.push_str(&format!("\\u{code:04x}"));
                }
            }
            c => quoted.push(c),
        }
    }
    quoted.push(delimiter);
    quoted
}

/// The decoded form of an option's stored text.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Plain or undecodable text, kept verbatim.
    Scalar(String),
    Tuple(Vec<Literal>),
    /// String-keyed map; key order is preserved.
    Dictionary(IndexMap<String, Literal>),
    /// Action script: every element is a tuple whose first field is its key.
    TupleList(Vec<Vec<Literal>>),
}

impl Value {
    /// Kind name used in logs and listings.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Scalar(_) => "scalar",
            Self::Tuple(_) => "tuple",
            Self::Dictionary(_) => "dictionary",
            Self::TupleList(_) => "tuple list",
        }
    }
}
