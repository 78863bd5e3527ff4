//! Shape parser: one `ClassName with Type field, ...` line → [`Variant`].
//!
//! Two grammars are available:
//!
//! - [`Grammar::Baseline`] splits textually: on the first occurrence of
//!   `with`, then on `", "`, then on the single space inside each field.
//!   Class names containing `with`, types with a top-level comma and types
//!   with an inner space do not survive that splitting; such lines are
//!   rejected with an error rather than emitted half-parsed.
//! - [`Grammar::Bracketed`] tokenizes the line, treats `with` as a keyword
//!   and only splits fields on commas outside `<>`, `()`, `[]` and `{}`.
//!   The field identifier is the trailing identifier, the type is what
//!   precedes it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ShapeError;
use crate::ir::{Field, Variant};
use crate::naming::{is_identifier, is_identifier_char};

const SEPARATOR: &str = "with";
const FIELD_SEPARATOR: &str = ", ";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Grammar {
    #[default]
    Baseline,
    Bracketed,
}

impl Grammar {
    pub fn as_str(&self) -> &'static str {
        match self {
            Grammar::Baseline => "baseline",
            Grammar::Bracketed => "bracketed",
        }
    }
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Grammar {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "baseline" => Ok(Grammar::Baseline),
            "bracketed" => Ok(Grammar::Bracketed),
            other => Err(format!(
                "unknown grammar '{}' (expected baseline or bracketed)",
                other
            )),
        }
    }
}

/// Parse one shape line with the given grammar.
pub fn parse_shape(line: &str, grammar: Grammar) -> Result<Variant, ShapeError> {
    match grammar {
        Grammar::Baseline => parse_baseline(line),
        Grammar::Bracketed => parse_bracketed(line),
    }
}

fn parse_baseline(line: &str) -> Result<Variant, ShapeError> {
    let (class_part, field_part) = line
        .split_once(SEPARATOR)
        .ok_or(ShapeError::MissingSeparator)?;

    let class_name = class_part.trim();
    if !is_identifier(class_name) {
        return Err(ShapeError::InvalidClassName(class_name.to_string()));
    }

    let field_part = field_part.trim();
    if field_part.is_empty() {
        return Err(ShapeError::EmptyFieldList);
    }

    let fields = field_part
        .split(FIELD_SEPARATOR)
        .map(parse_baseline_field)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Variant {
        class_name: class_name.to_string(),
        fields,
    })
}

fn parse_baseline_field(token: &str) -> Result<Field, ShapeError> {
    match token.split_once(' ') {
        Some((ty, name)) if !name.contains(' ') => checked_field(token, ty, name),
        _ => Err(ShapeError::MalformedField(token.to_string())),
    }
}

fn checked_field(field: &str, ty: &str, name: &str) -> Result<Field, ShapeError> {
    if ty.is_empty() {
        return Err(ShapeError::EmptyType(field.to_string()));
    }
    if !is_identifier(name) {
        return Err(ShapeError::InvalidFieldName {
            field: field.to_string(),
            name: name.to_string(),
        });
    }
    Ok(Field::new(ty, name))
}

// ---------------------------------------------------------------------------
// Bracketed grammar
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    Word(&'a str),
    Open(char),
    Close(char),
    Comma,
    /// A run of whitespace.
    Space,
}

fn is_word_char(c: char) -> bool {
    !c.is_whitespace() && !matches!(c, '<' | '>' | '(' | ')' | '[' | ']' | '{' | '}' | ',')
}

fn closing(open: char) -> char {
    match open {
        '<' => '>',
        '(' => ')',
        '[' => ']',
        _ => '}',
    }
}

fn tokenize(s: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut chars = s.char_indices().peekable();

    while let Some((start, c)) = chars.next() {
        let token = match c {
            '<' | '(' | '[' | '{' => Token::Open(c),
            '>' | ')' | ']' | '}' => Token::Close(c),
            ',' => Token::Comma,
            c if c.is_whitespace() => {
                while chars.next_if(|&(_, c)| c.is_whitespace()).is_some() {}
                Token::Space
            }
            _ => {
                let mut end = start + c.len_utf8();
                while let Some((i, c)) = chars.next_if(|&(_, c)| is_word_char(c)) {
                    end = i + c.len_utf8();
                }
                Token::Word(&s[start..end])
            }
        };
        tokens.push(token);
    }

    tokens
}

/// Joins tokens back into text; whitespace runs come out as one space.
fn render(tokens: &[Token<'_>]) -> String {
    let mut out = String::new();
    for token in tokens {
        match *token {
            Token::Word(w) => out.push_str(w),
            Token::Open(c) | Token::Close(c) => out.push(c),
            Token::Comma => out.push(','),
            Token::Space => out.push(' '),
        }
    }
    out.trim().to_string()
}

fn parse_bracketed(line: &str) -> Result<Variant, ShapeError> {
    let tokens = tokenize(line);

    let mut open = Vec::new();
    let mut separator = None;
    let mut commas = Vec::new();

    for (i, token) in tokens.iter().enumerate() {
        match *token {
            Token::Open(c) => open.push(c),
            Token::Close(c) => match open.pop() {
                Some(o) if closing(o) == c => {}
                _ => return Err(ShapeError::UnbalancedBracket(c)),
            },
            Token::Word(SEPARATOR) if open.is_empty() && separator.is_none() => {
                separator = Some(i)
            }
            Token::Comma if open.is_empty() && separator.is_some() => commas.push(i),
            _ => {}
        }
    }
    if let Some(o) = open.pop() {
        return Err(ShapeError::UnbalancedBracket(o));
    }

    let separator = separator.ok_or(ShapeError::MissingSeparator)?;

    let class_name = render(&tokens[..separator]);
    if !is_identifier(&class_name) {
        return Err(ShapeError::InvalidClassName(class_name));
    }

    let mut fields = Vec::new();
    if !render(&tokens[separator + 1..]).is_empty() {
        let mut start = separator + 1;
        for end in commas.into_iter().chain(std::iter::once(tokens.len())) {
            fields.push(parse_bracketed_field(&render(&tokens[start..end]))?);
            start = end + 1;
        }
    }

    Ok(Variant { class_name, fields })
}

fn parse_bracketed_field(field: &str) -> Result<Field, ShapeError> {
    if field.is_empty() {
        return Err(ShapeError::EmptyField);
    }
    let split = field.trim_end_matches(is_identifier_char).len();
    let (ty, name) = field.split_at(split);
    if name.is_empty() {
        return Err(ShapeError::MalformedField(field.to_string()));
    }
    checked_field(field, ty.trim_end(), name)
}
