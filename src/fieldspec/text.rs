// Line-oriented text form of a field spec
//
// One field per line:
//
//     TYPE NAME [==LITERAL SEVERITY]
//
// TYPE is `h` (i16), `H` (u16), `i` (i32), `I` (u32) or `<N>s` (N-byte string),
// LITERAL is a decimal or 0x-prefixed integer, SEVERITY is `!` (fatal) or `?`
// (unsupported). Blank lines are skipped.

use super::{Check, Expected, Field, FieldKind, Record, Severity, decode, width};
use crate::common::error::{Result, SpecError};
use smallvec::SmallVec;
use std::ops::Deref;

/// A field spec parsed from its text form
///
/// # Examples
/// ```
/// use olefield::fieldspec::FieldSpec;
///
/// let spec = FieldSpec::parse(
///     "h first_word ==1 !
///      h second_word",
/// )?;
/// let record = spec.decode(b"\x01\x00\x02\x00something else", "words")?;
/// assert_eq!(record.consumed(), 4);
/// assert_eq!(record.int("second_word")?, 2);
/// # Ok::<(), olefield::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldSpec<'n> {
    fields: Vec<Field<'n>>,
}

impl<'n> FieldSpec<'n> {
    /// Parse a spec; field names borrow from `text`
    pub fn parse(text: &'n str) -> std::result::Result<Self, SpecError> {
        let mut fields: Vec<Field<'n>> = Vec::new();
        for (idx, line) in text.lines().enumerate() {
            let Some(field) = parse_line(idx + 1, line)? else {
                continue;
            };
            if fields.iter().any(|f| f.name == field.name) {
                return Err(SpecError::DuplicateField(field.name.to_string()));
            }
            fields.push(field);
        }
        Ok(Self { fields })
    }

    pub fn fields(&self) -> &[Field<'n>] {
        &self.fields
    }

    /// Total width in bytes
    pub fn width(&self) -> usize {
        width(&self.fields)
    }

    /// Decode one record, see [`decode`](super::decode)
    pub fn decode<'a>(&self, data: &'a [u8], context: &str) -> Result<Record<'a, 'n>> {
        decode(data, &self.fields, context)
    }
}

impl<'n> Deref for FieldSpec<'n> {
    type Target = [Field<'n>];

    fn deref(&self) -> &Self::Target {
        &self.fields
    }
}

impl<'n> FromIterator<Field<'n>> for FieldSpec<'n> {
    fn from_iter<T: IntoIterator<Item = Field<'n>>>(iter: T) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

fn parse_line(line: usize, text: &str) -> std::result::Result<Option<Field<'_>>, SpecError> {
    let syntax = |reason| SpecError::Syntax {
        line,
        text: text.trim().to_string(),
        reason,
    };

    let tokens: SmallVec<[&str; 4]> = text.split_whitespace().collect();
    let (kind, name, check) = match tokens.as_slice() {
        [] => return Ok(None),
        [kind, name] => (*kind, *name, None),
        [kind, name, cmp, severity] => (*kind, *name, Some((*cmp, *severity))),
        _ => return Err(syntax("expected `TYPE NAME [==LITERAL SEVERITY]`")),
    };

    let kind = parse_kind(kind).ok_or_else(|| syntax("unknown type"))?;
    if !is_identifier(name) {
        return Err(syntax("invalid field name"));
    }

    let mut field = Field::new(kind, name);
    if let Some((cmp, severity)) = check {
        let literal = cmp
            .strip_prefix("==")
            .ok_or_else(|| syntax("comparison must be `==LITERAL`"))?;
        let value = parse_int(literal).ok_or_else(|| syntax("invalid integer literal"))?;
        if matches!(kind, FieldKind::Bytes(_)) {
            return Err(syntax("byte strings cannot be compared to integers"));
        }
        if !kind.holds(value) {
            return Err(syntax("literal out of range for type"));
        }
        let severity = match severity {
            "!" => Severity::Fatal,
            "?" => Severity::Unsupported,
            _ => return Err(syntax("severity must be `!` or `?`")),
        };
        field.check = Some(Check {
            expected: Expected::Int(value),
            severity,
        });
    }
    Ok(Some(field))
}

fn parse_kind(token: &str) -> Option<FieldKind> {
    match token {
        "h" => Some(FieldKind::I16),
        "H" => Some(FieldKind::U16),
        "i" => Some(FieldKind::I32),
        "I" => Some(FieldKind::U32),
        _ => {
            let count = token.strip_suffix('s')?;
            if count.is_empty() {
                Some(FieldKind::Bytes(1))
            } else if count.bytes().all(|b| b.is_ascii_digit()) {
                count.parse().ok().map(FieldKind::Bytes)
            } else {
                None
            }
        },
    }
}

fn parse_int(literal: &str) -> Option<i64> {
    let (negative, digits) = match literal.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, literal),
    };
    let magnitude = match digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        Some(hex) if !hex.is_empty() && hex.bytes().all(|b| b.is_ascii_hexdigit()) => {
            i64::from_str_radix(hex, 16).ok()?
        },
        Some(_) => return None,
        None if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) => {
            digits.parse().ok()?
        },
        None => return None,
    };
    Some(if negative { -magnitude } else { magnitude })
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
