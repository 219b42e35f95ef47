//! Compiler for pattern strings.
//!
//! A pattern is literal text mixed with `{class}` references. Compilation is
//! a single left-to-right pass over the pattern using a throwaway [`Cursor`];
//! class references are resolved against the registry immediately, so a
//! pattern can only use classes that exist when it is compiled.

use crate::cursor::Cursor;
use crate::registry::ClassRegistry;

use super::ast::*;

/// Errors that can occur while compiling a pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    /// A `{` at this offset has no closing `}`.
    UnclosedClass(usize),
    /// A `{` inside a class name, or a `}` outside one, at this offset.
    UnexpectedBrace(usize),
    /// The pattern references a class that is not registered.
    UnknownClass(String),
}

impl std::fmt::Display for PatternError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnclosedClass(at) => write!(f, "unclosed '{{' at offset {at}"),
            Self::UnexpectedBrace(at) => write!(f, "unexpected brace at offset {at}"),
            Self::UnknownClass(name) => write!(f, "unknown class '{name}'"),
        }
    }
}

impl std::error::Error for PatternError {}

/// Compile a pattern string into a [`Sequence`].
pub fn compile(pattern: &str, classes: &ClassRegistry) -> Result<Sequence, PatternError> {
    let mut cursor = Cursor::new(pattern);
    let mut items = Vec::new();

    while !cursor.is_eof() {
        let item = match cursor.peek_char() {
            Some('{') => {
                cursor.commit();
                class_reference(&mut cursor, classes)?
            }
            _ => {
                cursor.restore_peek();
                literal(&mut cursor)?
            }
        };
        items.push(item);
    }

    Ok(Sequence { items })
}

/// Parse `name}` (the opening `{` has already been consumed).
fn class_reference(cursor: &mut Cursor, classes: &ClassRegistry) -> Result<Item, PatternError> {
    let open = cursor.position() - 1;
    if !cursor.seek('}') {
        return Err(PatternError::UnclosedClass(open));
    }

    // An empty name leaves the lookahead on the '}', which commit would eat.
    let name = if cursor.lookahead() > cursor.position() {
        cursor.commit()
    } else {
        ""
    };
    if let Some(nested) = name.find('{') {
        return Err(PatternError::UnexpectedBrace(open + 1 + nested));
    }

    // Closing '}'
    cursor.peek_char();
    cursor.commit();

    Ok(Item {
        matcher: classes.resolve(name)?,
        capture: Some(name.to_string()),
    })
}

/// Parse literal text up to the next `{` or the end of the pattern.
fn literal(cursor: &mut Cursor) -> Result<Item, PatternError> {
    let start = cursor.position();
    if !cursor.seek('{') {
        cursor.peek_n(cursor.remainder().len());
    }
    let text = cursor.commit();

    if let Some(stray) = text.find('}') {
        return Err(PatternError::UnexpectedBrace(start + stray));
    }

    Ok(Item {
        matcher: Matcher::Literal(text.to_string()),
        capture: None,
    })
}
