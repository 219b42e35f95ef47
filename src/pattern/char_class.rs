//! Built-in classes and their character membership tests.

use phf::{Map, phf_map};

use super::ast::{CharTest, Matcher};

const SYMBOLS: &str = "!\"#$&%'()*+,-./:;<=>?@[]\\^_`{}|~¤§£";
const BASE64: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/=";
const HEX: &str = "ABCDEFabcdef0123456789#";

/// A class that every tokenizer knows without registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Any,
    Whitespace,
    Text,
    LeftBrace,
    RightBrace,
    Word,
    Var,
    Base64,
    Hex,
    Number,
    Float,
    Symbol,
    Line,
    Char,
    String,
}

/// Built-in class names. User classes may not reuse these.
/// Please keep names sorted alphabetically.
static BUILTIN_CLASSES: Map<&'static str, Builtin> = phf_map! {
    "any" => Builtin::Any,
    "base64" => Builtin::Base64,
    "char" => Builtin::Char,
    "float" => Builtin::Float,
    "hex" => Builtin::Hex,
    "lbrace" => Builtin::LeftBrace,
    "line" => Builtin::Line,
    "number" => Builtin::Number,
    "rbrace" => Builtin::RightBrace,
    "string" => Builtin::String,
    "symbol" => Builtin::Symbol,
    "text" => Builtin::Text,
    "var" => Builtin::Var,
    "word" => Builtin::Word,
    "ws" => Builtin::Whitespace,
};

/// Look up a built-in class by name.
pub fn builtin(name: &str) -> Option<Builtin> {
    BUILTIN_CLASSES.get(name).copied()
}

/// Names of all built-in classes, in no particular order.
pub fn builtin_names() -> impl Iterator<Item = &'static str> {
    BUILTIN_CLASSES.keys().copied()
}

impl Builtin {
    pub fn matcher(self) -> Matcher {
        match self {
            Builtin::Any => run(|_| true),
            Builtin::Whitespace => Matcher::Run {
                test: CharTest::Builtin(is_whitespace),
                min: 0,
                max: None,
            },
            Builtin::Text => run(|ch| !is_whitespace(ch)),
            Builtin::LeftBrace => single(|ch| ch == '{'),
            Builtin::RightBrace => single(|ch| ch == '}'),
            Builtin::Word => run(is_letter),
            Builtin::Var => run(|ch| is_letter(ch) || ch == '$' || ch == '_'),
            Builtin::Base64 => run(is_base64),
            Builtin::Hex => run(is_hex),
            Builtin::Number => run(is_number),
            Builtin::Float => run(|ch| is_number(ch) || ch == '.'),
            Builtin::Symbol => single(is_symbol),
            Builtin::Line => Matcher::Line,
            Builtin::Char => single(is_letter),
            Builtin::String => Matcher::Quoted('"'),
        }
    }
}

fn run(test: fn(char) -> bool) -> Matcher {
    Matcher::Run {
        test: CharTest::Builtin(test),
        min: 1,
        max: None,
    }
}

fn single(test: fn(char) -> bool) -> Matcher {
    Matcher::Run {
        test: CharTest::Builtin(test),
        min: 1,
        max: Some(1),
    }
}

pub fn is_letter(ch: char) -> bool {
    ch.is_ascii_alphabetic()
}

pub fn is_number(ch: char) -> bool {
    ch.is_ascii_digit()
}

pub fn is_whitespace(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\n' | '\r')
}

pub fn is_symbol(ch: char) -> bool {
    SYMBOLS.contains(ch)
}

pub fn is_base64(ch: char) -> bool {
    BASE64.contains(ch)
}

pub fn is_hex(ch: char) -> bool {
    HEX.contains(ch)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_are_ascii_only() {
        assert!(is_letter('a'));
        assert!(is_letter('Z'));
        assert!(!is_letter('5'));
        assert!(!is_letter('é'));
    }

    #[test]
    fn symbol_set() {
        for ch in ['!', ',', '{', '}', '|', '~', '\\', '"'] {
            assert!(is_symbol(ch), "expected symbol: {ch}");
        }
        assert!(!is_symbol('a'));
        assert!(!is_symbol(' '));
    }

    #[test]
    fn multibyte_symbols_match_whole_chars() {
        assert!(is_symbol('£'));
        assert!(is_symbol('§'));
        assert!(is_symbol('¤'));
        assert!(!is_symbol('€'));
    }

    #[test]
    fn hex_includes_hash() {
        assert!(is_hex('#'));
        assert!(is_hex('f'));
        assert!(!is_hex('g'));
    }

    #[test]
    fn base64_alphabet() {
        assert!(is_base64('+'));
        assert!(is_base64('='));
        assert!(!is_base64('('));
    }

    #[test]
    fn whitespace_set() {
        for ch in [' ', '\t', '\n', '\r'] {
            assert!(is_whitespace(ch));
        }
        assert!(!is_whitespace('x'));
    }

    #[test]
    fn lookup_known_and_unknown() {
        assert_eq!(builtin("word"), Some(Builtin::Word));
        assert_eq!(builtin("ws"), Some(Builtin::Whitespace));
        assert_eq!(builtin("nope"), None);
        assert_eq!(builtin_names().count(), 15);
    }

    #[test]
    fn single_char_classes_are_bounded() {
        match Builtin::Symbol.matcher() {
            Matcher::Run { min, max, .. } => {
                assert_eq!(min, 1);
                assert_eq!(max, Some(1));
            }
            other => panic!("expected Run, got {other:?}"),
        }
        match Builtin::Whitespace.matcher() {
            Matcher::Run { min, max, .. } => {
                assert_eq!(min, 0);
                assert_eq!(max, None);
            }
            other => panic!("expected Run, got {other:?}"),
        }
    }
}
