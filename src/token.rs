//! Match results handed to pattern callbacks.

use std::collections::BTreeMap;

/// Captured sub-matches, keyed by class name, in document order.
pub type Captures<'s> = BTreeMap<String, Vec<Token<'s>>>;

static EMPTY: Token<'static> = Token {
    pos: 0,
    length: 0,
    lexeme: "",
    source: "",
    captures: Captures::new(),
};

/// A matched piece of input and the classes captured inside it.
///
/// Lookups with [`Token::get`] and [`Token::get_at`] never fail: a missing
/// capture yields an empty token, so chains like
/// `token.get("declaration").get("variable")` are always safe.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Token<'s> {
    /// Byte offset of the lexeme in `source`.
    pub pos: usize,
    /// Byte length of the lexeme.
    pub length: usize,
    pub lexeme: &'s str,
    /// The string passed to `run`.
    pub source: &'s str,
    captures: Captures<'s>,
}

impl<'s> Token<'s> {
    pub(crate) fn new(source: &'s str, start: usize, end: usize, captures: Captures<'s>) -> Self {
        Self {
            pos: start,
            length: end - start,
            lexeme: &source[start..end],
            source,
            captures,
        }
    }

    /// The first match of `class`, or an empty token.
    pub fn get(&self, class: &str) -> &Token<'s> {
        self.get_at(class, 0)
    }

    /// The `index`th match of `class`, or an empty token.
    pub fn get_at(&self, class: &str, index: usize) -> &Token<'s> {
        self.captures
            .get(class)
            .and_then(|tokens| tokens.get(index))
            .unwrap_or(&EMPTY)
    }

    /// All matches of `class`, in document order.
    pub fn get_all(&self, class: &str) -> &[Token<'s>] {
        self.captures
            .get(class)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Iterate captures as `(class, matches)` pairs, sorted by class name.
    pub fn captures(&self) -> impl Iterator<Item = (&str, &[Token<'s>])> {
        self.captures
            .iter()
            .map(|(name, tokens)| (name.as_str(), tokens.as_slice()))
    }

    /// True for the empty token returned by a failed lookup.
    pub fn is_empty(&self) -> bool {
        self.lexeme.is_empty() && self.captures.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(source: &str) -> Token<'_> {
        let mut captures = Captures::new();
        captures.insert(
            "word".into(),
            vec![
                Token::new(source, 0, 5, Captures::new()),
                Token::new(source, 7, 12, Captures::new()),
            ],
        );
        Token::new(source, 0, source.len(), captures)
    }

    #[test]
    fn get_and_get_at() {
        let token = sample("Hello, world!");
        assert_eq!(token.lexeme, "Hello, world!");
        assert_eq!(token.get("word").lexeme, "Hello");
        assert_eq!(token.get_at("word", 1).lexeme, "world");
        assert_eq!(token.get_at("word", 1).pos, 7);
        assert_eq!(token.get_all("word").len(), 2);
    }

    #[test]
    fn missing_lookups_are_empty() {
        let token = sample("Hello, world!");
        assert!(token.get("number").is_empty());
        assert!(token.get_at("word", 99).is_empty());
        assert!(token.get("number").get("deeper").get("still").is_empty());
        assert!(token.get_all("number").is_empty());
        assert_eq!(token.get("number").lexeme, "");
        assert_eq!(token.get("number").length, 0);
    }

    #[test]
    fn captures_iterate_by_name() {
        let token = sample("Hello, world!");
        let names: Vec<&str> = token.captures().map(|(name, _)| name).collect();
        assert_eq!(names, ["word"]);
    }
}
