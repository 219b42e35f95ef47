//! Compiled pattern types.

use std::fmt;
use std::sync::Arc;

/// A compiled pattern: items matched one after another.
///
/// An empty `items` vec is the canonical empty pattern; it matches the empty
/// string at any position.
#[derive(Debug, Clone, Default)]
pub struct Sequence {
    pub items: Vec<Item>,
}

impl Sequence {
    pub fn empty() -> Self {
        Self { items: vec![] }
    }

    pub fn is_empty_pattern(&self) -> bool {
        self.items.is_empty()
    }
}

/// One matcher in a sequence, with the class name it is captured under.
///
/// Literal text between class references has no capture name.
#[derive(Debug, Clone)]
pub struct Item {
    pub matcher: Matcher,
    pub capture: Option<String>,
}

#[derive(Debug, Clone)]
pub enum Matcher {
    /// Exact text.
    Literal(String),
    /// A greedy run of characters accepted by `test`, at least `min` long and
    /// at most `max` (unbounded when `None`).
    Run {
        test: CharTest,
        min: usize,
        max: Option<usize>,
    },
    /// Text up to the next newline. The newline is consumed but not part of
    /// the captured lexeme.
    Line,
    /// Text between two `quote` characters, quotes included.
    Quoted(char),
    /// Ordered alternatives; the first that matches wins.
    Alternation(Arc<[Sequence]>),
    /// A named sub-pattern whose captures nest under the class name.
    Pattern(Arc<Sequence>),
}

/// Per-character membership test for [`Matcher::Run`].
#[derive(Clone)]
pub enum CharTest {
    Builtin(fn(char) -> bool),
    Custom(Arc<dyn Fn(char) -> bool + Send + Sync>),
}

impl CharTest {
    pub fn accepts(&self, ch: char) -> bool {
        match self {
            CharTest::Builtin(f) => f(ch),
            CharTest::Custom(f) => f(ch),
        }
    }
}

impl fmt::Debug for CharTest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CharTest::Builtin(_) => f.write_str("Builtin(..)"),
            CharTest::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}
