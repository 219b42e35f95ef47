//! The tokenizer: ordered patterns with callbacks, driven over an input.

use tracing::{debug, warn};

use crate::cursor::Cursor;
use crate::error::{Error, RegistrationError};
use crate::pattern::{Sequence, match_sequence};
use crate::registry::ClassRegistry;
use crate::token::Token;

/// Called with each token a pattern matches. The tokenizer is passed back so
/// the callback can run it again over part of the match.
///
/// Callbacks are not required to be `Send` or `Sync`, so they can keep state
/// in a `RefCell`. A `Tokenizer` is therefore used from one thread at a time.
pub type Callback<'cb> = Box<dyn Fn(&Token<'_>, &Tokenizer<'cb>) -> anyhow::Result<()> + 'cb>;

/// What `run` does with input that no pattern matches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnmatchedInput {
    /// Skip the character, logging it at debug level.
    #[default]
    Skip,
    /// Skip the character and log a warning.
    Log,
    /// Stop the run with [`Error::Unmatched`].
    Error,
}

struct Rule<'cb> {
    pattern: Sequence,
    callback: Callback<'cb>,
}

/// A set of patterns, tried in registration order at each input position.
///
/// Registration never fails directly. The first registration error is kept
/// and returned by the next [`Tokenizer::run`] or [`Tokenizer::matches`], so
/// a tokenizer built from bad registrations never runs.
///
/// ```
/// use std::cell::RefCell;
/// use classlex::Tokenizer;
///
/// let words = RefCell::new(Vec::new());
/// let mut tokenizer = Tokenizer::new();
/// tokenizer.pattern("{word}", |token, _| {
///     words.borrow_mut().push(token.lexeme.to_string());
///     Ok(())
/// });
/// tokenizer.run("Hello, world!").unwrap();
/// assert_eq!(*words.borrow(), ["Hello", "world"]);
/// ```
#[derive(Default)]
pub struct Tokenizer<'cb> {
    classes: ClassRegistry,
    rules: Vec<Rule<'cb>>,
    error: Option<RegistrationError>,
    unmatched: UnmatchedInput,
}

impl<'cb> Tokenizer<'cb> {
    pub fn new() -> Self {
        Self {
            classes: ClassRegistry::new(),
            rules: Vec::new(),
            error: None,
            unmatched: UnmatchedInput::Skip,
        }
    }

    // ─── Registration ───────────────────────────────────────────────────────

    /// Add a pattern. `callback` is called for every match; an error from it
    /// stops the run and is returned by [`Tokenizer::run`].
    pub fn pattern<F>(&mut self, pattern: &str, callback: F)
    where
        F: Fn(&Token<'_>, &Tokenizer<'cb>) -> anyhow::Result<()> + 'cb,
    {
        match self.classes.compile(pattern) {
            Ok(pattern) => self.rules.push(Rule {
                pattern,
                callback: Box::new(callback),
            }),
            Err(err) => self.defer(Err(err)),
        }
    }

    /// Add a class matching one or more characters accepted by `test`.
    pub fn register_class<F>(&mut self, name: &str, test: F)
    where
        F: Fn(char) -> bool + Send + Sync + 'static,
    {
        let result = self.classes.register_predicate(name, test);
        self.defer(result);
    }

    /// Add a class matching the first of `patterns` that matches.
    pub fn register_alternation_class(&mut self, name: &str, patterns: &[&str]) {
        let result = self.classes.register_alternation(name, patterns);
        self.defer(result);
    }

    /// Add a class matching the first of `patterns` that matches, or nothing.
    pub fn register_optional_class(&mut self, name: &str, patterns: &[&str]) {
        let result = self.classes.register_optional(name, patterns);
        self.defer(result);
    }

    /// Add a class matching `pattern`, with its captures nested under `name`.
    pub fn register_pattern_class(&mut self, name: &str, pattern: &str) {
        let result = self.classes.register_pattern(name, pattern);
        self.defer(result);
    }

    pub fn set_unmatched(&mut self, policy: UnmatchedInput) {
        self.unmatched = policy;
    }

    /// The first registration error, if any.
    pub fn registration_error(&self) -> Option<&RegistrationError> {
        self.error.as_ref()
    }

    pub fn classes(&self) -> &ClassRegistry {
        &self.classes
    }

    /// Keep the first registration error; later ones are dropped.
    fn defer(&mut self, result: Result<(), RegistrationError>) {
        if let Err(err) = result
            && self.error.is_none()
        {
            self.error = Some(err);
        }
    }

    fn check_registration(&self) -> Result<(), Error> {
        match &self.error {
            Some(err) => Err(Error::Registration(err.clone())),
            None => Ok(()),
        }
    }

    // ─── Running ────────────────────────────────────────────────────────────

    /// Scan `input` from start to end.
    ///
    /// At each position the patterns are tried in registration order and the
    /// first match's callback is called. Input that nothing consumes, either
    /// because no pattern matched or because the match was empty, is handled
    /// by the [`UnmatchedInput`] policy. Safe to call from inside a
    /// callback; each run has its own cursor.
    pub fn run(&self, input: &str) -> Result<(), Error> {
        self.check_registration()?;

        let mut cursor = Cursor::new(input);
        if input.is_empty() {
            self.dispatch(&mut cursor)?;
            return Ok(());
        }

        while !cursor.is_eof() {
            match self.dispatch(&mut cursor)? {
                Some(0) | None => self.skip_unmatched(&mut cursor)?,
                Some(_) => {}
            }
        }
        Ok(())
    }

    /// Test whether `pattern` matches all of `input`.
    ///
    /// Only an invalid pattern (or an earlier registration error) is an
    /// error; a non-match is `Ok(false)`.
    pub fn matches(&self, input: &str, pattern: &str) -> Result<bool, Error> {
        self.check_registration()?;

        let seq = self.classes.compile(pattern)?;
        let mut cursor = Cursor::new(input);
        Ok(match_sequence(&seq, &mut cursor).is_some_and(|m| m.end == input.len()))
    }

    /// Try every rule at the cursor. Returns the matched length, or `None`
    /// if no rule matched.
    fn dispatch(&self, cursor: &mut Cursor<'_>) -> Result<Option<usize>, Error> {
        for (index, rule) in self.rules.iter().enumerate() {
            let Some(found) = match_sequence(&rule.pattern, cursor) else {
                continue;
            };
            let token = found.into_token(cursor.source());
            debug!(rule = index, pos = token.pos, lexeme = token.lexeme, "pattern matched");

            // An error from a nested run is passed through unwrapped.
            (rule.callback)(&token, self).map_err(|err| match err.downcast::<Error>() {
                Ok(err) => err,
                Err(err) => Error::Callback(err),
            })?;
            return Ok(Some(token.length));
        }
        Ok(None)
    }

    fn skip_unmatched(&self, cursor: &mut Cursor<'_>) -> Result<(), Error> {
        let pos = cursor.position();
        let Some(ch) = cursor.peek_char() else {
            return Ok(());
        };
        match self.unmatched {
            UnmatchedInput::Skip => debug!(pos, ?ch, "skipping unmatched input"),
            UnmatchedInput::Log => warn!(pos, ?ch, "unmatched input"),
            UnmatchedInput::Error => return Err(Error::Unmatched { pos, ch }),
        }
        cursor.commit();
        Ok(())
    }
}
