//! Pattern matcher: run a compiled [`Sequence`] against a [`Cursor`].
//!
//! Matching is ordered and first-success. Each class is greedy and never
//! gives characters back, so the only backtracking is between alternatives
//! and out of a failed sequence. Positions are byte offsets into the
//! cursor's source.

use crate::cursor::Cursor;
use crate::token::{Captures, Token};

use super::ast::*;

/// A successful match of a sequence or a single matcher.
#[derive(Debug)]
pub struct Match<'s> {
    pub start: usize,
    /// End of the matched lexeme. For [`Matcher::Line`] this stops short of
    /// the consumed newline.
    pub end: usize,
    pub captures: Captures<'s>,
}

impl<'s> Match<'s> {
    fn empty(at: usize) -> Self {
        Self {
            start: at,
            end: at,
            captures: Captures::new(),
        }
    }

    fn plain(start: usize, end: usize) -> Self {
        Self {
            start,
            end,
            captures: Captures::new(),
        }
    }

    pub fn into_token(self, source: &'s str) -> Token<'s> {
        Token::new(source, self.start, self.end, self.captures)
    }
}

// ─── Sequences ──────────────────────────────────────────────────────────────

/// Match `seq` at the cursor's committed position.
///
/// On success the whole matched span is committed. On failure the cursor is
/// restored to where it started; no partial consumption is visible.
pub fn match_sequence<'s>(seq: &Sequence, cursor: &mut Cursor<'s>) -> Option<Match<'s>> {
    let start = cursor.position();
    if seq.is_empty_pattern() {
        return Some(Match::empty(start));
    }

    cursor.save();
    let mut captures = Captures::new();

    for item in &seq.items {
        let Some(found) = match_item(&item.matcher, cursor) else {
            cursor.rollback();
            return None;
        };
        if let Some(name) = &item.capture {
            // Nested captures are visible from the parent as well.
            for (class, tokens) in &found.captures {
                captures
                    .entry(class.clone())
                    .or_default()
                    .extend(tokens.iter().cloned());
            }
            let token = found.into_token(cursor.source());
            captures.entry(name.clone()).or_default().push(token);
        }
    }

    // Rewind and re-take the span in one commit.
    let len = cursor.rollback();
    if len > 0 {
        cursor.peek_n(len);
        cursor.commit();
    }

    Some(Match {
        start,
        end: start + len,
        captures,
    })
}

// ─── Single matchers ────────────────────────────────────────────────────────

/// Match one matcher. May leave partial consumption behind on failure; the
/// enclosing [`match_sequence`] undoes it.
fn match_item<'s>(matcher: &Matcher, cursor: &mut Cursor<'s>) -> Option<Match<'s>> {
    match matcher {
        Matcher::Literal(text) => match_literal(text, cursor),
        Matcher::Run { test, min, max } => match_run(test, *min, *max, cursor),
        Matcher::Line => match_line(cursor),
        Matcher::Quoted(quote) => match_quoted(*quote, cursor),
        Matcher::Alternation(alternatives) => alternatives
            .iter()
            .find_map(|alt| match_sequence(alt, cursor)),
        Matcher::Pattern(seq) => match_sequence(seq, cursor),
    }
}

/// Peek each character of `text`; commit only if all of them match.
fn match_literal<'s>(text: &str, cursor: &mut Cursor<'s>) -> Option<Match<'s>> {
    let start = cursor.position();
    if text.is_empty() {
        return Some(Match::empty(start));
    }
    for expected in text.chars() {
        if cursor.peek_char() != Some(expected) {
            cursor.restore_peek();
            return None;
        }
    }
    cursor.commit();
    Some(Match::plain(start, cursor.position()))
}

fn match_run<'s>(
    test: &CharTest,
    min: usize,
    max: Option<usize>,
    cursor: &mut Cursor<'s>,
) -> Option<Match<'s>> {
    let start = cursor.position();
    let mut count = 0usize;

    while max.is_none_or(|max| count < max) {
        match cursor.peek_char() {
            Some(ch) if test.accepts(ch) => {
                cursor.commit();
                count += 1;
            }
            _ => {
                cursor.restore_peek();
                break;
            }
        }
    }

    if count < min {
        return None;
    }
    Some(Match::plain(start, cursor.position()))
}

fn match_line<'s>(cursor: &mut Cursor<'s>) -> Option<Match<'s>> {
    let start = cursor.position();
    if !cursor.seek('\n') {
        return None;
    }

    let end = cursor.lookahead();
    if end > start {
        cursor.commit();
    }
    // Newline
    cursor.peek_char();
    cursor.commit();

    Some(Match::plain(start, end))
}

fn match_quoted<'s>(quote: char, cursor: &mut Cursor<'s>) -> Option<Match<'s>> {
    let start = cursor.position();
    if cursor.peek_char() != Some(quote) {
        cursor.restore_peek();
        return None;
    }
    cursor.commit();

    if !cursor.seek(quote) {
        return None;
    }
    if cursor.lookahead() > cursor.position() {
        cursor.commit();
    }
    // Closing quote
    cursor.peek_char();
    cursor.commit();

    Some(Match::plain(start, cursor.position()))
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::parser::compile;
    use crate::registry::ClassRegistry;

    /// Match `pattern` at offset 0 of `input`; return the lexeme and how far
    /// the cursor moved.
    fn at_start(classes: &ClassRegistry, pattern: &str, input: &str) -> Option<(String, usize)> {
        let seq = compile(pattern, classes).unwrap();
        let mut cursor = Cursor::new(input);
        let found = match_sequence(&seq, &mut cursor);
        match found {
            Some(m) => Some((input[m.start..m.end].to_string(), cursor.position())),
            None => {
                assert_eq!(cursor.position(), 0, "failed match must not consume");
                None
            }
        }
    }

    fn builtin(pattern: &str, input: &str) -> Option<String> {
        at_start(&ClassRegistry::new(), pattern, input).map(|(lexeme, _)| lexeme)
    }

    // --- Literals ---

    #[test]
    fn literal_exact() {
        assert_eq!(builtin("golang", "golang!"), Some("golang".into()));
    }

    #[test]
    fn literal_prefix_mismatch_consumes_nothing() {
        assert_eq!(builtin("golang", "gopher"), None);
        assert_eq!(builtin("golang", "go"), None);
    }

    // --- Runs ---

    #[test]
    fn word_is_greedy() {
        assert_eq!(builtin("{word}", "foo bar"), Some("foo".into()));
        assert_eq!(builtin("{word}", "123"), None);
    }

    #[test]
    fn symbol_is_single() {
        assert_eq!(builtin("{symbol}", "!="), Some("!".into()));
    }

    #[test]
    fn symbol_matches_multibyte() {
        assert_eq!(builtin("{symbol}{number}", "£42"), Some("£42".into()));
    }

    #[test]
    fn ws_may_be_empty() {
        assert_eq!(builtin("{word}{ws}={ws}{word}", "a= b"), Some("a= b".into()));
    }

    #[test]
    fn any_takes_rest() {
        assert_eq!(builtin("#{any}", "# a comment"), Some("# a comment".into()));
    }

    // --- Line and string ---

    #[test]
    fn line_excludes_newline_but_consumes_it() {
        let found = at_start(&ClassRegistry::new(), "{line}", "1,2,3\nrest");
        assert_eq!(found, Some(("1,2,3\n".into(), 6)));

        let seq = compile("{line}", &ClassRegistry::new()).unwrap();
        let mut cursor = Cursor::new("1,2,3\nrest");
        let m = match_sequence(&seq, &mut cursor).unwrap();
        let token = m.into_token("1,2,3\nrest");
        assert_eq!(token.get("line").lexeme, "1,2,3");
    }

    #[test]
    fn empty_line() {
        let found = at_start(&ClassRegistry::new(), "{line}", "\nx");
        assert_eq!(found, Some(("\n".into(), 1)));
    }

    #[test]
    fn line_needs_newline() {
        assert_eq!(builtin("{line}", "no newline"), None);
    }

    #[test]
    fn string_includes_quotes() {
        assert_eq!(builtin("{string}", "\"hello\" x"), Some("\"hello\"".into()));
        assert_eq!(builtin("{string}", "\"\""), Some("\"\"".into()));
        assert_eq!(builtin("{string}", "\"open"), None);
    }

    // --- Sequences and rollback ---

    #[test]
    fn failed_sequence_rolls_back() {
        // Everything but the trailing literal matches.
        assert_eq!(builtin("Q{symbol}{word}?", "Q:foo!"), None);
        assert_eq!(builtin("Q{symbol}{word}?", "Q:foo?!"), Some("Q:foo?".into()));
    }

    #[test]
    fn empty_sequence_matches_nothing() {
        assert_eq!(at_start(&ClassRegistry::new(), "", "abc"), Some((String::new(), 0)));
    }

    // --- Classes ---

    #[test]
    fn alternation_first_success_wins() {
        let mut classes = ClassRegistry::new();
        classes
            .register_alternation("some", &["{number}", "{word}{symbol}", "hello"])
            .unwrap();
        assert_eq!(at_start(&classes, "{some}", "123").map(|m| m.0), Some("123".into()));
        assert_eq!(at_start(&classes, "{some}", "foo!").map(|m| m.0), Some("foo!".into()));
        assert_eq!(at_start(&classes, "{some}", "hello").map(|m| m.0), Some("hello".into()));
        assert_eq!(at_start(&classes, "{some}", "!"), None);
    }

    #[test]
    fn alternation_does_not_look_for_longer_match() {
        let mut classes = ClassRegistry::new();
        classes.register_alternation("ab", &["a", "ab"]).unwrap();
        assert_eq!(at_start(&classes, "{ab}", "ab").map(|m| m.0), Some("a".into()));
    }

    #[test]
    fn optional_class_can_match_empty() {
        let mut classes = ClassRegistry::new();
        classes.register_optional("semicolon", &[";"]).unwrap();
        classes.register_optional("space", &[" "]).unwrap();
        let found = at_start(
            &classes,
            "{word}{space}={space}{word}{semicolon}",
            "foo =bar;",
        );
        assert_eq!(found, Some(("foo =bar;".into(), 9)));
    }

    #[test]
    fn nested_captures() {
        let mut classes = ClassRegistry::new();
        classes.register_pattern("variable", "{word}").unwrap();
        classes.register_pattern("onetwothree", "123").unwrap();
        classes
            .register_pattern("declaration", "var {variable} = {onetwothree}")
            .unwrap();

        let input = "var foo = 123;";
        let seq = compile("{declaration};", &classes).unwrap();
        let mut cursor = Cursor::new(input);
        let token = match_sequence(&seq, &mut cursor).unwrap().into_token(input);

        assert_eq!(token.lexeme, input);
        let declaration = token.get("declaration");
        assert_eq!(declaration.lexeme, "var foo = 123");
        assert_eq!(declaration.get("variable").lexeme, "foo");
        assert_eq!(declaration.get("variable").get("word").lexeme, "foo");
        assert_eq!(declaration.get("onetwothree").lexeme, "123");
        // Inner captures are merged upwards too.
        assert_eq!(token.get("variable").lexeme, "foo");
        assert_eq!(token.get("variable").pos, 4);
    }

    #[test]
    fn repeated_class_keeps_document_order() {
        let found = {
            let input = "Hello, world!";
            let seq = compile("{word}{symbol} {word}{symbol}", &ClassRegistry::new()).unwrap();
            let mut cursor = Cursor::new(input);
            match_sequence(&seq, &mut cursor).unwrap().into_token(input)
        };
        assert_eq!(found.get_at("word", 0).lexeme, "Hello");
        assert_eq!(found.get_at("word", 1).lexeme, "world");
        assert_eq!(found.get_at("symbol", 0).lexeme, ",");
        assert_eq!(found.get_at("symbol", 1).lexeme, "!");
    }
}
