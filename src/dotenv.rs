//! `.env` file parsing, built entirely from tokenizer classes.
//!
//! Each line is either `KEY=value`, a `#` comment, or blank. Values are a
//! double-quoted string or a run of non-whitespace text; quotes are removed
//! and `\n` escapes become newlines.

use std::cell::RefCell;
use std::collections::BTreeMap;

use crate::error::Error;
use crate::tokenizer::Tokenizer;

/// Parse `.env` style `contents` into a sorted key/value map.
///
/// Later assignments to the same key win.
pub fn parse_env(contents: &str) -> Result<BTreeMap<String, String>, Error> {
    let vars = RefCell::new(BTreeMap::new());

    {
        let mut tokenizer = Tokenizer::new();
        tokenizer.register_class("key", |c| c.is_ascii_alphanumeric() || c == '_');
        tokenizer.register_optional_class("value", &["{string}", "{text}"]);
        tokenizer.register_pattern_class("keyValue", "{ws}{key}{ws}={ws}{value}");
        tokenizer.register_pattern_class("comment", "#{any}");
        tokenizer.register_alternation_class("expression", &["{comment}", "{keyValue}"]);

        tokenizer.pattern("{expression}", |token, _| {
            let assignment = token.get("expression").get("keyValue");
            if assignment.is_empty() {
                return Ok(());
            }
            let key = assignment.get("key").lexeme;
            let value = unquote(assignment.get("value").lexeme);
            vars.borrow_mut().insert(key.to_string(), value);
            Ok(())
        });

        for line in contents.lines() {
            tokenizer.run(line)?;
        }
    }

    Ok(vars.into_inner())
}

fn unquote(value: &str) -> String {
    value.replace('"', "").replace("\\n", "\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = r#"
# Database settings
DB_HOST=localhost
DB_PORT = 5432
GREETING="hello world"
MULTILINE="first\nsecond"
EMPTY=
TRAILING=value # a comment
"#;

    #[test]
    fn parses_example_file() {
        let vars = parse_env(EXAMPLE).unwrap();
        assert_eq!(vars["DB_HOST"], "localhost");
        assert_eq!(vars["DB_PORT"], "5432");
        assert_eq!(vars["GREETING"], "hello world");
        assert_eq!(vars["MULTILINE"], "first\nsecond");
        assert_eq!(vars["EMPTY"], "");
        assert_eq!(vars["TRAILING"], "value");
        assert_eq!(vars.len(), 6);
    }

    #[test]
    fn comments_and_blank_lines_only() {
        assert!(parse_env("# nothing here\n\n   \n").unwrap().is_empty());
    }

    #[test]
    fn later_assignment_wins() {
        let vars = parse_env("A=1\nA=2\n").unwrap();
        assert_eq!(vars["A"], "2");
    }
}
