//! Pattern compiler and matching engine.
//!
//! A pattern is literal text mixed with `{class}` references. Everything
//! outside braces must match exactly; each reference runs the named class
//! and records what it matched under the class name. There is no escape
//! syntax: use `{lbrace}` and `{rbrace}` to match literal braces.
//!
//! # Built-in classes
//!
//! | Class      | Matches                                             |
//! |------------|-----------------------------------------------------|
//! | `word`     | One or more ASCII letters                           |
//! | `char`     | Exactly one ASCII letter                            |
//! | `var`      | One or more ASCII letters, `$` or `_`               |
//! | `number`   | One or more ASCII digits                            |
//! | `float`    | One or more ASCII digits or `.`                     |
//! | `hex`      | One or more hex digits or `#`                       |
//! | `base64`   | One or more base64 alphabet characters              |
//! | `symbol`   | Exactly one punctuation character                   |
//! | `ws`       | Zero or more spaces, tabs, CRs or newlines          |
//! | `text`     | One or more non-whitespace characters               |
//! | `any`      | Everything up to the end of input                   |
//! | `line`     | Text up to a newline (newline consumed, not captured) |
//! | `string`   | A double-quoted string, quotes included             |
//! | `lbrace`   | A literal `{`                                       |
//! | `rbrace`   | A literal `}`                                       |
//!
//! Matching is ordered and greedy per class: alternatives are tried in
//! registration order and the first one that matches wins, and each class
//! consumes as much as it can without ever giving characters back.

pub mod ast;
pub mod char_class;
pub mod matcher;
pub mod parser;

pub use ast::{CharTest, Item, Matcher, Sequence};
pub use matcher::{Match, match_sequence};
pub use parser::{PatternError, compile};
