//! A small pattern tokenizer built from named character classes.
//!
//! Patterns mix literal text with `{class}` references. Each pattern has a
//! callback; [`Tokenizer::run`] scans the input, calls the callback of the
//! first pattern that matches at each position, and skips anything nothing
//! matches. Classes can be built from a character predicate, from a list of
//! alternative patterns, or from a single pattern whose captures nest under
//! the class name.
//!
//! # Example
//!
//! ```rust
//! use std::cell::RefCell;
//! use classlex::Tokenizer;
//!
//! let pairs = RefCell::new(Vec::new());
//! let mut tokenizer = Tokenizer::new();
//!
//! tokenizer.register_pattern_class("assignment", "{word}={number}");
//! tokenizer.pattern("{assignment};", |token, _| {
//!     let assignment = token.get("assignment");
//!     pairs.borrow_mut().push(format!(
//!         "{}={}",
//!         assignment.get("word").lexeme,
//!         assignment.get("number").lexeme
//!     ));
//!     Ok(())
//! });
//!
//! tokenizer.run("x=1; y=22; junk z=3;").unwrap();
//! drop(tokenizer);
//!
//! assert_eq!(pairs.into_inner(), ["x=1", "y=22", "z=3"]);
//! ```

mod cursor;
pub mod dotenv;
mod error;
pub mod pattern;
mod registry;
mod token;
mod tokenizer;

pub use cursor::Cursor;
pub use dotenv::parse_env;
pub use error::{Error, RegistrationError};
pub use pattern::PatternError;
pub use registry::ClassRegistry;
pub use token::{Captures, Token};
pub use tokenizer::{Callback, Tokenizer, UnmatchedInput};
