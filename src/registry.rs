//! Class registry: built-in classes plus user-defined ones.
//!
//! Built-ins live in a static table and are always checked first. User
//! classes are compiled when they are registered, so a class can only refer
//! to classes registered before it.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::RegistrationError;
use crate::pattern::char_class::builtin;
use crate::pattern::{CharTest, Matcher, PatternError, Sequence, compile};

#[derive(Debug, Default)]
pub struct ClassRegistry {
    classes: HashMap<String, Matcher>,
}

impl ClassRegistry {
    pub fn new() -> Self {
        Self {
            classes: HashMap::new(),
        }
    }

    /// Look up a class by name, built-ins first.
    pub fn resolve(&self, name: &str) -> Result<Matcher, PatternError> {
        if let Some(class) = builtin(name) {
            return Ok(class.matcher());
        }
        self.classes
            .get(name)
            .cloned()
            .ok_or_else(|| PatternError::UnknownClass(name.to_string()))
    }

    /// Test whether a class exists, built-in or user defined.
    pub fn contains(&self, name: &str) -> bool {
        builtin(name).is_some() || self.classes.contains_key(name)
    }

    /// Return all user class names in alphabetical order
    pub fn sorted_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.classes.keys().map(|s| s.as_str()).collect();
        names.sort();
        names
    }

    /// Register a class matching one or more characters accepted by `test`.
    pub fn register_predicate<F>(&mut self, name: &str, test: F) -> Result<(), RegistrationError>
    where
        F: Fn(char) -> bool + Send + Sync + 'static,
    {
        self.check_name(name)?;
        self.insert(
            name,
            Matcher::Run {
                test: CharTest::Custom(Arc::new(test)),
                min: 1,
                max: None,
            },
        );
        Ok(())
    }

    /// Register a class matching the first of `patterns` that matches.
    pub fn register_alternation(
        &mut self,
        name: &str,
        patterns: &[&str],
    ) -> Result<(), RegistrationError> {
        self.check_name(name)?;
        if patterns.is_empty() {
            return Err(RegistrationError::NoAlternatives(name.to_string()));
        }
        let alternatives = self.compile_all(patterns)?;
        self.insert(name, Matcher::Alternation(alternatives.into()));
        Ok(())
    }

    /// Like [`ClassRegistry::register_alternation`], but the class also
    /// matches the empty string when none of `patterns` do.
    pub fn register_optional(
        &mut self,
        name: &str,
        patterns: &[&str],
    ) -> Result<(), RegistrationError> {
        self.check_name(name)?;
        let mut alternatives = self.compile_all(patterns)?;
        alternatives.push(Sequence::empty());
        self.insert(name, Matcher::Alternation(alternatives.into()));
        Ok(())
    }

    /// Register a class matching a single pattern. Its captures nest under
    /// `name` in the token that uses it.
    pub fn register_pattern(&mut self, name: &str, pattern: &str) -> Result<(), RegistrationError> {
        self.check_name(name)?;
        let seq = self.compile(pattern)?;
        self.insert(name, Matcher::Pattern(Arc::new(seq)));
        Ok(())
    }

    /// Compile `pattern` against this registry.
    pub fn compile(&self, pattern: &str) -> Result<Sequence, RegistrationError> {
        compile(pattern, self).map_err(|error| RegistrationError::Pattern {
            pattern: pattern.to_string(),
            error,
        })
    }

    fn compile_all(&self, patterns: &[&str]) -> Result<Vec<Sequence>, RegistrationError> {
        patterns.iter().map(|p| self.compile(p)).collect()
    }

    fn check_name(&self, name: &str) -> Result<(), RegistrationError> {
        if name.contains(['{', '}']) {
            return Err(RegistrationError::InvalidClassName(name.to_string()));
        }
        if self.contains(name) {
            return Err(RegistrationError::DuplicateClass(name.to_string()));
        }
        Ok(())
    }

    fn insert(&mut self, name: &str, matcher: Matcher) {
        self.classes.insert(name.to_string(), matcher);
    }
}
