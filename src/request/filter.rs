//! Filter expressions
//!
//! A filter is the parenthesized part of a get command, for example
//! `(id = 17)` or `(search ~ "ever" and released > "2004")`. The
//! expression language belongs to the server; this type carries the
//! rendered text and combines expressions without interpreting them.

use std::fmt;

/// A filter expression in the wire's textual form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter(String);

impl Filter {
    /// Wrap an already-rendered expression like `id = 17`.
    pub fn new(expression: impl Into<String>) -> Self {
        Self(expression.into())
    }

    /// Both filters must hold.
    pub fn and(self, other: Filter) -> Filter {
        Filter(format!("({}) and ({})", self.0, other.0))
    }

    /// Either filter may hold.
    pub fn or(self, other: Filter) -> Filter {
        Filter(format!("({}) or ({})", self.0, other.0))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for Filter {
    fn from(expression: &str) -> Self {
        Self::new(expression)
    }
}
