//! Keyword arguments of a procedure call

use crate::traits::ShellEncoder;
use serde::{Deserialize, Serialize};

/// Ordered `name=value` arguments with unique names
///
/// Insertion order is kept so a call is written back the way it was read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcArgs {
    entries: Vec<(String, String)>,
}

impl ProcArgs {
    /// Create an empty argument set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an argument
    ///
    /// # Panics
    /// Panics if `name` is already present; callers check [`ProcArgs::has`] first.
    pub fn add(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        assert!(!self.has(&name), "argument '{}' added twice", name);
        self.entries.push((name, value.into()));
    }

    /// Builder form of [`ProcArgs::add`]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.add(name, value);
        self
    }

    /// Value of an argument
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn has(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Argument names in insertion order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    /// `(name, value)` pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Render as ` name=value` for every argument, values quoted by `encoder`
    pub fn render(&self, encoder: &dyn ShellEncoder) -> String {
        let mut s = String::new();
        for (name, value) in &self.entries {
            s.push(' ');
            s.push_str(name);
            s.push('=');
            s.push_str(&encoder.quote(value));
        }
        s
    }
}
