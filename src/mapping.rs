//! Mapping table
//!
//! The name to replacement rules the engine applies. A name maps either to a
//! replacement text or to [`Replacement::Delete`]; both an empty text and a
//! deletion remove the token from the output, but they stay distinct so the
//! table reports exactly what was asked for.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::fmt;

static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").expect("identifier pattern is valid"));

/// What a mapped name turns into
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Replacement {
    /// Remove the token (`-DNAME`)
    Delete,
    /// Emit this text instead of the token (`-DNAME=TEXT`)
    Text(String),
}

impl Replacement {
    /// The text emitted in place of the token. Empty for deletions.
    pub fn as_str(&self) -> &str {
        match self {
            Replacement::Delete => "",
            Replacement::Text(text) => text,
        }
    }

    /// True when applying this replacement removes the token
    pub fn removes_token(&self) -> bool {
        self.as_str().is_empty()
    }
}

impl fmt::Display for Replacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Replacement::Delete => write!(f, "<delete>"),
            Replacement::Text(text) => write!(f, "{:?}", text),
        }
    }
}

/// Name to replacement table. Keys are unique; defining a name again
/// replaces the earlier definition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingTable {
    entries: HashMap<String, Replacement>,
}

impl MappingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Define `name`, returning the replacement it had before, if any
    pub fn define(
        &mut self,
        name: impl Into<String>,
        replacement: Replacement,
    ) -> Option<Replacement> {
        let name = name.into();
        if !is_identifier(&name) {
            tracing::warn!(
                name = %name,
                "mapping name is not an identifier and will never match a token"
            );
        }
        self.entries.insert(name, replacement)
    }

    /// Builder-style [`define`](Self::define) with a replacement text
    pub fn with_text(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.define(name, Replacement::Text(text.into()));
        self
    }

    /// Builder-style [`define`](Self::define) with a deletion
    pub fn with_delete(mut self, name: impl Into<String>) -> Self {
        self.define(name, Replacement::Delete);
        self
    }

    pub fn lookup(&self, name: &str) -> Option<&Replacement> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Defined names in sorted order
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

/// Whether `name` can ever be produced as a name or keyword token
pub fn is_identifier(name: &str) -> bool {
    IDENTIFIER.is_match(name)
}
