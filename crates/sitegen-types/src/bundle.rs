//! Generated code bundle — a flat map of relative file path to file content.
//!
//! The JSON form is exactly what the model is asked to produce:
//! `{"index.html": "...", "styles/main.css": "..."}`.

use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};

pub const ENTRY_DOCUMENT: &str = "index.html";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GeneratedCode {
    files: BTreeMap<String, String>,
}

impl GeneratedCode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<String>, content: impl Into<String>) {
        self.files.insert(path.into(), content.into());
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        self.files.get(path).map(String::as_str)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Paths in lexical order
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.files.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// The `index.html` document, if present and non-empty.
    pub fn entry_document(&self) -> Option<&str> {
        self.get(ENTRY_DOCUMENT).filter(|html| !html.is_empty())
    }

    /// File to show first in the code view.
    pub fn default_selection(&self) -> Option<&str> {
        if self.contains(ENTRY_DOCUMENT) {
            Some(ENTRY_DOCUMENT)
        } else {
            self.paths().next()
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for GeneratedCode {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            files: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Highlighting hint for a path, taken from its extension.
pub fn language_for(path: &str) -> &str {
    let name = path.rsplit('/').next().unwrap_or(path);
    match name.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => ext,
        _ => "text",
    }
}
