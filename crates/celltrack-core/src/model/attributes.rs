use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Free-form part attributes (tooling, material, tolerances, ...)
///
/// Stored as a JSON object. Keys are kept sorted so the persisted text is
/// stable across writes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Attributes {
    data: BTreeMap<String, serde_json::Value>,
}

impl Attributes {
    pub fn new() -> Self {
        Self {
            data: BTreeMap::new(),
        }
    }

    /// Get a value by key
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.data.get(key)
    }

    /// Set a value by key
    pub fn set(&mut self, key: impl Into<String>, value: serde_json::Value) {
        self.data.insert(key.into(), value);
    }

    /// Remove a value by key
    pub fn remove(&mut self, key: &str) -> Option<serde_json::Value> {
        self.data.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Builder-style insert, handy for drafts and fixtures
    pub fn with(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.set(key, value);
        self
    }
}

impl From<BTreeMap<String, serde_json::Value>> for Attributes {
    fn from(data: BTreeMap<String, serde_json::Value>) -> Self {
        Self { data }
    }
}
