//! Named procedures

use serde::{Deserialize, Serialize};

/// A named block that can be called with keyword arguments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Procedure {
    pub name: String,

    /// Index of the root block in the pipeline's block table
    pub block_index: usize,

    /// `key: value` pairs from attribute comments preceding the declaration
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<(String, String)>,
}

impl Procedure {
    pub fn new(name: impl Into<String>, block_index: usize) -> Self {
        Self {
            name: name.into(),
            block_index,
            attributes: Vec::new(),
        }
    }

    /// Attach attributes
    pub fn with_attributes(mut self, attributes: Vec<(String, String)>) -> Self {
        self.attributes = attributes;
        self
    }

    /// Value of an attribute
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}
