// src/models/frontmatter.rs
use serde_yaml_ng::{Mapping, Value};

/// A frontmatter block that parsed as a YAML mapping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frontmatter {
    pub fields: Mapping,
}

impl Frontmatter {
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// The `date` field, treating an explicit null as absent.
    #[must_use]
    pub fn date(&self) -> Option<&Value> {
        self.get("date").filter(|value| !value.is_null())
    }
}
