//! Catalog of named, pre-defined sub-formulas that can be embedded with `&name|`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpressionDefinition {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Formula text of the embedded expression, when the host provides it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formula: Option<String>,
}

impl ExpressionDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            formula: None,
        }
    }
}

/// Embedded expressions known to the host. Names match exactly (case-sensitive).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpressionCatalog {
    by_name: BTreeMap<String, ExpressionDefinition>,
}

impl ExpressionCatalog {
    pub fn new<I>(definitions: I) -> Self
    where
        I: IntoIterator<Item = ExpressionDefinition>,
    {
        let by_name = definitions
            .into_iter()
            .map(|def| (def.name.clone(), def))
            .collect();
        Self { by_name }
    }

    pub fn get(&self, name: &str) -> Option<&ExpressionDefinition> {
        self.by_name.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        !name.is_empty() && self.by_name.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ExpressionDefinition> {
        self.by_name.values()
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

impl FromIterator<ExpressionDefinition> for ExpressionCatalog {
    fn from_iter<T: IntoIterator<Item = ExpressionDefinition>>(iter: T) -> Self {
        Self::new(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_exact() {
        let catalog: ExpressionCatalog = [ExpressionDefinition::new("NetPower")]
            .into_iter()
            .collect();
        assert!(catalog.contains("NetPower"));
        assert!(!catalog.contains("netpower"));
        assert!(!catalog.contains(""));
        assert_eq!(catalog.get("NetPower").map(|d| d.name.as_str()), Some("NetPower"));
    }

    #[test]
    fn later_definitions_replace_earlier_ones() {
        let mut second = ExpressionDefinition::new("a");
        second.formula = Some("$x|y| * 2".to_string());
        let catalog = ExpressionCatalog::new([ExpressionDefinition::new("a"), second.clone()]);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("a"), Some(&second));
    }
}
