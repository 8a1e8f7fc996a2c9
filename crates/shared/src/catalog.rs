use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::PressureId;

/// Descriptor for feedback factors. Interpreted only by item views.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schema(pub serde_json::Value);

impl Schema {
    /// Display label for a schema variable, from the optional
    /// `variables: { key: { label } }` section.
    pub fn variable_label(&self, key: &str) -> Option<&str> {
        self.0
            .get("variables")?
            .get(key)?
            .get("label")?
            .as_str()
    }
}

/// Where each pressure is referenced, keyed by pressure id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UsageMap(pub BTreeMap<PressureId, Vec<String>>);

impl UsageMap {
    pub fn usages_of(&self, id: &PressureId) -> &[String] {
        self.0.get(id).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn is_used(&self, id: &PressureId) -> bool {
        !self.usages_of(id).is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_variable_labels_when_present() {
        let schema = Schema(serde_json::json!({
            "variables": {
                "food": { "label": "Food supply" },
                "morale": {}
            }
        }));
        assert_eq!(schema.variable_label("food"), Some("Food supply"));
        assert_eq!(schema.variable_label("morale"), None);
        assert_eq!(Schema::default().variable_label("food"), None);
    }

    #[test]
    fn unknown_pressure_has_no_usages() {
        let mut usage = UsageMap::default();
        usage.0.insert(
            PressureId::from("unrest"),
            vec!["event: riot".to_string()],
        );
        assert_eq!(usage.usages_of(&PressureId::from("unrest")).len(), 1);
        assert!(usage.is_used(&PressureId::from("unrest")));
        assert!(!usage.is_used(&PressureId::from("famine")));
    }
}
