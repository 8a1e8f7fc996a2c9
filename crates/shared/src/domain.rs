use std::fmt;

use serde::{Deserialize, Serialize};

pub const DEFAULT_PRESSURE_NAME: &str = "New Pressure";
pub const DEFAULT_INITIAL_VALUE: f64 = 50.0;
pub const DEFAULT_DECAY: f64 = 5.0;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PressureId(pub String);

impl PressureId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PressureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for PressureId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A single growth rule. Its shape is owned by the document schema, so it is
/// carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeedbackFactor(pub serde_json::Value);

impl FeedbackFactor {
    pub fn field(&self, key: &str) -> Option<&serde_json::Value> {
        self.0.as_object().and_then(|object| object.get(key))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Growth {
    #[serde(default)]
    pub positive_feedback: Vec<FeedbackFactor>,
    #[serde(default)]
    pub negative_feedback: Vec<FeedbackFactor>,
}

impl Growth {
    pub fn is_empty(&self) -> bool {
        self.positive_feedback.is_empty() && self.negative_feedback.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pressure {
    pub id: PressureId,
    pub name: String,
    pub initial_value: f64,
    pub decay: f64,
    #[serde(default)]
    pub growth: Growth,
}

impl Pressure {
    /// Fresh pressure as produced by the "add" affordance.
    pub fn with_defaults(id: PressureId) -> Self {
        Self {
            id,
            name: DEFAULT_PRESSURE_NAME.to_string(),
            initial_value: DEFAULT_INITIAL_VALUE,
            decay: DEFAULT_DECAY,
            growth: Growth::default(),
        }
    }
}
