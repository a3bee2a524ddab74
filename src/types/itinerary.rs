use serde::{Deserialize, Deserializer, Serialize};

/// Budget arrives either as free text ("$500 - $800") or a plain number.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum BudgetValue {
    Text(String),
    Number(serde_json::Number),
}

impl BudgetValue {
    pub fn into_text(self) -> String {
        match self {
            BudgetValue::Text(s) => s,
            BudgetValue::Number(n) => n.to_string(),
        }
    }
}

/// Present-but-null deserializes to `Some(None)`; absent stays `None`.
fn present<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// POST body. Every field is optional here so that missing ones can be
/// reported together instead of failing on the first.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateItinerary {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub days: Option<i64>,
    #[serde(default)]
    pub budget: Option<BudgetValue>,
    #[serde(default)]
    pub places: Option<String>,
    #[serde(default)]
    pub accommodation: Option<String>,
    #[serde(default)]
    pub transport: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub package_name: Option<String>,
}

/// PUT body; only keys present in the JSON are applied.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateItinerary {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub days: Option<i64>,
    #[serde(default, deserialize_with = "present")]
    pub budget: Option<Option<BudgetValue>>,
    #[serde(default)]
    pub places: Option<String>,
    #[serde(default)]
    pub accommodation: Option<String>,
    #[serde(default)]
    pub transport: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub package_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub message: String,
    pub id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
