use std::fmt;

use serde::{Deserialize, Serialize};

/// Body the database webhook posts on every row change of `data_requirements`.
#[derive(Debug, Deserialize)]
pub struct WebhookPayload {
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(default)]
    pub table: Option<String>,
    #[serde(default)]
    pub schema: Option<String>,
    // Kept loose so update/delete events with partial rows are still skipped
    // cleanly instead of failing to parse.
    #[serde(default)]
    pub record: Option<serde_json::Value>,
    #[serde(default)]
    pub old_record: Option<serde_json::Value>,
}

impl WebhookPayload {
    pub fn is_insert(&self) -> bool {
        self.event_type.eq_ignore_ascii_case("INSERT")
    }
}

/// Store-assigned row id. Uuid columns arrive as strings, identity columns as
/// numbers.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum RecordId {
    Number(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Number(n) => write!(f, "{}", n),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

/// Snapshot of one lead row as handed over by the trigger.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct DataRequirement {
    #[serde(default)]
    pub id: Option<RecordId>,
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub company: String,
    #[serde(default)]
    pub role_title: Option<String>,
    #[serde(default)]
    pub data_type: Option<String>,
    #[serde(default)]
    pub data_amount: Option<String>,
    #[serde(default)]
    pub timeline: Option<String>,
    #[serde(default)]
    pub hardware_setup: Option<Vec<String>>,
    #[serde(default)]
    pub additional_hardware: Option<String>,
    #[serde(default)]
    pub budget_range: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl DataRequirement {
    pub fn phone(&self) -> Option<&str> {
        present(&self.phone)
    }

    pub fn role_title(&self) -> Option<&str> {
        present(&self.role_title)
    }

    pub fn data_type(&self) -> Option<&str> {
        present(&self.data_type)
    }

    pub fn data_amount(&self) -> Option<&str> {
        present(&self.data_amount)
    }

    pub fn timeline(&self) -> Option<&str> {
        present(&self.timeline)
    }

    pub fn additional_hardware(&self) -> Option<&str> {
        present(&self.additional_hardware)
    }

    pub fn budget_range(&self) -> Option<&str> {
        present(&self.budget_range)
    }

    pub fn id(&self) -> Option<String> {
        match &self.id {
            Some(RecordId::Text(text)) if text.is_empty() => None,
            Some(id) => Some(id.to_string()),
            None => None,
        }
    }
}
