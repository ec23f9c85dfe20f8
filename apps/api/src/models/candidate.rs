use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

use crate::screening::candidate::CandidateRecord;

/// A stored candidate profile joined with its relevance for the current search.
#[derive(Debug, Clone, FromRow)]
pub struct CandidateMatchRow {
    pub identifier: String,
    pub display_name: Option<String>,
    pub attributes: Value,
    pub raw_text: String,
    pub relevance: f32,
}

impl CandidateMatchRow {
    pub fn into_record(self) -> CandidateRecord {
        CandidateRecord {
            identifier: self.identifier,
            display_name: self.display_name,
            attributes: attributes_from_json(&self.attributes),
            raw_text: self.raw_text,
            relevance: Some(self.relevance),
        }
    }
}

/// Flattens a JSONB attribute object into strings.
/// Numbers and booleans are stringified; nulls, arrays and nested objects are skipped.
pub fn attributes_from_json(value: &Value) -> BTreeMap<String, String> {
    let Some(object) = value.as_object() else {
        return BTreeMap::new();
    };

    object
        .iter()
        .filter_map(|(key, v)| {
            let text = match v {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                _ => return None,
            };
            Some((key.clone(), text))
        })
        .collect()
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct InterviewInvitationRow {
    pub id: Uuid,
    pub recipient: String,
    pub sender: Option<String>,
    pub job_role: String,
    pub subject: String,
    pub body: String,
    pub meeting_url: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}
