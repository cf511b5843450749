use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Who authored a [`Message`]. Fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Ai,
}

impl Sender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Ai => "ai",
        }
    }
}

impl std::fmt::Display for Sender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the conversation. Only `text` ever changes after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub text: String,
    pub sender: Sender,
}

impl Message {
    pub fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            text: text.into(),
            sender,
        }
    }

    pub fn with_id(id: impl Into<String>, sender: Sender, text: impl Into<String>) -> Self {
        Self { id: id.into(), text: text.into(), sender }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Sender::User, text)
    }

    pub fn ai(text: impl Into<String>) -> Self {
        Self::new(Sender::Ai, text)
    }
}

/// Body of `POST /query`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryRequest {
    pub prompt: String,
    pub doc_name: String,
}

/// Body returned by `POST /query`. A missing, empty or non-string
/// `response` decodes as `None`, as does a body that is not an object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryResponse {
    pub response: Option<String>,
}

impl<'de> Deserialize<'de> for QueryResponse {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let body = Value::deserialize(deserializer)?;
        let response = match object_field(&body, "response") {
            Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
            _ => None,
        };
        Ok(Self { response })
    }
}

/// Body returned by `GET /get_tables`. Anything other than an array under
/// an object's `tables` key decodes as an empty list; non-string entries
/// are skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TablesResponse {
    pub tables: Vec<String>,
}

impl<'de> Deserialize<'de> for TablesResponse {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let body = Value::deserialize(deserializer)?;
        let tables = match object_field(&body, "tables") {
            Some(Value::Array(items)) => {
                items.iter().filter_map(Value::as_str).map(str::to_owned).collect()
            }
            _ => Vec::new(),
        };
        Ok(Self { tables })
    }
}

/// Field lookup that only looks inside JSON objects, never arrays.
fn object_field<'a>(body: &'a Value, key: &str) -> Option<&'a Value> {
    body.as_object()?.get(key)
}
