use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Who wrote the incoming negotiation message. The AI agent answers as the other side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    Brand,
    Creator,
}

impl Sender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sender::Brand => "brand",
            Sender::Creator => "creator",
        }
    }

    /// The side the AI agent speaks for when this sender writes.
    pub fn counterpart(&self) -> Sender {
        match self {
            Sender::Brand => Sender::Creator,
            Sender::Creator => Sender::Brand,
        }
    }

    /// Parses the value stored in `negotiations.sender`.
    pub fn from_db(value: &str) -> Option<Sender> {
        match value {
            "brand" => Some(Sender::Brand),
            "creator" => Some(Sender::Creator),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct NegotiationRow {
    pub id: Uuid,
    pub campaign_id: Uuid,
    pub creator_id: Uuid,
    pub message: String,
    pub sender: String,
    pub ai_response: String,
    pub audio_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sender_deserializes_lowercase() {
        let sender: Sender = serde_json::from_str("\"creator\"").unwrap();
        assert_eq!(sender, Sender::Creator);
        assert_eq!(sender.as_str(), "creator");
        assert!(serde_json::from_str::<Sender>("\"agent\"").is_err());
    }

    #[test]
    fn test_counterpart_and_db_roundtrip() {
        assert_eq!(Sender::Creator.counterpart(), Sender::Brand);
        assert_eq!(Sender::Brand.counterpart(), Sender::Creator);
        assert_eq!(Sender::from_db(Sender::Brand.as_str()), Some(Sender::Brand));
        assert_eq!(Sender::from_db("ai_agent"), None);
    }
}
