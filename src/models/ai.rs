//! AI assistant records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Configured language model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiModel {
    pub id: u64,
    pub name: String,
    pub provider: String,
    pub model: String,
    #[serde(default)]
    pub is_active: bool,
    /// Returned to admins only
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub config: Value,
}

/// Chat conversation with the assistant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiConversation {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub create_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub update_time: Option<DateTime<Utc>>,
}

/// Who wrote a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
    System,
}

/// One message in a conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiMessage {
    pub id: u64,
    pub role: MessageRole,
    pub content: String,
    #[serde(default)]
    pub create_time: Option<DateTime<Utc>>,
}

/// Knowledge point in the curriculum graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgePoint {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub difficulty: Option<Value>,
}

/// Recommended problem with the model's reasoning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProblemRecommendation {
    pub id: u64,
    #[serde(rename = "_id", default)]
    pub display_id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Code review result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeReview {
    pub review_result: Value,
    #[serde(default)]
    pub review_id: Option<u64>,
}

/// Learning path node progress states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeStatus {
    Pending,
    InProgress,
    Completed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_status_wire_names() {
        assert_eq!(
            serde_json::to_value(NodeStatus::InProgress).unwrap(),
            serde_json::json!("in_progress")
        );
    }

    #[test]
    fn test_recommendation_display_id() {
        let r: ProblemRecommendation = serde_json::from_value(serde_json::json!({
            "id": 3, "_id": "1003", "title": "Sum", "score": 0.8
        }))
        .unwrap();
        assert_eq!(r.display_id.as_deref(), Some("1003"));
    }
}
