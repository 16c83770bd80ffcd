use serde::{Deserialize, Serialize};

/// Reply used when the service answers successfully without any text
pub const FALLBACK_REPLY: &str = "Hello.";

/// Request body for the dialogue endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogueRequest {
    pub prompt: String,
    pub npc_name: String,
}

/// Successful response body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DialogueReply {
    #[serde(default)]
    pub text: Option<String>,
}

impl DialogueReply {
    /// The reply text, or the fallback greeting when the service sent none
    pub fn into_text(self) -> String {
        self.text
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| FALLBACK_REPLY.to_string())
    }
}

/// Optional body of a failed response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_uses_camel_case() {
        let req = DialogueRequest {
            prompt: "Greet the player".into(),
            npc_name: "Eliza".into(),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["npcName"], "Eliza");
        assert_eq!(json["prompt"], "Greet the player");
        assert!(json.get("npc_name").is_none());
    }

    #[test]
    fn test_reply_without_text_falls_back() {
        let reply: DialogueReply = serde_json::from_str("{}").unwrap();
        assert_eq!(reply.into_text(), "Hello.");

        let reply: DialogueReply = serde_json::from_str(r#"{"text": "Hi there."}"#).unwrap();
        assert_eq!(reply.into_text(), "Hi there.");
    }

    #[test]
    fn test_error_body_optional() {
        let body: ErrorBody = serde_json::from_str(r#"{"error": "key missing"}"#).unwrap();
        assert_eq!(body.error.as_deref(), Some("key missing"));

        let body: ErrorBody = serde_json::from_str("{}").unwrap();
        assert!(body.error.is_none());
    }
}
