use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const UPSTREAM_FAILURE_MESSAGE: &str = "Something went wrong!";
pub const MALFORMED_BODY_MESSAGE: &str = "Request body is not valid JSON";
pub const NOT_FOUND_MESSAGE: &str = "Not found";

/// Inbound body. Only `question` is read; other keys are dropped.
#[derive(Debug, Default, Deserialize)]
pub struct InboundQuestion {
    #[serde(default)]
    pub question: Value,
}

/// Outbound body. A missing question is sent as an explicit `null`.
#[derive(Debug, Serialize)]
pub struct OutboundQuestion {
    pub question: Value,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: &str) -> Self {
        Self {
            error: message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_question_serializes_as_null() {
        let inbound: InboundQuestion = serde_json::from_value(json!({"other": 1})).unwrap();
        let outbound = OutboundQuestion {
            question: inbound.question,
        };

        assert_eq!(serde_json::to_string(&outbound).unwrap(), r#"{"question":null}"#);
    }

    #[test]
    fn failure_body_is_fixed() {
        let body = serde_json::to_string(&ErrorResponse::new(UPSTREAM_FAILURE_MESSAGE)).unwrap();
        assert_eq!(body, r#"{"error":"Something went wrong!"}"#);
    }
}
