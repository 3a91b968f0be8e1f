use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// JSON error body exchanged between the back-office service and its
/// clients. `errors` carries per-field validation messages when present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<HashMap<String, Vec<String>>>,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            errors: None,
        }
    }

    pub fn with_fields(
        message: impl Into<String>,
        errors: HashMap<String, Vec<String>>,
    ) -> Self {
        Self {
            error: message.into(),
            errors: Some(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_body_omits_empty_field_map() {
        let body = ErrorBody::new("boom");
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["error"], "boom");
        assert!(json.get("errors").is_none());
    }

    #[test]
    fn test_error_body_roundtrips_field_errors() {
        let mut fields = HashMap::new();
        fields.insert("guest_email".to_string(), vec!["invalid email".to_string()]);
        let body = ErrorBody::with_fields("validation failed", fields);
        let parsed: ErrorBody =
            serde_json::from_str(&serde_json::to_string(&body).unwrap()).unwrap();
        assert_eq!(parsed.errors.unwrap()["guest_email"][0], "invalid email");
    }
}
