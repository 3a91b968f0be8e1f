use std::collections::HashMap;
use validator::ValidationErrors;

/// Flatten `validator` output into the field/messages map used on the wire
/// and by the modal forms.
pub fn collect_field_errors(errors: &ValidationErrors) -> HashMap<String, Vec<String>> {
    let mut collected = HashMap::new();
    for (field, field_errors) in errors.field_errors() {
        let messages = field_errors
            .iter()
            .map(|e| match &e.message {
                Some(message) => message.to_string(),
                None => e.code.to_string(),
            })
            .collect();
        collected.insert(field.to_string(), messages);
    }
    collected
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Debug, Validate)]
    struct Probe {
        #[validate(length(min = 1, message = "name is required"))]
        name: String,
        #[validate(email)]
        email: String,
    }

    #[test]
    fn test_collect_field_errors_prefers_messages() {
        let probe = Probe {
            name: String::new(),
            email: "not-an-email".to_string(),
        };
        let errors = probe.validate().unwrap_err();
        let collected = collect_field_errors(&errors);
        assert_eq!(collected["name"], vec!["name is required".to_string()]);
        // No custom message on the email check, fall back to the code
        assert_eq!(collected["email"], vec!["email".to_string()]);
    }
}
