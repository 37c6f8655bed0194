//! Best-effort parsing of the model's reply.
//!
//! The reply is a contract with the model, not an enforced schema: a reply
//! that parses as JSON is returned unaltered, anything else is passed
//! through verbatim under `raw_text`.

use serde_json::{json, Value};

/// Parse a model reply into the JSON value returned to the caller.
pub fn parse_model_output(reply: &str) -> Value {
    let candidate = strip_code_fence(reply);
    match serde_json::from_str::<Value>(candidate) {
        Ok(value) => value,
        Err(_) => json!({ "raw_text": reply }),
    }
}

/// The prompt forbids markdown, but models occasionally fence their JSON
/// anyway. Unwrap a single ```...``` block; leave anything else alone.
fn strip_code_fence(reply: &str) -> &str {
    let trimmed = reply.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(inner) = rest.strip_suffix("```") else {
        return trimmed;
    };
    // Drop an optional language tag on the opening fence line.
    match inner.split_once('\n') {
        Some((first_line, body)) if !first_line.trim().is_empty() => body.trim(),
        _ => inner.trim(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn valid_json_reply_returned_unaltered() {
        let reply = r#"{"status":"success","data":{"doc_number":"4200112633/2025"}}"#;
        let value = parse_model_output(reply);
        assert_eq!(
            value,
            json!({"status": "success", "data": {"doc_number": "4200112633/2025"}})
        );
    }

    #[test]
    fn invalid_reply_passed_through_verbatim() {
        let reply = "Sorry, I could not find a payment advice in this document.";
        let value = parse_model_output(reply);
        assert_eq!(value, json!({ "raw_text": reply }));
    }

    #[test]
    fn fenced_json_is_unwrapped() {
        let reply = "```json\n{\"status\": \"success\"}\n```";
        assert_eq!(parse_model_output(reply), json!({"status": "success"}));

        let bare = "```\n{\"status\": \"success\"}\n```";
        assert_eq!(parse_model_output(bare), json!({"status": "success"}));
    }

    #[test]
    fn partial_fence_falls_back_to_raw_text() {
        let reply = "```json\n{\"status\": \"success\"}";
        let value = parse_model_output(reply);
        assert_eq!(value, json!({ "raw_text": reply }));
    }

    #[test]
    fn whitespace_padded_json_still_parses() {
        let value = parse_model_output("  \n {\"success\": true} \n");
        assert_eq!(value, json!({"success": true}));
    }
}
