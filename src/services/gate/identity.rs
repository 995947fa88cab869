//! User id lookup over the identity service's JSON reply.
use serde_json::Value;

use crate::error::GateError;
use crate::services::gate::types::Identity;

/// Candidate field names, highest precedence first.
pub const USER_ID_FIELDS: [&str; 4] = ["userId", "UserId", "id", "ID"];

/// Parse a 200 reply body. An empty body reads as `null`.
pub fn parse_body(body: &str) -> Result<Value, GateError> {
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }

    serde_json::from_str(body).map_err(|err| {
        tracing::warn!(error = %err, "identity service returned non-JSON body");
        GateError::MalformedUpstreamBody
    })
}

/// First usable candidate field, rendered as a string.
///
/// Usable means a non-empty string or a non-zero number; anything else falls
/// through to the next candidate.
pub fn find_user_id(data: &Value) -> Option<String> {
    let object = data.as_object()?;

    USER_ID_FIELDS
        .iter()
        .filter_map(|name| object.get(*name))
        .find_map(usable_id)
}

fn usable_id(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        _ => None,
    }
}

/// Parse and look up in one go.
pub fn extract_identity(body: &str) -> Result<Option<Identity>, GateError> {
    let data = parse_body(body)?;
    find_user_id(&data).map(Identity::new).transpose()
}
