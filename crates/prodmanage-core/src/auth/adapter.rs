//! Maps loosely-shaped backend login payloads to a strict session record.
//!
//! Backends disagree on field names: the token may arrive as `token`,
//! `accessToken` or `jwt`; the user as `user`, `data` or the top-level object;
//! the id as `_id` or `id`; the display name as `fullName` or `name`.
//! This is the only place that knows about those variants.

use prodmanage_types::SessionUser;
use serde_json::Value;

const TOKEN_KEYS: [&str; 3] = ["token", "accessToken", "jwt"];
const USER_KEYS: [&str; 2] = ["user", "data"];

/// Extracts `(token, user)` from a login response body.
///
/// Returns `None` when no token is present or the user record is not an
/// object. Missing user fields are left empty.
pub fn session_from_login_response(body: &Value) -> Option<(String, SessionUser)> {
    let token = TOKEN_KEYS
        .iter()
        .find_map(|key| non_empty_str(body.get(key)))?;

    let user_info = USER_KEYS
        .iter()
        .find_map(|key| body.get(key).filter(|v| is_truthy(v)))
        .unwrap_or(body);

    let user = session_user_from(user_info)?;
    Some((token.to_string(), user))
}

/// Builds a [`SessionUser`] from a backend user object.
///
/// The display name falls back to the email; a missing id or email is empty.
pub fn session_user_from(info: &Value) -> Option<SessionUser> {
    let info = info.as_object()?;

    let id = ["_id", "id"]
        .iter()
        .find_map(|key| id_string(info.get(*key)))
        .unwrap_or_default();
    let email = non_empty_str(info.get("email"))
        .unwrap_or_default()
        .to_string();

    let full_name = ["fullName", "name"]
        .iter()
        .find_map(|key| non_empty_str(info.get(*key)))
        .map(str::to_string);
    let name = full_name.clone().unwrap_or_else(|| email.clone());

    Some(SessionUser {
        id,
        name,
        email,
        full_name,
    })
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|s| !s.is_empty())
}

fn id_string(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::Array(_) | Value::Object(_) => true,
    }
}
