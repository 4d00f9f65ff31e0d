// ============================================================================
// TOKEN - Lectura de claims del JWT (sin verificar firma)
// ============================================================================
// El cliente solo necesita `sub`, los roles y `exp` para decidir la vista y
// detectar caducidad. La firma la valida el backend en cada request.
// ============================================================================

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{DateTime, Utc};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenClaims {
    pub subject: Option<String>,
    pub roles: Vec<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

/// Decodificar el payload de un JWT. `None` si el token no tiene forma de JWT.
pub fn decode_claims(token: &str) -> Option<TokenClaims> {
    let mut parts = token.split('.');
    let (_header, payload) = (parts.next()?, parts.next()?);
    parts.next()?;

    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
    let claims: Value = serde_json::from_slice(&bytes).ok()?;
    let claims = claims.as_object()?;

    let subject = claims.get("sub").and_then(Value::as_str).map(str::to_string);
    let roles = claims
        .get("roles")
        .or_else(|| claims.get("authorities"))
        .map(roles_from_value)
        .unwrap_or_default();
    let expires_at = claims
        .get("exp")
        .and_then(Value::as_i64)
        .and_then(|exp| DateTime::from_timestamp(exp, 0));

    Some(TokenClaims {
        subject,
        roles,
        expires_at,
    })
}

// Spring emite los roles como array de strings, array de `{authority}` o
// string separado por comas según la configuración.
fn roles_from_value(value: &Value) -> Vec<String> {
    match value {
        Value::String(joined) => joined
            .split(',')
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(str::to_string)
            .collect(),
        Value::Array(items) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(role) => Some(role.clone()),
                Value::Object(obj) => obj
                    .get("authority")
                    .and_then(Value::as_str)
                    .map(str::to_string),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
pub(crate) fn make_token(payload: &serde_json::Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let body = URL_SAFE_NO_PAD.encode(payload.to_string());
    format!("{}.{}.signature", header, body)
}
