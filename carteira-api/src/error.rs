//! Failures surfaced by the HTTP layer. The aggregation core has none.

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Non-2xx answer from the server
    #[error("{message}")]
    Http { status: u16, message: String },
    #[error("Erro de conexão com o servidor")]
    Connection(#[source] reqwest::Error),
    #[error("resposta inesperada do servidor: {0}")]
    Decode(#[source] reqwest::Error),
    #[error("sessão não autenticada; faça login primeiro")]
    NotAuthenticated,
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True when the server refused the credentials or token.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401 | 403)) || matches!(self, ApiError::NotAuthenticated)
    }
}

/// Human message for an error response body.
///
/// Priority: first entry of `errors` (array of `{message}` or ASP.NET-style
/// `{field: [messages]}` map) > top-level `message` > `HTTP Error: <status>`.
pub fn error_message(status: u16, body: &Value) -> String {
    first_listed_error(body)
        .or_else(|| body.get("message").and_then(Value::as_str))
        .filter(|m| !m.trim().is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("HTTP Error: {status}"))
}

fn first_listed_error(body: &Value) -> Option<&str> {
    match body.get("errors")? {
        Value::Array(items) => items.first()?.get("message")?.as_str(),
        Value::Object(fields) => fields
            .values()
            .find_map(|v| v.as_array().and_then(|a| a.first()).and_then(Value::as_str)),
        _ => None,
    }
}
