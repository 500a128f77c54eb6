use serde_json::Value;

pub type ApiResult<T> = Result<T, ApiError>;

/// Failure of a single catalog call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request never got a response (connection refused, reset, DNS...).
    #[error("network error: {0}")]
    Network(String),
    /// The service answered with a non-2xx status; carries its `detail`.
    #[error("API error ({0}): {1}")]
    Api(u16, String),
    /// The response body did not decode into the expected shape.
    #[error("parse error: {0}")]
    Parse(String),
}

impl ApiError {
    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::Api(400, detail.into())
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::Api(404, detail.into())
    }

    /// Build from an error response, extracting the service's `detail` field.
    ///
    /// `detail` is usually a string; request validation failures send a list
    /// of `{ "msg": ... }` objects instead, which get joined.
    pub fn from_response(status: u16, body: &str) -> Self {
        let detail = match serde_json::from_str::<Value>(body) {
            Ok(json) => match json.get("detail") {
                Some(Value::String(s)) => s.clone(),
                Some(Value::Array(entries)) => entries
                    .iter()
                    .filter_map(|e| e.get("msg").and_then(Value::as_str))
                    .collect::<Vec<_>>()
                    .join("; "),
                Some(other) => other.to_string(),
                None => body.trim().to_string(),
            },
            Err(_) => body.trim().to_string(),
        };

        if detail.is_empty() {
            Self::Api(status, format!("request failed with status {status}"))
        } else {
            Self::Api(status, detail)
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api(status, _) => Some(*status),
            _ => None,
        }
    }

    /// The message worth showing a user: the backend detail when there is one,
    /// otherwise the error itself.
    pub fn detail(&self) -> String {
        match self {
            Self::Api(_, detail) => detail.clone(),
            other => other.to_string(),
        }
    }
}
