use std::borrow::Cow;

use rmcp::ErrorData;
use rmcp::model::ErrorCode;
use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::Value;
use social_core::control::ControlError;
use tracing::error;

pub(crate) fn mcp_err(code: ErrorCode, message: impl Into<Cow<'static, str>>) -> ErrorData {
    ErrorData {
        code,
        message: message.into(),
        data: None,
    }
}

/// Maps control-plane failures onto MCP error codes.
pub(crate) fn map_err(err: ControlError) -> ErrorData {
    match err {
        ControlError::Validation(message) => mcp_err(ErrorCode::INVALID_PARAMS, message),
        ControlError::NotFound(message) => mcp_err(ErrorCode::RESOURCE_NOT_FOUND, message),
        ControlError::Store(err) => {
            error!("storage failure: {err}");
            mcp_err(ErrorCode::INTERNAL_ERROR, format!("storage error: {err}"))
        }
    }
}

/// Accepts a JSON number or a numeric string. Null and blank strings read as
/// absent.
pub(crate) fn lenient_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(number)) => number
            .as_u64()
            .and_then(|value| u32::try_from(value).ok())
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("expected a whole number, got {number}"))),
        Some(Value::String(text)) if text.trim().is_empty() => Ok(None),
        Some(Value::String(text)) => text
            .trim()
            .parse::<u32>()
            .map(Some)
            .map_err(|_| de::Error::custom(format!("expected a whole number, got '{text}'"))),
        Some(other) => Err(de::Error::custom(format!("expected a whole number, got {other}"))),
    }
}
