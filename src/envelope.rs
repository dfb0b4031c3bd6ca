//! The `{error, data}` response envelope
//!
//! The backend reports domain success or failure inside the body,
//! independently of the HTTP status. A null `error` means success and `data`
//! is the payload; otherwise `data` is a message meant for the user.

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::error::{ClientError, ClientResult};

/// How bodies without envelope keys are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnvelopeMode {
    /// A body without `error`/`data` is a failure
    #[default]
    Strict,
    /// A body without `error`/`data` is wrapped as `{error: null, data: body}`
    Compat,
}

/// Response envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub error: Option<Value>,
    #[serde(default)]
    pub data: Value,
}

/// Outcome of reading a 2xx body
#[derive(Debug, Clone, PartialEq)]
pub enum Normalized {
    /// Envelope with a null `error`
    Success(Envelope),
    /// Envelope with a non-null `error`, plus the message to show
    Failure { envelope: Envelope, message: String },
    /// Body had no envelope keys and the mode is strict
    Malformed(Value),
}

impl Envelope {
    /// Successful envelope around `data`
    pub fn success(data: Value) -> Self {
        Self { error: None, data }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.error, None | Some(Value::Null))
    }

    /// The `error` field as a short code, if it is a string
    pub fn error_code(&self) -> Option<String> {
        match &self.error {
            Some(Value::String(code)) => Some(code.clone()),
            Some(Value::Null) | None => None,
            Some(other) => Some(other.to_string()),
        }
    }

    /// Message for a failed envelope: `data` when present, else `error`.
    ///
    /// An `error` such as `false` carries no message of its own and is shown
    /// as its JSON text.
    pub fn failure_message(&self) -> String {
        render_message(&self.data)
            .or_else(|| self.error.as_ref().and_then(render_message))
            .or_else(|| self.error_code())
            .unwrap_or_default()
    }

    /// Decode `data` into a typed record
    pub fn into_data<T: DeserializeOwned>(self) -> ClientResult<T> {
        serde_json::from_value(self.data).map_err(|e| ClientError::Decode(e.to_string()))
    }
}

/// True when the body carries an `error` or `data` key
pub fn is_envelope(body: &Value) -> bool {
    body.as_object()
        .map(|map| map.contains_key("error") || map.contains_key("data"))
        .unwrap_or(false)
}

/// Classify a 2xx body according to `mode`
pub fn normalize(body: Value, mode: EnvelopeMode) -> Normalized {
    let mut map = match body {
        Value::Object(map) if map.contains_key("error") || map.contains_key("data") => map,
        other => {
            return match mode {
                EnvelopeMode::Compat => Normalized::Success(Envelope::success(other)),
                EnvelopeMode::Strict => Normalized::Malformed(other),
            };
        }
    };
    let envelope = Envelope {
        error: map.remove("error").filter(|e| !e.is_null()),
        data: map.remove("data").unwrap_or(Value::Null),
    };

    if envelope.is_success() {
        Normalized::Success(envelope)
    } else {
        let message = envelope.failure_message();
        Normalized::Failure { envelope, message }
    }
}

/// Render a message value for display.
///
/// Null, empty strings and `false` carry no message. Strings are used as
/// they are; anything else is rendered as compact JSON.
pub fn render_message(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
