// Wire envelope types
//
// Every endpoint wraps its payload in `{ code, msg, data }`. Failed requests
// answer with a non-2xx status and a body carrying an `error` message.

use serde::Deserialize;

/// Standard response envelope.
///
/// ```json
/// { "code": 0, "msg": "ok", "data": { ... } }
/// ```
///
/// Some endpoints (DELETE in particular) omit `code` and `msg`; both default.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub msg: String,
    pub data: T,
}

/// Body of a failed (non-2xx) response.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}
