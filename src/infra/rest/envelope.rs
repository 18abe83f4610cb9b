//! Response envelope decoding.
//!
//! The API wraps most payloads as `{success, statusCode, message, data}` and
//! adds `pagination` on list endpoints; a few endpoints answer with a bare
//! array or object. Both shapes become a [`Payload`] here so that nothing
//! above the transport looks at raw JSON again.

use mealdesk_api_types::{Page, Pagination};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::error::{ApiError, body_status_code};

/// Successfully decoded response body.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Payload {
    pub data: Value,
    pub message: Option<String>,
    pub pagination: Option<Pagination>,
}

impl Payload {
    pub fn new(data: Value) -> Self {
        Self {
            data,
            ..Self::default()
        }
    }

    /// Decode the data section into a typed value.
    pub fn into_data<T: DeserializeOwned>(self) -> Result<T, ApiError> {
        serde_json::from_value(self.data).map_err(|err| ApiError::decode(err.to_string()))
    }

    /// Decode a list response.
    ///
    /// Accepts a bare array, or an object holding the array under `items`
    /// (optionally with its own `pagination`).
    pub fn into_page<T: DeserializeOwned>(self) -> Result<Page<T>, ApiError> {
        let Payload {
            data, pagination, ..
        } = self;
        match data {
            Value::Array(_) => {
                let items = serde_json::from_value(data)
                    .map_err(|err| ApiError::decode(err.to_string()))?;
                Ok(Page::new(items, pagination))
            }
            Value::Object(mut map) => {
                let items = map
                    .remove("items")
                    .ok_or_else(|| ApiError::decode("list response has no items array"))?;
                let items = serde_json::from_value(items)
                    .map_err(|err| ApiError::decode(err.to_string()))?;
                let nested = map
                    .remove("pagination")
                    .map(serde_json::from_value::<Pagination>)
                    .transpose()
                    .map_err(|err| ApiError::decode(err.to_string()))?;
                Ok(Page::new(items, pagination.or(nested)))
            }
            Value::Null => Ok(Page::default()),
            other => Err(ApiError::decode(format!(
                "expected a list, found {}",
                value_kind(&other)
            ))),
        }
    }
}

/// Decode a 2xx response body.
pub fn decode_payload(body: &[u8]) -> Result<Payload, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Payload::default());
    }

    let value: Value =
        serde_json::from_slice(body).map_err(|err| ApiError::decode(err.to_string()))?;

    match value {
        Value::Object(map) if is_envelope(&map) => unwrap_envelope(map),
        other => Ok(Payload::new(other)),
    }
}

/// `success` alone marks an envelope (acknowledgements may omit `data`);
/// otherwise `data` must sit next to `statusCode` or `message`.
fn is_envelope(map: &Map<String, Value>) -> bool {
    map.get("success").is_some_and(Value::is_boolean)
        || (map.contains_key("data")
            && (map.contains_key("statusCode") || map.contains_key("message")))
}

fn unwrap_envelope(mut map: Map<String, Value>) -> Result<Payload, ApiError> {
    let message = map
        .get("message")
        .and_then(Value::as_str)
        .map(str::to_string);

    if map.get("success").and_then(Value::as_bool) == Some(false) {
        let code = body_status_code(&Value::Object(map.clone()));
        return Err(ApiError::Rejected {
            code,
            message: message.unwrap_or_else(|| "request was not successful".to_string()),
        });
    }

    let pagination = match map.remove("pagination") {
        Some(Value::Null) | None => None,
        Some(raw) => Some(
            serde_json::from_value(raw).map_err(|err| ApiError::decode(err.to_string()))?,
        ),
    };

    Ok(Payload {
        data: map.remove("data").unwrap_or(Value::Null),
        message,
        pagination,
    })
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Row {
        id: u32,
    }

    #[test]
    fn unwraps_standard_envelope() {
        let payload = decode_payload(
            br#"{"success":true,"statusCode":200,"message":"Fetched","data":{"id":7}}"#,
        )
        .expect("payload");
        assert_eq!(payload.message.as_deref(), Some("Fetched"));
        assert_eq!(payload.into_data::<Row>().expect("row"), Row { id: 7 });
    }

    #[test]
    fn bare_values_pass_through() {
        let payload = decode_payload(br#"[{"id":1},{"id":2}]"#).expect("payload");
        let page = payload.into_page::<Row>().expect("page");
        assert_eq!(page.len(), 2);
        assert!(page.pagination.is_none());
    }

    #[test]
    fn list_envelope_keeps_pagination() {
        let payload = decode_payload(
            br#"{"success":true,"data":[{"id":1}],"pagination":{"page":2,"limit":1,"total":3,"totalPages":3}}"#,
        )
        .expect("payload");
        let page = payload.into_page::<Row>().expect("page");
        assert_eq!(page.items, vec![Row { id: 1 }]);
        assert_eq!(page.pagination.map(|p| p.page), Some(2));
    }

    #[test]
    fn nested_items_object_is_accepted() {
        let payload = Payload::new(json!({
            "items": [{"id": 4}],
            "pagination": {"page": 1, "limit": 10, "total": 1, "totalPages": 1}
        }));
        let page = payload.into_page::<Row>().expect("page");
        assert_eq!(page.items[0].id, 4);
        assert_eq!(page.pagination.map(|p| p.total), Some(1));
    }

    #[test]
    fn unsuccessful_envelope_is_rejected_with_nested_code() {
        let err = decode_payload(
            br#"{"success":false,"message":"Not found","data":{"statusCode":404}}"#,
        )
        .expect_err("rejected");
        assert!(err.is_not_found());
        assert_eq!(err.user_message(), "Not found");
    }

    #[test]
    fn acknowledgement_without_data_is_an_envelope() {
        let payload =
            decode_payload(br#"{"success":true,"message":"Deleted"}"#).expect("payload");
        assert_eq!(payload.data, Value::Null);
        assert_eq!(payload.message.as_deref(), Some("Deleted"));
    }

    #[test]
    fn empty_body_is_null_data() {
        let payload = decode_payload(b"  ").expect("payload");
        assert_eq!(payload.data, Value::Null);
    }

    #[test]
    fn invalid_json_is_a_decode_error() {
        let err = decode_payload(b"{nope").expect_err("decode");
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn typed_decode_failure_is_reported() {
        let err = Payload::new(json!({"id": "x"}))
            .into_data::<Row>()
            .expect_err("decode");
        assert!(matches!(err, ApiError::Decode(_)));
    }
}
