//! Request and response envelopes.
//!
//! Envelopes travel over the transport as JSON values:
//!
//! ```text
//! request:  { "serviceNameFq": "foo.bar.Greeter", "methodName": "Greet", "payload": "<base64>" }
//! response: { "payload": "<base64>" }   or   { "error": "<message>" }
//! ```
//!
//! Anything received from a transport is untrusted, so inbound values go
//! through [`validate_request`] / [`validate_response`], which check the
//! shape field by field and name the first offending field.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{EnvelopeError, EnvelopeKind};

/// Field names on the wire.
pub mod fields {
    pub const SERVICE_NAME_FQ: &str = "serviceNameFq";
    pub const METHOD_NAME: &str = "methodName";
    pub const PAYLOAD: &str = "payload";
    pub const ERROR: &str = "error";
}

/// An RPC request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtoRequest {
    /// Fully-qualified name of the service to call.
    pub service_name_fq: String,
    /// Unqualified name of the method to call.
    pub method_name: String,
    /// Encoded request message, possibly empty.
    pub payload: String,
}

impl ProtoRequest {
    /// The JSON value sent over the transport.
    pub fn to_value(&self) -> Value {
        let mut object = Map::with_capacity(3);
        object.insert(fields::SERVICE_NAME_FQ.to_string(), self.service_name_fq.clone().into());
        object.insert(fields::METHOD_NAME.to_string(), self.method_name.clone().into());
        object.insert(fields::PAYLOAD.to_string(), self.payload.clone().into());
        Value::Object(object)
    }
}

/// An RPC response: either an encoded message or an error message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProtoResponse {
    /// The call succeeded; holds the encoded response message.
    Payload(String),
    /// The call failed; holds a human-readable description.
    Error(String),
}

impl ProtoResponse {
    /// The JSON value sent over the transport.
    pub fn to_value(&self) -> Value {
        let (field, text) = match self {
            ProtoResponse::Payload(payload) => (fields::PAYLOAD, payload),
            ProtoResponse::Error(error) => (fields::ERROR, error),
        };
        let mut object = Map::with_capacity(1);
        object.insert(field.to_string(), text.clone().into());
        Value::Object(object)
    }
}

/// Validate an inbound value as a [`ProtoRequest`].
///
/// `serviceNameFq` and `methodName` must be non-empty strings, `payload` must
/// be a string (empty is allowed).
pub fn validate_request(value: &Value) -> Result<ProtoRequest, EnvelopeError> {
    let kind = EnvelopeKind::Request;
    let object = as_object(value, kind)?;

    let service_name_fq = non_empty_field(object, value, kind, fields::SERVICE_NAME_FQ)?;
    let method_name = non_empty_field(object, value, kind, fields::METHOD_NAME)?;
    let payload = string_field(object, value, kind, fields::PAYLOAD)?
        .ok_or_else(|| missing(value, kind, fields::PAYLOAD))?;

    Ok(ProtoRequest {
        service_name_fq: service_name_fq.to_string(),
        method_name: method_name.to_string(),
        payload: payload.to_string(),
    })
}

/// Validate a reply value as a [`ProtoResponse`].
///
/// A reply carrying both `error` and `payload` resolves to the error. An
/// empty `error` counts as absent.
pub fn validate_response(value: &Value) -> Result<ProtoResponse, EnvelopeError> {
    let kind = EnvelopeKind::Response;
    let object = as_object(value, kind)?;

    let payload = string_field(object, value, kind, fields::PAYLOAD)?;
    let error = string_field(object, value, kind, fields::ERROR)?.filter(|e| !e.is_empty());

    match (error, payload) {
        (Some(error), _) => Ok(ProtoResponse::Error(error.to_string())),
        (None, Some(payload)) => Ok(ProtoResponse::Payload(payload.to_string())),
        (None, None) => Err(EnvelopeError::MissingOutcome {
            kind,
            value: stringify(value),
        }),
    }
}

fn as_object(value: &Value, kind: EnvelopeKind) -> Result<&Map<String, Value>, EnvelopeError> {
    match value {
        Value::Object(object) => Ok(object),
        Value::Null => Err(EnvelopeError::Null { kind }),
        other => Err(EnvelopeError::NotAnObject {
            kind,
            value: stringify(other),
        }),
    }
}

/// A string field, `None` when absent or `null`.
fn string_field<'a>(
    object: &'a Map<String, Value>,
    value: &Value,
    kind: EnvelopeKind,
    field: &'static str,
) -> Result<Option<&'a str>, EnvelopeError> {
    match object.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(_) => Err(EnvelopeError::NotAString {
            kind,
            field,
            value: stringify(value),
        }),
    }
}

fn non_empty_field<'a>(
    object: &'a Map<String, Value>,
    value: &Value,
    kind: EnvelopeKind,
    field: &'static str,
) -> Result<&'a str, EnvelopeError> {
    match string_field(object, value, kind, field)? {
        None => Err(missing(value, kind, field)),
        Some("") => Err(EnvelopeError::EmptyField {
            kind,
            field,
            value: stringify(value),
        }),
        Some(s) => Ok(s),
    }
}

fn missing(value: &Value, kind: EnvelopeKind, field: &'static str) -> EnvelopeError {
    EnvelopeError::MissingField {
        kind,
        field,
        value: stringify(value),
    }
}

fn stringify(value: &Value) -> String {
    format!("{:#}", value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request() -> Value {
        json!({
            "serviceNameFq": "foo.bar.Greeter",
            "methodName": "Greet",
            "payload": "RGF2ZQ==",
        })
    }

    #[test]
    fn test_request_to_value_field_names() {
        let req = ProtoRequest {
            service_name_fq: "foo.bar.Greeter".to_string(),
            method_name: "Greet".to_string(),
            payload: String::new(),
        };
        let value = req.to_value();
        assert_eq!(value["serviceNameFq"], "foo.bar.Greeter");
        assert_eq!(value["methodName"], "Greet");
        assert_eq!(value["payload"], "");
        assert_eq!(validate_request(&value).unwrap(), req);
    }

    #[test]
    fn test_response_to_value_has_one_field() {
        let ok = ProtoResponse::Payload("AA==".to_string()).to_value();
        assert_eq!(ok, json!({ "payload": "AA==" }));

        let err = ProtoResponse::Error("boom".to_string()).to_value();
        assert_eq!(err, json!({ "error": "boom" }));
    }

    #[test]
    fn test_serde_matches_wire_shape() {
        let response = ProtoResponse::Error("boom".to_string());
        assert_eq!(serde_json::to_value(&response).unwrap(), response.to_value());

        let parsed: ProtoRequest = serde_json::from_value(request()).unwrap();
        assert_eq!(parsed.method_name, "Greet");
    }

    #[test]
    fn test_validate_request_ok() {
        let req = validate_request(&request()).unwrap();
        assert_eq!(req.service_name_fq, "foo.bar.Greeter");
        assert_eq!(req.method_name, "Greet");
        assert_eq!(req.payload, "RGF2ZQ==");
    }

    #[test]
    fn test_validate_request_not_an_object() {
        let err = validate_request(&json!("hello")).unwrap_err();
        assert!(matches!(err, EnvelopeError::NotAnObject { .. }));
        assert!(err.to_string().starts_with("Request is not an object"));

        let err = validate_request(&json!([1, 2])).unwrap_err();
        assert!(matches!(err, EnvelopeError::NotAnObject { .. }));
    }

    #[test]
    fn test_validate_request_null() {
        let err = validate_request(&Value::Null).unwrap_err();
        assert_eq!(err.to_string(), "Request is `null`.");
    }

    #[test]
    fn test_validate_request_missing_fields() {
        for field in ["serviceNameFq", "methodName", "payload"] {
            let mut value = request();
            value.as_object_mut().unwrap().remove(field);
            let err = validate_request(&value).unwrap_err();
            assert!(
                matches!(err, EnvelopeError::MissingField { field: f, .. } if f == field),
                "{field}: {err}"
            );
        }
    }

    #[test]
    fn test_validate_request_non_string_fields() {
        for field in ["serviceNameFq", "methodName", "payload"] {
            let mut value = request();
            value[field] = json!(1234);
            let err = validate_request(&value).unwrap_err();
            assert!(
                err.to_string()
                    .starts_with(&format!("Request `{field}` is not a string")),
                "{err}"
            );
        }
    }

    #[test]
    fn test_validate_request_empty_names() {
        let mut value = request();
        value["methodName"] = json!("");
        let err = validate_request(&value).unwrap_err();
        assert!(matches!(err, EnvelopeError::EmptyField { field: "methodName", .. }));
    }

    #[test]
    fn test_validate_request_empty_payload_is_allowed() {
        let mut value = request();
        value["payload"] = json!("");
        assert_eq!(validate_request(&value).unwrap().payload, "");
    }

    #[test]
    fn test_validate_response() {
        assert_eq!(
            validate_response(&json!({ "payload": "" })).unwrap(),
            ProtoResponse::Payload(String::new())
        );
        assert_eq!(
            validate_response(&json!({ "error": "I don't know you!" })).unwrap(),
            ProtoResponse::Error("I don't know you!".to_string())
        );
    }

    #[test]
    fn test_validate_response_prefers_error() {
        let value = json!({ "payload": "AA==", "error": "boom" });
        assert!(matches!(
            validate_response(&value).unwrap(),
            ProtoResponse::Error(_)
        ));
    }

    #[test]
    fn test_validate_response_empty_error_is_absent() {
        let value = json!({ "payload": "AA==", "error": "" });
        assert_eq!(
            validate_response(&value).unwrap(),
            ProtoResponse::Payload("AA==".to_string())
        );

        let err = validate_response(&json!({ "error": "" })).unwrap_err();
        assert!(matches!(err, EnvelopeError::MissingOutcome { .. }));
    }

    #[test]
    fn test_validate_response_malformed() {
        let err = validate_response(&json!(42)).unwrap_err();
        assert!(err.to_string().starts_with("Response is not an object"));

        let err = validate_response(&Value::Null).unwrap_err();
        assert_eq!(err.to_string(), "Response is `null`.");

        let err = validate_response(&json!({})).unwrap_err();
        assert!(err
            .to_string()
            .starts_with("Response does not contain `payload` or `error`"));

        let err = validate_response(&json!({ "payload": null, "error": null })).unwrap_err();
        assert!(matches!(err, EnvelopeError::MissingOutcome { .. }));

        let err = validate_response(&json!({ "payload": [1] })).unwrap_err();
        assert!(err.to_string().starts_with("Response `payload` is not a string"));

        let err = validate_response(&json!({ "error": 1234 })).unwrap_err();
        assert!(err.to_string().starts_with("Response `error` is not a string"));
    }
}
