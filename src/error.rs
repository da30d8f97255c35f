//! Error types for bxrpc.
//!
//! Generation-time failures are [`CodegenError`]s and abort the whole pass.
//! Serving-time failures never escape the dispatcher: they become the `error`
//! string of a response envelope via [`DispatchError`]. Everything that can go
//! wrong at a call site surfaces as an [`RpcError`].

use std::fmt;

use thiserror::Error;

/// Which of a method's two message types is being resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeRole {
    /// The request type.
    Input,
    /// The response type.
    Output,
}

impl fmt::Display for TypeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRole::Input => f.write_str("input"),
            TypeRole::Output => f.write_str("output"),
        }
    }
}

/// Errors raised while generating code from a descriptor model.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// A service in the file has no name.
    #[error("{file}: Service has no name.")]
    UnnamedService { file: String },

    /// A method in a service has no name.
    #[error("Method in service `{service}` has no name!")]
    UnnamedMethod { service: String },

    /// A method is missing its request or response type.
    #[error("Method `{method}` is missing an {role} type!")]
    MissingType { method: String, role: TypeRole },

    /// The generation request pairs file names and descriptors by index.
    #[error(
        "Count of `file_to_generate` ({files}) should match count of `proto_file` ({descriptors})."
    )]
    FileCountMismatch { files: usize, descriptors: usize },

    /// The plugin parameter string could not be parsed.
    #[error("Invalid generator parameter: {0}")]
    InvalidParameter(String),

    /// Malformed `CodeGeneratorRequest`.
    #[error("Failed to decode generation request: {0}")]
    Decode(#[from] prost::DecodeError),

    /// I/O error while reading the request or writing the response.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure raised by a message codec or by the payload text encoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct CodecError {
    message: String,
}

impl CodecError {
    /// Create a codec error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The underlying failure message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<prost::DecodeError> for CodecError {
    fn from(err: prost::DecodeError) -> Self {
        Self::new(err.to_string())
    }
}

impl From<prost::EncodeError> for CodecError {
    fn from(err: prost::EncodeError) -> Self {
        Self::new(err.to_string())
    }
}

impl From<rmp_serde::encode::Error> for CodecError {
    fn from(err: rmp_serde::encode::Error) -> Self {
        Self::new(format!("MsgPack encode error: {err}"))
    }
}

impl From<rmp_serde::decode::Error> for CodecError {
    fn from(err: rmp_serde::decode::Error) -> Self {
        Self::new(format!("MsgPack decode error: {err}"))
    }
}

impl From<base64::DecodeError> for CodecError {
    fn from(err: base64::DecodeError) -> Self {
        Self::new(format!("Invalid base64 payload: {err}"))
    }
}

/// Which envelope a validation error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeKind {
    Request,
    Response,
}

impl fmt::Display for EnvelopeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnvelopeKind::Request => f.write_str("Request"),
            EnvelopeKind::Response => f.write_str("Response"),
        }
    }
}

/// A received envelope does not have the expected shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvelopeError {
    #[error("{kind} is `null`.")]
    Null { kind: EnvelopeKind },

    #[error("{kind} is not an object: {value}")]
    NotAnObject { kind: EnvelopeKind, value: String },

    #[error("{kind} is missing `{field}`: {value}")]
    MissingField {
        kind: EnvelopeKind,
        field: &'static str,
        value: String,
    },

    #[error("{kind} `{field}` is not a string: {value}")]
    NotAString {
        kind: EnvelopeKind,
        field: &'static str,
        value: String,
    },

    #[error("{kind} `{field}` is empty: {value}")]
    EmptyField {
        kind: EnvelopeKind,
        field: &'static str,
        value: String,
    },

    /// A response carrying neither a payload nor an error.
    #[error("{kind} does not contain `payload` or `error`: {value}")]
    MissingOutcome { kind: EnvelopeKind, value: String },
}

/// Failure of one stage of the server-side dispatch state machine.
///
/// The display text is what the caller receives in the `error` field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// Validating: the inbound value is not a well-formed request.
    #[error(transparent)]
    Envelope(#[from] EnvelopeError),

    /// Routing: the request targets another service.
    #[error("Unknown service \"{requested}\", this endpoint serves \"{expected}\".")]
    UnknownService { requested: String, expected: String },

    /// Routing: the service has no such method.
    #[error("Service \"{service}\" has no method \"{method}\". Valid methods are: {valid}.")]
    UnknownMethod {
        service: String,
        method: String,
        valid: String,
    },

    /// Decoding: the payload is not valid encoded text or not a valid request.
    #[error("Failed to deserialize request:\n{0}")]
    Deserialize(CodecError),

    /// Invoking: the implementation failed. Carried through unchanged.
    #[error("{0}")]
    Implementation(String),

    /// Encoding: the implementation's result could not be serialized.
    #[error("Failed to serialize response:\n{0}")]
    Serialize(CodecError),
}

/// Main error type for runtime operations.
#[derive(Debug, Error)]
pub enum RpcError {
    /// The request could not be serialized by its codec.
    #[error("Failed to serialize request:\n{0}")]
    Serialize(CodecError),

    /// The reply does not have the shape of a response envelope.
    #[error(transparent)]
    Envelope(#[from] EnvelopeError),

    /// The server answered with an error. The message is the server's, verbatim.
    #[error("{0}")]
    Remote(String),

    /// The reply payload could not be decoded or deserialized.
    #[error("Failed to deserialize response:\n{0}")]
    Deserialize(CodecError),

    /// The transport dropped the reply callback without ever invoking it.
    #[error("Connection closed before a response was received")]
    ConnectionClosed,

    /// `serve` was given no implementation for a declared method.
    #[error("Method \"{0}\" not included on service.")]
    MissingImplementation(String),

    /// `serve` was given an implementation bound to different message types.
    #[error("Method \"{0}\" is not a function of the declared request and response types.")]
    IncompatibleImplementation(String),

    /// `serve` was called outside of a Tokio runtime.
    #[error("No Tokio runtime is available to run request handlers")]
    NoRuntime,
}

/// Result type alias using RpcError.
pub type Result<T> = std::result::Result<T, RpcError>;
