//! Protocol module - envelopes and payload encoding.
//!
//! - [`ProtoRequest`] / [`ProtoResponse`] and their validation
//! - [`encode`] / [`decode`] between codec bytes and envelope text

mod encoding;
mod envelope;

pub use encoding::{decode, encode};
pub use envelope::{fields, validate_request, validate_response, ProtoRequest, ProtoResponse};
