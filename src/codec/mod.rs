//! Codec module - serialization/deserialization of RPC messages.
//!
//! A method descriptor carries one serialize/deserialize pair for its request
//! type and one for its response type. This module provides ready-made pairs:
//!
//! - [`ProstCodec`] - protobuf via `prost` (used by generated descriptors)
//! - [`MsgPackCodec`] - MessagePack via `rmp-serde` for serde types
//!
//! Codecs are marker structs with generic associated functions rather than
//! trait objects, so `ProstCodec::serialize::<MyRequest>` coerces to a plain
//! function pointer usable in a `static` descriptor.

mod msgpack;
mod protobuf;

pub use self::msgpack::MsgPackCodec;
pub use self::protobuf::ProstCodec;

use crate::error::CodecError;

/// Serializes a message of type `T` to bytes.
pub type SerializeFn<T> = fn(&T) -> Result<Vec<u8>, CodecError>;

/// Deserializes a message of type `T` from bytes.
pub type DeserializeFn<T> = fn(&[u8]) -> Result<T, CodecError>;
