//! MsgPack codec using `rmp-serde`.
//!
//! Structs are encoded with `to_vec_named` (struct-as-map), so messages stay
//! readable by peers that decode MsgPack into plain objects.
//!
//! # Example
//!
//! ```
//! use bxrpc::codec::MsgPackCodec;
//! use serde::{Serialize, Deserialize};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Message {
//!     id: u32,
//!     content: String,
//! }
//!
//! let msg = Message { id: 42, content: "hello".to_string() };
//! let encoded = MsgPackCodec::serialize(&msg).unwrap();
//! let decoded: Message = MsgPackCodec::deserialize(&encoded).unwrap();
//! assert_eq!(decoded, msg);
//! ```

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::CodecError;

/// MessagePack codec for serde types.
///
/// Both functions have the shapes of [`SerializeFn`](super::SerializeFn) and
/// [`DeserializeFn`](super::DeserializeFn), so they can be used directly in a
/// method descriptor.
pub struct MsgPackCodec;

impl MsgPackCodec {
    /// Encode a value to MsgPack bytes (struct-as-map).
    #[inline]
    pub fn serialize<T: Serialize>(value: &T) -> Result<Vec<u8>, CodecError> {
        Ok(rmp_serde::to_vec_named(value)?)
    }

    /// Decode MsgPack bytes to a value.
    #[inline]
    pub fn deserialize<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, CodecError> {
        Ok(rmp_serde::from_slice(bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{DeserializeFn, SerializeFn};
    use serde::Deserialize;

    #[derive(Serialize, Deserialize, PartialEq, Debug)]
    struct TestStruct {
        id: u32,
        name: String,
        active: bool,
    }

    #[test]
    fn test_encode_decode_struct() {
        let original = TestStruct {
            id: 42,
            name: "test".to_string(),
            active: true,
        };

        let encoded = MsgPackCodec::serialize(&original).unwrap();
        let decoded: TestStruct = MsgPackCodec::deserialize(&encoded).unwrap();

        assert_eq!(decoded, original);
    }

    #[test]
    fn test_encode_decode_nested() {
        #[derive(Serialize, Deserialize, PartialEq, Debug)]
        struct Inner {
            value: i32,
        }

        #[derive(Serialize, Deserialize, PartialEq, Debug)]
        struct Outer {
            inner: Inner,
            items: Vec<String>,
        }

        let original = Outer {
            inner: Inner { value: 999 },
            items: vec!["a".to_string(), "b".to_string()],
        };

        let encoded = MsgPackCodec::serialize(&original).unwrap();
        let decoded: Outer = MsgPackCodec::deserialize(&encoded).unwrap();

        assert_eq!(decoded, original);
    }

    #[test]
    fn test_structs_use_map_format() {
        let test = TestStruct {
            id: 1,
            name: "x".to_string(),
            active: false,
        };

        let encoded = MsgPackCodec::serialize(&test).unwrap();

        // fixmap is 0x8X, fixarray would be 0x9X
        assert_eq!(
            encoded[0] & 0xF0,
            0x80,
            "Expected map format (0x8X), got {:02X}",
            encoded[0]
        );
    }

    #[test]
    fn test_decode_error_on_invalid_data() {
        let invalid = b"not valid msgpack";
        let err = MsgPackCodec::deserialize::<TestStruct>(invalid).unwrap_err();
        assert!(err.message().starts_with("MsgPack decode error"));
    }

    #[test]
    fn test_usable_as_descriptor_functions() {
        let serialize: SerializeFn<TestStruct> = MsgPackCodec::serialize;
        let deserialize: DeserializeFn<TestStruct> = MsgPackCodec::deserialize;

        let original = TestStruct {
            id: 7,
            name: "fn".to_string(),
            active: true,
        };
        let decoded = deserialize(&serialize(&original).unwrap()).unwrap();
        assert_eq!(decoded, original);
    }
}
