//! Protobuf codec using `prost`.
//!
//! This is the codec generated descriptors use by default. A message with
//! every field at its default value encodes to zero bytes, and zero bytes
//! decode to the default message.
//!
//! # Example
//!
//! ```
//! use bxrpc::codec::ProstCodec;
//!
//! let encoded = ProstCodec::serialize(&"hello".to_string()).unwrap();
//! let decoded: String = ProstCodec::deserialize(&encoded).unwrap();
//! assert_eq!(decoded, "hello");
//! ```

use prost::Message;

use crate::error::CodecError;

/// Protobuf codec for `prost` messages.
pub struct ProstCodec;

impl ProstCodec {
    /// Encode a message to its protobuf binary form.
    #[inline]
    pub fn serialize<T: Message>(message: &T) -> Result<Vec<u8>, CodecError> {
        Ok(message.encode_to_vec())
    }

    /// Decode a message from its protobuf binary form.
    #[inline]
    pub fn deserialize<T: Message + Default>(bytes: &[u8]) -> Result<T, CodecError> {
        Ok(T::decode(bytes)?)
    }
}
