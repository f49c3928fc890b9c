//! tagpack - a self-describing binary value encoding.
//!
//! Every value is written as a one-byte [`TypeId`] followed by its payload.
//! Integers and floats are little-endian, lengths and variable-width integers
//! are LEB128 varints, and arrays and maps state the tag of their elements
//! once. A top-level message is an envelope: the [`FORMAT_VERSION`] byte and a
//! single tagged value that must consume the whole input.
//!
//! # Example
//!
//! ```
//! use tagpack::{decode, encode, Value};
//!
//! let value = Value::from_iter([("id", Value::U32(7)), ("name", Value::from("disk"))]);
//! let bytes = encode(&value);
//! assert_eq!(&bytes[..3], [0x00, 0x23, 0x20]);
//! assert_eq!(decode(&bytes).unwrap(), value);
//! ```

pub mod cli;
mod constants;
pub mod container;
mod decoder;
mod encoder;
mod error;
mod json;
mod options;
pub mod rich;
mod util;
mod value;
pub mod varint;

pub use constants::{TypeId, FORMAT_VERSION};
pub use container::Framing;
pub use decoder::Decoder;
pub use encoder::Encoder;
pub use error::DecodeError;
pub use json::JsonConversionError;
pub use options::{DecoderOptions, EncoderOptions};
pub use util::{decode, decode_inline, decode_with_consumed, encode};
pub use value::{Map, Value};

pub use tagpack_buffers::{BufferError, Reader, Writer};
