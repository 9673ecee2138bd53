//! Tag/length/value wire codec for peggy bridge records.
//!
//! Records are encoded as a flat sequence of fields, each introduced by a
//! varint tag `(field_number << 3) | wire_type`:
//! - wire type 0 carries a varint
//! - wire type 2 carries a varint length followed by that many bytes
//!   (strings, byte arrays, nested records)
//!
//! Decoding is bounds-checked end to end and never panics on hostile input.
//! Unknown fields (including legacy groups) are skipped.

pub mod error;
pub mod field;
pub mod message;
pub mod varint;

pub use error::{BufferError, Result};
pub use field::{
    decode_bytes, decode_nested, decode_string, encode_field, field_len, read_length_delimited,
    read_tag, skip_field, skip_unknown, write_length_delimited, write_tag, LengthDelimited,
    Nested, Tag, WireType, MAX_FIELD_NUMBER,
};
pub use message::{DecodeConfig, Message, DEFAULT_MAX_MESSAGE_SIZE};
pub use varint::{decode_varint, encode_varint, encoded_len_varint, MAX_VARINT_LEN};
