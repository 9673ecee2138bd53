use std::fmt;

use bytes::BufMut;
use tracing::trace;

use crate::error::{BufferError, Result};
use crate::message::{decode_fields, Message};
use crate::varint::{decode_varint, encode_varint, encoded_len_varint};

/// Largest field number a tag may carry.
pub const MAX_FIELD_NUMBER: u32 = i32::MAX as u32;

/// The low three bits of a tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum WireType {
    Varint = 0,
    Fixed64 = 1,
    LengthDelimited = 2,
    StartGroup = 3,
    EndGroup = 4,
    Fixed32 = 5,
}

impl WireType {
    /// Interpret the low three bits of a raw tag.
    pub fn from_raw(raw: u8, offset: usize) -> Result<Self> {
        match raw {
            0 => Ok(WireType::Varint),
            1 => Ok(WireType::Fixed64),
            2 => Ok(WireType::LengthDelimited),
            3 => Ok(WireType::StartGroup),
            4 => Ok(WireType::EndGroup),
            5 => Ok(WireType::Fixed32),
            other => Err(BufferError::MalformedWireType {
                wire_type: other,
                offset,
            }),
        }
    }
}

impl fmt::Display for WireType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WireType::Varint => "varint",
            WireType::Fixed64 => "fixed64",
            WireType::LengthDelimited => "length-delimited",
            WireType::StartGroup => "start-group",
            WireType::EndGroup => "end-group",
            WireType::Fixed32 => "fixed32",
        };
        write!(f, "{} ({name})", *self as u8)
    }
}

/// A field key: `(field_number << 3) | wire_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tag {
    pub field_number: u32,
    pub wire_type: WireType,
}

impl Tag {
    pub const fn new(field_number: u32, wire_type: WireType) -> Self {
        Self {
            field_number,
            wire_type,
        }
    }

    /// The tag as it is written on the wire, before varint encoding.
    pub const fn to_raw(self) -> u64 {
        ((self.field_number as u64) << 3) | self.wire_type as u64
    }

    pub const fn encoded_len(self) -> usize {
        encoded_len_varint(self.to_raw())
    }
}

pub fn write_tag(tag: Tag, dst: &mut impl BufMut) {
    encode_varint(tag.to_raw(), dst);
}

/// Read a tag starting at `offset`.
///
/// Any wire type in `0..=5` is returned as-is; it is up to the caller to
/// reject [`WireType::EndGroup`] outside of a group.
pub fn read_tag(buf: &[u8], offset: usize) -> Result<(Tag, usize)> {
    let (raw, consumed) = decode_varint(buf, offset)?;
    let wire_type = WireType::from_raw((raw & 0x7) as u8, offset)?;
    let field_number = raw >> 3;
    if field_number == 0 || field_number > u64::from(MAX_FIELD_NUMBER) {
        return Err(BufferError::IllegalTag { tag: raw, offset });
    }
    Ok((Tag::new(field_number as u32, wire_type), consumed))
}

/// Write `tag`, the varint length of `payload`, then `payload`.
pub fn write_length_delimited(field_number: u32, payload: &[u8], dst: &mut impl BufMut) {
    write_tag(Tag::new(field_number, WireType::LengthDelimited), dst);
    encode_varint(payload.len() as u64, dst);
    dst.put_slice(payload);
}

/// Read a varint length at `offset` and borrow the payload that follows.
///
/// Returns the payload and the bytes consumed including the length prefix.
pub fn read_length_delimited(buf: &[u8], offset: usize) -> Result<(&[u8], usize)> {
    let (len, prefix) = decode_varint(buf, offset)?;
    if len > isize::MAX as u64 {
        return Err(BufferError::NegativeLength { offset });
    }
    let len = len as usize;
    let start = offset + prefix;
    let end = start
        .checked_add(len)
        .ok_or(BufferError::NegativeLength { offset })?;
    if end > buf.len() {
        return Err(BufferError::unexpected_end(start, len, buf.len()));
    }
    Ok((&buf[start..end], prefix + len))
}

/// Advance past the value of a field whose tag has already been read.
///
/// Groups are skipped as a unit: a start-group opens a nesting level and the
/// function only returns once the matching end-group closes it. Returns the
/// number of bytes skipped after `offset`.
pub fn skip_field(buf: &[u8], offset: usize, wire_type: WireType) -> Result<usize> {
    let mut pos = offset;
    let mut depth = 0usize;
    let mut wire_type = wire_type;

    loop {
        match wire_type {
            WireType::Varint => {
                let (_, consumed) = decode_varint(buf, pos)?;
                pos += consumed;
            }
            WireType::Fixed64 => pos = advance_fixed(buf, pos, 8)?,
            WireType::LengthDelimited => {
                let (_, consumed) = read_length_delimited(buf, pos)?;
                pos += consumed;
            }
            WireType::StartGroup => depth += 1,
            WireType::EndGroup => {
                if depth == 0 {
                    return Err(BufferError::UnexpectedEndOfGroup { offset: pos });
                }
                depth -= 1;
            }
            WireType::Fixed32 => pos = advance_fixed(buf, pos, 4)?,
        }

        if depth == 0 {
            return Ok(pos - offset);
        }

        let (tag, consumed) = read_tag(buf, pos)?;
        pos += consumed;
        wire_type = tag.wire_type;
    }
}

fn advance_fixed(buf: &[u8], pos: usize, width: usize) -> Result<usize> {
    match pos.checked_add(width) {
        Some(end) if end <= buf.len() => Ok(end),
        _ => Err(BufferError::unexpected_end(pos, width, buf.len())),
    }
}

/// A value carried in a length-delimited field.
///
/// Strings and byte arrays are left off the wire entirely when empty; nested
/// messages are always framed, even when they encode to zero bytes.
pub trait LengthDelimited {
    /// Size of the payload, excluding tag and length prefix.
    fn payload_len(&self) -> usize;

    fn write_payload<B: BufMut>(&self, dst: &mut B);

    fn omit_if_empty(&self) -> bool {
        true
    }
}

impl LengthDelimited for str {
    fn payload_len(&self) -> usize {
        self.len()
    }

    fn write_payload<B: BufMut>(&self, dst: &mut B) {
        dst.put_slice(self.as_bytes());
    }
}

impl LengthDelimited for [u8] {
    fn payload_len(&self) -> usize {
        self.len()
    }

    fn write_payload<B: BufMut>(&self, dst: &mut B) {
        dst.put_slice(self);
    }
}

/// Wraps a message so it can be written as a nested field.
#[derive(Debug, Clone, Copy)]
pub struct Nested<'a, M>(pub &'a M);

impl<M: Message> LengthDelimited for Nested<'_, M> {
    fn payload_len(&self) -> usize {
        self.0.encoded_len()
    }

    fn write_payload<B: BufMut>(&self, dst: &mut B) {
        self.0.encode_raw(dst);
    }

    fn omit_if_empty(&self) -> bool {
        false
    }
}

/// Bytes [`encode_field`] writes for `value`, zero if the field is omitted.
pub fn field_len<F: LengthDelimited + ?Sized>(field_number: u32, value: &F) -> usize {
    let len = value.payload_len();
    if len == 0 && value.omit_if_empty() {
        return 0;
    }
    Tag::new(field_number, WireType::LengthDelimited).encoded_len()
        + encoded_len_varint(len as u64)
        + len
}

/// Write `value` as a length-delimited field unless it is omitted when empty.
pub fn encode_field<F, B>(field_number: u32, value: &F, dst: &mut B)
where
    F: LengthDelimited + ?Sized,
    B: BufMut,
{
    let len = value.payload_len();
    if len == 0 && value.omit_if_empty() {
        return;
    }
    write_tag(Tag::new(field_number, WireType::LengthDelimited), dst);
    encode_varint(len as u64, dst);
    value.write_payload(dst);
}

fn expect_length_delimited(field: &'static str, tag: Tag) -> Result<()> {
    if tag.wire_type != WireType::LengthDelimited {
        return Err(BufferError::WrongWireType {
            field,
            expected: WireType::LengthDelimited,
            actual: tag.wire_type,
        });
    }
    Ok(())
}

/// Decode a UTF-8 string field whose tag has already been read.
pub fn decode_string(
    field: &'static str,
    tag: Tag,
    buf: &[u8],
    offset: usize,
) -> Result<(String, usize)> {
    expect_length_delimited(field, tag)?;
    let (payload, consumed) = read_length_delimited(buf, offset)?;
    let value = std::str::from_utf8(payload).map_err(|_| BufferError::InvalidUtf8 { field })?;
    Ok((value.to_owned(), consumed))
}

/// Decode a byte-array field whose tag has already been read.
pub fn decode_bytes(
    field: &'static str,
    tag: Tag,
    buf: &[u8],
    offset: usize,
) -> Result<(Vec<u8>, usize)> {
    expect_length_delimited(field, tag)?;
    let (payload, consumed) = read_length_delimited(buf, offset)?;
    Ok((payload.to_vec(), consumed))
}

/// Decode a nested message field whose tag has already been read.
///
/// The nested value is decoded fresh; a repeated occurrence replaces it.
/// Failures inside the payload come back wrapped in
/// [`BufferError::NestedField`] naming `field`.
pub fn decode_nested<M: Message>(
    field: &'static str,
    tag: Tag,
    buf: &[u8],
    offset: usize,
) -> Result<(M, usize)> {
    expect_length_delimited(field, tag)?;
    let (payload, consumed) = read_length_delimited(buf, offset)?;
    let value = decode_fields::<M>(payload).map_err(|err| BufferError::NestedField {
        field,
        offset: offset + consumed - payload.len(),
        source: Box::new(err),
    })?;
    Ok((value, consumed))
}

/// Skip a field number `record` does not know about.
pub fn skip_unknown(record: &'static str, tag: Tag, buf: &[u8], offset: usize) -> Result<usize> {
    let skipped = skip_field(buf, offset, tag.wire_type)?;
    trace!(
        record,
        field_number = tag.field_number,
        wire_type = %tag.wire_type,
        skipped,
        "skipped unknown field"
    );
    Ok(skipped)
}
