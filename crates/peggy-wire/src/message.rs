use bytes::{BufMut, BytesMut};
use tracing::debug;

use crate::error::{BufferError, Result};
use crate::field::{read_tag, Tag, WireType};

/// Default maximum encoded message size: 16 MiB.
pub const DEFAULT_MAX_MESSAGE_SIZE: usize = 16 * 1024 * 1024;

/// Limits applied when decoding a top-level message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeConfig {
    /// Maximum input size in bytes. Default: 16 MiB.
    pub max_message_size: usize,
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self {
            max_message_size: DEFAULT_MAX_MESSAGE_SIZE,
        }
    }
}

/// A record that knows its own tag/length/value encoding.
///
/// Implementors describe their fields through [`Message::encoded_len`],
/// [`Message::encode_raw`] and [`Message::merge_field`]; framing, the decode
/// loop and size limits are shared.
pub trait Message: Default {
    /// Record name used in log events.
    const NAME: &'static str;

    /// Exact number of bytes [`Message::encode_raw`] writes.
    fn encoded_len(&self) -> usize;

    /// Append the encoded fields, without any outer framing.
    fn encode_raw<B: BufMut>(&self, dst: &mut B);

    /// Decode the value of one field whose tag has already been read.
    ///
    /// `offset` points just past the tag. Returns the number of bytes the
    /// value occupied. Unknown field numbers must be skipped, not rejected.
    fn merge_field(&mut self, tag: Tag, buf: &[u8], offset: usize) -> Result<usize>;

    /// Append the encoding to `dst`, reserving exactly the space it needs.
    fn encode(&self, dst: &mut BytesMut) {
        dst.reserve(self.encoded_len());
        self.encode_raw(dst);
    }

    fn encode_to_vec(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.encoded_len());
        self.encode_raw(&mut out);
        out
    }

    /// Decode a complete message with the default [`DecodeConfig`].
    ///
    /// Inputs over [`DEFAULT_MAX_MESSAGE_SIZE`] (16 MiB) fail with
    /// [`BufferError::MessageTooLarge`] even when well formed; use
    /// [`Message::decode_with_config`] to accept larger records.
    fn decode(buf: &[u8]) -> Result<Self> {
        Self::decode_with_config(buf, &DecodeConfig::default())
    }

    fn decode_with_config(buf: &[u8], config: &DecodeConfig) -> Result<Self> {
        if buf.len() > config.max_message_size {
            return Err(BufferError::MessageTooLarge {
                size: buf.len(),
                max: config.max_message_size,
            });
        }

        decode_fields(buf).inspect_err(|err| {
            debug!(record = Self::NAME, error = %err, "failed decoding record");
        })
    }
}

/// Run the tag/value loop over `buf` until it is exhausted.
///
/// Fields never seen keep their default value; a field seen twice keeps the
/// last value.
pub(crate) fn decode_fields<M: Message>(buf: &[u8]) -> Result<M> {
    let mut message = M::default();
    let mut offset = 0;

    while offset < buf.len() {
        let (tag, consumed) = read_tag(buf, offset)?;
        if tag.wire_type == WireType::EndGroup {
            return Err(BufferError::MalformedWireType {
                wire_type: WireType::EndGroup as u8,
                offset,
            });
        }
        offset += consumed;
        offset += message.merge_field(tag, buf, offset)?;
    }

    Ok(message)
}
