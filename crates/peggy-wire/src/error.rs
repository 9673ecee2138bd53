use crate::field::WireType;

/// Errors that can occur while encoding or decoding wire records.
///
/// Every variant is an ordinary input error: the caller should reject the
/// offending bytes. A failed decode never yields a partially filled record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BufferError {
    /// The buffer ended before a varint terminated or a field was complete.
    #[error("unexpected end of buffer at offset {offset} (needed {needed} bytes, {remaining} remaining)")]
    UnexpectedEndOfBuffer {
        offset: usize,
        needed: usize,
        remaining: usize,
    },

    /// A varint ran past 64 bits.
    #[error("integer overflow in varint at offset {offset}")]
    IntegerOverflow { offset: usize },

    /// A decoded length does not fit in a non-negative native size.
    #[error("negative length found while decoding at offset {offset}")]
    NegativeLength { offset: usize },

    /// The tag carries a field number outside `1..=i32::MAX`.
    #[error("illegal tag {tag} at offset {offset}")]
    IllegalTag { tag: u64, offset: usize },

    /// The tag carries a wire type this format cannot appear with.
    #[error("malformed wire type {wire_type} at offset {offset}")]
    MalformedWireType { wire_type: u8, offset: usize },

    /// An end-group marker appeared with no open group.
    #[error("unexpected end of group at offset {offset}")]
    UnexpectedEndOfGroup { offset: usize },

    /// A known field arrived with a different wire type than declared.
    #[error("wrong wire type {actual} for field {field} (expected {expected})")]
    WrongWireType {
        field: &'static str,
        expected: WireType,
        actual: WireType,
    },

    /// A string field is not valid UTF-8.
    #[error("field {field} is not valid UTF-8")]
    InvalidUtf8 { field: &'static str },

    /// A field decoded structurally but its value is not acceptable.
    #[error("invalid value for field {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    /// A nested record failed to decode.
    ///
    /// `offset` is where the nested payload starts in the outer buffer;
    /// offsets inside `source` are relative to that payload.
    #[error("invalid nested field {field} at offset {offset}: {source}")]
    NestedField {
        field: &'static str,
        offset: usize,
        source: Box<BufferError>,
    },

    /// The input is larger than the configured decode limit.
    #[error("message too large ({size} bytes, max {max})")]
    MessageTooLarge { size: usize, max: usize },
}

impl BufferError {
    pub(crate) fn unexpected_end(offset: usize, needed: usize, len: usize) -> Self {
        BufferError::UnexpectedEndOfBuffer {
            offset,
            needed,
            remaining: len.saturating_sub(offset),
        }
    }

    /// The error that started it all, looking through nested fields.
    pub fn innermost(&self) -> &BufferError {
        let mut err = self;
        while let BufferError::NestedField { source, .. } = err {
            err = source;
        }
        err
    }
}

pub type Result<T> = std::result::Result<T, BufferError>;
