//! Unsigned base-128 varints.
//!
//! Seven bits per byte, low-order group first, continuation bit (0x80) set on
//! every byte except the last. A `u64` never needs more than ten bytes.

use bytes::BufMut;

use crate::error::{BufferError, Result};

/// Longest encoding of a `u64`.
pub const MAX_VARINT_LEN: usize = 10;

/// Append the varint encoding of `value` to `dst`.
pub fn encode_varint(value: u64, dst: &mut impl BufMut) {
    let mut value = value;
    while value >= 0x80 {
        dst.put_u8((value as u8 & 0x7f) | 0x80);
        value >>= 7;
    }
    dst.put_u8(value as u8);
}

/// Number of bytes [`encode_varint`] emits for `value`.
pub const fn encoded_len_varint(value: u64) -> usize {
    let bits = 64 - (value | 1).leading_zeros() as usize;
    (bits + 6) / 7
}

/// Decode a varint starting at `offset`.
///
/// Returns the value and the number of bytes consumed. Fails with
/// [`BufferError::UnexpectedEndOfBuffer`] if the buffer runs out before a
/// terminating byte and with [`BufferError::IntegerOverflow`] if the groups
/// do not fit in 64 bits.
pub fn decode_varint(buf: &[u8], offset: usize) -> Result<(u64, usize)> {
    let rest = buf.get(offset..).unwrap_or_default();
    let mut value = 0u64;

    for i in 0..MAX_VARINT_LEN {
        let Some(&byte) = rest.get(i) else {
            return Err(BufferError::unexpected_end(offset, i + 1, buf.len()));
        };
        // The tenth group only has room for the top bit of a u64.
        if i == MAX_VARINT_LEN - 1 && byte > 0x01 {
            return Err(BufferError::IntegerOverflow { offset });
        }
        value |= u64::from(byte & 0x7f) << (7 * i);
        if byte < 0x80 {
            return Ok((value, i + 1));
        }
    }

    Err(BufferError::IntegerOverflow { offset })
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn encode(value: u64) -> Vec<u8> {
        let mut out = Vec::new();
        encode_varint(value, &mut out);
        out
    }

    #[test]
    fn known_encodings() {
        assert_eq!(encode(0), vec![0x00]);
        assert_eq!(encode(1), vec![0x01]);
        assert_eq!(encode(127), vec![0x7f]);
        assert_eq!(encode(128), vec![0x80, 0x01]);
        assert_eq!(encode(300), vec![0xac, 0x02]);
        assert_eq!(
            encode(u64::MAX),
            vec![0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x01]
        );
    }

    #[test]
    fn size_matches_bit_length() {
        assert_eq!(encoded_len_varint(0), 1);
        assert_eq!(encoded_len_varint(127), 1);
        assert_eq!(encoded_len_varint(128), 2);
        assert_eq!(encoded_len_varint(16_383), 2);
        assert_eq!(encoded_len_varint(16_384), 3);
        assert_eq!(encoded_len_varint(u64::MAX), MAX_VARINT_LEN);
    }

    #[test]
    fn decode_at_offset() {
        let buf = [0xff, 0xac, 0x02, 0x05];
        assert_eq!(decode_varint(&buf, 1).unwrap(), (300, 2));
        assert_eq!(decode_varint(&buf, 3).unwrap(), (5, 1));
    }

    #[test]
    fn decode_empty_buffer() {
        assert!(matches!(
            decode_varint(&[], 0),
            Err(BufferError::UnexpectedEndOfBuffer { offset: 0, .. })
        ));
    }

    #[test]
    fn decode_offset_past_end() {
        assert!(matches!(
            decode_varint(&[0x01], 4),
            Err(BufferError::UnexpectedEndOfBuffer { .. })
        ));
    }

    #[test]
    fn decode_unterminated() {
        let buf = [0x80, 0x80, 0x80];
        assert_eq!(
            decode_varint(&buf, 0),
            Err(BufferError::UnexpectedEndOfBuffer {
                offset: 0,
                needed: 4,
                remaining: 3,
            })
        );
    }

    #[test]
    fn decode_too_many_groups() {
        let buf = [0xff; 11];
        assert_eq!(
            decode_varint(&buf, 0),
            Err(BufferError::IntegerOverflow { offset: 0 })
        );
    }

    #[test]
    fn decode_tenth_byte_out_of_range() {
        let mut buf = vec![0xff; 9];
        buf.push(0x02);
        assert_eq!(
            decode_varint(&buf, 0),
            Err(BufferError::IntegerOverflow { offset: 0 })
        );
    }

    proptest! {
        #[test]
        fn roundtrip(value in any::<u64>()) {
            let bytes = encode(value);
            prop_assert_eq!(bytes.len(), encoded_len_varint(value));
            prop_assert_eq!(decode_varint(&bytes, 0).unwrap(), (value, bytes.len()));
        }

        #[test]
        fn every_strict_prefix_is_truncated(value in 128u64..) {
            let bytes = encode(value);
            for cut in 0..bytes.len() {
                let is_truncated = matches!(
                    decode_varint(&bytes[..cut], 0),
                    Err(BufferError::UnexpectedEndOfBuffer { .. })
                );
                prop_assert!(is_truncated);
            }
        }
    }
}
