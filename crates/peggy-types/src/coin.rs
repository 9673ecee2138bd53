use std::fmt;

use bytes::BufMut;
use peggy_wire::{
    decode_string, encode_field, encoded_len_varint, field_len, skip_unknown, BufferError, Message,
    Tag, WireType,
};
use primitive_types::U256;
use serde::{Deserialize, Serialize};

use crate::error::CoinError;
use crate::serde_util::decimal;

/// A native amount: denomination plus a non-negative 256-bit integer.
///
/// Wire form: field 1 `denom` (omitted when empty), field 2 `amount` as a
/// decimal string (always written, `"0"` for zero).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coin {
    #[serde(default)]
    pub denom: String,
    #[serde(default, with = "decimal")]
    pub amount: U256,
}

impl Coin {
    pub fn new(denom: impl Into<String>, amount: impl Into<U256>) -> Self {
        Self {
            denom: denom.into(),
            amount: amount.into(),
        }
    }

    /// Sum of two coins of the same denom.
    pub fn checked_add(&self, other: &Coin) -> Result<Coin, CoinError> {
        if self.denom != other.denom {
            return Err(CoinError::DenomMismatch {
                left: self.denom.clone(),
                right: other.denom.clone(),
            });
        }
        let amount = self
            .amount
            .checked_add(other.amount)
            .ok_or(CoinError::Overflow)?;
        Ok(Coin::new(self.denom.clone(), amount))
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

impl Message for Coin {
    const NAME: &'static str = "Coin";

    fn encoded_len(&self) -> usize {
        let digits = decimal_len(&self.amount);
        field_len(1, self.denom.as_str())
            + Tag::new(2, WireType::LengthDelimited).encoded_len()
            + encoded_len_varint(digits as u64)
            + digits
    }

    fn encode_raw<B: BufMut>(&self, dst: &mut B) {
        encode_field(1, self.denom.as_str(), dst);
        encode_field(2, self.amount.to_string().as_str(), dst);
    }

    fn merge_field(&mut self, tag: Tag, buf: &[u8], offset: usize) -> peggy_wire::Result<usize> {
        match tag.field_number {
            1 => {
                let (denom, consumed) = decode_string("denom", tag, buf, offset)?;
                self.denom = denom;
                Ok(consumed)
            }
            2 => {
                let (text, consumed) = decode_string("amount", tag, buf, offset)?;
                self.amount = parse_amount(&text)?;
                Ok(consumed)
            }
            _ => skip_unknown(Self::NAME, tag, buf, offset),
        }
    }
}

/// Number of decimal digits in `amount`, without formatting it.
fn decimal_len(amount: &U256) -> usize {
    let ten = U256::from(10u8);
    let mut digits = 1;
    let mut bound = ten;
    while *amount >= bound {
        digits += 1;
        match bound.checked_mul(ten) {
            Some(next) => bound = next,
            None => break,
        }
    }
    digits
}

fn parse_amount(text: &str) -> peggy_wire::Result<U256> {
    if text.is_empty() {
        return Ok(U256::zero());
    }
    U256::from_dec_str(text).map_err(|err| BufferError::InvalidValue {
        field: "amount",
        reason: format!("{text:?} is not a decimal amount: {err:?}"),
    })
}

#[cfg(test)]
mod tests {
    use peggy_wire::write_length_delimited;

    use super::*;

    #[test]
    fn zero_coin_still_writes_amount() {
        let coin = Coin::default();
        assert_eq!(coin.encode_to_vec(), vec![0x12, 0x01, b'0']);
        assert_eq!(coin.encoded_len(), 3);
    }

    #[test]
    fn encodes_denom_then_amount() {
        let coin = Coin::new("stake", 100u64);
        let mut expected = Vec::new();
        write_length_delimited(1, b"stake", &mut expected);
        write_length_delimited(2, b"100", &mut expected);
        assert_eq!(coin.encode_to_vec(), expected);
        assert_eq!(Coin::decode(&expected).unwrap(), coin);
    }

    #[test]
    fn large_amount_roundtrip() {
        let coin = Coin::new("peggy0x", U256::MAX);
        let bytes = coin.encode_to_vec();
        assert_eq!(bytes.len(), coin.encoded_len());
        assert_eq!(Coin::decode(&bytes).unwrap(), coin);
    }

    #[test]
    fn digit_count_matches_formatting() {
        let ten = U256::from(10u8);
        let mut cases = vec![U256::zero(), U256::MAX, U256::from(u64::MAX)];
        let mut power = U256::one();
        while let Some(next) = power.checked_mul(ten) {
            cases.extend([power, next - U256::one()]);
            power = next;
        }
        for amount in cases {
            assert_eq!(decimal_len(&amount), amount.to_string().len(), "{amount}");
        }
    }

    #[test]
    fn rejects_non_decimal_amount() {
        let mut buf = Vec::new();
        write_length_delimited(2, b"-5", &mut buf);
        assert!(matches!(
            Coin::decode(&buf),
            Err(BufferError::InvalidValue {
                field: "amount",
                ..
            })
        ));
    }

    #[test]
    fn empty_amount_is_zero() {
        let mut buf = Vec::new();
        write_length_delimited(1, b"stake", &mut buf);
        write_length_delimited(2, b"", &mut buf);
        assert_eq!(Coin::decode(&buf).unwrap(), Coin::new("stake", 0u64));
    }

    #[test]
    fn checked_add_same_denom() {
        let sum = Coin::new("stake", 5u64)
            .checked_add(&Coin::new("stake", 7u64))
            .unwrap();
        assert_eq!(sum, Coin::new("stake", 12u64));
    }

    #[test]
    fn checked_add_rejects_mismatch_and_overflow() {
        assert!(matches!(
            Coin::new("a", 1u64).checked_add(&Coin::new("b", 1u64)),
            Err(CoinError::DenomMismatch { .. })
        ));
        assert_eq!(
            Coin::new("a", U256::MAX).checked_add(&Coin::new("a", 1u64)),
            Err(CoinError::Overflow)
        );
    }

    #[test]
    fn display_is_amount_then_denom() {
        assert_eq!(Coin::new("stake", 42u64).to_string(), "42stake");
    }

    #[test]
    fn json_amount_is_decimal_string() {
        let coin = Coin::new("stake", 1_000_000u64);
        let json = serde_json::to_string(&coin).unwrap();
        assert_eq!(json, r#"{"denom":"stake","amount":"1000000"}"#);
        assert_eq!(serde_json::from_str::<Coin>(&json).unwrap(), coin);
    }
}
