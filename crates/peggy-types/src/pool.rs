//! Records kept in the outgoing pool and the bridged-denom registry.
//!
//! ```text
//! OutgoingTx                      BridgedDenominator
//!   1 sender      string            1 token_contract_address  bytes
//!   2 dest_addr   bytes             2 symbol                  string
//!   3 amount      message           3 cosmos_voucher_denom    string
//!   4 bridge_fee  message
//! ```
//!
//! Empty strings and byte arrays are left off the wire; `amount` and
//! `bridge_fee` are always framed. Fields are written in field-number order.

use bytes::BufMut;
use peggy_wire::{
    decode_bytes, decode_nested, decode_string, encode_field, field_len, skip_unknown, Message,
    Nested, Result, Tag,
};
use serde::{Deserialize, Serialize};

use crate::coin::Coin;
use crate::serde_util::base64_bytes;

/// A withdrawal waiting in the pool to be batched out to Ethereum.
///
/// Generic over the amount type so any message that owns its encoding can
/// be carried; cosmos [`Coin`] by default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutgoingTx<C = Coin> {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub sender: String,
    #[serde(
        default,
        skip_serializing_if = "Vec::is_empty",
        with = "base64_bytes"
    )]
    pub dest_addr: Vec<u8>,
    #[serde(default)]
    pub amount: C,
    #[serde(default)]
    pub bridge_fee: C,
}

impl<C: Message> Message for OutgoingTx<C> {
    const NAME: &'static str = "OutgoingTx";

    fn encoded_len(&self) -> usize {
        field_len(1, self.sender.as_str())
            + field_len(2, self.dest_addr.as_slice())
            + field_len(3, &Nested(&self.amount))
            + field_len(4, &Nested(&self.bridge_fee))
    }

    fn encode_raw<B: BufMut>(&self, dst: &mut B) {
        encode_field(1, self.sender.as_str(), dst);
        encode_field(2, self.dest_addr.as_slice(), dst);
        encode_field(3, &Nested(&self.amount), dst);
        encode_field(4, &Nested(&self.bridge_fee), dst);
    }

    fn merge_field(&mut self, tag: Tag, buf: &[u8], offset: usize) -> Result<usize> {
        match tag.field_number {
            1 => {
                let (sender, consumed) = decode_string("sender", tag, buf, offset)?;
                self.sender = sender;
                Ok(consumed)
            }
            2 => {
                let (dest_addr, consumed) = decode_bytes("dest_addr", tag, buf, offset)?;
                self.dest_addr = dest_addr;
                Ok(consumed)
            }
            3 => {
                let (amount, consumed) = decode_nested("amount", tag, buf, offset)?;
                self.amount = amount;
                Ok(consumed)
            }
            4 => {
                let (bridge_fee, consumed) = decode_nested("bridge_fee", tag, buf, offset)?;
                self.bridge_fee = bridge_fee;
                Ok(consumed)
            }
            _ => skip_unknown(Self::NAME, tag, buf, offset),
        }
    }
}

/// Links an ERC20 contract to the voucher denom minted for it.
///
/// `cosmos_voucher_denom` is expected to be the denom derived from the
/// contract address; the codec itself does not check it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BridgedDenominator {
    #[serde(
        default,
        skip_serializing_if = "Vec::is_empty",
        with = "base64_bytes"
    )]
    pub token_contract_address: Vec<u8>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub symbol: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub cosmos_voucher_denom: String,
}

impl Message for BridgedDenominator {
    const NAME: &'static str = "BridgedDenominator";

    fn encoded_len(&self) -> usize {
        field_len(1, self.token_contract_address.as_slice())
            + field_len(2, self.symbol.as_str())
            + field_len(3, self.cosmos_voucher_denom.as_str())
    }

    fn encode_raw<B: BufMut>(&self, dst: &mut B) {
        encode_field(1, self.token_contract_address.as_slice(), dst);
        encode_field(2, self.symbol.as_str(), dst);
        encode_field(3, self.cosmos_voucher_denom.as_str(), dst);
    }

    fn merge_field(&mut self, tag: Tag, buf: &[u8], offset: usize) -> Result<usize> {
        match tag.field_number {
            1 => {
                let (address, consumed) =
                    decode_bytes("token_contract_address", tag, buf, offset)?;
                self.token_contract_address = address;
                Ok(consumed)
            }
            2 => {
                let (symbol, consumed) = decode_string("symbol", tag, buf, offset)?;
                self.symbol = symbol;
                Ok(consumed)
            }
            3 => {
                let (denom, consumed) = decode_string("cosmos_voucher_denom", tag, buf, offset)?;
                self.cosmos_voucher_denom = denom;
                Ok(consumed)
            }
            _ => skip_unknown(Self::NAME, tag, buf, offset),
        }
    }
}
