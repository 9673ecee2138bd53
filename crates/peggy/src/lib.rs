//! Wire codec and domain rules for peggy bridge records.
//!
//! peggy turns the bridge's pending withdrawals and bridged-denom registry
//! entries into compact tag/length/value bytes and back, and enforces the
//! rules their fields must satisfy: valid Ethereum contract addresses, the
//! canonical contract-to-denom mapping, and overflow-safe token arithmetic.
//!
//! # Crate Structure
//!
//! - [`wire`]: Varints, field tags, length-delimited payloads, the `Message` trait
//! - [`types`]: Addresses, denoms, ERC20 tokens, coins and the pool records

/// Re-export wire codec types.
pub mod wire {
    pub use peggy_wire::*;
}

/// Re-export domain types.
pub mod types {
    pub use peggy_types::*;
}

pub use peggy_types::{BridgedDenominator, Coin, ERC20Token, OutgoingTx};
pub use peggy_wire::{BufferError, DecodeConfig, Message};
