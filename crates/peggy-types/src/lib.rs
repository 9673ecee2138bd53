//! Ethereum-side types for the peggy bridge module.
//!
//! - Ethereum contract address validation
//! - the mapping between a contract address and its cosmos voucher denom
//! - ERC20 token amounts with strict same-contract arithmetic
//! - the `OutgoingTx` and `BridgedDenominator` records and their wire codec
//!
//! All types are plain values. The only process-wide state is the compiled
//! address pattern, built once on first use and read-only afterwards.

pub mod address;
pub mod coin;
pub mod config;
pub mod denom;
pub mod erc20;
pub mod error;
pub mod pool;
mod serde_util;

pub use address::{eth_addr_less_than, validate_eth_address, ETH_CONTRACT_ADDRESS_LEN};
pub use coin::Coin;
pub use config::{DenomConfig, PEGGY_DENOM_LEN, PEGGY_DENOM_PREFIX, PEGGY_DENOM_SEPARATOR};
pub use denom::{peggy_denom, peggy_denom_to_erc20, DenomMapper};
pub use erc20::ERC20Token;
pub use error::{AddressError, ArithmeticFault, CoinError, DenomError};
pub use pool::{BridgedDenominator, OutgoingTx};
pub use primitive_types::U256;
