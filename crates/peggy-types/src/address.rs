use std::sync::OnceLock;

use regex::Regex;

use crate::error::AddressError;

/// Length of an Ethereum contract address string, `0x` included.
pub const ETH_CONTRACT_ADDRESS_LEN: usize = 42;

fn address_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new("^0x[0-9a-fA-F]{40}$").expect("ethereum address pattern is a valid regex")
    })
}

/// Validate an Ethereum address string: `0x` followed by exactly 40 hex
/// digits, either case.
pub fn validate_eth_address(address: &str) -> Result<(), AddressError> {
    if address.is_empty() {
        return Err(AddressError::Empty);
    }
    if !address_pattern().is_match(address) {
        return Err(AddressError::FormatMismatch {
            address: address.to_string(),
        });
    }
    // Also reported on its own so diagnostics carry expected vs actual.
    if address.len() != ETH_CONTRACT_ADDRESS_LEN {
        return Err(AddressError::WrongLength {
            address: address.to_string(),
            expected: ETH_CONTRACT_ADDRESS_LEN,
            actual: address.len(),
        });
    }
    Ok(())
}

/// Bytewise ordering of two address strings.
pub fn eth_addr_less_than(left: &str, right: &str) -> bool {
    left.as_bytes() < right.as_bytes()
}
