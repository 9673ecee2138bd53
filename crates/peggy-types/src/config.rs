use crate::address::ETH_CONTRACT_ADDRESS_LEN;

/// Prefix of every voucher denom minted by the module.
pub const PEGGY_DENOM_PREFIX: &str = "peggy";

/// Separator between the prefix and the contract address.
pub const PEGGY_DENOM_SEPARATOR: &str = "";

/// Length of the denoms derived with the default prefix and separator.
pub const PEGGY_DENOM_LEN: usize =
    PEGGY_DENOM_PREFIX.len() + PEGGY_DENOM_SEPARATOR.len() + ETH_CONTRACT_ADDRESS_LEN;

/// Controls how voucher denoms are derived from contract addresses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DenomConfig {
    /// Module prefix. Default: `"peggy"`.
    pub prefix: String,
    /// Separator placed after the prefix. Default: empty.
    pub separator: String,
}

impl DenomConfig {
    /// Prefix and separator as they appear at the start of every denom.
    pub fn full_prefix(&self) -> String {
        format!("{}{}", self.prefix, self.separator)
    }

    /// Fixed length of every denom derived under this config.
    pub fn denom_len(&self) -> usize {
        self.prefix.len() + self.separator.len() + ETH_CONTRACT_ADDRESS_LEN
    }
}

impl Default for DenomConfig {
    fn default() -> Self {
        Self {
            prefix: PEGGY_DENOM_PREFIX.to_string(),
            separator: PEGGY_DENOM_SEPARATOR.to_string(),
        }
    }
}
