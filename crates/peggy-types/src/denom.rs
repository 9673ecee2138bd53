use tracing::debug;

use crate::address::validate_eth_address;
use crate::config::DenomConfig;
use crate::error::DenomError;

/// Maps Ethereum contract addresses to voucher denoms and back.
#[derive(Debug, Clone, Default)]
pub struct DenomMapper {
    config: DenomConfig,
}

impl DenomMapper {
    /// Create a mapper with the default `peggy` prefix.
    pub fn new() -> Self {
        Self::with_config(DenomConfig::default())
    }

    /// Create a mapper with an explicit prefix and separator.
    pub fn with_config(config: DenomConfig) -> Self {
        Self { config }
    }

    /// Voucher denom for `contract`: prefix, separator, then the address
    /// verbatim. The address is not validated here.
    pub fn contract_to_denom(&self, contract: &str) -> String {
        format!("{}{}{}", self.config.prefix, self.config.separator, contract)
    }

    /// Recover the contract address from a voucher denom.
    pub fn denom_to_contract(&self, denom: &str) -> Result<String, DenomError> {
        let full_prefix = self.config.full_prefix();
        let Some(contract) = denom.strip_prefix(full_prefix.as_str()) else {
            debug!(denom, expected = %full_prefix, "denom prefix mismatch");
            return Err(DenomError::PrefixMismatch {
                denom: denom.to_string(),
                expected: full_prefix,
            });
        };

        if let Err(err) = validate_eth_address(contract) {
            debug!(denom, error = %err, "denom carries an invalid contract address");
            return Err(DenomError::InvalidContractAddress(err));
        }

        let expected = self.config.denom_len();
        if denom.len() != expected {
            return Err(DenomError::LengthMismatch {
                actual: denom.len(),
                expected,
            });
        }

        Ok(contract.to_string())
    }

    /// Mapper configuration.
    pub fn config(&self) -> &DenomConfig {
        &self.config
    }
}

/// Voucher denom for `contract` under the default prefix.
pub fn peggy_denom(contract: &str) -> String {
    DenomMapper::new().contract_to_denom(contract)
}

/// Contract address behind a default-prefixed voucher denom.
pub fn peggy_denom_to_erc20(denom: &str) -> Result<String, DenomError> {
    DenomMapper::new().denom_to_contract(denom)
}
