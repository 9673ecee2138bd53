use primitive_types::U256;
use serde::{Deserialize, Serialize};

use crate::address::validate_eth_address;
use crate::coin::Coin;
use crate::denom::{peggy_denom, peggy_denom_to_erc20};
use crate::error::{AddressError, ArithmeticFault, DenomError};
use crate::serde_util::decimal;

/// An amount of a specific ERC20 token, identified by its contract address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ERC20Token {
    #[serde(default, with = "decimal")]
    pub amount: U256,
    #[serde(default)]
    pub contract: String,
}

impl ERC20Token {
    /// Build a token. The contract address is not checked; see
    /// [`ERC20Token::validate`].
    pub fn new(amount: u64, contract: impl Into<String>) -> Self {
        Self {
            amount: U256::from(amount),
            contract: contract.into(),
        }
    }

    /// Stateless validation of the contract address.
    pub fn validate(&self) -> Result<(), AddressError> {
        validate_eth_address(&self.contract)
    }

    /// Sum of two amounts of the same token.
    ///
    /// Fails if the contracts differ or the sum does not fit in 64 bits.
    pub fn checked_add(&self, other: &ERC20Token) -> Result<ERC20Token, ArithmeticFault> {
        if self.contract != other.contract {
            return Err(ArithmeticFault::MismatchedContract {
                left: self.contract.clone(),
                right: other.contract.clone(),
            });
        }
        let sum = self
            .amount
            .checked_add(other.amount)
            .filter(|sum| *sum <= U256::from(u64::MAX))
            .ok_or(ArithmeticFault::AmountOverflow)?;
        Ok(ERC20Token {
            amount: sum,
            contract: self.contract.clone(),
        })
    }

    /// Sum of two amounts of the same token.
    ///
    /// # Panics
    ///
    /// Panics with the [`ArithmeticFault`] if the contracts differ or the sum
    /// does not fit in 64 bits. Both are bookkeeping bugs in the caller.
    #[track_caller]
    pub fn add(&self, other: &ERC20Token) -> ERC20Token {
        match self.checked_add(other) {
            Ok(sum) => sum,
            Err(fault) => panic!("{fault}"),
        }
    }

    /// The voucher coin this token is represented by on the cosmos side.
    pub fn peggy_coin(&self) -> Coin {
        Coin::new(peggy_denom(&self.contract), self.amount)
    }

    /// The token behind a voucher coin.
    pub fn from_peggy_coin(coin: &Coin) -> Result<Self, DenomError> {
        let contract = peggy_denom_to_erc20(&coin.denom)?;
        Ok(Self {
            amount: coin.amount,
            contract,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTRACT: &str = "0x5A0b54D5dc17e0AadC383d2db43B0a0D3E029c4c";
    const OTHER: &str = "0x0000000000000000000000000000000000000001";

    #[test]
    fn new_does_not_validate() {
        let token = ERC20Token::new(1, "junk");
        assert!(matches!(
            token.validate(),
            Err(AddressError::FormatMismatch { .. })
        ));
        assert!(ERC20Token::new(1, CONTRACT).validate().is_ok());
    }

    #[test]
    fn add_same_contract() {
        let sum = ERC20Token::new(5, CONTRACT).add(&ERC20Token::new(7, CONTRACT));
        assert_eq!(sum, ERC20Token::new(12, CONTRACT));
    }

    #[test]
    fn add_up_to_u64_max() {
        let sum = ERC20Token::new(u64::MAX - 1, CONTRACT).add(&ERC20Token::new(1, CONTRACT));
        assert_eq!(sum.amount, U256::from(u64::MAX));
    }

    #[test]
    #[should_panic(expected = "mismatched contract addresses")]
    fn add_mismatched_contracts_panics() {
        let _ = ERC20Token::new(1, CONTRACT).add(&ERC20Token::new(1, OTHER));
    }

    #[test]
    #[should_panic(expected = "amount overflow")]
    fn add_overflow_panics() {
        let _ = ERC20Token::new(u64::MAX, CONTRACT).add(&ERC20Token::new(1, CONTRACT));
    }

    #[test]
    fn checked_add_reports_faults() {
        assert_eq!(
            ERC20Token::new(1, CONTRACT).checked_add(&ERC20Token::new(1, OTHER)),
            Err(ArithmeticFault::MismatchedContract {
                left: CONTRACT.to_string(),
                right: OTHER.to_string(),
            })
        );
        assert_eq!(
            ERC20Token::new(u64::MAX, CONTRACT).checked_add(&ERC20Token::new(u64::MAX, CONTRACT)),
            Err(ArithmeticFault::AmountOverflow)
        );
    }

    #[test]
    fn peggy_coin_roundtrip() {
        let token = ERC20Token::new(100, CONTRACT);
        let coin = token.peggy_coin();
        assert_eq!(coin.denom, format!("peggy{CONTRACT}"));
        assert_eq!(coin.amount, U256::from(100u64));
        assert_eq!(ERC20Token::from_peggy_coin(&coin).unwrap(), token);
    }

    #[test]
    fn foreign_coin_is_not_a_token() {
        assert!(matches!(
            ERC20Token::from_peggy_coin(&Coin::new("uatom", 1u64)),
            Err(DenomError::PrefixMismatch { .. })
        ));
    }

    #[test]
    fn json_shape() {
        let token = ERC20Token::new(100, CONTRACT);
        let json = serde_json::to_value(&token).unwrap();
        assert_eq!(json, serde_json::json!({ "amount": "100", "contract": CONTRACT }));
    }

    #[test]
    fn json_missing_fields_are_zero() {
        let json = format!(r#"{{"contract":"{CONTRACT}"}}"#);
        let token: ERC20Token = serde_json::from_str(&json).unwrap();
        assert_eq!(token, ERC20Token::new(0, CONTRACT));

        let token: ERC20Token = serde_json::from_str(r#"{"amount":"7"}"#).unwrap();
        assert_eq!(token.amount, U256::from(7u64));
        assert!(token.contract.is_empty());
    }
}
