/// Errors from validating an Ethereum address string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddressError {
    /// The address is the empty string.
    #[error("empty")]
    Empty,

    /// The address is not `0x` followed by 40 hex digits.
    #[error("address({address}) doesn't match 0x followed by 40 hex characters")]
    FormatMismatch { address: String },

    /// The address has the wrong overall length.
    #[error("address({address}) of the wrong length exp({expected}) actual({actual})")]
    WrongLength {
        address: String,
        expected: usize,
        actual: usize,
    },
}

/// Errors from mapping a voucher denom back to its contract address.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DenomError {
    /// The denom does not start with the module prefix and separator.
    #[error("denom prefix({denom}) not equal to expected({expected})")]
    PrefixMismatch { denom: String, expected: String },

    /// The part after the prefix is not a valid contract address.
    #[error("error({0}) validating ethereum contract address")]
    InvalidContractAddress(#[source] AddressError),

    /// The denom is not exactly prefix + separator + address long.
    #[error("len(denom)({actual}) not equal to expected denom length({expected})")]
    LengthMismatch { actual: usize, expected: usize },
}

/// Errors from combining two coins.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoinError {
    /// The coins are of different denominations.
    #[error("cannot add coins of different denoms ({left} and {right})")]
    DenomMismatch { left: String, right: String },

    /// The sum does not fit in 256 bits.
    #[error("coin amount overflow")]
    Overflow,
}

/// A broken programming contract in token arithmetic.
///
/// This is not an input error: adding tokens of different contracts, or
/// overflowing a 64-bit token amount, means the caller's bookkeeping is
/// wrong. It has no conversion into the recoverable error types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArithmeticFault {
    #[error("mismatched contract addresses ({left} and {right})")]
    MismatchedContract { left: String, right: String },

    #[error("amount overflow")]
    AmountOverflow,
}
