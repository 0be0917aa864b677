//! Error types for ledger operations.

use thiserror::Error;

use crate::amount::AmountError;
use crate::model::FriendId;

/// Error returned by the mutating [`Ledger`](super::Ledger) operations.
///
/// A failed operation never leaves a partial change behind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("friend name is empty")]
    EmptyName,

    #[error("amount is empty")]
    EmptyAmount,

    #[error("invalid amount: {0}")]
    InvalidAmount(#[from] AmountError),

    #[error("friend {0} not found")]
    FriendNotFound(FriendId),

    #[error("balance of friend {0} would overflow")]
    BalanceOverflow(FriendId),
}
