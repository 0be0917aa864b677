//! Core domain types for the debt ledger.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Amount;

/// Friend identifier. Assigned by the ledger, never reused.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct FriendId(u64);

impl FriendId {
    pub fn new(raw: u64) -> Self {
        FriendId(raw)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for FriendId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for FriendId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(FriendId)
    }
}

/// Position of a transaction in the log, starting at 1.
pub type TxSeq = u64;

/// A counterparty with a signed running balance.
///
/// Positive `amount_owed` means the friend owes the user, negative means the
/// user owes the friend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Friend {
    id: FriendId,
    name: String,
    amount_owed: Amount,
}

impl Friend {
    pub(crate) fn new(id: FriendId, name: String, amount_owed: Amount) -> Self {
        Self {
            id,
            name,
            amount_owed,
        }
    }

    pub fn id(&self) -> FriendId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn amount_owed(&self) -> Amount {
        self.amount_owed
    }

    pub(crate) fn set_amount_owed(&mut self, amount_owed: Amount) {
        self.amount_owed = amount_owed;
    }
}

/// Direction of a recorded transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TxKind {
    /// Decreases what the friend owes.
    Borrow,
    /// Increases what the friend owes.
    Lend,
}

impl TxKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TxKind::Borrow => "borrow",
            TxKind::Lend => "lend",
        }
    }

    /// Signed log amount for a positive `amount` of this kind.
    pub(crate) fn log_amount(self, amount: Amount) -> Amount {
        match self {
            TxKind::Borrow => amount,
            TxKind::Lend => -amount,
        }
    }

    /// Change applied to the friend's `amount_owed` for a positive `amount`.
    pub(crate) fn balance_delta(self, amount: Amount) -> Amount {
        match self {
            TxKind::Borrow => -amount,
            TxKind::Lend => amount,
        }
    }
}

impl fmt::Display for TxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An immutable entry of the transaction log.
///
/// `amount` is positive for a borrow and negative for a lend. `friend` is the
/// friend's name when the entry was recorded and is kept even after the
/// friend is deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    seq: TxSeq,
    friend_id: FriendId,
    friend: String,
    amount: Amount,
    description: String,
}

impl Transaction {
    pub(crate) fn new(
        seq: TxSeq,
        friend_id: FriendId,
        friend: String,
        amount: Amount,
        description: String,
    ) -> Self {
        Self {
            seq,
            friend_id,
            friend,
            amount,
            description,
        }
    }

    pub fn seq(&self) -> TxSeq {
        self.seq
    }

    pub fn friend_id(&self) -> FriendId {
        self.friend_id
    }

    pub fn friend(&self) -> &str {
        &self.friend
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn kind(&self) -> TxKind {
        if self.amount.is_negative() {
            TxKind::Lend
        } else {
            TxKind::Borrow
        }
    }

    /// Change this entry applied to its friend's balance.
    pub fn balance_delta(&self) -> Amount {
        -self.amount
    }
}

/// An input of the ledger, as produced by a view or a command script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerCommand {
    AddFriend {
        name: String,
    },
    DeleteFriend {
        id: FriendId,
    },
    /// Decrease the friend's balance by the parsed amount.
    Borrow {
        friend: FriendId,
        amount: String,
        description: String,
    },
    /// Increase the friend's balance by the parsed amount.
    Lend {
        friend: FriendId,
        amount: String,
        description: String,
    },
}

/// Change notification published to every ledger subscriber.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerEvent {
    FriendAdded(Friend),
    FriendDeleted(FriendId),
    TransactionRecorded {
        transaction: Transaction,
        /// Friend's `amount_owed` after the transaction.
        balance: Amount,
    },
}
