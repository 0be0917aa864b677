//! Text shown by the friends and history screens.

use std::fmt;

use crate::Amount;
use crate::model::{Friend, Transaction};

/// Balance line under a friend's name: `Owes you: $X` or `You owe: $X`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BalanceSummary(pub Amount);

impl fmt::Display for BalanceSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_negative() {
            write!(f, "You owe: ${}", self.0.abs())
        } else {
            write!(f, "Owes you: ${}", self.0)
        }
    }
}

/// Heading of the borrow/lend dialog for the selected friend.
#[derive(Debug, Clone, Copy)]
pub struct DialogHeading<'a>(pub &'a Friend);

impl fmt::Display for DialogHeading<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let friend = self.0;
        let owed = friend.amount_owed();
        if owed.is_negative() {
            write!(f, "You owe {}: ${}", friend.name(), owed.abs())
        } else {
            write!(f, "{} owes you: ${}", friend.name(), owed)
        }
    }
}

/// One history entry, e.g. `John - $-3.00: taxi`.
#[derive(Debug, Clone, Copy)]
pub struct HistoryLine<'a>(pub &'a Transaction);

impl fmt::Display for HistoryLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tx = self.0;
        write!(
            f,
            "{} - ${}: {}",
            tx.friend(),
            tx.amount(),
            tx.description()
        )
    }
}
