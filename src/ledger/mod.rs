//! Ledger core.
//!
//! The ledger owns the friends and the transaction log and keeps them
//! consistent: every recorded borrow or lend appends one log entry and updates
//! the matching friend's balance in the same step.
//! Also supports async stream of commands and change subscriptions.

use tokio::sync::mpsc;
use tokio_stream::{Stream, StreamExt};
use tracing::info;

use crate::Amount;
use crate::model::{
    Friend, FriendId, LedgerCommand, LedgerEvent, Transaction, TxKind, TxSeq,
};

mod state;
use state::FriendList;

mod error;
pub use error::LedgerError;

/// The debt ledger.
///
/// Friends keep their insertion order. The transaction log is append-only.
#[derive(Debug, Default)]
pub struct Ledger {
    friends: FriendList,
    transactions: Vec<Transaction>,
    /// Last assigned friend id (ids start at 1)
    last_id: u64,
    subscribers: Vec<mpsc::UnboundedSender<LedgerEvent>>,
}

/// Public API
impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ledger pre-filled with John (owes 20) and Alice (owes 10).
    pub fn with_demo_friends() -> Self {
        let mut ledger = Self::new();
        for (name, owed) in [("John", 20.0), ("Alice", 10.0)] {
            ledger.insert_friend(name, Amount::from_float(owed));
        }
        ledger
    }

    /// Run the ledger with the given command stream
    pub async fn run(&mut self, mut stream: impl Stream<Item = LedgerCommand> + Unpin) {
        while let Some(command) = stream.next().await {
            // a rejected command must not stop the ledger, it is already logged
            let _ = self.apply(command);
        }
    }

    /// Register a new change listener.
    ///
    /// Events are delivered for every change made after this call. Dropping
    /// the receiver unsubscribes.
    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<LedgerEvent> {
        let (sender, receiver) = mpsc::unbounded_channel();
        self.subscribers.push(sender);
        receiver
    }

    /// Friends in insertion order.
    pub fn friends(&self) -> impl Iterator<Item = &Friend> + '_ {
        self.friends.iter()
    }

    pub fn friend_count(&self) -> usize {
        self.friends.len()
    }

    pub fn friend(&self, id: FriendId) -> Option<&Friend> {
        self.friends.get(id)
    }

    /// First friend with exactly this name.
    pub fn find_by_name(&self, name: &str) -> Option<&Friend> {
        self.friends.find_by_name(name)
    }

    /// Copy of the transaction log at call time.
    ///
    /// Entries recorded later are not reflected; call again (or subscribe)
    /// to see them.
    pub fn transactions(&self) -> Vec<Transaction> {
        self.transactions.clone()
    }

    /// Borrowed view of the transaction log.
    pub fn log(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Entries recorded against `friend`, in recording order.
    ///
    /// Entries of deleted friends stay reachable by their old id.
    pub fn transactions_for(&self, friend: FriendId) -> impl Iterator<Item = &Transaction> + '_ {
        self.transactions
            .iter()
            .filter(move |tx| tx.friend_id() == friend)
    }

    /// Add a friend with a zero balance.
    pub fn add_friend(&mut self, name: &str) -> Result<FriendId, LedgerError> {
        self.add_friend_with_balance(name, Amount::ZERO)
    }

    /// Add a friend with an opening balance.
    ///
    /// Names that are empty after trimming are rejected, the name is otherwise
    /// stored as given.
    pub fn add_friend_with_balance(
        &mut self,
        name: &str,
        opening: Amount,
    ) -> Result<FriendId, LedgerError> {
        if name.trim().is_empty() {
            info!(reason = %LedgerError::EmptyName, "add_friend skipped");
            return Err(LedgerError::EmptyName);
        }

        Ok(self.insert_friend(name, opening))
    }

    /// Remove a friend. Returns `None` when no such friend exists.
    ///
    /// Recorded transactions are left untouched.
    pub fn delete_friend(&mut self, id: FriendId) -> Option<Friend> {
        let Some(removed) = self.friends.remove(id) else {
            info!(friend = %id, reason = "friend not found", "delete_friend skipped");
            return None;
        };

        info!(friend = %id, name = removed.name(), "delete_friend applied");
        self.publish(LedgerEvent::FriendDeleted(id));
        Some(removed)
    }

    /// Record that `friend` borrowed: append `+amount` to the log and
    /// decrease the friend's balance by `amount`.
    pub fn record_borrow(
        &mut self,
        friend: FriendId,
        amount_text: &str,
        description: &str,
    ) -> Result<Transaction, LedgerError> {
        self.record(TxKind::Borrow, friend, amount_text, description)
    }

    /// Record a lend to `friend`: append `-amount` to the log and increase the
    /// friend's balance by `amount`.
    pub fn record_lend(
        &mut self,
        friend: FriendId,
        amount_text: &str,
        description: &str,
    ) -> Result<Transaction, LedgerError> {
        self.record(TxKind::Lend, friend, amount_text, description)
    }

    /// Apply a single command on top of the current ledger state
    pub fn apply(&mut self, command: LedgerCommand) -> Result<(), LedgerError> {
        match command {
            LedgerCommand::AddFriend { name } => {
                self.add_friend(&name)?;
            }
            LedgerCommand::DeleteFriend { id } => {
                self.delete_friend(id);
            }
            LedgerCommand::Borrow {
                friend,
                amount,
                description,
            } => {
                self.record_borrow(friend, &amount, &description)?;
            }
            LedgerCommand::Lend {
                friend,
                amount,
                description,
            } => {
                self.record_lend(friend, &amount, &description)?;
            }
        }
        Ok(())
    }
}

/// Private API
impl Ledger {
    /// Append a friend without validating the name.
    fn insert_friend(&mut self, name: &str, opening: Amount) -> FriendId {
        self.last_id += 1;
        let id = FriendId::new(self.last_id);
        let friend = Friend::new(id, name.to_string(), opening);
        self.friends.push(friend.clone());

        info!(friend = %id, name, opening = %opening, "add_friend applied");
        self.publish(LedgerEvent::FriendAdded(friend));
        id
    }

    fn record(
        &mut self,
        kind: TxKind,
        friend: FriendId,
        amount_text: &str,
        description: &str,
    ) -> Result<Transaction, LedgerError> {
        let result = self.try_record(kind, friend, amount_text, description);
        match &result {
            Ok(tx) => {
                info!(
                    friend = %friend,
                    seq = tx.seq(),
                    amount = %tx.amount(),
                    "{kind} applied"
                );
            }
            Err(e) => {
                info!(
                    friend = %friend,
                    amount = amount_text,
                    reason = %e,
                    "{kind} skipped"
                );
            }
        }
        result
    }

    /// Validate everything first, then mutate:
    /// - Ensure the amount text is present and parses to a positive amount
    /// - Ensure the friend exists and the new balance fits
    /// - Update the balance and append the log entry
    fn try_record(
        &mut self,
        kind: TxKind,
        friend_id: FriendId,
        amount_text: &str,
        description: &str,
    ) -> Result<Transaction, LedgerError> {
        if amount_text.trim().is_empty() {
            return Err(LedgerError::EmptyAmount);
        }
        let amount = Amount::parse_positive(amount_text)?;

        let friend = self
            .friends
            .get_mut(friend_id)
            .ok_or(LedgerError::FriendNotFound(friend_id))?;

        let balance = friend
            .amount_owed()
            .checked_add(kind.balance_delta(amount))
            // i64::MIN has no positive counterpart, keep balances negatable
            .filter(|balance| *balance != Amount::MIN)
            .ok_or(LedgerError::BalanceOverflow(friend_id))?;
        friend.set_amount_owed(balance);

        let tx = Transaction::new(
            self.transactions.len() as TxSeq + 1,
            friend_id,
            friend.name().to_string(),
            kind.log_amount(amount),
            description.to_string(),
        );
        self.transactions.push(tx.clone());

        self.publish(LedgerEvent::TransactionRecorded {
            transaction: tx.clone(),
            balance,
        });
        Ok(tx)
    }

    /// Send `event` to every live subscriber, dropping closed ones.
    fn publish(&mut self, event: LedgerEvent) {
        self.subscribers
            .retain(|subscriber| subscriber.send(event.clone()).is_ok());
    }
}
