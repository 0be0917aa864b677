//! Dialog state of the friends screen.
//!
//! A [`Session`] holds what the user is typing and which dialog is open. It
//! never owns ledger data: every action takes the [`Ledger`] it works on.
//!
//! Transitions:
//!
//! - `Idle` → `AddingFriend` on [`Session::open_add_friend`]
//! - `AddingFriend` → `Idle` on a successful confirm or on cancel
//! - `Idle` or `FriendSelected` → `FriendSelected(id)` on
//!   [`Session::select_friend`]
//! - `FriendSelected` → `Idle` on a successful borrow/lend or on
//!   [`Session::deselect`]
//!
//! A rejected confirm, borrow or lend keeps the dialog open with its inputs.

use thiserror::Error;
use tracing::debug;

use crate::ledger::{Ledger, LedgerError};
use crate::model::{FriendId, Transaction};
use crate::view::DialogHeading;

/// Which dialog, if any, is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialogState {
    #[default]
    Idle,
    AddingFriend,
    FriendSelected(FriendId),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("cannot {action} while {state:?}")]
    InvalidTransition {
        action: &'static str,
        state: DialogState,
    },

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

/// Friends screen state machine plus its text inputs.
#[derive(Debug, Default)]
pub struct Session {
    state: DialogState,
    name_input: String,
    amount_input: String,
    description_input: String,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DialogState {
        self.state
    }

    /// Currently selected friend, if the borrow/lend dialog is open.
    pub fn selected(&self) -> Option<FriendId> {
        match self.state {
            DialogState::FriendSelected(id) => Some(id),
            _ => None,
        }
    }

    pub fn name_input(&self) -> &str {
        &self.name_input
    }

    pub fn amount_input(&self) -> &str {
        &self.amount_input
    }

    pub fn description_input(&self) -> &str {
        &self.description_input
    }

    pub fn set_name_input(&mut self, text: impl Into<String>) {
        self.name_input = text.into();
    }

    pub fn set_amount_input(&mut self, text: impl Into<String>) {
        self.amount_input = text.into();
    }

    pub fn set_description_input(&mut self, text: impl Into<String>) {
        self.description_input = text.into();
    }

    /// Heading of the borrow/lend dialog, `None` when it is closed or the
    /// selected friend no longer exists.
    pub fn dialog_heading(&self, ledger: &Ledger) -> Option<String> {
        let friend = ledger.friend(self.selected()?)?;
        Some(DialogHeading(friend).to_string())
    }

    pub fn open_add_friend(&mut self) -> Result<(), SessionError> {
        self.expect_idle("open add friend")?;
        self.transition(DialogState::AddingFriend);
        Ok(())
    }

    /// Add the friend named by the name input and close the dialog.
    pub fn confirm_add_friend(&mut self, ledger: &mut Ledger) -> Result<FriendId, SessionError> {
        if self.state != DialogState::AddingFriend {
            return Err(self.invalid("add friend"));
        }

        let id = ledger.add_friend(&self.name_input)?;
        self.name_input.clear();
        self.transition(DialogState::Idle);
        Ok(id)
    }

    /// Close the add dialog. The typed name is kept.
    pub fn cancel_add_friend(&mut self) -> Result<(), SessionError> {
        if self.state != DialogState::AddingFriend {
            return Err(self.invalid("cancel add friend"));
        }
        self.transition(DialogState::Idle);
        Ok(())
    }

    /// Open the borrow/lend dialog for `id`.
    pub fn select_friend(&mut self, ledger: &Ledger, id: FriendId) -> Result<(), SessionError> {
        if self.state == DialogState::AddingFriend {
            return Err(self.invalid("select friend"));
        }
        if ledger.friend(id).is_none() {
            return Err(LedgerError::FriendNotFound(id).into());
        }
        self.transition(DialogState::FriendSelected(id));
        Ok(())
    }

    /// Close the borrow/lend dialog without recording anything.
    ///
    /// Clears the description; the amount input is kept.
    pub fn deselect(&mut self) {
        if self.selected().is_some() {
            self.description_input.clear();
            self.transition(DialogState::Idle);
        }
    }

    /// Delete a friend from the list. Only possible while no dialog is open.
    pub fn delete_friend(&mut self, ledger: &mut Ledger, id: FriendId) -> Result<(), SessionError> {
        self.expect_idle("delete friend")?;
        ledger.delete_friend(id);
        Ok(())
    }

    /// Record a borrow by the selected friend from the dialog inputs.
    pub fn borrow(&mut self, ledger: &mut Ledger) -> Result<Transaction, SessionError> {
        let id = self.selected().ok_or_else(|| self.invalid("borrow"))?;
        let tx = ledger.record_borrow(id, &self.amount_input, &self.description_input)?;
        self.finish_transaction();
        Ok(tx)
    }

    /// Record a lend to the selected friend from the dialog inputs.
    pub fn lend(&mut self, ledger: &mut Ledger) -> Result<Transaction, SessionError> {
        let id = self.selected().ok_or_else(|| self.invalid("lend"))?;
        let tx = ledger.record_lend(id, &self.amount_input, &self.description_input)?;
        self.finish_transaction();
        Ok(tx)
    }

    fn finish_transaction(&mut self) {
        self.amount_input.clear();
        self.deselect();
    }

    fn expect_idle(&self, action: &'static str) -> Result<(), SessionError> {
        if self.state == DialogState::Idle {
            Ok(())
        } else {
            Err(self.invalid(action))
        }
    }

    fn invalid(&self, action: &'static str) -> SessionError {
        SessionError::InvalidTransition {
            action,
            state: self.state,
        }
    }

    fn transition(&mut self, next: DialogState) {
        debug!(from = ?self.state, to = ?next, "dialog transition");
        self.state = next;
    }
}
