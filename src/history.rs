//! Transaction history screen.
//!
//! A [`HistoryView`] keeps its own copy of the log. A plain view only changes
//! on [`HistoryView::refresh`]; a live view also follows the ledger through a
//! subscription.

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TryRecvError;

use crate::ledger::Ledger;
use crate::model::{LedgerEvent, Transaction};
use crate::view::HistoryLine;

#[derive(Debug)]
pub struct HistoryView {
    entries: Vec<Transaction>,
    feed: Option<mpsc::UnboundedReceiver<LedgerEvent>>,
}

impl HistoryView {
    /// View holding the log as it is now.
    pub fn new(ledger: &Ledger) -> Self {
        Self {
            entries: ledger.transactions(),
            feed: None,
        }
    }

    /// View that also picks up entries recorded after this call.
    pub fn live(ledger: &mut Ledger) -> Self {
        let feed = ledger.subscribe();
        Self {
            entries: ledger.transactions(),
            feed: Some(feed),
        }
    }

    pub fn is_live(&self) -> bool {
        self.feed.is_some()
    }

    /// Replace the local copy with the ledger's current log.
    pub fn refresh(&mut self, ledger: &Ledger) {
        self.entries = ledger.transactions();
    }

    pub fn entries(&self) -> &[Transaction] {
        &self.entries
    }

    /// Rendered history lines, oldest first.
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.entries
            .iter()
            .map(|tx| HistoryLine(tx).to_string())
    }

    /// Apply every pending change without waiting. Returns how many entries
    /// were added.
    ///
    /// A live view whose ledger is gone turns into a plain view.
    pub fn sync(&mut self) -> usize {
        let mut added = 0;
        while let Some(feed) = self.feed.as_mut() {
            match feed.try_recv() {
                Ok(event) => {
                    if self.push(event) {
                        added += 1;
                    }
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => self.feed = None,
            }
        }
        added
    }

    /// Wait for the next recorded entry. Returns `None` once the ledger is
    /// dropped or if the view is not live.
    pub async fn next_entry(&mut self) -> Option<&Transaction> {
        loop {
            let event = self.feed.as_mut()?.recv().await;
            match event {
                Some(event) => {
                    if self.push(event) {
                        return self.entries.last();
                    }
                }
                None => {
                    self.feed = None;
                    return None;
                }
            }
        }
    }

    /// Append a recorded transaction unless it is already part of the copy.
    fn push(&mut self, event: LedgerEvent) -> bool {
        let LedgerEvent::TransactionRecorded { transaction, .. } = event else {
            return false;
        };
        let last_seq = self.entries.last().map_or(0, Transaction::seq);
        if transaction.seq() <= last_seq {
            return false;
        }
        self.entries.push(transaction);
        true
    }
}
