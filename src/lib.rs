pub mod amount;
pub mod config;
pub mod csv;
pub mod history;
pub mod ledger;
pub mod model;
pub mod session;
pub mod view;

pub use amount::{Amount, AmountError};
pub use history::HistoryView;
pub use ledger::{Ledger, LedgerError};
pub use model::{Friend, FriendId, LedgerCommand, LedgerEvent, Transaction, TxKind, TxSeq};
pub use session::{DialogState, Session, SessionError};
