//! Command-line configuration.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "debt-ledger")]
#[command(about = "Replay a borrow/lend script and print balances and history")]
pub struct Args {
    /// Command script (csv with columns type,friend,amount,description).
    pub script: PathBuf,

    /// Start with the demo friends John (owes 20) and Alice (owes 10).
    #[arg(long, env = "DEBT_LEDGER_SEED_DEMO")]
    pub seed_demo: bool,

    /// Which tables to print once the script has run.
    #[arg(
        long,
        value_enum,
        env = "DEBT_LEDGER_REPORT",
        default_value_t = Report::All
    )]
    pub report: Report,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Report {
    Friends,
    History,
    All,
}

impl Report {
    pub fn includes_friends(self) -> bool {
        matches!(self, Report::Friends | Report::All)
    }

    pub fn includes_history(self) -> bool {
        matches!(self, Report::History | Report::All)
    }
}
