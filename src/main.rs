use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use debt_ledger::config::Args;
use debt_ledger::csv::{CsvError, read_commands, write_friends, write_history};
use debt_ledger::{HistoryView, Ledger};
use tokio_stream::wrappers::ReceiverStream;
use tracing::level_filters::LevelFilter;
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if args.script.extension().is_none_or(|ext| ext != "csv") {
        warn!(path = %args.script.display(), "input file seems to not be a csv file");
    }

    let commands = match read_commands(args.script.clone()) {
        Ok(commands) => commands,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let mut ledger = if args.seed_demo {
        Ledger::with_demo_friends()
    } else {
        Ledger::new()
    };

    let (cmd_sender, cmd_receiver) = tokio::sync::mpsc::channel(16);

    let reader = tokio::spawn(async move {
        for result in commands {
            match result {
                Ok(command) => {
                    if cmd_sender.send(command).await.is_err() {
                        break;
                    }
                }
                Err(e) => {
                    warn!("{e}");
                }
            }
        }
    });

    ledger.run(ReceiverStream::new(cmd_receiver)).await;

    if let Err(e) = reader.await {
        error!("script reader failed: {e}");
        return ExitCode::FAILURE;
    }

    let history = HistoryView::new(&ledger);

    if let Err(e) = write_reports(&args, &ledger, &history) {
        error!("{e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn write_reports(args: &Args, ledger: &Ledger, history: &HistoryView) -> Result<(), CsvError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if args.report.includes_friends() {
        write_friends(&mut out, ledger.friends())?;
    }
    if args.report.includes_friends() && args.report.includes_history() {
        writeln!(out)?;
    }
    if args.report.includes_history() {
        write_history(&mut out, history.entries())?;
    }
    Ok(())
}
