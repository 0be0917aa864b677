use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;
use thiserror::Error;

use crate::view::BalanceSummary;
use crate::{Friend, FriendId, LedgerCommand, Transaction, TxSeq};

/// Errors that can occur when reading a command script or writing reports
#[derive(Debug, Error)]
pub enum CsvError {
    #[error("cannot open {path}: {source}")]
    Open { path: String, source: csv::Error },

    #[error("line {line}: failed to parse row: {source}")]
    Parse { line: usize, source: csv::Error },

    #[error("line {line}: unrecognized command type '{cmd_type}'")]
    UnrecognizedType { line: usize, cmd_type: String },

    #[error("line {line}: {cmd_type} missing amount")]
    MissingAmount { line: usize, cmd_type: String },

    #[error("line {line}: invalid friend id '{value}'")]
    InvalidFriendId { line: usize, value: String },

    #[error("failed to write report: {0}")]
    Write(#[from] csv::Error),

    #[error("failed to write report: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Deserialize)]
struct InputRow {
    r#type: String,
    friend: String,
    #[serde(default)]
    amount: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Serialize)]
struct FriendRow<'a> {
    id: FriendId,
    name: &'a str,
    amount_owed: String,
    summary: String,
}

#[derive(Debug, Serialize)]
struct HistoryRow<'a> {
    seq: TxSeq,
    friend_id: FriendId,
    friend: &'a str,
    amount: String,
    description: &'a str,
}

/// Read ledger commands from a csv script.
///
/// `add` takes a name in the friend column, the other commands take a
/// friend id.
pub fn read_commands(
    path: impl AsRef<Path>,
) -> Result<impl Iterator<Item = Result<LedgerCommand, CsvError>>, CsvError> {
    let path = path.as_ref();
    let reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)
        .map_err(|source| CsvError::Open {
            path: path.display().to_string(),
            source,
        })?;

    Ok(reader
        .into_deserialize::<InputRow>()
        .enumerate()
        .map(|(idx, result)| {
            let line = idx + 2; // 1-indexed, skip header
            let row = result.map_err(|source| CsvError::Parse { line, source })?;
            parse_row(line, row)
        }))
}

fn parse_row(line: usize, row: InputRow) -> Result<LedgerCommand, CsvError> {
    let cmd_type = row.r#type.as_str();
    if cmd_type == "add" {
        return Ok(LedgerCommand::AddFriend { name: row.friend });
    }

    let friend: FriendId = row
        .friend
        .parse()
        .map_err(|_| CsvError::InvalidFriendId {
            line,
            value: row.friend.clone(),
        })?;
    let description = row.description.unwrap_or_default();

    match cmd_type {
        "delete" => Ok(LedgerCommand::DeleteFriend { id: friend }),
        "borrow" | "lend" => {
            let amount = row
                .amount
                .filter(|amount| !amount.is_empty())
                .ok_or_else(|| CsvError::MissingAmount {
                    line,
                    cmd_type: cmd_type.to_string(),
                })?;
            if cmd_type == "borrow" {
                Ok(LedgerCommand::Borrow {
                    friend,
                    amount,
                    description,
                })
            } else {
                Ok(LedgerCommand::Lend {
                    friend,
                    amount,
                    description,
                })
            }
        }
        other => Err(CsvError::UnrecognizedType {
            line,
            cmd_type: other.to_string(),
        }),
    }
}

/// Write friends and their balances in csv format
pub fn write_friends<'a>(
    writer: impl io::Write,
    friends: impl IntoIterator<Item = &'a Friend>,
) -> Result<(), CsvError> {
    let mut writer = csv::Writer::from_writer(writer);

    for friend in friends {
        writer.serialize(FriendRow {
            id: friend.id(),
            name: friend.name(),
            amount_owed: friend.amount_owed().to_string(),
            summary: BalanceSummary(friend.amount_owed()).to_string(),
        })?;
    }

    writer.flush()?;
    Ok(())
}

/// Write transaction history in csv format
pub fn write_history<'a>(
    writer: impl io::Write,
    transactions: impl IntoIterator<Item = &'a Transaction>,
) -> Result<(), CsvError> {
    let mut writer = csv::Writer::from_writer(writer);

    for tx in transactions {
        writer.serialize(HistoryRow {
            seq: tx.seq(),
            friend_id: tx.friend_id(),
            friend: tx.friend(),
            amount: tx.amount().to_string(),
            description: tx.description(),
        })?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Ledger;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    fn read(content: &str) -> Vec<Result<LedgerCommand, CsvError>> {
        let file = write_csv(content);
        read_commands(file.path()).unwrap().collect()
    }

    #[test]
    fn read_add_and_delete() {
        let results = read("type,friend,amount,description\nadd,John,,\ndelete,1,,\n");
        let commands: Vec<_> = results.into_iter().map(Result::unwrap).collect();
        assert_eq!(
            commands,
            [
                LedgerCommand::AddFriend {
                    name: "John".to_string()
                },
                LedgerCommand::DeleteFriend {
                    id: FriendId::new(1)
                },
            ]
        );
    }

    #[tokio::test]
    async fn commands_outlive_the_path_they_were_read_from() {
        let file = write_csv("type,friend,amount,description\nadd,John,,\nborrow,1,5,coffee\n");
        let commands = {
            let path = file.path().to_path_buf();
            read_commands(path).unwrap()
        };

        let reader = tokio::spawn(async move { commands.collect::<Vec<_>>() });
        let results = reader.await.unwrap();
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(Result::is_ok));
    }

    #[test]
    fn read_borrow_and_lend() {
        let results =
            read("type,friend,amount,description\nborrow,1,5,coffee\nlend,2,3.5,\n");
        let commands: Vec<_> = results.into_iter().map(Result::unwrap).collect();
        assert_eq!(
            commands,
            [
                LedgerCommand::Borrow {
                    friend: FriendId::new(1),
                    amount: "5".to_string(),
                    description: "coffee".to_string(),
                },
                LedgerCommand::Lend {
                    friend: FriendId::new(2),
                    amount: "3.5".to_string(),
                    description: String::new(),
                },
            ]
        );
    }

    #[test]
    fn read_short_rows() {
        let results = read("type,friend,amount,description\nadd,John\n");
        assert!(matches!(
            &results[..],
            [Ok(LedgerCommand::AddFriend { name })] if name == "John"
        ));
    }

    #[test]
    fn read_with_whitespace() {
        let results = read("type, friend, amount, description\nlend, 1, 10.0, dinner\n");
        assert!(matches!(
            &results[..],
            [Ok(LedgerCommand::Lend { amount, description, .. })]
                if amount == "10.0" && description == "dinner"
        ));
    }

    #[test]
    fn read_returns_error_for_unknown_type() {
        let results = read("type,friend,amount,description\nrefund,1,5,\n");
        assert!(matches!(
            results[0],
            Err(CsvError::UnrecognizedType { line: 2, .. })
        ));
    }

    #[test]
    fn read_returns_error_for_missing_amount() {
        let results = read("type,friend,amount,description\nadd,John,,\nlend,1,,\n");
        assert!(results[0].is_ok());
        assert!(matches!(
            results[1],
            Err(CsvError::MissingAmount { line: 3, .. })
        ));
    }

    #[test]
    fn read_returns_error_for_bad_friend_id() {
        let results = read("type,friend,amount,description\nborrow,John,5,\n");
        assert!(matches!(
            &results[0],
            Err(CsvError::InvalidFriendId { line: 2, value }) if value == "John"
        ));
    }

    #[test]
    fn open_missing_file_fails() {
        let result = read_commands("/definitely/not/here.csv");
        assert!(matches!(result, Err(CsvError::Open { .. })));
    }

    #[test]
    fn write_reports() {
        let mut ledger = Ledger::with_demo_friends();
        let john = ledger.find_by_name("John").unwrap().id();
        ledger.record_borrow(john, "25", "rent").unwrap();
        ledger.record_lend(john, "1.5", "bus").unwrap();

        let mut friends = Vec::new();
        write_friends(&mut friends, ledger.friends()).unwrap();
        assert_eq!(
            String::from_utf8(friends).unwrap(),
            "id,name,amount_owed,summary\n\
             1,John,-3.50,You owe: $3.50\n\
             2,Alice,10.00,Owes you: $10.00\n"
        );

        let mut history = Vec::new();
        write_history(&mut history, ledger.log()).unwrap();
        assert_eq!(
            String::from_utf8(history).unwrap(),
            "seq,friend_id,friend,amount,description\n\
             1,1,John,25.00,rent\n\
             2,1,John,-1.50,bus\n"
        );
    }
}
