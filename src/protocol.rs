use crate::{Error, Result};
use serde::Deserialize;

/// Commands understood by the overseer text interface that this client sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Status,
    History,
    Close,
}

impl Command {
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Status => "status",
            Command::History => "history",
            Command::Close => "close",
        }
    }
}

/// Epoch milliseconds as sent by the server, either a JSON number or a string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum EpochMillis {
    Number(i64),
    Text(String),
}

/// Value the server reports for `last_start_ms` before anything has run.
pub const NEVER_STARTED: &str = "NONE";

impl EpochMillis {
    pub fn as_millis(&self) -> Result<i64> {
        match self {
            EpochMillis::Number(millis) => Ok(*millis),
            EpochMillis::Text(text) => text
                .trim()
                .parse::<i64>()
                .map_err(|_| Error::Format(text.clone())),
        }
    }

    pub fn is_never(&self) -> bool {
        matches!(self, EpochMillis::Text(text) if text == NEVER_STARTED)
    }
}

impl From<i64> for EpochMillis {
    fn from(millis: i64) -> Self {
        EpochMillis::Number(millis)
    }
}

impl From<&str> for EpochMillis {
    fn from(text: &str) -> Self {
        EpochMillis::Text(text.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StatusReply {
    pub status: String,
    pub last_start_ms: EpochMillis,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExecutionRecord {
    pub start_ms: EpochMillis,
    pub end_ms: EpochMillis,
    pub exit_code: i64,
}

impl ExecutionRecord {
    /// Elapsed seconds between start and end. Negative if the server's clock
    /// went backwards.
    pub fn duration_secs(&self) -> Result<f64> {
        let elapsed = self.end_ms.as_millis()?.saturating_sub(self.start_ms.as_millis()?);
        Ok(elapsed as f64 / 1000.0)
    }
}

/// Executions of a single command, oldest first.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CommandRecord {
    pub command: String,
    pub executions: Vec<ExecutionRecord>,
}

pub type HistoryReply = Vec<CommandRecord>;
