use crate::protocol::{CommandRecord, EpochMillis, StatusReply};
use crate::{Error, Result};
use chrono::{Local, TimeZone};
use std::fmt;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub struct ReportFormatter<Tz: TimeZone> {
    tz: Tz,
}

impl ReportFormatter<Local> {
    /// Formatter rendering timestamps in the process's local time zone.
    pub fn local() -> Self {
        Self::new(Local)
    }
}

impl<Tz> ReportFormatter<Tz>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    /// Renders epoch milliseconds as `YYYY-MM-DD HH:MM:SS`, dropping the
    /// sub-second part.
    pub fn format_epoch(&self, millis: &EpochMillis) -> Result<String> {
        let millis = millis.as_millis()?;
        let time = self
            .tz
            .timestamp_opt(millis.div_euclid(1000), 0)
            .earliest()
            .ok_or_else(|| Error::Format(millis.to_string()))?;
        Ok(time.format(TIMESTAMP_FORMAT).to_string())
    }

    pub fn render_status(&self, status: &StatusReply) -> Result<Vec<String>> {
        let last_run = if status.last_start_ms.is_never() {
            "never".to_string()
        } else {
            self.format_epoch(&status.last_start_ms)?
        };

        Ok(vec![
            status.status.clone(),
            format!("Last run: {}", last_run),
            String::new(),
        ])
    }

    /// One block per command, executions most recent first.
    pub fn render_history(&self, history: &[CommandRecord]) -> Result<Vec<String>> {
        let mut lines = Vec::new();
        for command in history {
            lines.push(format!("Command: {}", command.command));
            for run in command.executions.iter().rev() {
                lines.push(format!(
                    "    {} ({:.1} sec) Exit:{}",
                    self.format_epoch(&run.start_ms)?,
                    run.duration_secs()?,
                    run.exit_code
                ));
            }
        }
        Ok(lines)
    }

    pub fn render(&self, status: &StatusReply, history: &[CommandRecord]) -> Result<Vec<String>> {
        let mut lines = self.render_status(status)?;
        lines.extend(self.render_history(history)?);
        Ok(lines)
    }
}
