use chrono::{DateTime, Local, TimeZone};
use std::fmt::Display;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use thiserror::Error;
use tracing::warn;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Error)]
#[error("cannot open log file {path}: {source}")]
pub struct LogError {
    pub path: String,
    pub source: std::io::Error,
}

#[derive(Debug)]
pub struct Logger {
    path: String,
    file: File,
}

impl Logger {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, LogError> {
        let path_ref = path.as_ref();
        let path_display = path_ref.display().to_string();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path_ref)
            .map_err(|source| LogError {
                path: path_display.clone(),
                source,
            })?;

        Ok(Self {
            path: path_display,
            file,
        })
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn line(&mut self, message: impl Display) {
        let text = format_line(&Local::now(), message);
        let written = self
            .file
            .write_all(text.as_bytes())
            .and_then(|()| self.file.flush());
        if let Err(err) = written {
            warn!(path = %self.path, error = %err, "failed to append to log file");
        }
    }

    pub fn close(mut self) {
        if let Err(err) = self.file.flush() {
            warn!(path = %self.path, error = %err, "failed to flush log file on close");
        }
    }
}

pub fn format_line<Tz>(timestamp: &DateTime<Tz>, message: impl Display) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    format!("[{}] {}\n", timestamp.format(TIMESTAMP_FORMAT), message)
}
