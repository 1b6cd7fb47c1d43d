pub mod disk;
pub mod memory;
pub mod network;
pub mod os;
pub mod processes;
pub mod uptime;

use crate::logger::Logger;
use std::path::Path;
use thiserror::Error;

pub trait Inspector {
    fn name(&self) -> &'static str;
    fn run(&self, log: &mut Logger) -> Result<(), InspectError>;
}

#[derive(Debug, Error)]
pub enum InspectError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {detail}")]
    Parse { path: String, detail: String },
    #[error("statvfs('{path}'): {source}")]
    Stat { path: String, source: nix::Error },
}

impl InspectError {
    pub(crate) fn read(path: &Path, source: std::io::Error) -> Self {
        InspectError::Read {
            path: path.display().to_string(),
            source,
        }
    }
}

pub(crate) fn read_source(path: &Path) -> Result<String, InspectError> {
    std::fs::read_to_string(path).map_err(|source| InspectError::read(path, source))
}

const MIB: u64 = 1024 * 1024;

pub(crate) fn bytes_to_mb(bytes: u64) -> u64 {
    bytes / MIB
}

pub(crate) fn kb_to_mb(kb: u64) -> u64 {
    kb / 1024
}
