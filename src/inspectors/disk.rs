use super::{bytes_to_mb, InspectError, Inspector};
use crate::logger::Logger;
use nix::sys::statvfs::statvfs;
use std::path::PathBuf;

pub struct DiskInspector {
    path: PathBuf,
}

impl DiskInspector {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Inspector for DiskInspector {
    fn name(&self) -> &'static str {
        "disk"
    }

    fn run(&self, log: &mut Logger) -> Result<(), InspectError> {
        let stats = statvfs(self.path.as_path()).map_err(|source| InspectError::Stat {
            path: self.path.display().to_string(),
            source,
        })?;

        let usage = DiskUsage::from_blocks(
            stats.fragment_size() as u64,
            stats.blocks() as u64,
            stats.blocks_free() as u64,
            stats.blocks_available() as u64,
        );
        log.line(format_args!(
            "Disk ({}): total={} MB used={} MB avail={} MB",
            self.path.display(),
            bytes_to_mb(usage.total_bytes),
            bytes_to_mb(usage.used_bytes),
            bytes_to_mb(usage.available_bytes),
        ));
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiskUsage {
    pub total_bytes: u64,
    pub available_bytes: u64,
    pub used_bytes: u64,
}

impl DiskUsage {
    pub fn from_blocks(block_size: u64, blocks: u64, free: u64, available: u64) -> Self {
        let total_bytes = block_size.saturating_mul(blocks);
        let free_bytes = block_size.saturating_mul(free);
        let available_bytes = block_size.saturating_mul(available);
        Self {
            total_bytes,
            available_bytes,
            used_bytes: total_bytes.saturating_sub(free_bytes),
        }
    }
}
