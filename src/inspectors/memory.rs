use super::{kb_to_mb, read_source, InspectError, Inspector};
use crate::logger::Logger;
use std::path::PathBuf;

pub struct MemoryInspector {
    path: PathBuf,
}

impl MemoryInspector {
    pub fn new(proc_dir: impl Into<PathBuf>) -> Self {
        Self {
            path: proc_dir.into().join("meminfo"),
        }
    }
}

impl Inspector for MemoryInspector {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn run(&self, log: &mut Logger) -> Result<(), InspectError> {
        let info = MemInfo::parse(&read_source(&self.path)?);
        log.line(format_args!(
            "Memory: MemTotal={} MB MemAvailable={} MB MemFree={} MB",
            kb_to_mb(info.mem_total_kb),
            kb_to_mb(info.mem_available_kb),
            kb_to_mb(info.mem_free_kb),
        ));
        log.line(format_args!(
            "Swap:   SwapTotal={} MB SwapFree={} MB",
            kb_to_mb(info.swap_total_kb),
            kb_to_mb(info.swap_free_kb),
        ));
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemInfo {
    pub mem_total_kb: u64,
    pub mem_free_kb: u64,
    pub mem_available_kb: u64,
    pub swap_total_kb: u64,
    pub swap_free_kb: u64,
}

impl MemInfo {
    pub fn parse(text: &str) -> Self {
        let mut info = Self::default();
        for line in text.lines() {
            let Some((key, rest)) = line.split_once(':') else {
                continue;
            };
            let Some(value) = rest
                .split_whitespace()
                .next()
                .and_then(|v| v.parse::<u64>().ok())
            else {
                continue;
            };
            match key {
                "MemTotal" => info.mem_total_kb = value,
                "MemFree" => info.mem_free_kb = value,
                "MemAvailable" => info.mem_available_kb = value,
                "SwapTotal" => info.swap_total_kb = value,
                "SwapFree" => info.swap_free_kb = value,
                _ => {}
            }
        }
        info
    }
}
