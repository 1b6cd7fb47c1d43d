use super::{InspectError, Inspector};
use crate::logger::Logger;
use std::fs;
use std::path::{Path, PathBuf};
use sysinfo::{System, SystemExt};

pub struct OsCpuInspector {
    os_release: PathBuf,
    proc_dir: PathBuf,
}

impl OsCpuInspector {
    pub fn new(os_release: impl Into<PathBuf>, proc_dir: impl Into<PathBuf>) -> Self {
        Self {
            os_release: os_release.into(),
            proc_dir: proc_dir.into(),
        }
    }
}

impl Inspector for OsCpuInspector {
    fn name(&self) -> &'static str {
        "os_cpu"
    }

    fn run(&self, log: &mut Logger) -> Result<(), InspectError> {
        match fs::read_to_string(&self.os_release) {
            Ok(text) => {
                if let Some(name) = pretty_name(&text) {
                    log.line(format_args!("OS: {name}"));
                }
            }
            Err(err) => log.line(format_args!(
                "WARN: unable to read {}: {err}",
                self.os_release.display()
            )),
        }

        let cpuinfo = self.proc_dir.join("cpuinfo");
        match fs::read_to_string(&cpuinfo) {
            Ok(text) => {
                if let Some(model) = cpu_model(&text) {
                    log.line(format_args!("CPU: {model}"));
                }
            }
            Err(err) => log.line(format_args!(
                "WARN: unable to read {}: {err}",
                cpuinfo.display()
            )),
        }

        let kernel_dir = self.proc_dir.join("sys/kernel");
        let system = System::new();
        let host = kernel_value(&kernel_dir.join("hostname")).or_else(|| system.host_name());
        if let Some(host) = host {
            log.line(format_args!("Host: {host}"));
        }
        let kernel =
            kernel_value(&kernel_dir.join("osrelease")).or_else(|| system.kernel_version());
        if let Some(kernel) = kernel {
            log.line(format_args!("Kernel: {kernel}"));
        }

        Ok(())
    }
}

// Single-value files under `<proc>/sys/kernel`; sysinfo covers hosts
// where they are missing.
fn kernel_value(path: &Path) -> Option<String> {
    let text = fs::read_to_string(path).ok()?;
    let value = text.trim();
    (!value.is_empty()).then(|| value.to_string())
}

pub(crate) fn pretty_name(os_release: &str) -> Option<&str> {
    os_release
        .lines()
        .find_map(|line| line.strip_prefix("PRETTY_NAME="))
        .map(|value| {
            let value = value.trim_end_matches('\r');
            value
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .unwrap_or(value)
        })
}

/// First "model name" line, or "Hardware" on ARM boards that lack it.
pub(crate) fn cpu_model(cpuinfo: &str) -> Option<&str> {
    cpuinfo
        .lines()
        .find(|line| line.starts_with("model name") || line.starts_with("Hardware"))
        .map(|line| match line.split_once(':') {
            Some((_, value)) => value.trim(),
            None => line.trim(),
        })
}
