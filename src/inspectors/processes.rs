use super::{InspectError, Inspector};
use crate::logger::Logger;
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

pub struct ProcessInspector {
    proc_dir: PathBuf,
    limit: usize,
}

impl ProcessInspector {
    pub fn new(proc_dir: impl Into<PathBuf>, limit: usize) -> Self {
        Self {
            proc_dir: proc_dir.into(),
            limit,
        }
    }
}

impl Inspector for ProcessInspector {
    fn name(&self) -> &'static str {
        "processes"
    }

    fn run(&self, log: &mut Logger) -> Result<(), InspectError> {
        let entries = fs::read_dir(&self.proc_dir)
            .map_err(|source| InspectError::read(&self.proc_dir, source))?;

        log.line(format_args!("Processes (snapshot, first {}):", self.limit));

        let mut listed = 0;
        for entry in entries.flatten() {
            if listed >= self.limit {
                break;
            }
            let Some(pid) = entry.file_name().to_str().and_then(parse_pid) else {
                continue;
            };
            let Some(comm) = read_comm(&entry.path().join("comm")) else {
                continue;
            };
            log.line(format_args!("  PID={pid} COMM={comm}"));
            listed += 1;
        }

        if listed == 0 {
            log.line("  (no processes listed?)");
        }
        Ok(())
    }
}

pub(crate) fn parse_pid(name: &str) -> Option<u32> {
    if name.is_empty() || !name.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    name.parse::<u32>().ok().filter(|pid| *pid > 0)
}

fn read_comm(path: &Path) -> Option<String> {
    let file = File::open(path).ok()?;
    let mut line = String::new();
    match BufReader::new(file).read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
    }
}
