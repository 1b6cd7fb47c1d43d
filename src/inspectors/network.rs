use super::{InspectError, Inspector};
use crate::logger::Logger;
use crate::probe::{ConnectivityProbe, ProbeOutcome};
use std::path::PathBuf;
use tracing::debug;

pub struct NetworkHintInspector {
    proc_dir: PathBuf,
}

impl NetworkHintInspector {
    pub fn new(proc_dir: impl Into<PathBuf>) -> Self {
        Self {
            proc_dir: proc_dir.into(),
        }
    }
}

impl Inspector for NetworkHintInspector {
    fn name(&self) -> &'static str {
        "network_hint"
    }

    fn run(&self, log: &mut Logger) -> Result<(), InspectError> {
        let net = self.proc_dir.join("net");
        let tables: Vec<String> = ["tcp", "udp", "tcp6", "udp6"]
            .iter()
            .map(|t| net.join(t).display().to_string())
            .collect();
        log.line(format_args!(
            "Network: see {} for connections (not fully parsed here).",
            tables.join(" ")
        ));
        Ok(())
    }
}

pub struct ConnectivityInspector {
    probe: Box<dyn ConnectivityProbe>,
}

impl ConnectivityInspector {
    pub fn new(probe: Box<dyn ConnectivityProbe>) -> Self {
        Self { probe }
    }
}

impl Inspector for ConnectivityInspector {
    fn name(&self) -> &'static str {
        "connectivity"
    }

    fn run(&self, log: &mut Logger) -> Result<(), InspectError> {
        let outcome = self.probe.attempt();
        debug!(
            host = self.probe.target(),
            reachable = outcome.is_reachable(),
            "connectivity probed"
        );
        match outcome {
            ProbeOutcome::Reachable => {
                log.line(format_args!("Connectivity: ping to {} OK", self.probe.target()))
            }
            ProbeOutcome::Unreachable(detail) => log.line(format_args!(
                "Connectivity: ping to {} FAILED (rc={detail})",
                self.probe.target()
            )),
        }
        Ok(())
    }
}
