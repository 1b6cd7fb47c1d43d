use crate::config::Config;
use crate::inspectors::disk::DiskInspector;
use crate::inspectors::memory::MemoryInspector;
use crate::inspectors::network::{ConnectivityInspector, NetworkHintInspector};
use crate::inspectors::os::OsCpuInspector;
use crate::inspectors::processes::ProcessInspector;
use crate::inspectors::uptime::UptimeInspector;
use crate::inspectors::Inspector;
use crate::logger::Logger;
use crate::probe::ConnectivityProbe;
use tracing::debug;

pub const BEGIN_MARKER: &str = "---- BEGIN REPORT ----";
pub const END_MARKER: &str = "---- END REPORT ----";

pub struct ReportGenerator {
    inspectors: Vec<Box<dyn Inspector>>,
}

impl ReportGenerator {
    pub fn new(inspectors: Vec<Box<dyn Inspector>>) -> Self {
        Self { inspectors }
    }

    pub fn standard(cfg: &Config, probe: Box<dyn ConnectivityProbe>) -> Self {
        let src = &cfg.sources;
        Self::new(vec![
            Box::new(OsCpuInspector::new(&src.os_release, &src.proc_dir)),
            Box::new(UptimeInspector::new(&src.proc_dir)),
            Box::new(DiskInspector::new(&src.disk_path)),
            Box::new(MemoryInspector::new(&src.proc_dir)),
            Box::new(ProcessInspector::new(&src.proc_dir, cfg.process_limit)),
            Box::new(NetworkHintInspector::new(&src.proc_dir)),
            Box::new(ConnectivityInspector::new(probe)),
        ])
    }

    pub fn inspector_names(&self) -> Vec<&'static str> {
        self.inspectors.iter().map(|i| i.name()).collect()
    }

    pub fn generate(&self, log: &mut Logger) {
        log.line(BEGIN_MARKER);
        for inspector in &self.inspectors {
            match inspector.run(log) {
                Ok(()) => debug!(inspector = inspector.name(), "inspector finished"),
                Err(err) => {
                    debug!(inspector = inspector.name(), error = %err, "inspector degraded");
                    log.line(format_args!("ERROR: {err}"));
                }
            }
        }
        log.line(END_MARKER);
    }
}
