use crate::config::Config;
use crate::driver::Driver;
use crate::guard::{Guard, GuardError};
use crate::logger::Logger;
use crate::probe::ConnectivityProbe;
use crate::report::ReportGenerator;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::{error, info};

pub const EXIT_OK: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;

pub fn run<R, W>(
    cfg: &Config,
    cwd: io::Result<PathBuf>,
    input: R,
    prompt: W,
    probe: Box<dyn ConnectivityProbe>,
) -> i32
where
    R: BufRead,
    W: Write,
{
    let mut log = match Logger::open(&cfg.log_path) {
        Ok(log) => log,
        Err(err) => {
            error!(error = %err, "cannot start without a log file");
            return EXIT_FAILURE;
        }
    };
    info!(log = log.path(), "hwbchat started");

    log.line("Program start.");

    if let Err(err) = Guard::new(cfg).check(&mut log, cwd) {
        if !matches!(err, GuardError::LockPresent { .. }) {
            log.line("Exiting because CWD is not required directory.");
        }
        error!(error = %err, "precondition failed");
        log.close();
        return EXIT_FAILURE;
    }

    let report = ReportGenerator::standard(cfg, probe);
    info!(inspectors = ?report.inspector_names(), "report generator ready");
    report.generate(&mut log);

    let mut driver = Driver::new(input, prompt);
    driver.run(&mut log, &report);
    info!(refreshes = driver.reports_generated(), "hwbchat finished");

    log.line("Program exit.");
    log.close();
    EXIT_OK
}
