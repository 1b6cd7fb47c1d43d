mod app;
mod config;
mod driver;
mod guard;
mod inspectors;
mod logger;
mod probe;
mod report;

use config::Config;
use probe::PingProbe;
use std::io;
use tracing::error;
use tracing_subscriber::EnvFilter;

fn main() {
    init_tracing();

    let cfg = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(err) => {
            error!(error = %err, "failed to load configuration");
            std::process::exit(app::EXIT_FAILURE);
        }
    };

    let probe = Box::new(PingProbe::from_config(&cfg.probe));
    let stdin = io::stdin();
    let code = app::run(
        &cfg,
        std::env::current_dir(),
        stdin.lock(),
        io::stdout(),
        probe,
    );
    std::process::exit(code);
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
