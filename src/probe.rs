use crate::config::ProbeConfig;
use std::fmt;
use std::process::{Command, ExitStatus, Stdio};
use tracing::debug;

pub trait ConnectivityProbe {
    fn target(&self) -> &str;
    fn attempt(&self) -> ProbeOutcome;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    Reachable,
    Unreachable(ExitDetail),
}

impl ProbeOutcome {
    pub fn is_reachable(&self) -> bool {
        matches!(self, ProbeOutcome::Reachable)
    }

    fn from_status(status: ExitStatus) -> Self {
        match status.code() {
            Some(0) => ProbeOutcome::Reachable,
            Some(code) => ProbeOutcome::Unreachable(ExitDetail::Code(code)),
            None => ProbeOutcome::Unreachable(ExitDetail::Signal),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExitDetail {
    Code(i32),
    Signal,
    Spawn(String),
}

impl fmt::Display for ExitDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitDetail::Code(code) => write!(f, "{code}"),
            ExitDetail::Signal => write!(f, "signal"),
            ExitDetail::Spawn(err) => write!(f, "spawn error: {err}"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PingProbe {
    program: String,
    target: String,
    count: u32,
    timeout_secs: u64,
}

impl PingProbe {
    pub fn from_config(cfg: &ProbeConfig) -> Self {
        Self {
            program: cfg.program.clone(),
            target: cfg.target.clone(),
            count: cfg.count,
            timeout_secs: cfg.timeout_secs,
        }
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg("-c")
            .arg(self.count.to_string())
            .arg("-W")
            .arg(self.timeout_secs.to_string())
            .arg(&self.target)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        cmd
    }
}

impl ConnectivityProbe for PingProbe {
    fn target(&self) -> &str {
        &self.target
    }

    fn attempt(&self) -> ProbeOutcome {
        match self.command().status() {
            Ok(status) => {
                debug!(program = %self.program, host = %self.target, %status, "probe finished");
                ProbeOutcome::from_status(status)
            }
            Err(err) => {
                debug!(program = %self.program, error = %err, "probe could not be started");
                ProbeOutcome::Unreachable(ExitDetail::Spawn(err.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn probe_with(program: &str) -> PingProbe {
        PingProbe::from_config(&ProbeConfig {
            program: program.to_string(),
            ..ProbeConfig::default()
        })
    }

    #[test]
    fn command_line_matches_single_echo_request() {
        let probe = PingProbe::from_config(&ProbeConfig::default());
        let cmd = probe.command();
        assert_eq!(cmd.get_program(), std::ffi::OsStr::new("ping"));
        let args: Vec<_> = cmd.get_args().map(|a| a.to_string_lossy().into_owned()).collect();
        assert_eq!(args, ["-c", "1", "-W", "2", "8.8.8.8"]);
    }

    #[test]
    fn zero_exit_is_reachable() {
        // `true` ignores its arguments and exits 0.
        let outcome = probe_with("true").attempt();
        assert!(outcome.is_reachable());
    }

    #[test]
    fn non_zero_exit_keeps_the_code() {
        let outcome = probe_with("false").attempt();
        assert_eq!(outcome, ProbeOutcome::Unreachable(ExitDetail::Code(1)));
    }

    #[test]
    fn missing_program_is_a_spawn_failure() {
        let outcome = probe_with("/nonexistent/hwbchat-ping").attempt();
        match outcome {
            ProbeOutcome::Unreachable(ExitDetail::Spawn(msg)) => assert!(!msg.is_empty()),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn exit_detail_display() {
        assert_eq!(ExitDetail::Code(2).to_string(), "2");
        assert_eq!(ExitDetail::Signal.to_string(), "signal");
        assert_eq!(
            ExitDetail::Spawn("denied".to_string()).to_string(),
            "spawn error: denied"
        );
    }
}
