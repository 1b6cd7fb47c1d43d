use super::{read_source, InspectError, Inspector};
use crate::logger::Logger;
use std::path::PathBuf;
use std::time::Duration;

pub struct UptimeInspector {
    path: PathBuf,
}

impl UptimeInspector {
    pub fn new(proc_dir: impl Into<PathBuf>) -> Self {
        Self {
            path: proc_dir.into().join("uptime"),
        }
    }
}

impl Inspector for UptimeInspector {
    fn name(&self) -> &'static str {
        "uptime"
    }

    fn run(&self, log: &mut Logger) -> Result<(), InspectError> {
        let text = read_source(&self.path)?;
        let Some((up, _idle)) = parse_uptime(&text) else {
            return Err(InspectError::Parse {
                path: self.path.display().to_string(),
                detail: "expected two floating-point fields".to_string(),
            });
        };

        let human = humantime::format_duration(Duration::from_secs(up.max(0.0) as u64));
        log.line(format_args!(
            "Uptime: {:.0} seconds ({:.2} hours, {human})",
            up,
            up / 3600.0
        ));
        Ok(())
    }
}

pub(crate) fn parse_uptime(text: &str) -> Option<(f64, f64)> {
    let mut fields = text.split_whitespace();
    let up = fields.next()?.parse::<f64>().ok()?;
    let idle = fields.next()?.parse::<f64>().ok()?;
    Some((up, idle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn parses_both_fields() {
        assert_eq!(parse_uptime("350735.47 234388.90\n"), Some((350735.47, 234388.90)));
    }

    #[test]
    fn rejects_single_or_garbage_fields() {
        assert_eq!(parse_uptime("350735.47\n"), None);
        assert_eq!(parse_uptime("up idle\n"), None);
        assert_eq!(parse_uptime(""), None);
    }

    #[test]
    fn logs_seconds_and_hours() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("uptime"), "7200.40 100.00\n").unwrap();
        let log_path = dir.path().join("agent.log");
        let mut log = Logger::open(&log_path).unwrap();

        UptimeInspector::new(dir.path()).run(&mut log).unwrap();
        log.close();

        let text = fs::read_to_string(&log_path).unwrap();
        assert!(
            text.contains("] Uptime: 7200 seconds (2.00 hours, 2h)"),
            "{text}"
        );
    }

    #[test]
    fn unparsable_source_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("uptime"), "garbage\n").unwrap();
        let mut log = Logger::open(dir.path().join("agent.log")).unwrap();

        let err = UptimeInspector::new(dir.path()).run(&mut log).unwrap_err();
        assert!(matches!(err, InspectError::Parse { .. }));
    }

    #[test]
    fn missing_source_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut log = Logger::open(dir.path().join("agent.log")).unwrap();

        let err = UptimeInspector::new(dir.path()).run(&mut log).unwrap_err();
        assert!(matches!(err, InspectError::Read { .. }));
    }
}
