use crate::config::Config;
use crate::logger::Logger;
use std::ffi::OsStr;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GuardError {
    #[error("cannot determine current directory: {0}")]
    CurrentDir(#[source] io::Error),
    #[error("running from {cwd}, required {required}")]
    WrongDirectory { cwd: String, required: String },
    #[error("lock file {path} is present")]
    LockPresent { path: String },
}

/// Startup preconditions: the required working directory and the absence of
/// the lock file. The lock file is only observed, never created or removed.
#[derive(Debug, Clone)]
pub struct Guard {
    required_dir: String,
    lock_path: String,
}

impl Guard {
    pub fn new(cfg: &Config) -> Self {
        Self {
            required_dir: cfg.required_dir.clone(),
            lock_path: cfg.lock_path.clone(),
        }
    }

    /// Runs the directory check, then the lock check. The lock file is not
    /// looked at when the directory check fails.
    pub fn check(&self, log: &mut Logger, cwd: io::Result<PathBuf>) -> Result<(), GuardError> {
        self.check_directory(log, cwd)?;
        self.check_lock(log)
    }

    fn check_directory(&self, log: &mut Logger, cwd: io::Result<PathBuf>) -> Result<(), GuardError> {
        let cwd = match cwd {
            Ok(cwd) => cwd,
            Err(err) => {
                log.line(format_args!("ERROR: getcwd failed: {err}"));
                return Err(GuardError::CurrentDir(err));
            }
        };

        // Compared as raw strings: `Path` equality would ignore a trailing slash.
        if cwd.as_os_str() == OsStr::new(&self.required_dir) {
            log.line(format_args!(
                "OK: Running from required directory: {}",
                cwd.display()
            ));
            return Ok(());
        }

        log.line(format_args!(
            "FAIL: Not running from required directory. CWD={} REQUIRED={}",
            cwd.display(),
            self.required_dir
        ));
        Err(GuardError::WrongDirectory {
            cwd: cwd.display().to_string(),
            required: self.required_dir.clone(),
        })
    }

    fn check_lock(&self, log: &mut Logger) -> Result<(), GuardError> {
        if lock_present(Path::new(&self.lock_path)) {
            log.line(format_args!("Lock file exists ({}). Exiting.", self.lock_path));
            return Err(GuardError::LockPresent {
                path: self.lock_path.clone(),
            });
        }

        log.line(format_args!("OK: No lock file at {}", self.lock_path));
        Ok(())
    }
}

fn lock_present(path: &Path) -> bool {
    // Same test as stat(2): a dangling symlink does not count.
    path.metadata().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    struct Fixture {
        _dir: tempfile::TempDir,
        cfg: Config,
        log_path: PathBuf,
        lock_path: PathBuf,
        required: PathBuf,
    }

    fn fixture() -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let required = dir.path().join("work");
        fs::create_dir(&required).unwrap();
        let log_path = dir.path().join("agent.log");
        let lock_path = dir.path().join("agent.lock");
        let cfg = Config {
            required_dir: required.display().to_string(),
            log_path: log_path.display().to_string(),
            lock_path: lock_path.display().to_string(),
            ..Config::default()
        };
        Fixture {
            _dir: dir,
            cfg,
            log_path,
            lock_path,
            required,
        }
    }

    fn run_guard(fx: &Fixture, cwd: io::Result<PathBuf>) -> (Result<(), GuardError>, String) {
        let mut log = Logger::open(&fx.log_path).unwrap();
        let result = Guard::new(&fx.cfg).check(&mut log, cwd);
        log.close();
        (result, fs::read_to_string(&fx.log_path).unwrap())
    }

    #[test]
    fn passes_in_required_dir_without_lock() {
        let fx = fixture();
        let (result, text) = run_guard(&fx, Ok(fx.required.clone()));
        assert!(result.is_ok());
        assert!(text.contains("OK: Running from required directory:"));
        assert!(text.contains("OK: No lock file at"));
    }

    #[test]
    fn wrong_directory_skips_lock_check() {
        let fx = fixture();
        fs::write(&fx.lock_path, b"").unwrap();
        let (result, text) = run_guard(&fx, Ok(PathBuf::from("/tmp")));
        assert!(matches!(result, Err(GuardError::WrongDirectory { .. })));
        assert!(text.contains("FAIL: Not running from required directory. CWD=/tmp REQUIRED="));
        assert!(!text.contains("Lock file"));
        assert!(!text.contains("lock file"));
    }

    #[test]
    fn trailing_slash_is_not_normalised() {
        let fx = fixture();
        let with_slash = PathBuf::from(format!("{}/", fx.required.display()));
        let (result, _) = run_guard(&fx, Ok(with_slash));
        assert!(matches!(result, Err(GuardError::WrongDirectory { .. })));
    }

    #[test]
    fn unreadable_cwd_fails_the_directory_check() {
        let fx = fixture();
        let cwd = Err(io::Error::new(io::ErrorKind::NotFound, "gone"));
        let (result, text) = run_guard(&fx, cwd);
        assert!(matches!(result, Err(GuardError::CurrentDir(_))));
        assert!(text.contains("ERROR: getcwd failed: gone"));
    }

    #[test]
    fn lock_file_blocks_startup() {
        let fx = fixture();
        fs::write(&fx.lock_path, b"owner=someone-else").unwrap();
        let (result, text) = run_guard(&fx, Ok(fx.required.clone()));
        assert!(matches!(result, Err(GuardError::LockPresent { .. })));
        assert!(text.contains("Lock file exists ("));
        assert!(fx.lock_path.exists(), "lock file must be left in place");
    }

    #[test]
    fn lock_directory_also_counts_as_present() {
        let fx = fixture();
        fs::create_dir(&fx.lock_path).unwrap();
        let (result, _) = run_guard(&fx, Ok(fx.required.clone()));
        assert!(matches!(result, Err(GuardError::LockPresent { .. })));
    }
}
