use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;
use thiserror::Error;

pub const CONFIG_ENV: &str = "HWBCHAT_CONFIG";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default = "default_required_dir")]
    pub required_dir: String,
    #[serde(default = "default_log_path")]
    pub log_path: String,
    #[serde(default = "default_lock_path")]
    pub lock_path: String,
    #[serde(default = "default_process_limit")]
    pub process_limit: usize,
    #[serde(default)]
    pub sources: SourcesConfig,
    #[serde(default)]
    pub probe: ProbeConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SourcesConfig {
    #[serde(default = "default_proc_dir")]
    pub proc_dir: String,
    #[serde(default = "default_os_release")]
    pub os_release: String,
    #[serde(default = "default_disk_path")]
    pub disk_path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ProbeConfig {
    #[serde(default = "default_probe_program")]
    pub program: String,
    #[serde(default = "default_probe_target")]
    pub target: String,
    #[serde(default = "default_probe_count")]
    pub count: u32,
    #[serde(default = "default_probe_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            required_dir: default_required_dir(),
            log_path: default_log_path(),
            lock_path: default_lock_path(),
            process_limit: default_process_limit(),
            sources: SourcesConfig::default(),
            probe: ProbeConfig::default(),
        }
    }
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            proc_dir: default_proc_dir(),
            os_release: default_os_release(),
            disk_path: default_disk_path(),
        }
    }
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            program: default_probe_program(),
            target: default_probe_target(),
            count: default_probe_count(),
            timeout_secs: default_probe_timeout_secs(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse YAML in {path}: {source}")]
    Parse {
        path: String,
        source: serde_yaml::Error,
    },
    #[error("invalid configuration: {0}")]
    Validation(String),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        match env::var_os(CONFIG_ENV) {
            Some(path) if !path.is_empty() => Self::load_from_file(path),
            _ => Ok(Self::default()),
        }
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path_ref = path.as_ref();
        let path_display = path_ref.display().to_string();
        let text = fs::read_to_string(path_ref).map_err(|source| ConfigError::Read {
            path: path_display.clone(),
            source,
        })?;

        let cfg = Self::from_yaml_str(&text).map_err(|err| match err {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: path_display,
                source,
            },
            other => other,
        })?;
        Ok(cfg)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        let cfg: Config = serde_yaml::from_str(text).map_err(|source| ConfigError::Parse {
            path: "<inline>".to_string(),
            source,
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty("required_dir", &self.required_dir)?;
        require_non_empty("log_path", &self.log_path)?;
        require_non_empty("lock_path", &self.lock_path)?;
        if self.process_limit == 0 {
            return Err(ConfigError::Validation(
                "process_limit must be >= 1".to_string(),
            ));
        }

        require_non_empty("sources.proc_dir", &self.sources.proc_dir)?;
        require_non_empty("sources.os_release", &self.sources.os_release)?;
        require_non_empty("sources.disk_path", &self.sources.disk_path)?;

        validate_probe(&self.probe)
    }

    pub fn example_yaml() -> &'static str {
        include_str!("../hwbchat.yaml.example")
    }
}

fn validate_probe(cfg: &ProbeConfig) -> Result<(), ConfigError> {
    require_non_empty("probe.program", &cfg.program)?;
    require_non_empty("probe.target", &cfg.target)?;
    if cfg.count == 0 {
        return Err(ConfigError::Validation(
            "probe.count must be >= 1".to_string(),
        ));
    }
    if cfg.timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "probe.timeout_secs must be >= 1".to_string(),
        ));
    }
    Ok(())
}

fn require_non_empty(field: &str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!(
            "field {field} must not be empty"
        )));
    }
    Ok(())
}

fn default_required_dir() -> String {
    "/opt/cataised/hbwchat".to_string()
}

fn default_log_path() -> String {
    "/opt/cataised/hwbchat.log".to_string()
}

fn default_lock_path() -> String {
    "/tmp/hwbchat.lock".to_string()
}

const fn default_process_limit() -> usize {
    20
}

fn default_proc_dir() -> String {
    "/proc".to_string()
}

fn default_os_release() -> String {
    "/etc/os-release".to_string()
}

fn default_disk_path() -> String {
    "/".to_string()
}

fn default_probe_program() -> String {
    "ping".to_string()
}

fn default_probe_target() -> String {
    "8.8.8.8".to_string()
}

const fn default_probe_count() -> u32 {
    1
}

const fn default_probe_timeout_secs() -> u64 {
    2
}
