//! Server configuration.
//!
//! Values are layered: built-in defaults, then an optional YAML file named by
//! the `CONFIG` environment variable, then the `LISTEN` environment variable,
//! and finally the `<address:port>` command line argument.

use anyhow::{Context, bail};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Address to bind, as `host:port`.
    pub listen_addr: String,
    /// Directory request targets are resolved against.
    pub root: PathBuf,
    /// Upper bound on the buffered request head.
    pub max_request_bytes: usize,
    /// Number of reads allowed before the request is considered incomplete.
    pub max_read_attempts: usize,
    pub read_timeout_ms: u64,
    pub write_timeout_ms: u64,
    /// Maximum number of connections handled at once.
    pub max_connections: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:8080".to_string(),
            root: PathBuf::from("."),
            max_request_bytes: 8192,
            max_read_attempts: 32,
            read_timeout_ms: 5000,
            write_timeout_ms: 5000,
            max_connections: 512,
        }
    }
}

impl Config {
    /// Loads configuration from the environment.
    pub fn load() -> anyhow::Result<Self> {
        let mut cfg = match std::env::var("CONFIG") {
            Ok(path) => Self::from_file(&path)?,
            Err(_) => Self::default(),
        };

        if let Ok(listen_addr) = std::env::var("LISTEN") {
            cfg.listen_addr = listen_addr;
        }

        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_yaml_str(&content)
            .with_context(|| format!("invalid config file {}", path.display()))
    }

    pub fn from_yaml_str(content: &str) -> anyhow::Result<Self> {
        let cfg: Config = serde_yaml::from_str(content)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Overrides the listen address with a command line `<address:port>` argument.
    pub fn with_listen_arg(mut self, arg: &str) -> anyhow::Result<Self> {
        match arg.rsplit_once(':') {
            Some((host, port)) if !host.is_empty() && !port.is_empty() => {
                self.listen_addr = arg.to_string();
                Ok(self)
            }
            _ => bail!("invalid listen address {arg:?}, expected <address:port>"),
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.max_request_bytes == 0 {
            bail!("max_request_bytes must be greater than zero");
        }
        if self.max_read_attempts == 0 {
            bail!("max_read_attempts must be greater than zero");
        }
        if self.max_connections == 0 {
            bail!("max_connections must be greater than zero");
        }
        if self.read_timeout_ms == 0 {
            bail!("read_timeout_ms must be greater than zero");
        }
        if self.write_timeout_ms == 0 {
            bail!("write_timeout_ms must be greater than zero");
        }
        Ok(())
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }

    pub fn write_timeout(&self) -> Duration {
        Duration::from_millis(self.write_timeout_ms)
    }
}
