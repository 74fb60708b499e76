//! Runtime configuration for handover.
//!
//! Resolution order: **env var > `~/.handover/config` file > hardcoded default**.
//!
//! ```text
//! Field     Env Var             Config Key   Default
//! ───────── ─────────────────── ──────────── ─────────────────
//! dir       HANDOVER_DIR        —            ~/.handover
//! docker    HANDOVER_DOCKER     docker       docker
//! timeout   HANDOVER_TIMEOUT    timeout      30s (0 = no deadline)
//! ```

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;
use std::{env, fs};

use crate::docker::DEFAULT_DOCKER;

/// Default deadline for a single `docker inspect` call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandoverConfig {
    /// Base directory holding the `config` file.
    pub dir: PathBuf,
    /// Docker-compatible executable (`HANDOVER_DOCKER`).
    pub docker: String,
    /// Deadline for the inspect command (`HANDOVER_TIMEOUT` seconds). `None` waits forever.
    pub timeout: Option<Duration>,
}

impl HandoverConfig {
    /// Load config from env vars, `<dir>/config`, and hardcoded defaults.
    pub fn load(dir: &Path) -> Result<Self> {
        Self::load_with_env(dir, |k| env::var(k).ok())
    }

    fn load_with_env(dir: &Path, get_env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut cfg = Self::defaults(dir);

        let config_file = dir.join("config");
        if config_file.exists() {
            parse_config_file(&config_file, |key, value| cfg.apply_entry(key, value))
                .with_context(|| format!("failed to read {}", config_file.display()))?;
        }

        cfg.apply_env_overrides(get_env);
        Ok(cfg)
    }

    fn defaults(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
            docker: DEFAULT_DOCKER.to_string(),
            timeout: Some(DEFAULT_TIMEOUT),
        }
    }

    fn apply_entry(&mut self, key: &str, value: &str) {
        match key {
            "docker" if !value.is_empty() => self.docker = value.to_string(),
            "timeout" => {
                if let Some(t) = parse_timeout(value) {
                    self.timeout = t;
                }
            }
            _ => {}
        }
    }

    fn apply_env_overrides(&mut self, get_env: impl Fn(&str) -> Option<String>) {
        if let Some(v) = get_env("HANDOVER_DOCKER") {
            self.apply_entry("docker", &v);
        }
        if let Some(v) = get_env("HANDOVER_TIMEOUT") {
            self.apply_entry("timeout", &v);
        }
    }
}

/// `"0"` disables the deadline; anything unparseable is ignored.
fn parse_timeout(value: &str) -> Option<Option<Duration>> {
    match value.parse::<u64>() {
        Ok(0) => Some(None),
        Ok(n) => Some(Some(Duration::from_secs(n))),
        Err(_) => None,
    }
}

/// Return `$HANDOVER_DIR`, else `$HOME/.handover`, else `./.handover`.
pub fn default_handover_dir() -> PathBuf {
    if let Ok(dir) = env::var("HANDOVER_DIR") {
        return PathBuf::from(dir);
    }
    if let Ok(home) = env::var("HOME") {
        return PathBuf::from(home).join(".handover");
    }
    PathBuf::from(".handover")
}

/// Parse a `key=value` config file, calling `f` for each entry.
///
/// Lines starting with `#` and empty lines are skipped.
fn parse_config_file(path: &Path, mut f: impl FnMut(&str, &str)) -> Result<()> {
    let content = fs::read_to_string(path)?;
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((k, v)) = line.split_once('=') {
            f(k.trim(), v.trim());
        }
    }
    Ok(())
}
