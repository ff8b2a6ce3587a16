use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use reqwest::Url;
use serde::Deserialize;

/// Environment variable naming the configuration file.
pub const CONFIG_ENV: &str = "JENKINS_DL_CONFIG";

/// Settings read from `config.toml`. Command-line flags take precedence.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub server: Option<String>,
    pub quiet: Option<bool>,
    pub replace: Option<bool>,
    pub dstdir: Option<PathBuf>,
    pub artifact: Option<String>,
}

impl Config {
    /// Load from `explicit`, else `$JENKINS_DL_CONFIG`, else the user config
    /// directory. Only the last location may be absent.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let chosen = explicit
            .map(Path::to_path_buf)
            .or_else(|| env::var_os(CONFIG_ENV).map(PathBuf::from));

        match chosen {
            Some(path) => Self::from_file(&path),
            None => match default_path() {
                Some(path) if path.is_file() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("Failed to parse config {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// The job URL from the flag, or from the file when no flag was given.
    pub fn server(&self, flag: Option<&str>) -> Result<Url> {
        let Some(raw) = flag.or(self.server.as_deref()) else {
            bail!("--server is required (or set `server` in the config file)");
        };
        Url::parse(raw).with_context(|| format!("parse url {raw:?}"))
    }
}

pub fn default_path() -> Option<PathBuf> {
    user_config().map(|p| p.join("jenkins-dl").join("config.toml"))
}

fn user_config() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        env::var_os("APPDATA").map(PathBuf::from)
    }
    #[cfg(target_os = "macos")]
    {
        home::home_dir().map(|p| p.join("Library/Application Support"))
    }
    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| home::home_dir().map(|p| p.join(".config")))
    }
}
