use anyhow::{anyhow, Result};
use directories::{BaseDirs, ProjectDirs};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use crate::cli::{Cli, Commands};

const APP_NAME: &str = "explorer";
const ENV_PREFIX: &str = "EXPLORER_";

/// Service configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Socket address the HTTP server binds to
    pub listen: String,
    /// SQLite database path, or ":memory:"
    pub database: String,
    #[serde(default)]
    pub github: GitHubConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GitHubConfig {
    pub api_url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LogConfig {
    pub level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen: "127.0.0.1:8080".to_string(),
            database: default_database_path().display().to_string(),
            github: GitHubConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: github_backend::DEFAULT_API_URL.to_string(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Layer defaults, TOML files and `EXPLORER_*` environment variables
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        if let Some(path) = config_path {
            if !path.exists() {
                return Err(anyhow!("Config file not found: {}", path.display()));
            }
        }

        for path in config_paths(config_path) {
            if path.exists() {
                figment = figment.merge(Toml::file(path));
            }
        }

        // EXPLORER_GITHUB__API_URL -> github.api_url
        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        figment
            .extract()
            .map_err(|e| anyhow!("Failed to load config: {}", e))
    }

    /// Apply command-line overrides on top of the loaded configuration
    pub fn merge_with_cli(&mut self, cli: &Cli) {
        if let Some(database) = &cli.database {
            self.database = database.clone();
        }
        if let Some(url) = &cli.github_url {
            self.github.api_url = url.clone();
        }
        if let Some(level) = &cli.log_level {
            self.log.level = level.clone();
        }
        if let Commands::Serve {
            listen: Some(listen),
        } = &cli.command
        {
            self.listen = listen.clone();
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.listen_addr()?;
        if self.github.api_url.trim().is_empty() {
            return Err(anyhow!(
                "GitHub API URL not configured. Set via --github-url, EXPLORER_GITHUB__API_URL env var, or config file"
            ));
        }
        if self.database.trim().is_empty() {
            return Err(anyhow!(
                "Database path not configured. Set via --database, EXPLORER_DATABASE env var, or config file"
            ));
        }
        Ok(())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen
            .parse()
            .map_err(|e| anyhow!("Invalid listen address '{}': {}", self.listen, e))
    }
}

fn default_database_path() -> PathBuf {
    ProjectDirs::from("", "", APP_NAME)
        .map(|d| d.data_dir().join("explorer.db"))
        .unwrap_or_else(|| PathBuf::from("explorer.db"))
}

fn config_paths(explicit: Option<&Path>) -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Some(path) = explicit {
        paths.push(path.to_path_buf());
        return paths;
    }

    if let Some(path) = get_project_config_path() {
        push_unique(&mut paths, path);
    }
    if let Some(path) = get_xdg_config_path() {
        push_unique(&mut paths, path);
    }
    if let Some(path) = get_local_config_path() {
        push_unique(&mut paths, path);
    }

    paths
}

fn push_unique(paths: &mut Vec<PathBuf>, path: PathBuf) {
    if !paths.contains(&path) {
        paths.push(path);
    }
}

fn get_project_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", APP_NAME).map(|d| d.config_dir().join("config.toml"))
}

fn get_xdg_config_path() -> Option<PathBuf> {
    if let Some(dir) = std::env::var_os("XDG_CONFIG_HOME") {
        return Some(PathBuf::from(dir).join(APP_NAME).join("config.toml"));
    }

    BaseDirs::new().map(|dirs| {
        dirs.home_dir()
            .join(".config")
            .join(APP_NAME)
            .join("config.toml")
    })
}

fn get_local_config_path() -> Option<PathBuf> {
    std::env::current_dir()
        .ok()
        .map(|dir| dir.join("explorer.toml"))
}
