use crate::order::DEFAULT_UPSTREAM_URL;
use anyhow::Result;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Main configuration structure that can be loaded from CLI, config file, or environment
///
/// Example configuration file content
/// # Boost Relay Configuration
///
/// # Server configuration
/// listen_on_port = 5000
/// host = "0.0.0.0"
/// static_dir = "./public"
///
/// # Upstream configuration
/// upstream_url = "https://zefame-free.com/api_free.php"
/// timeout_secs = 30
///
/// # Fixed correlation id (optional, random when unset)
/// device_id = "0f8fad5b-d9cb-469f-a165-70867728950e"
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[serde(default)]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = 5000)]
    #[serde(default = "default_port")]
    pub listen_on_port: u16,

    /// Address to bind
    #[arg(long, default_value = "0.0.0.0")]
    #[serde(default = "default_host")]
    pub host: String,

    /// Device id sent with every order (random when unset)
    #[arg(short, long, env = "DEVICE_ID")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,

    /// Upstream order endpoint
    #[arg(short, long, default_value = DEFAULT_UPSTREAM_URL)]
    #[serde(default = "default_upstream_url")]
    pub upstream_url: String,

    /// Upstream request timeout in seconds
    #[arg(short, long, default_value_t = 30)]
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Directory containing index.html
    #[arg(short, long, default_value = ".")]
    #[serde(default = "default_static_dir")]
    pub static_dir: String,

    /// Configuration file path
    #[arg(short, long)]
    #[serde(skip)]
    pub config: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_on_port: default_port(),
            host: default_host(),
            device_id: None,
            upstream_url: default_upstream_url(),
            timeout_secs: default_timeout_secs(),
            static_dir: default_static_dir(),
            config: None,
        }
    }
}

impl Config {
    /// Load configuration from CLI args, optionally merging with a config file
    pub fn load() -> Result<Self> {
        let mut config = Config::parse();

        if let Some(config_path) = &config.config {
            let file_config = Self::from_file(Path::new(config_path))?;
            config = config.merge_with_file(file_config);
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Merge with file config, CLI args take precedence
    fn merge_with_file(mut self, file_config: Config) -> Self {
        if self.listen_on_port == default_port() {
            self.listen_on_port = file_config.listen_on_port;
        }
        if self.host == default_host() {
            self.host = file_config.host;
        }
        if self.upstream_url == default_upstream_url() {
            self.upstream_url = file_config.upstream_url;
        }
        if self.timeout_secs == default_timeout_secs() {
            self.timeout_secs = file_config.timeout_secs;
        }
        if self.static_dir == default_static_dir() {
            self.static_dir = file_config.static_dir;
        }
        if self.device_id.is_none() {
            self.device_id = file_config.device_id;
        }

        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.host.is_empty() {
            return Err(anyhow::anyhow!("Host cannot be empty"));
        }

        if !self.upstream_url.starts_with("http://") && !self.upstream_url.starts_with("https://")
        {
            return Err(anyhow::anyhow!(
                "Upstream URL must start with http:// or https://"
            ));
        }

        if self.timeout_secs == 0 {
            return Err(anyhow::anyhow!("Upstream timeout must be greater than 0"));
        }

        if let Some(device_id) = &self.device_id
            && device_id.trim().is_empty()
        {
            return Err(anyhow::anyhow!("Device id cannot be empty"));
        }

        Ok(())
    }

    /// The configured device id, or a fresh random one.
    pub fn resolve_device_id(&self) -> String {
        self.device_id
            .clone()
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.listen_on_port)
    }
}

// Default value functions
fn default_port() -> u16 {
    5000
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_upstream_url() -> String {
    DEFAULT_UPSTREAM_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_static_dir() -> String {
    ".".to_string()
}
