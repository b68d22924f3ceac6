//! @ai:module:intent Configuration structs for the telemetry service
//! @ai:module:layer infrastructure
//! @ai:module:public_api ServiceConfig, ServerConfig, StatsConfig, StorageConfig
//! @ai:module:stateless true

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// @ai:intent Main configuration for the telemetry service
/// @ai:effects pure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub stats: StatsConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

/// @ai:intent HTTP listener configuration
/// @ai:effects pure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Upper bound for a single store call made on behalf of a request
    #[serde(default = "default_store_timeout_ms")]
    pub store_timeout_ms: u64,
}

/// @ai:intent Presentation options for aggregated statistics
/// @ai:effects pure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsConfig {
    #[serde(default)]
    pub round: bool,
    #[serde(default = "default_precision")]
    pub precision: u32,
}

/// @ai:intent Storage locations for persisted state and seed catalog
/// @ai:effects pure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// JSON snapshot file; state is kept in memory only when unset
    pub data_file: Option<PathBuf>,
    /// Directory of TOML algorithm definitions used to seed an empty store
    pub catalog_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            store_timeout_ms: default_store_timeout_ms(),
        }
    }
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            round: false,
            precision: default_precision(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_store_timeout_ms() -> u64 {
    5000
}

fn default_precision() -> u32 {
    2
}

impl ServiceConfig {
    /// @ai:intent Load configuration from a TOML file
    /// @ai:pre path exists and is readable
    /// @ai:effects fs:read
    pub fn load(path: &std::path::Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// @ai:intent Save configuration to a TOML file
    /// @ai:effects fs:write
    pub fn save(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl ServerConfig {
    /// @ai:intent Resolve the socket address to bind
    /// @ai:effects pure
    pub fn bind_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr = format!("{}:{}", self.host, self.port).parse()?;
        Ok(addr)
    }

    /// @ai:intent Store call timeout as a duration
    /// @ai:effects pure
    pub fn store_timeout(&self) -> Duration {
        Duration::from_millis(self.store_timeout_ms)
    }
}
