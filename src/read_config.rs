// Module de lecture de configuration basé sur le hostname

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use crate::error::{AppError, Result};
use crate::types::{Destination, PortId};
use crate::utils::config::RouterConfig;

const CONFIG_DIR: &str = "conf";

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct LinkConfig {
    pub port: PortId,
    /// Address of the router or host on the other end.
    pub neighbor: SocketAddr,
    pub latency: u32,
    /// Set for a host attachment: the link is up from the start and a static route is installed.
    #[serde(default)]
    pub host: Option<Destination>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct NodeConfig {
    pub name: String,
    pub listen: SocketAddr,
    #[serde(default = "default_timer_interval")]
    pub timer_interval_secs: u64,
    #[serde(default = "default_timer_jitter")]
    pub timer_jitter_ms: u64,
    #[serde(default = "default_link_timeout")]
    pub link_timeout_secs: u64,
    #[serde(default)]
    pub policy: RouterConfig,
    #[serde(default)]
    pub links: Vec<LinkConfig>,
}

fn default_timer_interval() -> u64 {
    5
}

fn default_timer_jitter() -> u64 {
    500
}

fn default_link_timeout() -> u64 {
    15
}

impl NodeConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: NodeConfig = toml::from_str(content)
            .map_err(|e| AppError::ConfigError(format!("Failed to parse node config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.policy.validate()?;
        if self.timer_interval_secs == 0 {
            return Err(AppError::ConfigError("timer_interval_secs must be greater than zero".to_string()));
        }
        let mut ports = HashSet::new();
        let mut neighbors = HashSet::new();
        for link in &self.links {
            if !ports.insert(link.port) {
                return Err(AppError::ConfigError(format!("Duplicate link port {}", link.port)));
            }
            if !neighbors.insert(link.neighbor) {
                return Err(AppError::ConfigError(format!("Duplicate neighbor address {}", link.neighbor)));
            }
        }
        Ok(())
    }

    pub fn link(&self, port: PortId) -> Option<&LinkConfig> {
        self.links.iter().find(|link| link.port == port)
    }

    /// Link whose neighbor sits at `addr`.
    pub fn link_to(&self, addr: &SocketAddr) -> Option<&LinkConfig> {
        self.links.iter().find(|link| &link.neighbor == addr)
    }
}

/// Reads the node configuration from `path`.
pub fn load_node_config<P: AsRef<Path>>(path: P) -> Result<NodeConfig> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(AppError::ConfigError(format!(
            "Config file not found: {}. Available configs: {}",
            path.display(),
            list_available_configs()
        )));
    }

    let content = fs::read_to_string(path)
        .map_err(|e| AppError::ConfigError(format!("Failed to read config file {}: {}", path.display(), e)))?;
    let config = NodeConfig::from_toml_str(&content)?;

    log::info!("Loaded configuration for router: {}", config.name);
    log::debug!("Config: {:?}", config);

    Ok(config)
}

/// Lit la configuration du routeur basée sur le hostname
pub fn read_router_config() -> Result<NodeConfig> {
    load_node_config(default_config_path()?)
}

pub fn default_config_path() -> Result<PathBuf> {
    let hostname = get_hostname()?;
    Ok(Path::new(CONFIG_DIR).join(format!("config_{}.toml", hostname)))
}

fn get_hostname() -> Result<String> {
    hostname::get()
        .map_err(|e| AppError::ConfigError(format!("Failed to get hostname: {}", e)))?
        .to_string_lossy()
        .split('.')
        .next()
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .ok_or_else(|| AppError::ConfigError("Invalid hostname".to_string()))
}

fn list_available_configs() -> String {
    if let Ok(entries) = fs::read_dir(CONFIG_DIR) {
        let mut configs: Vec<String> = entries
            .filter_map(|entry| {
                let entry = entry.ok()?;
                let path = entry.path();
                if path.extension()? == "toml" {
                    path.file_name()?.to_str().map(|s| s.to_string())
                } else {
                    None
                }
            })
            .collect();
        configs.sort();
        configs.join(", ")
    } else {
        "Unable to list config directory".to_string()
    }
}
