//! Node registry loading from config.toml
//!
//! Every deployment ships a registry of the nodes it knows about: one entry
//! per branch, naming the branch id, the branch database, and the branch row
//! fields seeded on first run. Which entry this process runs as is chosen
//! explicitly through the `NODE_NAME` environment variable (first entry when
//! unset) — machine-identity detection is the launcher's concern, not this
//! crate's.

use crate::config::database::DatabaseSettings;
use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Deserialize)]
pub struct Registry {
    /// Connection tuning shared by every node
    #[serde(default)]
    pub settings: DatabaseSettings,
    /// List of known nodes
    pub nodes: Vec<NodeConfig>,
}

/// Configuration for a single node (one branch, one database)
#[derive(Debug, Deserialize, Clone)]
pub struct NodeConfig {
    /// Registry key for this node (e.g., "guayaquil")
    pub name: String,
    /// Operator-assigned branch id, also the seeded branch row id
    pub branch_id: i64,
    /// Connection URL for this branch's database
    pub database_url: String,
    /// City for the seeded branch row
    pub city: String,
    /// Street address for the seeded branch row
    #[serde(default)]
    pub address: String,
    /// Contact phone for the seeded branch row
    #[serde(default)]
    pub phone: String,
    /// Allow-listed tables this node does not expose (e.g., a branch whose
    /// menu excludes employee management)
    #[serde(default)]
    pub hidden_tables: Vec<String>,
}

/// Loads the node registry from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - Required fields are missing
pub fn load_registry<P: AsRef<Path>>(path: P) -> Result<Registry> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads the node registry from the default location (./config.toml)
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
pub fn load_default_registry() -> Result<Registry> {
    load_registry("config.toml")
}

/// Selects the node this process runs as.
///
/// `NODE_NAME` picks an entry by name (case-insensitive); when unset the
/// first registry entry is used.
///
/// # Errors
/// Returns an error if the registry is empty or `NODE_NAME` names an unknown
/// node.
pub fn select_node(registry: &Registry) -> Result<&NodeConfig> {
    let first = registry.nodes.first().ok_or_else(|| Error::Config {
        message: "config.toml declares no nodes".to_string(),
    })?;

    match std::env::var("NODE_NAME") {
        Ok(name) => registry
            .nodes
            .iter()
            .find(|n| n.name.eq_ignore_ascii_case(&name))
            .ok_or_else(|| Error::Config {
                message: format!("NODE_NAME '{name}' is not in the node registry"),
            }),
        Err(_) => Ok(first),
    }
}
