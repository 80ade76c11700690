//! Decision service configuration
//!
//! Environment variables:
//! - `PORT` - HTTP server port (default: 8080)
//! - `CATALOG_PATH` - JSON descriptor catalog (default: compiled-in catalog)
//! - `RUST_LOG` - Log level (default: info), read by the binary's subscriber

use crate::catalog::DescriptorCatalog;
use crate::error::{AuthzError, Result};
use std::path::PathBuf;
use tracing::info;

pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    pub catalog_path: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            catalog_path: None,
        }
    }
}

impl ServerConfig {
    /// Read configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|e| AuthzError::InvalidInput(format!("PORT '{}': {}", raw, e)))?,
            None => DEFAULT_PORT,
        };

        let catalog_path = lookup("CATALOG_PATH")
            .filter(|raw| !raw.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self { port, catalog_path })
    }

    /// Load the configured catalog, falling back to the compiled-in one
    pub fn load_catalog(&self) -> Result<DescriptorCatalog> {
        match &self.catalog_path {
            Some(path) => DescriptorCatalog::from_path(path),
            None => {
                info!("No CATALOG_PATH set, using built-in catalog");
                Ok(DescriptorCatalog::builtin())
            }
        }
    }
}
