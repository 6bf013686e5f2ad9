use std::net::SocketAddr;
use std::path::PathBuf;

use pva_engine::StorageMode;

/// Startup configuration for the audit webhook server.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Address the webhook listens on.
    pub bind_addr: SocketAddr,
    /// Which store backend to run.
    pub storage_mode: StorageMode,
    /// Root directory for the durable store (ignored in memory mode).
    pub store_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".parse().expect("static addr"),
            storage_mode: StorageMode::Disk,
            store_dir: PathBuf::from("."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.storage_mode, StorageMode::Disk);
        assert_eq!(config.store_dir, PathBuf::from("."));
    }
}
