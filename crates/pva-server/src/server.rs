use std::sync::Arc;

use tokio::net::TcpListener;

use pva_engine::AuditRepo;

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::router::build_router;

/// The audit webhook server.
pub struct AuditServer {
    config: ServerConfig,
}

impl AuditServer {
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Build the router (useful for testing).
    pub fn router(&self, repo: Arc<AuditRepo>) -> axum::Router {
        build_router(repo)
    }

    /// Start serving requests over an already-bootstrapped repository.
    pub async fn serve(self, repo: Arc<AuditRepo>) -> ServerResult<()> {
        let app = build_router(repo);
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        tracing::info!("audit webhook listening on {}", self.config.bind_addr);
        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pva_cluster::InMemoryCluster;
    use pva_engine::{setup_repo, StorageMode};

    fn test_repo() -> Arc<AuditRepo> {
        let cluster = Arc::new(InMemoryCluster::new());
        Arc::new(setup_repo(cluster, StorageMode::InMemory, std::path::Path::new("")).unwrap())
    }

    #[test]
    fn server_construction() {
        let server = AuditServer::new(ServerConfig::default());
        assert_eq!(server.config().bind_addr.port(), 8080);
    }

    #[test]
    fn router_builds() {
        let server = AuditServer::new(ServerConfig::default());
        let _router = server.router(test_repo());
    }
}
