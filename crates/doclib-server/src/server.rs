use std::sync::Arc;

use doclib_registry::JsonFileRegistry;
use doclib_store::FsBlobStore;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::router::build_router_with_limit;
use crate::state::AppState;

/// doclib HTTP server.
pub struct DocLibServer {
    config: ServerConfig,
}

impl DocLibServer {
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Open the on-disk registry and blob store named by the config.
    pub fn open_state(&self) -> ServerResult<AppState> {
        let blobs = FsBlobStore::open(&self.config.uploads_dir, &self.config.uploads_url_prefix)?;
        let registry = JsonFileRegistry::open(&self.config.registry_path)?;
        Ok(AppState::new(Arc::new(registry), Arc::new(blobs)))
    }

    /// Build the full router: JSON API, the uploads directory, and the
    /// optional static front end (useful for testing).
    pub fn router(&self) -> ServerResult<axum::Router> {
        self.config.validate()?;
        let state = self.open_state()?;
        let prefix = doclib_store::ReferenceScheme::new(&self.config.uploads_url_prefix);

        let mut app = build_router_with_limit(state, self.config.max_upload_bytes)
            .nest_service(prefix.prefix(), ServeDir::new(&self.config.uploads_dir));
        if let Some(public) = &self.config.public_dir {
            app = app.fallback_service(ServeDir::new(public));
        }
        Ok(app)
    }

    /// Start serving requests until Ctrl-C.
    pub async fn serve(self) -> ServerResult<()> {
        let app = self.router()?;
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        tracing::info!(
            addr = %self.config.bind_addr,
            uploads = %self.config.uploads_dir.display(),
            registry = %self.config.registry_path.display(),
            "doclib server listening"
        );
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "could not listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::util::ServiceExt;

    fn config_in(dir: &std::path::Path) -> ServerConfig {
        ServerConfig {
            uploads_dir: dir.join("uploads"),
            registry_path: dir.join("documents.json"),
            ..ServerConfig::default()
        }
    }

    #[test]
    fn server_construction() {
        let server = DocLibServer::new(ServerConfig::default());
        assert_eq!(server.config().bind_addr, "127.0.0.1:5200".parse().unwrap());
    }

    #[test]
    fn open_state_creates_upload_dir() {
        let dir = tempfile::tempdir().unwrap();
        let server = DocLibServer::new(config_in(dir.path()));
        let state = server.open_state().unwrap();
        assert!(dir.path().join("uploads").is_dir());
        assert!(state.registry.list().unwrap().is_empty());
    }

    #[tokio::test]
    async fn uploaded_blob_is_served() {
        let dir = tempfile::tempdir().unwrap();
        let server = DocLibServer::new(config_in(dir.path()));
        let app = server.router().unwrap();

        std::fs::write(dir.path().join("uploads").join("1-a.pdf"), b"%PDF-1.4 served").unwrap();
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/uploads/1-a.pdf")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"%PDF-1.4 served");
    }

    #[tokio::test]
    async fn public_dir_is_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let public = dir.path().join("public");
        std::fs::create_dir_all(&public).unwrap();
        std::fs::write(public.join("index.html"), "<h1>docs</h1>").unwrap();

        let config = ServerConfig {
            public_dir: Some(public),
            ..config_in(dir.path())
        };
        let app = DocLibServer::new(config).router().unwrap();
        let response = app
            .oneshot(Request::builder().uri("/index.html").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
    }
}
