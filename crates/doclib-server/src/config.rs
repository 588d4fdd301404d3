use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::api::endpoints;
use crate::error::{ServerError, ServerResult};
use crate::router::DEFAULT_BODY_LIMIT;

/// Server configuration, loadable from TOML. Missing keys take defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Directory holding uploaded PDFs.
    pub uploads_dir: PathBuf,
    /// URL prefix the uploads directory is served under.
    pub uploads_url_prefix: String,
    /// JSON record file.
    pub registry_path: PathBuf,
    /// Static front-end files served at `/`.
    pub public_dir: Option<PathBuf>,
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 5200)),
            uploads_dir: PathBuf::from("uploads"),
            uploads_url_prefix: doclib_store::DEFAULT_URL_PREFIX.to_string(),
            registry_path: PathBuf::from("documents.json"),
            public_dir: None,
            max_upload_bytes: DEFAULT_BODY_LIMIT,
        }
    }
}

impl ServerConfig {
    pub fn from_toml_str(s: &str) -> ServerResult<Self> {
        let config: Self = toml::from_str(s).map_err(|e| ServerError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> ServerResult<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| ServerError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> ServerResult<()> {
        let scheme = doclib_store::ReferenceScheme::new(&self.uploads_url_prefix);
        let prefix = scheme.prefix();
        if prefix.is_empty() {
            return Err(ServerError::Config(
                "uploads_url_prefix must name a path below /".into(),
            ));
        }
        if [endpoints::UPLOAD, endpoints::DOCUMENTS, endpoints::HEALTH].contains(&prefix) {
            return Err(ServerError::Config(format!(
                "uploads_url_prefix {prefix} collides with an API route"
            )));
        }
        if self.max_upload_bytes == 0 {
            return Err(ServerError::Config("max_upload_bytes must be positive".into()));
        }
        Ok(())
    }
}
