use std::path::PathBuf;

use tubely_core::media::parse_allowed_types;
use tubely_core::storage::ThumbnailStorageKind;

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8091`). Also used in asset URLs.
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// JWT token configuration.
    pub jwt: JwtConfig,
    /// Thumbnail storage settings.
    pub storage: StorageConfig,
}

/// Where and how thumbnails are stored.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub kind: ThumbnailStorageKind,
    /// Directory asset files are written to and served from.
    pub assets_root: PathBuf,
    /// Host name placed in asset URLs (default: `localhost`).
    pub public_host: String,
    /// Normalized content types accepted for thumbnails.
    pub allowed_types: Vec<String>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                  |
    /// |---------------------------|--------------------------|
    /// | `HOST`                    | `0.0.0.0`                |
    /// | `PORT`                    | `8091`                   |
    /// | `CORS_ORIGINS`            | `http://localhost:8091`  |
    /// | `REQUEST_TIMEOUT_SECS`    | `30`                     |
    /// | `ASSETS_ROOT`             | `./assets`               |
    /// | `ASSETS_PUBLIC_HOST`      | `localhost`              |
    /// | `THUMBNAIL_STORAGE`       | `assets`                 |
    /// | `THUMBNAIL_ALLOWED_TYPES` | png, jpeg, gif, webp     |
    ///
    /// # Panics
    ///
    /// Panics on unparseable values so misconfiguration fails at startup.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "8091".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:8091".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let jwt = JwtConfig::from_env();
        let storage = StorageConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt,
            storage,
        }
    }

    /// Public URL prefix of the `/assets` file server.
    pub fn assets_base_url(&self) -> String {
        format!("http://{}:{}/assets", self.storage.public_host, self.port)
    }
}

impl StorageConfig {
    pub fn from_env() -> Self {
        let kind = ThumbnailStorageKind::from_name(
            &std::env::var("THUMBNAIL_STORAGE").unwrap_or_else(|_| "assets".into()),
        )
        .unwrap_or_else(|e| panic!("THUMBNAIL_STORAGE is invalid: {e}"));

        let assets_root = PathBuf::from(
            std::env::var("ASSETS_ROOT").unwrap_or_else(|_| "./assets".into()),
        );

        let public_host =
            std::env::var("ASSETS_PUBLIC_HOST").unwrap_or_else(|_| "localhost".into());

        let allowed_types =
            parse_allowed_types(&std::env::var("THUMBNAIL_ALLOWED_TYPES").unwrap_or_default());

        Self {
            kind,
            assets_root,
            public_host,
            allowed_types,
        }
    }
}
