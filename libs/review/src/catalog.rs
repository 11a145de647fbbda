//! Movie catalog client
//!
//! The catalog is an external TMDB-compatible API; the page only consumes
//! `GET /movie/{id}`.

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, error};

use crate::movie::Movie;

const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";

/// Errors surfaced while fetching from the catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Transport failure or undecodable body
    #[error("{0}")]
    Request(#[from] reqwest::Error),

    /// The catalog answered with a non-success status
    #[error("{message}")]
    Status { status: u16, message: String },
}

/// Source of movie details
#[async_trait]
pub trait MovieCatalog: Send + Sync {
    async fn fetch_movie(&self, id: i64) -> Result<Movie, CatalogError>;
}

/// Catalog configuration
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// API root, without trailing slash
    pub base_url: String,
    /// API key appended to every request
    pub api_key: String,
}

impl CatalogConfig {
    /// Create a new CatalogConfig from environment variables
    ///
    /// # Environment Variables
    /// - `TMDB_KEY`: API key
    /// - `TMDB_BASE_URL`: API root (default: "https://api.themoviedb.org/3")
    pub fn from_env() -> anyhow::Result<Self> {
        let api_key = std::env::var("TMDB_KEY")
            .map_err(|_| anyhow::anyhow!("TMDB_KEY environment variable not set"))?;
        let base_url =
            std::env::var("TMDB_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        Ok(CatalogConfig {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }
}

/// Error body returned by the catalog
#[derive(Debug, Deserialize)]
struct StatusBody {
    status_message: Option<String>,
}

/// HTTP client for a TMDB-compatible catalog
#[derive(Clone)]
pub struct TmdbCatalog {
    client: reqwest::Client,
    config: CatalogConfig,
}

impl TmdbCatalog {
    pub fn new(config: CatalogConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn movie_url(&self, id: i64) -> String {
        format!("{}/movie/{}", self.config.base_url, id)
    }
}

#[async_trait]
impl MovieCatalog for TmdbCatalog {
    async fn fetch_movie(&self, id: i64) -> Result<Movie, CatalogError> {
        debug!("Fetching movie {}", id);

        let response = self
            .client
            .get(self.movie_url(id))
            .query(&[("api_key", self.config.api_key.as_str()), ("language", "en-US")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<StatusBody>()
                .await
                .ok()
                .and_then(|body| body.status_message)
                .unwrap_or_else(|| format!("Catalog request failed with status {}", status));
            error!("Fetching movie {} failed: {}", id, message);
            return Err(CatalogError::Status {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json::<Movie>().await?)
    }
}
