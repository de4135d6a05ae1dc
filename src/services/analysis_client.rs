//! Analysis service HTTP client
//!
//! Thin reqwest wrapper over the two NDVI endpoints. Every network or decode
//! failure maps into `SessionError::Transport`; a well-formed `{error}`
//! envelope is not an error at this layer, it is a reply the session
//! reconciles into the panel.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{SessionError, SessionResult};
use crate::traits::AnalysisClient;
use crate::types::{AnalysisRequest, StatisticsReply, TilesReply};

/// Statistics endpoint path
pub const CALCULATE_NDVI_PATH: &str = "/calculate_ndvi";

/// Tile endpoint path
pub const NDVI_TILES_PATH: &str = "/get_ndvi_tiles";

/// Real analysis client backed by reqwest
pub struct RealAnalysisClient {
    http: reqwest::Client,
    base_url: String,
}

impl RealAnalysisClient {
    /// Create a client against the given service base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    async fn post_json<T>(&self, path: &str, request: &AnalysisRequest) -> SessionResult<T>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!("POST {url}");
        let response = self
            .http
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|err| SessionError::transport(format!("request to {url} failed: {err}")))?;
        response
            .json::<T>()
            .await
            .map_err(|err| SessionError::transport(format!("invalid reply from {url}: {err}")))
    }
}

#[async_trait]
impl AnalysisClient for RealAnalysisClient {
    async fn fetch_statistics(&self, request: AnalysisRequest) -> SessionResult<StatisticsReply> {
        self.post_json(CALCULATE_NDVI_PATH, &request).await
    }

    async fn fetch_tiles(&self, request: AnalysisRequest) -> SessionResult<TilesReply> {
        self.post_json(NDVI_TILES_PATH, &request).await
    }
}
