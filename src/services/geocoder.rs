//! Nominatim-style geocoding client

use async_trait::async_trait;
use tracing::debug;
use url::Url;

use crate::error::{SessionError, SessionResult};
use crate::traits::Geocoder;
use crate::types::GeocodeHit;

/// Default public search endpoint
pub const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org/search";

// Nominatim's usage policy requires an identifying user agent
const USER_AGENT: &str = concat!("ndvi-webgis/", env!("CARGO_PKG_VERSION"));

/// Real geocoder backed by reqwest
#[derive(Debug)]
pub struct RealGeocoder {
    http: reqwest::Client,
    endpoint: Url,
}

impl RealGeocoder {
    /// Build a geocoder against the given search endpoint
    pub fn new(endpoint: &str) -> SessionResult<Self> {
        let endpoint = Url::parse(endpoint).map_err(|err| {
            SessionError::geocoding(format!("invalid geocoder endpoint {endpoint}: {err}"))
        })?;
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|err| SessionError::transport(err.to_string()))?;
        Ok(Self { http, endpoint })
    }
}

#[async_trait]
impl Geocoder for RealGeocoder {
    async fn search(&self, address: &str) -> SessionResult<Vec<GeocodeHit>> {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("format", "json")
            .append_pair("q", address);
        debug!("GET {url}");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|err| SessionError::transport(format!("geocoding request failed: {err}")))?;
        response
            .json()
            .await
            .map_err(|err| SessionError::transport(format!("invalid geocoding reply: {err}")))
    }
}
