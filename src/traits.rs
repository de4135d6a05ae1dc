//! Service trait definitions for dependency injection
//!
//! All I/O operations are abstracted through these traits for testability

use async_trait::async_trait;

use crate::error::SessionResult;
use crate::types::{
    AnalysisRequest, BaseLayer, GeocodeHit, LatLng, OverlayLayer, StatisticsReply, TilesReply,
};

/// Analysis service client covering both NDVI endpoints
#[mockall::automock]
#[async_trait]
pub trait AnalysisClient: Send + Sync {
    /// POST the request body to the statistics endpoint
    async fn fetch_statistics(&self, request: AnalysisRequest) -> SessionResult<StatisticsReply>;

    /// POST the request body to the tile endpoint
    async fn fetch_tiles(&self, request: AnalysisRequest) -> SessionResult<TilesReply>;
}

/// Free-text address geocoding service
#[mockall::automock]
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Query the geocoding service; hits come back ordered by relevance
    async fn search(&self, address: &str) -> SessionResult<Vec<GeocodeHit>>;
}

/// Map widget surface: view, markers, overlays and the layer control
#[mockall::automock]
#[async_trait]
pub trait MapCanvas: Send + Sync {
    /// Recenter the map
    async fn set_view(&self, center: LatLng, zoom: u8) -> SessionResult<()>;

    /// Place a marker with a popup text
    async fn place_marker(&self, at: LatLng, popup: &str) -> SessionResult<()>;

    /// Add one NDVI overlay to the map
    async fn add_overlay(&self, layer: &OverlayLayer) -> SessionResult<()>;

    /// Remove a previously added overlay by its key
    async fn remove_overlay(&self, key: &str) -> SessionResult<()>;

    /// Tear down the layer-selection control and build a fresh one from the
    /// current base layers and overlay set
    async fn rebuild_layer_control(
        &self,
        base: &[BaseLayer],
        overlays: &[OverlayLayer],
    ) -> SessionResult<()>;
}

/// Info panel and alert surface for user-facing messages
#[mockall::automock]
#[async_trait]
pub trait InfoPanel: Send + Sync {
    /// Replace the panel content
    async fn show(&self, text: &str) -> SessionResult<()>;

    /// Append a line to the panel content
    async fn append(&self, text: &str) -> SessionResult<()>;

    /// Blocking-alert equivalent for user input errors
    async fn alert(&self, text: &str) -> SessionResult<()>;
}
