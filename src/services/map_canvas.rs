//! Console-backed map canvas
//!
//! Stands in for the map widget: every operation is printed and journaled so
//! the session's side effects stay visible in a terminal.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::SessionResult;
use crate::traits::MapCanvas;
use crate::types::{BaseLayer, LatLng, OverlayLayer};

/// Map canvas that renders widget operations as console lines
pub struct ConsoleCanvas {
    journal: Arc<RwLock<Vec<String>>>,
}

impl ConsoleCanvas {
    pub fn new() -> Self {
        Self {
            journal: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Everything the canvas has been asked to do, in order
    pub async fn journal(&self) -> Vec<String> {
        self.journal.read().await.clone()
    }

    async fn record(&self, entry: String) {
        println!("🗺️  {entry}");
        self.journal.write().await.push(entry);
    }
}

impl Default for ConsoleCanvas {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MapCanvas for ConsoleCanvas {
    async fn set_view(&self, center: LatLng, zoom: u8) -> SessionResult<()> {
        self.record(format!(
            "view -> [{:.4}, {:.4}] @ z{zoom}",
            center.lat, center.lng
        ))
        .await;
        Ok(())
    }

    async fn place_marker(&self, at: LatLng, popup: &str) -> SessionResult<()> {
        self.record(format!("marker [{:.4}, {:.4}]: {popup}", at.lat, at.lng))
            .await;
        Ok(())
    }

    async fn add_overlay(&self, layer: &OverlayLayer) -> SessionResult<()> {
        self.record(format!(
            "overlay + {} (opacity {}, {})",
            layer.key, layer.opacity, layer.tile_url
        ))
        .await;
        Ok(())
    }

    async fn remove_overlay(&self, key: &str) -> SessionResult<()> {
        self.record(format!("overlay - {key}")).await;
        Ok(())
    }

    async fn rebuild_layer_control(
        &self,
        base: &[BaseLayer],
        overlays: &[OverlayLayer],
    ) -> SessionResult<()> {
        let names: Vec<&str> = base
            .iter()
            .map(|layer| layer.name.as_str())
            .chain(overlays.iter().map(|layer| layer.key.as_str()))
            .collect();
        self.record(format!("layer control rebuilt: {}", names.join(", ")))
            .await;
        Ok(())
    }
}
