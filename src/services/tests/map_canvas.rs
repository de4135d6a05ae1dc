//! Tests for the console map canvas

use crate::services::map_canvas::ConsoleCanvas;
use crate::traits::MapCanvas;
use crate::types::{default_base_layers, LatLng, OverlayLayer};

#[tokio::test]
async fn journal_records_operations_in_order() {
    let canvas = ConsoleCanvas::new();
    canvas.set_view(LatLng::new(-15.7801, -47.9292), 12).await.unwrap();
    canvas
        .place_marker(LatLng::new(-15.7801, -47.9292), "Endereço: Brasília")
        .await
        .unwrap();

    let journal = canvas.journal().await;
    assert_eq!(journal.len(), 2);
    assert!(journal[0].starts_with("view -> [-15.7801, -47.9292]"));
    assert!(journal[1].contains("Endereço: Brasília"));
}

#[tokio::test]
async fn overlay_lifecycle_is_journaled() {
    let canvas = ConsoleCanvas::new();
    let overlay = OverlayLayer::for_period("Seca", "http://tiles/{z}/{x}/{y}.png");
    canvas.add_overlay(&overlay).await.unwrap();
    canvas.remove_overlay(&overlay.key).await.unwrap();

    let journal = canvas.journal().await;
    assert!(journal[0].contains("overlay + NDVI Seca"));
    assert!(journal[1].contains("overlay - NDVI Seca"));
}

#[tokio::test]
async fn rebuild_lists_base_layers_and_overlays() {
    let canvas = ConsoleCanvas::new();
    let overlays = vec![OverlayLayer::for_period("Chuva", "http://tiles/a")];
    canvas
        .rebuild_layer_control(&default_base_layers(), &overlays)
        .await
        .unwrap();

    let journal = canvas.journal().await;
    assert_eq!(journal.len(), 1);
    assert!(journal[0].contains("OpenStreetMap"));
    assert!(journal[0].contains("Esri World Imagery"));
    assert!(journal[0].contains("NDVI Chuva"));
}
