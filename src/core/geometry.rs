//! Coordinate handling for the drawn region

use crate::types::{GeoJsonPolygon, LatLng};

/// Convert a drawn ring into a GeoJSON polygon.
///
/// The drawing tool hands back vertices in `[lat, lng]` order; GeoJSON wants
/// `[lng, lat]`, so every vertex is swapped here. The ring is passed through
/// as drawn (implicitly closed).
pub fn ring_to_polygon(ring: &[LatLng]) -> GeoJsonPolygon {
    GeoJsonPolygon::new(ring.iter().map(|vertex| [vertex.lng, vertex.lat]).collect())
}
