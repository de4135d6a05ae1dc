//! Session data types: periods, region geometry, wire formats and layers

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Date format used in request keys and period displays
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Opacity applied to every NDVI overlay
pub const OVERLAY_OPACITY: f64 = 0.7;

/// A named date range over which NDVI statistics and tiles are computed
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Period {
    /// User-editable name; empty means "use the positional default"
    pub name: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl Period {
    /// Display name, falling back to `Período {position}` when unnamed.
    /// `position` is the 1-indexed current position, not a creation index.
    pub fn display_name(&self, position: usize) -> String {
        if self.name.trim().is_empty() {
            format!("Período {position}")
        } else {
            self.name.clone()
        }
    }

    /// Only periods with both dates take part in outgoing requests
    pub fn is_complete(&self) -> bool {
        self.start_date.is_some() && self.end_date.is_some()
    }
}

/// A vertex in the drawing tool's native `[lat, lng]` order
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// The active region of interest: a single drawn polygon ring
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub ring: Vec<LatLng>,
}

impl Region {
    pub fn new(ring: Vec<LatLng>) -> Self {
        Self { ring }
    }

    /// GeoJSON-style polygon with every vertex swapped to `[lng, lat]`
    pub fn to_polygon(&self) -> GeoJsonPolygon {
        crate::core::geometry::ring_to_polygon(&self.ring)
    }
}

/// GeoJSON-style polygon geometry sent as the `roi` request field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoJsonPolygon {
    #[serde(rename = "type")]
    pub geometry_type: String,
    pub coordinates: Vec<Vec<[f64; 2]>>,
}

impl GeoJsonPolygon {
    pub fn new(ring: Vec<[f64; 2]>) -> Self {
        Self {
            geometry_type: "Polygon".to_string(),
            coordinates: vec![ring],
        }
    }
}

/// Body shared by both analysis endpoints: the region plus flattened
/// `start_date_period_{i}` / `end_date_period_{i}` keys
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisRequest {
    pub roi: GeoJsonPolygon,
    #[serde(flatten)]
    pub periods: BTreeMap<String, String>,
}

/// Top-level analysis reply: either an error envelope or a map keyed
/// `period_{i}`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ServiceReply<T> {
    Failure { error: String },
    Periods(HashMap<String, T>),
}

pub type StatisticsReply = ServiceReply<NdviStats>;
pub type TilesReply = ServiceReply<TileEntry>;

/// Per-period NDVI statistics; absent values render as "N/A"
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NdviStats {
    #[serde(default)]
    pub ndvi_mean: Option<f64>,
    #[serde(default)]
    pub ndvi_min: Option<f64>,
    #[serde(default)]
    pub ndvi_max: Option<f64>,
}

/// Per-period tile source entry
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TileEntry {
    #[serde(default)]
    pub tile_url: Option<String>,
}

/// One geocoding hit. Nominatim serializes coordinates as JSON strings,
/// so both strings and numbers are accepted.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GeocodeHit {
    #[serde(deserialize_with = "coord_from_json")]
    pub lat: f64,
    #[serde(deserialize_with = "coord_from_json")]
    pub lon: f64,
    #[serde(default)]
    pub display_name: Option<String>,
}

impl GeocodeHit {
    /// Hit coordinates in map order
    pub fn coords(&self) -> LatLng {
        LatLng::new(self.lat, self.lon)
    }
}

fn coord_from_json<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(value) => Ok(value),
        Raw::Text(text) => text.trim().parse().map_err(serde::de::Error::custom),
    }
}

/// A base tile layer offered by the layer-selection control
#[derive(Debug, Clone, PartialEq)]
pub struct BaseLayer {
    pub name: String,
    pub url_template: String,
    pub attribution: String,
    pub subdomains: Vec<String>,
}

/// An NDVI tile overlay for one period
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayLayer {
    /// Layer-control key, `NDVI {period name}`
    pub key: String,
    pub tile_url: String,
    pub opacity: f64,
    pub attribution: String,
}

impl OverlayLayer {
    /// Build the overlay for one period's tile source
    pub fn for_period(display_name: &str, tile_url: impl Into<String>) -> Self {
        Self {
            key: format!("NDVI {display_name}"),
            tile_url: tile_url.into(),
            opacity: OVERLAY_OPACITY,
            attribution: display_name.to_string(),
        }
    }
}

/// Registry backing the layer-selection control. Overlays are replaced
/// wholesale on every successful tile reply, never diffed.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerRegistry {
    pub base: Vec<BaseLayer>,
    pub overlays: Vec<OverlayLayer>,
}

impl LayerRegistry {
    pub fn new(base: Vec<BaseLayer>) -> Self {
        Self {
            base,
            overlays: Vec::new(),
        }
    }

    /// Swap in a freshly built overlay set
    pub fn replace_overlays(&mut self, overlays: Vec<OverlayLayer>) {
        self.overlays = overlays;
    }
}

/// Base layers mirrored from the original map configuration
pub fn default_base_layers() -> Vec<BaseLayer> {
    vec![
        BaseLayer {
            name: "OpenStreetMap".to_string(),
            url_template: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            attribution: "© OpenStreetMap contributors".to_string(),
            subdomains: Vec::new(),
        },
        BaseLayer {
            name: "Google Maps".to_string(),
            url_template: "http://{s}.google.com/vt/lyrs=m&x={x}&y={y}&z={z}".to_string(),
            attribution: "© Google Maps".to_string(),
            subdomains: vec![
                "mt0".to_string(),
                "mt1".to_string(),
                "mt2".to_string(),
                "mt3".to_string(),
            ],
        },
        BaseLayer {
            name: "Esri World Imagery".to_string(),
            url_template:
                "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/{z}/{y}/{x}"
                    .to_string(),
            attribution: "Tiles © Esri".to_string(),
            subdomains: Vec::new(),
        },
    ]
}
