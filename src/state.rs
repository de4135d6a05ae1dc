//! Session state management

use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::types::{default_base_layers, LatLng, LayerRegistry, Period, Region, DATE_FORMAT};

/// Initial view center from the original page load (Brasília)
pub const DEFAULT_CENTER: LatLng = LatLng {
    lat: -15.7801,
    lng: -47.9292,
};

/// Initial zoom level
pub const DEFAULT_ZOOM: u8 = 4;

/// Zoom applied after a successful geocoding hit
pub const GEOCODE_ZOOM: u8 = 12;

/// All mutable page-lifetime state of one map session
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub view_center: LatLng,
    pub view_zoom: u8,
    /// At most one region is active; a new draw replaces it
    pub region: Option<Region>,
    /// Ordered period list; never empty
    pub periods: Vec<Period>,
    pub registry: LayerRegistry,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            view_center: DEFAULT_CENTER,
            view_zoom: DEFAULT_ZOOM,
            region: None,
            // the editor always starts with one (unnamed, dateless) period
            periods: vec![Period::default()],
            registry: LayerRegistry::new(default_base_layers()),
        }
    }

    /// Request keys for every period with both dates set, 1-indexed by
    /// current position. Incomplete periods are silently omitted.
    pub fn collect_periods(&self) -> BTreeMap<String, String> {
        let mut collected = BTreeMap::new();
        for (index, period) in self.periods.iter().enumerate() {
            let position = index + 1;
            if let (Some(start), Some(end)) = (period.start_date, period.end_date) {
                collected.insert(
                    format!("start_date_period_{position}"),
                    start.format(DATE_FORMAT).to_string(),
                );
                collected.insert(
                    format!("end_date_period_{position}"),
                    end.format(DATE_FORMAT).to_string(),
                );
            }
        }
        collected
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared session state wrapper
pub type SharedSessionState = Arc<RwLock<SessionState>>;

/// Create new shared session state
pub fn create_shared_state() -> SharedSessionState {
    Arc::new(RwLock::new(SessionState::new()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(text: &str) -> NaiveDate {
        NaiveDate::parse_from_str(text, DATE_FORMAT).unwrap()
    }

    #[test]
    fn new_state_has_one_period_and_no_region() {
        let state = SessionState::new();
        assert_eq!(state.periods.len(), 1);
        assert!(state.region.is_none());
        assert_eq!(state.registry.base.len(), 3);
        assert!(state.registry.overlays.is_empty());
    }

    #[test]
    fn collect_periods_skips_incomplete_periods() {
        let mut state = SessionState::new();
        state.periods = vec![
            Period {
                name: String::new(),
                start_date: Some(date("2024-01-01")),
                end_date: Some(date("2024-03-31")),
            },
            Period {
                name: "sem fim".to_string(),
                start_date: Some(date("2024-04-01")),
                end_date: None,
            },
            Period {
                name: String::new(),
                start_date: None,
                end_date: Some(date("2024-06-30")),
            },
        ];

        let collected = state.collect_periods();
        assert_eq!(collected.len(), 2);
        assert_eq!(collected["start_date_period_1"], "2024-01-01");
        assert_eq!(collected["end_date_period_1"], "2024-03-31");
        assert!(!collected.contains_key("start_date_period_2"));
        assert!(!collected.contains_key("end_date_period_3"));
    }

    #[test]
    fn collect_periods_reindexes_by_current_position() {
        let mut state = SessionState::new();
        state.periods = vec![
            Period {
                name: "primeiro".to_string(),
                start_date: Some(date("2023-01-01")),
                end_date: Some(date("2023-02-01")),
            },
            Period {
                name: "segundo".to_string(),
                start_date: Some(date("2023-03-01")),
                end_date: Some(date("2023-04-01")),
            },
        ];

        // dropping the first period shifts the second to position 1
        state.periods.remove(0);
        let collected = state.collect_periods();
        assert_eq!(collected["start_date_period_1"], "2023-03-01");
        assert!(!collected.contains_key("start_date_period_2"));
    }
}
