//! Map session implementation
//!
//! `MapSession` owns the page-lifetime state (region, periods, layer
//! registry, view) and orchestrates the two analysis requests, reconciling
//! statistics into the info panel and tiles into the layer registry. All
//! collaborating services are injected, following the dependency-injection
//! pattern used across the rest of the crate.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::core::report;
use crate::error::{SessionError, SessionResult};
use crate::state::{create_shared_state, SharedSessionState, GEOCODE_ZOOM};
use crate::traits::{AnalysisClient, Geocoder, InfoPanel, MapCanvas};
use crate::types::{
    AnalysisRequest, LatLng, LayerRegistry, OverlayLayer, Period, Region, ServiceReply,
};

/// User-facing messages mirrored from the original client
pub const MSG_DRAW_FIRST: &str = "Desenhe uma área no mapa primeiro!";
pub const MSG_LAST_PERIOD: &str = "Pelo menos um período é necessário!";
pub const MSG_FETCHING: &str = "Buscando dados ambientais...";
pub const MSG_TILES_LOADED: &str = "Tiles NDVI carregados com sucesso!";
pub const MSG_ADDRESS_NOT_FOUND: &str = "Endereço não encontrado.";

/// Single session object encapsulating all mutable map state, constructed
/// once per run and torn down never
pub struct MapSession<A, G, C, N>
where
    A: AnalysisClient,
    G: Geocoder,
    C: MapCanvas,
    N: InfoPanel,
{
    state: SharedSessionState,
    analysis: Arc<A>,
    geocoder: Arc<G>,
    canvas: Arc<C>,
    panel: Arc<N>,
}

impl<A, G, C, N> Clone for MapSession<A, G, C, N>
where
    A: AnalysisClient,
    G: Geocoder,
    C: MapCanvas,
    N: InfoPanel,
{
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            analysis: self.analysis.clone(),
            geocoder: self.geocoder.clone(),
            canvas: self.canvas.clone(),
            panel: self.panel.clone(),
        }
    }
}

impl<A, G, C, N> MapSession<A, G, C, N>
where
    A: AnalysisClient + 'static,
    G: Geocoder + 'static,
    C: MapCanvas + 'static,
    N: InfoPanel + 'static,
{
    /// Create a new session with injected services
    pub fn new(analysis: A, geocoder: G, canvas: C, panel: N) -> Self {
        Self {
            state: create_shared_state(),
            analysis: Arc::new(analysis),
            geocoder: Arc::new(geocoder),
            canvas: Arc::new(canvas),
            panel: Arc::new(panel),
        }
    }

    /// Snapshot of the current period list
    pub async fn periods(&self) -> Vec<Period> {
        self.state.read().await.periods.clone()
    }

    /// Snapshot of the registered overlays
    pub async fn overlays(&self) -> Vec<OverlayLayer> {
        self.state.read().await.registry.overlays.clone()
    }

    /// Snapshot of the full layer registry backing the layer control
    pub async fn registry(&self) -> LayerRegistry {
        self.state.read().await.registry.clone()
    }

    /// Whether a region is currently drawn
    pub async fn has_region(&self) -> bool {
        self.state.read().await.region.is_some()
    }

    /// Draw-completion event: the new ring replaces any previous region and
    /// triggers a full update, as the original draw handler does
    pub async fn on_region_drawn(&self, ring: Vec<LatLng>) -> SessionResult<()> {
        {
            let mut state = self.state.write().await;
            state.region = Some(Region::new(ring));
        }
        self.run_update().await
    }

    /// Update-button event; prompts the user when nothing is drawn yet
    pub async fn on_update_requested(&self) -> SessionResult<()> {
        if !self.has_region().await {
            return self.panel.alert(MSG_DRAW_FIRST).await;
        }
        self.run_update().await
    }

    /// Period-added event; returns the new period's 1-indexed position
    pub async fn add_period(&self) -> usize {
        let mut state = self.state.write().await;
        state.periods.push(Period::default());
        state.periods.len()
    }

    /// Period-removed event. The last remaining period is never removed;
    /// the refusal is surfaced as an alert and state stays intact.
    pub async fn remove_period(&self, position: usize) -> SessionResult<()> {
        let refused = {
            let mut state = self.state.write().await;
            let index = position
                .checked_sub(1)
                .filter(|index| *index < state.periods.len())
                .ok_or_else(|| {
                    SessionError::invalid_input(format!("period {position} does not exist"))
                })?;
            if state.periods.len() == 1 {
                true
            } else {
                state.periods.remove(index);
                false
            }
        };
        if refused {
            self.panel.alert(MSG_LAST_PERIOD).await
        } else {
            Ok(())
        }
    }

    /// Period-edited event: set the display name
    pub async fn rename_period(&self, position: usize, name: &str) -> SessionResult<()> {
        let mut state = self.state.write().await;
        let index = position
            .checked_sub(1)
            .filter(|index| *index < state.periods.len())
            .ok_or_else(|| {
                SessionError::invalid_input(format!("period {position} does not exist"))
            })?;
        state.periods[index].name = name.to_string();
        Ok(())
    }

    /// Period-edited event: set both dates
    pub async fn set_period_dates(
        &self,
        position: usize,
        start: NaiveDate,
        end: NaiveDate,
    ) -> SessionResult<()> {
        let mut state = self.state.write().await;
        let index = position
            .checked_sub(1)
            .filter(|index| *index < state.periods.len())
            .ok_or_else(|| {
                SessionError::invalid_input(format!("period {position} does not exist"))
            })?;
        state.periods[index].start_date = Some(start);
        state.periods[index].end_date = Some(end);
        Ok(())
    }

    /// Geocode-button event
    pub async fn on_geocode_requested(&self, address: &str) -> SessionResult<()> {
        match self.geocoder.search(address).await {
            Ok(hits) => match hits.first() {
                Some(hit) => {
                    let target = hit.coords();
                    {
                        let mut state = self.state.write().await;
                        state.view_center = target;
                        state.view_zoom = GEOCODE_ZOOM;
                    }
                    self.canvas.set_view(target, GEOCODE_ZOOM).await?;
                    self.canvas
                        .place_marker(target, &format!("Endereço: {address}"))
                        .await
                }
                None => self.panel.alert(MSG_ADDRESS_NOT_FOUND).await,
            },
            Err(err) => {
                // transport failures only get logged, the page stays quiet
                warn!("geocoding request failed: {err}");
                Ok(())
            }
        }
    }

    /// Issue both analysis requests concurrently. The reconcilers are
    /// independent tasks: failure of one never blocks the other, and no
    /// in-flight request is ever cancelled.
    async fn run_update(&self) -> SessionResult<()> {
        let request = {
            let state = self.state.read().await;
            let Some(region) = state.region.as_ref() else {
                drop(state);
                return self.panel.alert(MSG_DRAW_FIRST).await;
            };
            AnalysisRequest {
                roi: region.to_polygon(),
                periods: state.collect_periods(),
            }
        };
        debug!(
            "updating analysis for {} period key(s)",
            request.periods.len()
        );

        let statistics_task = {
            let session = self.clone();
            let body = request.clone();
            tokio::spawn(async move { session.reconcile_statistics(body).await })
        };
        let tiles_task = {
            let session = self.clone();
            tokio::spawn(async move { session.reconcile_tiles(request).await })
        };

        let (statistics, tiles) = tokio::join!(statistics_task, tiles_task);
        statistics??;
        tiles??;
        Ok(())
    }

    /// Statistics reconciler: renders the report, a service error, or a
    /// connection error into the info panel
    async fn reconcile_statistics(&self, request: AnalysisRequest) -> SessionResult<()> {
        self.panel.show(MSG_FETCHING).await?;
        match self.analysis.fetch_statistics(request).await {
            Ok(ServiceReply::Failure { error }) => {
                self.panel.show(&format!("Erro: {error}")).await
            }
            Ok(ServiceReply::Periods(entries)) => {
                // read the period list at response time, as the original
                // reads the form when the reply arrives
                let periods = self.periods().await;
                let rendered = report::render_statistics(&periods, &entries);
                self.panel.show(&rendered).await
            }
            Err(err) => {
                self.panel
                    .show(&format!("Erro ao conectar com o servidor: {err}"))
                    .await
            }
        }
    }

    /// Tile reconciler: on success every previous overlay is dropped before
    /// the new set is registered and the layer control rebuilt; on any
    /// failure the existing overlays stay untouched
    async fn reconcile_tiles(&self, request: AnalysisRequest) -> SessionResult<()> {
        match self.analysis.fetch_tiles(request).await {
            Ok(ServiceReply::Failure { error }) => {
                self.panel
                    .append(&format!("Erro ao carregar tiles NDVI: {error}"))
                    .await
            }
            Ok(ServiceReply::Periods(entries)) => {
                let mut state = self.state.write().await;

                let previous = std::mem::take(&mut state.registry.overlays);
                for overlay in &previous {
                    self.canvas.remove_overlay(&overlay.key).await?;
                }

                let mut overlays = Vec::new();
                for (index, period) in state.periods.iter().enumerate() {
                    let position = index + 1;
                    let tile_url = entries
                        .get(&format!("period_{position}"))
                        .and_then(|entry| entry.tile_url.clone());
                    if let Some(tile_url) = tile_url {
                        let overlay =
                            OverlayLayer::for_period(&period.display_name(position), tile_url);
                        self.canvas.add_overlay(&overlay).await?;
                        overlays.push(overlay);
                    }
                }

                state.registry.replace_overlays(overlays);
                self.canvas
                    .rebuild_layer_control(&state.registry.base, &state.registry.overlays)
                    .await?;
                drop(state);

                self.panel.append(MSG_TILES_LOADED).await
            }
            Err(err) => {
                self.panel
                    .append(&format!("Erro ao conectar ao servidor: {err}"))
                    .await
            }
        }
    }
}
