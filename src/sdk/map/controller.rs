use super::filters::{visible_pois, TypeFilters};
use super::locate::{GeolocationError, Locator};
use super::markers::{AnchorMarker, Bounds, PoiMarker, Viewport, FOCUS_ZOOM, INITIAL_ZOOM};
use crate::sdk::favorites::{FavoriteStore, FavoritesError};
use crate::sdk::poi::aggregate::PoiAggregator;
use crate::sdk::poi::types::{Poi, PoiType};
use crate::sdk::routing::coord::{validate_coord, Coord, DEFAULT_CENTER};
use crate::sdk::routing::error::RoutingError;
use crate::sdk::routing::geocode::{geocode_or_default, search_or_empty, PlaceSuggestion};
use crate::sdk::routing::route::{calculate_route, RouteResult};
use crate::sdk::routing::service::RoutingProvider;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

/// How far (in degrees, roughly 100 m) a re-centred start may sit from the
/// drawn route and still search along it.
const ON_ROUTE_TOLERANCE_DEG: f64 = 0.001;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewState {
    Initializing,
    Loaded,
    Filtering,
    Searching,
    Locating,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    Nearby,
    Route,
}

/// Generation stamp of a POI fetch. Only the most recently issued ticket
/// may publish its results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FetchTicket(u64);

#[derive(Error, Debug)]
pub enum ControllerError {
    #[error(transparent)]
    Geolocation(#[from] GeolocationError),

    #[error(transparent)]
    Routing(#[from] RoutingError),

    #[error(transparent)]
    Favorites(#[from] FavoritesError),

    #[error("No POI with id {0} is on the map or in favorites")]
    UnknownPoi(String),
}

/// Headless map view: owns the current search, its POIs, filters and the
/// marker set a front end should draw.
///
/// Markers are rebuilt from scratch whenever POIs, filters or favorites
/// change.
pub struct MapController {
    routing: Arc<dyn RoutingProvider>,
    aggregator: PoiAggregator,
    favorites: FavoriteStore,
    locator: Arc<dyn Locator>,

    state: ViewState,
    mode: SearchMode,
    start: Coord,
    end: Option<Coord>,
    route: Option<RouteResult>,
    pois: Vec<Poi>,
    filters: TypeFilters,
    favorites_only: bool,

    anchors: Vec<AnchorMarker>,
    markers: Vec<PoiMarker>,
    viewport: Viewport,
    notice: Option<String>,

    generation: u64,
    loading: bool,
}

impl MapController {
    pub fn new(
        routing: Arc<dyn RoutingProvider>,
        aggregator: PoiAggregator,
        favorites: FavoriteStore,
        locator: Arc<dyn Locator>,
    ) -> Self {
        Self {
            routing,
            aggregator,
            favorites,
            locator,
            state: ViewState::Initializing,
            mode: SearchMode::Nearby,
            start: DEFAULT_CENTER,
            end: None,
            route: None,
            pois: Vec::new(),
            filters: TypeFilters::default(),
            favorites_only: false,
            anchors: Vec::new(),
            markers: Vec::new(),
            viewport: Viewport::centered(DEFAULT_CENTER, INITIAL_ZOOM),
            notice: None,
            generation: 0,
            loading: false,
        }
    }

    pub fn with_filters(mut self, filters: TypeFilters) -> Self {
        self.filters = filters;
        self
    }

    // --- accessors ---

    pub fn state(&self) -> ViewState {
        self.state
    }
    pub fn mode(&self) -> SearchMode {
        self.mode
    }
    pub fn start(&self) -> Coord {
        self.start
    }
    pub fn end(&self) -> Option<Coord> {
        self.end
    }
    pub fn route(&self) -> Option<&RouteResult> {
        self.route.as_ref()
    }
    pub fn pois(&self) -> &[Poi] {
        &self.pois
    }
    pub fn markers(&self) -> &[PoiMarker] {
        &self.markers
    }
    pub fn anchors(&self) -> &[AnchorMarker] {
        &self.anchors
    }
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }
    pub fn filters(&self) -> &TypeFilters {
        &self.filters
    }
    pub fn favorites(&self) -> &FavoriteStore {
        &self.favorites
    }
    pub fn favorites_only(&self) -> bool {
        self.favorites_only
    }
    pub fn is_loading(&self) -> bool {
        self.loading
    }
    /// Last user-facing problem worth showing, if any.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }
    pub fn aggregator(&self) -> &PoiAggregator {
        &self.aggregator
    }

    // --- location lifecycle ---

    /// Resolves the submitted locations and loads everything around them.
    /// Giving an end location switches to route mode.
    pub async fn initialize(&mut self, start_location: &str, end_location: Option<&str>) {
        self.state = ViewState::Initializing;
        self.notice = None;
        self.anchors.clear();
        self.markers.clear();
        self.route = None;
        self.end = None;

        let start = geocode_or_default(self.routing.as_ref(), start_location).await;
        self.start = start;
        self.anchors.push(AnchorMarker::start(start_location, start));
        self.viewport = Viewport::centered(start, INITIAL_ZOOM);

        match end_location {
            Some(end_location) => {
                self.mode = SearchMode::Route;
                let end = geocode_or_default(self.routing.as_ref(), end_location).await;
                self.end = Some(end);
                self.anchors.push(AnchorMarker::end(end_location, end));

                match calculate_route(self.routing.as_ref(), start, end).await {
                    Ok(route) => {
                        if route.is_synthetic() {
                            log::warn!("Directions unavailable; showing an approximate route");
                        }
                        self.viewport.fit = Bounds::around(&route.geometry);
                        self.route = Some(route);
                    }
                    Err(err) => {
                        log::error!("Map initialization error: {}", err);
                        self.notice = Some(err.to_string());
                    }
                }
            }
            None => self.mode = SearchMode::Nearby,
        }

        self.refresh_pois(true).await;
        self.state = ViewState::Loaded;
    }

    /// Up to five places matching `query`.
    pub async fn search(&mut self, query: &str) -> Vec<PlaceSuggestion> {
        self.state = ViewState::Searching;
        let results = search_or_empty(self.routing.as_ref(), query).await;
        self.state = ViewState::Loaded;
        results
    }

    /// Re-centres on `coord` and reloads POIs around it. The destination
    /// and drawn route are kept; the route's sample points are searched only
    /// while `coord` still lies on it, otherwise `coord` and the destination.
    pub async fn select_location(&mut self, coord: Coord) -> Result<(), ControllerError> {
        validate_coord(coord)?;
        self.state = ViewState::Searching;
        let follow_route = self.on_route(coord);
        self.recenter(coord);
        self.refresh_pois(follow_route).await;
        self.state = ViewState::Loaded;
        Ok(())
    }

    /// Re-centres on the device position. Failures are returned for the
    /// caller to show; there is no retry.
    pub async fn use_current_location(&mut self) -> Result<Coord, ControllerError> {
        self.state = ViewState::Locating;
        let position = match self.locator.current_position().await {
            Ok(position) => position,
            Err(err) => {
                log::error!("Geolocation error: {}", err);
                self.notice = Some(err.to_string());
                self.state = ViewState::Loaded;
                return Err(err.into());
            }
        };
        let follow_route = self.on_route(position);
        self.recenter(position);
        self.refresh_pois(follow_route).await;
        self.state = ViewState::Loaded;
        Ok(position)
    }

    fn recenter(&mut self, coord: Coord) {
        self.start = coord;
        self.viewport = Viewport::centered(coord, FOCUS_ZOOM);
        if let Some(anchor) = self.anchors.first_mut() {
            anchor.position = coord;
        }
    }

    fn on_route(&self, coord: Coord) -> bool {
        self.route
            .as_ref()
            .is_some_and(|route| route.passes_near(coord, ON_ROUTE_TOLERANCE_DEG))
    }

    // --- fetch generations ---

    /// Starts a fetch. Any ticket issued earlier becomes stale.
    ///
    /// The controller's own flows hold `&mut self` from here to
    /// [`complete_fetch`](Self::complete_fetch), so they never overlap. The
    /// tickets matter to callers that run [`PoiAggregator::fetch_pois`]
    /// themselves (for example on a spawned task) and publish the results
    /// back through `complete_fetch`.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.generation += 1;
        self.loading = true;
        FetchTicket(self.generation)
    }

    /// Publishes `pois` if `ticket` is still current. Returns whether they
    /// were applied.
    pub fn complete_fetch(&mut self, ticket: FetchTicket, pois: Vec<Poi>) -> bool {
        if ticket.0 != self.generation {
            log::debug!(
                "Discarding stale POI results (generation {} < {})",
                ticket.0,
                self.generation
            );
            return false;
        }
        self.pois = pois;
        self.loading = false;
        self.render();
        true
    }

    async fn refresh_pois(&mut self, follow_route: bool) {
        let ticket = self.begin_fetch();
        let route = self.route.as_ref().filter(|_| follow_route);
        let pois = self.aggregator.fetch_pois(self.start, self.end, route).await;
        self.complete_fetch(ticket, pois);
    }

    // --- filters & favorites ---

    pub fn toggle_filter(&mut self, poi_type: PoiType) {
        self.state = ViewState::Filtering;
        self.filters.toggle(poi_type);
        self.render();
        self.state = ViewState::Loaded;
    }

    pub fn set_filters(&mut self, filters: TypeFilters) {
        self.state = ViewState::Filtering;
        self.filters = filters;
        self.render();
        self.state = ViewState::Loaded;
    }

    pub fn set_favorites_only(&mut self, favorites_only: bool) {
        self.state = ViewState::Filtering;
        self.favorites_only = favorites_only;
        self.render();
        self.state = ViewState::Loaded;
    }

    /// Adds or removes a POI from favorites. Returns `true` if it is now a
    /// favorite.
    pub fn toggle_favorite(&mut self, poi_id: &str) -> Result<bool, ControllerError> {
        let poi = self
            .pois
            .iter()
            .chain(self.favorites.list())
            .find(|poi| poi.id == poi_id)
            .cloned()
            .ok_or_else(|| ControllerError::UnknownPoi(poi_id.to_string()))?;

        let now_favorite = self.favorites.toggle(&poi)?;
        self.render();
        Ok(now_favorite)
    }

    fn render(&mut self) {
        self.markers = visible_pois(&self.pois, &self.filters, self.favorites_only, &self.favorites)
            .into_iter()
            .map(|poi| PoiMarker::new(poi, self.favorites.contains(&poi.id)))
            .collect();
        log::debug!(
            "Rendered {} of {} POIs as markers",
            self.markers.len(),
            self.pois.len()
        );
    }
}
