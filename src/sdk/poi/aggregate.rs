use super::dedup::dedup_pois;
use super::error::PipelineError;
use super::mock::fallback_pois;
use super::provider::{PoiProvider, PoiQuery};
use super::types::{Poi, SearchCategory};
use crate::sdk::routing::coord::{is_valid_coord, Coord, DEFAULT_CENTER};
use crate::sdk::routing::route::RouteResult;
use crate::sdk::routing::sampler::{sample_route, DEFAULT_SAMPLE_POINTS};
use std::sync::Arc;

pub const DEFAULT_RADIUS_KM: f64 = 5.0;
pub const MIN_ROUTE_RADIUS_KM: f64 = 3.0;
pub const MAX_ROUTE_RADIUS_KM: f64 = 10.0;

/// Where to search and how wide.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchPlan {
    pub points: Vec<Coord>,
    pub radius_km: f64,
}

impl SearchPlan {
    /// Provider calls this plan costs: one EV lookup plus one generic lookup
    /// per category, for every point.
    pub fn call_count(&self) -> usize {
        self.points.len() * (1 + SearchCategory::ALL.len())
    }
}

/// Chooses search points for a start, optional destination and optional
/// route. Routes are sampled and widen the radius with their length.
pub fn plan_search(
    start: Coord,
    end: Option<Coord>,
    route: Option<&RouteResult>,
    sample_points: usize,
) -> SearchPlan {
    match (end, route) {
        (Some(end), Some(route)) => {
            let mut points = sample_route(&route.geometry, sample_points);
            if points.len() < 2 {
                points = vec![start, end];
            }
            let radius_km = (route.distance_km() / 20.0).clamp(MIN_ROUTE_RADIUS_KM, MAX_ROUTE_RADIUS_KM);
            SearchPlan { points, radius_km }
        }
        (Some(end), None) => SearchPlan {
            points: vec![start, end],
            radius_km: DEFAULT_RADIUS_KM,
        },
        (None, _) => SearchPlan {
            points: vec![start],
            radius_km: DEFAULT_RADIUS_KM,
        },
    }
}

/// Queries both providers at every search point, one call at a time, and
/// merges the results into a deduplicated list.
#[derive(Clone)]
pub struct PoiAggregator {
    ev: Arc<dyn PoiProvider>,
    generic: Arc<dyn PoiProvider>,
    sample_points: usize,
}

impl PoiAggregator {
    pub fn new(ev: Arc<dyn PoiProvider>, generic: Arc<dyn PoiProvider>) -> Self {
        Self {
            ev,
            generic,
            sample_points: DEFAULT_SAMPLE_POINTS,
        }
    }

    pub fn with_sample_points(mut self, sample_points: usize) -> Self {
        self.sample_points = sample_points;
        self
    }

    /// Never fails: if the pipeline collapses entirely, placeholder POIs
    /// near `start` are returned instead.
    pub async fn fetch_pois(
        &self,
        start: Coord,
        end: Option<Coord>,
        route: Option<&RouteResult>,
    ) -> Vec<Poi> {
        let plan = plan_search(start, end, route, self.sample_points);
        log::info!(
            "Searching at {} points with radius {}km",
            plan.points.len(),
            plan.radius_km
        );

        match self.collect(&plan).await {
            Ok(pois) => {
                let unique = dedup_pois(pois);
                log::info!("Found {} unique POIs", unique.len());
                unique
            }
            Err(err) => {
                log::error!("Error fetching POIs: {}. Serving fallback POIs", err);
                let near = if is_valid_coord(start) { start } else { DEFAULT_CENTER };
                fallback_pois(near)
            }
        }
    }

    async fn collect(&self, plan: &SearchPlan) -> Result<Vec<Poi>, PipelineError> {
        let points: Vec<Coord> = plan
            .points
            .iter()
            .copied()
            .filter(|&point| {
                let ok = is_valid_coord(point);
                if !ok {
                    log::warn!("Skipping invalid search point {:?}", point);
                }
                ok
            })
            .collect();
        if points.is_empty() {
            return Err(PipelineError::NoSearchPoints);
        }

        let mut all = Vec::new();
        let mut attempts = 0;
        let mut failures = 0;

        for (lng, lat) in points {
            let calls = std::iter::once((&self.ev, SearchCategory::ChargingStation)).chain(
                SearchCategory::ALL
                    .into_iter()
                    .map(|category| (&self.generic, category)),
            );

            for (provider, category) in calls {
                let query = PoiQuery {
                    latitude: lat,
                    longitude: lng,
                    radius_km: plan.radius_km,
                    category,
                };
                attempts += 1;
                match provider.fetch_pois(&query).await {
                    Ok(pois) => all.extend(pois),
                    Err(err) => {
                        failures += 1;
                        log::error!(
                            "Error fetching {} from {}: {}",
                            category.query(),
                            provider.name(),
                            err
                        );
                    }
                }
            }
        }

        if failures == attempts {
            return Err(PipelineError::AllProvidersFailed { attempts });
        }
        Ok(all)
    }
}
