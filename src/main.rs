use anyhow::{bail, Context, Result};
use chargeway::sdk::{
    config::Config,
    favorites::FavoriteStore,
    http::{CachedClient, ResponseCache},
    map::{locate::parse_position, AnchorMarker, FixedLocator, MapController, PoiMarker, TypeFilters, Viewport},
    poi::{OpenChargeMapProvider, PoiAggregator, PoiType, TomTomProvider},
    routing::{Coord, MapboxProvider, RouteResult, RoutingProvider},
    util::log::init_logging,
};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::{fs::File, io::Write, path::PathBuf, sync::Arc};

/// Find EV charging stations and nearby amenities, around a place or along a route
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// [Optional] Write the JSON result to this file instead of stdout
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// POIs around a single location
    Nearby {
        /// Place to search around (e.g., "Times Square, New York")
        location: String,

        #[command(flatten)]
        view: ViewArgs,
    },
    /// Route between two locations and the POIs along it
    Route {
        /// Starting place
        from: String,
        /// Destination place
        to: String,

        #[command(flatten)]
        view: ViewArgs,
    },
    /// Suggest places matching a free-text query
    Search { query: String },
    /// List saved favorites
    Favorites,
}

#[derive(Args, Debug)]
struct ViewArgs {
    /// POI types to show, comma separated (ev-station, hospital, restaurant, petrol-station)
    #[arg(short, long, value_delimiter = ',', default_value = "ev-station")]
    types: Vec<String>,

    /// Only show POIs saved as favorites
    #[arg(long)]
    favorites_only: bool,

    /// Re-centre on the current device position, given as "lng,lat"
    #[arg(long, env = "CHARGEWAY_CURRENT_POSITION")]
    here: Option<String>,

    /// Toggle a POI id in favorites after loading
    #[arg(long = "favorite")]
    favorite: Vec<String>,
}

#[derive(Serialize)]
struct MapReport<'a> {
    mode: chargeway::sdk::map::SearchMode,
    start: Coord,
    end: Option<Coord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    route: Option<&'a RouteResult>,
    viewport: &'a Viewport,
    anchors: &'a [AnchorMarker],
    markers: &'a [PoiMarker],
    total_pois: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    notice: Option<&'a str>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_logging();

    let cli = Cli::parse();
    let config = Config::from_env().context("Invalid configuration")?;

    let client = CachedClient::new(ResponseCache::new(config.cache_ttl, config.cache_capacity))
        .context("Failed to build HTTP client")?;
    let routing: Arc<dyn RoutingProvider> = Arc::new(MapboxProvider::with_base_url(
        client.clone(),
        config.keys.mapbox_token.clone(),
        config.endpoints.mapbox.clone(),
    ));

    let json = match cli.command {
        Command::Search { query } => {
            let mut controller = build_controller(&config, &client, routing, None);
            let places = controller.search(&query).await;
            log::info!("Found {} places for \"{}\"", places.len(), query);
            serde_json::to_string_pretty(&places)?
        }
        Command::Favorites => {
            let favorites = FavoriteStore::load_from_file(&config.favorites_path);
            serde_json::to_string_pretty(favorites.list())?
        }
        Command::Nearby { location, view } => {
            run_view(&config, &client, routing, &location, None, view).await?
        }
        Command::Route { from, to, view } => {
            run_view(&config, &client, routing, &from, Some(&to), view).await?
        }
    };

    match cli.output {
        Some(path) => {
            let mut file = File::create(&path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            file.write_all(json.as_bytes())?;
            log::info!("Results written to {}", path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}

fn build_controller(
    config: &Config,
    client: &CachedClient,
    routing: Arc<dyn RoutingProvider>,
    here: Option<Coord>,
) -> MapController {
    let ev = Arc::new(OpenChargeMapProvider::with_base_url(
        client.clone(),
        config.keys.open_charge_map.clone(),
        config.endpoints.open_charge_map.clone(),
    ));
    let generic = Arc::new(TomTomProvider::with_base_url(
        client.clone(),
        config.keys.tomtom.clone(),
        config.endpoints.tomtom.clone(),
    ));

    MapController::new(
        routing,
        PoiAggregator::new(ev, generic),
        FavoriteStore::load_from_file(&config.favorites_path),
        Arc::new(FixedLocator::new(here)),
    )
}

async fn run_view(
    config: &Config,
    client: &CachedClient,
    routing: Arc<dyn RoutingProvider>,
    start: &str,
    end: Option<&str>,
    view: ViewArgs,
) -> Result<String> {
    let mut types = Vec::with_capacity(view.types.len());
    for raw in &view.types {
        match PoiType::parse(raw) {
            Some(poi_type) => types.push(poi_type),
            None => bail!("Unknown POI type: {}", raw),
        }
    }

    let here = match view.here.as_deref() {
        Some(raw) => Some(
            parse_position(raw).with_context(|| format!("Invalid position \"{}\", expected lng,lat", raw))?,
        ),
        None => None,
    };

    let mut controller = build_controller(config, client, routing, here)
        .with_filters(TypeFilters::only(&types));

    controller.initialize(start, end).await;
    if let Some(route) = controller.route() {
        log::info!(
            "Route: {} in {}{}",
            route.distance,
            route.duration,
            if route.is_synthetic() { " (approximate)" } else { "" }
        );
    }

    if here.is_some() {
        let position = controller.use_current_location().await?;
        log::info!("Re-centred on current position {:?}", position);
    }

    controller.set_favorites_only(view.favorites_only);
    for id in &view.favorite {
        let now_favorite = controller.toggle_favorite(id)?;
        log::info!(
            "{} {}",
            if now_favorite { "Saved favorite" } else { "Removed favorite" },
            id
        );
    }

    log::info!(
        "Showing {} of {} POIs",
        controller.markers().len(),
        controller.pois().len()
    );

    let report = MapReport {
        mode: controller.mode(),
        start: controller.start(),
        end: controller.end(),
        route: controller.route(),
        viewport: controller.viewport(),
        anchors: controller.anchors(),
        markers: controller.markers(),
        total_pois: controller.pois().len(),
        notice: controller.notice(),
    };
    Ok(serde_json::to_string_pretty(&report)?)
}
