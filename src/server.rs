use crate::config::AppConfig;
use crate::hover::{Tooltip, WorldMapState};
use crate::processing;
use crate::render;
use crate::types::{CoffeeProducer, CountryFeature, TasteProfile};
use anyhow::Result;
use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use geo::{BoundingRect, Contains, Point, Rect};
use rstar::{RTree, RTreeObject, AABB};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

// Wrapper for RTree indexing; indices line up with the feature list and the
// country list (one MapCountry per feature, same order).
struct CountryIndex {
    index: usize,
    aabb: AABB<[f64; 2]>,
}

impl RTreeObject for CountryIndex {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        self.aabb
    }
}

pub struct AppState {
    features: Vec<CountryFeature>,
    producers: Vec<CoffeeProducer>,
    tree: RTree<CountryIndex>,
    // The host runtime serializes pointer events; the lock is that
    // serialization. Handlers never await while holding it.
    map: Mutex<MapSurface>,
}

struct MapSurface {
    state: WorldMapState,
    size: (f64, f64),
}

#[derive(Deserialize)]
pub struct PointParams {
    lon: f64,
    lat: f64,
}

#[derive(Deserialize)]
pub struct CountryParams {
    country: String,
}

#[derive(Deserialize)]
pub struct ResizeParams {
    width: f64,
    height: f64,
}

#[derive(Serialize)]
pub struct QueryResponse {
    country_name: String,
    continent: String,
    region_un: String,
    sub_region: String,
    is_coffee_region: bool,
    coffee_region_name: Option<&'static str>,
    taste_profile: Option<TasteProfile>,
}

#[derive(Serialize)]
pub struct PathColors {
    country_name: String,
    fill: &'static str,
    stroke: &'static str,
}

#[derive(Serialize)]
pub struct HoverResponse {
    tooltip: Option<Tooltip>,
    styles: Vec<PathColors>,
}

#[derive(Serialize)]
pub struct ResizeResponse {
    width: f64,
    height: f64,
    countries: usize,
}

pub fn build_state(
    features: Vec<CountryFeature>,
    producers: Vec<CoffeeProducer>,
    surface_size: (f64, f64),
) -> AppState {
    println!("Building spatial index for {} features...", features.len());
    let tree_items: Vec<CountryIndex> = features
        .iter()
        .enumerate()
        .map(|(i, feature)| {
            let rect = feature.geometry.bounding_rect().unwrap_or(Rect::new(
                geo::Coord { x: 0.0, y: 0.0 },
                geo::Coord { x: 0.0, y: 0.0 },
            ));
            CountryIndex {
                index: i,
                aabb: AABB::from_corners(
                    [rect.min().x, rect.min().y],
                    [rect.max().x, rect.max().y],
                ),
            }
        })
        .collect();
    let tree = RTree::bulk_load(tree_items);

    let countries = processing::build_countries(&features, &producers, surface_size);

    AppState {
        features,
        producers,
        tree,
        map: Mutex::new(MapSurface {
            state: WorldMapState::new(countries),
            size: surface_size,
        }),
    }
}

pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/map.svg", get(map_svg_handler))
        .route("/api/query", get(query_handler))
        .route("/api/hover", get(hover_handler))
        .route("/api/leave", get(leave_handler))
        .route("/api/resize", get(resize_handler))
        .fallback_service(ServeDir::new("."))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn start_server(
    config: AppConfig,
    features: Vec<CountryFeature>,
    producers: Vec<CoffeeProducer>,
) -> Result<()> {
    let state = Arc::new(build_state(features, producers, config.map.surface_size()));

    let port = config.server.port;
    let addr = SocketAddr::from(([127, 0, 0, 1], port));

    println!("Starting server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app(state)).await?;
    Ok(())
}

// Current map, re-rendered from live hover state.
async fn map_svg_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let surface = state.map.lock().expect("map state lock poisoned");
    let svg = render::render_svg(&surface.state.countries, surface.size);
    ([(header::CONTENT_TYPE, "image/svg+xml")], svg)
}

// Country under a geographic point, or null. R-tree candidates first, then
// exact containment, as in any point-in-polygon lookup over a feature set.
async fn query_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PointParams>,
) -> Json<Option<QueryResponse>> {
    let point = Point::new(params.lon, params.lat);
    let envelope = AABB::from_point([params.lon, params.lat]);

    let candidates = state.tree.locate_in_envelope_intersecting(&envelope);

    for candidate in candidates {
        let Some(feature) = state.features.get(candidate.index) else {
            continue;
        };
        if !feature.geometry.contains(&point) {
            continue;
        }

        let surface = state.map.lock().expect("map state lock poisoned");
        let Some(country) = surface.state.countries.get(candidate.index) else {
            continue;
        };
        return Json(Some(QueryResponse {
            country_name: country.country_name.clone(),
            continent: country.continent.clone(),
            region_un: country.region_un.clone(),
            sub_region: country.sub_region.clone(),
            is_coffee_region: country.is_coffee_region,
            coffee_region_name: country.coffee_region_name,
            taste_profile: country.taste_profile.clone(),
        }));
    }

    Json(None)
}

async fn hover_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CountryParams>,
) -> Json<HoverResponse> {
    let mut surface = state.map.lock().expect("map state lock poisoned");
    let tooltip = surface.state.pointer_enter(&params.country);
    Json(HoverResponse {
        tooltip,
        styles: current_styles(&surface.state),
    })
}

async fn leave_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CountryParams>,
) -> Json<HoverResponse> {
    let mut surface = state.map.lock().expect("map state lock poisoned");
    surface.state.pointer_leave(&params.country);
    Json(HoverResponse {
        tooltip: None,
        styles: current_styles(&surface.state),
    })
}

// Viewport-size change: wholesale rebuild at the new surface size.
async fn resize_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ResizeParams>,
) -> Json<ResizeResponse> {
    let size = (params.width, params.height);
    let mut surface = state.map.lock().expect("map state lock poisoned");
    surface.size = size;
    surface
        .state
        .rebuild(&state.features, &state.producers, size);
    Json(ResizeResponse {
        width: params.width,
        height: params.height,
        countries: surface.state.countries.len(),
    })
}

fn current_styles(state: &WorldMapState) -> Vec<PathColors> {
    state
        .countries
        .iter()
        .map(|country| PathColors {
            country_name: country.country_name.clone(),
            fill: country.svg.fill,
            stroke: country.svg.stroke,
        })
        .collect()
}
