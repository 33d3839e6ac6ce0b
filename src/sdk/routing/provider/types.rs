use serde::Deserialize;

// --- Data Structures for parsing Mapbox responses ---

#[derive(Deserialize)]
pub struct GeoResponse {
    #[serde(default)]
    pub features: Vec<Feature>,
}
#[derive(Deserialize)]
pub struct Feature {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub place_name: String,
    pub center: [f64; 2],
}

#[derive(Deserialize)]
pub struct DirectionsResponse {
    #[serde(default)]
    pub routes: Vec<Route>,
}
#[derive(Deserialize)]
pub struct Route {
    pub geometry: LineString,
    pub distance: f64,
    pub duration: f64,
}
#[derive(Deserialize)]
pub struct LineString {
    pub coordinates: Vec<[f64; 2]>,
}
