use serde::Deserialize;

// --- OpenChargeMap /v3/poi records ---

#[derive(Debug, Deserialize)]
pub struct OcmStation {
    #[serde(rename = "ID", default)]
    pub id: Option<i64>,
    #[serde(rename = "AddressInfo", default)]
    pub address_info: Option<OcmAddressInfo>,
    #[serde(rename = "Connections", default)]
    pub connections: Option<Vec<OcmConnection>>,
    #[serde(rename = "StatusType", default)]
    pub status_type: Option<OcmTitled>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct OcmAddressInfo {
    pub title: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub address_line1: Option<String>,
    pub town: Option<String>,
    pub state_or_province: Option<String>,
    pub postcode: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct OcmConnection {
    #[serde(rename = "ConnectionType", default)]
    pub connection_type: Option<OcmTitled>,
}

#[derive(Debug, Deserialize)]
pub struct OcmTitled {
    #[serde(rename = "Title", default)]
    pub title: Option<String>,
}

// --- TomTom categorySearch ---

#[derive(Debug, Deserialize)]
pub struct TomTomResponse {
    #[serde(default)]
    pub results: Vec<TomTomResult>,
}

#[derive(Debug, Deserialize)]
pub struct TomTomResult {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub poi: Option<TomTomPoi>,
    pub position: TomTomPosition,
    #[serde(default)]
    pub address: Option<TomTomAddress>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TomTomPoi {
    pub name: Option<String>,
    pub categories: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct TomTomPosition {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TomTomAddress {
    pub freeform_address: Option<String>,
}
