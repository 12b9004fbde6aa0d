use geo::MultiPolygon;
use serde::{Deserialize, Serialize};

// One row of the coffee-producer dataset. Every field is text in both source
// encodings (the scraped JSON and its CSV export), so it stays text here.
#[derive(Debug, Clone, Deserialize)]
pub struct CoffeeProducer {
    #[serde(rename = "Rank")]
    pub rank: String,
    #[serde(rename = "Country")]
    pub country: String,
    #[serde(rename = "Bags")]
    pub bags: String,
    #[serde(rename = "MetricTons")]
    pub metric_tons: String,
    #[serde(rename = "Pounds")]
    pub pounds: String,
}

// One world-geometry feature with the attributes the join and classifier need.
// A feature whose source geometry is missing or non-areal keeps an empty
// MultiPolygon; the path generator turns that into an empty path string.
#[derive(Debug, Clone)]
pub struct CountryFeature {
    pub admin: String,
    pub continent: String,
    pub region_un: String,
    pub region_wb: String,
    pub sub_region: String,
    pub geometry: MultiPolygon<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TasteProfile {
    pub summary: String,
}

// Style payload for one rendered path. `d` is fixed at build time;
// stroke/fill are swapped in place on hover enter/leave.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathStyle {
    pub d: String,
    pub stroke: &'static str,
    pub fill: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct MapCountry {
    pub country_name: String,
    pub coffee_region_name: Option<&'static str>,
    pub continent: String,
    pub is_coffee_region: bool,
    pub region_un: String,
    pub region_wb: String,
    pub sub_region: String,
    pub taste_profile: Option<TasteProfile>,
    pub svg: PathStyle,
}
