use crate::projection::FittedProjection;
use crate::regions;
use crate::types::{CoffeeProducer, CountryFeature, MapCountry, PathStyle};
use std::collections::HashMap;

// Known spelling divergences between the producer dataset and the geometry
// dataset's ADMIN names. Applied to producer names before insertion so
// lookups by ADMIN succeed.
const NAME_EXCEPTIONS: [(&str, &str); 2] = [
    ("Tanzania", "United Republic of Tanzania"),
    ("Timor Leste", "East Timor"),
];

fn resolve_producer_name(raw: &str) -> &str {
    NAME_EXCEPTIONS
        .iter()
        .find(|(source, _)| *source == raw)
        .map(|(_, resolved)| *resolved)
        .unwrap_or(raw)
}

// Build the full country list for one rendering pass: join the producer
// dataset onto the geometry features by country name and attach classifier
// output plus a projected path string per feature. Output order follows the
// feature list (it is the rendering z-order). Pure; safe to call repeatedly.
pub fn build_countries(
    features: &[CountryFeature],
    producers: &[CoffeeProducer],
    surface_size: (f64, f64),
) -> Vec<MapCountry> {
    // Last write wins on duplicate resolved names; the fixed dataset has none.
    let producer_lookup: HashMap<&str, &CoffeeProducer> = producers
        .iter()
        .map(|producer| (resolve_producer_name(&producer.country), producer))
        .collect();

    let projection = FittedProjection::fit(features, surface_size);

    features
        .iter()
        .map(|feature| {
            let is_coffee_region = producer_lookup.contains_key(feature.admin.as_str());

            let color = if is_coffee_region {
                regions::region_color(&feature.region_un)
            } else {
                regions::DEFAULT_COLOR
            };

            MapCountry {
                country_name: feature.admin.clone(),
                coffee_region_name: regions::region_name(&feature.region_un),
                continent: feature.continent.clone(),
                is_coffee_region,
                region_un: feature.region_un.clone(),
                region_wb: feature.region_wb.clone(),
                sub_region: feature.sub_region.clone(),
                taste_profile: regions::taste_profile(&feature.region_un),
                svg: PathStyle {
                    d: projection.path_for(&feature.geometry),
                    stroke: color,
                    fill: color,
                },
            }
        })
        .collect()
}
