use crate::types::{CoffeeProducer, CountryFeature};
use anyhow::{Context, Result, anyhow};
use csv::ReaderBuilder;
use geo::MultiPolygon;
use geojson::GeoJson;
use std::convert::TryInto;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

pub fn load_datasets(
    world_path: &Path,
    producers_path: &Path,
) -> Result<(Vec<CountryFeature>, Vec<CoffeeProducer>)> {
    println!("Loading data...");

    let producers = load_producers(producers_path)?;
    println!("Loaded {} producer records", producers.len());

    let features = load_world(world_path)?;
    println!("Loaded {} world geometry features", features.len());

    Ok((features, producers))
}

pub fn load_producers(path: &Path) -> Result<Vec<CoffeeProducer>> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|s: &str| s.to_lowercase())
        .ok_or_else(|| anyhow!("Producer dataset file has no extension"))?;

    match extension.as_str() {
        "csv" => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open producer CSV: {:?}", path))?;
            parse_producers_csv(file)
        }
        // The scraped source dataset is a JSON array of records.
        "json" => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open producer JSON: {:?}", path))?;
            parse_producers_json(BufReader::new(file))
        }
        _ => Err(anyhow!("Unsupported producer format: {}", extension)),
    }
}

pub fn parse_producers_csv(reader: impl Read) -> Result<Vec<CoffeeProducer>> {
    let mut rdr = ReaderBuilder::new().from_reader(reader);
    let mut producers = Vec::new();
    for result in rdr.deserialize() {
        let record: CoffeeProducer = result.context("Failed to parse producer CSV record")?;
        producers.push(record);
    }
    Ok(producers)
}

pub fn parse_producers_json(reader: impl Read) -> Result<Vec<CoffeeProducer>> {
    serde_json::from_reader(reader).context("Failed to parse producer JSON")
}

pub fn load_world(path: &Path) -> Result<Vec<CountryFeature>> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|s: &str| s.to_lowercase())
        .ok_or_else(|| anyhow!("World geometry file has no extension"))?;

    match extension.as_str() {
        "json" | "geojson" => {
            println!("Loading world GeoJSON from {:?}...", path);
            let file = File::open(path)
                .with_context(|| format!("Failed to open world GeoJSON: {:?}", path))?;
            // warning: this loads the whole file into memory.
            parse_world_geojson(BufReader::new(file))
        }
        "shp" => load_world_shapefile(path),
        _ => Err(anyhow!("Unsupported geometry format: {}", extension)),
    }
}

pub fn parse_world_geojson(reader: impl Read) -> Result<Vec<CountryFeature>> {
    let geojson = GeoJson::from_reader(reader).context("Failed to parse world GeoJSON")?;

    let collection = match geojson {
        GeoJson::FeatureCollection(fc) => fc,
        _ => return Err(anyhow!("World geometry must be a FeatureCollection")),
    };

    let features = collection
        .features
        .into_iter()
        .map(|feature| {
            let properties = feature.properties.as_ref();
            CountryFeature {
                admin: property(properties, "ADMIN"),
                continent: property(properties, "CONTINENT"),
                region_un: property(properties, "REGION_UN"),
                region_wb: property(properties, "REGION_WB"),
                sub_region: property(properties, "SUBREGION"),
                geometry: areal_geometry(feature.geometry),
            }
        })
        .collect();

    Ok(features)
}

fn property(
    properties: Option<&serde_json::Map<String, serde_json::Value>>,
    key: &str,
) -> String {
    properties
        .and_then(|props| props.get(key))
        .and_then(|value| value.as_str())
        .unwrap_or("")
        .to_string()
}

// Missing or malformed geometry degrades to an empty MultiPolygon so the
// feature list keeps its cardinality; the worst outcome downstream is a
// blank shape.
fn areal_geometry(geometry: Option<geojson::Geometry>) -> MultiPolygon<f64> {
    let converted: Option<geo::Geometry<f64>> =
        geometry.and_then(|g| g.value.try_into().ok());

    match converted {
        Some(geo::Geometry::MultiPolygon(mp)) => mp,
        Some(geo::Geometry::Polygon(p)) => MultiPolygon::new(vec![p]),
        _ => MultiPolygon::new(vec![]),
    }
}

// Natural Earth admin-0 ships as a shapefile with the same attribute names
// in the dBase record.
fn load_world_shapefile(path: &Path) -> Result<Vec<CountryFeature>> {
    println!("Loading world shapefile from {:?}...", path);
    let mut reader = shapefile::Reader::from_path(path)
        .with_context(|| format!("Failed to open shapefile: {:?}", path))?;

    let mut features = Vec::new();

    for result in reader.iter_shapes_and_records() {
        let (shape, record) = result?;

        let geometry: MultiPolygon<f64> = match shape {
            shapefile::Shape::Polygon(polygon) => polygon
                .try_into()
                .unwrap_or_else(|_| MultiPolygon::new(vec![])),
            shapefile::Shape::PolygonM(polygon) => polygon
                .try_into()
                .unwrap_or_else(|_| MultiPolygon::new(vec![])),
            shapefile::Shape::PolygonZ(polygon) => polygon
                .try_into()
                .unwrap_or_else(|_| MultiPolygon::new(vec![])),
            _ => MultiPolygon::new(vec![]),
        };

        features.push(CountryFeature {
            admin: dbase_string(&record, "ADMIN"),
            continent: dbase_string(&record, "CONTINENT"),
            region_un: dbase_string(&record, "REGION_UN"),
            region_wb: dbase_string(&record, "REGION_WB"),
            sub_region: dbase_string(&record, "SUBREGION"),
            geometry,
        });
    }

    Ok(features)
}

fn dbase_string(record: &shapefile::dbase::Record, field: &str) -> String {
    match record.get(field) {
        Some(shapefile::dbase::FieldValue::Character(Some(s))) => s.clone(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    const PRODUCERS_CSV: &str = "\
Rank,Country,Bags,MetricTons,Pounds
1,Brazil,44200000,2652000,5714381000
2,Vietnam,27500000,1650000,3637627000
3,Tanzania,1175000,70500,155411000
";

    const PRODUCERS_JSON: &str = r#"[
        {"Rank":"1","Country":"Brazil","Bags":"44200000","MetricTons":"2652000","Pounds":"5714381000"},
        {"Rank":"2","Country":"Vietnam","Bags":"27500000","MetricTons":"1650000","Pounds":"3637627000"},
        {"Rank":"3","Country":"Tanzania","Bags":"1175000","MetricTons":"70500","Pounds":"155411000"}
    ]"#;

    #[test]
    fn csv_and_json_producer_encodings_parse_to_the_same_records() {
        let from_csv = parse_producers_csv(PRODUCERS_CSV.as_bytes()).unwrap();
        let from_json = parse_producers_json(PRODUCERS_JSON.as_bytes()).unwrap();

        assert_eq!(from_csv.len(), 3);
        assert_eq!(from_csv.len(), from_json.len());
        for (a, b) in from_csv.iter().zip(&from_json) {
            assert_eq!(a.rank, b.rank);
            assert_eq!(a.country, b.country);
            assert_eq!(a.bags, b.bags);
            assert_eq!(a.metric_tons, b.metric_tons);
            assert_eq!(a.pounds, b.pounds);
        }
        assert_eq!(from_csv[2].country, "Tanzania");
        assert_eq!(from_csv[2].metric_tons, "70500");
    }

    #[test]
    fn geojson_features_keep_properties_and_geometry() {
        let world = r#"{
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "properties": {
                        "ADMIN": "Brazil",
                        "CONTINENT": "South America",
                        "REGION_UN": "Americas",
                        "REGION_WB": "Latin America & Caribbean",
                        "SUBREGION": "South America"
                    },
                    "geometry": {
                        "type": "Polygon",
                        "coordinates": [[[-60.0, -10.0], [-50.0, -10.0], [-50.0, 0.0], [-60.0, -10.0]]]
                    }
                }
            ]
        }"#;

        let features = parse_world_geojson(world.as_bytes()).unwrap();
        assert_eq!(features.len(), 1);
        assert_eq!(features[0].admin, "Brazil");
        assert_eq!(features[0].region_un, "Americas");
        assert_eq!(features[0].sub_region, "South America");
        assert_eq!(features[0].geometry.0.len(), 1);
    }

    #[test]
    fn feature_without_geometry_is_kept_with_empty_geometry() {
        let world = r#"{
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "properties": {"ADMIN": "Nowhere", "REGION_UN": "Europe"},
                    "geometry": null
                },
                {
                    "type": "Feature",
                    "properties": {"ADMIN": "Pointland", "REGION_UN": "Europe"},
                    "geometry": {"type": "Point", "coordinates": [1.0, 2.0]}
                }
            ]
        }"#;

        let features = parse_world_geojson(world.as_bytes()).unwrap();
        assert_eq!(features.len(), 2);
        assert!(features[0].geometry.0.is_empty());
        assert!(features[1].geometry.0.is_empty());
        assert_eq!(features[0].admin, "Nowhere");
        // Absent properties come through as empty strings.
        assert_eq!(features[0].continent, "");
    }

    #[test]
    fn non_feature_collection_is_rejected() {
        let not_a_collection = r#"{"type": "Point", "coordinates": [0.0, 0.0]}"#;
        assert!(parse_world_geojson(not_a_collection.as_bytes()).is_err());
    }

    #[test]
    fn unsupported_extensions_are_rejected_before_io() {
        assert!(load_world(Path::new("world.txt")).is_err());
        assert!(load_producers(Path::new("producers.xml")).is_err());
        assert!(load_producers(Path::new("producers")).is_err());
    }
}
