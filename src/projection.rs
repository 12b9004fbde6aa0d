use crate::types::CountryFeature;
use geo::{CoordsIter, LineString, MultiPolygon};
use std::fmt::Write;

// Equirectangular projection fitted to a rendering surface: longitude and
// latitude map linearly (in radians) around the dataset's center, scaled so
// the full geographic extent fits inside width x height.
#[derive(Debug, Clone, Copy)]
pub struct FittedProjection {
    scale: f64, // pixels per radian
    center_lon: f64,
    center_lat: f64,
    half_width: f64,
    half_height: f64,
}

impl FittedProjection {
    pub fn fit(features: &[CountryFeature], surface_size: (f64, f64)) -> FittedProjection {
        let (width, height) = surface_size;

        let mut min_lon = f64::INFINITY;
        let mut max_lon = f64::NEG_INFINITY;
        let mut min_lat = f64::INFINITY;
        let mut max_lat = f64::NEG_INFINITY;

        for feature in features {
            for coord in feature.geometry.coords_iter() {
                min_lon = min_lon.min(coord.x);
                max_lon = max_lon.max(coord.x);
                min_lat = min_lat.min(coord.y);
                max_lat = max_lat.max(coord.y);
            }
        }

        // No coordinates at all: park everything at the surface center.
        if !min_lon.is_finite() {
            return FittedProjection {
                scale: 0.0,
                center_lon: 0.0,
                center_lat: 0.0,
                half_width: width / 2.0,
                half_height: height / 2.0,
            };
        }

        let extent_lon = (max_lon - min_lon).to_radians();
        let extent_lat = (max_lat - min_lat).to_radians();

        let mut scale = f64::INFINITY;
        if extent_lon > 0.0 {
            scale = scale.min(width / extent_lon);
        }
        if extent_lat > 0.0 {
            scale = scale.min(height / extent_lat);
        }
        if !scale.is_finite() {
            scale = 0.0; // degenerate extent (single point)
        }

        FittedProjection {
            scale,
            center_lon: ((min_lon + max_lon) / 2.0).to_radians(),
            center_lat: ((min_lat + max_lat) / 2.0).to_radians(),
            half_width: width / 2.0,
            half_height: height / 2.0,
        }
    }

    pub fn project(&self, lon: f64, lat: f64) -> (f64, f64) {
        let x = self.half_width + (lon.to_radians() - self.center_lon) * self.scale;
        let y = self.half_height + (self.center_lat - lat.to_radians()) * self.scale;
        (x, y)
    }

    // SVG path data for one country: an M..L..Z subpath per ring, exterior
    // then interiors, in source coordinate order. Empty geometry yields an
    // empty string, which renders as a blank shape rather than failing.
    pub fn path_for(&self, geometry: &MultiPolygon<f64>) -> String {
        let mut d = String::new();
        for polygon in geometry {
            self.append_ring(&mut d, polygon.exterior());
            for interior in polygon.interiors() {
                self.append_ring(&mut d, interior);
            }
        }
        d
    }

    fn append_ring(&self, d: &mut String, ring: &LineString<f64>) {
        let coords = &ring.0;
        if coords.len() < 2 {
            return;
        }

        // Rings are closed (last == first); Z supplies the closing segment.
        let last = if coords[coords.len() - 1] == coords[0] {
            coords.len() - 1
        } else {
            coords.len()
        };

        for (i, coord) in coords[..last].iter().enumerate() {
            let (x, y) = self.project(coord.x, coord.y);
            let command = if i == 0 { 'M' } else { 'L' };
            write!(d, "{}{:.2},{:.2}", command, x, y).expect("write to string");
        }
        d.push('Z');
    }
}
