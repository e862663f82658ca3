use anyhow::{Context, Result};
use geojson::{GeoJson, Geometry, Value};
use std::fs;
use std::path::Path;

/// Feature property naming the park a boundary belongs to
pub const OFFICIAL_NAME_PROPERTY: &str = "OFFICIAL_NAME";

/// A closed ring of (lon, lat) coordinates
pub type Ring = Vec<(f64, f64)>;

/// One polygon or multi-polygon boundary, keyed by the park's official name
#[derive(Clone, Debug, PartialEq)]
pub struct BoundaryFeature {
    pub official_name: String,
    pub rings: Vec<Ring>,
}

/// Load boundaries, degrading to "no boundaries" on any failure.
/// A missing or broken file only costs the polygons; parks fall back to markers.
pub fn load_or_empty(path: &Path) -> Vec<BoundaryFeature> {
    match load_boundaries(path) {
        Ok(features) => {
            log::info!("loaded {} boundary features from {}", features.len(), path.display());
            features
        }
        Err(err) => {
            log::warn!("could not load park boundaries: {:#}", err);
            Vec::new()
        }
    }
}

/// Load a GeoJSON feature collection of park boundaries
pub fn load_boundaries(path: &Path) -> Result<Vec<BoundaryFeature>> {
    let mut bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let geojson: GeoJson = simd_json::serde::from_slice(&mut bytes)
        .with_context(|| format!("parsing {}", path.display()))?;
    Ok(collect_features(geojson))
}

/// Extract named polygon features; unnamed or non-areal features are skipped
pub fn collect_features(geojson: GeoJson) -> Vec<BoundaryFeature> {
    let features = match geojson {
        GeoJson::FeatureCollection(fc) => fc.features,
        GeoJson::Feature(f) => vec![f],
        GeoJson::Geometry(_) => return Vec::new(),
    };

    let mut out = Vec::with_capacity(features.len());
    for feature in features {
        let name = feature
            .properties
            .as_ref()
            .and_then(|p| p.get(OFFICIAL_NAME_PROPERTY))
            .and_then(|v| v.as_str())
            .map(str::to_string);

        let (Some(official_name), Some(geometry)) = (name, feature.geometry) else {
            continue;
        };

        let mut rings = Vec::new();
        collect_rings(&geometry, &mut rings);
        if !rings.is_empty() {
            out.push(BoundaryFeature { official_name, rings });
        }
    }
    out
}

fn collect_rings(geometry: &Geometry, rings: &mut Vec<Ring>) {
    match &geometry.value {
        Value::Polygon(polygon) => {
            for ring in polygon {
                push_ring(ring, rings);
            }
        }
        Value::MultiPolygon(polygons) => {
            for polygon in polygons {
                for ring in polygon {
                    push_ring(ring, rings);
                }
            }
        }
        Value::GeometryCollection(geometries) => {
            for g in geometries {
                collect_rings(g, rings);
            }
        }
        _ => {}
    }
}

fn push_ring(coords: &[Vec<f64>], rings: &mut Vec<Ring>) {
    let ring: Ring = coords
        .iter()
        .filter(|c| c.len() >= 2)
        .map(|c| (c[0], c[1]))
        .collect();
    if ring.len() >= 3 {
        rings.push(ring);
    }
}
