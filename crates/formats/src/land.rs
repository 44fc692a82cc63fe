use serde_json::{Map, Value};
use thiserror::Error;

/// Closed ring of `[lon, lat]` vertices in degrees.
pub type Ring = Vec<[f64; 2]>;

/// Land boundary geometry. The first ring of every polygon is the outer
/// boundary; any further rings are holes.
#[derive(Debug, Clone, PartialEq)]
pub enum LandGeometry {
    Polygon(Vec<Ring>),
    MultiPolygon(Vec<Vec<Ring>>),
}

impl LandGeometry {
    /// Every polygon of the geometry as a ring list (one for `Polygon`).
    pub fn polygons(&self) -> impl Iterator<Item = &[Ring]> {
        let slice: &[Vec<Ring>] = match self {
            LandGeometry::Polygon(rings) => std::slice::from_ref(rings),
            LandGeometry::MultiPolygon(polys) => polys.as_slice(),
        };
        slice.iter().map(|rings| rings.as_slice())
    }

    /// Every ring, outer and hole, across all polygons.
    pub fn rings(&self) -> impl Iterator<Item = &Ring> {
        self.polygons().flat_map(|rings| rings.iter())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LandFeature {
    pub id: Option<String>,
    /// Natural Earth `featurecla` property ("Land", "Null island", ...).
    pub class: Option<String>,
    pub geometry: LandGeometry,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LandCollection {
    pub features: Vec<LandFeature>,
    /// Features dropped because their geometry is not an area.
    pub skipped: usize,
}

#[derive(Debug, Error)]
pub enum LandDataError {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("expected GeoJSON FeatureCollection")]
    NotAFeatureCollection,
    #[error("invalid feature at index {index}: {reason}")]
    InvalidFeature { index: usize, reason: String },
}

impl LandCollection {
    pub fn from_geojson_str(payload: &str) -> Result<Self, LandDataError> {
        let value: Value = serde_json::from_str(payload)?;
        Self::from_geojson_value(&value)
    }

    pub fn from_geojson_value(value: &Value) -> Result<Self, LandDataError> {
        let obj = value
            .as_object()
            .ok_or(LandDataError::NotAFeatureCollection)?;
        if obj.get("type").and_then(Value::as_str) != Some("FeatureCollection") {
            return Err(LandDataError::NotAFeatureCollection);
        }
        let features_val = obj
            .get("features")
            .and_then(Value::as_array)
            .ok_or(LandDataError::NotAFeatureCollection)?;

        let mut out = LandCollection::default();
        for (index, feat_val) in features_val.iter().enumerate() {
            let invalid = |reason: String| LandDataError::InvalidFeature { index, reason };

            let feat_obj = feat_val
                .as_object()
                .ok_or_else(|| invalid("feature must be an object".to_string()))?;
            match feat_obj.get("type").and_then(Value::as_str) {
                Some("Feature") => {}
                Some(other) => return Err(invalid(format!("unexpected feature type: {other}"))),
                None => return Err(invalid("feature missing type".to_string())),
            }

            let geometry = match feat_obj.get("geometry") {
                None | Some(Value::Null) => None,
                Some(g) => parse_area_geometry(g).map_err(invalid)?,
            };
            let Some(geometry) = geometry else {
                out.skipped += 1;
                continue;
            };

            out.features.push(LandFeature {
                id: parse_id(feat_obj),
                class: feat_obj
                    .get("properties")
                    .and_then(Value::as_object)
                    .and_then(|p| p.get("featurecla"))
                    .and_then(Value::as_str)
                    .map(str::to_string),
                geometry,
            });
        }

        Ok(out)
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }
}

fn parse_id(feat_obj: &Map<String, Value>) -> Option<String> {
    match feat_obj.get("id") {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

/// `Ok(None)` for well-formed geometries that are not areas.
fn parse_area_geometry(value: &Value) -> Result<Option<LandGeometry>, String> {
    let obj = value
        .as_object()
        .ok_or("geometry must be an object".to_string())?;
    let ty = obj
        .get("type")
        .and_then(Value::as_str)
        .ok_or("geometry missing type".to_string())?;

    match ty {
        "Polygon" | "MultiPolygon" => {}
        _ => return Ok(None),
    }

    let coords = obj
        .get("coordinates")
        .ok_or("geometry missing coordinates".to_string())?;

    if ty == "Polygon" {
        Ok(Some(LandGeometry::Polygon(parse_polygon(coords)?)))
    } else {
        Ok(Some(LandGeometry::MultiPolygon(parse_multi_polygon(coords)?)))
    }
}

fn parse_position(coords: &Value) -> Result<[f64; 2], String> {
    let arr = coords
        .as_array()
        .ok_or("position must be an array".to_string())?;
    match (arr.first().and_then(Value::as_f64), arr.get(1).and_then(Value::as_f64)) {
        (Some(lon), Some(lat)) => Ok([lon, lat]),
        _ => Err("position must have numeric [lon, lat]".to_string()),
    }
}

fn parse_ring(coords: &Value) -> Result<Ring, String> {
    let arr = coords
        .as_array()
        .ok_or("ring must be an array of positions".to_string())?;
    arr.iter().map(parse_position).collect()
}

fn parse_polygon(coords: &Value) -> Result<Vec<Ring>, String> {
    let rings = coords
        .as_array()
        .ok_or("Polygon coordinates must be an array of rings".to_string())?;
    if rings.is_empty() {
        return Err("Polygon has no outer ring".to_string());
    }
    rings.iter().map(parse_ring).collect()
}

fn parse_multi_polygon(coords: &Value) -> Result<Vec<Vec<Ring>>, String> {
    let polys = coords
        .as_array()
        .ok_or("MultiPolygon coordinates must be an array of polygons".to_string())?;
    polys.iter().map(parse_polygon).collect()
}
