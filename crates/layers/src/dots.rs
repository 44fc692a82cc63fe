use formats::{LandCollection, LandFeature};
use foundation::bounds::GeoBounds;
use foundation::math::LonLat;

use crate::geometry::point_in_feature;

/// Dot spacing used for the land texture.
pub const DEFAULT_DOT_SPACING: f64 = 16.0;

/// Grid step in degrees per unit of spacing.
const STEP_PER_SPACING: f64 = 0.08;

/// Static background dot. Generated once at load time, never mutated.
pub type DotSample = LonLat;

/// Regular lon/lat grid over the feature's bounding box, keeping the grid
/// points that fall on the feature. Deterministic for identical input.
pub fn generate_dots_in_polygon(feature: &LandFeature, spacing: f64) -> Vec<DotSample> {
    let step = spacing * STEP_PER_SPACING;
    if !(step.is_finite() && step > 0.0) {
        return Vec::new();
    }
    let Some(bounds) = GeoBounds::from_points(feature.geometry.rings().flatten()) else {
        return Vec::new();
    };

    let mut dots = Vec::new();
    let mut i = 0u32;
    loop {
        let lon = bounds.min.lon_deg + f64::from(i) * step;
        if lon > bounds.max.lon_deg {
            break;
        }
        let mut j = 0u32;
        loop {
            let lat = bounds.min.lat_deg + f64::from(j) * step;
            if lat > bounds.max.lat_deg {
                break;
            }
            let p = LonLat::new(lon, lat);
            if point_in_feature(p, feature) {
                dots.push(p);
            }
            j += 1;
        }
        i += 1;
    }
    dots
}

/// Dots for every land feature, in feature order.
pub fn build_dot_field(land: &LandCollection, spacing: f64) -> Vec<DotSample> {
    let mut all = Vec::new();
    for feature in &land.features {
        let dots = generate_dots_in_polygon(feature, spacing);
        tracing::debug!(
            count = dots.len(),
            class = feature.class.as_deref().unwrap_or("Land"),
            "generated dots for land feature"
        );
        all.extend(dots);
    }
    tracing::info!(
        total = all.len(),
        features = land.len(),
        "dot field generated"
    );
    all
}
