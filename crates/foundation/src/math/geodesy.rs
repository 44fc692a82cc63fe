/// Geographic coordinates in degrees on the unit sphere.
///
/// Land data arrives as GeoJSON `[lon, lat]` pairs, so longitude comes first
/// everywhere in this crate.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LonLat {
    pub lon_deg: f64,
    pub lat_deg: f64,
}

impl LonLat {
    pub fn new(lon_deg: f64, lat_deg: f64) -> Self {
        Self { lon_deg, lat_deg }
    }

    pub fn from_pair(pair: [f64; 2]) -> Self {
        Self::new(pair[0], pair[1])
    }
}

pub fn wrap_lon_deg(lon: f64) -> f64 {
    (lon + 180.0).rem_euclid(360.0) - 180.0
}

/// Maps a uniform variate `u` in `[0, 1)` to a longitude in `[-180, 180)`.
pub fn lon_from_uniform(u: f64) -> f64 {
    (u - 0.5) * 360.0
}

/// Maps a uniform variate `u` in `[0, 1)` to a latitude in degrees such that
/// points are uniformly distributed over the sphere surface (no polar clustering).
pub fn lat_from_uniform(u: f64) -> f64 {
    (u * 2.0 - 1.0).clamp(-1.0, 1.0).asin().to_degrees()
}
