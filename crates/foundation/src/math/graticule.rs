use super::LonLat;

/// Sampling step along graticule lines, in degrees.
const SAMPLE_STEP_DEG: f64 = 2.5;

/// Latitude/longitude grid lines as sampled polylines.
///
/// Meridians stop at ±80° except those on multiples of 90°, which run pole
/// to pole; parallels cover ±80°. This keeps the poles from turning into a
/// dense starburst.
pub fn graticule_lines(step_deg: f64) -> Vec<Vec<LonLat>> {
    let step = if step_deg.is_finite() && step_deg > 0.0 {
        step_deg
    } else {
        10.0
    };
    let mut lines = Vec::new();

    let mut lon: f64 = -180.0;
    while lon < 180.0 {
        let extent = if (lon / 90.0).fract().abs() < 1e-9 {
            90.0
        } else {
            80.0
        };
        lines.push(sample(-extent, extent, |lat| LonLat::new(lon, lat)));
        lon += step;
    }

    let mut lat: f64 = -80.0;
    while lat <= 80.0 + 1e-9 {
        lines.push(sample(-180.0, 180.0, |lon| LonLat::new(lon, lat)));
        lat += step;
    }

    lines
}

fn sample(from: f64, to: f64, at: impl Fn(f64) -> LonLat) -> Vec<LonLat> {
    let n = ((to - from) / SAMPLE_STEP_DEG).ceil().max(1.0) as usize;
    (0..=n)
        .map(|i| at(from + (to - from) * i as f64 / n as f64))
        .collect()
}
