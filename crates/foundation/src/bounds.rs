use crate::math::LonLat;

/// Longitude/latitude bounding box in degrees.
///
/// Plain min/max over the vertices: callers feed antimeridian-split data
/// (as Natural Earth ships it), so no wrap-around handling is attempted.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GeoBounds {
    pub min: LonLat,
    pub max: LonLat,
}

impl GeoBounds {
    pub fn new(min: LonLat, max: LonLat) -> Self {
        GeoBounds { min, max }
    }

    /// Returns `None` when the iterator yields no finite vertex.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a [f64; 2]>) -> Option<Self> {
        let mut acc: Option<GeoBounds> = None;
        for p in points {
            if !(p[0].is_finite() && p[1].is_finite()) {
                continue;
            }
            let ll = LonLat::from_pair(*p);
            acc = Some(match acc {
                None => GeoBounds::new(ll, ll),
                Some(b) => b.including(ll),
            });
        }
        acc
    }

    pub fn including(self, p: LonLat) -> Self {
        GeoBounds {
            min: LonLat::new(self.min.lon_deg.min(p.lon_deg), self.min.lat_deg.min(p.lat_deg)),
            max: LonLat::new(self.max.lon_deg.max(p.lon_deg), self.max.lat_deg.max(p.lat_deg)),
        }
    }
}
