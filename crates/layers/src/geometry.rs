//! Land membership tests against GeoJSON-style boundaries.

use formats::{LandCollection, LandFeature, LandGeometry, Ring};
use foundation::math::LonLat;

/// Even-odd ray casting.
///
/// Correct for simple rings; points exactly on an edge may land either way,
/// and self-intersecting rings give the usual ray-casting ambiguity.
pub fn point_in_ring(point: LonLat, ring: &[[f64; 2]]) -> bool {
    let (x, y) = (point.lon_deg, point.lat_deg);
    let mut inside = false;
    let n = ring.len();
    if n < 3 {
        return false;
    }

    let mut j = n - 1;
    for i in 0..n {
        let [xi, yi] = ring[i];
        let [xj, yj] = ring[j];
        if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Inside the outer ring and inside none of the holes.
pub fn point_in_polygon(point: LonLat, rings: &[Ring]) -> bool {
    let Some((outer, holes)) = rings.split_first() else {
        return false;
    };
    point_in_ring(point, outer) && !holes.iter().any(|hole| point_in_ring(point, hole))
}

pub fn point_in_geometry(point: LonLat, geometry: &LandGeometry) -> bool {
    match geometry {
        LandGeometry::Polygon(rings) => point_in_polygon(point, rings),
        LandGeometry::MultiPolygon(polys) => polys.iter().any(|rings| point_in_polygon(point, rings)),
    }
}

pub fn point_in_feature(point: LonLat, feature: &LandFeature) -> bool {
    point_in_geometry(point, &feature.geometry)
}

/// True when any feature of the collection contains the point.
pub fn point_on_land(point: LonLat, land: &LandCollection) -> bool {
    land.features.iter().any(|f| point_in_feature(point, f))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Ring {
        vec![
            [min_lon, min_lat],
            [max_lon, min_lat],
            [max_lon, max_lat],
            [min_lon, max_lat],
            [min_lon, min_lat],
        ]
    }

    fn feature(geometry: LandGeometry) -> LandFeature {
        LandFeature {
            id: None,
            class: Some("Land".to_string()),
            geometry,
        }
    }

    #[test]
    fn ray_casting_inside_and_outside() {
        let ring = square(0.0, 0.0, 10.0, 10.0);
        assert!(point_in_ring(LonLat::new(5.0, 5.0), &ring));
        assert!(point_in_ring(LonLat::new(0.1, 9.9), &ring));
        assert!(!point_in_ring(LonLat::new(-1.0, 5.0), &ring));
        assert!(!point_in_ring(LonLat::new(5.0, 10.5), &ring));
        assert!(!point_in_ring(LonLat::new(50.0, 50.0), &ring));
    }

    #[test]
    fn ray_casting_concave_ring() {
        // "U" shape open to the north.
        let ring = vec![
            [0.0, 0.0],
            [9.0, 0.0],
            [9.0, 9.0],
            [6.0, 9.0],
            [6.0, 3.0],
            [3.0, 3.0],
            [3.0, 9.0],
            [0.0, 9.0],
        ];
        assert!(point_in_ring(LonLat::new(1.5, 6.0), &ring));
        assert!(point_in_ring(LonLat::new(7.5, 6.0), &ring));
        assert!(point_in_ring(LonLat::new(4.5, 1.5), &ring));
        assert!(!point_in_ring(LonLat::new(4.5, 6.0), &ring));
    }

    #[test]
    fn open_and_closed_rings_agree() {
        let closed = square(-5.0, -5.0, 5.0, 5.0);
        let open = &closed[..closed.len() - 1];
        for p in [LonLat::new(0.0, 0.0), LonLat::new(7.0, 0.0), LonLat::new(-4.0, 4.5)] {
            assert_eq!(point_in_ring(p, &closed), point_in_ring(p, open));
        }
    }

    #[test]
    fn degenerate_ring_contains_nothing() {
        assert!(!point_in_ring(LonLat::new(0.0, 0.0), &[[0.0, 0.0], [1.0, 1.0]]));
        assert!(!point_in_ring(LonLat::new(0.0, 0.0), &[]));
    }

    #[test]
    fn polygon_holes_exclude_points() {
        let f = feature(LandGeometry::Polygon(vec![
            square(0.0, 0.0, 10.0, 10.0),
            square(2.0, 2.0, 4.0, 4.0),
        ]));
        assert!(!point_in_feature(LonLat::new(3.0, 3.0), &f));
        assert!(point_in_feature(LonLat::new(6.0, 6.0), &f));
        assert!(!point_in_feature(LonLat::new(11.0, 6.0), &f));
    }

    #[test]
    fn multipolygon_matches_any_member() {
        let a = vec![square(0.0, 0.0, 10.0, 10.0), square(2.0, 2.0, 4.0, 4.0)];
        let b = vec![square(20.0, 20.0, 30.0, 30.0)];
        let f = feature(LandGeometry::MultiPolygon(vec![a.clone(), b.clone()]));

        for p in [
            LonLat::new(3.0, 3.0),
            LonLat::new(6.0, 6.0),
            LonLat::new(25.0, 25.0),
            LonLat::new(15.0, 15.0),
        ] {
            let expected = point_in_polygon(p, &a) || point_in_polygon(p, &b);
            assert_eq!(point_in_feature(p, &f), expected, "at {p:?}");
        }
        assert!(point_in_feature(LonLat::new(25.0, 25.0), &f));
        assert!(!point_in_feature(LonLat::new(3.0, 3.0), &f));
    }

    #[test]
    fn hole_in_one_member_does_not_hide_another_member() {
        // Island sitting inside the lake of the first polygon.
        let f = feature(LandGeometry::MultiPolygon(vec![
            vec![square(0.0, 0.0, 10.0, 10.0), square(2.0, 2.0, 8.0, 8.0)],
            vec![square(4.0, 4.0, 6.0, 6.0)],
        ]));
        assert!(point_in_feature(LonLat::new(5.0, 5.0), &f));
        assert!(!point_in_feature(LonLat::new(3.0, 3.0), &f));
    }

    #[test]
    fn land_collection_membership() {
        let land = LandCollection {
            features: vec![
                feature(LandGeometry::Polygon(vec![square(0.0, 0.0, 1.0, 1.0)])),
                feature(LandGeometry::Polygon(vec![square(50.0, 50.0, 51.0, 51.0)])),
            ],
            skipped: 0,
        };
        assert!(point_on_land(LonLat::new(50.5, 50.5), &land));
        assert!(!point_on_land(LonLat::new(25.0, 25.0), &land));
        assert!(!point_on_land(LonLat::new(0.5, 0.5), &LandCollection::default()));
    }
}
