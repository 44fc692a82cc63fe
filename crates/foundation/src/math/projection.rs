use super::{LonLat, Vec2};

/// Points this close to the horizon count as hidden.
const HORIZON_EPSILON: f64 = 1e-12;

/// Orthographic (view-from-infinity) projection of the unit sphere.
///
/// Follows the usual web-cartography conventions: `rotate_deg = [λ, φ]`
/// centres the view on `(-λ, -φ)`, screen Y grows downward, and the clip
/// angle is fixed at 90° so only the facing hemisphere projects.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Orthographic {
    /// Sphere radius in CSS pixels.
    pub scale: f64,
    /// Screen position of the view centre.
    pub translate: Vec2,
    /// `[λ, φ]` rotation in degrees.
    pub rotate_deg: [f64; 2],
}

/// Sphere point after rotation into view space.
#[derive(Debug, Copy, Clone, PartialEq)]
struct ViewPoint {
    /// Towards the viewer; positive on the visible hemisphere.
    depth: f64,
    x: f64,
    y: f64,
}

impl Orthographic {
    pub fn new(scale: f64, translate: Vec2) -> Self {
        Self {
            scale,
            translate,
            rotate_deg: [0.0, 0.0],
        }
    }

    pub fn with_rotation(mut self, rotate_deg: [f64; 2]) -> Self {
        self.rotate_deg = rotate_deg;
        self
    }

    fn to_view(&self, p: LonLat) -> ViewPoint {
        let lambda = (p.lon_deg + self.rotate_deg[0]).to_radians();
        let phi = p.lat_deg.to_radians();
        let (sin_dphi, cos_dphi) = self.rotate_deg[1].to_radians().sin_cos();

        let k = phi.cos();
        let x = lambda.cos() * k;
        let y = lambda.sin() * k;
        let z = phi.sin();

        ViewPoint {
            depth: x * cos_dphi - z * sin_dphi,
            x: y,
            y: z * cos_dphi + x * sin_dphi,
        }
    }

    /// Projects a point, returning `None` for the far hemisphere.
    pub fn project(&self, p: LonLat) -> Option<Vec2> {
        let v = self.to_view(p);
        if v.depth <= HORIZON_EPSILON {
            return None;
        }
        Some(Vec2::new(
            self.translate.x + self.scale * v.x,
            self.translate.y - self.scale * v.y,
        ))
    }

    /// Projects a polyline, splitting it wherever it crosses onto the far side.
    ///
    /// Runs shorter than two vertices are dropped.
    pub fn project_polyline(&self, line: &[LonLat]) -> Vec<Vec<Vec2>> {
        let mut runs = Vec::new();
        let mut current: Vec<Vec2> = Vec::new();
        for &p in line {
            match self.project(p) {
                Some(px) => current.push(px),
                None => {
                    if current.len() >= 2 {
                        runs.push(std::mem::take(&mut current));
                    } else {
                        current.clear();
                    }
                }
            }
        }
        if current.len() >= 2 {
            runs.push(current);
        }
        runs
    }
}
