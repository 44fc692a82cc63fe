//! Canvas sizing for the viewport, and the exchange counter text.

/// Viewport width below which the compact layout applies.
pub const MOBILE_BREAKPOINT_PX: f64 = 640.0;

/// Globe radius is the shorter canvas side divided by this.
const RADIUS_DIVISOR: f64 = 2.5;

pub const EXCHANGE_LABEL: &str = "échanges en temps réel";

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Viewport {
    pub inner_width: f64,
    pub inner_height: f64,
    pub device_pixel_ratio: f64,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CanvasLayout {
    /// CSS size.
    pub width: f64,
    pub height: f64,
    /// Backing-store size in device pixels.
    pub backing_width: u32,
    pub backing_height: u32,
    pub dpr: f64,
    pub radius: f64,
}

impl CanvasLayout {
    pub fn fit(pref_width: f64, pref_height: f64, viewport: Viewport) -> Self {
        let mobile = viewport.inner_width < MOBILE_BREAKPOINT_PX;
        let padding = if mobile { 20.0 } else { 40.0 };
        let chrome = if mobile { 150.0 } else { 100.0 };
        let width = pref_width.min(viewport.inner_width - padding).max(1.0);
        let height = pref_height.min(viewport.inner_height - chrome).max(1.0);
        let dpr = if viewport.device_pixel_ratio.is_finite() && viewport.device_pixel_ratio > 0.0 {
            viewport.device_pixel_ratio
        } else {
            1.0
        };
        Self {
            width,
            height,
            backing_width: (width * dpr).round() as u32,
            backing_height: (height * dpr).round() as u32,
            dpr,
            radius: width.min(height) / RADIUS_DIVISOR,
        }
    }

    pub fn center(&self) -> [f64; 2] {
        [self.width / 2.0, self.height / 2.0]
    }
}

/// Groups digits by thousands with a narrow no-break space, as French
/// locale formatting does (`12 345`).
pub fn format_exchange_count(count: u64) -> String {
    let digits = count.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 * 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('\u{202F}');
        }
        out.push(ch);
    }
    out
}
