/// The six fluorescent hues used for simulated data-access points.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum FluorescentColor {
    Green,
    Cyan,
    Yellow,
    Magenta,
    SpringGreen,
    Orange,
}

impl FluorescentColor {
    pub const ALL: [FluorescentColor; 6] = [
        FluorescentColor::Green,
        FluorescentColor::Cyan,
        FluorescentColor::Yellow,
        FluorescentColor::Magenta,
        FluorescentColor::SpringGreen,
        FluorescentColor::Orange,
    ];

    pub const fn rgb(self) -> [u8; 3] {
        match self {
            FluorescentColor::Green => [0x00, 0xff, 0x00],
            FluorescentColor::Cyan => [0x00, 0xff, 0xff],
            FluorescentColor::Yellow => [0xff, 0xff, 0x00],
            FluorescentColor::Magenta => [0xff, 0x00, 0xff],
            FluorescentColor::SpringGreen => [0x00, 0xff, 0x88],
            FluorescentColor::Orange => [0xff, 0x88, 0x00],
        }
    }

    pub fn hex(self) -> String {
        let [r, g, b] = self.rgb();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    pub fn rgba_css(self, alpha: f64) -> String {
        let [r, g, b] = self.rgb();
        let a = if alpha.is_finite() { alpha.clamp(0.0, 1.0) } else { 0.0 };
        format!("rgba({r}, {g}, {b}, {a})")
    }
}

/// Fixed look of the globe itself.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GlobeStyle {
    pub ocean_fill: &'static str,
    pub outline: &'static str,
    pub outline_width_px: f64,
    pub graticule_alpha: f64,
    pub graticule_step_deg: f64,
    pub land_width_px: f64,
    pub dot_color: &'static str,
    pub dot_radius_px: f64,
}

impl Default for GlobeStyle {
    fn default() -> Self {
        Self {
            ocean_fill: "#000000",
            outline: "#ffffff",
            outline_width_px: 2.0,
            graticule_alpha: 0.25,
            graticule_step_deg: 10.0,
            land_width_px: 1.0,
            dot_color: "#999999",
            dot_radius_px: 1.2,
        }
    }
}
