//! Tubelight navigation bar: a row of links with one active item underlined.

/// Viewport width below which items show glyphs instead of labels.
pub const COMPACT_BREAKPOINT_PX: f64 = 768.0;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct NavItem {
    pub name: &'static str,
    pub url: &'static str,
    /// Short stand-in for the label on narrow screens.
    pub glyph: &'static str,
}

pub const NAV_ITEMS: [NavItem; 4] = [
    NavItem { name: "Home", url: "/", glyph: "⌂" },
    NavItem { name: "About", url: "#about", glyph: "◎" },
    NavItem { name: "Projects", url: "#projects", glyph: "▤" },
    NavItem { name: "Contact", url: "#contact", glyph: "✉" },
];

#[derive(Debug, Clone)]
pub struct TubelightNavbar {
    active: usize,
    compact: bool,
}

impl TubelightNavbar {
    pub fn new(viewport_width: f64) -> Self {
        Self {
            active: 0,
            compact: viewport_width < COMPACT_BREAKPOINT_PX,
        }
    }

    pub fn active(&self) -> &NavItem {
        &NAV_ITEMS[self.active]
    }

    pub fn is_compact(&self) -> bool {
        self.compact
    }

    /// Marks the named item active; returns it so the caller can sync other
    /// navigation state with its url.
    pub fn click(&mut self, name: &str) -> Option<&NavItem> {
        let idx = NAV_ITEMS.iter().position(|item| item.name == name)?;
        self.active = idx;
        Some(&NAV_ITEMS[idx])
    }

    /// Returns `true` when the compact/full mode flipped.
    pub fn on_resize(&mut self, viewport_width: f64) -> bool {
        let compact = viewport_width < COMPACT_BREAKPOINT_PX;
        let changed = compact != self.compact;
        self.compact = compact;
        changed
    }

    /// Text shown for `item` in the current mode.
    pub fn caption(&self, item: &NavItem) -> &'static str {
        if self.compact { item.glyph } else { item.name }
    }
}
