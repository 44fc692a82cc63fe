//! Tracks which narrative section is under the viewport midline.

/// Section ids in page order, with their indicator labels.
pub const SECTIONS: [(&str, &str); 6] = [
    ("home", "Home"),
    ("about", "About"),
    ("how-it-works", "How it works"),
    ("what-it-means", "What it means"),
    ("receive-sbt", "SBT"),
    ("roadmaps", "Roadmaps"),
];

/// Section whose first visit starts the AI input auto-typing.
pub const AUTO_TYPE_SECTION: &str = "about";

/// Vertical extent of a section in document coordinates.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SectionBox {
    pub top: f64,
    pub height: f64,
}

/// Document y-coordinate of the viewport midline.
pub fn probe_y(scroll_y: f64, inner_height: f64) -> f64 {
    scroll_y + inner_height / 2.0
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct ScrollUpdate {
    pub active_changed: bool,
    /// Set exactly once per page lifetime.
    pub start_auto_type: bool,
}

/// Where an indicator click should scroll.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ScrollTarget {
    Top,
    Element(&'static str),
}

pub fn scroll_target(section_id: &str) -> Option<ScrollTarget> {
    let (id, _) = SECTIONS.iter().copied().find(|(id, _)| *id == section_id)?;
    Some(if id == "home" {
        ScrollTarget::Top
    } else {
        ScrollTarget::Element(id)
    })
}

#[derive(Debug, Clone, Default)]
pub struct ScrollSpy {
    active: usize,
    auto_type_fired: bool,
}

impl ScrollSpy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> &'static str {
        SECTIONS[self.active].0
    }

    /// `boxes[i]` is the measured extent of `SECTIONS[i]`, `None` when the
    /// element is missing from the page.
    ///
    /// The active section is the last one whose `[top, top + height)` holds
    /// the probe; with no match the previous section stays active.
    pub fn update(&mut self, probe: f64, boxes: &[Option<SectionBox>]) -> ScrollUpdate {
        let mut update = ScrollUpdate::default();

        if !self.auto_type_fired {
            let about = SECTIONS
                .iter()
                .position(|(id, _)| *id == AUTO_TYPE_SECTION)
                .and_then(|i| boxes.get(i).copied().flatten());
            if let Some(b) = about {
                if probe >= b.top && probe <= b.top + b.height {
                    self.auto_type_fired = true;
                    update.start_auto_type = true;
                }
            }
        }

        let hit = boxes
            .iter()
            .take(SECTIONS.len())
            .enumerate()
            .rev()
            .find_map(|(i, b)| {
                let b = (*b)?;
                (probe >= b.top && probe < b.top + b.height).then_some(i)
            });
        if let Some(i) = hit {
            if i != self.active {
                self.active = i;
                update.active_changed = true;
            }
        }
        update
    }
}
