//! Everything one mounted globe owns: land data, the static dot field, the
//! fluorescent layer, rotation, and the generation timer.

use formats::LandCollection;
use foundation::math::{LonLat, Orthographic, Vec2, graticule_lines};
use foundation::time::Millis;
use layers::dots::{DotSample, build_dot_field};
use layers::fluorescent::FluorescentLayer;
use layers::symbology::GlobeStyle;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use runtime::{Scheduler, TimerHandle};

use crate::config::GlobeConfig;
use crate::globe_controller::GlobeController;
use crate::layout::CanvasLayout;
use crate::timers::PageTimer;

/// Land data after it has been fetched and preprocessed.
#[derive(Debug)]
pub struct LoadedLand {
    pub land: LandCollection,
    pub dots: Vec<DotSample>,
    /// Every ring as a lon/lat polyline, for outline strokes.
    pub outlines: Vec<Vec<LonLat>>,
}

#[derive(Debug, Default)]
pub enum LandState {
    #[default]
    Loading,
    Ready(Box<LoadedLand>),
    /// Terminal; carries the user-facing message.
    Failed(String),
}

#[derive(Debug)]
pub struct GlobeModel {
    config: GlobeConfig,
    style: GlobeStyle,
    land: LandState,
    controller: GlobeController,
    layer: FluorescentLayer,
    graticule: Vec<Vec<LonLat>>,
    rng: SmallRng,
    generation_timer: Option<TimerHandle>,
}

impl GlobeModel {
    pub fn new(config: GlobeConfig, seed: u64) -> Self {
        let style = GlobeStyle::default();
        Self {
            controller: GlobeController::new(config.rotation_speed_deg, config.drag_sensitivity),
            layer: FluorescentLayer::new(config.max_points, config.min_batch..=config.max_batch),
            graticule: graticule_lines(style.graticule_step_deg),
            rng: SmallRng::seed_from_u64(seed),
            land: LandState::Loading,
            generation_timer: None,
            style,
            config,
        }
    }

    pub fn config(&self) -> &GlobeConfig {
        &self.config
    }

    pub fn style(&self) -> &GlobeStyle {
        &self.style
    }

    pub fn land_state(&self) -> &LandState {
        &self.land
    }

    pub fn loaded(&self) -> Option<&LoadedLand> {
        match &self.land {
            LandState::Ready(loaded) => Some(loaded),
            LandState::Loading | LandState::Failed(_) => None,
        }
    }

    pub fn controller(&self) -> &GlobeController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut GlobeController {
        &mut self.controller
    }

    pub fn layer(&self) -> &FluorescentLayer {
        &self.layer
    }

    pub fn graticule(&self) -> &[Vec<LonLat>] {
        &self.graticule
    }

    /// Installs fetched land, builds the dot field, runs the first batch
    /// right away and starts the recurring generation timer.
    pub fn land_loaded(
        &mut self,
        land: LandCollection,
        now: Millis,
        scheduler: &mut Scheduler<PageTimer>,
    ) {
        if !matches!(self.land, LandState::Loading) {
            tracing::warn!("land data arrived twice; ignoring");
            return;
        }
        let dots = build_dot_field(&land, self.config.dot_spacing);
        let outlines = land
            .features
            .iter()
            .flat_map(|f| f.geometry.rings())
            .map(|ring| ring.iter().copied().map(LonLat::from_pair).collect())
            .collect();
        tracing::info!(
            features = land.len(),
            skipped = land.skipped,
            dots = dots.len(),
            "land data ready"
        );
        self.land = LandState::Ready(Box::new(LoadedLand { land, dots, outlines }));

        self.generate(now);
        scheduler.cancel_slot(&mut self.generation_timer);
        self.generation_timer = Some(scheduler.schedule_every(
            now,
            self.config.point_interval_ms,
            PageTimer::GeneratePoints,
        ));
    }

    /// Marks the load as failed. No generation ever runs afterwards.
    pub fn land_failed(&mut self, message: String, scheduler: &mut Scheduler<PageTimer>) {
        tracing::error!(error = %message, "failed to load land data");
        scheduler.cancel_slot(&mut self.generation_timer);
        self.land = LandState::Failed(message);
    }

    /// Called when a `GeneratePoints` timer fires. Stale handles are ignored.
    pub fn on_generation_timer(&mut self, handle: TimerHandle, now: Millis) -> usize {
        if self.generation_timer != Some(handle) {
            return 0;
        }
        self.generate(now)
    }

    /// Runs one batch; a no-op until land data is ready.
    pub fn generate(&mut self, now: Millis) -> usize {
        match &self.land {
            LandState::Ready(loaded) => self.layer.generate_batch(&loaded.land, &mut self.rng, now),
            LandState::Loading | LandState::Failed(_) => 0,
        }
    }

    /// Projection for the current rotation and canvas layout.
    pub fn projection(&self, layout: &CanvasLayout) -> Orthographic {
        let [cx, cy] = layout.center();
        Orthographic::new(layout.radius, Vec2::new(cx, cy))
            .with_rotation(self.controller.rotation().as_rotate())
    }

    pub fn teardown(&mut self, scheduler: &mut Scheduler<PageTimer>) {
        scheduler.cancel_slot(&mut self.generation_timer);
        self.controller.teardown(scheduler);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formats::{LandFeature, LandGeometry};

    fn whole_world() -> LandCollection {
        LandCollection {
            features: vec![LandFeature {
                id: None,
                class: Some("Land".to_string()),
                geometry: LandGeometry::Polygon(vec![vec![
                    [-200.0, -100.0],
                    [200.0, -100.0],
                    [200.0, 100.0],
                    [-200.0, 100.0],
                    [-200.0, -100.0],
                ]]),
            }],
            skipped: 0,
        }
    }

    fn drain(globe: &mut GlobeModel, sched: &mut Scheduler<PageTimer>, now: f64) -> usize {
        let mut placed = 0;
        while let Some(fired) = sched.pop_due(Millis(now)) {
            if fired.payload == PageTimer::GeneratePoints {
                placed += globe.on_generation_timer(fired.handle, Millis(now));
            }
        }
        placed
    }

    #[test]
    fn nothing_generates_before_land_arrives() {
        let mut sched = Scheduler::new();
        let mut globe = GlobeModel::new(GlobeConfig::default(), 1);
        assert_eq!(globe.generate(Millis(0.0)), 0);
        assert!(globe.loaded().is_none());
        assert_eq!(sched.pending_count(), 0);
        assert_eq!(drain(&mut globe, &mut sched, 10_000.0), 0);
    }

    #[test]
    fn failed_load_never_generates() {
        let mut sched = Scheduler::new();
        let mut globe = GlobeModel::new(GlobeConfig::default(), 1);
        globe.land_failed("Failed to load land map data".to_string(), &mut sched);
        assert!(matches!(globe.land_state(), LandState::Failed(_)));
        assert_eq!(globe.generate(Millis(0.0)), 0);
        assert_eq!(sched.pending_count(), 0);

        // A late response does not revive a failed globe.
        globe.land_loaded(whole_world(), Millis(100.0), &mut sched);
        assert!(globe.loaded().is_none());
        assert_eq!(sched.pending_count(), 0);
        assert!(globe.layer().population().is_empty());
        assert_eq!(globe.layer().exchanges(), 0);
    }

    #[test]
    fn first_batch_runs_immediately_then_on_interval() {
        let mut sched = Scheduler::new();
        let mut globe = GlobeModel::new(GlobeConfig::default(), 7);
        globe.land_loaded(whole_world(), Millis(0.0), &mut sched);

        let first = globe.layer().exchanges();
        assert!((1..=2).contains(&first));
        assert!(!globe.loaded().map(|l| l.dots.is_empty()).unwrap_or(true));

        assert_eq!(drain(&mut globe, &mut sched, 799.0), 0);
        let placed = drain(&mut globe, &mut sched, 800.0);
        assert!((1..=2).contains(&placed));
        assert_eq!(globe.layer().exchanges(), first + placed as u64);
    }

    #[test]
    fn population_respects_configured_cap() {
        let mut sched = Scheduler::new();
        let config = GlobeConfig {
            max_points: 5,
            ..GlobeConfig::default()
        };
        let mut globe = GlobeModel::new(config, 3);
        globe.land_loaded(whole_world(), Millis(0.0), &mut sched);
        for tick in 1..=40 {
            drain(&mut globe, &mut sched, tick as f64 * 800.0);
            assert!(globe.layer().population().len() <= 5);
        }
        assert_eq!(globe.layer().population().len(), 5);
    }

    #[test]
    fn teardown_stops_generation() {
        let mut sched = Scheduler::new();
        let mut globe = GlobeModel::new(GlobeConfig::default(), 7);
        globe.land_loaded(whole_world(), Millis(0.0), &mut sched);
        let before = globe.layer().exchanges();
        globe.teardown(&mut sched);
        assert_eq!(sched.pending_count(), 0);
        assert_eq!(drain(&mut globe, &mut sched, 10_000.0), 0);
        assert_eq!(globe.layer().exchanges(), before);
    }

    #[test]
    fn projection_follows_rotation_and_layout() {
        let globe = GlobeModel::new(GlobeConfig::default(), 1);
        let layout = CanvasLayout {
            width: 1200.0,
            height: 800.0,
            backing_width: 1200,
            backing_height: 800,
            dpr: 1.0,
            radius: 320.0,
        };
        let proj = globe.projection(&layout);
        assert_eq!(proj.scale, 320.0);
        assert_eq!(proj.translate, Vec2::new(600.0, 400.0));
        assert_eq!(proj.rotate_deg, [0.0, 0.0]);
    }
}
