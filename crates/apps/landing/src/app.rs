//! Page-level state: owns the scheduler and routes input, timers and load
//! results to the components. Holds no DOM handles, so the whole flow can be
//! driven from tests.

use formats::LandCollection;
use foundation::time::Millis;
use runtime::{Fired, Scheduler};

use crate::ai_input::AiInput;
use crate::config::PageConfig;
use crate::globe::GlobeModel;
use crate::land_source::LoadError;
use crate::navbar::TubelightNavbar;
use crate::scroll_spy::{ScrollSpy, ScrollUpdate, SectionBox};
use crate::timers::PageTimer;
use crate::wheel_nav::{Navigation, WheelNavigator, destination_index};

/// What the DOM layer has to do after a frame.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FrameOutcome {
    pub navigations: Vec<Navigation>,
    /// New points were generated (log and counter need a refresh).
    pub points_added: usize,
    /// The AI input's value, status or disabled state may have changed.
    pub input_changed: bool,
}

#[derive(Debug)]
pub struct PageState {
    scheduler: Scheduler<PageTimer>,
    globe: GlobeModel,
    wheel: WheelNavigator,
    spy: ScrollSpy,
    navbar: TubelightNavbar,
    ai_input: AiInput,
}

/// Location and viewport facts read once at mount.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MountContext<'a> {
    pub path: &'a str,
    pub hash: &'a str,
    pub viewport_width: f64,
    pub seed: u64,
}

impl PageState {
    pub fn new(config: PageConfig, ctx: MountContext<'_>, now: Millis) -> Self {
        let mut scheduler = Scheduler::new();
        let mut ai_input = AiInput::new(config.ai_input);
        if ai_input.config().auto_animate {
            ai_input.start_auto_animate(now, &mut scheduler);
        }
        Self {
            wheel: WheelNavigator::new(
                config.globe.wheel_quiet_ms,
                destination_index(ctx.path, ctx.hash),
            ),
            globe: GlobeModel::new(config.globe, ctx.seed),
            spy: ScrollSpy::new(),
            navbar: TubelightNavbar::new(ctx.viewport_width),
            ai_input,
            scheduler,
        }
    }

    pub fn globe(&self) -> &GlobeModel {
        &self.globe
    }

    pub fn spy(&self) -> &ScrollSpy {
        &self.spy
    }

    pub fn navbar(&self) -> &TubelightNavbar {
        &self.navbar
    }

    pub fn navbar_mut(&mut self) -> &mut TubelightNavbar {
        &mut self.navbar
    }

    pub fn ai_input(&self) -> &AiInput {
        &self.ai_input
    }

    pub fn pending_timers(&self) -> usize {
        self.scheduler.pending_count()
    }

    /// Applies the outcome of the land fetch. A failure leaves the globe in
    /// `LandState::Failed` with the message the error view shows.
    pub fn on_land_result(&mut self, result: Result<LandCollection, LoadError>, now: Millis) {
        match result {
            Ok(land) => self.globe.land_loaded(land, now, &mut self.scheduler),
            Err(err) => self.globe.land_failed(err.to_string(), &mut self.scheduler),
        }
    }

    /// One animation frame: rotate, then fire every due timer.
    pub fn on_frame(&mut self, now: Millis) -> FrameOutcome {
        self.globe.controller_mut().update();

        let mut outcome = FrameOutcome::default();
        while let Some(fired) = self.scheduler.pop_due(now) {
            self.dispatch(fired, now, &mut outcome);
        }
        outcome
    }

    fn dispatch(&mut self, fired: Fired<PageTimer>, now: Millis, outcome: &mut FrameOutcome) {
        match fired.payload {
            PageTimer::GeneratePoints => {
                outcome.points_added += self.globe.on_generation_timer(fired.handle, now);
            }
            PageTimer::ResumeAutoRotate => {
                self.globe.controller_mut().on_resume_timer(fired.handle);
            }
            PageTimer::WheelSettle => {
                if let Some(nav) = self.wheel.on_settle(fired.handle) {
                    outcome.navigations.push(nav);
                }
            }
            PageTimer::AiInput(kind) => {
                self.ai_input
                    .on_timer(kind, fired.handle, fired.due, &mut self.scheduler);
                outcome.input_changed = true;
            }
        }
    }

    pub fn on_pointer_down(&mut self, pos_px: [f64; 2]) {
        self.globe
            .controller_mut()
            .on_pointer_down(pos_px, &mut self.scheduler);
    }

    /// Returns `true` when the globe should be redrawn right away.
    pub fn on_pointer_move(&mut self, pos_px: [f64; 2]) -> bool {
        self.globe.controller_mut().on_pointer_move(pos_px)
    }

    pub fn on_pointer_up(&mut self, now: Millis) {
        self.globe
            .controller_mut()
            .on_pointer_up(now, &mut self.scheduler);
    }

    pub fn on_wheel(&mut self, delta_y: f64, now: Millis) {
        self.wheel.on_wheel(delta_y, now, &mut self.scheduler);
    }

    /// Scroll-spy update; starts auto-typing the first time the about
    /// section is reached.
    pub fn on_scroll(&mut self, probe: f64, boxes: &[Option<SectionBox>], now: Millis) -> ScrollUpdate {
        let update = self.spy.update(probe, boxes);
        if update.start_auto_type {
            self.ai_input.start_auto_type(now, &mut self.scheduler);
        }
        update
    }

    /// Navbar click; returns the clicked item's url.
    pub fn on_nav_click(&mut self, name: &str) -> Option<&'static str> {
        let url = self.navbar.click(name)?.url;
        self.wheel.sync_to(url);
        Some(url)
    }

    pub fn on_input(&mut self, value: &str) {
        self.ai_input.on_input(value);
    }

    pub fn submit(&mut self, now: Millis) -> Option<String> {
        self.ai_input.submit(now, &mut self.scheduler)
    }

    /// Releases every timer. The state stays readable but inert.
    pub fn teardown(&mut self) {
        self.globe.teardown(&mut self.scheduler);
        self.wheel.teardown(&mut self.scheduler);
        self.ai_input.teardown(&mut self.scheduler);
        self.scheduler.clear();
    }
}
