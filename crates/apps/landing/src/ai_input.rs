//! Chat-style input with a simulated "thinking" state.
//!
//! Besides manual submission the widget can type canned prompts by itself
//! (auto-type) and loop between submitted and idle (auto-animate). Every
//! delay goes through the page scheduler; each sequence owns its handle.

use foundation::time::Millis;
use runtime::{Scheduler, TimerHandle};

use crate::config::AiInputConfig;
use crate::timers::{AiInputTimer, PageTimer};

pub const STATUS_THINKING: &str = "AI is thinking...";
pub const STATUS_TYPING: &str = "Typing...";
pub const STATUS_READY: &str = "Ready to submit!";

/// Enter submits; Shift+Enter inserts a newline.
pub fn is_submit_key(key: &str, shift: bool) -> bool {
    key == "Enter" && !shift
}

/// Textarea height for a given content height.
pub fn clamp_height(content_px: f64, min_px: f64, max_px: f64) -> f64 {
    if content_px.is_finite() {
        content_px.max(min_px).min(max_px.max(min_px))
    } else {
        min_px
    }
}

/// Position in the auto-type sequence.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AutoTypeState {
    Off,
    /// `chars` characters of text `text` are visible.
    Typing { text: usize, chars: usize },
    /// Fully typed, waiting to be submitted.
    AwaitingSubmit { text: usize },
    Loading { text: usize },
    /// Waiting before the next text starts.
    Cooldown { text: usize },
    Finished,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct AiInputView<'a> {
    pub value: &'a str,
    pub status: &'static str,
    /// Textarea and button are disabled.
    pub disabled: bool,
    pub submitted: bool,
}

#[derive(Debug, Clone)]
pub struct AiInput {
    config: AiInputConfig,
    value: String,
    submitted: bool,
    auto_type: AutoTypeState,
    animating: bool,
    auto_type_timer: Option<TimerHandle>,
    submit_timer: Option<TimerHandle>,
    animate_timer: Option<TimerHandle>,
}

impl AiInput {
    pub fn new(config: AiInputConfig) -> Self {
        Self {
            config,
            value: String::new(),
            submitted: false,
            auto_type: AutoTypeState::Off,
            animating: false,
            auto_type_timer: None,
            submit_timer: None,
            animate_timer: None,
        }
    }

    pub fn config(&self) -> &AiInputConfig {
        &self.config
    }

    pub fn auto_type_state(&self) -> AutoTypeState {
        self.auto_type
    }

    pub fn is_typing(&self) -> bool {
        matches!(self.auto_type, AutoTypeState::Typing { .. })
    }

    pub fn view(&self) -> AiInputView<'_> {
        let status = if self.submitted {
            STATUS_THINKING
        } else if self.is_typing() {
            STATUS_TYPING
        } else {
            STATUS_READY
        };
        AiInputView {
            value: &self.value,
            status,
            disabled: self.submitted || self.is_typing(),
            submitted: self.submitted,
        }
    }

    /// User edited the textarea.
    pub fn on_input(&mut self, value: &str) {
        if !self.submitted && !self.is_typing() {
            self.value.clear();
            self.value.push_str(value);
        }
    }

    /// Submits the current value. Returns the submitted text, or `None` when
    /// the value is blank or the widget is busy.
    pub fn submit(&mut self, now: Millis, scheduler: &mut Scheduler<PageTimer>) -> Option<String> {
        if self.value.trim().is_empty() || self.submitted || self.is_typing() {
            return None;
        }
        let value = std::mem::take(&mut self.value);
        tracing::info!(value = %value, "submitted");
        self.submitted = true;
        scheduler.cancel_slot(&mut self.submit_timer);
        self.submit_timer = Some(scheduler.schedule_once(
            now,
            self.config.loading_ms,
            PageTimer::AiInput(AiInputTimer::SubmitDone),
        ));
        Some(value)
    }

    /// Starts typing the configured prompts from the first one.
    pub fn start_auto_type(&mut self, now: Millis, scheduler: &mut Scheduler<PageTimer>) {
        if self.config.auto_type_texts.is_empty() {
            tracing::debug!("auto-type requested without texts");
            return;
        }
        tracing::debug!(texts = self.config.auto_type_texts.len(), "starting auto-type");
        self.begin_text(0, now, scheduler);
    }

    /// Starts the submitted/idle loop.
    pub fn start_auto_animate(&mut self, now: Millis, scheduler: &mut Scheduler<PageTimer>) {
        self.animating = true;
        self.submitted = true;
        scheduler.cancel_slot(&mut self.animate_timer);
        self.animate_timer = Some(scheduler.schedule_once(
            now,
            self.config.loading_ms,
            PageTimer::AiInput(AiInputTimer::Animate),
        ));
    }

    /// Dispatches a fired widget timer. Stale handles are ignored.
    pub fn on_timer(
        &mut self,
        kind: AiInputTimer,
        handle: TimerHandle,
        now: Millis,
        scheduler: &mut Scheduler<PageTimer>,
    ) {
        match kind {
            AiInputTimer::AutoType => {
                if self.auto_type_timer == Some(handle) {
                    self.auto_type_timer = None;
                    self.step_auto_type(now, scheduler);
                }
            }
            AiInputTimer::SubmitDone => {
                if self.submit_timer == Some(handle) {
                    self.submit_timer = None;
                    self.submitted = false;
                }
            }
            AiInputTimer::Animate => {
                if self.animate_timer == Some(handle) && self.animating {
                    let (submitted, delay) = if self.submitted {
                        (false, self.config.thinking_ms)
                    } else {
                        (true, self.config.loading_ms)
                    };
                    self.submitted = submitted;
                    self.animate_timer = Some(scheduler.schedule_once(
                        now,
                        delay,
                        PageTimer::AiInput(AiInputTimer::Animate),
                    ));
                }
            }
        }
    }

    pub fn teardown(&mut self, scheduler: &mut Scheduler<PageTimer>) {
        scheduler.cancel_slot(&mut self.auto_type_timer);
        scheduler.cancel_slot(&mut self.submit_timer);
        scheduler.cancel_slot(&mut self.animate_timer);
        self.animating = false;
        if self.auto_type != AutoTypeState::Off {
            self.auto_type = AutoTypeState::Finished;
        }
    }

    fn arm_auto_type(&mut self, now: Millis, delay_ms: f64, scheduler: &mut Scheduler<PageTimer>) {
        scheduler.cancel_slot(&mut self.auto_type_timer);
        self.auto_type_timer = Some(scheduler.schedule_once(
            now,
            delay_ms,
            PageTimer::AiInput(AiInputTimer::AutoType),
        ));
    }

    fn begin_text(&mut self, text: usize, now: Millis, scheduler: &mut Scheduler<PageTimer>) {
        self.value.clear();
        self.auto_type = AutoTypeState::Typing { text, chars: 0 };
        self.arm_auto_type(now, self.config.type_speed_ms, scheduler);
    }

    fn after_text(&mut self, text: usize, now: Millis, scheduler: &mut Scheduler<PageTimer>) {
        if text + 1 < self.config.auto_type_texts.len() {
            self.auto_type = AutoTypeState::Cooldown { text };
            self.arm_auto_type(now, self.config.delay_between_texts_ms, scheduler);
        } else {
            self.auto_type = AutoTypeState::Finished;
        }
    }

    fn step_auto_type(&mut self, now: Millis, scheduler: &mut Scheduler<PageTimer>) {
        match self.auto_type {
            AutoTypeState::Typing { text, chars } => {
                let Some(target) = self.config.auto_type_texts.get(text) else {
                    self.auto_type = AutoTypeState::Finished;
                    return;
                };
                if let Some(next) = target.chars().nth(chars) {
                    self.value.push(next);
                    self.auto_type = AutoTypeState::Typing { text, chars: chars + 1 };
                    self.arm_auto_type(now, self.config.type_speed_ms, scheduler);
                } else if self.config.auto_submit {
                    self.auto_type = AutoTypeState::AwaitingSubmit { text };
                    self.arm_auto_type(now, self.config.submit_delay_ms, scheduler);
                } else {
                    self.after_text(text, now, scheduler);
                }
            }
            AutoTypeState::AwaitingSubmit { text } => {
                if let Some(prompt) = self.config.auto_type_texts.get(text) {
                    tracing::info!(value = %prompt, "submitted");
                }
                self.submitted = true;
                self.value.clear();
                self.auto_type = AutoTypeState::Loading { text };
                self.arm_auto_type(now, self.config.loading_ms, scheduler);
            }
            AutoTypeState::Loading { text } => {
                self.submitted = false;
                self.after_text(text, now, scheduler);
            }
            AutoTypeState::Cooldown { text } => self.begin_text(text + 1, now, scheduler),
            AutoTypeState::Off | AutoTypeState::Finished => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn config(texts: &[&str], auto_submit: bool) -> AiInputConfig {
        AiInputConfig {
            auto_type_texts: texts.iter().map(|t| t.to_string()).collect(),
            auto_submit,
            ..AiInputConfig::default()
        }
    }

    fn run(input: &mut AiInput, sched: &mut Scheduler<PageTimer>, now: f64) {
        while let Some(fired) = sched.pop_due(Millis(now)) {
            if let PageTimer::AiInput(kind) = fired.payload {
                input.on_timer(kind, fired.handle, fired.due, sched);
            }
        }
    }

    #[test]
    fn submit_key_is_plain_enter() {
        assert!(is_submit_key("Enter", false));
        assert!(!is_submit_key("Enter", true));
        assert!(!is_submit_key("a", false));
    }

    #[test]
    fn height_is_clamped() {
        assert_eq!(clamp_height(20.0, 56.0, 200.0), 56.0);
        assert_eq!(clamp_height(120.0, 56.0, 200.0), 120.0);
        assert_eq!(clamp_height(900.0, 56.0, 200.0), 200.0);
        assert_eq!(clamp_height(f64::NAN, 56.0, 200.0), 56.0);
    }

    #[test]
    fn blank_values_are_not_submitted() {
        let mut sched = Scheduler::new();
        let mut input = AiInput::new(AiInputConfig::default());
        assert_eq!(input.submit(Millis(0.0), &mut sched), None);
        input.on_input("   \n");
        assert_eq!(input.submit(Millis(0.0), &mut sched), None);
        assert_eq!(sched.pending_count(), 0);
    }

    #[test]
    fn manual_submit_shows_thinking_for_loading_duration() {
        let mut sched = Scheduler::new();
        let mut input = AiInput::new(AiInputConfig::default());
        input.on_input("hello");
        assert_eq!(input.submit(Millis(0.0), &mut sched), Some("hello".to_string()));
        let view = input.view();
        assert_eq!(view.status, STATUS_THINKING);
        assert!(view.disabled);
        assert_eq!(view.value, "");

        // Busy: further input and submissions are ignored.
        input.on_input("again");
        assert_eq!(input.submit(Millis(10.0), &mut sched), None);

        run(&mut input, &mut sched, 2_999.0);
        assert_eq!(input.view().status, STATUS_THINKING);
        run(&mut input, &mut sched, 3_000.0);
        assert_eq!(input.view().status, STATUS_READY);
        assert!(!input.view().disabled);
    }

    #[test]
    fn auto_type_types_submits_and_moves_on() {
        let mut sched = Scheduler::new();
        let mut input = AiInput::new(config(&["ab", "c"], true));
        input.start_auto_type(Millis(0.0), &mut sched);
        assert_eq!(input.view().status, STATUS_TYPING);

        run(&mut input, &mut sched, 30.0);
        assert_eq!(input.view().value, "a");
        run(&mut input, &mut sched, 60.0);
        assert_eq!(input.view().value, "ab");
        assert!(input.view().disabled);

        // Typing finishes one tick after the last character.
        run(&mut input, &mut sched, 90.0);
        assert_eq!(input.auto_type_state(), AutoTypeState::AwaitingSubmit { text: 0 });
        assert_eq!(input.view().status, STATUS_READY);

        run(&mut input, &mut sched, 590.0);
        assert_eq!(input.view().status, STATUS_THINKING);
        assert_eq!(input.view().value, "");

        run(&mut input, &mut sched, 3_590.0);
        assert_eq!(input.auto_type_state(), AutoTypeState::Cooldown { text: 0 });
        assert_eq!(input.view().status, STATUS_READY);

        run(&mut input, &mut sched, 5_590.0);
        assert_eq!(input.auto_type_state(), AutoTypeState::Typing { text: 1, chars: 0 });
        run(&mut input, &mut sched, 5_620.0);
        assert_eq!(input.view().value, "c");

        run(&mut input, &mut sched, 100_000.0);
        assert_eq!(input.auto_type_state(), AutoTypeState::Finished);
        assert_eq!(input.view().status, STATUS_READY);
        assert_eq!(sched.pending_count(), 0);
    }

    #[test]
    fn auto_type_without_submit_keeps_text() {
        let mut sched = Scheduler::new();
        let mut input = AiInput::new(config(&["hi", "yo"], false));
        input.start_auto_type(Millis(0.0), &mut sched);
        run(&mut input, &mut sched, 90.0);
        assert_eq!(input.auto_type_state(), AutoTypeState::Cooldown { text: 0 });
        assert_eq!(input.view().value, "hi");
        assert!(!input.view().submitted);

        run(&mut input, &mut sched, 2_090.0);
        assert_eq!(input.view().value, "");
        run(&mut input, &mut sched, 2_180.0);
        assert_eq!(input.view().value, "yo");
        assert_eq!(input.auto_type_state(), AutoTypeState::Finished);
    }

    #[test]
    fn manual_submit_is_ignored_while_typing() {
        let mut sched = Scheduler::new();
        let mut input = AiInput::new(config(&["abc"], true));
        input.start_auto_type(Millis(0.0), &mut sched);
        run(&mut input, &mut sched, 30.0);
        input.on_input("mine");
        assert_eq!(input.view().value, "a");
        assert_eq!(input.submit(Millis(31.0), &mut sched), None);
    }

    #[test]
    fn multibyte_text_types_whole_characters() {
        let mut sched = Scheduler::new();
        let mut input = AiInput::new(config(&["é✓"], false));
        input.start_auto_type(Millis(0.0), &mut sched);
        run(&mut input, &mut sched, 30.0);
        assert_eq!(input.view().value, "é");
        run(&mut input, &mut sched, 60.0);
        assert_eq!(input.view().value, "é✓");
    }

    #[test]
    fn empty_text_list_does_nothing() {
        let mut sched = Scheduler::new();
        let mut input = AiInput::new(config(&[], true));
        input.start_auto_type(Millis(0.0), &mut sched);
        assert_eq!(input.auto_type_state(), AutoTypeState::Off);
        assert_eq!(sched.pending_count(), 0);
    }

    #[test]
    fn auto_animate_alternates() {
        let mut sched = Scheduler::new();
        let mut input = AiInput::new(AiInputConfig::default());
        input.start_auto_animate(Millis(0.0), &mut sched);
        assert!(input.view().submitted);
        run(&mut input, &mut sched, 3_000.0);
        assert!(!input.view().submitted);
        run(&mut input, &mut sched, 4_000.0);
        assert!(input.view().submitted);
        run(&mut input, &mut sched, 7_000.0);
        assert!(!input.view().submitted);
    }

    #[test]
    fn teardown_cancels_every_sequence() {
        let mut sched = Scheduler::new();
        let mut input = AiInput::new(config(&["abc"], true));
        input.start_auto_type(Millis(0.0), &mut sched);
        input.start_auto_animate(Millis(0.0), &mut sched);
        input.teardown(&mut sched);
        assert_eq!(sched.pending_count(), 0);
        assert_eq!(input.auto_type_state(), AutoTypeState::Finished);
    }
}
