//! Tunables for the globe and the AI input widget.
//!
//! Every field has a default; a JSON document passed to `mount` (or found in
//! the canvas `data-config` attribute) only needs to name what it overrides.

use serde::Deserialize;

pub const NATURAL_EARTH_LAND_URL: &str = "https://raw.githubusercontent.com/martynafford/natural-earth-geojson/refs/heads/master/110m/physical/ne_110m_land.json";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GlobeConfig {
    /// Delay between generation batches.
    pub point_interval_ms: f64,
    /// Population cap; the oldest point is evicted beyond it.
    pub max_points: usize,
    /// Preferred canvas size in CSS pixels before viewport clamping.
    pub width: f64,
    pub height: f64,
    /// Inclusive range of points attempted per batch.
    pub min_batch: usize,
    pub max_batch: usize,
    /// Background dot spacing (grid step is `dot_spacing * 0.08` degrees).
    pub dot_spacing: f64,
    /// Auto-rotation step, degrees of longitude per animation frame.
    pub rotation_speed_deg: f64,
    /// Degrees per dragged pixel.
    pub drag_sensitivity: f64,
    /// Quiet window after the last wheel event before navigating.
    pub wheel_quiet_ms: f64,
    /// Land GeoJSON source.
    pub land_url: String,
    /// `EnvFilter` directive for the console log.
    pub log_filter: String,
}

impl Default for GlobeConfig {
    fn default() -> Self {
        Self {
            point_interval_ms: 800.0,
            max_points: 100,
            width: 1200.0,
            height: 800.0,
            min_batch: 1,
            max_batch: 2,
            dot_spacing: 16.0,
            rotation_speed_deg: 0.5,
            drag_sensitivity: 0.5,
            wheel_quiet_ms: 150.0,
            land_url: NATURAL_EARTH_LAND_URL.to_string(),
            log_filter: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AiInputConfig {
    pub placeholder: String,
    /// Textarea height clamp in pixels.
    pub min_height: f64,
    pub max_height: f64,
    /// How long the widget stays in the submitted state.
    pub loading_ms: f64,
    /// Idle gap of the auto-animate loop.
    pub thinking_ms: f64,
    /// Delay between typed characters.
    pub type_speed_ms: f64,
    pub delay_between_texts_ms: f64,
    /// Pause between a fully typed text and its automatic submission.
    pub submit_delay_ms: f64,
    pub auto_submit: bool,
    pub auto_animate: bool,
    /// Prompts typed out once the about section scrolls into view.
    pub auto_type_texts: Vec<String>,
}

impl Default for AiInputConfig {
    fn default() -> Self {
        Self {
            placeholder: "Ask me anything about the integration...".to_string(),
            min_height: 56.0,
            max_height: 200.0,
            loading_ms: 3000.0,
            thinking_ms: 1000.0,
            type_speed_ms: 30.0,
            delay_between_texts_ms: 2000.0,
            submit_delay_ms: 500.0,
            auto_submit: true,
            auto_animate: false,
            auto_type_texts: vec![
                "How to integrate AIInputWithLoading component in a Next.js project with shadcn?"
                    .to_string(),
                "What are the required dependencies for AIInputWithLoading component?".to_string(),
                "How to setup shadcn UI components with Tailwind CSS and TypeScript?".to_string(),
            ],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub globe: GlobeConfig,
    pub ai_input: AiInputConfig,
}

impl PageConfig {
    /// Parses an override document; blank input yields the defaults.
    pub fn from_json(raw: Option<&str>) -> Result<Self, serde_json::Error> {
        match raw.map(str::trim) {
            None | Some("") => Ok(Self::default()),
            Some(text) => serde_json::from_str(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn globe_config_defaults_are_stable() {
        let cfg = GlobeConfig::default();
        assert_eq!(cfg.point_interval_ms, 800.0);
        assert_eq!(cfg.max_points, 100);
        assert_eq!(cfg.width, 1200.0);
        assert_eq!(cfg.height, 800.0);
        assert_eq!(cfg.min_batch, 1);
        assert_eq!(cfg.max_batch, 2);
        assert_eq!(cfg.dot_spacing, 16.0);
        assert_eq!(cfg.rotation_speed_deg, 0.5);
        assert_eq!(cfg.drag_sensitivity, 0.5);
        assert_eq!(cfg.wheel_quiet_ms, 150.0);
        assert!(cfg.land_url.ends_with("/110m/physical/ne_110m_land.json"));
        assert_eq!(cfg.log_filter, "info");
    }

    #[test]
    fn ai_input_config_defaults_are_stable() {
        let cfg = AiInputConfig::default();
        assert_eq!(cfg.min_height, 56.0);
        assert_eq!(cfg.max_height, 200.0);
        assert_eq!(cfg.loading_ms, 3000.0);
        assert_eq!(cfg.thinking_ms, 1000.0);
        assert_eq!(cfg.type_speed_ms, 30.0);
        assert_eq!(cfg.delay_between_texts_ms, 2000.0);
        assert_eq!(cfg.submit_delay_ms, 500.0);
        assert!(cfg.auto_submit);
        assert!(!cfg.auto_animate);
        assert_eq!(cfg.auto_type_texts.len(), 3);
    }

    #[test]
    fn partial_json_overrides_only_named_fields() {
        let cfg = PageConfig::from_json(Some(
            r#"{ "globe": { "max_points": 3, "point_interval_ms": 50 }, "ai_input": { "auto_submit": false } }"#,
        ))
        .unwrap();
        assert_eq!(cfg.globe.max_points, 3);
        assert_eq!(cfg.globe.point_interval_ms, 50.0);
        assert_eq!(cfg.globe.min_batch, 1);
        assert!(!cfg.ai_input.auto_submit);
        assert_eq!(cfg.ai_input.type_speed_ms, 30.0);
    }

    #[test]
    fn blank_input_is_default() {
        assert_eq!(PageConfig::from_json(None).unwrap(), PageConfig::default());
        assert_eq!(PageConfig::from_json(Some("  ")).unwrap(), PageConfig::default());
        assert!(PageConfig::from_json(Some("{ nope")).is_err());
    }
}
