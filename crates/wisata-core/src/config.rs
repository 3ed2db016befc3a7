//! Site configuration
//!
//! Every selector, delay and piece of user-facing copy the components use.
//! Defaults match the shipped site; a page can override any subset by
//! embedding JSON (see `wisata-web`), since every struct is `#[serde(default)]`.

use serde::{Deserialize, Serialize};

use crate::error::SiteError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub selectors: Selectors,
    pub timing: Timing,
    pub messages: Messages,
}

impl SiteConfig {
    /// Parse a (possibly partial) JSON override on top of the defaults.
    pub fn from_json(json: &str) -> Result<Self, SiteError> {
        let config: SiteConfig =
            serde_json::from_str(json).map_err(|e| SiteError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make a component spin or divide by nothing.
    pub fn validate(&self) -> Result<(), SiteError> {
        if self.timing.slider_interval_ms == 0 {
            return Err(SiteError::Config(
                "timing.slider_interval_ms must be positive".into(),
            ));
        }
        if self.timing.stagger_step_ms == 0 {
            return Err(SiteError::Config(
                "timing.stagger_step_ms must be positive".into(),
            ));
        }
        if self.selectors.contact_form_id.is_empty() {
            return Err(SiteError::Config(
                "selectors.contact_form_id must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// CSS selectors (and the one element id) each component looks up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Selectors {
    pub menu_button: String,
    pub main_nav: String,
    pub main_header: String,
    pub in_page_anchor: String,
    pub animatable: String,
    pub section: String,
    pub back_to_top: String,
    pub destination_card: String,
    /// Element id, not a selector.
    pub contact_form_id: String,
    pub submit_button: String,
    pub slider: String,
    pub slider_image: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            menu_button: ".mobile-menu-btn".into(),
            main_nav: ".main-nav".into(),
            main_header: ".main-header".into(),
            in_page_anchor: "a[href^=\"#\"]".into(),
            animatable: ".fade-in, .slide-in".into(),
            section: "section".into(),
            back_to_top: ".back-to-top".into(),
            destination_card: ".destination-card".into(),
            contact_form_id: "contactForm".into(),
            submit_button: "button[type=\"submit\"]".into(),
            slider: ".image-slider".into(),
            slider_image: ".image".into(),
        }
    }
}

/// Distances in CSS pixels, delays in milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timing {
    /// How far above the viewport bottom an element must rise before it is revealed.
    pub reveal_offset_px: f64,
    pub scroll_top_threshold_px: f64,
    pub stagger_step_ms: u32,
    /// Simulated network latency for the contact form.
    pub submit_latency_ms: u32,
    pub alert_lifetime_ms: u32,
    pub alert_fade_ms: u32,
    pub slider_interval_ms: u32,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            reveal_offset_px: 100.0,
            scroll_top_threshold_px: 300.0,
            stagger_step_ms: 100,
            submit_latency_ms: 1500,
            alert_lifetime_ms: 5000,
            alert_fade_ms: 300,
            slider_interval_ms: 5000,
        }
    }
}

/// User-facing copy and icon markup (Font Awesome class names).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Messages {
    pub incomplete_fields: String,
    pub invalid_email: String,
    pub submit_success: String,
    pub submitting_label: String,
    pub menu_open_glyph: String,
    pub menu_closed_glyph: String,
    pub alert_close_glyph: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            incomplete_fields: "Mohon lengkapi semua kolom".into(),
            invalid_email: "Format email tidak valid".into(),
            submit_success: "Pesan Anda telah terkirim! Kami akan menghubungi Anda segera."
                .into(),
            submitting_label: "<i class=\"fas fa-spinner fa-spin\"></i> Mengirim...".into(),
            menu_open_glyph: "<i class=\"fas fa-times\"></i>".into(),
            menu_closed_glyph: "<i class=\"fas fa-bars\"></i>".into(),
            alert_close_glyph: "<i class=\"fas fa-times\"></i>".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(SiteConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_other_defaults() {
        let config = SiteConfig::from_json(
            r#"{
                "timing": { "slider_interval_ms": 8000 },
                "messages": { "invalid_email": "Invalid email format" }
            }"#,
        )
        .unwrap();

        assert_eq!(config.timing.slider_interval_ms, 8000);
        assert_eq!(config.timing.alert_lifetime_ms, 5000);
        assert_eq!(config.messages.invalid_email, "Invalid email format");
        assert_eq!(config.selectors, Selectors::default());
    }

    #[test]
    fn test_zero_interval_rejected() {
        let err = SiteConfig::from_json(r#"{ "timing": { "slider_interval_ms": 0 } }"#)
            .unwrap_err();
        assert!(matches!(err, SiteError::Config(_)));
    }

    #[test]
    fn test_malformed_json_rejected() {
        assert!(SiteConfig::from_json("{ timing: ").is_err());
    }
}
