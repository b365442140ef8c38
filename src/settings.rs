//! Presentation settings and frame-time monitoring
//!
//! None of this affects gameplay. The host reads it to decide how much
//! decoration to draw around the simulation.

use serde::{Deserialize, Serialize};

/// Parallax bands drawn at full quality
pub const BASE_PARALLAX_BANDS: u32 = 36;
/// Parallax bands drawn in low-FX mode
pub const LOW_FX_PARALLAX_BANDS: u32 = 18;

/// Average frame time (ms) at or above which low-FX mode kicks in
pub const STUTTER_FRAME_MS: f32 = 20.0;
/// Weight of each new sample in the moving average
pub const STUTTER_SAMPLE_WEIGHT: f32 = 0.08;

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::High => "High",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    pub fn parallax_bands(&self) -> u32 {
        match self {
            QualityPreset::Low => LOW_FX_PARALLAX_BANDS,
            QualityPreset::High => BASE_PARALLAX_BANDS,
        }
    }
}

/// Whether an average frame time calls for low-FX mode
pub fn should_enable_low_fx(avg_frame_ms: f32) -> bool {
    avg_frame_ms >= STUTTER_FRAME_MS
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,
    /// Drop to `Low` automatically when frames stutter
    pub auto_low_fx: bool,
    /// Minimize shake and flashes
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::High,
            auto_low_fx: true,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Parse settings from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Preset to render with, given what the frame monitor has seen
    pub fn effective_quality(&self, monitor: &FrameMonitor) -> QualityPreset {
        if self.auto_low_fx && monitor.low_fx() {
            QualityPreset::Low
        } else {
            self.quality
        }
    }
}

/// Exponential moving average of frame times
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameMonitor {
    avg_frame_ms: Option<f32>,
}

impl FrameMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one frame's duration
    pub fn record(&mut self, frame_ms: f32) {
        let frame_ms = crate::sanitize_delta_ms(frame_ms);
        self.avg_frame_ms = Some(match self.avg_frame_ms {
            None => frame_ms,
            Some(avg) => avg + (frame_ms - avg) * STUTTER_SAMPLE_WEIGHT,
        });
    }

    pub fn average_ms(&self) -> f32 {
        self.avg_frame_ms.unwrap_or(0.0)
    }

    pub fn low_fx(&self) -> bool {
        should_enable_low_fx(self.average_ms())
    }
}
