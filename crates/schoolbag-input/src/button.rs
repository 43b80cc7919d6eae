//! Short/long press discrimination.

use schoolbag_core::constants::LONG_PRESS_SAMPLES;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonConfig {
    /// Consecutive pressed samples that make a long press.
    pub long_press_samples: u32,

    /// Whether a pressed button reads high.
    pub active_high: bool,
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self {
            long_press_samples: LONG_PRESS_SAMPLES,
            active_high: true,
        }
    }
}

impl ButtonConfig {
    pub fn with_long_press_samples(mut self, samples: u32) -> Self {
        self.long_press_samples = samples.max(1);
        self
    }

    pub fn with_active_high(mut self, active_high: bool) -> Self {
        self.active_high = active_high;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonEvent {
    /// Released before the long-press threshold.
    ShortPress,

    /// Held for the long-press threshold; reported while still held.
    LongPress,
}

/// Counts consecutive pressed samples.
///
/// A long press fires once, on the sample that reaches the threshold. A
/// short press fires on release, only if no long press fired.
#[derive(Debug, Clone)]
pub struct ButtonClassifier {
    config: ButtonConfig,
    pressed_samples: u32,
    long_fired: bool,
}

impl ButtonClassifier {
    pub fn new(config: ButtonConfig) -> Self {
        Self {
            config,
            pressed_samples: 0,
            long_fired: false,
        }
    }

    /// Feed one pin sample.
    pub fn on_sample(&mut self, level: bool) -> Option<ButtonEvent> {
        if level == self.config.active_high {
            self.pressed_samples = self.pressed_samples.saturating_add(1);
            if !self.long_fired && self.pressed_samples >= self.config.long_press_samples {
                self.long_fired = true;
                return Some(ButtonEvent::LongPress);
            }
            return None;
        }

        let event = (self.pressed_samples > 0 && !self.long_fired).then_some(ButtonEvent::ShortPress);
        self.pressed_samples = 0;
        self.long_fired = false;
        event
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed_samples > 0
    }
}
