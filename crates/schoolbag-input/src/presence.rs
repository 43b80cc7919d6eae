//! Worn/not-worn detection from the two strap sensors.

use schoolbag_core::constants::{PRESENCE_CHANNELS, PRESENCE_THRESHOLD};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresenceConfig {
    /// Level both straps must exceed for the bag to count as worn.
    pub threshold: u16,

    /// Analog channels of the left and right strap.
    pub channels: (u8, u8),
}

impl Default for PresenceConfig {
    fn default() -> Self {
        Self {
            threshold: PRESENCE_THRESHOLD,
            channels: PRESENCE_CHANNELS,
        }
    }
}

impl PresenceConfig {
    pub fn with_threshold(mut self, threshold: u16) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_channels(mut self, left: u8, right: u8) -> Self {
        self.channels = (left, right);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresenceEvent {
    PutOn,
    PutDown,
}

/// Latches the worn state and reports only its transitions.
#[derive(Debug, Clone)]
pub struct PresenceDetector {
    config: PresenceConfig,
    worn: bool,
}

impl PresenceDetector {
    /// Starts out not worn.
    pub fn new(config: PresenceConfig) -> Self {
        Self {
            config,
            worn: false,
        }
    }

    pub fn is_worn(&self) -> bool {
        self.worn
    }

    /// Feed one reading of both straps.
    pub fn on_sample(&mut self, left: u16, right: u16) -> Option<PresenceEvent> {
        let worn = left > self.config.threshold && right > self.config.threshold;
        if worn == self.worn {
            return None;
        }
        self.worn = worn;
        Some(if worn {
            PresenceEvent::PutOn
        } else {
            PresenceEvent::PutDown
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, 0, None)]
    #[case(101, 101, Some(PresenceEvent::PutOn))]
    #[case(100, 500, None)]
    #[case(500, 100, None)]
    #[case(1023, 1023, Some(PresenceEvent::PutOn))]
    fn test_first_sample(#[case] left: u16, #[case] right: u16, #[case] expected: Option<PresenceEvent>) {
        let mut detector = PresenceDetector::new(PresenceConfig::default());
        assert_eq!(detector.on_sample(left, right), expected);
    }

    #[test]
    fn test_only_transitions_reported() {
        let mut detector = PresenceDetector::new(PresenceConfig::default());
        let readings = [(0, 0), (300, 300), (310, 290), (300, 40), (20, 20), (400, 400)];

        let events: Vec<_> = readings
            .iter()
            .filter_map(|(l, r)| detector.on_sample(*l, *r))
            .collect();
        assert_eq!(
            events,
            vec![
                PresenceEvent::PutOn,
                PresenceEvent::PutDown,
                PresenceEvent::PutOn
            ]
        );
        assert!(detector.is_worn());
    }

    #[test]
    fn test_custom_threshold() {
        let mut detector = PresenceDetector::new(PresenceConfig::default().with_threshold(600));
        assert_eq!(detector.on_sample(500, 500), None);
        assert_eq!(detector.on_sample(601, 700), Some(PresenceEvent::PutOn));
    }
}
