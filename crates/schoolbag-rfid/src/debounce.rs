//! Debouncing of raw tag reads.

use schoolbag_core::TagId;
use schoolbag_core::constants::{DEFAULT_ACCEPTANCE_THRESHOLD, DEFAULT_MISS_TOLERANCE};
use tracing::trace;

/// Result of one reader poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    /// No tag answered.
    Miss,

    /// A tag answered but its UID could not be resolved.
    AnticollFailure,

    /// The tag was identified but the authenticated read failed.
    AuthFailure,

    /// Complete transaction.
    Success(TagId),
}

/// Debounce thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceConfig {
    /// Consecutive identical reads that accept a tag.
    pub acceptance_threshold: u32,

    /// Consecutive misses absorbed before the match count is dropped.
    pub miss_tolerance: u32,
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self {
            acceptance_threshold: DEFAULT_ACCEPTANCE_THRESHOLD,
            miss_tolerance: DEFAULT_MISS_TOLERANCE,
        }
    }
}

impl DebounceConfig {
    pub fn with_acceptance_threshold(mut self, threshold: u32) -> Self {
        self.acceptance_threshold = threshold.max(1);
        self
    }

    pub fn with_miss_tolerance(mut self, tolerance: u32) -> Self {
        self.miss_tolerance = tolerance;
        self
    }
}

/// Turns read outcomes into accepted tags.
///
/// A tag is accepted once `acceptance_threshold` consecutive successful
/// reads return its id. The match count then restarts, so a tag held in the
/// field keeps being accepted every `acceptance_threshold` reads.
///
/// Up to `miss_tolerance` consecutive misses are absorbed; one more clears
/// the candidate. Anticollision and authentication failures leave the
/// state untouched.
///
/// # Examples
///
/// ```
/// use schoolbag_rfid::{DebounceConfig, ReadOutcome, TagDebouncer};
///
/// let mut debouncer = TagDebouncer::new(DebounceConfig::default());
/// let tag = "04-a1".parse().unwrap();
///
/// assert_eq!(debouncer.on_read_attempt(ReadOutcome::Success(tag)), None);
/// assert!(debouncer.on_read_attempt(ReadOutcome::Success("04-a1".parse().unwrap())).is_some());
/// ```
#[derive(Debug, Clone)]
pub struct TagDebouncer {
    config: DebounceConfig,
    candidate: Option<TagId>,
    matches: u32,
    misses: u32,
}

impl TagDebouncer {
    pub fn new(config: DebounceConfig) -> Self {
        Self {
            config,
            candidate: None,
            matches: 0,
            misses: 0,
        }
    }

    /// Feed one poll result. Returns the tag if this read accepted it.
    pub fn on_read_attempt(&mut self, outcome: ReadOutcome) -> Option<TagId> {
        match outcome {
            ReadOutcome::Miss => {
                if self.misses < self.config.miss_tolerance {
                    self.misses += 1;
                } else {
                    self.clear();
                }
                None
            }
            ReadOutcome::AnticollFailure => {
                trace!("Anticollision failed");
                None
            }
            ReadOutcome::AuthFailure => {
                trace!("Authentication failed");
                None
            }
            ReadOutcome::Success(id) => {
                self.misses = 0;
                if self.candidate.as_ref() == Some(&id) {
                    self.matches += 1;
                } else {
                    trace!("New candidate tag {}", id);
                    self.matches = 1;
                    self.candidate = Some(id);
                }

                if self.matches >= self.config.acceptance_threshold {
                    self.matches = 0;
                    return self.candidate.clone();
                }
                None
            }
        }
    }

    /// Tag currently being counted.
    pub fn candidate(&self) -> Option<&TagId> {
        self.candidate.as_ref()
    }

    pub fn match_count(&self) -> u32 {
        self.matches
    }

    pub fn miss_count(&self) -> u32 {
        self.misses
    }

    /// Forget the candidate and both counters.
    pub fn clear(&mut self) {
        self.candidate = None;
        self.matches = 0;
        self.misses = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    fn id(s: &str) -> TagId {
        s.parse().unwrap()
    }

    fn hit(s: &str) -> ReadOutcome {
        ReadOutcome::Success(id(s))
    }

    fn feed(debouncer: &mut TagDebouncer, reads: Vec<ReadOutcome>) -> Vec<TagId> {
        reads
            .into_iter()
            .filter_map(|read| debouncer.on_read_attempt(read))
            .collect()
    }

    #[test]
    fn test_accepts_after_threshold() {
        let mut debouncer = TagDebouncer::new(DebounceConfig::default());

        assert_eq!(debouncer.on_read_attempt(hit("0a")), None);
        assert_eq!(debouncer.match_count(), 1);
        assert_eq!(debouncer.on_read_attempt(hit("0a")), Some(id("0a")));
        assert_eq!(debouncer.match_count(), 0);
    }

    #[test]
    fn test_single_miss_tolerated() {
        let mut debouncer = TagDebouncer::new(DebounceConfig::default());

        let accepted = feed(
            &mut debouncer,
            vec![ReadOutcome::Miss, hit("0a"), hit("0a")],
        );
        assert_eq!(accepted, vec![id("0a")]);

        let mut debouncer = TagDebouncer::new(DebounceConfig::default());
        let accepted = feed(
            &mut debouncer,
            vec![hit("0a"), ReadOutcome::Miss, hit("0a")],
        );
        assert_eq!(accepted, vec![id("0a")]);
    }

    #[test]
    fn test_sustained_absence_resets() {
        let mut debouncer = TagDebouncer::new(DebounceConfig::default());

        let accepted = feed(
            &mut debouncer,
            vec![hit("0a"), ReadOutcome::Miss, ReadOutcome::Miss, hit("0a")],
        );
        assert!(accepted.is_empty());
        assert_eq!(debouncer.match_count(), 1);
    }

    #[test]
    fn test_different_tag_restarts_count() {
        let mut debouncer = TagDebouncer::new(DebounceConfig::default());

        let accepted = feed(&mut debouncer, vec![hit("0a"), hit("0b")]);
        assert!(accepted.is_empty());
        assert_eq!(debouncer.candidate(), Some(&id("0b")));
        assert_eq!(debouncer.match_count(), 1);
    }

    #[rstest]
    #[case(ReadOutcome::AnticollFailure)]
    #[case(ReadOutcome::AuthFailure)]
    fn test_failures_leave_state(#[case] failure: ReadOutcome) {
        let mut debouncer = TagDebouncer::new(DebounceConfig::default());
        debouncer.on_read_attempt(hit("0a"));
        debouncer.on_read_attempt(ReadOutcome::Miss);

        assert_eq!(debouncer.on_read_attempt(failure.clone()), None);
        assert_eq!(debouncer.on_read_attempt(failure), None);
        assert_eq!(debouncer.match_count(), 1);
        assert_eq!(debouncer.miss_count(), 1);
        assert_eq!(debouncer.on_read_attempt(hit("0a")), Some(id("0a")));
    }

    #[rstest]
    #[case(2, 4, 2)]
    #[case(2, 5, 2)]
    #[case(3, 6, 2)]
    #[case(3, 8, 2)]
    #[case(3, 9, 3)]
    fn test_held_tag_rearms(#[case] threshold: u32, #[case] reads: usize, #[case] expected: usize) {
        let config = DebounceConfig::default().with_acceptance_threshold(threshold);
        let mut debouncer = TagDebouncer::new(config);

        let accepted = feed(&mut debouncer, vec![hit("0a"); reads]);
        assert_eq!(accepted.len(), expected);
    }

    #[test]
    fn test_zero_threshold_clamped() {
        let config = DebounceConfig::default().with_acceptance_threshold(0);
        assert_eq!(config.acceptance_threshold, 1);
    }

    #[test]
    fn test_clear() {
        let mut debouncer = TagDebouncer::new(DebounceConfig::default());
        debouncer.on_read_attempt(hit("0a"));
        debouncer.clear();

        assert_eq!(debouncer.candidate(), None);
        assert_eq!(debouncer.on_read_attempt(hit("0a")), None);
    }

    proptest! {
        #[test]
        fn prop_held_tag_accepted_once_per_threshold(
            threshold in 1u32..6,
            reads in 0usize..40,
        ) {
            let config = DebounceConfig::default().with_acceptance_threshold(threshold);
            let mut debouncer = TagDebouncer::new(config);

            let accepted = feed(&mut debouncer, vec![hit("0a"); reads]);
            prop_assert_eq!(accepted.len(), reads / threshold as usize);
        }

        #[test]
        fn prop_interrupted_candidate_never_accepted(threshold in 2u32..6) {
            let config = DebounceConfig::default().with_acceptance_threshold(threshold);
            let mut debouncer = TagDebouncer::new(config);

            let mut reads = vec![hit("0a"); threshold as usize - 1];
            reads.push(hit("0b"));
            let accepted = feed(&mut debouncer, reads);
            prop_assert!(accepted.is_empty());
        }

        #[test]
        fn prop_only_successful_ids_are_accepted(
            reads in prop::collection::vec(0u8..4, 0..60),
        ) {
            let mut debouncer = TagDebouncer::new(DebounceConfig::default());
            let outcomes: Vec<ReadOutcome> = reads
                .iter()
                .map(|kind| match kind {
                    0 => ReadOutcome::Miss,
                    1 => ReadOutcome::AnticollFailure,
                    2 => hit("0a"),
                    _ => hit("0b"),
                })
                .collect();

            let successes = outcomes
                .iter()
                .filter(|o| matches!(o, ReadOutcome::Success(_)))
                .count();
            let accepted = feed(&mut debouncer, outcomes);

            prop_assert!(accepted.len() * 2 <= successes);
            prop_assert!(accepted.iter().all(|t| *t == id("0a") || *t == id("0b")));
        }
    }
}
