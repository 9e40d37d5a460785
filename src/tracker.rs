use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::models::Platform;

/// Status of the most recent generation attempt for one article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GenerationStatus {
    #[default]
    Idle,
    InFlight,
    Succeeded,
    Failed,
}

/// Per-article generation state, keyed by article URL in the tracker.
#[derive(Debug, Clone, Default)]
pub struct GenerationState {
    pub platform: Platform,
    pub status: GenerationStatus,
    pub result_text: Option<String>,
    pub error_message: Option<String>,
    pub generated_at: Option<DateTime<Utc>>,
    /// Sequence number of the most recently issued request for this key.
    /// Outcomes carrying any other number are stale and get discarded.
    latest_seq: u64,
}

/// Keyed store of per-article generation state. The four transition methods
/// are the only mutation surface; nothing else writes to a `GenerationState`.
///
/// A second `start_generation` for the same key before the first resolves
/// supersedes it: the sequence number advances and the earlier call's
/// eventual outcome is ignored on arrival (last-request-wins).
#[derive(Debug, Default)]
pub struct GenerationTracker {
    entries: HashMap<String, GenerationState>,
    /// Tracker-wide request counter. Never reset, even when entries are
    /// removed or the batch is cleared, so an outcome issued before a
    /// reload can never collide with a request issued after it.
    next_seq: u64,
}

impl GenerationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an Idle entry when an article enters the batch.
    /// Re-inserting an existing key resets it.
    pub fn insert(&mut self, key: &str) {
        self.entries.insert(key.to_string(), GenerationState::default());
    }

    /// Drops the entry when an article leaves the batch.
    pub fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn state(&self, key: &str) -> Option<&GenerationState> {
        self.entries.get(key)
    }

    /// Updates the platform selection without triggering generation or
    /// changing status.
    pub fn select_platform(&mut self, key: &str, platform: Platform) {
        if let Some(state) = self.entries.get_mut(key) {
            state.platform = platform;
        }
    }

    /// Moves the key to InFlight, clearing any previous result or error, and
    /// returns the sequence number identifying this request.
    pub fn start_generation(&mut self, key: &str, platform: Platform) -> u64 {
        self.next_seq += 1;
        let state = self.entries.entry(key.to_string()).or_default();
        state.platform = platform;
        state.status = GenerationStatus::InFlight;
        state.result_text = None;
        state.error_message = None;
        state.generated_at = None;
        state.latest_seq = self.next_seq;
        self.next_seq
    }

    /// Records a successful outcome. Returns false when the outcome was
    /// stale (superseded or the key left the batch) and was discarded.
    pub fn on_success(&mut self, key: &str, seq: u64, text: String) -> bool {
        let Some(state) = self.current_in_flight(key, seq) else {
            return false;
        };
        state.status = GenerationStatus::Succeeded;
        state.result_text = Some(text);
        state.generated_at = Some(Utc::now());
        true
    }

    /// Records a failed outcome under the same staleness rule as
    /// `on_success`. The result text stays cleared.
    pub fn on_failure(&mut self, key: &str, seq: u64, message: String) -> bool {
        let Some(state) = self.current_in_flight(key, seq) else {
            return false;
        };
        state.status = GenerationStatus::Failed;
        state.error_message = Some(message);
        true
    }

    fn current_in_flight(&mut self, key: &str, seq: u64) -> Option<&mut GenerationState> {
        self.entries
            .get_mut(key)
            .filter(|state| state.status == GenerationStatus::InFlight && state.latest_seq == seq)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_entries_start_idle() {
        let mut tracker = GenerationTracker::new();
        tracker.insert("https://ex.com/a");
        let state = tracker.state("https://ex.com/a").unwrap();
        assert_eq!(state.status, GenerationStatus::Idle);
        assert_eq!(state.result_text, None);
        assert_eq!(state.error_message, None);
    }

    #[test]
    fn start_clears_previous_result_and_error() {
        let mut tracker = GenerationTracker::new();
        tracker.insert("k");

        let seq = tracker.start_generation("k", Platform::Twitter);
        assert!(tracker.on_success("k", seq, "post".to_string()));
        assert!(tracker.state("k").unwrap().generated_at.is_some());

        tracker.start_generation("k", Platform::LinkedIn);
        let state = tracker.state("k").unwrap();
        assert_eq!(state.status, GenerationStatus::InFlight);
        assert_eq!(state.platform, Platform::LinkedIn);
        assert_eq!(state.result_text, None);
        assert_eq!(state.generated_at, None);
    }

    #[test]
    fn failure_sets_message_and_keeps_result_cleared() {
        let mut tracker = GenerationTracker::new();
        tracker.insert("k");

        let seq = tracker.start_generation("k", Platform::Facebook);
        assert!(tracker.on_failure("k", seq, "boom".to_string()));

        let state = tracker.state("k").unwrap();
        assert_eq!(state.status, GenerationStatus::Failed);
        assert_eq!(state.error_message.as_deref(), Some("boom"));
        assert_eq!(state.result_text, None);
    }

    #[test]
    fn superseded_request_is_discarded_regardless_of_arrival_order() {
        let mut tracker = GenerationTracker::new();
        tracker.insert("k");

        let first = tracker.start_generation("k", Platform::Twitter);
        let second = tracker.start_generation("k", Platform::LinkedIn);

        // First outcome arrives late: stale, ignored.
        assert!(!tracker.on_success("k", first, "twitter post".to_string()));
        assert_eq!(tracker.state("k").unwrap().status, GenerationStatus::InFlight);

        assert!(tracker.on_success("k", second, "linkedin post".to_string()));
        let state = tracker.state("k").unwrap();
        assert_eq!(state.platform, Platform::LinkedIn);
        assert_eq!(state.result_text.as_deref(), Some("linkedin post"));

        // The stale outcome also cannot overwrite a settled state.
        assert!(!tracker.on_failure("k", first, "late failure".to_string()));
        assert_eq!(tracker.state("k").unwrap().status, GenerationStatus::Succeeded);
    }

    #[test]
    fn select_platform_preserves_status_and_result() {
        let mut tracker = GenerationTracker::new();
        tracker.insert("k");

        let seq = tracker.start_generation("k", Platform::Twitter);
        assert!(tracker.on_success("k", seq, "post".to_string()));

        tracker.select_platform("k", Platform::Threads);
        let state = tracker.state("k").unwrap();
        assert_eq!(state.platform, Platform::Threads);
        assert_eq!(state.status, GenerationStatus::Succeeded);
        assert_eq!(state.result_text.as_deref(), Some("post"));
    }

    #[test]
    fn batch_reload_does_not_resurrect_stale_outcome() {
        let mut tracker = GenerationTracker::new();
        tracker.insert("k");
        let before_reload = tracker.start_generation("k", Platform::Twitter);

        // The batch is cleared and reloaded with the same URL while the
        // first request is still in flight.
        tracker.clear();
        tracker.insert("k");
        let after_reload = tracker.start_generation("k", Platform::LinkedIn);
        assert_ne!(before_reload, after_reload);

        // The pre-reload outcome lands late: stale, discarded.
        assert!(!tracker.on_success("k", before_reload, "stale post".to_string()));
        assert_eq!(tracker.state("k").unwrap().status, GenerationStatus::InFlight);

        // The genuinely latest request still settles normally.
        assert!(tracker.on_success("k", after_reload, "fresh post".to_string()));
        let state = tracker.state("k").unwrap();
        assert_eq!(state.status, GenerationStatus::Succeeded);
        assert_eq!(state.result_text.as_deref(), Some("fresh post"));
    }

    #[test]
    fn outcome_for_removed_key_is_ignored() {
        let mut tracker = GenerationTracker::new();
        tracker.insert("k");
        let seq = tracker.start_generation("k", Platform::Twitter);
        tracker.remove("k");

        assert!(!tracker.on_success("k", seq, "post".to_string()));
        assert!(tracker.state("k").is_none());
    }

    #[test]
    fn keys_are_independent() {
        let mut tracker = GenerationTracker::new();
        tracker.insert("a");
        tracker.insert("b");

        let seq_a = tracker.start_generation("a", Platform::Twitter);
        assert!(tracker.on_failure("a", seq_a, "boom".to_string()));

        let state_b = tracker.state("b").unwrap();
        assert_eq!(state_b.status, GenerationStatus::Idle);
        assert_eq!(state_b.error_message, None);
    }
}
