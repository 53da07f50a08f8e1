use crate::types::{Choice, Mode, Tally};
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Everything the poll knows, guarded as one unit.
///
/// A single lock (rather than one per field) keeps every mutation atomic
/// relative to the others; reset must never be observable half-applied.
#[derive(Debug)]
pub struct Poll {
    pub answers: Vec<String>,
    pub votes: Tally,
    pub mode: Mode,
    pub deadline: Option<DateTime<Utc>>,
}

impl Poll {
    fn new() -> Self {
        Self {
            answers: Vec::new(),
            votes: Tally::default(),
            mode: Mode::Collect,
            deadline: None,
        }
    }
}

/// Current mode plus remaining whole seconds, as reported by `/state`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollStatus {
    pub mode: Mode,
    pub seconds_left: Option<i64>,
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub poll: Arc<RwLock<Poll>>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            poll: Arc::new(RwLock::new(Poll::new())),
        }
    }

    /// Append a free-text answer. Whitespace-only input is silently dropped.
    pub async fn submit_answer(&self, text: &str) {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return;
        }
        self.poll.write().await.answers.push(trimmed.to_string());
    }

    /// Count one vote for the given choice.
    pub async fn cast_vote(&self, choice: Choice) {
        self.poll.write().await.votes.record(choice);
    }

    /// Snapshot of all answers and the current tally.
    pub async fn results(&self) -> (Vec<String>, Tally) {
        let poll = self.poll.read().await;
        (poll.answers.clone(), poll.votes)
    }

    pub async fn status(&self) -> PollStatus {
        self.status_at(Utc::now()).await
    }

    /// Status with an explicit clock, so tests can simulate the countdown
    /// running out without sleeping.
    pub async fn status_at(&self, now: DateTime<Utc>) -> PollStatus {
        let poll = self.poll.read().await;
        let seconds_left = poll.deadline.map(|deadline| {
            let remaining_ms = (deadline - now).num_milliseconds();
            // Round to the nearest second like the pages display it, floor at 0.
            ((remaining_ms as f64 / 1000.0).round() as i64).max(0)
        });
        PollStatus {
            mode: poll.mode,
            seconds_left,
        }
    }

    /// Switch to collecting with a deadline `secs` from now.
    pub async fn start_countdown(&self, secs: i64) {
        let mut poll = self.poll.write().await;
        poll.mode = Mode::Collect;
        poll.deadline = Some(Utc::now() + Duration::seconds(secs));
    }

    /// Flip everyone to the results view. Clears the deadline; a countdown is
    /// only meaningful while collecting. Safe to call repeatedly.
    pub async fn show_results(&self) {
        let mut poll = self.poll.write().await;
        poll.mode = Mode::Results;
        poll.deadline = None;
    }

    /// Back to an empty collecting poll with no countdown.
    pub async fn reset(&self) {
        let mut poll = self.poll.write().await;
        poll.answers.clear();
        poll.votes = Tally::default();
        poll.mode = Mode::Collect;
        poll.deadline = None;
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_submit_answer_appends_in_order() {
        let state = AppState::new();
        state.submit_answer("first").await;
        state.submit_answer("second").await;

        let (answers, _) = state.results().await;
        assert_eq!(answers, vec!["first", "second"]);
    }

    #[tokio::test]
    async fn test_submit_answer_trims() {
        let state = AppState::new();
        state.submit_answer("  padded  ").await;

        let (answers, _) = state.results().await;
        assert_eq!(answers, vec!["padded"]);
    }

    #[tokio::test]
    async fn test_submit_answer_ignores_blank_input() {
        let state = AppState::new();
        state.submit_answer("").await;
        state.submit_answer("   \n\t ").await;

        let (answers, _) = state.results().await;
        assert!(answers.is_empty());
    }

    #[tokio::test]
    async fn test_submit_answer_keeps_duplicates() {
        let state = AppState::new();
        state.submit_answer("same").await;
        state.submit_answer("same").await;

        let (answers, _) = state.results().await;
        assert_eq!(answers, vec!["same", "same"]);
    }

    #[tokio::test]
    async fn test_cast_vote_increments_only_that_counter() {
        let state = AppState::new();
        state.cast_vote(Choice::AFavor).await;
        state.cast_vote(Choice::AFavor).await;
        state.cast_vote(Choice::EnContra).await;

        let (_, tally) = state.results().await;
        assert_eq!(tally.a_favor, 2);
        assert_eq!(tally.en_contra, 1);
    }

    #[tokio::test]
    async fn test_initial_status() {
        let state = AppState::new();
        let status = state.status().await;
        assert_eq!(status.mode, Mode::Collect);
        assert_eq!(status.seconds_left, None);
    }

    #[tokio::test]
    async fn test_start_countdown_sets_collect_and_deadline() {
        let state = AppState::new();
        state.show_results().await;
        state.start_countdown(60).await;

        let status = state.status().await;
        assert_eq!(status.mode, Mode::Collect);
        let left = status.seconds_left.expect("deadline should be set");
        assert!((59..=60).contains(&left), "got {left}");
    }

    #[tokio::test]
    async fn test_countdown_never_goes_negative() {
        let state = AppState::new();
        state.start_countdown(60).await;

        let deadline = state.poll.read().await.deadline.unwrap();
        let status = state.status_at(deadline + Duration::seconds(61)).await;
        assert_eq!(status.seconds_left, Some(0));
    }

    #[tokio::test]
    async fn test_countdown_rounds_to_nearest_second() {
        let state = AppState::new();
        state.start_countdown(60).await;

        let deadline = state.poll.read().await.deadline.unwrap();
        // 10.4s left rounds down, 10.6s left rounds up.
        let status = state
            .status_at(deadline - Duration::milliseconds(10_400))
            .await;
        assert_eq!(status.seconds_left, Some(10));
        let status = state
            .status_at(deadline - Duration::milliseconds(10_600))
            .await;
        assert_eq!(status.seconds_left, Some(11));
    }

    #[tokio::test]
    async fn test_show_results_clears_deadline() {
        let state = AppState::new();
        state.start_countdown(60).await;
        state.show_results().await;

        let status = state.status().await;
        assert_eq!(status.mode, Mode::Results);
        assert_eq!(status.seconds_left, None);
    }

    #[tokio::test]
    async fn test_show_results_is_idempotent() {
        let state = AppState::new();
        state.submit_answer("kept").await;
        state.cast_vote(Choice::AFavor).await;

        state.show_results().await;
        let first = state.status().await;
        state.show_results().await;
        state.show_results().await;

        assert_eq!(state.status().await, first);
        let (answers, tally) = state.results().await;
        assert_eq!(answers, vec!["kept"]);
        assert_eq!(tally.a_favor, 1);
    }

    #[tokio::test]
    async fn test_reset_clears_everything() {
        let state = AppState::new();
        state.submit_answer("gone").await;
        state.cast_vote(Choice::AFavor).await;
        state.cast_vote(Choice::EnContra).await;
        state.show_results().await;

        state.reset().await;

        let (answers, tally) = state.results().await;
        assert!(answers.is_empty());
        assert_eq!(tally, Tally::default());
        let status = state.status().await;
        assert_eq!(status.mode, Mode::Collect);
        assert_eq!(status.seconds_left, None);
    }

    #[tokio::test]
    async fn test_concurrent_submissions_all_land() {
        let state = AppState::new();
        let mut handles = Vec::new();
        for i in 0..50 {
            let state = state.clone();
            handles.push(tokio::spawn(async move {
                state.submit_answer(&format!("answer {i}")).await;
                state.cast_vote(Choice::AFavor).await;
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let (answers, tally) = state.results().await;
        assert_eq!(answers.len(), 50);
        assert_eq!(tally.a_favor, 50);
    }
}
