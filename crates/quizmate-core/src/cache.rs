//! Short-lived cache of freshly graded attempts.
//!
//! Detailed results only exist in the submission response; the cache keeps
//! them alive for exactly as long as the results view is active. The entry
//! is destroyed when the view exits, so a later visit to the same quiz
//! falls back to the degraded summary fetch (a deliberate product
//! trade-off, not a bug). [`ResultsCache::view`] ties the teardown to a
//! guard's drop so every exit path releases the entry.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::report::GradedAttempt;

/// Per-attempt storage of freshly computed results, keyed by quiz id.
#[derive(Debug, Default)]
pub struct ResultsCache {
    entries: Mutex<HashMap<i64, GradedAttempt>>,
}

impl ResultsCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an attempt, overwriting any existing entry for the quiz.
    pub fn put(&self, quiz_id: i64, attempt: GradedAttempt) {
        self.entries.lock().unwrap().insert(quiz_id, attempt);
    }

    /// The cached attempt for a quiz, if present.
    pub fn get(&self, quiz_id: i64) -> Option<GradedAttempt> {
        self.entries.lock().unwrap().get(&quiz_id).cloned()
    }

    /// Remove the entry for a quiz. Idempotent.
    pub fn clear(&self, quiz_id: i64) {
        self.entries.lock().unwrap().remove(&quiz_id);
    }

    /// A scoped handle to the quiz's entry that clears it on drop.
    pub fn view(&self, quiz_id: i64) -> ResultsView<'_> {
        ResultsView {
            cache: self,
            quiz_id,
        }
    }
}

/// Scoped access to one cache entry; dropping the view destroys the entry.
#[derive(Debug)]
pub struct ResultsView<'a> {
    cache: &'a ResultsCache,
    quiz_id: i64,
}

impl ResultsView<'_> {
    pub fn get(&self) -> Option<GradedAttempt> {
        self.cache.get(self.quiz_id)
    }
}

impl Drop for ResultsView<'_> {
    fn drop(&mut self) {
        self.cache.clear(self.quiz_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attempt(quiz_id: i64, score: f64) -> GradedAttempt {
        GradedAttempt {
            quiz_id,
            quiz_title: format!("Quiz {quiz_id}"),
            score,
            correct_answers: 0,
            total_questions: 0,
            time_taken_secs: 0,
            records: Vec::new(),
        }
    }

    #[test]
    fn entries_are_isolated_per_quiz() {
        let cache = ResultsCache::new();
        cache.put(1, attempt(1, 80.0));
        cache.put(2, attempt(2, 40.0));

        assert_eq!(cache.get(1).unwrap().score, 80.0);
        cache.clear(1);
        assert!(cache.get(1).is_none());
        assert_eq!(cache.get(2).unwrap().score, 40.0);
    }

    #[test]
    fn put_overwrites() {
        let cache = ResultsCache::new();
        cache.put(1, attempt(1, 50.0));
        cache.put(1, attempt(1, 90.0));
        assert_eq!(cache.get(1).unwrap().score, 90.0);
    }

    #[test]
    fn clear_is_idempotent() {
        let cache = ResultsCache::new();
        cache.clear(5);
        cache.put(5, attempt(5, 10.0));
        cache.clear(5);
        cache.clear(5);
        assert!(cache.get(5).is_none());
    }

    #[test]
    fn view_clears_on_drop() {
        let cache = ResultsCache::new();
        cache.put(3, attempt(3, 75.0));
        {
            let view = cache.view(3);
            assert_eq!(view.get().unwrap().score, 75.0);
        }
        assert!(cache.get(3).is_none());
    }

    #[test]
    fn view_clears_on_early_exit() {
        let cache = ResultsCache::new();
        cache.put(4, attempt(4, 75.0));

        fn render(view: &ResultsView<'_>) -> Result<(), &'static str> {
            let _ = view.get();
            Err("render failed")
        }

        {
            let view = cache.view(4);
            let _ = render(&view);
        }
        assert!(cache.get(4).is_none());
    }
}
