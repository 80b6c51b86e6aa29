//! Search debounce state machine
//!
//! Free-text location search must not hit the network on every keystroke.
//! The debouncer arms a 500ms quiet window on each input change; a search
//! fires only when the window elapses without newer input. Every input
//! change also bumps a generation counter, so a result from an older
//! in-flight search can be recognized as stale and discarded even if it
//! arrives after a newer query started (last-query-wins).
//!
//! The struct is driven by the main loop's tick with explicit `Instant`s,
//! which keeps it synchronous and directly testable.

use std::time::{Duration, Instant};

/// Quiet window before a search fires
pub const DEBOUNCE_WINDOW: Duration = Duration::from_millis(500);

/// Queries this short (after trimming) clear suggestions instead of searching
const MIN_QUERY_LEN: usize = 3;

#[derive(Debug, Clone)]
struct Pending {
    query: String,
    deadline: Instant,
}

/// Debounces search input and tags fired searches with a generation number.
#[derive(Debug)]
pub struct SearchDebouncer {
    pending: Option<Pending>,
    generation: u64,
}

impl SearchDebouncer {
    pub fn new() -> Self {
        Self {
            pending: None,
            generation: 0,
        }
    }

    /// Records an input change.
    ///
    /// Cancels any pending search unconditionally and invalidates in-flight
    /// results by bumping the generation. Queries shorter than three
    /// characters after trimming never schedule a search; the caller should
    /// clear its suggestion list when this returns false.
    pub fn input(&mut self, query: &str, now: Instant) -> bool {
        self.generation += 1;
        let trimmed = query.trim();
        if trimmed.len() >= MIN_QUERY_LEN {
            self.pending = Some(Pending {
                query: trimmed.to_string(),
                deadline: now + DEBOUNCE_WINDOW,
            });
            true
        } else {
            self.pending = None;
            false
        }
    }

    /// Fires the pending search if its quiet window has elapsed.
    ///
    /// Returns the generation tag and query text to search for. The caller
    /// must pass the tag back through `is_current` before committing the
    /// result.
    pub fn poll(&mut self, now: Instant) -> Option<(u64, String)> {
        match &self.pending {
            Some(p) if now >= p.deadline => {
                let query = self.pending.take().map(|p| p.query)?;
                Some((self.generation, query))
            }
            _ => None,
        }
    }

    /// Whether a result tagged with `generation` is still the latest query.
    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.generation
    }

    /// Whether a search is armed but has not fired yet.
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl Default for SearchDebouncer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_fire_before_window_elapses() {
        let mut debouncer = SearchDebouncer::new();
        let start = Instant::now();

        assert!(debouncer.input("nairobi", start));
        assert!(debouncer.poll(start).is_none());
        assert!(debouncer
            .poll(start + Duration::from_millis(499))
            .is_none());
    }

    #[test]
    fn test_fires_after_window() {
        let mut debouncer = SearchDebouncer::new();
        let start = Instant::now();

        debouncer.input("nairobi", start);
        let fired = debouncer.poll(start + DEBOUNCE_WINDOW);
        assert!(fired.is_some());
        let (generation, query) = fired.unwrap();
        assert_eq!(query, "nairobi");
        assert!(debouncer.is_current(generation));
    }

    #[test]
    fn test_rapid_input_yields_one_search_for_final_text() {
        let mut debouncer = SearchDebouncer::new();
        let start = Instant::now();

        debouncer.input("nai", start);
        debouncer.input("nair", start + Duration::from_millis(100));
        debouncer.input("nairo", start + Duration::from_millis(200));
        debouncer.input("nairobi", start + Duration::from_millis(300));

        // Nothing fires while input keeps changing
        assert!(debouncer.poll(start + Duration::from_millis(400)).is_none());

        // Only the final query fires, 500ms after the last keystroke
        let fired = debouncer.poll(start + Duration::from_millis(800));
        assert_eq!(fired.map(|(_, q)| q), Some("nairobi".to_string()));

        // And nothing fires again
        assert!(debouncer.poll(start + Duration::from_secs(10)).is_none());
    }

    #[test]
    fn test_new_input_invalidates_in_flight_generation() {
        let mut debouncer = SearchDebouncer::new();
        let start = Instant::now();

        debouncer.input("kisumu", start);
        let (old_generation, _) = debouncer.poll(start + DEBOUNCE_WINDOW).unwrap();
        assert!(debouncer.is_current(old_generation));

        // A newer query starts while the old search is still in flight
        debouncer.input("kisumu kenya", start + Duration::from_secs(1));
        assert!(!debouncer.is_current(old_generation));
    }

    #[test]
    fn test_short_query_cancels_pending() {
        let mut debouncer = SearchDebouncer::new();
        let start = Instant::now();

        debouncer.input("nairobi", start);
        assert!(debouncer.has_pending());

        assert!(!debouncer.input("na", start + Duration::from_millis(100)));
        assert!(!debouncer.has_pending());
        assert!(debouncer.poll(start + Duration::from_secs(1)).is_none());
    }

    #[test]
    fn test_whitespace_query_never_schedules() {
        let mut debouncer = SearchDebouncer::new();
        let start = Instant::now();

        assert!(!debouncer.input("   ", start));
        assert!(!debouncer.has_pending());
    }

    #[test]
    fn test_query_is_trimmed_before_firing() {
        let mut debouncer = SearchDebouncer::new();
        let start = Instant::now();

        debouncer.input("  mombasa  ", start);
        let fired = debouncer.poll(start + DEBOUNCE_WINDOW);
        assert_eq!(fired.map(|(_, q)| q), Some("mombasa".to_string()));
    }
}
