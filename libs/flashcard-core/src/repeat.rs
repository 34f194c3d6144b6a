//! Re-insertion policy for cards marked unknown.
//!
//! A missed card is queued again `max(min_gap, floor(len * spacing_fraction)) + jitter`
//! slots after the cursor, so the spacing grows with the queue but never drops
//! below `min_gap`.

/// Tunable spacing constants for repeating unknown cards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RepeatPolicy {
    pub min_gap: usize,
    pub spacing_fraction: f64,
    /// Jitter is drawn uniformly from `0..=max_jitter`.
    pub max_jitter: usize,
}

impl Default for RepeatPolicy {
    fn default() -> Self {
        Self {
            min_gap: 10,
            spacing_fraction: 0.3,
            max_jitter: 4,
        }
    }
}

impl RepeatPolicy {
    /// Distance from the cursor for a queue of `queue_len` slots.
    pub fn gap(&self, queue_len: usize, jitter: usize) -> usize {
        let scaled = (queue_len as f64 * self.spacing_fraction).floor() as usize;
        self.min_gap.max(scaled) + jitter
    }

    /// Queue position for the duplicate, clamped to the end of the queue.
    pub fn insertion_point(&self, cursor: usize, queue_len: usize, jitter: usize) -> usize {
        queue_len.min(cursor + self.gap(queue_len, jitter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_queue_uses_min_gap() {
        let policy = RepeatPolicy::default();
        assert_eq!(policy.gap(20, 0), 10);
        assert_eq!(policy.gap(20, 4), 14);
    }

    #[test]
    fn large_queue_scales_gap() {
        let policy = RepeatPolicy::default();
        // floor(100 * 0.3) = 30
        assert_eq!(policy.gap(100, 2), 32);
    }

    #[test]
    fn insertion_point_clamps_to_queue_end() {
        let policy = RepeatPolicy::default();
        assert_eq!(policy.insertion_point(0, 3, 0), 3);
        assert_eq!(policy.insertion_point(15, 20, 1), 20);
        assert_eq!(policy.insertion_point(2, 20, 1), 13);
    }
}
