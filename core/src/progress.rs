//! Upload progress tracking.

/// Percentage of the request body sent, rounded down and capped at 100.
///
/// Returns `None` when the total is unknown (0).
pub fn percent(loaded: u64, total: u64) -> Option<u8> {
    if total == 0 {
        return None;
    }
    let loaded = loaded.min(total) as u128;
    Some((loaded * 100 / total as u128) as u8)
}

/// Turns raw byte counters into a non-decreasing percentage.
///
/// One tracker per upload task.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProgressTracker {
    current: u8,
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a progress tick. Returns the new percentage only when it moved
    /// forward.
    pub fn observe(&mut self, loaded: u64, total: u64) -> Option<u8> {
        let next = percent(loaded, total)?;
        if next > self.current {
            self.current = next;
            Some(next)
        } else {
            None
        }
    }

    pub fn current(&self) -> u8 {
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_rounds_down() {
        assert_eq!(percent(0, 1000), Some(0));
        assert_eq!(percent(999, 1000), Some(99));
        assert_eq!(percent(1000, 1000), Some(100));
        assert_eq!(percent(1, 3), Some(33));
    }

    #[test]
    fn test_percent_unknown_total() {
        assert_eq!(percent(10, 0), None);
    }

    #[test]
    fn test_percent_caps_overshoot() {
        assert_eq!(percent(1500, 1000), Some(100));
    }

    #[test]
    fn test_percent_large_files() {
        assert_eq!(percent(u64::MAX - 1, u64::MAX), Some(99));
    }

    #[test]
    fn test_tracker_never_goes_back() {
        let mut tracker = ProgressTracker::new();
        assert_eq!(tracker.observe(50, 100), Some(50));
        assert_eq!(tracker.observe(20, 100), None);
        assert_eq!(tracker.observe(50, 100), None);
        assert_eq!(tracker.observe(10, 0), None);
        assert_eq!(tracker.current(), 50);
        assert_eq!(tracker.observe(100, 100), Some(100));
        assert_eq!(tracker.current(), 100);
    }
}
