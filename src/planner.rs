use crate::types::{BatchWindow, Slot};

/// Walks fixed-width windows backwards from the chain head observed at run start.
///
/// The head is never re-read: window `n` starts at `latest_slot - n * batch_size`. The walk
/// stops early if it reaches slot 0, in which case the last window is clamped at 0.
#[derive(Clone, Debug)]
pub struct BatchPlanner {
    next_start: Option<Slot>,
    batch_size: u64,
    remaining: u64,
}

impl BatchPlanner {
    pub fn new(latest_slot: Slot, batch_size: u64, num_batches: u64) -> Self {
        BatchPlanner {
            next_start: Some(latest_slot),
            batch_size: batch_size.max(1),
            remaining: num_batches,
        }
    }
}

impl Iterator for BatchPlanner {
    type Item = BatchWindow;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let start = self.next_start?;
        let end = start.saturating_sub(self.batch_size - 1);
        self.next_start = end.checked_sub(1);
        self.remaining -= 1;
        Some(BatchWindow { start, end })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn windows_descend_without_overlap() {
        let windows = BatchPlanner::new(1000, 10, 3).collect::<Vec<_>>();
        assert_eq!(
            windows,
            vec![
                BatchWindow { start: 1000, end: 991 },
                BatchWindow { start: 990, end: 981 },
                BatchWindow { start: 980, end: 971 },
            ]
        );
        assert!(windows.iter().all(|w| w.width() == 10));
    }

    #[test]
    fn slots_are_visited_newest_first() {
        let window = BatchWindow { start: 12, end: 10 };
        assert_eq!(window.slots().collect::<Vec<_>>(), vec![12, 11, 10]);
    }

    #[test]
    fn single_slot_batches() {
        let windows = BatchPlanner::new(5, 1, 2).collect::<Vec<_>>();
        assert_eq!(
            windows,
            vec![BatchWindow { start: 5, end: 5 }, BatchWindow { start: 4, end: 4 }]
        );
    }

    #[test]
    fn stops_at_genesis() {
        let windows = BatchPlanner::new(14, 10, 5).collect::<Vec<_>>();
        assert_eq!(
            windows,
            vec![BatchWindow { start: 14, end: 5 }, BatchWindow { start: 4, end: 0 }]
        );
    }

    #[test]
    fn zero_batches_yields_nothing() {
        assert_eq!(BatchPlanner::new(1000, 10, 0).count(), 0);
    }
}
