//! Scan lifecycle derived from progress telemetry

use crate::protocol::ProgressMessage;
use std::fmt;

/// Lifecycle of the monitored scan
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScanStatus {
    /// No progress received yet
    #[default]
    Unset,
    Scanning,
    /// Terminal for the session
    Done,
}

impl fmt::Display for ScanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScanStatus::Unset => "unset",
            ScanStatus::Scanning => "scanning",
            ScanStatus::Done => "done",
        };
        f.write_str(name)
    }
}

/// A status change caused by a single message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: ScanStatus,
    pub to: ScanStatus,
}

/// Everything the client knows about the scan
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientState {
    pub status: ScanStatus,
    pub item_count: u64,
    pub total_size_bytes: u64,
}

impl ClientState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one message, returning the status transition if there was one.
    ///
    /// Status only moves forward (`Unset -> Scanning -> Done`). Counters are
    /// overwritten by every progress message, even when the status stays put.
    pub fn apply(&mut self, message: &ProgressMessage) -> Option<Transition> {
        let from = self.status;

        let to = match (from, message) {
            (status, ProgressMessage::Closed) => status,
            (ScanStatus::Unset | ScanStatus::Scanning, ProgressMessage::Progress(p)) if p.done => {
                ScanStatus::Done
            }
            (ScanStatus::Unset | ScanStatus::Scanning, ProgressMessage::Progress(_)) => {
                ScanStatus::Scanning
            }
            (ScanStatus::Done, ProgressMessage::Progress(_)) => ScanStatus::Done,
        };

        if let ProgressMessage::Progress(progress) = message {
            self.item_count = progress.item_count;
            self.total_size_bytes = progress.total_size_bytes;
        }

        self.status = to;
        (from != to).then_some(Transition { from, to })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::ScanProgress;

    fn progress(done: bool, item_count: u64, total_size_bytes: u64) -> ProgressMessage {
        ProgressMessage::Progress(ScanProgress {
            done,
            item_count,
            total_size_bytes,
        })
    }

    #[test]
    fn test_initial_state() {
        let state = ClientState::new();
        assert_eq!(state.status, ScanStatus::Unset);
        assert_eq!(state.item_count, 0);
        assert_eq!(state.total_size_bytes, 0);
    }

    #[test]
    fn test_counters_follow_every_progress_message() {
        let mut state = ClientState::new();
        for (items, size) in [(1, 10), (5, 700), (9, 12_000)] {
            state.apply(&progress(false, items, size));
            assert_eq!(state.item_count, items);
            assert_eq!(state.total_size_bytes, size);
        }
    }

    #[test]
    fn test_full_lifecycle_visits_each_state_once() {
        let mut state = ClientState::new();
        let mut transitions = Vec::new();

        for i in 0..5 {
            transitions.extend(state.apply(&progress(false, i, i * 100)));
        }
        transitions.extend(state.apply(&progress(true, 5, 500)));

        assert_eq!(
            transitions,
            vec![
                Transition { from: ScanStatus::Unset, to: ScanStatus::Scanning },
                Transition { from: ScanStatus::Scanning, to: ScanStatus::Done },
            ]
        );
        assert_eq!(state.status, ScanStatus::Done);
    }

    #[test]
    fn test_done_without_prior_progress() {
        let mut state = ClientState::new();
        let transition = state.apply(&progress(true, 3, 30));
        assert_eq!(
            transition,
            Some(Transition { from: ScanStatus::Unset, to: ScanStatus::Done })
        );
    }

    #[test]
    fn test_second_done_is_idempotent() {
        let mut state = ClientState::new();
        state.apply(&progress(true, 10, 100));

        assert_eq!(state.apply(&progress(true, 11, 200)), None);
        assert_eq!(state.status, ScanStatus::Done);
        assert_eq!(state.item_count, 11);
        assert_eq!(state.total_size_bytes, 200);
    }

    #[test]
    fn test_done_never_regresses() {
        let mut state = ClientState::new();
        state.apply(&progress(true, 10, 100));

        assert_eq!(state.apply(&progress(false, 12, 150)), None);
        assert_eq!(state.status, ScanStatus::Done);
        assert_eq!(state.item_count, 12);
    }

    #[test]
    fn test_closed_leaves_everything_unchanged() {
        for setup in [vec![], vec![progress(false, 2, 20)], vec![progress(true, 4, 40)]] {
            let mut state = ClientState::new();
            for msg in &setup {
                state.apply(msg);
            }
            let before = state.clone();

            assert_eq!(state.apply(&ProgressMessage::Closed), None);
            assert_eq!(state, before);
        }
    }

    #[test]
    fn test_status_display() {
        assert_eq!(ScanStatus::Scanning.to_string(), "scanning");
        assert_eq!(ScanStatus::Done.to_string(), "done");
    }
}
