use std::collections::HashMap;

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::models::ActiveTimer;

/// Wall-clock anchor of a running timer. Elapsed time is always derived as
/// `base_seconds + (now - started_at)`; nothing is incremented tick by tick,
/// so a missed tick never loses time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionAnchor {
    pub started_at: DateTime<Utc>,
    pub base_seconds: u64,
}

impl SessionAnchor {
    fn seconds_at(&self, now: DateTime<Utc>) -> u64 {
        let elapsed = (now - self.started_at).num_seconds().max(0) as u64;
        self.base_seconds + elapsed
    }
}

/// Client-side timer state machine. Invariant: at most one session is live at
/// any time; callers stop the current session (including its server round
/// trip) before beginning another.
#[derive(Debug, Default)]
pub struct TimerEngine {
    sessions: HashMap<i64, SessionAnchor>,
}

impl TimerEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self, task_id: i64) -> bool {
        self.sessions.contains_key(&task_id)
    }

    pub fn any_running(&self) -> bool {
        !self.sessions.is_empty()
    }

    /// Ids with a live session. At most one under normal operation; can be
    /// several briefly after reconciling a server that reported more.
    pub fn running_task_ids(&self) -> Vec<i64> {
        let mut ids: Vec<i64> = self.sessions.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Anchor a fresh session for `task_id`. Any other live session is
    /// dropped here as a backstop; the caller is expected to have finished it
    /// (and persisted the stop) already.
    pub fn begin(&mut self, task_id: i64, base_seconds: u64, now: DateTime<Utc>) {
        self.sessions.clear();
        self.sessions.insert(
            task_id,
            SessionAnchor {
                started_at: now,
                base_seconds,
            },
        );
    }

    /// End the session and return the final cumulative seconds, or `None` if
    /// no session was live for the task.
    pub fn finish(&mut self, task_id: i64, now: DateTime<Utc>) -> Option<u64> {
        self.sessions
            .remove(&task_id)
            .map(|anchor| anchor.seconds_at(now))
    }

    /// Drop a session without computing a total (task vanished mid-session).
    pub fn discard(&mut self, task_id: i64) {
        self.sessions.remove(&task_id);
    }

    /// Live cumulative seconds for the display tick.
    pub fn display_seconds(&self, task_id: i64, now: DateTime<Utc>) -> Option<u64> {
        self.sessions.get(&task_id).map(|anchor| anchor.seconds_at(now))
    }

    /// Rebuild sessions from server-reported active timers after a restart.
    /// The server's start instant is kept so time that passed while the
    /// client was gone is counted. Records with unparseable instants are
    /// skipped.
    pub fn reconcile(&mut self, active: &[ActiveTimer]) {
        self.sessions.clear();
        for record in active {
            let Some(started_at) = parse_instant(&record.started_at) else {
                tracing::warn!(task_id = record.task_id, started_at = %record.started_at,
                    "skipping active timer with unparseable start instant");
                continue;
            };
            self.sessions.insert(
                record.task_id,
                SessionAnchor {
                    started_at,
                    base_seconds: record.time_spent_at_start,
                },
            );
        }
    }
}

fn parse_instant(value: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn at(secs_past_epoch: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_767_225_600 + secs_past_epoch, 0).unwrap()
    }

    #[test]
    fn start_then_stop_accumulates_on_top_of_base() {
        let mut engine = TimerEngine::new();
        engine.begin(1, 100, at(0));
        assert!(engine.is_running(1));
        assert_eq!(engine.display_seconds(1, at(30)), Some(130));
        assert_eq!(engine.finish(1, at(45)), Some(145));
        assert!(!engine.is_running(1));
        assert_eq!(engine.finish(1, at(50)), None);
    }

    #[test]
    fn switching_tasks_never_leaves_two_running() {
        let mut engine = TimerEngine::new();
        engine.begin(1, 100, at(0));

        // The controller stops task 1 before starting task 2
        let final_seconds = engine.finish(1, at(30)).unwrap();
        assert_eq!(final_seconds, 130);
        engine.begin(2, 0, at(30));

        assert_eq!(engine.running_task_ids(), vec![2]);
        assert_eq!(engine.display_seconds(2, at(40)), Some(10));
        assert_eq!(engine.display_seconds(1, at(40)), None);
    }

    #[test]
    fn begin_drops_stale_sessions_as_a_backstop() {
        let mut engine = TimerEngine::new();
        engine.begin(1, 0, at(0));
        engine.begin(2, 0, at(10));
        assert_eq!(engine.running_task_ids(), vec![2]);
    }

    #[test]
    fn reconcile_uses_the_server_start_instant() {
        let mut engine = TimerEngine::new();
        // Server recorded the session starting at T0 with 100s already spent;
        // the client comes up 30s later.
        let records = vec![ActiveTimer {
            task_id: 7,
            started_at: "2026-01-01 00:00:00".to_string(),
            time_spent_at_start: 100,
        }];
        engine.reconcile(&records);

        let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 30).unwrap();
        assert_eq!(engine.display_seconds(7, now), Some(130));

        // The periodic tick keeps increasing it
        let later = Utc.with_ymd_and_hms(2026, 1, 1, 0, 1, 30).unwrap();
        assert_eq!(engine.display_seconds(7, later), Some(190));
    }

    #[test]
    fn reconcile_skips_bad_records_and_replaces_old_state() {
        let mut engine = TimerEngine::new();
        engine.begin(1, 0, at(0));
        engine.reconcile(&[ActiveTimer {
            task_id: 9,
            started_at: "not an instant".to_string(),
            time_spent_at_start: 5,
        }]);
        assert!(!engine.any_running());
    }

    #[test]
    fn clock_going_backwards_clamps_to_base() {
        let mut engine = TimerEngine::new();
        engine.begin(3, 50, at(100));
        assert_eq!(engine.display_seconds(3, at(40)), Some(50));
    }

    #[test]
    fn discard_drops_without_total() {
        let mut engine = TimerEngine::new();
        engine.begin(4, 10, at(0));
        engine.discard(4);
        assert!(!engine.any_running());
    }
}
