use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};

use crate::engine::filter::DateField;
use crate::engine::timefmt::{date_part, parse_calendar_date};
use crate::models::{Priority, Status, Task};

/// One (calendar day, priority) cell of the dashboard aggregation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyCount {
    pub date: String, // YYYY-MM-DD
    pub priority: Priority,
    pub count: u64,
}

/// Group tasks by the calendar date of the chosen timestamp field and by
/// priority, counting per cell. Tasks without the field are skipped; output
/// is sorted by date, then priority.
pub fn aggregate_by_day_and_priority(tasks: &[Task], field: DateField) -> Vec<DailyCount> {
    let mut cells: BTreeMap<(String, Priority), u64> = BTreeMap::new();
    for task in tasks {
        let value = match field {
            DateField::Due => task.due_date.as_deref(),
            DateField::Created => task.created_at.as_deref(),
            DateField::Completed => task.completed_at.as_deref(),
        };
        let Some(date) = value.and_then(date_part) else {
            continue;
        };
        *cells.entry((date.to_string(), task.priority)).or_default() += 1;
    }
    cells
        .into_iter()
        .map(|((date, priority), count)| DailyCount { date, priority, count })
        .collect()
}

/// Chart date range from the active filter bounds: both set → that inclusive
/// range; from only → through today; to only → the trailing week ending
/// there; neither → the last 7 days ending today.
pub fn resolve_date_range(
    from: Option<&str>,
    to: Option<&str>,
    today: NaiveDate,
) -> Vec<NaiveDate> {
    let from = from.and_then(parse_calendar_date);
    let to = to.and_then(parse_calendar_date);
    let (start, end) = match (from, to) {
        (Some(from), Some(to)) => (from, to),
        (Some(from), None) => (from, today),
        (None, Some(to)) => (to.checked_sub_days(Days::new(6)).unwrap_or(to), to),
        (None, None) => (today.checked_sub_days(Days::new(6)).unwrap_or(today), today),
    };

    let mut dates = Vec::new();
    let mut current = start;
    while current <= end {
        dates.push(current);
        match current.succ_opt() {
            Some(next) => current = next,
            None => break,
        }
    }
    dates
}

/// Zero-filled counts for one priority across every date in the range, in
/// range order. Dates with no matching cell emit 0 so the chart draws a
/// continuous series.
pub fn series(counts: &[DailyCount], dates: &[NaiveDate], priority: Priority) -> Vec<u64> {
    dates
        .iter()
        .map(|date| {
            let key = date.format("%Y-%m-%d").to_string();
            counts
                .iter()
                .find(|cell| cell.priority == priority && cell.date == key)
                .map(|cell| cell.count)
                .unwrap_or(0)
        })
        .collect()
}

/// Headline numbers above the charts, recomputed over the filtered set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SummaryStats {
    pub todo: usize,
    pub in_progress: usize,
    pub done: usize,
    pub completed_today: usize,
    pub total_seconds: u64,
    pub average_seconds: u64,
}

pub fn summarize(tasks: &[Task], today: NaiveDate) -> SummaryStats {
    let today_key = today.format("%Y-%m-%d").to_string();
    let mut stats = SummaryStats::default();
    let mut timed_tasks = 0u64;
    for task in tasks {
        match task.status {
            Status::Todo => stats.todo += 1,
            Status::InProgress => stats.in_progress += 1,
            Status::Done => stats.done += 1,
        }
        if task
            .completed_at
            .as_deref()
            .and_then(date_part)
            .is_some_and(|date| date == today_key)
        {
            stats.completed_today += 1;
        }
        stats.total_seconds += task.time_spent;
        if task.time_spent > 0 {
            timed_tasks += 1;
        }
    }
    if timed_tasks > 0 {
        stats.average_seconds = stats.total_seconds / timed_tasks;
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn created(date: &str, priority: Priority) -> Task {
        let mut task = Task::new("t".to_string());
        task.created_at = Some(format!("{} 10:00:00", date));
        task.priority = priority;
        task
    }

    #[test]
    fn aggregates_by_day_and_priority() {
        let tasks = vec![
            created("2026-08-01", Priority::High),
            created("2026-08-01", Priority::High),
            created("2026-08-01", Priority::Low),
            created("2026-08-02", Priority::Medium),
            Task::new("no created date".to_string()),
        ];
        let counts = aggregate_by_day_and_priority(&tasks, DateField::Created);
        assert_eq!(
            counts,
            vec![
                DailyCount { date: "2026-08-01".into(), priority: Priority::Low, count: 1 },
                DailyCount { date: "2026-08-01".into(), priority: Priority::High, count: 2 },
                DailyCount { date: "2026-08-02".into(), priority: Priority::Medium, count: 1 },
            ]
        );
    }

    #[test]
    fn range_defaults_to_last_seven_days() {
        let dates = resolve_date_range(None, None, day(2026, 8, 6));
        assert_eq!(dates.len(), 7);
        assert_eq!(dates[0], day(2026, 7, 31));
        assert_eq!(dates[6], day(2026, 8, 6));
    }

    #[test]
    fn range_from_only_extends_to_today() {
        let dates = resolve_date_range(Some("2026-08-04"), None, day(2026, 8, 6));
        assert_eq!(dates, vec![day(2026, 8, 4), day(2026, 8, 5), day(2026, 8, 6)]);
    }

    #[test]
    fn range_to_only_takes_the_trailing_week() {
        let dates = resolve_date_range(None, Some("2026-08-03"), day(2026, 8, 6));
        assert_eq!(dates.len(), 7);
        assert_eq!(dates[0], day(2026, 7, 28));
        assert_eq!(dates[6], day(2026, 8, 3));
    }

    #[test]
    fn range_with_both_bounds_is_inclusive() {
        let dates = resolve_date_range(Some("2026-08-01"), Some("2026-08-03"), day(2026, 8, 6));
        assert_eq!(dates, vec![day(2026, 8, 1), day(2026, 8, 2), day(2026, 8, 3)]);
    }

    #[test]
    fn inverted_bounds_produce_an_empty_range() {
        let dates = resolve_date_range(Some("2026-08-05"), Some("2026-08-01"), day(2026, 8, 6));
        assert!(dates.is_empty());
    }

    #[test]
    fn series_zero_fills_gaps_for_every_priority() {
        let tasks = vec![
            created("2026-08-01", Priority::High),
            created("2026-08-03", Priority::High),
            created("2026-08-03", Priority::Medium),
        ];
        let counts = aggregate_by_day_and_priority(&tasks, DateField::Created);
        let dates = resolve_date_range(Some("2026-08-01"), Some("2026-08-03"), day(2026, 8, 6));

        assert_eq!(series(&counts, &dates, Priority::High), vec![1, 0, 1]);
        assert_eq!(series(&counts, &dates, Priority::Medium), vec![0, 0, 1]);
        assert_eq!(series(&counts, &dates, Priority::Low), vec![0, 0, 0]);
    }

    #[test]
    fn summary_counts_statuses_time_and_completions() {
        let mut finished = Task::new("finished".to_string());
        finished.status = Status::Done;
        finished.completed_at = Some("2026-08-06 12:00:00".to_string());
        finished.time_spent = 600;
        let mut started = Task::new("started".to_string());
        started.status = Status::InProgress;
        started.time_spent = 200;
        let idle = Task::new("idle".to_string());

        let stats = summarize(&[finished, started, idle], day(2026, 8, 6));
        assert_eq!(
            stats,
            SummaryStats {
                todo: 1,
                in_progress: 1,
                done: 1,
                completed_today: 1,
                total_seconds: 800,
                average_seconds: 400,
            }
        );
    }
}
