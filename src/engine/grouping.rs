use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::engine::timefmt::{format_bucket_date, parse_calendar_date};
use crate::models::{Status, Task};

/// Due-date classification for the todo list. Variant order is the render
/// order, so the derived `Ord` doubles as the bucket sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Bucket {
    Overdue,
    Today,
    Tomorrow,
    Date(NaiveDate),
    NoDueDate,
}

impl Bucket {
    pub fn label(&self) -> String {
        match self {
            Bucket::Overdue => "Overdue".to_string(),
            Bucket::Today => "Today".to_string(),
            Bucket::Tomorrow => "Tomorrow".to_string(),
            Bucket::Date(date) => format_bucket_date(*date),
            Bucket::NoDueDate => "No Due Date".to_string(),
        }
    }
}

fn assign_bucket(task: &Task, today: NaiveDate) -> Bucket {
    let Some(due) = task.due_date.as_deref().and_then(parse_calendar_date) else {
        return Bucket::NoDueDate;
    };
    // Done tasks are exempt from the overdue classification and fall through
    // to their plain calendar bucket.
    if due < today && task.status != Status::Done {
        return Bucket::Overdue;
    }
    if due == today {
        return Bucket::Today;
    }
    if today.succ_opt() == Some(due) {
        return Bucket::Tomorrow;
    }
    Bucket::Date(due)
}

/// Bucket the tasks by due date and sort each bucket by priority (high first).
/// Every input task lands in exactly one bucket; ties keep encounter order.
pub fn group_by_due_bucket(tasks: &[Task], today: NaiveDate) -> Vec<(Bucket, Vec<Task>)> {
    let mut groups: BTreeMap<Bucket, Vec<Task>> = BTreeMap::new();
    for task in tasks {
        groups
            .entry(assign_bucket(task, today))
            .or_default()
            .push(task.clone());
    }
    groups
        .into_iter()
        .map(|(bucket, mut tasks)| {
            // Vec::sort_by_key is stable, which keeps encounter order on ties
            tasks.sort_by_key(|task| task.priority.rank());
            (bucket, tasks)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Priority;
    use pretty_assertions::assert_eq;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 10).unwrap()
    }

    fn task_due(title: &str, due: Option<&str>) -> Task {
        let mut task = Task::new(title.to_string());
        task.due_date = due.map(str::to_string);
        task
    }

    #[test]
    fn bucket_order_is_fixed() {
        let tasks = vec![
            task_due("someday", None),
            task_due("next week", Some("2026-01-15")),
            task_due("tomorrow", Some("2026-01-11")),
            task_due("today", Some("2026-01-10")),
            task_due("late", Some("2026-01-09")),
        ];
        let groups = group_by_due_bucket(&tasks, today());
        let labels: Vec<String> = groups.iter().map(|(bucket, _)| bucket.label()).collect();
        assert_eq!(
            labels,
            vec!["Overdue", "Today", "Tomorrow", "Thu, Jan 15", "No Due Date"]
        );
    }

    #[test]
    fn every_task_lands_in_exactly_one_bucket() {
        let tasks = vec![
            task_due("a", Some("2026-01-05")),
            task_due("b", Some("2026-01-10")),
            task_due("c", Some("2026-02-01")),
            task_due("d", None),
            task_due("e", Some("2026-01-10")),
        ];
        let groups = group_by_due_bucket(&tasks, today());
        let total: usize = groups.iter().map(|(_, tasks)| tasks.len()).sum();
        assert_eq!(total, tasks.len());

        let mut seen: Vec<String> = groups
            .iter()
            .flat_map(|(_, tasks)| tasks.iter().map(|t| t.title.clone()))
            .collect();
        seen.sort();
        assert_eq!(seen, vec!["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn done_tasks_are_never_overdue() {
        let mut shipped = task_due("shipped", Some("2026-01-02"));
        shipped.status = Status::Done;
        let groups = group_by_due_bucket(&[shipped], today());
        assert_eq!(groups.len(), 1);
        assert_eq!(
            groups[0].0,
            Bucket::Date(NaiveDate::from_ymd_opt(2026, 1, 2).unwrap())
        );
    }

    #[test]
    fn past_date_buckets_sort_before_future_ones() {
        let mut shipped = task_due("shipped", Some("2026-01-02"));
        shipped.status = Status::Done;
        let upcoming = task_due("upcoming", Some("2026-01-20"));
        let groups = group_by_due_bucket(&[upcoming, shipped], today());
        let labels: Vec<String> = groups.iter().map(|(bucket, _)| bucket.label()).collect();
        assert_eq!(labels, vec!["Fri, Jan 2", "Tue, Jan 20"]);
    }

    #[test]
    fn buckets_sort_by_priority_with_stable_ties() {
        let mut low = task_due("low", Some("2026-01-10"));
        low.priority = Priority::Low;
        let mut first_medium = task_due("first medium", Some("2026-01-10"));
        first_medium.priority = Priority::Medium;
        let mut high = task_due("high", Some("2026-01-10"));
        high.priority = Priority::High;
        let mut second_medium = task_due("second medium", Some("2026-01-10"));
        second_medium.priority = Priority::Medium;

        let groups = group_by_due_bucket(&[low, first_medium, high, second_medium], today());
        let titles: Vec<&str> = groups[0].1.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["high", "first medium", "second medium", "low"]);
    }

    #[test]
    fn unparseable_due_dates_group_with_no_due_date() {
        let tasks = vec![task_due("junk", Some("soon"))];
        let groups = group_by_due_bucket(&tasks, today());
        assert_eq!(groups[0].0, Bucket::NoDueDate);
    }
}
