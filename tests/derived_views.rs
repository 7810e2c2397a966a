use std::collections::HashSet;

use chrono::{NaiveDate, TimeZone, Utc};
use pretty_assertions::assert_eq;
use trk_tui::engine::filter::{filter_tasks, FilterCriteria};
use trk_tui::engine::folders::{plan_move, visible_nodes, DropZone, MoveError};
use trk_tui::engine::grouping::group_by_due_bucket;
use trk_tui::engine::timer::TimerEngine;
use trk_tui::models::{ActiveTimer, Folder, Priority, Status, Task};

fn task(title: &str, due: Option<&str>, priority: Priority) -> Task {
    let mut task = Task::new(title.to_string());
    task.due_date = due.map(str::to_string);
    task.priority = priority;
    task
}

fn folder(id: i64, name: &str, parent: Option<i64>, position: i64) -> Folder {
    Folder {
        id: Some(id),
        name: name.to_string(),
        parent_id: parent,
        position,
        has_children: false,
    }
}

/// Filter then group, the way the todo view derives its rows.
#[test]
fn filtered_tasks_group_into_ordered_buckets() {
    let today = NaiveDate::from_ymd_opt(2026, 8, 6).unwrap();
    let mut tasks = vec![
        task("write report", Some("2026-08-05"), Priority::Low),
        task("fix deploy", Some("2026-08-06"), Priority::High),
        task("call vendor", Some("2026-08-06"), Priority::Low),
        task("plan offsite", Some("2026-08-11"), Priority::Medium),
        task("clean inbox", None, Priority::Medium),
    ];
    tasks[0].project = Some("ops".to_string());
    tasks[1].project = Some("ops".to_string());

    // Unfiltered: one task per bucket classification, fixed order
    let groups = group_by_due_bucket(&tasks, today);
    let labels: Vec<String> = groups.iter().map(|(bucket, _)| bucket.label()).collect();
    assert_eq!(
        labels,
        vec!["Overdue", "Today", "Tue, Aug 11", "No Due Date"]
    );

    // Today's bucket sorts high before low
    let today_titles: Vec<&str> = groups[1].1.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(today_titles, vec!["fix deploy", "call vendor"]);

    // Project filter composes in front of the grouping
    let criteria = FilterCriteria {
        project: Some("ops".to_string()),
        ..FilterCriteria::default()
    };
    let filtered = filter_tasks(&tasks, &criteria);
    let groups = group_by_due_bucket(&filtered, today);
    let labels: Vec<String> = groups.iter().map(|(bucket, _)| bucket.label()).collect();
    assert_eq!(labels, vec!["Overdue", "Today"]);
}

/// Apply a planned move to the flat list the way the server would, then
/// re-derive the tree.
#[test]
fn folder_move_round_trip_updates_the_tree() {
    let mut folders = vec![
        folder(1, "Projects", None, 0),
        folder(2, "Archive", None, 1),
        folder(3, "Ideas", None, 2),
    ];

    // Nest "Ideas" under "Projects"
    let plan = plan_move(&folders, 3, 1, DropZone::Inside).unwrap();
    for row in &plan {
        let target = folders.iter_mut().find(|f| f.id == Some(row.id)).unwrap();
        target.position = row.position;
        target.parent_id = row.parent_id;
    }

    let rows = visible_nodes(&folders, &HashSet::from([1]));
    assert_eq!(rows, vec![(1, 0), (3, 1), (2, 0)]);

    // The nested folder can no longer adopt its ancestor
    assert_eq!(
        plan_move(&folders, 1, 3, DropZone::Inside),
        Err(MoveError::WouldCycle)
    );

    // Moving "Archive" before "Projects" renumbers the root level 0..n-1
    let plan = plan_move(&folders, 2, 1, DropZone::Before).unwrap();
    let order: Vec<(i64, i64)> = plan.iter().map(|row| (row.id, row.position)).collect();
    assert_eq!(order, vec![(2, 0), (1, 1)]);
}

/// Switching timers and reconciling after a restart, with injected clocks.
#[test]
fn timer_switch_and_reload_reconciliation() {
    let t0 = Utc.with_ymd_and_hms(2026, 8, 6, 9, 0, 0).unwrap();
    let mut engine = TimerEngine::new();

    engine.begin(1, 40, t0);
    assert_eq!(engine.display_seconds(1, t0 + chrono::Duration::seconds(20)), Some(60));

    // Stop-then-start: task 1 settles before task 2 begins
    let settled = engine.finish(1, t0 + chrono::Duration::seconds(25)).unwrap();
    assert_eq!(settled, 65);
    engine.begin(2, 0, t0 + chrono::Duration::seconds(25));
    assert_eq!(engine.running_task_ids(), vec![2]);

    // Simulated restart: the server still reports task 2 running from its
    // original instant with the settled base
    let mut fresh = TimerEngine::new();
    fresh.reconcile(&[ActiveTimer {
        task_id: 2,
        started_at: "2026-08-06 09:00:25".to_string(),
        time_spent_at_start: 0,
    }]);
    let later = t0 + chrono::Duration::seconds(85);
    assert_eq!(fresh.display_seconds(2, later), Some(60));
}

/// Clearing criteria returns the snapshot untouched, including done tasks.
#[test]
fn clearing_filters_restores_the_full_set() {
    let mut done = task("shipped", Some("2026-08-01"), Priority::High);
    done.status = Status::Done;
    let tasks = vec![
        task("open", Some("2026-08-10"), Priority::Medium),
        done,
    ];

    let criteria = FilterCriteria {
        status: Some(Status::Done),
        ..FilterCriteria::default()
    };
    assert_eq!(filter_tasks(&tasks, &criteria).len(), 1);

    let all = filter_tasks(&tasks, &FilterCriteria::default());
    let titles: Vec<&str> = all.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["open", "shipped"]);
}
