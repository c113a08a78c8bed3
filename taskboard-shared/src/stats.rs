/// Live task statistics
///
/// Statistics are always derived from the current boards, never cached, so
/// achievement predicates and rankings see the same numbers the dashboard does.
///
/// # Example
///
/// ```
/// use taskboard_shared::models::task::{Column, TaskColumns};
/// use taskboard_shared::stats::UserStats;
///
/// let mut board = TaskColumns::default();
/// let a = board.push_new("maria", "proj_0_1", "a");
/// board.push_new("maria", "proj_0_1", "b");
/// board.push_new("maria", "proj_0_1", "c");
/// board.move_task(&a.id, Column::Todo, Column::Done);
///
/// let stats = UserStats::from_boards([&board], 1);
/// assert_eq!(stats.total_tasks, 3);
/// assert_eq!(stats.completed_tasks, 1);
/// assert_eq!(stats.completion_rate, 33.3);
/// ```

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::task::{Task, TaskColumns};

/// Aggregate task statistics for one user
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct UserStats {
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub active_tasks: usize,

    /// Percentage of tasks in `done`, rounded to one decimal; 0 with no tasks
    pub completion_rate: f64,

    pub total_projects: usize,
}

impl UserStats {
    /// Computes statistics over a user's project boards
    pub fn from_boards<'a>(
        boards: impl IntoIterator<Item = &'a TaskColumns>,
        total_projects: usize,
    ) -> Self {
        let (total_tasks, completed_tasks) = boards
            .into_iter()
            .fold((0, 0), |(total, done), b| (total + b.len(), done + b.completed()));

        Self {
            total_tasks,
            completed_tasks,
            active_tasks: total_tasks - completed_tasks,
            completion_rate: completion_rate(completed_tasks, total_tasks),
            total_projects,
        }
    }
}

fn completion_rate(completed: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let rate = completed as f64 / total as f64 * 100.0;
    (rate * 10.0).round() / 10.0
}

/// Window for activity series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Week,
    Month,
}

impl Period {
    pub fn days(&self) -> i64 {
        match self {
            Period::Week => 7,
            Period::Month => 30,
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Period::Week => f.write_str("week"),
            Period::Month => f.write_str("month"),
        }
    }
}

impl FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "week" => Ok(Period::Week),
            "month" => Ok(Period::Month),
            other => Err(format!("Unknown period: {}", other)),
        }
    }
}

/// Per-day created/completed counts, oldest day first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityReport {
    pub period: Period,

    /// One `MM-DD` label per day
    pub labels: Vec<String>,

    pub created: Vec<u32>,
    pub completed: Vec<u32>,
}

impl ActivityReport {
    /// Buckets tasks by creation and completion day, ending on `now`'s day
    pub fn build<'a>(
        tasks: impl IntoIterator<Item = &'a Task>,
        period: Period,
        now: DateTime<Utc>,
    ) -> Self {
        let today = now.date_naive();
        let days = period.days();
        let first = today - Duration::days(days - 1);

        let mut created = vec![0u32; days as usize];
        let mut completed = vec![0u32; days as usize];

        let slot = |date: NaiveDate| -> Option<usize> {
            let offset = (date - first).num_days();
            (0..days).contains(&offset).then_some(offset as usize)
        };

        for task in tasks {
            if let Some(i) = slot(task.created_at.date_naive()) {
                created[i] += 1;
            }
            if let Some(i) = task.completed_at.and_then(|at| slot(at.date_naive())) {
                completed[i] += 1;
            }
        }

        let labels = (0..days)
            .map(|i| (first + Duration::days(i)).format("%m-%d").to_string())
            .collect();

        Self {
            period,
            labels,
            created,
            completed,
        }
    }
}
