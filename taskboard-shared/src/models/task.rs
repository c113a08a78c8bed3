/// Task model and the per-project column set
///
/// # State Machine
///
/// ```text
/// todo ⇄ inprogress ⇄ done
/// todo ⇄ done
/// ```
///
/// Any column may move to any column. Moves append to the end of the target
/// column, so column order is insertion order. Entering `done` stamps
/// `completed_at`; leaving it clears the stamp.
///
/// # Ids
///
/// Task ids come from a monotonic per-project counter:
///
/// ```text
/// task_{owner}_{project_id}_{seq}
/// ```
///
/// Tasks are never removed, so the counter never reuses a value.
///
/// # Example
///
/// ```
/// use taskboard_shared::models::task::{Column, TaskColumns};
///
/// let mut columns = TaskColumns::default();
/// let task = columns.push_new("maria", "proj_0_42", "Fix bug");
/// assert_eq!(task.column, Column::Todo);
///
/// let moved = columns.move_task(&task.id, Column::Todo, Column::Done).unwrap();
/// assert!(moved.completed_at.is_some());
/// assert_eq!(columns.len(), 1);
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Board column a task sits in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Column {
    /// Not started
    #[serde(rename = "todo")]
    Todo,

    /// Being worked on
    #[serde(rename = "inprogress", alias = "in-progress", alias = "in_progress")]
    InProgress,

    /// Finished
    #[serde(rename = "done")]
    Done,
}

impl Column {
    /// All columns in board order
    pub const ALL: [Column; 3] = [Column::Todo, Column::InProgress, Column::Done];

    pub fn as_str(&self) -> &'static str {
        match self {
            Column::Todo => "todo",
            Column::InProgress => "inprogress",
            Column::Done => "done",
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self, Column::Done)
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Column {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "todo" => Ok(Column::Todo),
            "inprogress" | "in-progress" | "in_progress" => Ok(Column::InProgress),
            "done" => Ok(Column::Done),
            other => Err(format!("Unknown column: {}", other)),
        }
    }
}

/// A task on a project board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique id within the project
    pub id: String,

    /// Task text (trimmed, never empty)
    pub text: String,

    /// Username of the creator
    pub created_by: String,

    /// Creation time
    pub created_at: DateTime<Utc>,

    /// Current column
    pub column: Column,

    /// When the task last entered `done` (None outside `done`)
    pub completed_at: Option<DateTime<Utc>>,
}

/// The three ordered columns of one project
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskColumns {
    pub todo: Vec<Task>,

    #[serde(rename = "inprogress")]
    pub in_progress: Vec<Task>,

    pub done: Vec<Task>,

    /// Next value of the per-project id counter
    #[serde(skip)]
    next_seq: u64,
}

impl TaskColumns {
    pub fn column(&self, column: Column) -> &[Task] {
        match column {
            Column::Todo => &self.todo,
            Column::InProgress => &self.in_progress,
            Column::Done => &self.done,
        }
    }

    fn column_mut(&mut self, column: Column) -> &mut Vec<Task> {
        match column {
            Column::Todo => &mut self.todo,
            Column::InProgress => &mut self.in_progress,
            Column::Done => &mut self.done,
        }
    }

    /// Creates a task in `todo` and returns a copy of it
    pub fn push_new(&mut self, owner: &str, project_id: &str, text: &str) -> Task {
        let task = Task {
            id: format!("task_{}_{}_{}", owner, project_id, self.next_seq),
            text: text.to_string(),
            created_by: owner.to_string(),
            created_at: Utc::now(),
            column: Column::Todo,
            completed_at: None,
        };
        self.next_seq += 1;
        self.todo.push(task.clone());
        task
    }

    /// Moves a task from one column to the end of another
    ///
    /// Returns `None` (and changes nothing) if the id is not in `from`.
    pub fn move_task(&mut self, task_id: &str, from: Column, to: Column) -> Option<Task> {
        let source = self.column_mut(from);
        let index = source.iter().position(|t| t.id == task_id)?;
        let mut task = source.remove(index);

        task.column = to;
        task.completed_at = if to.is_done() {
            Some(Utc::now())
        } else {
            None
        };

        self.column_mut(to).push(task.clone());
        Some(task)
    }

    /// Finds a task in any column
    pub fn find(&self, task_id: &str) -> Option<&Task> {
        Column::ALL
            .iter()
            .flat_map(|c| self.column(*c).iter())
            .find(|t| t.id == task_id)
    }

    /// Iterates over every task in board order
    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.todo.iter().chain(&self.in_progress).chain(&self.done)
    }

    /// Total number of tasks across all columns
    pub fn len(&self) -> usize {
        self.todo.len() + self.in_progress.len() + self.done.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn completed(&self) -> usize {
        self.done.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(n: usize) -> (TaskColumns, Vec<Task>) {
        let mut columns = TaskColumns::default();
        let tasks = (0..n)
            .map(|i| columns.push_new("maria", "proj_0_1", &format!("task {}", i)))
            .collect();
        (columns, tasks)
    }

    #[test]
    fn test_column_parse() {
        assert_eq!("todo".parse::<Column>().unwrap(), Column::Todo);
        assert_eq!("in-progress".parse::<Column>().unwrap(), Column::InProgress);
        assert_eq!("inprogress".parse::<Column>().unwrap(), Column::InProgress);
        assert_eq!("done".parse::<Column>().unwrap(), Column::Done);
        assert!("archived".parse::<Column>().is_err());
    }

    #[test]
    fn test_column_serde_aliases() {
        let col: Column = serde_json::from_str("\"in-progress\"").unwrap();
        assert_eq!(col, Column::InProgress);
        assert_eq!(serde_json::to_string(&Column::InProgress).unwrap(), "\"inprogress\"");
    }

    #[test]
    fn test_ids_do_not_collide_after_moves() {
        let (mut columns, tasks) = board_with(2);
        columns.move_task(&tasks[0].id, Column::Todo, Column::Done).unwrap();
        columns.move_task(&tasks[1].id, Column::Todo, Column::InProgress).unwrap();

        let third = columns.push_new("maria", "proj_0_1", "third");
        assert!(tasks.iter().all(|t| t.id != third.id));
        assert!(third.id.ends_with("_2"));
    }

    #[test]
    fn test_move_appends_to_target() {
        let (mut columns, tasks) = board_with(3);
        columns.move_task(&tasks[2].id, Column::Todo, Column::Done).unwrap();
        columns.move_task(&tasks[0].id, Column::Todo, Column::Done).unwrap();

        let done: Vec<&str> = columns.done.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(done, vec![tasks[2].id.as_str(), tasks[0].id.as_str()]);
        assert_eq!(columns.todo.len(), 1);
    }

    #[test]
    fn test_move_missing_task_changes_nothing() {
        let (mut columns, tasks) = board_with(1);
        assert!(columns.move_task(&tasks[0].id, Column::Done, Column::Todo).is_none());
        assert!(columns.move_task("nope", Column::Todo, Column::Done).is_none());
        assert_eq!(columns.todo.len(), 1);
        assert!(columns.done.is_empty());
    }

    #[test]
    fn test_leaving_done_clears_completion() {
        let (mut columns, tasks) = board_with(1);
        let done = columns.move_task(&tasks[0].id, Column::Todo, Column::Done).unwrap();
        assert!(done.completed_at.is_some());

        let back = columns.move_task(&tasks[0].id, Column::Done, Column::InProgress).unwrap();
        assert!(back.completed_at.is_none());
        assert_eq!(columns.find(&tasks[0].id).unwrap().column, Column::InProgress);
    }

    #[test]
    fn test_move_preserves_task_count() {
        let (mut columns, tasks) = board_with(4);
        let moves = [
            (0, Column::Todo, Column::InProgress),
            (0, Column::InProgress, Column::Done),
            (1, Column::Todo, Column::Done),
            (0, Column::Done, Column::Todo),
            (3, Column::Todo, Column::Todo),
        ];
        for (i, from, to) in moves {
            columns.move_task(&tasks[i].id, from, to).unwrap();
            assert_eq!(columns.len(), 4);
        }
    }
}
