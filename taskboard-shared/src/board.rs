/// Task board store for a single user
///
/// A [`Board`] owns a user's projects, each project's three task columns and
/// the comments on its tasks, plus the currently selected (active) project.
/// The [`Store`](crate::store::Store) keeps one board per user behind that
/// user's lock and layers points and notifications on top.
///
/// Every mutating operation runs all of its checks before touching state, so
/// an `Err` leaves the board exactly as it was.
///
/// # Example
///
/// ```
/// use taskboard_shared::board::Board;
/// use taskboard_shared::models::task::Column;
/// use taskboard_shared::models::user::{CreateUser, Role, User};
///
/// let maria = User::new(CreateUser {
///     username: "maria".to_string(),
///     email: "maria@example.com".to_string(),
///     role: Role::Member,
///     password_hash: "hash".to_string(),
/// });
///
/// let mut board = Board::default();
/// let project = board.create_project(&maria, "Sprint1").unwrap();
/// assert_eq!(board.active_project().map(|p| p.id.as_str()), Some(project.id.as_str()));
///
/// let task = board.add_task(&maria, "Fix bug").unwrap();
/// board.move_task(&maria, &task.id, Column::Todo, Column::Done).unwrap();
/// assert_eq!(board.stats().completed_tasks, 1);
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::auth::authorization::{require_project_management, require_task_edit};
use crate::error::{BoardError, BoardResult};
use crate::models::comment::{is_reaction_emoji, Comment, REACTION_EMOJIS};
use crate::models::project::{is_hex_color, Project, UpdateProject};
use crate::models::task::{Column, Task, TaskColumns};
use crate::models::user::User;
use crate::stats::UserStats;

/// One project with its columns and task comments
#[derive(Debug, Clone)]
struct ProjectBoard {
    project: Project,
    columns: TaskColumns,
    comments: HashMap<String, Vec<Comment>>,
}

/// A task with its position and discussion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskDetails {
    pub task: Task,
    pub column: Column,
    pub comments: Vec<Comment>,
    pub comment_count: usize,
}

/// Snapshot of a project for download
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectExport {
    pub project: Project,
    pub tasks: TaskColumns,
    pub comments: HashMap<String, Vec<Comment>>,
    pub exported_at: DateTime<Utc>,
}

/// A user's projects, tasks and comments
#[derive(Debug, Clone, Default)]
pub struct Board {
    projects: Vec<ProjectBoard>,
    active: Option<String>,
}

impl Board {
    /// Projects in creation order
    pub fn projects(&self) -> impl Iterator<Item = &Project> {
        self.projects.iter().map(|p| &p.project)
    }

    pub fn project_count(&self) -> usize {
        self.projects.len()
    }

    pub fn active_project(&self) -> Option<&Project> {
        self.active_board().map(|p| &p.project)
    }

    /// Columns of the active project
    pub fn active_columns(&self) -> Option<&TaskColumns> {
        self.active_board().map(|p| &p.columns)
    }

    /// Every task on every project
    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.projects.iter().flat_map(|p| p.columns.iter())
    }

    /// Live statistics over all projects
    pub fn stats(&self) -> UserStats {
        UserStats::from_boards(self.projects.iter().map(|p| &p.columns), self.projects.len())
    }

    /// Creates a project with an empty board
    ///
    /// The first project a user creates becomes active.
    pub fn create_project(&mut self, actor: &User, name: &str) -> BoardResult<Project> {
        require_project_management(Some(actor), "create projects")?;

        let name = name.trim();
        if name.is_empty() {
            return Err(BoardError::validation("Project name cannot be empty"));
        }

        let project = Project::new(&actor.username, self.projects.len(), name);
        if self.projects.is_empty() {
            self.active = Some(project.id.clone());
        }
        self.projects.push(ProjectBoard {
            project: project.clone(),
            columns: TaskColumns::default(),
            comments: HashMap::new(),
        });

        Ok(project)
    }

    /// Selects the active project
    ///
    /// Unknown ids are ignored. Returns whether the selection changed.
    pub fn select_project(&mut self, project_id: &str) -> bool {
        if !self.projects.iter().any(|p| p.project.id == project_id) {
            return false;
        }
        self.active = Some(project_id.to_string());
        true
    }

    /// Updates name, description or color of the active project
    pub fn update_project(&mut self, actor: &User, patch: UpdateProject) -> BoardResult<Project> {
        require_project_management(Some(actor), "edit projects")?;

        let name = match patch.name.as_deref().map(str::trim) {
            Some("") => return Err(BoardError::validation("Project name cannot be empty")),
            other => other.map(str::to_string),
        };
        if let Some(color) = patch.color.as_deref() {
            if !is_hex_color(color) {
                return Err(BoardError::validation(format!("Invalid color: {}", color)));
            }
        }

        let board = self.active_board_mut()?;
        if let Some(name) = name {
            board.project.name = name;
        }
        if let Some(description) = patch.description {
            let description = description.trim();
            board.project.description =
                (!description.is_empty()).then(|| description.to_string());
        }
        if let Some(color) = patch.color {
            board.project.color = color;
        }

        Ok(board.project.clone())
    }

    /// Adds a task to `todo` on the active project
    pub fn add_task(&mut self, actor: &User, text: &str) -> BoardResult<Task> {
        require_task_edit(Some(actor), None, "create tasks")?;
        let board = self.active_board_mut()?;

        let text = text.trim();
        if text.is_empty() {
            return Err(BoardError::validation("Task text cannot be empty"));
        }

        Ok(board
            .columns
            .push_new(&actor.username, &board.project.id, text))
    }

    /// Moves a task on the active project to the end of another column
    pub fn move_task(
        &mut self,
        actor: &User,
        task_id: &str,
        from: Column,
        to: Column,
    ) -> BoardResult<Task> {
        require_task_edit(Some(actor), None, "move tasks")?;

        let board = self.active_board_mut()?;
        let owner = board
            .columns
            .column(from)
            .iter()
            .find(|t| t.id == task_id)
            .map(|t| t.created_by.clone())
            .ok_or_else(|| {
                BoardError::not_found(format!("Task {} is not in column {}", task_id, from))
            })?;
        require_task_edit(Some(actor), Some(&owner), "move this task")?;

        board
            .columns
            .move_task(task_id, from, to)
            .ok_or_else(|| BoardError::not_found(format!("Task {}", task_id)))
    }

    /// Looks up a task on the active project
    pub fn task_details(&self, task_id: &str) -> BoardResult<TaskDetails> {
        let board = self.active_board().ok_or(BoardError::NoActiveProject)?;
        let task = board
            .columns
            .find(task_id)
            .cloned()
            .ok_or_else(|| BoardError::not_found(format!("Task {}", task_id)))?;
        let comments = board.comments.get(task_id).cloned().unwrap_or_default();

        Ok(TaskDetails {
            column: task.column,
            comment_count: comments.len(),
            task,
            comments,
        })
    }

    /// Snapshot of the active project
    pub fn export_project(&self) -> BoardResult<ProjectExport> {
        let board = self.active_board().ok_or(BoardError::NoActiveProject)?;
        Ok(ProjectExport {
            project: board.project.clone(),
            tasks: board.columns.clone(),
            comments: board.comments.clone(),
            exported_at: Utc::now(),
        })
    }

    /// Appends a comment to a task on any of the user's projects
    pub fn add_comment(&mut self, author: &str, task_id: &str, text: &str) -> BoardResult<Comment> {
        let text = text.trim();
        if text.is_empty() {
            return Err(BoardError::validation("Comment text cannot be empty"));
        }

        let thread = self.thread_mut(task_id)?;
        let comment = Comment::new(thread.len() as u64, author, text);
        thread.push(comment.clone());
        Ok(comment)
    }

    /// Appends an emoji reaction to a task on any of the user's projects
    pub fn add_reaction(&mut self, author: &str, task_id: &str, emoji: &str) -> BoardResult<Comment> {
        let emoji = emoji.trim();
        if !is_reaction_emoji(emoji) {
            return Err(BoardError::validation(format!(
                "Reaction must be one of {}",
                REACTION_EMOJIS.join(" ")
            )));
        }

        let thread = self.thread_mut(task_id)?;
        let reaction = Comment::reaction(thread.len() as u64, author, emoji);
        thread.push(reaction.clone());
        Ok(reaction)
    }

    /// Comments and reactions on a task, oldest first
    pub fn comments(&self, task_id: &str) -> BoardResult<Vec<Comment>> {
        let board = self
            .projects
            .iter()
            .find(|p| p.columns.find(task_id).is_some())
            .ok_or_else(|| BoardError::not_found(format!("Task {}", task_id)))?;
        Ok(board.comments.get(task_id).cloned().unwrap_or_default())
    }

    fn active_board(&self) -> Option<&ProjectBoard> {
        let active = self.active.as_deref()?;
        self.projects.iter().find(|p| p.project.id == active)
    }

    fn active_board_mut(&mut self) -> BoardResult<&mut ProjectBoard> {
        let active = self.active.as_deref().ok_or(BoardError::NoActiveProject)?;
        self.projects
            .iter_mut()
            .find(|p| p.project.id == active)
            .ok_or(BoardError::NoActiveProject)
    }

    fn thread_mut(&mut self, task_id: &str) -> BoardResult<&mut Vec<Comment>> {
        let task_id = task_id.trim();
        if task_id.is_empty() {
            return Err(BoardError::validation("Task id is required"));
        }

        let board = self
            .projects
            .iter_mut()
            .find(|p| p.columns.find(task_id).is_some())
            .ok_or_else(|| BoardError::not_found(format!("Task {}", task_id)))?;
        Ok(board.comments.entry(task_id.to_string()).or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::{CreateUser, Role};

    fn user(name: &str, role: Role) -> User {
        User::new(CreateUser {
            username: name.to_string(),
            email: format!("{}@example.com", name),
            role,
            password_hash: "test_hash".to_string(),
        })
    }

    fn board_with_project(actor: &User) -> (Board, Project) {
        let mut board = Board::default();
        let project = board.create_project(actor, "Sprint1").unwrap();
        (board, project)
    }

    #[test]
    fn test_first_project_becomes_active() {
        let maria = user("maria", Role::Member);
        let (mut board, first) = board_with_project(&maria);
        let second = board.create_project(&maria, "Backlog").unwrap();

        assert_eq!(board.active_project().unwrap().id, first.id);
        assert_ne!(first.id, second.id);
        assert_eq!(board.project_count(), 2);
        assert!(board.active_columns().unwrap().is_empty());
    }

    #[test]
    fn test_create_project_permission_before_validation() {
        let juan = user("juan", Role::Guest);
        let mut board = Board::default();

        assert!(matches!(
            board.create_project(&juan, "   "),
            Err(BoardError::Permission(_))
        ));
        assert!(matches!(
            board.create_project(&juan, "Sprint1"),
            Err(BoardError::Permission(_))
        ));
        assert_eq!(board.project_count(), 0);
    }

    #[test]
    fn test_project_name_is_trimmed() {
        let maria = user("maria", Role::Member);
        let mut board = Board::default();
        let project = board.create_project(&maria, "  Sprint1  ").unwrap();
        assert_eq!(project.name, "Sprint1");
    }

    #[test]
    fn test_select_unknown_project_is_noop() {
        let maria = user("maria", Role::Member);
        let (mut board, first) = board_with_project(&maria);
        let second = board.create_project(&maria, "Backlog").unwrap();

        assert!(!board.select_project("proj_9_9999"));
        assert_eq!(board.active_project().unwrap().id, first.id);

        assert!(board.select_project(&second.id));
        assert_eq!(board.active_project().unwrap().id, second.id);
    }

    #[test]
    fn test_add_task_requires_active_project() {
        let maria = user("maria", Role::Member);
        let mut board = Board::default();
        assert!(matches!(
            board.add_task(&maria, "Fix bug"),
            Err(BoardError::NoActiveProject)
        ));

        // Missing project is reported before blank text
        assert!(matches!(
            board.add_task(&maria, " "),
            Err(BoardError::NoActiveProject)
        ));
    }

    #[test]
    fn test_guest_cannot_add_task() {
        let juan = user("juan", Role::Guest);
        let mut board = Board::default();
        let result = board.add_task(&juan, "Fix bug");
        assert!(matches!(result, Err(BoardError::Permission(_))));
        let result = board.add_task(&juan, " ");
        assert!(matches!(result, Err(BoardError::Permission(_))));
        assert_eq!(board.tasks().count(), 0);
    }

    #[test]
    fn test_add_task_rejects_blank_text() {
        let maria = user("maria", Role::Member);
        let (mut board, _) = board_with_project(&maria);
        assert!(matches!(
            board.add_task(&maria, " \t "),
            Err(BoardError::Validation(_))
        ));
        assert!(board.active_columns().unwrap().is_empty());
    }

    #[test]
    fn test_move_unknown_task_leaves_columns() {
        let maria = user("maria", Role::Member);
        let (mut board, _) = board_with_project(&maria);
        let task = board.add_task(&maria, "Fix bug").unwrap();

        let result = board.move_task(&maria, &task.id, Column::InProgress, Column::Done);
        assert!(matches!(result, Err(BoardError::NotFound(_))));

        let columns = board.active_columns().unwrap();
        assert_eq!(columns.todo.len(), 1);
        assert!(columns.done.is_empty());
    }

    #[test]
    fn test_move_task_to_done() {
        let maria = user("maria", Role::Member);
        let (mut board, _) = board_with_project(&maria);
        let task = board.add_task(&maria, "Fix bug").unwrap();

        let moved = board.move_task(&maria, &task.id, Column::Todo, Column::Done).unwrap();
        assert_eq!(moved.column, Column::Done);

        let columns = board.active_columns().unwrap();
        assert!(columns.todo.is_empty());
        assert_eq!(columns.done[0].id, task.id);
    }

    #[test]
    fn test_update_project() {
        let maria = user("maria", Role::Member);
        let (mut board, _) = board_with_project(&maria);

        let updated = board
            .update_project(
                &maria,
                UpdateProject {
                    name: Some(" Release ".to_string()),
                    description: Some("Q3 release".to_string()),
                    color: Some("#0984e3".to_string()),
                },
            )
            .unwrap();
        assert_eq!(updated.name, "Release");
        assert_eq!(updated.description.as_deref(), Some("Q3 release"));
        assert_eq!(board.active_project().unwrap().color, "#0984e3");

        let bad = board.update_project(
            &maria,
            UpdateProject {
                name: Some("".to_string()),
                color: Some("#000000".to_string()),
                ..Default::default()
            },
        );
        assert!(matches!(bad, Err(BoardError::Validation(_))));
        assert_eq!(board.active_project().unwrap().color, "#0984e3");
    }

    #[test]
    fn test_comments_and_reactions() {
        let maria = user("maria", Role::Member);
        let (mut board, _) = board_with_project(&maria);
        let task = board.add_task(&maria, "Fix bug").unwrap();

        let first = board.add_comment("maria", &task.id, "  on it ").unwrap();
        let reaction = board.add_reaction("maria", &task.id, "👍").unwrap();
        assert_eq!(first.id, 0);
        assert_eq!(first.text, "on it");
        assert_eq!(reaction.id, 1);
        assert!(reaction.is_reaction);

        assert!(matches!(
            board.add_reaction("maria", &task.id, "🎉"),
            Err(BoardError::Validation(_))
        ));
        assert!(matches!(
            board.add_comment("maria", "task_x", "hello"),
            Err(BoardError::NotFound(_))
        ));

        let details = board.task_details(&task.id).unwrap();
        assert_eq!(details.comment_count, 2);
        assert_eq!(details.column, Column::Todo);
    }

    #[test]
    fn test_comments_reach_inactive_projects() {
        let maria = user("maria", Role::Member);
        let (mut board, first) = board_with_project(&maria);
        let task = board.add_task(&maria, "Fix bug").unwrap();
        let second = board.create_project(&maria, "Backlog").unwrap();
        board.select_project(&second.id);

        board.add_comment("maria", &task.id, "still here").unwrap();
        assert_eq!(board.comments(&task.id).unwrap().len(), 1);

        board.select_project(&first.id);
        assert_eq!(board.export_project().unwrap().comments[&task.id].len(), 1);
    }
}
