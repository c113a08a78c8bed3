/// Process-wide board state
///
/// The [`Store`] owns one [`UserState`] per registered user and wires the
/// board, the gamification engine and the notification log together: every
/// board mutation awards its points, re-evaluates achievements and records
/// notifications while holding that user's lock.
///
/// # Locking
///
/// ```text
/// Store
///  └─ RwLock<Directory>            registration order + username → Arc<Mutex<UserState>>
///      └─ Mutex<UserState>         one per user, serializes that user's mutations
/// ```
///
/// Operations clone the user's `Arc` and release the directory lock before
/// locking the user. Only the ranking snapshot holds more than one user lock;
/// it acquires them in registration order and releases them together.
///
/// # Example
///
/// ```
/// use taskboard_shared::models::task::Column;
/// use taskboard_shared::models::user::{CreateUser, Role};
/// use taskboard_shared::store::Store;
///
/// # async fn example() -> Result<(), taskboard_shared::error::BoardError> {
/// let store = Store::new();
/// store
///     .add_user(CreateUser {
///         username: "maria".to_string(),
///         email: "maria@example.com".to_string(),
///         role: Role::Member,
///         password_hash: "hash".to_string(),
///     })
///     .await?;
///
/// store.create_project("maria", "Sprint1").await?;
/// let task = store.add_task("maria", "Fix bug").await?;
/// store.move_task("maria", &task.id, Column::Todo, Column::Done).await?;
///
/// let dashboard = store.dashboard("maria").await?;
/// assert_eq!(dashboard.points, 80);
/// assert_eq!(dashboard.level, 1);
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};

use crate::auth::authorization::{can_edit_tasks, can_manage_projects};
use crate::auth::password::{hash_password, validate_new_password, verify_password};
use crate::board::{Board, ProjectExport, TaskDetails};
use crate::error::{BoardError, BoardResult};
use crate::gamification::{Achievement, PointsEvent, PointsRecord};
use crate::models::comment::Comment;
use crate::models::notification::{Notification, NotificationKind, NotificationLog};
use crate::models::project::{Project, UpdateProject};
use crate::models::settings::{UpdateSettings, UserSettings};
use crate::models::task::{Column, Task, TaskColumns};
use crate::models::user::{Avatar, CreateUser, Role, User};
use crate::ranking::{compute_ranking, global_rankings, rank_all, RankingRecord};
use crate::stats::{ActivityReport, Period, UserStats};

/// Everything the store keeps for one user
#[derive(Debug)]
pub struct UserState {
    pub user: User,
    pub board: Board,
    pub points: PointsRecord,
    pub notifications: NotificationLog,
    pub settings: UserSettings,
}

impl UserState {
    fn new(user: User) -> Self {
        Self {
            user,
            board: Board::default(),
            points: PointsRecord::default(),
            notifications: NotificationLog::default(),
            settings: UserSettings::default(),
        }
    }

    /// Appends a notification unless the user turned them off
    fn notify(&mut self, message: impl Into<String>, kind: NotificationKind) {
        if self.settings.notifications_enabled {
            self.notifications.append(message, kind);
        }
    }

    /// Awards points for an event, then re-checks achievements
    fn reward(&mut self, event: PointsEvent, now: DateTime<Utc>) {
        let award = self.points.award_points(event);
        tracing::debug!(
            username = %self.user.username,
            reason = event.reason(),
            awarded = award.awarded,
            total = award.points,
            "Points awarded"
        );

        if award.leveled_up {
            tracing::info!(username = %self.user.username, level = award.level, "Level up");
            self.notify(
                format!("Level up! You reached level {}", award.level),
                NotificationKind::Success,
            );
        }

        self.check_achievements(now);
    }

    fn check_achievements(&mut self, now: DateTime<Utc>) {
        let stats = self.board.stats();
        for achievement in self.points.evaluate_achievements(&stats, now) {
            tracing::info!(
                username = %self.user.username,
                achievement = achievement.id.as_str(),
                "Achievement unlocked"
            );
            self.notify(
                format!("Achievement unlocked: {} {}", achievement.icon, achievement.name),
                NotificationKind::Success,
            );
        }
    }
}

/// What a user may do, as shown on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permissions {
    pub can_edit_tasks: bool,
    pub can_manage_projects: bool,
}

/// Dashboard snapshot for one user
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub user: User,
    pub role: Role,
    pub role_display: String,
    pub permissions: Permissions,
    pub avatar: Avatar,

    pub projects: Vec<Project>,
    pub active_project: Option<Project>,

    /// Columns of the active project
    pub tasks: Option<TaskColumns>,

    pub stats: UserStats,
    pub points: u64,
    pub level: u64,
    pub achievements: Vec<Achievement>,

    pub unread_notifications: usize,
    pub settings: UserSettings,
}

/// Notification list with the unread count
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationSummary {
    /// Newest first
    pub notifications: Vec<Notification>,
    pub unread_count: usize,
}

/// Leaderboard plus the caller's own position
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rankings {
    pub rankings: Vec<RankingRecord>,
    pub current_user: Option<RankingRecord>,
}

#[derive(Debug, Default)]
struct Directory {
    order: Vec<String>,
    users: HashMap<String, Arc<Mutex<UserState>>>,
}

/// In-memory state shared by all requests
#[derive(Debug, Default)]
pub struct Store {
    directory: RwLock<Directory>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a user
    ///
    /// # Errors
    ///
    /// `Validation` if the username is blank or already taken.
    pub async fn add_user(&self, data: CreateUser) -> BoardResult<User> {
        let username = data.username.trim().to_string();
        if username.is_empty() {
            return Err(BoardError::validation("Username cannot be empty"));
        }

        let mut directory = self.directory.write().await;
        if directory.users.contains_key(&username) {
            return Err(BoardError::validation(format!(
                "User {} already exists",
                username
            )));
        }

        let user = User::new(CreateUser { username, ..data });
        directory.order.push(user.username.clone());
        directory.users.insert(
            user.username.clone(),
            Arc::new(Mutex::new(UserState::new(user.clone()))),
        );

        tracing::info!(username = %user.username, role = %user.role, "User registered");
        Ok(user)
    }

    pub async fn user_count(&self) -> usize {
        self.directory.read().await.order.len()
    }

    pub async fn user(&self, username: &str) -> BoardResult<User> {
        Ok(self.lock(username).await?.user.clone())
    }

    /// Checks a username/password pair
    ///
    /// Returns `None` for an unknown user or a wrong password so callers can
    /// answer both the same way. Passwords are compared trimmed, as they are
    /// stored.
    pub async fn authenticate(&self, username: &str, password: &str) -> BoardResult<Option<User>> {
        let Ok(handle) = self.handle(username).await else {
            tracing::debug!(username = %username, "Login for unknown user");
            return Ok(None);
        };

        let hash = handle.lock().await.user.password_hash.clone();
        if !verify_password(password.trim(), &hash)? {
            tracing::debug!(username = %username, "Login with wrong password");
            return Ok(None);
        }

        let mut state = handle.lock().await;
        state.user.last_login_at = Some(Utc::now());
        Ok(Some(state.user.clone()))
    }

    /// Replaces a user's password after verifying the current one
    ///
    /// The new password is stored trimmed, so its checked length is the
    /// length that gets hashed.
    pub async fn change_password(
        &self,
        username: &str,
        current: &str,
        new_password: &str,
    ) -> BoardResult<()> {
        validate_new_password(new_password).map_err(BoardError::Validation)?;

        let handle = self.handle(username).await?;
        let hash = handle.lock().await.user.password_hash.clone();
        if !verify_password(current.trim(), &hash)? {
            return Err(BoardError::validation("Current password is incorrect"));
        }

        let new_hash = hash_password(new_password.trim())?;
        let mut state = handle.lock().await;
        state.user.password_hash = new_hash;
        state.notify("Password changed", NotificationKind::Info);

        tracing::info!(username = %username, "Password changed");
        Ok(())
    }

    pub async fn create_project(&self, username: &str, name: &str) -> BoardResult<Project> {
        let mut state = self.lock(username).await?;
        let UserState { user, board, .. } = &mut *state;
        let project = board.create_project(user, name)?;

        state.notify(
            format!("Project \"{}\" created", project.name),
            NotificationKind::Success,
        );
        state.reward(PointsEvent::ProjectCreated, Utc::now());

        tracing::info!(username = %username, project_id = %project.id, "Project created");
        Ok(project)
    }

    /// Selects the active project; unknown ids are ignored
    pub async fn select_project(&self, username: &str, project_id: &str) -> BoardResult<bool> {
        let mut state = self.lock(username).await?;
        let changed = state.board.select_project(project_id);
        if changed {
            tracing::debug!(username = %username, project_id = %project_id, "Project selected");
        }
        Ok(changed)
    }

    pub async fn active_project(&self, username: &str) -> BoardResult<Option<Project>> {
        Ok(self.lock(username).await?.board.active_project().cloned())
    }

    pub async fn update_project(&self, username: &str, patch: UpdateProject) -> BoardResult<Project> {
        let mut state = self.lock(username).await?;
        let UserState { user, board, .. } = &mut *state;
        let project = board.update_project(user, patch)?;

        state.notify("Project settings updated", NotificationKind::Info);
        tracing::info!(username = %username, project_id = %project.id, "Project updated");
        Ok(project)
    }

    pub async fn add_task(&self, username: &str, text: &str) -> BoardResult<Task> {
        let mut state = self.lock(username).await?;
        let UserState { user, board, .. } = &mut *state;
        let task = board.add_task(user, text)?;

        state.notify(format!("Task \"{}\" created", task.text), NotificationKind::Info);
        state.reward(PointsEvent::TaskCreated, Utc::now());

        tracing::info!(username = %username, task_id = %task.id, "Task created");
        Ok(task)
    }

    pub async fn move_task(
        &self,
        username: &str,
        task_id: &str,
        from: Column,
        to: Column,
    ) -> BoardResult<Task> {
        let mut state = self.lock(username).await?;
        let UserState { user, board, .. } = &mut *state;
        let task = board.move_task(user, task_id, from, to)?;

        let now = Utc::now();
        if to.is_done() {
            state.notify(format!("Task \"{}\" completed", task.text), NotificationKind::Success);
            state.reward(PointsEvent::TaskCompleted, now);
        } else {
            state.check_achievements(now);
        }

        tracing::info!(
            username = %username,
            task_id = %task.id,
            from = %from,
            to = %to,
            "Task moved"
        );
        Ok(task)
    }

    pub async fn task_details(&self, username: &str, task_id: &str) -> BoardResult<TaskDetails> {
        self.lock(username).await?.board.task_details(task_id)
    }

    pub async fn export_project(&self, username: &str) -> BoardResult<ProjectExport> {
        let export = self.lock(username).await?.board.export_project()?;
        tracing::info!(username = %username, project_id = %export.project.id, "Project exported");
        Ok(export)
    }

    pub async fn add_comment(&self, username: &str, task_id: &str, text: &str) -> BoardResult<Comment> {
        let mut state = self.lock(username).await?;
        let comment = state.board.add_comment(username, task_id, text)?;
        state.reward(PointsEvent::CommentAdded, Utc::now());

        tracing::info!(username = %username, task_id = %task_id, comment_id = comment.id, "Comment added");
        Ok(comment)
    }

    /// Adds an emoji reaction; reactions award no points
    pub async fn add_reaction(&self, username: &str, task_id: &str, emoji: &str) -> BoardResult<Comment> {
        let mut state = self.lock(username).await?;
        let reaction = state.board.add_reaction(username, task_id, emoji)?;

        tracing::debug!(username = %username, task_id = %task_id, "Reaction added");
        Ok(reaction)
    }

    pub async fn comments(&self, username: &str, task_id: &str) -> BoardResult<Vec<Comment>> {
        self.lock(username).await?.board.comments(task_id)
    }

    pub async fn dashboard(&self, username: &str) -> BoardResult<Dashboard> {
        let mut state = self.lock(username).await?;

        state.check_achievements(Utc::now());

        let user = state.user.clone();
        Ok(Dashboard {
            role: user.role,
            role_display: user.role.display_name().to_string(),
            permissions: Permissions {
                can_edit_tasks: can_edit_tasks(Some(&user), None),
                can_manage_projects: can_manage_projects(Some(&user)),
            },
            avatar: user.avatar(),
            projects: state.board.projects().cloned().collect(),
            active_project: state.board.active_project().cloned(),
            tasks: state.board.active_columns().cloned(),
            stats: state.board.stats(),
            points: state.points.points(),
            level: state.points.level(),
            achievements: state.points.achievements().to_vec(),
            unread_notifications: state.notifications.unread_count(),
            settings: state.settings.clone(),
            user,
        })
    }

    /// Global leaderboard and the caller's own record
    ///
    /// Computed from a snapshot taken with every user lock held, so all
    /// records reflect the same instant.
    pub async fn rankings(&self, username: &str) -> BoardResult<Rankings> {
        let records = self.ranking_snapshot().await;
        let ranked = rank_all(records);

        let current_user = ranked.iter().find(|r| r.username == username).cloned();
        if current_user.is_none() {
            return Err(BoardError::UnknownUser(username.to_string()));
        }

        Ok(Rankings {
            rankings: global_rankings(ranked),
            current_user,
        })
    }

    /// Top entries of the leaderboard
    pub async fn leaderboard(&self) -> Vec<RankingRecord> {
        global_rankings(self.ranking_snapshot().await)
    }

    pub async fn activity(&self, username: &str, period: Period) -> BoardResult<ActivityReport> {
        let state = self.lock(username).await?;
        Ok(ActivityReport::build(state.board.tasks(), period, Utc::now()))
    }

    pub async fn notifications(&self, username: &str) -> BoardResult<NotificationSummary> {
        let state = self.lock(username).await?;
        Ok(NotificationSummary {
            notifications: state.notifications.list(),
            unread_count: state.notifications.unread_count(),
        })
    }

    /// Appends a notification for a user
    pub async fn notify(
        &self,
        username: &str,
        message: impl Into<String>,
        kind: NotificationKind,
    ) -> BoardResult<()> {
        self.lock(username).await?.notify(message, kind);
        Ok(())
    }

    /// Marks one notification read; unknown ids are ignored
    pub async fn mark_notification_read(&self, username: &str, id: u64) -> BoardResult<bool> {
        Ok(self.lock(username).await?.notifications.mark_read(id))
    }

    pub async fn mark_all_notifications_read(&self, username: &str) -> BoardResult<usize> {
        Ok(self.lock(username).await?.notifications.mark_all_read())
    }

    pub async fn settings(&self, username: &str) -> BoardResult<UserSettings> {
        Ok(self.lock(username).await?.settings.clone())
    }

    pub async fn update_settings(
        &self,
        username: &str,
        patch: UpdateSettings,
    ) -> BoardResult<UserSettings> {
        let mut state = self.lock(username).await?;
        state.settings.apply(patch).map_err(BoardError::Validation)?;

        tracing::debug!(username = %username, "Settings updated");
        Ok(state.settings.clone())
    }

    pub async fn avatar(&self, username: &str) -> BoardResult<Avatar> {
        Ok(self.lock(username).await?.user.avatar())
    }

    /// Sets or clears the custom avatar reference
    pub async fn set_avatar(&self, username: &str, reference: Option<String>) -> BoardResult<Avatar> {
        let reference = reference
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty());

        let mut state = self.lock(username).await?;
        let message = if reference.is_some() {
            "Avatar updated"
        } else {
            "Avatar removed"
        };
        state.user.avatar_ref = reference;
        state.notify(message, NotificationKind::Info);

        Ok(state.user.avatar())
    }

    async fn handle(&self, username: &str) -> BoardResult<Arc<Mutex<UserState>>> {
        self.directory
            .read()
            .await
            .users
            .get(username)
            .cloned()
            .ok_or_else(|| BoardError::UnknownUser(username.to_string()))
    }

    async fn lock(&self, username: &str) -> BoardResult<OwnedMutexGuard<UserState>> {
        Ok(self.handle(username).await?.lock_owned().await)
    }

    /// Unranked records for every user in registration order
    async fn ranking_snapshot(&self) -> Vec<RankingRecord> {
        let handles: Vec<Arc<Mutex<UserState>>> = {
            let directory = self.directory.read().await;
            directory
                .order
                .iter()
                .filter_map(|name| directory.users.get(name).cloned())
                .collect()
        };

        let mut guards = Vec::with_capacity(handles.len());
        for handle in handles {
            guards.push(handle.lock_owned().await);
        }

        guards
            .iter()
            .map(|state| compute_ranking(&state.user.username, &state.board.stats()))
            .collect()
    }
}
