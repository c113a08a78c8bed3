/// Role resolution and permission checks
///
/// Permissions are an explicit table over the closed [`Role`] enum. Every check
/// takes an `Option<&User>` so that an unknown user resolves to guest-level
/// access (everything denied except viewing).
///
/// # Permission Model
///
/// | permission       | admin | member | guest |
/// |------------------|:-----:|:------:|:-----:|
/// | `View`           |   ✓   |   ✓    |   ✓   |
/// | `EditOwnTasks`   |   ✓   |   ✓    |       |
/// | `EditAnyTask`    |   ✓   |        |       |
/// | `ManageProjects` |   ✓   |   ✓    |       |
///
/// # Example
///
/// ```
/// use taskboard_shared::auth::authorization::{can_edit_tasks, can_manage_projects};
/// use taskboard_shared::models::user::{CreateUser, Role, User};
///
/// let maria = User::new(CreateUser {
///     username: "maria".into(),
///     email: "maria@example.com".into(),
///     role: Role::Member,
///     password_hash: String::new(),
/// });
///
/// assert!(can_manage_projects(Some(&maria)));
/// assert!(can_edit_tasks(Some(&maria), None));
/// assert!(can_edit_tasks(Some(&maria), Some("maria")));
/// assert!(!can_edit_tasks(Some(&maria), Some("admin")));
/// assert!(!can_manage_projects(None));
/// ```

use crate::error::BoardError;
use crate::models::user::{Role, User};

/// Actions guarded by role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    /// Read boards, rankings and notifications
    View,

    /// Create, move and edit tasks the user owns (or unowned ones)
    EditOwnTasks,

    /// Edit tasks owned by anybody
    EditAnyTask,

    /// Create projects and change project settings
    ManageProjects,
}

impl Permission {
    /// Gets the minimum role required for this permission
    pub fn min_role(&self) -> Role {
        match self {
            Permission::View => Role::Guest,
            Permission::EditOwnTasks => Role::Member,
            Permission::EditAnyTask => Role::Admin,
            Permission::ManageProjects => Role::Member,
        }
    }
}

impl Role {
    /// Checks the permission table
    pub fn allows(&self, permission: Permission) -> bool {
        self.permission_level() >= permission.min_role().permission_level()
    }
}

/// Resolves a user's role; unknown users resolve to `Guest`
pub fn role_of(user: Option<&User>) -> Role {
    user.map(|u| u.role).unwrap_or(Role::Guest)
}

/// Checks whether `user` may edit a task owned by `task_owner`
///
/// With no owner given, members are allowed. Unknown users are always denied.
pub fn can_edit_tasks(user: Option<&User>, task_owner: Option<&str>) -> bool {
    let Some(user) = user else {
        return false;
    };

    if user.role.allows(Permission::EditAnyTask) {
        return true;
    }

    user.role.allows(Permission::EditOwnTasks)
        && task_owner.map_or(true, |owner| owner == user.username)
}

/// Checks whether `user` may create and configure projects
pub fn can_manage_projects(user: Option<&User>) -> bool {
    user.is_some_and(|u| u.role.allows(Permission::ManageProjects))
}

/// Like [`can_edit_tasks`] but returns a `Permission` error when denied
pub fn require_task_edit(
    user: Option<&User>,
    task_owner: Option<&str>,
    action: &str,
) -> Result<(), BoardError> {
    if can_edit_tasks(user, task_owner) {
        Ok(())
    } else {
        Err(BoardError::permission(format!(
            "You do not have permission to {}",
            action
        )))
    }
}

/// Like [`can_manage_projects`] but returns a `Permission` error when denied
pub fn require_project_management(user: Option<&User>, action: &str) -> Result<(), BoardError> {
    if can_manage_projects(user) {
        Ok(())
    } else {
        Err(BoardError::permission(format!(
            "You do not have permission to {}",
            action
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::CreateUser;

    fn user(name: &str, role: Role) -> User {
        User::new(CreateUser {
            username: name.to_string(),
            email: format!("{}@example.com", name),
            role,
            password_hash: "test_hash".to_string(),
        })
    }

    #[test]
    fn test_permission_table() {
        assert!(Role::Admin.allows(Permission::EditAnyTask));
        assert!(Role::Admin.allows(Permission::ManageProjects));
        assert!(Role::Member.allows(Permission::EditOwnTasks));
        assert!(Role::Member.allows(Permission::ManageProjects));
        assert!(!Role::Member.allows(Permission::EditAnyTask));
        assert!(Role::Guest.allows(Permission::View));
        assert!(!Role::Guest.allows(Permission::EditOwnTasks));
        assert!(!Role::Guest.allows(Permission::ManageProjects));
    }

    #[test]
    fn test_admin_edits_anything() {
        let admin = user("admin", Role::Admin);
        assert!(can_edit_tasks(Some(&admin), None));
        assert!(can_edit_tasks(Some(&admin), Some("maria")));
        assert!(can_manage_projects(Some(&admin)));
    }

    #[test]
    fn test_member_edits_own_tasks_only() {
        let maria = user("maria", Role::Member);
        assert!(can_edit_tasks(Some(&maria), None));
        assert!(can_edit_tasks(Some(&maria), Some("maria")));
        assert!(!can_edit_tasks(Some(&maria), Some("juan")));
    }

    #[test]
    fn test_guest_denied() {
        let juan = user("juan", Role::Guest);
        assert!(!can_edit_tasks(Some(&juan), None));
        assert!(!can_edit_tasks(Some(&juan), Some("juan")));
        assert!(!can_manage_projects(Some(&juan)));
    }

    #[test]
    fn test_unknown_user_is_guest_equivalent() {
        assert_eq!(role_of(None), Role::Guest);
        assert!(!can_edit_tasks(None, None));
        assert!(!can_manage_projects(None));
    }

    #[test]
    fn test_require_helpers() {
        let juan = user("juan", Role::Guest);
        let err = require_task_edit(Some(&juan), None, "add tasks").unwrap_err();
        assert!(matches!(err, BoardError::Permission(_)));
        assert!(err.to_string().contains("add tasks"));

        let maria = user("maria", Role::Member);
        assert!(require_project_management(Some(&maria), "create projects").is_ok());
    }
}
