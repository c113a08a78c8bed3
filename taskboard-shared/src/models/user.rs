/// User model, roles and avatar helpers
///
/// Users are seeded at startup and live for the lifetime of the process.
/// The only mutable account fields are the password hash and the custom
/// avatar reference.
///
/// # Roles
///
/// - **admin**: edits any task, manages projects
/// - **member**: manages projects, edits own tasks
/// - **guest**: read-only
///
/// # Example
///
/// ```
/// use taskboard_shared::models::user::{CreateUser, Role, User};
///
/// let user = User::new(CreateUser {
///     username: "maria".to_string(),
///     email: "maria@example.com".to_string(),
///     role: Role::Member,
///     password_hash: "$argon2id$...".to_string(),
/// });
///
/// assert_eq!(user.initials(), "MA");
/// assert!(user.avatar().reference.is_none());
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::stable_hash;

/// Palette used for generated avatars
pub const AVATAR_COLORS: [&str; 12] = [
    "#FF6B6B", "#4ECDC4", "#45B7D1", "#96CEB4", "#FECA57", "#FF9FF3", "#54A0FF", "#5F27CD",
    "#00D2D3", "#FF9F43", "#EE5A24", "#0984E3",
];

/// Board roles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full control over tasks and projects
    Admin,

    /// Can create projects and manage own tasks
    Member,

    /// Read-only access
    Guest,
}

impl Role {
    /// Converts role to its wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Member => "member",
            Role::Guest => "guest",
        }
    }

    /// Human-readable name for the dashboard
    pub fn display_name(&self) -> &'static str {
        match self {
            Role::Admin => "Administrator",
            Role::Member => "Member",
            Role::Guest => "Guest",
        }
    }

    /// Numeric level for hierarchy comparisons
    ///
    /// Hierarchy: Admin > Member > Guest
    pub(crate) fn permission_level(&self) -> u8 {
        match self {
            Role::Admin => 3,
            Role::Member => 2,
            Role::Guest => 1,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "member" => Ok(Role::Member),
            "guest" => Ok(Role::Guest),
            other => Err(format!("Unknown role: {}", other)),
        }
    }
}

/// A board user account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique username, also the login name
    pub username: String,

    /// Contact email
    pub email: String,

    /// Board role
    pub role: Role,

    /// Argon2id password hash
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Reference to a custom avatar held by the upload collaborator
    pub avatar_ref: Option<String>,

    /// When the account was seeded
    pub created_at: DateTime<Utc>,

    /// Last successful login
    pub last_login_at: Option<DateTime<Utc>>,
}

/// Input for creating a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    pub username: String,
    pub email: String,
    pub role: Role,

    /// Argon2id password hash (NOT plaintext password!)
    pub password_hash: String,
}

/// Avatar information returned to the request layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Avatar {
    /// Whether the user uploaded a custom avatar
    pub has_custom: bool,

    /// Collaborator reference for the custom avatar, if any
    pub reference: Option<String>,

    /// Generated initials used when no custom avatar exists
    pub initials: String,

    /// Generated background color
    pub color: String,
}

impl User {
    pub fn new(data: CreateUser) -> Self {
        Self {
            username: data.username,
            email: data.email,
            role: data.role,
            password_hash: data.password_hash,
            avatar_ref: None,
            created_at: Utc::now(),
            last_login_at: None,
        }
    }

    pub fn initials(&self) -> String {
        user_initials(&self.username)
    }

    pub fn avatar_color(&self) -> &'static str {
        avatar_color(&self.username)
    }

    pub fn avatar(&self) -> Avatar {
        Avatar {
            has_custom: self.avatar_ref.is_some(),
            reference: self.avatar_ref.clone(),
            initials: self.initials(),
            color: self.avatar_color().to_string(),
        }
    }
}

/// Builds up to two uppercase initials from a username
///
/// Separators `_`, `.`, `-` and whitespace split the name into parts. With two
/// or more parts the first letter of the first two is used, otherwise the first
/// two characters of the name.
pub fn user_initials(username: &str) -> String {
    if username.is_empty() {
        return "?".to_string();
    }

    let parts: Vec<&str> = username
        .split(|c: char| c == '_' || c == '.' || c == '-' || c.is_whitespace())
        .filter(|p| !p.is_empty())
        .collect();

    if parts.len() >= 2 {
        parts[..2]
            .iter()
            .filter_map(|p| p.chars().next())
            .flat_map(char::to_uppercase)
            .collect()
    } else {
        username.chars().take(2).flat_map(char::to_uppercase).collect()
    }
}

/// Picks a palette color from a stable hash of the username
pub fn avatar_color(username: &str) -> &'static str {
    let index = (stable_hash(username) % AVATAR_COLORS.len() as u64) as usize;
    AVATAR_COLORS[index]
}
