/// Project model
///
/// A project is owned by exactly one user and is never shared or deleted.
/// Its id is derived from the owner's project count and a stable hash of the
/// name, so ids are reproducible across runs:
///
/// ```text
/// proj_{count}_{stable_hash(name) % 10000}
/// ```
///
/// # Example
///
/// ```
/// use taskboard_shared::models::project::Project;
///
/// let project = Project::new("maria", 0, "Sprint1");
/// assert!(project.id.starts_with("proj_0_"));
/// assert_eq!(project.name, "Sprint1");
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::stable_hash;
use super::user::AVATAR_COLORS;

/// A board project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Unique id within the owner's projects
    pub id: String,

    /// Display name (trimmed, never empty)
    pub name: String,

    /// Optional free-form description
    pub description: Option<String>,

    /// Hex color used in the sidebar
    pub color: String,

    /// Owning user
    pub owner: String,

    /// When the project was created
    pub created_at: DateTime<Utc>,
}

/// Partial update applied to a project's settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProject {
    /// New name (trimmed, must not be empty)
    pub name: Option<String>,

    /// New description (empty string clears it)
    pub description: Option<String>,

    /// New color in `#RRGGBB` form
    pub color: Option<String>,
}

impl Project {
    /// Creates a project; `existing` is the owner's project count before insertion
    pub fn new(owner: &str, existing: usize, name: &str) -> Self {
        let id = format!("proj_{}_{}", existing, stable_hash(name) % 10_000);
        let color = AVATAR_COLORS[(stable_hash(&id) % AVATAR_COLORS.len() as u64) as usize];

        Self {
            id,
            name: name.to_string(),
            description: None,
            color: color.to_string(),
            owner: owner.to_string(),
            created_at: Utc::now(),
        }
    }
}

/// Checks a `#RRGGBB` color string
pub fn is_hex_color(value: &str) -> bool {
    value.len() == 7
        && value.starts_with('#')
        && value[1..].chars().all(|c| c.is_ascii_hexdigit())
}
