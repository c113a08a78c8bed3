/// Task comments and emoji reactions
///
/// Comments are append-only per task. Ids are the position in the task's
/// comment list, starting at 0. A reaction is a comment whose text is the
/// emoji itself and whose `is_reaction` flag is set.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::user::{avatar_color, user_initials};

/// Emojis accepted as task reactions
pub const REACTION_EMOJIS: [&str; 3] = ["👍", "🟢", "🔴"];

/// A comment or reaction on a task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    /// Sequential id within the task
    pub id: u64,

    pub text: String,

    pub author: String,
    pub author_initials: String,
    pub author_color: String,

    pub timestamp: DateTime<Utc>,

    /// Set for emoji reactions
    #[serde(default)]
    pub is_reaction: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
}

impl Comment {
    pub fn new(id: u64, author: &str, text: &str) -> Self {
        Self {
            id,
            text: text.to_string(),
            author: author.to_string(),
            author_initials: user_initials(author),
            author_color: avatar_color(author).to_string(),
            timestamp: Utc::now(),
            is_reaction: false,
            emoji: None,
        }
    }

    pub fn reaction(id: u64, author: &str, emoji: &str) -> Self {
        Self {
            is_reaction: true,
            emoji: Some(emoji.to_string()),
            ..Self::new(id, author, emoji)
        }
    }
}

pub fn is_reaction_emoji(emoji: &str) -> bool {
    REACTION_EMOJIS.contains(&emoji)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comment_carries_author_avatar() {
        let c = Comment::new(0, "juan_perez", "Looks good");
        assert_eq!(c.author_initials, "JP");
        assert_eq!(c.author_color, avatar_color("juan_perez"));
        assert!(!c.is_reaction);
    }

    #[test]
    fn test_reaction() {
        let r = Comment::reaction(3, "maria", "👍");
        assert_eq!(r.id, 3);
        assert!(r.is_reaction);
        assert_eq!(r.text, "👍");
        assert_eq!(r.emoji.as_deref(), Some("👍"));
        assert!(is_reaction_emoji("🔴"));
        assert!(!is_reaction_emoji("🎉"));
    }
}
