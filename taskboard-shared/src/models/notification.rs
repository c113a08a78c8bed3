/// Bounded per-user notification log
///
/// The log keeps at most [`MAX_NOTIFICATIONS`] entries. Appending past the cap
/// evicts the oldest entries first. Ids are sequential per user and never
/// reused, even after eviction.
///
/// # Example
///
/// ```
/// use taskboard_shared::models::notification::{NotificationKind, NotificationLog};
///
/// let mut log = NotificationLog::default();
/// let id = log.append("Project created", NotificationKind::Success).id;
/// assert_eq!(log.unread_count(), 1);
///
/// log.mark_read(id);
/// assert_eq!(log.unread_count(), 0);
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Maximum number of notifications retained per user
pub const MAX_NOTIFICATIONS: usize = 50;

/// Notification severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Info,
    Success,
    Warning,
    Error,
}

/// A single notification entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: u64,
    pub message: String,

    #[serde(rename = "type")]
    pub kind: NotificationKind,

    pub timestamp: DateTime<Utc>,
    pub read: bool,
}

/// FIFO-bounded notification log
#[derive(Debug, Clone, Default)]
pub struct NotificationLog {
    entries: VecDeque<Notification>,
    next_id: u64,
}

impl NotificationLog {
    /// Appends an unread entry, evicting the oldest ones beyond the cap
    pub fn append(&mut self, message: impl Into<String>, kind: NotificationKind) -> &Notification {
        let notification = Notification {
            id: self.next_id,
            message: message.into(),
            kind,
            timestamp: Utc::now(),
            read: false,
        };
        self.next_id += 1;
        self.entries.push_back(notification);

        while self.entries.len() > MAX_NOTIFICATIONS {
            self.entries.pop_front();
        }

        &self.entries[self.entries.len() - 1]
    }

    /// Marks one entry read; returns false if the id is not in the log
    pub fn mark_read(&mut self, id: u64) -> bool {
        match self.entries.iter_mut().find(|n| n.id == id) {
            Some(n) => {
                n.read = true;
                true
            }
            None => false,
        }
    }

    /// Marks every entry read and returns how many changed
    pub fn mark_all_read(&mut self) -> usize {
        let mut changed = 0;
        for n in self.entries.iter_mut().filter(|n| !n.read) {
            n.read = true;
            changed += 1;
        }
        changed
    }

    pub fn unread_count(&self) -> usize {
        self.entries.iter().filter(|n| !n.read).count()
    }

    /// Entries, newest first
    pub fn list(&self) -> Vec<Notification> {
        self.entries.iter().rev().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sixty_appends_keep_latest_fifty() {
        let mut log = NotificationLog::default();
        for i in 0..60 {
            log.append(format!("event {}", i), NotificationKind::Info);
            assert!(log.len() <= MAX_NOTIFICATIONS);
        }

        assert_eq!(log.len(), 50);
        let list = log.list();
        assert_eq!(list.first().unwrap().message, "event 59");
        assert_eq!(list.last().unwrap().message, "event 10");
    }

    #[test]
    fn test_mark_read_unknown_id_is_noop() {
        let mut log = NotificationLog::default();
        log.append("hello", NotificationKind::Info);
        assert!(!log.mark_read(42));
        assert_eq!(log.unread_count(), 1);
    }

    #[test]
    fn test_evicted_ids_are_not_reused() {
        let mut log = NotificationLog::default();
        for _ in 0..55 {
            log.append("x", NotificationKind::Warning);
        }
        // ids 0..=4 were evicted
        assert!(!log.mark_read(0));
        assert!(log.mark_read(5));
        assert_eq!(log.append("y", NotificationKind::Error).id, 55);
    }

    #[test]
    fn test_mark_all_read() {
        let mut log = NotificationLog::default();
        log.append("a", NotificationKind::Info);
        log.append("b", NotificationKind::Success);
        log.mark_read(0);

        assert_eq!(log.mark_all_read(), 1);
        assert_eq!(log.unread_count(), 0);
    }

    #[test]
    fn test_kind_serializes_as_type() {
        let mut log = NotificationLog::default();
        let n = log.append("done", NotificationKind::Success).clone();
        let json = serde_json::to_value(&n).unwrap();
        assert_eq!(json["type"], "success");
        assert_eq!(json["read"], false);
    }
}
