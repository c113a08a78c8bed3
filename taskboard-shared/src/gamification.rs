/// Points, levels and achievements
///
/// Each board action awards a fixed number of points to the acting user.
/// The level is derived from the total (`points / 100 + 1`) and is recomputed
/// after every award. Achievements are one-time badges whose predicates are
/// checked against the user's current statistics.
///
/// # Point table
///
/// | event             | points |
/// |-------------------|-------:|
/// | task created      |     10 |
/// | task completed    |     20 |
/// | comment added     |      5 |
/// | project created   |     50 |
///
/// # Example
///
/// ```
/// use taskboard_shared::gamification::{PointsEvent, PointsRecord};
/// use taskboard_shared::stats::UserStats;
///
/// let mut record = PointsRecord::default();
/// record.award_points(PointsEvent::ProjectCreated);
/// record.award_points(PointsEvent::TaskCompleted);
/// record.award_points(PointsEvent::TaskCompleted);
/// let award = record.award_points(PointsEvent::TaskCompleted);
///
/// assert_eq!(award.points, 110);
/// assert_eq!(award.level, 2);
/// assert!(award.leveled_up);
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::stats::UserStats;

/// Points needed per level
pub const POINTS_PER_LEVEL: u64 = 100;

/// Actions that award points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointsEvent {
    TaskCreated,
    TaskCompleted,
    CommentAdded,
    ProjectCreated,
}

impl PointsEvent {
    pub fn points(&self) -> u64 {
        match self {
            PointsEvent::TaskCreated => 10,
            PointsEvent::TaskCompleted => 20,
            PointsEvent::CommentAdded => 5,
            PointsEvent::ProjectCreated => 50,
        }
    }

    pub fn reason(&self) -> &'static str {
        match self {
            PointsEvent::TaskCreated => "Task created",
            PointsEvent::TaskCompleted => "Task completed",
            PointsEvent::CommentAdded => "Comment added",
            PointsEvent::ProjectCreated => "Project created",
        }
    }
}

/// Derives the level for a point total
pub fn level_for(points: u64) -> u64 {
    points / POINTS_PER_LEVEL + 1
}

/// Achievement catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementId {
    FirstTask,
    TaskMaster,
    ProjectCreator,
    #[serde(rename = "level_5")]
    Level5,
    Productive,
}

impl AchievementId {
    /// Catalog in evaluation order
    pub const ALL: [AchievementId; 5] = [
        AchievementId::FirstTask,
        AchievementId::TaskMaster,
        AchievementId::ProjectCreator,
        AchievementId::Level5,
        AchievementId::Productive,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AchievementId::FirstTask => "first_task",
            AchievementId::TaskMaster => "task_master",
            AchievementId::ProjectCreator => "project_creator",
            AchievementId::Level5 => "level_5",
            AchievementId::Productive => "productive",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AchievementId::FirstTask => "First Task",
            AchievementId::TaskMaster => "Task Master",
            AchievementId::ProjectCreator => "Creator",
            AchievementId::Level5 => "Level 5",
            AchievementId::Productive => "Productive",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            AchievementId::FirstTask => "🎯",
            AchievementId::TaskMaster => "🏆",
            AchievementId::ProjectCreator => "🚀",
            AchievementId::Level5 => "⭐",
            AchievementId::Productive => "💪",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            AchievementId::FirstTask => "Complete your first task",
            AchievementId::TaskMaster => "Complete 10 tasks",
            AchievementId::ProjectCreator => "Create a project",
            AchievementId::Level5 => "Reach level 5",
            AchievementId::Productive => "Keep an 80% completion rate over at least 5 tasks",
        }
    }

    /// Checks the predicate against current state
    pub fn is_met(&self, stats: &UserStats, level: u64) -> bool {
        match self {
            AchievementId::FirstTask => stats.completed_tasks >= 1,
            AchievementId::TaskMaster => stats.completed_tasks >= 10,
            AchievementId::ProjectCreator => stats.total_projects >= 1,
            AchievementId::Level5 => level >= 5,
            AchievementId::Productive => stats.completion_rate >= 80.0 && stats.total_tasks >= 5,
        }
    }
}

/// An earned achievement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Achievement {
    pub id: AchievementId,
    pub name: String,
    pub icon: String,
    pub description: String,
    pub earned_at: DateTime<Utc>,
}

impl Achievement {
    fn earned(id: AchievementId, at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: id.name().to_string(),
            icon: id.icon().to_string(),
            description: id.description().to_string(),
            earned_at: at,
        }
    }
}

/// Result of a points award
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Award {
    pub awarded: u64,
    pub points: u64,
    pub level: u64,
    pub leveled_up: bool,
}

/// A user's points ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointsRecord {
    points: u64,
    level: u64,
    achievements: Vec<Achievement>,
}

impl Default for PointsRecord {
    fn default() -> Self {
        Self {
            points: 0,
            level: 1,
            achievements: Vec::new(),
        }
    }
}

impl PointsRecord {
    pub fn points(&self) -> u64 {
        self.points
    }

    pub fn level(&self) -> u64 {
        self.level
    }

    pub fn achievements(&self) -> &[Achievement] {
        &self.achievements
    }

    pub fn has_achievement(&self, id: AchievementId) -> bool {
        self.achievements.iter().any(|a| a.id == id)
    }

    /// Adds the event's points and recomputes the level
    ///
    /// Points never decrease; the total saturates instead of overflowing.
    pub fn award_points(&mut self, event: PointsEvent) -> Award {
        let awarded = event.points();
        let previous_level = self.level;

        self.points = self.points.saturating_add(awarded);
        self.level = level_for(self.points);

        Award {
            awarded,
            points: self.points,
            level: self.level,
            leveled_up: self.level > previous_level,
        }
    }

    /// Grants every achievement whose predicate now holds and was not granted yet
    ///
    /// Idempotent: calling it again with the same stats grants nothing.
    /// Returns the newly granted achievements.
    pub fn evaluate_achievements(&mut self, stats: &UserStats, now: DateTime<Utc>) -> Vec<Achievement> {
        let mut granted = Vec::new();

        for id in AchievementId::ALL {
            if self.has_achievement(id) || !id.is_met(stats, self.level) {
                continue;
            }
            let achievement = Achievement::earned(id, now);
            self.achievements.push(achievement.clone());
            granted.push(achievement);
        }

        granted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(total: usize, completed: usize, projects: usize) -> UserStats {
        let rate = if total == 0 {
            0.0
        } else {
            ((completed as f64 / total as f64 * 100.0) * 10.0).round() / 10.0
        };
        UserStats {
            total_tasks: total,
            completed_tasks: completed,
            active_tasks: total - completed,
            completion_rate: rate,
            total_projects: projects,
        }
    }

    #[test]
    fn test_level_formula() {
        assert_eq!(level_for(0), 1);
        assert_eq!(level_for(99), 1);
        assert_eq!(level_for(100), 2);
        assert_eq!(level_for(450), 5);
    }

    #[test]
    fn test_level_tracks_points_after_every_award() {
        let mut record = PointsRecord::default();
        let events = [
            PointsEvent::ProjectCreated,
            PointsEvent::TaskCreated,
            PointsEvent::TaskCompleted,
            PointsEvent::CommentAdded,
            PointsEvent::ProjectCreated,
        ];

        let mut last = 0;
        for event in events.iter().cycle().take(40) {
            let award = record.award_points(*event);
            assert!(award.points >= last);
            assert_eq!(award.level, level_for(award.points));
            assert_eq!(record.level(), record.points() / 100 + 1);
            last = award.points;
        }
    }

    #[test]
    fn test_leveled_up_flag() {
        let mut record = PointsRecord::default();
        for _ in 0..9 {
            assert!(!record.award_points(PointsEvent::TaskCreated).leveled_up);
        }
        assert_eq!(record.points(), 90);

        let award = record.award_points(PointsEvent::TaskCreated);
        assert!(award.leveled_up);
        assert_eq!(award.level, 2);
    }

    #[test]
    fn test_level_does_not_truncate_for_large_totals() {
        assert_eq!(level_for(u64::MAX), 184_467_440_737_095_517);
        assert_eq!(level_for(500_000_000_000), 5_000_000_001);
    }

    #[test]
    fn test_achievements_granted_once() {
        let mut record = PointsRecord::default();
        let now = Utc::now();

        let first = record.evaluate_achievements(&stats(1, 1, 1), now);
        let ids: Vec<_> = first.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![AchievementId::FirstTask, AchievementId::ProjectCreator]);

        assert!(record.evaluate_achievements(&stats(1, 1, 1), now).is_empty());
        assert_eq!(record.achievements().len(), 2);
    }

    #[test]
    fn test_achievements_not_revoked() {
        let mut record = PointsRecord::default();
        record.evaluate_achievements(&stats(1, 1, 1), Utc::now());

        // Task moved back out of done: predicate false, badge stays
        record.evaluate_achievements(&stats(1, 0, 1), Utc::now());
        assert!(record.has_achievement(AchievementId::FirstTask));
    }

    #[test]
    fn test_productive_requires_five_tasks() {
        let mut record = PointsRecord::default();
        record.evaluate_achievements(&stats(4, 4, 0), Utc::now());
        assert!(!record.has_achievement(AchievementId::Productive));

        record.evaluate_achievements(&stats(5, 4, 0), Utc::now());
        assert!(record.has_achievement(AchievementId::Productive));
    }

    #[test]
    fn test_level_5_and_task_master() {
        let mut record = PointsRecord::default();
        for _ in 0..8 {
            record.award_points(PointsEvent::ProjectCreated);
        }
        assert_eq!(record.level(), 5);
        let granted = record.evaluate_achievements(&stats(20, 10, 0), Utc::now());
        let ids: Vec<_> = granted.iter().map(|a| a.id).collect();

        assert!(ids.contains(&AchievementId::TaskMaster));
        assert!(ids.contains(&AchievementId::Level5));
        assert!(!ids.contains(&AchievementId::Productive));
    }

    #[test]
    fn test_achievement_id_wire_names() {
        for id in AchievementId::ALL {
            let json = serde_json::to_string(&id).unwrap();
            assert_eq!(json, format!("\"{}\"", id.as_str()));
        }
    }
}
