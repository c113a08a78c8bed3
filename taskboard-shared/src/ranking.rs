/// Ranking aggregator
///
/// Rankings are derived on demand from live statistics and never stored. The
/// leaderboard sorts by monthly score, highest first. The sort is stable, so
/// users with equal scores keep the order in which they were passed in (the
/// store passes them in registration order).
///
/// ```text
/// weekly_completed = min(completed_tasks, 20)
/// monthly_score    = completed_tasks * 10 + total_projects * 50
/// ```

use serde::{Deserialize, Serialize};

use crate::stats::UserStats;

/// Number of entries on the leaderboard
pub const RANKING_LIMIT: usize = 10;

/// Display cap for the weekly completed count
pub const WEEKLY_COMPLETED_CAP: usize = 20;

/// A user's position on the leaderboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingRecord {
    pub username: String,
    pub weekly_completed: usize,
    pub monthly_score: u64,

    /// 1-based leaderboard position; 0 until ranked
    pub rank: usize,
}

/// Computes the unranked record for one user
pub fn compute_ranking(username: &str, stats: &UserStats) -> RankingRecord {
    RankingRecord {
        username: username.to_string(),
        weekly_completed: stats.completed_tasks.min(WEEKLY_COMPLETED_CAP),
        monthly_score: stats.completed_tasks as u64 * 10 + stats.total_projects as u64 * 50,
        rank: 0,
    }
}

/// Sorts every record by monthly score and assigns ranks
pub fn rank_all(mut records: Vec<RankingRecord>) -> Vec<RankingRecord> {
    // sort_by is stable
    records.sort_by(|a, b| b.monthly_score.cmp(&a.monthly_score));
    for (i, record) in records.iter_mut().enumerate() {
        record.rank = i + 1;
    }
    records
}

/// Sorts records into the leaderboard and keeps the top entries
pub fn global_rankings(records: Vec<RankingRecord>) -> Vec<RankingRecord> {
    let mut ranked = rank_all(records);
    ranked.truncate(RANKING_LIMIT);
    ranked
}
