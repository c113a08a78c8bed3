/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `auth`: Login, logout, password change
/// - `dashboard`: Board overview for the current user
/// - `projects`: Project creation, selection, settings, export
/// - `tasks`: Tasks, moves, comments and reactions
/// - `notifications`: Notification log
/// - `rankings`: Leaderboard and activity statistics
/// - `account`: Settings and avatar

pub mod account;
pub mod auth;
pub mod dashboard;
pub mod health;
pub mod notifications;
pub mod projects;
pub mod rankings;
pub mod tasks;
