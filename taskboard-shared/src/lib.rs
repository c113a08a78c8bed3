//! # Taskboard Shared Library
//!
//! Domain types and business logic for the task board: projects, tasks and
//! comments, role checks, points and achievements, rankings, notifications,
//! and the in-memory [`store::Store`] that the API server shares between
//! requests.
//!
//! ## Module Organization
//!
//! - `models`: users, projects, tasks, comments, notifications, settings
//! - `auth`: roles and permissions, password hashing, session tokens
//! - `board`: per-user projects and the task column state machine
//! - `gamification`: points ledger, levels, achievements
//! - `ranking`: leaderboard derivation
//! - `stats`: live task statistics and activity series
//! - `store`: process-wide state with per-user locking
//! - `error`: common error types

pub mod auth;
pub mod board;
pub mod error;
pub mod gamification;
pub mod models;
pub mod ranking;
pub mod stats;
pub mod store;

/// Current version of the taskboard shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
