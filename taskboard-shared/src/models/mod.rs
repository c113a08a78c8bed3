/// Domain models for the task board
///
/// Everything here is plain in-memory data. The shapes double as the schema an
/// implementer would persist if durability were ever added.
///
/// # Models
///
/// - `user`: accounts, roles, avatars
/// - `project`: projects owned by a single user
/// - `task`: tasks and the three-column board of a project
/// - `comment`: comments and emoji reactions on tasks
/// - `notification`: bounded per-user notification log
/// - `settings`: per-user preferences

pub mod comment;
pub mod notification;
pub mod project;
pub mod settings;
pub mod task;
pub mod user;

use sha2::{Digest, Sha256};

/// Hashes a string to a `u64` that is identical on every platform and run
///
/// Uses the first eight bytes of the SHA-256 digest, big-endian. Project id
/// suffixes and avatar/project colors are derived from it.
pub fn stable_hash(input: &str) -> u64 {
    let digest = Sha256::digest(input.as_bytes());
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(bytes)
}
