/// Authentication and authorization utilities
///
/// # Modules
///
/// - [`authorization`]: role resolution and the permission table
/// - [`password`]: Argon2id password hashing and validation
/// - [`jwt`]: session token generation and validation
/// - [`middleware`]: request authentication and session revocation

pub mod authorization;
pub mod jwt;
pub mod middleware;
pub mod password;
