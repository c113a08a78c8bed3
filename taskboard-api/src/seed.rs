/// Demo account seeding
///
/// Registers one account per role so a fresh server is usable straight away:
///
/// | username | role   |
/// |----------|--------|
/// | admin    | admin  |
/// | maria    | member |
/// | juan     | guest  |
///
/// All three share the configured seed password.

use taskboard_shared::{
    auth::password::hash_password,
    models::user::{CreateUser, Role},
    store::Store,
};

/// Demo accounts in registration order
pub const DEMO_USERS: [(&str, Role); 3] = [
    ("admin", Role::Admin),
    ("maria", Role::Member),
    ("juan", Role::Guest),
];

/// Registers the demo accounts; returns how many were added
///
/// # Errors
///
/// Fails if hashing fails or an account already exists.
pub async fn seed_demo_users(store: &Store, password: &str) -> anyhow::Result<usize> {
    for (username, role) in DEMO_USERS {
        let password_hash = hash_password(password.trim())?;
        store
            .add_user(CreateUser {
                username: username.to_string(),
                email: format!("{}@taskboard.local", username),
                role,
                password_hash,
            })
            .await?;
    }

    tracing::info!(count = DEMO_USERS.len(), "Demo users seeded");
    Ok(DEMO_USERS.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_seed_and_login() {
        let store = Store::new();
        assert_eq!(seed_demo_users(&store, "1234").await.unwrap(), 3);
        assert_eq!(store.user_count().await, 3);

        let maria = store.authenticate("maria", "1234").await.unwrap().unwrap();
        assert_eq!(maria.role, Role::Member);
        assert!(maria.last_login_at.is_some());
        assert!(store.authenticate("maria", "wrong").await.unwrap().is_none());
        assert!(store.authenticate("nobody", "1234").await.unwrap().is_none());

        // seeding twice collides
        assert!(seed_demo_users(&store, "1234").await.is_err());
    }
}
