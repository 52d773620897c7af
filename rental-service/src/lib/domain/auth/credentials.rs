use std::sync::Arc;

use anyhow::Context;
use auth::Authenticator;

use crate::domain::user::models::Password;

/// Run CPU-bound credential work on the blocking pool.
pub(crate) async fn blocking<F, T>(work: F) -> Result<T, anyhow::Error>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .context("credential task aborted")
}

/// Hash a plaintext password with the process pepper.
pub(crate) async fn hash_password(
    authenticator: &Arc<Authenticator>,
    password: &Password,
) -> Result<String, anyhow::Error> {
    let authenticator = Arc::clone(authenticator);
    let password = password.clone();

    blocking(move || authenticator.hash_password(password.as_str()))
        .await?
        .context("password hashing failed")
}

#[cfg(test)]
pub(crate) fn test_authenticator() -> Arc<Authenticator> {
    use auth::Secret;

    Arc::new(
        Authenticator::new(
            Secret::new("security.salt", "unit-test-pepper").unwrap(),
            &Secret::new("jwt.secret", "unit-test-signing-key-of-32-bytes!").unwrap(),
            chrono::Duration::days(7),
        )
        .unwrap(),
    )
}
