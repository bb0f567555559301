use reqwest::Method;

use crate::{
    api::{ApiClient, ApiError, RequestDescriptor},
    types::{AuthResponse, CreatorUpgrade, LoginRequest, ProfileUpdate, Registration, User},
};

/// Signs in with email and password and stores the issued token pair.
///
/// # Errors
///
/// The server answers invalid credentials with 401, which the client handles
/// like any other rejected request: without a refresh token to fall back on
/// the call fails with [`ApiError::SessionExpired`].
///
/// # Example
///
/// ```
/// let user = auth::login(&client, "ada@example.com", "correct horse").await?;
/// println!("Signed in as {}", user.username);
/// ```
pub async fn login(client: &ApiClient, email: &str, password: &str) -> Result<User, ApiError> {
    let request = LoginRequest {
        email: email.to_string(),
        password: password.to_string(),
    };
    let auth: AuthResponse = client.post("/auth/login/", &request).await?.json()?;

    client.store_tokens(&auth.tokens).await;
    Ok(auth.user)
}

/// Creates an account and signs in with it.
///
/// Field-level validation failures (duplicate email, password mismatch) come
/// back as [`ApiError::Status`] whose `data` holds the per-field messages.
pub async fn register(client: &ApiClient, registration: &Registration) -> Result<User, ApiError> {
    let auth: AuthResponse = client
        .post("/auth/register/", registration)
        .await?
        .json()?;

    client.store_tokens(&auth.tokens).await;
    Ok(auth.user)
}

pub async fn current_user(client: &ApiClient) -> Result<User, ApiError> {
    client.get("/auth/me/").await?.json()
}

/// Validates a stored session on startup.
///
/// Returns `None` without a request when no access token is stored. When the
/// server rejects the session the stored tokens are dropped and `None` is
/// returned. Transport failures are propagated and leave the tokens alone.
pub async fn restore_session(client: &ApiClient) -> Result<Option<User>, ApiError> {
    if !client.has_access_token().await {
        return Ok(None);
    }

    match current_user(client).await {
        Ok(user) => Ok(Some(user)),
        Err(e) if e.is_transport() => Err(e),
        Err(e) => {
            log::info!("stored session rejected: {}", e.message());
            client.clear_tokens().await;
            Ok(None)
        }
    }
}

pub async fn update_profile(client: &ApiClient, update: &ProfileUpdate) -> Result<User, ApiError> {
    client.patch("/auth/me/", update).await?.json()
}

pub async fn become_creator(client: &ApiClient) -> Result<CreatorUpgrade, ApiError> {
    client
        .send(RequestDescriptor::new(Method::POST, "/auth/become-creator/"))
        .await?
        .json()
}

/// Forgets the local session. The server keeps no session state to revoke.
pub async fn logout(client: &ApiClient) {
    client.clear_tokens().await;
}
