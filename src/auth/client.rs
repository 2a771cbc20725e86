use crate::auth::storage::SessionStore;
use crate::config::ClientConfig;
use crate::error::{error_from_response, ApiError, Result};
use crate::models::{RefreshedToken, Role, Session, User};
use anyhow::Context;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error, info, warn};

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct RegisterRequest<'a> {
    email: &'a str,
    password: &'a str,
    name: &'a str,
    role: Role,
}

/// Client for the auth API.
///
/// Every successful call that yields tokens writes them to the injected
/// [`SessionStore`]; a failed call leaves the stored session as it was,
/// except [`AuthClient::logout`], which always clears it.
#[derive(Debug, Clone)]
pub struct AuthClient {
    client: Client,
    base_url: String,
    session: SessionStore,
}

impl AuthClient {
    pub fn new(config: &ClientConfig, session: SessionStore) -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("dreambook/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self::with_client(client, &config.auth_base_url, session))
    }

    pub fn with_client(client: Client, base_url: &str, session: SessionStore) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
        }
    }

    /// The stored tokens and user record
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<Session> {
        debug!(email, "Logging in");
        let request = self
            .client
            .post(self.url("/auth/login"))
            .json(&LoginRequest { email, password });
        let session: Session = send_json(request, "Login failed").await?;
        self.store(&session);
        info!(user = %session.user.id, "Logged in");
        Ok(session)
    }

    /// Create an account; `role` defaults to guest
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
        role: Option<Role>,
    ) -> Result<Session> {
        let role = role.unwrap_or_default();
        debug!(email, %role, "Registering");
        let request = self.client.post(self.url("/auth/register")).json(&RegisterRequest {
            email,
            password,
            name,
            role,
        });
        let session: Session = send_json(request, "Registration failed").await?;
        self.store(&session);
        info!(user = %session.user.id, "Registered");
        Ok(session)
    }

    /// Trade the stored refresh token for a new access token.
    ///
    /// When the server rejects the refresh token the session is cleared;
    /// a network failure leaves it in place.
    pub async fn refresh_access_token(&self) -> Result<RefreshedToken> {
        let refresh_token = self
            .session
            .get_refresh_token()
            .ok_or_else(|| ApiError::Session("No refresh token available".to_string()))?;

        let request = self
            .client
            .post(self.url("/auth/refresh"))
            .bearer_auth(refresh_token);
        match send_json::<RefreshedToken>(request, "Token refresh failed").await {
            Ok(refreshed) => {
                self.session.set_access_token(&refreshed.access_token);
                debug!("Access token refreshed");
                Ok(refreshed)
            }
            Err(e @ ApiError::Http { .. }) => {
                warn!(error = %e, "Refresh token rejected, clearing session");
                self.session.clear_tokens();
                Err(e)
            }
            Err(e) => Err(e),
        }
    }

    /// Invalidate the refresh token server-side and clear the local session.
    ///
    /// The server call is best effort; the local session is cleared no
    /// matter how it goes.
    pub async fn logout(&self) {
        if let Some(refresh_token) = self.session.get_refresh_token() {
            let result = self
                .client
                .post(self.url("/auth/logout"))
                .bearer_auth(refresh_token)
                .send()
                .await;
            match result {
                Ok(response) if response.status().is_success() => debug!("Server session closed"),
                Ok(response) => error!(status = %response.status(), "Logout error"),
                Err(e) => error!(error = %e, "Logout error"),
            }
        }
        self.session.clear_tokens();
        info!("Logged out");
    }

    pub async fn get_current_user(&self) -> Result<User> {
        let token = self
            .session
            .get_access_token()
            .ok_or_else(|| ApiError::Session("No access token available".to_string()))?;
        let request = self.client.get(self.url("/auth/me")).bearer_auth(token);
        let user: User = send_json(request, "Failed to get current user").await?;
        self.session.set_user(&user);
        Ok(user)
    }

    fn store(&self, session: &Session) {
        self.session.set_tokens(&session.access_token, &session.refresh_token);
        self.session.set_user(&session.user);
    }
}

async fn send_json<T: DeserializeOwned>(request: RequestBuilder, default_message: &str) -> Result<T> {
    let response: Response = request.send().await?;
    if !response.status().is_success() {
        return Err(error_from_response(response, default_message).await);
    }
    Ok(response.json().await?)
}
