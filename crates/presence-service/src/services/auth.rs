//! Authentication service
//!
//! Handles login and logout.

use presence_client::AuthApi;
use presence_common::{AppError, AppResult};
use tracing::{info, instrument, warn};

use super::context::ServiceContext;
use super::navigator::Route;

const LOGIN_FAILED: &str = "Login failed";

/// Authentication service
#[derive(Debug, Clone, Copy)]
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Exchange credentials for a session and move to the dashboard.
    ///
    /// On failure the session is left as it was.
    #[instrument(skip(self, password))]
    pub async fn login(&self, username: &str, password: &str) -> AppResult<()> {
        let token = AuthApi::new(self.ctx.client())
            .login(username, password)
            .await
            .inspect_err(|e| warn!(error = %e, "Login rejected"))?;

        self.ctx.session().set_session(token.access_token)?;
        self.ctx.navigator().navigate(Route::Dashboard);

        info!("Logged in");
        Ok(())
    }

    /// Drop the session and return to the login screen. Safe to call when
    /// already logged out.
    #[instrument(skip(self))]
    pub fn logout(&self) -> AppResult<()> {
        let result = self.ctx.session().clear_session();
        self.ctx.navigator().navigate(Route::Login);

        info!("Logged out");
        result
    }
}

/// Text shown on the login form for a failed attempt: the server's detail
/// when it sent one, a fixed message otherwise
pub fn login_error_message(err: &AppError) -> String {
    err.detail().unwrap_or(LOGIN_FAILED).to_string()
}
