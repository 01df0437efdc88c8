//! Sign-up, login and logout

use super::context::{AuthAction, TokenPair};
use super::storage::SessionError;
use crate::client::AppContext;
use jiupluck_http::ClientError;
use jiupluck_http::types::{LoginRequest, MessageResponse, SignupRequest, VerifyEmailRequest};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum AuthFlowError {
    #[error(transparent)]
    Api(#[from] ClientError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("No refresh token stored; log in again")]
    NoRefreshToken,
}

impl AuthFlowError {
    /// The request failure, when the server was the one refusing
    pub const fn api_error(&self) -> Option<&ClientError> {
        match self {
            Self::Api(err) => Some(err),
            Self::Session(_) | Self::NoRefreshToken => None,
        }
    }
}

/// Register an account; the server mails a verification code
///
/// # Errors
///
/// Returns the server's rejection, e.g. an address already in use
pub async fn signup(ctx: &AppContext, request: &SignupRequest) -> Result<MessageResponse, ClientError> {
    debug!(email = %request.email, "Signing up");
    ctx.api().signup(request).await
}

/// Confirm the mailed verification code
///
/// # Errors
///
/// Returns the server's rejection of the code
pub async fn verify_email(
    ctx: &AppContext,
    email: &str,
    code: &str,
) -> Result<MessageResponse, ClientError> {
    let request = VerifyEmailRequest {
        email: email.to_string(),
        code: code.to_string(),
    };
    ctx.api().verify_email(&request).await
}

/// Ask for a one-time login code by email
///
/// # Errors
///
/// Returns the server's rejection, e.g. an unverified address
pub async fn request_login_code(ctx: &AppContext, email: &str) -> Result<MessageResponse, ClientError> {
    ctx.api().request_login_otp(email).await
}

/// Exchange the code for a token pair and store both tokens
///
/// # Errors
///
/// Fails when the server rejects the code or the pair cannot be persisted;
/// in the latter case the pair is still held in memory.
pub async fn login(ctx: &AppContext, email: &str, code: &str) -> Result<(), AuthFlowError> {
    let request = LoginRequest {
        email: email.to_string(),
        code: code.to_string(),
    };
    let tokens = ctx.api().login(&request).await?;

    // A new identity must not see cached data of the previous one
    ctx.queries().clear();
    ctx.session().dispatch(AuthAction::Login(TokenPair::from(tokens)))?;
    info!("Logged in");
    Ok(())
}

/// Replace the pair using the stored refresh token
///
/// Only runs when asked; nothing refreshes proactively.
///
/// # Errors
///
/// Returns [`AuthFlowError::NoRefreshToken`] when logged out, or the server's
/// rejection of the refresh token. A rejected refresh leaves the session as is.
pub async fn refresh(ctx: &AppContext) -> Result<(), AuthFlowError> {
    let refresh_token = ctx
        .session()
        .refresh_token()
        .ok_or(AuthFlowError::NoRefreshToken)?;

    let tokens = ctx.api().refresh(&refresh_token).await?;
    ctx.session()
        .dispatch(AuthAction::Refresh(TokenPair::from(tokens)))?;
    Ok(())
}

/// Forget both tokens and every cached response
///
/// # Errors
///
/// Returns an error if persisted tokens cannot be removed; memory is
/// already cleared at that point.
pub fn logout(ctx: &AppContext) -> Result<(), AuthFlowError> {
    ctx.queries().clear();
    ctx.session().clear_tokens()?;
    info!("Logged out");
    Ok(())
}
