//! Calendar linking

use super::keys;
use crate::client::AppContext;
use crate::query::QueryResult;
use jiupluck_http::ClientError;
use jiupluck_http::types::{AppleConnectRequest, CalendarStatus, GoogleAuthResponse, MessageResponse};

pub async fn use_google_status(ctx: &AppContext) -> QueryResult<CalendarStatus> {
    let api = ctx.api();
    ctx.queries()
        .fetch(&keys::google_calendar_status(), || async move {
            api.google_status().await
        })
        .await
}

pub async fn use_apple_status(ctx: &AppContext) -> QueryResult<CalendarStatus> {
    let api = ctx.api();
    ctx.queries()
        .fetch(&keys::apple_calendar_status(), || async move {
            api.apple_status().await
        })
        .await
}

/// Consent URL to open in a browser; never cached
///
/// # Errors
///
/// Returns the server's rejection unchanged
pub async fn google_auth_url(ctx: &AppContext) -> Result<GoogleAuthResponse, ClientError> {
    ctx.api().google_auth_url().await
}

/// # Errors
///
/// Returns the server's rejection, e.g. a wrong app-specific password
pub async fn connect_apple(
    ctx: &AppContext,
    credentials: &AppleConnectRequest,
) -> Result<MessageResponse, ClientError> {
    let api = ctx.api();
    ctx.queries()
        .mutate(
            api.connect_apple(credentials),
            &[keys::apple_calendar_status()],
        )
        .await
}
