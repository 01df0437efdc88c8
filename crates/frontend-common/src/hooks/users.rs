//! Current user profile

use super::keys;
use crate::client::AppContext;
use crate::query::QueryResult;
use jiupluck_http::types::User;

/// Profile of the logged-in user, shown on the dashboard
pub async fn use_current_user(ctx: &AppContext) -> QueryResult<User> {
    let api = ctx.api();
    ctx.queries()
        .fetch(&keys::current_user(), || async move { api.current_user().await })
        .await
}
