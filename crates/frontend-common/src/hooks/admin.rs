//! Admin views: user management and template review

use super::keys;
use crate::client::AppContext;
use crate::config::AdminConfig;
use crate::query::QueryResult;
use jiupluck_http::ClientError;
use jiupluck_http::types::{
    MessageResponse, TemplateReview, TimetableTemplate, TimetableTemplateCreate, User,
    UserListResponse, UserUpdate,
};

/// Templates created or reviewed by an admin change both queues
fn template_keys() -> [crate::query::QueryKey; 2] {
    [keys::admin_pending_templates(), keys::timetable_templates()]
}

/// One page of users; `limit` defaults to [`AdminConfig::USER_PAGE_SIZE`]
pub async fn use_users(ctx: &AppContext, skip: u32, limit: Option<u32>) -> QueryResult<UserListResponse> {
    let limit = limit.unwrap_or(AdminConfig::USER_PAGE_SIZE);
    let api = ctx.api();
    ctx.queries()
        .fetch(&keys::admin_users_page(skip, limit), || async move {
            api.list_users(skip, limit).await
        })
        .await
}

pub async fn use_user(ctx: &AppContext, user_id: &str) -> QueryResult<User> {
    let api = ctx.api();
    ctx.queries()
        .fetch(&keys::admin_user(user_id), || async move {
            api.get_user(user_id).await
        })
        .await
}

pub async fn use_pending_templates(ctx: &AppContext) -> QueryResult<Vec<TimetableTemplate>> {
    let api = ctx.api();
    ctx.queries()
        .fetch(&keys::admin_pending_templates(), || async move {
            api.pending_templates().await
        })
        .await
}

/// # Errors
///
/// Returns the server's rejection unchanged
pub async fn update_user(ctx: &AppContext, user_id: &str, update: &UserUpdate) -> Result<User, ClientError> {
    let api = ctx.api();
    ctx.queries()
        .mutate(api.update_user(user_id, update), &[keys::admin_users()])
        .await
}

/// # Errors
///
/// Returns the server's rejection unchanged
pub async fn delete_user(ctx: &AppContext, user_id: &str) -> Result<MessageResponse, ClientError> {
    let api = ctx.api();
    ctx.queries()
        .mutate(api.delete_user(user_id), &[keys::admin_users()])
        .await
}

/// # Errors
///
/// Returns the server's rejection unchanged
pub async fn create_template(
    ctx: &AppContext,
    template: &TimetableTemplateCreate,
) -> Result<TimetableTemplate, ClientError> {
    let api = ctx.api();
    ctx.queries()
        .mutate(api.create_template(template), &template_keys())
        .await
}

/// # Errors
///
/// Returns the server's rejection unchanged
pub async fn review_template(
    ctx: &AppContext,
    template_id: i64,
    review: TemplateReview,
) -> Result<(), ClientError> {
    let api = ctx.api();
    ctx.queries()
        .mutate(api.review_template(template_id, review), &template_keys())
        .await
}
