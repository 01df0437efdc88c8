//! Rooms, invites and webhooks

use super::keys;
use crate::client::AppContext;
use crate::query::QueryResult;
use jiupluck_http::ClientError;
use jiupluck_http::types::{
    InviteCodeResponse, JoinRoomResponse, MessageResponse, Room, RoomCreate,
    RoomFreeSlotsResponse, Webhook, Weekday,
};

pub async fn use_rooms(ctx: &AppContext) -> QueryResult<Vec<Room>> {
    let api = ctx.api();
    ctx.queries()
        .fetch(&keys::rooms(), || async move { api.list_rooms().await })
        .await
}

pub async fn use_room(ctx: &AppContext, room_id: &str) -> QueryResult<Room> {
    let api = ctx.api();
    ctx.queries()
        .fetch(&keys::room(room_id), || async move {
            api.get_room(room_id).await
        })
        .await
}

pub async fn use_invite_code(ctx: &AppContext, room_id: &str) -> QueryResult<InviteCodeResponse> {
    let api = ctx.api();
    ctx.queries()
        .fetch(&keys::room_invite_code(room_id), || async move {
            api.invite_code(room_id).await
        })
        .await
}

/// Members' free time on `weekday`, optionally against a period template
pub async fn use_room_free_slots(
    ctx: &AppContext,
    room_id: &str,
    weekday: Weekday,
    template_id: Option<i64>,
) -> QueryResult<RoomFreeSlotsResponse> {
    let api = ctx.api();
    ctx.queries()
        .fetch(
            &keys::room_free_slots(room_id, weekday, template_id),
            || async move { api.room_free_slots(room_id, weekday, template_id).await },
        )
        .await
}

pub async fn use_webhooks(ctx: &AppContext, room_id: &str) -> QueryResult<Vec<Webhook>> {
    let api = ctx.api();
    ctx.queries()
        .fetch(&keys::room_webhooks(room_id), || async move {
            api.list_webhooks(room_id).await
        })
        .await
}

/// # Errors
///
/// Returns the server's rejection unchanged
pub async fn create_room(ctx: &AppContext, room: &RoomCreate) -> Result<Room, ClientError> {
    let api = ctx.api();
    ctx.queries()
        .mutate(api.create_room(room), &[keys::rooms()])
        .await
}

/// # Errors
///
/// Returns the server's rejection unchanged
pub async fn delete_room(ctx: &AppContext, room_id: &str) -> Result<(), ClientError> {
    let api = ctx.api();
    ctx.queries()
        .mutate(api.delete_room(room_id), &[keys::rooms()])
        .await
}

/// # Errors
///
/// Returns the server's rejection, e.g. an unknown or expired code
pub async fn join_room_by_code(
    ctx: &AppContext,
    invite_code: &str,
) -> Result<JoinRoomResponse, ClientError> {
    let api = ctx.api();
    ctx.queries()
        .mutate(api.join_room_by_code(invite_code), &[keys::rooms()])
        .await
}

/// # Errors
///
/// Returns the server's rejection unchanged
pub async fn invite_to_room(
    ctx: &AppContext,
    room_id: &str,
    email: &str,
) -> Result<MessageResponse, ClientError> {
    let api = ctx.api();
    ctx.queries()
        .mutate(api.invite_to_room(room_id, email), &[keys::room(room_id)])
        .await
}

/// # Errors
///
/// Returns the server's rejection unchanged
pub async fn regenerate_invite_code(
    ctx: &AppContext,
    room_id: &str,
) -> Result<InviteCodeResponse, ClientError> {
    let api = ctx.api();
    ctx.queries()
        .mutate(
            api.regenerate_invite_code(room_id),
            &[keys::room_invite_code(room_id)],
        )
        .await
}

/// # Errors
///
/// Returns the server's rejection unchanged
pub async fn create_webhook(ctx: &AppContext, room_id: &str, url: &str) -> Result<Webhook, ClientError> {
    let api = ctx.api();
    ctx.queries()
        .mutate(
            api.create_webhook(room_id, url),
            &[keys::room_webhooks(room_id)],
        )
        .await
}

/// # Errors
///
/// Returns the server's rejection unchanged
pub async fn delete_webhook(
    ctx: &AppContext,
    room_id: &str,
    webhook_id: &str,
) -> Result<(), ClientError> {
    let api = ctx.api();
    ctx.queries()
        .mutate(
            api.delete_webhook(room_id, webhook_id),
            &[keys::room_webhooks(room_id)],
        )
        .await
}
