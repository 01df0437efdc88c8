//! Room events, votes and public events

use super::keys;
use crate::client::AppContext;
use crate::query::QueryResult;
use jiupluck_http::ClientError;
use jiupluck_http::types::{
    Event, EventAttendee, EventVote, EventVoteResponse, MessageResponse, PrivateEventCreate,
    PublicEventCreate, PublicEventQuery,
};

pub async fn use_room_events(ctx: &AppContext, room_id: &str) -> QueryResult<Vec<Event>> {
    let api = ctx.api();
    ctx.queries()
        .fetch(&keys::room_events(room_id), || async move {
            api.room_events(room_id).await
        })
        .await
}

/// Event detail with the server's vote tallies
pub async fn use_event(ctx: &AppContext, event_id: &str) -> QueryResult<Event> {
    let api = ctx.api();
    ctx.queries()
        .fetch(&keys::event(event_id), || async move {
            api.get_event(event_id).await
        })
        .await
}

pub async fn use_event_attendees(ctx: &AppContext, event_id: &str) -> QueryResult<Vec<EventAttendee>> {
    let api = ctx.api();
    ctx.queries()
        .fetch(&keys::event_attendees(event_id), || async move {
            api.event_attendees(event_id).await
        })
        .await
}

pub async fn use_public_events(ctx: &AppContext, query: &PublicEventQuery) -> QueryResult<Vec<Event>> {
    let api = ctx.api();
    ctx.queries()
        .fetch(&keys::public_events(query), || async move {
            api.public_events(query).await
        })
        .await
}

/// # Errors
///
/// Returns the server's rejection unchanged
pub async fn create_room_event(
    ctx: &AppContext,
    room_id: &str,
    event: &PrivateEventCreate,
) -> Result<Event, ClientError> {
    let api = ctx.api();
    ctx.queries()
        .mutate(
            api.create_room_event(room_id, event),
            &[keys::room_events(room_id)],
        )
        .await
}

/// # Errors
///
/// Returns the server's rejection unchanged
pub async fn vote_event(
    ctx: &AppContext,
    room_id: &str,
    event_id: &str,
    vote: &EventVote,
) -> Result<EventVoteResponse, ClientError> {
    let api = ctx.api();
    ctx.queries()
        .mutate(
            api.vote_event(room_id, event_id, vote),
            &[keys::event(event_id)],
        )
        .await
}

/// # Errors
///
/// Returns the server's rejection unchanged
pub async fn join_event(ctx: &AppContext, event_id: &str) -> Result<MessageResponse, ClientError> {
    let api = ctx.api();
    ctx.queries()
        .mutate(
            api.join_event(event_id),
            &[keys::event(event_id), keys::event_attendees(event_id)],
        )
        .await
}

/// # Errors
///
/// Returns the server's rejection unchanged
pub async fn leave_event(ctx: &AppContext, event_id: &str) -> Result<MessageResponse, ClientError> {
    let api = ctx.api();
    ctx.queries()
        .mutate(
            api.leave_event(event_id),
            &[keys::event(event_id), keys::event_attendees(event_id)],
        )
        .await
}

/// # Errors
///
/// Returns the server's rejection unchanged
pub async fn delete_event(ctx: &AppContext, event_id: &str) -> Result<(), ClientError> {
    let api = ctx.api();
    ctx.queries()
        .mutate(api.delete_event(event_id), &[keys::all_public_events()])
        .await
}

/// # Errors
///
/// Returns the server's rejection unchanged
pub async fn create_public_event(
    ctx: &AppContext,
    event: &PublicEventCreate,
) -> Result<Event, ClientError> {
    let api = ctx.api();
    ctx.queries()
        .mutate(api.create_public_event(event), &[keys::all_public_events()])
        .await
}
