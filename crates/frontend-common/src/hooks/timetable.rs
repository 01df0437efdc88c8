//! Timetable, templates and free time

use super::keys;
use crate::client::AppContext;
use crate::query::QueryResult;
use jiupluck_http::ClientError;
use jiupluck_http::types::{
    FreeSlotsResponse, Timetable, TimetableData, TimetableTemplate, TimetableTemplateCreate,
    Weekday,
};

pub async fn use_timetable(ctx: &AppContext) -> QueryResult<Timetable> {
    let api = ctx.api();
    ctx.queries()
        .fetch(&keys::timetable(), || async move { api.timetable().await })
        .await
}

/// Approved period templates to build a timetable from
pub async fn use_timetable_templates(ctx: &AppContext) -> QueryResult<Vec<TimetableTemplate>> {
    let api = ctx.api();
    ctx.queries()
        .fetch(&keys::timetable_templates(), || async move {
            api.timetable_templates().await
        })
        .await
}

pub async fn use_free_slots(ctx: &AppContext, weekday: Weekday) -> QueryResult<FreeSlotsResponse> {
    let api = ctx.api();
    ctx.queries()
        .fetch(&keys::free_slots(weekday), || async move {
            api.free_slots(weekday).await
        })
        .await
}

/// # Errors
///
/// Returns the server's rejection unchanged
pub async fn save_timetable(ctx: &AppContext, data: &TimetableData) -> Result<Timetable, ClientError> {
    let api = ctx.api();
    ctx.queries()
        .mutate(api.save_timetable(data), &[keys::timetable()])
        .await
}

/// Submit a period template; it shows up in the admin review queue
///
/// # Errors
///
/// Returns the server's rejection unchanged
pub async fn submit_template(
    ctx: &AppContext,
    template: &TimetableTemplateCreate,
) -> Result<TimetableTemplate, ClientError> {
    let api = ctx.api();
    ctx.queries()
        .mutate(
            api.submit_template(template),
            &[keys::admin_pending_templates()],
        )
        .await
}
