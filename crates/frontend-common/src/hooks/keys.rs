//! Cache keys used by the views
//!
//! Listings and details use distinct first segments (`rooms` vs `room/<id>`),
//! so invalidating a listing leaves detail entries alone.

use crate::query::QueryKey;
use jiupluck_http::types::{EventSort, PublicEventQuery, Weekday};

pub fn current_user() -> QueryKey {
    QueryKey::new(["current-user"])
}

pub fn rooms() -> QueryKey {
    QueryKey::new(["rooms"])
}

pub fn room(room_id: &str) -> QueryKey {
    QueryKey::new(["room", room_id])
}

pub fn room_events(room_id: &str) -> QueryKey {
    QueryKey::new(["room-events", room_id])
}

pub fn room_webhooks(room_id: &str) -> QueryKey {
    QueryKey::new(["room-webhooks", room_id])
}

pub fn room_invite_code(room_id: &str) -> QueryKey {
    QueryKey::new(["room-invite-code", room_id])
}

pub fn room_free_slots(room_id: &str, weekday: Weekday, template_id: Option<i64>) -> QueryKey {
    let template = template_id.map_or_else(|| "default".to_string(), |id| id.to_string());
    QueryKey::new([
        "room-free-slots".to_string(),
        room_id.to_string(),
        weekday.to_string(),
        template,
    ])
}

pub fn event(event_id: &str) -> QueryKey {
    QueryKey::new(["event", event_id])
}

pub fn event_attendees(event_id: &str) -> QueryKey {
    QueryKey::new(["event-attendees", event_id])
}

/// Prefix covering every filtered public listing
pub fn all_public_events() -> QueryKey {
    QueryKey::new(["public-events"])
}

/// One public listing; every filter is part of the key
pub fn public_events(query: &PublicEventQuery) -> QueryKey {
    let sort = query.sort.map(|sort| match sort {
        EventSort::Time => "time",
        EventSort::CreatedAt => "created_at",
    });

    QueryKey::new([
        "public-events",
        query.category.as_deref().unwrap_or_default(),
        query.school.as_deref().unwrap_or_default(),
        query.from_date.as_deref().unwrap_or_default(),
        query.to_date.as_deref().unwrap_or_default(),
        sort.unwrap_or_default(),
    ])
}

pub fn timetable() -> QueryKey {
    QueryKey::new(["timetable"])
}

pub fn timetable_templates() -> QueryKey {
    QueryKey::new(["timetable-templates"])
}

pub fn free_slots(weekday: Weekday) -> QueryKey {
    QueryKey::new(["free-slots", weekday.as_str()])
}

pub fn google_calendar_status() -> QueryKey {
    QueryKey::new(["google-calendar-status"])
}

pub fn apple_calendar_status() -> QueryKey {
    QueryKey::new(["apple-calendar-status"])
}

/// Prefix covering every admin user page and user detail
pub fn admin_users() -> QueryKey {
    QueryKey::new(["admin", "users"])
}

pub fn admin_users_page(skip: u32, limit: u32) -> QueryKey {
    QueryKey::new([
        "admin".to_string(),
        "users".to_string(),
        skip.to_string(),
        limit.to_string(),
    ])
}

pub fn admin_user(user_id: &str) -> QueryKey {
    QueryKey::new(["admin", "users", "id", user_id])
}

pub fn admin_pending_templates() -> QueryKey {
    QueryKey::new(["admin", "pending-templates"])
}
