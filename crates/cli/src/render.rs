//! Plain-text rendering of API responses

use anyhow::Result;
use jiupluck_http::types::{
    CalendarStatus, Event, EventAttendee, FreeSlot, FreeSlotsResponse, RoomFreeSlotsResponse,
    Room, TimetableData, TimetableTemplate, User, Webhook, Weekday,
};
use serde::Serialize;
use std::fmt::Write;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Output {
    Text,
    Json,
}

impl Output {
    /// Print `value` as pretty JSON, or as the text `render` produces
    pub fn emit<T: Serialize>(self, value: &T, render: impl FnOnce(&T) -> String) -> Result<()> {
        match self {
            Self::Json => println!("{}", serde_json::to_string_pretty(value)?),
            Self::Text => println!("{}", render(value).trim_end()),
        }
        Ok(())
    }
}

fn or_dash(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or("-")
}

pub fn rooms(rooms: &[Room]) -> String {
    if rooms.is_empty() {
        return "No rooms yet".to_string();
    }

    let mut out = String::new();
    for room in rooms {
        let _ = writeln!(
            out,
            "{}  {}  (owner: {}, {} members)",
            room.id,
            room.name,
            or_dash(room.owner_name.as_deref()),
            room.members.len()
        );
    }
    out
}

pub fn room(room: &Room) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", room.name, room.id);
    let _ = writeln!(out, "School:      {}", or_dash(room.school.as_deref()));
    let _ = writeln!(out, "Invite code: {}", or_dash(room.invite_code.as_deref()));
    let _ = writeln!(out, "Members:");
    for member in &room.members {
        let _ = writeln!(
            out,
            "  {} [{}]",
            member.name.as_deref().unwrap_or(&member.user_id),
            member.role
        );
    }
    if !room.events.is_empty() {
        let _ = writeln!(out, "Events:");
        for event in &room.events {
            let _ = writeln!(out, "  {}  {}", event.id, event.title);
        }
    }
    out
}

pub fn webhooks(webhooks: &[Webhook]) -> String {
    if webhooks.is_empty() {
        return "No webhooks".to_string();
    }
    webhooks
        .iter()
        .map(|hook| format!("{}  {}", hook.id, hook.url))
        .collect::<Vec<_>>()
        .join("\n")
}

fn slots(slots: &[FreeSlot]) -> String {
    if slots.is_empty() {
        return "none".to_string();
    }
    slots
        .iter()
        .map(|slot| format!("{}-{}", slot.start, slot.end))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn free_slots(response: &FreeSlotsResponse) -> String {
    format!("{}: {}", response.weekday, slots(&response.slots))
}

pub fn room_free_slots(response: &RoomFreeSlotsResponse) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Common free time on {}: {}", response.weekday, slots(&response.common_slots));
    for member in &response.members {
        let _ = writeln!(
            out,
            "  {}: {}",
            member.name.as_deref().unwrap_or(&member.user_id),
            slots(&member.slots)
        );
    }
    out
}

pub fn events(events: &[Event]) -> String {
    if events.is_empty() {
        return "No events".to_string();
    }

    let mut out = String::new();
    for event in events {
        let when = if event.is_public() {
            format!(
                "{} - {}",
                or_dash(event.start_time.as_deref()),
                or_dash(event.end_time.as_deref())
            )
        } else {
            let proposed = event.proposed_times.as_ref().map_or(0, Vec::len);
            format!("{proposed} proposed times")
        };
        let _ = writeln!(out, "{}  {}  [{}]  {when}", event.id, event.title, or_dash(event.category.as_deref()));
    }
    out
}

/// Event detail; tallies are shown exactly as the server computed them
pub fn event(event: &Event) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", event.title, event.id);
    let _ = writeln!(out, "By:       {}", event.created_by_name.as_deref().unwrap_or(&event.created_by));
    let _ = writeln!(out, "Category: {}", or_dash(event.category.as_deref()));
    let _ = writeln!(out, "Location: {}", or_dash(event.location.as_deref()));
    if let Some(description) = &event.description {
        let _ = writeln!(out, "\n{description}\n");
    }

    if event.is_public() {
        let _ = writeln!(
            out,
            "When:     {} - {}",
            or_dash(event.start_time.as_deref()),
            or_dash(event.end_time.as_deref())
        );
        let _ = writeln!(out, "Going:    {}", event.attendees.len());
    } else if !event.time_vote_stats.is_empty() {
        let _ = writeln!(out, "Proposed times:");
        for stats in &event.time_vote_stats {
            let _ = writeln!(
                out,
                "  #{} {} - {}  yes {} / maybe {} / no {}",
                stats.time_index, stats.start, stats.end, stats.yes, stats.maybe, stats.no
            );
        }
    } else if let Some(times) = &event.proposed_times {
        let _ = writeln!(out, "Proposed times:");
        for (index, time) in times.iter().enumerate() {
            let _ = writeln!(out, "  #{index} {} - {}", time.start, time.end);
        }
        if let Some(stats) = &event.vote_stats {
            let _ = writeln!(out, "Votes: yes {} / maybe {} / no {}", stats.yes, stats.maybe, stats.no);
        }
    }
    out
}

pub fn attendees(attendees: &[EventAttendee]) -> String {
    if attendees.is_empty() {
        return "Nobody has joined yet".to_string();
    }
    attendees
        .iter()
        .map(|a| format!("{} ({})", a.name.as_deref().unwrap_or(&a.user_id), or_dash(a.school.as_deref())))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn timetable(data: &TimetableData) -> String {
    let mut out = String::new();
    for weekday in Weekday::ALL {
        let entries = data.day(weekday);
        if entries.is_empty() {
            continue;
        }
        let _ = writeln!(out, "{weekday}:");
        for entry in entries {
            let _ = writeln!(out, "  {:<8} {}", entry.period, entry.course);
        }
    }
    if out.is_empty() {
        out.push_str("Timetable is empty");
    }
    out
}

pub fn templates(templates: &[TimetableTemplate]) -> String {
    if templates.is_empty() {
        return "No templates".to_string();
    }

    let mut out = String::new();
    for template in templates {
        let _ = writeln!(
            out,
            "{}  {} / {}  ({} periods){}",
            template.id,
            template.school,
            template.name,
            template.periods.len(),
            template
                .status
                .as_deref()
                .map(|status| format!("  [{status}]"))
                .unwrap_or_default()
        );
    }
    out
}

pub fn user(user: &User) -> String {
    let mut flags = Vec::new();
    if user.is_admin {
        flags.push("admin");
    }
    if !user.is_active {
        flags.push("inactive");
    }
    if !user.email_verified {
        flags.push("unverified");
    }

    let mut out = format!(
        "{}  {} <{}>  {} / {}",
        user.id,
        or_dash(user.name.as_deref()),
        user.email,
        or_dash(user.school.as_deref()),
        or_dash(user.major.as_deref())
    );
    if !flags.is_empty() {
        let _ = write!(out, "  [{}]", flags.join(", "));
    }
    out
}

pub fn calendar_status(status: &CalendarStatus) -> String {
    let label = |connected: bool| if connected { "connected" } else { "not connected" };
    format!(
        "Google calendar: {}\nApple calendar:  {}",
        label(status.google_connected),
        label(status.apple_connected)
    )
}
