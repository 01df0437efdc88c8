//! Event commands

use super::{loaded, parse, sent};
use crate::render::{self, Output};
use anyhow::{Result, bail};
use clap::Subcommand;
use jiupluck_frontend_common::hooks::events;
use jiupluck_frontend_common::{AppContext, Route};
use jiupluck_http::types::{
    EventSort, EventVote, PrivateEventCreate, ProposedTime, PublicEventCreate, PublicEventQuery,
    VoteChoice,
};

#[derive(Subcommand)]
pub enum EventCommands {
    /// Events proposed in a room
    List { room_id: String },

    /// Propose an event in a room with one or more candidate times
    Create {
        room_id: String,

        #[arg(long)]
        title: String,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        category: Option<String>,

        #[arg(long)]
        location: Option<String>,

        /// Candidate time as START/END, e.g. 2025-03-03T12:00/2025-03-03T13:00
        #[arg(long = "time", required = true, value_parser = parse::time_range)]
        times: Vec<ProposedTime>,
    },

    /// Vote on one of a room event's proposed times
    Vote {
        room_id: String,

        event_id: String,

        /// Index of the proposed time, as listed by `events show`
        #[arg(long)]
        time: u32,

        #[arg(long)]
        vote: VoteChoice,
    },

    /// Browse public events
    Public {
        #[arg(long)]
        school: Option<String>,

        #[arg(long)]
        category: Option<String>,

        /// Earliest date, YYYY-MM-DD
        #[arg(long, value_parser = parse::date)]
        from: Option<String>,

        /// Latest date, YYYY-MM-DD
        #[arg(long, value_parser = parse::date)]
        to: Option<String>,

        /// time or created_at
        #[arg(long)]
        sort: Option<EventSort>,
    },

    /// Publish a public event
    Publish {
        #[arg(long)]
        title: String,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        category: Option<String>,

        #[arg(long)]
        location: Option<String>,

        #[arg(long, value_parser = parse::datetime)]
        start: String,

        #[arg(long, value_parser = parse::datetime)]
        end: String,
    },

    /// Show an event with its vote tallies
    Show { event_id: String },

    /// Delete an event you created
    Delete { event_id: String },

    /// Join a public event
    Join { event_id: String },

    /// Leave a public event
    Leave { event_id: String },

    /// People who joined a public event
    Attendees { event_id: String },
}

impl EventCommands {
    pub fn route(&self) -> Route {
        match self {
            Self::List { room_id } | Self::Create { room_id, .. } => Route::Room(room_id.clone()),
            Self::Public { .. } | Self::Publish { .. } => Route::Events,
            Self::Vote { event_id, .. }
            | Self::Show { event_id }
            | Self::Delete { event_id }
            | Self::Join { event_id }
            | Self::Leave { event_id }
            | Self::Attendees { event_id } => Route::Event(event_id.clone()),
        }
    }

    pub async fn execute(self, ctx: &AppContext, output: Output) -> Result<()> {
        match self {
            Self::List { room_id } => {
                let list = loaded(events::use_room_events(ctx, &room_id).await)?;
                output.emit(&list, |list| render::events(list))
            }
            Self::Create {
                room_id,
                title,
                description,
                category,
                location,
                times,
            } => {
                let request = PrivateEventCreate {
                    title,
                    description,
                    category,
                    location,
                    proposed_times: times,
                };
                let event = sent(events::create_room_event(ctx, &room_id, &request).await)?;
                output.emit(&event, |event| {
                    format!("Proposed {} ({}); members can now vote", event.title, event.id)
                })
            }
            Self::Vote {
                room_id,
                event_id,
                time,
                vote,
            } => {
                let ballot = EventVote {
                    time_index: time,
                    vote,
                };
                let response = sent(events::vote_event(ctx, &room_id, &event_id, &ballot).await)?;
                output.emit(&response, |response| {
                    format!("Voted {} on time #{}", response.vote, response.time_index)
                })
            }
            Self::Public {
                school,
                category,
                from,
                to,
                sort,
            } => {
                let query = PublicEventQuery {
                    school,
                    category,
                    from_date: from,
                    to_date: to,
                    sort,
                };
                let list = loaded(events::use_public_events(ctx, &query).await)?;
                output.emit(&list, |list| render::events(list))
            }
            Self::Publish {
                title,
                description,
                category,
                location,
                start,
                end,
            } => {
                // Both are normalized to the same layout, so text order is time order
                if end <= start {
                    bail!("The event must end after it starts");
                }
                let request = PublicEventCreate {
                    title,
                    description,
                    category,
                    location,
                    start_time: start,
                    end_time: end,
                };
                let event = sent(events::create_public_event(ctx, &request).await)?;
                output.emit(&event, |event| format!("Published {} ({})", event.title, event.id))
            }
            Self::Show { event_id } => {
                let event = loaded(events::use_event(ctx, &event_id).await)?;
                output.emit(&event, render::event)
            }
            Self::Delete { event_id } => {
                sent(events::delete_event(ctx, &event_id).await)?;
                println!("Deleted event {event_id}");
                Ok(())
            }
            Self::Join { event_id } => {
                let response = sent(events::join_event(ctx, &event_id).await)?;
                output.emit(&response, |response| response.message.clone())
            }
            Self::Leave { event_id } => {
                let response = sent(events::leave_event(ctx, &event_id).await)?;
                output.emit(&response, |response| response.message.clone())
            }
            Self::Attendees { event_id } => {
                let attendees = loaded(events::use_event_attendees(ctx, &event_id).await)?;
                output.emit(&attendees, |attendees| render::attendees(attendees))
            }
        }
    }
}
