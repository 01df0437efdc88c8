//! Room commands

use super::{loaded, sent};
use crate::render::{self, Output};
use anyhow::Result;
use clap::Subcommand;
use jiupluck_frontend_common::hooks::rooms;
use jiupluck_frontend_common::{AppContext, Route};
use jiupluck_http::types::{RoomCreate, Weekday};

#[derive(Subcommand)]
pub enum RoomCommands {
    /// List the rooms you belong to
    List,

    /// Show a room with its members
    Show { room_id: String },

    /// Create a room
    Create {
        name: String,

        #[arg(long)]
        school: Option<String>,
    },

    /// Delete a room you own
    Delete { room_id: String },

    /// Invite someone by email
    Invite { room_id: String, email: String },

    /// Show the invite code, or replace it with --regenerate
    InviteCode {
        room_id: String,

        #[arg(long)]
        regenerate: bool,
    },

    /// Join a room with an invite code
    Join { code: String },

    /// Free time shared by the members on a weekday
    FreeSlots {
        room_id: String,

        weekday: Weekday,

        /// Period template to evaluate timetables against
        #[arg(long)]
        template: Option<i64>,
    },

    /// Webhooks notified about room activity
    Webhook {
        #[command(subcommand)]
        command: WebhookCommands,
    },
}

#[derive(Subcommand)]
pub enum WebhookCommands {
    List { room_id: String },
    Add { room_id: String, url: String },
    Remove { room_id: String, webhook_id: String },
}

impl RoomCommands {
    pub fn route(&self) -> Route {
        match self {
            Self::List | Self::Create { .. } | Self::Join { .. } => Route::Rooms,
            Self::Show { room_id }
            | Self::Delete { room_id }
            | Self::Invite { room_id, .. }
            | Self::InviteCode { room_id, .. }
            | Self::FreeSlots { room_id, .. }
            | Self::Webhook {
                command:
                    WebhookCommands::List { room_id }
                    | WebhookCommands::Add { room_id, .. }
                    | WebhookCommands::Remove { room_id, .. },
            } => Route::Room(room_id.clone()),
        }
    }

    pub async fn execute(self, ctx: &AppContext, output: Output) -> Result<()> {
        match self {
            Self::List => {
                let list = loaded(rooms::use_rooms(ctx).await)?;
                output.emit(&list, |list| render::rooms(list))
            }
            Self::Show { room_id } => {
                let room = loaded(rooms::use_room(ctx, &room_id).await)?;
                output.emit(&room, render::room)
            }
            Self::Create { name, school } => {
                let room = sent(rooms::create_room(ctx, &RoomCreate { name, school }).await)?;
                output.emit(&room, |room| format!("Created room {} ({})", room.name, room.id))
            }
            Self::Delete { room_id } => {
                sent(rooms::delete_room(ctx, &room_id).await)?;
                println!("Deleted room {room_id}");
                Ok(())
            }
            Self::Invite { room_id, email } => {
                let response = sent(rooms::invite_to_room(ctx, &room_id, &email).await)?;
                output.emit(&response, |response| response.message.clone())
            }
            Self::InviteCode {
                room_id,
                regenerate,
            } => {
                let code = if regenerate {
                    sent(rooms::regenerate_invite_code(ctx, &room_id).await)?
                } else {
                    loaded(rooms::use_invite_code(ctx, &room_id).await)?
                };
                output.emit(&code, |code| {
                    format!(
                        "Invite code: {}\nOthers join with `jiupluck rooms join {}`",
                        code.invite_code, code.invite_code
                    )
                })
            }
            Self::Join { code } => {
                let response = sent(rooms::join_room_by_code(ctx, &code).await)?;
                output.emit(&response, |response| {
                    let message = response.message.as_deref().unwrap_or("Joined room");
                    response
                        .room_id
                        .as_deref()
                        .map_or_else(|| message.to_string(), |id| format!("{message} ({id})"))
                })
            }
            Self::FreeSlots {
                room_id,
                weekday,
                template,
            } => {
                let slots = loaded(rooms::use_room_free_slots(ctx, &room_id, weekday, template).await)?;
                output.emit(&slots, render::room_free_slots)
            }
            Self::Webhook { command } => command.execute(ctx, output).await,
        }
    }
}

impl WebhookCommands {
    async fn execute(self, ctx: &AppContext, output: Output) -> Result<()> {
        match self {
            Self::List { room_id } => {
                let hooks = loaded(rooms::use_webhooks(ctx, &room_id).await)?;
                output.emit(&hooks, |hooks| render::webhooks(hooks))
            }
            Self::Add { room_id, url } => {
                let hook = sent(rooms::create_webhook(ctx, &room_id, &url).await)?;
                output.emit(&hook, |hook| format!("Added webhook {} -> {}", hook.id, hook.url))
            }
            Self::Remove {
                room_id,
                webhook_id,
            } => {
                sent(rooms::delete_webhook(ctx, &room_id, &webhook_id).await)?;
                println!("Removed webhook {webhook_id}");
                Ok(())
            }
        }
    }
}
