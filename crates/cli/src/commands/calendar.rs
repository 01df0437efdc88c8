//! Calendar linking commands

use super::{failure, loaded};
use crate::render::{self, Output};
use anyhow::Result;
use clap::Subcommand;
use jiupluck_frontend_common::AppContext;
use jiupluck_frontend_common::auth::error_messages::REQUEST_FAILED;
use jiupluck_frontend_common::hooks::calendar;
use jiupluck_http::types::{AppleConnectRequest, CalendarStatus};

#[derive(Subcommand)]
pub enum CalendarCommands {
    /// Which calendars are linked
    Status,

    /// Print the Google consent URL to open in a browser
    ConnectGoogle,

    /// Link an Apple calendar with an app-specific password
    ConnectApple {
        #[arg(long)]
        apple_id: String,

        #[arg(long, env = "JIUPLUCK_APPLE_PASSWORD", hide_env_values = true)]
        password: String,
    },
}

impl CalendarCommands {
    pub async fn execute(self, ctx: &AppContext, output: Output) -> Result<()> {
        match self {
            Self::Status => {
                let google = loaded(calendar::use_google_status(ctx).await)?;
                let apple = loaded(calendar::use_apple_status(ctx).await)?;
                let status = CalendarStatus {
                    google_connected: google.google_connected,
                    apple_connected: apple.apple_connected,
                };
                output.emit(&status, render::calendar_status)
            }
            Self::ConnectGoogle => {
                let response = calendar::google_auth_url(ctx)
                    .await
                    .map_err(|err| failure(&err, REQUEST_FAILED))?;
                output.emit(&response, |response| {
                    format!("Open this URL to link Google Calendar:\n{}", response.auth_url)
                })
            }
            Self::ConnectApple { apple_id, password } => {
                let credentials = AppleConnectRequest {
                    apple_id_email: apple_id,
                    app_specific_password: password,
                };
                let response = calendar::connect_apple(ctx, &credentials)
                    .await
                    .map_err(|err| failure(&err, REQUEST_FAILED))?;
                output.emit(&response, |response| response.message.clone())
            }
        }
    }
}
