//! CLI commands, one per page of the web client

mod admin;
mod auth;
mod calendar;
mod events;
mod parse;
mod rooms;
mod timetable;

use crate::config;
use crate::render::Output;
use anyhow::{Result, anyhow, bail};
use clap::Subcommand;
use jiupluck_core::ClientConfig;
use jiupluck_frontend_common::auth::AuthFlowError;
use jiupluck_frontend_common::auth::error_messages::{REQUEST_FAILED, user_message};
use jiupluck_frontend_common::{AppContext, GuardDecision, QueryResult, Route};
use jiupluck_http::ClientError;
use std::path::PathBuf;
use tracing::{debug, warn};

#[derive(Subcommand)]
pub enum Commands {
    /// Create an account; a verification code is mailed to you
    Signup {
        #[arg(long)]
        email: String,

        #[arg(long)]
        name: String,

        #[arg(long)]
        school: Option<String>,

        #[arg(long)]
        major: Option<String>,
    },

    /// Confirm your email address with the mailed code
    VerifyEmail {
        #[arg(long)]
        email: String,

        #[arg(long)]
        code: String,
    },

    /// Log in: without --code a one-time code is mailed, with --code it is redeemed
    Login {
        #[arg(long)]
        email: String,

        #[arg(long)]
        code: Option<String>,
    },

    /// Forget the stored tokens and cached data
    Logout,

    /// Exchange the stored refresh token for a new token pair
    Refresh,

    /// Show the logged-in user
    Whoami,

    /// Rooms, invites and webhooks
    Rooms {
        #[command(subcommand)]
        command: rooms::RoomCommands,
    },

    /// Room events, votes and public events
    Events {
        #[command(subcommand)]
        command: events::EventCommands,
    },

    /// Your timetable and free time
    Timetable {
        #[command(subcommand)]
        command: timetable::TimetableCommands,
    },

    /// Google and Apple calendar linking
    Calendar {
        #[command(subcommand)]
        command: calendar::CalendarCommands,
    },

    /// User management and template review
    Admin {
        #[command(subcommand)]
        command: admin::AdminCommands,
    },

    /// Client configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,

    /// Write the default configuration file
    Init {
        /// Output file path; `.json` or `.toml` picks the format
        output: PathBuf,
    },
}

impl Commands {
    /// View the command stands in for; `None` for local-only commands
    pub fn route(&self) -> Option<Route> {
        match self {
            Self::Signup { .. } => Some(Route::Signup),
            Self::VerifyEmail { .. } => Some(Route::VerifyEmail),
            Self::Login { .. } | Self::Logout => Some(Route::Login),
            Self::Refresh | Self::Whoami => Some(Route::Dashboard),
            Self::Rooms { command } => Some(command.route()),
            Self::Events { command } => Some(command.route()),
            Self::Timetable { command } => Some(command.route()),
            Self::Calendar { .. } => Some(Route::CalendarSettings),
            Self::Admin { .. } => Some(Route::Admin),
            Self::Config { .. } => None,
        }
    }

    pub async fn execute(self, ctx: &AppContext, config: &ClientConfig, output: Output) -> Result<()> {
        if let Some(route) = self.route() {
            ensure_allowed(ctx, route)?;
        }

        match self {
            Self::Signup {
                email,
                name,
                school,
                major,
            } => auth::signup(ctx, email, name, school, major, output).await,
            Self::VerifyEmail { email, code } => auth::verify_email(ctx, &email, &code, output).await,
            Self::Login { email, code } => auth::login(ctx, &email, code.as_deref(), output).await,
            Self::Logout => auth::logout(ctx),
            Self::Refresh => auth::refresh(ctx).await,
            Self::Whoami => auth::whoami(ctx, output).await,
            Self::Rooms { command } => command.execute(ctx, output).await,
            Self::Events { command } => command.execute(ctx, output).await,
            Self::Timetable { command } => command.execute(ctx, output).await,
            Self::Calendar { command } => command.execute(ctx, output).await,
            Self::Admin { command } => command.execute(ctx, output).await,
            Self::Config { command } => command.execute(config, output),
        }
    }
}

impl ConfigCommands {
    fn execute(self, config: &ClientConfig, output: Output) -> Result<()> {
        match self {
            Self::Show => output.emit(config, |config| {
                format!(
                    "API:       {}\nTimeout:   {}s\nState dir: {}",
                    config.api.base_url,
                    config.api.timeout_secs,
                    config.state_dir.display()
                )
            }),
            Self::Init { output: path } => {
                config::generate_default_config(&path)?;
                println!("Generated configuration at: {}", path.display());
                Ok(())
            }
        }
    }
}

/// Run the route guard; protected views need a stored access token
fn ensure_allowed(ctx: &AppContext, route: Route) -> Result<()> {
    match ctx.guard().check(route.clone()) {
        GuardDecision::Render(_) => {
            debug!(%route, "Route allowed");
            Ok(())
        }
        GuardDecision::Redirect(target) => {
            debug!(%route, %target, "Route redirected");
            bail!("{route} requires a logged-in session; run `jiupluck login --email <address>` first")
        }
    }
}

/// Turn a request failure into the message shown to the user
pub(crate) fn failure(err: &ClientError, fallback: &str) -> anyhow::Error {
    let message = user_message(err, fallback);
    if err.is_auth_failure() {
        warn!("Server rejected the stored access token");
        anyhow!("{message} (run `jiupluck refresh` or `jiupluck login` again)")
    } else {
        anyhow!(message)
    }
}

pub(crate) fn flow_failure(err: AuthFlowError, fallback: &str) -> anyhow::Error {
    if let AuthFlowError::Api(api) = &err {
        return failure(api, fallback);
    }
    err.into()
}

pub(crate) fn sent<T>(result: Result<T, ClientError>) -> Result<T> {
    result.map_err(|err| failure(&err, REQUEST_FAILED))
}

pub(crate) fn loaded<T>(result: QueryResult<T>) -> Result<T> {
    result
        .into_result()
        .map_err(|err| failure(&err, REQUEST_FAILED))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Harness {
        #[command(subcommand)]
        command: Commands,
    }

    fn route_of(args: &[&str]) -> Option<Route> {
        let argv = std::iter::once("jiupluck").chain(args.iter().copied());
        Harness::try_parse_from(argv).unwrap().command.route()
    }

    #[test]
    fn commands_map_to_views() {
        assert_eq!(route_of(&["login", "--email", "a@example.com"]), Some(Route::Login));
        assert_eq!(route_of(&["whoami"]), Some(Route::Dashboard));
        assert_eq!(route_of(&["rooms", "list"]), Some(Route::Rooms));
        assert_eq!(
            route_of(&["rooms", "invite", "r1", "b@example.com"]),
            Some(Route::Room("r1".into()))
        );
        assert_eq!(
            route_of(&["events", "vote", "r1", "e1", "--time", "0", "--vote", "yes"]),
            Some(Route::Event("e1".into()))
        );
        assert_eq!(route_of(&["timetable", "show"]), Some(Route::Timetable));
        assert_eq!(route_of(&["calendar", "status"]), Some(Route::CalendarSettings));
        assert_eq!(route_of(&["admin", "pending-templates"]), Some(Route::Admin));
        assert_eq!(route_of(&["config", "show"]), None);
    }

    #[tokio::test]
    async fn protected_commands_are_redirected_without_tokens() {
        use jiupluck_frontend_common::Session;
        use jiupluck_frontend_common::auth::MemoryStorage;
        use jiupluck_http::ApiClient;
        use std::sync::Arc;

        let base = ApiClient::new("http://127.0.0.1:9/api").unwrap();
        let ctx = AppContext::new(base, Session::new(Arc::new(MemoryStorage::new())));

        let err = Commands::Whoami
            .execute(&ctx, &ClientConfig::default(), Output::Text)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("jiupluck login"));
        assert!(ensure_allowed(&ctx, Route::Signup).is_ok());
    }
}
