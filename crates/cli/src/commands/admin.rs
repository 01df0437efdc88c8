//! Admin commands; the server rejects them for non-admin accounts

use super::{loaded, parse, sent};
use crate::render::{self, Output};
use anyhow::{Result, bail};
use clap::Subcommand;
use jiupluck_frontend_common::AppContext;
use jiupluck_frontend_common::hooks::admin;
use jiupluck_http::types::{
    PeriodTemplate, ReviewStatus, TemplateReview, TimetableTemplateCreate, UserUpdate,
};

#[derive(Subcommand)]
pub enum AdminCommands {
    /// Page through all users
    Users {
        #[arg(long, default_value_t = 0)]
        skip: u32,

        #[arg(long)]
        limit: Option<u32>,
    },

    /// Show one user
    User { user_id: String },

    /// Change a user's profile or flags
    UpdateUser {
        user_id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        school: Option<String>,

        #[arg(long)]
        major: Option<String>,

        #[arg(long)]
        active: Option<bool>,

        #[arg(long)]
        admin: Option<bool>,
    },

    /// Delete a user
    DeleteUser { user_id: String },

    /// Templates waiting for review
    PendingTemplates,

    /// Create an approved template directly
    CreateTemplate {
        #[arg(long)]
        school: String,

        #[arg(long)]
        name: String,

        /// Period as NAME=HH:MM-HH:MM, repeated in order
        #[arg(long = "period", required = true, value_parser = parse::period)]
        periods: Vec<PeriodTemplate>,
    },

    /// Approve or reject a submitted template
    Review {
        template_id: i64,

        /// approve or reject
        status: ReviewStatus,
    },
}

impl AdminCommands {
    pub async fn execute(self, ctx: &AppContext, output: Output) -> Result<()> {
        match self {
            Self::Users { skip, limit } => {
                let page = loaded(admin::use_users(ctx, skip, limit).await)?;
                output.emit(&page, |page| {
                    let mut lines: Vec<String> = page.users.iter().map(render::user).collect();
                    lines.push(format!(
                        "Showing {} of {} users from offset {skip}",
                        page.users.len(),
                        page.total
                    ));
                    lines.join("\n")
                })
            }
            Self::User { user_id } => {
                let user = loaded(admin::use_user(ctx, &user_id).await)?;
                output.emit(&user, render::user)
            }
            Self::UpdateUser {
                user_id,
                name,
                school,
                major,
                active,
                admin: is_admin,
            } => {
                let update = UserUpdate {
                    name,
                    school,
                    major,
                    is_active: active,
                    is_admin,
                };
                if update.is_empty() {
                    bail!("Nothing to update; pass at least one of --name, --school, --major, --active, --admin");
                }
                let user = sent(admin::update_user(ctx, &user_id, &update).await)?;
                output.emit(&user, render::user)
            }
            Self::DeleteUser { user_id } => {
                let response = sent(admin::delete_user(ctx, &user_id).await)?;
                output.emit(&response, |response| response.message.clone())
            }
            Self::PendingTemplates => {
                let templates = loaded(admin::use_pending_templates(ctx).await)?;
                output.emit(&templates, |templates| render::templates(templates))
            }
            Self::CreateTemplate {
                school,
                name,
                periods,
            } => {
                let request = TimetableTemplateCreate {
                    school,
                    name,
                    periods,
                };
                let template = sent(admin::create_template(ctx, &request).await)?;
                output.emit(&template, |template| {
                    format!("Created template {} (id {})", template.name, template.id)
                })
            }
            Self::Review {
                template_id,
                status,
            } => {
                sent(admin::review_template(ctx, template_id, TemplateReview { status }).await)?;
                let verdict = match status {
                    ReviewStatus::Approved => "Approved",
                    ReviewStatus::Rejected => "Rejected",
                };
                println!("{verdict} template {template_id}");
                Ok(())
            }
        }
    }
}
