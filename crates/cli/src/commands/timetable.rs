//! Timetable commands

use super::{loaded, parse, sent};
use crate::render::{self, Output};
use anyhow::{Context, Result, bail};
use clap::Subcommand;
use jiupluck_frontend_common::hooks::timetable;
use jiupluck_frontend_common::{AppContext, Route};
use jiupluck_http::types::{
    PeriodTemplate, TimetableData, TimetableEntry, TimetableTemplateCreate, Weekday,
};
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum TimetableCommands {
    /// Show your timetable
    Show,

    /// Approved period templates
    Templates,

    /// Put a course into a period, replacing whatever was there
    Set {
        weekday: Weekday,
        period: String,
        course: String,
    },

    /// Free a period
    Clear { weekday: Weekday, period: String },

    /// Replace the whole timetable with a JSON file ({"monday": [{"period", "course"}], ...})
    Import { file: PathBuf },

    /// Your free time on a weekday, computed by the server
    FreeSlots { weekday: Weekday },

    /// Submit a period template for admin review
    SubmitTemplate {
        #[arg(long)]
        school: String,

        #[arg(long)]
        name: String,

        /// Period as NAME=HH:MM-HH:MM, repeated in order
        #[arg(long = "period", required = true, value_parser = parse::period)]
        periods: Vec<PeriodTemplate>,
    },
}

impl TimetableCommands {
    pub const fn route(&self) -> Route {
        Route::Timetable
    }

    pub async fn execute(self, ctx: &AppContext, output: Output) -> Result<()> {
        match self {
            Self::Show => {
                let current = loaded(timetable::use_timetable(ctx).await)?;
                output.emit(&current.data, render::timetable)
            }
            Self::Templates => {
                let templates = loaded(timetable::use_timetable_templates(ctx).await)?;
                output.emit(&templates, |templates| render::templates(templates))
            }
            Self::Set {
                weekday,
                period,
                course,
            } => {
                let mut data = loaded(timetable::use_timetable(ctx).await)?.data;
                set_entry(&mut data, weekday, &period, Some(course));
                save(ctx, &data, output).await
            }
            Self::Clear { weekday, period } => {
                let mut data = loaded(timetable::use_timetable(ctx).await)?.data;
                if !set_entry(&mut data, weekday, &period, None) {
                    bail!("Nothing scheduled in period {period} on {weekday}");
                }
                save(ctx, &data, output).await
            }
            Self::Import { file } => {
                let content = std::fs::read_to_string(&file)
                    .with_context(|| format!("Failed to read {}", file.display()))?;
                let data: TimetableData = serde_json::from_str(&content)
                    .with_context(|| format!("{} is not a valid timetable", file.display()))?;
                save(ctx, &data, output).await
            }
            Self::FreeSlots { weekday } => {
                let slots = loaded(timetable::use_free_slots(ctx, weekday).await)?;
                output.emit(&slots, render::free_slots)
            }
            Self::SubmitTemplate {
                school,
                name,
                periods,
            } => {
                let request = TimetableTemplateCreate {
                    school,
                    name,
                    periods,
                };
                let template = sent(timetable::submit_template(ctx, &request).await)?;
                output.emit(&template, |template| {
                    format!("Submitted template {} for review (id {})", template.name, template.id)
                })
            }
        }
    }
}

async fn save(ctx: &AppContext, data: &TimetableData, output: Output) -> Result<()> {
    let saved = sent(timetable::save_timetable(ctx, data).await)?;
    output.emit(&saved.data, render::timetable)
}

/// Replace or remove the entry for `period`; returns whether anything changed
fn set_entry(data: &mut TimetableData, weekday: Weekday, period: &str, course: Option<String>) -> bool {
    let day = match weekday {
        Weekday::Monday => &mut data.monday,
        Weekday::Tuesday => &mut data.tuesday,
        Weekday::Wednesday => &mut data.wednesday,
        Weekday::Thursday => &mut data.thursday,
        Weekday::Friday => &mut data.friday,
        Weekday::Saturday => &mut data.saturday,
        Weekday::Sunday => &mut data.sunday,
    };
    let entries = day.get_or_insert_with(Vec::new);
    let before = entries.len();
    entries.retain(|entry| entry.period != period);
    let removed = entries.len() != before;

    let changed = if let Some(course) = course {
        entries.push(TimetableEntry {
            period: period.to_string(),
            course,
        });
        true
    } else {
        removed
    };

    if entries.is_empty() {
        *day = None;
    }
    changed
}
