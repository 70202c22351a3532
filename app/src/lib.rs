use std::path::PathBuf;

use aisid_core::analytics::{build_dashboard_payload, Distribution, IncidentStats};
use aisid_core::clock::{Clock, SystemClock};
use aisid_core::config::DashboardConfig;
use aisid_core::domain::{Category, Incident, Severity, Status};
use aisid_core::error::AppError;
use aisid_core::filter::{FilterPatch, FilterSpec, SortDirection, SortKey};
use aisid_core::format::{format_date, format_relative_time};
use aisid_core::normalize::timestamps::to_rfc3339;
use aisid_core::session::DashboardSession;
use aisid_core::validate::{add_affected_system, IncidentDraft};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Parser)]
#[command(
    name = "incidentdashboard",
    about = "Browse, filter and log AI safety incidents"
)]
pub struct Cli {
    /// Print JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Dashboard config file (JSON)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Filtered, sorted incident list
    List(ListArgs),
    /// One incident in full
    Show { id: String },
    /// Summary widget numbers
    Stats,
    /// Severity and category distribution
    Distribution,
    /// Log a new incident
    Add(AddArgs),
    /// Change an incident's status
    SetStatus { id: String, status: Status },
    /// Remove an incident
    Delete { id: String },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SortArg {
    Date,
    Severity,
    Title,
}

impl From<SortArg> for SortKey {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Date => SortKey::Date,
            SortArg::Severity => SortKey::Severity,
            SortArg::Title => SortKey::Title,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DirectionArg {
    Asc,
    Desc,
}

impl From<DirectionArg> for SortDirection {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::Asc => SortDirection::Asc,
            DirectionArg::Desc => SortDirection::Desc,
        }
    }
}

#[derive(Debug, Default, Args)]
pub struct ListArgs {
    /// Case-insensitive text to find in title or description
    #[arg(long)]
    pub search: Option<String>,
    #[arg(long)]
    pub severity: Option<Severity>,
    #[arg(long)]
    pub category: Option<Category>,
    #[arg(long)]
    pub status: Option<Status>,
    #[arg(long, value_enum)]
    pub sort_by: Option<SortArg>,
    #[arg(long, value_enum)]
    pub direction: Option<DirectionArg>,
}

impl ListArgs {
    fn into_patch(self) -> FilterPatch {
        FilterPatch {
            search: self.search,
            severity: self.severity.map(Some),
            category: self.category.map(Some),
            status: self.status.map(Some),
            sort_by: self.sort_by.map(SortKey::from),
            sort_direction: self.direction.map(SortDirection::from),
        }
    }
}

#[derive(Debug, Args)]
pub struct AddArgs {
    #[arg(long, default_value = "")]
    pub title: String,
    #[arg(long, default_value = "")]
    pub description: String,
    /// When it happened, e.g. 2024-03-15T14:30:00+01:00
    ///
    /// Dates without an offset (YYYY-MM-DDTHH:MM) are read as UTC, not local time.
    /// Give an explicit offset to record a local wall-clock time.
    #[arg(long, default_value = "", value_name = "UTC_OR_RFC3339")]
    pub date: String,
    #[arg(long, default_value = "medium")]
    pub severity: Severity,
    #[arg(long, default_value = "other")]
    pub category: Category,
    #[arg(long, default_value = "open")]
    pub status: Status,
    #[arg(long, default_value = "")]
    pub reported_by: String,
    #[arg(long, default_value = "")]
    pub location: String,
    #[arg(long, default_value = "")]
    pub impact: String,
    #[arg(long, default_value = "")]
    pub mitigation: String,
    /// Affected system; repeat for several
    #[arg(long = "system", value_name = "NAME")]
    pub systems: Vec<String>,
}

impl AddArgs {
    fn into_draft(self) -> IncidentDraft {
        let mut affected_systems = Vec::new();
        for name in &self.systems {
            add_affected_system(&mut affected_systems, name);
        }
        IncidentDraft {
            title: self.title,
            description: self.description,
            date: self.date,
            severity: self.severity,
            category: self.category,
            status: self.status,
            reported_by: self.reported_by,
            location: self.location,
            impact: self.impact,
            mitigation: self.mitigation,
            affected_systems,
        }
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<DashboardConfig, AppError> {
    match path {
        Some(path) => DashboardConfig::load(path),
        None => Ok(DashboardConfig::default()),
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, AppError> {
    serde_json::to_string_pretty(value).map_err(|e| {
        AppError::new("OUTPUT_SERIALIZE_FAILED", "Failed to serialize output")
            .with_details(e.to_string())
    })
}

fn render_list(incidents: &[Incident], filters: &FilterSpec) -> String {
    if incidents.is_empty() {
        return if filters.is_narrowing() {
            "No incidents match the current filters.\n".to_string()
        } else {
            "No incidents have been logged.\n".to_string()
        };
    }
    let mut out = String::new();
    for inc in incidents {
        out.push_str(&format!(
            "{:<14} {:<8} {:<13} {:<19} {:<24} {}\n",
            inc.id,
            inc.severity.label(),
            inc.status.label(),
            inc.category.label(),
            format_date(inc.date),
            inc.title
        ));
    }
    out.push_str(&format!("{} incident(s)\n", incidents.len()));
    out
}

fn render_detail(inc: &Incident, now: time::OffsetDateTime) -> Result<String, AppError> {
    let mut out = String::new();
    out.push_str(&format!("{}\n", inc.title));
    out.push_str(&format!(
        "[{}] [{}] [{}]\n\n",
        inc.severity.label(),
        inc.category.label(),
        inc.status.label()
    ));
    out.push_str(&format!("ID:               {}\n", inc.id));
    out.push_str(&format!("Date occurred:    {}\n", format_date(inc.date)));
    out.push_str(&format!("Reported by:      {}\n", inc.reported_by));
    if let Some(location) = &inc.location {
        out.push_str(&format!("Location:         {location}\n"));
    }
    out.push_str(&format!(
        "Affected systems: {}\n\n",
        inc.affected_systems.join(", ")
    ));
    out.push_str(&format!("{}\n", inc.description));
    for (heading, text) in [("Impact", &inc.impact), ("Mitigation", &inc.mitigation)] {
        if let Some(text) = text {
            out.push_str(&format!("\n{heading}:\n{text}\n"));
        }
    }
    out.push_str(&format!(
        "\nCreated {} ({})\nUpdated {} ({})\n",
        to_rfc3339(inc.created)?,
        format_relative_time(inc.created, now),
        to_rfc3339(inc.updated)?,
        format_relative_time(inc.updated, now)
    ));
    Ok(out)
}

fn render_stats(stats: &IncidentStats) -> String {
    format!(
        "High Priority:    {} (Critical: {} | High: {})\n\
         Active Incidents: {} (Open: {} | Investigating: {})\n\
         Total Incidents:  {}\n",
        stats.high_priority_incidents,
        stats.by_severity.critical,
        stats.by_severity.high,
        stats.active_incidents,
        stats.by_status.open,
        stats.by_status.investigating,
        stats.total
    )
}

const BAR_WIDTH: f64 = 30.0;

fn render_distribution(dist: &Distribution) -> String {
    let mut out = String::new();
    for (heading, buckets) in [
        ("Severity Distribution", &dist.severity),
        ("Category Distribution", &dist.category),
    ] {
        out.push_str(&format!("{heading}\n"));
        for b in buckets {
            let filled = (b.width_pct / 100.0 * BAR_WIDTH).round() as usize;
            out.push_str(&format!(
                "  {:<20} {:>3} {}\n",
                b.label,
                b.count,
                "#".repeat(filled)
            ));
        }
    }
    out
}

/// Run one command against a freshly started session and return what should be printed.
pub fn run(cli: Cli, clock: impl Clock + Clone + 'static) -> Result<String, AppError> {
    let config = load_config(cli.config.as_ref())?;
    let mut session = DashboardSession::from_config(&config, clock.clone())?;
    debug!(command = ?cli.command, "running command");

    match cli.command {
        Command::List(args) => {
            session.set_filter(args.into_patch());
            let visible = session.visible();
            if cli.json {
                to_json(&visible)
            } else {
                Ok(render_list(&visible, session.filters()))
            }
        }
        Command::Show { id } => {
            let incident = session.select(&id)?;
            if cli.json {
                to_json(incident)
            } else {
                render_detail(incident, clock.now())
            }
        }
        Command::Stats => {
            if cli.json {
                to_json(&build_dashboard_payload(session.store().list_all()))
            } else {
                Ok(render_stats(&session.stats()))
            }
        }
        Command::Distribution => {
            let dist = session.distribution();
            if cli.json {
                to_json(&dist)
            } else {
                Ok(render_distribution(&dist))
            }
        }
        Command::Add(args) => {
            let created = session.submit(&args.into_draft())?;
            if cli.json {
                to_json(&created)
            } else {
                Ok(format!("Logged incident {}\n", created.id))
            }
        }
        Command::SetStatus { id, status } => {
            let current = session
                .store()
                .get(&id)
                .cloned()
                .ok_or_else(|| AppError::not_found(&id))?;
            let saved = session.update(Incident { status, ..current })?;
            if cli.json {
                to_json(&saved)
            } else {
                Ok(format!("{} is now {}\n", saved.id, saved.status.label()))
            }
        }
        Command::Delete { id } => {
            let removed = session.delete(&id)?;
            if cli.json {
                to_json(&removed)
            } else {
                Ok(format!("Deleted incident {}\n", removed.id))
            }
        }
    }
}

/// Entry point used by the binary: real clock.
pub fn run_with_system_clock(cli: Cli) -> Result<String, AppError> {
    run(cli, SystemClock)
}
