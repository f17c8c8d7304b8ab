//! CLI entry point for faculty-loading
//!
//! Provides command-line access to the conflict checker and the roster:
//! checking candidates, assigning and unassigning subjects, listing
//! loads, and auditing for double bookings.

use clap::{ArgAction, Parser, Subcommand};
use colored::*;
use faculty_loading::config::{RosterError, RosterManager};
use faculty_loading::core::{parser::format_slot_list, CandidateRequest, Day, TimeRange};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "faculty-loading")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the roster file
    #[arg(short, long, global = true, default_value = "~/.config/faculty-loading/roster.toml")]
    roster: PathBuf,

    /// More log output (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether a subject can be assigned, without changing anything
    Check {
        /// Faculty id (e.g. F-001)
        faculty: String,
        /// Subject code (e.g. CS101)
        subject: String,
        /// Day of the week (Monday..Saturday)
        day: Day,
        /// Time range, HH:MM-HH:MM
        range: TimeRange,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Assign a subject on one or more days
    Assign {
        faculty: String,
        subject: String,
        /// Time range, HH:MM-HH:MM
        range: TimeRange,
        /// Day to assign on; repeat for a batch assignment
        #[arg(short, long = "day", required = true)]
        days: Vec<Day>,
    },

    /// Remove a subject from a faculty member (optionally one day only)
    Unassign {
        faculty: String,
        subject: String,
        #[arg(short, long)]
        day: Option<Day>,
    },

    /// List committed assignments
    List {
        /// Only this faculty member
        faculty: Option<String>,
    },

    /// Show a faculty member's declared availability
    Availability { faculty: String },

    /// Report every double booking in the roster
    Audit,

    /// List roster backups, newest first
    Backups,

    /// Restore the roster from a backup file
    Restore { backup: PathBuf },
}

/// JSON shape of `check --json`
#[derive(Serialize)]
struct CheckReport<'a> {
    candidate: &'a CandidateRequest,
    assignable: bool,
    issues: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    let roster_path = expand_path(&cli.roster)?;
    debug!(roster = %roster_path.display(), "using roster");

    match cli.command {
        Commands::Check {
            faculty,
            subject,
            day,
            range,
            json,
        } => check_candidate(&roster_path, &CandidateRequest::new(&faculty, &subject, day, range), json)?,
        Commands::Assign {
            faculty,
            subject,
            range,
            days,
        } => assign(&roster_path, &faculty, &subject, range, &days)?,
        Commands::Unassign { faculty, subject, day } => unassign(&roster_path, &faculty, &subject, day)?,
        Commands::List { faculty } => list_assignments(&roster_path, faculty.as_deref())?,
        Commands::Availability { faculty } => show_availability(&roster_path, &faculty)?,
        Commands::Audit => audit(&roster_path)?,
        Commands::Backups => list_backups(&roster_path)?,
        Commands::Restore { backup } => restore(&roster_path, &backup)?,
    }

    Ok(())
}

/// Installs the stderr log subscriber
fn init_logging(verbose: u8) -> anyhow::Result<()> {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to set up logging: {}", e))
}

/// Expands a leading `~` in the roster path
fn expand_path(path: &Path) -> anyhow::Result<PathBuf> {
    let expanded = shellexpand::tilde(
        path.to_str()
            .ok_or_else(|| anyhow::anyhow!("Invalid path encoding"))?,
    );
    Ok(PathBuf::from(expanded.as_ref()))
}

/// Check a candidate and print every reason it would be refused
fn check_candidate(roster_path: &Path, candidate: &CandidateRequest, json: bool) -> anyhow::Result<()> {
    let manager = RosterManager::new(roster_path.to_path_buf())?;
    let roster = manager.load()?;

    let issues = roster.check(candidate)?;

    if json {
        let report = CheckReport {
            candidate,
            assignable: issues.is_empty(),
            issues: issues.iter().map(ToString::to_string).collect(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if issues.is_empty() {
        println!("{} {} {}", "✓".green().bold(), "Assignable:".bold(), candidate);
    } else {
        println!(
            "{} Cannot assign {} ({} issue{}):",
            "✗".red().bold(),
            candidate,
            issues.len(),
            if issues.len() == 1 { "" } else { "s" }
        );
        for issue in &issues {
            println!("  {} {}", "•".dimmed(), issue.to_string().yellow());
        }
    }

    if !issues.is_empty() {
        std::process::exit(1);
    }

    Ok(())
}

/// Assign on one day (strict) or several days (batch, skipping bad days)
fn assign(
    roster_path: &Path,
    faculty: &str,
    subject: &str,
    range: TimeRange,
    days: &[Day],
) -> anyhow::Result<()> {
    let manager = RosterManager::new(roster_path.to_path_buf())?;
    let mut roster = manager.load()?;

    if let [day] = days {
        let candidate = CandidateRequest::new(faculty, subject, *day, range);
        match roster.assign(&candidate) {
            Ok(()) => {}
            Err(RosterError::Rejected(reason)) => {
                println!("{} {}", "✗ Assignment refused:".red().bold(), reason);
                std::process::exit(1);
            }
            Err(e) => return Err(e.into()),
        }

        manager.begin_transaction()?.commit(&roster)?;
        println!("{} Assigned {}", "✓".green(), candidate);
        return Ok(());
    }

    let plan = roster.assign_batch(faculty, subject, days.iter().copied(), range)?;

    if plan.is_empty() {
        println!(
            "{} No selected day can take {} {} for {}",
            "✗".red().bold(),
            subject,
            range,
            faculty
        );
        std::process::exit(1);
    }

    manager.begin_transaction()?.commit(&roster)?;

    let assigned = plan
        .assignable_days
        .iter()
        .map(Day::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    println!(
        "{} Assigned {} {} on {} of {} selected day(s): {}",
        "✓".green(),
        subject,
        range,
        plan.count,
        days.len(),
        assigned.cyan()
    );

    Ok(())
}

fn unassign(roster_path: &Path, faculty: &str, subject: &str, day: Option<Day>) -> anyhow::Result<()> {
    let manager = RosterManager::new(roster_path.to_path_buf())?;
    let mut roster = manager.load()?;

    let removed = roster.unassign(faculty, subject, day)?;
    manager.begin_transaction()?.commit(&roster)?;

    println!(
        "{} Removed {} slot{} of {} from {}",
        "✓".green(),
        removed,
        if removed == 1 { "" } else { "s" },
        subject,
        faculty
    );

    Ok(())
}

/// List committed assignments, grouped by faculty
fn list_assignments(roster_path: &Path, faculty: Option<&str>) -> anyhow::Result<()> {
    let manager = RosterManager::new(roster_path.to_path_buf())?;
    let roster = manager.load()?;

    if let Some(id) = faculty {
        roster.faculty(id)?;
    }

    println!("{}", format!("Assignments from: {}\n", roster_path.display()).bold());

    let mut total = 0;
    for member in roster
        .faculty
        .iter()
        .filter(|f| faculty.is_none_or(|id| f.id == id))
    {
        let assignments: Vec<_> = roster.assignments_for(&member.id).collect();
        if assignments.is_empty() && faculty.is_none() {
            continue;
        }

        println!("{}", member.to_string().cyan().bold());
        for assignment in &assignments {
            println!(
                "  {} {} → {}",
                assignment.subject.code.green(),
                assignment.subject.name,
                format_slot_list(&assignment.slots)
            );
        }
        total += assignments.len();
    }

    println!("\n{} Total: {} assignments", "✓".green(), total);
    Ok(())
}

fn show_availability(roster_path: &Path, faculty: &str) -> anyhow::Result<()> {
    let manager = RosterManager::new(roster_path.to_path_buf())?;
    let roster = manager.load()?;
    let member = roster.faculty(faculty)?;

    println!("{}", format!("Availability of {}\n", member).bold());

    if member.availability.is_empty() {
        println!("{}", "No availability declared".yellow());
        return Ok(());
    }

    for day in member.availability.days() {
        let windows = member
            .availability
            .windows_for(day)
            .iter()
            .map(TimeRange::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        println!("  {:<10} {}", day.to_string().cyan(), windows);
    }

    Ok(())
}

/// Report double bookings already present in the roster
fn audit(roster_path: &Path) -> anyhow::Result<()> {
    let manager = RosterManager::new(roster_path.to_path_buf())?;
    let roster = manager.load()?;

    let bookings = roster.audit();

    if bookings.is_empty() {
        println!("{} {}", "✓".green().bold(), "No double bookings detected!".bold());
        return Ok(());
    }

    println!(
        "{} Found {} double booking{}:\n",
        "✗".red().bold(),
        bookings.len(),
        if bookings.len() == 1 { "" } else { "s" }
    );

    for (i, booking) in bookings.iter().enumerate() {
        println!(
            "{} {}",
            format!("Booking {}", i + 1).yellow().bold(),
            booking.faculty_id.cyan()
        );
        println!("  {} {}", "1.".dimmed(), booking.first);
        println!("  {} {}", "2.".dimmed(), booking.second);
        println!();
    }

    std::process::exit(1);
}

fn list_backups(roster_path: &Path) -> anyhow::Result<()> {
    let manager = RosterManager::new(roster_path.to_path_buf())?;
    let backups = manager.list_backups()?;

    if backups.is_empty() {
        println!("{}", "No backups yet".yellow());
        return Ok(());
    }

    for backup in &backups {
        println!("{}", backup.display());
    }
    println!("\n{} {} backup(s) in {}", "✓".green(), backups.len(), manager.backup_dir().display());

    Ok(())
}

fn restore(roster_path: &Path, backup: &Path) -> anyhow::Result<()> {
    let manager = RosterManager::new(roster_path.to_path_buf())?;
    manager.restore_backup(backup)?;

    println!("{} Restored roster from {}", "✓".green(), backup.display());
    Ok(())
}
