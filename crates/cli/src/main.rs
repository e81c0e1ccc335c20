//! tinysteps CLI - baby milestone tracker.

use std::path::PathBuf;
use anyhow::{anyhow, bail, Result};
use chrono::{Duration, NaiveDate};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use tinysteps_catalog::{Catalog, DanglingPolicy};
use tinysteps_core::age::{self, DATE_FORMAT};
use tinysteps_core::{chronological_age, Achievements, BabyProfile, Domain, Milestone, MilestoneId};
use tinysteps_progress::{
    attach_photo, clear_achievement, log_achievement, suggest, timeline_for, timing_label,
    DependencyResolver, ProgressTracker, QuestionnaireSession, DEFAULT_LIMIT,
};
use tinysteps_storage::{JsonStorage, Storage};

#[derive(Parser)]
#[command(name = "tinysteps")]
#[command(about = "Track a baby's developmental milestones", long_about = None)]
struct Cli {
    /// Directory holding profile.json and achievements.json
    #[arg(long, default_value = ".tinysteps")]
    data_dir: PathBuf,

    /// Milestone catalog file (JSON); the bundled catalog is used otherwise
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Refuse catalogs with dependencies on unknown milestones
    #[arg(long)]
    strict_catalog: bool,

    /// Evaluate as of this date instead of today (YYYY-MM-DD)
    #[arg(long)]
    today: Option<NaiveDate>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show or edit the baby profile
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },
    /// Unlocked milestones for every domain
    Domains,
    /// Unlocked milestones for one domain
    Eligible {
        /// Domain slug as shown by `tinysteps domains`, e.g. gross-motor
        #[arg(long)]
        domain: Domain,
    },
    /// Record a milestone as achieved
    Log {
        /// Milestone ID
        id: String,
        /// Date achieved (defaults to today)
        #[arg(long, conflicts_with = "days_ago")]
        date: Option<NaiveDate>,
        /// Date achieved, as days before today
        #[arg(long)]
        days_ago: Option<u32>,
        /// Photo payload to attach
        #[arg(long)]
        photo: Option<String>,
    },
    /// Remove a recorded achievement
    Unlog {
        /// Milestone ID
        id: String,
    },
    /// Attach a photo to an achievement, or clear it when omitted
    Photo {
        /// Milestone ID
        id: String,
        /// Photo payload
        photo: Option<String>,
    },
    /// Achievements grouped by age in months
    Timeline,
    /// Milestones to look out for next
    Suggest {
        /// Maximum number of suggestions
        #[arg(long, default_value_t = DEFAULT_LIMIT)]
        limit: usize,
    },
    /// Progress per domain
    Overview,
    /// Answer milestone questions in catalog order
    Quiz {
        /// Start at this milestone instead of the first one
        #[arg(long)]
        from: Option<String>,
        /// Comma-separated answers, e.g. y,n,y
        #[arg(long, value_delimiter = ',')]
        answers: Vec<String>,
        /// Date for "yes" answers (defaults to today)
        #[arg(long, conflicts_with = "days_ago")]
        date: Option<NaiveDate>,
        /// Date for "yes" answers, as days before today
        #[arg(long)]
        days_ago: Option<u32>,
    },
}

#[derive(Subcommand)]
enum ProfileAction {
    /// Set name and birth date
    Set {
        /// Baby's name
        #[arg(long)]
        name: String,
        /// Birth date (YYYY-MM-DD)
        #[arg(long)]
        dob: NaiveDate,
    },
    /// Show the profile and current age
    Show,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let today = cli.today.unwrap_or_else(|| chrono::Local::now().date_naive());

    let policy = if cli.strict_catalog {
        DanglingPolicy::Reject
    } else {
        DanglingPolicy::FailClosed
    };
    let catalog = match &cli.catalog {
        Some(path) => Catalog::from_path(path, policy)?,
        None => Catalog::bundled(policy)?,
    };

    let mut storage = JsonStorage::new(&cli.data_dir).await?;
    let profile = load_profile(&storage).await;
    let achievements = load_achievements(&storage).await;
    let age = chronological_age(&profile, today);

    match cli.command {
        Commands::Profile { action: ProfileAction::Set { name, dob } } => {
            if dob > today {
                bail!("Birth date {} is in the future", dob);
            }
            let profile = BabyProfile::new(name, dob.format(DATE_FORMAT).to_string());
            storage.save_profile(&profile).await?;
            info!(name = %profile.name, dob = %profile.dob, "saved profile");
            print_profile(&profile, today);
        }
        Commands::Profile { action: ProfileAction::Show } => {
            if !profile.is_complete() {
                println!("No profile yet. Run `tinysteps profile set --name <NAME> --dob <YYYY-MM-DD>`.");
                return Ok(());
            }
            print_profile(&profile, today);
        }
        Commands::Domains => {
            require_profile(&profile);
            for domain in Domain::ALL {
                print_domain(&catalog, &achievements, domain, age);
            }
        }
        Commands::Eligible { domain } => {
            require_profile(&profile);
            print_domain(&catalog, &achievements, domain, age);
        }
        Commands::Log { id, date, days_ago, photo } => {
            let milestone = find_milestone(&catalog, &id)?;
            let date = resolve_log_date(&profile, today, date, days_ago)?;
            let updated = log_achievement(&profile, &achievements, milestone, date, photo)?;
            storage.save_achievements(&updated).await?;
            println!(
                "Logged {} - {} on {} (age {})",
                milestone.id,
                milestone.description,
                date,
                profile
                    .birth_date()
                    .map(|birth| age::format_months(age::months_between(birth, date)))
                    .unwrap_or_default(),
            );
        }
        Commands::Unlog { id } => {
            let milestone = find_milestone(&catalog, &id)?;
            if !achievements.contains(milestone.storage_key()) {
                println!("{} was not logged", milestone.id);
                return Ok(());
            }
            let updated = clear_achievement(&achievements, milestone);
            storage.save_achievements(&updated).await?;
            println!("Removed {} - {}", milestone.id, milestone.description);
        }
        Commands::Photo { id, photo } => {
            let milestone = find_milestone(&catalog, &id)?;
            let cleared = photo.is_none();
            let updated = attach_photo(&achievements, milestone, photo)?;
            storage.save_achievements(&updated).await?;
            if cleared {
                println!("Cleared photo for {}", milestone.id);
            } else {
                println!("Attached photo to {}", milestone.id);
            }
        }
        Commands::Timeline => {
            let timeline = timeline_for(&profile, &achievements, &catalog);
            if timeline.is_empty() {
                println!("No milestones on the timeline yet");
                return Ok(());
            }

            for bucket in timeline {
                println!("Month {} ({})", bucket.month, age::format_months(bucket.month));
                for entry in bucket.entries {
                    println!(
                        "  {}  {} - {} [{}]{}",
                        entry.achieved_on,
                        entry.milestone.id,
                        entry.milestone.description,
                        entry.milestone.domain,
                        if entry.photo.is_some() { " (photo)" } else { "" },
                    );
                }
            }
        }
        Commands::Suggest { limit } => {
            require_profile(&profile);
            let groups = suggest(&catalog, &achievements, age, limit);
            if groups.is_empty() {
                println!("Nothing new to look out for right now");
                return Ok(());
            }

            println!("Suggestions at {}", age::format_months(age));
            for group in groups {
                println!("{}", group.domain);
                for milestone in group.milestones {
                    println!(
                        "  {} - {} ({}, {})",
                        milestone.id,
                        milestone.description,
                        age::format_months(milestone.typical_age),
                        timing_label(milestone.typical_age, age),
                    );
                }
            }
        }
        Commands::Overview => {
            require_profile(&profile);
            let snapshot = ProgressTracker::new(&catalog).snapshot(&achievements, age, today);

            for overview in &snapshot.domains {
                let progress = &overview.progress;
                println!(
                    "{}: {}/{} ({:.0}%), {} in the last 30 days",
                    progress.domain,
                    progress.achieved,
                    progress.total,
                    progress.percentage,
                    overview.recent_achievements,
                );
                for milestone in &overview.upcoming {
                    println!("  next: {} - {}", milestone.id, milestone.description);
                }
            }
            println!("{} milestones achieved across all areas", snapshot.total_achieved());
        }
        Commands::Quiz { from, answers, date, days_ago } => {
            let mut session = QuestionnaireSession::new(&catalog);
            match from {
                Some(id) => {
                    session.show(&MilestoneId::new(id))?;
                }
                None => {
                    session.start();
                }
            }

            let mut achievements = achievements;
            for answer in answers {
                let Some(milestone) = session.current() else {
                    break;
                };
                let (done, total) = session.position().unwrap_or((0, catalog.len()));
                println!("[{}/{}] {} -> {}", done, total, milestone.question, answer);

                achievements = match answer.trim().to_lowercase().as_str() {
                    "y" | "yes" => {
                        let date = resolve_log_date(&profile, today, date, days_ago)?;
                        session.answer_yes(&profile, &achievements, date)?
                    }
                    "n" | "no" => session.answer_no(&achievements)?,
                    other => bail!("Unrecognized answer: {} (expected y or n)", other),
                };
                storage.save_achievements(&achievements).await?;
            }

            match session.current() {
                Some(next) => println!("Next: {} ({})", next.question, next.domain),
                None => println!("Questionnaire complete"),
            }
        }
    }

    Ok(())
}

async fn load_profile(storage: &JsonStorage) -> BabyProfile {
    match storage.load_profile().await {
        Ok(profile) => profile.unwrap_or_default(),
        Err(e) => {
            warn!(error = %e, "failed to read profile, starting with an empty one");
            BabyProfile::default()
        }
    }
}

async fn load_achievements(storage: &JsonStorage) -> Achievements {
    match storage.load_achievements().await {
        Ok(achievements) => achievements,
        Err(e) => {
            warn!(error = %e, "failed to read achievements, starting with none");
            Achievements::new()
        }
    }
}

fn require_profile(profile: &BabyProfile) {
    if !profile.is_complete() {
        warn!("profile is incomplete; ages are treated as 0 months");
    }
}

fn find_milestone<'a>(catalog: &'a Catalog, id: &str) -> Result<&'a Milestone> {
    catalog
        .get(&MilestoneId::new(id))
        .ok_or_else(|| anyhow!("Unknown milestone: {}", id))
}

/// Pick the achievement date, bounded to the days between birth and today.
fn resolve_log_date(
    profile: &BabyProfile,
    today: NaiveDate,
    date: Option<NaiveDate>,
    days_ago: Option<u32>,
) -> Result<NaiveDate> {
    let birth = profile
        .birth_date()
        .ok_or_else(|| anyhow!("Set a profile with a birth date first"))?;

    let date = match (date, days_ago) {
        (Some(date), _) => date,
        (None, Some(days)) => {
            let max_days = age::elapsed_days(birth, today);
            if days > max_days {
                bail!("{} days ago is before the birth date ({} days ago)", days, max_days);
            }
            today - Duration::days(days as i64)
        }
        (None, None) => today,
    };

    if date > today {
        bail!("Achievement date {} is in the future", date);
    }
    Ok(date)
}

fn print_profile(profile: &BabyProfile, today: NaiveDate) {
    println!("Name: {}", profile.name);
    println!("Born: {}", profile.dob);
    if let Some(birth) = profile.birth_date() {
        println!("Age: {}", age::format_months(age::months_between(birth, today)));
        if let Some(description) = age::describe_age(birth, today) {
            println!("      {}", description);
        }
    }
}

fn print_domain(catalog: &Catalog, achievements: &Achievements, domain: Domain, age: u32) {
    let progress = ProgressTracker::new(catalog).domain_progress(achievements, domain);
    println!(
        "{} [{}] ({}/{} achieved, {:.0}%)",
        domain,
        domain.slug(),
        progress.achieved,
        progress.total,
        progress.percentage
    );

    let statuses = DependencyResolver::new(catalog).domain_statuses(achievements, domain, age);
    if statuses.is_empty() {
        println!("  (nothing unlocked)");
    }
    for status in statuses {
        let milestone = status.milestone;
        let flag = if status.overdue {
            format!(
                "  RED FLAG since {}",
                age::format_months(milestone.red_flag.first_raised_at())
            )
        } else {
            String::new()
        };
        println!(
            "  [{}] {} - {} ({}){}",
            if status.achieved { "x" } else { " " },
            milestone.id,
            milestone.description,
            age::format_months(milestone.typical_age),
            flag,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        age::parse_date(s).unwrap()
    }

    fn profile() -> BabyProfile {
        BabyProfile::new("Ada", "2024-01-15")
    }

    #[test]
    fn test_log_date_defaults_to_today() {
        let today = date("2024-03-10");
        assert_eq!(resolve_log_date(&profile(), today, None, None).unwrap(), today);
    }

    #[test]
    fn test_log_date_explicit() {
        let today = date("2024-03-10");
        let picked = date("2024-02-01");
        assert_eq!(resolve_log_date(&profile(), today, Some(picked), None).unwrap(), picked);
    }

    #[test]
    fn test_days_ago_bounded_by_birth() {
        let today = date("2024-01-25");

        // Ten days old: day 10 is the birth date itself
        assert_eq!(
            resolve_log_date(&profile(), today, None, Some(10)).unwrap(),
            date("2024-01-15")
        );
        assert_eq!(
            resolve_log_date(&profile(), today, None, Some(3)).unwrap(),
            date("2024-01-22")
        );
        assert!(resolve_log_date(&profile(), today, None, Some(11)).is_err());
    }

    #[test]
    fn test_future_date_rejected() {
        let today = date("2024-03-10");
        let err = resolve_log_date(&profile(), today, Some(date("2024-03-11")), None).unwrap_err();
        assert!(err.to_string().contains("future"));
    }

    #[test]
    fn test_requires_birth_date() {
        let today = date("2024-03-10");
        let incomplete = BabyProfile::new("Ada", "");
        assert!(resolve_log_date(&incomplete, today, None, None).is_err());
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_quiz_accepts_answer_date() {
        let cli = Cli::try_parse_from([
            "tinysteps", "--today", "2024-03-10", "quiz", "--answers", "y,n", "--days-ago", "2",
        ])
        .unwrap();
        match cli.command {
            Commands::Quiz { answers, date, days_ago, .. } => {
                assert_eq!(answers, vec!["y", "n"]);
                assert_eq!(date, None);
                assert_eq!(days_ago, Some(2));
            }
            _ => panic!("expected quiz"),
        }

        let conflict = Cli::try_parse_from([
            "tinysteps", "quiz", "--answers", "y", "--date", "2024-03-01", "--days-ago", "2",
        ]);
        assert!(conflict.is_err());
    }
}
