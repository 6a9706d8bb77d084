//! Lernex administration CLI.
//!
//! Runs the certificate batch against the configured database: list paid
//! enrollments that have no certificate yet, issue certificates for them,
//! and add enrollments for manual bookkeeping.

use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use lernex_core::certificates::{EligibleCertificate, issue_certificate, scan_eligible};
use lernex_core::config::Settings;
use lernex_core::enrollment::enroll;
use lernex_core::store::PgStore;
use lernex_model::{ClassGroupID, CourseID, MentorshipID, Offering, UserID};

#[derive(Debug, Parser)]
#[command(name = "lernexctl", version, about = "Lernex administration CLI")]
struct Cli {
    /// Emit machine-readable JSON instead of tables.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Certificate eligibility and issuance.
    #[command(subcommand)]
    Certificates(CertificatesCommand),

    /// Enrollment bookkeeping.
    #[command(subcommand)]
    Enrollments(EnrollmentsCommand),
}

#[derive(Debug, Subcommand)]
enum CertificatesCommand {
    /// List paid enrollments with no issued certificate.
    Eligible,
    /// Issue a certificate for one eligible (user, offering) tuple.
    Issue(IssueArgs),
}

#[derive(Debug, Args)]
struct IssueArgs {
    #[arg(long)]
    user: Uuid,

    #[command(flatten)]
    offering: OfferingArg,
}

#[derive(Debug, Subcommand)]
enum EnrollmentsCommand {
    /// Insert an enrollment; duplicates are reported, not overwritten.
    Add(AddEnrollmentArgs),
}

#[derive(Debug, Args)]
struct AddEnrollmentArgs {
    #[arg(long)]
    user: Uuid,

    #[command(flatten)]
    offering: OfferingArg,
}

/// Exactly one offering selector.
#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
struct OfferingArg {
    #[arg(long)]
    course: Option<Uuid>,

    #[arg(long)]
    class_group: Option<Uuid>,

    #[arg(long)]
    mentorship: Option<Uuid>,
}

impl OfferingArg {
    fn to_offering(&self) -> anyhow::Result<Offering> {
        match (self.course, self.class_group, self.mentorship) {
            (Some(id), None, None) => Ok(Offering::Course(CourseID(id))),
            (None, Some(id), None) => Ok(Offering::ClassGroup(ClassGroupID(id))),
            (None, None, Some(id)) => Ok(Offering::Mentorship(MentorshipID(id))),
            _ => bail!("exactly one of --course, --class-group, --mentorship is required"),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    let settings = Settings::load().context("loading configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(settings.log_filter.clone())),
        )
        .init();

    let pool = PgPoolOptions::new()
        .max_connections(settings.database.max_connections)
        .connect(&settings.database.url)
        .await
        .with_context(|| format!("connecting to {}", settings.database.url))?;
    let store = PgStore::connect(pool)
        .await
        .context("preparing store schema")?;

    match cli.command {
        Command::Certificates(CertificatesCommand::Eligible) => {
            let eligible = scan_eligible(&store, &store).await?;
            print_eligible(&eligible, cli.json)?;
        }
        Command::Certificates(CertificatesCommand::Issue(args)) => {
            let offering = args.offering.to_offering()?;
            let candidate = EligibleCertificate {
                user_id: UserID(args.user),
                offering,
            };

            // Re-check eligibility so an already-issued tuple aborts
            // before any insert attempt.
            let eligible = scan_eligible(&store, &store).await?;
            if !eligible.contains(&candidate) {
                bail!(
                    "(user {}, {}) is not eligible: no paid enrollment or certificate already issued",
                    candidate.user_id,
                    candidate.offering
                );
            }

            let record = issue_certificate(&store, &candidate).await?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&record)?);
            } else {
                println!(
                    "issued {} to user {} for {}",
                    record.code, record.user_id, candidate.offering
                );
            }
        }
        Command::Enrollments(EnrollmentsCommand::Add(args)) => {
            let offering = args.offering.to_offering()?;
            let enrollment = enroll(&store, UserID(args.user), offering)
                .await
                .context("inserting enrollment")?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&enrollment)?);
            } else {
                println!(
                    "enrolled user {} in {} ({})",
                    enrollment.user_id, enrollment.offering, enrollment.payment_status
                );
            }
        }
    }

    Ok(())
}

fn print_eligible(eligible: &[EligibleCertificate], json: bool) -> anyhow::Result<()> {
    if json {
        let rows: Vec<serde_json::Value> = eligible
            .iter()
            .map(|e| {
                serde_json::json!({
                    "user_id": e.user_id.to_uuid(),
                    "offering_kind": e.kind().as_str(),
                    "offering_id": e.offering.to_uuid(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if eligible.is_empty() {
        println!("no eligible enrollments");
        return Ok(());
    }
    println!("{:<38} {:<12} {}", "user", "kind", "offering");
    for e in eligible {
        println!(
            "{:<38} {:<12} {}",
            e.user_id,
            e.kind().as_str(),
            e.offering.to_uuid()
        );
    }
    Ok(())
}
