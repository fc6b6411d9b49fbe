use anyhow::Context;
use clap::{Parser, Subcommand};

use outreach_core::{load_app_config, AppConfig, PersonaCatalog};
use outreach_llm::LlmClient;
use outreach_mailer::SmtpMailer;
use outreach_places::PlacesClient;
use outreach_scraper::{PageSpeedClient, WebClient};
use outreach_store::SheetsStore;

mod build;
mod followup;
mod send;

#[derive(Debug, Parser)]
#[command(name = "outreach")]
#[command(about = "Local-business outreach pipeline")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Discover, enrich, and draft emails for businesses matching a query
    BuildList {
        /// Free-text search, e.g. "landscapers in San Diego"
        query: String,
        /// Most new leads to pull from the places service
        #[arg(long, default_value_t = 20)]
        max_leads: usize,
    },
    /// Send pending drafts, up to the daily cap
    SendDaily {
        /// Send at most this many emails (never more than the daily cap)
        #[arg(long)]
        max_emails: Option<usize>,
    },
    /// Send scheduled follow-ups to previously contacted prospects
    SendFollowUps {
        /// Send at most this many follow-up emails
        #[arg(long, default_value_t = 25)]
        limit: usize,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // load_app_config pulls in .env before reading the environment.
    let config = load_app_config()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::BuildList { query, max_leads } => {
            run_build_command(&config, &query, max_leads).await
        }
        Commands::SendDaily { max_emails } => run_send_command(&config, max_emails).await,
        Commands::SendFollowUps { limit } => run_follow_up_command(&config, limit).await,
    }
}

fn sheets_store(config: &AppConfig) -> anyhow::Result<SheetsStore> {
    SheetsStore::with_base_url(
        &config.spreadsheet_id,
        &config.sheet_name,
        config.sheets_access_token.clone(),
        config.http_timeout_secs,
        &config.sheets_base_url,
    )
    .context("failed to build spreadsheet store")
}

async fn run_build_command(
    config: &AppConfig,
    query: &str,
    max_leads: usize,
) -> anyhow::Result<()> {
    let catalog = PersonaCatalog::load(&config.personas_path)
        .with_context(|| format!("failed to load personas from {}", config.personas_path.display()))?;

    let directory = PlacesClient::with_base_url(
        &config.maps_api_key,
        config.http_timeout_secs,
        &config.user_agent,
        config.max_retries,
        config.retry_backoff_base_secs.saturating_mul(1000),
        &config.places_base_url,
    )
    .context("failed to build places client")?;

    let presence = WebClient::new(config.http_timeout_secs, &config.user_agent)
        .context("failed to build web client")?;

    let probe = PageSpeedClient::with_base_url(
        &config.maps_api_key,
        config.http_timeout_secs,
        &config.user_agent,
        &config.pagespeed_base_url,
    )
    .context("failed to build page-speed client")?;

    let model = LlmClient::with_base_url(
        &config.llm_api_key,
        &config.llm_model,
        config.http_timeout_secs,
        &config.llm_base_url,
    )
    .context("failed to build chat client")?;

    let store = sheets_store(config)?;
    store
        .ensure_header()
        .await
        .context("failed to initialize the spreadsheet header")?;

    let deps = build::BuildDeps {
        directory: &directory,
        presence: &presence,
        probe: &probe,
        model: &model,
        store: &store,
        catalog: &catalog,
        inter_request_delay_ms: config.inter_request_delay_ms,
    };

    let summary = build::run_build(&deps, query, max_leads).await?;
    println!(
        "build-list: {} discovered, {} added ({} duplicates skipped, {} missing contact, {} generation failures)",
        summary.discovered,
        summary.added,
        summary.skipped_duplicates,
        summary.missing_contact,
        summary.generation_failures
    );
    Ok(())
}

fn smtp_mailer(config: &AppConfig) -> anyhow::Result<SmtpMailer> {
    if !config.smtp_ready() {
        anyhow::bail!(
            "SMTP is not configured: set OUTREACH_SMTP_USERNAME, OUTREACH_SMTP_PASSWORD, \
and OUTREACH_SENDER_EMAIL"
        );
    }
    // smtp_ready checked all three above.
    let (Some(username), Some(password), Some(sender)) = (
        config.smtp_username.as_deref(),
        config.smtp_password.as_deref(),
        config.sender_email.as_deref(),
    ) else {
        unreachable!("smtp_ready verified the credentials");
    };

    SmtpMailer::new(&config.smtp_server, config.smtp_port, username, password, sender)
        .context("failed to build SMTP transport")
}

async fn run_send_command(config: &AppConfig, max_emails: Option<usize>) -> anyhow::Result<()> {
    let mailer = smtp_mailer(config)?;
    let store = sheets_store(config)?;

    let cap = max_emails
        .unwrap_or(config.daily_send_cap)
        .min(config.daily_send_cap);

    let summary = send::run_send(&store, &mailer, cap).await?;
    println!(
        "send-daily: {} sent, {} failed ({} eligible, cap {})",
        summary.sent, summary.failed, summary.eligible, cap
    );
    Ok(())
}

async fn run_follow_up_command(config: &AppConfig, limit: usize) -> anyhow::Result<()> {
    let catalog = PersonaCatalog::load(&config.personas_path)
        .with_context(|| format!("failed to load personas from {}", config.personas_path.display()))?;
    let mailer = smtp_mailer(config)?;
    let store = sheets_store(config)?;

    let summary =
        followup::run_follow_ups(&store, &mailer, &catalog, limit, chrono::Utc::now()).await?;
    println!(
        "send-follow-ups: {} sent, {} failed ({} due, limit {})",
        summary.sent, summary.failed, summary.due, limit
    );
    Ok(())
}
