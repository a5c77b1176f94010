//! jobwatch CLI binary.
//!
//! A thin binding over the client managers: each subcommand opens a session
//! for the configured user, runs one intent, and prints the resulting
//! manager state. Reads `config.toml` (or the path given with `--config`)
//! plus `JOBWATCH_*` environment overrides.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use jobwatch_client::Session;
use jobwatch_core::{subscription::ALL_COMPANIES, user::User};
use jobwatch_store_rest::{RestConfig, RestStore};
use serde::Deserialize;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

/// Settings deserialised from config.toml / environment.
///
/// The identity fields stand in for the auth collaborator: a real deployment
/// would obtain them from a session token rather than configuration.
#[derive(Debug, Clone, Deserialize)]
struct Settings {
  base_url:   String,
  api_key:    String,
  user_id:    Uuid,
  user_email: String,
}

#[derive(Parser)]
#[command(author, version, about = "Job alert subscriptions from the terminal")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// List the companies available as subscription filters.
  Companies,

  /// List your subscriptions.
  Subscriptions,

  /// Create a subscription from a keyword filter.
  Subscribe {
    /// Keyword filter, e.g. "React".
    filter: String,

    /// Company id to restrict to, or "all".
    #[arg(long, default_value = ALL_COMPANIES)]
    company: String,

    /// Location filter, e.g. "Remote".
    #[arg(long, default_value = "")]
    location: String,
  },

  /// Delete a subscription by id.
  Unsubscribe { id: i64 },

  /// Show recent alerts, unread first.
  Alerts {
    /// Hide alerts that are already read.
    #[arg(long)]
    unread_only: bool,
  },

  /// Mark an alert read.
  MarkRead { id: i64 },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("JOBWATCH"))
    .build()
    .context("failed to read config file")?;
  let settings: Settings = settings
    .try_deserialize()
    .context("failed to deserialise settings")?;

  let store = RestStore::new(RestConfig {
    base_url: settings.base_url.clone(),
    api_key:  settings.api_key.clone(),
  })
  .context("failed to build store client")?;
  tracing::debug!(base_url = %settings.base_url, "store client configured");

  let user = User { id: settings.user_id, email: settings.user_email };
  let mut session = Session::open(user, Arc::new(store));

  match cli.command {
    Command::Companies => {
      session.subscriptions.load_companies().await;
      for company in &session.subscriptions.companies {
        println!("{:>6}  {}", company.id, company.name);
      }
      finish(session.subscriptions.error)
    }

    Command::Subscriptions => {
      session.subscriptions.load_subscriptions().await;
      print_subscriptions(&session);
      finish(session.subscriptions.error)
    }

    Command::Subscribe { filter, company, location } => {
      session.subscriptions.form.filter_string = filter;
      session.subscriptions.form.company_choice = company;
      session.subscriptions.form.location_filter = location;
      session.subscriptions.create_subscription().await;
      print_subscriptions(&session);
      finish(session.subscriptions.error)
    }

    Command::Unsubscribe { id } => {
      session.subscriptions.delete_subscription(id).await;
      print_subscriptions(&session);
      finish(session.subscriptions.error)
    }

    Command::Alerts { unread_only } => {
      session.alerts.show_unread_only = unread_only;
      session.alerts.load_alerts().await;
      let visible = session.alerts.visible_alerts();
      if visible.is_empty() && session.alerts.error.is_none() {
        println!(
          "{}",
          if unread_only { "No unread alerts." } else { "No alerts yet." }
        );
      }
      for alert in &visible {
        let marker = if alert.is_read() { ' ' } else { '•' };
        println!(
          "{marker} {:>6}  {}  {} — {} ({})",
          alert.id,
          alert.created_at.format("%Y-%m-%d %H:%M"),
          alert.job.title,
          alert.job.company_name,
          alert.job.display_location(),
        );
        println!("          {}", alert.job.url);
      }
      finish(session.alerts.error)
    }

    Command::MarkRead { id } => {
      session.alerts.load_alerts().await;
      if let Some(error) = session.alerts.error {
        return Err(anyhow::anyhow!(error));
      }
      if !session.alerts.alerts.iter().any(|a| a.id == id) {
        anyhow::bail!("alert {id} is not in the latest fetch");
      }
      session.alerts.mark_as_read(id).await;
      println!("Marked alert {id} read.");
      Ok(())
    }
  }
}

fn print_subscriptions<S: jobwatch_core::store::JobStore>(
  session: &Session<S>,
) {
  for sub in &session.subscriptions.subscriptions {
    println!(
      "{:>6}  {:?} at {} — {}",
      sub.id,
      sub.filter_string,
      sub.company_label(),
      sub.location_label(),
    );
  }
}

/// Map a manager's error state onto the process exit code.
fn finish(error: Option<String>) -> anyhow::Result<()> {
  match error {
    Some(message) => Err(anyhow::anyhow!(message)),
    None => Ok(()),
  }
}
