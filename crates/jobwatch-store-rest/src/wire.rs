//! Wire-format rows for the PostgREST-style API, and their mapping to typed
//! domain records.
//!
//! Nested joins arrive as optional embedded objects. The mapping decides,
//! per field, whether an absent join is tolerable (`subscriptions →
//! companies`, rendered as "all companies") or an integrity gap (`alerts →
//! jobs → companies`, which rejects the row).

use chrono::{DateTime, Utc};
use jobwatch_core::{
  alert::{Alert, Job},
  subscription::Subscription,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The embedded `(name)` fragment of a company join.
#[derive(Debug, Deserialize)]
pub struct NameRow {
  pub name: String,
}

// ─── Subscriptions ───────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SubscriptionRow {
  pub id:              i64,
  pub filter_string:   String,
  pub company_id:      Option<i64>,
  pub location_filter: Option<String>,
  pub companies:       Option<NameRow>,
}

impl SubscriptionRow {
  /// The company join here is optional by design: no restriction, no join.
  pub fn into_subscription(self) -> Subscription {
    Subscription {
      id:              self.id,
      filter_string:   self.filter_string,
      company_id:      self.company_id,
      location_filter: self.location_filter,
      company_name:    self.companies.map(|c| c.name),
    }
  }
}

/// Insert payload; the store assigns the row id.
#[derive(Debug, Serialize)]
pub struct InsertSubscriptionRow {
  pub user_id:         Uuid,
  pub filter_string:   String,
  pub company_id:      Option<i64>,
  pub location_filter: Option<String>,
}

// ─── Alerts ──────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AlertRow {
  pub id:         i64,
  pub created_at: DateTime<Utc>,
  pub read_at:    Option<DateTime<Utc>>,
  pub jobs:       Option<JobRow>,
}

#[derive(Debug, Deserialize)]
pub struct JobRow {
  pub id:                  i64,
  pub title:               String,
  pub location:            Option<String>,
  pub normalized_location: Option<String>,
  pub url:                 String,
  pub companies:           Option<NameRow>,
}

impl AlertRow {
  /// Promote to a typed [`Alert`]. Both joins are required; an absent one is
  /// the integrity gap that fails the whole fetch.
  pub fn into_alert(self) -> Result<Alert, jobwatch_core::Error> {
    let Some(job) = self.jobs else {
      return Err(jobwatch_core::Error::MissingJoin(self.id));
    };
    let Some(company) = job.companies else {
      return Err(jobwatch_core::Error::MissingJoin(self.id));
    };

    Ok(Alert {
      id:         self.id,
      created_at: self.created_at,
      read_at:    self.read_at,
      job:        Job {
        id:                  job.id,
        title:               job.title,
        location:            job.location,
        normalized_location: job.normalized_location,
        url:                 job.url,
        company_name:        company.name,
      },
    })
  }
}

/// Patch payload for stamping an alert read.
#[derive(Debug, Serialize)]
pub struct ReadStampPatch {
  pub read_at: DateTime<Utc>,
}

// ─── Server errors ───────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
  pub message: String,
}
