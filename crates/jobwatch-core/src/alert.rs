//! Alert — a per-user record linking a matched job to a read/unread state.
//!
//! Alerts are created exclusively by the external ingestion pipeline. The
//! only mutation this engine ever performs is stamping `read_at`, exactly
//! once; a stamp is never cleared.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The job a given alert points at, with its company name already joined.
///
/// The join is required: an alert whose job or company cannot be resolved is
/// an integrity error at the store boundary, never a partially-filled row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
  pub id:                  i64,
  pub title:               String,
  pub location:            Option<String>,
  pub normalized_location: Option<String>,
  pub url:                 String,
  pub company_name:        String,
}

impl Job {
  /// Display text for the job's location, preferring the normalised form.
  pub fn display_location(&self) -> &str {
    self
      .normalized_location
      .as_deref()
      .or(self.location.as_deref())
      .unwrap_or("Location not specified")
  }
}

/// A single alert row.
///
/// `read_at`, when present, is at or after `created_at` and is monotonic:
/// once set it is never cleared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
  pub id:         i64,
  pub created_at: DateTime<Utc>,
  pub read_at:    Option<DateTime<Utc>>,
  pub job:        Job,
}

impl Alert {
  pub fn is_read(&self) -> bool { self.read_at.is_some() }
}
