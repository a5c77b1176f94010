//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! All timestamps are stored as RFC 3339 strings. User UUIDs are stored as
//! hyphenated lowercase strings. Row ids are native SQLite integers.

use chrono::{DateTime, Utc};
use jobwatch_core::alert::{Alert, Job};
use uuid::Uuid;

use crate::{Error, Result};

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Alert rows ──────────────────────────────────────────────────────────────

/// An alert row as it comes off the LEFT-JOINed query, before the required
/// joins are checked.
pub struct RawAlertRow {
  pub id:                  i64,
  pub created_at:          String,
  pub read_at:             Option<String>,
  pub job_id:              Option<i64>,
  pub title:               Option<String>,
  pub location:            Option<String>,
  pub normalized_location: Option<String>,
  pub url:                 Option<String>,
  pub company_name:        Option<String>,
}

impl RawAlertRow {
  /// Promote to a typed [`Alert`], failing with a missing-join error when
  /// the job or its company did not resolve.
  pub fn decode(self) -> Result<Alert> {
    let (Some(job_id), Some(title), Some(url), Some(company_name)) =
      (self.job_id, self.title, self.url, self.company_name)
    else {
      return Err(jobwatch_core::Error::MissingJoin(self.id).into());
    };

    Ok(Alert {
      id:         self.id,
      created_at: decode_dt(&self.created_at)?,
      read_at:    self.read_at.as_deref().map(decode_dt).transpose()?,
      job:        Job {
        id: job_id,
        title,
        location: self.location,
        normalized_location: self.normalized_location,
        url,
        company_name,
      },
    })
  }
}
