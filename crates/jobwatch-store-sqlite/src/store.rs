//! [`SqliteStore`] — the SQLite implementation of [`JobStore`].

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use jobwatch_core::{
  alert::Alert,
  company::Company,
  store::JobStore,
  subscription::{NewSubscription, Subscription},
};

use crate::{
  Error, Result,
  encode::{RawAlertRow, encode_dt, encode_uuid},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A jobwatch store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  // ── Seed helpers ──────────────────────────────────────────────────────
  //
  // Companies, jobs, and alert rows are owned by the external ingestion
  // pipeline in production. These helpers stand in for it in development
  // and tests; they are not part of the `JobStore` contract.

  pub async fn seed_company(&self, name: &str) -> Result<Company> {
    let name = name.to_owned();
    let insert_name = name.clone();
    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO companies (name) VALUES (?1)",
          rusqlite::params![insert_name],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;
    Ok(Company { id, name })
  }

  pub async fn seed_job(
    &self,
    title: &str,
    location: Option<&str>,
    normalized_location: Option<&str>,
    url: &str,
    company_id: i64,
  ) -> Result<i64> {
    let title = title.to_owned();
    let location = location.map(str::to_owned);
    let normalized = normalized_location.map(str::to_owned);
    let url = url.to_owned();
    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO jobs (title, location, normalized_location, url, \
           company_id) VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![title, location, normalized, url, company_id],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;
    Ok(id)
  }

  /// Insert an unread alert row, as the ingestion pipeline would.
  pub async fn push_alert(
    &self,
    user_id: Uuid,
    job_id: i64,
    created_at: DateTime<Utc>,
  ) -> Result<i64> {
    let uid = encode_uuid(user_id);
    let at = encode_dt(created_at);
    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO alerts (user_id, job_id, created_at) \
           VALUES (?1, ?2, ?3)",
          rusqlite::params![uid, job_id, at],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;
    Ok(id)
  }
}

// ─── JobStore impl ───────────────────────────────────────────────────────────

impl JobStore for SqliteStore {
  type Error = Error;

  async fn list_companies(&self) -> Result<Vec<Company>> {
    self
      .conn
      .call(|conn| {
        let mut stmt =
          conn.prepare("SELECT id, name FROM companies ORDER BY name")?;
        let companies = stmt
          .query_map([], |row| {
            Ok(Company { id: row.get(0)?, name: row.get(1)? })
          })?
          .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;
        Ok(companies)
      })
      .await
      .map_err(Error::Database)
  }

  async fn list_subscriptions(
    &self,
    user_id: Uuid,
  ) -> Result<Vec<Subscription>> {
    let uid = encode_uuid(user_id);
    self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT s.id, s.filter_string, s.company_id, s.location_filter, \
                  c.name \
           FROM subscriptions s \
           LEFT JOIN companies c ON c.id = s.company_id \
           WHERE s.user_id = ?1 \
           ORDER BY s.id",
        )?;
        let subs = stmt
          .query_map(rusqlite::params![uid], |row| {
            Ok(Subscription {
              id:              row.get(0)?,
              filter_string:   row.get(1)?,
              company_id:      row.get(2)?,
              location_filter: row.get(3)?,
              company_name:    row.get(4)?,
            })
          })?
          .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;
        Ok(subs)
      })
      .await
      .map_err(Error::Database)
  }

  async fn insert_subscription(
    &self,
    user_id: Uuid,
    sub: NewSubscription,
  ) -> Result<Subscription> {
    let uid = encode_uuid(user_id);
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO subscriptions \
             (user_id, filter_string, company_id, location_filter) \
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![
            uid,
            sub.filter_string,
            sub.company_id,
            sub.location_filter
          ],
        )?;
        let id = conn.last_insert_rowid();

        let company_name: Option<String> = match sub.company_id {
          Some(cid) => conn
            .query_row(
              "SELECT name FROM companies WHERE id = ?1",
              rusqlite::params![cid],
              |row| row.get(0),
            )
            .optional()?,
          None => None,
        };

        Ok(Subscription {
          id,
          filter_string: sub.filter_string,
          company_id: sub.company_id,
          location_filter: sub.location_filter,
          company_name,
        })
      })
      .await
      .map_err(Error::Database)
  }

  async fn delete_subscription(
    &self,
    user_id: Uuid,
    subscription_id: i64,
  ) -> Result<()> {
    let uid = encode_uuid(user_id);
    let affected = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM subscriptions WHERE id = ?1 AND user_id = ?2",
          rusqlite::params![subscription_id, uid],
        )?)
      })
      .await?;

    if affected == 0 {
      return Err(Error::SubscriptionNotFound(subscription_id));
    }
    Ok(())
  }

  async fn list_alerts(&self, user_id: Uuid, limit: usize) -> Result<Vec<Alert>> {
    let uid = encode_uuid(user_id);
    let limit = limit as i64;
    let raw = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT a.id, a.created_at, a.read_at, \
                  j.id, j.title, j.location, j.normalized_location, j.url, \
                  c.name \
           FROM alerts a \
           LEFT JOIN jobs j      ON j.id = a.job_id \
           LEFT JOIN companies c ON c.id = j.company_id \
           WHERE a.user_id = ?1 \
           ORDER BY a.created_at DESC \
           LIMIT ?2",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![uid, limit], |row| {
            Ok(RawAlertRow {
              id:                  row.get(0)?,
              created_at:          row.get(1)?,
              read_at:             row.get(2)?,
              job_id:              row.get(3)?,
              title:               row.get(4)?,
              location:            row.get(5)?,
              normalized_location: row.get(6)?,
              url:                 row.get(7)?,
              company_name:        row.get(8)?,
            })
          })?
          .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;
        Ok(rows)
      })
      .await?;

    // A single unresolvable join rejects the whole batch.
    raw.into_iter().map(RawAlertRow::decode).collect()
  }

  async fn mark_alert_read(
    &self,
    user_id: Uuid,
    alert_id: i64,
    read_at: DateTime<Utc>,
  ) -> Result<()> {
    let uid = encode_uuid(user_id);
    let at = encode_dt(read_at);
    let affected = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE alerts SET read_at = ?1 WHERE id = ?2 AND user_id = ?3",
          rusqlite::params![at, alert_id, uid],
        )?)
      })
      .await?;

    if affected == 0 {
      return Err(Error::AlertNotFound(alert_id));
    }
    Ok(())
  }
}
