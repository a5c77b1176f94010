//! PostgREST-style HTTP backend for the jobwatch store.
//!
//! Speaks the filter/order/limit query dialect (`user_id=eq.<uuid>`,
//! `order=created_at.desc`) with embedded joins in the `select` string.
//! Mutations send `Prefer: return=representation` so a scoped delete or
//! update that matched no row is detectable rather than a silent no-op.

mod wire;

pub mod error;

use std::time::Duration;

use chrono::{DateTime, Utc};
use jobwatch_core::{
  alert::Alert,
  company::Company,
  store::JobStore,
  subscription::{NewSubscription, Subscription},
};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use uuid::Uuid;

pub use error::{Error, Result};

use crate::wire::{
  AlertRow, ErrorBody, InsertSubscriptionRow, ReadStampPatch, SubscriptionRow,
};

/// Embedded-join select for subscription rows.
const SUBSCRIPTION_SELECT: &str =
  "id,filter_string,company_id,location_filter,companies:company_id(name)";

/// Embedded-join select for alert rows; both nesting levels are required.
const ALERT_SELECT: &str = "id,created_at,read_at,jobs:job_id(id,title,\
                            location,normalized_location,url,\
                            companies:company_id(name))";

// ─── Config and store ────────────────────────────────────────────────────────

/// Connection settings for the remote store API.
#[derive(Debug, Clone)]
pub struct RestConfig {
  /// Base URL up to and including the REST root, e.g.
  /// `https://project.example.co/rest/v1`.
  pub base_url: String,
  pub api_key:  String,
}

/// A jobwatch store backed by a PostgREST-style HTTP API.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct RestStore {
  client: Client,
  config: RestConfig,
}

impl RestStore {
  pub fn new(config: RestConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()?;
    Ok(Self { client, config })
  }

  fn url(&self, path: &str) -> String {
    format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
  }

  fn auth(&self, req: RequestBuilder) -> RequestBuilder {
    req
      .header("apikey", &self.config.api_key)
      .bearer_auth(&self.config.api_key)
  }

  /// Turn a non-success response into [`Error::Remote`] carrying the
  /// server's own message.
  async fn check(resp: Response) -> Result<Response> {
    let status = resp.status();
    if status.is_success() {
      return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(Error::Remote(remote_message(status, &body)))
  }
}

/// Extract the user-facing message from an error response body, falling back
/// to the raw body and then the status line.
fn remote_message(status: StatusCode, body: &str) -> String {
  if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
    return parsed.message;
  }
  if body.trim().is_empty() {
    return format!("request failed with status {status}");
  }
  body.to_owned()
}

// ─── JobStore impl ───────────────────────────────────────────────────────────

impl JobStore for RestStore {
  type Error = Error;

  async fn list_companies(&self) -> Result<Vec<Company>> {
    let resp = self
      .auth(self.client.get(self.url("/companies")))
      .query(&[("select", "id,name"), ("order", "name")])
      .send()
      .await?;
    Ok(Self::check(resp).await?.json().await?)
  }

  async fn list_subscriptions(
    &self,
    user_id: Uuid,
  ) -> Result<Vec<Subscription>> {
    let scope = format!("eq.{user_id}");
    let resp = self
      .auth(self.client.get(self.url("/subscriptions")))
      .query(&[
        ("select", SUBSCRIPTION_SELECT),
        ("user_id", scope.as_str()),
        ("order", "id"),
      ])
      .send()
      .await?;
    let rows: Vec<SubscriptionRow> = Self::check(resp).await?.json().await?;
    Ok(rows.into_iter().map(SubscriptionRow::into_subscription).collect())
  }

  async fn insert_subscription(
    &self,
    user_id: Uuid,
    sub: NewSubscription,
  ) -> Result<Subscription> {
    let body = InsertSubscriptionRow {
      user_id,
      filter_string: sub.filter_string,
      company_id: sub.company_id,
      location_filter: sub.location_filter,
    };
    let resp = self
      .auth(self.client.post(self.url("/subscriptions")))
      .query(&[("select", SUBSCRIPTION_SELECT)])
      .header("Prefer", "return=representation")
      .json(&[body])
      .send()
      .await?;
    let rows: Vec<SubscriptionRow> = Self::check(resp).await?.json().await?;
    rows
      .into_iter()
      .next()
      .map(SubscriptionRow::into_subscription)
      .ok_or_else(|| Error::Remote("insert returned no representation".into()))
  }

  async fn delete_subscription(
    &self,
    user_id: Uuid,
    subscription_id: i64,
  ) -> Result<()> {
    let id_filter = format!("eq.{subscription_id}");
    let scope = format!("eq.{user_id}");
    let resp = self
      .auth(self.client.delete(self.url("/subscriptions")))
      .query(&[
        ("id", id_filter.as_str()),
        ("user_id", scope.as_str()),
      ])
      .header("Prefer", "return=representation")
      .send()
      .await?;
    let deleted: Vec<serde_json::Value> =
      Self::check(resp).await?.json().await?;
    if deleted.is_empty() {
      return Err(Error::SubscriptionNotFound(subscription_id));
    }
    Ok(())
  }

  async fn list_alerts(&self, user_id: Uuid, limit: usize) -> Result<Vec<Alert>> {
    let scope = format!("eq.{user_id}");
    let limit = limit.to_string();
    let resp = self
      .auth(self.client.get(self.url("/alerts")))
      .query(&[
        ("select", ALERT_SELECT),
        ("user_id", scope.as_str()),
        ("order", "created_at.desc"),
        ("limit", limit.as_str()),
      ])
      .send()
      .await?;
    let rows: Vec<AlertRow> = Self::check(resp).await?.json().await?;

    // A single unresolvable join rejects the whole batch.
    rows
      .into_iter()
      .map(|row| row.into_alert().map_err(Error::from))
      .collect()
  }

  async fn mark_alert_read(
    &self,
    user_id: Uuid,
    alert_id: i64,
    read_at: DateTime<Utc>,
  ) -> Result<()> {
    let id_filter = format!("eq.{alert_id}");
    let scope = format!("eq.{user_id}");
    let resp = self
      .auth(self.client.patch(self.url("/alerts")))
      .query(&[
        ("id", id_filter.as_str()),
        ("user_id", scope.as_str()),
      ])
      .header("Prefer", "return=representation")
      .json(&ReadStampPatch { read_at })
      .send()
      .await?;
    let updated: Vec<serde_json::Value> =
      Self::check(resp).await?.json().await?;
    if updated.is_empty() {
      return Err(Error::AlertNotFound(alert_id));
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests;
