//! The `JobStore` trait — the contract a remote tabular store must satisfy.
//!
//! The trait is implemented by storage backends (`jobwatch-store-rest`,
//! `jobwatch-store-sqlite`). The client managers depend on this abstraction,
//! not on any concrete backend.

use std::future::Future;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
  alert::Alert,
  company::Company,
  subscription::{NewSubscription, Subscription},
};

/// Abstraction over the tabular store holding companies, subscriptions,
/// jobs, and alerts.
///
/// Every mutation is scoped by the owning user's id, so a write can never
/// cross users; a scoped delete or update that matches no row is an error,
/// never a silent no-op. No operation partially applies a single record.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes.
pub trait JobStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Reference data ────────────────────────────────────────────────────

  /// All companies, ordered by name ascending.
  fn list_companies(
    &self,
  ) -> impl Future<Output = Result<Vec<Company>, Self::Error>> + Send + '_;

  // ── Subscriptions ─────────────────────────────────────────────────────

  /// The user's subscriptions, each joined with its company's name when a
  /// company restriction is set. An absent join yields `company_name: None`.
  fn list_subscriptions(
    &self,
    user_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Subscription>, Self::Error>> + Send + '_;

  /// Insert a new subscription owned by `user_id` and return the persisted
  /// row. Each call is a distinct insert; idempotency is the caller's
  /// concern.
  fn insert_subscription(
    &self,
    user_id: Uuid,
    sub: NewSubscription,
  ) -> impl Future<Output = Result<Subscription, Self::Error>> + Send + '_;

  /// Delete the subscription with `subscription_id`, scoped to `user_id`.
  ///
  /// Returns an error when no row matches — a wrong owner looks exactly like
  /// a missing id.
  fn delete_subscription(
    &self,
    user_id: Uuid,
    subscription_id: i64,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Alerts ────────────────────────────────────────────────────────────

  /// Up to `limit` most-recent alerts for `user_id`, ordered by
  /// `created_at` descending, each joined with its job and the job's
  /// company name.
  ///
  /// A row with a missing job or company join fails the whole fetch; the
  /// engine never renders partial rows.
  fn list_alerts(
    &self,
    user_id: Uuid,
    limit: usize,
  ) -> impl Future<Output = Result<Vec<Alert>, Self::Error>> + Send + '_;

  /// Set `read_at` on the alert with `alert_id`, scoped to `user_id`.
  ///
  /// Idempotent: a second call is a harmless overwrite with a later stamp.
  /// Returns an error when no row matches the scope.
  fn mark_alert_read(
    &self,
    user_id: Uuid,
    alert_id: i64,
    read_at: DateTime<Utc>,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
