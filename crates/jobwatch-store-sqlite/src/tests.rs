//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::{DateTime, Utc};
use jobwatch_core::{
  store::JobStore,
  subscription::NewSubscription,
};
use uuid::Uuid;

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn ts(s: &str) -> DateTime<Utc> {
  s.parse().expect("test timestamp")
}

fn sub(filter: &str, company: &str) -> NewSubscription {
  NewSubscription::from_form(filter, company, "").expect("test subscription")
}

/// Seed one company, one job at it, and return `(company_id, job_id)`.
async fn seed_acme_job(s: &SqliteStore) -> (i64, i64) {
  let company = s.seed_company("Acme").await.unwrap();
  let job = s
    .seed_job(
      "Rust Engineer",
      Some("NYC metro"),
      Some("New York, NY"),
      "https://example.com/jobs/1",
      company.id,
    )
    .await
    .unwrap();
  (company.id, job)
}

// ─── Companies ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn companies_are_ordered_by_name() {
  let s = store().await;
  s.seed_company("Globex").await.unwrap();
  s.seed_company("Acme").await.unwrap();
  s.seed_company("Initech").await.unwrap();

  let companies = s.list_companies().await.unwrap();
  let names: Vec<_> = companies.iter().map(|c| c.name.as_str()).collect();
  assert_eq!(names, ["Acme", "Globex", "Initech"]);
}

// ─── Subscriptions ───────────────────────────────────────────────────────────

#[tokio::test]
async fn insert_returns_row_with_company_join() {
  let s = store().await;
  let user = Uuid::new_v4();
  let company = s.seed_company("Acme").await.unwrap();

  let created = s
    .insert_subscription(user, sub("rust", &company.id.to_string()))
    .await
    .unwrap();
  assert_eq!(created.filter_string, "rust");
  assert_eq!(created.company_id, Some(company.id));
  assert_eq!(created.company_name.as_deref(), Some("Acme"));
}

#[tokio::test]
async fn all_companies_subscription_has_no_join() {
  let s = store().await;
  let user = Uuid::new_v4();

  s.insert_subscription(user, sub("rust", "all")).await.unwrap();

  let listed = s.list_subscriptions(user).await.unwrap();
  assert_eq!(listed.len(), 1);
  assert_eq!(listed[0].company_id, None);
  assert_eq!(listed[0].company_name, None);
}

#[tokio::test]
async fn subscriptions_are_scoped_to_owner() {
  let s = store().await;
  let alice = Uuid::new_v4();
  let bob = Uuid::new_v4();

  s.insert_subscription(alice, sub("rust", "all")).await.unwrap();
  s.insert_subscription(bob, sub("go", "all")).await.unwrap();

  let alices = s.list_subscriptions(alice).await.unwrap();
  assert_eq!(alices.len(), 1);
  assert_eq!(alices[0].filter_string, "rust");
}

#[tokio::test]
async fn delete_removes_owned_row() {
  let s = store().await;
  let user = Uuid::new_v4();
  let created = s.insert_subscription(user, sub("rust", "all")).await.unwrap();

  s.delete_subscription(user, created.id).await.unwrap();
  assert!(s.list_subscriptions(user).await.unwrap().is_empty());
}

#[tokio::test]
async fn delete_with_wrong_owner_fails_and_keeps_row() {
  let s = store().await;
  let alice = Uuid::new_v4();
  let bob = Uuid::new_v4();
  let created =
    s.insert_subscription(alice, sub("rust", "all")).await.unwrap();

  let result = s.delete_subscription(bob, created.id).await;
  assert!(matches!(result, Err(Error::SubscriptionNotFound(_))));
  assert_eq!(s.list_subscriptions(alice).await.unwrap().len(), 1);
}

// ─── Alerts ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn alerts_come_back_newest_first() {
  let s = store().await;
  let user = Uuid::new_v4();
  let (_, job) = seed_acme_job(&s).await;

  s.push_alert(user, job, ts("2024-01-01T00:00:00Z")).await.unwrap();
  s.push_alert(user, job, ts("2024-01-05T00:00:00Z")).await.unwrap();
  s.push_alert(user, job, ts("2024-01-03T00:00:00Z")).await.unwrap();

  let alerts = s.list_alerts(user, 20).await.unwrap();
  let stamps: Vec<_> = alerts.iter().map(|a| a.created_at).collect();
  assert_eq!(
    stamps,
    [
      ts("2024-01-05T00:00:00Z"),
      ts("2024-01-03T00:00:00Z"),
      ts("2024-01-01T00:00:00Z"),
    ]
  );
}

#[tokio::test]
async fn alert_fetch_honours_limit() {
  let s = store().await;
  let user = Uuid::new_v4();
  let (_, job) = seed_acme_job(&s).await;

  s.push_alert(user, job, ts("2024-01-01T00:00:00Z")).await.unwrap();
  s.push_alert(user, job, ts("2024-01-02T00:00:00Z")).await.unwrap();
  s.push_alert(user, job, ts("2024-01-03T00:00:00Z")).await.unwrap();

  let alerts = s.list_alerts(user, 2).await.unwrap();
  assert_eq!(alerts.len(), 2);
  assert_eq!(alerts[0].created_at, ts("2024-01-03T00:00:00Z"));
}

#[tokio::test]
async fn alert_join_carries_job_and_company() {
  let s = store().await;
  let user = Uuid::new_v4();
  let (_, job) = seed_acme_job(&s).await;
  s.push_alert(user, job, ts("2024-01-01T00:00:00Z")).await.unwrap();

  let alerts = s.list_alerts(user, 20).await.unwrap();
  assert_eq!(alerts[0].job.title, "Rust Engineer");
  assert_eq!(alerts[0].job.company_name, "Acme");
  assert_eq!(alerts[0].job.display_location(), "New York, NY");
}

#[tokio::test]
async fn dangling_job_reference_fails_the_batch() {
  let s = store().await;
  let user = Uuid::new_v4();
  let (_, job) = seed_acme_job(&s).await;

  s.push_alert(user, job, ts("2024-01-01T00:00:00Z")).await.unwrap();
  // Reference a job the ingestion pipeline never wrote.
  s.push_alert(user, 9999, ts("2024-01-02T00:00:00Z")).await.unwrap();

  let result = s.list_alerts(user, 20).await;
  assert!(matches!(
    result,
    Err(Error::Core(jobwatch_core::Error::MissingJoin(_)))
  ));
}

#[tokio::test]
async fn alerts_are_scoped_to_owner() {
  let s = store().await;
  let alice = Uuid::new_v4();
  let bob = Uuid::new_v4();
  let (_, job) = seed_acme_job(&s).await;

  s.push_alert(alice, job, ts("2024-01-01T00:00:00Z")).await.unwrap();

  assert_eq!(s.list_alerts(alice, 20).await.unwrap().len(), 1);
  assert!(s.list_alerts(bob, 20).await.unwrap().is_empty());
}

// ─── Read stamps ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn mark_read_sets_the_stamp() {
  let s = store().await;
  let user = Uuid::new_v4();
  let (_, job) = seed_acme_job(&s).await;
  let alert =
    s.push_alert(user, job, ts("2024-01-01T00:00:00Z")).await.unwrap();

  let stamp = ts("2024-01-02T12:00:00Z");
  s.mark_alert_read(user, alert, stamp).await.unwrap();

  let alerts = s.list_alerts(user, 20).await.unwrap();
  assert_eq!(alerts[0].read_at, Some(stamp));
}

#[tokio::test]
async fn mark_read_twice_overwrites_harmlessly() {
  let s = store().await;
  let user = Uuid::new_v4();
  let (_, job) = seed_acme_job(&s).await;
  let alert =
    s.push_alert(user, job, ts("2024-01-01T00:00:00Z")).await.unwrap();

  s.mark_alert_read(user, alert, ts("2024-01-02T00:00:00Z")).await.unwrap();
  let later = ts("2024-01-03T00:00:00Z");
  s.mark_alert_read(user, alert, later).await.unwrap();

  let alerts = s.list_alerts(user, 20).await.unwrap();
  assert_eq!(alerts[0].read_at, Some(later));
}

#[tokio::test]
async fn mark_read_with_wrong_owner_fails() {
  let s = store().await;
  let alice = Uuid::new_v4();
  let bob = Uuid::new_v4();
  let (_, job) = seed_acme_job(&s).await;
  let alert =
    s.push_alert(alice, job, ts("2024-01-01T00:00:00Z")).await.unwrap();

  let result =
    s.mark_alert_read(bob, alert, ts("2024-01-02T00:00:00Z")).await;
  assert!(matches!(result, Err(Error::AlertNotFound(_))));

  // The owner still sees the alert unread.
  let alerts = s.list_alerts(alice, 20).await.unwrap();
  assert_eq!(alerts[0].read_at, None);
}
