//! Decode tests for the wire-row mapping, driven by JSON fixtures shaped
//! like real API responses.

use reqwest::StatusCode;

use crate::{
  remote_message,
  wire::{AlertRow, SubscriptionRow},
};

#[test]
fn alert_row_decodes_both_join_levels() {
  let json = r#"{
    "id": 7,
    "created_at": "2024-01-05T08:30:00+00:00",
    "read_at": null,
    "jobs": {
      "id": 3,
      "title": "Rust Engineer",
      "location": "NYC metro",
      "normalized_location": "New York, NY",
      "url": "https://example.com/jobs/3",
      "companies": { "name": "Acme" }
    }
  }"#;

  let row: AlertRow = serde_json::from_str(json).unwrap();
  let alert = row.into_alert().unwrap();
  assert_eq!(alert.id, 7);
  assert_eq!(alert.read_at, None);
  assert_eq!(alert.job.title, "Rust Engineer");
  assert_eq!(alert.job.company_name, "Acme");
}

#[test]
fn alert_row_without_job_is_an_integrity_gap() {
  let json = r#"{
    "id": 7,
    "created_at": "2024-01-05T08:30:00+00:00",
    "read_at": null,
    "jobs": null
  }"#;

  let row: AlertRow = serde_json::from_str(json).unwrap();
  assert!(matches!(
    row.into_alert(),
    Err(jobwatch_core::Error::MissingJoin(7))
  ));
}

#[test]
fn alert_row_without_company_is_an_integrity_gap() {
  let json = r#"{
    "id": 9,
    "created_at": "2024-01-05T08:30:00+00:00",
    "read_at": "2024-01-06T00:00:00+00:00",
    "jobs": {
      "id": 3,
      "title": "Rust Engineer",
      "location": null,
      "normalized_location": null,
      "url": "https://example.com/jobs/3",
      "companies": null
    }
  }"#;

  let row: AlertRow = serde_json::from_str(json).unwrap();
  assert!(matches!(
    row.into_alert(),
    Err(jobwatch_core::Error::MissingJoin(9))
  ));
}

#[test]
fn subscription_row_join_is_optional() {
  let json = r#"{
    "id": 2,
    "filter_string": "rust",
    "company_id": null,
    "location_filter": null,
    "companies": null
  }"#;

  let row: SubscriptionRow = serde_json::from_str(json).unwrap();
  let sub = row.into_subscription();
  assert_eq!(sub.company_name, None);
  assert_eq!(sub.company_label(), "All Companies");
}

#[test]
fn subscription_row_carries_the_joined_name() {
  let json = r#"{
    "id": 2,
    "filter_string": "rust",
    "company_id": 5,
    "location_filter": "Remote",
    "companies": { "name": "Acme" }
  }"#;

  let row: SubscriptionRow = serde_json::from_str(json).unwrap();
  let sub = row.into_subscription();
  assert_eq!(sub.company_name.as_deref(), Some("Acme"));
  assert_eq!(sub.location_filter.as_deref(), Some("Remote"));
}

// ─── Server error messages ───────────────────────────────────────────────────

#[test]
fn structured_error_body_yields_the_server_message() {
  let body = r#"{"message":"duplicate key value violates unique constraint"}"#;
  assert_eq!(
    remote_message(StatusCode::CONFLICT, body),
    "duplicate key value violates unique constraint"
  );
}

#[test]
fn unstructured_error_body_is_passed_through() {
  assert_eq!(
    remote_message(StatusCode::BAD_GATEWAY, "upstream unavailable"),
    "upstream unavailable"
  );
}

#[test]
fn empty_error_body_falls_back_to_the_status() {
  let message = remote_message(StatusCode::INTERNAL_SERVER_ERROR, "");
  assert!(message.contains("500"));
}
