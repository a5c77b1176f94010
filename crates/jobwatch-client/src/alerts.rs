//! Alert feed — owns the alert list, its derived view ordering, and the
//! optimistic read-state transition.

use std::{cmp::Ordering, sync::Arc};

use chrono::Utc;
use jobwatch_core::{alert::Alert, store::JobStore, user::User};

/// How many alerts one fetch retrieves, newest first.
pub const ALERT_FETCH_LIMIT: usize = 20;

/// Derive the display order for a set of alerts without touching the
/// canonical list.
///
/// With `show_unread_only` the result is exactly the unread subset, in fetch
/// order. Otherwise the result is a stable re-sort of a copy: unread before
/// read regardless of timestamps, then `created_at` descending within each
/// group, ties keeping fetch order. The comparator is a total order, so
/// calling this repeatedly on unchanged input yields identical output.
pub fn visible_alerts(
  alerts: &[Alert],
  show_unread_only: bool,
) -> Vec<&Alert> {
  if show_unread_only {
    return alerts.iter().filter(|a| !a.is_read()).collect();
  }

  let mut view: Vec<&Alert> = alerts.iter().collect();
  view.sort_by(|a, b| match (a.is_read(), b.is_read()) {
    (false, true) => Ordering::Less,
    (true, false) => Ordering::Greater,
    _ => b.created_at.cmp(&a.created_at),
  });
  view
}

// ─── Feed ────────────────────────────────────────────────────────────────────

/// State and intents for one user's alert feed.
///
/// `alerts` is a cache of remote truth in fetch order; display ordering is
/// always derived through [`visible_alerts`], never by reordering the cache.
pub struct AlertFeed<S> {
  user:  User,
  store: Arc<S>,

  /// Fetched alerts, newest first as returned by the store.
  pub alerts: Vec<Alert>,

  pub loading: bool,
  pub error:   Option<String>,

  /// When set, the derived view hides read alerts.
  pub show_unread_only: bool,
}

impl<S: JobStore> AlertFeed<S> {
  pub fn new(user: User, store: Arc<S>) -> Self {
    Self {
      user,
      store,
      alerts: Vec::new(),
      loading: false,
      error: None,
      show_unread_only: false,
    }
  }

  /// Fetch the most recent alerts (up to [`ALERT_FETCH_LIMIT`]).
  ///
  /// A missing job or company join fails the whole fetch at the store
  /// boundary and surfaces here as `error`; the prior list is kept on any
  /// failure.
  pub async fn load_alerts(&mut self) {
    self.loading = true;
    match self.store.list_alerts(self.user.id, ALERT_FETCH_LIMIT).await {
      Ok(alerts) => {
        self.alerts = alerts;
        self.error = None;
      }
      Err(e) => {
        tracing::error!(error = %e, "failed to load alerts");
        self.error = Some("Failed to load job alerts".to_owned());
      }
    }
    self.loading = false;
  }

  /// The alerts to display, per [`visible_alerts`].
  pub fn visible_alerts(&self) -> Vec<&Alert> {
    visible_alerts(&self.alerts, self.show_unread_only)
  }

  pub fn toggle_unread_only(&mut self) {
    self.show_unread_only = !self.show_unread_only;
  }

  /// Mark one alert read: stamp it locally first so the view reacts
  /// immediately, then persist the same stamp with a user-scoped update.
  ///
  /// Already-read (or locally unknown) alerts are a no-op. A remote failure
  /// is logged and the local stamp is kept — the divergence lasts until the
  /// next [`Self::load_alerts`] reconciles with the server.
  pub async fn mark_as_read(&mut self, alert_id: i64) {
    let Some(alert) = self.alerts.iter_mut().find(|a| a.id == alert_id)
    else {
      return;
    };
    if alert.is_read() {
      return;
    }

    let stamp = Utc::now();
    alert.read_at = Some(stamp);

    if let Err(e) =
      self.store.mark_alert_read(self.user.id, alert_id, stamp).await
    {
      tracing::warn!(alert_id, error = %e, "failed to persist read stamp");
    }
  }
}
