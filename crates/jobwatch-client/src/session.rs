//! Session — one manager pair per signed-in user, plus the auth collaborator
//! contract.
//!
//! Auth-change delivery uses a `tokio::sync::watch` channel: the engine
//! subscribes once per session and teardown is simply dropping the receiver.
//! No process-wide singleton is involved.

use std::sync::Arc;

use jobwatch_core::{store::JobStore, user::User};
use tokio::sync::watch;

use crate::{alerts::AlertFeed, subscriptions::SubscriptionManager};

/// The authentication collaborator, as seen by this engine.
///
/// Identity is opaque here: the provider issues a [`User`] or nothing, and
/// pushes changes through the watch channel.
pub trait AuthProvider {
  fn current_user(&self) -> Option<User>;

  /// Subscribe to sign-in/sign-out transitions. The receiver always holds
  /// the latest value; dropping it is the unsubscribe.
  fn watch(&self) -> watch::Receiver<Option<User>>;
}

/// Wait for the next auth transition and return the new identity.
///
/// Returns `None` for sign-out and also when the provider itself has gone
/// away (channel closed).
pub async fn await_auth_change(
  rx: &mut watch::Receiver<Option<User>>,
) -> Option<User> {
  rx.changed().await.ok()?;
  rx.borrow_and_update().clone()
}

// ─── Session ─────────────────────────────────────────────────────────────────

/// The full client state for one signed-in user.
///
/// The two managers operate independently and make no ordering guarantee
/// relative to each other; within each manager, a reload triggered by a
/// mutation is only issued after that mutation completes.
pub struct Session<S> {
  pub user:          User,
  pub subscriptions: SubscriptionManager<S>,
  pub alerts:        AlertFeed<S>,
}

impl<S: JobStore> Session<S> {
  pub fn open(user: User, store: Arc<S>) -> Self {
    Self {
      user: user.clone(),
      subscriptions: SubscriptionManager::new(user.clone(), store.clone()),
      alerts: AlertFeed::new(user, store),
    }
  }

  /// Open a session for whoever is currently signed in, if anyone.
  pub fn attach(provider: &impl AuthProvider, store: Arc<S>) -> Option<Self> {
    provider.current_user().map(|user| Self::open(user, store))
  }

  /// Run the initial fetches. The subscription manager's two loads are
  /// sequenced; the alert fetch runs alongside them.
  pub async fn load_all(&mut self) {
    let Self { subscriptions, alerts, .. } = self;
    tokio::join!(
      async {
        subscriptions.load_companies().await;
        subscriptions.load_subscriptions().await;
      },
      alerts.load_alerts(),
    );
  }
}
