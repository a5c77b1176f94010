//! Subscription manager — owns the user's subscription list and the company
//! reference set, and submits create/delete intents to the store.

use std::sync::Arc;

use jobwatch_core::{
  company::Company,
  store::JobStore,
  subscription::{ALL_COMPANIES, NewSubscription, Subscription},
  user::User,
};

// ─── Form ────────────────────────────────────────────────────────────────────

/// Raw input state for the create-subscription form.
///
/// Held as typed-so-far text; normalisation and validation happen in
/// [`NewSubscription::from_form`] at submit time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionForm {
  pub filter_string:   String,
  pub company_choice:  String,
  pub location_filter: String,
}

impl Default for SubscriptionForm {
  fn default() -> Self {
    Self {
      filter_string:   String::new(),
      company_choice:  ALL_COMPANIES.to_owned(),
      location_filter: String::new(),
    }
  }
}

// ─── Manager ─────────────────────────────────────────────────────────────────

/// State and intents for managing one user's subscriptions.
///
/// All store failures land in `error`; the cached lists are only replaced on
/// successful fetches, so a failed load never flickers existing rows away.
pub struct SubscriptionManager<S> {
  user:  User,
  store: Arc<S>,

  /// Companies usable as a filter, ordered by name.
  pub companies: Vec<Company>,

  /// The user's subscriptions, with company names joined server-side.
  pub subscriptions: Vec<Subscription>,

  /// Create-form input state; reset to defaults after a successful submit.
  pub form: SubscriptionForm,

  /// True while a create is in flight. The manager itself does not refuse
  /// concurrent submits; the view binding is expected to disable
  /// resubmission while this is set.
  pub loading: bool,

  /// Most recent failure, as user-visible text.
  pub error: Option<String>,
}

impl<S: JobStore> SubscriptionManager<S> {
  pub fn new(user: User, store: Arc<S>) -> Self {
    Self {
      user,
      store,
      companies: Vec::new(),
      subscriptions: Vec::new(),
      form: SubscriptionForm::default(),
      loading: false,
      error: None,
    }
  }

  // ── Loads ─────────────────────────────────────────────────────────────

  /// Fetch the company reference set. On failure the prior list is kept.
  pub async fn load_companies(&mut self) {
    match self.store.list_companies().await {
      Ok(companies) => self.companies = companies,
      Err(e) => {
        tracing::error!(error = %e, "failed to load companies");
        self.error = Some("Failed to load companies".to_owned());
      }
    }
  }

  /// Fetch the user's subscriptions. On failure the prior list is kept.
  pub async fn load_subscriptions(&mut self) {
    match self.store.list_subscriptions(self.user.id).await {
      Ok(subscriptions) => self.subscriptions = subscriptions,
      Err(e) => {
        tracing::error!(error = %e, "failed to load subscriptions");
        self.error = Some("Failed to load subscriptions".to_owned());
      }
    }
  }

  // ── Mutations ─────────────────────────────────────────────────────────

  /// Submit the current form.
  ///
  /// Validation failures (blank filter) surface as `error` without any
  /// store call. On success the form resets and the list is refetched in
  /// full — never locally appended — so the server-computed company join
  /// stays authoritative. On store failure the server's message is surfaced
  /// verbatim and the existing list is untouched.
  pub async fn create_subscription(&mut self) {
    let sub = match NewSubscription::from_form(
      &self.form.filter_string,
      &self.form.company_choice,
      &self.form.location_filter,
    ) {
      Ok(sub) => sub,
      Err(e) => {
        self.error = Some(e.to_string());
        return;
      }
    };

    self.loading = true;
    self.error = None;

    match self.store.insert_subscription(self.user.id, sub).await {
      Ok(_) => {
        self.form = SubscriptionForm::default();
        self.load_subscriptions().await;
      }
      Err(e) => self.error = Some(e.to_string()),
    }

    self.loading = false;
  }

  /// Delete one subscription, scoped to the current user.
  ///
  /// No optimistic removal: a failed delete must not silently disappear
  /// from view, so the list only changes via the post-success refetch.
  pub async fn delete_subscription(&mut self, subscription_id: i64) {
    match self
      .store
      .delete_subscription(self.user.id, subscription_id)
      .await
    {
      Ok(()) => self.load_subscriptions().await,
      Err(e) => self.error = Some(e.to_string()),
    }
  }
}
