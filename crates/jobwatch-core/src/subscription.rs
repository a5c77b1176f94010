//! Subscription — a user-defined job filter.
//!
//! A subscription is keyword text plus an optional company and an optional
//! location. It is never edited in place; the replacement path is delete and
//! recreate. Matching against jobs happens in an external pipeline, not here.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// The company-select sentinel meaning "no company restriction".
pub const ALL_COMPANIES: &str = "all";

/// A persisted subscription, as returned by a store backend.
///
/// `company_name` is the server-side join of `company_id`; an absent join
/// renders as "All Companies" and is not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
  pub id:              i64,
  pub filter_string:   String,
  pub company_id:      Option<i64>,
  pub location_filter: Option<String>,
  pub company_name:    Option<String>,
}

impl Subscription {
  /// Display text for the company restriction.
  pub fn company_label(&self) -> &str {
    if self.company_id.is_none() {
      return "All Companies";
    }
    self.company_name.as_deref().unwrap_or("Unknown Company")
  }

  /// Display text for the location restriction.
  pub fn location_label(&self) -> &str {
    self.location_filter.as_deref().unwrap_or("All Locations")
  }
}

// ─── New-subscription input ──────────────────────────────────────────────────

/// A validated, normalised subscription submission.
///
/// Built only through [`NewSubscription::from_form`], so every instance
/// upholds the non-empty-filter invariant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSubscription {
  pub filter_string:   String,
  pub company_id:      Option<i64>,
  pub location_filter: Option<String>,
}

impl NewSubscription {
  /// Normalise raw form input into a submission.
  ///
  /// - `filter` is trimmed; empty after trimming is a validation error.
  ///   Trim only — no case folding.
  /// - `company_choice` of [`ALL_COMPANIES`] means no restriction; anything
  ///   else is parsed as a company id, and unparsable input falls back to no
  ///   restriction rather than being rejected.
  /// - `location` is trimmed; empty becomes no restriction.
  pub fn from_form(
    filter: &str,
    company_choice: &str,
    location: &str,
  ) -> Result<Self> {
    let filter_string = filter.trim();
    if filter_string.is_empty() {
      return Err(Error::EmptyFilter);
    }

    let company_id = if company_choice == ALL_COMPANIES {
      None
    } else {
      company_choice.trim().parse::<i64>().ok()
    };

    let location = location.trim();
    let location_filter =
      if location.is_empty() { None } else { Some(location.to_owned()) };

    Ok(Self {
      filter_string: filter_string.to_owned(),
      company_id,
      location_filter,
    })
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
