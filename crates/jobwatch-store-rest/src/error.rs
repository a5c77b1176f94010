//! Error type for `jobwatch-store-rest`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// Domain-level failures, including the missing-join integrity gap.
  #[error(transparent)]
  Core(#[from] jobwatch_core::Error),

  #[error("http error: {0}")]
  Http(#[from] reqwest::Error),

  /// A non-success response. Displays the server's own message text so the
  /// managers can surface it verbatim.
  #[error("{0}")]
  Remote(String),

  /// A scoped delete whose representation came back empty — wrong owner or
  /// missing id.
  #[error("subscription not found: {0}")]
  SubscriptionNotFound(i64),

  /// A scoped read-stamp update whose representation came back empty.
  #[error("alert not found: {0}")]
  AlertNotFound(i64),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
