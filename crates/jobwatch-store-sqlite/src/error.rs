//! Error type for `jobwatch-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// Domain-level failures, including the missing-join integrity gap.
  #[error(transparent)]
  Core(#[from] jobwatch_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// A scoped delete matched no row — wrong owner or missing id.
  #[error("subscription not found: {0}")]
  SubscriptionNotFound(i64),

  /// A scoped read-stamp update matched no row.
  #[error("alert not found: {0}")]
  AlertNotFound(i64),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
