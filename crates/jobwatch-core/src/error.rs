//! Error type for `jobwatch-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// A subscription filter string that is empty once trimmed. Rejected
  /// locally, before any store call is issued.
  #[error("filter string cannot be blank")]
  EmptyFilter,

  /// An alert row whose job or company join was expected but absent.
  /// Store backends raise this for the whole fetch rather than returning
  /// partial rows.
  #[error("alert {0} is missing its job or company join")]
  MissingJoin(i64),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
