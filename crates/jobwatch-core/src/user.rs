//! User — the opaque identity issued by the auth collaborator.
//!
//! The engine never creates or mutates users; it receives one per session
//! and scopes every read and write by its id.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A signed-in user, as handed over by the authentication provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
  pub id:    Uuid,
  pub email: String,
}
