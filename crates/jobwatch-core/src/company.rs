//! Company — read-only reference data.
//!
//! Companies populate the subscription form's company filter. They have no
//! lifecycle inside the engine; the ingestion pipeline owns them.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
  pub id:   i64,
  pub name: String,
}
