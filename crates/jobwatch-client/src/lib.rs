//! Client state engine for jobwatch.
//!
//! Two managers own all non-trivial state: [`SubscriptionManager`] (the
//! user's subscriptions plus the company reference set) and [`AlertFeed`]
//! (the alert list with its read/unread ordering rules). Both are generic
//! over any [`jobwatch_core::store::JobStore`] backend and turn every remote
//! failure into their own `error` text — nothing propagates past a manager.
//!
//! [`session::Session`] bundles one manager pair per signed-in user.

pub mod alerts;
pub mod session;
pub mod subscriptions;

pub use alerts::{ALERT_FETCH_LIMIT, AlertFeed, visible_alerts};
pub use session::{AuthProvider, Session};
pub use subscriptions::{SubscriptionForm, SubscriptionManager};
