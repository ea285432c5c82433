#![deny(warnings)]
#![deny(clippy::dbg_macro)]
//! Best-effort PagerDuty incident notifications.
//!
//! ```no_run
//! # async fn run() {
//! if let Some(notifier) = incident_notifier::bootstrap::from_env() {
//!     if let Some(handle) = notifier.open("DB down").await.confirmed() {
//!         let _ = notifier.resolve(&handle.id).await;
//!     }
//! }
//! # }
//! ```
mod config;
mod incident;
mod notifier;
mod policy;
mod result;

pub mod bootstrap;
pub mod middleware;
pub mod transport;

pub use config::NotifierConfig;
pub use incident::{IncidentHandle, OpenIncident};
pub use notifier::IncidentNotifier;
pub use policy::EscalationPolicy;
pub use result::Delivery;
