//! Environment-driven construction of an [`IncidentNotifier`].
//!
//! Missing configuration is not an error: the integration simply stays off.
use crate::{IncidentNotifier, NotifierConfig};

pub const API_KEY_VAR: &str = "PAGERDUTY_API_KEY";
pub const SERVICE_ID_VAR: &str = "PAGERDUTY_SERVICE_ID";
pub const FROM_VAR: &str = "PAGERDUTY_FROM";
pub const BASE_URL_VAR: &str = "PAGERDUTY_BASE_URL";

/// Builds a notifier from the process environment, or returns `None` when either
/// [`API_KEY_VAR`] or [`SERVICE_ID_VAR`] is missing
pub fn from_env() -> Option<IncidentNotifier> {
    from_lookup(|name| std::env::var(name).ok())
}

pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Option<IncidentNotifier> {
    config_from_lookup(lookup).map(IncidentNotifier::new)
}

/// Empty values count as missing.
pub fn config_from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Option<NotifierConfig> {
    let read = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

    let token = read(API_KEY_VAR);
    if token.is_none() {
        log::warn!("{API_KEY_VAR} is not set, incident notifications are disabled");
    }

    let service_id = read(SERVICE_ID_VAR);
    if service_id.is_none() {
        log::warn!("{SERVICE_ID_VAR} is not set, incident notifications are disabled");
    }

    let mut config = NotifierConfig::builder()
        .token(token?)
        .service_id(service_id?)
        .build();

    if let Some(from) = read(FROM_VAR) {
        config.from = from;
    }
    if let Some(base_url) = read(BASE_URL_VAR) {
        config.base_url.replace(base_url);
    }

    log::debug!("Incident notifications enabled for service {}", config.service_id);
    Some(config)
}
