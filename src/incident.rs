use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::EscalationPolicy;

/// A request to open an incident.
///
/// Only the title is required:
///
/// ```
/// use incident_notifier::{EscalationPolicy, OpenIncident};
///
/// let request = OpenIncident::builder()
///     .title("DB down")
///     .message("primary is not accepting connections")
///     .policy(EscalationPolicy::JustPersonA)
///     .build();
/// ```
#[derive(Clone, Debug, typed_builder::TypedBuilder)]
pub struct OpenIncident {
    #[builder(setter(into))]
    pub(crate) title: String,

    #[builder(default, setter(into))]
    pub(crate) message: String,

    #[builder(default)]
    pub(crate) policy: EscalationPolicy,

    #[builder(default, setter(into, strip_option))]
    pub(crate) dedup_key: Option<String>,
}

impl OpenIncident {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn policy(&self) -> EscalationPolicy {
        self.policy
    }

    pub fn dedup_key(&self) -> Option<&str> {
        self.dedup_key.as_deref()
    }

    pub fn with_policy(mut self, policy: EscalationPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_dedup_key(mut self, dedup_key: impl Into<String>) -> Self {
        self.dedup_key.replace(dedup_key.into());
        self
    }

    pub(crate) fn payload(&self, service_id: &str, dedup_key: &str) -> serde_json::Value {
        json!({
            "incident": {
                "type": "incident",
                "title": self.title,
                "service": {
                    "id": service_id,
                    "type": "service_reference",
                },
                "urgency": "high",
                "incident_key": dedup_key,
                "body": {
                    "type": "incident_body",
                    "details": self.message,
                },
            },
            "escalation_policy": {
                "id": self.policy.id(),
            },
        })
    }
}

impl From<&str> for OpenIncident {
    fn from(title: &str) -> Self {
        Self::builder().title(title).build()
    }
}

impl From<String> for OpenIncident {
    fn from(title: String) -> Self {
        Self::builder().title(title).build()
    }
}

/// Identifies an incident opened through the notifier
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncidentHandle {
    pub id: String,
    pub key: String,
}

pub(crate) fn resolve_payload() -> serde_json::Value {
    json!({
        "incident": {
            "type": "incident_reference",
            "status": "resolved",
        }
    })
}

pub(crate) fn generate_dedup_key() -> String {
    uuid::Uuid::new_v4().to_string()
}
