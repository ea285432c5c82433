use std::sync::Arc;

use anyhow::Context;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{
    field::{display, Empty},
    Instrument,
};

use crate::{
    incident::{generate_dedup_key, resolve_payload},
    middleware::{Map, Middleware},
    result::BestEffort,
    transport::{RestTransport, Transport},
    Delivery, IncidentHandle, NotifierConfig, OpenIncident,
};

/// Opens and resolves incidents on a best-effort basis.
///
/// Neither operation ever fails towards the caller. Problems are logged, recorded as the
/// `error` field of the operation's span, and reported as [`Delivery::Unconfirmed`].
pub struct IncidentNotifier<T = RestTransport> {
    service_id: String,
    transport: T,
    middleware: Vec<Arc<dyn Middleware + Send + Sync + 'static>>,
}

impl IncidentNotifier {
    pub fn new(config: NotifierConfig) -> Self {
        let service_id = config.service_id.clone();
        Self::with_transport(service_id, RestTransport::from_config(config))
    }
}

impl<T: Transport> IncidentNotifier<T> {
    pub fn with_transport(service_id: impl Into<String>, transport: T) -> Self {
        Self {
            service_id: service_id.into(),
            transport,
            middleware: Vec::new(),
        }
    }

    /// appends a middleware, see [`crate::middleware`]
    pub fn install<M: Middleware + Send + Sync + 'static>(mut self, middleware: M) -> Self {
        self.middleware.push(Arc::new(middleware));
        self
    }

    /// Installs a middleware that maps a function over opened incidents
    pub fn map<F: Fn(OpenIncident) -> OpenIncident + Send + Sync + 'static>(self, f: F) -> Self {
        self.install(Map::new(f))
    }

    pub fn service_id(&self) -> &str {
        &self.service_id
    }

    /// Opens an incident, returning its handle once the provider confirmed creation (HTTP 201).
    ///
    /// A missing dedup key is replaced with a fresh UUID.
    pub async fn open(&self, request: impl Into<OpenIncident>) -> Delivery<IncidentHandle> {
        let request = self
            .middleware
            .iter()
            .fold(request.into(), |request, middleware| middleware.process(request));
        let dedup_key = request
            .dedup_key
            .clone()
            .unwrap_or_else(generate_dedup_key);

        let span = tracing::info_span!(
            "open_incident",
            title = %request.title,
            dedup_key = %dedup_key,
            request = Empty,
            response = Empty,
            error = Empty
        );

        async {
            self.try_open(&request, &dedup_key).await.best_effort(|| {
                format!(
                    "Failed opening incident {:?} (dedup key {dedup_key})",
                    request.title
                )
            })
        }
        .instrument(span)
        .await
    }

    /// Marks an incident as resolved. Confirmed only on HTTP 200.
    pub async fn resolve(&self, id: &str) -> Delivery<()> {
        let span = tracing::info_span!(
            "resolve_incident",
            incident_id = %id,
            request = Empty,
            response = Empty,
            error = Empty
        );

        async {
            self.try_resolve(id)
                .await
                .best_effort(|| format!("Failed resolving incident {id}"))
        }
        .instrument(span)
        .await
    }

    async fn try_open(
        &self,
        request: &OpenIncident,
        dedup_key: &str,
    ) -> anyhow::Result<IncidentHandle> {
        #[derive(Deserialize)]
        struct Created {
            incident: CreatedIncident,
        }

        #[derive(Deserialize)]
        struct CreatedIncident {
            id: String,
            #[serde(default)]
            incident_key: Option<String>,
        }

        let span = tracing::Span::current();
        let payload = request.payload(&self.service_id, dedup_key);
        span.record("request", display(&payload));

        log::debug!("PagerDuty incident: {payload:?}");

        let resp = self
            .transport
            .post(&["incidents"], &payload)
            .await
            .with_context(|| format!("Failed sending incident {:?}", request.title))?;
        span.record("response", display(&resp.body));

        if resp.status != StatusCode::CREATED {
            anyhow::bail!(
                "Opening incident {:?} returned HTTP {}: {}",
                request.title,
                resp.status,
                resp.body
            );
        }

        let created: Created = serde_json::from_value(resp.body.clone())
            .with_context(|| format!("Unexpected response opening incident: {}", resp.body))?;

        let handle = IncidentHandle {
            id: created.incident.id,
            key: created
                .incident
                .incident_key
                .unwrap_or_else(|| dedup_key.to_owned()),
        };

        log::info!("Opened incident {} (dedup key {})", handle.id, handle.key);
        Ok(handle)
    }

    async fn try_resolve(&self, id: &str) -> anyhow::Result<()> {
        anyhow::ensure!(
            !matches!(id, "" | "." | ".."),
            "Invalid incident ID {id:?}"
        );

        let span = tracing::Span::current();
        let payload = resolve_payload();
        span.record("request", display(&payload));

        log::debug!("Resolving incident {id}");

        let resp = self
            .transport
            .put(&["incidents", id], &payload)
            .await
            .with_context(|| format!("Failed sending resolution of incident {id}"))?;
        span.record("response", display(&resp.body));

        if resp.status != StatusCode::OK {
            anyhow::bail!(
                "Resolving incident {id} returned HTTP {}: {}",
                resp.status,
                resp.body
            );
        }

        log::info!("Resolved incident {id}");
        Ok(())
    }
}
