use anyhow::Context;
use async_trait::async_trait;
use reqwest::{
    header::{ACCEPT, AUTHORIZATION, FROM},
    Method, StatusCode, Url,
};

use crate::NotifierConfig;

pub const DEFAULT_BASE_URL: &str = "https://api.pagerduty.com";
pub const DEFAULT_FROM: &str = "incident-notifier@example.com";

const ACCEPT_V2: &str = "application/vnd.pagerduty+json;version=2";

/// What came back from the provider. Status interpretation is left to the caller.
#[derive(Clone, Debug)]
pub struct Response {
    pub status: StatusCode,
    pub body: serde_json::Value,
}

/// Carries JSON requests to the incident provider.
///
/// `path` lists raw path segments, e.g. `["incidents", id]`. Each one must end up as exactly one
/// segment of the request path, whatever characters it contains.
///
/// Implementations only fail on transport-level problems (connection, URL, reading the body).
/// Any HTTP status, successful or not, is returned as a [`Response`].
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post(&self, path: &[&str], body: &serde_json::Value) -> anyhow::Result<Response>;

    async fn put(&self, path: &[&str], body: &serde_json::Value) -> anyhow::Result<Response>;
}

/// Talks to the [PagerDuty](https://pagerduty.com) REST API v2.
///
/// ```
/// use incident_notifier::transport::RestTransport;
///
/// let transport = RestTransport::builder()
///     .token("u+abcdef")
///     .from("oncall@example.com")
///     .build();
/// ```
#[derive(typed_builder::TypedBuilder)]
pub struct RestTransport {
    #[builder(setter(into))]
    token: String,

    #[builder(default = DEFAULT_FROM.to_owned(), setter(into))]
    from: String,

    #[builder(default, setter(strip_option, into))]
    base_url: Option<String>,

    /// timeouts and proxies are whatever this client is configured with
    #[builder(default)]
    client: reqwest::Client,
}

impl RestTransport {
    pub(crate) fn from_config(config: NotifierConfig) -> Self {
        Self {
            token: config.token,
            from: config.from,
            base_url: config.base_url,
            client: Default::default(),
        }
    }

    async fn send(
        &self,
        method: Method,
        path: &[&str],
        body: &serde_json::Value,
    ) -> anyhow::Result<Response> {
        let url = build_url(self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL), path)?;

        log::debug!("Sending {method} {url}");

        let resp = self
            .client
            .request(method, url)
            .header(AUTHORIZATION, format!("Token token={}", self.token))
            .header(ACCEPT, ACCEPT_V2)
            .header(FROM, self.from.as_str())
            .json(body)
            .send()
            .await
            .context("Failed sending HTTP request")?;

        let status = resp.status();
        let text = resp.text().await.context("Failed reading HTTP response")?;

        Ok(Response {
            status,
            body: parse_body(&text),
        })
    }
}

#[async_trait]
impl Transport for RestTransport {
    async fn post(&self, path: &[&str], body: &serde_json::Value) -> anyhow::Result<Response> {
        self.send(Method::POST, path, body).await
    }

    async fn put(&self, path: &[&str], body: &serde_json::Value) -> anyhow::Result<Response> {
        self.send(Method::PUT, path, body).await
    }
}

/// Appends `path` to the base URL's own path, percent-encoding every segment (including `/`, `?`
/// and `%`) so an identifier can never step outside its segment.
fn build_url(base_url: &str, path: &[&str]) -> anyhow::Result<Url> {
    if let Some(segment) = path
        .iter()
        .find(|segment| matches!(**segment, "" | "." | ".."))
    {
        anyhow::bail!("Invalid path segment {segment:?}");
    }

    let mut url = Url::parse(base_url).context("Cannot parse URL")?;
    url.path_segments_mut()
        .map_err(|_| anyhow::format_err!("Cannot use {base_url:?} as a base URL"))?
        .pop_if_empty()
        .extend(path);
    Ok(url)
}

/// non-JSON bodies are kept as strings so they still make it into logs
fn parse_body(text: &str) -> serde_json::Value {
    if text.trim().is_empty() {
        return serde_json::Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| serde_json::Value::String(text.to_owned()))
}
