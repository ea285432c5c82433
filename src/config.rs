use crate::transport::DEFAULT_FROM;

/// Settings for an [`IncidentNotifier`](crate::IncidentNotifier) talking to PagerDuty.
///
/// ```
/// use incident_notifier::NotifierConfig;
///
/// let config = NotifierConfig::builder()
///     .token("u+abcdef")
///     .service_id("PSERVICE")
///     .build();
/// ```
///
/// Nothing is validated here; a bad token or service ID shows up as a failed `open`.
#[derive(Clone, typed_builder::TypedBuilder)]
pub struct NotifierConfig {
    #[builder(setter(into))]
    pub(crate) token: String,

    #[builder(setter(into))]
    pub(crate) service_id: String,

    /// sent as the `From` header, must belong to a PagerDuty user
    #[builder(default = DEFAULT_FROM.to_owned(), setter(into))]
    pub(crate) from: String,

    /// defaults to `https://api.pagerduty.com`; a path prefix such as `http://proxy/pd` is kept
    #[builder(default, setter(strip_option, into))]
    pub(crate) base_url: Option<String>,
}

impl NotifierConfig {
    pub fn service_id(&self) -> &str {
        &self.service_id
    }
}

impl std::fmt::Debug for NotifierConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotifierConfig")
            .field("token", &"<redacted>")
            .field("service_id", &self.service_id)
            .field("from", &self.from)
            .field("base_url", &self.base_url)
            .finish()
    }
}
