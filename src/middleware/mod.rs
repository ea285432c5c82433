//! Transformations applied to every [`OpenIncident`] before it is sent.
//!
//! Middleware runs in installation order and before a dedup key is generated, so
//! [`DedupKeyPrefix`] only touches keys supplied by the caller.
use crate::OpenIncident;

pub trait Middleware {
    fn process(&self, request: OpenIncident) -> OpenIncident;
}

pub struct Map<F> {
    f: F,
}

impl<F: Fn(OpenIncident) -> OpenIncident> Map<F> {
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F: Fn(OpenIncident) -> OpenIncident> Middleware for Map<F> {
    fn process(&self, request: OpenIncident) -> OpenIncident {
        (self.f)(request)
    }
}

pub struct TitlePrefix {
    prefix: String,
}

impl TitlePrefix {
    pub fn new(prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        Self { prefix }
    }
}

impl Middleware for TitlePrefix {
    fn process(&self, mut request: OpenIncident) -> OpenIncident {
        request.title.insert_str(0, &self.prefix);
        request
    }
}

pub struct DedupKeyPrefix {
    prefix: String,
}

impl DedupKeyPrefix {
    pub fn new(prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        Self { prefix }
    }
}

impl Middleware for DedupKeyPrefix {
    fn process(&self, mut request: OpenIncident) -> OpenIncident {
        if let Some(dedup_key) = request.dedup_key.as_mut() {
            dedup_key.insert_str(0, &self.prefix);
        }
        request
    }
}
