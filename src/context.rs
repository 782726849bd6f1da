//! Per-request context consumed by link generation.

use std::fmt;

use crate::error::MediaTypeError;
use crate::media::negotiate;
use crate::routes::RouteValues;

/// What the shaping layer needs to know about the current request.
///
/// Carries the already-negotiated response media type, the scheme/host link
/// targets are built against, and the route values of the current request
/// (used to fill route placeholders a link does not set explicitly).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    media_type: String,
    base_url: String,
    route_values: RouteValues,
}

impl RequestContext {
    pub fn new(base_url: impl Into<String>, media_type: impl Into<String>) -> Self {
        Self {
            media_type: media_type.into(),
            base_url: base_url.into(),
            route_values: RouteValues::new(),
        }
    }

    /// Build a context from the request's `Accept` header.
    ///
    /// # Errors
    ///
    /// Returns `MediaTypeError` when the header is missing, malformed, or
    /// names nothing in `supported`.
    pub fn from_accept(
        base_url: impl Into<String>,
        accept: Option<&str>,
        supported: &[&str],
    ) -> Result<Self, MediaTypeError> {
        let media_type = negotiate(accept, supported)?;
        Ok(Self::new(base_url, media_type))
    }

    /// Add a route value of the current request.
    pub fn with_route_value(mut self, key: impl Into<String>, value: impl fmt::Display) -> Self {
        self.route_values.insert(key.into(), value.to_string());
        self
    }

    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn route_values(&self) -> &RouteValues {
        &self.route_values
    }

    pub fn route_value(&self, key: &str) -> Option<&str> {
        self.route_values.get(key).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::SUPPORTED_MEDIA_TYPES;

    #[test]
    fn from_accept_stores_negotiated_type() {
        let ctx = RequestContext::from_accept(
            "http://localhost:5000",
            Some("application/vnd.codemaze.hateoas+json; charset=utf-8"),
            SUPPORTED_MEDIA_TYPES,
        )
        .unwrap();
        assert_eq!(ctx.media_type(), "application/vnd.codemaze.hateoas+json");
        assert_eq!(ctx.base_url(), "http://localhost:5000");
    }

    #[test]
    fn from_accept_propagates_negotiation_errors() {
        let result = RequestContext::from_accept("http://h", None, SUPPORTED_MEDIA_TYPES);
        assert_eq!(result, Err(MediaTypeError::Missing));
    }

    #[test]
    fn route_values_last_write_wins() {
        let ctx = RequestContext::new("http://h", "application/json")
            .with_route_value("companyId", 1)
            .with_route_value("companyId", 2);
        assert_eq!(ctx.route_value("companyId"), Some("2"));
        assert_eq!(ctx.route_values().len(), 1);
    }
}
