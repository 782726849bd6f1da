//! URL building for named routes.
//!
//! Link generation never formats URLs itself; it asks a [`UrlBuilder`] for the
//! URL of a named route given a bag of route values. [`RouteTable`] is the
//! default builder, backed by path templates such as
//! `/api/companies/{companyId}/employees/{id}`.

use indexmap::IndexMap;
use url::Url;

use crate::context::RequestContext;
use crate::error::LinkError;

/// Route values keyed by placeholder name, in insertion order.
pub type RouteValues = IndexMap<String, String>;

/// Resolves named routes to absolute URLs.
pub trait UrlBuilder {
    /// Build the URL for `route` from `values`, falling back to the current
    /// request's route values for placeholders `values` does not set.
    ///
    /// # Errors
    ///
    /// Returns `LinkError` when the route is unknown, a placeholder has no
    /// value, or the context's base URL is unusable.
    fn build_url(
        &self,
        route: &str,
        values: &RouteValues,
        context: &RequestContext,
    ) -> Result<String, LinkError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct RouteTemplate {
    segments: Vec<Segment>,
}

impl RouteTemplate {
    fn parse(template: &str) -> Self {
        let segments = template
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| match s.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
                Some(key) if !key.is_empty() => Segment::Param(key.to_string()),
                _ => Segment::Literal(s.to_string()),
            })
            .collect();
        Self { segments }
    }
}

/// Named path templates.
///
/// Explicit values not used by a placeholder become query parameters (empty
/// values are left out). Context route values only ever fill placeholders.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: IndexMap<String, RouteTemplate>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `template` under `name`, replacing any previous template.
    pub fn route(mut self, name: impl Into<String>, template: &str) -> Self {
        self.routes.insert(name.into(), RouteTemplate::parse(template));
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.routes.contains_key(name)
    }
}

impl UrlBuilder for RouteTable {
    fn build_url(
        &self,
        route: &str,
        values: &RouteValues,
        context: &RequestContext,
    ) -> Result<String, LinkError> {
        let template = self.routes.get(route).ok_or_else(|| LinkError::UnknownRoute {
            route: route.to_string(),
        })?;

        let invalid_base = |message: String| LinkError::InvalidBaseUrl {
            url: context.base_url().to_string(),
            message,
        };
        let mut url = Url::parse(context.base_url()).map_err(|e| invalid_base(e.to_string()))?;

        let mut consumed: Vec<&str> = Vec::new();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|()| invalid_base("cannot be a base URL".to_string()))?;
            path.pop_if_empty();

            for segment in &template.segments {
                match segment {
                    Segment::Literal(literal) => {
                        path.push(literal);
                    }
                    Segment::Param(key) => {
                        let value = values
                            .get(key)
                            .map(String::as_str)
                            .or_else(|| context.route_value(key))
                            .filter(|v| !v.is_empty())
                            .ok_or_else(|| LinkError::MissingRouteValue {
                                route: route.to_string(),
                                key: key.clone(),
                            })?;
                        path.push(value);
                        consumed.push(key);
                    }
                }
            }
        }

        let query: Vec<(&str, &str)> = values
            .iter()
            .filter(|(key, value)| !value.is_empty() && !consumed.contains(&key.as_str()))
            .map(|(key, value)| (key.as_str(), value.as_str()))
            .collect();
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }

        Ok(url.into())
    }
}
