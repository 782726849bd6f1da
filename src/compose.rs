//! Response composition - shaping plus optional hypermedia.
//!
//! The negotiated media type decides the response shape:
//!
//! - Plain media types get the shaped entities as-is:
//! ```json
//! [{ "id": "…", "name": "Ann" }]
//! ```
//!
//! - Media types containing `hateoas` get each entity with its own `Links`,
//!   wrapped together with a collection self link:
//! ```json
//! {
//!   "value": [{ "id": "…", "name": "Ann", "Links": [...] }],
//!   "links": [{ "href": "…", "rel": "self", "method": "GET" }]
//! }
//! ```

use std::fmt;

use tracing::debug;

use crate::context::RequestContext;
use crate::error::LinkError;
use crate::links::LinkFactory;
use crate::media::should_link;
use crate::routes::UrlBuilder;
use crate::shaper::DataShaper;
use crate::types::{LinkCollectionWrapper, LinkResponse, ShapeEntity};

/// Shapes a collection of `T` and attaches links when the client asked for them.
#[derive(Debug)]
pub struct LinkComposer<T, B> {
    shaper: DataShaper<T>,
    links: LinkFactory<B>,
}

impl<T, B: UrlBuilder> LinkComposer<T, B> {
    pub fn new(shaper: DataShaper<T>, links: LinkFactory<B>) -> Self {
        Self { shaper, links }
    }

    pub fn shaper(&self) -> &DataShaper<T> {
        &self.shaper
    }

    pub fn links(&self) -> &LinkFactory<B> {
        &self.links
    }

    /// Compose the response for `items`, children of `parent_id`.
    ///
    /// Output order and length always match `items`. An empty `items` with a
    /// linking media type yields an empty wrapper holding only the collection
    /// self link.
    ///
    /// # Errors
    ///
    /// Returns `LinkError` when linking is requested and a link target cannot
    /// be built. No partial response is produced in that case.
    pub fn compose(
        &self,
        items: &[T],
        fields: Option<&str>,
        parent_id: &impl fmt::Display,
        context: &RequestContext,
    ) -> Result<LinkResponse, LinkError> {
        let shaped = self.shaper.shape_many(items, fields);
        let linking = should_link(context.media_type());

        debug!(
            items = items.len(),
            fields = fields.unwrap_or(""),
            media_type = %context.media_type(),
            linking,
            "Composing response"
        );

        if !linking {
            return Ok(LinkResponse::Shaped(
                shaped.into_iter().map(|s| s.entity).collect(),
            ));
        }

        let context = context
            .clone()
            .with_route_value(self.links.routes().parent_key, parent_id);
        let fields = fields.unwrap_or("");

        let entities = shaped
            .into_iter()
            .map(|ShapeEntity { id, entity }| -> Result<_, LinkError> {
                let links = self.links.links_for_item(&context, parent_id, &id, fields)?;
                Ok(entity.with_links(links))
            })
            .collect::<Result<Vec<_>, LinkError>>()?;

        let wrapper = self
            .links
            .links_for_collection(&context, LinkCollectionWrapper::new(entities))?;

        Ok(LinkResponse::Linked(wrapper))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::links::ResourceRoutes;
    use crate::routes::RouteTable;
    use crate::shaper::FieldTable;
    use crate::types::{FieldValue, LINKS_FIELD};

    struct Row {
        id: i64,
        name: &'static str,
        age: u32,
    }

    fn composer() -> LinkComposer<Row, RouteTable> {
        let table = FieldTable::builder("id")
            .field("id", |r: &Row| r.id)
            .field("name", |r: &Row| r.name)
            .field("age", |r: &Row| r.age)
            .build()
            .unwrap();
        let routes = RouteTable::new()
            .route("List", "/api/owners/{ownerId}/rows")
            .route("Get", "/api/owners/{ownerId}/rows/{id}");
        let links = LinkFactory::new(
            routes,
            ResourceRoutes {
                resource: "row",
                parent_key: "ownerId",
                item_key: "id",
                get_item: "Get",
                delete_item: "Get",
                update_item: "Get",
                partially_update_item: "Get",
                list_items: "List",
            },
        );
        LinkComposer::new(DataShaper::new(table), links)
    }

    fn rows() -> Vec<Row> {
        vec![
            Row {
                id: 1,
                name: "Ann",
                age: 30,
            },
            Row {
                id: 2,
                name: "Bob",
                age: 41,
            },
        ]
    }

    #[test]
    fn plain_media_type_returns_shaped_entities() {
        let ctx = RequestContext::new("http://h", "application/json");
        let response = composer().compose(&rows(), Some("name"), &"o1", &ctx).unwrap();

        let entities = response.shaped_entities().unwrap();
        assert_eq!(entities.len(), 2);
        assert_eq!(entities[0].keys().collect::<Vec<_>>(), ["name", "id"]);
        assert!(entities.iter().all(|e| e.links().is_none()));
    }

    #[test]
    fn hateoas_media_type_links_every_entity() {
        let ctx = RequestContext::new("http://h", "application/vnd.x.hateoas+json");
        let response = composer().compose(&rows(), Some("age"), &"o1", &ctx).unwrap();

        let wrapper = response.linked_entities().unwrap();
        assert_eq!(wrapper.value().len(), 2);
        for (entity, expected_id) in wrapper.value().iter().zip([1, 2]) {
            assert_eq!(entity.get("id"), Some(&FieldValue::Int(expected_id)));
            assert_eq!(entity.keys().last(), Some(LINKS_FIELD));
            let links = entity.links().unwrap();
            assert_eq!(links.len(), 4);
            assert_eq!(
                links[0].href(),
                format!("http://h/api/owners/o1/rows/{}?fields=age", expected_id)
            );
        }
        assert_eq!(wrapper.links().len(), 1);
        assert_eq!(wrapper.links()[0].href(), "http://h/api/owners/o1/rows");
    }

    #[test]
    fn empty_items_with_links_has_collection_link_only() {
        let ctx = RequestContext::new("http://h", "application/vnd.x.hateoas+json");
        let response = composer().compose(&[], None, &"o1", &ctx).unwrap();

        let wrapper = response.linked_entities().unwrap();
        assert!(wrapper.value().is_empty());
        assert_eq!(wrapper.links().len(), 1);
        assert_eq!(wrapper.links()[0].rel(), "self");
    }

    #[test]
    fn link_failures_propagate() {
        let table = FieldTable::builder("id")
            .field("id", |r: &Row| r.id)
            .build()
            .unwrap();
        let routes = composer().links().routes().clone();
        let composer = LinkComposer::new(
            DataShaper::new(table),
            LinkFactory::new(RouteTable::new(), routes),
        );
        let ctx = RequestContext::new("http://h", "application/vnd.x.hateoas+json");

        let result = composer.compose(&rows(), None, &"o1", &ctx);
        assert!(matches!(result, Err(LinkError::UnknownRoute { .. })));

        let ctx = RequestContext::new("http://h", "application/json");
        assert!(composer.compose(&rows(), None, &"o1", &ctx).is_ok());
    }

    #[test]
    fn empty_identity_fails_only_when_linking() {
        let table = FieldTable::builder("id")
            .field("id", |_: &Row| "")
            .field("name", |r: &Row| r.name)
            .build()
            .unwrap();
        let links = LinkFactory::new(
            RouteTable::new()
                .route("List", "/api/owners/{ownerId}/rows")
                .route("Get", "/api/owners/{ownerId}/rows/{id}"),
            composer().links().routes().clone(),
        );
        let composer = LinkComposer::new(DataShaper::new(table), links);

        let ctx = RequestContext::new("http://h", "application/vnd.x.hateoas+json");
        assert_eq!(
            composer.compose(&rows(), None, &"o1", &ctx).unwrap_err(),
            LinkError::MissingRouteValue {
                route: "Get".into(),
                key: "id".into()
            }
        );

        let ctx = RequestContext::new("http://h", "application/json");
        assert!(composer.compose(&rows(), None, &"o1", &ctx).is_ok());
    }
}
