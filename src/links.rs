//! Link generation for child resources nested under a parent.

use std::fmt;

use tracing::trace;

use crate::context::RequestContext;
use crate::error::LinkError;
use crate::routes::{RouteValues, UrlBuilder};
use crate::types::{Link, LinkCollectionWrapper};

/// Route names and value keys for one child resource type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRoutes {
    /// Singular resource name used in relation names (e.g. `delete_employee`).
    pub resource: &'static str,
    /// Route value key of the parent identity.
    pub parent_key: &'static str,
    /// Route value key of the item identity.
    pub item_key: &'static str,
    pub get_item: &'static str,
    pub delete_item: &'static str,
    pub update_item: &'static str,
    pub partially_update_item: &'static str,
    pub list_items: &'static str,
}

/// Builds item and collection links through a [`UrlBuilder`].
#[derive(Debug, Clone)]
pub struct LinkFactory<B> {
    builder: B,
    routes: ResourceRoutes,
}

impl<B: UrlBuilder> LinkFactory<B> {
    pub fn new(builder: B, routes: ResourceRoutes) -> Self {
        Self { builder, routes }
    }

    pub fn routes(&self) -> &ResourceRoutes {
        &self.routes
    }

    /// Links for a single item: self, delete, update, partial update.
    ///
    /// Only the self link carries `fields`, so following it returns the same
    /// projection.
    ///
    /// # Errors
    ///
    /// Returns `LinkError` if any of the item routes cannot be built,
    /// including `MissingRouteValue` when `item_id` renders as an empty string.
    pub fn links_for_item(
        &self,
        context: &RequestContext,
        parent_id: &impl fmt::Display,
        item_id: &impl fmt::Display,
        fields: &str,
    ) -> Result<Vec<Link>, LinkError> {
        let mut values = RouteValues::new();
        values.insert(self.routes.parent_key.to_string(), parent_id.to_string());
        values.insert(self.routes.item_key.to_string(), item_id.to_string());

        let mut self_values = values.clone();
        self_values.insert("fields".to_string(), fields.to_string());

        let resource = self.routes.resource;
        Ok(vec![
            self.link(context, self.routes.get_item, &self_values, "self".to_string(), "GET")?,
            self.link(
                context,
                self.routes.delete_item,
                &values,
                format!("delete_{}", resource),
                "DELETE",
            )?,
            self.link(
                context,
                self.routes.update_item,
                &values,
                format!("update_{}", resource),
                "PUT",
            )?,
            self.link(
                context,
                self.routes.partially_update_item,
                &values,
                format!("partially_update_{}", resource),
                "PATCH",
            )?,
        ])
    }

    /// Append the collection self link to `wrapper` and return it.
    ///
    /// The list route gets no explicit values; its parent placeholder is
    /// filled from the request's route values.
    ///
    /// # Errors
    ///
    /// Returns `LinkError` if the list route cannot be built.
    pub fn links_for_collection<T>(
        &self,
        context: &RequestContext,
        mut wrapper: LinkCollectionWrapper<T>,
    ) -> Result<LinkCollectionWrapper<T>, LinkError> {
        let link = self.link(
            context,
            self.routes.list_items,
            &RouteValues::new(),
            "self".to_string(),
            "GET",
        )?;
        wrapper.push_link(link);
        Ok(wrapper)
    }

    fn link(
        &self,
        context: &RequestContext,
        route: &str,
        values: &RouteValues,
        rel: String,
        method: &str,
    ) -> Result<Link, LinkError> {
        let href = self.builder.build_url(route, values, context)?;
        trace!(route, rel = %rel, method, href = %href, "built link");
        Ok(Link::new(href, rel, method))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::RouteTable;
    use crate::types::Entity;

    const ROUTES: ResourceRoutes = ResourceRoutes {
        resource: "item",
        parent_key: "parentId",
        item_key: "id",
        get_item: "GetItem",
        delete_item: "DeleteItem",
        update_item: "UpdateItem",
        partially_update_item: "PatchItem",
        list_items: "GetItems",
    };

    fn factory() -> LinkFactory<RouteTable> {
        let table = RouteTable::new()
            .route("GetItems", "/api/parents/{parentId}/items")
            .route("GetItem", "/api/parents/{parentId}/items/{id}")
            .route("DeleteItem", "/api/parents/{parentId}/items/{id}")
            .route("UpdateItem", "/api/parents/{parentId}/items/{id}")
            .route("PatchItem", "/api/parents/{parentId}/items/{id}");
        LinkFactory::new(table, ROUTES)
    }

    fn ctx() -> RequestContext {
        RequestContext::new("http://h", "application/vnd.x.hateoas+json")
    }

    #[test]
    fn item_links_fixed_order_relations_and_methods() {
        let links = factory().links_for_item(&ctx(), &"p1", &7, "name").unwrap();

        let rels: Vec<&str> = links.iter().map(Link::rel).collect();
        let methods: Vec<&str> = links.iter().map(Link::method).collect();
        assert_eq!(
            rels,
            ["self", "delete_item", "update_item", "partially_update_item"]
        );
        assert_eq!(methods, ["GET", "DELETE", "PUT", "PATCH"]);
    }

    #[test]
    fn only_self_link_carries_fields() {
        let links = factory().links_for_item(&ctx(), &"p1", &7, "name").unwrap();

        assert_eq!(links[0].href(), "http://h/api/parents/p1/items/7?fields=name");
        for link in &links[1..] {
            assert_eq!(link.href(), "http://h/api/parents/p1/items/7");
        }
    }

    #[test]
    fn collection_link_appended_once() {
        let ctx = ctx().with_route_value("parentId", "p1");
        let mut wrapper = LinkCollectionWrapper::new(vec![Entity::new()]);
        wrapper.push_link(Link::new("http://h/other", "next", "GET"));

        let wrapper = factory().links_for_collection(&ctx, wrapper).unwrap();

        assert_eq!(wrapper.links().len(), 2);
        let added = &wrapper.links()[1];
        assert_eq!(added.rel(), "self");
        assert_eq!(added.method(), "GET");
        assert_eq!(added.href(), "http://h/api/parents/p1/items");
        assert_eq!(wrapper.value().len(), 1);
    }

    #[test]
    fn collection_link_without_parent_value_errors() {
        let wrapper: LinkCollectionWrapper<Entity> = LinkCollectionWrapper::new(Vec::new());
        let result = factory().links_for_collection(&ctx(), wrapper);
        assert!(matches!(
            result,
            Err(LinkError::MissingRouteValue { key, .. }) if key == "parentId"
        ));
    }

    #[test]
    fn unregistered_route_is_an_error() {
        let factory = LinkFactory::new(RouteTable::new(), ROUTES);
        let result = factory.links_for_item(&ctx(), &"p1", &7, "");
        assert!(matches!(result, Err(LinkError::UnknownRoute { .. })));
    }
}
