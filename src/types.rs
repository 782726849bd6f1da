//! Core types for shaped responses.

use std::fmt;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;
use uuid::Uuid;

/// Field name under which per-item links are attached to a shaped entity.
pub const LINKS_FIELD: &str = "Links";

/// A single field value inside a shaped [`Entity`].
///
/// Serializes as its plain JSON form (no variant tag).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Uuid(Uuid),
    Timestamp(DateTime<Utc>),
    Object(Entity),
    Links(Vec<Link>),
}

impl FieldValue {
    /// Returns the value kind for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldValue::Null => "null",
            FieldValue::Bool(_) => "boolean",
            FieldValue::Int(_) | FieldValue::Float(_) => "number",
            FieldValue::String(_) => "string",
            FieldValue::Uuid(_) => "uuid",
            FieldValue::Timestamp(_) => "timestamp",
            FieldValue::Object(_) => "object",
            FieldValue::Links(_) => "links",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_links(&self) -> Option<&[Link]> {
        match self {
            FieldValue::Links(links) => Some(links),
            _ => None,
        }
    }
}

/// Renders the value the way it appears inside a URL (route values, query strings).
impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => Ok(()),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Int(n) => write!(f, "{}", n),
            FieldValue::Float(n) => write!(f, "{}", n),
            FieldValue::String(s) => f.write_str(s),
            FieldValue::Uuid(id) => write!(f, "{}", id),
            FieldValue::Timestamp(ts) => f.write_str(&ts.to_rfc3339()),
            FieldValue::Object(_) | FieldValue::Links(_) => {
                let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
                f.write_str(&json)
            }
        }
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Int(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Int(i64::from(value))
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        FieldValue::Int(i64::from(value))
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::String(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::String(value.to_string())
    }
}

impl From<Uuid> for FieldValue {
    fn from(value: Uuid) -> Self {
        FieldValue::Uuid(value)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        FieldValue::Timestamp(value)
    }
}

impl From<Entity> for FieldValue {
    fn from(value: Entity) -> Self {
        FieldValue::Object(value)
    }
}

impl From<Vec<Link>> for FieldValue {
    fn from(value: Vec<Link>) -> Self {
        FieldValue::Links(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Null, Into::into)
    }
}

/// Ordered field-name to value mapping produced by shaping.
///
/// Insertion order is serialization order. Keys are unique; inserting an
/// existing key replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Entity(IndexMap<String, FieldValue>);

impl Entity {
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self(IndexMap::with_capacity(capacity))
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.0.get(name)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Field names in serialization order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consume the entity and return it with `links` appended under [`LINKS_FIELD`].
    pub fn with_links(mut self, links: Vec<Link>) -> Self {
        self.0.insert(LINKS_FIELD.to_string(), FieldValue::Links(links));
        self
    }

    /// Links attached by [`Entity::with_links`], if any.
    pub fn links(&self) -> Option<&[Link]> {
        self.get(LINKS_FIELD).and_then(FieldValue::as_links)
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for Entity {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// A shaped [`Entity`] paired with the identity of the object it came from.
///
/// `id` always equals the identity field's value inside `entity`.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeEntity {
    pub id: FieldValue,
    pub entity: Entity,
}

/// A hypermedia link: target URL, relation, HTTP method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    href: String,
    rel: String,
    method: String,
}

impl Link {
    pub fn new(href: impl Into<String>, rel: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            rel: rel.into(),
            method: method.into(),
        }
    }

    pub fn href(&self) -> &str {
        &self.href
    }

    pub fn rel(&self) -> &str {
        &self.rel
    }

    pub fn method(&self) -> &str {
        &self.method
    }
}

/// A collection of values plus collection-level links.
///
/// Serializes as `{"value": [...], "links": [...]}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkCollectionWrapper<T> {
    value: Vec<T>,
    links: Vec<Link>,
}

impl<T> LinkCollectionWrapper<T> {
    /// Wrap `value` with no links yet.
    pub fn new(value: Vec<T>) -> Self {
        Self {
            value,
            links: Vec::new(),
        }
    }

    pub fn value(&self) -> &[T] {
        &self.value
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn push_link(&mut self, link: Link) {
        self.links.push(link);
    }

    pub fn into_parts(self) -> (Vec<T>, Vec<Link>) {
        (self.value, self.links)
    }
}

/// Result of composing a response.
///
/// Exactly one shape is produced per request, chosen by the negotiated media
/// type. Serializes as the bare payload of whichever variant is present.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LinkResponse {
    /// Shaped entities with no hypermedia.
    Shaped(Vec<Entity>),
    /// Shaped entities each carrying links, wrapped with collection links.
    Linked(LinkCollectionWrapper<Entity>),
}

impl LinkResponse {
    pub fn has_links(&self) -> bool {
        matches!(self, LinkResponse::Linked(_))
    }

    pub fn shaped_entities(&self) -> Option<&[Entity]> {
        match self {
            LinkResponse::Shaped(entities) => Some(entities),
            LinkResponse::Linked(_) => None,
        }
    }

    pub fn linked_entities(&self) -> Option<&LinkCollectionWrapper<Entity>> {
        match self {
            LinkResponse::Linked(wrapper) => Some(wrapper),
            LinkResponse::Shaped(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn entity_preserves_insertion_order() {
        let mut entity = Entity::new();
        entity.insert("name", "Ann");
        entity.insert("id", 1);
        entity.insert("age", 30);

        let keys: Vec<&str> = entity.keys().collect();
        assert_eq!(keys, ["name", "id", "age"]);
        assert_eq!(
            serde_json::to_string(&entity).unwrap(),
            r#"{"name":"Ann","id":1,"age":30}"#
        );
    }

    #[test]
    fn entity_insert_replaces_existing_key() {
        let mut entity = Entity::new();
        entity.insert("id", 1);
        entity.insert("name", "Ann");
        entity.insert("id", 2);

        assert_eq!(entity.len(), 2);
        assert_eq!(entity.get("id"), Some(&FieldValue::Int(2)));
        assert_eq!(entity.keys().next(), Some("id"));
    }

    #[test]
    fn with_links_appends_links_field_last() {
        let entity: Entity = [("id", 1)].into_iter().collect();
        let linked = entity.with_links(vec![Link::new("http://h/x", "self", "GET")]);

        let keys: Vec<&str> = linked.keys().collect();
        assert_eq!(keys, ["id", LINKS_FIELD]);
        assert_eq!(linked.links().unwrap()[0].rel(), "self");
    }

    #[test]
    fn field_value_serializes_untagged() {
        let id = Uuid::nil();
        let mut nested = Entity::new();
        nested.insert("city", "Oslo");

        let mut entity = Entity::new();
        entity.insert("id", id);
        entity.insert("active", true);
        entity.insert("score", 1.5);
        entity.insert("manager", Option::<String>::None);
        entity.insert("address", nested);

        assert_eq!(
            serde_json::to_value(&entity).unwrap(),
            json!({
                "id": "00000000-0000-0000-0000-000000000000",
                "active": true,
                "score": 1.5,
                "manager": null,
                "address": { "city": "Oslo" }
            })
        );
    }

    #[test]
    fn field_value_display_for_urls() {
        assert_eq!(FieldValue::from("abc").to_string(), "abc");
        assert_eq!(FieldValue::from(42).to_string(), "42");
        assert_eq!(FieldValue::Null.to_string(), "");
        assert_eq!(
            FieldValue::from(Uuid::nil()).to_string(),
            "00000000-0000-0000-0000-000000000000"
        );
    }

    #[test]
    fn link_serializes_href_rel_method() {
        let link = Link::new("http://h/api/x", "delete_employee", "DELETE");
        assert_eq!(
            serde_json::to_value(&link).unwrap(),
            json!({ "href": "http://h/api/x", "rel": "delete_employee", "method": "DELETE" })
        );
    }

    #[test]
    fn link_response_serializes_bare_payload() {
        let entity: Entity = [("id", 1)].into_iter().collect();

        let shaped = LinkResponse::Shaped(vec![entity.clone()]);
        assert!(!shaped.has_links());
        assert!(shaped.linked_entities().is_none());
        assert_eq!(serde_json::to_value(&shaped).unwrap(), json!([{ "id": 1 }]));

        let mut wrapper = LinkCollectionWrapper::new(vec![entity]);
        wrapper.push_link(Link::new("http://h/list", "self", "GET"));
        let linked = LinkResponse::Linked(wrapper);
        assert!(linked.has_links());
        assert!(linked.shaped_entities().is_none());
        assert_eq!(
            serde_json::to_value(&linked).unwrap(),
            json!({
                "value": [{ "id": 1 }],
                "links": [{ "href": "http://h/list", "rel": "self", "method": "GET" }]
            })
        );
    }
}
