//! Data shaping - projects typed objects onto client-selected fields.
//!
//! Each shapeable type registers a [`FieldTable`] once: a named accessor per
//! field plus the name of its identity field. [`DataShaper`] then projects any
//! requested subset of those fields into an ordered [`Entity`].
//!
//! # Example
//!
//! ```
//! use resource_shape::{DataShaper, FieldTable, FieldValue};
//!
//! struct Company {
//!     id: u32,
//!     name: String,
//!     country: String,
//! }
//!
//! let table = FieldTable::builder("id")
//!     .field("id", |c: &Company| c.id)
//!     .field("name", |c: &Company| c.name.clone())
//!     .field("country", |c: &Company| c.country.clone())
//!     .build()
//!     .unwrap();
//! let shaper = DataShaper::new(table);
//!
//! let company = Company { id: 7, name: "Acme".into(), country: "NO".into() };
//! let shaped = shaper.shape_one(&company, Some("name"));
//!
//! assert_eq!(shaped.id, FieldValue::Int(7));
//! assert_eq!(shaped.entity.keys().collect::<Vec<_>>(), ["name", "id"]);
//! ```

use std::fmt;

use tracing::trace;

use crate::error::RegistrationError;
use crate::fields::resolve_fields;
use crate::types::{Entity, FieldValue, ShapeEntity, LINKS_FIELD};

type Accessor<T> = Box<dyn Fn(&T) -> FieldValue + Send + Sync>;

/// Registered field accessors for one type, in declaration order.
pub struct FieldTable<T> {
    identity: &'static str,
    names: Vec<&'static str>,
    accessors: Vec<Accessor<T>>,
}

impl<T> FieldTable<T> {
    /// Start a table whose identity field is `identity`.
    pub fn builder(identity: &'static str) -> FieldTableBuilder<T> {
        FieldTableBuilder {
            identity,
            fields: Vec::new(),
        }
    }

    /// Name of the identity field.
    pub fn identity(&self) -> &'static str {
        self.identity
    }

    /// Field names in declaration order.
    pub fn names(&self) -> &[&'static str] {
        &self.names
    }

    /// Read one field off `source`, or `None` if no accessor has that name.
    pub fn read(&self, source: &T, name: &str) -> Option<FieldValue> {
        let index = self.names.iter().position(|n| *n == name)?;
        Some((self.accessors[index])(source))
    }
}

impl<T> fmt::Debug for FieldTable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldTable")
            .field("identity", &self.identity)
            .field("names", &self.names)
            .finish()
    }
}

/// Builder for [`FieldTable`]; validation happens in [`FieldTableBuilder::build`].
pub struct FieldTableBuilder<T> {
    identity: &'static str,
    fields: Vec<(&'static str, Accessor<T>)>,
}

impl<T> FieldTableBuilder<T> {
    /// Register an accessor for `name`.
    pub fn field<F, V>(mut self, name: &'static str, accessor: F) -> Self
    where
        F: Fn(&T) -> V + Send + Sync + 'static,
        V: Into<FieldValue>,
    {
        self.fields
            .push((name, Box::new(move |source: &T| accessor(source).into())));
        self
    }

    /// Validate and freeze the table.
    ///
    /// # Errors
    ///
    /// Returns `RegistrationError` for empty, duplicate or reserved names
    /// (see [`LINKS_FIELD`]), or when the identity field has no accessor.
    pub fn build(self) -> Result<FieldTable<T>, RegistrationError> {
        let mut names = Vec::with_capacity(self.fields.len());
        let mut accessors = Vec::with_capacity(self.fields.len());

        for (name, accessor) in self.fields {
            if name.is_empty() {
                return Err(RegistrationError::EmptyFieldName);
            }
            if name == LINKS_FIELD {
                return Err(RegistrationError::ReservedField {
                    name: name.to_string(),
                });
            }
            if names.contains(&name) {
                return Err(RegistrationError::DuplicateField {
                    name: name.to_string(),
                });
            }
            names.push(name);
            accessors.push(accessor);
        }

        if !names.contains(&self.identity) {
            return Err(RegistrationError::MissingIdentity {
                identity: self.identity.to_string(),
            });
        }

        Ok(FieldTable {
            identity: self.identity,
            names,
            accessors,
        })
    }
}

/// Shapes values of `T` using a registered [`FieldTable`].
#[derive(Debug)]
pub struct DataShaper<T> {
    table: FieldTable<T>,
}

impl<T> DataShaper<T> {
    pub fn new(table: FieldTable<T>) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &FieldTable<T> {
        &self.table
    }

    /// Resolve a raw `fields` request against this type's fields.
    pub fn resolve(&self, requested: Option<&str>) -> Vec<&'static str> {
        resolve_fields(requested, self.table.identity, &self.table.names)
    }

    /// Shape one value for a raw `fields` request.
    pub fn shape_one(&self, source: &T, requested: Option<&str>) -> ShapeEntity {
        let fields = self.resolve(requested);
        self.shape_with(source, &fields)
    }

    /// Shape every value in `sources`, one output per input, in input order.
    pub fn shape_many(&self, sources: &[T], requested: Option<&str>) -> Vec<ShapeEntity> {
        let fields = self.resolve(requested);
        sources
            .iter()
            .map(|source| self.shape_with(source, &fields))
            .collect()
    }

    /// Shape one value for an already-resolved field list.
    ///
    /// Names without an accessor are skipped. The identity field is always
    /// read, and added to the entity if `fields` left it out.
    pub fn shape_with(&self, source: &T, fields: &[&str]) -> ShapeEntity {
        let mut entity = Entity::with_capacity(fields.len() + 1);

        for name in fields {
            match self.table.read(source, name) {
                Some(value) => entity.insert(*name, value),
                None => trace!(field = %name, "skipping field without accessor"),
            }
        }

        let id = match entity.get(self.table.identity) {
            Some(value) => value.clone(),
            None => {
                let value = self.identity_of(source);
                entity.insert(self.table.identity, value.clone());
                value
            }
        };

        ShapeEntity { id, entity }
    }

    /// Identity value of `source`.
    pub fn identity_of(&self, source: &T) -> FieldValue {
        // build() guarantees the identity accessor exists
        self.table
            .read(source, self.table.identity)
            .unwrap_or(FieldValue::Null)
    }
}
