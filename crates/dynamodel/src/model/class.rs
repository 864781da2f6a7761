use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use dynamodel_core::mapper::{derive_key_schema, key_from_values};
use dynamodel_core::schema::SchemaDescriptor;
use dynamodel_core::Attributes;

use super::error::{ModelError, Result};
use super::instance::Instance;
use crate::mapper::DataMapper;

/// A registered model: a schema bound to a table and a data mapper.
///
/// Cloning is cheap and clones compare equal under [`ModelClass::same_class`].
#[derive(Clone)]
pub struct ModelClass {
    inner: Arc<ClassInner>,
}

struct ClassInner {
    class_name: String,
    table_name: String,
    schema: SchemaDescriptor,
    mapper: DataMapper,
}

impl ModelClass {
    pub(crate) fn new(
        class_name: String,
        table_name: String,
        schema: SchemaDescriptor,
        mapper: DataMapper,
    ) -> Self {
        Self {
            inner: Arc::new(ClassInner {
                class_name,
                table_name,
                schema,
                mapper,
            }),
        }
    }

    pub fn class_name(&self) -> &str {
        &self.inner.class_name
    }

    /// Table name as registered, without any connection prefix.
    pub fn table_name(&self) -> &str {
        &self.inner.table_name
    }

    pub fn schema(&self) -> &SchemaDescriptor {
        &self.inner.schema
    }

    pub fn mapper(&self) -> &DataMapper {
        &self.inner.mapper
    }

    /// Whether both handles refer to the same registration.
    pub fn same_class(&self, other: &ModelClass) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Builds an instance from attribute values.
    ///
    /// Fails on the first attribute the schema does not declare.
    pub fn construct(&self, values: Attributes) -> Result<Instance> {
        if let Some(attribute) = values.keys().find(|k| !self.schema().contains(k)) {
            return Err(ModelError::UndeclaredAttribute {
                class_name: self.class_name().to_string(),
                attribute: attribute.clone(),
            });
        }
        Ok(Instance::new(self.clone(), values))
    }

    /// An instance with no attributes set.
    pub fn empty(&self) -> Instance {
        Instance::new(self.clone(), Attributes::new())
    }

    /// Builds an instance from a JSON object.
    pub fn from_json(&self, value: Value) -> Result<Instance> {
        match value {
            Value::Object(values) => self.construct(values),
            _ => Err(ModelError::NotAnObject {
                class_name: self.class_name().to_string(),
            }),
        }
    }

    /// Builds an instance from any serializable value that serializes to
    /// an object.
    pub fn from_record<T: Serialize>(&self, record: &T) -> Result<Instance> {
        self.from_json(serde_json::to_value(record)?)
    }

    /// Wraps attributes read back from the store. Attributes the schema
    /// does not declare are dropped.
    pub(crate) fn hydrate(&self, mut attributes: Attributes) -> Instance {
        attributes.retain(|name, _| self.schema().contains(name));
        Instance::new(self.clone(), attributes)
    }

    /// Fetches an item by hash key.
    pub async fn get(&self, hash: impl Into<Value>) -> Result<Option<Instance>> {
        self.fetch(hash.into(), None).await
    }

    /// Fetches an item by hash and range key.
    pub async fn get_with_range(
        &self,
        hash: impl Into<Value>,
        range: impl Into<Value>,
    ) -> Result<Option<Instance>> {
        self.fetch(hash.into(), Some(range.into())).await
    }

    async fn fetch(&self, hash: Value, range: Option<Value>) -> Result<Option<Instance>> {
        let key_schema = derive_key_schema(self.schema())?;
        let key = key_from_values(&key_schema, &hash, range.as_ref())?;
        let key_item = Instance::new(self.clone(), key.to_attributes());

        let found = self.mapper().get(&key_item).await?;
        Ok(found.map(|attributes| self.hydrate(attributes)))
    }

    /// Creates the model's table when it does not exist.
    pub async fn ensure_table(&self) -> Result<bool> {
        let created = self
            .mapper()
            .ensure_table_exists(self.table_name(), self.schema())
            .await?;
        Ok(created)
    }
}

impl fmt::Debug for ModelClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelClass")
            .field("class_name", &self.inner.class_name)
            .field("table_name", &self.inner.table_name)
            .field("attributes", &self.inner.schema.len())
            .finish()
    }
}
