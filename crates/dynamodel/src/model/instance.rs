use std::fmt;

use serde::de::DeserializeOwned;
use serde_json::Value;

use dynamodel_core::mapper::{Mappable, OnMissing};
use dynamodel_core::schema::{validate_attributes, SchemaDescriptor, ValidationResult};
use dynamodel_core::Attributes;

use super::class::ModelClass;
use super::error::{ModelError, Result};

/// An item of a registered model.
///
/// Only attributes the model's schema declares can be set.
#[derive(Clone)]
pub struct Instance {
    class: ModelClass,
    attributes: Attributes,
}

impl Instance {
    pub(crate) fn new(class: ModelClass, attributes: Attributes) -> Self {
        Self { class, attributes }
    }

    pub fn class(&self) -> &ModelClass {
        &self.class
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<()> {
        if !self.class.schema().contains(name) {
            return Err(ModelError::UndeclaredAttribute {
                class_name: self.class.class_name().to_string(),
                attribute: name.to_string(),
            });
        }
        self.attributes.insert(name.to_string(), value.into());
        Ok(())
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.attributes.remove(name)
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn into_attributes(self) -> Attributes {
        self.attributes
    }

    pub fn to_json(&self) -> Value {
        Value::Object(self.attributes.clone())
    }

    /// Deserializes the attributes into a typed record.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_value(self.to_json())?)
    }

    /// Runs every attribute rule against the current values.
    ///
    /// Returns the validated value set, or the first failure in declaration
    /// order.
    pub fn validate(&self) -> ValidationResult<Attributes> {
        validate_attributes(self.class.schema(), &self.attributes)
    }

    /// Upserts the instance, leaving stored attributes it lacks untouched.
    ///
    /// Default providers fill absent attributes first, so an instance saved
    /// without its hash key comes back with a generated one. Resolves to a
    /// new instance holding the stored item.
    pub async fn save(&self) -> Result<Instance> {
        let stored = self.class.mapper().update(self, OnMissing::Skip).await?;
        Ok(self.class.hydrate(stored))
    }

    /// Replaces the stored item with this instance.
    pub async fn put(&self) -> Result<Instance> {
        let stored = self.class.mapper().put(self).await?;
        Ok(self.class.hydrate(stored))
    }

    /// Deletes the stored item with this instance's key, returning what was
    /// stored.
    pub async fn delete(&self) -> Result<Option<Instance>> {
        let deleted = self.class.mapper().delete(self).await?;
        Ok(deleted.map(|attributes| self.class.hydrate(attributes)))
    }
}

impl Mappable for Instance {
    fn table_name(&self) -> Option<&str> {
        Some(self.class.table_name())
    }

    fn schema(&self) -> Option<&SchemaDescriptor> {
        Some(self.class.schema())
    }

    fn attributes(&self) -> &Attributes {
        &self.attributes
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(self.class.class_name())
            .field("attributes", &self.attributes)
            .finish()
    }
}
