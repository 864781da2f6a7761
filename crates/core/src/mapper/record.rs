use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::schema::SchemaDescriptor;
use crate::Attributes;

use super::Mappable;

/// A plain attribute bag with no table or schema attached.
///
/// Handing a `Record` to the data mapper fails: it is the shape of an item
/// whose model was never registered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    attributes: Attributes,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    pub fn into_attributes(self) -> Attributes {
        self.attributes
    }
}

impl From<Attributes> for Record {
    fn from(attributes: Attributes) -> Self {
        Self { attributes }
    }
}

impl Mappable for Record {
    fn table_name(&self) -> Option<&str> {
        None
    }

    fn schema(&self) -> Option<&SchemaDescriptor> {
        None
    }

    fn attributes(&self) -> &Attributes {
        &self.attributes
    }
}
