use std::fmt;

use serde_json::Value;

use crate::schema::AttributeType;
use crate::Attributes;

/// Primary key of a single item: the hash attribute and, for composite
/// keys, the range attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemKey {
    hash: (String, Value),
    range: Option<(String, Value)>,
}

impl ItemKey {
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            hash: (name.into(), value.into()),
            range: None,
        }
    }

    pub fn with_range(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.range = Some((name.into(), value.into()));
        self
    }

    pub fn hash(&self) -> (&str, &Value) {
        (self.hash.0.as_str(), &self.hash.1)
    }

    pub fn range(&self) -> Option<(&str, &Value)> {
        self.range.as_ref().map(|(n, v)| (n.as_str(), v))
    }

    /// Key attributes as an attribute map.
    pub fn to_attributes(&self) -> Attributes {
        let mut attributes = Attributes::new();
        attributes.insert(self.hash.0.clone(), self.hash.1.clone());
        if let Some((name, value)) = &self.range {
            attributes.insert(name.clone(), value.clone());
        }
        attributes
    }

    /// Whether `name` is one of the key attributes.
    pub fn contains(&self, name: &str) -> bool {
        self.hash.0 == name || self.range.as_ref().is_some_and(|(n, _)| n == name)
    }
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.hash.0, self.hash.1)?;
        if let Some((name, value)) = &self.range {
            write!(f, ", {}={}", name, value)?;
        }
        Ok(())
    }
}

/// Attribute changes applied by an update: values to set and attribute
/// names to remove.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemUpdate {
    pub set: Attributes,
    pub remove: Vec<String>,
}

impl ItemUpdate {
    pub fn is_empty(&self) -> bool {
        self.set.is_empty() && self.remove.is_empty()
    }
}

/// A key attribute definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyAttribute {
    pub name: String,
    pub attribute_type: AttributeType,
}

/// Hash and optional range key of a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySchema {
    pub hash: KeyAttribute,
    pub range: Option<KeyAttribute>,
}

/// Table configuration needed to create a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableDefinition {
    pub table_name: String,
    pub key_schema: KeySchema,
}

impl TableDefinition {
    pub fn new(table_name: impl Into<String>, key_schema: KeySchema) -> Self {
        Self {
            table_name: table_name.into(),
            key_schema,
        }
    }
}
