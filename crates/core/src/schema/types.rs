use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::rules::Rule;

/// Primitive type tag of a stored attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttributeType {
    String,
    Number,
    Boolean,
    List,
    Map,
}

impl AttributeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeType::String => "String",
            AttributeType::Number => "Number",
            AttributeType::Boolean => "Boolean",
            AttributeType::List => "List",
            AttributeType::Map => "Map",
        }
    }

    /// Only scalar strings and numbers can be table keys.
    pub fn is_key_compatible(&self) -> bool {
        matches!(self, AttributeType::String | AttributeType::Number)
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Role of an attribute in the table's primary key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum KeyType {
    Hash,
    Range,
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyType::Hash => f.write_str("HASH"),
            KeyType::Range => f.write_str("RANGE"),
        }
    }
}

/// Generator the mapper calls for an attribute that is absent at write time.
#[derive(Clone)]
pub struct DefaultProvider(Arc<dyn Fn() -> Value + Send + Sync>);

impl DefaultProvider {
    pub fn new<F>(provider: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        Self(Arc::new(provider))
    }

    /// Produces a fresh value.
    pub fn provide(&self) -> Value {
        (self.0)()
    }
}

impl fmt::Debug for DefaultProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DefaultProvider(..)")
    }
}

/// A provider that yields hyphenated random (v4) UUID strings.
pub fn uuid_v4() -> DefaultProvider {
    DefaultProvider::new(|| Value::String(Uuid::new_v4().to_string()))
}

/// Declaration of a single attribute: its stored type, key role, default
/// provider and validation rule.
#[derive(Debug, Clone)]
pub struct AttributeDescriptor {
    attribute_type: AttributeType,
    key_type: Option<KeyType>,
    default_provider: Option<DefaultProvider>,
    validator: Rule,
}

impl AttributeDescriptor {
    pub fn new(attribute_type: AttributeType, validator: impl Into<Rule>) -> Self {
        Self {
            attribute_type,
            key_type: None,
            default_provider: None,
            validator: validator.into(),
        }
    }

    pub fn string(validator: impl Into<Rule>) -> Self {
        Self::new(AttributeType::String, validator)
    }

    pub fn number(validator: impl Into<Rule>) -> Self {
        Self::new(AttributeType::Number, validator)
    }

    pub fn boolean(validator: impl Into<Rule>) -> Self {
        Self::new(AttributeType::Boolean, validator)
    }

    /// Marks the attribute as the table's partition (HASH) key.
    pub fn hash_key(mut self) -> Self {
        self.key_type = Some(KeyType::Hash);
        self
    }

    /// Marks the attribute as the table's sort (RANGE) key.
    pub fn range_key(mut self) -> Self {
        self.key_type = Some(KeyType::Range);
        self
    }

    pub fn default_provider(mut self, provider: DefaultProvider) -> Self {
        self.default_provider = Some(provider);
        self
    }

    pub fn attribute_type(&self) -> AttributeType {
        self.attribute_type
    }

    pub fn key_type(&self) -> Option<KeyType> {
        self.key_type
    }

    pub fn is_key(&self) -> bool {
        self.key_type.is_some()
    }

    pub fn provider(&self) -> Option<&DefaultProvider> {
        self.default_provider.as_ref()
    }

    pub fn validator(&self) -> &Rule {
        &self.validator
    }
}

/// Ordered mapping from attribute name to its descriptor.
///
/// Declaration order is kept: validation walks attributes in this order and
/// reports the first failure it meets.
#[derive(Debug, Clone, Default)]
pub struct SchemaDescriptor {
    attributes: Vec<(String, AttributeDescriptor)>,
}

impl SchemaDescriptor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares an attribute. Declaring the same name twice replaces the
    /// earlier descriptor in place.
    pub fn attribute(mut self, name: impl Into<String>, descriptor: AttributeDescriptor) -> Self {
        let name = name.into();
        match self.attributes.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = descriptor,
            None => self.attributes.push((name, descriptor)),
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&AttributeDescriptor> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, d)| d)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeDescriptor)> {
        self.attributes.iter().map(|(n, d)| (n.as_str(), d))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.attributes.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}
