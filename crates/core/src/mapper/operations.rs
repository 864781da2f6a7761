//! Pure mapper planning functions.
//!
//! Every function here is sync and free of side effects apart from calling
//! default providers.

use serde_json::{Number, Value};

use crate::schema::{AttributeType, KeyType, SchemaDescriptor};
use crate::storage::{ItemKey, ItemUpdate, KeyAttribute, KeySchema};
use crate::Attributes;

use super::{MapperError, Result};

/// What an update does with declared attributes the item does not carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OnMissing {
    /// Leave stored values untouched.
    #[default]
    Skip,
    /// Remove them from the stored item.
    Remove,
}

/// Resolves the hash and range key attributes of a schema.
pub fn derive_key_schema(schema: &SchemaDescriptor) -> Result<KeySchema> {
    let mut hash: Option<KeyAttribute> = None;
    let mut range: Option<KeyAttribute> = None;

    for (name, descriptor) in schema.iter() {
        let Some(key_type) = descriptor.key_type() else {
            continue;
        };
        if !descriptor.attribute_type().is_key_compatible() {
            return Err(MapperError::UnsupportedKeyType {
                attribute: name.to_string(),
                attribute_type: descriptor.attribute_type(),
            });
        }
        let attribute = KeyAttribute {
            name: name.to_string(),
            attribute_type: descriptor.attribute_type(),
        };

        match key_type {
            KeyType::Hash => {
                if let Some(first) = &hash {
                    return Err(MapperError::MultipleHashKeys {
                        first: first.name.clone(),
                        second: attribute.name,
                    });
                }
                hash = Some(attribute);
            }
            KeyType::Range => {
                if let Some(first) = &range {
                    return Err(MapperError::MultipleRangeKeys {
                        first: first.name.clone(),
                        second: attribute.name,
                    });
                }
                range = Some(attribute);
            }
        }
    }

    let hash = hash.ok_or(MapperError::MissingHashKey)?;
    Ok(KeySchema { hash, range })
}

/// Converts a value to the representation of its declared type.
///
/// `null` passes through unchanged. Integral numbers are stored as
/// integers, so `42`, `42.0` and `"42"` all map to the same value.
pub fn coerce_value(attribute: &str, value: &Value, expected: AttributeType) -> Result<Value> {
    let mismatch = || MapperError::TypeMismatch {
        attribute: attribute.to_string(),
        expected,
        value: value.to_string(),
    };

    match (expected, value) {
        (_, Value::Null) => Ok(Value::Null),
        (AttributeType::String, Value::String(_)) => Ok(value.clone()),
        (AttributeType::String, Value::Number(n)) => Ok(Value::String(n.to_string())),
        (AttributeType::String, Value::Bool(b)) => Ok(Value::String(b.to_string())),
        (AttributeType::Number, Value::Number(n)) => Ok(normalize_number(n)),
        (AttributeType::Number, Value::String(s)) => parse_number(s.trim())
            .map(|n| normalize_number(&n))
            .ok_or_else(mismatch),
        (AttributeType::Boolean, Value::Bool(_)) => Ok(value.clone()),
        (AttributeType::List, Value::Array(_)) => Ok(value.clone()),
        (AttributeType::Map, Value::Object(_)) => Ok(value.clone()),
        _ => Err(mismatch()),
    }
}

fn parse_number(s: &str) -> Option<Number> {
    if let Ok(i) = s.parse::<i64>() {
        return Some(Number::from(i));
    }
    if let Ok(u) = s.parse::<u64>() {
        return Some(Number::from(u));
    }
    s.parse::<f64>().ok().and_then(Number::from_f64)
}

fn normalize_number(n: &Number) -> Value {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
            Value::from(f as i64)
        }
        _ => Value::Number(n.clone()),
    }
}

/// Copies the declared attributes of an item and fills absent ones from
/// their default providers. Undeclared attributes are dropped.
pub fn apply_defaults(schema: &SchemaDescriptor, attributes: &Attributes) -> Attributes {
    let mut item = Attributes::new();

    for (name, descriptor) in schema.iter() {
        match attributes.get(name) {
            Some(value) => {
                item.insert(name.to_string(), value.clone());
            }
            None => {
                if let Some(provider) = descriptor.provider() {
                    item.insert(name.to_string(), provider.provide());
                }
            }
        }
    }

    item
}

/// Applies defaults and coerces every attribute to its declared type.
pub fn prepare_item(schema: &SchemaDescriptor, attributes: &Attributes) -> Result<Attributes> {
    let mut item = apply_defaults(schema, attributes);

    for (name, descriptor) in schema.iter() {
        if let Some(value) = item.get_mut(name) {
            *value = coerce_value(name, value, descriptor.attribute_type())?;
        }
    }

    Ok(item)
}

/// Extracts the primary key from an item, coercing the key values to the
/// key attribute types.
pub fn extract_key(key_schema: &KeySchema, item: &Attributes) -> Result<ItemKey> {
    let hash = item.get(&key_schema.hash.name).unwrap_or(&Value::Null);
    let range = key_schema
        .range
        .as_ref()
        .and_then(|range| item.get(&range.name));
    key_from_values(key_schema, hash, range)
}

/// Builds a key from raw hash and range values, coercing them to the key
/// attribute types.
pub fn key_from_values(
    key_schema: &KeySchema,
    hash: &Value,
    range: Option<&Value>,
) -> Result<ItemKey> {
    let hash_attribute = &key_schema.hash;
    if hash.is_null() {
        return Err(MapperError::MissingKeyValue {
            attribute: hash_attribute.name.clone(),
        });
    }
    let hash = coerce_value(&hash_attribute.name, hash, hash_attribute.attribute_type)?;
    let mut key = ItemKey::new(hash_attribute.name.clone(), hash);

    if let Some(range_attribute) = &key_schema.range {
        let range = match range {
            Some(value) if !value.is_null() => value,
            _ => {
                return Err(MapperError::MissingKeyValue {
                    attribute: range_attribute.name.clone(),
                })
            }
        };
        let range = coerce_value(&range_attribute.name, range, range_attribute.attribute_type)?;
        key = key.with_range(range_attribute.name.clone(), range);
    }

    Ok(key)
}

/// Plans an update for a prepared item.
///
/// Non-key attributes present on the item are set. With
/// [`OnMissing::Remove`], declared non-key attributes the item lacks are
/// removed.
pub fn plan_update(
    schema: &SchemaDescriptor,
    key: &ItemKey,
    item: &Attributes,
    on_missing: OnMissing,
) -> ItemUpdate {
    let mut update = ItemUpdate::default();

    for name in schema.names() {
        if key.contains(name) {
            continue;
        }
        match item.get(name) {
            Some(value) => {
                update.set.insert(name.to_string(), value.clone());
            }
            None if on_missing == OnMissing::Remove => update.remove.push(name.to_string()),
            None => {}
        }
    }

    update
}
