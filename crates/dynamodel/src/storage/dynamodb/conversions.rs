//! DynamoDB attribute conversion functions.
//!
//! Pure functions for converting between DynamoDB AttributeValue maps and
//! JSON attribute maps, and for building update expressions. These are
//! testable in isolation without DynamoDB access.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use dynamodel_core::storage::{ItemKey, ItemUpdate, StoreError};
use dynamodel_core::Attributes;
use serde_json::{Number, Value};

// ============================================================================
// Values
// ============================================================================

/// Convert a JSON value to a DynamoDB attribute value.
pub fn value_to_attribute(value: &Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null(true),
        Value::Bool(b) => AttributeValue::Bool(*b),
        Value::Number(n) => AttributeValue::N(n.to_string()),
        Value::String(s) => AttributeValue::S(s.clone()),
        Value::Array(values) => AttributeValue::L(values.iter().map(value_to_attribute).collect()),
        Value::Object(map) => AttributeValue::M(attributes_to_item(map)),
    }
}

/// Convert a DynamoDB attribute value to a JSON value.
///
/// String and number sets become arrays. Binary attributes are rejected.
pub fn attribute_to_value(attribute: &AttributeValue) -> Result<Value, StoreError> {
    match attribute {
        AttributeValue::S(s) => Ok(Value::String(s.clone())),
        AttributeValue::N(n) => parse_number(n),
        AttributeValue::Bool(b) => Ok(Value::Bool(*b)),
        AttributeValue::Null(_) => Ok(Value::Null),
        AttributeValue::L(values) => values
            .iter()
            .map(attribute_to_value)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        AttributeValue::M(map) => item_to_attributes(map).map(Value::Object),
        AttributeValue::Ss(values) => Ok(Value::Array(
            values.iter().cloned().map(Value::String).collect(),
        )),
        AttributeValue::Ns(values) => values
            .iter()
            .map(|n| parse_number(n))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        other => Err(StoreError::InvalidData(format!(
            "Unsupported attribute value: {:?}",
            other
        ))),
    }
}

/// Parse a DynamoDB number string, preferring integer representations.
pub fn parse_number(n: &str) -> Result<Value, StoreError> {
    if let Ok(i) = n.parse::<i64>() {
        return Ok(Value::from(i));
    }
    if let Ok(u) = n.parse::<u64>() {
        return Ok(Value::from(u));
    }
    n.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
        .ok_or_else(|| StoreError::InvalidData(format!("Invalid number: {}", n)))
}

// ============================================================================
// Items
// ============================================================================

/// Convert an attribute map to a DynamoDB item.
pub fn attributes_to_item(attributes: &Attributes) -> HashMap<String, AttributeValue> {
    attributes
        .iter()
        .map(|(name, value)| (name.clone(), value_to_attribute(value)))
        .collect()
}

/// Convert a DynamoDB item to an attribute map.
pub fn item_to_attributes(
    item: &HashMap<String, AttributeValue>,
) -> Result<Attributes, StoreError> {
    item.iter()
        .map(|(name, attribute)| attribute_to_value(attribute).map(|value| (name.clone(), value)))
        .collect()
}

/// Convert an item key to a DynamoDB key map.
pub fn key_to_item(key: &ItemKey) -> HashMap<String, AttributeValue> {
    attributes_to_item(&key.to_attributes())
}

// ============================================================================
// Update expressions
// ============================================================================

/// An update expression with its placeholder maps.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateExpression {
    pub expression: Option<String>,
    pub names: HashMap<String, String>,
    pub values: HashMap<String, AttributeValue>,
}

impl UpdateExpression {
    pub fn names(&self) -> Option<HashMap<String, String>> {
        (!self.names.is_empty()).then(|| self.names.clone())
    }

    pub fn values(&self) -> Option<HashMap<String, AttributeValue>> {
        (!self.values.is_empty()).then(|| self.values.clone())
    }
}

/// Build a `SET ... REMOVE ...` expression for an item update.
///
/// Attribute names are always aliased (`#a0`, `#a1`, ...) so reserved
/// words such as `name` are safe. Values use `:v0`, `:v1`, ....
pub fn build_update_expression(update: &ItemUpdate) -> UpdateExpression {
    let mut result = UpdateExpression::default();
    let mut set_clauses = Vec::with_capacity(update.set.len());
    let mut remove_clauses = Vec::with_capacity(update.remove.len());

    for (index, (name, value)) in update.set.iter().enumerate() {
        let name_placeholder = format!("#a{index}");
        let value_placeholder = format!(":v{index}");
        set_clauses.push(format!("{name_placeholder} = {value_placeholder}"));
        result.names.insert(name_placeholder, name.clone());
        result
            .values
            .insert(value_placeholder, value_to_attribute(value));
    }

    let offset = update.set.len();
    for (index, name) in update.remove.iter().enumerate() {
        let name_placeholder = format!("#a{}", offset + index);
        remove_clauses.push(name_placeholder.clone());
        result.names.insert(name_placeholder, name.clone());
    }

    let mut sections = Vec::new();
    if !set_clauses.is_empty() {
        sections.push(format!("SET {}", set_clauses.join(", ")));
    }
    if !remove_clauses.is_empty() {
        sections.push(format!("REMOVE {}", remove_clauses.join(", ")));
    }
    if !sections.is_empty() {
        result.expression = Some(sections.join(" "));
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn attributes(value: Value) -> Attributes {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected a JSON object"),
        }
    }

    #[test]
    fn test_scalar_conversions() {
        assert_eq!(
            value_to_attribute(&json!("teste")),
            AttributeValue::S("teste".to_string())
        );
        assert_eq!(value_to_attribute(&json!(42)), AttributeValue::N("42".to_string()));
        assert_eq!(value_to_attribute(&json!(true)), AttributeValue::Bool(true));
        assert_eq!(value_to_attribute(&Value::Null), AttributeValue::Null(true));
    }

    #[test]
    fn test_nested_conversions() {
        let value = json!({ "tags": ["a", 1], "meta": { "active": false } });
        let attribute = value_to_attribute(&value);

        assert_eq!(attribute_to_value(&attribute).unwrap(), value);
    }

    #[test]
    fn test_parse_number_prefers_integers() {
        assert_eq!(parse_number("12").unwrap(), json!(12));
        assert_eq!(parse_number("-3").unwrap(), json!(-3));
        assert_eq!(parse_number("18446744073709551615").unwrap(), json!(u64::MAX));
        assert_eq!(parse_number("1.25").unwrap(), json!(1.25));
        assert!(parse_number("abc").is_err());
    }

    #[test]
    fn test_sets_become_arrays() {
        let strings = AttributeValue::Ss(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(attribute_to_value(&strings).unwrap(), json!(["a", "b"]));

        let numbers = AttributeValue::Ns(vec!["1".to_string(), "2.5".to_string()]);
        assert_eq!(attribute_to_value(&numbers).unwrap(), json!([1, 2.5]));
    }

    #[test]
    fn test_binary_is_rejected() {
        let binary = AttributeValue::B(aws_sdk_dynamodb::primitives::Blob::new(vec![1, 2]));
        assert!(matches!(
            attribute_to_value(&binary),
            Err(StoreError::InvalidData(_))
        ));
    }

    #[test]
    fn test_item_round_trip() {
        let attrs = attributes(json!({ "id": "a", "cpf": 123, "name": "teste" }));
        let item = attributes_to_item(&attrs);

        assert_eq!(item.get("cpf"), Some(&AttributeValue::N("123".to_string())));
        assert_eq!(item_to_attributes(&item).unwrap(), attrs);
    }

    #[test]
    fn test_key_to_item() {
        let key = ItemKey::new("pk", "a").with_range("sk", 2);
        let item = key_to_item(&key);

        assert_eq!(item.len(), 2);
        assert_eq!(item.get("sk"), Some(&AttributeValue::N("2".to_string())));
    }

    #[test]
    fn test_update_expression_set_and_remove() {
        let update = ItemUpdate {
            set: attributes(json!({ "cpf": 1, "name": "teste" })),
            remove: vec!["parent".to_string()],
        };

        let expression = build_update_expression(&update);

        // Attributes iterate in key order: cpf, name.
        assert_eq!(
            expression.expression.as_deref(),
            Some("SET #a0 = :v0, #a1 = :v1 REMOVE #a2")
        );
        assert_eq!(expression.names.get("#a0"), Some(&"cpf".to_string()));
        assert_eq!(expression.names.get("#a1"), Some(&"name".to_string()));
        assert_eq!(expression.names.get("#a2"), Some(&"parent".to_string()));
        assert_eq!(
            expression.values.get(":v1"),
            Some(&AttributeValue::S("teste".to_string()))
        );
    }

    #[test]
    fn test_update_expression_remove_only_has_no_values() {
        let update = ItemUpdate {
            set: Attributes::new(),
            remove: vec!["parent".to_string()],
        };

        let expression = build_update_expression(&update);
        assert_eq!(expression.expression.as_deref(), Some("REMOVE #a0"));
        assert!(expression.values().is_none());
        assert!(expression.names().is_some());
    }

    #[test]
    fn test_empty_update_has_no_expression() {
        let expression = build_update_expression(&ItemUpdate::default());
        assert_eq!(expression, UpdateExpression::default());
        assert!(expression.names().is_none());
    }
}
