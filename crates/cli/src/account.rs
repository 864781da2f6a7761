//! The account model managed by the CLI.

use dynamodel::schema::{uuid_v4, AttributeDescriptor, Rules, SchemaDescriptor};
use dynamodel::{build_aggregator_model, AggregatorOptions, Connection, ModelClass, ModelError};

pub const CLASS_NAME: &str = "Account";

pub fn schema(rules: &Rules) -> SchemaDescriptor {
    SchemaDescriptor::new()
        .attribute(
            "id",
            AttributeDescriptor::string(rules.string().guid())
                .hash_key()
                .default_provider(uuid_v4()),
        )
        .attribute("parent", AttributeDescriptor::string(rules.string().guid()))
        .attribute(
            "name",
            AttributeDescriptor::string(rules.string().trim().min(3).max(120).required()),
        )
        .attribute(
            "email",
            AttributeDescriptor::string(rules.string().trim().lowercase().email().required()),
        )
        .attribute("cpf", AttributeDescriptor::number(rules.number().integer().positive()))
}

/// Registers the account model on `connection` under `table_name`.
pub fn model(connection: &Connection, table_name: &str) -> Result<ModelClass, ModelError> {
    let aggregate = build_aggregator_model(
        connection,
        AggregatorOptions::new(CLASS_NAME, table_name, schema),
    )?;
    Ok(aggregate.into_class())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dynamodel::schema::{validate_attributes, ValidationReason};
    use dynamodel::{Attributes, ConnectionConfig, Value};
    use serde_json::json;

    fn attributes(value: Value) -> Attributes {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected a JSON object"),
        }
    }

    #[test]
    fn test_valid_account_is_normalised() {
        let schema = schema(&Rules::new());
        let validated = validate_attributes(
            &schema,
            &attributes(json!({
                "name": "  Maria  ",
                "email": "Maria@Example.com",
                "cpf": 12345678901_u64
            })),
        )
        .unwrap();

        assert_eq!(validated.get("name"), Some(&json!("Maria")));
        assert_eq!(validated.get("email"), Some(&json!("maria@example.com")));
    }

    #[test]
    fn test_name_is_required() {
        let schema = schema(&Rules::new());
        let err =
            validate_attributes(&schema, &attributes(json!({ "email": "a@b.co" }))).unwrap_err();

        assert_eq!(err.path, "name");
        assert_eq!(err.reason, ValidationReason::Required);
    }

    #[test]
    fn test_cpf_must_be_positive() {
        let schema = schema(&Rules::new());
        let err = validate_attributes(
            &schema,
            &attributes(json!({ "name": "Maria", "email": "a@b.co", "cpf": -1 })),
        )
        .unwrap_err();

        assert_eq!(err.path, "cpf");
        assert_eq!(err.reason, ValidationReason::NotPositive);
    }

    #[test]
    fn test_model_uses_table_name() {
        let connection = Connection::in_memory(ConnectionConfig::new("us-east-1"));
        let class = model(&connection, "people").unwrap();

        assert_eq!(class.class_name(), CLASS_NAME);
        assert_eq!(class.table_name(), "people");
    }
}
