//! Model aggregation: binds a schema builder to a connection and registers
//! the resulting class under its aliases.

use std::collections::BTreeMap;

use dynamodel_core::schema::{Rules, SchemaDescriptor};

use super::class::ModelClass;
use super::error::{ModelError, Result};
use super::namespace::Namespace;
use crate::connection::Connection;

/// Generic alias every aggregated class is registered under.
pub const MODEL_ALIAS: &str = "Model";

/// What to aggregate: a class name, its table and a schema builder.
pub struct AggregatorOptions<F> {
    pub class_name: String,
    pub table_name: String,
    pub schema: F,
}

impl<F> AggregatorOptions<F>
where
    F: FnOnce(&Rules) -> SchemaDescriptor,
{
    pub fn new(class_name: impl Into<String>, table_name: impl Into<String>, schema: F) -> Self {
        Self {
            class_name: class_name.into(),
            table_name: table_name.into(),
            schema,
        }
    }
}

/// An aggregated class together with the aliases it answers to.
#[derive(Debug, Clone)]
pub struct Aggregate {
    class: ModelClass,
    aliases: BTreeMap<String, ModelClass>,
}

impl Aggregate {
    fn new(class: ModelClass) -> Self {
        let mut aliases = BTreeMap::new();
        aliases.insert(MODEL_ALIAS.to_string(), class.clone());
        aliases.insert(class.class_name().to_string(), class.clone());
        Self { class, aliases }
    }

    pub fn class(&self) -> &ModelClass {
        &self.class
    }

    /// Every alias, `Model` and the class name included.
    pub fn aliases(&self) -> &BTreeMap<String, ModelClass> {
        &self.aliases
    }

    pub fn alias(&self, name: &str) -> Option<&ModelClass> {
        self.aliases.get(name)
    }

    pub fn into_class(self) -> ModelClass {
        self.class
    }
}

fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ModelError::InvalidOptions(format!("{field} must not be empty")));
    }
    Ok(())
}

/// Builds a model class from a schema builder.
///
/// The builder runs once, with the connection's [`Rules`]. Instances of the
/// returned class validate against the schema and save through the
/// connection's data mapper.
pub fn build_aggregator_model<F>(
    connection: &Connection,
    options: AggregatorOptions<F>,
) -> Result<Aggregate>
where
    F: FnOnce(&Rules) -> SchemaDescriptor,
{
    let AggregatorOptions {
        class_name,
        table_name,
        schema,
    } = options;
    require("class_name", &class_name)?;
    require("table_name", &table_name)?;

    let rules = connection.rules();
    let schema = schema(&rules);

    tracing::debug!(
        class = %class_name,
        table = %table_name,
        attributes = schema.len(),
        "aggregated model"
    );

    let class = ModelClass::new(class_name, table_name, schema, connection.mapper());
    Ok(Aggregate::new(class))
}

/// Builds a model class and registers its aliases on `namespace`.
///
/// A class registered earlier under `Model` is replaced.
pub fn build_aggregator_model_into<F>(
    connection: &Connection,
    namespace: &mut Namespace,
    options: AggregatorOptions<F>,
) -> Result<ModelClass>
where
    F: FnOnce(&Rules) -> SchemaDescriptor,
{
    let aggregate = build_aggregator_model(connection, options)?;
    namespace.register(&aggregate);
    Ok(aggregate.into_class())
}

#[cfg(all(test, feature = "inmemory"))]
mod tests {
    use super::*;
    use crate::config::ConnectionConfig;
    use dynamodel_core::mapper::{MapperError, OnMissing, Record};
    use crate::storage::InMemoryStore;
    use dynamodel_core::schema::{uuid_v4, AttributeDescriptor, ValidationReason};
    use serde_json::{json, Value};
    use std::sync::Arc;

    fn account(rules: &Rules) -> SchemaDescriptor {
        SchemaDescriptor::new()
            .attribute(
                "id",
                AttributeDescriptor::string(rules.any())
                    .hash_key()
                    .default_provider(uuid_v4()),
            )
            .attribute("parent", AttributeDescriptor::string(rules.string()))
            .attribute("name", AttributeDescriptor::string(rules.string()))
            .attribute("email", AttributeDescriptor::string(rules.string().email()))
            .attribute("cpf", AttributeDescriptor::number(rules.number()))
    }

    fn guid_account(rules: &Rules) -> SchemaDescriptor {
        account(rules).attribute(
            "id",
            AttributeDescriptor::string(rules.string().guid())
                .hash_key()
                .default_provider(uuid_v4()),
        )
    }

    fn connection() -> Connection {
        Connection::in_memory(ConnectionConfig::new("us-east-1"))
    }

    async fn aggregate(connection: &Connection) -> Aggregate {
        let aggregate = build_aggregator_model(
            connection,
            AggregatorOptions::new("Account", "accounts", account),
        )
        .unwrap();
        aggregate.class().ensure_table().await.unwrap();
        aggregate
    }

    #[tokio::test]
    async fn test_unregistered_record_cannot_be_saved() {
        let connection = connection();
        let _ = aggregate(&connection).await;

        let record = Record::new()
            .with("name", "teste")
            .with("email", "teste@teste.com")
            .with("cpf", 12345678901_u64);
        let err = connection
            .mapper()
            .update(&record, OnMissing::Skip)
            .await
            .unwrap_err();

        assert_eq!(err, MapperError::MissingTableName);
    }

    #[tokio::test]
    async fn test_aliases_resolve_to_same_class() {
        let connection = connection();
        let aggregate = aggregate(&connection).await;

        let model = aggregate.alias(MODEL_ALIAS).unwrap();
        let account = aggregate.alias("Account").unwrap();
        assert!(model.same_class(account));
        assert_eq!(aggregate.aliases().len(), 2);

        for class in [model, account] {
            let instance = class
                .from_json(json!({
                    "name": "teste",
                    "email": "teste@teste.com",
                    "cpf": 12345678901_u64
                }))
                .unwrap();
            let saved = instance.save().await.unwrap();
            let id = saved.get("id").and_then(Value::as_str).unwrap();
            assert!(uuid::Uuid::parse_str(id).is_ok());
        }
    }

    #[tokio::test]
    async fn test_parent_must_be_a_string() {
        let connection = connection();
        let aggregate = aggregate(&connection).await;
        let class = aggregate.class();

        let invalid = class
            .from_json(json!({ "name": "teste", "parent": 1 }))
            .unwrap();
        let err = invalid.validate().unwrap_err();
        assert_eq!(err.path, "parent");
        assert_eq!(err.reason, ValidationReason::NotAString);
        assert_eq!(err.to_string(), "\"parent\" must be a string");

        let valid = class
            .from_json(json!({ "name": "teste", "parent": "dsa" }))
            .unwrap();
        let validated = valid.validate().unwrap();
        assert_eq!(validated.get("parent"), Some(&json!("dsa")));
    }

    #[tokio::test]
    async fn test_saved_id_validates_as_guid() {
        let connection = connection();
        let aggregate = build_aggregator_model(
            &connection,
            AggregatorOptions::new("Account", "accounts", guid_account),
        )
        .unwrap();
        let class = aggregate.class();
        class.ensure_table().await.unwrap();

        let instance = class
            .from_json(json!({ "name": "teste", "email": "teste@teste.com" }))
            .unwrap();
        assert!(instance.get("id").is_none());

        let saved = instance.save().await.unwrap();
        assert!(saved.get("id").is_some());
        saved.validate().unwrap();

        let mut broken = saved.clone();
        broken.set("id", "not-a-guid").unwrap();
        assert_eq!(
            broken.validate().unwrap_err().reason,
            ValidationReason::InvalidGuid
        );
    }

    #[tokio::test]
    async fn test_last_registration_owns_model_alias() {
        let connection = connection();
        let mut namespace = Namespace::new();

        let first = build_aggregator_model_into(
            &connection,
            &mut namespace,
            AggregatorOptions::new("Account", "accounts", account),
        )
        .unwrap();
        let second = build_aggregator_model_into(
            &connection,
            &mut namespace,
            AggregatorOptions::new("Profile", "profiles", account),
        )
        .unwrap();

        assert!(namespace.model().unwrap().same_class(&second));
        assert!(namespace.get("Account").unwrap().same_class(&first));
        assert!(namespace.get("Profile").unwrap().same_class(&second));
        assert_eq!(namespace.len(), 3);
    }

    #[tokio::test]
    async fn test_rejects_empty_names() {
        let connection = connection();

        let err = build_aggregator_model(&connection, AggregatorOptions::new("", "accounts", account))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid model options: class_name must not be empty"
        );

        let err = build_aggregator_model(&connection, AggregatorOptions::new("Account", " ", account))
            .unwrap_err();
        assert!(matches!(err, ModelError::InvalidOptions(_)));
    }

    #[tokio::test]
    async fn test_schema_builder_receives_connection_rules() {
        let connection =
            Connection::in_memory(ConnectionConfig::new("us-east-1")).with_rules(Rules::strict());

        let mut seen = None;
        build_aggregator_model(
            &connection,
            AggregatorOptions::new("Account", "accounts", |rules: &Rules| {
                seen = Some(rules.converts());
                account(rules)
            }),
        )
        .unwrap();

        assert_eq!(seen, Some(false));
    }

    #[tokio::test]
    async fn test_save_keeps_stored_attributes() {
        let connection = connection();
        let aggregate = aggregate(&connection).await;
        let class = aggregate.class();

        let saved = class
            .from_json(json!({ "id": "a", "name": "teste", "cpf": 1 }))
            .unwrap()
            .save()
            .await
            .unwrap();
        assert_eq!(saved.get("cpf"), Some(&json!(1)));

        let updated = class
            .from_json(json!({ "id": "a", "name": "novo" }))
            .unwrap()
            .save()
            .await
            .unwrap();
        assert_eq!(updated.get("name"), Some(&json!("novo")));
        assert_eq!(updated.get("cpf"), Some(&json!(1)));

        let found = class.get("a").await.unwrap().unwrap();
        assert_eq!(found.get("name"), Some(&json!("novo")));
    }

    #[tokio::test]
    async fn test_put_and_delete() {
        let connection = connection();
        let aggregate = aggregate(&connection).await;
        let class = aggregate.class();

        class
            .from_json(json!({ "id": "a", "name": "teste", "cpf": 1 }))
            .unwrap()
            .put()
            .await
            .unwrap();
        let replaced = class
            .from_json(json!({ "id": "a", "name": "novo" }))
            .unwrap()
            .put()
            .await
            .unwrap();
        assert!(replaced.get("cpf").is_none());

        let deleted = replaced.delete().await.unwrap().unwrap();
        assert_eq!(deleted.get("name"), Some(&json!("novo")));
        assert!(class.get("a").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_construct_rejects_undeclared_attributes() {
        let connection = connection();
        let aggregate = aggregate(&connection).await;

        let err = aggregate
            .class()
            .from_json(json!({ "name": "teste", "age": 30 }))
            .unwrap_err();
        assert_eq!(
            err,
            ModelError::UndeclaredAttribute {
                class_name: "Account".to_string(),
                attribute: "age".to_string(),
            }
        );

        let err = aggregate.class().from_json(json!(["teste"])).unwrap_err();
        assert!(matches!(err, ModelError::NotAnObject { .. }));
    }

    #[tokio::test]
    async fn test_from_record_and_deserialize() {
        #[derive(serde::Serialize, serde::Deserialize, Debug, PartialEq)]
        struct Account {
            id: String,
            name: String,
            cpf: u64,
        }

        let connection = connection();
        let aggregate = aggregate(&connection).await;
        let record = Account {
            id: "a".to_string(),
            name: "teste".to_string(),
            cpf: 12345678901,
        };

        let saved = aggregate
            .class()
            .from_record(&record)
            .unwrap()
            .save()
            .await
            .unwrap();
        assert_eq!(saved.deserialize::<Account>().unwrap(), record);
    }

    #[tokio::test]
    async fn test_number_hash_key_round_trip() {
        let store = InMemoryStore::new();
        let connection =
            Connection::with_store(ConnectionConfig::new("us-east-1"), Arc::new(store.clone()));
        let aggregate = build_aggregator_model(
            &connection,
            AggregatorOptions::new("Person", "people", |rules: &Rules| {
                SchemaDescriptor::new()
                    .attribute("cpf", AttributeDescriptor::number(rules.number()).hash_key())
                    .attribute("name", AttributeDescriptor::string(rules.string()))
            }),
        )
        .unwrap();
        let class = aggregate.class();
        class.ensure_table().await.unwrap();

        let saved = class
            .from_json(json!({ "cpf": "42", "name": "teste" }))
            .unwrap()
            .save()
            .await
            .unwrap();
        assert_eq!(saved.get("cpf"), Some(&json!(42)));

        let found = class.get(42).await.unwrap().unwrap();
        assert_eq!(found.get("name"), Some(&json!("teste")));

        class
            .from_json(json!({ "cpf": 42.0, "name": "novo" }))
            .unwrap()
            .save()
            .await
            .unwrap();
        assert_eq!(store.item_count("people").await, Some(1));

        let found = class.get("42").await.unwrap().unwrap();
        assert_eq!(found.get("name"), Some(&json!("novo")));
        assert_eq!(found.get("cpf"), Some(&json!(42)));

        let mut key_item = class.empty();
        key_item.set("cpf", "42").unwrap();
        let deleted = key_item.delete().await.unwrap().unwrap();
        assert_eq!(deleted.get("name"), Some(&json!("novo")));
        assert!(class.get(42.0).await.unwrap().is_none());
        assert_eq!(store.item_count("people").await, Some(0));
    }
}
