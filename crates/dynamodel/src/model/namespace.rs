use std::collections::BTreeMap;

use super::aggregator::{Aggregate, MODEL_ALIAS};
use super::class::ModelClass;

/// Caller-owned registry of model classes by alias.
///
/// Registering an aggregate inserts all of its aliases. The shared `Model`
/// alias always points at the most recent registration.
#[derive(Debug, Clone, Default)]
pub struct Namespace {
    classes: BTreeMap<String, ModelClass>,
}

impl Namespace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers every alias of `aggregate`, returning the class that
    /// previously held `Model`, if any.
    pub fn register(&mut self, aggregate: &Aggregate) -> Option<ModelClass> {
        let mut replaced = None;

        for (alias, class) in aggregate.aliases() {
            let previous = self.classes.insert(alias.clone(), class.clone());
            if alias == MODEL_ALIAS {
                if let Some(previous) = &previous {
                    tracing::debug!(
                        previous = %previous.class_name(),
                        current = %class.class_name(),
                        "replaced Model alias"
                    );
                }
                replaced = previous;
            }
        }

        replaced
    }

    pub fn get(&self, alias: &str) -> Option<&ModelClass> {
        self.classes.get(alias)
    }

    /// The class most recently registered.
    pub fn model(&self) -> Option<&ModelClass> {
        self.get(MODEL_ALIAS)
    }

    pub fn contains(&self, alias: &str) -> bool {
        self.classes.contains_key(alias)
    }

    pub fn aliases(&self) -> impl Iterator<Item = &str> {
        self.classes.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

#[cfg(all(test, feature = "inmemory"))]
mod tests {
    use super::*;
    use crate::config::ConnectionConfig;
    use crate::connection::Connection;
    use crate::model::aggregator::{build_aggregator_model, AggregatorOptions};
    use dynamodel_core::schema::{AttributeDescriptor, Rules, SchemaDescriptor};

    fn schema(rules: &Rules) -> SchemaDescriptor {
        SchemaDescriptor::new().attribute(
            "id",
            AttributeDescriptor::string(rules.string()).hash_key(),
        )
    }

    fn aggregate(class_name: &str) -> Aggregate {
        let connection = Connection::in_memory(ConnectionConfig::new("us-east-1"));
        build_aggregator_model(
            &connection,
            AggregatorOptions::new(class_name, "items", schema),
        )
        .unwrap()
    }

    #[test]
    fn test_empty_namespace() {
        let namespace = Namespace::new();
        assert!(namespace.is_empty());
        assert!(namespace.model().is_none());
    }

    #[test]
    fn test_register_inserts_both_aliases() {
        let mut namespace = Namespace::new();
        let replaced = namespace.register(&aggregate("Account"));

        assert!(replaced.is_none());
        assert!(namespace.contains("Account"));
        assert!(namespace.contains(MODEL_ALIAS));
        assert_eq!(namespace.aliases().collect::<Vec<_>>(), vec!["Account", "Model"]);
        assert!(namespace
            .model()
            .unwrap()
            .same_class(namespace.get("Account").unwrap()));
    }

    #[test]
    fn test_register_replaces_model() {
        let mut namespace = Namespace::new();
        let account = aggregate("Account");
        let profile = aggregate("Profile");

        namespace.register(&account);
        let replaced = namespace.register(&profile).unwrap();

        assert!(replaced.same_class(account.class()));
        assert!(namespace.model().unwrap().same_class(profile.class()));
        assert!(namespace.get("Account").unwrap().same_class(account.class()));
        assert_eq!(namespace.len(), 3);
    }

    #[test]
    fn test_reregistering_same_name_replaces_class() {
        let mut namespace = Namespace::new();
        let first = aggregate("Account");
        let second = aggregate("Account");

        namespace.register(&first);
        namespace.register(&second);

        assert_eq!(namespace.len(), 2);
        assert!(!namespace.get("Account").unwrap().same_class(first.class()));
        assert!(namespace.get("Account").unwrap().same_class(second.class()));
    }
}
