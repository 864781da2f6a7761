use crate::schema::SchemaDescriptor;
use crate::Attributes;

/// An item the data mapper can persist.
///
/// Items without a table name or schema (a plain [`Record`](super::Record),
/// for instance) are rejected by every mapper operation.
pub trait Mappable {
    fn table_name(&self) -> Option<&str>;

    fn schema(&self) -> Option<&SchemaDescriptor>;

    fn attributes(&self) -> &Attributes;
}
