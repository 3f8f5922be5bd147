use crate::domain::{
    chunk_error::ChunkResult, chunk_plan::KeySequence, dump_target::SqlIdentifier,
};

/// Supplies the ordered primary-key values of a table.
pub trait KeySource {
    fn describe(&self) -> &'static str;

    fn ordered_keys(
        &self,
        table: &SqlIdentifier,
        primary_key: &SqlIdentifier,
    ) -> ChunkResult<KeySequence>;
}

/// Reads table metadata to find the primary-key column.
pub trait PrimaryKeyLookup {
    /// `Ok(None)` when the table has no PRIMARY key.
    fn primary_key_column(&self, table: &SqlIdentifier) -> ChunkResult<Option<String>>;
}
