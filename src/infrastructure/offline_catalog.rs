use crate::{
    application::ports::{KeySource, PrimaryKeyLookup},
    domain::{
        chunk_error::{ChunkError, ChunkResult},
        chunk_plan::KeySequence,
        dump_target::SqlIdentifier,
    },
};

const UNAVAILABLE: &str = "built without MySQL support (enable the `mysql` feature)";

/// Stands in for the database when the driver is compiled out.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineCatalog;

impl KeySource for OfflineCatalog {
    fn describe(&self) -> &'static str {
        "offline catalog"
    }

    fn ordered_keys(
        &self,
        _table: &SqlIdentifier,
        _primary_key: &SqlIdentifier,
    ) -> ChunkResult<KeySequence> {
        Err(ChunkError::Connectivity(UNAVAILABLE.to_string()))
    }
}

impl PrimaryKeyLookup for OfflineCatalog {
    fn primary_key_column(&self, _table: &SqlIdentifier) -> ChunkResult<Option<String>> {
        Err(ChunkError::Connectivity(UNAVAILABLE.to_string()))
    }
}
