use crate::{
    application::ports::KeySource,
    domain::{chunk_error::ChunkResult, chunk_plan::KeySequence, dump_target::SqlIdentifier},
};

/// Pretends the table holds every key in `0..approx_max_id`.
///
/// Only accurate for dense keys starting near zero; sparse or offset key
/// spaces give uneven chunks.
#[derive(Debug, Clone, Copy)]
pub struct SynthesizedKeySource {
    approx_max_id: i64,
}

impl SynthesizedKeySource {
    pub fn new(approx_max_id: i64) -> Self {
        Self { approx_max_id }
    }

    /// `None` when no usable maximum was given.
    pub fn from_approx_max_id(approx_max_id: i64) -> Option<Self> {
        (approx_max_id > 0).then(|| Self::new(approx_max_id))
    }
}

impl KeySource for SynthesizedKeySource {
    fn describe(&self) -> &'static str {
        "db_max_id provided"
    }

    fn ordered_keys(
        &self,
        _table: &SqlIdentifier,
        _primary_key: &SqlIdentifier,
    ) -> ChunkResult<KeySequence> {
        Ok(KeySequence::new((0..self.approx_max_id.max(0)).collect()))
    }
}

#[cfg(test)]
mod tests {
    use crate::{application::ports::KeySource, domain::dump_target::SqlIdentifier};

    use super::SynthesizedKeySource;

    #[test]
    fn yields_zero_based_dense_keys() {
        let table = SqlIdentifier::parse("orders", "Table").expect("valid table");
        let primary_key = SqlIdentifier::parse("id", "Primary key").expect("valid key");

        let keys = SynthesizedKeySource::new(5)
            .ordered_keys(&table, &primary_key)
            .expect("keys should be synthesized");

        assert_eq!(keys.as_slice(), &[0, 1, 2, 3, 4]);
    }

    #[test]
    fn zero_or_negative_maximum_is_no_fallback() {
        assert!(SynthesizedKeySource::from_approx_max_id(0).is_none());
        assert!(SynthesizedKeySource::from_approx_max_id(-3).is_none());
        assert!(SynthesizedKeySource::from_approx_max_id(1).is_some());
    }
}
