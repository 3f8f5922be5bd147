use crate::{
    application::ports::{KeySource, PrimaryKeyLookup},
    domain::{
        chunk_error::{ChunkError, ChunkResult},
        chunk_plan::KeySequence,
        dump_target::SqlIdentifier,
    },
};

/// Below this many rows a chunked dump is unlikely to be worth it.
pub const ADVISORY_MIN_ROWS: usize = 10_000;

#[derive(Debug)]
pub struct AcquiredKeys {
    pub keys: KeySequence,
    pub source: &'static str,
    /// Set when the table is below `ADVISORY_MIN_ROWS`.
    pub small_table: bool,
}

/// Uses the caller's column when given, otherwise asks the database.
pub fn resolve_primary_key(
    lookup: &dyn PrimaryKeyLookup,
    table: &SqlIdentifier,
    supplied: Option<&str>,
) -> ChunkResult<SqlIdentifier> {
    if let Some(column) = supplied.filter(|column| !column.trim().is_empty()) {
        return SqlIdentifier::parse(column, "Primary key");
    }

    tracing::info!("primary key not specified so querying the db for it");
    let column = lookup
        .primary_key_column(table)
        .map_err(|error| ChunkError::PrimaryKeyLookup {
            table: table.to_string(),
            message: error.to_string(),
        })?
        .filter(|column| !column.trim().is_empty())
        .ok_or_else(|| ChunkError::PrimaryKeyNotFound {
            table: table.to_string(),
        })?;

    let primary_key = SqlIdentifier::parse(&column, "Primary key")?;
    tracing::info!("found table primary key '{primary_key}' for '{table}'");
    Ok(primary_key)
}

/// Tries `primary` first and, on a connectivity failure only, `fallback`.
pub fn acquire_keys(
    primary: &dyn KeySource,
    fallback: Option<&dyn KeySource>,
    table: &SqlIdentifier,
    primary_key: &SqlIdentifier,
) -> ChunkResult<AcquiredKeys> {
    let (keys, source) = match primary.ordered_keys(table, primary_key) {
        Ok(keys) => {
            tracing::info!("{} rows in table '{table}'", keys.as_slice().len());
            (keys, primary.describe())
        }
        Err(error) if error.is_connectivity() => {
            tracing::info!("unable to query database: {error}");
            let Some(fallback) = fallback else {
                return Err(ChunkError::NoKeySource {
                    cause: error.to_string(),
                });
            };
            tracing::info!("so using {} instead", fallback.describe());
            (
                fallback.ordered_keys(table, primary_key)?,
                fallback.describe(),
            )
        }
        Err(error) => return Err(error),
    };

    let rows = keys.as_slice().len();
    let small_table = rows < ADVISORY_MIN_ROWS;
    if small_table {
        tracing::warn!("db table only has {rows} rows - perhaps this won't be useful");
    }
    Ok(AcquiredKeys {
        keys,
        source,
        small_table,
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use std::cell::Cell;

    use crate::{
        application::ports::{KeySource, PrimaryKeyLookup},
        domain::{
            chunk_error::{ChunkError, ChunkResult},
            chunk_plan::KeySequence,
            dump_target::SqlIdentifier,
        },
        infrastructure::synthesized_keys::SynthesizedKeySource,
    };

    use super::{ADVISORY_MIN_ROWS, acquire_keys, resolve_primary_key};

    /// Stands in for a live database.
    pub(crate) struct FakeCatalog {
        pub keys: ChunkResult<Vec<i64>>,
        pub primary_key: ChunkResult<Option<String>>,
        pub lookups: Cell<usize>,
    }

    impl FakeCatalog {
        pub fn with_keys(keys: Vec<i64>) -> Self {
            Self {
                keys: Ok(keys),
                primary_key: Ok(Some("id".to_string())),
                lookups: Cell::new(0),
            }
        }

        pub fn unreachable() -> Self {
            let error = ChunkError::Connectivity("connection refused".to_string());
            Self {
                keys: Err(error.clone()),
                primary_key: Err(error),
                lookups: Cell::new(0),
            }
        }
    }

    impl KeySource for FakeCatalog {
        fn describe(&self) -> &'static str {
            "fake catalog"
        }

        fn ordered_keys(
            &self,
            _table: &SqlIdentifier,
            _primary_key: &SqlIdentifier,
        ) -> ChunkResult<KeySequence> {
            self.keys.clone().map(KeySequence::new)
        }
    }

    impl PrimaryKeyLookup for FakeCatalog {
        fn primary_key_column(&self, _table: &SqlIdentifier) -> ChunkResult<Option<String>> {
            self.lookups.set(self.lookups.get() + 1);
            self.primary_key.clone()
        }
    }

    fn identifiers() -> (SqlIdentifier, SqlIdentifier) {
        (
            SqlIdentifier::parse("orders", "Table").expect("valid table"),
            SqlIdentifier::parse("id", "Primary key").expect("valid key"),
        )
    }

    #[test]
    fn prefers_the_introspected_keys() {
        let (table, primary_key) = identifiers();
        let catalog = FakeCatalog::with_keys(vec![4, 8, 15, 16, 23, 42]);
        let fallback = SynthesizedKeySource::new(500);

        let acquired = acquire_keys(&catalog, Some(&fallback), &table, &primary_key)
            .expect("keys should be acquired");

        assert_eq!(acquired.keys.as_slice(), &[4, 8, 15, 16, 23, 42]);
        assert_eq!(acquired.source, "fake catalog");
        assert!(acquired.small_table);
    }

    #[test]
    fn flags_tables_below_the_advisory_size_only() {
        let (table, primary_key) = identifiers();
        let threshold = ADVISORY_MIN_ROWS as i64;

        let just_below = FakeCatalog::with_keys((1..threshold).collect());
        let acquired =
            acquire_keys(&just_below, None, &table, &primary_key).expect("keys should be acquired");
        assert!(acquired.small_table);

        let at_threshold = FakeCatalog::with_keys((1..=threshold).collect());
        let acquired = acquire_keys(&at_threshold, None, &table, &primary_key)
            .expect("keys should be acquired");
        assert!(!acquired.small_table);
    }

    #[test]
    fn falls_back_to_synthesized_keys_when_database_is_unreachable() {
        let (table, primary_key) = identifiers();
        let catalog = FakeCatalog::unreachable();
        let fallback = SynthesizedKeySource::new(500);

        let acquired = acquire_keys(&catalog, Some(&fallback), &table, &primary_key)
            .expect("fallback should be used");

        assert_eq!(acquired.keys.as_slice(), (0..500).collect::<Vec<i64>>());
        assert_eq!(acquired.source, fallback.describe());
    }

    #[test]
    fn fails_without_a_fallback() {
        let (table, primary_key) = identifiers();
        let error = acquire_keys(&FakeCatalog::unreachable(), None, &table, &primary_key)
            .expect_err("no key source should be reported");

        assert_eq!(
            error,
            ChunkError::NoKeySource {
                cause: "Database unavailable: connection refused".to_string()
            }
        );
    }

    #[test]
    fn does_not_mask_non_connectivity_errors() {
        let (table, primary_key) = identifiers();
        let catalog = FakeCatalog {
            keys: Err(ChunkError::InvalidChunkCount),
            ..FakeCatalog::with_keys(Vec::new())
        };
        let fallback = SynthesizedKeySource::new(500);

        let error = acquire_keys(&catalog, Some(&fallback), &table, &primary_key)
            .expect_err("error should propagate");
        assert_eq!(error, ChunkError::InvalidChunkCount);
    }

    #[test]
    fn supplied_primary_key_skips_the_lookup() {
        let (table, _) = identifiers();
        let catalog = FakeCatalog::unreachable();

        let primary_key =
            resolve_primary_key(&catalog, &table, Some("order_id")).expect("key should resolve");

        assert_eq!(primary_key.as_str(), "order_id");
        assert_eq!(catalog.lookups.get(), 0);
    }

    #[test]
    fn looks_up_the_primary_key_when_not_supplied() {
        let (table, _) = identifiers();
        let catalog = FakeCatalog::with_keys(Vec::new());

        let primary_key = resolve_primary_key(&catalog, &table, None).expect("key should resolve");

        assert_eq!(primary_key.as_str(), "id");
        assert_eq!(catalog.lookups.get(), 1);
    }

    #[test]
    fn missing_or_failed_lookup_is_fatal() {
        let (table, _) = identifiers();

        let no_key = FakeCatalog {
            primary_key: Ok(None),
            ..FakeCatalog::with_keys(Vec::new())
        };
        assert_eq!(
            resolve_primary_key(&no_key, &table, Some("  ")).expect_err("no pk"),
            ChunkError::PrimaryKeyNotFound {
                table: "orders".to_string()
            }
        );

        let error = resolve_primary_key(&FakeCatalog::unreachable(), &table, None)
            .expect_err("lookup failure should be fatal");
        assert!(matches!(error, ChunkError::PrimaryKeyLookup { .. }));
        assert!(!error.is_connectivity());
    }
}
