use std::future::Future;

use sqlx::{
    Connection, Row,
    mysql::{MySqlConnectOptions, MySqlConnection},
};

use crate::{
    application::ports::{KeySource, PrimaryKeyLookup},
    domain::{
        chunk_error::{ChunkError, ChunkResult},
        chunk_plan::KeySequence,
        dump_target::{DumpTarget, SqlIdentifier},
    },
};

/// Live MySQL introspection. Opens one connection per query and blocks on a
/// current-thread runtime, so callers stay synchronous.
#[derive(Debug, Clone)]
pub struct MySqlCatalog {
    options: MySqlConnectOptions,
}

impl MySqlCatalog {
    pub fn new(target: &DumpTarget) -> Self {
        let options = MySqlConnectOptions::new()
            .host(&target.host)
            .username(&target.user)
            .password(&target.password)
            .database(&target.database);
        Self { options }
    }

    fn block_on<T>(future: impl Future<Output = Result<T, sqlx::Error>>) -> ChunkResult<T> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|error| ChunkError::Connectivity(error.to_string()))?;
        runtime
            .block_on(future)
            .map_err(|error| ChunkError::Connectivity(error.to_string()))
    }
}

impl KeySource for MySqlCatalog {
    fn describe(&self) -> &'static str {
        "live table keys"
    }

    fn ordered_keys(
        &self,
        table: &SqlIdentifier,
        primary_key: &SqlIdentifier,
    ) -> ChunkResult<KeySequence> {
        let sql = ordered_keys_query(table, primary_key);
        tracing::debug!(%sql, "reading table keys");

        let keys = Self::block_on(async {
            let mut connection = MySqlConnection::connect_with(&self.options).await?;
            let keys = sqlx::query_scalar::<_, i64>(&sql)
                .fetch_all(&mut connection)
                .await?;
            connection.close().await?;
            Ok::<_, sqlx::Error>(keys)
        })?;
        Ok(KeySequence::new(keys))
    }
}

impl PrimaryKeyLookup for MySqlCatalog {
    fn primary_key_column(&self, table: &SqlIdentifier) -> ChunkResult<Option<String>> {
        let sql = primary_key_query(table);
        tracing::debug!(%sql, "looking up primary key");

        Self::block_on(async {
            let mut connection = MySqlConnection::connect_with(&self.options).await?;
            let row = sqlx::query(&sql).fetch_optional(&mut connection).await?;
            connection.close().await?;

            // SHOW KEYS reports names with a binary collation on some servers.
            let column = match row {
                Some(row) => Some(row.try_get::<Vec<u8>, _>("Column_name")?),
                None => None,
            };
            Ok::<_, sqlx::Error>(
                column.map(|bytes| String::from_utf8_lossy(&bytes).into_owned()),
            )
        })
    }
}

fn ordered_keys_query(table: &SqlIdentifier, primary_key: &SqlIdentifier) -> String {
    format!("SELECT CAST({primary_key} AS SIGNED) FROM {table} ORDER BY {primary_key}")
}

fn primary_key_query(table: &SqlIdentifier) -> String {
    format!("SHOW KEYS FROM {table} WHERE Key_name = 'PRIMARY'")
}
