use std::{fmt, sync::LazyLock};

use regex::Regex;

use crate::domain::chunk_error::{ChunkError, ChunkResult};

static IDENTIFIER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_$]*$").expect("identifier pattern should compile")
});

/// A table or column name that is safe to splice into SQL and shell text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlIdentifier(String);

impl SqlIdentifier {
    pub fn parse(value: &str, kind: &'static str) -> ChunkResult<Self> {
        let trimmed = value.trim();
        if !IDENTIFIER_PATTERN.is_match(trimmed) {
            return Err(ChunkError::InvalidIdentifier {
                kind,
                value: value.to_string(),
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SqlIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where the table lives and how to log in to it.
#[derive(Clone)]
pub struct DumpTarget {
    pub host: String,
    pub database: String,
    pub table: SqlIdentifier,
    pub user: String,
    pub password: String,
}

impl DumpTarget {
    pub fn new(
        host: &str,
        database: &str,
        table: &str,
        user: &str,
        password: &str,
    ) -> ChunkResult<Self> {
        let missing = [
            ("host", host),
            ("database", database),
            ("table", table),
            ("user", user),
            ("password", password),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect::<Vec<_>>();
        if !missing.is_empty() {
            return Err(ChunkError::MissingParameters(missing));
        }

        Ok(Self {
            host: host.trim().to_string(),
            database: database.trim().to_string(),
            table: SqlIdentifier::parse(table, "Table")?,
            user: user.trim().to_string(),
            password: password.to_string(),
        })
    }
}

impl fmt::Debug for DumpTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DumpTarget")
            .field("host", &self.host)
            .field("database", &self.database)
            .field("table", &self.table)
            .field("user", &self.user)
            .field("password", &"***")
            .finish()
    }
}
