//! Dialect-specific pieces of SQL generation.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::NodeError;

/// SQL reserved words that must be quoted when used as identifiers.
pub const RESERVED_WORDS: &[&str] = &[
    "all", "alter", "and", "as", "between", "case", "check", "constraint", "create", "default",
    "delete", "distinct", "drop", "else", "end", "false", "foreign", "from", "group", "having",
    "in", "index", "inner", "insert", "is", "join", "key", "left", "like", "limit", "not", "null",
    "offset", "on", "or", "order", "outer", "primary", "references", "right", "schema", "select",
    "table", "then", "true", "type", "union", "update", "user", "view", "when", "where", "with",
];

/// Quote a single identifier part if it is a reserved word or not a plain
/// lowercase-safe name. Schema qualification is rendered by the caller.
pub fn escape_identifier(name: &str) -> String {
    let lower = name.to_lowercase();
    let needs_escaping = RESERVED_WORDS.contains(&lower.as_str())
        || name.is_empty()
        || name.chars().any(char::is_uppercase)
        || name.chars().any(|c| !c.is_alphanumeric() && c != '_')
        || name.chars().next().is_some_and(|c| c.is_numeric());

    if needs_escaping {
        quote(name)
    } else {
        name.to_string()
    }
}

fn quote(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Trait for dialect-specific SQL generation.
pub trait SqlDialect {
    /// Quote an identifier part (schema, table, column or alias).
    fn quote_identifier(&self, name: &str) -> String;
    /// Parameter placeholder for the 1-based parameter `index`.
    fn placeholder(&self, index: usize) -> String;
    /// Boolean literal used when values are inlined.
    fn bool_literal(&self, val: bool) -> String;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PostgresDialect;

impl SqlDialect for PostgresDialect {
    fn quote_identifier(&self, name: &str) -> String {
        escape_identifier(name)
    }

    fn placeholder(&self, index: usize) -> String {
        format!("${}", index)
    }

    fn bool_literal(&self, val: bool) -> String {
        String::from(if val { "true" } else { "false" })
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SqliteDialect;

impl SqlDialect for SqliteDialect {
    fn quote_identifier(&self, name: &str) -> String {
        quote(name)
    }

    fn placeholder(&self, _index: usize) -> String {
        "?".to_string()
    }

    fn bool_literal(&self, val: bool) -> String {
        String::from(if val { "1" } else { "0" })
    }
}

/// Dialect selected by name from configuration or the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    #[default]
    Postgres,
    Sqlite,
}

impl Dialect {
    fn inner(&self) -> &dyn SqlDialect {
        match self {
            Dialect::Postgres => &PostgresDialect,
            Dialect::Sqlite => &SqliteDialect,
        }
    }
}

impl SqlDialect for Dialect {
    fn quote_identifier(&self, name: &str) -> String {
        self.inner().quote_identifier(name)
    }

    fn placeholder(&self, index: usize) -> String {
        self.inner().placeholder(index)
    }

    fn bool_literal(&self, val: bool) -> String {
        self.inner().bool_literal(val)
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dialect::Postgres => write!(f, "postgres"),
            Dialect::Sqlite => write!(f, "sqlite"),
        }
    }
}

impl FromStr for Dialect {
    type Err = NodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => Ok(Dialect::Postgres),
            "sqlite" | "sqlite3" => Ok(Dialect::Sqlite),
            other => Err(NodeError::Config(format!("Unknown dialect: '{}'", other))),
        }
    }
}
