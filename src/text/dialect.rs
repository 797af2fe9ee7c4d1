//! Comment dialect registry.
//!
//! A dialect maps a string key to the regex that matches every comment form
//! of that language. Only `standard_sql` ships by default; additional
//! dialects can be registered at runtime so calling code never changes when
//! a new language shows up.

use crate::{Error, Result};
use regex::Regex;
use std::{
    collections::HashMap,
    sync::{LazyLock, RwLock},
};

/// Key of the built-in dialect: `--` and `//` line comments plus `/* */`
/// block comments.
pub const STANDARD_SQL: &str = "standard_sql";

/// Line comments run to end of line; block comments are non-greedy so a
/// match never swallows code past the first closing `*/`.
const STANDARD_SQL_PATTERN: &str = r"//.*|--.*|(?s:/\*.*?\*/)";

static DIALECTS: LazyLock<RwLock<HashMap<String, Regex>>> = LazyLock::new(|| {
    let mut map = HashMap::new();
    map.insert(
        STANDARD_SQL.to_string(),
        Regex::new(STANDARD_SQL_PATTERN).expect("built-in dialect pattern is valid"),
    );
    RwLock::new(map)
});

/// Register (or replace) a comment dialect under `key`.
///
/// `pattern` must be a valid regex matching entire comments, opening marker
/// included; invalid patterns fail with [`Error::Pattern`].
pub fn register_dialect(key: impl Into<String>, pattern: &str) -> Result {
    let compiled = Regex::new(pattern)?;
    // Entries are inserted whole, so the map stays consistent even if a
    // holder of the lock panicked; recover instead of poisoning every
    // later caller.
    DIALECTS
        .write()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
        .insert(key.into(), compiled);
    Ok(())
}

/// Look up the compiled pattern for a dialect key.
pub(crate) fn comment_pattern(dialect: &str) -> Result<Regex> {
    DIALECTS
        .read()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
        .get(dialect)
        .cloned()
        .ok_or_else(|| Error::UnknownDialect(dialect.to_string()))
}
