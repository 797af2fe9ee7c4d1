//! Text stripping primitives: comment removal and character deletion.

use crate::{Error, Result, text::dialect};

/// Remove every comment matched by the named dialect, marker included.
///
/// Comment-like sequences inside string literals are stripped as well; this
/// is a lexical pass, not a tokenizer, and callers accept that tradeoff.
///
/// Fails with [`Error::UnknownDialect`] when `dialect` is not registered.
pub fn remove_comments(text: &str, dialect: &str) -> Result<String> {
    let pattern = dialect::comment_pattern(dialect)?;
    Ok(pattern.replace_all(text, "").into_owned())
}

/// Delete every occurrence of any listed character, preserving the relative
/// order of what remains.
///
/// Fails with [`Error::InvalidArgument`] when `chars` is empty.
pub fn remove_chars(text: &str, chars: &[char]) -> Result<String> {
    if chars.is_empty() {
        return Err(Error::InvalidArgument("chars to remove must not be empty"));
    }
    Ok(text.chars().filter(|c| !chars.contains(c)).collect())
}
