//! Table reference extraction from raw query text.

use crate::{
    Result,
    text::{STANDARD_SQL, strip::remove_comments},
};
use regex::Regex;
use std::{collections::HashSet, sync::LazyLock};

/// A fully qualified reference: `segment.segment.segment`. Quote characters
/// stay in the class so the pattern reads the same as the cleanup step, but
/// in practice they are already gone by the time this runs.
static TABLE_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"[\w'"`-]+\.[\w'"`-]+\.[\w'"`-]+"#).expect("table reference pattern is valid")
});

/// Everything that is not an identifier character, `.`, or whitespace.
static NON_IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9._\s-]").expect("cleanup pattern is valid"));

/// Extract every `project.dataset.table` reference from `text`, deduplicated.
///
/// The scan is a lexical heuristic, not a SQL parse: comments are stripped
/// with the default dialect, quoting characters are deleted, and then any
/// dotted triple token is captured. Version-like or float-like dotted tokens
/// can over-match, and two-part references (`dataset.table`) are never
/// captured. A query with no dotted triples yields an empty set.
pub fn extract_table_references(text: &str) -> Result<HashSet<String>> {
    let no_comments = remove_comments(text, STANDARD_SQL)?;
    let cleaned = NON_IDENTIFIER.replace_all(&no_comments, "");

    Ok(TABLE_REFERENCE
        .find_iter(&cleaned)
        .map(|m| m.as_str().to_string())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn refs(sql: &str) -> HashSet<String> {
        extract_table_references(sql).unwrap()
    }

    fn set(items: &[&str]) -> HashSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[rstest]
    #[case("SELECT 1", &[])]
    #[case("SELECT a.b FROM x", &[])]
    #[case("", &[])]
    fn no_dotted_triples_yields_empty_set(#[case] sql: &str, #[case] expected: &[&str]) {
        assert_eq!(refs(sql), set(expected));
    }

    #[test]
    fn two_part_reference_is_not_captured() {
        assert_eq!(refs("SELECT a.b FROM x.y.z"), set(&["x.y.z"]));
    }

    #[test]
    fn quoted_and_unquoted_occurrences_deduplicate() {
        let sql = "SELECT * FROM `proj-1`.`ds_1`.`tbl_1` -- comment\n \
                   JOIN proj-1.ds_1.tbl_1 ON true";
        assert_eq!(refs(sql), set(&["proj-1.ds_1.tbl_1"]));
    }

    #[rstest]
    #[case("SELECT * FROM 'p'.'d'.'t'")]
    #[case("SELECT * FROM \"p\".\"d\".\"t\"")]
    #[case("SELECT * FROM `p`.`d`.`t`")]
    #[case("SELECT * FROM p.d.t")]
    fn quote_style_does_not_matter(#[case] sql: &str) {
        assert_eq!(refs(sql), set(&["p.d.t"]));
    }

    #[test]
    fn block_comment_content_is_excluded() {
        let sql = "/* SELECT proj.ds.tbl1 */ SELECT proj.ds.tbl2";
        assert_eq!(refs(sql), set(&["proj.ds.tbl2"]));
    }

    #[test]
    fn line_comment_content_is_excluded() {
        let sql = "SELECT * FROM a.b.c -- and also x.y.z";
        assert_eq!(refs(sql), set(&["a.b.c"]));
    }

    #[test]
    fn repeated_references_appear_once() {
        let sql = "SELECT * FROM p.d.t JOIN p.d.t ON true \
                   WHERE id IN (SELECT id FROM p.d.t)";
        assert_eq!(refs(sql), set(&["p.d.t"]));
    }

    #[test]
    fn order_independence() {
        let a = refs("SELECT * FROM a.a.a JOIN b.b.b");
        let b = refs("SELECT * FROM b.b.b JOIN a.a.a");
        assert_eq!(a, b);
    }

    #[test]
    fn multiple_distinct_references() {
        let sql = "SELECT * FROM p1.d1.t1 JOIN p2.d2.t2 ON t1.id = t2.id";
        assert_eq!(refs(sql), set(&["p1.d1.t1", "p2.d2.t2"]));
    }

    #[test]
    fn version_like_tokens_over_match() {
        // Known limitation of the lexical scan.
        assert_eq!(refs("SELECT '1.2.3'"), set(&["1.2.3"]));
    }
}
