//! Text helpers shared by the render paths

use crate::tokens::{is_word_continue, is_word_start};

/// Join trimmed, non-empty fragments with single spaces
pub fn tidy_sql<I, S>(fragments: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut sql = String::new();
    for fragment in fragments {
        let fragment = fragment.as_ref().trim();
        if fragment.is_empty() {
            continue;
        }
        if !sql.is_empty() {
            sql.push(' ');
        }
        sql.push_str(fragment);
    }
    sql
}

/// Remove exactly one pair of enclosing parentheses, if present
pub fn strip_outer_parens(text: &str) -> &str {
    let trimmed = text.trim();
    trimmed
        .strip_prefix('(')
        .and_then(|inner| inner.strip_suffix(')'))
        .unwrap_or(trimmed)
}

/// Bare identifier when the name allows it, double-quoted otherwise
pub fn render_identifier(name: &str) -> String {
    let mut chars = name.chars();
    let plain = chars.next().is_some_and(is_word_start) && chars.all(is_word_continue);
    if plain {
        name.to_string()
    } else {
        format!("\"{}\"", name.replace('"', "\"\""))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tidy_sql_drops_empty_fragments() {
        assert_eq!(tidy_sql(["ENABLED", "=", "TRUE"]), "ENABLED = TRUE");
        assert_eq!(tidy_sql(["", "  COMMENT  ", "", "= 'x'"]), "COMMENT = 'x'");
        assert_eq!(tidy_sql(Vec::<String>::new()), "");
    }

    #[test]
    fn test_tidy_sql_keeps_inner_text() {
        assert_eq!(
            tidy_sql(["AS", "select a,  b\nfrom t"]),
            "AS select a,  b\nfrom t"
        );
    }

    #[test]
    fn test_strip_outer_parens_removes_one_pair() {
        assert_eq!(strip_outer_parens(" ((a)) "), "(a)");
        assert_eq!(strip_outer_parens("a"), "a");
        assert_eq!(strip_outer_parens("(a"), "(a");
    }

    #[test]
    fn test_render_identifier() {
        assert_eq!(render_identifier("user_id"), "user_id");
        assert_eq!(render_identifier("User Id"), "\"User Id\"");
        assert_eq!(render_identifier("1st"), "\"1st\"");
        assert_eq!(render_identifier(""), "\"\"");
    }
}
