/// Database models for TaskHub
///
/// Each model owns its SQL. Every query and mutation that touches a
/// tenant-owned entity (projects, tasks, comments) is scoped to an
/// organization id; there are no unscoped accessors for those tables.
///
/// # Models
///
/// - `organization`: tenant root, slug lookup, derived counts
/// - `project`: projects with status, search, and partial updates
/// - `task`: tasks scoped through their parent project's organization
/// - `comment`: task comments
/// - `stats`: per-tenant aggregate statistics

pub mod comment;
pub mod organization;
pub mod project;
pub mod stats;
pub mod task;

/// Builds a `%term%` ILIKE pattern, escaping LIKE metacharacters so the
/// search term is always treated as a literal substring.
pub(crate) fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}

#[cfg(test)]
mod tests {
    use super::like_pattern;

    #[test]
    fn test_like_pattern_plain() {
        assert_eq!(like_pattern("api"), "%api%");
    }

    #[test]
    fn test_like_pattern_escapes_metacharacters() {
        assert_eq!(like_pattern("100%"), "%100\\%%");
        assert_eq!(like_pattern("a_b"), "%a\\_b%");
        assert_eq!(like_pattern("a\\b"), "%a\\\\b%");
    }
}
