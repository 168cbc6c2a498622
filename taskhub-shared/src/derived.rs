/// Read-time derived fields
///
/// Counts, rates, and overdue flags are never stored. Each is a pure function
/// of an entity plus its loaded children, so the API layer can load the counts
/// it needs and compute the rest without touching the database again.
///
/// # Example
///
/// ```
/// use taskhub_shared::derived::{completion_rate, slugify};
///
/// assert_eq!(slugify("Test Org"), "test-org");
/// assert_eq!(completion_rate(3, 1), 33.33);
/// assert_eq!(completion_rate(0, 0), 0.0);
/// ```

use chrono::{DateTime, NaiveDate, Utc};

/// Derives a URL slug from an organization name.
///
/// Lowercase-hyphenation: ASCII letters, digits, and underscores are kept
/// (lowercased); runs of whitespace or hyphens collapse into a single hyphen;
/// any other punctuation is dropped. Leading and trailing separators do not
/// produce hyphens.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_separator = false;

    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() || ch == '_' {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(ch.to_ascii_lowercase());
        } else if ch.is_whitespace() || ch == '-' {
            pending_separator = true;
        }
    }

    slug
}

/// Percentage of completed tasks, rounded to 2 decimals.
///
/// Zero tasks is a valid state and yields 0.0, never a division by zero.
pub fn completion_rate(total_tasks: i64, completed_tasks: i64) -> f64 {
    if total_tasks == 0 {
        return 0.0;
    }
    let rate = completed_tasks as f64 / total_tasks as f64 * 100.0;
    (rate * 100.0).round() / 100.0
}

/// Whether a project is overdue: its due date has passed and it has not been
/// completed. Projects without a due date are never overdue.
pub fn project_is_overdue(due_date: Option<NaiveDate>, status: &str, today: NaiveDate) -> bool {
    match due_date {
        Some(due) => today > due && status != "COMPLETED",
        None => false,
    }
}

/// Whether a task is overdue: its due datetime has passed and it is not done.
pub fn task_is_overdue(due_date: Option<DateTime<Utc>>, status: &str, now: DateTime<Utc>) -> bool {
    match due_date {
        Some(due) => now > due && status != "DONE",
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Test Org"), "test-org");
        assert_eq!(slugify("Acme"), "acme");
        assert_eq!(slugify("ACME Corp"), "acme-corp");
    }

    #[test]
    fn test_slugify_collapses_separators() {
        assert_eq!(slugify("A  B"), "a-b");
        assert_eq!(slugify("A - B"), "a-b");
        assert_eq!(slugify("  Edge  Case  "), "edge-case");
    }

    #[test]
    fn test_slugify_drops_punctuation() {
        assert_eq!(slugify("Acme, Inc."), "acme-inc");
        assert_eq!(slugify("O'Brien & Sons"), "obrien-sons");
        assert_eq!(slugify("snake_case kept"), "snake_case-kept");
    }

    #[test]
    fn test_slugify_empty_and_symbol_only() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_completion_rate_zero_tasks() {
        assert_eq!(completion_rate(0, 0), 0.0);
    }

    #[test]
    fn test_completion_rate_rounding() {
        assert_eq!(completion_rate(3, 1), 33.33);
        assert_eq!(completion_rate(3, 2), 66.67);
        assert_eq!(completion_rate(1, 1), 100.0);
        assert_eq!(completion_rate(8, 2), 25.0);
    }

    #[test]
    fn test_project_overdue() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        let yesterday = NaiveDate::from_ymd_opt(2025, 6, 14).unwrap();
        let tomorrow = NaiveDate::from_ymd_opt(2025, 6, 16).unwrap();

        assert!(project_is_overdue(Some(yesterday), "ACTIVE", today));
        assert!(!project_is_overdue(Some(yesterday), "COMPLETED", today));
        assert!(!project_is_overdue(Some(tomorrow), "ACTIVE", today));
        // Due today is not yet overdue
        assert!(!project_is_overdue(Some(today), "ACTIVE", today));
        assert!(!project_is_overdue(None, "ACTIVE", today));
    }

    #[test]
    fn test_task_overdue() {
        let now = Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap();
        let past = now - Duration::hours(1);
        let future = now + Duration::hours(1);

        assert!(task_is_overdue(Some(past), "TODO", now));
        assert!(task_is_overdue(Some(past), "IN_PROGRESS", now));
        assert!(task_is_overdue(Some(past), "BLOCKED", now));
        // Completing the task clears the flag without touching the due date
        assert!(!task_is_overdue(Some(past), "DONE", now));
        assert!(!task_is_overdue(Some(future), "TODO", now));
        assert!(!task_is_overdue(None, "TODO", now));
    }
}
