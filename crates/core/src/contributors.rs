//! Contributor list selection: sorting, threshold cutoff, and list formatting.
//!
//! The store hands back one [`ContributorRow`] per (page, editor) pair. This
//! module turns that into what a reader sees: a sorted list, optionally cut
//! down to "the top N plus anyone still above the threshold", and a count of
//! the editors left out.

use serde::Serialize;

use crate::options::{QueryOptions, SortBy};
use crate::types::{DbId, Timestamp, ANONYMOUS_EDITOR_ID};

/// One editor's tally on one page.
///
/// `user_text` is the editor's name as recorded at edit time. It is not
/// re-resolved if the account is later renamed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContributorRow {
    pub page_id: DbId,
    pub user_id: DbId,
    pub user_text: String,
    pub revision_count: i32,
    pub first_edit: Timestamp,
    pub last_edit: Timestamp,
}

impl ContributorRow {
    pub fn is_anonymous(&self) -> bool {
        self.user_id == ANONYMOUS_EDITOR_ID
    }
}

/// The rows to display plus the number of editors folded into "others".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContributorsResult {
    pub contributors: Vec<ContributorRow>,
    pub others: i64,
}

impl ContributorsResult {
    /// Display names of the shown contributors, in display order.
    pub fn names(&self) -> Vec<String> {
        self.contributors
            .iter()
            .map(|row| row.user_text.clone())
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

/// Sort rows for display.
///
/// The base order is edit count descending, ties broken by name ascending.
/// [`SortBy::User`] re-sorts by name *descending*. `ascending` then reverses
/// the whole sequence. The two toggles are applied in that order and do not
/// commute: ascending-by-count is the reverse of the base order (ties
/// included), ascending-by-user is plain lexical order.
pub fn sort_contributors(rows: &mut [ContributorRow], sort_by: SortBy, ascending: bool) {
    rows.sort_by(|a, b| {
        b.revision_count
            .cmp(&a.revision_count)
            .then_with(|| a.user_text.cmp(&b.user_text))
            .then_with(|| a.user_id.cmp(&b.user_id))
    });

    if sort_by == SortBy::User {
        rows.sort_by(|a, b| {
            b.user_text
                .cmp(&a.user_text)
                .then_with(|| b.user_id.cmp(&a.user_id))
        });
    }

    if ascending {
        rows.reverse();
    }
}

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// Apply filters, sort, and (when enabled) the limit/threshold cutoff.
///
/// Cutoff walk: rows are taken in display order; once at least `limit` rows
/// have been taken, the walk stops at the first row whose count is below
/// `threshold`. Rows at exactly the threshold are kept past the limit.
/// Everything after the stopping row goes into `others`, even if a later row
/// would pass on its own.
pub fn select_contributors(
    mut rows: Vec<ContributorRow>,
    opts: &QueryOptions,
) -> ContributorsResult {
    if opts.filter_anonymous {
        rows.retain(|row| !row.is_anonymous());
    }

    sort_contributors(&mut rows, opts.sort_by, opts.ascending);

    if !opts.use_threshold {
        return ContributorsResult {
            contributors: rows,
            others: 0,
        };
    }

    let total = rows.len();
    let mut shown: i64 = 0;
    let mut cut_at = total;
    for (idx, row) in rows.iter().enumerate() {
        if shown >= opts.limit && i64::from(row.revision_count) < opts.threshold {
            cut_at = idx;
            break;
        }
        shown += 1;
    }
    rows.truncate(cut_at);

    ContributorsResult {
        others: (total - cut_at) as i64,
        contributors: rows,
    }
}

// ---------------------------------------------------------------------------
// Formatting
// ---------------------------------------------------------------------------

/// Machine-readable export: one `name = count` line per row.
pub fn format_raw_list(rows: &[ContributorRow]) -> String {
    let mut out = String::new();
    for row in rows {
        out.push_str(&row.user_text);
        out.push_str(" = ");
        out.push_str(&row.revision_count.to_string());
        out.push('\n');
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::options::ContributorsConfig;

    fn row(user_id: DbId, name: &str, count: i32) -> ContributorRow {
        let ts = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        ContributorRow {
            page_id: 1,
            user_id,
            user_text: name.to_string(),
            revision_count: count,
            first_edit: ts,
            last_edit: ts,
        }
    }

    fn opts(limit: i64, threshold: i64) -> QueryOptions {
        QueryOptions::from_config(&ContributorsConfig { limit, threshold })
    }

    fn counts(result: &ContributorsResult) -> Vec<i32> {
        result
            .contributors
            .iter()
            .map(|r| r.revision_count)
            .collect()
    }

    // -- threshold cutoff ----------------------------------------------------

    #[test]
    fn tie_at_threshold_is_kept_past_limit() {
        let rows = vec![row(1, "A", 10), row(2, "B", 5), row(3, "C", 5), row(4, "D", 1)];
        let result = select_contributors(rows, &opts(2, 5));
        assert_eq!(counts(&result), vec![10, 5, 5]);
        assert_eq!(result.others, 1);
    }

    #[test]
    fn limit_larger_than_rows_shows_everything() {
        let rows = vec![row(1, "A", 3), row(0, "127.0.0.1", 2), row(2, "B", 1)];
        let result = select_contributors(rows, &opts(10, 2));
        assert_eq!(result.names(), vec!["A", "127.0.0.1", "B"]);
        assert_eq!(result.others, 0);
    }

    #[test]
    fn limit_one_threshold_two() {
        let rows = vec![row(2, "B", 1), row(1, "A", 3), row(0, "127.0.0.1", 2)];
        let result = select_contributors(rows, &opts(1, 2));
        assert_eq!(result.names(), vec!["A", "127.0.0.1"]);
        assert_eq!(result.others, 1);
    }

    #[test]
    fn zero_limit_applies_threshold_from_first_row() {
        let rows = vec![row(1, "A", 1), row(2, "B", 1)];
        let result = select_contributors(rows, &opts(0, 2));
        assert!(result.contributors.is_empty());
        assert_eq!(result.others, 2);
    }

    #[test]
    fn walk_stops_at_first_failing_row() {
        // Ascending order puts the low counts first; the walk never reaches
        // the high-count rows after it stops.
        let rows = vec![row(1, "A", 9), row(2, "B", 1), row(3, "C", 1)];
        let mut o = opts(1, 2);
        o.ascending = true;
        let result = select_contributors(rows, &o);
        assert_eq!(counts(&result), vec![1]);
        assert_eq!(result.others, 2);
    }

    #[test]
    fn unthresholded_returns_all_rows() {
        let rows = vec![row(1, "A", 10), row(2, "B", 1), row(3, "C", 1)];
        let result = select_contributors(rows, &opts(1, 5).unthresholded());
        assert_eq!(result.contributors.len(), 3);
        assert_eq!(result.others, 0);
    }

    #[test]
    fn empty_input() {
        let result = select_contributors(Vec::new(), &opts(10, 2));
        assert_eq!(result, ContributorsResult::default());
    }

    // -- filtering -----------------------------------------------------------

    #[test]
    fn filter_anonymous_removes_only_id_zero() {
        let rows = vec![
            row(0, "10.0.0.1", 4),
            row(1, "A", 3),
            row(0, "10.0.0.2", 2),
            row(2, "B", 1),
        ];
        let mut o = opts(10, 2);
        o.filter_anonymous = true;
        let result = select_contributors(rows, &o);
        assert_eq!(result.names(), vec!["A", "B"]);
        assert!(result.contributors.iter().all(|r| !r.is_anonymous()));
    }

    // -- sort / reverse ------------------------------------------------------

    #[test]
    fn count_sort_reversed_is_ascending_by_count() {
        let mut rows = vec![row(1, "A", 3), row(2, "B", 7), row(3, "C", 3), row(4, "D", 1)];
        sort_contributors(&mut rows, SortBy::Count, false);
        assert_eq!(
            rows.iter().map(|r| r.user_text.as_str()).collect::<Vec<_>>(),
            vec!["B", "A", "C", "D"]
        );

        sort_contributors(&mut rows, SortBy::Count, true);
        // Whole-sequence reversal: ties come out in reverse name order.
        assert_eq!(
            rows.iter().map(|r| r.user_text.as_str()).collect::<Vec<_>>(),
            vec!["D", "C", "A", "B"]
        );
    }

    #[test]
    fn user_sort_is_descending_and_reversal_gives_lexical() {
        let mut rows = vec![row(1, "Bob", 1), row(2, "alice", 9), row(3, "Carol", 4)];
        sort_contributors(&mut rows, SortBy::User, false);
        // Byte order: lowercase sorts after uppercase.
        assert_eq!(
            rows.iter().map(|r| r.user_text.as_str()).collect::<Vec<_>>(),
            vec!["alice", "Carol", "Bob"]
        );

        sort_contributors(&mut rows, SortBy::User, true);
        assert_eq!(
            rows.iter().map(|r| r.user_text.as_str()).collect::<Vec<_>>(),
            vec!["Bob", "Carol", "alice"]
        );
    }

    #[test]
    fn user_sort_ignores_counts_for_threshold_order() {
        let rows = vec![row(1, "A", 1), row(2, "B", 5), row(3, "C", 1)];
        let mut o = opts(1, 2);
        o.sort_by = SortBy::User;
        let result = select_contributors(rows, &o);
        // C, B, A: C is taken (limit not reached), B passes, A is cut.
        assert_eq!(result.names(), vec!["C", "B"]);
        assert_eq!(result.others, 1);
    }

    // -- formatting ----------------------------------------------------------

    #[test]
    fn raw_list_has_one_line_per_row() {
        let rows = vec![row(1, "A", 3), row(0, "10.0.0.1", 1)];
        assert_eq!(format_raw_list(&rows), "A = 3\n10.0.0.1 = 1\n");
        assert_eq!(format_raw_list(&[]), "");
    }
}
