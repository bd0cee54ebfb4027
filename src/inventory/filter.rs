//! Client-side filtering of the machine list.
//!
//! A record is visible when it passes the branch selector and, for a
//! non-empty query, when the query occurs case-insensitively inside its item
//! code or serial number. Filtering borrows; the input list is never touched
//! and the output keeps input order.

use crate::domain::{BranchFilter, MachineRecord};

/// Returns the records visible under `branch` and `query`, in input order.
///
/// An empty query matches everything. Records missing an item code or serial
/// number simply do not match on that field.
///
/// # Examples
///
/// ```
/// use machine_tracker::domain::{BranchFilter, MachineRecord};
/// use machine_tracker::inventory::filter;
///
/// let records = vec![
///     MachineRecord::new("A1", "S1").with_branch("Hettipola"),
///     MachineRecord::new("A2", "S2").with_branch("Mathara"),
/// ];
/// let visible = filter(&records, BranchFilter::All, "a1");
/// assert_eq!(visible, vec![&records[0]]);
/// ```
#[must_use]
pub fn filter<'a>(
    records: &'a [MachineRecord],
    branch: BranchFilter,
    query: &str,
) -> Vec<&'a MachineRecord> {
    let needle = fold_case(query);

    records
        .iter()
        .filter(|record| branch.admits(record.branch.as_deref()) && matches_query(record, &needle))
        .collect()
}

/// Whether a record matches a query already passed through [`fold_case`].
#[must_use]
pub fn matches_query(record: &MachineRecord, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    contains_folded(record.item_code.as_deref(), needle)
        || contains_folded(record.serial_no.as_deref(), needle)
}

fn contains_folded(field: Option<&str>, needle: &str) -> bool {
    field.is_some_and(|value| fold_case(value).contains(needle))
}

/// Lowercases `text` one character at a time.
///
/// Both filtering and highlighting go through this, so a row is highlighted
/// wherever it matched.
#[must_use]
pub fn fold_case(text: &str) -> String {
    text.chars().flat_map(char::to_lowercase).collect()
}

/// Character ranges of every case-insensitive occurrence of `query` in `text`.
///
/// Ranges are `(start, end)` character indices into `text` with exclusive
/// end, suitable for the table's match highlighting. Occurrences do not
/// overlap.
#[must_use]
pub fn match_ranges(text: &str, query: &str) -> Vec<(usize, usize)> {
    // Folded characters paired with the index of the character they came from.
    let haystack: Vec<(char, usize)> = text
        .chars()
        .enumerate()
        .flat_map(|(index, c)| c.to_lowercase().map(move |lower| (lower, index)))
        .collect();
    let needle: Vec<char> = fold_case(query).chars().collect();

    if needle.is_empty() || needle.len() > haystack.len() {
        return vec![];
    }

    let mut ranges: Vec<(usize, usize)> = Vec::new();
    let mut start = 0;
    while start + needle.len() <= haystack.len() {
        let window = &haystack[start..start + needle.len()];
        let first = window[0].1;
        let hit = window.iter().map(|(c, _)| c).eq(&needle)
            && ranges.last().map_or(true, |&(_, end)| first >= end);
        if hit {
            ranges.push((first, window[needle.len() - 1].1 + 1));
            start += needle.len();
        } else {
            start += 1;
        }
    }
    ranges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Branch;

    fn sample() -> Vec<MachineRecord> {
        vec![
            MachineRecord::new("A1", "S1").with_branch("Hettipola"),
            MachineRecord::new("A2", "S2").with_branch("Mathara"),
            MachineRecord::new("ABC123", "ZX-9").with_branch("Bakamuna1"),
            MachineRecord {
                item_code: None,
                serial_no: Some("SN-A1-77".into()),
                ..MachineRecord::default()
            },
        ]
    }

    fn is_subsequence(sub: &[&MachineRecord], of: &[MachineRecord]) -> bool {
        let mut it = of.iter();
        sub.iter().all(|s| it.any(|r| std::ptr::eq(r, *s)))
    }

    #[test]
    fn all_with_empty_query_is_identity() {
        let records = sample();
        let visible = filter(&records, BranchFilter::All, "");
        assert_eq!(visible.len(), records.len());
        assert!(visible.iter().zip(&records).all(|(v, r)| std::ptr::eq(*v, r)));
    }

    #[test]
    fn query_is_case_insensitive_substring() {
        let records = sample();
        let visible = filter(&records, BranchFilter::All, "abc");
        assert_eq!(visible, vec![&records[2]]);

        let visible = filter(&records, BranchFilter::All, "c12");
        assert_eq!(visible, vec![&records[2]]);
    }

    #[test]
    fn matches_serial_number_too() {
        let records = sample();
        let visible = filter(&records, BranchFilter::All, "zx-");
        assert_eq!(visible, vec![&records[2]]);
    }

    #[test]
    fn record_missing_item_code_still_matches_on_serial() {
        let records = sample();
        let visible = filter(&records, BranchFilter::All, "a1");
        assert_eq!(visible, vec![&records[0], &records[3]]);
    }

    #[test]
    fn record_missing_everything_does_not_panic() {
        let records = vec![MachineRecord::default()];
        assert!(filter(&records, BranchFilter::All, "x").is_empty());
        assert_eq!(filter(&records, BranchFilter::All, "").len(), 1);
    }

    #[test]
    fn branchless_record_only_visible_under_all() {
        let records = sample();
        let visible = filter(&records, BranchFilter::Only(Branch::Hettipola), "");
        assert_eq!(visible, vec![&records[0]]);
        assert!(filter(&records, BranchFilter::All, "").contains(&&records[3]));
    }

    #[test]
    fn branch_and_query_combine() {
        let records = sample();
        assert!(filter(&records, BranchFilter::Only(Branch::Mathara), "a1").is_empty());
        assert_eq!(
            filter(&records, BranchFilter::Only(Branch::Mathara), "a2"),
            vec![&records[1]]
        );
    }

    #[test]
    fn result_is_ordered_subsequence() {
        let records = sample();
        for branch in [BranchFilter::All, BranchFilter::Only(Branch::Hettipola)] {
            for query in ["", "a", "s", "1", "nope"] {
                let visible = filter(&records, branch, query);
                assert!(is_subsequence(&visible, &records), "{branch} / {query}");
            }
        }
    }

    #[test]
    fn input_is_left_untouched() {
        let records = sample();
        let before = records.clone();
        let _ = filter(&records, BranchFilter::Only(Branch::Mathara), "a");
        assert_eq!(records, before);
    }

    #[test]
    fn match_ranges_are_case_insensitive_and_disjoint() {
        assert_eq!(match_ranges("abcABC", "bc"), vec![(1, 3), (4, 6)]);
        assert_eq!(match_ranges("aaaa", "aa"), vec![(0, 2), (2, 4)]);
        assert!(match_ranges("abc", "").is_empty());
        assert!(match_ranges("ab", "abc").is_empty());
    }

    #[test]
    fn expanding_lowercase_still_highlights() {
        let records = vec![MachineRecord::new("İZMIR-1", "S1")];
        assert_eq!(filter(&records, BranchFilter::All, "i").len(), 1);
        assert_eq!(match_ranges("İZMIR-1", "i"), vec![(0, 1), (3, 4)]);
        assert_eq!(match_ranges("İZMIR-1", "İz"), vec![(0, 2)]);
    }

    #[test]
    fn every_filtered_row_has_a_highlight() {
        let records = vec![
            MachineRecord::new("İA1", "ΣN-1"),
            MachineRecord::new("Ab1", "s-İ"),
        ];
        for query in ["i", "a1", "σ", "İ", "S-"] {
            for record in filter(&records, BranchFilter::All, query) {
                let code = record.item_code.as_deref().unwrap_or_default();
                let serial = record.serial_no.as_deref().unwrap_or_default();
                assert!(
                    !match_ranges(code, query).is_empty() || !match_ranges(serial, query).is_empty(),
                    "{query} / {code}"
                );
            }
        }
    }
}
