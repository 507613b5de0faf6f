use super::ids::TagId;
use super::model::{Permission, TagCategory};
use super::*;
use proptest::prelude::*;
use std::collections::BTreeSet;

fn tag_set(ids: &[i64]) -> BTreeSet<TagId> {
    ids.iter().copied().map(TagId::new).collect()
}

#[test]
fn reconcile_adds_and_removes_only_the_difference() {
    let delta = reconcile_tags(&tag_set(&[1, 2, 3]), &tag_set(&[2, 3, 4]));
    assert_eq!(delta.to_add, tag_set(&[4]));
    assert_eq!(delta.to_remove, tag_set(&[1]));

    let applied = tag_set(&[2, 3, 4]);
    let again = reconcile_tags(&applied, &tag_set(&[2, 3, 4]));
    assert!(again.is_empty());
}

#[test]
fn reconcile_handles_empty_sides() {
    let delta = reconcile_tags(&BTreeSet::new(), &tag_set(&[7, 8]));
    assert_eq!(delta.to_add, tag_set(&[7, 8]));
    assert!(delta.to_remove.is_empty());

    let delta = reconcile_tags(&tag_set(&[7, 8]), &BTreeSet::new());
    assert!(delta.to_add.is_empty());
    assert_eq!(delta.to_remove, tag_set(&[7, 8]));
}

#[test]
fn diff_of_identical_text_is_empty() {
    let text = "alpha\nbeta\ngamma";
    assert!(diff_lines(text, text).is_empty());
    assert!(diff_lines("", "").is_empty());
}

#[test]
fn diff_reports_line_numbers_in_order() {
    let diff = diff_lines("a\nb\nc\nd", "a\nx\nc\nd\ne");
    assert_eq!(
        diff.removed_lines,
        vec![DiffLine {
            line_no: 2,
            text: "b".to_string()
        }]
    );
    assert_eq!(
        diff.added_lines,
        vec![
            DiffLine {
                line_no: 2,
                text: "x".to_string()
            },
            DiffLine {
                line_no: 5,
                text: "e".to_string()
            },
        ]
    );
}

#[test]
fn diff_does_not_treat_moved_duplicates_as_unchanged() {
    let diff = diff_lines("one\ntwo", "two\none");
    assert_eq!(diff.added_lines.len(), 1);
    assert_eq!(diff.removed_lines.len(), 1);
}

#[test]
fn diff_of_fully_rewritten_large_text_stays_cheap() {
    let from: Vec<String> = (0..20_000).map(|i| format!("old line {i}")).collect();
    let to: Vec<String> = (0..20_000).map(|i| format!("new line {i}")).collect();
    let diff = diff_lines(&from.join("\n"), &to.join("\n"));
    assert_eq!(diff.removed_lines.len(), 20_000);
    assert_eq!(diff.added_lines.len(), 20_000);
    assert_eq!(diff.removed_lines[19_999].line_no, 20_000);
    assert_eq!(diff.added_lines[0].text, "new line 0");
}

#[test]
fn diff_of_large_text_with_scattered_edits() {
    let from: Vec<String> = (0..3_000).map(|i| format!("line {i}")).collect();
    let to: Vec<String> = (0..3_000)
        .map(|i| {
            if i % 100 == 50 {
                format!("edited {i}")
            } else {
                format!("line {i}")
            }
        })
        .collect();
    let diff = diff_lines(&from.join("\n"), &to.join("\n"));
    assert_eq!(diff.removed_lines.len(), 30);
    assert_eq!(diff.added_lines.len(), 30);
    assert_eq!(diff.removed_lines[0].line_no, 51);
    assert_eq!(diff.added_lines[0].text, "edited 50");
}

#[test]
fn diff_of_reversed_lines_keeps_one_in_common() {
    let from: Vec<String> = (0..500).map(|i| format!("row {i}")).collect();
    let to: Vec<String> = from.iter().rev().cloned().collect();
    let diff = diff_lines(&from.join("\n"), &to.join("\n"));
    assert_eq!(diff.removed_lines.len(), 499);
    assert_eq!(diff.added_lines.len(), 499);
}

fn lcs_len_by_table(a: &[&str], b: &[&str]) -> usize {
    let mut table = vec![vec![0usize; b.len() + 1]; a.len() + 1];
    for i in 1..=a.len() {
        for j in 1..=b.len() {
            table[i][j] = if a[i - 1] == b[j - 1] {
                table[i - 1][j - 1] + 1
            } else {
                table[i - 1][j].max(table[i][j - 1])
            };
        }
    }
    table[a.len()][b.len()]
}

fn kept_lines<'a>(lines: &[&'a str], dropped: &[DiffLine]) -> Vec<&'a str> {
    let dropped: BTreeSet<usize> = dropped.iter().map(|line| line.line_no).collect();
    lines
        .iter()
        .enumerate()
        .filter(|(idx, _)| !dropped.contains(&(idx + 1)))
        .map(|(_, text)| *text)
        .collect()
}

#[test]
fn document_fields_are_trimmed_and_validated() {
    let fields = DocumentFields::try_new("  Title ", "\nbody\n", Some("   ")).unwrap();
    assert_eq!(fields.title, "Title");
    assert_eq!(fields.content, "body");
    assert_eq!(fields.description, None);

    assert_eq!(
        DocumentFields::try_new(" ", "body", None).unwrap_err(),
        FieldError::TitleEmpty
    );
    assert_eq!(
        DocumentFields::try_new("t", "  ", None).unwrap_err(),
        FieldError::ContentEmpty
    );
    let long_title = "x".repeat(TITLE_MAX_CHARS + 1);
    assert_eq!(
        DocumentFields::try_new(&long_title, "body", None).unwrap_err(),
        FieldError::TitleTooLong
    );
}

#[test]
fn fields_patch_keeps_unspecified_values() {
    let current = DocumentFields::try_new("Title", "body", Some("desc")).unwrap();

    let patch = FieldsPatch {
        content: Some("new body".to_string()),
        ..FieldsPatch::default()
    };
    let next = patch.apply(&current).unwrap();
    assert_eq!(next.title, "Title");
    assert_eq!(next.content, "new body");
    assert_eq!(next.description.as_deref(), Some("desc"));

    let clear = FieldsPatch {
        description: Some(String::new()),
        ..FieldsPatch::default()
    };
    assert_eq!(clear.apply(&current).unwrap().description, None);
    assert!(FieldsPatch::default().is_empty());
    assert_eq!(FieldsPatch::default().apply(&current).unwrap(), current);
}

#[test]
fn tag_color_defaults_and_normalizes() {
    assert_eq!(normalize_tag_color(None).unwrap(), DEFAULT_TAG_COLOR);
    assert_eq!(normalize_tag_color(Some("#ff00aa")).unwrap(), "#FF00AA");
    assert_eq!(
        normalize_tag_color(Some("red")).unwrap_err(),
        FieldError::InvalidColor
    );
    assert_eq!(
        normalize_tag_color(Some("#12345")).unwrap_err(),
        FieldError::InvalidColor
    );
}

#[test]
fn tag_category_falls_back_to_other() {
    assert_eq!(TagCategory::parse("Coding"), TagCategory::Coding);
    assert_eq!(TagCategory::parse(""), TagCategory::General);
    assert_eq!(TagCategory::parse("marketing"), TagCategory::Other);
    for category in TagCategory::ALL {
        assert_eq!(TagCategory::parse(category.as_str()), *category);
    }
}

#[test]
fn permission_hierarchy() {
    assert!(Permission::Admin.allows(Permission::Write));
    assert!(Permission::Write.allows(Permission::Read));
    assert!(!Permission::Read.allows(Permission::Write));
    assert_eq!(Permission::parse(" WRITE "), Some(Permission::Write));
    assert_eq!(Permission::parse("owner"), None);
}

proptest! {
    #[test]
    fn reconcile_delta_moves_current_to_target(
        current in proptest::collection::btree_set(0i64..32, 0..16),
        target in proptest::collection::btree_set(0i64..32, 0..16),
    ) {
        let current: BTreeSet<TagId> = current.into_iter().map(TagId::new).collect();
        let target: BTreeSet<TagId> = target.into_iter().map(TagId::new).collect();
        let delta = reconcile_tags(&current, &target);

        prop_assert!(delta.to_add.is_disjoint(&current));
        prop_assert!(delta.to_remove.is_subset(&current));
        for kept in current.intersection(&target) {
            prop_assert!(!delta.to_add.contains(kept));
            prop_assert!(!delta.to_remove.contains(kept));
        }

        let mut applied = current.clone();
        for id in &delta.to_remove {
            applied.remove(id);
        }
        applied.extend(delta.to_add.iter().copied());
        prop_assert_eq!(&applied, &target);
        prop_assert!(reconcile_tags(&applied, &target).is_empty());
    }

    #[test]
    fn diff_line_counts_balance(
        from in proptest::collection::vec("[abc]{1,2}", 0..12),
        to in proptest::collection::vec("[abc]{1,2}", 0..12),
    ) {
        let from_text = from.join("\n");
        let to_text = to.join("\n");
        let diff = diff_lines(&from_text, &to_text);
        let from_lines = from_text.lines().count() as isize;
        let to_lines = to_text.lines().count() as isize;
        prop_assert_eq!(
            diff.removed_lines.len() as isize - diff.added_lines.len() as isize,
            from_lines - to_lines
        );
        prop_assert!(diff_lines(&from_text, &from_text).is_empty());
    }

    #[test]
    fn diff_keeps_a_longest_common_subsequence(
        from in proptest::collection::vec("[abcd]", 0..24),
        to in proptest::collection::vec("[abcd]", 0..24),
    ) {
        let from_text = from.join("\n");
        let to_text = to.join("\n");
        let diff = diff_lines(&from_text, &to_text);
        let old: Vec<&str> = from_text.lines().collect();
        let new: Vec<&str> = to_text.lines().collect();

        let old_kept = kept_lines(&old, &diff.removed_lines);
        let new_kept = kept_lines(&new, &diff.added_lines);
        prop_assert_eq!(&old_kept, &new_kept);
        prop_assert_eq!(old_kept.len(), lcs_len_by_table(&old, &new));
    }
}
