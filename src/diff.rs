#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    HunkHeader,
    Added,
    Removed,
    Context,
    Raw,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffRow {
    pub kind: RowKind,
    pub old_line: Option<u32>,
    pub new_line: Option<u32>,
    pub text: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChangeStats {
    pub additions: u32,
    pub deletions: u32,
}

pub fn parse_diff(diff_text: &str) -> Vec<DiffRow> {
    let mut rows = Vec::new();

    let mut in_hunk = false;
    let mut old_line = 1u32;
    let mut new_line = 1u32;

    // Split on '\n' rather than lines(): the backend terminates every diff
    // line with '\n', and the trailing empty piece still counts as a line.
    for line in diff_text.split('\n') {
        if line.starts_with("@@") {
            if let Some((next_old, next_new)) = parse_hunk_header(line) {
                old_line = next_old;
                new_line = next_new;
            }
            in_hunk = true;
            rows.push(DiffRow {
                kind: RowKind::HunkHeader,
                old_line: None,
                new_line: None,
                text: line.to_owned(),
            });
            continue;
        }

        if !in_hunk {
            continue;
        }

        if let Some(content) = line.strip_prefix("+ ") {
            rows.push(DiffRow {
                kind: RowKind::Added,
                old_line: None,
                new_line: Some(new_line),
                text: content.to_owned(),
            });
            new_line += 1;
        } else if let Some(content) = line.strip_prefix("- ") {
            rows.push(DiffRow {
                kind: RowKind::Removed,
                old_line: Some(old_line),
                new_line: None,
                text: content.to_owned(),
            });
            old_line += 1;
        } else if let Some(content) = line.strip_prefix("  ") {
            rows.push(DiffRow {
                kind: RowKind::Context,
                old_line: Some(old_line),
                new_line: Some(new_line),
                text: content.to_owned(),
            });
            old_line += 1;
            new_line += 1;
        } else {
            // Anything else inside a hunk stays visible verbatim and keeps
            // both counters moving.
            rows.push(DiffRow {
                kind: RowKind::Raw,
                old_line: Some(old_line),
                new_line: Some(new_line),
                text: line.to_owned(),
            });
            old_line += 1;
            new_line += 1;
        }
    }

    rows
}

// First-character test, deliberately looser than the two-character prefixes
// used for row classification. The sidebar badges and the header totals have
// always been computed this way.
pub fn count_changes(diff_text: &str) -> ChangeStats {
    let mut stats = ChangeStats::default();
    for line in diff_text.split('\n') {
        if line.starts_with('+') {
            stats.additions += 1;
        } else if line.starts_with('-') {
            stats.deletions += 1;
        }
    }
    stats
}

// Strict `@@ -<start>,<count> +<start>,<count> @@` shape; anything else
// leaves the running counters untouched.
fn parse_hunk_header(header: &str) -> Option<(u32, u32)> {
    let rest = header.strip_prefix("@@ -")?;
    let (old_start, rest) = parse_range(rest)?;
    let rest = rest.strip_prefix(" +")?;
    let (new_start, rest) = parse_range(rest)?;
    let rest = rest.strip_prefix(' ')?;
    if !rest.starts_with("@@") {
        return None;
    }
    Some((old_start, new_start))
}

fn parse_range(text: &str) -> Option<(u32, &str)> {
    let (start, rest) = take_number(text)?;
    let (_, rest) = take_number(rest.strip_prefix(',')?)?;
    Some((start, rest))
}

fn take_number(text: &str) -> Option<(u32, &str)> {
    let end = text
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(text.len());
    let value = text[..end].parse().ok()?;
    Some((value, &text[end..]))
}

#[cfg(test)]
mod tests {
    use super::{RowKind, count_changes, parse_diff};

    #[test]
    fn classifies_and_numbers_hunk_lines() {
        let rows = parse_diff("@@ -10,3 +20,3 @@\n  a\n- b\n+ c");

        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].kind, RowKind::HunkHeader);
        assert_eq!(rows[0].old_line, None);
        assert_eq!(rows[0].new_line, None);
        assert_eq!(rows[0].text, "@@ -10,3 +20,3 @@");

        assert_eq!(rows[1].kind, RowKind::Context);
        assert_eq!(rows[1].old_line, Some(10));
        assert_eq!(rows[1].new_line, Some(20));
        assert_eq!(rows[1].text, "a");

        assert_eq!(rows[2].kind, RowKind::Removed);
        assert_eq!(rows[2].old_line, Some(11));
        assert_eq!(rows[2].new_line, None);
        assert_eq!(rows[2].text, "b");

        assert_eq!(rows[3].kind, RowKind::Added);
        assert_eq!(rows[3].old_line, None);
        assert_eq!(rows[3].new_line, Some(21));
        assert_eq!(rows[3].text, "c");
    }

    #[test]
    fn trailing_newline_becomes_empty_raw_row() {
        let rows = parse_diff("@@ -10,3 +20,3 @@\n  a\n- b\n+ c\n");

        assert_eq!(rows.len(), 5);
        let last = &rows[4];
        assert_eq!(last.kind, RowKind::Raw);
        assert_eq!(last.old_line, Some(12));
        assert_eq!(last.new_line, Some(22));
        assert_eq!(last.text, "");
    }

    #[test]
    fn drops_preamble_before_first_hunk() {
        let input = "diff --git a/f b/f\n--- a/f\n+++ b/f\n@@ -1,1 +1,1 @@\n  x";
        let rows = parse_diff(input);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].kind, RowKind::HunkHeader);
        assert_eq!(rows[1].kind, RowKind::Context);
        assert_eq!(rows[1].text, "x");
    }

    #[test]
    fn malformed_header_keeps_running_counters() {
        let input = "@@ -1,1 +1,1 @@\n  a\n@@ bogus @@\n  b";
        let rows = parse_diff(input);

        assert_eq!(rows.len(), 4);
        assert_eq!(rows[2].kind, RowKind::HunkHeader);
        assert_eq!(rows[2].text, "@@ bogus @@");
        assert_eq!(rows[3].kind, RowKind::Context);
        assert_eq!(rows[3].old_line, Some(2));
        assert_eq!(rows[3].new_line, Some(2));
    }

    #[test]
    fn header_without_counts_does_not_reset() {
        let input = "@@ -4,2 +9,2 @@\n  a\n@@ -5 +7 @@\n  b";
        let rows = parse_diff(input);

        assert_eq!(rows[3].old_line, Some(5));
        assert_eq!(rows[3].new_line, Some(10));
    }

    #[test]
    fn unknown_in_hunk_lines_stay_verbatim() {
        let input = "@@ -3,2 +4,2 @@\n\\ No newline at end of file\n+x";
        let rows = parse_diff(input);

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1].kind, RowKind::Raw);
        assert_eq!(rows[1].old_line, Some(3));
        assert_eq!(rows[1].new_line, Some(4));
        assert_eq!(rows[1].text, "\\ No newline at end of file");

        // "+x" misses the "+ " prefix, so it falls through as raw too.
        assert_eq!(rows[2].kind, RowKind::Raw);
        assert_eq!(rows[2].old_line, Some(4));
        assert_eq!(rows[2].new_line, Some(5));
        assert_eq!(rows[2].text, "+x");
    }

    #[test]
    fn empty_lines_inside_hunk_advance_both_counters() {
        let rows = parse_diff("@@ -1,3 +1,3 @@\n  a\n\n  b");

        assert_eq!(rows[2].kind, RowKind::Raw);
        assert_eq!(rows[2].text, "");
        assert_eq!(rows[3].old_line, Some(3));
        assert_eq!(rows[3].new_line, Some(3));
    }

    #[test]
    fn numbered_columns_step_by_one() {
        let rows = parse_diff("@@ -5,4 +9,4 @@\n  a\n- b\n- c\n+ d\n+ e\n  f");

        let olds: Vec<u32> = rows.iter().filter_map(|r| r.old_line).collect();
        let news: Vec<u32> = rows.iter().filter_map(|r| r.new_line).collect();
        assert_eq!(olds, vec![5, 6, 7, 8]);
        assert_eq!(news, vec![9, 10, 11, 12]);
    }

    #[test]
    fn empty_input_yields_no_rows() {
        assert!(parse_diff("").is_empty());
    }

    #[test]
    fn reparse_yields_identical_rows() {
        let input = "@@ -1,2 +1,3 @@\n  a\n+ b\n- c\nodd";
        assert_eq!(parse_diff(input), parse_diff(input));
    }

    #[test]
    fn count_changes_uses_first_character_only() {
        let stats = count_changes("+x\n-y\n  z");
        assert_eq!(stats.additions, 1);
        assert_eq!(stats.deletions, 1);
    }

    #[test]
    fn count_changes_includes_meta_lines() {
        // File headers start with '+'/'-' too; the badge totals have always
        // counted them even though row classification skips them.
        let stats = count_changes("--- a/f\n+++ b/f\n@@ -1,1 +1,2 @@\n+ added");
        assert_eq!(stats.additions, 2);
        assert_eq!(stats.deletions, 1);
    }

    #[test]
    fn count_changes_on_empty_text_is_zero() {
        let stats = count_changes("");
        assert_eq!(stats.additions, 0);
        assert_eq!(stats.deletions, 0);
    }
}
