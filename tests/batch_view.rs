use std::collections::HashMap;

use ratatui::layout::Rect;

use commitview::api::{ApiClient, ApiResponse, CommitBatch};
use commitview::app::{App, PaneFocus};
use commitview::diff::RowKind;
use commitview::settings::AppSettings;

#[test]
fn opens_batch_with_first_file_selected() {
    let app = app_from_fixture();

    // Paths sort lexicographically, so README.md comes first.
    assert_eq!(app.selected_path(), Some("README.md"));
    assert_eq!(app.diff_rows[0].kind, RowKind::HunkHeader);

    let totals = app.totals();
    assert_eq!(totals.files_changed, 2);
    assert_eq!(totals.additions, 3);
    assert_eq!(totals.deletions, 1);

    assert_eq!(app.commit_title(), "Tighten validation");
    assert_eq!(app.author_label(), "mika");
    assert_eq!(app.branch_label(), Some("main"));
    assert_eq!(app.commit_date_label().as_deref(), Some("2025-08-10 14:23"));
}

#[test]
fn numbers_rows_the_way_the_server_prefixes_them() {
    let mut app = app_from_fixture();
    app.move_selection(1);
    assert_eq!(app.selected_path(), Some("src/app.js"));

    let kinds = app
        .diff_rows
        .iter()
        .map(|row| row.kind)
        .collect::<Vec<_>>();
    assert_eq!(
        kinds,
        vec![
            RowKind::HunkHeader,
            RowKind::Context,
            RowKind::Removed,
            RowKind::Added,
            RowKind::Added,
            RowKind::Raw,
        ]
    );

    // Context advances both counters, removals only the old one, additions
    // only the new one.
    assert_eq!(app.diff_rows[1].old_line, Some(1));
    assert_eq!(app.diff_rows[1].new_line, Some(1));
    assert_eq!(app.diff_rows[2].old_line, Some(2));
    assert_eq!(app.diff_rows[2].new_line, None);
    assert_eq!(app.diff_rows[3].old_line, None);
    assert_eq!(app.diff_rows[3].new_line, Some(2));
    assert_eq!(app.diff_rows[5].old_line, Some(3));
    assert_eq!(app.diff_rows[5].new_line, Some(4));
}

#[test]
fn toggles_focus_between_file_list_and_diff() {
    let mut app = app_from_fixture();
    app.update_layout(Rect::new(0, 0, 120, 40));

    assert_eq!(app.pane_focus, PaneFocus::Sidebar);
    app.toggle_pane_focus();
    assert_eq!(app.pane_focus, PaneFocus::Diff);
    app.toggle_pane_focus();
    assert_eq!(app.pane_focus, PaneFocus::Sidebar);
}

#[test]
fn settings_panel_edits_values_in_memory() {
    let mut app = app_from_fixture();
    let initial_width = app.settings.sidebar_width;

    app.toggle_settings_panel();
    assert!(app.settings_open);

    // Third row adjusts the sidebar width.
    app.move_settings_selection(2);
    app.adjust_selected_setting(1);
    assert_eq!(app.settings.sidebar_width, initial_width + 2);

    app.move_settings_selection(-5);
    app.adjust_selected_setting(1);
    assert_ne!(app.settings.theme, AppSettings::default().theme);
}

#[test]
fn empty_batch_reports_the_notice() {
    let batch = CommitBatch {
        commits: Vec::new(),
        file_changes: HashMap::new(),
    };
    let app = App::from_batch(
        client(),
        vec![String::from("1")],
        None,
        None,
        batch,
        AppSettings::default(),
    );

    assert_eq!(app.selected_path(), None);
    assert!(app.diff_rows.is_empty());
    assert_eq!(app.status_text(), "No file changes found in this commit.");
    assert_eq!(app.commit_title(), "Commit details");
}

fn app_from_fixture() -> App {
    App::from_batch(
        client(),
        vec![String::from("42")],
        None,
        None,
        batch_from_json(),
        AppSettings::default(),
    )
}

fn client() -> ApiClient {
    ApiClient::new("http://localhost:8080", Some(String::from("test-token")))
}

// Mirrors the envelope the commit-batch endpoint returns.
fn batch_from_json() -> CommitBatch {
    let body = r#"{
        "success": true,
        "message": "Commit batch details retrieved successfully",
        "data": {
            "commits": [
                {
                    "id": 42,
                    "message": "Tighten validation",
                    "createdAt": "2025-08-10T14:23:05",
                    "branchName": "main",
                    "author": {
                        "id": 7,
                        "username": "mika",
                        "email": "mika@example.com"
                    }
                }
            ],
            "fileChanges": {
                "src/app.js": "@@ -1,3 +1,4 @@\n  const a = 1;\n- const b = 2;\n+ const b = 3;\n+ const c = 4;\n",
                "README.md": "@@ -1,1 +1,2 @@\n  # title\n+ more\n"
            },
            "totalCommits": 1
        }
    }"#;

    let envelope: ApiResponse<CommitBatch> =
        serde_json::from_str(body).expect("fixture should parse");
    envelope.data.expect("fixture should carry data")
}
