use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::{App, PaneFocus};
use crate::diff::{DiffRow, RowKind};
use crate::highlight::{Highlighter, LineHighlighter};

use super::palette::{Palette, border_style, rgb};

pub(crate) fn render_diff_pane(
    frame: &mut Frame,
    app: &App,
    area: Rect,
    highlighter: &Highlighter,
    palette: &Palette,
) {
    let focused = app.pane_focus == PaneFocus::Diff;
    let title = match app.selected_file() {
        Some(file) => format!(
            " {} (+{} -{}) ",
            file.path, file.stats.additions, file.stats.deletions
        ),
        None => String::from(" Diff "),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(border_style(focused, palette));

    let mut lines = Vec::new();
    if app.diff_rows.is_empty() {
        let placeholder = if app.changes.is_empty() {
            "No file changes found in this commit."
        } else {
            "Select a file to view changes"
        };
        lines.push(Line::styled(
            placeholder,
            Style::default().fg(rgb(palette.dim)),
        ));
    } else {
        let old_width = line_number_width(&app.diff_rows, |row| row.old_line);
        let new_width = line_number_width(&app.diff_rows, |row| row.new_line);
        let mut line_highlighter = highlighter.begin(app.selected_path(), app.settings.theme);

        for row in &app.diff_rows {
            lines.push(build_diff_line(
                row,
                old_width,
                new_width,
                &mut line_highlighter,
                palette,
            ));
        }
    }

    let scroll = to_u16(app.diff_scroll);
    let pane_style = Style::default()
        .fg(rgb(palette.text))
        .bg(rgb(palette.pane_bg));
    let paragraph = Paragraph::new(Text::from(lines))
        .block(block)
        .style(pane_style)
        .scroll((scroll, 0));

    frame.render_widget(paragraph, area);
}

// One terminal line per row: old number, new number, change marker, text.
// Parsed rows carry bare content, so the marker is rebuilt from the kind.
fn build_diff_line(
    row: &DiffRow,
    old_width: usize,
    new_width: usize,
    line_highlighter: &mut LineHighlighter<'_>,
    palette: &Palette,
) -> Line<'static> {
    let bg_rgb = background_for_kind(row.kind, palette);
    let (marker, marker_color) = match row.kind {
        RowKind::Added => ('+', palette.marker_add),
        RowKind::Removed => ('-', palette.marker_remove),
        _ => (' ', palette.marker_context),
    };

    let mut spans = vec![
        Span::styled(
            number_cell(row.kind, row.old_line, old_width),
            Style::default().fg(rgb(palette.line_no)),
        ),
        Span::raw(" "),
        Span::styled(
            number_cell(row.kind, row.new_line, new_width),
            Style::default().fg(rgb(palette.line_no)),
        ),
        Span::raw(" "),
        Span::styled(marker.to_string(), Style::default().fg(rgb(marker_color))),
        Span::raw(" "),
    ];

    match row.kind {
        RowKind::HunkHeader => spans.push(Span::styled(
            row.text.clone(),
            Style::default().fg(rgb(palette.dim)),
        )),
        RowKind::Raw => spans.push(Span::styled(
            row.text.clone(),
            Style::default().fg(rgb(palette.text)),
        )),
        _ => spans.extend(line_highlighter.highlight(&row.text, bg_rgb)),
    }

    Line::from(spans).style(Style::default().bg(rgb(bg_rgb)))
}

// Hunk headers have no position of their own; both gutter cells show "...".
fn number_cell(kind: RowKind, number: Option<u32>, width: usize) -> String {
    if kind == RowKind::HunkHeader {
        return format!("{:>width$}", "...", width = width);
    }

    match number {
        Some(value) => format!("{value:>width$}"),
        None => " ".repeat(width),
    }
}

fn background_for_kind(kind: RowKind, palette: &Palette) -> (u8, u8, u8) {
    match kind {
        RowKind::Added => palette.added_bg,
        RowKind::Removed => palette.removed_bg,
        RowKind::HunkHeader => palette.meta_bg,
        RowKind::Context | RowKind::Raw => palette.pane_bg,
    }
}

fn line_number_width(rows: &[DiffRow], pick: fn(&DiffRow) -> Option<u32>) -> usize {
    let max_line = rows.iter().filter_map(pick).max().unwrap_or(1);
    max_line.to_string().len().max(3)
}

fn to_u16(value: usize) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}

#[cfg(test)]
mod tests {
    use crate::diff::{DiffRow, RowKind, parse_diff};

    use super::{line_number_width, number_cell};

    #[test]
    fn hunk_header_number_cells_show_ellipsis() {
        assert_eq!(number_cell(RowKind::HunkHeader, None, 4), " ...");
        assert_eq!(number_cell(RowKind::Added, Some(7), 4), "   7");
        assert_eq!(number_cell(RowKind::Added, None, 4), "    ");
    }

    #[test]
    fn gutter_width_tracks_largest_line_number() {
        let rows: Vec<DiffRow> = parse_diff("@@ -998,3 +998,3 @@\n  a\n  b\n  c");

        assert_eq!(line_number_width(&rows, |row| row.old_line), 4);
        assert_eq!(line_number_width(&rows, |row| row.new_line), 4);
    }

    #[test]
    fn gutter_width_never_drops_below_ellipsis_width() {
        let rows: Vec<DiffRow> = parse_diff("@@ -1,1 +1,1 @@\n  a");

        assert_eq!(line_number_width(&rows, |row| row.old_line), 3);
    }
}
