use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::{App, PaneFocus};

use super::palette::{Palette, border_style, kind_color, rgb, selected_style};

pub(crate) fn render_file_list(frame: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    let focused = app.pane_focus == PaneFocus::Sidebar;
    let title = format!(" Files ({}) ", app.changes.len());
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(border_style(focused, palette));

    let visible_rows = app.layout.sidebar_inner.height as usize;
    let start = app
        .sidebar_scroll
        .min(app.changes.len().saturating_sub(visible_rows));
    let end = (start + visible_rows).min(app.changes.len());

    let mut lines = Vec::new();
    if app.changes.is_empty() {
        lines.push(Line::styled(
            "(none) batch has no file changes",
            Style::default().fg(rgb(palette.dim)),
        ));
    } else {
        for idx in start..end {
            let file = &app.changes.files()[idx];
            let selected = app.selected == Some(idx);
            let line_style = if selected {
                selected_style(focused, palette)
            } else {
                Style::default().fg(rgb(palette.text))
            };

            let mut spans = vec![
                Span::raw(if selected { "> " } else { "  " }),
                Span::styled(
                    file.kind.glyph().to_string(),
                    Style::default().fg(rgb(kind_color(file.kind, palette))),
                ),
                Span::raw(" "),
            ];

            spans.extend(path_spans(&file.path, palette));

            if file.stats.additions > 0 {
                spans.push(Span::styled(
                    format!(" +{}", file.stats.additions),
                    Style::default().fg(rgb(palette.marker_add)),
                ));
            }
            if file.stats.deletions > 0 {
                spans.push(Span::styled(
                    format!(" -{}", file.stats.deletions),
                    Style::default().fg(rgb(palette.marker_remove)),
                ));
            }

            lines.push(Line::from(spans).style(line_style));
        }
    }

    let paragraph = Paragraph::new(Text::from(lines))
        .style(Style::default().bg(rgb(palette.pane_bg)))
        .block(block);
    frame.render_widget(paragraph, area);
}

// Directory segments render dimmed so the file name stands out.
fn path_spans(path: &str, palette: &Palette) -> Vec<Span<'static>> {
    let segments = path.split('/').collect::<Vec<_>>();
    if segments.is_empty() {
        return vec![Span::styled(
            path.to_owned(),
            Style::default().fg(rgb(palette.text)),
        )];
    }

    let mut spans = Vec::new();
    for segment in &segments[..segments.len().saturating_sub(1)] {
        spans.push(Span::styled(
            format!("{segment}/"),
            Style::default().fg(rgb(palette.dim)),
        ));
    }

    let file_name = segments.last().copied().unwrap_or(path);
    spans.push(Span::styled(
        file_name.to_owned(),
        Style::default().fg(rgb(palette.text)),
    ));

    spans
}
