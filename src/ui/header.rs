use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::App;
use crate::layout;

use super::palette::{Palette, border_style, rgb};

pub(crate) fn render_summary(frame: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Commit ")
        .border_style(border_style(false, palette));

    let mut title_spans = vec![Span::styled(
        app.commit_title(),
        Style::default()
            .fg(rgb(palette.text))
            .add_modifier(Modifier::BOLD),
    )];
    if let Some(project) = app.project_label() {
        title_spans.push(Span::styled(
            format!("  [{project}]"),
            Style::default().fg(rgb(palette.dim)),
        ));
    }
    if let Some(name) = app.viewer_label() {
        title_spans.push(Span::styled(
            format!("  ·  Hi, {name}"),
            Style::default().fg(rgb(palette.dim)),
        ));
    }

    let totals = app.totals();
    let files_label = if totals.files_changed == 1 {
        "file"
    } else {
        "files"
    };

    let mut meta_spans = vec![Span::styled(
        app.author_label().to_owned(),
        Style::default().fg(rgb(palette.dim)),
    )];
    if let Some(date) = app.commit_date_label() {
        meta_spans.push(Span::styled(
            format!("  {date}"),
            Style::default().fg(rgb(palette.dim)),
        ));
    }
    if let Some(branch) = app.branch_label() {
        meta_spans.push(Span::styled(
            format!("  [{branch}]"),
            Style::default().fg(rgb(palette.dim)),
        ));
    }
    meta_spans.push(Span::styled(
        format!("  {} {files_label} changed", totals.files_changed),
        Style::default().fg(rgb(palette.dim)),
    ));
    meta_spans.push(Span::styled(
        format!("  +{}", totals.additions),
        Style::default().fg(rgb(palette.marker_add)),
    ));
    meta_spans.push(Span::styled(
        format!(" -{}", totals.deletions),
        Style::default().fg(rgb(palette.marker_remove)),
    ));

    let mut lines = vec![Line::from(title_spans), Line::from(meta_spans)];

    // A batch lists its commits under the summary, newest first.
    if app.commits.len() > 1 {
        for commit in app
            .commits
            .iter()
            .take(layout::COMMIT_LIST_MAX_ROWS as usize)
        {
            let mut spans = vec![
                Span::styled(
                    format!("{:<7}", commit.short_id()),
                    Style::default().fg(rgb(palette.line_no)),
                ),
                Span::raw("  "),
                Span::styled(
                    commit.message.clone().unwrap_or_default(),
                    Style::default().fg(rgb(palette.text)),
                ),
            ];
            if let Some(created) = commit.created_at {
                spans.push(Span::styled(
                    format!("  {}", created.format("%Y-%m-%d")),
                    Style::default().fg(rgb(palette.dim)),
                ));
            }
            lines.push(Line::from(spans));
        }
    }

    let paragraph = Paragraph::new(Text::from(lines))
        .style(Style::default().bg(rgb(palette.pane_bg)))
        .block(block);

    frame.render_widget(paragraph, area);
}
