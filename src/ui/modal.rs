use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Text};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::app::App;
use crate::layout;

use super::palette::{Palette, rgb};

pub(crate) fn render_settings_modal(frame: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    let popup = layout::settings_popup(area);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .title(" Settings ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(rgb(palette.modal_border)))
        .style(
            Style::default()
                .bg(rgb(palette.modal_bg))
                .fg(rgb(palette.text)),
        );
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let mut lines = Vec::new();
    for (idx, (label, value)) in app.settings_rows().iter().enumerate() {
        let prefix = if idx == app.settings_selected {
            ">"
        } else {
            " "
        };
        let style = if idx == app.settings_selected {
            Style::default()
                .fg(rgb(palette.text))
                .bg(rgb(palette.modal_selected_bg))
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(rgb(palette.text))
        };

        lines.push(Line::styled(format!("{prefix} {label:<18} {value}"), style));
    }

    lines.push(Line::from(""));
    lines.push(Line::styled(
        "Use Up/Down to choose a setting and Left/Right to change it.",
        Style::default().fg(rgb(palette.dim)),
    ));
    lines.push(Line::styled(
        "Settings save automatically.",
        Style::default().fg(rgb(palette.dim)),
    ));
    lines.push(Line::styled(
        format!("Config path: {}", app.config_path_display()),
        Style::default().fg(rgb(palette.dim)),
    ));

    let paragraph =
        Paragraph::new(Text::from(lines)).style(Style::default().bg(rgb(palette.modal_bg)));
    frame.render_widget(paragraph, inner);
}
