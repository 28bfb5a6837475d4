use ratatui::style::{Color, Modifier, Style};

use crate::changes::FileKind;
use crate::settings::AppTheme;

#[derive(Clone, Copy)]
pub(crate) struct Palette {
    pub pane_bg: (u8, u8, u8),
    pub meta_bg: (u8, u8, u8),
    pub added_bg: (u8, u8, u8),
    pub removed_bg: (u8, u8, u8),
    pub text: (u8, u8, u8),
    pub dim: (u8, u8, u8),
    pub line_no: (u8, u8, u8),
    pub marker_add: (u8, u8, u8),
    pub marker_remove: (u8, u8, u8),
    pub marker_context: (u8, u8, u8),
    pub border: (u8, u8, u8),
    pub border_focus: (u8, u8, u8),
    pub selected_bg_focused: (u8, u8, u8),
    pub selected_bg_unfocused: (u8, u8, u8),
    pub footer: (u8, u8, u8),
    pub modal_bg: (u8, u8, u8),
    pub modal_border: (u8, u8, u8),
    pub modal_selected_bg: (u8, u8, u8),
    pub status_warn: (u8, u8, u8),
    pub status_error: (u8, u8, u8),
    pub kind_script: (u8, u8, u8),
    pub kind_markup: (u8, u8, u8),
    pub kind_style: (u8, u8, u8),
    pub kind_code: (u8, u8, u8),
    pub kind_text: (u8, u8, u8),
    pub kind_image: (u8, u8, u8),
    pub kind_other: (u8, u8, u8),
}

pub(crate) fn palette_for(theme: AppTheme) -> Palette {
    match theme {
        AppTheme::Dark => Palette {
            pane_bg: (17, 20, 27),
            meta_bg: (35, 39, 47),
            added_bg: (21, 50, 36),
            removed_bg: (68, 30, 36),
            text: (224, 228, 236),
            dim: (136, 144, 160),
            line_no: (124, 132, 150),
            marker_add: (136, 216, 152),
            marker_remove: (232, 130, 140),
            marker_context: (136, 144, 160),
            border: (82, 90, 108),
            border_focus: (230, 185, 90),
            selected_bg_focused: (60, 70, 92),
            selected_bg_unfocused: (46, 55, 72),
            footer: (124, 132, 146),
            modal_bg: (24, 28, 37),
            modal_border: (150, 158, 176),
            modal_selected_bg: (63, 75, 101),
            status_warn: (230, 185, 90),
            status_error: (232, 130, 140),
            kind_script: (230, 192, 102),
            kind_markup: (232, 130, 140),
            kind_style: (122, 162, 247),
            kind_code: (136, 216, 152),
            kind_text: (122, 204, 194),
            kind_image: (136, 144, 160),
            kind_other: (124, 132, 150),
        },
        AppTheme::Light => Palette {
            pane_bg: (255, 255, 255),
            meta_bg: (241, 243, 245),
            added_bg: (230, 255, 237),
            removed_bg: (255, 235, 233),
            text: (36, 41, 47),
            dim: (110, 119, 129),
            line_no: (140, 149, 159),
            marker_add: (26, 127, 55),
            marker_remove: (207, 34, 46),
            marker_context: (140, 149, 159),
            border: (208, 215, 222),
            border_focus: (9, 105, 218),
            selected_bg_focused: (221, 244, 255),
            selected_bg_unfocused: (234, 238, 242),
            footer: (87, 96, 106),
            modal_bg: (246, 248, 250),
            modal_border: (140, 149, 159),
            modal_selected_bg: (221, 244, 255),
            status_warn: (154, 103, 0),
            status_error: (207, 34, 46),
            kind_script: (154, 103, 0),
            kind_markup: (207, 34, 46),
            kind_style: (9, 105, 218),
            kind_code: (26, 127, 55),
            kind_text: (32, 125, 160),
            kind_image: (110, 119, 129),
            kind_other: (87, 96, 106),
        },
    }
}

pub(crate) fn kind_color(kind: FileKind, palette: &Palette) -> (u8, u8, u8) {
    match kind {
        FileKind::Script => palette.kind_script,
        FileKind::Markup => palette.kind_markup,
        FileKind::Style => palette.kind_style,
        FileKind::Code => palette.kind_code,
        FileKind::Text => palette.kind_text,
        FileKind::Image => palette.kind_image,
        FileKind::Other => palette.kind_other,
    }
}

pub(crate) fn border_style(focused: bool, palette: &Palette) -> Style {
    if focused {
        Style::default().fg(rgb(palette.border_focus))
    } else {
        Style::default().fg(rgb(palette.border))
    }
}

pub(crate) fn selected_style(focused: bool, palette: &Palette) -> Style {
    if focused {
        Style::default()
            .fg(rgb(palette.text))
            .bg(rgb(palette.selected_bg_focused))
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(rgb(palette.text))
            .bg(rgb(palette.selected_bg_unfocused))
    }
}

pub(crate) fn rgb(value: (u8, u8, u8)) -> Color {
    Color::Rgb(value.0, value.1, value.2)
}
