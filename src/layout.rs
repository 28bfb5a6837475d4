use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::widgets::{Block, Borders};

use crate::settings::{self, AppSettings};

pub const HEADER_BASE_HEIGHT: u16 = 4;
pub const COMMIT_LIST_MAX_ROWS: u16 = 6;
pub const MIN_DIFF_WIDTH_WITH_SIDEBAR: u16 = 48;
pub const SETTINGS_MODAL_WIDTH_PERCENT: u16 = 70;
pub const SETTINGS_MODAL_HEIGHT_PERCENT: u16 = 60;

pub struct RootAreas {
    pub header: Rect,
    pub main: Rect,
    pub footer: Rect,
}

// Multi-commit batches get one extra header row per listed commit.
pub fn header_height(commit_count: usize) -> u16 {
    if commit_count > 1 {
        HEADER_BASE_HEIGHT + (commit_count as u16).min(COMMIT_LIST_MAX_ROWS)
    } else {
        HEADER_BASE_HEIGHT
    }
}

pub fn split_root(root: Rect, header: u16) -> RootAreas {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(header),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(root);
    RootAreas {
        header: rows[0],
        main: rows[1],
        footer: rows[2],
    }
}

// The file list sits on the left; it collapses before the diff pane gets
// squeezed below a readable width.
pub fn split_main_area(area: Rect, settings: &AppSettings) -> (Option<Rect>, Rect) {
    if !settings.sidebar_visible {
        return (None, area);
    }

    if area.width <= MIN_DIFF_WIDTH_WITH_SIDEBAR {
        return (None, area);
    }

    let max_sidebar = area.width.saturating_sub(MIN_DIFF_WIDTH_WITH_SIDEBAR);
    let requested = settings
        .sidebar_width
        .clamp(settings::SIDEBAR_WIDTH_MIN, settings::SIDEBAR_WIDTH_MAX);
    let sidebar_width = requested.min(max_sidebar);
    if sidebar_width < settings::SIDEBAR_WIDTH_MIN {
        return (None, area);
    }

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(sidebar_width), Constraint::Min(1)])
        .split(area);

    (Some(chunks[0]), chunks[1])
}

pub fn centered_rect(horizontal_percent: u16, vertical_percent: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - vertical_percent) / 2),
            Constraint::Percentage(vertical_percent),
            Constraint::Percentage((100 - vertical_percent) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - horizontal_percent) / 2),
            Constraint::Percentage(horizontal_percent),
            Constraint::Percentage((100 - horizontal_percent) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}

pub fn settings_popup(area: Rect) -> Rect {
    centered_rect(
        SETTINGS_MODAL_WIDTH_PERCENT,
        SETTINGS_MODAL_HEIGHT_PERCENT,
        area,
    )
}

pub fn bordered_inner(area: Rect) -> Rect {
    Block::default().borders(Borders::ALL).inner(area)
}
