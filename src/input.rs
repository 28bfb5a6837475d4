use crossterm::event::{Event, KeyCode, KeyEventKind, MouseButton, MouseEventKind};

use crate::app::App;
use crate::keymap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MainKeyAction {
    TogglePaneFocus,
    MoveUp,
    MoveDown,
    PageUp,
    PageDown,
    ScrollTop,
    ScrollBottom,
    ToggleTheme,
    ToggleSidebar,
    SidebarNarrow,
    SidebarWide,
    ToggleSettings,
    Refresh,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SettingsKeyAction {
    Close,
    MoveUp,
    MoveDown,
    AdjustLeft,
    AdjustRight,
}

pub fn handle_event(app: &mut App, event: Event) -> bool {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            if key.code == KeyCode::Char(keymap::KEY_QUIT) {
                return false;
            }

            if app.settings_open {
                handle_settings_key(app, key.code);
                return true;
            }

            if let Some(action) = map_main_key(key.code) {
                run_main_action(app, action);
            }
        }
        Event::Mouse(mouse) if !app.settings_open => match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => app.click(mouse.column, mouse.row),
            MouseEventKind::ScrollUp if app.is_in_diff(mouse.column, mouse.row) => {
                app.scroll_diff(-3);
            }
            MouseEventKind::ScrollDown if app.is_in_diff(mouse.column, mouse.row) => {
                app.scroll_diff(3);
            }
            _ => {}
        },
        _ => {}
    }

    true
}

fn map_main_key(code: KeyCode) -> Option<MainKeyAction> {
    match code {
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Left | KeyCode::Right => {
            Some(MainKeyAction::TogglePaneFocus)
        }
        KeyCode::Up | KeyCode::Char('k') => Some(MainKeyAction::MoveUp),
        KeyCode::Down | KeyCode::Char('j') => Some(MainKeyAction::MoveDown),
        KeyCode::PageUp => Some(MainKeyAction::PageUp),
        KeyCode::PageDown => Some(MainKeyAction::PageDown),
        KeyCode::Home => Some(MainKeyAction::ScrollTop),
        KeyCode::End => Some(MainKeyAction::ScrollBottom),
        KeyCode::Char(keymap::KEY_TOGGLE_THEME) => Some(MainKeyAction::ToggleTheme),
        KeyCode::Char(keymap::KEY_TOGGLE_SIDEBAR) => Some(MainKeyAction::ToggleSidebar),
        KeyCode::Char(keymap::KEY_SIDEBAR_NARROW) => Some(MainKeyAction::SidebarNarrow),
        KeyCode::Char(keymap::KEY_SIDEBAR_WIDE) => Some(MainKeyAction::SidebarWide),
        KeyCode::Char(keymap::KEY_OPEN_SETTINGS) => Some(MainKeyAction::ToggleSettings),
        KeyCode::Char(keymap::KEY_REFRESH) => Some(MainKeyAction::Refresh),
        _ => None,
    }
}

fn run_main_action(app: &mut App, action: MainKeyAction) {
    match action {
        MainKeyAction::TogglePaneFocus => app.toggle_pane_focus(),
        MainKeyAction::MoveUp => {
            if app.is_diff_focused() {
                app.scroll_diff(-1);
            } else {
                app.move_selection(-1);
            }
        }
        MainKeyAction::MoveDown => {
            if app.is_diff_focused() {
                app.scroll_diff(1);
            } else {
                app.move_selection(1);
            }
        }
        MainKeyAction::PageUp => app.scroll_diff(-10),
        MainKeyAction::PageDown => app.scroll_diff(10),
        MainKeyAction::ScrollTop => app.scroll_diff_to_start(),
        MainKeyAction::ScrollBottom => app.scroll_diff_to_end(),
        MainKeyAction::ToggleTheme => app.toggle_theme(),
        MainKeyAction::ToggleSidebar => app.toggle_sidebar_visibility(),
        MainKeyAction::SidebarNarrow => app.resize_sidebar(-1),
        MainKeyAction::SidebarWide => app.resize_sidebar(1),
        MainKeyAction::ToggleSettings => app.toggle_settings_panel(),
        MainKeyAction::Refresh => {
            if let Err(error) = app.refresh_with_message() {
                app.set_error(error);
            }
        }
    }
}

fn handle_settings_key(app: &mut App, code: KeyCode) {
    if let Some(action) = map_settings_key(code) {
        match action {
            SettingsKeyAction::Close => app.close_settings_panel(),
            SettingsKeyAction::MoveUp => app.move_settings_selection(-1),
            SettingsKeyAction::MoveDown => app.move_settings_selection(1),
            SettingsKeyAction::AdjustLeft => app.adjust_selected_setting(-1),
            SettingsKeyAction::AdjustRight => app.adjust_selected_setting(1),
        }
    }
}

fn map_settings_key(code: KeyCode) -> Option<SettingsKeyAction> {
    match code {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Char(keymap::KEY_SETTINGS_CLOSE) => {
            Some(SettingsKeyAction::Close)
        }
        KeyCode::Up | KeyCode::Char('k') => Some(SettingsKeyAction::MoveUp),
        KeyCode::Down | KeyCode::Char('j') => Some(SettingsKeyAction::MoveDown),
        KeyCode::Left | KeyCode::Char('h') => Some(SettingsKeyAction::AdjustLeft),
        KeyCode::Right | KeyCode::Char('l') => Some(SettingsKeyAction::AdjustRight),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyCode;

    use super::{MainKeyAction, SettingsKeyAction, map_main_key, map_settings_key};
    use crate::keymap;

    #[test]
    fn maps_main_keybindings_to_actions() {
        assert_eq!(
            map_main_key(KeyCode::Char(keymap::KEY_TOGGLE_THEME)),
            Some(MainKeyAction::ToggleTheme)
        );
        assert_eq!(
            map_main_key(KeyCode::Char(keymap::KEY_TOGGLE_SIDEBAR)),
            Some(MainKeyAction::ToggleSidebar)
        );
        assert_eq!(
            map_main_key(KeyCode::Char(keymap::KEY_REFRESH)),
            Some(MainKeyAction::Refresh)
        );
        assert_eq!(map_main_key(KeyCode::Home), Some(MainKeyAction::ScrollTop));
        assert_eq!(map_main_key(KeyCode::F(5)), None);
    }

    #[test]
    fn maps_settings_keybindings_to_actions() {
        assert_eq!(
            map_settings_key(KeyCode::Char(keymap::KEY_SETTINGS_CLOSE)),
            Some(SettingsKeyAction::Close)
        );
        assert_eq!(
            map_settings_key(KeyCode::Char('h')),
            Some(SettingsKeyAction::AdjustLeft)
        );
        assert_eq!(map_settings_key(KeyCode::Char('x')), None);
    }
}
