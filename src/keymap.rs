pub const KEY_QUIT: char = 'q';
pub const KEY_TOGGLE_THEME: char = 't';
pub const KEY_TOGGLE_SIDEBAR: char = 'b';
pub const KEY_SIDEBAR_NARROW: char = '[';
pub const KEY_SIDEBAR_WIDE: char = ']';
pub const KEY_OPEN_SETTINGS: char = 'o';
pub const KEY_REFRESH: char = 'r';

pub const KEY_SETTINGS_CLOSE: char = KEY_OPEN_SETTINGS;

pub fn footer_hint_settings() -> &'static str {
    "settings: j/k select, h/l change, Esc close"
}

pub fn footer_hint_main() -> String {
    format!(
        "Tab pane  Up/Down move-or-scroll  {} refresh  {} theme  {} sidebar  {}/{} width  {} settings  {} quit",
        KEY_REFRESH,
        KEY_TOGGLE_THEME,
        KEY_TOGGLE_SIDEBAR,
        KEY_SIDEBAR_NARROW,
        KEY_SIDEBAR_WIDE,
        KEY_OPEN_SETTINGS,
        KEY_QUIT,
    )
}
