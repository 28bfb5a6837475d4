use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

pub const SIDEBAR_WIDTH_MIN: u16 = 24;
pub const SIDEBAR_WIDTH_MAX: u16 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppTheme {
    Light,
    Dark,
}

impl AppTheme {
    pub fn cycle(self, delta: isize) -> Self {
        let items = [Self::Light, Self::Dark];
        cycle(items, self, delta)
    }

    pub fn toggle(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Light => "Light",
            Self::Dark => "Dark",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub theme: AppTheme,
    pub sidebar_visible: bool,
    pub sidebar_width: u16,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            theme: AppTheme::Dark,
            sidebar_visible: true,
            sidebar_width: 34,
        }
    }
}

impl AppSettings {
    pub fn normalize(&mut self) {
        self.sidebar_width = self
            .sidebar_width
            .clamp(SIDEBAR_WIDTH_MIN, SIDEBAR_WIDTH_MAX);
    }
}

pub fn load() -> Result<AppSettings> {
    let Some(config_path) = config_file_path() else {
        return Ok(AppSettings::default());
    };

    if !config_path.exists() {
        return Ok(AppSettings::default());
    }

    load_from(&config_path)
}

pub fn load_from(path: &Path) -> Result<AppSettings> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read settings at `{}`", path.display()))?;
    let mut settings: AppSettings = toml::from_str(&raw)
        .with_context(|| format!("failed to parse settings at `{}`", path.display()))?;
    settings.normalize();

    Ok(settings)
}

pub fn save(settings: &AppSettings) -> Result<PathBuf> {
    let Some(path) = config_file_path() else {
        bail!("unable to determine config path; set HOME or XDG_CONFIG_HOME");
    };

    save_to(settings, &path)?;
    Ok(path)
}

pub fn save_to(settings: &AppSettings, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| {
            format!(
                "failed to create config directory `{}`",
                parent.to_string_lossy()
            )
        })?;
    }

    let mut normalized = settings.clone();
    normalized.normalize();
    let toml = toml::to_string_pretty(&normalized).context("failed to serialize settings")?;

    fs::write(path, toml)
        .with_context(|| format!("failed to write settings to `{}`", path.display()))?;

    Ok(())
}

pub fn config_file_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.toml"))
}

pub(crate) fn config_dir() -> Option<PathBuf> {
    if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        return Some(PathBuf::from(xdg).join("commitview"));
    }

    env::var_os("HOME").map(|home| {
        PathBuf::from(home)
            .join(".config")
            .join("commitview")
    })
}

fn cycle<T: Copy + Eq, const N: usize>(items: [T; N], current: T, delta: isize) -> T {
    let len = items.len();
    let idx = items.iter().position(|item| *item == current).unwrap_or(0);

    let shift = if delta >= 0 {
        delta as usize % len
    } else {
        let abs = delta.unsigned_abs() % len;
        (len - abs) % len
    };

    items[(idx + shift) % len]
}

#[cfg(test)]
mod tests {
    use super::{AppSettings, AppTheme, SIDEBAR_WIDTH_MAX, load_from, save_to};

    #[test]
    fn settings_round_trip_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let settings = AppSettings {
            theme: AppTheme::Light,
            sidebar_visible: false,
            sidebar_width: 40,
        };
        save_to(&settings, &path).unwrap();

        let loaded = load_from(&path).unwrap();
        assert_eq!(loaded.theme, AppTheme::Light);
        assert!(!loaded.sidebar_visible);
        assert_eq!(loaded.sidebar_width, 40);
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "theme = \"light\"\n").unwrap();

        let loaded = load_from(&path).unwrap();
        assert_eq!(loaded.theme, AppTheme::Light);
        assert!(loaded.sidebar_visible);
        assert_eq!(loaded.sidebar_width, AppSettings::default().sidebar_width);
    }

    #[test]
    fn out_of_range_width_is_clamped_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "sidebar_width = 500\n").unwrap();

        let loaded = load_from(&path).unwrap();
        assert_eq!(loaded.sidebar_width, SIDEBAR_WIDTH_MAX);
    }

    #[test]
    fn theme_toggle_flips_between_light_and_dark() {
        assert_eq!(AppTheme::Dark.toggle(), AppTheme::Light);
        assert_eq!(AppTheme::Light.toggle(), AppTheme::Dark);
        assert_eq!(AppTheme::Dark.cycle(1), AppTheme::Dark.toggle());
        assert_eq!(AppTheme::Light.cycle(-1), AppTheme::Dark);
    }
}
