use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::settings::config_dir;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
}

// A missing or blank session file means "not logged in"; only unreadable or
// unparseable files are errors.
pub fn load() -> Result<Option<Session>> {
    let Some(path) = session_file_path() else {
        return Ok(None);
    };

    if !path.exists() {
        return Ok(None);
    }

    let session = load_from(&path)?;
    if session.token.trim().is_empty() {
        return Ok(None);
    }
    Ok(Some(session))
}

pub fn load_from(path: &Path) -> Result<Session> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read session at `{}`", path.display()))?;
    toml::from_str(&raw)
        .with_context(|| format!("failed to parse session at `{}`", path.display()))
}

pub fn save(session: &Session) -> Result<PathBuf> {
    let Some(path) = session_file_path() else {
        bail!("unable to determine config path; set HOME or XDG_CONFIG_HOME");
    };

    save_to(session, &path)?;
    Ok(path)
}

pub fn save_to(session: &Session, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| {
            format!(
                "failed to create config directory `{}`",
                parent.to_string_lossy()
            )
        })?;
    }

    let toml = toml::to_string_pretty(session).context("failed to serialize session")?;
    fs::write(path, toml)
        .with_context(|| format!("failed to write session to `{}`", path.display()))?;

    Ok(())
}

// Returns whether a stored session was actually removed.
pub fn clear() -> Result<bool> {
    let Some(path) = session_file_path() else {
        return Ok(false);
    };

    if !path.exists() {
        return Ok(false);
    }

    fs::remove_file(&path)
        .with_context(|| format!("failed to remove session at `{}`", path.display()))?;
    Ok(true)
}

pub fn session_file_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("session.toml"))
}

#[cfg(test)]
mod tests {
    use super::{Session, load_from, save_to};

    #[test]
    fn session_round_trip_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.toml");

        let session = Session {
            token: "abc.def.ghi".to_owned(),
        };
        save_to(&session, &path).unwrap();

        assert_eq!(load_from(&path).unwrap(), session);
    }

    #[test]
    fn unparseable_session_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.toml");
        std::fs::write(&path, "token = [not toml").unwrap();

        assert!(load_from(&path).is_err());
    }
}
