use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::Result;

pub const APP_QUALIFIER: &str = "com";
pub const APP_ORG: &str = "keykeeper";
pub const APP_NAME: &str = "keykeeper";

pub const DB_FILE_NAME: &str = "offline-phrasevault.db";
pub const LEGACY_APP_DIR: &str = "OfflinePhraseVault";
pub const FALLBACK_DB_FILE_NAME: &str = "keykeeper.db";

/// `%APPDATA%\OfflinePhraseVault` when `APPDATA` is set (older installs
/// keep their database there), otherwise the platform data directory,
/// otherwise the working directory.
pub fn default_db_path() -> Result<PathBuf> {
    if let Some(appdata) = std::env::var_os("APPDATA").filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(appdata).join(LEGACY_APP_DIR).join(DB_FILE_NAME));
    }
    if let Some(dirs) = ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME) {
        return Ok(dirs.data_dir().join(DB_FILE_NAME));
    }
    Ok(std::env::current_dir()?.join(DB_FILE_NAME))
}

/// Create the parent directory of `path`. If that fails, use
/// `keykeeper.db` in the working directory instead.
pub fn prepare_db_path(path: PathBuf) -> Result<PathBuf> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            match std::fs::create_dir_all(parent) {
                Ok(()) => Ok(path),
                Err(err) => {
                    tracing::warn!(
                        dir = %parent.display(),
                        error = %err,
                        "cannot create database directory, using working directory"
                    );
                    Ok(std::env::current_dir()?.join(FALLBACK_DB_FILE_NAME))
                }
            }
        }
        _ => Ok(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_missing_parent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a").join("b").join(DB_FILE_NAME);
        assert_eq!(prepare_db_path(path.clone()).unwrap(), path);
        assert!(dir.path().join("a").join("b").is_dir());
    }

    #[test]
    fn falls_back_when_parent_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"x").unwrap();
        let got = prepare_db_path(blocker.join(DB_FILE_NAME)).unwrap();
        assert_eq!(got.file_name().unwrap(), FALLBACK_DB_FILE_NAME);
    }

    #[test]
    fn bare_file_name_is_kept() {
        let path = PathBuf::from("local.db");
        assert_eq!(prepare_db_path(path.clone()).unwrap(), path);
    }

    #[test]
    fn default_path_ends_with_db_file() {
        let path = default_db_path().unwrap();
        assert_eq!(path.file_name().unwrap(), DB_FILE_NAME);
    }
}
