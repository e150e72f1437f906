// Rust guideline compliant 2026-10-18

//! Repository discovery and path management utilities.

use crate::error::{AppError, Result};
use roster_core::{Catalog, Config, SessionStore, SessionTable, UserStore};
use std::path::{Path, PathBuf};

/// Repository path metadata for a Roster workspace.
#[derive(Debug, Clone)]
pub struct RepoContext {
    root: PathBuf,
    roster_dir: PathBuf,
    users_path: PathBuf,
    sessions_path: PathBuf,
    config_path: PathBuf,
}

impl RepoContext {
    fn at(root: PathBuf) -> Self {
        let roster_dir = root.join(".roster");
        Self {
            root,
            users_path: roster_dir.join("users.jsonl"),
            sessions_path: roster_dir.join("sessions.json"),
            config_path: roster_dir.join("config.toml"),
            roster_dir,
        }
    }

    fn resolve_root(repo_root: Option<&Path>) -> Result<PathBuf> {
        Ok(match repo_root {
            Some(root) => root.to_path_buf(),
            None => std::env::current_dir()?,
        })
    }

    /// Discovers a Roster repository starting from an optional root.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The repository root cannot be resolved
    /// - The `.roster` directory is missing
    pub fn discover(repo_root: Option<&Path>) -> Result<Self> {
        let context = Self::at(Self::resolve_root(repo_root)?);
        if !context.roster_dir.exists() {
            return Err(AppError::RepoNotInitialized {
                path: context.roster_dir.clone(),
            });
        }
        Ok(context)
    }

    /// Creates the `.roster` directory and its files, keeping any that
    /// already exist.
    ///
    /// # Errors
    ///
    /// Returns an error if a directory or file cannot be created.
    pub fn init(repo_root: Option<&Path>) -> Result<Self> {
        let context = Self::at(Self::resolve_root(repo_root)?);

        if !context.roster_dir.exists() {
            std::fs::create_dir_all(&context.roster_dir)?;
        }
        if !context.users_path.exists() {
            std::fs::File::create(&context.users_path)?;
        }
        if !context.sessions_path.exists() {
            context.open_session_store()?.save(&SessionTable::new())?;
        }
        if !context.config_path.exists() {
            Config::default().save(&context.roster_dir)?;
        }

        Ok(context)
    }

    /// Returns the repository root path.
    #[must_use]
    pub fn root(&self) -> &Path {
        self.root.as_path()
    }

    /// Returns the `.roster` directory path.
    #[must_use]
    pub fn roster_dir(&self) -> &Path {
        self.roster_dir.as_path()
    }

    /// Returns the users JSONL path.
    #[must_use]
    pub fn users_path(&self) -> &Path {
        self.users_path.as_path()
    }

    /// Returns the sessions JSON path.
    #[must_use]
    pub fn sessions_path(&self) -> &Path {
        self.sessions_path.as_path()
    }

    /// Returns the config TOML path.
    #[must_use]
    pub fn config_path(&self) -> &Path {
        self.config_path.as_path()
    }

    /// Opens the user store.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be initialized.
    pub fn open_user_store(&self) -> Result<UserStore> {
        Ok(UserStore::new(self.users_path.clone())?)
    }

    /// Opens the session store.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be initialized.
    pub fn open_session_store(&self) -> Result<SessionStore> {
        Ok(SessionStore::new(self.sessions_path.clone())?)
    }

    /// Loads repository configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded.
    pub fn load_config(&self) -> Result<Config> {
        Ok(Config::load(self.roster_dir())?)
    }

    /// Loads the message catalog named by `config`, or the built-in one.
    ///
    /// Relative catalog paths are resolved against the `.roster` directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured catalog cannot be read or parsed.
    pub fn load_catalog(&self, config: &Config) -> Result<Catalog> {
        match &config.messages_path {
            Some(path) => Ok(Catalog::load(&self.roster_dir.join(path))?),
            None => Ok(Catalog::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_discover_requires_init() {
        let temp_dir = TempDir::new().unwrap();
        let err = RepoContext::discover(Some(temp_dir.path())).unwrap_err();
        assert!(matches!(err, AppError::RepoNotInitialized { .. }));
    }

    #[test]
    fn test_init_creates_layout() {
        let temp_dir = TempDir::new().unwrap();
        let context = RepoContext::init(Some(temp_dir.path())).unwrap();
        assert!(context.users_path().exists());
        assert!(context.sessions_path().exists());
        assert!(context.config_path().exists());

        let discovered = RepoContext::discover(Some(temp_dir.path())).unwrap();
        assert_eq!(discovered.roster_dir(), context.roster_dir());
        assert_eq!(discovered.open_session_store().unwrap().load().unwrap().online_count(), 0);
    }

    #[test]
    fn test_catalog_path_is_relative_to_roster_dir() {
        let temp_dir = TempDir::new().unwrap();
        let context = RepoContext::init(Some(temp_dir.path())).unwrap();
        std::fs::write(
            context.roster_dir().join("de.toml"),
            "userNotFound = \"Nicht gefunden.\"",
        )
        .unwrap();

        let config = Config {
            messages_path: Some(PathBuf::from("de.toml")),
            ..Config::default()
        };
        let catalog = context.load_catalog(&config).unwrap();
        assert_eq!(
            catalog.template(roster_core::MessageKey::UserNotFound),
            Some("Nicht gefunden.")
        );
    }
}
